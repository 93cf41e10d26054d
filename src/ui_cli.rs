use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::app::{self, AppError};
use crate::config::Config;
use crate::kiln::analysis::{self, AnalysisInput, CalculationRow, KilnAnalysis};
use crate::kiln::physics::{KilnConfig, LossEstimate};
use crate::kiln::repair::{RepairAssessment, RepairEconomics, RepairSimulation};
use crate::units::TemperatureUnit;

/// 루피 표기 관례상 라크(10만) 단위.
const LAKH: f64 = 1.0e5;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Analyze,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu() -> Result<MenuChoice, AppError> {
    println!("\n=== Kiln Heat Toolbox ===");
    println!("1) 셸 열손실 분석");
    println!("2) 설정");
    println!("0) 종료");
    loop {
        let sel = read_line("메뉴 선택: ")?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Analyze),
            "2" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("잘못된 입력입니다. 다시 선택하세요."),
        }
    }
}

/// 셸 열손실 분석 메뉴를 처리한다.
pub fn handle_analysis(cfg: &Config) -> Result<(), AppError> {
    println!("\n-- 셸 열손실 분석 --");
    println!("측정값 파일은 한 행이 한 위치이며 첫 행이 출구측 첫 구간입니다.");
    println!("같은 위치를 여러 번 측정했다면 한 행에 쉼표/공백으로 나열하세요. 평균을 사용합니다.");
    let path = read_line("측정값 파일 경로: ")?;
    let matrix = app::load_matrix(Path::new(path.trim()))?;

    let d = &cfg.input_defaults;
    let temp_unit = read_temp_unit(d.temp_unit)?;
    let diameter = read_f64_or("킬른 외경 [m]", d.diameter_m)?;
    let velocity = read_f64_or("주변 풍속 [m/s]", d.ambient_velocity_m_per_s)?;
    let ambient = read_f64_or("주변 온도", d.ambient_temp)?;
    let emissivity = read_f64_or("방사율 (0~1)", d.emissivity)?;
    let interval = read_u32_or("측정 간격 [m]", d.interval_m)?;
    let clinker = read_f64_or("클링커 생산량 [kg/h]", d.clinker_kg_per_h)?;

    let kiln_config = KilnConfig::new(diameter, velocity, ambient, temp_unit, emissivity, interval)
        .map_err(analysis::AnalysisError::Config)?;
    let input = AnalysisInput {
        matrix,
        temp_unit,
        clinker_kg_per_h: clinker,
    };
    let result = analysis::run(&kiln_config, &input, &cfg.economics)?;
    print_analysis(&result);

    let export = read_line("계산표를 CSV로 저장할 경로(건너뛰려면 엔터): ")?;
    if !export.trim().is_empty() {
        write_rows_csv(Path::new(export.trim()), &result.export_rows())?;
        println!("계산표를 저장했습니다.");
    }
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(cfg: &mut Config) -> Result<(), AppError> {
    println!("\n-- 설정 --");
    println!("현재 측정값 기본 단위: {:?}", cfg.input_defaults.temp_unit);
    println!("1) 측정값 기본 단위 변경");
    println!("2) 분석 기본값 변경");
    let sel = read_line("변경할 번호(취소하려면 엔터): ")?;
    match sel.trim() {
        "" => {}
        "1" => {
            cfg.input_defaults.temp_unit = read_temp_unit(cfg.input_defaults.temp_unit)?;
            println!("기본 단위가 {:?} 로 설정되었습니다.", cfg.input_defaults.temp_unit);
        }
        "2" => {
            let d = &mut cfg.input_defaults;
            d.diameter_m = read_f64_or("킬른 외경 [m]", d.diameter_m)?;
            d.ambient_velocity_m_per_s = read_f64_or("주변 풍속 [m/s]", d.ambient_velocity_m_per_s)?;
            d.ambient_temp = read_f64_or("주변 온도", d.ambient_temp)?;
            d.emissivity = read_f64_or("방사율 (0~1)", d.emissivity)?;
            d.interval_m = read_u32_or("측정 간격 [m]", d.interval_m)?;
            d.clinker_kg_per_h = read_f64_or("클링커 생산량 [kg/h]", d.clinker_kg_per_h)?;
            println!("분석 기본값을 갱신했습니다.");
        }
        _ => println!("잘못된 입력이므로 변경하지 않습니다."),
    }
    Ok(())
}

/// 위치별 계산표, 이상치, 보수 평가, 요약을 차례로 출력한다.
pub fn print_analysis(result: &KilnAnalysis) {
    let lengths: Vec<u32> = result.readings.iter().map(|r| r.length_m).collect();
    let temps: Vec<f64> = result.readings.iter().map(|r| r.temp_k).collect();
    print_loss_table(&lengths, &temps, &result.initial_losses);
    println!("총 열손실: {:.2} kcal/kg 클링커", result.total_loss_kcal_per_kg);

    println!(
        "\n이상치 경계 [kcal/kg]: 상한 {:.4}, 하한 {:.4}",
        result.outliers.upper_whisker, result.outliers.lower_whisker
    );
    if result.outliers.high.is_empty() {
        println!("고온 이상치가 없습니다.");
    } else {
        println!("고온 이상치 위치: {}", format_lengths(&result.damaged_lengths_m()));
    }
    if result.outliers.low.is_empty() {
        println!("저온 이상치가 없습니다.");
    } else {
        println!("저온 이상치 위치: {}", format_lengths(&result.coating_lengths_m()));
    }

    match &result.repair {
        RepairAssessment::NoShellDamage => {}
        RepairAssessment::InconsistentSavings(sim) => {
            print_simulation(&lengths, sim);
            println!(
                "경고: 치환 후 손실이 줄지 않았습니다({:.4} kcal/kg). 측정값을 점검하세요.",
                sim.savings_kcal_per_kg
            );
        }
        RepairAssessment::Estimated {
            simulation,
            economics,
        } => {
            print_simulation(&lengths, simulation);
            print_economics(economics);
        }
    }

    print_summary(result);
}

fn print_loss_table(lengths: &[u32], temps_k: &[f64], losses: &[LossEstimate]) {
    println!("\n위치[m]   온도[K]  복사[kcal/kg]  대류[kcal/kg]  총손실[kcal/kg]");
    for ((length, temp), loss) in lengths.iter().zip(temps_k.iter()).zip(losses.iter()) {
        println!(
            "{length:>7}  {temp:>8.1}  {:>13.4}  {:>13.4}  {:>15.4}",
            loss.radiation_kcal_per_kg, loss.convection_kcal_per_kg, loss.total_kcal_per_kg
        );
    }
}

fn print_simulation(lengths: &[u32], sim: &RepairSimulation) {
    println!("\n-- 보수 시뮬레이션 (치환 온도 {:.1}K) --", sim.substitute_temp_k);
    print_loss_table(lengths, &sim.corrected_temps_k, &sim.corrected_losses);
    println!("치환 후 총손실: {:.2} kcal/kg 클링커", sim.corrected_total_kcal_per_kg);
}

fn print_economics(economics: &RepairEconomics) {
    println!("연간 절감 석탄: {:.1} ton", economics.coal_saved_tons_per_year);
    println!(
        "연간 절감액: {:.2} 라크 루피",
        economics.money_saved_rupees_per_year / LAKH
    );
    println!(
        "보수 비용: {:.2} 라크 루피 (벽돌 {:.0}장)",
        economics.repair_cost_rupees / LAKH,
        economics.bricks_damaged
    );
}

fn print_summary(result: &KilnAnalysis) {
    println!("\n=== 요약 ===");
    println!("총 열손실: {:.2} kcal/kg 클링커", result.total_loss_kcal_per_kg);
    if result.outliers.low.is_empty() {
        println!("코팅 형성 의심 위치가 없습니다.");
    } else {
        println!(
            "코팅 형성 의심 위치: {}",
            format_lengths(&result.coating_lengths_m())
        );
    }
    match &result.repair {
        RepairAssessment::NoShellDamage => {
            println!("고온 이상치가 없어 보수가 필요하지 않습니다.");
        }
        RepairAssessment::InconsistentSavings(_) => {
            println!("치환 후 손실이 오히려 늘었습니다. 측정값이나 구성 값을 점검하세요.");
        }
        RepairAssessment::Estimated {
            simulation,
            economics,
        } => {
            println!(
                "내화물 손상 의심 구간 {}곳: {}",
                result.outliers.high.len(),
                format_lengths(&result.damaged_lengths_m())
            );
            println!("보수 시:");
            println!(
                "  클링커 1kg당 약 {:.2} kcal 절감",
                simulation.savings_kcal_per_kg
            );
            println!(
                "  연간 약 {:.2} 라크 루피 순절감 (보수 비용 차감 후)",
                economics.net_annual_savings_rupees / LAKH
            );
        }
    }
}

fn format_lengths(lengths_m: &[u32]) -> String {
    lengths_m
        .iter()
        .map(|l| format!("{l}m"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// 치환 전 계산표를 CSV 파일로 저장한다.
pub fn write_rows_csv(path: &Path, rows: &[CalculationRow]) -> Result<(), AppError> {
    let mut out =
        String::from("length_m,temp_k,radiation_kcal_per_kg,convection_kcal_per_kg,total_kcal_per_kg\n");
    for row in rows {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            row.length_m,
            row.temp_k,
            row.radiation_kcal_per_kg,
            row.convection_kcal_per_kg,
            row.total_kcal_per_kg
        ));
    }
    fs::write(path, out).map_err(AppError::Io)?;
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

fn read_f64_or(label: &str, default: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(&format!("{label} [{default}]: "))?;
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(default);
        }
        match trimmed.parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("숫자를 입력하세요."),
        }
    }
}

fn read_u32_or(label: &str, default: u32) -> Result<u32, AppError> {
    loop {
        let s = read_line(&format!("{label} [{default}]: "))?;
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(default);
        }
        match trimmed.parse::<u32>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("정수를 입력하세요."),
        }
    }
}

fn read_temp_unit(default: TemperatureUnit) -> Result<TemperatureUnit, AppError> {
    println!("온도 단위: 1=Celsius 2=Kelvin");
    let sel = read_line(&format!("선택(엔터={default:?}): "))?;
    Ok(match sel.trim() {
        "1" => TemperatureUnit::Celsius,
        "2" => TemperatureUnit::Kelvin,
        _ => default,
    })
}
