use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use kiln_heat_toolbox::app::{self, BatchOptions};
use kiln_heat_toolbox::config;
use kiln_heat_toolbox::units::TemperatureUnit;

/// 측정값 단위 CLI 인자.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnitArg {
    Celsius,
    Kelvin,
}

impl From<UnitArg> for TemperatureUnit {
    fn from(value: UnitArg) -> Self {
        match value {
            UnitArg::Celsius => TemperatureUnit::Celsius,
            UnitArg::Kelvin => TemperatureUnit::Kelvin,
        }
    }
}

/// 로터리 킬른 셸 열손실과 보수 경제성 분석 도구.
///
/// --input 없이 실행하면 대화형 메뉴가 열린다. 생략한 플래그는 config.toml의
/// 기본값으로 채운다.
#[derive(Debug, Parser)]
#[command(name = "kiln_heat_toolbox", version, about)]
struct Cli {
    /// 측정값 파일 경로. 주어지면 메뉴 없이 일괄 분석한다
    #[arg(long)]
    input: Option<PathBuf>,
    /// 측정값/주변 온도 단위
    #[arg(long, value_enum)]
    unit: Option<UnitArg>,
    /// 킬른 외경 [m]
    #[arg(long)]
    diameter: Option<f64>,
    /// 주변 풍속 [m/s]
    #[arg(long)]
    velocity: Option<f64>,
    /// 주변 온도 (--unit 단위)
    #[arg(long)]
    ambient: Option<f64>,
    /// 셸 표면 방사율 (0~1)
    #[arg(long)]
    emissivity: Option<f64>,
    /// 측정 간격 [m]. 연속한 두 측정 위치 사이의 거리
    #[arg(long)]
    interval: Option<u32>,
    /// 클링커 생산량 [kg/h]
    #[arg(long)]
    clinker: Option<f64>,
    /// 치환 전 계산표를 저장할 CSV 경로
    #[arg(long)]
    export: Option<PathBuf>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 일괄 또는 대화형으로 실행한다.
fn main() {
    if let Err(err) = try_run() {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut cfg = config::load_or_default()?;
    match cli.input {
        Some(input) => {
            let d = &cfg.input_defaults;
            let options = BatchOptions {
                input,
                temp_unit: cli.unit.map(TemperatureUnit::from).unwrap_or(d.temp_unit),
                diameter_m: cli.diameter.unwrap_or(d.diameter_m),
                ambient_velocity_m_per_s: cli.velocity.unwrap_or(d.ambient_velocity_m_per_s),
                ambient_temp: cli.ambient.unwrap_or(d.ambient_temp),
                emissivity: cli.emissivity.unwrap_or(d.emissivity),
                interval_m: cli.interval.unwrap_or(d.interval_m),
                clinker_kg_per_h: cli.clinker.unwrap_or(d.clinker_kg_per_h),
                export: cli.export,
            };
            app::run_batch(&cfg, &options)?;
        }
        None => app::run(&mut cfg)?,
    }
    Ok(())
}
