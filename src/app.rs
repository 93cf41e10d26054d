use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigError};
use crate::kiln::analysis::{self, AnalysisError, AnalysisInput};
use crate::kiln::physics::KilnConfig;
use crate::ui_cli;
use crate::ui_cli::MenuChoice;
use crate::units::TemperatureUnit;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(ConfigError),
    /// 분석 파이프라인 오류
    Analysis(AnalysisError),
    /// 측정값 파일 해석 오류 (행 번호, 내용)
    ParseReading { line: usize, token: String },
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Analysis(e) => write!(f, "분석 오류: {e}"),
            AppError::ParseReading { line, token } => {
                write!(f, "측정값 파일 {line}행의 \"{token}\"을(를) 숫자로 읽을 수 없습니다")
            }
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<AnalysisError> for AppError {
    fn from(value: AnalysisError) -> Self {
        AppError::Analysis(value)
    }
}

/// 측정값 텍스트 파일을 행렬로 읽는다.
///
/// 한 행이 한 측정 위치이며, 같은 위치의 반복 측정값은 쉼표나 공백으로 나열한다.
/// 빈 행은 건너뛴다.
pub fn load_matrix(path: &Path) -> Result<Vec<Vec<f64>>, AppError> {
    let content = fs::read_to_string(path)?;
    let mut matrix = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let mut row = Vec::new();
        for token in trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            let value = token.parse::<f64>().map_err(|_| AppError::ParseReading {
                line: line_no + 1,
                token: token.to_string(),
            })?;
            row.push(value);
        }
        matrix.push(row);
    }
    Ok(matrix)
}

/// 일괄 실행 옵션. CLI 플래그와 설정 기본값에서 채워진다.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub input: PathBuf,
    pub temp_unit: TemperatureUnit,
    pub diameter_m: f64,
    pub ambient_velocity_m_per_s: f64,
    pub ambient_temp: f64,
    pub emissivity: f64,
    pub interval_m: u32,
    pub clinker_kg_per_h: f64,
    /// 치환 전 계산표를 저장할 CSV 경로
    pub export: Option<PathBuf>,
}

/// 측정값 파일 하나를 분석하고 결과를 출력한다.
pub fn run_batch(cfg: &Config, options: &BatchOptions) -> Result<(), AppError> {
    let matrix = load_matrix(&options.input)?;
    let kiln_config = KilnConfig::new(
        options.diameter_m,
        options.ambient_velocity_m_per_s,
        options.ambient_temp,
        options.temp_unit,
        options.emissivity,
        options.interval_m,
    )
    .map_err(AnalysisError::Config)?;
    let input = AnalysisInput {
        matrix,
        temp_unit: options.temp_unit,
        clinker_kg_per_h: options.clinker_kg_per_h,
    };
    let result = analysis::run(&kiln_config, &input, &cfg.economics)?;
    ui_cli::print_analysis(&result);
    if let Some(path) = &options.export {
        ui_cli::write_rows_csv(path, &result.export_rows())?;
        println!("계산표를 {}에 저장했습니다.", path.display());
    }
    Ok(())
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(config: &mut Config) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu()? {
            MenuChoice::Analyze => ui_cli::handle_analysis(config)?,
            MenuChoice::Settings => {
                ui_cli::handle_settings(config)?;
                config.save()?;
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("프로그램을 종료합니다.");
                break;
            }
        }
    }
    Ok(())
}
