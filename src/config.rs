use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::kiln::repair::EconomicsPolicy;
use crate::units::TemperatureUnit;

/// 분석 입력의 기본값. 대화형 입력과 CLI 플래그 생략 시에 쓰인다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputDefaults {
    /// 측정값 기본 단위
    pub temp_unit: TemperatureUnit,
    /// 킬른 외경 [m]
    pub diameter_m: f64,
    /// 주변 풍속 [m/s]
    pub ambient_velocity_m_per_s: f64,
    /// 주변 온도 (temp_unit 단위)
    pub ambient_temp: f64,
    /// 셸 표면 방사율 (0~1)
    pub emissivity: f64,
    /// 측정 간격 [m]
    pub interval_m: u32,
    /// 클링커 생산량 [kg/h]
    pub clinker_kg_per_h: f64,
}

impl Default for InputDefaults {
    fn default() -> Self {
        Self {
            temp_unit: TemperatureUnit::Celsius,
            diameter_m: 4.75,
            ambient_velocity_m_per_s: 0.0,
            ambient_temp: 29.0,
            emissivity: 0.77,
            interval_m: 1,
            clinker_kg_per_h: 290_000.0,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub input_defaults: InputDefaults,
    pub economics: EconomicsPolicy,
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ConfigError::Serde(e) => write!(f, "설정 파싱 오류: {e}"),
            ConfigError::Serialize(e) => write!(f, "설정 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    let path = Path::new("config.toml");
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg)?;
        Ok(cfg)
    }
}

fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write("config.toml", content)?;
    Ok(())
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        save_config(self)
    }
}
