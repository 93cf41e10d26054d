use serde::Serialize;

use crate::kiln::outliers::{self, OutlierSet};
use crate::kiln::physics::{KilnConfig, KilnConfigError, LossEstimate, PhysicsError};
use crate::kiln::readings::{self, Reading, ReadingError};
use crate::kiln::repair::{self, EconomicsPolicy, RepairAssessment};
use crate::units::TemperatureUnit;

/// 클링커 생산량 허용 상한 [kg/h].
const CLINKER_MAX_KG_PER_H: f64 = 1.0e8;

/// 한 번의 분석에 필요한 측정 입력 묶음.
#[derive(Debug, Clone)]
pub struct AnalysisInput {
    /// 위치별 센서 측정값 행렬. 행=위치, 열=같은 위치의 반복 측정
    pub matrix: Vec<Vec<f64>>,
    /// 측정값 단위
    pub temp_unit: TemperatureUnit,
    /// 클링커 생산량 [kg/h]
    pub clinker_kg_per_h: f64,
}

/// 분석 파이프라인 오류.
#[derive(Debug)]
pub enum AnalysisError {
    /// 구성 값 오류
    Config(KilnConfigError),
    /// 측정값 행렬 오류
    Reading(ReadingError),
    /// 물리식 정의역 오류
    Physics(PhysicsError),
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::Config(e) => write!(f, "구성 오류: {e}"),
            AnalysisError::Reading(e) => write!(f, "측정값 오류: {e}"),
            AnalysisError::Physics(e) => write!(f, "물리식 오류: {e}"),
        }
    }
}

impl std::error::Error for AnalysisError {}

impl From<KilnConfigError> for AnalysisError {
    fn from(value: KilnConfigError) -> Self {
        AnalysisError::Config(value)
    }
}

impl From<ReadingError> for AnalysisError {
    fn from(value: ReadingError) -> Self {
        AnalysisError::Reading(value)
    }
}

impl From<PhysicsError> for AnalysisError {
    fn from(value: PhysicsError) -> Self {
        AnalysisError::Physics(value)
    }
}

/// 치환 전 위치별 계산 행. CSV 등으로 내보낼 때 쓴다.
#[derive(Debug, Clone, Serialize)]
pub struct CalculationRow {
    /// 출구측 기준 거리 [m]
    pub length_m: u32,
    /// 평균 표면 온도 [K]
    pub temp_k: f64,
    /// 복사 손실 [kcal/kg]
    pub radiation_kcal_per_kg: f64,
    /// 대류 손실 [kcal/kg]
    pub convection_kcal_per_kg: f64,
    /// 총손실 [kcal/kg]
    pub total_kcal_per_kg: f64,
}

/// 분석 결과 전체. 표와 요약을 만드는 표시 계층에서 그대로 사용한다.
#[derive(Debug, Clone)]
pub struct KilnAnalysis {
    /// 분석에 쓴 킬른 구성
    pub config: KilnConfig,
    /// 위치별 대표 측정값
    pub readings: Vec<Reading>,
    /// 치환 전 손실 수열
    pub initial_losses: Vec<LossEstimate>,
    /// 치환 전 총 열손실 [kcal/kg]
    pub total_loss_kcal_per_kg: f64,
    /// 이상치 분류 결과
    pub outliers: OutlierSet,
    /// 보수 평가 결과
    pub repair: RepairAssessment,
}

impl KilnAnalysis {
    /// 내화물 손상이 의심되는 위치의 거리 목록 [m].
    pub fn damaged_lengths_m(&self) -> Vec<u32> {
        self.lengths_at(&self.outliers.high)
    }

    /// 코팅 형성이 의심되는 위치의 거리 목록 [m].
    pub fn coating_lengths_m(&self) -> Vec<u32> {
        self.lengths_at(&self.outliers.low)
    }

    fn lengths_at(&self, indices: &[usize]) -> Vec<u32> {
        indices
            .iter()
            .filter_map(|&i| self.readings.get(i).map(|r| r.length_m))
            .collect()
    }

    /// 치환 후 총손실 [kcal/kg]. 보수 모델링이 없으면 None.
    pub fn corrected_total_kcal_per_kg(&self) -> Option<f64> {
        match &self.repair {
            RepairAssessment::NoShellDamage => None,
            RepairAssessment::InconsistentSavings(sim) => Some(sim.corrected_total_kcal_per_kg),
            RepairAssessment::Estimated { simulation, .. } => {
                Some(simulation.corrected_total_kcal_per_kg)
            }
        }
    }

    /// 치환 전 계산표를 직렬화 가능한 행으로 만든다.
    pub fn export_rows(&self) -> Vec<CalculationRow> {
        self.readings
            .iter()
            .zip(self.initial_losses.iter())
            .map(|(reading, loss)| CalculationRow {
                length_m: reading.length_m,
                temp_k: reading.temp_k,
                radiation_kcal_per_kg: loss.radiation_kcal_per_kg,
                convection_kcal_per_kg: loss.convection_kcal_per_kg,
                total_kcal_per_kg: loss.total_kcal_per_kg,
            })
            .collect()
    }
}

/// 측정 행렬 하나에 대해 전체 파이프라인을 실행한다.
///
/// 집계 → 손실 계산 → 이상치 분류 → 보수 평가 순서로 진행하며, 호출 사이에
/// 공유하는 상태는 없다.
pub fn run(
    config: &KilnConfig,
    input: &AnalysisInput,
    policy: &EconomicsPolicy,
) -> Result<KilnAnalysis, AnalysisError> {
    if !input.clinker_kg_per_h.is_finite()
        || input.clinker_kg_per_h <= 0.0
        || input.clinker_kg_per_h > CLINKER_MAX_KG_PER_H
    {
        return Err(AnalysisError::Config(KilnConfigError::OutOfRange {
            name: "clinker_production",
            value: input.clinker_kg_per_h,
        }));
    }

    let readings = readings::aggregate(&input.matrix, input.temp_unit, config.interval_m)?;
    let temps_k: Vec<f64> = readings.iter().map(|r| r.temp_k).collect();
    let initial_losses = config.loss_series(&temps_k, input.clinker_kg_per_h)?;
    let totals: Vec<f64> = initial_losses.iter().map(|l| l.total_kcal_per_kg).collect();
    let total_loss_kcal_per_kg = totals.iter().sum();
    let outliers = outliers::detect(&totals);
    let repair = repair::estimate(
        &readings,
        &initial_losses,
        &outliers,
        config,
        input.clinker_kg_per_h,
        policy,
    )?;

    Ok(KilnAnalysis {
        config: config.clone(),
        readings,
        initial_losses,
        total_loss_kcal_per_kg,
        outliers,
        repair,
    })
}
