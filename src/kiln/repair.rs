use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::kiln::outliers::{self, OutlierSet};
use crate::kiln::physics::{KilnConfig, LossEstimate, PhysicsError};
use crate::kiln::readings::Reading;

/// 보수 경제성 계산에 쓰는 정책 상수. config.toml로 현장값을 덮어쓸 수 있다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomicsPolicy {
    /// 연간 가동 일수 [일]
    pub working_days_per_year: f64,
    /// 일일 가동 시간 [h]
    pub working_hours_per_day: f64,
    /// 석탄 발열량 [kcal/kg]
    pub coal_calorific_value_kcal_per_kg: f64,
    /// 석탄 단가 [루피/ton]
    pub coal_cost_per_ton_rupees: f64,
    /// 셸 강판 두께 [mm]
    pub shell_thickness_mm: f64,
    /// 내화 벽돌 높이 [mm]
    pub brick_height_mm: f64,
    /// 미터당 벽돌 링 수
    pub rings_per_meter: f64,
    /// 링 원주를 벽돌 수로 나누는 환산 계수 [mm]
    pub brick_arc_mm: f64,
    /// 벽돌 단가 [루피/장]
    pub brick_cost_rupees: f64,
}

impl Default for EconomicsPolicy {
    fn default() -> Self {
        Self {
            working_days_per_year: 330.0,
            working_hours_per_day: 24.0,
            coal_calorific_value_kcal_per_kg: 4500.0,
            coal_cost_per_ton_rupees: 4500.0,
            shell_thickness_mm: 16.0,
            brick_height_mm: 220.0,
            rings_per_meter: 5.0,
            brick_arc_mm: 71.5,
            brick_cost_rupees: 100.0,
        }
    }
}

/// 고온 이상치를 중앙값으로 치환한 시뮬레이션 결과.
#[derive(Debug, Clone)]
pub struct RepairSimulation {
    /// 치환 후 온도 수열 [K]. 고온 이상치 위치만 원본과 다르다.
    pub corrected_temps_k: Vec<f64>,
    /// 치환에 쓴 온도 [K]
    pub substitute_temp_k: f64,
    /// 치환 후 손실 수열
    pub corrected_losses: Vec<LossEstimate>,
    /// 치환 후 총손실 [kcal/kg]
    pub corrected_total_kcal_per_kg: f64,
    /// 총손실 절감량 [kcal/kg] = 치환 전 − 치환 후
    pub savings_kcal_per_kg: f64,
}

/// 연간 절감액과 보수 비용 추정.
#[derive(Debug, Clone)]
pub struct RepairEconomics {
    /// 연간 절감 열량 [kcal/년]
    pub savings_kcal_per_year: f64,
    /// 연간 절감 석탄량 [ton/년]
    pub coal_saved_tons_per_year: f64,
    /// 연간 절감액 [루피/년]
    pub money_saved_rupees_per_year: f64,
    /// 교체 대상 벽돌 수 [장]
    pub bricks_damaged: f64,
    /// 보수 비용 [루피]
    pub repair_cost_rupees: f64,
    /// 보수 비용 차감 후 연간 순절감액 [루피/년]
    pub net_annual_savings_rupees: f64,
}

/// 보수 평가 결과.
#[derive(Debug, Clone)]
pub enum RepairAssessment {
    /// 고온 이상치가 없어 보수 모델링을 생략한 경우
    NoShellDamage,
    /// 치환 후 손실이 줄지 않은 비정상 결과. 비용 계산은 하지 않는다.
    InconsistentSavings(RepairSimulation),
    /// 절감량과 보수 비용 추정까지 끝난 정상 결과
    Estimated {
        simulation: RepairSimulation,
        economics: RepairEconomics,
    },
}

/// 이상치 분류 결과로부터 보수 효과를 평가한다.
///
/// 고온 이상치만 내화물 손상으로 보고 중앙값으로 치환한다. 저온 이상치는
/// 코팅 형성으로 간주해 치환하지 않으며 중앙값 계산에서도 제외한다.
pub fn estimate(
    readings: &[Reading],
    initial_losses: &[LossEstimate],
    outliers: &OutlierSet,
    config: &KilnConfig,
    clinker_kg_per_h: f64,
    policy: &EconomicsPolicy,
) -> Result<RepairAssessment, PhysicsError> {
    if outliers.high.is_empty() {
        return Ok(RepairAssessment::NoShellDamage);
    }

    let excluded: HashSet<usize> = outliers
        .high
        .iter()
        .chain(outliers.low.iter())
        .copied()
        .collect();
    let all_temps: Vec<f64> = readings.iter().map(|r| r.temp_k).collect();
    let baseline: Vec<f64> = all_temps
        .iter()
        .enumerate()
        .filter(|(index, _)| !excluded.contains(index))
        .map(|(_, &t)| t)
        .collect();
    let substitute_temp_k = outliers::median(&baseline)
        .or_else(|| outliers::median(&all_temps))
        .unwrap_or(config.ambient_temp_k);

    let mut corrected_temps_k = all_temps;
    for &index in &outliers.high {
        if let Some(slot) = corrected_temps_k.get_mut(index) {
            *slot = substitute_temp_k;
        }
    }

    let corrected_losses = config.loss_series(&corrected_temps_k, clinker_kg_per_h)?;
    let original_total: f64 = initial_losses.iter().map(|l| l.total_kcal_per_kg).sum();
    let corrected_total: f64 = corrected_losses.iter().map(|l| l.total_kcal_per_kg).sum();
    let savings_kcal_per_kg = original_total - corrected_total;

    let simulation = RepairSimulation {
        corrected_temps_k,
        substitute_temp_k,
        corrected_losses,
        corrected_total_kcal_per_kg: corrected_total,
        savings_kcal_per_kg,
    };

    if savings_kcal_per_kg <= 0.0 {
        return Ok(RepairAssessment::InconsistentSavings(simulation));
    }

    let economics = annualize(
        savings_kcal_per_kg,
        outliers.high.len(),
        config,
        clinker_kg_per_h,
        policy,
    );
    Ok(RepairAssessment::Estimated {
        simulation,
        economics,
    })
}

/// 절감 열량을 연간 금액으로 환산하고 벽돌 교체 비용을 추정한다.
pub fn annualize(
    savings_kcal_per_kg: f64,
    damaged_locations: usize,
    config: &KilnConfig,
    clinker_kg_per_h: f64,
    policy: &EconomicsPolicy,
) -> RepairEconomics {
    let savings_kcal_per_h = savings_kcal_per_kg * clinker_kg_per_h;
    let working_hours_per_year = policy.working_days_per_year * policy.working_hours_per_day;
    let savings_kcal_per_year = savings_kcal_per_h * working_hours_per_year;
    let coal_saved_kg_per_year = savings_kcal_per_year / policy.coal_calorific_value_kcal_per_kg;
    let coal_saved_tons_per_year = coal_saved_kg_per_year / 1000.0;
    let money_saved_rupees_per_year = coal_saved_tons_per_year * policy.coal_cost_per_ton_rupees;

    let internal_diameter_mm = config.diameter_m * 1000.0 - 2.0 * policy.shell_thickness_mm;
    let bricks_per_ring = (std::f64::consts::PI * (internal_diameter_mm - policy.brick_height_mm)
        / policy.brick_arc_mm)
        .floor();
    let bricks_damaged = bricks_per_ring * policy.rings_per_meter * damaged_locations as f64;
    let repair_cost_rupees = bricks_damaged * policy.brick_cost_rupees;

    RepairEconomics {
        savings_kcal_per_year,
        coal_saved_tons_per_year,
        money_saved_rupees_per_year,
        bricks_damaged,
        repair_cost_rupees,
        net_annual_savings_rupees: money_saved_rupees_per_year - repair_cost_rupees,
    }
}
