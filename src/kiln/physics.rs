use crate::units::{self, TemperatureUnit};

/// 슈테판-볼츠만 상수.
pub const STEFAN_BOLTZMANN: f64 = 5.67e-8;

/// 자연 대류와 강제 대류를 가르는 풍속 경계 [m/s].
pub const FORCED_CONVECTION_THRESHOLD_M_PER_S: f64 = 3.0;

/// 킬른 구성 값 검증 오류.
#[derive(Debug)]
pub enum KilnConfigError {
    /// 허용 범위를 벗어난 파라미터 (이름, 입력값)
    OutOfRange { name: &'static str, value: f64 },
}

impl std::fmt::Display for KilnConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KilnConfigError::OutOfRange { name, value } => {
                write!(f, "{name} 값 {value}이(가) 허용 범위를 벗어났습니다")
            }
        }
    }
}

impl std::error::Error for KilnConfigError {}

/// 물리식 정의역 오류.
#[derive(Debug)]
pub enum PhysicsError {
    /// 자연 대류식에 주변보다 낮은 표면 온도가 들어온 경우 (표면 K, 주변 K)
    SurfaceBelowAmbient { surface_k: f64, ambient_k: f64 },
}

impl std::fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhysicsError::SurfaceBelowAmbient {
                surface_k,
                ambient_k,
            } => write!(
                f,
                "표면 온도 {surface_k}K가 주변 온도 {ambient_k}K보다 낮아 자연 대류식을 적용할 수 없습니다"
            ),
        }
    }
}

impl std::error::Error for PhysicsError {}

/// 킬른 셸 형상과 주변 조건. 생성 시 검증하며 이후 변경하지 않는다.
#[derive(Debug, Clone)]
pub struct KilnConfig {
    /// 킬른 외경 [m]
    pub diameter_m: f64,
    /// 주변 풍속 [m/s]
    pub ambient_velocity_m_per_s: f64,
    /// 주변 온도 [K]
    pub ambient_temp_k: f64,
    /// 셸 표면 방사율 (0~1)
    pub emissivity: f64,
    /// 측정 간격 [m]
    pub interval_m: u32,
    /// 한 측정 구간의 셸 표면적 [m²] = π·외경·간격
    pub section_area_m2: f64,
}

impl KilnConfig {
    /// 파라미터를 검증하고 구간 표면적을 계산해 구성을 만든다.
    pub fn new(
        diameter_m: f64,
        ambient_velocity_m_per_s: f64,
        ambient_temp: f64,
        ambient_temp_unit: TemperatureUnit,
        emissivity: f64,
        interval_m: u32,
    ) -> Result<Self, KilnConfigError> {
        if !diameter_m.is_finite() || diameter_m <= 0.0 || diameter_m > 100.0 {
            return Err(KilnConfigError::OutOfRange {
                name: "diameter",
                value: diameter_m,
            });
        }
        if !ambient_velocity_m_per_s.is_finite()
            || !(0.0..=100.0).contains(&ambient_velocity_m_per_s)
        {
            return Err(KilnConfigError::OutOfRange {
                name: "ambient_velocity",
                value: ambient_velocity_m_per_s,
            });
        }
        let ambient_temp_k = units::to_kelvin(ambient_temp, ambient_temp_unit);
        if !ambient_temp_k.is_finite() || !(0.0..=373.0).contains(&ambient_temp_k) {
            return Err(KilnConfigError::OutOfRange {
                name: "ambient_temp",
                value: ambient_temp_k,
            });
        }
        if !emissivity.is_finite() || !(0.0..=1.0).contains(&emissivity) {
            return Err(KilnConfigError::OutOfRange {
                name: "emissivity",
                value: emissivity,
            });
        }
        if !(1..=10).contains(&interval_m) {
            return Err(KilnConfigError::OutOfRange {
                name: "interval",
                value: interval_m as f64,
            });
        }
        Ok(Self {
            diameter_m,
            ambient_velocity_m_per_s,
            ambient_temp_k,
            emissivity,
            interval_m,
            section_area_m2: std::f64::consts::PI * diameter_m * interval_m as f64,
        })
    }

    /// 한 구간의 복사 열손실 [kcal/hr]을 계산한다.
    ///
    /// 표면이 주변보다 차가우면 음수가 되며, 이는 측정 이상 신호이므로 그대로 둔다.
    pub fn radiation_loss(&self, surface_k: f64) -> f64 {
        self.emissivity
            * self.section_area_m2
            * STEFAN_BOLTZMANN
            * (surface_k.powi(4) - self.ambient_temp_k.powi(4))
    }

    /// 한 구간의 대류 열손실 [kcal/hr]을 계산한다.
    ///
    /// 풍속 3 m/s 미만이면 자연 대류식, 이상이면 강제 대류식을 쓴다. 자연 대류식은
    /// ΔT의 비정수 거듭제곱을 포함하므로 표면이 주변보다 차가우면 정의되지 않는다.
    pub fn convection_loss(&self, surface_k: f64) -> Result<f64, PhysicsError> {
        let delta_t = surface_k - self.ambient_temp_k;
        if self.ambient_velocity_m_per_s < FORCED_CONVECTION_THRESHOLD_M_PER_S {
            if delta_t < 0.0 {
                return Err(PhysicsError::SurfaceBelowAmbient {
                    surface_k,
                    ambient_k: self.ambient_temp_k,
                });
            }
            let film_temp = (surface_k + self.ambient_temp_k) / 2.0;
            Ok(80.33 * film_temp.powf(-0.724) * delta_t.powf(1.333) * self.section_area_m2)
        } else {
            Ok(28.03
                * (surface_k * self.ambient_temp_k).powf(-0.351)
                * self.ambient_velocity_m_per_s.powf(0.805)
                * self.diameter_m.powf(-0.195)
                * delta_t
                * self.section_area_m2)
        }
    }

    /// 표면 온도 하나에 대한 클링커 1kg당 손실 내역을 계산한다.
    pub fn loss_estimate(
        &self,
        surface_k: f64,
        clinker_kg_per_h: f64,
    ) -> Result<LossEstimate, PhysicsError> {
        let radiation = self.radiation_loss(surface_k) / clinker_kg_per_h;
        let convection = self.convection_loss(surface_k)? / clinker_kg_per_h;
        Ok(LossEstimate {
            radiation_kcal_per_kg: radiation,
            convection_kcal_per_kg: convection,
            total_kcal_per_kg: radiation + convection,
        })
    }

    /// 온도 수열 전체에 대한 손실 수열을 계산한다.
    pub fn loss_series(
        &self,
        temps_k: &[f64],
        clinker_kg_per_h: f64,
    ) -> Result<Vec<LossEstimate>, PhysicsError> {
        temps_k
            .iter()
            .map(|&t| self.loss_estimate(t, clinker_kg_per_h))
            .collect()
    }
}

/// 한 측정 위치의 클링커 1kg당 열손실 내역 [kcal/kg].
#[derive(Debug, Clone, Copy)]
pub struct LossEstimate {
    /// 복사 손실
    pub radiation_kcal_per_kg: f64,
    /// 대류 손실
    pub convection_kcal_per_kg: f64,
    /// 합계
    pub total_kcal_per_kg: f64,
}
