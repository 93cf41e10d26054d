//! 로터리 킬른 셸 열손실 분석 모듈 모음.

pub mod analysis;
pub mod outliers;
pub mod physics;
pub mod readings;
pub mod repair;

pub use analysis::{AnalysisError, AnalysisInput, CalculationRow, KilnAnalysis};
pub use outliers::OutlierSet;
pub use physics::{KilnConfig, KilnConfigError, LossEstimate, PhysicsError};
pub use readings::{Reading, ReadingError};
pub use repair::{EconomicsPolicy, RepairAssessment, RepairEconomics, RepairSimulation};
