use kiln_heat_toolbox::kiln::analysis::{self, AnalysisError, AnalysisInput};
use kiln_heat_toolbox::kiln::physics::{KilnConfig, KilnConfigError};
use kiln_heat_toolbox::kiln::readings::ReadingError;
use kiln_heat_toolbox::kiln::repair::{EconomicsPolicy, RepairAssessment};
use kiln_heat_toolbox::units::TemperatureUnit;

fn config() -> KilnConfig {
    KilnConfig::new(4.75, 1.0, 302.0, TemperatureUnit::Kelvin, 0.77, 1).expect("kiln config")
}

fn kelvin_input(matrix: Vec<Vec<f64>>) -> AnalysisInput {
    AnalysisInput {
        matrix,
        temp_unit: TemperatureUnit::Kelvin,
        clinker_kg_per_h: 290_000.0,
    }
}

#[test]
fn five_location_scenario_flags_and_repairs_the_spike() {
    let input = kelvin_input(vec![
        vec![400.0],
        vec![405.0],
        vec![410.0],
        vec![500.0],
        vec![415.0],
    ]);
    let result = analysis::run(&config(), &input, &EconomicsPolicy::default()).expect("analysis");

    assert_eq!(result.readings.len(), 5);
    assert_eq!(result.outliers.high, vec![3]);
    assert!(result.outliers.low.is_empty());
    assert_eq!(result.damaged_lengths_m(), vec![4]);
    assert!(result.coating_lengths_m().is_empty());

    let corrected_total = result.corrected_total_kcal_per_kg().expect("repair modeled");
    assert!(corrected_total < result.total_loss_kcal_per_kg);
    match &result.repair {
        RepairAssessment::Estimated { simulation, .. } => {
            assert!((simulation.substitute_temp_k - 407.5).abs() < 1e-9);
        }
        other => panic!("expected full estimate, got {other:?}"),
    }
}

#[test]
fn all_readings_at_ambient_lose_nothing() {
    let input = kelvin_input(vec![vec![302.0]; 6]);
    let result = analysis::run(&config(), &input, &EconomicsPolicy::default()).expect("analysis");

    assert!(result.total_loss_kcal_per_kg.abs() < 1e-12);
    for loss in &result.initial_losses {
        assert!(loss.total_kcal_per_kg.abs() < 1e-12);
    }
    assert!(result.outliers.high.is_empty());
    assert!(result.outliers.low.is_empty());
    assert!(matches!(result.repair, RepairAssessment::NoShellDamage));
    assert!(result.corrected_total_kcal_per_kg().is_none());
}

#[test]
fn celsius_rows_are_averaged_then_converted() {
    let input = AnalysisInput {
        matrix: vec![vec![127.0, 129.0], vec![131.0, 133.0]],
        temp_unit: TemperatureUnit::Celsius,
        clinker_kg_per_h: 290_000.0,
    };
    let result = analysis::run(&config(), &input, &EconomicsPolicy::default()).expect("analysis");

    assert_eq!(result.readings.len(), 2);
    assert!((result.readings[0].temp_k - 401.0).abs() < 1e-12);
    assert!((result.readings[1].temp_k - 405.0).abs() < 1e-12);
    assert_eq!(result.readings[0].length_m, 1);
    assert_eq!(result.readings[1].length_m, 2);
}

#[test]
fn interval_scales_reading_lengths() {
    let cfg = KilnConfig::new(4.75, 1.0, 302.0, TemperatureUnit::Kelvin, 0.77, 2).expect("config");
    let input = kelvin_input(vec![vec![400.0], vec![405.0], vec![410.0]]);
    let result = analysis::run(&cfg, &input, &EconomicsPolicy::default()).expect("analysis");
    let lengths: Vec<u32> = result.readings.iter().map(|r| r.length_m).collect();
    assert_eq!(lengths, vec![2, 4, 6]);
}

#[test]
fn clinker_rate_out_of_range_is_config_error() {
    let mut input = kelvin_input(vec![vec![400.0]]);
    input.clinker_kg_per_h = 0.0;
    let err = analysis::run(&config(), &input, &EconomicsPolicy::default())
        .expect_err("zero clinker rate");
    assert!(matches!(
        err,
        AnalysisError::Config(KilnConfigError::OutOfRange {
            name: "clinker_production",
            ..
        })
    ));
}

#[test]
fn ragged_matrix_is_rejected() {
    let input = kelvin_input(vec![vec![400.0, 401.0], vec![405.0]]);
    let err = analysis::run(&config(), &input, &EconomicsPolicy::default()).expect_err("ragged");
    assert!(matches!(
        err,
        AnalysisError::Reading(ReadingError::RaggedRow { row: 1, .. })
    ));
}

#[test]
fn empty_matrix_is_rejected() {
    let input = kelvin_input(Vec::new());
    let err = analysis::run(&config(), &input, &EconomicsPolicy::default()).expect_err("empty");
    assert!(matches!(
        err,
        AnalysisError::Reading(ReadingError::EmptyMatrix)
    ));
}

#[test]
fn non_finite_cell_is_rejected() {
    let input = kelvin_input(vec![vec![400.0], vec![f64::NAN]]);
    let err = analysis::run(&config(), &input, &EconomicsPolicy::default()).expect_err("nan cell");
    assert!(matches!(
        err,
        AnalysisError::Reading(ReadingError::NonFiniteCell { row: 1, col: 0, .. })
    ));
}

#[test]
fn below_ambient_natural_convection_aborts_the_pipeline() {
    let input = kelvin_input(vec![vec![250.0]]);
    let err = analysis::run(&config(), &input, &EconomicsPolicy::default())
        .expect_err("below ambient");
    assert!(matches!(err, AnalysisError::Physics(_)));
}

#[test]
fn export_rows_mirror_the_initial_series() {
    let input = kelvin_input(vec![
        vec![400.0],
        vec![405.0],
        vec![410.0],
        vec![500.0],
        vec![415.0],
    ]);
    let result = analysis::run(&config(), &input, &EconomicsPolicy::default()).expect("analysis");
    let rows = result.export_rows();

    assert_eq!(rows.len(), result.readings.len());
    assert_eq!(rows[3].length_m, 4);
    assert_eq!(rows[3].temp_k, 500.0);
    for (row, loss) in rows.iter().zip(result.initial_losses.iter()) {
        assert_eq!(row.total_kcal_per_kg, loss.total_kcal_per_kg);
    }
}
