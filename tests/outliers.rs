use kiln_heat_toolbox::kiln::outliers::{detect, median, quantile_linear};

#[test]
fn quantile_linear_interpolates_between_ranks() {
    let sorted = [1.0, 2.0, 3.0, 4.0];
    assert!((quantile_linear(&sorted, 0.0) - 1.0).abs() < 1e-12);
    assert!((quantile_linear(&sorted, 0.25) - 1.75).abs() < 1e-12);
    assert!((quantile_linear(&sorted, 0.5) - 2.5).abs() < 1e-12);
    assert!((quantile_linear(&sorted, 0.75) - 3.25).abs() < 1e-12);
    assert!((quantile_linear(&sorted, 1.0) - 4.0).abs() < 1e-12);
}

#[test]
fn median_handles_even_counts_and_unsorted_input() {
    assert_eq!(median(&[400.0, 405.0, 410.0, 415.0]), Some(407.5));
    assert_eq!(median(&[415.0, 400.0, 410.0, 405.0]), Some(407.5));
    assert_eq!(median(&[7.0]), Some(7.0));
    assert_eq!(median(&[]), None);
}

#[test]
fn equal_values_produce_no_outliers() {
    let set = detect(&[5.0; 8]);
    assert!(set.iqr().abs() < 1e-12);
    assert!(set.high.is_empty());
    assert!(set.low.is_empty());
}

#[test]
fn single_spike_is_a_high_outlier() {
    let set = detect(&[10.0, 11.0, 10.5, 50.0, 10.2]);
    assert_eq!(set.high, vec![3]);
    assert!(set.low.is_empty());
}

#[test]
fn single_dip_is_a_low_outlier() {
    let set = detect(&[10.0, 11.0, 10.5, 0.5, 10.2]);
    assert_eq!(set.low, vec![3]);
    assert!(set.high.is_empty());
}

#[test]
fn high_and_low_sets_are_disjoint() {
    let values = [3.0, 100.0, 5.0, 5.2, 4.9, 5.1, 0.01, 5.05];
    let set = detect(&values);
    assert!(set.upper_whisker >= set.lower_whisker);
    for index in &set.high {
        assert!(!set.low.contains(index));
    }
    for index in set.high.iter().chain(set.low.iter()) {
        assert!(*index < values.len());
    }
}

#[test]
fn detection_is_deterministic() {
    let values = [19.0, 20.4, 21.7, 53.3, 23.2];
    let first = detect(&values);
    let second = detect(&values);
    assert_eq!(first.high, second.high);
    assert_eq!(first.low, second.low);
    assert_eq!(first.upper_whisker, second.upper_whisker);
}

#[test]
fn empty_series_yields_empty_sets() {
    let set = detect(&[]);
    assert!(set.high.is_empty());
    assert!(set.low.is_empty());
}
