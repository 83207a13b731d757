//! Integration tests for the ParameterSet collection

use crate::test_helpers::{feature_params, init_logging};
use algo_params::algorithms::{AlgorithmFamily, AlgorithmHandle, FeatureAlgorithm};
use algo_params::parameters::{Parameter, ParameterError, ParameterSet, ParameterValue, ParserConfig, StepMode, ValueSelector};

#[test]
fn test_set_lifecycle() {
    init_logging();
    let mut set: ParameterSet = ParameterSet::new("GFTT");
    assert!(set.is_empty());

    set.add_parameter(Parameter::integer("nfeatures", "Corners", 1000, 1, 10000, 1, StepMode::Additive))
        .unwrap();
    set.add_parameter(Parameter::boolean("useHarrisDetector", "Harris", false))
        .unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.names(), vec!["nfeatures", "useHarrisDetector"]);

    // explicit absence, never a placeholder
    assert!(set.get_parameter("k").is_none());
    assert!(set.get_parameter_mut("k").is_none());
    assert!(!set.contains("k"));
}

#[test]
fn test_rejects_without_mutating() {
    let mut set: ParameterSet = ParameterSet::new("ORB");
    set.add_parameter(Parameter::integer("nLevels", "", 8, 1, 16, 1, StepMode::Additive))
        .unwrap();

    let invalid = Parameter::from_line("ORB;nLevels;integer;desc;x;1;16;1;ADD", &ParserConfig::default());
    assert!(matches!(
        set.add_parameter(invalid),
        Err(ParameterError::Rejected { .. })
    ));

    let duplicate = Parameter::integer("nLevels", "different text", 3, 1, 16, 1, StepMode::Additive);
    assert!(set.add_parameter(duplicate).is_err());

    assert_eq!(set.len(), 1);
    assert_eq!(
        set.get_parameter("nLevels").unwrap().get_int_value(ValueSelector::Value),
        8
    );
}

#[test]
fn test_matches_is_case_insensitive_substring() {
    let registry = feature_params();
    let gftt = FeatureAlgorithm::new(AlgorithmFamily::Gftt).into_shared();
    let handle = AlgorithmHandle::new(&gftt);

    assert!(registry.get_param_set("GFTT").unwrap().matches(&handle));
    assert!(!registry.get_param_set("FAST").unwrap().matches(&handle));

    let lower: ParameterSet = ParameterSet::new("gftt");
    assert!(lower.matches(&handle));
}

#[test]
fn test_bulk_unbind() {
    let mut registry = feature_params();
    let a = FeatureAlgorithm::new(AlgorithmFamily::Sift).into_shared();
    let b = FeatureAlgorithm::new(AlgorithmFamily::Sift).into_shared();
    let handle_a = AlgorithmHandle::new(&a);
    let handle_b = AlgorithmHandle::new(&b);

    let set = registry.get_param_set_mut("SIFT").unwrap();
    assert!(set.add_algorithm(&handle_a));
    assert!(set.add_algorithm(&handle_b));
    assert!(set.iter().all(|p| p.algorithms().len() == 2));

    assert!(set.remove_algorithm(&handle_a));
    assert!(set.iter().all(|p| p.algorithms() == [handle_b.clone()]));

    set.remove_all_algorithms();
    assert!(set.iter().all(|p| p.algorithms().is_empty()));
}

#[test]
fn test_set_value_by_name_and_reset_all() {
    let mut registry = feature_params();
    let set = registry.get_param_set_mut("MSER").unwrap();

    set.set_value("delta", ParameterValue::Int(9), false).unwrap();
    set.set_value("maxVariation", ParameterValue::Real(0.5), false).unwrap();
    assert!(matches!(
        set.set_value("delta", ParameterValue::Real(9.0), false),
        Err(ParameterError::TypeMismatch { .. })
    ));
    assert!(matches!(
        set.set_value("nope", ParameterValue::Int(1), false),
        Err(ParameterError::ParameterNotFound { .. })
    ));

    assert_eq!(set.reset_all_to_default(), set.len());
    assert_eq!(
        set.get_parameter("delta").unwrap().get_int_value(ValueSelector::Value),
        5
    );
}

#[test]
fn test_display_lists_parameters() {
    let registry = feature_params();
    let text = registry.get_param_set("ORB").unwrap().to_string();
    assert!(text.starts_with("ORB (8 parameters)"));
    assert!(text.contains("scoreType"));
    assert!(text.contains("0:Harris, 1:FAST"));
    assert!(text.contains("firstLevel (integer) = 0 (constant)"));
}
