//! Integration tests for binding parameters to algorithm instances

use crate::test_helpers::{feature_params, init_logging};
use algo_params::algorithms::{AlgorithmFamily, AlgorithmHandle, FeatureAlgorithm, OrbSettings, SharedAlgorithm, SurfSettings};
use algo_params::parameters::{Parameter, ParameterError, ParserConfig, ValueSelector};
use approx::assert_relative_eq;

fn orb_with_features(n_features: i32) -> SharedAlgorithm {
    FeatureAlgorithm::Orb(OrbSettings {
        n_features,
        ..OrbSettings::default()
    })
    .into_shared()
}

fn orb_features(algorithm: &SharedAlgorithm) -> i32 {
    match &*algorithm.lock().unwrap() {
        FeatureAlgorithm::Orb(settings) => settings.n_features,
        other => panic!("expected ORB, got {:?}", other.family()),
    }
}

fn n_features() -> Parameter {
    init_logging();
    Parameter::from_line(
        "ORB;nFeatures;integer;Maximum number of features;500;1;5000;1;ADD",
        &ParserConfig::default(),
    )
}

#[test]
fn test_first_instance_wins() {
    let a = orb_with_features(42);
    let b = orb_with_features(900);
    let mut param = n_features();

    assert_eq!(param.add_algorithm(&AlgorithmHandle::new(&a)), Ok(true));
    assert_eq!(param.get_int_value(ValueSelector::Value), 42);
    assert_eq!(param.get_int_value(ValueSelector::Default), 42);

    // later instances are forced to the parameter's value
    assert_eq!(param.add_algorithm(&AlgorithmHandle::new(&b)), Ok(true));
    assert_eq!(orb_features(&b), 42);
    assert_eq!(param.get_int_value(ValueSelector::Value), 42);
}

#[test]
fn test_values_propagate_to_every_instance() {
    let instances: Vec<SharedAlgorithm> = (0..3).map(|_| orb_with_features(500)).collect();
    let mut param = n_features();
    for instance in &instances {
        param.add_algorithm(&AlgorithmHandle::new(instance)).unwrap();
    }

    param.set_int_value(1234, false).unwrap();
    for instance in &instances {
        assert_eq!(orb_features(instance), 1234);
    }

    // a rejected value is not pushed
    assert!(param.set_int_value(0, false).is_err());
    for instance in &instances {
        assert_eq!(orb_features(instance), 1234);
    }
}

#[test]
fn test_reset_resynchronizes_instances() {
    let a = orb_with_features(700);
    let mut param = n_features();
    param.add_algorithm(&AlgorithmHandle::new(&a)).unwrap();

    param.set_int_value(100, false).unwrap();
    assert_eq!(orb_features(&a), 100);

    assert_eq!(param.reset_to_default_value(), Ok(true));
    assert_eq!(orb_features(&a), 700);
}

#[test]
fn test_actual_value_reads_live_instance() {
    let a = orb_with_features(42);
    let mut param = n_features();
    param.add_algorithm(&AlgorithmHandle::new(&a)).unwrap();

    // the instance changes behind the parameter's back
    if let FeatureAlgorithm::Orb(settings) = &mut *a.lock().unwrap() {
        settings.n_features = 77;
    }
    assert_eq!(param.get_int_value(ValueSelector::Value), 42);
    assert_eq!(param.get_int_value(ValueSelector::Actual), 77);
}

#[test]
fn test_real_and_boolean_fields() {
    let surf = FeatureAlgorithm::Surf(SurfSettings {
        hessian_threshold: 400.0,
        ..SurfSettings::default()
    })
    .into_shared();
    let handle = AlgorithmHandle::new(&surf);
    let config = ParserConfig::default();

    let mut threshold = Parameter::from_line("SURF;hessianThreshold;double;desc;100;10;1000;10;ADD", &config);
    let mut upright = Parameter::from_line("SURF;upright;boolean;desc;false", &config);

    assert_eq!(threshold.add_algorithm(&handle), Ok(true));
    assert_eq!(upright.add_algorithm(&handle), Ok(true));
    assert_relative_eq!(threshold.get_double_value(ValueSelector::Value), 400.0);

    threshold.set_double_value(250.5, false).unwrap();
    upright.set_bool_value(true, false).unwrap();
    match &*surf.lock().unwrap() {
        FeatureAlgorithm::Surf(settings) => {
            assert_relative_eq!(settings.hessian_threshold, 250.5);
            assert!(settings.upright);
        }
        _ => unreachable!(),
    };
}

#[test]
fn test_unknown_field_binds_for_bookkeeping_only() {
    let a = orb_with_features(42);
    let mut param = Parameter::from_line("ORB;noSuchField;integer;desc;3;1;10;1;ADD", &ParserConfig::default());

    assert_eq!(param.add_algorithm(&AlgorithmHandle::new(&a)), Ok(false));
    assert!(!param.is_gettable());
    assert!(!param.is_settable());
    assert_eq!(param.algorithms().len(), 1);

    // the value still changes locally, nothing is pushed
    param.set_int_value(5, false).unwrap();
    assert_eq!(param.get_int_value(ValueSelector::Value), 5);
    assert_eq!(param.get_int_value(ValueSelector::Actual), 5);
    assert_eq!(orb_features(&a), 42);
}

#[test]
fn test_kind_must_match_field() {
    let a = orb_with_features(42);
    // nFeatures exists on ORB, but as an integer
    let mut param = Parameter::from_line("ORB;nFeatures;double;desc;3;1;10;1;ADD", &ParserConfig::default());
    assert_eq!(param.add_algorithm(&AlgorithmHandle::new(&a)), Ok(false));
    assert!(!param.is_settable());
}

#[test]
fn test_binding_errors() {
    let mut param = n_features();
    assert!(matches!(
        param.add_algorithm(&AlgorithmHandle::empty()),
        Err(ParameterError::InvalidHandle { .. })
    ));

    let dropped = AlgorithmHandle::new(&orb_with_features(1));
    assert!(matches!(
        param.add_algorithm(&dropped),
        Err(ParameterError::InvalidHandle { .. })
    ));
    assert!(param.algorithms().is_empty());

    let orb = orb_with_features(10);
    let sift = FeatureAlgorithm::new(AlgorithmFamily::Sift).into_shared();
    param.add_algorithm(&AlgorithmHandle::new(&orb)).unwrap();
    assert!(matches!(
        param.add_algorithm(&AlgorithmHandle::new(&sift)),
        Err(ParameterError::IncompatibleAlgorithm {
            expected: AlgorithmFamily::Orb,
            found: Some(AlgorithmFamily::Sift),
            ..
        })
    ));
}

#[test]
fn test_rebinding_after_removal_keeps_accessors() {
    let a = orb_with_features(42);
    let b = orb_with_features(900);
    let handle_a = AlgorithmHandle::new(&a);
    let mut param = n_features();

    param.add_algorithm(&handle_a).unwrap();
    param.set_int_value(64, false).unwrap();
    assert!(param.remove_algorithm(&handle_a));
    assert!(param.algorithms().is_empty());

    // not a first binding any more: b receives the current value
    assert_eq!(param.add_algorithm(&AlgorithmHandle::new(&b)), Ok(true));
    assert_eq!(orb_features(&b), 64);
    assert_eq!(param.get_int_value(ValueSelector::Default), 42);
}

#[test]
fn test_dropped_instance_is_skipped() {
    let a = orb_with_features(42);
    let mut param = n_features();
    {
        let b = orb_with_features(42);
        param.add_algorithm(&AlgorithmHandle::new(&a)).unwrap();
        param.add_algorithm(&AlgorithmHandle::new(&b)).unwrap();
    }

    param.set_int_value(99, false).unwrap();
    assert_eq!(orb_features(&a), 99);

    param.remove_all_algorithms();
    assert!(param.algorithms().is_empty());
}

#[test]
fn test_set_partial_acceptance() {
    let mut registry = feature_params();
    let orb = orb_with_features(42);
    let handle = AlgorithmHandle::new(&orb);

    let set = registry.get_param_set_mut("ORB").unwrap();
    let extra = Parameter::from_line("ORB;noSuchField;integer;desc;3;1;10;1;ADD", &ParserConfig::default());
    set.add_parameter(extra).unwrap();

    assert!(set.matches(&handle));
    assert!(!set.add_algorithm(&handle));

    // the fields ORB does have are bound and live
    let n = set.get_parameter("nFeatures").unwrap();
    assert!(n.is_settable());
    assert_eq!(n.get_int_value(ValueSelector::Value), 42);
    assert!(!set.get_parameter("noSuchField").unwrap().is_settable());
}
