//! Integration tests for the ParamSets registry

use crate::test_helpers::{feature_params, init_logging, padded, FEATURE_PARAMS};
use algo_params::algorithms::{AlgorithmFamily, AlgorithmHandle, FeatureAlgorithm};
use algo_params::parameters::{ParamSets, ParameterSet, ParserConfig, ValueSelector};
use algo_params::AlgoParamError;
use std::io::Cursor;

#[test]
fn test_malformed_line_halts_registry() {
    init_logging();
    let text = [
        padded("SURF;hessianThreshold;double;desc;100;10;1000;10;ADD"),
        "ORB;nFeatures;integer;desc;500;1;5000;1;ADD;;;".to_string(),
        padded("ORB;nLevels;integer;desc;8;1;16;1;ADD"),
    ]
    .join("\n");

    let registry: ParamSets = ParamSets::from_reader(Cursor::new(text), &ParserConfig::default()).unwrap();
    assert_eq!(registry.names(), vec!["SURF"]);
    assert!(registry.get_param_set("ORB").is_none());
}

#[test]
fn test_invalid_parameter_line_is_skipped() {
    init_logging();
    let text = [
        padded("ORB;nFeatures;integer;desc;500;1;5000;1;ADD"),
        padded("ORB;broken;integer;desc;x;1;5000;1;ADD"),
        padded("ORB;nLevels;integer;desc;8;1;16;1;ADD"),
    ]
    .join("\n");

    let registry: ParamSets = ParamSets::from_str(&text, &ParserConfig::default()).unwrap();
    assert_eq!(registry.get_param_set("ORB").unwrap().names(), vec!["nFeatures", "nLevels"]);
}

#[test]
fn test_repeated_name_keeps_first_line() {
    init_logging();
    let text = [
        padded("ORB;nFeatures;integer;desc;500;1;5000;1;ADD"),
        padded("ORB;nFeatures;integer;desc;500;1;10000;1;ADD"),
        padded("ORB;nLevels;integer;desc;8;1;16;1;ADD"),
    ]
    .join("\n");

    let registry: ParamSets = ParamSets::from_str(&text, &ParserConfig::default()).unwrap();
    let orb = registry.get_param_set("ORB").unwrap();
    assert_eq!(orb.names(), vec!["nFeatures", "nLevels"]);
    assert_eq!(orb.get_parameter("nFeatures").unwrap().get_int_value(ValueSelector::Max), 5000);
}

#[test]
fn test_custom_config() {
    init_logging();
    let config = ParserConfig {
        separator: '|',
        nb_value_descriptions_max: 2,
        nb_param_max_tag: 12,
    };
    let text = "\
FAST|type|integer|Neighborhood|2|0|2|1|ADD|a|b|c
ORB|scoreType|integer|Score|0|0|1|1|ADD|Harris|FAST|
";
    let registry: ParamSets = ParamSets::from_str(text, &config).unwrap();

    // three values exceed the label limit
    let fast_type = registry.get_param_set("FAST").unwrap().get_parameter("type").unwrap();
    assert!(!fast_type.is_enum());
    assert!(registry.get_param_set("ORB").unwrap().get_parameter("scoreType").unwrap().is_enum());
}

#[test]
fn test_lookup_by_instance() {
    let registry = feature_params();
    for family in AlgorithmFamily::ALL {
        let instance = FeatureAlgorithm::new(family).into_shared();
        let set = registry.get_param_set_for(&AlgorithmHandle::new(&instance));
        assert_eq!(set.map(|s| s.name()), Some(family.name()));
    }
}

#[test]
fn test_insert_set_replaces() {
    let mut registry = feature_params();
    let count = registry.len();

    let previous = registry.insert_set(ParameterSet::new("ORB"));
    assert_eq!(previous.map(|s| s.len()), Some(8));
    assert_eq!(registry.len(), count);
    assert!(registry.get_param_set("ORB").unwrap().is_empty());

    assert!(registry.insert_set(ParameterSet::new("AKAZE")).is_none());
    assert_eq!(registry.len(), count + 1);
}

#[test]
fn test_save_and_load() {
    let config = ParserConfig::default();
    let mut registry = feature_params();
    registry
        .get_param_set_mut("ORB")
        .unwrap()
        .get_parameter_mut("nFeatures")
        .unwrap()
        .set_int_value(2000, true)
        .unwrap();

    let dir = std::env::temp_dir().join(format!("algo-params-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let text_path = dir.join("feature_params.txt");
    registry.save(&text_path, &config).unwrap();
    let reloaded: ParamSets = ParamSets::load(&text_path, &config).unwrap();
    let n = reloaded.get_param_set("ORB").unwrap().get_parameter("nFeatures").unwrap();
    assert_eq!(n.get_int_value(ValueSelector::Default), 2000);

    let json_path = dir.join("feature_params.json");
    registry.save_json(&json_path).unwrap();
    let reloaded: ParamSets = ParamSets::load_json(&json_path).unwrap();
    assert_eq!(reloaded.names(), registry.names());
    assert_eq!(reloaded.to_config_string(&config), registry.to_config_string(&config));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_load_errors() {
    let missing = ParamSets::<algo_params::Parameter>::load("/nonexistent/params.txt", &ParserConfig::default());
    assert!(matches!(missing, Err(AlgoParamError::IoError(_))));

    let bad_json = ParamSets::<algo_params::Parameter>::from_json("{ not json");
    assert!(matches!(bad_json, Err(AlgoParamError::JsonError(_))));
}

#[test]
fn test_sample_file_is_complete() {
    let registry = feature_params();
    let lines = FEATURE_PARAMS.lines().count();
    assert_eq!(registry.iter().map(|s| s.len()).sum::<usize>(), lines);
    assert!(registry.to_string().contains("BFMatcher (2 parameters)"));
}
