//! Integration tests for the lock-guarded wrapper

use crate::test_helpers::{init_logging, FEATURE_PARAMS};
use algo_params::algorithms::{AlgorithmHandle, FeatureAlgorithm, OrbSettings};
use algo_params::parameters::{ParamLock, ParamSets, ParserConfig, SyncParamSets, ValueSelector};
use std::sync::{Arc, Mutex};
use std::thread;

fn sync_registry(lock: &ParamLock) -> SyncParamSets {
    init_logging();
    let mut registry: SyncParamSets = ParamSets::from_str(FEATURE_PARAMS, &ParserConfig::default()).unwrap();
    registry.set_lock(Some(lock.clone()));
    registry
}

#[test]
fn test_sync_registry_binds_and_propagates() {
    let lock: ParamLock = Arc::new(Mutex::new(()));
    let mut registry = sync_registry(&lock);
    let orb = FeatureAlgorithm::Orb(OrbSettings::default()).into_shared();
    let handle = AlgorithmHandle::new(&orb);

    let set = registry.get_param_set_for_mut(&handle).unwrap();
    assert!(set.add_algorithm(&handle));

    let wta_k = set.get_parameter_mut("WTA_K").unwrap();
    assert!(wta_k.is_enum());
    wta_k.set_index_value(2, false).unwrap();
    assert_eq!(wta_k.get_int_value(ValueSelector::Actual), 4);

    assert_eq!(set.reset_all_to_default(), set.len());
    assert_eq!(set.get_parameter("WTA_K").unwrap().get_int_value(ValueSelector::Actual), 2);
}

#[test]
fn test_worker_and_ui_share_the_lock() {
    let lock: ParamLock = Arc::new(Mutex::new(()));
    let registry = sync_registry(&lock);
    let orb = FeatureAlgorithm::Orb(OrbSettings::default()).into_shared();

    let mut set = registry.get_param_set("ORB").unwrap().clone();
    set.add_algorithm(&AlgorithmHandle::new(&orb));

    // the processing side holds the lock while it reads a consistent snapshot
    let worker = {
        let lock = lock.clone();
        let orb = orb.clone();
        thread::spawn(move || {
            for _ in 0..100 {
                let _guard = lock.lock().unwrap();
                let snapshot = match &*orb.lock().unwrap() {
                    FeatureAlgorithm::Orb(settings) => settings.clone(),
                    _ => unreachable!(),
                };
                assert!(snapshot.n_features >= 1 && snapshot.n_features <= 5000);
            }
        })
    };

    let n_features = set.get_parameter_mut("nFeatures").unwrap();
    for value in 1..=100 {
        n_features.set_int_value(value * 10, false).unwrap();
    }
    worker.join().unwrap();

    assert_eq!(n_features.get_int_value(ValueSelector::Actual), 1000);
}

#[test]
fn test_json_restores_unlocked() {
    let lock: ParamLock = Arc::new(Mutex::new(()));
    let registry = sync_registry(&lock);
    let json = registry.to_json().unwrap();

    let restored: SyncParamSets = ParamSets::from_json(&json).unwrap();
    assert_eq!(restored.len(), registry.len());
    assert!(restored.iter().flat_map(|s| s.iter()).all(|p| p.lock().is_none()));
}
