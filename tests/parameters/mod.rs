//! Integration tests for the parameter system
//!
//! These tests verify that the parameter system behaves correctly in various scenarios.


// Tests for binding parameters to algorithm instances
mod binding_tests;

// Tests for the ParameterSet collection
mod parameter_set_tests;

// Tests for the ParamSets registry
mod param_sets_tests;

// Tests for the lock-guarded wrapper
mod sync_tests;
