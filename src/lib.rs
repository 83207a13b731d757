//! # algo-params
//!
//! `algo-params` is a parameter model for tunable computer vision algorithms.
//! It reads parameter declarations from a line-oriented configuration file,
//! exposes them as typed, bounded values a user interface can edit, and keeps
//! live algorithm instances synchronized with every edit.
//!
//! The library provides:
//! - A typed parameter with bounds, steps, enumerable domains and defaults
//! - Parameter sets grouped per algorithm family, and a registry of sets
//! - A binding protocol pushing values into feature detectors, descriptor
//!   extractors and matchers
//! - An optional lock-guarded wrapper for use from several threads
//!
//! ## Basic Usage
//!
//! ```
//! use algo_params::parameters::{ParamSets, ParserConfig, ValueSelector};
//!
//! let text = "SURF;hessianThreshold;double;Hessian threshold;100;10;1000;10;ADD;;;;;;;;\n";
//! let registry: ParamSets = ParamSets::from_str(text, &ParserConfig::default()).unwrap();
//!
//! let param = registry
//!     .get_param_set("SURF")
//!     .and_then(|set| set.get_parameter("hessianThreshold"))
//!     .unwrap();
//! assert_eq!(param.get_double_value(ValueSelector::Value), 100.0);
//! ```

// Public modules
pub mod error;

// Algorithm instances parameters bind to
pub mod algorithms;

// Parameter system
pub mod parameters;

// Re-exports for convenience
pub use error::{AlgoParamError, Result};
pub use parameters::{ParamSets, Parameter, ParameterSet, SyncParamSets, SyncParameter};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
