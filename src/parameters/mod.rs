//! # Parameter System
//!
//! This module provides the parameter model used to tune feature detection
//! and matching algorithms from a user interface. Parameters are declared in a
//! line-oriented configuration file, grouped per algorithm family, and bound
//! to live algorithm instances so that every value change is pushed into them.
//!
//! ## Key Features
//!
//! - **Typed values**: boolean, integer and real parameters with bounds and a step
//! - **Enumerable domains**: small integer domains can carry one label per value
//! - **Live binding**: a parameter pushes its value into every bound instance
//! - **Default capture**: defaults follow the configuration file, the first
//!   bound instance and explicit `set_default` requests
//! - **Optional locking**: [`SyncParameter`] guards every mutation with a lock
//! - **Serialization Support**: save and load registries as text or JSON
//!
//! ## Core Components
//!
//! - [`Parameter`]: one parameter and its binding protocol
//! - [`ParameterSet`]: the parameters of one algorithm family
//! - [`ParamSets`]: every set read from a configuration source
//! - [`SyncParameter`] and [`SyncParamSets`]: lock-guarded variants
//! - [`ParserConfig`]: separator and field count settings of the text format
//!
//! ## Example Usage
//!
//! ```rust
//! use algo_params::algorithms::{AlgorithmFamily, AlgorithmHandle, FeatureAlgorithm};
//! use algo_params::parameters::{ParamSets, ParserConfig, ValueSelector};
//!
//! let text = "\
//! ORB;nFeatures;integer;Maximum number of features;500;1;5000;1;ADD;;;;;;;;
//! ORB;scoreType;integer;Score algorithm;0;0;1;1;ADD;Harris;FAST;;;;;;
//! ";
//! let mut registry: ParamSets = ParamSets::from_str(text, &ParserConfig::default()).unwrap();
//!
//! // An instance owned by some processor
//! let orb = FeatureAlgorithm::new(AlgorithmFamily::Orb).into_shared();
//! let handle = AlgorithmHandle::new(&orb);
//!
//! let set = registry.get_param_set_for_mut(&handle).unwrap();
//! assert!(set.add_algorithm(&handle));
//!
//! // Changing a value updates the instance
//! let param = set.get_parameter_mut("nFeatures").unwrap();
//! param.set_int_value(1200, false).unwrap();
//! assert_eq!(param.get_int_value(ValueSelector::Actual), 1200);
//! ```

pub mod config;
pub mod domain;
pub mod param_sets;
pub mod parameter;
pub mod parameter_set;
pub mod parser;
pub mod sync;
pub mod value;


// Re-export key types
pub use config::ParserConfig;
pub use domain::UnevenDomain;
pub use param_sets::ParamSets;
pub use parameter::{Parameter, ParameterError};
pub use parameter_set::{AlgoParam, ParameterSet};
pub use parser::{ParseError, ParseStep};
pub use sync::{ParamLock, SyncParamSets, SyncParameter};
pub use value::{ParameterValue, StepMode, ValueKind, ValueSelector};
