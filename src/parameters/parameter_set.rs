//! Parameter set implementation
//!
//! A [`ParameterSet`] groups the parameters of one algorithm family under the
//! family name used in the configuration file (e.g. `ORB`, `SURF`).

use crate::algorithms::{self, AlgorithmHandle};
use crate::parameters::config::ParserConfig;
use crate::parameters::parameter::{Parameter, ParameterError};
use crate::parameters::value::ParameterValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a set and a registry need from the parameters they hold
///
/// Implemented by [`Parameter`] itself and by the lock-guarded
/// [`SyncParameter`](crate::parameters::SyncParameter).
pub trait AlgoParam: fmt::Display {
    /// Build a parameter from one configuration line
    fn from_line(line: &str, config: &ParserConfig) -> Self
    where
        Self: Sized;

    /// The underlying parameter, for read-only queries
    fn param(&self) -> &Parameter;

    fn add_algorithm(&mut self, handle: &AlgorithmHandle) -> Result<bool, ParameterError>;

    fn remove_algorithm(&mut self, handle: &AlgorithmHandle) -> bool;

    fn remove_all_algorithms(&mut self);

    fn set_value(&mut self, value: ParameterValue, set_default: bool) -> Result<(), ParameterError>;

    fn reset_to_default_value(&mut self) -> Result<bool, ParameterError>;
}

impl AlgoParam for Parameter {
    fn from_line(line: &str, config: &ParserConfig) -> Self {
        Parameter::from_line(line, config)
    }

    fn param(&self) -> &Parameter {
        self
    }

    fn add_algorithm(&mut self, handle: &AlgorithmHandle) -> Result<bool, ParameterError> {
        Parameter::add_algorithm(self, handle)
    }

    fn remove_algorithm(&mut self, handle: &AlgorithmHandle) -> bool {
        Parameter::remove_algorithm(self, handle)
    }

    fn remove_all_algorithms(&mut self) {
        Parameter::remove_all_algorithms(self)
    }

    fn set_value(&mut self, value: ParameterValue, set_default: bool) -> Result<(), ParameterError> {
        Parameter::set_value(self, value, set_default)
    }

    fn reset_to_default_value(&mut self) -> Result<bool, ParameterError> {
        Parameter::reset_to_default_value(self)
    }
}

/// The parameters of one algorithm family
///
/// Parameters keep their insertion order, which is the order of the lines in
/// the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSet<P = Parameter> {
    name: String,
    parameters: Vec<P>,
}

impl<P: AlgoParam> ParameterSet<P> {
    /// Create an empty set
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_params::parameters::ParameterSet;
    ///
    /// let set: ParameterSet = ParameterSet::new("ORB");
    /// assert_eq!(set.name(), "ORB");
    /// assert!(set.is_empty());
    /// ```
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parameters: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Add a parameter to the set
    ///
    /// # Arguments
    ///
    /// * `param` - The parameter to take ownership of
    ///
    /// # Returns
    ///
    /// `Ok(())` if the parameter was added, or `ParameterError::Rejected` if
    /// it is not valid or a parameter with the same name is already in the
    /// set. A rejected parameter leaves the set unchanged.
    pub fn add_parameter(&mut self, param: P) -> Result<(), ParameterError> {
        let base = param.param();
        let reason = if !base.is_ok() {
            Some("parameter is not valid")
        } else if self.contains(base.name()) {
            Some("a parameter with this name already exists")
        } else {
            None
        };

        if let Some(reason) = reason {
            let error = ParameterError::Rejected {
                name: base.name().to_string(),
                reason: reason.to_string(),
            };
            log::warn!("set '{}': {}", self.name, error);
            return Err(error);
        }

        self.parameters.push(param);
        Ok(())
    }

    /// Look a parameter up by name
    pub fn get_parameter(&self, name: &str) -> Option<&P> {
        self.parameters.iter().find(|p| p.param().name() == name)
    }

    pub fn get_parameter_mut(&mut self, name: &str) -> Option<&mut P> {
        self.parameters.iter_mut().find(|p| p.param().name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get_parameter(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &P> {
        self.parameters.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut P> {
        self.parameters.iter_mut()
    }

    pub fn names(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.param().name()).collect()
    }

    /// `true` when the class name of the instance mentions this set's name
    ///
    /// The comparison is a case-insensitive substring test.
    pub fn matches(&self, handle: &AlgorithmHandle) -> bool {
        handle
            .class_name()
            .map_or(false, |class_name| algorithms::name_matches(class_name, &self.name))
    }

    /// Bind an instance to every parameter of the set
    ///
    /// Every parameter is offered the instance even after one declines.
    /// Returns `true` only when all of them accepted it; instances rarely
    /// expose every field listed in a set, so `false` is common and does not
    /// undo the bindings that did succeed.
    pub fn add_algorithm(&mut self, handle: &AlgorithmHandle) -> bool {
        let mut accepted = true;
        for param in &mut self.parameters {
            match param.add_algorithm(handle) {
                Ok(true) => {}
                Ok(false) => accepted = false,
                Err(e) => {
                    log::debug!("set '{}': {}", self.name, e);
                    accepted = false;
                }
            }
        }
        accepted
    }

    /// Unbind an instance from every parameter; `true` if any was bound to it
    pub fn remove_algorithm(&mut self, handle: &AlgorithmHandle) -> bool {
        self.parameters
            .iter_mut()
            .fold(false, |removed, param| param.remove_algorithm(handle) || removed)
    }

    pub fn remove_all_algorithms(&mut self) {
        for param in &mut self.parameters {
            param.remove_all_algorithms();
        }
    }

    /// Set the value of the parameter `name`
    pub fn set_value(&mut self, name: &str, value: ParameterValue, set_default: bool) -> Result<(), ParameterError> {
        match self.get_parameter_mut(name) {
            Some(param) => param.set_value(value, set_default),
            None => Err(ParameterError::ParameterNotFound { name: name.to_string() }),
        }
    }

    /// Reset every parameter that has a default; returns how many were reset
    pub fn reset_all_to_default(&mut self) -> usize {
        let mut count = 0;
        for param in &mut self.parameters {
            match param.reset_to_default_value() {
                Ok(true) => count += 1,
                Ok(false) => {}
                Err(e) => log::warn!("set '{}': reset failed: {}", self.name, e),
            }
        }
        count
    }

    /// Render every parameter as a configuration line
    pub fn to_config_lines(&self, config: &ParserConfig) -> Vec<String> {
        self.parameters
            .iter()
            .map(|p| p.param().to_config_line(&self.name, config))
            .collect()
    }
}

impl<P: AlgoParam> fmt::Display for ParameterSet<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} parameters)", self.name, self.parameters.len())?;
        for param in &self.parameters {
            writeln!(f, "  {}", param)?;
        }
        Ok(())
    }
}
