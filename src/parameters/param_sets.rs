//! Parameter set registry
//!
//! [`ParamSets`] is built from a configuration stream with one parameter per
//! line. Lines are grouped by their leading algorithm name into
//! [`ParameterSet`]s.

use crate::algorithms::{self, AlgorithmHandle};
use crate::error::{AlgoParamError, Result};
use crate::parameters::config::ParserConfig;
use crate::parameters::parameter::Parameter;
use crate::parameters::parameter_set::{AlgoParam, ParameterSet};
use crate::parameters::parser;
use crate::parameters::value::ParameterValue;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

/// Every parameter set read from a configuration source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamSets<P = Parameter> {
    sets: Vec<ParameterSet<P>>,
}

impl<P: AlgoParam> Default for ParamSets<P> {
    fn default() -> Self {
        Self { sets: Vec::new() }
    }
}

impl<P: AlgoParam> ParamSets<P> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a registry from a line-oriented configuration stream
    ///
    /// Every line must hold exactly `config.nb_param_max_tag - 1` separators.
    /// The first line that does not is treated as the end of the input: it
    /// and everything after it are ignored. Lines that fail to parse into a
    /// valid parameter are skipped.
    ///
    /// # Arguments
    ///
    /// * `reader` - The configuration stream
    /// * `config` - Separator and field count settings
    ///
    /// # Returns
    ///
    /// The registry, or an I/O error from the underlying stream
    pub fn from_reader<R: BufRead>(reader: R, config: &ParserConfig) -> Result<Self> {
        let mut registry = Self::new();

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');

            if !config.check_separators(line) {
                if !line.trim().is_empty() {
                    log::warn!(
                        "line {}: expected {} separators, stopping",
                        number + 1,
                        config.separators_per_line()
                    );
                }
                break;
            }

            let algo_name = parser::algo_name(line, config);
            let param = P::from_line(line, config);
            if !param.param().is_ok() {
                log::debug!("line {}: skipping invalid parameter", number + 1);
                continue;
            }

            let set = registry.entry(&algo_name);
            if let Err(e) = set.add_parameter(param) {
                log::debug!("line {}: {}", number + 1, e);
            }
        }

        log::debug!(
            "loaded {} parameter sets: {}",
            registry.len(),
            registry.names().join(", ")
        );
        Ok(registry)
    }

    /// Read a registry from an in-memory configuration text
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_params::parameters::{ParamSets, ParserConfig};
    ///
    /// let text = "FAST;threshold;integer;Detection threshold;10;1;100;1;ADD;;;;;;;;\n";
    /// let registry: ParamSets = ParamSets::from_str(text, &ParserConfig::default()).unwrap();
    /// assert!(registry.get_param_set("FAST").is_some());
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str, config: &ParserConfig) -> Result<Self> {
        Self::from_reader(text.as_bytes(), config)
    }

    /// Read a registry from a configuration file
    pub fn load<Q: AsRef<Path>>(path: Q, config: &ParserConfig) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), config)
    }

    fn entry(&mut self, name: &str) -> &mut ParameterSet<P> {
        let position = match self.sets.iter().position(|s| s.name() == name) {
            Some(position) => position,
            None => {
                self.sets.push(ParameterSet::new(name));
                self.sets.len() - 1
            }
        };
        &mut self.sets[position]
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterSet<P>> {
        self.sets.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ParameterSet<P>> {
        self.sets.iter_mut()
    }

    pub fn names(&self) -> Vec<&str> {
        self.sets.iter().map(|s| s.name()).collect()
    }

    /// Look a set up by its exact name
    pub fn get_param_set(&self, name: &str) -> Option<&ParameterSet<P>> {
        self.sets.iter().find(|s| s.name() == name)
    }

    pub fn get_param_set_mut(&mut self, name: &str) -> Option<&mut ParameterSet<P>> {
        self.sets.iter_mut().find(|s| s.name() == name)
    }

    /// The set describing the family of an instance
    ///
    /// The family is found by matching the instance's class name against the
    /// family names, in [`AlgorithmFamily::ALL`](crate::algorithms::AlgorithmFamily::ALL) order.
    pub fn get_param_set_for(&self, handle: &AlgorithmHandle) -> Option<&ParameterSet<P>> {
        let family = algorithms::family_for_class(handle.class_name()?)?;
        self.get_param_set(family.name())
    }

    pub fn get_param_set_for_mut(&mut self, handle: &AlgorithmHandle) -> Option<&mut ParameterSet<P>> {
        let family = algorithms::family_for_class(handle.class_name()?)?;
        self.get_param_set_mut(family.name())
    }

    /// Set the value of parameter `param` in set `set`
    pub fn set_value(&mut self, set: &str, param: &str, value: ParameterValue, set_default: bool) -> Result<()> {
        let param_set = self
            .get_param_set_mut(set)
            .ok_or_else(|| AlgoParamError::ParamSetNotFound(set.to_string()))?;
        param_set.set_value(param, value, set_default)?;
        Ok(())
    }

    /// Insert a set, replacing any set of the same name
    pub fn insert_set(&mut self, set: ParameterSet<P>) -> Option<ParameterSet<P>> {
        match self.sets.iter().position(|s| s.name() == set.name()) {
            Some(position) => Some(std::mem::replace(&mut self.sets[position], set)),
            None => {
                self.sets.push(set);
                None
            }
        }
    }

    /// Render the registry back into the configuration format
    pub fn to_config_string(&self, config: &ParserConfig) -> String {
        let mut text = String::new();
        for line in self.sets.iter().flat_map(|s| s.to_config_lines(config)) {
            text.push_str(&line);
            text.push('\n');
        }
        text
    }

    /// Write the registry to a configuration file
    pub fn save<Q: AsRef<Path>>(&self, path: Q, config: &ParserConfig) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.to_config_string(config).as_bytes())?;
        Ok(())
    }
}

impl<P: AlgoParam + Serialize> ParamSets<P> {
    /// Serialize the registry to a JSON string
    ///
    /// Bound instances are not serialized.
    pub fn to_json(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(json)
    }

    /// Save the registry to a JSON file
    pub fn save_json<Q: AsRef<Path>>(&self, path: Q) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

impl<P: AlgoParam + DeserializeOwned> ParamSets<P> {
    /// Load a registry from a JSON string; all parameters come back unbound
    pub fn from_json(json: &str) -> Result<Self> {
        let registry = serde_json::from_str(json)?;
        Ok(registry)
    }

    /// Load a registry from a JSON file
    pub fn load_json<Q: AsRef<Path>>(path: Q) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_json(&contents)
    }
}

impl<P: AlgoParam> fmt::Display for ParamSets<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for set in &self.sets {
            write!(f, "{}", set)?;
        }
        Ok(())
    }
}
