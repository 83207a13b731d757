//! Parameter definition and implementation
//!
//! This module provides the Parameter struct: one tunable knob of an algorithm
//! family, with a typed value, bounds, a step, an optional default, optional
//! labels for enumerable integer domains, and the set of live algorithm
//! instances the value is propagated to.

use crate::algorithms::{self, AlgorithmFamily, AlgorithmHandle, GetFn, SetFn};
use crate::parameters::config::ParserConfig;
use crate::parameters::domain;
use crate::parameters::parser::{self, LineFields, ParseError};
use crate::parameters::value::{ParameterValue, StepMode, ValueKind, ValueSelector};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Errors that can occur when working with parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("Parameter '{name}' is {actual}, not {requested}")]
    TypeMismatch {
        name: String,
        requested: ValueKind,
        actual: ValueKind,
    },

    #[error("Value {value} of parameter '{name}' is outside bounds [{min}, {max}]")]
    OutOfRange {
        name: String,
        value: ParameterValue,
        min: ParameterValue,
        max: ParameterValue,
    },

    #[error("Index {index} of parameter '{name}' is outside [0, {len})")]
    IndexOutOfRange { name: String, index: usize, len: usize },

    #[error("Cannot bind an empty algorithm handle to parameter '{name}'")]
    InvalidHandle { name: String },

    #[error("Parameter '{name}' is bound to {expected} instances, cannot bind {found:?}")]
    IncompatibleAlgorithm {
        name: String,
        expected: AlgorithmFamily,
        found: Option<AlgorithmFamily>,
    },

    #[error("Parameter '{name}' was rejected: {reason}")]
    Rejected { name: String, reason: String },

    #[error("Parameter '{name}' not found")]
    ParameterNotFound { name: String },
}

/// Accessors resolved for the family of the first bound instance
#[derive(Clone, Copy)]
struct Binding {
    family: AlgorithmFamily,
    get: Option<GetFn>,
    set: Option<SetFn>,
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("family", &self.family)
            .field("gettable", &self.get.is_some())
            .field("settable", &self.set.is_some())
            .finish()
    }
}

/// One algorithm parameter
///
/// A parameter is described by a name, a [`ValueKind`], bounds and a step.
/// It can be bound to any number of live algorithm instances: setting its
/// value pushes the new value into every bound instance.
///
/// Equality compares the declaration only (name, kind and bounds), never the
/// current value or the bound instances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    name: String,
    kind: ValueKind,
    description: String,
    value: ParameterValue,
    min: ParameterValue,
    max: ParameterValue,
    step: ParameterValue,
    step_mode: StepMode,

    /// Last captured default, if any
    default: Option<ParameterValue>,

    value_descriptions: Vec<String>,

    #[serde(skip)]
    parse_error: bool,

    #[serde(skip, default = "completed")]
    parsing_completed: bool,

    #[serde(skip)]
    binding: Option<Binding>,

    #[serde(skip)]
    algorithms: Vec<AlgorithmHandle>,
}

fn completed() -> bool {
    true
}

impl Default for Parameter {
    /// An untyped parameter, never valid
    fn default() -> Self {
        Self::blank("", ValueKind::Unknown, "")
    }
}

impl Parameter {
    fn blank(name: &str, kind: ValueKind, description: &str) -> Self {
        let zero = ParameterValue::zero(kind);
        Self {
            name: name.to_string(),
            kind,
            description: description.to_string(),
            value: zero,
            min: zero,
            max: zero,
            step: zero,
            step_mode: StepMode::Additive,
            default: None,
            value_descriptions: Vec::new(),
            parse_error: false,
            parsing_completed: true,
            binding: None,
            algorithms: Vec::new(),
        }
    }

    /// Create a parameter from explicit values
    ///
    /// All values must share one kind. No default is captured.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_params::parameters::{Parameter, ParameterValue, StepMode, ValueSelector};
    ///
    /// let param = Parameter::new(
    ///     "nLevels",
    ///     "Number of pyramid levels",
    ///     ParameterValue::Int(8),
    ///     ParameterValue::Int(1),
    ///     ParameterValue::Int(16),
    ///     ParameterValue::Int(1),
    ///     StepMode::Additive,
    /// );
    /// assert!(param.is_ok());
    /// assert_eq!(param.get_int_value(ValueSelector::Value), 8);
    /// ```
    pub fn new(
        name: &str,
        description: &str,
        value: ParameterValue,
        min: ParameterValue,
        max: ParameterValue,
        step: ParameterValue,
        step_mode: StepMode,
    ) -> Self {
        let kind = value.kind();
        let mut param = Self::blank(name, kind, description);
        if [min, max, step].iter().any(|v| v.kind() != kind) {
            log::warn!("parameter '{}' mixes value kinds", name);
            param.parse_error = true;
            return param;
        }
        param.value = value;
        param.min = min;
        param.max = max;
        param.step = step;
        param.step_mode = step_mode;
        param
    }

    /// Create a boolean parameter
    pub fn boolean(name: &str, description: &str, value: bool) -> Self {
        Self::new(
            name,
            description,
            ParameterValue::Bool(value),
            ParameterValue::Bool(false),
            ParameterValue::Bool(true),
            ParameterValue::Bool(true),
            StepMode::Additive,
        )
    }

    /// Create an integer parameter
    pub fn integer(name: &str, description: &str, value: i32, min: i32, max: i32, step: i32, step_mode: StepMode) -> Self {
        Self::new(
            name,
            description,
            ParameterValue::Int(value),
            ParameterValue::Int(min),
            ParameterValue::Int(max),
            ParameterValue::Int(step),
            step_mode,
        )
    }

    /// Create an integer parameter whose values carry labels
    #[allow(clippy::too_many_arguments)]
    pub fn integer_enum(name: &str, description: &str, value: i32, min: i32, max: i32, step: i32, step_mode: StepMode, labels: &[&str]) -> Self {
        let mut param = Self::integer(name, description, value, min, max, step, step_mode);
        param.value_descriptions = labels.iter().map(|s| s.to_string()).collect();
        param
    }

    /// Create a real parameter
    pub fn real(name: &str, description: &str, value: f64, min: f64, max: f64, step: f64, step_mode: StepMode) -> Self {
        Self::new(
            name,
            description,
            ParameterValue::Real(value),
            ParameterValue::Real(min),
            ParameterValue::Real(max),
            ParameterValue::Real(step),
            step_mode,
        )
    }

    /// Create a parameter from one configuration line
    ///
    /// The leading algorithm name field is read but not stored. A line that
    /// fails to parse yields a parameter for which [`is_ok`](Self::is_ok) is
    /// `false`; such a parameter must be discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_params::parameters::{Parameter, ParserConfig, ValueSelector};
    ///
    /// let line = "SURF;hessianThreshold;double;Hessian threshold;100;10;1000;10;ADD";
    /// let param = Parameter::from_line(line, &ParserConfig::default());
    /// assert!(param.is_ok());
    /// assert_eq!(param.get_double_value(ValueSelector::Default), 100.0);
    /// ```
    pub fn from_line(line: &str, config: &ParserConfig) -> Self {
        let parsed = parser::parse_line(line, config);
        if let Some(error) = &parsed.error {
            log::warn!("cannot parse parameter line '{}': {}", line, error);
        }
        let completed = parsed.step == parser::ParseStep::Complete;
        let mut param = Self::from_fields(parsed.fields);
        param.parse_error = parsed.error.is_some();
        param.parsing_completed = completed;
        param
    }

    /// Parse a configuration line, returning the algorithm name it belongs to
    pub fn parse_line(line: &str, config: &ParserConfig) -> Result<(String, Self), ParseError> {
        let fields = parser::parse_line(line, config).into_result()?;
        let algo_name = fields.algo_name.clone();
        Ok((algo_name, Self::from_fields(fields)))
    }

    fn from_fields(fields: LineFields) -> Self {
        let kind = fields.kind.unwrap_or(ValueKind::Unknown);
        let mut param = Self::blank(&fields.name, kind, &fields.description);
        let zero = ParameterValue::zero(kind);
        param.value = fields.value.unwrap_or(zero);
        param.min = fields.min.unwrap_or(zero);
        param.max = fields.max.unwrap_or(zero);
        param.step = fields.step.unwrap_or(zero);
        param.step_mode = fields.step_mode;
        param.default = fields.value;
        param.value_descriptions = fields.value_descriptions;
        param
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn step_mode(&self) -> StepMode {
        self.step_mode
    }

    pub fn value_descriptions(&self) -> &[String] {
        &self.value_descriptions
    }

    pub fn has_default_value(&self) -> bool {
        self.default.is_some()
    }

    pub fn has_parse_error(&self) -> bool {
        self.parse_error
    }

    pub fn is_parsing_completed(&self) -> bool {
        self.parsing_completed
    }

    /// `true` when the parameter is typed and, if read from text, fully parsed
    pub fn is_ok(&self) -> bool {
        self.parsing_completed && !self.parse_error && self.kind != ValueKind::Unknown
    }

    /// `true` when a getter was resolved for the first bound instance
    pub fn is_gettable(&self) -> bool {
        self.binding.map_or(false, |b| b.get.is_some())
    }

    /// `true` when a setter was resolved for the first bound instance
    pub fn is_settable(&self) -> bool {
        self.binding.map_or(false, |b| b.set.is_some())
    }

    /// Family the accessors were resolved for, once a first instance was bound
    pub fn bound_family(&self) -> Option<AlgorithmFamily> {
        self.binding.map(|b| b.family)
    }

    /// `true` when the value can never change
    pub fn is_constant(&self) -> bool {
        let fixed = self.min == self.max && self.max == self.value;
        match self.step {
            ParameterValue::Int(step) => fixed && step == 0,
            _ => fixed,
        }
    }

    /// Number of values an integer domain enumerates, if enumerable
    pub fn value_count(&self) -> Option<usize> {
        match (self.min, self.max, self.step) {
            (ParameterValue::Int(min), ParameterValue::Int(max), ParameterValue::Int(step)) => {
                domain::count_values(min, max, step, self.step_mode).ok().flatten()
            }
            _ => None,
        }
    }

    /// `true` for an integer parameter with one label per enumerable value
    pub fn is_enum(&self) -> bool {
        self.kind == ValueKind::Integer
            && !self.value_descriptions.is_empty()
            && self.value_count() == Some(self.value_descriptions.len())
    }

    /// Bound instances, in binding order
    pub fn algorithms(&self) -> &[AlgorithmHandle] {
        &self.algorithms
    }

    /// Select one of the stored values
    pub fn value(&self, which: ValueSelector) -> ParameterValue {
        match which {
            ValueSelector::Value => self.value,
            ValueSelector::Min => self.min,
            ValueSelector::Max => self.max,
            ValueSelector::Step => self.step,
            ValueSelector::Default => self.default.unwrap_or(self.value),
            ValueSelector::Actual => self.actual_value().unwrap_or(self.value),
        }
    }

    /// Read the live value of the first bound instance
    fn actual_value(&self) -> Option<ParameterValue> {
        let get = self.binding?.get?;
        let first = self.algorithms.first()?;
        first.with_algorithm(|algorithm| get(algorithm)).flatten()
    }

    fn typed_value(&self, requested: ValueKind, which: ValueSelector) -> Option<ParameterValue> {
        if self.kind != requested {
            log::warn!(
                "{}",
                ParameterError::TypeMismatch {
                    name: self.name.clone(),
                    requested,
                    actual: self.kind,
                }
            );
            return None;
        }
        Some(self.value(which))
    }

    /// Boolean value selected by `which`; `false` (with a warning) if not boolean
    pub fn get_bool_value(&self, which: ValueSelector) -> bool {
        self.typed_value(ValueKind::Boolean, which)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    /// Integer value selected by `which`; `0` (with a warning) if not integer
    pub fn get_int_value(&self, which: ValueSelector) -> i32 {
        self.typed_value(ValueKind::Integer, which)
            .and_then(|v| v.as_int())
            .unwrap_or(0)
    }

    /// Real value selected by `which`; `0.0` (with a warning) if not real
    pub fn get_double_value(&self, which: ValueSelector) -> f64 {
        self.typed_value(ValueKind::Real, which)
            .and_then(|v| v.as_real())
            .unwrap_or(0.0)
    }

    fn int_domain(&self) -> Option<(i32, i32, i32)> {
        match (self.min, self.max, self.step) {
            (ParameterValue::Int(min), ParameterValue::Int(max), ParameterValue::Int(step)) => Some((min, max, step)),
            _ => None,
        }
    }

    /// Integer value at position `index` of the enumerated domain
    ///
    /// `index` is clamped to the last labelled position, or to the last value
    /// of the domain when there are no labels. A domain that cannot be
    /// enumerated answers `min`.
    pub fn get_int_value_from_index(&self, index: usize) -> i32 {
        let Some((min, _, step)) = self.int_domain() else {
            log::warn!("parameter '{}' is not an integer parameter", self.name);
            return 0;
        };
        let last = match self.value_descriptions.len() {
            0 => self.value_count().map(|count| count - 1),
            len => Some(len - 1),
        };
        let Some(last) = last else {
            log::warn!("parameter '{}' has no enumerable domain", self.name);
            return min;
        };
        let index = index.min(last);
        let value = domain::nth_value(min, step, self.step_mode, index);
        value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    /// Position of the value selected by `which` in the enumerated domain
    ///
    /// Only `Value`, `Min`, `Max` and `Default` are meaningful. Returns `None`
    /// when the parameter is not an enum.
    pub fn get_value_index(&self, which: ValueSelector) -> Option<usize> {
        if !self.is_enum() {
            return None;
        }
        let (min, _, step) = self.int_domain()?;
        let target = self.value(which).as_int()?;
        let last = self.value_descriptions.len() - 1;
        Some(domain::steps_to(min, step, self.step_mode, target, last))
    }

    /// Label position of a raw integer value
    ///
    /// The position is the first step that reaches or passes `value`, so a
    /// value between two steps maps to the upper one. `None` when `value` is
    /// out of range or the position has no label.
    pub fn index_of(&self, value: i32) -> Option<usize> {
        let (min, max, step) = self.int_domain()?;
        if !domain::within(value, min, max) {
            return None;
        }
        let len = self.value_descriptions.len();
        let index = domain::steps_to(min, step, self.step_mode, value, len);
        (index < len).then_some(index)
    }

    fn check_kind(&self, requested: ValueKind) -> Result<(), ParameterError> {
        if self.kind == requested {
            Ok(())
        } else {
            Err(ParameterError::TypeMismatch {
                name: self.name.clone(),
                requested,
                actual: self.kind,
            })
        }
    }

    fn check_range(&self, value: ParameterValue) -> Result<(), ParameterError> {
        if domain::within(value, self.min, self.max) {
            Ok(())
        } else {
            Err(ParameterError::OutOfRange {
                name: self.name.clone(),
                value,
                min: self.min,
                max: self.max,
            })
        }
    }

    fn store(&mut self, value: ParameterValue, set_default: bool) {
        self.value = value;
        if set_default {
            self.default = Some(value);
        }
        self.push_value();
    }

    /// Set a boolean value and push it to every bound instance
    pub fn set_bool_value(&mut self, value: bool, set_default: bool) -> Result<(), ParameterError> {
        self.check_kind(ValueKind::Boolean).map_err(warned)?;
        self.store(ParameterValue::Bool(value), set_default);
        Ok(())
    }

    /// Set an integer value within bounds and push it to every bound instance
    pub fn set_int_value(&mut self, value: i32, set_default: bool) -> Result<(), ParameterError> {
        self.check_kind(ValueKind::Integer).map_err(warned)?;
        let value = ParameterValue::Int(value);
        self.check_range(value).map_err(warned)?;
        self.store(value, set_default);
        Ok(())
    }

    /// Set a real value within bounds and push it to every bound instance
    pub fn set_double_value(&mut self, value: f64, set_default: bool) -> Result<(), ParameterError> {
        self.check_kind(ValueKind::Real).map_err(warned)?;
        let value = ParameterValue::Real(value);
        self.check_range(value).map_err(warned)?;
        self.store(value, set_default);
        Ok(())
    }

    /// Dispatch to the typed setter matching `value`
    pub fn set_value(&mut self, value: ParameterValue, set_default: bool) -> Result<(), ParameterError> {
        match value {
            ParameterValue::Bool(v) => self.set_bool_value(v, set_default),
            ParameterValue::Int(v) => self.set_int_value(v, set_default),
            ParameterValue::Real(v) => self.set_double_value(v, set_default),
        }
    }

    /// Set the value at label position `index`
    pub fn set_index_value(&mut self, index: usize, set_default: bool) -> Result<(), ParameterError> {
        let len = self.value_descriptions.len();
        if index >= len {
            return Err(warned(ParameterError::IndexOutOfRange {
                name: self.name.clone(),
                index,
                len,
            }));
        }
        let value = self.get_int_value_from_index(index);
        self.set_int_value(value, set_default)
    }

    /// Restore the last captured default through the typed setters
    ///
    /// Returns `Ok(false)` when no default was ever captured.
    pub fn reset_to_default_value(&mut self) -> Result<bool, ParameterError> {
        match self.default {
            Some(default) => self.set_value(default, false).map(|_| true),
            None => Ok(false),
        }
    }

    /// Push the current value into every bound instance
    fn push_value(&self) {
        if self.algorithms.is_empty() {
            return;
        }
        let Some(set) = self.binding.and_then(|b| b.set) else {
            log::debug!("parameter '{}' has no setter, value not propagated", self.name);
            return;
        };
        for handle in &self.algorithms {
            self.push_to(handle, set);
        }
    }

    fn push_to(&self, handle: &AlgorithmHandle, set: SetFn) {
        match handle.with_algorithm(|algorithm| set(algorithm, self.value)) {
            Some(true) => {}
            Some(false) => log::warn!("parameter '{}' could not set {} on {}", self.name, self.value, handle),
            None => log::warn!("parameter '{}' is bound to dropped instance {}", self.name, handle),
        }
    }

    /// Bind an algorithm instance
    ///
    /// The first instance ever bound decides the accessors: they are resolved
    /// for its family and, when both exist, its live value becomes this
    /// parameter's value and default. Later instances must be of the same
    /// family and receive this parameter's current value.
    ///
    /// Returns `Ok(true)` when the instance was newly bound and values can be
    /// pushed to it, `Ok(false)` when it was already bound or no setter exists
    /// for this parameter in its family.
    pub fn add_algorithm(&mut self, handle: &AlgorithmHandle) -> Result<bool, ParameterError> {
        let Some(family) = handle.family() else {
            return Err(warned(ParameterError::InvalidHandle { name: self.name.clone() }));
        };

        if self.algorithms.contains(handle) {
            return Ok(false);
        }

        match self.binding {
            None => {
                self.algorithms.push(handle.clone());
                let binding = self.resolve(family);
                self.binding = Some(binding);

                if let (Some(get), Some(_)) = (binding.get, binding.set) {
                    if let Some(actual) = handle.with_algorithm(|algorithm| get(algorithm)).flatten() {
                        if let Err(e) = self.set_value(actual, true) {
                            log::warn!("live value of {} not adopted: {}", handle, e);
                        }
                    }
                } else {
                    log::debug!(
                        "parameter '{}' ({}) has no live accessor in {}",
                        self.name,
                        self.kind,
                        family
                    );
                }
            }
            Some(binding) if binding.family != family => {
                return Err(warned(ParameterError::IncompatibleAlgorithm {
                    name: self.name.clone(),
                    expected: binding.family,
                    found: Some(family),
                }));
            }
            Some(binding) => {
                self.algorithms.push(handle.clone());
                match binding.set {
                    Some(set) => self.push_to(handle, set),
                    None => log::debug!("parameter '{}' has no setter, {} left as is", self.name, handle),
                }
            }
        }

        Ok(self.is_settable())
    }

    fn resolve(&self, family: AlgorithmFamily) -> Binding {
        let field = algorithms::resolve(family, &self.name, self.kind);
        Binding {
            family,
            get: field.and_then(|f| f.get),
            set: field.and_then(|f| f.set),
        }
    }

    /// Unbind an instance; resolved accessors are kept
    pub fn remove_algorithm(&mut self, handle: &AlgorithmHandle) -> bool {
        match self.algorithms.iter().position(|h| h == handle) {
            Some(position) => {
                self.algorithms.remove(position);
                true
            }
            None => false,
        }
    }

    /// Unbind every instance
    pub fn remove_all_algorithms(&mut self) {
        self.algorithms.clear();
    }

    /// Render the parameter back into a configuration line
    pub fn to_config_line(&self, algo_name: &str, config: &ParserConfig) -> String {
        let mut fields = vec![
            algo_name.to_string(),
            self.name.clone(),
            self.kind.token().to_string(),
            self.description.clone(),
            self.value(ValueSelector::Default).to_string(),
        ];
        if self.kind != ValueKind::Boolean {
            fields.push(self.min.to_string());
            fields.push(self.max.to_string());
            fields.push(self.step.to_string());
            fields.push(self.step_mode.token().to_string());
            fields.extend(self.value_descriptions.iter().cloned());
        }
        fields.resize(config.nb_param_max_tag.max(fields.len()), String::new());
        fields.join(&config.separator.to_string())
    }
}

fn warned(error: ParameterError) -> ParameterError {
    log::warn!("{}", error);
    error
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.kind == other.kind && self.min == other.min && self.max == other.max
    }
}

impl PartialOrd for Parameter {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.name.cmp(&other.name) {
            Ordering::Equal => {}
            ordering => return Some(ordering),
        }
        match self.kind.cmp(&other.kind) {
            Ordering::Equal => {}
            ordering => return Some(ordering),
        }
        match self.min.partial_cmp(&other.min)? {
            Ordering::Equal => self.max.partial_cmp(&other.max),
            ordering => Some(ordering),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |b: bool, c: char| if b { c } else { '-' };
        write!(
            f,
            "[{}{}{}] {} ({}) = {}",
            flag(self.is_gettable(), 'G'),
            flag(self.is_settable(), 'S'),
            flag(self.is_ok(), 'V'),
            self.name,
            self.kind,
            self.value
        )?;

        if self.is_constant() {
            write!(f, " (constant)")?;
        } else if self.kind != ValueKind::Boolean {
            write!(f, " in [{}, {}] step {} {}", self.min, self.max, self.step, self.step_mode)?;
        }

        if self.is_enum() {
            let labels: Vec<String> = self
                .value_descriptions
                .iter()
                .enumerate()
                .map(|(i, label)| format!("{}:{}", self.get_int_value_from_index(i), label))
                .collect();
            write!(f, " {{{}}}", labels.join(", "))?;
        }

        if !self.description.is_empty() {
            write!(f, " : {}", self.description)?;
        }

        if !self.algorithms.is_empty() {
            let handles: Vec<String> = self.algorithms.iter().map(|h| h.to_string()).collect();
            write!(f, " -> {{{}}}", handles.join(", "))?;
        }

        Ok(())
    }
}
