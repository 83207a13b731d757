//! Typed parameter values
//!
//! A parameter holds exactly one kind of value (boolean, integer or real). The
//! value, its bounds, its step and its default all share that kind.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The declared type of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// `true` / `false`
    Boolean,

    /// 32-bit signed integer
    Integer,

    /// Double precision real
    Real,

    /// Only for parameters that were never given a type (failed parse)
    Unknown,
}

impl ValueKind {
    /// Parse the type token used in configuration lines
    ///
    /// Accepts exactly `"boolean"`, `"integer"` and `"double"`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "boolean" => Some(ValueKind::Boolean),
            "integer" => Some(ValueKind::Integer),
            "double" => Some(ValueKind::Real),
            _ => None,
        }
    }

    /// The configuration token for this kind
    pub fn token(&self) -> &'static str {
        match self {
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Real => "double",
            ValueKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// How successive enumerable values are derived from the minimum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StepMode {
    /// `min, min + step, min + 2 step, ...`
    #[default]
    Additive,

    /// `min, min * step, min * step^2, ...`
    Multiplicative,
}

impl StepMode {
    /// Parse the `ADD` / `MUL` token used in configuration lines
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "ADD" => Some(StepMode::Additive),
            "MUL" => Some(StepMode::Multiplicative),
            _ => None,
        }
    }

    /// The configuration token for this mode
    pub fn token(&self) -> &'static str {
        match self {
            StepMode::Additive => "ADD",
            StepMode::Multiplicative => "MUL",
        }
    }
}

impl fmt::Display for StepMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Selects which of a parameter's values a typed getter returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueSelector {
    /// The current value
    Value,

    /// The lower bound
    Min,

    /// The upper bound
    Max,

    /// The step between enumerable values
    Step,

    /// The captured default, or the current value when none was captured
    Default,

    /// The live value read from the first bound instance, or the current
    /// value when the parameter is not gettable
    Actual,
}

/// A single typed value
///
/// Equality is per variant: values of different kinds never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum ParameterValue {
    Bool(bool),
    Int(i32),
    Real(f64),
}

impl Default for ParameterValue {
    fn default() -> Self {
        ParameterValue::Int(0)
    }
}

impl ParameterValue {
    /// The kind of the active member
    pub fn kind(&self) -> ValueKind {
        match self {
            ParameterValue::Bool(_) => ValueKind::Boolean,
            ParameterValue::Int(_) => ValueKind::Integer,
            ParameterValue::Real(_) => ValueKind::Real,
        }
    }

    /// The zero value of a kind (`false`, `0` or `0.0`)
    pub fn zero(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Boolean => ParameterValue::Bool(false),
            ValueKind::Real => ParameterValue::Real(0.0),
            ValueKind::Integer | ValueKind::Unknown => ParameterValue::Int(0),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            ParameterValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match *self {
            ParameterValue::Int(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match *self {
            ParameterValue::Real(r) => Some(r),
            _ => None,
        }
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Bool(value)
    }
}

impl From<i32> for ParameterValue {
    fn from(value: i32) -> Self {
        ParameterValue::Int(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Real(value)
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Bool(b) => write!(f, "{}", b),
            ParameterValue::Int(i) => write!(f, "{}", i),
            ParameterValue::Real(r) => write!(f, "{}", r),
        }
    }
}
