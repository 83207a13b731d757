//! Configuration line parser
//!
//! A parameter description is one line of separator-delimited fields:
//!
//! ```text
//! <Algo>;<Name>;<boolean|integer|double>;<Description>;<Value>;<Min>;<Max>;<Step>;<ADD|MUL>;<Label>;...
//! ```
//!
//! The parser is a forward-only state machine consuming one field per step.
//! Boolean lines stop after the value. Integer lines whose domain is small
//! enough to enumerate go on to read value labels. An empty field ends the
//! line; whether that is acceptable depends on the step that was reached.

use crate::parameters::config::ParserConfig;
use crate::parameters::domain::{self, UnevenDomain};
use crate::parameters::value::{ParameterValue, StepMode, ValueKind};
use nom::{
    character::complete::{i32 as integer, multispace0},
    combinator::all_consuming,
    number::complete::double,
    sequence::delimited,
    IResult, Parser,
};
use thiserror::Error;

/// The steps of the line parser, in the order they are visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParseStep {
    AlgoName,
    ParamName,
    ParamType,
    ParamDescription,
    Value,
    MinValue,
    MaxValue,
    StepValue,
    StepMode,
    ValueDescription,
    Complete,
}

/// Why a configuration line could not be turned into a parameter
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unknown parameter type '{token}'")]
    UnknownType { token: String },

    #[error("Invalid boolean literal '{token}'")]
    InvalidBoolean { token: String },

    #[error("Invalid {kind} literal '{token}' at {step:?}")]
    InvalidNumber {
        step: ParseStep,
        kind: ValueKind,
        token: String,
    },

    #[error("Unknown step mode '{token}'")]
    UnknownStepMode { token: String },

    #[error("Uneven domain: {0}")]
    UnevenDomain(#[from] UnevenDomain),

    #[error("Line ended at {step:?}")]
    Incomplete { step: ParseStep },
}

/// Everything read from one line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineFields {
    pub algo_name: String,
    pub name: String,
    pub kind: Option<ValueKind>,
    pub description: String,
    pub value: Option<ParameterValue>,
    pub min: Option<ParameterValue>,
    pub max: Option<ParameterValue>,
    pub step: Option<ParameterValue>,
    pub step_mode: StepMode,
    pub value_descriptions: Vec<String>,
}

/// Outcome of parsing one line
///
/// `fields` holds whatever was read before parsing stopped, even on error.
#[derive(Debug, Clone, PartialEq)]
pub struct LineParse {
    pub fields: LineFields,
    pub step: ParseStep,
    pub error: Option<ParseError>,
}

impl LineParse {
    /// `true` when the line reached completion without error
    pub fn is_complete(&self) -> bool {
        self.error.is_none() && self.step == ParseStep::Complete
    }

    /// Convert into a `Result`, turning an unfinished line into `Incomplete`
    pub fn into_result(self) -> Result<LineFields, ParseError> {
        match self.error {
            Some(error) => Err(error),
            None if self.step != ParseStep::Complete => Err(ParseError::Incomplete { step: self.step }),
            None => Ok(self.fields),
        }
    }
}

/// Parse one configuration line
pub fn parse_line(line: &str, config: &ParserConfig) -> LineParse {
    let mut parser = LineParser::new(config);
    let mut error = None;

    for field in line.split(config.separator) {
        if parser.step == ParseStep::Complete || field.trim().is_empty() {
            break;
        }
        if let Err(e) = parser.consume(field) {
            log::debug!("parse error in '{}': {}", line, e);
            error = Some(e);
            break;
        }
    }

    // value labels are optional
    if error.is_none() && parser.step == ParseStep::ValueDescription {
        parser.step = ParseStep::Complete;
    }

    LineParse {
        fields: parser.fields,
        step: parser.step,
        error,
    }
}

/// Read the leading algorithm name field of a line
pub fn algo_name(line: &str, config: &ParserConfig) -> String {
    line.split(config.separator)
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

struct LineParser<'c> {
    config: &'c ParserConfig,
    step: ParseStep,
    fields: LineFields,
}

impl<'c> LineParser<'c> {
    fn new(config: &'c ParserConfig) -> Self {
        Self {
            config,
            step: ParseStep::AlgoName,
            fields: LineFields::default(),
        }
    }

    fn kind(&self) -> ValueKind {
        self.fields.kind.unwrap_or(ValueKind::Unknown)
    }

    fn consume(&mut self, field: &str) -> Result<(), ParseError> {
        let token = field.trim();
        log::trace!("{:?} <- '{}'", self.step, token);

        self.step = match self.step {
            ParseStep::AlgoName => {
                self.fields.algo_name = token.to_string();
                ParseStep::ParamName
            }
            ParseStep::ParamName => {
                self.fields.name = token.to_string();
                ParseStep::ParamType
            }
            ParseStep::ParamType => {
                let kind = ValueKind::from_token(token).ok_or_else(|| ParseError::UnknownType {
                    token: token.to_string(),
                })?;
                self.fields.kind = Some(kind);
                ParseStep::ParamDescription
            }
            ParseStep::ParamDescription => {
                self.fields.description = token.to_string();
                ParseStep::Value
            }
            ParseStep::Value => {
                if self.kind() == ValueKind::Boolean {
                    let value = match token {
                        "true" => true,
                        "false" => false,
                        _ => {
                            return Err(ParseError::InvalidBoolean {
                                token: token.to_string(),
                            })
                        }
                    };
                    self.fields.value = Some(ParameterValue::Bool(value));
                    self.fields.min = Some(ParameterValue::Bool(false));
                    self.fields.max = Some(ParameterValue::Bool(true));
                    self.fields.step = Some(ParameterValue::Bool(true));
                    self.fields.step_mode = StepMode::Additive;
                    ParseStep::Complete
                } else {
                    self.fields.value = Some(self.number(token)?);
                    ParseStep::MinValue
                }
            }
            ParseStep::MinValue => {
                self.fields.min = Some(self.number(token)?);
                ParseStep::MaxValue
            }
            ParseStep::MaxValue => {
                self.fields.max = Some(self.number(token)?);
                ParseStep::StepValue
            }
            ParseStep::StepValue => {
                self.fields.step = Some(self.number(token)?);
                ParseStep::StepMode
            }
            ParseStep::StepMode => {
                self.fields.step_mode = StepMode::from_token(token).ok_or_else(|| ParseError::UnknownStepMode {
                    token: token.to_string(),
                })?;
                self.after_step_mode()?
            }
            ParseStep::ValueDescription => {
                self.fields.value_descriptions.push(token.to_string());
                ParseStep::ValueDescription
            }
            ParseStep::Complete => ParseStep::Complete,
        };

        Ok(())
    }

    /// Decide whether value labels follow
    fn after_step_mode(&self) -> Result<ParseStep, ParseError> {
        let (min, max, step) = match (self.fields.min, self.fields.max, self.fields.step) {
            (Some(ParameterValue::Int(min)), Some(ParameterValue::Int(max)), Some(ParameterValue::Int(step))) => {
                (min, max, step)
            }
            _ => return Ok(ParseStep::Complete),
        };

        match domain::count_values(min, max, step, self.fields.step_mode)? {
            Some(count) if count <= self.config.nb_value_descriptions_max => Ok(ParseStep::ValueDescription),
            _ => Ok(ParseStep::Complete),
        }
    }

    fn number(&self, token: &str) -> Result<ParameterValue, ParseError> {
        let kind = self.kind();
        let parsed = match kind {
            ValueKind::Integer => integer_literal(token).ok().map(|(_, v)| ParameterValue::Int(v)),
            ValueKind::Real => real_literal(token).ok().map(|(_, v)| ParameterValue::Real(v)),
            ValueKind::Boolean | ValueKind::Unknown => None,
        };

        parsed.ok_or_else(|| ParseError::InvalidNumber {
            step: self.step,
            kind,
            token: token.to_string(),
        })
    }
}

fn integer_literal(input: &str) -> IResult<&str, i32> {
    all_consuming(delimited(multispace0, integer, multispace0)).parse(input)
}

fn real_literal(input: &str) -> IResult<&str, f64> {
    all_consuming(delimited(multispace0, double, multispace0)).parse(input)
}
