//! Configuration of the parameter description format.

use serde::{Deserialize, Serialize};

/// Settings shared by the line parser and the registry loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Character separating the fields of a line. Default: ';'
    pub separator: char,

    /// Largest enumerable domain for which value descriptions are read. Default: 8
    pub nb_value_descriptions_max: usize,

    /// Number of fields in a well-formed line. Default: 17
    ///
    /// A line must contain exactly `nb_param_max_tag - 1` separators.
    pub nb_param_max_tag: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            separator: ';',
            nb_value_descriptions_max: 8,
            nb_param_max_tag: 17,
        }
    }
}

impl ParserConfig {
    /// Number of separators a well-formed line carries
    pub fn separators_per_line(&self) -> usize {
        self.nb_param_max_tag.saturating_sub(1)
    }

    /// Check that a line has exactly the expected number of separators
    pub fn check_separators(&self, line: &str) -> bool {
        line.chars().filter(|&c| c == self.separator).count() == self.separators_per_line()
    }
}
