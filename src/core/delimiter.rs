use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Name of the transport header that selects the CSV field separator
pub const DELIMITER_HEADER: &str = "US-DELIMITER";

/// Field separator requested for the produced CSV
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Space,
    Tab,
    /// Printable ASCII, codes 33 through 126
    Char(char),
}

impl Delimiter {
    pub const COMMA: Delimiter = Delimiter::Char(',');

    /// Value sent in the `US-DELIMITER` header
    pub fn header_value(&self) -> String {
        match self {
            Delimiter::Space => "SP".to_string(),
            Delimiter::Tab => "HT".to_string(),
            Delimiter::Char(c) => c.to_string(),
        }
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Delimiter::COMMA
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header_value())
    }
}

impl FromStr for Delimiter {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ConfigError::InvalidValue {
            field: "delimiter".to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        };

        match value {
            "SP" => return Ok(Delimiter::Space),
            "HT" => return Ok(Delimiter::Tab),
            _ => {}
        }

        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if ('!'..='~').contains(&c) => Ok(Delimiter::Char(c)),
            (Some(_), None) => Err(invalid(
                "delimiter must be a printable ASCII character (codes 33-126), \"SP\" or \"HT\"",
            )),
            (None, _) => Err(invalid("delimiter cannot be empty")),
            _ => Err(invalid(
                "delimiter must be a single character, \"SP\" (space) or \"HT\" (tab)",
            )),
        }
    }
}
