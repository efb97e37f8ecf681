//! Text formatting configuration.
//!
//! A `FormatConfig` holds the separators and number format used by the
//! printer. Every print call can take one explicitly; otherwise the
//! process-wide default is used. Setting the default while another thread
//! prints with it is allowed but the other thread may see either value.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use grado_core::GradoError;

/// How coordinate magnitudes are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NumberFormat {
    /// Fixed point with the given number of decimals (`%.2f`).
    Fixed(usize),
    /// Scientific notation with the given number of decimals (`%.2e`).
    Scientific(usize),
}

impl NumberFormat {
    /// Format `value` according to this format.
    pub fn format(&self, value: f64) -> String {
        match *self {
            NumberFormat::Fixed(p) => format!("{value:.p$}"),
            NumberFormat::Scientific(p) => format!("{value:.p$e}"),
        }
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat::Fixed(2)
    }
}

/// Parses printf-style specs: `%2.2f`, `%.6e`, `%f`. The width is accepted
/// and ignored; a missing precision means 6.
impl FromStr for NumberFormat {
    type Err = GradoError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let bad = || GradoError::Config(format!("unsupported number format '{spec}'"));
        let body = spec.strip_prefix('%').ok_or_else(bad)?;
        let conversion = body.chars().last().ok_or_else(bad)?;
        let body = &body[..body.len() - conversion.len_utf8()];

        let precision = match body.split_once('.') {
            Some((width, precision)) => {
                if !width.chars().all(|c| c.is_ascii_digit()) {
                    return Err(bad());
                }
                if precision.is_empty() {
                    0
                } else {
                    precision.parse::<usize>().map_err(|_| bad())?
                }
            }
            None => {
                if !body.chars().all(|c| c.is_ascii_digit()) {
                    return Err(bad());
                }
                6
            }
        };

        match conversion {
            'f' | 'F' => Ok(NumberFormat::Fixed(precision)),
            'e' | 'E' => Ok(NumberFormat::Scientific(precision)),
            _ => Err(bad()),
        }
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberFormat::Fixed(p) => write!(f, "%.{p}f"),
            NumberFormat::Scientific(p) => write!(f, "%.{p}e"),
        }
    }
}

impl TryFrom<String> for NumberFormat {
    type Error = GradoError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<NumberFormat> for String {
    fn from(f: NumberFormat) -> String {
        f.to_string()
    }
}

/// Separators and number format for printing multivectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub number: NumberFormat,
    /// Written before the first term.
    pub start: String,
    /// Written after the last term.
    pub end: String,
    /// Between a coordinate and its basis blade.
    pub mul: String,
    /// Between the basis vectors of a blade.
    pub wedge: String,
    pub plus: String,
    pub minus: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            number: NumberFormat::default(),
            start: String::new(),
            end: String::new(),
            mul: "*".to_string(),
            wedge: "^".to_string(),
            plus: " + ".to_string(),
            minus: " - ".to_string(),
        }
    }
}

impl FormatConfig {
    /// Same separators with a different number format.
    pub fn with_number(mut self, number: NumberFormat) -> Self {
        self.number = number;
        self
    }

    /// Load from a JSON string; missing fields take their default.
    pub fn from_json_str(text: &str) -> grado_core::Result<Self> {
        serde_json::from_str(text).map_err(|e| GradoError::Config(format!("invalid format config: {e}")))
    }
}

fn default_cell() -> &'static RwLock<FormatConfig> {
    static DEFAULT: OnceLock<RwLock<FormatConfig>> = OnceLock::new();
    DEFAULT.get_or_init(|| RwLock::new(FormatConfig::default()))
}

/// A copy of the process-wide default format.
pub fn default_format() -> FormatConfig {
    default_cell().read().clone()
}

/// Replace the process-wide default format.
pub fn set_default_format(config: FormatConfig) {
    *default_cell().write() = config;
}

/// Restore the built-in default format.
pub fn reset_default_format() {
    set_default_format(FormatConfig::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_printf_specs() {
        assert_eq!("%2.2f".parse::<NumberFormat>().unwrap(), NumberFormat::Fixed(2));
        assert_eq!("%2.20e".parse::<NumberFormat>().unwrap(), NumberFormat::Scientific(20));
        assert_eq!("%.3f".parse::<NumberFormat>().unwrap(), NumberFormat::Fixed(3));
        assert_eq!("%f".parse::<NumberFormat>().unwrap(), NumberFormat::Fixed(6));
        assert_eq!("%E".parse::<NumberFormat>().unwrap(), NumberFormat::Scientific(6));
    }

    #[test]
    fn test_parse_rejects_bad_specs() {
        for spec in ["", "%", "2.2f", "%2.2d", "%x.2f", "%2.xf", "%s"] {
            assert!(spec.parse::<NumberFormat>().is_err(), "{spec}");
        }
    }

    #[test]
    fn test_number_format_output() {
        assert_eq!(NumberFormat::Fixed(2).format(1.0), "1.00");
        assert_eq!(NumberFormat::Fixed(0).format(2.4), "2");
        assert_eq!(NumberFormat::Scientific(2).format(1500.0), "1.50e3");
        assert_eq!(NumberFormat::Scientific(3).to_string(), "%.3e");
    }

    #[test]
    fn test_defaults() {
        let f = FormatConfig::default();
        assert_eq!(f.number, NumberFormat::Fixed(2));
        assert_eq!(f.mul, "*");
        assert_eq!(f.wedge, "^");
        assert_eq!(f.plus, " + ");
        assert_eq!(f.minus, " - ");
        assert!(f.start.is_empty() && f.end.is_empty());
    }

    #[test]
    fn test_json_partial_config() {
        let f = FormatConfig::from_json_str(r#"{"number": "%1.4e", "start": "[", "end": "]"}"#).unwrap();
        assert_eq!(f.number, NumberFormat::Scientific(4));
        assert_eq!(f.start, "[");
        assert_eq!(f.mul, "*");
        assert!(FormatConfig::from_json_str(r#"{"number": "%q"}"#).is_err());
    }
}
