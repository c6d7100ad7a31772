//! printf-style value specifiers for magnifier and legend labels.
//!
//! A specifier holds literal text around exactly one numeric conversion:
//! `%[+][width][.precision]conv` where `conv` is one of `f F e E d i g G`.
//! `%%` produces a literal percent sign.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Specifier used when none is configured.
pub const DEFAULT_SPECIFIER: &str = "%.1f";

const DEFAULT_PRECISION: usize = 6;

/// Errors raised while parsing a value specifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The specifier contains no conversion.
    #[error("specifier {0:?} has no numeric conversion")]
    MissingConversion(String),
    /// The specifier contains more than one conversion.
    #[error("specifier {0:?} has more than one conversion")]
    MultipleConversions(String),
    /// The conversion character is not supported.
    #[error("unsupported conversion '{conv}' in {specifier:?}")]
    UnsupportedConversion {
        /// Offending character.
        conv: char,
        /// Full specifier.
        specifier: String,
    },
    /// The specifier ends inside a conversion.
    #[error("specifier {0:?} ends inside a conversion")]
    Truncated(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Fixed,
    Exponent { upper: bool },
    Integer,
    General { upper: bool },
}

/// Parsed numeric conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Directive {
    conversion: Conversion,
    plus: bool,
    width: usize,
    precision: Option<usize>,
}

/// A parsed value specifier, e.g. `"%.1f"` or `"%.0f km"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueFormat {
    source: String,
    prefix: String,
    directive: Directive,
    suffix: String,
}

impl ValueFormat {
    /// Parse a specifier.
    pub fn parse(specifier: &str) -> Result<Self, FormatError> {
        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut directive: Option<Directive> = None;
        let mut chars = specifier.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch != '%' {
                if directive.is_some() {
                    suffix.push(ch);
                } else {
                    prefix.push(ch);
                }
                continue;
            }
            if chars.peek() == Some(&'%') {
                chars.next();
                if directive.is_some() {
                    suffix.push('%');
                } else {
                    prefix.push('%');
                }
                continue;
            }
            if directive.is_some() {
                return Err(FormatError::MultipleConversions(specifier.to_string()));
            }

            let plus = chars.next_if_eq(&'+').is_some();
            let width = take_number(&mut chars).unwrap_or(0);
            let precision = if chars.next_if_eq(&'.').is_some() {
                Some(take_number(&mut chars).unwrap_or(0))
            } else {
                None
            };
            let conv = chars
                .next()
                .ok_or_else(|| FormatError::Truncated(specifier.to_string()))?;
            let conversion = match conv {
                'f' | 'F' => Conversion::Fixed,
                'e' => Conversion::Exponent { upper: false },
                'E' => Conversion::Exponent { upper: true },
                'd' | 'i' => Conversion::Integer,
                'g' => Conversion::General { upper: false },
                'G' => Conversion::General { upper: true },
                other => {
                    return Err(FormatError::UnsupportedConversion {
                        conv: other,
                        specifier: specifier.to_string(),
                    });
                }
            };
            directive = Some(Directive {
                conversion,
                plus,
                width,
                precision,
            });
        }

        let directive = directive.ok_or_else(|| FormatError::MissingConversion(specifier.to_string()))?;
        Ok(Self {
            source: specifier.to_string(),
            prefix,
            directive,
            suffix,
        })
    }

    /// The specifier this format was parsed from.
    pub fn specifier(&self) -> &str {
        &self.source
    }

    /// Format a value.
    pub fn format(&self, value: f64) -> String {
        let body = format_number(value, self.directive);
        format!("{}{}{}", self.prefix, body, self.suffix)
    }
}

impl Default for ValueFormat {
    fn default() -> Self {
        Self {
            source: DEFAULT_SPECIFIER.to_string(),
            prefix: String::new(),
            directive: Directive {
                conversion: Conversion::Fixed,
                plus: false,
                width: 0,
                precision: Some(1),
            },
            suffix: String::new(),
        }
    }
}

impl FromStr for ValueFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ValueFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<usize> {
    let mut digits = String::new();
    while let Some(digit) = chars.next_if(|c| c.is_ascii_digit()) {
        digits.push(digit);
    }
    digits.parse().ok()
}

fn format_number(value: f64, directive: Directive) -> String {
    let precision = directive.precision.unwrap_or(DEFAULT_PRECISION);
    let mut text = match directive.conversion {
        Conversion::Fixed => format!("{value:.precision$}"),
        Conversion::Integer => format!("{}", value.round() as i64),
        Conversion::Exponent { upper } => exponent(value, precision, upper),
        Conversion::General { upper } => general(value, precision, upper),
    };
    if directive.plus && !text.starts_with(['-', '+']) {
        text.insert(0, '+');
    }
    format!("{text:>width$}", width = directive.width)
}

/// C-style exponent: at least two exponent digits with an explicit sign.
fn exponent(value: f64, precision: usize, upper: bool) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let (mantissa, exp) = split_exponent(value, precision);
    let sign = if exp < 0 { '-' } else { '+' };
    let marker = if upper { 'E' } else { 'e' };
    format!("{mantissa}{marker}{sign}{:02}", exp.abs())
}

/// Mantissa and decimal exponent of `value` rounded to `precision` digits
/// after the point.
fn split_exponent(value: f64, precision: usize) -> (String, i32) {
    let raw = format!("{value:.precision$e}");
    match raw.split_once('e') {
        Some((mantissa, exp)) => (mantissa.to_string(), exp.parse().unwrap_or(0)),
        None => (raw, 0),
    }
}

/// `%g`: the exponent after rounding to `precision` significant digits picks
/// between fixed and scientific notation; trailing zeros are dropped.
fn general(value: f64, precision: usize, upper: bool) -> String {
    let precision = precision.max(1);
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return format!("{value}");
    }
    let (mantissa, exp) = split_exponent(value, precision - 1);
    if exp < -4 || exp >= precision as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        let marker = if upper { 'E' } else { 'e' };
        format!("{}{marker}{sign}{:02}", trim_fraction(&mantissa), exp.abs())
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_one_decimal() {
        let format = ValueFormat::default();
        assert_eq!(format.specifier(), "%.1f");
        assert_eq!(format.format(12.0), "12.0");
        assert_eq!(format.format(284.495), "284.5");
        assert_eq!(ValueFormat::parse("%.1f").unwrap(), format);
    }

    #[test]
    fn literal_text_and_percent() {
        let format = ValueFormat::parse("%.0f%% used").unwrap();
        assert_eq!(format.format(42.4), "42% used");
        let format = ValueFormat::parse("$%.2f").unwrap();
        assert_eq!(format.format(3.14159), "$3.14");
    }

    #[test]
    fn flags_and_width() {
        assert_eq!(ValueFormat::parse("%+.1f").unwrap().format(2.0), "+2.0");
        assert_eq!(ValueFormat::parse("%6.2f").unwrap().format(1.5), "  1.50");
        assert_eq!(ValueFormat::parse("%d").unwrap().format(6.6), "7");
        assert_eq!(ValueFormat::parse("%f").unwrap().format(1.0), "1.000000");
    }

    #[test]
    fn exponent_and_general() {
        assert_eq!(ValueFormat::parse("%.2e").unwrap().format(1234.5), "1.23e+03");
        assert_eq!(ValueFormat::parse("%.1E").unwrap().format(0.00042), "4.2E-04");
        assert_eq!(ValueFormat::parse("%g").unwrap().format(0.5), "0.5");
        assert_eq!(ValueFormat::parse("%g").unwrap().format(1_500_000.0), "1.5e+06");
    }

    #[test]
    fn general_branches_on_rounded_exponent() {
        let general = ValueFormat::parse("%g").unwrap();
        assert_eq!(general.format(999_999.5), "1e+06");
        assert_eq!(general.format(999_999.0), "999999");
        assert_eq!(general.format(9.9999996e-5), "0.0001");
        assert_eq!(general.format(0.00001234), "1.234e-05");
        assert_eq!(general.format(-0.25), "-0.25");
        assert_eq!(ValueFormat::parse("%.2G").unwrap().format(0.000009996), "1E-05");
    }

    #[test]
    fn plus_flag_follows_rendered_sign() {
        let signed = ValueFormat::parse("%+d").unwrap();
        assert_eq!(signed.format(0.4), "+0");
        assert_eq!(signed.format(-0.4), "+0");
        assert_eq!(signed.format(-3.0), "-3");
        assert_eq!(ValueFormat::parse("%+.1f").unwrap().format(-2.0), "-2.0");
        assert_eq!(ValueFormat::parse("%+.1e").unwrap().format(250.0), "+2.5e+02");
        assert_eq!(ValueFormat::parse("%.1e").unwrap().format(f64::INFINITY), "inf");
    }

    #[test]
    fn malformed_specifiers() {
        assert!(matches!(
            ValueFormat::parse("value"),
            Err(FormatError::MissingConversion(_))
        ));
        assert!(matches!(
            ValueFormat::parse("%f / %f"),
            Err(FormatError::MultipleConversions(_))
        ));
        assert!(matches!(
            ValueFormat::parse("%.2"),
            Err(FormatError::Truncated(_))
        ));
        assert!(matches!(
            ValueFormat::parse("%s"),
            Err(FormatError::UnsupportedConversion { conv: 's', .. })
        ));
    }
}
