//! Magnitude grammar for the space and time arguments: a decimal
//! coefficient followed by an optional single-letter unit suffix.

use std::fmt;

use thiserror::Error;

/// Which argument a magnitude belongs to; selects the suffix table and the
/// range check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Space,
    Time,
}

impl Kind {
    fn unit(self) -> &'static str {
        match self {
            Kind::Space => "bytes",
            Kind::Time => "seconds",
        }
    }

    fn scale(self, suffix: char) -> Option<u64> {
        match self {
            Kind::Space => match suffix {
                'k' => Some(1000),
                'K' => Some(1024),
                'm' => Some(1000 * 1000),
                'M' => Some(1024 * 1024),
                'g' => Some(1000 * 1000 * 1000),
                'G' => Some(1024 * 1024 * 1024),
                _ => None,
            },
            Kind::Time => match suffix {
                'm' => Some(60),
                'h' => Some(60 * 60),
                'd' => Some(60 * 60 * 24),
                'w' => Some(60 * 60 * 24 * 7),
                _ => None,
            },
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Space => f.write_str("space"),
            Kind::Time => f.write_str("time"),
        }
    }
}

#[derive(Debug, Error)]
pub enum UnitError {
    #[error("invalid value for {kind}: '{text}'")]
    Malformed { kind: Kind, text: String },
    #[error("unknown modifier for {kind}: '{suffix}'")]
    UnknownSuffix { kind: Kind, suffix: char },
    #[error("value for {kind} is too large, maximum is {maximum} {}", .kind.unit())]
    TooLarge { kind: Kind, maximum: u128 },
}

/// Parse a space magnitude into a byte count. No suffix means bytes.
pub fn parse_space(text: &str) -> Result<usize, UnitError> {
    let value = parse_magnitude(text, Kind::Space, usize::MAX as u128)?;
    Ok(value as usize)
}

/// Parse a time magnitude into seconds. No suffix means seconds.
pub fn parse_time(text: &str) -> Result<u64, UnitError> {
    let value = parse_magnitude(text, Kind::Time, u128::from(u64::MAX))?;
    Ok(value as u64)
}

fn parse_magnitude(text: &str, kind: Kind, maximum: u128) -> Result<u128, UnitError> {
    let (number, suffix) = split_suffix(text);
    let scale = match suffix {
        Some(c) => kind
            .scale(c)
            .ok_or(UnitError::UnknownSuffix { kind, suffix: c })?,
        None => 1,
    };

    let coefficient: f64 = number.parse().map_err(|_| UnitError::Malformed {
        kind,
        text: text.to_string(),
    })?;
    if !coefficient.is_finite() || coefficient.is_sign_negative() {
        return Err(UnitError::Malformed {
            kind,
            text: text.to_string(),
        });
    }

    // The saturating float-to-int cast turns any oversized or infinite
    // product into a value the range check below rejects.
    let value = (coefficient * scale as f64) as u128;
    if value > maximum {
        return Err(UnitError::TooLarge { kind, maximum });
    }
    Ok(value)
}

fn split_suffix(text: &str) -> (&str, Option<char>) {
    match text.chars().last() {
        Some(c) if c.is_ascii_alphabetic() => (&text[..text.len() - c.len_utf8()], Some(c)),
        _ => (text, None),
    }
}
