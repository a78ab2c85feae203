//! A single telemetry value
//!
//! Sensors report either whole numbers (raw analog reads) or floats
//! (temperatures, humidity). The text form keeps the kind the value was
//! supplied as, so `19.0` goes out as `19.0` and `60` as `60`. Floats are
//! always written in plain decimal notation: `1e3` parses as a float and
//! goes out as `1000.0`, and no value is ever sent in exponent form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reading {
    Int(i64),
    Float(f64),
}

impl Reading {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Reading::Int(v) => v as f64,
            Reading::Float(v) => v,
        }
    }

    pub fn is_finite(&self) -> bool {
        match *self {
            Reading::Int(_) => true,
            Reading::Float(v) => v.is_finite(),
        }
    }
}

impl Default for Reading {
    fn default() -> Self {
        Reading::Int(0)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Int(v) => write!(f, "{}", v),
            // Display never uses exponents but drops the ".0" of whole floats
            Reading::Float(v) if v.fract() == 0.0 => write!(f, "{:.1}", v),
            Reading::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for Reading {
    fn from(v: i64) -> Self {
        Reading::Int(v)
    }
}

impl From<f64> for Reading {
    fn from(v: f64) -> Self {
        Reading::Float(v)
    }
}

impl FromStr for Reading {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(v) = s.parse::<i64>() {
            return Ok(Reading::Int(v));
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Reading::Float(v)),
            Ok(_) => Err(format!("reading must be finite: {}", s)),
            Err(_) => Err(format!("not a number: {}", s)),
        }
    }
}
