//! Lenient readers for JSON config objects.
//!
//! Each reader takes a JSON object, a key and a default. A missing key or a
//! value of the wrong type yields the default, so a partially specified
//! config file still produces a usable configuration.

use crate::color::Rgb;
use serde_json::Value;

/// Reads a number (integer or float) as `f64`.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Reads a non-negative integer as `usize`.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Reads a color given as an `"R G B"` triplet or `"#rrggbb"` string.
pub fn param_rgb(params: &Value, name: &str, default: Rgb) -> Rgb {
    params
        .get(name)
        .and_then(Value::as_str)
        .and_then(|s| {
            let s = s.trim();
            if s.starts_with('#') {
                Rgb::from_hex(s).ok()
            } else {
                Rgb::from_triplet(s).ok()
            }
        })
        .unwrap_or(default)
}
