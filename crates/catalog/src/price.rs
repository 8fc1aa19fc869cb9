//! Product price value object.

use serde::{Deserialize, Serialize};

use storefront_core::ValueObject;

/// Unit price as the backend stores it (a plain JSON number).
///
/// The storefront compares prices against free text, so the textual form
/// matters: [`Price::to_js_string`] renders exactly what the backend's
/// JavaScript clients render for the same number.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl ValueObject for Price {}

impl Price {
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> f64 {
        self.0
    }

    /// Number-to-text conversion with ECMAScript `Number#toString` output.
    ///
    /// Rust's `{}` already yields the shortest round-trip digits for the
    /// plain-decimal range; the differences are the exponent range
    /// (`1e+21`, `1e-7`), the non-finite spellings and negative zero.
    pub fn to_js_string(self) -> String {
        let v = self.0;
        if v.is_nan() {
            return "NaN".to_string();
        }
        if v.is_infinite() {
            return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
        }
        if v == 0.0 {
            return "0".to_string();
        }

        let abs = v.abs();
        if abs >= 1e21 || abs < 1e-6 {
            let text = format!("{v:e}");
            return match text.split_once('e') {
                Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
                _ => text,
            };
        }

        format!("{v}")
    }
}

impl From<f64> for Price {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_js_string())
    }
}
