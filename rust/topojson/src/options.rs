// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoding options.

/// Default closure tolerance for polygon rings, in map units.
pub const DEFAULT_RING_TOLERANCE: f64 = 1e-9;

/// Options controlling how a topology document is decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeOptions {
    /// Maximum per-axis distance between the first and last coordinate of an
    /// assembled polygon ring.
    pub ring_tolerance: f64,
    /// Delta-decode arcs even when the document has no `transform` member.
    /// Turn off for encoders that write unquantized arcs as absolute
    /// positions.
    pub delta_decode_unquantized: bool,
}

impl DecodeOptions {
    /// Load options from environment variables, falling back to defaults.
    ///
    /// - `TOPOJSON_RING_TOLERANCE`: non-negative float
    /// - `TOPOJSON_DELTA_UNQUANTIZED`: `true`/`false`/`1`/`0`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ring_tolerance: std::env::var("TOPOJSON_RING_TOLERANCE")
                .ok()
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|t| t.is_finite() && *t >= 0.0)
                .unwrap_or(defaults.ring_tolerance),
            delta_decode_unquantized: std::env::var("TOPOJSON_DELTA_UNQUANTIZED")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.delta_decode_unquantized),
        }
    }

    pub fn with_ring_tolerance(mut self, tolerance: f64) -> Self {
        self.ring_tolerance = tolerance;
        self
    }

    pub fn with_delta_decode_unquantized(mut self, enabled: bool) -> Self {
        self.delta_decode_unquantized = enabled;
        self
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            ring_tolerance: DEFAULT_RING_TOLERANCE,
            delta_decode_unquantized: true,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = DecodeOptions::default();
        assert_eq!(opts.ring_tolerance, DEFAULT_RING_TOLERANCE);
        assert!(opts.delta_decode_unquantized);
    }

    #[test]
    fn builder_setters() {
        let opts = DecodeOptions::default()
            .with_ring_tolerance(0.5)
            .with_delta_decode_unquantized(false);
        assert_eq!(opts.ring_tolerance, 0.5);
        assert!(!opts.delta_decode_unquantized);
    }

    #[test]
    fn flag_parsing() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
