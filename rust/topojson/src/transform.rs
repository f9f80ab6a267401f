// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Quantization transform.
//!
//! Quantized documents store integer positions. The transform maps them back
//! to map space with a per-axis scale and translate. It is read once when the
//! topology is built and never changes afterwards.

use serde::Serialize;

use crate::topology::Coordinate;

/// Scale and translate applied to every raw position of a topology.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Transform {
    /// The identity transform, used when a document has no `transform` member.
    pub const IDENTITY: Transform = Transform {
        scale_x: 1.0,
        scale_y: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    pub fn new(scale: [f64; 2], translate: [f64; 2]) -> Self {
        Self {
            scale_x: scale[0],
            scale_y: scale[1],
            translate_x: translate[0],
            translate_y: translate[1],
        }
    }

    /// Maps a raw (quantized, already delta-accumulated) position to map space.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> Coordinate {
        Coordinate {
            x: x * self.scale_x + self.translate_x,
            y: y * self.scale_y + self.translate_y,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_is_identity() {
        let tr = Transform::default();
        assert!(tr.is_identity());

        let c = tr.apply(3.0, -4.5);
        assert_eq!(c, Coordinate { x: 3.0, y: -4.5 });
    }

    #[test]
    fn applies_scale_then_translate() {
        let tr = Transform::new([0.5, 2.0], [10.0, -1.0]);
        assert!(!tr.is_identity());

        let c = tr.apply(4.0, 3.0);
        assert_relative_eq!(c.x, 12.0);
        assert_relative_eq!(c.y, 5.0);
    }

    #[test]
    fn quantized_lon_lat() {
        // 1e4 quantization over the whole globe
        let tr = Transform::new(
            [0.036003600360036005, 0.017361589674592462],
            [-180.0, -89.99892578124998],
        );

        let c = tr.apply(0.0, 0.0);
        assert_relative_eq!(c.x, -180.0);
        assert_relative_eq!(c.y, -89.99892578124998);

        let c = tr.apply(9999.0, 0.0);
        assert_relative_eq!(c.x, 180.0, epsilon = 1e-9);
    }
}
