// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arc decoding and signed arc references.
//!
//! Arcs arrive delta-encoded: the first position is absolute and every later
//! position is an offset from the one before it. [`Arc::decode`] accumulates
//! the offsets and applies the quantization transform exactly once, when the
//! topology is built. From then on an arc is a plain run of absolute
//! coordinates, and reading it backwards is only a matter of iterating the
//! slice from the other end.

use std::iter::Rev;
use std::slice;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::topology::{Coordinate, Topology};
use crate::transform::Transform;

/// A signed reference to an arc.
///
/// `n >= 0` traverses arc `n` forward; `n < 0` traverses arc `!n`
/// (that is `-n - 1`) in reverse, so `-1` is arc 0 reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ArcRef(pub i32);

impl ArcRef {
    /// Position of the referenced arc in the arc list.
    #[inline]
    pub fn index(self) -> usize {
        if self.0 >= 0 {
            self.0 as usize
        } else {
            (!self.0) as usize
        }
    }

    #[inline]
    pub fn is_reversed(self) -> bool {
        self.0 < 0
    }

    /// The same arc traversed the other way.
    pub fn reversed(self) -> ArcRef {
        ArcRef(!self.0)
    }
}

impl From<i32> for ArcRef {
    fn from(n: i32) -> Self {
        ArcRef(n)
    }
}

/// A decoded arc: absolute coordinates in map space.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Arc {
    pub coordinates: Vec<Coordinate>,
}

impl Arc {
    /// Decodes raw positions into absolute coordinates.
    ///
    /// With `delta` set, every position after the first is an offset from the
    /// previous raw position. The running sum is kept in raw space and only
    /// the accumulated value goes through `transform`, so rounding never
    /// compounds along the arc.
    pub fn decode(raw: &[[f64; 2]], transform: &Transform, delta: bool) -> Self {
        let mut coordinates = Vec::with_capacity(raw.len());
        let (mut cx, mut cy) = (0.0, 0.0);

        for (i, &[x, y]) in raw.iter().enumerate() {
            if delta && i > 0 {
                cx += x;
                cy += y;
            } else {
                cx = x;
                cy = y;
            }
            coordinates.push(transform.apply(cx, cy));
        }

        tracing::trace!(points = coordinates.len(), delta, "decoded arc");
        Self { coordinates }
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn first(&self) -> Option<&Coordinate> {
        self.coordinates.first()
    }

    pub fn last(&self) -> Option<&Coordinate> {
        self.coordinates.last()
    }
}

/// Coordinates of one arc in the direction a reference asks for.
#[derive(Debug, Clone)]
pub enum ArcPoints<'a> {
    Forward(slice::Iter<'a, Coordinate>),
    Reverse(Rev<slice::Iter<'a, Coordinate>>),
}

impl<'a> ArcPoints<'a> {
    fn new(arc: &'a Arc, reversed: bool) -> Self {
        if reversed {
            ArcPoints::Reverse(arc.coordinates.iter().rev())
        } else {
            ArcPoints::Forward(arc.coordinates.iter())
        }
    }
}

impl<'a> Iterator for ArcPoints<'a> {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        match self {
            ArcPoints::Forward(it) => it.next().copied(),
            ArcPoints::Reverse(it) => it.next().copied(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            ArcPoints::Forward(it) => it.size_hint(),
            ArcPoints::Reverse(it) => it.size_hint(),
        }
    }
}

impl DoubleEndedIterator for ArcPoints<'_> {
    fn next_back(&mut self) -> Option<Coordinate> {
        match self {
            ArcPoints::Forward(it) => it.next_back().copied(),
            ArcPoints::Reverse(it) => it.next_back().copied(),
        }
    }
}

impl ExactSizeIterator for ArcPoints<'_> {}

impl Topology {
    /// Resolves a signed arc reference to its coordinates, in the requested
    /// direction.
    pub fn arc(&self, reference: ArcRef) -> Result<ArcPoints<'_>> {
        let index = reference.index();
        let arc = self.arcs.get(index).ok_or(Error::ArcIndexOutOfRange {
            reference: reference.0,
            index,
            len: self.arcs.len(),
        })?;
        Ok(ArcPoints::new(arc, reference.is_reversed()))
    }

    /// Collects the coordinates of a signed arc reference.
    pub fn arc_coordinates(&self, reference: ArcRef) -> Result<Vec<Coordinate>> {
        Ok(self.arc(reference)?.collect())
    }
}
