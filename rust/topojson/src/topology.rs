// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The decoded topology and its plain data types.
//!
//! A [`Topology`] owns every arc of a document once, already delta-decoded and
//! transformed into map space, plus the feature geometries that reference
//! those arcs by signed index. It is built in a single pass by
//! [`TopologyBuilder`](crate::builder::TopologyBuilder) and read-only
//! afterwards: no public method takes `&mut self`, so a built topology can be
//! shared between threads freely.

use serde::ser::{Serialize, SerializeTuple, Serializer};

use crate::arc::{Arc, ArcRef};
use crate::error::{Error, Result};
use crate::geometry::Geometry;
use crate::transform::Transform;

/// An absolute map-space position. Serializes as an `[x, y]` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when both axes differ by at most `tolerance`.
    #[inline]
    pub fn approx_eq(&self, other: &Coordinate, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl Serialize for Coordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut pair = serializer.serialize_tuple(2)?;
        pair.serialize_element(&self.x)?;
        pair.serialize_element(&self.y)?;
        pair.end()
    }
}

/// Advisory extents of a document. Never recomputed or enforced.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct BoundingBox {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

/// An ordered list of signed arc references.
pub type Ring = Vec<ArcRef>;

/// Identifier of an arc list registered for a line geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct RingId(pub(crate) usize);

impl RingId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A fully decoded topology document.
#[derive(Debug, Clone)]
pub struct Topology {
    pub(crate) geometries: Vec<Geometry>,
    pub(crate) arcs: Vec<Arc>,
    pub(crate) transform: Transform,
    pub(crate) bbox: Option<BoundingBox>,

    // Arc lists of line geometries, indexed by `RingId`
    pub(crate) rings: Vec<Ring>,

    // Closure tolerance used when assembling polygon rings
    pub(crate) ring_tolerance: f64,
}

impl Topology {
    /// Creates an empty topology over already-decoded arcs.
    pub(crate) fn with_arcs(
        arcs: Vec<Arc>,
        transform: Transform,
        bbox: Option<BoundingBox>,
        ring_tolerance: f64,
    ) -> Self {
        Self {
            geometries: Vec::new(),
            arcs,
            transform,
            bbox,
            rings: Vec::new(),
            ring_tolerance,
        }
    }

    /// Feature geometries in document order.
    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    /// Decoded arcs, indexed by position.
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn bbox(&self) -> Option<&BoundingBox> {
        self.bbox.as_ref()
    }

    /// Tolerance applied by [`Topology::assemble_ring`].
    pub fn ring_tolerance(&self) -> f64 {
        self.ring_tolerance
    }

    pub fn geometry_count(&self) -> usize {
        self.geometries.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    /// Returns the arc list registered under a line's ring identifier.
    pub fn ring(&self, id: RingId) -> Result<&[ArcRef]> {
        self.rings
            .get(id.0)
            .map(Vec::as_slice)
            .ok_or(Error::RingNotFound(id))
    }

    /// Registers the arc list of a line geometry.
    pub(crate) fn register_ring(&mut self, ring: Ring) -> RingId {
        let id = RingId(self.rings.len());
        self.rings.push(ring);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn topology_is_shareable() {
        assert_send_sync::<Topology>();
    }

    #[test]
    fn coordinate_tolerance() {
        let a = Coordinate::new(1.0, 2.0);
        assert!(a.approx_eq(&Coordinate::new(1.0 + 1e-12, 2.0), 1e-9));
        assert!(!a.approx_eq(&Coordinate::new(1.0, 2.1), 1e-9));
    }

    #[test]
    fn coordinate_serializes_as_pair() {
        let json = serde_json::to_string(&Coordinate::new(1.5, -2.0)).unwrap();
        assert_eq!(json, "[1.5,-2.0]");
    }

    #[test]
    fn ring_registry() {
        let mut topo = Topology::with_arcs(Vec::new(), Transform::IDENTITY, None, 1e-9);
        let id = topo.register_ring(vec![ArcRef(0), ArcRef(-2)]);

        assert_eq!(id.index(), 0);
        assert_eq!(topo.ring(id).unwrap(), &[ArcRef(0), ArcRef(-2)]);
        assert!(matches!(
            topo.ring(RingId(7)),
            Err(Error::RingNotFound(RingId(7)))
        ));
    }
}
