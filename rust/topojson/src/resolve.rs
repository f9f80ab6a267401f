// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Explicit coordinates for feature geometries.
//!
//! Downstream consumers (renderers, format converters) need concrete
//! coordinate sequences rather than arc references. Resolution walks a
//! geometry's arc references through the ring assembler; lines are stitched
//! without a closure check, polygon rings with one.

use serde::Serialize;

use crate::error::Result;
use crate::geometry::Geometry;
use crate::topology::{Coordinate, Ring, RingId, Topology};

/// A geometry with every arc reference replaced by coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum ResolvedGeometry {
    Invalid,
    Point(Coordinate),
    MultiPoint(Vec<Coordinate>),
    LineString(Vec<Coordinate>),
    MultiLineString(Vec<Vec<Coordinate>>),
    Polygon(Vec<Vec<Coordinate>>),
    MultiPolygon(Vec<Vec<Vec<Coordinate>>>),
}

impl ResolvedGeometry {
    pub fn is_invalid(&self) -> bool {
        matches!(self, ResolvedGeometry::Invalid)
    }
}

impl Topology {
    /// Resolves one geometry of this topology into explicit coordinates.
    pub fn resolve(&self, geometry: &Geometry) -> Result<ResolvedGeometry> {
        let resolved = match geometry {
            Geometry::Invalid => ResolvedGeometry::Invalid,
            Geometry::Point(p) => ResolvedGeometry::Point(p.coord),
            Geometry::MultiPoint(mp) => ResolvedGeometry::MultiPoint(mp.points.clone()),
            Geometry::LineString(ls) => ResolvedGeometry::LineString(self.line(ls.ring)?),
            Geometry::MultiLineString(mls) => ResolvedGeometry::MultiLineString(
                mls.rings
                    .iter()
                    .map(|&id| self.line(id))
                    .collect::<Result<_>>()?,
            ),
            Geometry::Polygon(poly) => ResolvedGeometry::Polygon(self.polygon_rings(&poly.rings)?),
            Geometry::MultiPolygon(mp) => ResolvedGeometry::MultiPolygon(
                mp.polygons
                    .iter()
                    .map(|rings| self.polygon_rings(rings))
                    .collect::<Result<_>>()?,
            ),
        };
        Ok(resolved)
    }

    /// Resolves every feature, in document order.
    pub fn resolve_all(&self) -> Result<Vec<ResolvedGeometry>> {
        self.geometries.iter().map(|g| self.resolve(g)).collect()
    }

    /// Coordinates of a registered line.
    pub fn line(&self, id: RingId) -> Result<Vec<Coordinate>> {
        self.assemble_line(self.ring(id)?)
    }

    fn polygon_rings(&self, rings: &[Ring]) -> Result<Vec<Vec<Coordinate>>> {
        rings.iter().map(|ring| self.assemble_ring(ring)).collect()
    }
}
