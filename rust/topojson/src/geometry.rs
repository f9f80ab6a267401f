// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Feature geometries.
//!
//! Geometries keep the compact, index-based form of the document: points carry
//! literal coordinates, everything else carries signed arc references. Use
//! [`Topology::resolve`](crate::topology::Topology::resolve) to get explicit
//! coordinates.

use crate::topology::{Coordinate, Ring, RingId};
use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub coord: Coordinate,
    pub props: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiPoint {
    pub points: Vec<Coordinate>,
    pub props: Option<Value>,
}

/// A line; its arc list lives in the topology's ring registry.
#[derive(Debug, Clone, PartialEq)]
pub struct LineString {
    pub ring: RingId,
    pub props: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiLineString {
    pub rings: Vec<RingId>,
    pub props: Option<Value>,
}

/// A polygon as authored: ring 0 is the exterior, any further rings are holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub rings: Vec<Ring>,
    pub props: Option<Value>,
}

/// Several polygons sharing one property payload.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolygon {
    pub polygons: Vec<Vec<Ring>>,
    pub props: Option<Value>,
}

/// One feature geometry. `Invalid` marks a feature whose type was not
/// recognized.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Geometry {
    #[default]
    Invalid,
    Point(Point),
    MultiPoint(MultiPoint),
    LineString(LineString),
    MultiLineString(MultiLineString),
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
}

/// Discriminant of the recognized geometry kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeometryType {
    Point = 0,
    MultiPoint = 1,
    LineString = 2,
    MultiLineString = 3,
    Polygon = 4,
    MultiPolygon = 5,
}

impl GeometryType {
    /// Returns the type name as written in documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::LineString => "LineString",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPolygon => "MultiPolygon",
        }
    }

    /// Parses a document type name. Matching is case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Point" => Some(GeometryType::Point),
            "MultiPoint" => Some(GeometryType::MultiPoint),
            "LineString" => Some(GeometryType::LineString),
            "MultiLineString" => Some(GeometryType::MultiLineString),
            "Polygon" => Some(GeometryType::Polygon),
            "MultiPolygon" => Some(GeometryType::MultiPolygon),
            _ => None,
        }
    }
}

impl Geometry {
    /// The active kind, or `None` for `Invalid`.
    pub fn geometry_type(&self) -> Option<GeometryType> {
        match self {
            Geometry::Invalid => None,
            Geometry::Point(_) => Some(GeometryType::Point),
            Geometry::MultiPoint(_) => Some(GeometryType::MultiPoint),
            Geometry::LineString(_) => Some(GeometryType::LineString),
            Geometry::MultiLineString(_) => Some(GeometryType::MultiLineString),
            Geometry::Polygon(_) => Some(GeometryType::Polygon),
            Geometry::MultiPolygon(_) => Some(GeometryType::MultiPolygon),
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Geometry::Invalid)
    }

    /// The feature's property payload, if it has one.
    pub fn properties(&self) -> Option<&Value> {
        match self {
            Geometry::Invalid => None,
            Geometry::Point(g) => g.props.as_ref(),
            Geometry::MultiPoint(g) => g.props.as_ref(),
            Geometry::LineString(g) => g.props.as_ref(),
            Geometry::MultiLineString(g) => g.props.as_ref(),
            Geometry::Polygon(g) => g.props.as_ref(),
            Geometry::MultiPolygon(g) => g.props.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arc::ArcRef;

    #[test]
    fn type_names_round_trip() {
        for ty in [
            GeometryType::Point,
            GeometryType::MultiPoint,
            GeometryType::LineString,
            GeometryType::MultiLineString,
            GeometryType::Polygon,
            GeometryType::MultiPolygon,
        ] {
            assert_eq!(GeometryType::from_name(ty.as_str()), Some(ty));
        }
        assert_eq!(GeometryType::from_name("Circle"), None);
        assert_eq!(GeometryType::from_name("point"), None);
        assert_eq!(GeometryType::from_name("GeometryCollection"), None);
    }

    #[test]
    fn default_is_invalid() {
        let g = Geometry::default();
        assert!(g.is_invalid());
        assert_eq!(g.geometry_type(), None);
        assert!(g.properties().is_none());
    }

    #[test]
    fn properties_accessor() {
        let g = Geometry::Polygon(Polygon {
            rings: vec![vec![ArcRef(0)]],
            props: Some(Value::from("lake")),
        });
        assert_eq!(g.geometry_type(), Some(GeometryType::Polygon));
        assert_eq!(g.properties().and_then(Value::as_str), Some("lake"));

        let g = Geometry::Point(Point {
            coord: Coordinate::new(1.0, 2.0),
            props: None,
        });
        assert!(g.properties().is_none());
    }
}
