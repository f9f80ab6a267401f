// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Topo-Lite TopoJSON
//!
//! Decoder for topology-encoded vector maps (TopoJSON).
//!
//! A topology stores every shared boundary segment ("arc") once and lets
//! features reference arcs by signed index, so two neighbouring polygons do
//! not each carry a copy of their common border. This crate turns such a
//! document into explicit, renderable geometry:
//!
//! - **Arc decoding**: delta-encoded, quantized positions are accumulated and
//!   mapped through the document's transform once, at build time.
//! - **Ring assembly**: signed arc references are stitched into lines and
//!   closed rings, with shared junction points emitted once.
//! - **Geometry building**: each feature becomes one [`Geometry`] variant with
//!   its properties attached. Unknown feature types become
//!   [`Geometry::Invalid`] without failing the document.
//!
//! The input is an already parsed [`serde_json::Value`]; raw text parsing is
//! left to `serde_json`.
//!
//! ## Quick Start
//!
//! ```
//! use topo_lite_topojson::{ResolvedGeometry, Topology};
//!
//! let topology = Topology::from_json(r#"{
//!     "type": "Topology",
//!     "transform": {"scale": [0.5, 0.5], "translate": [100, 0]},
//!     "objects": {
//!         "plot": {"type": "Polygon", "arcs": [[0]], "properties": {"owner": "city"}}
//!     },
//!     "arcs": [[[0, 0], [4, 0], [0, 4], [-4, 0], [0, -4]]]
//! }"#).unwrap();
//!
//! let resolved = topology.resolve(&topology.geometries()[0]).unwrap();
//! let ResolvedGeometry::Polygon(rings) = resolved else { unreachable!() };
//! assert_eq!(rings[0][2].x, 102.0);
//! assert_eq!(rings[0][2].y, 2.0);
//! ```
//!
//! A built [`Topology`] is immutable and can be shared across threads.

pub mod arc;
pub mod builder;
pub mod error;
pub mod geometry;
pub mod options;
pub mod resolve;
pub mod ring;
pub mod serialization;
pub mod topology;
pub mod transform;
pub mod value;

pub use arc::{Arc, ArcPoints, ArcRef};
pub use builder::TopologyBuilder;
pub use error::{Error, Result};
pub use geometry::{
    Geometry, GeometryType, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};
pub use options::{DecodeOptions, DEFAULT_RING_TOLERANCE};
pub use resolve::ResolvedGeometry;
pub use topology::{BoundingBox, Coordinate, Ring, RingId, Topology};
pub use transform::Transform;
pub use value::{Properties, Value};
