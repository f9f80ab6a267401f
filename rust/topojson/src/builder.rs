// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Single-pass construction of a [`Topology`] from a parsed JSON tree.
//!
//! Every record type has its own mapping function from tree fields to typed
//! fields. Arcs are decoded first, so that each geometry can be validated
//! against them as it is built: every arc reference must resolve and every
//! polygon ring must close. Any such failure aborts the whole build, because
//! arcs are shared between features and a half-validated topology is not safe
//! to hand out. A feature with an unrecognized type is the one exception; it
//! becomes [`Geometry::Invalid`] and the build carries on.

use serde_json::{Map, Value as JsonValue};

use crate::arc::{Arc, ArcRef};
use crate::error::{Error, Result};
use crate::geometry::*;
use crate::options::DecodeOptions;
use crate::topology::{BoundingBox, Coordinate, Ring, Topology};
use crate::transform::Transform;
use crate::value::Value;

type JsonMap = Map<String, JsonValue>;

/// Builds topologies from parsed documents.
///
/// # Example
///
/// ```
/// use topo_lite_topojson::{Geometry, TopologyBuilder};
///
/// let doc = serde_json::json!({
///     "type": "Topology",
///     "objects": {
///         "square": { "type": "Polygon", "arcs": [[0]] }
///     },
///     "arcs": [[[0, 0], [1, 0], [0, 1], [-1, 0], [0, -1]]]
/// });
///
/// let topology = TopologyBuilder::default().build(&doc).unwrap();
/// assert!(matches!(topology.geometries()[0], Geometry::Polygon(_)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TopologyBuilder {
    options: DecodeOptions,
}

impl TopologyBuilder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Builds a topology from a parsed document.
    pub fn build(&self, doc: &JsonValue) -> Result<Topology> {
        let root = as_object(doc, "$")?;

        match root.get("type").and_then(JsonValue::as_str) {
            Some("Topology") => {}
            Some(other) => {
                return Err(Error::schema(
                    "$.type",
                    format!("expected \"Topology\", found \"{other}\""),
                ))
            }
            None => return Err(Error::schema("$", "missing `type: \"Topology\"`")),
        }

        let transform = match root.get("transform") {
            None | Some(JsonValue::Null) => None,
            Some(v) => Some(parse_transform(v, "$.transform")?),
        };
        let bbox = match root.get("bbox") {
            None | Some(JsonValue::Null) => None,
            Some(v) => Some(parse_bbox(v, "$.bbox")?),
        };

        // Quantized documents are always delta-encoded
        let delta = transform.is_some() || self.options.delta_decode_unquantized;
        let transform = transform.unwrap_or_default();

        let arcs = as_array(member(root, "arcs", "$")?, "$.arcs")?
            .iter()
            .enumerate()
            .map(|(i, arc)| parse_arc(arc, &format!("$.arcs[{i}]"), &transform, delta))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            arcs = arcs.len(),
            quantized = !transform.is_identity(),
            delta,
            "decoded arcs"
        );

        let mut topology =
            Topology::with_arcs(arcs, transform, bbox, self.options.ring_tolerance);

        let objects = as_object(member(root, "objects", "$")?, "$.objects")?;
        for (name, node) in objects {
            collect_features(&mut topology, node, &format!("$.objects.{name}"))?;
        }

        tracing::debug!(
            geometries = topology.geometries.len(),
            invalid = topology.geometries.iter().filter(|g| g.is_invalid()).count(),
            rings = topology.rings.len(),
            "built topology"
        );

        Ok(topology)
    }

    /// Parses raw JSON text with `serde_json`, then builds.
    pub fn build_from_str(&self, json: &str) -> Result<Topology> {
        let doc: JsonValue = serde_json::from_str(json)?;
        self.build(&doc)
    }
}

impl Topology {
    /// Builds a topology with default options.
    pub fn from_value(doc: &JsonValue) -> Result<Self> {
        TopologyBuilder::default().build(doc)
    }

    /// Parses and builds a topology with default options.
    pub fn from_json(json: &str) -> Result<Self> {
        TopologyBuilder::default().build_from_str(json)
    }
}

/// Visits a named object. Geometry collections are flattened into their
/// member geometries, in order.
fn collect_features(topology: &mut Topology, node: &JsonValue, path: &str) -> Result<()> {
    let obj = as_object(node, path)?;

    if obj.get("type").and_then(JsonValue::as_str) == Some("GeometryCollection") {
        let members_path = format!("{path}.geometries");
        let members = as_array(member(obj, "geometries", path)?, &members_path)?;
        for (i, child) in members.iter().enumerate() {
            collect_features(topology, child, &format!("{members_path}[{i}]"))?;
        }
        return Ok(());
    }

    let geometry = parse_geometry(topology, obj, path)?;
    topology.geometries.push(geometry);
    Ok(())
}

/// Builds one feature geometry, registering line arc lists with the topology.
fn parse_geometry(topology: &mut Topology, node: &JsonMap, path: &str) -> Result<Geometry> {
    let type_name = node.get("type").and_then(JsonValue::as_str);
    let Some(kind) = type_name.and_then(GeometryType::from_name) else {
        tracing::warn!(path, type_name = ?type_name, "unrecognized geometry type, feature marked invalid");
        return Ok(Geometry::Invalid);
    };

    let props = match node.get("properties") {
        None | Some(JsonValue::Null) => None,
        Some(v) => Some(Value::from(v)),
    };

    let geometry = match kind {
        GeometryType::Point => {
            let coords_path = format!("{path}.coordinates");
            let [x, y] = parse_position(member(node, "coordinates", path)?, &coords_path)?;
            Geometry::Point(Point {
                coord: topology.transform.apply(x, y),
                props,
            })
        }
        GeometryType::MultiPoint => {
            let coords_path = format!("{path}.coordinates");
            let points = as_array(member(node, "coordinates", path)?, &coords_path)?
                .iter()
                .enumerate()
                .map(|(i, p)| -> Result<Coordinate> {
                    let [x, y] = parse_position(p, &format!("{coords_path}[{i}]"))?;
                    Ok(topology.transform.apply(x, y))
                })
                .collect::<Result<Vec<_>>>()?;
            Geometry::MultiPoint(MultiPoint { points, props })
        }
        GeometryType::LineString => {
            let ring = parse_ring(member(node, "arcs", path)?, &format!("{path}.arcs"))?;
            topology.assemble_line(&ring)?;
            Geometry::LineString(LineString {
                ring: topology.register_ring(ring),
                props,
            })
        }
        GeometryType::MultiLineString => {
            let lines = parse_rings(member(node, "arcs", path)?, &format!("{path}.arcs"))?;
            let mut rings = Vec::with_capacity(lines.len());
            for line in lines {
                topology.assemble_line(&line)?;
                rings.push(topology.register_ring(line));
            }
            Geometry::MultiLineString(MultiLineString { rings, props })
        }
        GeometryType::Polygon => {
            let rings = parse_rings(member(node, "arcs", path)?, &format!("{path}.arcs"))?;
            check_polygon(topology, &rings)?;
            Geometry::Polygon(Polygon { rings, props })
        }
        GeometryType::MultiPolygon => {
            let arcs_path = format!("{path}.arcs");
            let polygons = as_array(member(node, "arcs", path)?, &arcs_path)?
                .iter()
                .enumerate()
                .map(|(i, p)| parse_rings(p, &format!("{arcs_path}[{i}]")))
                .collect::<Result<Vec<_>>>()?;
            for rings in &polygons {
                check_polygon(topology, rings)?;
            }
            Geometry::MultiPolygon(MultiPolygon { polygons, props })
        }
    };

    Ok(geometry)
}

/// Assembles every ring once so that dangling arcs and open rings fail the
/// build instead of a later read.
fn check_polygon(topology: &Topology, rings: &[Ring]) -> Result<()> {
    for ring in rings {
        topology.assemble_ring(ring)?;
    }
    Ok(())
}

fn parse_transform(v: &JsonValue, path: &str) -> Result<Transform> {
    let obj = as_object(v, path)?;
    let scale = parse_pair(member(obj, "scale", path)?, &format!("{path}.scale"))?;
    let translate = parse_pair(member(obj, "translate", path)?, &format!("{path}.translate"))?;
    Ok(Transform::new(scale, translate))
}

/// Accepts `[minx, miny, maxx, maxy]`, or the 3D form
/// `[minx, miny, minz, maxx, maxy, maxz]` reduced to its x/y extents.
fn parse_bbox(v: &JsonValue, path: &str) -> Result<BoundingBox> {
    let items = as_array(v, path)?;
    let n = items
        .iter()
        .enumerate()
        .map(|(i, item)| parse_number(item, &format!("{path}[{i}]")))
        .collect::<Result<Vec<f64>>>()?;

    match n.as_slice() {
        &[minx, miny, maxx, maxy] | &[minx, miny, _, maxx, maxy, _] => Ok(BoundingBox {
            minx,
            miny,
            maxx,
            maxy,
        }),
        _ => Err(Error::schema(
            path,
            format!("expected 4 or 6 numbers, found {}", n.len()),
        )),
    }
}

fn parse_arc(v: &JsonValue, path: &str, transform: &Transform, delta: bool) -> Result<Arc> {
    let raw = as_array(v, path)?
        .iter()
        .enumerate()
        .map(|(i, p)| parse_position(p, &format!("{path}[{i}]")))
        .collect::<Result<Vec<_>>>()?;
    Ok(Arc::decode(&raw, transform, delta))
}

fn parse_rings(v: &JsonValue, path: &str) -> Result<Vec<Ring>> {
    as_array(v, path)?
        .iter()
        .enumerate()
        .map(|(i, ring)| parse_ring(ring, &format!("{path}[{i}]")))
        .collect()
}

fn parse_ring(v: &JsonValue, path: &str) -> Result<Ring> {
    as_array(v, path)?
        .iter()
        .enumerate()
        .map(|(i, r)| parse_arc_ref(r, &format!("{path}[{i}]")))
        .collect()
}

fn parse_arc_ref(v: &JsonValue, path: &str) -> Result<ArcRef> {
    let n = match v.as_i64() {
        Some(n) => n,
        // integral floats such as `3.0`
        None => match v.as_f64() {
            Some(f) if f.fract() == 0.0 => f as i64,
            _ => return Err(Error::schema(path, "arc reference must be an integer")),
        },
    };
    i32::try_from(n)
        .map(ArcRef)
        .map_err(|_| Error::schema(path, format!("arc reference {n} is out of range")))
}

/// A position: at least two numbers, extra dimensions ignored.
fn parse_position(v: &JsonValue, path: &str) -> Result<[f64; 2]> {
    let items = as_array(v, path)?;
    if items.len() < 2 {
        return Err(Error::schema(
            path,
            format!("position needs at least 2 numbers, found {}", items.len()),
        ));
    }
    Ok([
        parse_number(&items[0], &format!("{path}[0]"))?,
        parse_number(&items[1], &format!("{path}[1]"))?,
    ])
}

/// Exactly two numbers.
fn parse_pair(v: &JsonValue, path: &str) -> Result<[f64; 2]> {
    let items = as_array(v, path)?;
    if items.len() != 2 {
        return Err(Error::schema(
            path,
            format!("expected 2 numbers, found {}", items.len()),
        ));
    }
    parse_position(v, path)
}

fn parse_number(v: &JsonValue, path: &str) -> Result<f64> {
    v.as_f64()
        .ok_or_else(|| Error::schema(path, format!("expected a number, found {}", kind_of(v))))
}

fn member<'a>(obj: &'a JsonMap, key: &str, path: &str) -> Result<&'a JsonValue> {
    obj.get(key)
        .ok_or_else(|| Error::schema(path, format!("missing `{key}`")))
}

fn as_object<'a>(v: &'a JsonValue, path: &str) -> Result<&'a JsonMap> {
    v.as_object()
        .ok_or_else(|| Error::schema(path, format!("expected an object, found {}", kind_of(v))))
}

fn as_array<'a>(v: &'a JsonValue, path: &str) -> Result<&'a Vec<JsonValue>> {
    v.as_array()
        .ok_or_else(|| Error::schema(path, format!("expected an array, found {}", kind_of(v))))
}

fn kind_of(v: &JsonValue) -> &'static str {
    match v {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
