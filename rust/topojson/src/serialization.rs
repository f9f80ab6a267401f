// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GeoJSON export.
//!
//! Converts a decoded topology into a GeoJSON `FeatureCollection`, one feature
//! per geometry in document order. Invalid features are kept, with a `null`
//! geometry, so feature positions line up with [`Topology::geometries`].

use serde_json::{json, Value as JsonValue};

use crate::error::{Error, Result};
use crate::resolve::ResolvedGeometry;
use crate::topology::Topology;

impl Topology {
    /// Builds a GeoJSON `FeatureCollection`.
    pub fn to_geojson(&self) -> Result<JsonValue> {
        let features = self
            .geometries
            .iter()
            .map(|geometry| -> Result<JsonValue> {
                let geometry_json = match self.resolve(geometry)? {
                    ResolvedGeometry::Invalid => JsonValue::Null,
                    resolved => serde_json::to_value(resolved)
                        .map_err(|e| Error::Serialization(e.to_string()))?,
                };
                let properties = match geometry.properties() {
                    Some(props) => serde_json::to_value(props)
                        .map_err(|e| Error::Serialization(e.to_string()))?,
                    None => JsonValue::Null,
                };
                Ok(json!({
                    "type": "Feature",
                    "geometry": geometry_json,
                    "properties": properties,
                }))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut collection = json!({
            "type": "FeatureCollection",
            "features": features,
        });
        if let Some(b) = &self.bbox {
            collection["bbox"] = json!([b.minx, b.miny, b.maxx, b.maxy]);
        }
        Ok(collection)
    }

    /// Serializes the GeoJSON `FeatureCollection` to a JSON string.
    pub fn to_geojson_string(&self) -> Result<String> {
        let collection = self.to_geojson()?;
        serde_json::to_string_pretty(&collection).map_err(|e| Error::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topology() -> Topology {
        Topology::from_value(&json!({
            "type": "Topology",
            "bbox": [0, 0, 2, 2],
            "objects": {
                "parcels": {
                    "type": "GeometryCollection",
                    "geometries": [
                        {"type": "Polygon", "arcs": [[0, 1, 2]], "properties": {"id": 7}},
                        {"type": "Ellipse"}
                    ]
                },
                "gauge": {"type": "MultiPoint", "coordinates": [[1, 1], [2, 0.5]]}
            },
            "arcs": [
                [[0, 0], [2, 0]],
                [[2, 0], [0, 2]],
                [[2, 2], [-2, -2]]
            ]
        }))
        .unwrap()
    }

    #[test]
    fn exports_feature_collection() {
        let out = topology().to_geojson().unwrap();

        assert_eq!(out["type"], "FeatureCollection");
        assert_eq!(out["bbox"], json!([0.0, 0.0, 2.0, 2.0]));

        let features = out["features"].as_array().unwrap();
        assert_eq!(features.len(), 3);

        assert_eq!(
            features[0]["geometry"],
            json!({
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 0.0]]]
            })
        );
        assert_eq!(features[0]["properties"], json!({"id": 7}));

        assert!(features[1]["geometry"].is_null());
        assert!(features[1]["properties"].is_null());

        assert_eq!(
            features[2]["geometry"]["coordinates"],
            json!([[1.0, 1.0], [2.0, 0.5]])
        );
    }

    #[test]
    fn export_string_is_valid_json() {
        let text = topology().to_geojson_string().unwrap();
        let reparsed: JsonValue = serde_json::from_str(&text).unwrap();
        assert_eq!(reparsed["features"].as_array().map(Vec::len), Some(3));
    }
}
