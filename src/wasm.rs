use wasm_bindgen::prelude::*;
use geojson::{GeoJson, Feature, FeatureCollection, Value, Geometry};
use geo_types::{Geometry as GeoGeometry, LineString};
use crate::graph::{Edge, Label, Location};
use crate::noding::{extract_lines, EdgeNoder, NodingValidator};
use std::convert::TryInto;
use std::str::FromStr;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Checks whether the line work of a GeoJSON document is fully noded.
///
/// Returns `{"valid":true}` or `{"valid":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_noding(geojson_str: &str) -> Result<String, JsValue> {
    let lines = read_lines(geojson_str)?;

    let report = match NodingValidator::new(&lines).check_valid() {
        Ok(()) => serde_json::json!({ "valid": true }),
        Err(e) => serde_json::json!({ "valid": false, "error": e.to_string() }),
    };
    Ok(report.to_string())
}

/// Splits the line work of a GeoJSON document at every intersection and returns
/// the pieces as a FeatureCollection of LineStrings.
#[wasm_bindgen]
pub fn node_lines(geojson_str: &str) -> Result<String, JsValue> {
    let lines = read_lines(geojson_str)?;

    let edges: Vec<Edge> = lines
        .into_iter()
        .map(|ls| Edge::from_line_string(ls, Label::line(0, Location::Interior)))
        .collect();

    let split = EdgeNoder::new()
        .node(edges)
        .map_err(|e| JsValue::from_str(&format!("Noding failed: {}", e)))?;

    let features: Vec<Feature> = split
        .iter()
        .map(|edge| {
            let geometry = Geometry::new(Value::from(&edge.line_string()));
            Feature {
                bbox: None,
                geometry: Some(geometry),
                id: None,
                properties: None,
                foreign_members: None,
            }
        })
        .collect();

    let fc = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };

    Ok(fc.to_string())
}

fn read_lines(geojson_str: &str) -> Result<Vec<LineString<f64>>, JsValue> {
    let geojson = GeoJson::from_str(geojson_str)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse GeoJSON: {}", e)))?;

    let mut lines = Vec::new();
    let mut add_geom = |geom: Geometry| {
        let converted: Result<GeoGeometry<f64>, _> = geom.try_into();
        if let Ok(geo_geom) = converted {
            extract_lines(&geo_geom, &mut lines);
        }
    };

    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for feature in fc.features {
                if let Some(geom) = feature.geometry {
                    add_geom(geom);
                }
            }
        },
        GeoJson::Feature(feature) => {
            if let Some(geom) = feature.geometry {
                add_geom(geom);
            }
        },
        GeoJson::Geometry(geometry) => add_geom(geometry),
    }
    Ok(lines)
}
