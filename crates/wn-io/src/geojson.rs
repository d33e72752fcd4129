//! Administrative boundaries from a GeoJSON `FeatureCollection`.
//!
//! Each `Polygon` or `MultiPolygon` feature becomes one
//! [`BoundaryUnit`], keyed by its `pin_code` property (falling back to
//! `code`) and named by `area_name`.  Codes may be strings or numbers.
//! Features without a code, with another geometry type, or with malformed
//! rings (fewer than four positions, positions without lon/lat) are skipped
//! with a warning; a repeated code keeps its first feature.  Only input that
//! is not a `FeatureCollection` at all fails the load.

use std::fs;
use std::path::Path;

use geo::{LineString, MultiPolygon, Polygon};
use rustc_hash::FxHashSet;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use wn_spatial::{BoundarySet, BoundaryUnit};

use crate::{IoError, IoResult};

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    geometry: Option<Geometry>,
}

#[derive(Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

/// `[[lon, lat(, alt)], …]` rings: exterior first.
type Rings = Vec<Vec<Vec<f64>>>;

pub fn load_boundaries(path: &Path) -> IoResult<BoundarySet> {
    let set = parse_boundaries(&fs::read_to_string(path)?)?;
    info!(path = %path.display(), units = set.len(), "boundary units loaded");
    Ok(set)
}

pub fn parse_boundaries(json: &str) -> IoResult<BoundarySet> {
    let collection: FeatureCollection = serde_json::from_str(json)?;

    let mut seen = FxHashSet::default();
    let mut units = Vec::with_capacity(collection.features.len());
    for (i, feature) in collection.features.into_iter().enumerate() {
        let props = feature.properties.unwrap_or_default();
        let Some(code) = code_of(&props) else {
            warn!(feature = i, "boundary feature without pin_code or code skipped");
            continue;
        };
        let Some(geometry) = feature.geometry else {
            warn!(feature = i, %code, "boundary feature without geometry skipped");
            continue;
        };
        let shape = match shape_of(geometry, &code) {
            Ok(Some(shape)) => shape,
            Ok(None) => {
                warn!(feature = i, %code, "unsupported boundary geometry skipped");
                continue;
            }
            Err(e) => {
                warn!(feature = i, %code, error = %e, "malformed boundary geometry skipped");
                continue;
            }
        };
        if seen.contains(&code) {
            warn!(feature = i, %code, "repeated boundary code skipped");
            continue;
        }

        let name = props.get("area_name").and_then(Value::as_str).map(str::to_owned);
        match BoundaryUnit::new(code, name, shape) {
            Ok(unit) => {
                seen.insert(unit.code.clone());
                units.push(unit);
            }
            Err(e) => warn!(feature = i, error = %e, "degenerate boundary unit skipped"),
        }
    }

    Ok(BoundarySet::new(units)?)
}

/// `None` for geometry types other than `Polygon` and `MultiPolygon`.
fn shape_of(geometry: Geometry, code: &str) -> IoResult<Option<MultiPolygon<f64>>> {
    let shape = match geometry.kind.as_str() {
        "Polygon" => MultiPolygon(vec![polygon(serde_json::from_value(geometry.coordinates)?, code)?]),
        "MultiPolygon" => {
            let parts: Vec<Rings> = serde_json::from_value(geometry.coordinates)?;
            MultiPolygon(parts.into_iter().map(|rings| polygon(rings, code)).collect::<IoResult<_>>()?)
        }
        _ => return Ok(None),
    };
    Ok(Some(shape))
}

fn code_of(props: &Map<String, Value>) -> Option<String> {
    ["pin_code", "code"].into_iter().find_map(|key| match props.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn polygon(rings: Rings, code: &str) -> IoResult<Polygon<f64>> {
    let mut rings = rings.into_iter().map(|ring| line_string(ring, code));
    let exterior = rings
        .next()
        .ok_or_else(|| IoError::GeoJson(format!("unit {code}: polygon without rings")))??;
    let interiors = rings.collect::<IoResult<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn line_string(ring: Vec<Vec<f64>>, code: &str) -> IoResult<LineString<f64>> {
    if ring.len() < 4 {
        return Err(IoError::GeoJson(format!("unit {code}: ring with {} positions", ring.len())));
    }
    ring.into_iter()
        .map(|pos| match pos.as_slice() {
            [lon, lat, ..] => Ok((*lon, *lat)),
            _ => Err(IoError::GeoJson(format!("unit {code}: position without lon/lat"))),
        })
        .collect::<IoResult<Vec<(f64, f64)>>>()
        .map(LineString::from)
}
