//! GeoJSON export of generated layouts for map rendering.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};

use crate::engine::LayoutResult;
use crate::geometry::Coordinate;

fn line_string(coords: &[Coordinate]) -> Geometry {
    let line: geo_types::LineString<f64> = coords.iter().map(|c| (c.lng, c.lat)).collect();
    Geometry::new(Value::from(&line))
}

fn point(c: Coordinate) -> Geometry {
    Geometry::new(Value::from(&geo_types::Point::new(c.lng, c.lat)))
}

fn feature(geometry: Geometry, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn properties(kind: &str, id: &str) -> JsonObject {
    let mut props = JsonObject::new();
    props.insert("kind".into(), kind.into());
    props.insert("id".into(), id.into());
    props
}

/// Converts a layout into a feature collection.
///
/// Main pipes, sub-mains and branches become `LineString` features and plants
/// become `Point` features, each tagged with a `kind` property.
pub fn layout_to_geojson(result: &LayoutResult) -> FeatureCollection {
    let mut features = Vec::new();
    for main in &result.main_pipes {
        let mut props = properties("main", &main.id);
        props.insert("length".into(), main.length.into());
        props.insert("diameter".into(), main.diameter.into());
        features.push(feature(line_string(&main.coordinates), props));
    }
    for sub in &result.sub_mains {
        let mut props = properties("sub_main", &sub.id);
        props.insert("zone".into(), sub.zone_id.as_str().into());
        props.insert("length".into(), sub.length.into());
        props.insert("diameter".into(), sub.diameter.into());
        features.push(feature(line_string(&sub.coordinates), props));
        for branch in &sub.branches {
            let mut props = properties("branch", &branch.id);
            props.insert("subMain".into(), sub.id.as_str().into());
            props.insert("length".into(), branch.length.into());
            props.insert("angle".into(), branch.angle.into());
            props.insert("connectionPoint".into(), branch.connection_point.into());
            props.insert("plants".into(), branch.plants.len().into());
            features.push(feature(line_string(&branch.coordinates), props));
            for plant in &branch.plants {
                let mut props = properties("plant", &branch.id);
                props.insert("waterNeed".into(), plant.spacing.water_need.into());
                features.push(feature(point(plant.position), props));
            }
        }
    }
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Writes `result` as a GeoJSON feature collection.
pub fn write_layout_geojson(path: &str, result: &LayoutResult) -> std::io::Result<()> {
    let collection = layout_to_geojson(result);
    let json = serde_json::to_string_pretty(&collection).map_err(std::io::Error::other)?;
    crate::io::write_string(path, &json)
}
