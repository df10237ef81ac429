use crate::engine::{LayoutRequest, LayoutResult};

fn invalid_data(e: serde_json::Error) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, e)
}

/// Reads a layout request from a JSON file.
pub fn read_request_json(path: &str) -> std::io::Result<LayoutRequest> {
    let contents = crate::io::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(invalid_data)
}

/// Reads a previously written layout result.
pub fn read_result_json(path: &str) -> std::io::Result<LayoutResult> {
    let contents = crate::io::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(invalid_data)
}

/// Writes a layout result as pretty-printed JSON.
pub fn write_result_json(path: &str, result: &LayoutResult) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(result).map_err(std::io::Error::other)?;
    crate::io::write_string(path, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::LayoutEngine;
    use assert_fs::prelude::*;

    const REQUEST: &str = r#"{
        "field": [
            {"lat": 0.0, "lng": 0.0},
            {"lat": 0.0, "lng": 0.0009},
            {"lat": 0.0009, "lng": 0.0009},
            {"lat": 0.0009, "lng": 0.0}
        ],
        "spacing": {"plantSpacing": 5.0, "rowSpacing": 10.0},
        "subMains": [
            {"id": "s1", "coordinates": [{"lat": 0.0, "lng": 0.00045}, {"lat": 0.0009, "lng": 0.00045}]}
        ]
    }"#;

    #[test]
    fn reads_request_with_defaults() {
        let file = assert_fs::NamedTempFile::new("request.json").unwrap();
        file.write_str(REQUEST).unwrap();
        let request = read_request_json(file.path().to_str().unwrap()).unwrap();
        assert_eq!(request.sub_mains.len(), 1);
        assert_eq!(request.sub_mains[0].diameter, 32.0);
        assert!(request.exclusions.is_empty());
        assert_eq!(request.branch_angle, None);
    }

    #[test]
    fn result_survives_a_file() {
        let dir = assert_fs::TempDir::new().unwrap();
        let input = dir.child("request.json");
        input.write_str(REQUEST).unwrap();
        let request = read_request_json(input.path().to_str().unwrap()).unwrap();
        let result = LayoutEngine::default().run(&request);

        let output = dir.child("result.json");
        write_result_json(output.path().to_str().unwrap(), &result).unwrap();
        let back = read_result_json(output.path().to_str().unwrap()).unwrap();
        assert_eq!(back.branch_count(), result.branch_count());
        assert_eq!(back.statistics.total_plants, result.statistics.total_plants);
    }

    #[test]
    fn malformed_request_is_invalid_data() {
        let file = assert_fs::NamedTempFile::new("request.json").unwrap();
        file.write_str("{\"subMains\": 3}").unwrap();
        let err = read_request_json(file.path().to_str().unwrap()).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
