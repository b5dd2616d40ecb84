//! Floor-plan JSON document.
//!
//! The published plan format is a flat pair of arrays:
//!
//! ```json
//! {
//!   "vertices": [
//!     { "id": "n1", "objectName": "Entrance", "cx": 0, "cy": 0 },
//!     { "id": "n2", "objectName": "Atrium", "cx": 10, "cy": 0 }
//!   ],
//!   "edges": [
//!     { "id": "e1", "from": "n1", "to": "n2" }
//!   ]
//! }
//! ```
//!
//! Parsing is separate from integrity validation: a well-formed document
//! may still be rejected when converted into a
//! [`NavigationGraph`](super::NavigationGraph).

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error loading a floor-plan document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("failed to read floor plan: {0}")]
    Io(String),
    /// The contents are not valid JSON for the plan schema.
    #[error("failed to parse floor plan: {0}")]
    Parse(String),
}

/// One vertex record as authored in the plan document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexRecord {
    /// Unique vertex id.
    pub id: String,
    /// Display label shown by the host UI.
    #[serde(rename = "objectName")]
    pub object_name: String,
    /// Grid x coordinate.
    pub cx: i32,
    /// Grid y coordinate.
    pub cy: i32,
}

/// One edge record as authored in the plan document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Unique edge id.
    pub id: String,
    /// Vertex id of one endpoint.
    pub from: String,
    /// Vertex id of the other endpoint.
    pub to: String,
}

/// A parsed floor-plan document, not yet validated.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FloorPlanDoc {
    /// Authored vertices, in document order.
    #[serde(default)]
    pub vertices: Vec<VertexRecord>,
    /// Authored edges, in document order. Edge order matters: it decides
    /// neighbor expansion order during route search.
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl FloorPlanDoc {
    /// Parse a document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(json).map_err(|e| DocumentError::Parse(e.to_string()))
    }

    /// Load a document from a JSON file.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| DocumentError::Io(e.to_string()))?;
        Self::from_json(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN: &str = r#"{
        "vertices": [
            {"id": "n1", "objectName": "Entrance", "cx": 0, "cy": 0},
            {"id": "n2", "objectName": "Atrium", "cx": 10, "cy": 0}
        ],
        "edges": [
            {"id": "e1", "from": "n1", "to": "n2"}
        ]
    }"#;

    #[test]
    fn test_parse_plan() {
        let doc = FloorPlanDoc::from_json(PLAN).unwrap();
        assert_eq!(doc.vertices.len(), 2);
        assert_eq!(doc.edges.len(), 1);
        assert_eq!(doc.vertices[0].object_name, "Entrance");
        assert_eq!(doc.vertices[1].cx, 10);
        assert_eq!(doc.edges[0].from, "n1");
    }

    #[test]
    fn test_parse_empty_document() {
        let doc = FloorPlanDoc::from_json("{}").unwrap();
        assert!(doc.vertices.is_empty());
        assert!(doc.edges.is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let result = FloorPlanDoc::from_json("{\"vertices\": 42}");
        assert!(matches!(result, Err(DocumentError::Parse(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let doc = FloorPlanDoc::from_json(PLAN).unwrap();
        let json = serde_json::to_string(&doc).unwrap();
        // The external field name survives serialization
        assert!(json.contains("objectName"));
        let reparsed = FloorPlanDoc::from_json(&json).unwrap();
        assert_eq!(reparsed, doc);
    }
}
