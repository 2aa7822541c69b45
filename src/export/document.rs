use crate::error::DocumentError;
use crate::field::FieldDefinition;
use crate::graph::{BlockKind, Position, Size};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;

/// The exported snapshot of a workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDocument {
    pub metadata: DocumentMetadata,
    pub blocks: Vec<DocumentBlock>,
    pub connections: Vec<DocumentConnection>,
    pub settings: DocumentSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub name: String,
    pub version: String,
    #[serde(rename = "createdAt", alias = "created_at")]
    pub created_at: DateTime<Utc>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// Present only when the block has configured fields, sorted by order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldDefinition>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentConnection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DocumentSettings {
    #[serde(rename = "canvasSize", alias = "canvas_size")]
    pub canvas_size: Size,
}

impl WorkflowDocument {
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a document from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, DocumentError> {
        let content = fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the document as pretty-printed JSON.
    pub fn save(&self, path: &str) -> Result<(), DocumentError> {
        let json = self.to_json_pretty()?;
        fs::write(path, json).map_err(|source| DocumentError::Io {
            path: path.to_string(),
            source,
        })
    }

    pub fn block(&self, id: &str) -> Option<&DocumentBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }
}
