//! Turns the workflow model into a [`WorkflowDocument`].
//!
//! Export never fails. Connections whose endpoints are missing are dropped, fields with a
//! dangling `depends_on` are kept as-is, and both are reported through
//! [`ExportOutcome::warnings`] and logged at `warn` level.

use crate::field::FieldStore;
use crate::graph::{Block, Connection, Size};
use ahash::AHashSet;
use chrono::{DateTime, Utc};
use std::fmt;

mod document;

pub use document::{
    DocumentBlock, DocumentConnection, DocumentMetadata, DocumentSettings, WorkflowDocument,
};

pub const DEFAULT_NAME: &str = "Identity Workflow";
pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_DESCRIPTION: &str = "Identity verification workflow with document collection";

/// A non-fatal integrity finding raised while exporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityWarning {
    /// A connection references a block that is not part of the export. It was dropped.
    DanglingConnection {
        index: usize,
        source: String,
        target: String,
        missing: String,
    },
    /// A field depends on a field that does not exist in the same block.
    DanglingDependency {
        block_id: String,
        field: String,
        depends_on: String,
    },
}

impl fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityWarning::DanglingConnection {
                index,
                source,
                target,
                missing,
            } => write!(
                f,
                "connection #{} from '{}' to '{}' references missing block '{}' and was dropped",
                index, source, target, missing
            ),
            IntegrityWarning::DanglingDependency {
                block_id,
                field,
                depends_on,
            } => write!(
                f,
                "field '{}' in block '{}' depends on unknown field '{}'",
                field, block_id, depends_on
            ),
        }
    }
}

/// The result of an export: the document plus whatever had to be repaired to build it.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub document: WorkflowDocument,
    pub warnings: Vec<IntegrityWarning>,
}

impl ExportOutcome {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Produces workflow documents with fixed metadata and canvas settings.
#[derive(Debug, Clone)]
pub struct Exporter {
    name: String,
    version: String,
    description: String,
    canvas_size: Option<Size>,
    timestamp: Option<DateTime<Utc>>,
}

pub struct ExporterBuilder {
    name: String,
    version: String,
    description: String,
    canvas_size: Option<Size>,
    timestamp: Option<DateTime<Utc>>,
}

impl Default for ExporterBuilder {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            version: DEFAULT_VERSION.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            canvas_size: None,
            timestamp: None,
        }
    }
}

impl ExporterBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
    /// Fixes the canvas size instead of deriving it from the block extents.
    pub fn with_canvas_size(mut self, width: f64, height: f64) -> Self {
        self.canvas_size = Some(Size::new(width, height));
        self
    }
    /// Stamps every document with `timestamp` instead of the current time.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
    pub fn build(self) -> Exporter {
        Exporter {
            name: self.name,
            version: self.version,
            description: self.description,
            canvas_size: self.canvas_size,
            timestamp: self.timestamp,
        }
    }
}

impl Default for Exporter {
    fn default() -> Self {
        ExporterBuilder::default().build()
    }
}

impl Exporter {
    pub fn builder() -> ExporterBuilder {
        ExporterBuilder::new()
    }

    /// Builds the document for `blocks` and `connections`, embedding each block's fields
    /// from `fields`.
    pub fn export(
        &self,
        blocks: &[Block],
        connections: &[Connection],
        fields: &FieldStore,
    ) -> ExportOutcome {
        let mut warnings = Vec::new();

        let document_blocks: Vec<DocumentBlock> = blocks
            .iter()
            .map(|block| {
                let block_fields = fields.list(&block.id);
                if let Some(set) = fields.get(&block.id) {
                    for field in set.dangling_dependencies() {
                        warnings.push(IntegrityWarning::DanglingDependency {
                            block_id: block.id.clone(),
                            field: field.name.clone(),
                            depends_on: field.depends_on.clone(),
                        });
                    }
                }
                DocumentBlock {
                    id: block.id.clone(),
                    kind: block.kind.clone(),
                    position: block.position,
                    size: block.size,
                    fields: (!block_fields.is_empty()).then(|| block_fields.to_vec()),
                }
            })
            .collect();

        let known: AHashSet<&str> = blocks.iter().map(|b| b.id.as_str()).collect();
        let mut document_connections = Vec::with_capacity(connections.len());
        for (index, connection) in connections.iter().enumerate() {
            let missing = [&connection.source, &connection.target]
                .into_iter()
                .find(|endpoint| !known.contains(endpoint.as_str()));
            if let Some(missing) = missing {
                warnings.push(IntegrityWarning::DanglingConnection {
                    index,
                    source: connection.source.clone(),
                    target: connection.target.clone(),
                    missing: missing.clone(),
                });
                continue;
            }
            document_connections.push(DocumentConnection {
                id: connection.id.clone(),
                source: connection.source.clone(),
                target: connection.target.clone(),
                label: connection.label.clone().unwrap_or_default(),
            });
        }

        for warning in &warnings {
            tracing::warn!(target: "veriflow::export", "{}", warning);
        }

        let document = WorkflowDocument {
            metadata: DocumentMetadata {
                name: self.name.clone(),
                version: self.version.clone(),
                created_at: self.timestamp.unwrap_or_else(Utc::now),
                description: self.description.clone(),
            },
            blocks: document_blocks,
            connections: document_connections,
            settings: DocumentSettings {
                canvas_size: self.canvas_size.unwrap_or_else(|| fit_canvas(blocks)),
            },
        };

        ExportOutcome { document, warnings }
    }
}

/// Smallest canvas anchored at the origin that contains every block.
fn fit_canvas(blocks: &[Block]) -> Size {
    blocks.iter().map(Block::extent).fold(
        Size::default(),
        |canvas, (right, bottom)| Size::new(canvas.width.max(right), canvas.height.max(bottom)),
    )
}
