//! The in-memory workflow model the editor renders from.
//!
//! [`Workflow`] owns blocks, connections and the [`FieldStore`] of every block, and keeps
//! them consistent: collection blocks get their default fields on creation, and removing a
//! block removes its fields and connections.

use crate::error::{FieldError, GraphError};
use crate::export::{ExportOutcome, Exporter, WorkflowDocument};
use crate::field::{FieldSet, FieldStore};

mod block;
pub mod template;

pub use block::{Block, BlockKind, Connection, Position, Size};

#[derive(Debug, Clone, Default)]
pub struct Workflow {
    blocks: Vec<Block>,
    connections: Vec<Connection>,
    fields: FieldStore,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a model from an exported document.
    ///
    /// Connections are kept verbatim, including ones whose endpoints are missing; the next
    /// export drops and reports them. A block whose `fields` contain duplicate names is
    /// rejected.
    pub fn from_document(document: WorkflowDocument) -> Result<Self, FieldError> {
        let mut workflow = Self::new();

        for entry in document.blocks {
            if let Some(fields) = entry.fields {
                workflow
                    .fields
                    .replace(FieldSet::from_fields(entry.id.as_str(), fields)?);
            }
            workflow.blocks.push(Block {
                id: entry.id,
                kind: entry.kind,
                position: entry.position,
                size: entry.size,
            });
        }

        workflow.connections = document
            .connections
            .into_iter()
            .map(|c| Connection {
                id: c.id,
                source: c.source,
                target: c.target,
                label: (!c.label.is_empty()).then_some(c.label),
            })
            .collect();

        Ok(workflow)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn fields(&self) -> &FieldStore {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FieldStore {
        &mut self.fields
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Adds a block, seeding default fields when it is a collection block.
    pub fn add_block(&mut self, block: Block) -> Result<&Block, GraphError> {
        if self.block(&block.id).is_some() {
            return Err(GraphError::DuplicateBlock(block.id));
        }
        if self.fields.seed_defaults(&block.id, &block.kind)? {
            tracing::debug!(block_id = %block.id, kind = %block.kind, "seeded default fields");
        }
        let index = self.blocks.len();
        self.blocks.push(block);
        Ok(&self.blocks[index])
    }

    /// Removes a block together with its field set and every connection touching it.
    pub fn remove_block(&mut self, id: &str) -> Option<Block> {
        let index = self.blocks.iter().position(|b| b.id == id)?;
        let block = self.blocks.remove(index);
        self.fields.drop_block(id);

        let before = self.connections.len();
        self.connections.retain(|c| !c.touches(id));
        tracing::debug!(
            block_id = %id,
            detached = before - self.connections.len(),
            "block removed"
        );
        Some(block)
    }

    pub fn move_block(&mut self, id: &str, position: Position) -> Result<(), GraphError> {
        let block = self
            .blocks
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| GraphError::BlockNotFound {
                missing_block_id: id.to_string(),
                context: "a move".to_string(),
            })?;
        block.position = position;
        Ok(())
    }

    /// Connects two existing blocks.
    pub fn connect(
        &mut self,
        source: &str,
        target: &str,
        label: Option<&str>,
    ) -> Result<&Connection, GraphError> {
        for endpoint in [source, target] {
            if self.block(endpoint).is_none() {
                return Err(GraphError::BlockNotFound {
                    missing_block_id: endpoint.to_string(),
                    context: format!("a connection from '{}' to '{}'", source, target),
                });
            }
        }

        let mut connection = Connection::new(source, target);
        connection.label = label.map(str::to_string);
        let index = self.connections.len();
        self.connections.push(connection);
        Ok(&self.connections[index])
    }

    /// Removes every connection from `source` to `target`, returning how many were removed.
    pub fn disconnect(&mut self, source: &str, target: &str) -> usize {
        let before = self.connections.len();
        self.connections
            .retain(|c| !(c.source == source && c.target == target));
        before - self.connections.len()
    }

    pub fn export(&self, exporter: &Exporter) -> ExportOutcome {
        exporter.export(&self.blocks, &self.connections, &self.fields)
    }
}
