//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the veriflow crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use veriflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let workflow = identity_workflow()?;
//! let outcome = workflow.export(&Exporter::default());
//! outcome.document.save("workflow.json")?;
//! # Ok(())
//! # }
//! ```

// Model
pub use crate::field::{FieldDefinition, FieldPatch, FieldRef, FieldSet, FieldStore, FieldType};
pub use crate::graph::template::identity_workflow;
pub use crate::graph::{Block, BlockKind, Connection, Position, Size, Workflow};

// Export
pub use crate::export::{ExportOutcome, Exporter, IntegrityWarning, WorkflowDocument};

// Error types
pub use crate::error::{DocumentError, FieldError, GraphError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
