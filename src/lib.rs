//! # Veriflow - Identity Workflow Model and Export
//!
//! **Veriflow** is the model behind a visual identity-verification workflow editor. The
//! editor lets a user place typed blocks on a canvas, wire them together and configure the
//! fields collection blocks gather. Veriflow owns that state and turns it into a canonical
//! JSON document; rendering is left entirely to the UI layer.
//!
//! ## Core Workflow
//!
//! 1.  **Build the graph**: Create a [`graph::Workflow`], or start from
//!     [`graph::template::identity_workflow`]. Collection blocks (`IDCollection`,
//!     `PassportCollection`) receive default fields when added.
//! 2.  **Edit fields**: Use the [`field::FieldStore`] to add, remove and patch fields. Moving
//!     a field with [`field::FieldPatch::Order`] reconciles the orders of its neighbours so
//!     that no two fields ever share a slot.
//! 3.  **Export**: Configure an [`export::Exporter`] and export the workflow. The result is a
//!     [`export::WorkflowDocument`] plus any integrity warnings found on the way.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use veriflow::prelude::*;
//!
//! fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let mut workflow = Workflow::new();
//!     workflow.add_block(Block::new("choice", BlockKind::IdentityChoice, Position::new(50.0, 200.0)))?;
//!     workflow.add_block(Block::new("id", BlockKind::IdCollection, Position::new(300.0, 100.0)))?;
//!     workflow.connect("choice", "id", Some("ID card"))?;
//!
//!     // Move the document number to the top of the form.
//!     workflow
//!         .fields_mut()
//!         .update("id", "id_number", FieldPatch::Order(0))?;
//!
//!     let exporter = Exporter::builder()
//!         .with_name("Onboarding")
//!         .with_canvas_size(1280.0, 720.0)
//!         .build();
//!     let outcome = workflow.export(&exporter);
//!     for warning in &outcome.warnings {
//!         eprintln!("warning: {}", warning);
//!     }
//!     println!("{}", outcome.document.to_json_pretty()?);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod export;
pub mod field;
pub mod graph;
pub mod prelude;
