//! The identity verification workflow the editor opens with.

use super::{Block, BlockKind, Position, Workflow};
use crate::error::GraphError;

const BLOCKS: [(&str, BlockKind, f64, f64); 10] = [
    ("intro", BlockKind::InformationConfirmation, 20.0, 150.0),
    ("identity-choice", BlockKind::IdentityChoice, 180.0, 150.0),
    ("id-collection", BlockKind::IdCollection, 340.0, 80.0),
    ("passport-collection", BlockKind::PassportCollection, 340.0, 220.0),
    ("image-review", BlockKind::InformationConfirmation, 500.0, 150.0),
    ("selfie-capture", BlockKind::SelfieCapture, 660.0, 150.0),
    ("selfie-review", BlockKind::InformationConfirmation, 820.0, 150.0),
    ("identity-verification", BlockKind::IdentityVerification, 980.0, 150.0),
    ("success", BlockKind::VerificationSuccess, 1140.0, 80.0),
    ("failed", BlockKind::VerificationFailed, 1140.0, 220.0),
];

const CONNECTIONS: [(&str, &str, &str); 10] = [
    ("intro", "identity-choice", "→ Start"),
    ("identity-choice", "id-collection", "ID card / Licence / Voter card"),
    ("identity-choice", "passport-collection", "Passport"),
    ("id-collection", "image-review", "→ Document captured"),
    ("passport-collection", "image-review", "→ Passport captured"),
    ("image-review", "selfie-capture", "Confirmed"),
    ("selfie-capture", "selfie-review", "→ Selfie captured"),
    ("selfie-review", "identity-verification", "Confirmed"),
    ("identity-verification", "success", "OK"),
    ("identity-verification", "failed", "KO"),
];

/// Builds the default identity verification workflow: document choice, ID or passport
/// collection, selfie capture and the final verification outcome.
pub fn identity_workflow() -> Result<Workflow, GraphError> {
    let mut workflow = Workflow::new();
    for (id, kind, x, y) in BLOCKS {
        workflow.add_block(Block::new(id, kind, Position::new(x, y)))?;
    }
    for (source, target, label) in CONNECTIONS {
        workflow.connect(source, target, Some(label))?;
    }
    Ok(workflow)
}
