use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// The catalog of block kinds the editor offers.
///
/// Labels outside the catalog are preserved as [`BlockKind::Custom`] so that documents
/// produced by newer editors still round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockKind {
    InformationConfirmation,
    IdentityChoice,
    IdCollection,
    PassportCollection,
    SelfieCapture,
    IdentityVerification,
    VerificationSuccess,
    VerificationFailed,
    Start,
    End,
    Task,
    Condition,
    Switch,
    Input,
    Output,
    Custom(String),
}

impl BlockKind {
    /// Every catalog kind, in the order the editor's palette lists them.
    pub const CATALOG: [BlockKind; 15] = [
        BlockKind::InformationConfirmation,
        BlockKind::IdentityChoice,
        BlockKind::IdCollection,
        BlockKind::PassportCollection,
        BlockKind::SelfieCapture,
        BlockKind::IdentityVerification,
        BlockKind::VerificationSuccess,
        BlockKind::VerificationFailed,
        BlockKind::Start,
        BlockKind::End,
        BlockKind::Task,
        BlockKind::Condition,
        BlockKind::Switch,
        BlockKind::Input,
        BlockKind::Output,
    ];

    /// Human-readable label, as written in exported documents.
    pub fn label(&self) -> &str {
        match self {
            BlockKind::InformationConfirmation => "InformationConfirmation",
            BlockKind::IdentityChoice => "IdentityChoice",
            BlockKind::IdCollection => "IDCollection",
            BlockKind::PassportCollection => "PassportCollection",
            BlockKind::SelfieCapture => "SelfieCapture",
            BlockKind::IdentityVerification => "IdentityVerification",
            BlockKind::VerificationSuccess => "VerificationSuccess",
            BlockKind::VerificationFailed => "VerificationFailed",
            BlockKind::Start => "Start",
            BlockKind::End => "End",
            BlockKind::Task => "Task",
            BlockKind::Condition => "Condition (IF)",
            BlockKind::Switch => "Switch / Case",
            BlockKind::Input => "Input",
            BlockKind::Output => "Output",
            BlockKind::Custom(label) => label,
        }
    }

    /// Whether blocks of this kind gather structured data and so own a field set.
    pub fn is_collection(&self) -> bool {
        matches!(self, BlockKind::IdCollection | BlockKind::PassportCollection)
    }

    /// Footprint of a block of this kind when dropped on the canvas.
    pub fn default_size(&self) -> Size {
        match self {
            BlockKind::Start | BlockKind::End => Size::new(64.0, 64.0),
            BlockKind::InformationConfirmation
            | BlockKind::IdentityChoice
            | BlockKind::SelfieCapture
            | BlockKind::IdentityVerification
            | BlockKind::VerificationSuccess
            | BlockKind::VerificationFailed => Size::new(112.0, 64.0),
            _ => Size::new(128.0, 80.0),
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BlockKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(BlockKind::CATALOG
            .into_iter()
            .find(|kind| kind.label() == s)
            .unwrap_or_else(|| BlockKind::Custom(s.to_string())))
    }
}

impl From<String> for BlockKind {
    fn from(label: String) -> Self {
        match label.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<BlockKind> for String {
    fn from(kind: BlockKind) -> Self {
        kind.label().to_string()
    }
}

/// Top-left corner of a block, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(alias = "left")]
    pub x: f64,
    #[serde(alias = "top")]
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A step of the workflow placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: String,
    pub kind: BlockKind,
    pub position: Position,
    pub size: Option<Size>,
}

impl Block {
    /// Creates a block with the default footprint of its kind.
    pub fn new(id: impl Into<String>, kind: BlockKind, position: Position) -> Self {
        let size = Some(kind.default_size());
        Self {
            id: id.into(),
            kind,
            position,
            size,
        }
    }

    pub fn with_size(mut self, size: Option<Size>) -> Self {
        self.size = size;
        self
    }

    /// Bottom-right corner, falling back to the position for unsized blocks.
    pub fn extent(&self) -> (f64, f64) {
        let size = self.size.unwrap_or_default();
        (self.position.x + size.width, self.position.y + size.height)
    }
}

/// A directed edge between two blocks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Connection {
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    pub label: Option<String>,
}

impl Connection {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: None,
            source: source.into(),
            target: target.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn touches(&self, block_id: &str) -> bool {
        self.source == block_id || self.target == block_id
    }
}
