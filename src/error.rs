use thiserror::Error;

/// Errors raised by field set mutations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Field '{name}' already exists in block '{block_id}'")]
    DuplicateFieldName { block_id: String, name: String },

    #[error("Field {field} not found in block '{block_id}'")]
    FieldNotFound { block_id: String, field: String },

    #[error("Invalid value for field property '{property}': {message}")]
    InvalidPatch { property: String, message: String },
}

/// Errors raised by the workflow graph model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("A block with id '{0}' already exists in the workflow")]
    DuplicateBlock(String),

    #[error("Block '{missing_block_id}' not found, which is required by {context}")]
    BlockNotFound {
        missing_block_id: String,
        context: String,
    },

    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Errors that can occur when reading or writing a workflow document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to parse workflow document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not access '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
