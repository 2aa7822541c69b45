use super::{FieldDefinition, FieldType};
use crate::graph::BlockKind;

/// Fields a freshly created block of `kind` starts with, or `None` for kinds that do not
/// collect data.
pub fn default_fields(kind: &BlockKind) -> Option<Vec<FieldDefinition>> {
    let (document_field, document_label) = match kind {
        BlockKind::IdCollection => ("id_number", "ID Number"),
        BlockKind::PassportCollection => ("passport_number", "Passport Number"),
        _ => return None,
    };

    Some(vec![
        identity_text("last_name", "Last Name", 0),
        identity_text("first_name", "First Name", 1),
        identity_text(document_field, document_label, 2),
    ])
}

fn identity_text(name: &str, label: &str, order: u32) -> FieldDefinition {
    FieldDefinition::new(name, label, FieldType::Text)
        .required(true)
        .with_order(order)
}
