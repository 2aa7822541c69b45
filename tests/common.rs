//! Common test utilities for building field sets and workflows.
use chrono::{DateTime, TimeZone, Utc};
use veriflow::prelude::*;

/// A field set for block "form" holding fields named after `names`, with orders 0..n.
#[allow(dead_code)]
pub fn field_set(names: &[&str]) -> FieldSet {
    let mut set = FieldSet::new("form");
    for name in names {
        set.add(FieldDefinition::new(*name, name.to_uppercase(), FieldType::Text))
            .expect("fixture names are unique");
    }
    set
}

/// Field names of `set` in display order, paired with their order values.
#[allow(dead_code)]
pub fn layout(fields: &[FieldDefinition]) -> Vec<(String, u32)> {
    fields.iter().map(|f| (f.name.clone(), f.order)).collect()
}

#[allow(dead_code)]
pub fn pairs(expected: &[(&str, u32)]) -> Vec<(String, u32)> {
    expected
        .iter()
        .map(|(name, order)| (name.to_string(), *order))
        .collect()
}

#[allow(dead_code)]
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap()
}

/// An exporter with a pinned timestamp and canvas so documents compare byte for byte.
#[allow(dead_code)]
pub fn pinned_exporter() -> Exporter {
    Exporter::builder()
        .with_timestamp(fixed_time())
        .with_canvas_size(1300.0, 400.0)
        .build()
}

/// Two blocks, "choice" and "id", wired together; "id" carries the default ID fields.
#[allow(dead_code)]
pub fn small_workflow() -> Workflow {
    let mut workflow = Workflow::new();
    workflow
        .add_block(Block::new(
            "choice",
            BlockKind::IdentityChoice,
            Position::new(50.0, 200.0),
        ))
        .unwrap();
    workflow
        .add_block(Block::new(
            "id",
            BlockKind::IdCollection,
            Position::new(300.0, 100.0),
        ))
        .unwrap();
    workflow.connect("choice", "id", Some("ID card")).unwrap();
    workflow
}
