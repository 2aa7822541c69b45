use super::{FieldDefinition, FieldPatch, FieldRef, FieldSet, default_fields};
use crate::error::FieldError;
use crate::graph::BlockKind;
use ahash::AHashMap;

/// Field sets of every block in a workflow, keyed by block id.
///
/// Blocks without an entry behave as if they owned an empty set.
#[derive(Debug, Clone, Default)]
pub struct FieldStore {
    sets: AHashMap<String, FieldSet>,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, block_id: &str) -> Option<&FieldSet> {
        self.sets.get(block_id)
    }

    /// Fields of `block_id` sorted by order; empty for unknown blocks.
    pub fn list(&self, block_id: &str) -> &[FieldDefinition] {
        self.sets.get(block_id).map(FieldSet::list).unwrap_or_default()
    }

    pub fn add(
        &mut self,
        block_id: &str,
        field: FieldDefinition,
    ) -> Result<&FieldDefinition, FieldError> {
        self.entry(block_id).add(field)
    }

    pub fn insert(
        &mut self,
        block_id: &str,
        field: FieldDefinition,
        order: u32,
    ) -> Result<&FieldDefinition, FieldError> {
        self.entry(block_id).insert(field, order)
    }

    pub fn add_placeholder(&mut self, block_id: &str) -> Result<&FieldDefinition, FieldError> {
        self.entry(block_id).add_placeholder()
    }

    pub fn remove(&mut self, block_id: &str, name: &str) -> Option<FieldDefinition> {
        self.sets.get_mut(block_id)?.remove(name)
    }

    pub fn update(
        &mut self,
        block_id: &str,
        target: impl Into<FieldRef>,
        patch: FieldPatch,
    ) -> Result<FieldDefinition, FieldError> {
        let target = target.into();
        match self.sets.get_mut(block_id) {
            Some(set) => set.update(&target, patch),
            None => Err(FieldError::FieldNotFound {
                block_id: block_id.to_string(),
                field: target.to_string(),
            }),
        }
    }

    pub fn normalize(&mut self, block_id: &str) {
        if let Some(set) = self.sets.get_mut(block_id) {
            set.normalize();
        }
    }

    /// Installs the default fields of `kind` for a block. Returns `false` for kinds that
    /// collect nothing; an existing set is replaced.
    pub fn seed_defaults(&mut self, block_id: &str, kind: &BlockKind) -> Result<bool, FieldError> {
        let Some(fields) = default_fields(kind) else {
            return Ok(false);
        };
        self.replace(FieldSet::from_fields(block_id, fields)?);
        Ok(true)
    }

    /// Replaces the set stored under its block id.
    pub fn replace(&mut self, set: FieldSet) -> Option<FieldSet> {
        self.sets.insert(set.block_id().to_string(), set)
    }

    /// Destroys the whole field set of a block.
    pub fn drop_block(&mut self, block_id: &str) -> Option<FieldSet> {
        self.sets.remove(block_id)
    }

    pub fn block_ids(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    fn entry(&mut self, block_id: &str) -> &mut FieldSet {
        self.sets
            .entry(block_id.to_string())
            .or_insert_with(|| FieldSet::new(block_id))
    }
}
