use super::{FieldDefinition, FieldPatch, FieldRef, FieldType};
use crate::error::FieldError;
use chrono::Utc;
use itertools::Itertools;

/// The ordered fields of a single block.
///
/// Fields are always kept sorted ascending by `order`, and no two fields share an
/// `order` value. Gaps are allowed (after a removal) until [`FieldSet::normalize`] runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    block_id: String,
    fields: Vec<FieldDefinition>,
}

impl FieldSet {
    pub fn new(block_id: impl Into<String>) -> Self {
        Self {
            block_id: block_id.into(),
            fields: Vec::new(),
        }
    }

    /// Builds a set from existing definitions, e.g. an imported document.
    ///
    /// Names must be unique. Fields are sorted by their `order`; if two fields carry the
    /// same `order`, the whole set is renumbered in that sorted sequence.
    pub fn from_fields(
        block_id: impl Into<String>,
        fields: Vec<FieldDefinition>,
    ) -> Result<Self, FieldError> {
        let block_id = block_id.into();
        if let Some(name) = fields.iter().map(|f| f.name.as_str()).duplicates().next() {
            return Err(FieldError::DuplicateFieldName {
                block_id,
                name: name.to_string(),
            });
        }

        let fields: Vec<_> = fields.into_iter().sorted_by_key(|f| f.order).collect();
        let mut set = Self { block_id, fields };
        if !set.fields.iter().map(|f| f.order).all_unique() {
            set.normalize();
        }
        Ok(set)
    }

    pub fn block_id(&self) -> &str {
        &self.block_id
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in display order.
    pub fn list(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter()
    }

    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The order a newly appended field receives.
    ///
    /// Equals the set size while orders are contiguous; past the highest order otherwise.
    /// `None` when the highest order is `u32::MAX` and nothing can follow it.
    pub fn next_order(&self) -> Option<u32> {
        let after_last = match self.fields.last() {
            Some(last) => last.order.checked_add(1)?,
            None => 0,
        };
        Some(after_last.max(self.fields.len() as u32))
    }

    /// Appends a field at the end of the set, overriding its `order`.
    ///
    /// If the highest order is already `u32::MAX`, the set is normalized first.
    pub fn add(&mut self, mut field: FieldDefinition) -> Result<&FieldDefinition, FieldError> {
        self.ensure_unique_name(&field.name, None)?;
        field.order = self.tail_order();
        tracing::debug!(block_id = %self.block_id, field = %field.name, order = field.order, "field added");
        let index = self.fields.len();
        self.fields.push(field);
        Ok(&self.fields[index])
    }

    /// Places a field at `order`, moving every field at or after that slot back by one.
    ///
    /// `order` is clamped to [`FieldSet::next_order`], so a set can never be extended with
    /// a hole by insertion.
    pub fn insert(
        &mut self,
        mut field: FieldDefinition,
        order: u32,
    ) -> Result<&FieldDefinition, FieldError> {
        self.ensure_unique_name(&field.name, None)?;
        let slot = order.min(self.tail_order());
        for existing in self.fields.iter_mut().filter(|f| f.order >= slot) {
            // Every existing order is below the tail order, so this cannot overflow.
            existing.order = existing.order.checked_add(1).unwrap_or(u32::MAX);
        }
        field.order = slot;
        tracing::debug!(block_id = %self.block_id, field = %field.name, order = slot, "field inserted");

        let index = self.fields.partition_point(|f| f.order < slot);
        self.fields.insert(index, field);
        Ok(&self.fields[index])
    }

    /// Removes a field by name. Removing an unknown name is a no-op.
    ///
    /// Remaining orders are left untouched.
    pub fn remove(&mut self, name: &str) -> Option<FieldDefinition> {
        let index = self.fields.iter().position(|f| f.name == name)?;
        tracing::debug!(block_id = %self.block_id, field = %name, "field removed");
        Some(self.fields.remove(index))
    }

    /// Applies a single-property change and returns the updated field.
    pub fn update(
        &mut self,
        target: &FieldRef,
        patch: FieldPatch,
    ) -> Result<FieldDefinition, FieldError> {
        let index = self.resolve(target)?;

        match patch {
            FieldPatch::Order(new_order) => return Ok(self.reorder(index, new_order)),
            FieldPatch::Name(name) => {
                self.ensure_unique_name(&name, Some(index))?;
                self.fields[index].name = name;
            }
            FieldPatch::Label(label) => self.fields[index].label = label,
            FieldPatch::FieldType(field_type) => self.fields[index].field_type = field_type,
            FieldPatch::Required(flag) => self.fields[index].is_required = flag,
            FieldPatch::Multiple(flag) => self.fields[index].is_multiple = flag,
            FieldPatch::DependsOn(name) => self.fields[index].depends_on = name,
        }
        Ok(self.fields[index].clone())
    }

    /// Renumbers orders to `0..len` keeping the current sequence.
    pub fn normalize(&mut self) {
        for (order, field) in self.fields.iter_mut().enumerate() {
            field.order = order as u32;
        }
    }

    /// Fields whose `depends_on` names a field that is not in this set.
    pub fn dangling_dependencies(&self) -> Vec<&FieldDefinition> {
        self.fields
            .iter()
            .filter(|f| f.dependency().is_some_and(|dep| !self.contains(dep)))
            .collect()
    }

    /// Returns `{prefix}_{millis}`, suffixed further if that name is already taken.
    pub fn mint_name(&self, prefix: &str) -> String {
        let base = format!("{}_{}", prefix, Utc::now().timestamp_millis());
        let mut candidate = base.clone();
        let mut suffix = 1;
        while self.contains(&candidate) {
            candidate = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        candidate
    }

    /// Appends an optional text field with a freshly minted name.
    pub fn add_placeholder(&mut self) -> Result<&FieldDefinition, FieldError> {
        let name = self.mint_name("new_field");
        self.add(FieldDefinition::new(name, "New Field", FieldType::Text))
    }

    /// The next free order past the highest one, renumbering the set when `u32::MAX` is
    /// already taken.
    fn tail_order(&mut self) -> u32 {
        if let Some(order) = self.next_order() {
            return order;
        }
        tracing::debug!(block_id = %self.block_id, "field orders exhausted, renumbering");
        self.normalize();
        self.fields.len() as u32
    }

    fn resolve(&self, target: &FieldRef) -> Result<usize, FieldError> {
        let found = match target {
            FieldRef::Index(index) => (*index < self.fields.len()).then_some(*index),
            FieldRef::Name(name) => self.fields.iter().position(|f| &f.name == name),
        };
        found.ok_or_else(|| FieldError::FieldNotFound {
            block_id: self.block_id.clone(),
            field: target.to_string(),
        })
    }

    fn ensure_unique_name(&self, name: &str, except: Option<usize>) -> Result<(), FieldError> {
        let taken = self
            .fields
            .iter()
            .enumerate()
            .any(|(i, f)| Some(i) != except && f.name == name);
        if taken {
            return Err(FieldError::DuplicateFieldName {
                block_id: self.block_id.clone(),
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Moves the field at `index` to `new_order`.
    ///
    /// When the field holding `new_order` is the direct neighbour of the moving field,
    /// the two exchange orders. Otherwise every field between the old and new slot shifts
    /// one step towards the old slot.
    fn reorder(&mut self, index: usize, new_order: u32) -> FieldDefinition {
        let old_order = self.fields[index].order;
        if old_order == new_order {
            return self.fields[index].clone();
        }

        let (low, high) = (old_order.min(new_order), old_order.max(new_order));
        let occupant = self
            .fields
            .iter()
            .enumerate()
            .find(|(i, f)| *i != index && f.order == new_order)
            .map(|(i, _)| i);
        let passed_over = self
            .fields
            .iter()
            .filter(|f| f.order > low && f.order < high)
            .count();

        match occupant {
            Some(other) if passed_over == 0 => {
                self.fields[other].order = old_order;
                tracing::debug!(
                    block_id = %self.block_id,
                    field = %self.fields[index].name,
                    with = %self.fields[other].name,
                    "field orders swapped"
                );
            }
            _ => {
                for (i, field) in self.fields.iter_mut().enumerate() {
                    if i == index {
                        continue;
                    }
                    if old_order < new_order && field.order > old_order && field.order <= new_order
                    {
                        field.order -= 1;
                    } else if old_order > new_order
                        && field.order >= new_order
                        && field.order < old_order
                    {
                        field.order += 1;
                    }
                }
                tracing::debug!(
                    block_id = %self.block_id,
                    field = %self.fields[index].name,
                    from = old_order,
                    to = new_order,
                    "field moved"
                );
            }
        }

        self.fields[index].order = new_order;
        let moved = self.fields[index].clone();
        self.fields.sort_by_key(|f| f.order);
        moved
    }
}
