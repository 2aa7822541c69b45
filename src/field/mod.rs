//! Field definitions attached to collection blocks.
//!
//! A [`FieldSet`] holds the fields of one block and keeps their `order` values unique.
//! A [`FieldStore`] maps block ids to their field sets and is what the rest of the crate
//! talks to.

use crate::error::FieldError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod defaults;
mod set;
mod store;

pub use defaults::default_fields;
pub use set::FieldSet;
pub use store::FieldStore;

/// The kind of input a field collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Email,
    Date,
    Select,
    Checkbox,
    Textarea,
}

impl FieldType {
    pub const ALL: [FieldType; 7] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Email,
        FieldType::Date,
        FieldType::Select,
        FieldType::Checkbox,
        FieldType::Textarea,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Email => "email",
            FieldType::Date => "date",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
            FieldType::Textarea => "textarea",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FieldError::InvalidPatch {
                property: "field_type".to_string(),
                message: format!("unknown field type '{}'", s),
            })
    }
}

/// Schema for one datum collected by a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub label: String,
    pub field_type: FieldType,
    pub is_required: bool,
    pub is_multiple: bool,
    pub order: u32,
    /// Name of the field this one is conditional upon. Empty means none.
    #[serde(default)]
    pub depends_on: String,
}

impl FieldDefinition {
    /// Creates an optional, single-valued field with no dependency at order 0.
    pub fn new(name: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            field_type,
            is_required: false,
            is_multiple: false,
            order: 0,
            depends_on: String::new(),
        }
    }

    pub fn required(mut self, is_required: bool) -> Self {
        self.is_required = is_required;
        self
    }

    pub fn multiple(mut self, is_multiple: bool) -> Self {
        self.is_multiple = is_multiple;
        self
    }

    pub fn depending_on(mut self, name: impl Into<String>) -> Self {
        self.depends_on = name.into();
        self
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    /// The referenced field name, if this field has a dependency.
    pub fn dependency(&self) -> Option<&str> {
        if self.depends_on.is_empty() {
            None
        } else {
            Some(&self.depends_on)
        }
    }
}

/// Addresses a field either by its position in the sorted list or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRef {
    Index(usize),
    Name(String),
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRef::Index(index) => write!(f, "#{}", index),
            FieldRef::Name(name) => write!(f, "'{}'", name),
        }
    }
}

impl From<usize> for FieldRef {
    fn from(index: usize) -> Self {
        FieldRef::Index(index)
    }
}

impl From<&str> for FieldRef {
    fn from(name: &str) -> Self {
        FieldRef::Name(name.to_string())
    }
}

impl From<String> for FieldRef {
    fn from(name: String) -> Self {
        FieldRef::Name(name)
    }
}

/// A single-property change to a field.
///
/// Every variant except [`FieldPatch::Order`] replaces one property in place. `Order`
/// moves the field and reconciles the orders of the fields it passes over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPatch {
    Name(String),
    Label(String),
    FieldType(FieldType),
    Required(bool),
    Multiple(bool),
    Order(u32),
    DependsOn(String),
}

impl FieldPatch {
    /// Builds a patch from an editor's `(property, value)` pair.
    ///
    /// `order` accepts a number or a numeric string; anything unparsable or negative is
    /// treated as 0, matching how the editor's order input behaves.
    pub fn from_property(property: &str, value: &serde_json::Value) -> Result<Self, FieldError> {
        use serde_json::Value as Json;

        let invalid = |message: &str| FieldError::InvalidPatch {
            property: property.to_string(),
            message: message.to_string(),
        };

        match property {
            "name" => value
                .as_str()
                .map(|s| FieldPatch::Name(s.to_string()))
                .ok_or_else(|| invalid("expected a string")),
            "label" => value
                .as_str()
                .map(|s| FieldPatch::Label(s.to_string()))
                .ok_or_else(|| invalid("expected a string")),
            "field_type" => {
                let raw = value.as_str().ok_or_else(|| invalid("expected a string"))?;
                raw.parse().map(FieldPatch::FieldType)
            }
            "is_required" | "is_multiple" => {
                let flag = match value {
                    Json::Bool(b) => *b,
                    Json::String(s) if s.eq_ignore_ascii_case("true") => true,
                    Json::String(s) if s.eq_ignore_ascii_case("false") => false,
                    _ => return Err(invalid("expected a boolean")),
                };
                Ok(if property == "is_required" {
                    FieldPatch::Required(flag)
                } else {
                    FieldPatch::Multiple(flag)
                })
            }
            "order" => {
                let order = match value {
                    Json::Number(n) => n
                        .as_i64()
                        .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                        .unwrap_or(0),
                    Json::String(s) => s.trim().parse::<i64>().unwrap_or(0),
                    _ => 0,
                };
                Ok(FieldPatch::Order(order.clamp(0, u32::MAX as i64) as u32))
            }
            "depends_on" => match value {
                Json::Null => Ok(FieldPatch::DependsOn(String::new())),
                Json::String(s) => Ok(FieldPatch::DependsOn(s.clone())),
                _ => Err(invalid("expected a string or null")),
            },
            _ => Err(invalid("unknown property")),
        }
    }

    /// The wire name of the property this patch touches.
    pub fn property(&self) -> &'static str {
        match self {
            FieldPatch::Name(_) => "name",
            FieldPatch::Label(_) => "label",
            FieldPatch::FieldType(_) => "field_type",
            FieldPatch::Required(_) => "is_required",
            FieldPatch::Multiple(_) => "is_multiple",
            FieldPatch::Order(_) => "order",
            FieldPatch::DependsOn(_) => "depends_on",
        }
    }
}
