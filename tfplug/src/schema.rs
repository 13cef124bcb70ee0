//! Schema types and builders for tfplug
//!
//! A resource schema declares its attributes, their flags and the plan
//! modifiers attached to each of them. Modifiers are constructed once when
//! the schema is built and only read afterwards.

use crate::plan_modifier::{AttributePlanModifier, BoolPlanModifier, StringPlanModifier};
use crate::types::Dynamic;
use std::collections::HashMap;

/// AttributeType defines the type system for Terraform attributes
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeType {
    String,
    Number, // Always f64
    Bool,
    List(Box<AttributeType>),               // Ordered, allows duplicates
    Set(Box<AttributeType>),                // Unordered, no duplicates
    Map(Box<AttributeType>),                // String keys only
    Object(HashMap<String, AttributeType>), // Fixed structure
}

impl AttributeType {
    pub fn name(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Number => "number",
            AttributeType::Bool => "bool",
            AttributeType::List(_) => "list",
            AttributeType::Set(_) => "set",
            AttributeType::Map(_) => "map",
            AttributeType::Object(_) => "object",
        }
    }

    /// Whether `value` has the top-level shape of this type; null and unknown fit every type
    pub fn admits(&self, value: &Dynamic) -> bool {
        matches!(
            (self, value),
            (_, Dynamic::Null | Dynamic::Unknown)
                | (AttributeType::String, Dynamic::String(_))
                | (AttributeType::Number, Dynamic::Number(_))
                | (AttributeType::Bool, Dynamic::Bool(_))
                | (AttributeType::List(_) | AttributeType::Set(_), Dynamic::List(_))
                | (AttributeType::Map(_) | AttributeType::Object(_), Dynamic::Map(_))
        )
    }
}

/// Attribute represents a single resource attribute
pub struct Attribute {
    pub name: String,
    pub r#type: AttributeType,
    pub description: String,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub plan_modifiers: Vec<Box<dyn AttributePlanModifier>>,
    pub bool_plan_modifiers: Vec<Box<dyn BoolPlanModifier>>,
    pub string_plan_modifiers: Vec<Box<dyn StringPlanModifier>>,
}

/// Both renderings of a modifier description
#[derive(Debug, Clone, PartialEq)]
pub struct ModifierDescription {
    pub plain: String,
    pub markdown: String,
}

impl Attribute {
    /// Descriptions of every attached modifier in execution order
    pub fn modifier_descriptions(&self) -> Vec<ModifierDescription> {
        let generic = self.plan_modifiers.iter().map(|m| ModifierDescription {
            plain: m.description(),
            markdown: m.markdown_description(),
        });
        let bools = self.bool_plan_modifiers.iter().map(|m| ModifierDescription {
            plain: m.description(),
            markdown: m.markdown_description(),
        });
        let strings = self
            .string_plan_modifiers
            .iter()
            .map(|m| ModifierDescription {
                plain: m.description(),
                markdown: m.markdown_description(),
            });

        generic.chain(bools).chain(strings).collect()
    }

    pub fn has_plan_modifiers(&self) -> bool {
        !self.plan_modifiers.is_empty()
            || !self.bool_plan_modifiers.is_empty()
            || !self.string_plan_modifiers.is_empty()
    }
}

// Manual Debug implementation since modifiers don't implement Debug
impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .field("type", &self.r#type)
            .field("description", &self.description)
            .field("required", &self.required)
            .field("optional", &self.optional)
            .field("computed", &self.computed)
            .field(
                "plan_modifiers",
                &format!("{} plan modifiers", self.plan_modifiers.len()),
            )
            .field(
                "bool_plan_modifiers",
                &format!("{} bool plan modifiers", self.bool_plan_modifiers.len()),
            )
            .field(
                "string_plan_modifiers",
                &format!("{} string plan modifiers", self.string_plan_modifiers.len()),
            )
            .finish()
    }
}

/// Schema of a single resource type
/// Version is used for state migration
#[derive(Debug)]
pub struct Schema {
    pub version: i64,
    pub description: String,
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// AttributeBuilder provides fluent API for building attributes
pub struct AttributeBuilder {
    attribute: Attribute,
}

impl AttributeBuilder {
    /// Create a new attribute builder
    pub fn new(name: &str, type_: AttributeType) -> Self {
        Self {
            attribute: Attribute {
                name: name.to_string(),
                r#type: type_,
                description: String::new(),
                required: false,
                optional: false,
                computed: false,
                plan_modifiers: Vec::new(),
                bool_plan_modifiers: Vec::new(),
                string_plan_modifiers: Vec::new(),
            },
        }
    }

    pub fn string(name: &str) -> Self {
        Self::new(name, AttributeType::String)
    }

    pub fn bool(name: &str) -> Self {
        Self::new(name, AttributeType::Bool)
    }

    pub fn number(name: &str) -> Self {
        Self::new(name, AttributeType::Number)
    }

    /// Set description
    pub fn description(mut self, desc: &str) -> Self {
        self.attribute.description = desc.to_string();
        self
    }

    /// Mark as required
    pub fn required(mut self) -> Self {
        self.attribute.required = true;
        self.attribute.optional = false;
        self
    }

    /// Mark as optional
    pub fn optional(mut self) -> Self {
        self.attribute.optional = true;
        self.attribute.required = false;
        self
    }

    /// Mark as computed
    pub fn computed(mut self) -> Self {
        self.attribute.computed = true;
        self
    }

    /// Add a generic plan modifier; these run before typed modifiers
    pub fn plan_modifier(mut self, modifier: Box<dyn AttributePlanModifier>) -> Self {
        self.attribute.plan_modifiers.push(modifier);
        self
    }

    pub fn bool_plan_modifier(mut self, modifier: Box<dyn BoolPlanModifier>) -> Self {
        self.attribute.bool_plan_modifiers.push(modifier);
        self
    }

    pub fn string_plan_modifier(mut self, modifier: Box<dyn StringPlanModifier>) -> Self {
        self.attribute.string_plan_modifiers.push(modifier);
        self
    }

    /// Finalize the attribute
    pub fn build(self) -> Attribute {
        self.attribute
    }
}

/// SchemaBuilder provides fluent API for building schemas
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            schema: Schema {
                version: 0,
                description: String::new(),
                attributes: Vec::new(),
            },
        }
    }

    /// Set schema version
    pub fn version(mut self, version: i64) -> Self {
        self.schema.version = version;
        self
    }

    /// Add attribute
    pub fn attribute(mut self, attr: Attribute) -> Self {
        self.schema.attributes.push(attr);
        self
    }

    /// Set description
    pub fn description(mut self, desc: &str) -> Self {
        self.schema.description = desc.to_string();
        self
    }

    /// Finalize the schema
    pub fn build(self) -> Schema {
        self.schema
    }
}

impl std::default::Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
