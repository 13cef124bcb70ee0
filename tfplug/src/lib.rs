//! tfplug - plan-phase support for Terraform providers written in Rust
//!
//! Provides the value model, the plan modifier capabilities, schema
//! declarations and the driver that runs modifiers while a plan is computed.

// Core modules
pub mod context;
pub mod error;
pub mod schema;
pub mod types;

// Planning
pub mod plan;
pub mod plan_modifier;

// Re-exports for convenience
pub use context::Context;
pub use error::{Result, TfplugError};
pub use plan::{plan_attribute, plan_resource, PlanResourceResponse};
pub use plan_modifier::{
    AttributePlanModifier, AttributePlanModifierRequest, AttributePlanModifierResponse,
    BoolPlanModifier, BoolPlanModifierRequest, BoolPlanModifierResponse, PlanModifierRequest,
    PlanModifierResponse, StringPlanModifier, StringPlanModifierRequest,
    StringPlanModifierResponse,
};
pub use schema::{Attribute, AttributeBuilder, AttributeType, Schema, SchemaBuilder};
pub use types::{
    AttributePath, BoolValue, Diagnostic, Diagnostics, Dynamic, DynamicValue, StringValue,
    TypedValue,
};
