//! Plan modifier capabilities
//!
//! A plan modifier is invoked once per attribute while Terraform computes a
//! plan. It sees the configured value, the prior state value and the plan
//! value proposed so far, and may write a different plan value into the
//! response. The response arrives pre-filled with the proposed plan, so a
//! modifier that writes nothing leaves the plan as it was.
//!
//! Three capabilities exist: a generic one over [`Dynamic`] values and two
//! typed ones for bool and string attributes.

use crate::context::Context;
use crate::types::{AttributePath, BoolValue, Diagnostics, Dynamic, StringValue};

#[derive(Debug, Clone, PartialEq)]
pub struct PlanModifierRequest<V> {
    pub path: AttributePath,
    /// Value written in configuration; null when the user omitted it
    pub config_value: V,
    /// Value recorded in prior state; null when the resource is being created
    pub state_value: V,
    /// Plan value proposed by Terraform or by earlier modifiers
    pub plan_value: V,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanModifierResponse<V> {
    pub plan_value: V,
    pub requires_replace: bool,
    pub diagnostics: Diagnostics,
}

impl<V> PlanModifierResponse<V> {
    pub fn new(plan_value: V) -> Self {
        Self {
            plan_value,
            requires_replace: false,
            diagnostics: Diagnostics::new(),
        }
    }
}

impl<V: Clone> PlanModifierRequest<V> {
    /// The response a modifier starts from: the proposed plan, untouched
    pub fn initial_response(&self) -> PlanModifierResponse<V> {
        PlanModifierResponse::new(self.plan_value.clone())
    }
}

pub type AttributePlanModifierRequest = PlanModifierRequest<Dynamic>;
pub type AttributePlanModifierResponse = PlanModifierResponse<Dynamic>;
pub type BoolPlanModifierRequest = PlanModifierRequest<BoolValue>;
pub type BoolPlanModifierResponse = PlanModifierResponse<BoolValue>;
pub type StringPlanModifierRequest = PlanModifierRequest<StringValue>;
pub type StringPlanModifierResponse = PlanModifierResponse<StringValue>;

/// Generic plan modifier usable on attributes of any type
///
/// Implementations are shared across concurrent plan computations and must
/// not rely on interior mutability.
pub trait AttributePlanModifier: Send + Sync {
    /// Plain-text description for documentation
    fn description(&self) -> String;
    /// Markdown description for documentation
    fn markdown_description(&self) -> String;
    /// Modify the planned value
    fn modify(
        &self,
        ctx: &Context,
        request: &AttributePlanModifierRequest,
        response: &mut AttributePlanModifierResponse,
    );
}

/// Plan modifier for bool attributes
pub trait BoolPlanModifier: Send + Sync {
    fn description(&self) -> String;
    fn markdown_description(&self) -> String;
    fn plan_modify_bool(
        &self,
        ctx: &Context,
        request: &BoolPlanModifierRequest,
        response: &mut BoolPlanModifierResponse,
    );
}

/// Plan modifier for string attributes
pub trait StringPlanModifier: Send + Sync {
    fn description(&self) -> String;
    fn markdown_description(&self) -> String;
    fn plan_modify_string(
        &self,
        ctx: &Context,
        request: &StringPlanModifierRequest,
        response: &mut StringPlanModifierResponse,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    struct WarnOnChange;

    impl StringPlanModifier for WarnOnChange {
        fn description(&self) -> String {
            "Warns when the value changes".to_string()
        }

        fn markdown_description(&self) -> String {
            self.description()
        }

        fn plan_modify_string(
            &self,
            _ctx: &Context,
            request: &StringPlanModifierRequest,
            response: &mut StringPlanModifierResponse,
        ) {
            if request.state_value != request.plan_value {
                response.diagnostics.add_warning(
                    format!("Attribute '{}' will change", request.path),
                    "",
                );
            }
        }
    }

    #[test]
    fn initial_response_carries_proposed_plan() {
        let request = AttributePlanModifierRequest {
            path: AttributePath::new("port"),
            config_value: Dynamic::Null,
            state_value: Dynamic::Number(80.0),
            plan_value: Dynamic::Unknown,
        };

        let response = request.initial_response();

        assert_eq!(response.plan_value, Dynamic::Unknown);
        assert!(!response.requires_replace);
        assert!(response.diagnostics.is_empty());
    }

    #[test]
    fn custom_modifier_can_add_diagnostics_without_writing_plan() {
        let request = StringPlanModifierRequest {
            path: AttributePath::new("name"),
            config_value: StringValue::known("new"),
            state_value: StringValue::known("old"),
            plan_value: StringValue::known("new"),
        };
        let mut response = request.initial_response();

        WarnOnChange.plan_modify_string(&Context::new(), &request, &mut response);

        assert_eq!(response.plan_value, StringValue::known("new"));
        assert_eq!(response.diagnostics.warnings.len(), 1);
        assert!(response.diagnostics.warnings[0].summary.contains("name"));
    }
}
