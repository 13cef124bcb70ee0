use tfplug::{BoolPlanModifier, BoolPlanModifierRequest, BoolPlanModifierResponse, BoolValue, Context};

/// DefaultTrue plans `true` for a bool attribute left out of configuration
///
/// The attribute must be declared optional and computed, and the resource
/// must store `true` on create, read and update when the user omits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefaultTrue;

impl DefaultTrue {
    pub fn new() -> Self {
        Self
    }

    /// Create the modifier ready to attach with `AttributeBuilder::bool_plan_modifier`
    pub fn create() -> Box<dyn BoolPlanModifier> {
        Box::new(Self)
    }
}

impl BoolPlanModifier for DefaultTrue {
    fn description(&self) -> String {
        "If value is not configured, defaults to true".to_string()
    }

    fn markdown_description(&self) -> String {
        "If value is not configured, defaults to `true`".to_string()
    }

    fn plan_modify_bool(
        &self,
        _ctx: &Context,
        request: &BoolPlanModifierRequest,
        response: &mut BoolPlanModifierResponse,
    ) {
        if !request.config_value.is_null() {
            return;
        }

        tracing::trace!(attribute = %request.path, "config is null, planning true");
        response.plan_value = BoolValue::known(true);
    }
}
