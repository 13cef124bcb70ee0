use tfplug::{
    Context, StringPlanModifier, StringPlanModifierRequest, StringPlanModifierResponse,
    StringValue,
};

/// StringDefault plans a fixed string for a string attribute left out of configuration
///
/// Same schema requirements as [`crate::DefaultTrue`]: optional and computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringDefault {
    value: String,
}

impl StringDefault {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Create the modifier ready to attach with `AttributeBuilder::string_plan_modifier`
    pub fn create(value: impl Into<String>) -> Box<dyn StringPlanModifier> {
        Box::new(Self::new(value))
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl StringPlanModifier for StringDefault {
    fn description(&self) -> String {
        format!("If value is not configured, defaults to {}", self.value)
    }

    fn markdown_description(&self) -> String {
        format!("If value is not configured, defaults to `{}`", self.value)
    }

    fn plan_modify_string(
        &self,
        _ctx: &Context,
        request: &StringPlanModifierRequest,
        response: &mut StringPlanModifierResponse,
    ) {
        if !request.config_value.is_null() {
            return;
        }

        tracing::trace!(
            attribute = %request.path,
            default = %self.value,
            "config is null, planning default string"
        );
        response.plan_value = StringValue::known(self.value.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfplug::AttributePath;

    fn run(modifier: &StringDefault, config: StringValue, plan: StringValue) -> StringValue {
        let request = StringPlanModifierRequest {
            path: AttributePath::new("region"),
            config_value: config,
            state_value: StringValue::known("eu-west-1"),
            plan_value: plan,
        };
        let mut response = request.initial_response();
        modifier.plan_modify_string(&Context::new(), &request, &mut response);
        response.plan_value
    }

    #[test]
    fn null_config_plans_default() {
        let modifier = StringDefault::new("hello");

        assert_eq!(
            run(&modifier, StringValue::null(), StringValue::null()),
            StringValue::known("hello")
        );
    }

    #[test]
    fn configured_string_is_preserved() {
        let modifier = StringDefault::new("hello");

        assert_eq!(
            run(
                &modifier,
                StringValue::known("world"),
                StringValue::known("world")
            ),
            StringValue::known("world")
        );
    }

    #[test]
    fn configured_empty_string_is_not_null() {
        let modifier = StringDefault::new("hello");

        assert_eq!(
            run(&modifier, StringValue::known(""), StringValue::known("")),
            StringValue::known("")
        );
    }

    #[test]
    fn descriptions_interpolate_default() {
        let modifier = StringDefault::new("us-east-1");

        assert_eq!(
            modifier.description(),
            "If value is not configured, defaults to us-east-1"
        );
        assert_eq!(
            modifier.markdown_description(),
            "If value is not configured, defaults to `us-east-1`"
        );
        assert_eq!(modifier.value(), "us-east-1");
    }
}
