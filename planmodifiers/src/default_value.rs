use tfplug::{
    AttributePlanModifier, AttributePlanModifierRequest, AttributePlanModifierResponse, Context,
    Dynamic,
};

const DESCRIPTION: &str = "If the config does not contain a value, a default will be set using val.";

/// DefaultValue plans a fixed value for any attribute left out of configuration
///
/// The write is destructive: when config is null the proposed plan is
/// replaced, whatever earlier modifiers put there.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultValue {
    value: Dynamic,
}

impl DefaultValue {
    pub fn new(value: Dynamic) -> Self {
        Self { value }
    }

    /// Create the modifier ready to attach with `AttributeBuilder::plan_modifier`
    pub fn create(value: Dynamic) -> Box<dyn AttributePlanModifier> {
        Box::new(Self::new(value))
    }

    pub fn value(&self) -> &Dynamic {
        &self.value
    }
}

impl AttributePlanModifier for DefaultValue {
    fn description(&self) -> String {
        DESCRIPTION.to_string()
    }

    fn markdown_description(&self) -> String {
        DESCRIPTION.to_string()
    }

    fn modify(
        &self,
        _ctx: &Context,
        request: &AttributePlanModifierRequest,
        response: &mut AttributePlanModifierResponse,
    ) {
        if !request.config_value.is_null() {
            return;
        }

        tracing::trace!(attribute = %request.path, "config is null, planning default value");
        response.plan_value = self.value.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfplug::AttributePath;

    fn request(config: Dynamic, state: Dynamic, plan: Dynamic) -> AttributePlanModifierRequest {
        AttributePlanModifierRequest {
            path: AttributePath::new("replicas"),
            config_value: config,
            state_value: state,
            plan_value: plan,
        }
    }

    fn run(modifier: &DefaultValue, request: &AttributePlanModifierRequest) -> Dynamic {
        let mut response = request.initial_response();
        modifier.modify(&Context::new(), request, &mut response);
        response.plan_value
    }

    #[test]
    fn overwrites_proposed_plan_when_config_is_null() {
        let modifier = DefaultValue::new(Dynamic::Number(42.0));

        let planned = run(
            &modifier,
            &request(Dynamic::Null, Dynamic::Null, Dynamic::Number(7.0)),
        );

        assert_eq!(planned, Dynamic::Number(42.0));
    }

    #[test]
    fn ignores_prior_state_when_config_is_null() {
        let modifier = DefaultValue::new(Dynamic::Number(42.0));

        let planned = run(
            &modifier,
            &request(Dynamic::Null, Dynamic::Number(3.0), Dynamic::Unknown),
        );

        assert_eq!(planned, Dynamic::Number(42.0));
    }

    #[test]
    fn leaves_configured_value_alone() {
        let modifier = DefaultValue::new(Dynamic::Number(42.0));

        let planned = run(
            &modifier,
            &request(Dynamic::Number(5.0), Dynamic::Null, Dynamic::Number(5.0)),
        );

        assert_eq!(planned, Dynamic::Number(5.0));
    }

    #[test]
    fn unknown_config_is_not_null() {
        let modifier = DefaultValue::new(Dynamic::Number(42.0));

        let planned = run(
            &modifier,
            &request(Dynamic::Unknown, Dynamic::Null, Dynamic::Unknown),
        );

        assert_eq!(planned, Dynamic::Unknown);
    }

    #[test]
    fn default_value_is_assigned_as_is() {
        let list = Dynamic::List(vec![
            Dynamic::String("a".to_string()),
            Dynamic::String("b".to_string()),
        ]);
        let modifier = DefaultValue::new(list.clone());

        let planned = run(&modifier, &request(Dynamic::Null, Dynamic::Null, Dynamic::Null));

        assert_eq!(planned, list);
        assert_eq!(modifier.value(), &list);
    }

    #[test]
    fn never_adds_diagnostics_or_replacement() {
        let modifier = DefaultValue::new(Dynamic::Bool(true));
        let request = request(Dynamic::Null, Dynamic::Bool(false), Dynamic::Null);
        let mut response = request.initial_response();

        modifier.modify(&Context::new(), &request, &mut response);

        assert!(response.diagnostics.is_empty());
        assert!(!response.requires_replace);
    }

    #[test]
    fn descriptions_match() {
        let modifier = DefaultValue::new(Dynamic::Null);

        assert_eq!(
            modifier.description(),
            "If the config does not contain a value, a default will be set using val."
        );
        assert_eq!(modifier.markdown_description(), modifier.description());
    }
}
