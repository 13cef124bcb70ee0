//! Plan-phase driver
//!
//! Runs the plan modifiers declared on a schema against one plan
//! computation. Generic modifiers run first, then the typed modifiers that
//! match the attribute type, each in declaration order. Every modifier sees
//! the plan value produced by the one before it.
//!
//! After the chain, the planned value is checked the way Terraform checks a
//! provider's plan: a non-null configured value must survive unchanged, and
//! only computed attributes may gain a value the user did not configure.

use crate::context::Context;
use crate::error::{Result, TfplugError};
use crate::plan_modifier::{
    AttributePlanModifierRequest, AttributePlanModifierResponse, PlanModifierRequest,
    PlanModifierResponse,
};
use crate::schema::{Attribute, AttributeType, Schema};
use crate::types::{AttributePath, Diagnostics, Dynamic, DynamicValue, Primitive, TypedValue};

/// Result of planning every attribute of a resource
#[derive(Debug, Clone, PartialEq)]
pub struct PlanResourceResponse {
    pub planned_state: DynamicValue,
    pub requires_replace: Vec<AttributePath>,
    pub diagnostics: Diagnostics,
}

/// Plan a whole resource object
///
/// A null proposed object means the resource is being destroyed; modifiers
/// are skipped in that case.
pub fn plan_resource(
    ctx: &Context,
    schema: &Schema,
    config: &DynamicValue,
    state: &DynamicValue,
    proposed: &DynamicValue,
) -> Result<PlanResourceResponse> {
    let mut response = PlanResourceResponse {
        planned_state: proposed.clone(),
        requires_replace: Vec::new(),
        diagnostics: Diagnostics::new(),
    };

    if proposed.is_null() {
        tracing::debug!("proposed state is null, skipping plan modifiers");
        return Ok(response);
    }

    for attribute in &schema.attributes {
        let path = AttributePath::new(&attribute.name);
        let attribute_response = plan_attribute(
            ctx,
            attribute,
            path.clone(),
            &config.attribute(&attribute.name),
            &state.attribute(&attribute.name),
            &proposed.attribute(&attribute.name),
        )?;

        if attribute_response.requires_replace {
            response.requires_replace.push(path.clone());
        }
        response.diagnostics.extend(attribute_response.diagnostics);
        response
            .planned_state
            .set(&path, attribute_response.plan_value)?;

        if response.diagnostics.has_errors() {
            tracing::debug!(attribute = %path, "stopping plan after error diagnostics");
            break;
        }
    }

    Ok(response)
}

/// Plan a single attribute by running its modifier chain
pub fn plan_attribute(
    ctx: &Context,
    attribute: &Attribute,
    path: AttributePath,
    config: &Dynamic,
    state: &Dynamic,
    proposed: &Dynamic,
) -> Result<AttributePlanModifierResponse> {
    if ctx.is_cancelled() {
        return Err(TfplugError::Cancelled);
    }

    let mut response = AttributePlanModifierResponse::new(proposed.clone());
    if !attribute.has_plan_modifiers() {
        return Ok(response);
    }

    tracing::debug!(
        attribute = %path,
        modifiers = attribute.plan_modifiers.len()
            + attribute.bool_plan_modifiers.len()
            + attribute.string_plan_modifiers.len(),
        "running plan modifiers"
    );

    for modifier in &attribute.plan_modifiers {
        let request = AttributePlanModifierRequest {
            path: path.clone(),
            config_value: config.clone(),
            state_value: state.clone(),
            plan_value: response.plan_value.clone(),
        };
        let mut step = request.initial_response();
        modifier.modify(ctx, &request, &mut step);
        tracing::trace!(attribute = %path, modifier = %modifier.description(), "modifier done");

        if merge_step(
            &mut response,
            &path,
            step.plan_value,
            step.requires_replace,
            step.diagnostics,
        ) {
            return Ok(response);
        }
    }

    match (&attribute.r#type, attribute.bool_plan_modifiers.is_empty()) {
        (AttributeType::Bool, false) => run_typed::<bool, _, _>(
            ctx,
            &path,
            config,
            state,
            &mut response,
            &attribute.bool_plan_modifiers,
            |m, ctx, req, resp| m.plan_modify_bool(ctx, req, resp),
        )?,
        (_, false) => return Err(mismatch("bool", &attribute.r#type)),
        (_, true) => {}
    }

    if response.diagnostics.has_errors() {
        return Ok(response);
    }

    match (&attribute.r#type, attribute.string_plan_modifiers.is_empty()) {
        (AttributeType::String, false) => run_typed::<String, _, _>(
            ctx,
            &path,
            config,
            state,
            &mut response,
            &attribute.string_plan_modifiers,
            |m, ctx, req, resp| m.plan_modify_string(ctx, req, resp),
        )?,
        (_, false) => return Err(mismatch("string", &attribute.r#type)),
        (_, true) => {}
    }

    if !response.diagnostics.has_errors() {
        check_planned_value(attribute, &path, config, &response.plan_value)?;
    }

    Ok(response)
}

/// Fold one modifier's response into the running one; true when the chain must stop
fn merge_step(
    response: &mut AttributePlanModifierResponse,
    path: &AttributePath,
    plan_value: Dynamic,
    requires_replace: bool,
    diagnostics: Diagnostics,
) -> bool {
    response.plan_value = plan_value;
    response.requires_replace |= requires_replace;
    response.diagnostics.extend(diagnostics.with_attribute(path));
    response.diagnostics.has_errors()
}

fn run_typed<T, B, F>(
    ctx: &Context,
    path: &AttributePath,
    config: &Dynamic,
    state: &Dynamic,
    response: &mut AttributePlanModifierResponse,
    modifiers: &[B],
    invoke: F,
) -> Result<()>
where
    T: Primitive,
    F: Fn(&B, &Context, &PlanModifierRequest<TypedValue<T>>, &mut PlanModifierResponse<TypedValue<T>>),
{
    let config_value = TypedValue::<T>::try_from(config)?;
    let state_value = TypedValue::<T>::try_from(state)?;
    let mut plan_value = TypedValue::<T>::try_from(&response.plan_value)?;

    for modifier in modifiers {
        let request = PlanModifierRequest {
            path: path.clone(),
            config_value: config_value.clone(),
            state_value: state_value.clone(),
            plan_value,
        };
        let mut step = request.initial_response();
        invoke(modifier, ctx, &request, &mut step);

        plan_value = step.plan_value;
        response.requires_replace |= step.requires_replace;
        response
            .diagnostics
            .extend(step.diagnostics.with_attribute(path));
        if response.diagnostics.has_errors() {
            break;
        }
    }

    response.plan_value = plan_value.into();
    Ok(())
}

fn check_planned_value(
    attribute: &Attribute,
    path: &AttributePath,
    config: &Dynamic,
    planned: &Dynamic,
) -> Result<()> {
    if !attribute.r#type.admits(planned) {
        return Err(TfplugError::TypeMismatch {
            expected: attribute.r#type.name().to_string(),
            actual: planned.type_name().to_string(),
        });
    }

    if config.is_null() {
        if !attribute.computed && !planned.is_null() {
            return Err(TfplugError::InvalidPlan {
                path: path.to_string(),
                reason: "planned a value for an unconfigured attribute that is not computed; \
                         attributes with defaults must be optional and computed"
                    .to_string(),
            });
        }
    } else if !config.is_unknown() && planned != config {
        return Err(TfplugError::InvalidPlan {
            path: path.to_string(),
            reason: "planned value does not match the configured value".to_string(),
        });
    }
    Ok(())
}

fn mismatch(expected: &str, actual: &AttributeType) -> TfplugError {
    TfplugError::TypeMismatch {
        expected: expected.to_string(),
        actual: actual.name().to_string(),
    }
}
