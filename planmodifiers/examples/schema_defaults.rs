//! Declares a schema with defaults, prints its attribute docs and plans a create
//!
//! Modifier events are printed at trace level.

use planmodifiers::{DefaultTrue, DefaultValue, StringDefault};
use tfplug::{plan_resource, AttributeBuilder, Context, Dynamic, DynamicValue, SchemaBuilder};

fn main() -> tfplug::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let schema = SchemaBuilder::new()
        .version(1)
        .description("A web service")
        .attribute(
            AttributeBuilder::string("name")
                .description("Service name")
                .required()
                .build(),
        )
        .attribute(
            AttributeBuilder::bool("public")
                .description("Expose the service publicly")
                .optional()
                .computed()
                .bool_plan_modifier(DefaultTrue::create())
                .build(),
        )
        .attribute(
            AttributeBuilder::string("region")
                .description("Deployment region")
                .optional()
                .computed()
                .string_plan_modifier(StringDefault::create("us-east-1"))
                .build(),
        )
        .attribute(
            AttributeBuilder::number("port")
                .description("Listening port")
                .optional()
                .computed()
                .plan_modifier(DefaultValue::create(Dynamic::Number(8080.0)))
                .build(),
        )
        .build();

    println!("## Argument Reference\n");
    for attribute in &schema.attributes {
        let notes: Vec<String> = attribute
            .modifier_descriptions()
            .into_iter()
            .map(|d| d.markdown)
            .collect();
        println!("- `{}` - {} {}", attribute.name, attribute.description, notes.join(" "));
    }

    let config = DynamicValue::decode_json(br#"{"name": "api", "public": false}"#)?;
    let proposed = DynamicValue::decode_json(
        br#"{"name": "api", "public": false, "region": {"$unknown": true}, "port": {"$unknown": true}}"#,
    )?;

    let response = plan_resource(
        &Context::new(),
        &schema,
        &config,
        &DynamicValue::null(),
        &proposed,
    )?;

    let planned = String::from_utf8_lossy(&response.planned_state.encode_json()?).into_owned();
    println!("\nplanned state: {}", planned);

    Ok(())
}
