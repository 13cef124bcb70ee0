//! Default-value plan modifiers for Terraform provider schemas
//!
//! Each modifier plans a fixed value when the user leaves an attribute out
//! of configuration, and does nothing otherwise. A configured `false` or
//! empty string is a value, not an omission, and is never replaced.
//!
//! - [`DefaultValue`]: any attribute type, through the generic capability
//! - [`DefaultTrue`]: bool attributes
//! - [`StringDefault`]: string attributes
//!
//! # Examples
//!
//! ```no_run
//! use planmodifiers::{DefaultTrue, DefaultValue, StringDefault};
//! use tfplug::{AttributeBuilder, Dynamic, SchemaBuilder};
//!
//! let schema = SchemaBuilder::new()
//!     .attribute(
//!         AttributeBuilder::bool("enabled")
//!             .optional()
//!             .computed()
//!             .bool_plan_modifier(DefaultTrue::create())
//!             .build(),
//!     )
//!     .attribute(
//!         AttributeBuilder::string("region")
//!             .optional()
//!             .computed()
//!             .string_plan_modifier(StringDefault::create("us-east-1"))
//!             .build(),
//!     )
//!     .attribute(
//!         AttributeBuilder::number("replicas")
//!             .optional()
//!             .computed()
//!             .plan_modifier(DefaultValue::create(Dynamic::Number(3.0)))
//!             .build(),
//!     )
//!     .build();
//! ```

mod default_true;
mod default_value;
mod string_default;

pub use default_true::DefaultTrue;
pub use default_value::DefaultValue;
pub use string_default::StringDefault;
