//! `casdoor_enforcer`.

use crate::resource::ResourceDescriptor;
use crate::schema::Attribute;

use super::owned;

pub(super) fn descriptor() -> ResourceDescriptor {
    let schema = owned("A Casbin enforcer combining a model with a policy adapter.")
        .with_attribute("display_name", Attribute::optional_string())
        .with_attribute("description", Attribute::optional_string())
        .with_attribute(
            "model",
            Attribute::optional_string().with_description("Model as \"owner/name\"."),
        )
        .with_attribute(
            "adapter",
            Attribute::optional_string().with_description("Adapter as \"owner/name\"."),
        );

    ResourceDescriptor::new("casdoor_enforcer", "enforcer", schema)
}
