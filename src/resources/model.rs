//! `casdoor_model`.

use crate::resource::ResourceDescriptor;
use crate::schema::Attribute;

use super::owned;

pub(super) fn descriptor() -> ResourceDescriptor {
    let schema = owned("A Casbin access control model.")
        .with_attribute("display_name", Attribute::optional_string())
        .with_attribute("description", Attribute::optional_string())
        .with_attribute(
            "model_text",
            Attribute::optional_string().with_description("The model definition (CONF format)."),
        );

    ResourceDescriptor::new("casdoor_model", "model", schema)
}
