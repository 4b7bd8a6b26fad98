//! `casdoor_webhook`.

use crate::resource::ResourceDescriptor;
use crate::schema::{Attribute, AttributeType};

use super::owned;

pub(super) fn descriptor() -> ResourceDescriptor {
    let schema = owned("An HTTP callback fired on Casdoor events.")
        .with_attribute("organization", Attribute::optional_string())
        .with_attribute("url", Attribute::optional_string())
        .with_attribute("method", Attribute::optional_string())
        .with_attribute("content_type", Attribute::optional_string())
        .with_attribute(
            "headers",
            Attribute::optional_object_list([
                ("name", AttributeType::String),
                ("value", AttributeType::String),
            ]),
        )
        .with_attribute(
            "events",
            Attribute::optional_string_list().with_description("e.g. \"signup\", \"login\"."),
        )
        .with_attribute("is_user_extended", Attribute::optional_bool())
        .with_attribute("is_enabled", Attribute::optional_bool());

    ResourceDescriptor::new("casdoor_webhook", "webhook", schema)
}
