//! `casdoor_group`.

use crate::resource::ResourceDescriptor;
use crate::schema::Attribute;

use super::owned;

pub(super) fn descriptor() -> ResourceDescriptor {
    let schema = owned("A group of users, optionally nested under a parent group.")
        .with_attribute("display_name", Attribute::optional_string())
        .with_attribute("manager", Attribute::optional_string())
        .with_attribute("contact_email", Attribute::optional_string())
        .with_attribute("type", Attribute::optional_string())
        .with_attribute(
            "parent_id",
            Attribute::optional_string().with_description("Name of the parent group."),
        )
        .with_attribute("is_top_group", Attribute::optional_bool())
        .with_attribute("users", Attribute::optional_string_list())
        .with_attribute("is_enabled", Attribute::optional_bool());

    ResourceDescriptor::new("casdoor_group", "group", schema)
}
