//! `casdoor_role`.

use crate::resource::ResourceDescriptor;
use crate::schema::Attribute;

use super::owned;

pub(super) fn descriptor() -> ResourceDescriptor {
    let schema = owned("A role granting permissions to users, groups and other roles.")
        .with_attribute("display_name", Attribute::optional_string())
        .with_attribute("description", Attribute::optional_string())
        .with_attribute(
            "users",
            Attribute::optional_string_list().with_description("Members as \"owner/name\"."),
        )
        .with_attribute("groups", Attribute::optional_string_list())
        .with_attribute("roles", Attribute::optional_string_list())
        .with_attribute("domains", Attribute::optional_string_list())
        .with_attribute("is_enabled", Attribute::optional_bool());

    ResourceDescriptor::new("casdoor_role", "role", schema)
}
