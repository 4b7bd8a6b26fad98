//! `casdoor_permission`.

use crate::resource::ResourceDescriptor;
use crate::schema::Attribute;

use super::owned;

pub(super) fn descriptor() -> ResourceDescriptor {
    let schema = owned("A Casbin permission rule set.")
        .with_attribute("display_name", Attribute::optional_string())
        .with_attribute("description", Attribute::optional_string())
        .with_attribute("users", Attribute::optional_string_list())
        .with_attribute("groups", Attribute::optional_string_list())
        .with_attribute("roles", Attribute::optional_string_list())
        .with_attribute("domains", Attribute::optional_string_list())
        .with_attribute("model", Attribute::optional_string())
        .with_attribute("adapter", Attribute::optional_string())
        .with_attribute(
            "resource_type",
            Attribute::optional_string().with_description("e.g. \"Application\" or \"TreeNode\"."),
        )
        .with_attribute("resources", Attribute::optional_string_list())
        .with_attribute("actions", Attribute::optional_string_list())
        .with_attribute(
            "effect",
            Attribute::optional_string().with_description("\"Allow\" or \"Deny\"."),
        )
        .with_attribute("is_enabled", Attribute::optional_bool())
        .with_attribute("submitter", Attribute::optional_computed_string())
        .with_attribute("approver", Attribute::optional_computed_string())
        .with_attribute("approve_time", Attribute::optional_computed_string())
        .with_attribute("state", Attribute::optional_computed_string());

    ResourceDescriptor::new("casdoor_permission", "permission", schema)
}
