//! `casdoor_organization`.
//!
//! Organizations are globally named: the state `id` is the bare name and
//! Casdoor always stores them under the `admin` owner.

use crate::identifier::IdStyle;
use crate::resource::ResourceDescriptor;
use crate::schema::{Attribute, AttributeType};

use super::owned;

/// Owner of every organization object.
pub const ORGANIZATION_OWNER: &str = "admin";

pub(super) fn descriptor() -> ResourceDescriptor {
    let schema = owned("An organization: the top-level scope for users, applications and policies.")
        .with_attribute(
            "id",
            Attribute::computed_string().with_description("The organization name."),
        )
        .with_attribute(
            "owner",
            Attribute::computed_string().with_description("Always \"admin\"."),
        )
        .with_attribute("display_name", Attribute::optional_string())
        .with_attribute("website_url", Attribute::optional_string())
        .with_attribute("favicon", Attribute::optional_string())
        .with_attribute(
            "password_type",
            Attribute::optional_string()
                .with_description("Hashing scheme for user passwords, e.g. \"bcrypt\"."),
        )
        .with_attribute("password_salt", Attribute::optional_string().sensitive())
        .with_attribute("password_options", Attribute::optional_string_list())
        .with_attribute(
            "master_password",
            Attribute::optional_string()
                .masked()
                .with_description("Password accepted for every user of the organization."),
        )
        .with_attribute("default_avatar", Attribute::optional_string())
        .with_attribute("default_application", Attribute::optional_string())
        .with_attribute("country_codes", Attribute::optional_string_list())
        .with_attribute("languages", Attribute::optional_string_list())
        .with_attribute("tags", Attribute::optional_string_list())
        .with_attribute("init_score", Attribute::optional_int64())
        .with_attribute("enable_soft_deletion", Attribute::optional_bool())
        .with_attribute("is_profile_public", Attribute::optional_bool())
        .with_attribute(
            "account_items",
            Attribute::optional_object_list([
                ("name", AttributeType::String),
                ("visible", AttributeType::Bool),
                ("view_rule", AttributeType::String),
                ("modify_rule", AttributeType::String),
            ])
            .with_description("Which account fields users can see and edit."),
        );

    ResourceDescriptor::new("casdoor_organization", "organization", schema).with_id_style(
        IdStyle::Named {
            owner: ORGANIZATION_OWNER,
        },
    )
}
