//! `casdoor_application`.

use crate::resource::ResourceDescriptor;
use crate::schema::{Attribute, AttributeType};

use super::owned;

pub(super) fn descriptor() -> ResourceDescriptor {
    let schema = owned("An OAuth/OIDC application users sign in to.")
        .with_attribute("display_name", Attribute::optional_string())
        .with_attribute("logo", Attribute::optional_string())
        .with_attribute("homepage_url", Attribute::optional_string())
        .with_attribute("description", Attribute::optional_string())
        .with_attribute(
            "organization",
            Attribute::optional_string().with_description("Organization whose users sign in."),
        )
        .with_attribute("cert", Attribute::optional_string())
        .with_attribute("enable_password", Attribute::optional_bool())
        .with_attribute("enable_sign_up", Attribute::optional_bool())
        .with_attribute(
            "client_id",
            Attribute::optional_computed_string()
                .with_description("Generated by Casdoor unless set."),
        )
        .with_attribute(
            "client_secret",
            Attribute::optional_computed_string()
                .sensitive()
                .with_description("Generated by Casdoor unless set."),
        )
        .with_attribute("redirect_uris", Attribute::optional_string_list())
        .with_attribute("grant_types", Attribute::optional_string_list())
        .with_attribute("token_format", Attribute::optional_string())
        .with_attribute("expire_in_hours", Attribute::optional_int64())
        .with_attribute("refresh_expire_in_hours", Attribute::optional_int64())
        .with_attribute("signup_url", Attribute::optional_string())
        .with_attribute("signin_url", Attribute::optional_string())
        .with_attribute("forget_url", Attribute::optional_string())
        .with_attribute("tags", Attribute::optional_string_list())
        .with_attribute(
            "providers",
            Attribute::optional_object_list([
                ("name", AttributeType::String),
                ("can_sign_up", AttributeType::Bool),
                ("can_sign_in", AttributeType::Bool),
                ("can_unlink", AttributeType::Bool),
                ("prompted", AttributeType::Bool),
                ("rule", AttributeType::String),
            ]),
        );

    ResourceDescriptor::new("casdoor_application", "application", schema)
}
