//! `casdoor_user`.

use crate::mapping::FieldNames;
use crate::resource::ResourceDescriptor;
use crate::schema::Attribute;

use super::{owned, string_map};

// Casdoor's own `id` field is the user's UUID; state `id` is `owner/name`.
const FIELDS: FieldNames = FieldNames::new(&[("user_id", "id")]);

pub(super) fn descriptor() -> ResourceDescriptor {
    let schema = owned("A user account.")
        .with_attribute(
            "user_id",
            Attribute::optional_computed_string().with_description("Casdoor's UUID for the user."),
        )
        .with_attribute("type", Attribute::optional_string())
        .with_attribute(
            "password",
            Attribute::optional_string()
                .masked()
                .with_description("Casdoor never returns it; the configured value is kept."),
        )
        .with_attribute("display_name", Attribute::optional_string())
        .with_attribute("first_name", Attribute::optional_string())
        .with_attribute("last_name", Attribute::optional_string())
        .with_attribute("avatar", Attribute::optional_string())
        .with_attribute("email", Attribute::optional_string())
        .with_attribute("email_verified", Attribute::optional_bool())
        .with_attribute("phone", Attribute::optional_string())
        .with_attribute("country_code", Attribute::optional_string())
        .with_attribute("region", Attribute::optional_string())
        .with_attribute("location", Attribute::optional_string())
        .with_attribute("address", Attribute::optional_string_list())
        .with_attribute("affiliation", Attribute::optional_string())
        .with_attribute("title", Attribute::optional_string())
        .with_attribute("homepage", Attribute::optional_string())
        .with_attribute("bio", Attribute::optional_string())
        .with_attribute("tag", Attribute::optional_string())
        .with_attribute("language", Attribute::optional_string())
        .with_attribute("gender", Attribute::optional_string())
        .with_attribute("birthday", Attribute::optional_string())
        .with_attribute("score", Attribute::optional_int64())
        .with_attribute("is_admin", Attribute::optional_bool())
        .with_attribute("is_forbidden", Attribute::optional_bool())
        .with_attribute("is_deleted", Attribute::optional_bool())
        .with_attribute("signup_application", Attribute::optional_string())
        .with_attribute("groups", Attribute::optional_string_list())
        .with_attribute("properties", string_map());

    ResourceDescriptor::new("casdoor_user", "user", schema).with_fields(FIELDS)
}
