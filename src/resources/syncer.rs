//! `casdoor_syncer`: imports users from an external database.

use crate::resource::ResourceDescriptor;
use crate::schema::{Attribute, AttributeType};

use super::owned;

pub(super) fn descriptor() -> ResourceDescriptor {
    let schema = owned("A periodic user import from an external database.")
        .with_attribute("organization", Attribute::optional_string())
        .with_attribute("type", Attribute::optional_string())
        .with_attribute("database_type", Attribute::optional_string())
        .with_attribute("host", Attribute::optional_string())
        .with_attribute("port", Attribute::optional_int64())
        .with_attribute("user", Attribute::optional_string())
        .with_attribute("password", Attribute::optional_string().masked())
        .with_attribute("database", Attribute::optional_string())
        .with_attribute("table", Attribute::optional_string())
        .with_attribute(
            "table_columns",
            Attribute::optional_object_list([
                ("name", AttributeType::String),
                ("type", AttributeType::String),
                ("casdoor_name", AttributeType::String),
                ("is_key", AttributeType::Bool),
                ("is_hashed", AttributeType::Bool),
                ("values", AttributeType::list(AttributeType::String)),
            ])
            .with_description("Mapping of source columns onto user fields."),
        )
        .with_attribute("affiliation_table", Attribute::optional_string())
        .with_attribute("avatar_base_url", Attribute::optional_string())
        .with_attribute(
            "sync_interval",
            Attribute::optional_int64().with_description("Minutes between runs."),
        )
        .with_attribute("is_read_only", Attribute::optional_bool())
        .with_attribute("is_enabled", Attribute::optional_bool());

    ResourceDescriptor::new("casdoor_syncer", "syncer", schema)
}
