//! `casdoor_adapter`: where a Casbin enforcer stores its policies.

use crate::resource::ResourceDescriptor;
use crate::schema::Attribute;

use super::owned;

pub(super) fn descriptor() -> ResourceDescriptor {
    let schema = owned("A Casbin policy storage adapter.")
        .with_attribute("type", Attribute::optional_string())
        .with_attribute("database_type", Attribute::optional_string())
        .with_attribute("host", Attribute::optional_string())
        .with_attribute("port", Attribute::optional_int64())
        .with_attribute("user", Attribute::optional_string())
        .with_attribute("password", Attribute::optional_string().masked())
        .with_attribute("database", Attribute::optional_string())
        .with_attribute("table", Attribute::optional_string())
        .with_attribute("use_same_db", Attribute::optional_bool());

    ResourceDescriptor::new("casdoor_adapter", "adapter", schema)
}
