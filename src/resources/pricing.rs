//! `casdoor_pricing`.

use crate::resource::ResourceDescriptor;
use crate::schema::Attribute;

use super::owned;

pub(super) fn descriptor() -> ResourceDescriptor {
    let schema = owned("A pricing page offering a set of plans for an application.")
        .with_attribute("display_name", Attribute::optional_string())
        .with_attribute("description", Attribute::optional_string())
        .with_attribute("plans", Attribute::optional_string_list())
        .with_attribute("application", Attribute::optional_string())
        .with_attribute("trial_duration", Attribute::optional_int64())
        .with_attribute("is_enabled", Attribute::optional_bool());

    ResourceDescriptor::new("casdoor_pricing", "pricing", schema)
}
