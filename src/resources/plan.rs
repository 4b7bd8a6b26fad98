//! `casdoor_plan`: a subscription plan.

use crate::resource::ResourceDescriptor;
use crate::schema::Attribute;

use super::owned;

pub(super) fn descriptor() -> ResourceDescriptor {
    let schema = owned("A subscription plan.")
        .with_attribute("display_name", Attribute::optional_string())
        .with_attribute("description", Attribute::optional_string())
        .with_attribute("price_per_month", Attribute::optional_float64())
        .with_attribute("price_per_year", Attribute::optional_float64())
        .with_attribute("currency", Attribute::optional_string())
        .with_attribute(
            "role",
            Attribute::optional_string().with_description("Role granted to subscribers."),
        )
        .with_attribute("options", Attribute::optional_string_list())
        .with_attribute("is_enabled", Attribute::optional_bool());

    ResourceDescriptor::new("casdoor_plan", "plan", schema)
}
