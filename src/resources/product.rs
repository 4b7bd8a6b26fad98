//! `casdoor_product`.

use crate::resource::ResourceDescriptor;
use crate::schema::Attribute;

use super::owned;

pub(super) fn descriptor() -> ResourceDescriptor {
    let schema = owned("A purchasable product.")
        .with_attribute("display_name", Attribute::optional_string())
        .with_attribute("image", Attribute::optional_string())
        .with_attribute("detail", Attribute::optional_string())
        .with_attribute("description", Attribute::optional_string())
        .with_attribute("tag", Attribute::optional_string())
        .with_attribute("currency", Attribute::optional_string())
        .with_attribute("price", Attribute::optional_float64())
        .with_attribute("quantity", Attribute::optional_int64())
        .with_attribute(
            "sold",
            Attribute::optional_computed_int64().with_description("Maintained by Casdoor."),
        )
        .with_attribute(
            "providers",
            Attribute::optional_string_list().with_description("Payment provider names."),
        )
        .with_attribute("return_url", Attribute::optional_string())
        .with_attribute("state", Attribute::optional_string());

    ResourceDescriptor::new("casdoor_product", "product", schema)
}
