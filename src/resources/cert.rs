//! `casdoor_cert`.
//!
//! Casdoor generates the key pair when none is supplied, so `certificate`
//! and `private_key` are read back after create.

use crate::resource::ResourceDescriptor;
use crate::schema::Attribute;

use super::owned;

pub(super) fn descriptor() -> ResourceDescriptor {
    let schema = owned("A signing certificate used for tokens and SAML.")
        .with_attribute("display_name", Attribute::optional_string())
        .with_attribute(
            "scope",
            Attribute::optional_string().with_description("\"JWT\" or \"CA Certificate\"."),
        )
        .with_attribute("type", Attribute::optional_string())
        .with_attribute("crypto_algorithm", Attribute::optional_string())
        .with_attribute("bit_size", Attribute::optional_int64())
        .with_attribute("expire_in_years", Attribute::optional_int64())
        .with_attribute("certificate", Attribute::optional_computed_string())
        .with_attribute(
            "private_key",
            Attribute::optional_computed_string().sensitive(),
        );

    ResourceDescriptor::new("casdoor_cert", "cert", schema)
}
