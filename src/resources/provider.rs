//! `casdoor_provider`: a third-party identity, email, SMS or storage
//! provider configured in Casdoor.

use crate::mapping::FieldNames;
use crate::resource::ResourceDescriptor;
use crate::schema::Attribute;

use super::owned;

const FIELDS: FieldNames = FieldNames::new(&[("idp", "idP")]);

pub(super) fn descriptor() -> ResourceDescriptor {
    let schema = owned("An external provider (OAuth IdP, SMTP, SMS, storage, payment).")
        .with_attribute("display_name", Attribute::optional_string())
        .with_attribute(
            "category",
            Attribute::optional_string()
                .with_description("e.g. \"OAuth\", \"Email\", \"Storage\"."),
        )
        .with_attribute("type", Attribute::optional_string())
        .with_attribute("sub_type", Attribute::optional_string())
        .with_attribute("method", Attribute::optional_string())
        .with_attribute("client_id", Attribute::optional_string())
        .with_attribute("client_secret", Attribute::optional_string().masked())
        .with_attribute("client_id2", Attribute::optional_string())
        .with_attribute("client_secret2", Attribute::optional_string().masked())
        .with_attribute("cert", Attribute::optional_string())
        .with_attribute("custom_auth_url", Attribute::optional_string())
        .with_attribute("custom_token_url", Attribute::optional_string())
        .with_attribute("custom_user_info_url", Attribute::optional_string())
        .with_attribute("host", Attribute::optional_string())
        .with_attribute("port", Attribute::optional_int64())
        .with_attribute("disable_ssl", Attribute::optional_bool())
        .with_attribute("title", Attribute::optional_string())
        .with_attribute("content", Attribute::optional_string())
        .with_attribute("receiver", Attribute::optional_string())
        .with_attribute("region_id", Attribute::optional_string())
        .with_attribute("sign_name", Attribute::optional_string())
        .with_attribute("template_code", Attribute::optional_string())
        .with_attribute("app_id", Attribute::optional_string())
        .with_attribute("endpoint", Attribute::optional_string())
        .with_attribute("intranet_endpoint", Attribute::optional_string())
        .with_attribute("domain", Attribute::optional_string())
        .with_attribute("bucket", Attribute::optional_string())
        .with_attribute("path_prefix", Attribute::optional_string())
        .with_attribute("metadata", Attribute::optional_string())
        .with_attribute("idp", Attribute::optional_string())
        .with_attribute("issuer_url", Attribute::optional_string())
        .with_attribute("enable_sign_authn_request", Attribute::optional_bool())
        .with_attribute("provider_url", Attribute::optional_string());

    ResourceDescriptor::new("casdoor_provider", "provider", schema).with_fields(FIELDS)
}
