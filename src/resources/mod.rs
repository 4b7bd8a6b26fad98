//! Descriptors for every Casdoor object kind the provider manages.
//!
//! Each submodule exposes a `descriptor()` describing one kind: its schema,
//! its API name and any field renames. The CRUD behavior itself lives in
//! [`crate::resource::ResourceAdapter`].

use crate::reconcile::ID_ATTRIBUTE;
use crate::resource::ResourceDescriptor;
use crate::schema::{Attribute, AttributeFlags, AttributeType, Schema};

mod adapter;
mod application;
mod cert;
mod enforcer;
mod group;
mod model;
mod organization;
mod permission;
mod plan;
mod pricing;
mod product;
mod provider;
mod role;
mod syncer;
mod user;
mod webhook;

/// Prefix shared by every resource and data source type name.
pub const TYPE_PREFIX: &str = "casdoor_";

/// All resource descriptors, in registration order.
pub fn catalog() -> Vec<ResourceDescriptor> {
    vec![
        organization::descriptor(),
        application::descriptor(),
        user::descriptor(),
        group::descriptor(),
        role::descriptor(),
        permission::descriptor(),
        model::descriptor(),
        adapter::descriptor(),
        enforcer::descriptor(),
        cert::descriptor(),
        provider::descriptor(),
        webhook::descriptor(),
        syncer::descriptor(),
        product::descriptor(),
        plan::descriptor(),
        pricing::descriptor(),
    ]
}

/// Attributes every owner-scoped object has.
fn owned(description: &str) -> Schema {
    Schema::v0()
        .with_description(description)
        .with_attribute(
            ID_ATTRIBUTE,
            Attribute::computed_string().with_description("The identifier, \"owner/name\"."),
        )
        .with_attribute(
            "owner",
            Attribute::optional_computed_string()
                .with_force_new()
                .with_description(
                    "The owning organization. Defaults to the provider's organization_name.",
                ),
        )
        .with_attribute(
            "name",
            Attribute::required_string()
                .with_force_new()
                .with_description("Unique name within the owner."),
        )
        .with_attribute(
            "created_time",
            Attribute::computed_string().with_description("Creation time assigned by Casdoor."),
        )
}

fn string_map() -> Attribute {
    Attribute::new(
        AttributeType::map(AttributeType::String),
        AttributeFlags::optional(),
    )
}
