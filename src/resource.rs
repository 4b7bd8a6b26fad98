//! The generic resource adapter.
//!
//! Every Casdoor object kind goes through the same sequence: build the
//! identifier, call one of the four CRUD endpoints, read the object back and
//! reconcile it into state. A [`ResourceDescriptor`] captures what differs
//! between kinds; a [`ResourceAdapter`] runs the sequence for one descriptor
//! against an injected [`CasdoorApi`].

use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::{debug, info, instrument, warn};

use crate::client::CasdoorApi;
use crate::error::ProviderError;
use crate::identifier::{IdStyle, ResourceIdentifier};
use crate::mapping::FieldNames;
use crate::reconcile::{diff, normalize_collections, Reconciler, ID_ATTRIBUTE};
use crate::schema::{Attribute, AttributeFlags, Diagnostic, Schema};
use crate::types::{ImportedResource, InstanceState, PlanResult};
use crate::validation::{validate, validate_identifier_component};

/// Everything that distinguishes one resource kind from another.
#[derive(Debug, Clone)]
pub struct ResourceDescriptor {
    /// Resource type name, e.g. `casdoor_user`.
    pub type_name: &'static str,
    /// Casdoor object kind used in endpoint paths, e.g. `user`.
    pub api_kind: &'static str,
    /// How the state `id` is formed.
    pub id_style: IdStyle,
    /// Field renames that `snake_case` to `camelCase` does not cover.
    pub fields: FieldNames,
    /// The resource schema.
    pub schema: Schema,
}

impl ResourceDescriptor {
    /// Create an owner-scoped descriptor.
    pub fn new(type_name: &'static str, api_kind: &'static str, schema: Schema) -> Self {
        Self {
            type_name,
            api_kind,
            id_style: IdStyle::Composite,
            fields: FieldNames::default(),
            schema,
        }
    }

    /// Set the identifier style.
    pub fn with_id_style(mut self, id_style: IdStyle) -> Self {
        self.id_style = id_style;
        self
    }

    /// Set the field renames.
    pub fn with_fields(mut self, fields: FieldNames) -> Self {
        self.fields = fields;
        self
    }

    /// Schema of the matching data source.
    ///
    /// Objects are looked up by `name` (and `owner` for owner-scoped kinds);
    /// every other attribute is read-only.
    pub fn data_source_schema(&self) -> Schema {
        let mut schema = Schema::v0();
        schema.description = self.schema.description.clone();
        for (name, attr) in &self.schema.attributes {
            let lookup = match name.as_str() {
                "name" => Some(Attribute::required_string()),
                "owner" if self.id_style == IdStyle::Composite => {
                    Some(Attribute::optional_computed_string())
                }
                _ => None,
            };
            let attr = lookup
                .map(|a| match &attr.description {
                    Some(d) => a.with_description(d.clone()),
                    None => a,
                })
                .unwrap_or_else(|| Attribute {
                    flags: AttributeFlags {
                        sensitive: attr.flags.sensitive,
                        masked: attr.flags.masked,
                        ..AttributeFlags::computed()
                    },
                    force_new: false,
                    ..attr.clone()
                });
            schema.attributes.insert(name.clone(), attr);
        }
        schema
    }

    /// Validate a resource configuration.
    ///
    /// Checks types and required attributes, then the identifier
    /// components. An unset `owner` is accepted here because the provider's
    /// `organization_name` may fill it in at plan time.
    pub fn validate(&self, config: &Value) -> Vec<Diagnostic> {
        let mut diagnostics = validate(&self.schema, config);
        diagnostics.extend(validate_identifier_component("name", config.get("name")));
        if self.id_style == IdStyle::Composite {
            diagnostics.extend(validate_identifier_component("owner", config.get("owner")));
        }
        diagnostics
    }
}

/// Runs the CRUD sequence for one resource kind.
#[derive(Clone)]
pub struct ResourceAdapter {
    descriptor: Arc<ResourceDescriptor>,
    client: Arc<dyn CasdoorApi>,
    reconciler: Arc<Reconciler>,
    default_owner: Option<String>,
}

impl std::fmt::Debug for ResourceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceAdapter")
            .field("type_name", &self.descriptor.type_name)
            .field("default_owner", &self.default_owner)
            .finish_non_exhaustive()
    }
}

impl ResourceAdapter {
    /// Create an adapter. `default_owner` fills `owner` when the
    /// configuration leaves it unset.
    pub fn new(
        descriptor: Arc<ResourceDescriptor>,
        client: Arc<dyn CasdoorApi>,
        reconciler: Arc<Reconciler>,
        default_owner: Option<String>,
    ) -> Self {
        Self {
            descriptor,
            client,
            reconciler,
            default_owner,
        }
    }

    /// The descriptor this adapter runs.
    pub fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    fn schema(&self) -> &Schema {
        &self.descriptor.schema
    }

    fn kind(&self) -> &'static str {
        self.descriptor.api_kind
    }

    /// Plan a create (`prior` is `None`), an update, or a delete (`proposed`
    /// is `null`).
    #[instrument(skip_all, fields(resource_type = self.descriptor.type_name))]
    pub fn plan(
        &self,
        prior: Option<&Value>,
        proposed: Value,
    ) -> Result<PlanResult, ProviderError> {
        let schema = self.schema();

        if proposed.is_null() {
            let prior = prior.unwrap_or(&Value::Null);
            return Ok(PlanResult::with_changes(
                Value::Null,
                diff(schema, prior, &Value::Null),
                false,
            ));
        }

        let mut planned = self.project(&proposed)?;
        self.fill_owner(&mut planned);
        normalize_collections(schema, &mut planned);

        let Some(prior) = prior else {
            self.descriptor.id_style.from_state(&planned)?;
            self.clear_computed(&mut planned, true);
            let changes = diff(schema, &Value::Null, &planned);
            debug!(changes = changes.len(), "planned create");
            return Ok(PlanResult::with_changes(planned, changes, false));
        };

        // Values Casdoor assigned are carried forward unless configured.
        for (name, attr) in &schema.attributes {
            if !(attr.flags.computed || name == ID_ATTRIBUTE) {
                continue;
            }
            let slot = &mut planned[name.as_str()];
            if slot.is_null() {
                *slot = prior.get(name).cloned().unwrap_or(Value::Null);
            }
        }

        self.descriptor.id_style.from_state(&planned)?;

        let changes = diff(schema, prior, &planned);
        let requires_replace = changes
            .iter()
            .any(|c| schema.attribute(&c.path).is_some_and(|a| a.force_new));

        if changes.is_empty() {
            return Ok(PlanResult::no_change(planned));
        }
        if requires_replace {
            self.clear_computed(&mut planned, false);
        }
        debug!(changes = changes.len(), requires_replace, "planned update");
        Ok(PlanResult::with_changes(planned, changes, requires_replace))
    }

    /// Create the object, read it back, and return the reconciled state.
    ///
    /// When the add succeeds but the read-back does not, the error is
    /// [`ProviderError::Unconfirmed`] carrying the planned state with its
    /// `id` set.
    #[instrument(
        skip_all,
        fields(resource_type = self.descriptor.type_name, id = tracing::field::Empty)
    )]
    pub async fn create(&self, planned: Value) -> Result<Value, ProviderError> {
        let mut planned = self.project(&planned)?;
        self.fill_owner(&mut planned);

        let id = self.descriptor.id_style.from_state(&planned)?;
        let state_id = self.descriptor.id_style.format(&id);
        tracing::Span::current().record("id", state_id.as_str());

        let body = self.api_body(&planned, &id);
        if !self.client.add_object(self.kind(), &body).await? {
            return Err(ProviderError::rejected(
                format!("add-{}", self.kind()),
                id.api_id(),
                "Casdoor did not apply the change (does the object already exist?)",
            ));
        }
        info!(state = ?InstanceState::CreatedUnconfirmed, "object created");

        planned[ID_ATTRIBUTE] = Value::String(state_id);
        let state = self.read_back("Created", &id, &planned).await?;
        info!(state = ?InstanceState::Managed, "create confirmed");
        Ok(state)
    }

    /// Refresh state from Casdoor.
    ///
    /// Returns `Ok(None)` when the object no longer exists.
    #[instrument(
        skip_all,
        fields(resource_type = self.descriptor.type_name, id = tracing::field::Empty)
    )]
    pub async fn read(&self, current: &Value) -> Result<Option<Value>, ProviderError> {
        let id = self.state_identifier(current)?;
        tracing::Span::current().record("id", id.api_id().as_str());

        let Some(object) = self.client.get_object(self.kind(), &id).await? else {
            warn!(
                state = ?InstanceState::Unmanaged,
                "object no longer exists, removing from state"
            );
            return Ok(None);
        };

        let fetched = self.descriptor.fields.from_api(self.schema(), &object);
        let mut state = self.reconciler.refresh(self.schema(), Some(current), &fetched);
        state[ID_ATTRIBUTE] = Value::String(self.descriptor.id_style.format(&id));
        Ok(Some(state))
    }

    /// Update the object in place and return the reconciled state.
    ///
    /// An update Casdoor does not report as affected is [`ProviderError::Rejected`];
    /// nothing was written, so there is no read-back.
    #[instrument(
        skip_all,
        fields(resource_type = self.descriptor.type_name, id = tracing::field::Empty)
    )]
    pub async fn update(&self, prior: &Value, planned: Value) -> Result<Value, ProviderError> {
        let id = self.state_identifier(prior)?;
        tracing::Span::current().record("id", id.api_id().as_str());

        let mut planned = self.project(&planned)?;
        self.fill_owner(&mut planned);
        let target = self.descriptor.id_style.from_state(&planned)?;

        let body = self.api_body(&planned, &target);
        if !self.client.update_object(self.kind(), &id, &body).await? {
            return Err(ProviderError::rejected(
                format!("update-{}", self.kind()),
                id.api_id(),
                "Casdoor did not apply the change (was the object deleted?)",
            ));
        }
        info!("object updated");

        planned[ID_ATTRIBUTE] = Value::String(self.descriptor.id_style.format(&target));
        self.read_back("Updated", &target, &planned).await
    }

    /// Delete the object.
    #[instrument(
        skip_all,
        fields(resource_type = self.descriptor.type_name, id = tracing::field::Empty)
    )]
    pub async fn delete(&self, current: &Value) -> Result<(), ProviderError> {
        let id = self.state_identifier(current)?;
        tracing::Span::current().record("id", id.api_id().as_str());

        let body = self.api_body(current, &id);
        if !self.client.delete_object(self.kind(), &body).await? {
            return Err(ProviderError::rejected(
                format!("delete-{}", self.kind()),
                id.api_id(),
                "Casdoor did not apply the change",
            ));
        }
        info!("object deleted");
        Ok(())
    }

    /// Turn an import string into identifier-only state. The host's next
    /// read fills in the rest.
    pub fn import(&self, raw: &str) -> Result<ImportedResource, ProviderError> {
        let id = self.descriptor.id_style.parse_import(raw)?;
        let state_id = self.descriptor.id_style.format(&id);
        info!(resource_type = self.descriptor.type_name, id = %state_id, "importing");
        Ok(ImportedResource::new(
            self.descriptor.type_name,
            json!({
                "id": state_id,
                "owner": id.owner,
                "name": id.name,
            }),
        ))
    }

    /// Look an object up by `owner`/`name` for a data source.
    #[instrument(skip_all, fields(data_source = self.descriptor.type_name))]
    pub async fn read_data_source(&self, config: &Value) -> Result<Value, ProviderError> {
        let mut lookup = config.clone();
        if !lookup.is_object() {
            lookup = Value::Object(Map::new());
        }
        self.fill_owner(&mut lookup);
        let id = self.descriptor.id_style.from_state(&lookup)?;

        let object = self
            .client
            .get_object(self.kind(), &id)
            .await?
            .ok_or_else(|| {
                ProviderError::NotFound(format!("{} {}", self.descriptor.type_name, id))
            })?;

        let fetched = self.descriptor.fields.from_api(self.schema(), &object);
        let mut state = self.reconciler.refresh(self.schema(), None, &fetched);
        state[ID_ATTRIBUTE] = Value::String(self.descriptor.id_style.format(&id));
        Ok(state)
    }

    /// Fetch the object after a write and reconcile it against `planned`.
    async fn read_back(
        &self,
        operation: &'static str,
        id: &ResourceIdentifier,
        planned: &Value,
    ) -> Result<Value, ProviderError> {
        let unconfirmed = |reason: String| {
            tracing::error!(
                state = ?InstanceState::Inconsistent,
                reason = %reason,
                "read-back failed after write"
            );
            ProviderError::Unconfirmed {
                operation,
                resource: id.api_id(),
                reason,
                state: Box::new(planned.clone()),
            }
        };

        let object = match self.client.get_object(self.kind(), id).await {
            Ok(Some(object)) => object,
            Ok(None) => return Err(unconfirmed("object not found on read-back".to_string())),
            Err(e) => return Err(unconfirmed(e.to_string())),
        };

        let fetched = self.descriptor.fields.from_api(self.schema(), &object);
        Ok(self.reconciler.after_write(self.schema(), planned, &fetched))
    }

    /// Copy the schema's attributes out of `value`, dropping anything else.
    fn project(&self, value: &Value) -> Result<Value, ProviderError> {
        let obj = value.as_object().ok_or_else(|| {
            ProviderError::Validation(format!(
                "{} state must be an object",
                self.descriptor.type_name
            ))
        })?;
        Ok(Value::Object(
            self.schema()
                .attributes
                .keys()
                .map(|name| (name.clone(), obj.get(name).cloned().unwrap_or(Value::Null)))
                .collect(),
        ))
    }

    fn fill_owner(&self, state: &mut Value) {
        let Some(obj) = state.as_object_mut() else {
            return;
        };
        match self.descriptor.id_style {
            IdStyle::Named { owner } => {
                obj.insert("owner".to_string(), Value::String(owner.to_string()));
            }
            IdStyle::Composite => {
                let unset = obj.get("owner").map_or(true, Value::is_null);
                if let (true, Some(owner)) = (unset, &self.default_owner) {
                    obj.insert("owner".to_string(), Value::String(owner.clone()));
                }
            }
        }
    }

    /// Null out `id` and server-assigned attributes. With `keep_configured`,
    /// optional+computed attributes the user set are left alone.
    fn clear_computed(&self, planned: &mut Value, keep_configured: bool) {
        for (name, attr) in &self.schema().attributes {
            let clear = name == ID_ATTRIBUTE
                || attr.flags.is_computed_only()
                || (attr.flags.computed && !keep_configured && !is_identity(name));
            if clear {
                planned[name.as_str()] = Value::Null;
            }
        }
    }

    /// The identifier of an object already in state.
    fn state_identifier(&self, state: &Value) -> Result<ResourceIdentifier, ProviderError> {
        match state.get(ID_ATTRIBUTE).and_then(Value::as_str) {
            Some(id) if !id.is_empty() => self.descriptor.id_style.parse_import(id),
            _ => self.descriptor.id_style.from_state(state),
        }
    }

    fn api_body(&self, state: &Value, id: &ResourceIdentifier) -> Value {
        let mut body = self.descriptor.fields.to_api(self.schema(), state);
        body["owner"] = Value::String(id.owner.clone());
        body["name"] = Value::String(id.name.clone());
        body
    }
}

fn is_identity(name: &str) -> bool {
    name == "owner" || name == "name"
}
