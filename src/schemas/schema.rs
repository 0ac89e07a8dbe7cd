use schemars::schema::RootSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{any::TypeId, sync::Arc};

use super::response_schema::to_response_schema;

/// Cached schema of a structured output type.
///
/// Holds the JSON Schema used for validating replies together with the
/// response-schema dialect the remote service expects in requests. Both are
/// derived from the same `RootSchema`.
#[derive(Clone, Debug)]
pub struct SchemaHandle {
    schema_name: &'static str,
    type_name: &'static str,
    type_id: TypeId,
    schema_json: Arc<Value>,
    response_schema: Arc<Value>,
}

impl SchemaHandle {
    pub fn from_root_schema<T: 'static>(
        schema_name: &'static str,
        type_name: &'static str,
        root: RootSchema,
    ) -> Self {
        let schema_json = serde_json::to_value(root)
            .unwrap_or_else(|err| panic!("failed to serialize schema for {}: {}", type_name, err));
        let response_schema = to_response_schema(&schema_json);

        Self {
            schema_name,
            type_name,
            type_id: TypeId::of::<T>(),
            schema_json: Arc::new(schema_json),
            response_schema: Arc::new(response_schema),
        }
    }

    pub fn schema_name(&self) -> &'static str {
        self.schema_name
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Draft-7 JSON Schema, `$ref`s and all.
    pub fn schema_json(&self) -> &Value {
        self.schema_json.as_ref()
    }

    /// Self-contained schema in the request dialect (`responseSchema`).
    pub fn response_schema(&self) -> &Value {
        self.response_schema.as_ref()
    }
}

/// A type the model can be asked to produce directly.
///
/// Implemented by `#[structured_output]`.
pub trait StructuredOutput: DeserializeOwned + Send + Sync + 'static {
    fn schema() -> &'static SchemaHandle;
}

/// Fill in the root title and description unless schemars already did.
pub fn apply_root_metadata(
    root: &mut RootSchema,
    title: &'static str,
    description: Option<&'static str>,
) {
    let metadata = root.schema.metadata();

    if metadata.title.is_none() {
        metadata.title = Some(title.to_string());
    }

    if let Some(description) = description {
        if metadata.description.is_none() {
            metadata.description = Some(description.to_string());
        }
    }
}
