use serde_json::Value;
use tracing::debug;

use crate::{
    error::{Result, SafarError},
    schemas::{validation::validate_structured_payload, StructuredOutput},
};

/// Turn a raw model reply into `T`, or fail without producing a partial value.
///
/// Blank input is [`SafarError::EmptyResponse`]. Anything that is not JSON,
/// breaks the schema of `T`, or cannot be deserialized into `T` is
/// [`SafarError::MalformedStructure`].
pub fn decode_structured_response<T>(raw: Option<&str>) -> Result<T>
where
    T: StructuredOutput,
{
    let schema = T::schema();
    let raw = match raw.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => return Err(SafarError::EmptyResponse),
    };

    let payload: Value = serde_json::from_str(raw).map_err(|err| {
        debug!(target: "safar::schema", schema = schema.schema_name(), error = %err, "reply is not JSON");
        SafarError::MalformedStructure(format!("reply is not valid JSON: {err}"))
    })?;

    if !payload.is_object() {
        return Err(SafarError::MalformedStructure(format!(
            "expected a `{}` object at <root>",
            schema.schema_name()
        )));
    }

    validate_structured_payload(schema, &payload)?;

    serde_path_to_error::deserialize(payload).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        SafarError::MalformedStructure(format!(
            "failed to deserialize `{}` at {}: {}",
            schema.schema_name(),
            location,
            err.inner()
        ))
    })
}
