use crate::{error::SafarError, schemas::SchemaHandle};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use tracing::debug;

const MAX_SCHEMA_ERRORS: usize = 3;

/// Validate a decoded reply against the draft-7 schema of `schema`.
pub(crate) fn validate_structured_payload(
    schema: &SchemaHandle,
    payload: &Value,
) -> std::result::Result<(), SafarError> {
    let validator = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema.schema_json())
        .map_err(|err| {
            SafarError::MalformedStructure(format!(
                "`{}` schema could not be compiled: {}",
                schema.schema_name(),
                err
            ))
        })?;

    let result = validator.validate(payload);
    if let Err(errors) = result {
        let mut details = Vec::new();
        let mut truncated = false;

        for (idx, error) in errors.enumerate() {
            if idx == MAX_SCHEMA_ERRORS {
                truncated = true;
                break;
            }
            let mut path = error.instance_path.to_string();
            if path.is_empty() {
                path = "<root>".to_string();
            }
            details.push(format!("{}: {}", path, error));
        }

        let mut detail_str = if details.is_empty() {
            "payload failed schema validation".to_string()
        } else {
            details.join("; ")
        };
        if truncated {
            detail_str.push_str("; additional errors truncated");
        }

        debug!(
            target: "safar::schema",
            schema = schema.schema_name(),
            error = %detail_str,
            payload = %payload
        );

        return Err(SafarError::MalformedStructure(format!(
            "reply does not match `{}` schema: {}",
            schema.schema_name(),
            detail_str
        )));
    }

    Ok(())
}
