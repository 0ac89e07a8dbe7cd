//! Conversion from schemars' draft-7 output to the `responseSchema` dialect.
//!
//! The endpoint accepts an OpenAPI-style subset: upper-case type names,
//! `nullable` instead of `["T", "null"]` unions, and no `$ref`/`definitions`.
//! Anything outside that subset is dropped here; the full draft-7 schema is
//! still enforced locally when the reply comes back.

use serde_json::{Map, Value};

const MAX_DEPTH: usize = 32;
const KEPT_FORMATS: &[&str] = &["int32", "int64", "float", "double", "date-time", "enum"];

/// Build a self-contained `responseSchema` from a draft-7 root schema.
pub fn to_response_schema(root: &Value) -> Value {
    let definitions = root.get("definitions").and_then(Value::as_object);
    convert(root, definitions, 0)
}

fn convert(node: &Value, definitions: Option<&Map<String, Value>>, depth: usize) -> Value {
    let Some(obj) = node.as_object() else {
        return Value::Object(Map::new());
    };

    if depth > MAX_DEPTH {
        return object_with_type("OBJECT");
    }

    if let Some(target) = obj.get("$ref").and_then(Value::as_str) {
        let resolved = resolve_ref(target, definitions)
            .map(|def| convert(def, definitions, depth + 1))
            .unwrap_or_else(|| object_with_type("OBJECT"));
        return with_description(resolved, obj.get("description"));
    }

    if let Some(Value::Array(parts)) = obj.get("allOf") {
        if let [single] = parts.as_slice() {
            let inner = convert(single, definitions, depth + 1);
            return with_description(inner, obj.get("description"));
        }
    }

    if let Some(Value::Array(variants)) = obj.get("anyOf").or_else(|| obj.get("oneOf")) {
        let nullable = variants.iter().any(is_null_schema);
        let concrete: Vec<&Value> = variants.iter().filter(|v| !is_null_schema(v)).collect();

        let mut converted = match concrete.as_slice() {
            [single] => convert(single, definitions, depth + 1),
            many => {
                let mut out = Map::new();
                out.insert(
                    "anyOf".to_string(),
                    Value::Array(
                        many.iter()
                            .map(|v| convert(v, definitions, depth + 1))
                            .collect(),
                    ),
                );
                Value::Object(out)
            }
        };
        if nullable {
            converted["nullable"] = Value::Bool(true);
        }
        return with_description(converted, obj.get("description"));
    }

    let mut out = Map::new();

    let (type_name, nullable) = match obj.get("type") {
        Some(Value::String(name)) => (Some(name.as_str()), false),
        Some(Value::Array(names)) => {
            let names: Vec<&str> = names.iter().filter_map(Value::as_str).collect();
            let nullable = names.contains(&"null");
            let concrete = names.into_iter().find(|name| *name != "null");
            (concrete, nullable)
        }
        _ => (None, false),
    };

    if let Some(mapped) = type_name.and_then(map_type) {
        out.insert("type".to_string(), Value::String(mapped.to_string()));
    }
    if nullable {
        out.insert("nullable".to_string(), Value::Bool(true));
    }

    if let Some(description) = obj.get("description").filter(|d| d.is_string()) {
        out.insert("description".to_string(), description.clone());
    }

    if let Some(format) = obj
        .get("format")
        .and_then(Value::as_str)
        .filter(|f| KEPT_FORMATS.contains(f))
    {
        out.insert("format".to_string(), Value::String(format.to_string()));
    }

    if let Some(Value::Array(values)) = obj.get("enum") {
        let strings: Vec<Value> = values.iter().filter(|v| v.is_string()).cloned().collect();
        if !strings.is_empty() {
            out.insert("enum".to_string(), Value::Array(strings));
            out.entry("type".to_string())
                .or_insert_with(|| Value::String("STRING".to_string()));
        }
    }

    if let Some(Value::Object(properties)) = obj.get("properties") {
        let converted: Map<String, Value> = properties
            .iter()
            .map(|(name, schema)| (name.clone(), convert(schema, definitions, depth + 1)))
            .collect();
        out.insert("properties".to_string(), Value::Object(converted));
        out.entry("type".to_string())
            .or_insert_with(|| Value::String("OBJECT".to_string()));
    }

    if let Some(required) = obj.get("required").filter(|r| r.is_array()) {
        out.insert("required".to_string(), required.clone());
    }

    match obj.get("items") {
        Some(items @ Value::Object(_)) => {
            out.insert("items".to_string(), convert(items, definitions, depth + 1));
        }
        Some(Value::Array(tuple)) => {
            if let Some(first) = tuple.first() {
                out.insert("items".to_string(), convert(first, definitions, depth + 1));
            }
        }
        _ => {}
    }

    for key in ["minItems", "maxItems"] {
        if let Some(bound) = obj.get(key).filter(|v| v.is_u64()) {
            out.insert(key.to_string(), bound.clone());
        }
    }

    Value::Object(out)
}

fn resolve_ref<'a>(target: &str, definitions: Option<&'a Map<String, Value>>) -> Option<&'a Value> {
    let name = target.strip_prefix("#/definitions/")?;
    definitions?.get(name)
}

fn map_type(name: &str) -> Option<&'static str> {
    match name {
        "object" => Some("OBJECT"),
        "array" => Some("ARRAY"),
        "string" => Some("STRING"),
        "integer" => Some("INTEGER"),
        "number" => Some("NUMBER"),
        "boolean" => Some("BOOLEAN"),
        _ => None,
    }
}

fn is_null_schema(schema: &Value) -> bool {
    schema.get("type").and_then(Value::as_str) == Some("null")
}

fn object_with_type(type_name: &str) -> Value {
    let mut out = Map::new();
    out.insert("type".to_string(), Value::String(type_name.to_string()));
    Value::Object(out)
}

fn with_description(mut schema: Value, description: Option<&Value>) -> Value {
    if let (Some(desc), Some(obj)) = (description.filter(|d| d.is_string()), schema.as_object_mut())
    {
        obj.insert("description".to_string(), desc.clone());
    }
    schema
}
