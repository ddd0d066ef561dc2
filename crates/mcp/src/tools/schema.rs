// Helper functions for building JSON-schema tool inputs

use serde_json::{json, Value};

pub fn json_schema_object(properties: Value, required: Vec<&str>) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description
    })
}

/// A string restricted to `values`, advertising `default`.
pub fn json_schema_enum(description: &str, values: &[&str], default: &str) -> Value {
    json!({
        "type": "string",
        "description": description,
        "enum": values,
        "default": default
    })
}

pub fn json_schema_number(description: &str, minimum: f64, maximum: f64) -> Value {
    json!({
        "type": "number",
        "description": description,
        "minimum": minimum,
        "maximum": maximum
    })
}

pub fn json_schema_integer(description: &str, minimum: u32, maximum: Option<u32>) -> Value {
    let mut schema = json!({
        "type": "integer",
        "description": description,
        "minimum": minimum
    });
    if let Some(maximum) = maximum {
        schema["maximum"] = json!(maximum);
    }
    schema
}

pub fn json_schema_array(items: Value, description: &str) -> Value {
    json!({
        "type": "array",
        "items": items,
        "description": description
    })
}

/// An object whose keys are not constrained.
pub fn json_schema_open_object(description: &str) -> Value {
    json!({
        "type": "object",
        "description": description,
        "additionalProperties": true
    })
}
