//! Structural checks for theme documents.
//!
//! Two input shapes are accepted:
//!
//! - **Nested**: `{ "meta": { "id": ..., "name": ... }, "colors": {...}, ... }`
//! - **Flat**: `{ "id": ..., "name": ..., "colors": {...}, ... }`
//!
//! Anything else is rejected instead of guessed at.

use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Which of the two accepted shapes a document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    Nested,
    Flat,
}

/// Validate a parsed document and report its shape.
///
/// # Errors
/// Returns the first structural problem found.
pub fn check(value: &Value) -> Result<DocumentShape, ValidationError> {
    let root = value.as_object().ok_or(ValidationError::NotAnObject)?;

    let (shape, meta) = match root.get("meta") {
        Some(Value::Object(meta)) => (DocumentShape::Nested, meta),
        Some(_) => return Err(wrong_type("meta", "an object")),
        None if root.contains_key("id") || root.contains_key("name") => {
            (DocumentShape::Flat, root)
        }
        None => return Err(ValidationError::UnrecognizedShape),
    };

    check_meta(meta)?;
    check_body(root)?;
    Ok(shape)
}

fn wrong_type(field: impl Into<String>, expected: &'static str) -> ValidationError {
    ValidationError::WrongType {
        field: field.into(),
        expected,
    }
}

fn required_string(meta: &Map<String, Value>, field: &'static str) -> Result<(), ValidationError> {
    match meta.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(()),
        Some(Value::String(_)) | Some(Value::Null) | None => {
            Err(ValidationError::MissingField(field))
        }
        Some(_) => Err(wrong_type(field, "a string")),
    }
}

fn optional_string(map: &Map<String, Value>, field: &str, path: &str) -> Result<(), ValidationError> {
    match map.get(field) {
        None | Some(Value::Null | Value::String(_)) => Ok(()),
        Some(_) => Err(wrong_type(format!("{path}{field}"), "a string")),
    }
}

fn check_meta(meta: &Map<String, Value>) -> Result<(), ValidationError> {
    required_string(meta, "id")?;
    required_string(meta, "name")?;
    for field in ["author", "version", "description", "type"] {
        optional_string(meta, field, "")?;
    }
    match meta.get("tags") {
        None | Some(Value::Null) => {}
        Some(Value::Array(tags)) => {
            if !tags.iter().all(Value::is_string) {
                return Err(wrong_type("tags", "an array of strings"));
            }
        }
        Some(_) => return Err(wrong_type("tags", "an array of strings")),
    }
    Ok(())
}

fn scalar_map(root: &Map<String, Value>, field: &str) -> Result<(), ValidationError> {
    match root.get(field) {
        None | Some(Value::Null) => Ok(()),
        Some(Value::Object(entries)) => {
            match entries
                .iter()
                .find(|(_, v)| matches!(v, Value::Array(_) | Value::Object(_)))
            {
                Some((key, _)) => Err(wrong_type(format!("{field}.{key}"), "a scalar")),
                None => Ok(()),
            }
        }
        Some(_) => Err(wrong_type(field, "an object")),
    }
}

fn check_body(root: &Map<String, Value>) -> Result<(), ValidationError> {
    scalar_map(root, "colors")?;
    scalar_map(root, "terminal")?;

    let editor = match root.get("editor") {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Object(editor)) => editor,
        Some(_) => return Err(wrong_type("editor", "an object")),
    };
    for field in [
        "base",
        "background",
        "foreground",
        "lineHighlight",
        "selection",
        "cursor",
        "lineNumber",
        "lineNumberActive",
    ] {
        optional_string(editor, field, "editor.")?;
    }
    if !matches!(editor.get("inherit"), None | Some(Value::Null | Value::Bool(_))) {
        return Err(wrong_type("editor.inherit", "a boolean"));
    }
    match editor.get("syntax") {
        None | Some(Value::Null) => Ok(()),
        Some(Value::Object(roles)) => {
            for (role, style) in roles {
                let path = format!("editor.syntax.{role}.");
                let style = style
                    .as_object()
                    .ok_or_else(|| wrong_type(format!("editor.syntax.{role}"), "an object"))?;
                optional_string(style, "color", &path)?;
                optional_string(style, "fontStyle", &path)?;
            }
            Ok(())
        }
        Some(_) => Err(wrong_type("editor.syntax", "an object")),
    }
}
