//! Conversion of `validator` results into client-facing field errors.

use serde::Serialize;
use serde_json::Value;
use validator::{ValidationError, ValidationErrors};

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Always `body`: only JSON request bodies are validated field by field.
    pub location: &'static str,
    pub field: String,
    pub message: String,
    /// Offending value as received; `null` when absent.
    pub value: Value,
}

/// Flattens `errors` into a list sorted by field name, then message.
///
/// Pure: the output depends only on the input, so the same request always
/// produces the same error body.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| FieldError {
                location: "body",
                field: field.clone(),
                message: describe(e),
                value: e.params.get("value").cloned().unwrap_or(Value::Null),
            })
        })
        .collect();

    out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    out
}

fn describe(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    match error.code.as_ref() {
        "required" => "is required".to_string(),
        "url" => "must be a valid URL".to_string(),
        "regex" => "contains invalid characters".to_string(),
        "length" => match (error.params.get("min"), error.params.get("max")) {
            (Some(min), Some(max)) => format!("must be between {min} and {max} characters"),
            _ => "has an invalid length".to_string(),
        },
        other => format!("failed {other} check"),
    }
}
