use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::shared::types::FieldError;

lazy_static! {
    /// International phone number (E.164), checked after separators are stripped
    /// - Valid: "+14155552671", "442071838750"
    /// - Invalid: "+0123", "phone", "+1"
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[1-9]\d{1,14}$").unwrap();

    /// Separators people commonly type inside phone numbers
    static ref PHONE_SEPARATORS: Regex = Regex::new(r"[\s\-()]").unwrap();
}

/// `validator` hook for optional phone fields
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let cleaned = PHONE_SEPARATORS.replace_all(phone, "");
    if PHONE_REGEX.is_match(&cleaned) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some(Cow::Borrowed("Invalid phone number"));
        Err(err)
    }
}

/// Flattens nested `validator` errors into `{field, message, code}` entries.
///
/// Nested structs produce dotted paths (`travelDates.start`) and list items
/// include their index (`preferences.0`). Field names are reported in their
/// camelCase wire form. Output is sorted by field path.
pub fn flatten_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect(errors, "", &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let field = wire_name(field);
        let path = if prefix.is_empty() {
            field
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    out.push(FieldError {
                        field: path.clone(),
                        message: err
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("Invalid value for {}", path)),
                        code: err.code.to_string(),
                    });
                }
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, &format!("{}.{}", path, index), out);
                }
            }
        }
    }
}

/// `travel_dates` → `travelDates`; schema-level keys such as `__all__` are kept.
fn wire_name(field: &str) -> String {
    if field.starts_with('_') {
        return field.to_string();
    }

    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
