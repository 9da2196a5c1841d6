//! Presence checks for newly submitted records

use crate::error::CasebookError;
use casebook_model::Fields;
use serde_json::Value;

/// Fields a client may not set on create; the service owns them
const SERVER_OWNED: &[&str] = &[
    "id",
    "submittedAt",
    "status",
    "isEditedVersion",
    "originalSubmissionId",
    "editedBy",
    "editTimestamp",
    "facilitatorComment",
    "facilitatorCommentTimestamp",
    "facilitatorCommentBy",
];

/// Check a create body and strip server-owned fields from it
///
/// Requires non-empty `username` and `email` strings and a non-empty
/// `cases` array. Nothing inside the cases is validated.
pub(crate) fn accept_draft(mut draft: Fields) -> Result<Fields, CasebookError> {
    let mut missing = Vec::new();
    for field in ["username", "email"] {
        let present = draft
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.trim().is_empty());
        if !present {
            missing.push(field);
        }
    }
    let has_cases = draft
        .get("cases")
        .and_then(Value::as_array)
        .is_some_and(|cases| !cases.is_empty());
    if !has_cases {
        missing.push("cases");
    }
    if !missing.is_empty() {
        return Err(CasebookError::validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )));
    }

    for field in SERVER_OWNED {
        draft.remove(*field);
    }
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn complete_draft_is_accepted_and_cleaned() {
        let accepted = accept_draft(draft(json!({
            "username": "alice",
            "email": "a@x.com",
            "cases": [{"group": "G"}],
            "isEditedVersion": true,
            "status": "approved"
        })))
        .unwrap();
        assert!(accepted.get("isEditedVersion").is_none());
        assert!(accepted.get("status").is_none());
        assert_eq!(accepted["username"], "alice");
    }

    #[test]
    fn missing_fields_are_listed() {
        let err = accept_draft(draft(json!({"username": " ", "cases": []}))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation failed: missing required fields: username, email, cases"
        );
    }
}
