//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, Role};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    IdMismatch,
    UnknownRole,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::IdMismatch => "id_mismatch",
            ErrorCode::UnknownRole => "unknown_role",
        }
    }
}

/// Rejects update bodies whose embedded id differs from the path id.
pub(crate) fn require_matching_ids(path_id: Uuid, body_id: Uuid) -> Result<(), Error> {
    if path_id == body_id {
        return Ok(());
    }
    Err(
        Error::invalid_request("body id does not match the path id").with_details(json!({
            "field": "id",
            "pathId": path_id.to_string(),
            "bodyId": body_id.to_string(),
            "code": ErrorCode::IdMismatch.as_str(),
        })),
    )
}

/// Parses role names, reporting the first unknown entry with its index.
pub(crate) fn parse_roles(values: Vec<String>) -> Result<Vec<Role>, Error> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            value.parse::<Role>().map_err(|_| {
                Error::invalid_request("roles must contain known role names").with_details(json!({
                    "field": "roles",
                    "index": index,
                    "value": value,
                    "code": ErrorCode::UnknownRole.as_str(),
                }))
            })
        })
        .collect()
}
