use error_stack::Report;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetError {
    #[error("Worksheet schema is invalid: the first header must contain \"Date\"")]
    InvalidSchema,
    #[error("Authentication with the spreadsheet service failed")]
    AuthenticationFailure,
    #[error("Spreadsheet or worksheet not found")]
    NotFound,
    #[error("Record field has no column in the header row")]
    KeyAlignment,
    #[error("Spreadsheet service request failed")]
    TransportFailure,
}

fn from_status(status: u64) -> SheetError {
    match status {
        401 | 403 => SheetError::AuthenticationFailure,
        404 => SheetError::NotFound,
        _ => SheetError::TransportFailure,
    }
}

/// Maps a client error onto the error taxonomy of this crate.
pub fn classify(error: &google_sheets4::Error) -> SheetError {
    match error {
        google_sheets4::Error::MissingToken(_) | google_sheets4::Error::MissingAPIKey => {
            SheetError::AuthenticationFailure
        }
        google_sheets4::Error::BadRequest(body) => body
            .pointer("/error/code")
            .and_then(serde_json::Value::as_u64)
            .map_or(SheetError::TransportFailure, from_status),
        google_sheets4::Error::Failure(response) => from_status(response.status().as_u16().into()),
        _ => SheetError::TransportFailure,
    }
}

pub trait ClassifyExt<T> {
    fn classify(self) -> error_stack::Result<T, SheetError>;
}

impl<T> ClassifyExt<T> for Result<T, google_sheets4::Error> {
    fn classify(self) -> error_stack::Result<T, SheetError> {
        self.map_err(|error| {
            let context = classify(&error);
            Report::new(error).change_context(context)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_found_body() {
        let error = google_sheets4::Error::BadRequest(json!({
            "error": { "code": 404, "message": "Requested entity was not found.", "status": "NOT_FOUND" }
        }));
        assert_eq!(classify(&error), SheetError::NotFound);
    }

    #[test]
    fn test_permission_denied_body() {
        let error = google_sheets4::Error::BadRequest(json!({
            "error": { "code": 403, "status": "PERMISSION_DENIED" }
        }));
        assert_eq!(classify(&error), SheetError::AuthenticationFailure);
    }

    #[test]
    fn test_bad_request_without_code() {
        let error = google_sheets4::Error::BadRequest(json!({ "unexpected": true }));
        assert_eq!(classify(&error), SheetError::TransportFailure);
    }

    #[test]
    fn test_missing_api_key() {
        assert_eq!(
            classify(&google_sheets4::Error::MissingAPIKey),
            SheetError::AuthenticationFailure
        );
    }

    #[test]
    fn test_cancelled_is_transport() {
        assert_eq!(
            classify(&google_sheets4::Error::Cancelled),
            SheetError::TransportFailure
        );
    }
}
