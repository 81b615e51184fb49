//! Validated JSON extractor.
//!
//! Combines deserialization with automatic validation using the `validator`
//! crate, so handlers only ever see well-formed request bodies.

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::Json;
use crate::handler::{Error, ErrorKind};

/// JSON extractor with automatic validation.
///
/// Works with any type implementing both `serde::Deserialize` and
/// `validator::Validate`. Validation failures reject with a 400 listing
/// every offending field.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    /// Returns the inner validated value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        data.validate()?;
        Ok(Self(data))
    }
}

/// Formats one field error with the custom message when the schema set one.
fn format_validation_error(field: &str, error: &validator::ValidationError) -> String {
    if let Some(message) = &error.message {
        return format!("Field '{field}': {message}");
    }

    let reason = match error.code.as_ref() {
        "required" => "is required and cannot be empty",
        "length" => "has invalid length",
        "email" => "must be a valid email address",
        "range" => "is out of valid range",
        "url" => "must be a valid URL",
        code => return format!("Field '{field}' failed validation: {code}"),
    };

    format!("Field '{field}' {reason}")
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors
                    .iter()
                    .map(move |error| format_validation_error(field, error))
            })
            .collect();

        let details = match messages.as_slice() {
            [] => "Validation failed".to_string(),
            [single] => single.clone(),
            multiple => multiple.join(". "),
        };

        tracing::warn!(
            errors = ?errors.field_errors(),
            "Request validation failed"
        );

        ErrorKind::BadRequest
            .with_message("Validation failed")
            .with_details(details)
            .into_static()
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Body {
        #[validate(length(min = 1, max = 10))]
        reason: String,
    }

    #[test]
    fn validation_errors_become_bad_request() {
        let body = Body {
            reason: String::new(),
        };
        let errors = body.validate().unwrap_err();
        let error: Error<'static> = errors.into();

        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert!(error.details().unwrap_or_default().contains("reason"));
    }
}
