//! Request-body extractors.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body that is deserialized and then checked with [`Validate`].
///
/// Malformed JSON or missing/mistyped fields reject with 400 `BAD_REQUEST`;
/// rule violations reject with 400 `VALIDATION_ERROR` listing every failing
/// field.
///
/// ```ignore
/// async fn create(ValidatedJson(input): ValidatedJson<CreateRoleRequest>) -> AppResult<()> {
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
