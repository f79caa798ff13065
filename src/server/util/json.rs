use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::server::error::{validation::ValidationError, AppError};

/// JSON body extractor whose rejections use the API's validation error body.
///
/// Malformed JSON, a wrong content type or a missing/mistyped field all become
/// 400 `Validation failed` with a single `body` detail.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(ValidationError::single("body", rejection.body_text()).into()),
        }
    }
}
