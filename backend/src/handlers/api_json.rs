use std::future::Future;

use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::json;

/// `Json<T>` that answers malformed bodies with a 400 `{"error": ...}` instead
/// of axum's plain-text rejection.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    fn from_request(
        req: Request,
        state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            match Json::<T>::from_request(req, state).await {
                Ok(Json(value)) => Ok(ApiJson(value)),
                Err(rejection) => {
                    let detail = rejection.body_text();
                    tracing::warn!("Rejected request body: {}", detail);
                    Err((
                        StatusCode::BAD_REQUEST,
                        Json(json!({"error": format!("Invalid request body: {}", detail)})),
                    ))
                }
            }
        }
    }
}
