//! Validated JSON extractor for Axum
//!
//! `ValidatedJson<T>` deserializes like `axum::Json<T>` and then runs
//! `validator::Validate::validate()`. Malformed JSON is a 400
//! (`INVALID_JSON`); failed validation is a 422 (`VALIDATION_ERROR`) listing
//! every offending field.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::ApiError;

/// ```ignore
/// async fn decline(ValidatedJson(body): ValidatedJson<DeclineBookingRequest>) {
///     // `body.declined_reason` is non-empty here
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

pub enum ValidatedJsonRejection {
    JsonError(JsonRejection),
    ValidationError(validator::ValidationErrors),
}

fn describe(errors: &validator::ValidationErrors) -> String {
    let mut field_errors: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, msg)
            })
        })
        .collect();
    field_errors.sort();

    if field_errors.is_empty() {
        "Validation failed".to_string()
    } else {
        field_errors.join("; ")
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            Self::JsonError(rejection) => ApiError::new(
                StatusCode::BAD_REQUEST,
                "INVALID_JSON",
                format!("Invalid JSON: {}", rejection.body_text()),
            )
            .into_response(),
            Self::ValidationError(errors) => {
                ApiError::unprocessable("VALIDATION_ERROR", describe(&errors)).into_response()
            }
        }
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: axum::extract::Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct DeclineBody {
        #[validate(length(min = 1, max = 20, message = "must be 1-20 characters"))]
        reason: String,
    }

    async fn handler(ValidatedJson(_body): ValidatedJson<DeclineBody>) -> &'static str {
        "ok"
    }

    async fn post_json(body: &'static str) -> axum::http::Response<Body> {
        let app = Router::new().route("/decline", post(handler));
        let req = Request::builder()
            .method("POST")
            .uri("/decline")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        app.oneshot(req).await.unwrap()
    }

    async fn json_of(resp: axum::http::Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn valid_body_passes() {
        let resp = post_json(r#"{"reason":"Fully booked"}"#).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let resp = post_json("not json").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_of(resp).await["code"], "INVALID_JSON");
    }

    #[tokio::test]
    async fn empty_reason_is_422_with_field() {
        let resp = post_json(r#"{"reason":""}"#).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_of(resp).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"], "reason: must be 1-20 characters");
    }
}
