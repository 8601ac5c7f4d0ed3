//! `Credentials` extractor: login body as JSON or as a submitted HTML form.

use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};

use ipgate_core::error::AppError;

use crate::dto::LoginRequest;
use crate::error::ApiError;

/// Login credentials from either body encoding.
///
/// `application/x-www-form-urlencoded` bodies are read as a form; anything
/// else is read as JSON.
#[derive(Debug, Clone)]
pub struct Credentials(pub LoginRequest);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

impl<S> FromRequest<S> for Credentials
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(body) = Form::<LoginRequest>::from_request(req, state)
                .await
                .map_err(|e| ApiError(AppError::validation(e.body_text())))?;
            Ok(Self(body))
        } else {
            let Json(body) = Json::<LoginRequest>::from_request(req, state)
                .await
                .map_err(|e| ApiError(AppError::validation(e.body_text())))?;
            Ok(Self(body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    async fn extract(content_type: &str, body: &str) -> Result<LoginRequest, ApiError> {
        let req = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap();
        Credentials::from_request(req, &()).await.map(|Credentials(c)| c)
    }

    #[tokio::test]
    async fn test_form_body() {
        let creds = extract(
            "application/x-www-form-urlencoded",
            "username=alice&password=s3cr%26t",
        )
        .await
        .unwrap();
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password, "s3cr&t");
    }

    #[tokio::test]
    async fn test_json_body() {
        let creds = extract(
            "application/json",
            r#"{"username":"alice","password":"s3cret"}"#,
        )
        .await
        .unwrap();
        assert_eq!(creds.username, "alice");
    }

    #[tokio::test]
    async fn test_missing_field_is_validation_error() {
        let err = extract("application/x-www-form-urlencoded", "username=alice")
            .await
            .unwrap_err();
        assert_eq!(err.0.kind, ipgate_core::error::ErrorKind::Validation);
    }
}
