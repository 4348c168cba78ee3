use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::AppError;

/// JSON body extractor whose rejections are reported through `AppError`.
///
/// A request without a JSON content type, or with an empty body, is read as
/// `{}` so the handler's own rules decide the outcome. Only a JSON body that
/// fails to parse is rejected.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(is_json_content_type);

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        let payload: &[u8] = if is_json && !bytes.iter().all(u8::is_ascii_whitespace) {
            &bytes
        } else {
            b"{}"
        };

        serde_json::from_slice(payload)
            .map(Self)
            .map_err(|e| AppError::Validation(describe(&e)))
    }
}

fn is_json_content_type(value: &str) -> bool {
    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}

/// Field-level errors lose their position suffix so messages such as
/// "Invalid due date" reach the client verbatim.
fn describe(err: &serde_json::Error) -> String {
    let message = err.to_string();
    match err.classify() {
        Category::Data => {
            let position = format!(" at line {} column {}", err.line(), err.column());
            message
                .strip_suffix(&position)
                .unwrap_or(message.as_str())
                .to_string()
        }
        _ => message,
    }
}
