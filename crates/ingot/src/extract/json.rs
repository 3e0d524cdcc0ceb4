use async_trait::async_trait;
use http::header::{self, HeaderMap, HeaderValue};
use http::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::error;

use crate::extract::FromRequest;
use crate::extract::rejection::JsonRejection;
use ingot_core::{Body, IntoResponse, Request, Response};

/// JSON extractor and response.
///
/// As an extractor, `Json<T>` requires an `application/json` content type
/// (or a `+json` suffix), buffers the body, and deserializes it. It
/// consumes the body, so it is only accepted in the final argument
/// position.
///
/// As a return type, `Json<T>` serializes the value with an
/// `application/json` content type.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(serde::Deserialize)]
/// struct CreateItem {
///     name: String,
/// }
///
/// #[derive(serde::Serialize)]
/// struct Item {
///     id: u64,
///     name: String,
/// }
///
/// async fn create(Json(input): Json<CreateItem>) -> Json<Item> {
///     Json(Item { id: 1, name: input.name })
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T> std::ops::Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(header::CONTENT_TYPE) else {
        return false;
    };
    let Ok(content_type) = content_type.to_str() else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

#[async_trait]
impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Err(JsonRejection::MissingContentType);
        }
        let bytes = req.into_body().into_bytes().await?;
        let value = serde_json::from_slice(&bytes).map_err(JsonRejection::Parse)?;
        Ok(Json(value))
    }
}

/// Conversion is total: a value that fails to serialize degrades to a 500
/// text response instead of erroring out of the protocol.
impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(bytes) => {
                let mut res = Response::new(Body::from(bytes));
                res.headers_mut().insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                );
                res
            }
            Err(err) => {
                error!("failed to serialize response body: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Item {
        id: u64,
        name: String,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_json_extraction() {
        let req = json_request(r#"{"id":1,"name":"bolt"}"#);
        let Json(item) = Json::<Item>::from_request(req, &()).await.unwrap();
        assert_eq!(
            item,
            Item {
                id: 1,
                name: "bolt".to_owned(),
            }
        );
    }

    #[tokio::test]
    async fn test_missing_content_type_is_unsupported_media_type() {
        let req = Request::builder()
            .body(Body::from(r#"{"id":1,"name":"bolt"}"#))
            .unwrap();
        let err = Json::<Item>::from_request(req, &()).await.unwrap_err();
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let req = json_request("{not json");
        let err = Json::<Item>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_json_response() {
        let res = Json(Item {
            id: 7,
            name: "bolt".to_owned(),
        })
        .into_response();
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let bytes = res.into_body().into_bytes().await.unwrap();
        let round_trip: Item = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(round_trip.id, 7);
    }

    #[test]
    fn test_content_type_detection() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        assert!(has_json_content_type(&headers));

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        assert!(has_json_content_type(&headers));

        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(!has_json_content_type(&headers));
    }
}
