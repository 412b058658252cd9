//! HTTP Client
//!
//! Bearer-authenticated requests and envelope unwrapping. Every call reads
//! the token from local storage so a login in another tab is picked up.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::config;
use crate::error::ApiError;
use crate::models::Envelope;
use crate::session;

#[derive(Debug, Clone, Copy)]
pub(crate) enum Verb {
    Post,
    Put,
}

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match session::stored_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
        None => builder,
    }
}

pub(crate) async fn get_envelope<T: DeserializeOwned>(path: &str) -> Result<Envelope<T>, ApiError> {
    let url = config().url(path);
    let response = authorized(Request::get(&url)).send().await?;
    read_envelope(response).await
}

pub(crate) async fn get<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let envelope = get_envelope(path).await?;
    envelope
        .body
        .ok_or_else(|| ApiError::Decode(format!("no body in response to {path}")))
}

/// POST or PUT a JSON body. `Ok(None)` when the server acknowledges
/// without echoing a record.
pub(crate) async fn send<B, T>(verb: Verb, path: &str, body: &B) -> Result<Option<T>, ApiError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let url = config().url(path);
    let builder = match verb {
        Verb::Post => Request::post(&url),
        Verb::Put => Request::put(&url),
    };
    let request = authorized(builder)
        .json(body)
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    let response = request.send().await?;
    Ok(read_envelope(response).await?.body)
}

pub(crate) async fn delete(path: &str) -> Result<(), ApiError> {
    let url = config().url(path);
    let response = authorized(Request::delete(&url)).send().await?;
    read_envelope::<serde_json::Value>(response).await?;
    Ok(())
}

async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<Envelope<T>, ApiError> {
    let status = response.status();
    if status == 401 {
        return Err(ApiError::Unauthorized);
    }

    let text = response.text().await?;
    if !response.ok() {
        let message = serde_json::from_str::<Envelope<serde_json::Value>>(&text)
            .ok()
            .and_then(|env| env.message)
            .unwrap_or_else(|| {
                if text.trim().is_empty() {
                    response.status_text()
                } else {
                    text.clone()
                }
            });
        log::error!("[API] {} -> HTTP {}: {}", response.url(), status, message);
        return Err(ApiError::Http { status, message });
    }

    decode_envelope(&text)
}

/// Parse a successful response body; an empty body is an empty envelope
pub(crate) fn decode_envelope<T: DeserializeOwned>(text: &str) -> Result<Envelope<T>, ApiError> {
    let envelope: Envelope<T> = if text.trim().is_empty() {
        Envelope::empty()
    } else {
        serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))?
    };
    if !envelope.flag {
        let message = envelope
            .message
            .unwrap_or_else(|| "Request was rejected".to_string());
        return Err(ApiError::Rejected(message));
    }
    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Client;

    #[test]
    fn empty_body_is_acknowledgement() {
        let env = decode_envelope::<Client>("  ").unwrap();
        assert!(env.body.is_none());
    }

    #[test]
    fn flag_false_is_rejection() {
        let err = decode_envelope::<Client>(r#"{"flag":false,"message":"Duplicate GST"}"#).unwrap_err();
        assert_eq!(err, ApiError::Rejected("Duplicate GST".into()));

        let err = decode_envelope::<Client>(r#"{"flag":false}"#).unwrap_err();
        assert_eq!(err.to_string(), "Request was rejected");
    }

    #[test]
    fn malformed_json_is_decode_error() {
        let err = decode_envelope::<Client>("<html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
