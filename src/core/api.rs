//! Provider API plumbing
//!
//! Query-string construction and response body decoding shared by every
//! provider call.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::core::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, RequestOptions};
use crate::error::{OAuthError, ProviderError, TransportError};

/// Build a GET URL from an endpoint and query pairs, form-urlencoded in the
/// given order.
pub fn build_url(endpoint: &str, params: &[(&str, &str)]) -> Result<Url, OAuthError> {
    let mut url = Url::parse(endpoint).map_err(|e| {
        OAuthError::Transport(TransportError::ConnectionFailed {
            message: format!("invalid endpoint `{endpoint}`: {e}"),
        })
    })?;

    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errcode: i64,
    #[serde(default)]
    errmsg: String,
}

/// Decode a provider response body into `T`.
///
/// A non-zero `errcode` anywhere in the body is a provider failure regardless
/// of HTTP status. A non-2xx status without a provider error body, or a body
/// that is not valid JSON, is a transport failure.
pub fn decode_provider_body<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, OAuthError> {
    if let Ok(error) = serde_json::from_str::<ErrorBody>(&response.body) {
        if error.errcode != 0 {
            return Err(OAuthError::Provider(ProviderError {
                code: error.errcode,
                message: error.errmsg,
            }));
        }
    }

    if !(200..300).contains(&response.status) {
        return Err(OAuthError::Transport(TransportError::UnexpectedStatus {
            status: response.status,
        }));
    }

    serde_json::from_str(&response.body).map_err(|e| {
        OAuthError::Transport(TransportError::InvalidBody {
            message: e.to_string(),
        })
    })
}

/// GET a provider endpoint and decode its JSON body, applying merged request
/// options.
pub async fn get_json<T, H>(
    transport: &H,
    url: Url,
    options: &RequestOptions,
) -> Result<T, OAuthError>
where
    T: DeserializeOwned,
    H: HttpTransport + ?Sized,
{
    let mut options = options.clone();
    options
        .headers
        .entry("accept".to_string())
        .or_insert_with(|| "application/json".to_string());

    let request = HttpRequest {
        method: HttpMethod::Get,
        url: url.into(),
        headers: options.headers,
        timeout: options.timeout,
    };

    let response = transport.send(request).await?;
    decode_provider_body(&response)
}
