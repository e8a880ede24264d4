use http::header::{self, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use super::error::ApiError;

const OPENROUTER_HOST: &str = "openrouter.ai";
const APP_REFERER: &str = "https://github.com/raymondclowe/FozzieDesktop";
const APP_TITLE: &str = "FozzieDesktop";

/// True when `endpoint` points at the OpenRouter aggregator, which asks
/// clients to identify themselves with extra headers.
pub fn is_openrouter(endpoint: &str) -> bool {
    match Url::parse(endpoint) {
        Ok(url) => url
            .host_str()
            .map(|host| host == OPENROUTER_HOST || host.ends_with(&format!(".{}", OPENROUTER_HOST)))
            .unwrap_or(false),
        Err(_) => endpoint.contains(OPENROUTER_HOST),
    }
}

pub fn completions_url(endpoint: &str) -> String {
    format!("{}/chat/completions", endpoint.trim_end_matches('/'))
}

pub fn request_headers(endpoint: &str, api_key: &str) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|_| {
        ApiError::CommunicationFailure("API key contains characters not allowed in a header".to_string())
    })?;
    bearer.set_sensitive(true);
    headers.insert(header::AUTHORIZATION, bearer);

    if is_openrouter(endpoint) {
        headers.insert(
            HeaderName::from_static("http-referer"),
            HeaderValue::from_static(APP_REFERER),
        );
        headers.insert(
            HeaderName::from_static("x-title"),
            HeaderValue::from_static(APP_TITLE),
        );
    }
    Ok(headers)
}
