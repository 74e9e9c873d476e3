use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING};
use reqwest::Client;

const APP_USER_AGENT: &str = concat!("neoforge-meta/", env!("CARGO_PKG_VERSION"));

/// Client used for every request to the NeoForge maven.
///
/// Compression is disabled so the bytes hashed are the bytes published.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));

    Client::builder()
        .user_agent(APP_USER_AGENT)
        .default_headers(default_headers)
        .build()
}
