//! Thin HTTP wrapper over the four backend endpoints.
//!
//! Transport failures and unparseable bodies collapse into
//! `LoadError::Network`; an envelope with `success: false` becomes
//! `LoadError::Backend`. No local timeout is imposed — the transport's own
//! failure surfaces as a network error.

use serde::Serialize;
use tracing::debug;

use super::types::{decode_envelope, LoadError, Movie, Section};

/// JSON body for the recommendation endpoint.
#[derive(Debug, Serialize)]
struct RecommendRequest<'a> {
    genres: &'a [String],
}

/// Cloneable handle to the backend. `reqwest::Client` is internally
/// reference-counted, so clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("marquee/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { http, base_url })
    }

    /// GET one of the list sections.
    pub async fn fetch_section(&self, section: Section) -> Result<Vec<Movie>, LoadError> {
        let url = format!("{}{}", self.base_url, section.endpoint());
        debug!("GET {url}");
        let response = self.http.get(&url).send().await.map_err(|e| {
            tracing::warn!("Request to {url} failed: {e}");
            LoadError::Network
        })?;
        let body = response.bytes().await.map_err(|_| LoadError::Network)?;
        decode_envelope(&body)
    }

    /// POST the checked genres to the recommendation endpoint.
    pub async fn recommend(&self, genres: &[String]) -> Result<Vec<Movie>, LoadError> {
        let url = format!("{}{}", self.base_url, Section::Preference.endpoint());
        debug!("POST {url} genres={genres:?}");
        let response = self
            .http
            .post(&url)
            .json(&RecommendRequest { genres })
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Request to {url} failed: {e}");
                LoadError::Network
            })?;
        let body = response.bytes().await.map_err(|_| LoadError::Network)?;
        decode_envelope(&body)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    use super::*;

    /// One-shot HTTP stub on a loopback port: accepts a single connection,
    /// captures the raw request, and answers with the given body.
    fn stub_server(response_body: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let addr = listener.local_addr().expect("local addr");
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            // Read headers, then exactly Content-Length body bytes.
            let body_len = loop {
                let n = stream.read(&mut buf).expect("read request");
                raw.extend_from_slice(&buf[..n]);
                if let Some(split) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&raw[..split]).to_lowercase();
                    let len = head
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    break (split + 4, len);
                }
            };
            while raw.len() < body_len.0 + body_len.1 {
                let n = stream.read(&mut buf).expect("read body");
                raw.extend_from_slice(&buf[..n]);
            }
            tx.send(String::from_utf8_lossy(&raw).into_owned()).ok();

            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                response_body.len(),
                response_body
            );
            stream.write_all(response.as_bytes()).expect("write response");
        });

        (format!("http://{addr}"), rx)
    }

    #[tokio::test]
    async fn fetch_section_hits_the_section_endpoint() {
        let (base, requests) = stub_server(
            r#"{"success": true, "movies": [{"title": "Heat"}, {"title": "Ronin"}]}"#,
        );
        let client = ApiClient::new(base).expect("client");

        let movies = client.fetch_section(Section::Hot).await.expect("movies");
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title, "Heat");

        let request = requests.recv().expect("captured request");
        assert!(request.starts_with("GET /api/movies/hot HTTP/1.1"));
    }

    #[tokio::test]
    async fn recommend_posts_genres_as_json() {
        let (base, requests) = stub_server(r#"{"success": true, "movies": []}"#);
        let client = ApiClient::new(base).expect("client");

        let genres = vec!["Action".to_string(), "Comedy".to_string()];
        let movies = client.recommend(&genres).await.expect("movies");
        assert!(movies.is_empty());

        let request = requests.recv().expect("captured request");
        assert!(request.starts_with("POST /api/movies/recommend HTTP/1.1"));
        assert!(request.to_lowercase().contains("content-type: application/json"));
        assert!(request.ends_with(r#"{"genres":["Action","Comedy"]}"#));
    }

    #[tokio::test]
    async fn backend_refusal_maps_to_backend_error() {
        let (base, _requests) = stub_server(r#"{"success": false, "error": "quota"}"#);
        let client = ApiClient::new(base).expect("client");
        let result = client.fetch_section(Section::Daily).await;
        assert_eq!(result.unwrap_err(), LoadError::Backend);
    }

    #[tokio::test]
    async fn unreachable_backend_maps_to_network_error() {
        // Bind-then-drop guarantees a port nothing is listening on.
        let port = {
            let l = TcpListener::bind("127.0.0.1:0").expect("bind");
            l.local_addr().expect("addr").port()
        };
        let client = ApiClient::new(format!("http://127.0.0.1:{port}")).expect("client");
        let result = client.fetch_section(Section::Daily).await;
        assert_eq!(result.unwrap_err(), LoadError::Network);
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let client = ApiClient::new("http://example.test/").expect("client");
        assert_eq!(client.base_url, "http://example.test");
    }
}
