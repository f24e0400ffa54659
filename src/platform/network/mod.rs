//! Blocking HTTP(S) GET on top of hyper.
//!
//! Each client owns a current-thread tokio runtime, so a fetch runs to
//! completion on the calling thread. One connection per request; there is
//! no pooling or caching.

pub mod config;
mod core;
pub mod error;

// 外部公開用
pub use config::NetworkConfig;
pub use self::core::Response;
pub use error::NetworkError;
pub use hyper::http::StatusCode;

use self::core::AsyncNetworkCore;

pub struct HttpClient {
    core: AsyncNetworkCore,
}

impl HttpClient {
    pub fn new(config: NetworkConfig) -> Result<Self, NetworkError> {
        Ok(Self {
            core: AsyncNetworkCore::new(config)?,
        })
    }

    /// GET `url`, following redirects per the config. Any status is returned as-is.
    pub fn get(&self, url: &str) -> Result<Response, NetworkError> {
        self.core.fetch_blocking(url)
    }
}

/// One-off GET with the default config
pub fn fetch(url: &str) -> Result<Response, NetworkError> {
    HttpClient::new(NetworkConfig::default())?.get(url)
}

#[cfg(test)]
mod tests {
    use super::core::resolve_redirect;
    use super::*;
    use hyper::Uri;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    /// 受け付けた順に `responses` を返すだけのサーバー
    fn serve(responses: Vec<String>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            for response in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut chunk) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}")
    }

    fn ok(body: &str) -> String {
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    fn redirect(to: &str) -> String {
        format!("HTTP/1.1 302 Found\r\nLocation: {to}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
    }

    #[test]
    fn fetches_body_and_headers() {
        let base = serve(vec![ok("PIXELS")]);
        let resp = fetch(&format!("{base}/a.png")).unwrap();
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.header("content-type"), Some("image/png"));
        assert_eq!(resp.body, b"PIXELS");
    }

    #[test]
    fn follows_relative_redirects() {
        let base = serve(vec![redirect("/b.png"), ok("B")]);
        let resp = fetch(&format!("{base}/a.png")).unwrap();
        assert_eq!(resp.body, b"B");
    }

    #[test]
    fn error_statuses_are_returned_not_raised() {
        let base = serve(vec![
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string(),
        ]);
        let resp = fetch(&base).unwrap();
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert_eq!(resp.reason_phrase, "Not Found");
    }

    #[test]
    fn redirect_limit_is_enforced() {
        let base = serve(vec![redirect("/1"), redirect("/2"), redirect("/3")]);
        let client = HttpClient::new(NetworkConfig {
            max_redirects: 2,
            timeout: Duration::from_secs(5),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.get(&base).unwrap_err(), NetworkError::TooManyRedirects);
    }

    #[test]
    fn rejects_non_http_urls() {
        assert_eq!(fetch("ftp://example.com/a.png").unwrap_err(), NetworkError::UnsupportedScheme);
        assert_eq!(fetch("not a url").unwrap_err(), NetworkError::InvalidUri);
    }

    #[test]
    fn redirect_resolution() {
        let base: Uri = "https://example.com/img/a.png".parse().unwrap();
        let cases = [
            ("https://cdn.example.com/x.png", "https://cdn.example.com/x.png"),
            ("//cdn.example.com/x.png", "https://cdn.example.com/x.png"),
            ("/x.png", "https://example.com/x.png"),
            ("x.png", "https://example.com/img/x.png"),
        ];
        for (location, expected) in cases {
            assert_eq!(resolve_redirect(&base, location).unwrap().to_string(), expected);
        }
    }
}
