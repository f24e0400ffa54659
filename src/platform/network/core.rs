use super::{NetworkConfig, NetworkError};

use http_body_util::{BodyExt, Empty};
use hyper::{
    Method, Request, StatusCode, Uri,
    body::{Bytes, Incoming},
    client::conn::{self, http1::SendRequest},
    http::uri::Scheme,
};
use hyper_util::rt::TokioIo;
use log::debug;
use rustls::{ClientConfig, RootCertStore};
use rustls_native_certs::load_native_certs;
use std::sync::Arc;
use tokio::{net::TcpStream, runtime::Runtime, task::LocalSet};
use tokio_rustls::TlsConnector;

/// 呼び出し元スレッドで完結する blocking クライアント
pub(super) struct AsyncNetworkCore {
    local: LocalSet,
    rt: Runtime,
    inner: NetworkInner,
}

impl AsyncNetworkCore {
    pub fn new(config: NetworkConfig) -> Result<Self, NetworkError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|_| NetworkError::RuntimeUnavailable)?;

        Ok(Self {
            rt,
            local: LocalSet::new(),
            inner: NetworkInner::new(config),
        })
    }

    pub fn fetch_blocking(&self, url: &str) -> Result<Response, NetworkError> {
        let limit = self.inner.network_config.timeout;
        self.local.block_on(&self.rt, async {
            tokio::time::timeout(limit, self.inner.fetch_url(url))
                .await
                .map_err(|_| NetworkError::Timeout)?
        })
    }
}

/// HTTP response
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub reason_phrase: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    /// First header named `name`, case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

struct NetworkInner {
    tls_config: Arc<ClientConfig>,
    network_config: NetworkConfig,
}

impl NetworkInner {
    fn new(network_config: NetworkConfig) -> Self {
        Self {
            tls_config: Arc::new(Self::build_tls_config()),
            network_config,
        }
    }

    fn build_tls_config() -> ClientConfig {
        let mut roots = RootCertStore::empty();
        let result = load_native_certs();

        for cert in result.certs {
            let _ = roots.add(cert);
        }

        ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth()
    }

    async fn fetch_url(&self, url: &str) -> Result<Response, NetworkError> {
        let mut current: Uri = url.parse().map_err(|_| NetworkError::InvalidUri)?;
        let mut redirects = 0usize;

        loop {
            let resp = self.send_request(&current).await?;

            if self.network_config.follow_redirects
                && resp.status.is_redirection()
                && let Some(loc) = resp.header("location")
            {
                if redirects >= self.network_config.max_redirects {
                    return Err(NetworkError::TooManyRedirects);
                }
                current = resolve_redirect(&current, loc)?;
                redirects += 1;
                debug!("redirect {redirects} -> {current}");
                continue;
            }

            return Ok(resp);
        }
    }

    async fn send_request(&self, uri: &Uri) -> Result<Response, NetworkError> {
        let host = uri.host().ok_or(NetworkError::MissingHost)?;
        let scheme = uri.scheme().ok_or(NetworkError::UnsupportedScheme)?;
        let port = if scheme == &Scheme::HTTPS {
            uri.port_u16().unwrap_or(443)
        } else if scheme == &Scheme::HTTP {
            uri.port_u16().unwrap_or(80)
        } else {
            return Err(NetworkError::UnsupportedScheme);
        };

        let mut sender = self.create_connection(scheme, host, port).await?;

        let authority = uri.authority().map(|a| a.as_str()).unwrap_or(host);
        let req = Request::builder()
            .method(Method::GET)
            .uri(uri.path_and_query().map(|p| p.as_str()).unwrap_or("/"))
            .header("Host", authority)
            .header("User-Agent", self.network_config.user_agent.as_str())
            .header("Accept", "image/*, */*;q=0.8")
            .body(Empty::<Bytes>::new())
            .map_err(|_| NetworkError::HttpRequestFailed)?;

        let mut res = sender
            .send_request(req)
            .await
            .map_err(|_| NetworkError::HttpRequestFailed)?;

        Self::collect_response(&mut res).await
    }

    async fn collect_response(
        res: &mut hyper::Response<Incoming>,
    ) -> Result<Response, NetworkError> {
        let status = res.status();
        let reason_phrase = status.canonical_reason().unwrap_or("").to_string();

        let headers = res
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        let mut body = Vec::new();
        while let Some(frame) = res.frame().await {
            let frame = frame.map_err(|_| NetworkError::HttpResponseFailed)?;
            if let Some(chunk) = frame.data_ref() {
                body.extend_from_slice(chunk);
            }
        }

        Ok(Response {
            status,
            reason_phrase,
            headers,
            body,
        })
    }

    async fn create_connection(
        &self,
        scheme: &Scheme,
        host: &str,
        port: u16,
    ) -> Result<SendRequest<Empty<Bytes>>, NetworkError> {
        let stream = TcpStream::connect((host, port))
            .await
            .map_err(|_| NetworkError::ConnectionFailed)?;

        if scheme == &Scheme::HTTPS {
            let tls = TlsConnector::from(self.tls_config.clone());
            let domain = rustls::pki_types::ServerName::try_from(host.to_string())
                .map_err(|_| NetworkError::InvalidDnsName)?;

            let stream = tls
                .connect(domain, stream)
                .await
                .map_err(|_| NetworkError::TlsFailed)?;

            let (sender, conn) = conn::http1::handshake(TokioIo::new(stream))
                .await
                .map_err(|_| NetworkError::HttpHandshakeFailed)?;

            spawn_connection_task(conn);
            Ok(sender)
        } else {
            let (sender, conn) = conn::http1::handshake(TokioIo::new(stream))
                .await
                .map_err(|_| NetworkError::HttpHandshakeFailed)?;

            spawn_connection_task(conn);
            Ok(sender)
        }
    }
}

fn spawn_connection_task(
    conn: conn::http1::Connection<
        TokioIo<impl tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin + 'static>,
        Empty<Bytes>,
    >,
) {
    tokio::task::spawn_local(async move {
        if let Err(e) = conn.await {
            debug!("connection closed with error: {e}");
        }
    });
}

pub(super) fn resolve_redirect(base: &Uri, location: &str) -> Result<Uri, NetworkError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        return location.parse().map_err(|_| NetworkError::InvalidUri);
    }

    let scheme = base.scheme_str().unwrap_or("https");
    let authority = base.authority().ok_or(NetworkError::InvalidUri)?;

    let next = if location.starts_with("//") {
        format!("{scheme}:{location}")
    } else if location.starts_with('/') {
        format!("{scheme}://{}{location}", authority)
    } else {
        let base_path = base.path();
        let prefix = base_path.rsplit_once('/').map(|x| x.0).unwrap_or("");
        format!("{scheme}://{}{prefix}/{location}", authority)
    };

    next.parse().map_err(|_| NetworkError::InvalidUri)
}
