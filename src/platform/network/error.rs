#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    // Request / protocol
    InvalidUri,
    MissingHost,
    UnsupportedScheme,
    InvalidDnsName,

    // Transport
    ConnectionFailed,
    TlsFailed,
    Timeout,

    // HTTP
    HttpHandshakeFailed,
    HttpRequestFailed,
    HttpResponseFailed,
    TooManyRedirects,

    // Infrastructure
    RuntimeUnavailable,
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use NetworkError::*;
        let msg = match self {
            InvalidUri => "invalid URI",
            MissingHost => "URI has no host",
            UnsupportedScheme => "only http and https are supported",
            InvalidDnsName => "invalid DNS name",

            ConnectionFailed => "connection failed",
            TlsFailed => "TLS handshake failed",
            Timeout => "network timeout",

            HttpHandshakeFailed => "HTTP handshake failed",
            HttpRequestFailed => "HTTP request failed",
            HttpResponseFailed => "HTTP response failed",
            TooManyRedirects => "too many redirects",

            RuntimeUnavailable => "async runtime could not be started",
        };
        write!(f, "{msg}")
    }
}

impl std::error::Error for NetworkError {}
