use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::platform::io::{content_type_from_ext, load_local_file};
use crate::platform::network;

/// Raw avatar bytes and their MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarData {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl AvatarData {
    /// `data:<type>;base64,...`
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.bytes))
    }
}

/// Where an avatar reference points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarSource<'a> {
    /// `data:` URI, decoded in-process
    Inline(&'a str),
    /// http(s) URL
    Remote(&'a str),
    Local(PathBuf),
}

impl<'a> AvatarSource<'a> {
    pub fn classify(reference: &'a str) -> AvatarSource<'a> {
        let reference = reference.trim();
        let lower = reference.to_ascii_lowercase();
        if lower.starts_with("data:") {
            return AvatarSource::Inline(reference);
        }
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return AvatarSource::Remote(reference);
        }
        if lower.starts_with("file:")
            && let Ok(url) = Url::parse(reference)
            && let Ok(path) = url.to_file_path()
        {
            return AvatarSource::Local(path);
        }
        // C:\... のような 1 文字スキームも含めてローカルパス扱い
        AvatarSource::Local(PathBuf::from(reference))
    }
}

/// Resolves an avatar reference to bytes.
///
/// Remote references must answer with a 2xx status. Every failure,
/// including a missing local file, is `AvatarFetchFailed`.
pub fn fetch_avatar(reference: &str) -> Result<AvatarData> {
    let source = AvatarSource::classify(reference);
    debug!("avatar source: {source:?}");
    match source {
        AvatarSource::Inline(uri) => decode_data_uri(uri),
        AvatarSource::Remote(url) => fetch_remote(url),
        AvatarSource::Local(path) => read_local(&path),
    }
}

fn fetch_remote(url: &str) -> Result<AvatarData> {
    let resp = network::fetch(url).map_err(|e| Error::AvatarFetchFailed(format!("{url}: {e}")))?;
    if !resp.status.is_success() {
        return Err(Error::AvatarFetchFailed(format!(
            "{url}: {} {}",
            resp.status.as_u16(),
            resp.reason_phrase
        )));
    }
    let content_type = resp
        .header("content-type")
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);
    Ok(with_content_type(resp.body, content_type))
}

fn read_local(path: &Path) -> Result<AvatarData> {
    let bytes = load_local_file(path)
        .map_err(|e| Error::AvatarFetchFailed(format!("{}: {e}", path.display())))?;
    let content_type = content_type_from_ext(path).map(str::to_string);
    Ok(with_content_type(bytes, content_type))
}

/// `data:[<type>][;base64],<payload>`
fn decode_data_uri(uri: &str) -> Result<AvatarData> {
    let fail = |reason: &str| Error::AvatarFetchFailed(format!("bad data URI: {reason}"));

    let rest = &uri["data:".len()..];
    let (meta, payload) = rest.split_once(',').ok_or_else(|| fail("missing ','"))?;
    let (media_type, is_base64) = match meta.strip_suffix(";base64") {
        Some(media_type) => (media_type, true),
        None => (meta, false),
    };

    let bytes = if is_base64 {
        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        STANDARD
            .decode(compact)
            .map_err(|e| fail(&e.to_string()))?
    } else {
        payload.as_bytes().to_vec()
    };

    // パラメータ (;charset=...) は落とす
    let media_type = media_type.split(';').next().unwrap_or("").trim();
    let content_type = (!media_type.is_empty()).then(|| media_type.to_string());
    Ok(with_content_type(bytes, content_type))
}

fn with_content_type(bytes: Vec<u8>, content_type: Option<String>) -> AvatarData {
    let content_type = content_type.unwrap_or_else(|| sniff_content_type(&bytes).to_string());
    AvatarData {
        bytes,
        content_type,
    }
}

/// MIME type guessed from magic bytes
pub fn sniff_content_type(bytes: &[u8]) -> &'static str {
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type();
    }
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(256)]).to_ascii_lowercase();
    let head = head.trim_start();
    if head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg")) {
        "image/svg+xml"
    } else {
        "application/octet-stream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn classifies_references() {
        assert_eq!(
            AvatarSource::classify(" data:image/png;base64,AAAA "),
            AvatarSource::Inline("data:image/png;base64,AAAA")
        );
        assert_eq!(
            AvatarSource::classify("HTTPS://example.com/a.png"),
            AvatarSource::Remote("HTTPS://example.com/a.png")
        );
        assert_eq!(
            AvatarSource::classify("./me.png"),
            AvatarSource::Local(PathBuf::from("./me.png"))
        );
        assert_eq!(
            AvatarSource::classify(r"C:\Users\me\a.png"),
            AvatarSource::Local(PathBuf::from(r"C:\Users\me\a.png"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn file_urls_become_paths() {
        assert_eq!(
            AvatarSource::classify("file:///tmp/a%20b.png"),
            AvatarSource::Local(PathBuf::from("/tmp/a b.png"))
        );
    }

    #[test]
    fn decodes_base64_data_uri() {
        let uri = format!("data:image/png;base64,{}", STANDARD.encode(PNG_MAGIC));
        let avatar = fetch_avatar(&uri).unwrap();
        assert_eq!(avatar.bytes, PNG_MAGIC);
        assert_eq!(avatar.content_type, "image/png");
        assert_eq!(avatar.to_data_uri(), uri);
    }

    #[test]
    fn plain_data_uri_without_type_is_sniffed() {
        let avatar = fetch_avatar("data:,<svg xmlns='http://www.w3.org/2000/svg'/>").unwrap();
        assert_eq!(avatar.content_type, "image/svg+xml");
        assert!(avatar.bytes.starts_with(b"<svg"));
    }

    #[test]
    fn malformed_data_uri_fails() {
        assert!(matches!(fetch_avatar("data:image/png;base64"), Err(Error::AvatarFetchFailed(_))));
        assert!(matches!(
            fetch_avatar("data:image/png;base64,@@@"),
            Err(Error::AvatarFetchFailed(_))
        ));
    }

    #[test]
    fn local_file_uses_extension_then_magic() {
        let dir = std::env::temp_dir();
        let named = dir.join(format!("xpost-avatar-{}.gif", std::process::id()));
        let unnamed = dir.join(format!("xpost-avatar-{}", std::process::id()));
        std::fs::write(&named, PNG_MAGIC).unwrap();
        std::fs::write(&unnamed, PNG_MAGIC).unwrap();

        let by_ext = fetch_avatar(named.to_str().unwrap()).unwrap();
        let by_magic = fetch_avatar(unnamed.to_str().unwrap()).unwrap();
        let _ = std::fs::remove_file(&named);
        let _ = std::fs::remove_file(&unnamed);

        assert_eq!(by_ext.content_type, "image/gif");
        assert_eq!(by_magic.content_type, "image/png");
    }

    #[test]
    fn missing_local_file_is_a_fetch_failure() {
        assert!(matches!(
            fetch_avatar("/no/such/avatar.png"),
            Err(Error::AvatarFetchFailed(msg)) if msg.contains("/no/such/avatar.png")
        ));
    }

    #[test]
    fn non_success_status_is_a_fetch_failure() {
        use std::io::{Read, Write};
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(
                    b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                );
            }
        });
        let err = fetch_avatar(&format!("http://{addr}/a.png")).unwrap_err();
        assert!(matches!(err, Error::AvatarFetchFailed(msg) if msg.contains("503")));
    }

    #[test]
    fn sniffing() {
        assert_eq!(sniff_content_type(PNG_MAGIC), "image/png");
        assert_eq!(sniff_content_type(b"GIF89a...."), "image/gif");
        assert_eq!(sniff_content_type(b"<?xml version='1.0'?><svg/>"), "image/svg+xml");
        assert_eq!(sniff_content_type(b"hello"), "application/octet-stream");
    }
}
