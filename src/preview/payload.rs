use serde::Deserialize;

use crate::engine::content::ContentRecord;
use crate::engine::options::{RenderOptions, WidthMode};
use crate::error::{Error, Result};

/// JSON request body, as sent by the web front end
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderPayload {
    pub text: String,
    pub name: String,
    pub handle: String,
    pub verified: bool,
    pub avatar_url: String,
    pub date: String,
    pub like_count: String,
    pub cta: String,
    /// `tight`, anything else is fixed
    pub width: String,
    /// `simple`, anything else is the classic card
    pub mode: String,
}

impl RenderPayload {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Trimmed content and default options with the requested width mode
    pub fn into_render_input(self) -> Result<(ContentRecord, RenderOptions)> {
        let content = ContentRecord {
            text: self.text.trim().to_string(),
            name: self.name.trim().to_string(),
            handle: self.handle.trim().to_string(),
            avatar: non_empty(&self.avatar_url),
            date: non_empty(&self.date),
            location: None,
            cta: non_empty(&self.cta),
            verified: self.verified,
            simple: self.mode.trim().eq_ignore_ascii_case("simple"),
            like_count: self.like_count.trim().to_string(),
        };
        content.validate()?;

        let options = RenderOptions {
            width_mode: WidthMode::from_name(&self.width),
            ..Default::default()
        };
        Ok((content, options))
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl std::str::FromStr for RenderPayload {
    type Err = Error;

    fn from_str(json: &str) -> Result<Self> {
        Self::from_json(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_camel_case_fields() {
        let payload: RenderPayload = r#"{
            "text": "  Hello  ",
            "name": "Ann Lee",
            "handle": "annlee",
            "verified": true,
            "avatarUrl": " https://example.com/a.png ",
            "likeCount": "12",
            "cta": "   ",
            "width": "TIGHT",
            "mode": "simple"
        }"#
        .parse()
        .unwrap();
        let (content, options) = payload.into_render_input().unwrap();

        assert_eq!(content.text, "Hello");
        assert_eq!(content.avatar.as_deref(), Some("https://example.com/a.png"));
        assert_eq!(content.like_count, "12");
        assert_eq!(content.cta, None);
        assert_eq!(content.date, None);
        assert!(content.verified);
        assert!(content.simple);
        assert_eq!(options.width_mode, WidthMode::Tight);
        assert_eq!(options.width, 960);
    }

    #[test]
    fn unknown_width_and_mode_fall_back() {
        let payload = RenderPayload::from_json(
            r#"{"text":"a","name":"b","handle":"c","width":"wide","mode":"fancy"}"#,
        )
        .unwrap();
        let (content, options) = payload.into_render_input().unwrap();
        assert!(!content.simple);
        assert_eq!(options.width_mode, WidthMode::Fixed);
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        let payload = RenderPayload::from_json(r#"{"text":"  ","name":"b","handle":"c"}"#).unwrap();
        assert!(matches!(
            payload.into_render_input(),
            Err(Error::MissingRequiredField("text"))
        ));
    }

    #[test]
    fn broken_json_is_invalid_payload() {
        assert!(matches!(
            RenderPayload::from_json("{\"text\": 1"),
            Err(Error::InvalidPayload(_))
        ));
    }
}
