use crate::engine::icons::IconName;
use crate::error::{Error, Result};

/// The post being previewed. Immutable for the duration of a render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentRecord {
    pub text: String,
    /// Local path, http(s) URL or `data:` URI
    pub avatar: Option<String>,
    pub name: String,
    pub handle: String,
    pub date: Option<String>,
    pub location: Option<String>,
    /// Call-to-action pill label
    pub cta: Option<String>,
    pub verified: bool,
    /// Compact mode: header and body only
    pub simple: bool,
    pub like_count: String,
}

impl ContentRecord {
    pub fn new(text: impl Into<String>, name: impl Into<String>, handle: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            name: name.into(),
            handle: handle.into(),
            ..Default::default()
        }
    }

    /// Body text, name and handle must be non-blank.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(Error::MissingRequiredField("text"));
        }
        if self.name.trim().is_empty() {
            return Err(Error::MissingRequiredField("name"));
        }
        if self.handle.trim().is_empty() {
            return Err(Error::MissingRequiredField("handle"));
        }
        Ok(())
    }

    pub fn avatar_ref(&self) -> Option<&str> {
        non_blank(&self.avatar)
    }

    pub fn cta_label(&self) -> Option<&str> {
        non_blank(&self.cta)
    }

    pub fn handle_line(&self) -> String {
        normalize_handle(&self.handle)
    }

    /// `date · location`, whichever parts are present. Empty when neither is.
    pub fn date_line(&self) -> String {
        [non_blank(&self.date), non_blank(&self.location)]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" · ")
    }

    /// The three footer actions, always in this order.
    pub fn actions(&self) -> [(IconName, String); 3] {
        let likes = match self.like_count.trim() {
            "" => "0",
            count => count,
        };
        [
            (IconName::Like, likes.to_string()),
            (IconName::Reply, "Reply".to_string()),
            (IconName::Link, "Copy link".to_string()),
        ]
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// `annlee` -> `@annlee`. Already-prefixed and blank handles pass through trimmed.
pub fn normalize_handle(handle: &str) -> String {
    let trimmed = handle.trim();
    if trimmed.is_empty() || trimmed.starts_with('@') {
        trimmed.to_string()
    } else {
        format!("@{trimmed}")
    }
}

/// Avatar placeholder text
pub fn initials(name: &str) -> String {
    let mut words = name.split_whitespace();
    let Some(first) = words.next() else {
        return "?".to_string();
    };
    match words.next() {
        Some(second) => first.chars().take(1).chain(second.chars().take(1)).collect(),
        None => first.chars().take(2).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_gets_single_at_prefix() {
        assert_eq!(normalize_handle("annlee"), "@annlee");
        assert_eq!(normalize_handle("  @annlee "), "@annlee");
        assert_eq!(normalize_handle("   "), "");
    }

    #[test]
    fn initials_cover_one_and_many_words() {
        assert_eq!(initials("Ann Lee"), "AL");
        assert_eq!(initials("Madonna"), "Ma");
        assert_eq!(initials("X"), "X");
        assert_eq!(initials("山田 太郎"), "山太");
        assert_eq!(initials("  "), "?");
    }

    #[test]
    fn date_line_joins_present_parts() {
        let mut c = ContentRecord::new("t", "n", "h");
        assert_eq!(c.date_line(), "");
        c.location = Some("Tokyo".into());
        assert_eq!(c.date_line(), "Tokyo");
        c.date = Some("3:14 PM · Jan 1, 2025".into());
        assert_eq!(c.date_line(), "3:14 PM · Jan 1, 2025 · Tokyo");
        c.location = Some("   ".into());
        assert_eq!(c.date_line(), "3:14 PM · Jan 1, 2025");
    }

    #[test]
    fn like_label_defaults_to_zero() {
        let mut c = ContentRecord::new("t", "n", "h");
        assert_eq!(c.actions()[0], (IconName::Like, "0".to_string()));
        c.like_count = " 1.2K ".into();
        let actions = c.actions();
        assert_eq!(actions[0].1, "1.2K");
        assert_eq!(actions[1], (IconName::Reply, "Reply".to_string()));
        assert_eq!(actions[2], (IconName::Link, "Copy link".to_string()));
    }

    #[test]
    fn validation_names_the_missing_field() {
        assert!(ContentRecord::new("Hello", "Ann Lee", "annlee").validate().is_ok());
        assert!(matches!(
            ContentRecord::new(" ", "Ann", "ann").validate(),
            Err(Error::MissingRequiredField("text"))
        ));
        assert!(matches!(
            ContentRecord::new("Hi", "", "ann").validate(),
            Err(Error::MissingRequiredField("name"))
        ));
        assert!(matches!(
            ContentRecord::new("Hi", "Ann", "").validate(),
            Err(Error::MissingRequiredField("handle"))
        ));
    }

    #[test]
    fn blank_cta_is_absent() {
        let mut c = ContentRecord::new("t", "n", "h");
        c.cta = Some("   ".into());
        assert_eq!(c.cta_label(), None);
        c.cta = Some(" Read 16K replies ".into());
        assert_eq!(c.cta_label(), Some("Read 16K replies"));
    }
}
