//! Markup backends.
//!
//! Both outputs are built with plain string formatting. Anything that
//! came from the caller goes through [`escape`] first.

pub mod html;
pub mod svg;

pub use html::render_html;
pub use svg::render_svg;

/// Escapes `& < > " '` for text and attribute positions
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape("a < b && \"c\" > 'd'"), "a &lt; b &amp;&amp; &#34;c&#34; &gt; &#39;d&#39;");
        assert_eq!(escape("日本語"), "日本語");
    }
}
