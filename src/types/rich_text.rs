use serde::{Deserialize, Serialize};

/// The kind of rich text content.
///
/// Each variant carries its specific data: an equation always has an
/// expression, a link always has a URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RichTextType {
    Text { content: String, link: Option<Link> },
    /// Page, user, date and other mentions; rendered from `plain_text`.
    Mention,
    Equation { expression: String },
}

/// Rich text item with formatting annotations.
///
/// `plain_text` is the fallback rendering for any variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextItem {
    pub text_type: RichTextType,
    pub annotations: Annotations,
    pub plain_text: String,
    pub href: Option<String>,
}

impl RichTextItem {
    /// Create a plain text item.
    pub fn plain_text(text: &str) -> Self {
        Self {
            text_type: RichTextType::Text {
                content: text.to_string(),
                link: None,
            },
            annotations: Annotations::default(),
            plain_text: text.to_string(),
            href: None,
        }
    }

    /// Create a text item linking to `url`.
    pub fn link(text: &str, url: &str) -> Self {
        Self {
            text_type: RichTextType::Text {
                content: text.to_string(),
                link: Some(Link {
                    url: url.to_string(),
                }),
            },
            annotations: Annotations::default(),
            plain_text: text.to_string(),
            href: Some(url.to_string()),
        }
    }

    /// Returns a copy with the given annotations applied.
    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
}

/// Concatenates the plain text of a rich text run.
pub fn plain_text_of(items: &[RichTextItem]) -> String {
    items.iter().map(|item| item.plain_text.as_str()).collect()
}
