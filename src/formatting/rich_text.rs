// src/formatting/rich_text.rs
//! Renders rich text runs as inline Markdown.

use crate::types::{Annotations, RichTextItem, RichTextType};

/// Formats an array of rich text items into inline Markdown.
pub fn rich_text_to_markdown(items: &[RichTextItem]) -> String {
    items.iter().map(render_item).collect()
}

fn render_item(item: &RichTextItem) -> String {
    match &item.text_type {
        RichTextType::Equation { expression } => format!("${}$", expression),
        RichTextType::Text { content, link } => {
            let url = link.as_ref().map(|l| l.url.as_str()).or(item.href.as_deref());
            style(content, &item.annotations, url)
        }
        RichTextType::Mention => style(&item.plain_text, &item.annotations, item.href.as_deref()),
    }
}

/// Applies annotations, then the link, to a piece of text.
fn style(text: &str, annotations: &Annotations, link: Option<&str>) -> String {
    let mut result = text.to_string();

    if annotations.code {
        result = wrap(&result, "`");
    }
    if annotations.strikethrough {
        result = wrap(&result, "~~");
    }
    if annotations.bold {
        result = wrap(&result, "**");
    }
    if annotations.italic {
        result = wrap(&result, "*");
    }

    match link {
        Some(url) if !text.is_empty() => format!("[{}]({})", result, url),
        _ => result,
    }
}

/// Wraps text in a marker, keeping surrounding whitespace outside it
/// (`** bold**` is not bold in Markdown).
fn wrap(text: &str, marker: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return text.to_string();
    }
    let leading = &text[..text.len() - text.trim_start().len()];
    let trailing = &text[text.trim_end().len()..];
    format!("{}{}{}{}{}", leading, marker, trimmed, marker, trailing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn annotated(text: &str, f: impl FnOnce(&mut Annotations)) -> RichTextItem {
        let mut annotations = Annotations::default();
        f(&mut annotations);
        RichTextItem::plain_text(text).with_annotations(annotations)
    }

    #[test]
    fn applies_each_annotation() {
        let items = vec![
            RichTextItem::plain_text("plain "),
            annotated("bold", |a| a.bold = true),
            RichTextItem::plain_text(" "),
            annotated("italic", |a| a.italic = true),
            RichTextItem::plain_text(" "),
            annotated("gone", |a| a.strikethrough = true),
            RichTextItem::plain_text(" "),
            annotated("x = 1", |a| a.code = true),
        ];
        assert_eq!(
            rich_text_to_markdown(&items),
            "plain **bold** *italic* ~~gone~~ `x = 1`"
        );
    }

    #[test]
    fn keeps_whitespace_outside_markers() {
        let items = vec![annotated(" spaced ", |a| a.bold = true)];
        assert_eq!(rich_text_to_markdown(&items), " **spaced** ");
    }

    #[test]
    fn combines_annotations_and_links() {
        let item = RichTextItem::link("docs", "https://example.com").with_annotations(Annotations {
            bold: true,
            italic: true,
            ..Default::default()
        });
        assert_eq!(
            rich_text_to_markdown(&[item]),
            "[***docs***](https://example.com)"
        );
    }

    #[test]
    fn renders_inline_equations_and_mentions() {
        let equation = RichTextItem {
            text_type: RichTextType::Equation {
                expression: "e^{i\\pi}".to_string(),
            },
            annotations: Annotations::default(),
            plain_text: "e^{i\\pi}".to_string(),
            href: None,
        };
        let mention = RichTextItem {
            text_type: RichTextType::Mention,
            annotations: Annotations::default(),
            plain_text: "Other page".to_string(),
            href: Some("https://www.notion.so/abc".to_string()),
        };
        assert_eq!(
            rich_text_to_markdown(&[equation, RichTextItem::plain_text(" "), mention]),
            "$e^{i\\pi}$ [Other page](https://www.notion.so/abc)"
        );
    }
}
