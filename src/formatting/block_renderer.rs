// src/formatting/block_renderer.rs
//! Block rendering engine: converts Notion blocks to Markdown.
//!
//! [`BlockRenderer`] is the seam for custom rendering. Implementors handle
//! the block types they care about and delegate everything else to
//! [`render_default`], which recurses back through the implementor so that
//! custom rendering also applies to nested blocks.

use super::rich_text::rich_text_to_markdown;
use crate::constants::CHARS_PER_BLOCK_ESTIMATE;
use crate::error::AppError;
use crate::model::*;
use crate::output::markdown_file_name;
use std::fmt::Write;

/// Indentation applied per level of list nesting.
const LIST_INDENT: &str = "  ";

/// Position of a block within its list structure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatContext {
    /// How many list items enclose the block.
    pub list_depth: usize,
    /// Number of a numbered list item within its run of siblings.
    pub list_number: usize,
}

impl FormatContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn enter_list(self) -> Self {
        Self {
            list_depth: self.list_depth + 1,
            list_number: 0,
        }
    }

    fn at_list_number(self, list_number: usize) -> Self {
        Self {
            list_number,
            ..self
        }
    }
}

/// Trait for formatting blocks into Markdown.
pub trait BlockRenderer {
    /// Render a block together with its children.
    fn render_block(&self, block: &Block, context: FormatContext) -> Result<String, AppError>;

    /// Render a run of sibling blocks.
    ///
    /// Numbered items count up within an uninterrupted run; a top-level run
    /// of list items is closed by a blank line.
    fn render_children(&self, blocks: &[Block], context: FormatContext) -> Result<String, AppError> {
        let mut output = String::with_capacity(blocks.len() * CHARS_PER_BLOCK_ESTIMATE);
        let mut number = 0;

        for (i, block) in blocks.iter().enumerate() {
            number = match block {
                Block::NumberedListItem(_) => number + 1,
                _ => 0,
            };
            output.push_str(&self.render_block(block, context.at_list_number(number))?);

            let closes_list =
                is_list_like(block) && !blocks.get(i + 1).is_some_and(is_list_like);
            if closes_list && context.list_depth == 0 {
                output.push('\n');
            }
        }

        Ok(output)
    }
}

/// The default Markdown renderer with no customizations.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownBlockRenderer;

impl BlockRenderer for MarkdownBlockRenderer {
    fn render_block(&self, block: &Block, context: FormatContext) -> Result<String, AppError> {
        render_default(self, block, context)
    }
}

/// Renders a slice of blocks with the default renderer.
pub fn render_blocks(blocks: &[Block]) -> Result<String, AppError> {
    MarkdownBlockRenderer.render_children(blocks, FormatContext::new())
}

fn is_list_like(block: &Block) -> bool {
    matches!(
        block,
        Block::BulletedListItem(_) | Block::NumberedListItem(_) | Block::ToDo(_) | Block::Toggle(_)
    )
}

/// Default Markdown for every block type; children go back through `renderer`.
pub fn render_default<R>(renderer: &R, block: &Block, context: FormatContext) -> Result<String, AppError>
where
    R: BlockRenderer + ?Sized,
{
    let mut out = String::new();

    match block {
        Block::Page(b) => {
            writeln!(out, "# {}\n", b.title)?;
            out.push_str(&renderer.render_children(&b.common.children, context)?);
        }

        Block::Paragraph(b) => {
            let text = rich_text_to_markdown(&b.content.rich_text);
            if text.is_empty() {
                out.push('\n');
            } else {
                writeln!(out, "{}\n", text)?;
            }
            out.push_str(&renderer.render_children(&b.common.children, context)?);
        }
        Block::Heading1(b) => heading(renderer, &mut out, 1, b, context)?,
        Block::Heading2(b) => heading(renderer, &mut out, 2, b, context)?,
        Block::Heading3(b) => heading(renderer, &mut out, 3, b, context)?,

        Block::BulletedListItem(b) | Block::Toggle(b) => {
            list_item(renderer, &mut out, "- ", &b.content, &b.common, context)?
        }
        Block::NumberedListItem(b) => {
            let marker = format!("{}. ", context.list_number.max(1));
            list_item(renderer, &mut out, &marker, &b.content, &b.common, context)?
        }
        Block::ToDo(b) => {
            let marker = if b.checked { "- [x] " } else { "- [ ] " };
            list_item(renderer, &mut out, marker, &b.content, &b.common, context)?
        }

        Block::Quote(b) => {
            writeln!(out, "> {}\n", quoted(&rich_text_to_markdown(&b.content.rich_text)))?;
            out.push_str(&renderer.render_children(&b.common.children, context)?);
        }
        Block::Callout(b) => {
            let text = quoted(&rich_text_to_markdown(&b.content.rich_text));
            match &b.icon {
                Some(emoji) => writeln!(out, "> {} {}\n", emoji, text)?,
                None => writeln!(out, "> {}\n", text)?,
            }
            out.push_str(&renderer.render_children(&b.common.children, context)?);
        }

        Block::Code(b) => writeln!(out, "```{}\n{}\n```\n", b.language, b.code)?,
        Block::Equation(b) => writeln!(out, "$$\n{}\n$$\n", b.expression)?,
        Block::Divider(_) => out.push_str("---\n\n"),

        Block::Image(b) => writeln!(out, "![]({})\n", b.source)?,
        Block::Video(b) | Block::File(b) | Block::Pdf(b) => link_line(&mut out, &b.caption, &b.url)?,
        Block::Bookmark(b) | Block::Embed(b) | Block::LinkPreview(b) => {
            link_line(&mut out, &b.caption, &b.url)?
        }

        Block::ChildPage(b) => {
            let target = markdown_file_name(&b.title, &b.common.id.cast());
            writeln!(out, "[{}]({})\n", b.title, target)?;
        }
        Block::LinkToPage(b) => {
            writeln!(out, "[{}]({})\n", b.page_id, markdown_file_name("", &b.page_id))?
        }
        Block::ChildDatabase(b) => writeln!(out, "**{}**\n", b.title)?,

        Block::Table(b) => table(&mut out, b)?,
        Block::TableRow(b) => table_row(&mut out, b)?,

        Block::ColumnList(_) | Block::Column(_) | Block::Synced(_) | Block::Template(_) => {
            out.push_str(&renderer.render_children(block.children(), context)?);
        }

        Block::TableOfContents(_) | Block::Breadcrumb(_) => {}
        Block::Unsupported(b) => {
            log::debug!("Skipping unsupported block {} ({})", b.common.id, b.block_type);
        }
    }

    Ok(out)
}

fn heading<R>(
    renderer: &R,
    out: &mut String,
    level: usize,
    block: &TextBlock,
    context: FormatContext,
) -> Result<(), AppError>
where
    R: BlockRenderer + ?Sized,
{
    let text = rich_text_to_markdown(&block.content.rich_text);
    writeln!(out, "{} {}\n", "#".repeat(level), text)?;
    out.push_str(&renderer.render_children(&block.common.children, context)?);
    Ok(())
}

fn list_item<R>(
    renderer: &R,
    out: &mut String,
    marker: &str,
    content: &TextBlockContent,
    common: &BlockCommon,
    context: FormatContext,
) -> Result<(), AppError>
where
    R: BlockRenderer + ?Sized,
{
    writeln!(out, "{}{}", marker, rich_text_to_markdown(&content.rich_text))?;
    if !common.children.is_empty() {
        let children = renderer.render_children(&common.children, context.enter_list())?;
        out.push_str(&indent_block_content(&children, LIST_INDENT));
    }
    Ok(())
}

/// `[caption or url](url)`
fn link_line(out: &mut String, caption: &[crate::types::RichTextItem], url: &str) -> Result<(), AppError> {
    let text = rich_text_to_markdown(caption);
    let text = if text.is_empty() { url } else { text.as_str() };
    writeln!(out, "[{}]({})\n", text, url)?;
    Ok(())
}

fn table(out: &mut String, block: &TableBlock) -> Result<(), AppError> {
    for (i, row) in block.common.children.iter().enumerate() {
        let Block::TableRow(row) = row else {
            continue;
        };
        table_row(out, row)?;
        if i == 0 {
            let columns = block.table_width.max(row.cells.len());
            writeln!(out, "|{}", " --- |".repeat(columns))?;
        }
    }
    out.push('\n');
    Ok(())
}

fn table_row(out: &mut String, row: &TableRowBlock) -> Result<(), AppError> {
    out.push('|');
    for cell in &row.cells {
        let content = rich_text_to_markdown(cell)
            .replace('|', "\\|")
            .replace('\n', " ");
        write!(out, " {} |", content)?;
    }
    out.push('\n');
    Ok(())
}

/// Continues a block quote across the lines of multi-line text.
fn quoted(text: &str) -> String {
    text.replace('\n', "\n> ")
}

/// Indents each non-empty line of `text` by `indent`, preserving blank lines.
fn indent_block_content(text: &str, indent: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            result.push_str(line);
        } else {
            result.push_str(indent);
            result.push_str(line);
        }
    }
    result
}
