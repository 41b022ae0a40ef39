// src/api/notion_client_adapter.rs
//! Adapter layer for converting notion-client types to our domain model.

use super::responses::ObjectEnvelope;
use super::types::{DatabaseHeader, PageHeader};
use crate::error::{AppError, NotionClientError};
use crate::model::blocks::*;
use crate::model::common::BlockCommon;
use crate::model::{Block, CellValue, ColumnSchema, TableRow};
use crate::types::{plain_text_of, BlockId, DatabaseId, PageId, RichTextItem};
use notion_client::objects::block::BlockType;
use notion_client::objects::database::Database as NotionDatabase;
use notion_client::objects::file::File as NcFile;
use notion_client::objects::page::{Page as NotionPage, PageProperty};
use notion_client::objects::rich_text::RichText as NcRichText;
use url::Url;
use uuid::Uuid;

/// Combine a page's envelope with its notion-client view into a header.
pub fn convert_page_header(
    envelope: ObjectEnvelope,
    notion_page: NotionPage,
) -> Result<PageHeader, AppError> {
    let title = notion_page
        .properties
        .into_values()
        .find_map(|property| match property {
            PageProperty::Title { title, .. } => Some(plain_text_of(&convert_rich_text_array(title))),
            _ => None,
        })
        .unwrap_or_default();

    Ok(PageHeader {
        id: PageId::parse(&envelope.id)?,
        title,
        created_time: envelope.created_time,
    })
}

/// Combine a database's envelope with its notion-client view into a header.
///
/// The schema is keyed by internal property ID, in the order the API lists
/// the properties.
pub fn convert_database_header(
    envelope: ObjectEnvelope,
    notion_db: NotionDatabase,
) -> Result<DatabaseHeader, AppError> {
    let schema = envelope
        .properties
        .into_iter()
        .map(|(name, property)| {
            (
                property.id,
                ColumnSchema {
                    name,
                    column_type: property.property_type,
                },
            )
        })
        .collect();

    Ok(DatabaseHeader {
        id: DatabaseId::parse(&envelope.id)?,
        title: plain_text_of(&convert_rich_text_array(notion_db.title)),
        created_time: envelope.created_time,
        schema,
    })
}

/// Convert one database row into a table row keyed by property ID.
pub fn convert_row(envelope: ObjectEnvelope, notion_page: NotionPage) -> Result<TableRow, AppError> {
    let page_id = PageId::parse(&envelope.id)?;
    let mut values = notion_page.properties;

    let properties = envelope
        .properties
        .into_iter()
        .map(|(name, property)| {
            let texts = values.remove(&name).map(property_texts).unwrap_or_default();
            (property.id, CellValue::new(texts))
        })
        .collect();

    Ok(TableRow {
        page_id,
        properties,
    })
}

/// Evaluate a property value to its text values.
fn property_texts(property: PageProperty) -> Vec<String> {
    let single = |text: String| if text.is_empty() { Vec::new() } else { vec![text] };

    match property {
        PageProperty::Title { title, .. } => {
            single(plain_text_of(&convert_rich_text_array(title)))
        }
        PageProperty::RichText { rich_text, .. } => {
            single(plain_text_of(&convert_rich_text_array(rich_text)))
        }
        PageProperty::MultiSelect { multi_select, .. } => {
            multi_select.into_iter().filter_map(|s| s.name).collect()
        }
        PageProperty::Select { select, .. } => select.and_then(|s| s.name).into_iter().collect(),
        PageProperty::Status { status, .. } => status.and_then(|s| s.name).into_iter().collect(),
        PageProperty::Number { number, .. } => number.map(|n| n.to_string()).into_iter().collect(),
        PageProperty::Checkbox { checkbox, .. } => vec![checkbox.to_string()],
        PageProperty::Url { url, .. } => url.into_iter().collect(),
        PageProperty::Email { email, .. } => email.into_iter().collect(),
        PageProperty::PhoneNumber { phone_number, .. } => phone_number.into_iter().collect(),
        PageProperty::Date { date, .. } => date
            .and_then(|d| d.start)
            .map(format_date)
            .into_iter()
            .collect(),
        PageProperty::People { people, .. } => people.into_iter().filter_map(|u| u.name).collect(),
        PageProperty::Files { files, .. } => files.into_iter().map(|f| f.name).collect(),
        PageProperty::Relation { relation, .. } => relation.into_iter().map(|r| r.id).collect(),
        PageProperty::CreatedTime { created_time, .. } => vec![created_time.to_rfc3339()],
        PageProperty::LastEditedTime {
            last_edited_time, ..
        } => last_edited_time.map(|t| t.to_rfc3339()).into_iter().collect(),
        _ => Vec::new(),
    }
}

fn format_date(date: notion_client::objects::property::DateOrDateTime) -> String {
    use notion_client::objects::property::DateOrDateTime;

    match date {
        DateOrDateTime::Date(d) => d.to_string(),
        DateOrDateTime::DateTime(dt) => dt.to_rfc3339(),
    }
}

/// Convert notion-client Block to our domain Block
pub fn convert_block(
    notion_block: notion_client::objects::block::Block,
) -> Result<Block, AppError> {
    let common = convert_block_common(&notion_block)?;

    let block = match notion_block.block_type {
        BlockType::Paragraph { paragraph } => Block::Paragraph(text_block(common, paragraph.rich_text)),
        BlockType::Heading1 { heading_1 } => Block::Heading1(text_block(common, heading_1.rich_text)),
        BlockType::Heading2 { heading_2 } => Block::Heading2(text_block(common, heading_2.rich_text)),
        BlockType::Heading3 { heading_3 } => Block::Heading3(text_block(common, heading_3.rich_text)),

        BlockType::BulletedListItem { bulleted_list_item } => {
            Block::BulletedListItem(text_block(common, bulleted_list_item.rich_text))
        }
        BlockType::NumberedListItem { numbered_list_item } => {
            Block::NumberedListItem(text_block(common, numbered_list_item.rich_text))
        }
        BlockType::ToDo { to_do } => Block::ToDo(ToDoBlock {
            common,
            content: TextBlockContent::new(convert_rich_text_array(to_do.rich_text)),
            checked: to_do.checked.unwrap_or(false),
        }),
        BlockType::Toggle { toggle } => Block::Toggle(text_block(common, toggle.rich_text)),
        BlockType::Quote { quote } => Block::Quote(text_block(common, quote.rich_text)),
        BlockType::Template { template } => Block::Template(text_block(common, template.rich_text)),

        BlockType::Callout { callout } => Block::Callout(CalloutBlock {
            common,
            icon: emoji_icon(callout.icon),
            content: TextBlockContent::new(convert_rich_text_array(callout.rich_text)),
        }),

        BlockType::Code { code } => Block::Code(CodeBlock {
            common,
            language: format!("{:?}", code.language).to_lowercase(),
            code: plain_text_of(&convert_rich_text_array(code.rich_text)),
            caption: convert_rich_text_array(code.caption),
        }),

        BlockType::Equation { equation } => Block::Equation(EquationBlock {
            common,
            expression: equation.expression,
        }),

        BlockType::Divider { .. } => Block::Divider(StructuralBlock { common }),
        BlockType::Breadcrumb { .. } => Block::Breadcrumb(StructuralBlock { common }),
        BlockType::TableOfContents { .. } => Block::TableOfContents(StructuralBlock { common }),
        BlockType::ColumnList { .. } => Block::ColumnList(StructuralBlock { common }),
        BlockType::Column { .. } => Block::Column(StructuralBlock { common }),
        BlockType::SyncedBlock { .. } => Block::Synced(StructuralBlock { common }),

        BlockType::Image { image } => {
            let (download_url, hosted) = file_url(image.file_type);
            Block::Image(image_block(common, download_url, hosted))
        }
        BlockType::Video { video } => Block::Video(FileBlock {
            common,
            url: file_url(video.file_type).0,
            caption: Vec::new(),
        }),
        BlockType::File { file } => Block::File(FileBlock {
            common,
            url: file_url(file.file_type).0,
            caption: convert_rich_text_array(file.caption),
        }),
        BlockType::Pdf { pdf } => Block::Pdf(FileBlock {
            common,
            url: file_url(pdf.file_type).0,
            caption: convert_rich_text_array(pdf.caption),
        }),

        BlockType::Bookmark { bookmark } => Block::Bookmark(LinkBlock {
            common,
            url: bookmark.url,
            caption: convert_rich_text_array(bookmark.caption),
        }),
        BlockType::Embed { embed } => Block::Embed(LinkBlock {
            common,
            url: embed.url,
            caption: Vec::new(),
        }),
        BlockType::LinkPreview { link_preview } => Block::LinkPreview(LinkBlock {
            common,
            url: link_preview.url,
            caption: Vec::new(),
        }),

        BlockType::ChildPage { child_page } => Block::ChildPage(ChildPageBlock {
            common,
            title: child_page.title,
        }),
        BlockType::ChildDatabase { child_database } => Block::ChildDatabase(ChildDatabaseBlock {
            common,
            title: child_database.title,
        }),

        BlockType::LinkToPage { link_to_page } => match link_to_page {
            notion_client::objects::parent::Parent::PageId { page_id } => {
                Block::LinkToPage(LinkToPageBlock {
                    common,
                    page_id: PageId::parse(&page_id)?,
                })
            }
            _ => Block::Unsupported(UnsupportedBlock {
                common,
                block_type: "link_to_page".to_string(),
            }),
        },

        BlockType::Table { table } => Block::Table(TableBlock {
            common,
            table_width: table.table_width as usize,
            has_column_header: table.has_column_header,
        }),
        BlockType::TableRow { table_row } => Block::TableRow(TableRowBlock {
            common,
            cells: table_row
                .cells
                .into_iter()
                .map(convert_rich_text_array)
                .collect(),
        }),

        other => Block::Unsupported(UnsupportedBlock {
            common,
            block_type: variant_name(&format!("{:?}", other)),
        }),
    };

    Ok(block)
}

/// Convert block common fields
fn convert_block_common(
    notion_block: &notion_client::objects::block::Block,
) -> Result<BlockCommon, AppError> {
    let id = BlockId::parse(notion_block.id.as_deref().ok_or_else(|| {
        NotionClientError::ConversionError {
            message: "Block missing required ID field".to_string(),
        }
    })?)?;

    Ok(BlockCommon {
        id,
        children: Vec::new(),
        has_children: notion_block.has_children.unwrap_or(false),
    })
}

fn text_block(common: BlockCommon, rich_text: Vec<NcRichText>) -> TextBlock {
    TextBlock {
        common,
        content: TextBlockContent::new(convert_rich_text_array(rich_text)),
    }
}

fn emoji_icon(icon: Option<notion_client::objects::block::Icon>) -> Option<String> {
    use notion_client::objects::block::Icon;
    use notion_client::objects::emoji::Emoji;

    match icon {
        Some(Icon::Emoji(Emoji::Emoji { emoji })) => Some(emoji),
        _ => None,
    }
}

/// The URL of a file object and whether Notion hosts it.
fn file_url(file: NcFile) -> (String, bool) {
    match file {
        NcFile::External { external } => (external.url, false),
        NcFile::File { file } => (file.url, true),
    }
}

/// Build an image block from its download URL.
///
/// Notion-hosted files live under a per-upload UUID directory, which serves
/// as the image's asset ID; the block ID stands in when the URL carries none.
/// External images have no asset ID.
fn image_block(common: BlockCommon, download_url: String, hosted: bool) -> ImageBlock {
    let source = strip_query(&download_url);
    let file_ids = if hosted {
        vec![hosted_asset_id(&source).unwrap_or_else(|| common.id.to_dashed())]
    } else {
        Vec::new()
    };

    ImageBlock {
        common,
        source,
        download_url,
        file_ids,
    }
}

/// The URL without query string or fragment.
pub(crate) fn strip_query(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) => {
            url.set_query(None);
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => raw
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

/// The UUID directory segment directly preceding the filename, if any.
fn hosted_asset_id(source: &str) -> Option<String> {
    let url = Url::parse(source).ok()?;
    let segments: Vec<&str> = url.path_segments()?.collect();
    let directory = segments.len().checked_sub(2).map(|i| segments[i])?;
    Uuid::parse_str(directory).ok()?;
    Some(directory.to_string())
}

/// The enum variant name at the front of a `Debug` rendering.
fn variant_name(debug: &str) -> String {
    debug
        .split([' ', '{', '('])
        .next()
        .unwrap_or("unknown")
        .to_string()
}

/// Convert array of rich text items
pub fn convert_rich_text_array(rich_texts: Vec<NcRichText>) -> Vec<RichTextItem> {
    rich_texts.into_iter().map(convert_rich_text).collect()
}

/// Convert single rich text item
fn convert_rich_text(rich_text: NcRichText) -> RichTextItem {
    use crate::types::{Link, RichTextType};

    match rich_text {
        NcRichText::Text {
            text,
            annotations,
            plain_text,
            href,
        } => RichTextItem {
            plain_text: plain_text.unwrap_or_else(|| text.content.clone()),
            text_type: RichTextType::Text {
                content: text.content,
                link: text.link.map(|link| Link { url: link.url }),
            },
            annotations: convert_annotations(annotations.unwrap_or_default()),
            href,
        },

        NcRichText::Mention {
            annotations,
            plain_text,
            href,
            ..
        } => RichTextItem {
            text_type: RichTextType::Mention,
            annotations: convert_annotations(annotations),
            plain_text,
            href,
        },

        NcRichText::Equation {
            equation,
            annotations,
            plain_text,
            href,
        } => RichTextItem {
            text_type: RichTextType::Equation {
                expression: equation.expression,
            },
            annotations: convert_annotations(annotations),
            plain_text,
            href,
        },

        _ => RichTextItem::plain_text(""),
    }
}

fn convert_annotations(
    annotations: notion_client::objects::rich_text::Annotations,
) -> crate::types::Annotations {
    crate::types::Annotations {
        bold: annotations.bold,
        italic: annotations.italic,
        strikethrough: annotations.strikethrough,
        underline: annotations.underline,
        code: annotations.code,
    }
}
