use std::io::Cursor;

use docx_rs::{
    AbstractNumbering, BreakType, Docx, IndentLevel, Level, LevelJc, LevelText, NumberFormat,
    Numbering, NumberingId, Paragraph, Run, RunFonts, SpecialIndentType, Start, Style, StyleType,
};

use crate::render::outline::Block;
use crate::render::RenderError;

pub const HEADING1_STYLE: &str = "Heading1";
pub const HEADING2_STYLE: &str = "Heading2";
pub const LIST_BULLET_STYLE: &str = "ListBullet";

const BODY_FONT: &str = "Calibri";
const HEADING_FONT: &str = "Calibri Light";
const HEADING1_SIZE_PT: usize = 16;
const HEADING2_SIZE_PT: usize = 13;

// docx-rs always emits its own decimal abstract numbering as id 1.
pub const BULLET_ABSTRACT_ID: usize = 2;
pub const BULLET_NUM_ID: usize = 2;
const BULLET_GLYPH: &str = "•";
// Twips: text at 0.5in, glyph hanging 0.25in to its left.
const BULLET_INDENT_LEFT: i32 = 720;
const BULLET_INDENT_HANGING: i32 = 360;

/// Serializes an outline into a DOCX package.
///
/// - `Heading { level: 1 }` → `Heading1`, any deeper level → `Heading2`
/// - `Bullet` → `ListBullet` paragraph on the bullet numbering, so Word draws
///   a `•` glyph with a hanging indent
/// - `Paragraph` → unstyled body paragraph
///
/// Line feeds inside a block become line breaks within the paragraph and tabs
/// become tab stops. Empty text yields an empty paragraph.
pub fn write_docx(blocks: &[Block]) -> Result<Vec<u8>, RenderError> {
    let mut docx = Docx::new()
        .add_style(heading_style(HEADING1_STYLE, "heading 1", HEADING1_SIZE_PT))
        .add_style(heading_style(HEADING2_STYLE, "heading 2", HEADING2_SIZE_PT))
        .add_style(Style::new(LIST_BULLET_STYLE, StyleType::Paragraph).name("List Bullet"))
        .add_abstract_numbering(bullet_numbering())
        .add_numbering(Numbering::new(BULLET_NUM_ID, BULLET_ABSTRACT_ID));

    for block in blocks {
        let paragraph = match block {
            Block::Heading { level, text } => {
                let style_id = if *level <= 1 {
                    HEADING1_STYLE
                } else {
                    HEADING2_STYLE
                };
                paragraph(text, HEADING_FONT).style(style_id)
            }
            Block::Paragraph { text } => paragraph(text, BODY_FONT),
            Block::Bullet { text } => paragraph(text, BODY_FONT)
                .style(LIST_BULLET_STYLE)
                .numbering(NumberingId::new(BULLET_NUM_ID), IndentLevel::new(0)),
        };
        docx = docx.add_paragraph(paragraph);
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| RenderError::Package(e.to_string()))?;

    Ok(buf.into_inner())
}

fn heading_style(style_id: &str, name: &str, size_pt: usize) -> Style {
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(size_pt * 2) // OOXML uses half-points
}

fn bullet_numbering() -> AbstractNumbering {
    AbstractNumbering::new(BULLET_ABSTRACT_ID).add_level(
        Level::new(
            0,
            Start::new(1),
            NumberFormat::new("bullet"),
            LevelText::new(BULLET_GLYPH),
            LevelJc::new("left"),
        )
        .indent(
            Some(BULLET_INDENT_LEFT),
            Some(SpecialIndentType::Hanging(BULLET_INDENT_HANGING)),
            None,
            None,
        ),
    )
}

fn paragraph(text: &str, font: &str) -> Paragraph {
    if text.is_empty() {
        return Paragraph::new();
    }

    let mut run = Run::new().fonts(RunFonts::new().ascii(font));
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        let line = line.strip_suffix('\r').unwrap_or(line);
        for (j, piece) in line.split('\t').enumerate() {
            if j > 0 {
                run = run.add_tab();
            }
            if !piece.is_empty() {
                run = run.add_text(piece);
            }
        }
    }

    Paragraph::new().add_run(run)
}
