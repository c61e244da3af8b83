//! PDF rendering of an analysis result.
//!
//! Pages are A4 and use the two standard Type1 fonts Helvetica and
//! Helvetica-Bold, so every string is passed through [`sanitize`] first.
//! Text is wrapped by an average glyph width estimate and flows onto new
//! pages when the bottom margin is reached.

pub mod sanitize;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};
use tracing::info;

use crate::agent::{AnalysisResult, Persona};
pub use sanitize::sanitize;

pub const MIME_TYPE: &str = "application/pdf";
pub const TITLE: &str = "Skincare AI Analysis Report";

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 56.0;
// Helvetica averages a little over half an em per glyph.
const AVG_GLYPH_WIDTH: f32 = 0.55;

const REGULAR_FONT: Name<'static> = Name(b"F1");
const BOLD_FONT: Name<'static> = Name(b"F2");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Title,
    Heading,
    Body,
}

impl Style {
    fn font_size(self) -> f32 {
        match self {
            Style::Title => 16.0,
            Style::Heading => 12.0,
            Style::Body => 10.0,
        }
    }

    fn line_height(self) -> f32 {
        match self {
            Style::Title => 24.0,
            Style::Heading => 20.0,
            Style::Body => 14.0,
        }
    }

    fn font(self) -> Name<'static> {
        match self {
            Style::Body => REGULAR_FONT,
            Style::Title | Style::Heading => BOLD_FONT,
        }
    }

    fn max_chars(self) -> usize {
        ((PAGE_WIDTH - 2.0 * MARGIN) / (self.font_size() * AVG_GLYPH_WIDTH)) as usize
    }
}

enum Block {
    Text { style: Style, text: String },
    Gap(f32),
}

#[derive(Debug, Clone, PartialEq)]
struct PlacedLine {
    text: String,
    style: Style,
    x: f32,
    y: f32,
}

pub fn file_name(persona: Persona) -> String {
    format!(
        "skincare_analysis_{}.pdf",
        persona.display_name().to_lowercase().replace(' ', "_")
    )
}

pub fn render(result: &AnalysisResult) -> Vec<u8> {
    let pages = paginate(&blocks(result));

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let regular_id = Ref::new(3);
    let bold_id = Ref::new(4);
    let page_refs: Vec<(Ref, Ref)> = (0..pages.len() as i32)
        .map(|i| (Ref::new(5 + 2 * i), Ref::new(6 + 2 * i)))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_refs.iter().map(|(page_id, _)| *page_id))
        .count(pages.len() as i32);
    pdf.type1_font(regular_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    for (lines, (page_id, content_id)) in pages.iter().zip(&page_refs) {
        let mut page = pdf.page(*page_id);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
        page.parent(page_tree_id);
        page.contents(*content_id);
        page.resources()
            .fonts()
            .pair(REGULAR_FONT, regular_id)
            .pair(BOLD_FONT, bold_id);
        page.finish();

        let mut content = Content::new();
        for line in lines {
            content.begin_text();
            content.set_font(line.style.font(), line.style.font_size());
            content.next_line(line.x, line.y);
            content.show(Str(line.text.as_bytes()));
            content.end_text();
        }
        pdf.stream(*content_id, &content.finish());
    }

    pdf.finish()
}

/// Writes the report to `target`, or into `target` under [`file_name`] when it
/// is an existing directory.
pub fn save(result: &AnalysisResult, target: &Path) -> Result<PathBuf> {
    let path = if target.is_dir() {
        target.join(file_name(result.persona))
    } else {
        target.to_path_buf()
    };
    let bytes = render(result);
    std::fs::write(&path, &bytes)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), mime = MIME_TYPE, "report written");
    Ok(path)
}

fn blocks(result: &AnalysisResult) -> Vec<Block> {
    let mut blocks = vec![
        Block::Text {
            style: Style::Title,
            text: TITLE.to_string(),
        },
        Block::Gap(8.0),
        Block::Text {
            style: Style::Heading,
            text: format!("Analyzed by: {}", result.persona.label()),
        },
        Block::Text {
            style: Style::Heading,
            text: format!("Skin Type: {}", result.skin_type.title()),
        },
        Block::Gap(8.0),
    ];

    if !result.question.is_empty() {
        blocks.push(Block::Text {
            style: Style::Heading,
            text: "Your Question:".to_string(),
        });
        blocks.push(Block::Text {
            style: Style::Body,
            text: result.question.clone(),
        });
        blocks.push(Block::Gap(8.0));
    }

    blocks.push(Block::Text {
        style: Style::Heading,
        text: "AI Analysis & Recommendations:".to_string(),
    });
    blocks.push(Block::Text {
        style: Style::Body,
        text: result.merged_response.clone(),
    });
    blocks
}

fn paginate(blocks: &[Block]) -> Vec<Vec<PlacedLine>> {
    let top = PAGE_HEIGHT - MARGIN;
    let mut pages = vec![Vec::new()];
    let mut y = top;

    for block in blocks {
        match block {
            Block::Gap(height) => y -= height,
            Block::Text { style, text } => {
                for line in wrap(&sanitize(text), style.max_chars()) {
                    if y - style.line_height() < MARGIN {
                        pages.push(Vec::new());
                        y = top;
                    }
                    y -= style.line_height();
                    let x = if *style == Style::Title {
                        let width = line.len() as f32 * style.font_size() * AVG_GLYPH_WIDTH;
                        ((PAGE_WIDTH - width) / 2.0).max(MARGIN)
                    } else {
                        MARGIN
                    };
                    if let Some(page) = pages.last_mut() {
                        page.push(PlacedLine {
                            text: line,
                            style: *style,
                            x,
                            y,
                        });
                    }
                }
            }
        }
    }

    pages
}

/// Word-wraps ASCII text to at most `max_chars` per line. Line breaks in the
/// input are kept, and words longer than a line are split.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word = word;
            while word.len() > max_chars {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let (head, tail) = word.split_at(max_chars);
                lines.push(head.to_string());
                word = tail;
            }
            if current.is_empty() {
                current.push_str(word);
            } else if current.len() + 1 + word.len() <= max_chars {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        lines.push(current);
    }
    lines
}
