//! Minimal PDF writer for assessment reports.
//!
//! Emits text-only documents on US-letter pages with the built-in Helvetica
//! font. Word wrapping is approximate (character budget per line), which is
//! plenty for a report made of short headings and paragraphs.

use lopdf::{dictionary, Document, Object, Stream, StringFormat};

const PAGE_WIDTH: f32 = 612.0; // US letter, in points
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 72.0; // 1 inch

pub const TITLE_SIZE: f32 = 18.0;
pub const HEADING_SIZE: f32 = 14.0;
pub const SUBHEADING_SIZE: f32 = 12.0;
pub const BODY_SIZE: f32 = 10.0;

struct TextRun {
    text: String,
    x: f32,
    y: f32,
    size: f32,
}

/// Cursor-based page writer. Lines flow top to bottom; a new page starts
/// whenever the next line would cross the bottom margin.
pub struct ReportWriter {
    pages: Vec<Vec<TextRun>>,
    cursor_y: f32,
}

impl ReportWriter {
    pub fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            cursor_y: PAGE_HEIGHT - MARGIN,
        }
    }

    pub fn title(&mut self, text: &str) {
        self.line(text, TITLE_SIZE);
    }

    pub fn heading(&mut self, text: &str) {
        self.line(text, HEADING_SIZE);
    }

    pub fn subheading(&mut self, text: &str) {
        self.line(text, SUBHEADING_SIZE);
    }

    pub fn paragraph(&mut self, text: &str) {
        for line in wrap_text(text, BODY_SIZE) {
            self.line(&line, BODY_SIZE);
        }
    }

    pub fn spacer(&mut self, points: f32) {
        self.cursor_y -= points;
    }

    fn line(&mut self, text: &str, size: f32) {
        let line_height = size * 1.4;
        if self.cursor_y - line_height < MARGIN {
            self.pages.push(Vec::new());
            self.cursor_y = PAGE_HEIGHT - MARGIN;
        }
        if let Some(page) = self.pages.last_mut() {
            page.push(TextRun {
                text: text.to_string(),
                x: MARGIN,
                y: self.cursor_y,
                size,
            });
        }
        self.cursor_y -= line_height;
    }

    /// Assembles the document and returns the raw PDF bytes.
    pub fn finish(self, title: &str) -> lopdf::Result<Vec<u8>> {
        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();
        let font_id = doc.new_object_id();

        // Helvetica is one of the base-14 fonts, no embedding needed.
        doc.objects.insert(
            font_id,
            Object::Dictionary(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => "Helvetica",
            }),
        );

        let mut page_ids = Vec::new();
        for runs in &self.pages {
            let mut content = String::from("BT\n");
            for run in runs {
                content.push_str(&format!("/F1 {} Tf\n", run.size));
                content.push_str(&format!("{} {} Td\n", run.x, run.y));
                content.push_str(&format!("({}) Tj\n", escape_text(&run.text)));
                // Td is relative; move back so the next run positions from
                // the page origin again.
                content.push_str(&format!("{} {} Td\n", -run.x, -run.y));
            }
            content.push_str("ET\n");

            let content_id = doc.add_object(Object::Stream(Stream::new(
                dictionary! {},
                content.into_bytes(),
            )));
            let page_id = doc.add_object(Object::Dictionary(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => dictionary! {
                        "F1" => font_id,
                    },
                },
            }));
            page_ids.push(page_id);
        }

        let kids: Vec<Object> = page_ids.iter().map(|id| (*id).into()).collect();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_ids.len() as i64,
            }),
        );

        let catalog_id = doc.add_object(Object::Dictionary(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        }));
        let info_id = doc.add_object(Object::Dictionary(dictionary! {
            "Title" => Object::String(title.as_bytes().to_vec(), StringFormat::Literal),
            "Producer" => Object::String(b"tracker-api".to_vec(), StringFormat::Literal),
        }));

        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);
        doc.compress();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok(buffer)
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Escapes the characters PDF literal strings treat specially.
fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// Greedy word wrap against an approximate per-line character budget.
fn wrap_text(text: &str, size: f32) -> Vec<String> {
    let content_width = PAGE_WIDTH - 2.0 * MARGIN;
    let chars_per_line = (content_width / (size * 0.5)) as usize;

    let mut lines = Vec::new();
    for raw_line in text.lines() {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let candidate_len = if current.is_empty() {
                word.len()
            } else {
                current.len() + 1 + word.len()
            };
            if candidate_len > chars_per_line && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_splits_long_text_into_multiple_lines() {
        let text = "word ".repeat(100);
        let lines = wrap_text(&text, BODY_SIZE);
        assert!(lines.len() > 1);
        let budget = ((PAGE_WIDTH - 2.0 * MARGIN) / (BODY_SIZE * 0.5)) as usize;
        assert!(lines.iter().all(|l| l.len() <= budget));
    }

    #[test]
    fn wrap_keeps_short_text_on_one_line() {
        assert_eq!(wrap_text("Score: 30%", BODY_SIZE), vec!["Score: 30%"]);
    }

    #[test]
    fn escape_handles_parentheses_and_backslashes() {
        assert_eq!(escape_text("a (b) \\c"), "a \\(b\\) \\\\c");
    }

    #[test]
    fn writer_breaks_onto_a_new_page_when_full() {
        let mut writer = ReportWriter::new();
        for _ in 0..120 {
            writer.paragraph("a line of body text");
        }
        assert!(writer.pages.len() > 1);
    }

    #[test]
    fn finish_emits_a_pdf_document() {
        let mut writer = ReportWriter::new();
        writer.title("Candidate Assessment");
        writer.paragraph("Score: 30%");
        let bytes = writer.finish("Candidate Assessment").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 100);
    }
}
