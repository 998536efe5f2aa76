//! DOCX renderer backed by docx-rs.
//!
//! Word reflows content itself, so absolute coordinates are not reproduced.
//! The plan's page structure, order, font sizes and grid rows are: each page
//! starts after a hard page break, text becomes centred paragraphs, and each
//! run of photo cells becomes a table whose rows follow the plan's rows.

use std::io::Cursor;

use docx_rs::{
    AlignmentType, BreakType, Docx, Paragraph, Pic, Run, Shading, Table, TableCell, TableRow,
};
use tracing::{debug, warn};

use crate::layout::{
    CellPlacement, FontWeight, LinePlacement, PageGeometry, PagePlan, Placement, TextPlacement,
};
use crate::render::decode::photo_as_png;
use crate::render::{DocumentRenderer, OutputFormat, RenderError, PHOTO_PLACEHOLDER_TEXT};

const EMU_PER_MM: f32 = 36_000.0;
/// Divider rule glyph and its approximate advance at the rule's font size.
const RULE_GLYPH: char = '\u{2500}';
const RULE_GLYPH_WIDTH_MM: f32 = 2.1;
const PHOTO_INSET_MM: f32 = 1.0;
const PLACEHOLDER_COLOR: &str = "888888";
/// Same light grey as the PDF placeholder rectangle.
const PLACEHOLDER_FILL: &str = "F0F0F0";
/// Custom document property carrying the document title.
const TITLE_PROPERTY: &str = "Title";

pub struct DocxRenderer {
    geometry: PageGeometry,
}

/// Cells of the table currently being assembled, grouped by plan row.
#[derive(Default)]
struct PendingTable {
    rows: Vec<Vec<TableCell>>,
    current_row: Option<usize>,
}

impl PendingTable {
    fn push(&mut self, row: usize, cell: TableCell) {
        if self.current_row != Some(row) || self.rows.is_empty() {
            self.rows.push(Vec::new());
            self.current_row = Some(row);
        }
        if let Some(last) = self.rows.last_mut() {
            last.push(cell);
        }
    }

    fn take(&mut self, columns: usize) -> Option<Table> {
        if self.rows.is_empty() {
            return None;
        }
        let rows = std::mem::take(&mut self.rows)
            .into_iter()
            .map(|mut cells| {
                // Pad partial rows so every row has the same column count.
                while cells.len() < columns {
                    cells.push(TableCell::new().add_paragraph(Paragraph::new()));
                }
                TableRow::new(cells)
            })
            .collect();
        self.current_row = None;
        Some(Table::new(rows))
    }
}

impl DocxRenderer {
    pub fn new(geometry: PageGeometry) -> Self {
        Self { geometry }
    }

    fn text_paragraph(text: &TextPlacement) -> Paragraph {
        // docx sizes are in half-points.
        let mut run = Run::new()
            .add_text(text.text.as_str())
            .size((text.font_size_pt * 2.0).round() as usize);
        if text.weight == FontWeight::Bold {
            run = run.bold();
        }
        centred(run)
    }

    fn rule_paragraph(line: &LinePlacement) -> Paragraph {
        let length_mm = (line.x2_mm - line.x1_mm).abs();
        let glyphs = (length_mm / RULE_GLYPH_WIDTH_MM).floor().max(1.0) as usize;
        let rule: String = std::iter::repeat(RULE_GLYPH).take(glyphs).collect();
        centred(Run::new().add_text(rule).size(16))
    }

    fn photo_cell(cell: &CellPlacement<'_>) -> TableCell {
        match photo_as_png(cell.photo) {
            Ok((png, width_px, height_px)) => {
                let w = ((cell.width_mm - 2.0 * PHOTO_INSET_MM) * EMU_PER_MM) as u32;
                let h = ((cell.height_mm - 2.0 * PHOTO_INSET_MM) * EMU_PER_MM) as u32;
                let pic = Pic::new_with_dimensions(png, width_px, height_px).size(w, h);
                TableCell::new().add_paragraph(centred(Run::new().add_image(pic)))
            }
            Err(e) => {
                warn!(
                    photo_id = %cell.photo.id,
                    photo = %cell.photo.name,
                    "Writing placeholder for undecodable photo: {e}"
                );
                let label = Run::new()
                    .add_text(PHOTO_PLACEHOLDER_TEXT)
                    .color(PLACEHOLDER_COLOR);
                TableCell::new()
                    .shading(Shading::new().fill(PLACEHOLDER_FILL))
                    .add_paragraph(centred(label))
            }
        }
    }
}

fn centred(run: Run) -> Paragraph {
    Paragraph::new().add_run(run).align(AlignmentType::Center)
}

impl DocumentRenderer for DocxRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Docx
    }

    fn render(&self, title: &str, pages: &[PagePlan<'_>]) -> Result<Vec<u8>, RenderError> {
        let columns = self.geometry.columns.max(1);
        // docx-rs exposes no setter for the core `dc:title`, so the title
        // travels as a custom document property.
        let mut docx = Docx::new().custom_property(TITLE_PROPERTY, title);

        for (i, page) in pages.iter().enumerate() {
            if i > 0 {
                docx = docx
                    .add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)));
            }

            let mut table = PendingTable::default();
            for placement in &page.placements {
                match placement {
                    Placement::PhotoCell(cell) => table.push(cell.row, Self::photo_cell(cell)),
                    other => {
                        if let Some(t) = table.take(columns) {
                            docx = docx.add_table(t);
                        }
                        docx = match other {
                            Placement::TitleText(text) | Placement::SectionTitle(text) => {
                                docx.add_paragraph(Self::text_paragraph(text))
                            }
                            Placement::DividerLine(line) => {
                                docx.add_paragraph(Self::rule_paragraph(line))
                            }
                            Placement::PhotoCell(_) => docx,
                        };
                    }
                }
            }
            if let Some(t) = table.take(columns) {
                docx = docx.add_table(t);
            }
        }

        let mut cursor = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut cursor)
            .map_err(|e| RenderError::Docx(e.to_string()))?;

        let bytes = cursor.into_inner();
        debug!(pages = pages.len(), bytes = bytes.len(), "DOCX rendered");
        Ok(bytes)
    }
}
