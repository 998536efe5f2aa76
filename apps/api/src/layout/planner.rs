//! Layout Planner — paginates a [`DocumentSpec`] into page plans.
//!
//! # Rules
//! - Every project starts on its own page; the first project opens page 0.
//! - Project title (24pt bold) and subtitle (14pt) head each project's first page.
//! - Each non-empty section gets a title, a divider and a 2-column photo grid.
//! - A grid row whose bottom edge would pass the bottom limit moves to a new page,
//!   under the section title suffixed with [`CONTINUATION_MARKER`].
//! - The `after` section starts a new page (with an 18pt project title) when the
//!   cursor is already past `after_section_break_mm`.
//!
//! Pure and deterministic: the same document always yields the same plan.

use tracing::debug;

use crate::layout::font_metrics::FontWeight;
use crate::layout::geometry::PageGeometry;
use crate::layout::placement::{
    CellPlacement, LinePlacement, PagePlan, Placement, TextAlign, TextPlacement,
    CONTINUATION_MARKER,
};
use crate::models::{DocumentSpec, Photo, SectionKind};

/// Computes the page plans for a document. An empty project list yields an empty plan.
pub fn plan<'a>(spec: &'a DocumentSpec, geometry: &PageGeometry) -> Vec<PagePlan<'a>> {
    let mut builder = PageBuilder::new(*geometry);

    for (index, project) in spec.projects.iter().enumerate() {
        let title = project.display_title(&spec.title, index);

        builder.start_page();
        builder.push_title(&title, geometry.title_font_pt, FontWeight::Bold);
        builder.push_title(&spec.subtitle, geometry.subtitle_font_pt, FontWeight::Regular);

        for section in project.active_sections() {
            if section.photos.is_empty() {
                continue;
            }

            if section.kind == SectionKind::After
                && builder.cursor_y > geometry.after_section_break_mm
            {
                builder.start_page();
                builder.push_title(&title, geometry.repeated_title_font_pt, FontWeight::Bold);
            }

            builder.layout_section(section.kind.title(), section.photos);
        }
    }

    let pages = builder.finish();
    debug!(
        projects = spec.projects.len(),
        pages = pages.len(),
        "Layout plan computed"
    );
    pages
}

// ────────────────────────────────────────────────────────────────────────────
// Page builder
// ────────────────────────────────────────────────────────────────────────────

/// Holds the "current page" state: the pages built so far and the vertical cursor.
struct PageBuilder<'a> {
    geometry: PageGeometry,
    pages: Vec<PagePlan<'a>>,
    cursor_y: f32,
}

impl<'a> PageBuilder<'a> {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            cursor_y: geometry.top_margin_mm,
        }
    }

    fn start_page(&mut self) {
        let index = self.pages.len();
        self.pages.push(PagePlan::new(index));
        self.cursor_y = self.geometry.top_margin_mm;
    }

    fn push(&mut self, placement: Placement<'a>) {
        if self.pages.is_empty() {
            self.start_page();
        }
        if let Some(page) = self.pages.last_mut() {
            page.placements.push(placement);
        }
    }

    fn centered_text(&self, text: &str, size_pt: f32, weight: FontWeight) -> TextPlacement {
        TextPlacement {
            text: text.to_string(),
            anchor_x_mm: self.geometry.center_x_mm(),
            baseline_y_mm: self.cursor_y,
            font_size_pt: size_pt,
            weight,
            align: TextAlign::Center,
        }
    }

    fn push_title(&mut self, text: &str, size_pt: f32, weight: FontWeight) {
        let placement = self.centered_text(text, size_pt, weight);
        self.push(Placement::TitleText(placement));
        self.cursor_y += self.geometry.title_advance_mm;
    }

    fn push_section_title(&mut self, text: &str) {
        let placement = self.centered_text(text, self.geometry.section_font_pt, FontWeight::Bold);
        self.push(Placement::SectionTitle(placement));
        self.cursor_y += self.geometry.section_title_advance_mm;
    }

    fn push_divider(&mut self) {
        let width = self.geometry.divider_width_mm();
        let x1 = (self.geometry.page_width_mm - width) / 2.0;
        self.push(Placement::DividerLine(LinePlacement {
            x1_mm: x1,
            y1_mm: self.cursor_y,
            x2_mm: x1 + width,
            y2_mm: self.cursor_y,
        }));
        self.cursor_y += self.geometry.divider_advance_mm;
    }

    /// Title, divider, then the photo grid. Breaks pages only at row starts so
    /// photo `i` always lands in column `i % columns`.
    fn layout_section(&mut self, title: &str, photos: &'a [Photo]) {
        self.push_section_title(title);
        self.push_divider();

        let g = self.geometry;
        let cell_width = g.cell_width_mm();
        let cell_height = g.cell_height_mm();
        let mut row = 0usize;

        for chunk in photos.chunks(g.columns.max(1)) {
            if self.cursor_y + cell_height > g.bottom_limit_mm {
                self.start_page();
                self.push_section_title(&format!("{title}{CONTINUATION_MARKER}"));
                row = 0;
            }

            for (column, photo) in chunk.iter().enumerate() {
                self.push(Placement::PhotoCell(CellPlacement {
                    x_mm: g.column_x_mm(column),
                    y_mm: self.cursor_y,
                    width_mm: cell_width,
                    height_mm: cell_height,
                    column,
                    row,
                    photo,
                }));
            }

            // Partial rows advance a full row height too.
            self.cursor_y += cell_height + g.gap_mm;
            row += 1;
        }

        self.cursor_y += g.section_trailing_gap_mm;
    }

    fn finish(self) -> Vec<PagePlan<'a>> {
        self.pages
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
