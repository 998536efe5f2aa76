//! Page geometry for the report layout. All lengths in millimetres, font sizes in points.

use serde::{Deserialize, Serialize};

/// Layout parameters for one report page.
///
/// The vertical cursor starts at `top_margin_mm`; a grid row whose bottom edge
/// would pass `bottom_limit_mm` moves to the next page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    /// Left and right margin.
    pub side_margin_mm: f32,
    pub top_margin_mm: f32,
    /// `page_height_mm` minus the bottom margin.
    pub bottom_limit_mm: f32,

    pub columns: usize,
    pub gap_mm: f32,
    /// Cell height as a fraction of cell width (4:3).
    pub cell_aspect: f32,
    /// Divider length as a fraction of the content width.
    pub divider_ratio: f32,

    pub title_font_pt: f32,
    pub subtitle_font_pt: f32,
    /// Project title repeated when the `after` section is pushed to a new page.
    pub repeated_title_font_pt: f32,
    pub section_font_pt: f32,

    pub title_advance_mm: f32,
    pub section_title_advance_mm: f32,
    pub divider_advance_mm: f32,
    pub section_trailing_gap_mm: f32,

    /// Cursor position past which the `after` section starts on a fresh page.
    /// Distinct from `bottom_limit_mm`.
    pub after_section_break_mm: f32,
}

/// A4 portrait, 15mm side margins, 2-column 4:3 grid.
pub fn a4_geometry() -> PageGeometry {
    PageGeometry {
        page_width_mm: 210.0,
        page_height_mm: 297.0,
        side_margin_mm: 15.0,
        top_margin_mm: 20.0,
        bottom_limit_mm: 277.0,
        columns: 2,
        gap_mm: 5.0,
        cell_aspect: 0.75,
        divider_ratio: 0.8,
        title_font_pt: 24.0,
        subtitle_font_pt: 14.0,
        repeated_title_font_pt: 18.0,
        section_font_pt: 16.0,
        title_advance_mm: 15.0,
        section_title_advance_mm: 10.0,
        divider_advance_mm: 8.0,
        section_trailing_gap_mm: 10.0,
        after_section_break_mm: 200.0,
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        a4_geometry()
    }
}

impl PageGeometry {
    pub fn content_width_mm(&self) -> f32 {
        self.page_width_mm - 2.0 * self.side_margin_mm
    }

    pub fn center_x_mm(&self) -> f32 {
        self.page_width_mm / 2.0
    }

    pub fn cell_width_mm(&self) -> f32 {
        let gaps = (self.columns.saturating_sub(1)) as f32 * self.gap_mm;
        (self.content_width_mm() - gaps) / self.columns.max(1) as f32
    }

    pub fn cell_height_mm(&self) -> f32 {
        self.cell_width_mm() * self.cell_aspect
    }

    /// Left edge of the horizontally centred grid.
    pub fn grid_left_mm(&self) -> f32 {
        let columns = self.columns.max(1) as f32;
        let grid_width = self.cell_width_mm() * columns + self.gap_mm * (columns - 1.0);
        (self.page_width_mm - grid_width) / 2.0
    }

    pub fn column_x_mm(&self, column: usize) -> f32 {
        self.grid_left_mm() + column as f32 * (self.cell_width_mm() + self.gap_mm)
    }

    pub fn divider_width_mm(&self) -> f32 {
        self.content_width_mm() * self.divider_ratio
    }
}
