//! Draw instructions produced by the planner. Coordinates are millimetres from
//! the top-left corner of the page; y grows downwards.
#![allow(dead_code)]

use serde::Serialize;

use crate::layout::font_metrics::FontWeight;
use crate::models::Photo;

/// Suffix appended to a section title repeated on an overflow page.
pub const CONTINUATION_MARKER: &str = " (lanjutan)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Center,
}

/// A single line of text.
///
/// `anchor_x_mm` is interpreted through `align`: for `Center` it is the
/// horizontal midpoint; the renderer measures the text to find its left edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextPlacement {
    pub text: String,
    pub anchor_x_mm: f32,
    pub baseline_y_mm: f32,
    pub font_size_pt: f32,
    pub weight: FontWeight,
    pub align: TextAlign,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinePlacement {
    pub x1_mm: f32,
    pub y1_mm: f32,
    pub x2_mm: f32,
    pub y2_mm: f32,
}

/// One grid cell holding a photo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellPlacement<'a> {
    pub x_mm: f32,
    pub y_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
    pub column: usize,
    /// Row index within the current page's run of this section.
    pub row: usize,
    pub photo: &'a Photo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement<'a> {
    TitleText(TextPlacement),
    SectionTitle(TextPlacement),
    DividerLine(LinePlacement),
    PhotoCell(CellPlacement<'a>),
}

impl Placement<'_> {
    /// Lowest y this placement reaches on the page.
    pub fn bottom_mm(&self) -> f32 {
        match self {
            Placement::TitleText(t) | Placement::SectionTitle(t) => t.baseline_y_mm,
            Placement::DividerLine(l) => l.y1_mm.max(l.y2_mm),
            Placement::PhotoCell(c) => c.y_mm + c.height_mm,
        }
    }
}

/// All placements of one physical page, in draw order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagePlan<'a> {
    pub index: usize,
    pub placements: Vec<Placement<'a>>,
}

impl<'a> PagePlan<'a> {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            placements: Vec::new(),
        }
    }

    pub fn photo_cells(&self) -> impl Iterator<Item = &CellPlacement<'a>> {
        self.placements.iter().filter_map(|p| match p {
            Placement::PhotoCell(cell) => Some(cell),
            _ => None,
        })
    }

    pub fn section_titles(&self) -> impl Iterator<Item = &TextPlacement> {
        self.placements.iter().filter_map(|p| match p {
            Placement::SectionTitle(t) => Some(t),
            _ => None,
        })
    }

    pub fn title_texts(&self) -> impl Iterator<Item = &TextPlacement> {
        self.placements.iter().filter_map(|p| match p {
            Placement::TitleText(t) => Some(t),
            _ => None,
        })
    }
}
