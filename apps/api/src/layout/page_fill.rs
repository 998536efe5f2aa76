//! Plan Summary — how a computed plan fills its pages.
//!
//! Used for request logging, the plan preview response and the page-count
//! response header. Never feeds back into layout decisions.

use serde::Serialize;

use crate::layout::geometry::PageGeometry;
use crate::layout::placement::{PagePlan, Placement, CONTINUATION_MARKER};

/// Vertical fill of a single page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageFill {
    pub index: usize,
    pub photo_cells: usize,
    /// Lowest placement bottom edge, in mm.
    pub used_height_mm: f32,
    /// `used_height_mm / bottom_limit_mm`, clamped to 1.0.
    pub fill_fraction: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummary {
    pub page_count: usize,
    pub photo_cells: usize,
    /// Section titles re-emitted after a grid overflow.
    pub continuation_titles: usize,
    pub pages: Vec<PageFill>,
}

pub fn summarize_plan(pages: &[PagePlan<'_>], geometry: &PageGeometry) -> PlanSummary {
    let fills: Vec<PageFill> = pages
        .iter()
        .map(|page| analyze_page_fill(page, geometry))
        .collect();

    let continuation_titles = pages
        .iter()
        .flat_map(|p| p.placements.iter())
        .filter(|p| matches!(p, Placement::SectionTitle(t) if t.text.ends_with(CONTINUATION_MARKER)))
        .count();

    PlanSummary {
        page_count: pages.len(),
        photo_cells: fills.iter().map(|f| f.photo_cells).sum(),
        continuation_titles,
        pages: fills,
    }
}

pub fn analyze_page_fill(page: &PagePlan<'_>, geometry: &PageGeometry) -> PageFill {
    let used_height_mm = page
        .placements
        .iter()
        .map(Placement::bottom_mm)
        .fold(0.0_f32, f32::max);

    let fill_fraction = if geometry.bottom_limit_mm > 0.0 {
        (used_height_mm / geometry.bottom_limit_mm).min(1.0)
    } else {
        0.0
    };

    PageFill {
        index: page.index,
        photo_cells: page.photo_cells().count(),
        used_height_mm,
        fill_fraction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::geometry::a4_geometry;
    use crate::layout::planner::plan;
    use crate::models::{DocumentSpec, Photo, Project, ProjectMode};

    fn spec_with_before(count: usize) -> DocumentSpec {
        let mut project = Project::new("Lobby", ProjectMode::BeforeAfter);
        project.before_photos = (0..count)
            .map(|i| Photo::new(format!("{i}.jpg"), vec![0u8]))
            .collect();
        DocumentSpec {
            title: "PEKERJAAN".to_string(),
            subtitle: "Sub".to_string(),
            projects: vec![project],
        }
    }

    #[test]
    fn test_empty_plan_summary() {
        let summary = summarize_plan(&[], &a4_geometry());
        assert_eq!(summary.page_count, 0);
        assert_eq!(summary.photo_cells, 0);
        assert!(summary.pages.is_empty());
    }

    #[test]
    fn test_summary_counts_cells_and_continuations() {
        let geometry = a4_geometry();
        let spec = spec_with_before(7);
        let pages = plan(&spec, &geometry);
        let summary = summarize_plan(&pages, &geometry);

        assert_eq!(summary.page_count, 2);
        assert_eq!(summary.photo_cells, 7);
        assert_eq!(summary.continuation_titles, 1);
        assert_eq!(summary.pages[0].photo_cells, 6);
        assert_eq!(summary.pages[1].photo_cells, 1);
    }

    #[test]
    fn test_fill_fraction_tracks_lowest_cell() {
        let geometry = a4_geometry();
        let spec = spec_with_before(1);
        let pages = plan(&spec, &geometry);
        let fill = analyze_page_fill(&pages[0], &geometry);

        // Single row at 68mm, 65.625mm tall.
        assert!((fill.used_height_mm - 133.625).abs() < 1e-3);
        assert!(fill.fill_fraction > 0.4 && fill.fill_fraction < 0.5);
    }
}
