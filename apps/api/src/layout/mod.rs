// Layout engine: turns a DocumentSpec into per-page draw instructions.
// Pure and synchronous; renderers consume the plan without making layout decisions.

pub mod font_metrics;
pub mod geometry;
pub mod page_fill;
pub mod placement;
pub mod planner;

// Re-export the public API consumed by the renderers and the report pipeline.
pub use font_metrics::{FontWeight, HelveticaMetrics, TextMeasure};
pub use geometry::{a4_geometry, PageGeometry};
pub use page_fill::{summarize_plan, PlanSummary};
pub use placement::{CellPlacement, LinePlacement, PagePlan, Placement, TextAlign, TextPlacement};
pub use planner::plan;
