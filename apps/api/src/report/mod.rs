// Report pipeline: request validation, planning, rendering and naming.
// Layout decisions live in crate::layout; drawing lives in crate::render.

pub mod generator;
pub mod handlers;
