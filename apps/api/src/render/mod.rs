// Document renderers: walk a computed plan once and emit it to a concrete format.
// No layout decisions live here; every coordinate comes from the planner.

pub mod decode;
pub mod docx;
pub mod filename;
pub mod pdf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::{PageGeometry, PagePlan};

pub use filename::document_filename;

/// Text drawn in place of a photo whose bytes cannot be decoded.
pub const PHOTO_PLACEHOLDER_TEXT: &str = "Foto tidak dapat dimuat";

#[derive(Debug, Error)]
pub enum RenderError {
    /// Per-photo failure; renderers recover from it with a placeholder.
    #[error("Image decode failed: {0}")]
    ImageDecode(String),

    #[error("PDF output failed: {0}")]
    Pdf(String),

    #[error("DOCX output failed: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Pdf,
    Docx,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Docx => "docx",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// A surface that can draw a computed plan.
pub trait DocumentRenderer {
    fn format(&self) -> OutputFormat;

    /// Renders every page in order. Per-photo failures are recovered internally;
    /// an `Err` means the whole document failed and no output exists.
    fn render(&self, title: &str, pages: &[PagePlan<'_>]) -> Result<Vec<u8>, RenderError>;
}

pub fn renderer_for(format: OutputFormat, geometry: PageGeometry) -> Box<dyn DocumentRenderer + Send> {
    match format {
        OutputFormat::Pdf => Box::new(pdf::PdfRenderer::new(geometry)),
        OutputFormat::Docx => Box::new(docx::DocxRenderer::new(geometry)),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::Cursor;

    use image::{ImageBuffer, ImageFormat, Rgb};

    use crate::models::{DocumentSpec, Photo, Project, ProjectMode};

    /// A small valid PNG.
    pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_pixel(width, height, Rgb([200u8, 40, 40]));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .expect("encode test png");
        buf
    }

    pub fn good_photo(name: &str) -> Photo {
        Photo::new(name, png_bytes(8, 6))
    }

    pub fn corrupt_photo(name: &str) -> Photo {
        Photo::new(name, b"definitely not an image".to_vec())
    }

    pub fn spec_with(before: Vec<Photo>, after: Vec<Photo>) -> DocumentSpec {
        let mut project = Project::new("Lobby", ProjectMode::BeforeAfter);
        project.before_photos = before;
        project.after_photos = after;
        DocumentSpec {
            title: "PEKERJAAN".to_string(),
            subtitle: "Pekerjaan Pemasangan aluminium".to_string(),
            projects: vec![project],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_extensions_and_mime() {
        assert_eq!(OutputFormat::Pdf.extension(), "pdf");
        assert_eq!(OutputFormat::Docx.extension(), "docx");
        assert_eq!(OutputFormat::Pdf.mime(), "application/pdf");
    }

    #[test]
    fn test_format_deserializes_lowercase() {
        let format: OutputFormat = serde_json::from_str("\"docx\"").unwrap();
        assert_eq!(format, OutputFormat::Docx);
    }

    #[test]
    fn test_renderer_for_matches_format() {
        let geometry = crate::layout::a4_geometry();
        assert_eq!(renderer_for(OutputFormat::Pdf, geometry).format(), OutputFormat::Pdf);
        assert_eq!(renderer_for(OutputFormat::Docx, geometry).format(), OutputFormat::Docx);
    }
}
