//! PDF renderer backed by printpdf.
//!
//! Plan coordinates are top-left based; PDF pages are bottom-left based, so every
//! y is flipped against the page height before drawing.

use std::io::BufWriter;

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;
use tracing::{debug, warn};

use crate::layout::{
    CellPlacement, FontWeight, HelveticaMetrics, LinePlacement, PageGeometry, PagePlan,
    Placement, TextAlign, TextMeasure, TextPlacement,
};
use crate::render::decode::{decode_photo, DecodedImage};
use crate::render::{DocumentRenderer, OutputFormat, RenderError, PHOTO_PLACEHOLDER_TEXT};

const PT_PER_MM: f32 = 72.0 / 25.4;
const DIVIDER_THICKNESS_MM: f32 = 0.5;
const CELL_BORDER_THICKNESS_MM: f32 = 0.3;
/// Inset of the photo inside its bordered cell, per side.
const PHOTO_INSET_MM: f32 = 1.0;
const PLACEHOLDER_FONT_PT: f32 = 10.0;
/// Resolution used to size embedded images before scaling them into their cell.
const IMAGE_DPI: f32 = 300.0;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn get(&self, weight: FontWeight) -> &IndirectFontRef {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ))
}

pub struct PdfRenderer {
    geometry: PageGeometry,
}

/// What ended up in the photo cells of a rendered document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct CellStats {
    images: usize,
    placeholders: usize,
}

impl PdfRenderer {
    pub fn new(geometry: PageGeometry) -> Self {
        Self { geometry }
    }

    fn flip_y(&self, y_mm: f32) -> f32 {
        self.geometry.page_height_mm - y_mm
    }

    fn point(&self, x_mm: f32, y_mm: f32) -> (Point, bool) {
        (Point::new(Mm(x_mm), Mm(self.flip_y(y_mm))), false)
    }

    fn rect_points(&self, x: f32, y: f32, w: f32, h: f32) -> Vec<(Point, bool)> {
        vec![
            self.point(x, y),
            self.point(x + w, y),
            self.point(x + w, y + h),
            self.point(x, y + h),
        ]
    }

    fn draw_placement(
        &self,
        layer: &PdfLayerReference,
        fonts: &Fonts,
        placement: &Placement<'_>,
        stats: &mut CellStats,
    ) {
        match placement {
            Placement::TitleText(text) | Placement::SectionTitle(text) => {
                self.draw_text(layer, fonts, text)
            }
            Placement::DividerLine(line) => self.draw_line(layer, line),
            Placement::PhotoCell(cell) => self.draw_cell(layer, fonts, cell, stats),
        }
    }

    fn draw_text(&self, layer: &PdfLayerReference, fonts: &Fonts, text: &TextPlacement) {
        if text.text.is_empty() {
            return;
        }
        let x = left_edge(text, &HelveticaMetrics);
        layer.set_fill_color(rgb(0, 0, 0));
        layer.use_text(
            text.text.clone(),
            text.font_size_pt,
            Mm(x),
            Mm(self.flip_y(text.baseline_y_mm)),
            fonts.get(text.weight),
        );
    }

    fn draw_line(&self, layer: &PdfLayerReference, line: &LinePlacement) {
        layer.set_outline_color(rgb(0, 0, 0));
        layer.set_outline_thickness(DIVIDER_THICKNESS_MM * PT_PER_MM);
        layer.add_line(Line {
            points: vec![
                self.point(line.x1_mm, line.y1_mm),
                self.point(line.x2_mm, line.y2_mm),
            ],
            is_closed: false,
        });
    }

    fn draw_cell(
        &self,
        layer: &PdfLayerReference,
        fonts: &Fonts,
        cell: &CellPlacement<'_>,
        stats: &mut CellStats,
    ) {
        layer.set_outline_color(rgb(200, 200, 200));
        layer.set_outline_thickness(CELL_BORDER_THICKNESS_MM * PT_PER_MM);
        layer.add_line(Line {
            points: self.rect_points(cell.x_mm, cell.y_mm, cell.width_mm, cell.height_mm),
            is_closed: true,
        });

        match decode_photo(cell.photo) {
            Ok(decoded) => {
                self.draw_image(layer, cell, decoded);
                stats.images += 1;
            }
            Err(e) => {
                warn!(
                    photo_id = %cell.photo.id,
                    photo = %cell.photo.name,
                    "Drawing placeholder for undecodable photo: {e}"
                );
                self.draw_placeholder(layer, fonts, cell);
                stats.placeholders += 1;
            }
        }
    }

    fn draw_image(&self, layer: &PdfLayerReference, cell: &CellPlacement<'_>, decoded: DecodedImage) {
        let target_w = cell.width_mm - 2.0 * PHOTO_INSET_MM;
        let target_h = cell.height_mm - 2.0 * PHOTO_INSET_MM;
        let natural_w_mm = decoded.width_px as f32 / IMAGE_DPI * 25.4;
        let natural_h_mm = decoded.height_px as f32 / IMAGE_DPI * 25.4;

        let image = Image::from(ImageXObject {
            width: Px(decoded.width_px as usize),
            height: Px(decoded.height_px as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: decoded.rgb,
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        });

        // Images are anchored at their bottom-left corner.
        image.add_to_layer(
            layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(cell.x_mm + PHOTO_INSET_MM)),
                translate_y: Some(Mm(
                    self.flip_y(cell.y_mm + cell.height_mm - PHOTO_INSET_MM)
                )),
                scale_x: Some(target_w / natural_w_mm),
                scale_y: Some(target_h / natural_h_mm),
                dpi: Some(IMAGE_DPI),
                ..Default::default()
            },
        );
    }

    fn draw_placeholder(&self, layer: &PdfLayerReference, fonts: &Fonts, cell: &CellPlacement<'_>) {
        layer.set_fill_color(rgb(240, 240, 240));
        layer.add_polygon(Polygon {
            rings: vec![self.rect_points(cell.x_mm, cell.y_mm, cell.width_mm, cell.height_mm)],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });

        let label = TextPlacement {
            text: PHOTO_PLACEHOLDER_TEXT.to_string(),
            anchor_x_mm: cell.x_mm + cell.width_mm / 2.0,
            baseline_y_mm: cell.y_mm + cell.height_mm / 2.0,
            font_size_pt: PLACEHOLDER_FONT_PT,
            weight: FontWeight::Regular,
            align: TextAlign::Center,
        };
        self.draw_text(layer, fonts, &label);
    }
}

/// Left edge of an aligned text placement, using the surface's font metrics.
fn left_edge(text: &TextPlacement, metrics: &impl TextMeasure) -> f32 {
    match text.align {
        TextAlign::Center => {
            let width = metrics.text_width_mm(&text.text, text.font_size_pt, text.weight);
            text.anchor_x_mm - width / 2.0
        }
    }
}

impl PdfRenderer {
    fn render_with_stats(
        &self,
        title: &str,
        pages: &[PagePlan<'_>],
    ) -> Result<(Vec<u8>, CellStats), RenderError> {
        let g = &self.geometry;
        let (doc, first_page, first_layer) = PdfDocument::new(
            title,
            Mm(g.page_width_mm),
            Mm(g.page_height_mm),
            "Layer 1",
        );

        let fonts = Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| RenderError::Pdf(format!("{e:?}")))?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(|e| RenderError::Pdf(format!("{e:?}")))?,
        };

        let mut stats = CellStats::default();
        for (i, page) in pages.iter().enumerate() {
            let layer = if i == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (new_page, new_layer) =
                    doc.add_page(Mm(g.page_width_mm), Mm(g.page_height_mm), "Layer 1");
                doc.get_page(new_page).get_layer(new_layer)
            };

            for placement in &page.placements {
                self.draw_placement(&layer, &fonts, placement, &mut stats);
            }
        }

        let mut buf = Vec::new();
        {
            let mut writer = BufWriter::new(&mut buf);
            doc.save(&mut writer)
                .map_err(|e| RenderError::Pdf(format!("{e:?}")))?;
            writer
                .into_inner()
                .map_err(|e| RenderError::Pdf(e.to_string()))?;
        }

        Ok((buf, stats))
    }
}

impl DocumentRenderer for PdfRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }

    fn render(&self, title: &str, pages: &[PagePlan<'_>]) -> Result<Vec<u8>, RenderError> {
        let (buf, stats) = self.render_with_stats(title, pages)?;
        debug!(
            pages = pages.len(),
            images = stats.images,
            placeholders = stats.placeholders,
            bytes = buf.len(),
            "PDF rendered"
        );
        Ok(buf)
    }
}
