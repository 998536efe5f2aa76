//! Static font-metric tables for the two built-in PDF faces used by the report.
//!
//! Widths are the standard Adobe AFM advance widths in 1/1000 em, which is what
//! PDF viewers use for the base-14 Helvetica faces, so centring computed here
//! matches the rendered text exactly for ASCII. Non-ASCII characters fall back
//! to an average width.
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

const POINTS_PER_MM: f32 = 72.0 / 25.4;

// ────────────────────────────────────────────────────────────────────────────
// Font weight
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Text measurement service supplied by a rendering surface.
pub trait TextMeasure {
    /// Rendered width of `text` in millimetres at `size_pt`.
    fn text_width_mm(&self, text: &str, size_pt: f32, weight: FontWeight) -> f32;
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Character-width table for one face.
///
/// `widths[i]` = advance of ASCII character `(i + 32)` in 1/1000 em, covering
/// 0x20 (space) through 0x7E (~).
pub struct FontMetricTable {
    pub weight: FontWeight,
    widths: [u16; 95],
    /// Fallback for codepoints outside 0x20..=0x7E.
    pub average_char_width: u16,
}

impl FontMetricTable {
    /// Width of a string in em units.
    pub fn measure_em(&self, s: &str) -> f32 {
        let units: u32 = s
            .chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32] as u32
                } else {
                    self.average_char_width as u32
                }
            })
            .sum();
        units as f32 / 1000.0
    }

    pub fn measure_mm(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_em(s) * size_pt / POINTS_PER_MM
    }
}

/// Helvetica metrics as a [`TextMeasure`] implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelveticaMetrics;

impl TextMeasure for HelveticaMetrics {
    fn text_width_mm(&self, text: &str, size_pt: f32, weight: FontWeight) -> f32 {
        get_metrics(weight).measure_mm(text, size_pt)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    weight: FontWeight::Regular,
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    average_char_width: 556,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    weight: FontWeight::Bold,
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {    |    }    ~
        389, 280, 389, 584,
    ],
    average_char_width: 611,
};

/// Returns the static metric table for a weight.
pub fn get_metrics(weight: FontWeight) -> &'static FontMetricTable {
    match weight {
        FontWeight::Regular => &HELVETICA_TABLE,
        FontWeight::Bold => &HELVETICA_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_empty_returns_zero() {
        assert_eq!(get_metrics(FontWeight::Regular).measure_em(""), 0.0);
    }

    #[test]
    fn test_measure_ascii_word() {
        // "Foto" = F(611) + o(556) + t(278) + o(556) = 2001
        let width = get_metrics(FontWeight::Regular).measure_em("Foto");
        assert!((width - 2.001).abs() < 1e-4, "got {width}");
    }

    #[test]
    fn test_non_ascii_falls_back_to_average() {
        let metrics = get_metrics(FontWeight::Regular);
        assert!((metrics.measure_em("é") - 0.556).abs() < 1e-4);
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "BEFORE (Sebelum)";
        let regular = HelveticaMetrics.text_width_mm(text, 16.0, FontWeight::Regular);
        let bold = HelveticaMetrics.text_width_mm(text, 16.0, FontWeight::Bold);
        assert!(bold > regular);
    }

    #[test]
    fn test_width_scales_with_font_size() {
        let at_12 = HelveticaMetrics.text_width_mm("PEKERJAAN", 12.0, FontWeight::Bold);
        let at_24 = HelveticaMetrics.text_width_mm("PEKERJAAN", 24.0, FontWeight::Bold);
        assert!((at_24 - 2.0 * at_12).abs() < 1e-3);
    }

    #[test]
    fn test_mm_conversion() {
        // 1000 units at 72pt = 1 inch = 25.4mm; "W" is 944 units.
        let width = get_metrics(FontWeight::Regular).measure_mm("W", 72.0);
        assert!((width - 0.944 * 25.4).abs() < 1e-3, "got {width}");
    }
}
