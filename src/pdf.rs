//! # PDF Wrapper
//!
//! Lays a rendered QR code out on a single A4 page:
//!
//! ```text
//! ┌──────────────────────────────────┐
//! │ QR Code Generator - Boaz Housing │  24pt bold
//! │        Reference: ATT-001        │  18pt bold
//! │          ┌────────────┐          │
//! │          │  300×300pt │          │  QR image
//! │          └────────────┘          │
//! │     This QR code was generated…  │  12pt
//! │   Generated on: dd/mm/yyyy at …  │  10pt italic
//! └──────────────────────────────────┘
//! ```
//!
//! Text uses the PDF built-in Helvetica faces, so nothing is embedded except
//! the image.

use chrono::NaiveDateTime;
use image::RgbImage;
use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Point, Pt, RawImage, RawImageData,
    RawImageFormat, TextItem, XObjectTransform,
};

use crate::error::VerifQrError;

pub const TITLE: &str = "QR Code Generator - Boaz Housing";
pub const CAPTION: &str = "This QR code was generated in the Boaz Housing style.";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_PT: f32 = 50.0;
const IMAGE_SIDE_PT: f32 = 300.0;

/// One centred line of text.
struct Line<'a> {
    text: &'a str,
    size: f32,
    font: BuiltinFont,
    space_after: f32,
}

/// Build the PDF for `reference` around the rendered `qr` image.
pub fn build_pdf(
    reference: &str,
    qr: &RgbImage,
    generated_at: &NaiveDateTime,
) -> Result<Vec<u8>, VerifQrError> {
    let (width, height) = qr.dimensions();
    if width == 0 || height == 0 {
        return Err(VerifQrError::Pdf("QR image is empty".to_string()));
    }

    let page_width = Pt::from(Mm(PAGE_WIDTH_MM)).0;
    let page_height = Pt::from(Mm(PAGE_HEIGHT_MM)).0;

    let mut doc = PdfDocument::new(&format!("QR {}", reference));

    let image = RawImage {
        pixels: RawImageData::U8(qr.as_raw().clone()),
        width: width as usize,
        height: height as usize,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    };
    let image_id = doc.add_image(&image);

    let reference_line = format!("Reference: {}", reference);
    let generated_line = format!(
        "Generated on: {}",
        generated_at.format("%d/%m/%Y at %H:%M:%S")
    );

    let mut ops = Vec::new();
    let mut cursor = page_height - MARGIN_PT;

    for line in [
        Line {
            text: TITLE,
            size: 24.0,
            font: BuiltinFont::HelveticaBold,
            space_after: 30.0,
        },
        Line {
            text: &reference_line,
            size: 18.0,
            font: BuiltinFont::HelveticaBold,
            space_after: 40.0,
        },
    ] {
        cursor -= line.size;
        push_centered_text(&mut ops, &line, page_width, cursor);
        cursor -= line.space_after;
    }

    // 72 dpi makes one image pixel one point before scaling.
    cursor -= IMAGE_SIDE_PT;
    ops.push(Op::UseXobject {
        id: image_id,
        transform: XObjectTransform {
            translate_x: Some(Pt((page_width - IMAGE_SIDE_PT) / 2.0)),
            translate_y: Some(Pt(cursor)),
            scale_x: Some(IMAGE_SIDE_PT / width as f32),
            scale_y: Some(IMAGE_SIDE_PT / height as f32),
            dpi: Some(72.0),
            ..Default::default()
        },
    });
    cursor -= 30.0;

    for line in [
        Line {
            text: CAPTION,
            size: 12.0,
            font: BuiltinFont::Helvetica,
            space_after: 20.0,
        },
        Line {
            text: &generated_line,
            size: 10.0,
            font: BuiltinFont::HelveticaOblique,
            space_after: 0.0,
        },
    ] {
        cursor -= line.size;
        push_centered_text(&mut ops, &line, page_width, cursor);
        cursor -= line.space_after;
    }

    let page = PdfPage::new(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), ops);
    doc.pages.push(page);

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        tracing::debug!("PDF for {} saved with {} warnings", reference, warnings.len());
    }
    Ok(bytes)
}

fn push_centered_text(ops: &mut Vec<Op>, line: &Line<'_>, page_width: f32, baseline: f32) {
    let bold = matches!(line.font, BuiltinFont::HelveticaBold);
    let width = text_width(line.text, line.size, bold);
    let x = ((page_width - width) / 2.0).max(MARGIN_PT);

    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor {
        pos: Point {
            x: Pt(x),
            y: Pt(baseline),
        },
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        size: Pt(line.size),
        font: line.font,
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(line.text.to_string())],
        font: line.font,
    });
    ops.push(Op::EndTextSection);
}

/// Approximate Helvetica advance width of `text` in points.
///
/// Per-class averages of the standard AFM widths, close enough to centre a
/// short line.
fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let em: f32 = text
        .chars()
        .map(|c| match (c, bold) {
            (' ', _) => 0.278,
            ('.' | ',' | ':' | '/' | '-', false) => 0.278,
            ('.' | ',' | ':' | '/' | '-', true) => 0.333,
            (c, false) if c.is_ascii_uppercase() => 0.667,
            (c, true) if c.is_ascii_uppercase() => 0.722,
            (_, false) => 0.556,
            (_, true) => 0.611,
        })
        .sum();
    em * size
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 21)
            .unwrap()
            .and_hms_opt(14, 30, 22)
            .unwrap()
    }

    #[test]
    fn test_build_pdf() {
        let qr = RgbImage::from_pixel(490, 490, image::Rgb([255, 255, 255]));
        let pdf = build_pdf("ATT-DOC-001", &qr, &at()).unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
        assert!(pdf.windows(5).any(|w| w == b"%%EOF"));
    }

    #[test]
    fn test_empty_image_rejected() {
        let qr = RgbImage::new(0, 0);
        assert!(matches!(
            build_pdf("ATT", &qr, &at()),
            Err(VerifQrError::Pdf(_))
        ));
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("", 12.0, false), 0.0);
        let regular = text_width(TITLE, 24.0, false);
        let bold = text_width(TITLE, 24.0, true);
        assert!(bold > regular);
        // The title fits between the margins at 24pt.
        assert!(bold < 595.0 - 2.0 * MARGIN_PT);
    }
}
