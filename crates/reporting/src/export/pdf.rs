//! PDF encoder for [`ReportDocument`], built on `pdf-writer`.
//!
//! Text-only output with the standard Helvetica faces in WinAnsi encoding,
//! uncompressed content streams and no document info dictionary, so
//! identical documents encode to identical bytes.

use std::io::Write;

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use super::document::{Element, ReportDocument, PT_TO_MM};
use super::ExportResult;

const FONT_REGULAR: Name<'static> = Name(b"F1");
const FONT_BOLD: Name<'static> = Name(b"F2");
const RULE_WIDTH: f32 = 0.3;

fn mm_to_pt(mm: f32) -> f32 {
    mm / PT_TO_MM
}

/// Encodes `text` for a WinAnsi (Windows-1252) font. Characters the
/// encoding has no slot for become `?`.
pub fn win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(|c| win_ansi_byte(c).unwrap_or(b'?')).collect()
}

fn win_ansi_byte(c: char) -> Option<u8> {
    let byte = match c {
        ' '..='~' | '\u{A0}'..='\u{FF}' => c as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '•' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

fn content_stream(elements: &[Element], page_height_pt: f32) -> Vec<u8> {
    let mut content = Content::new();
    for element in elements {
        match element {
            Element::Text { x, y, style, text } => {
                let font = if style.bold { FONT_BOLD } else { FONT_REGULAR };
                let encoded = win_ansi(text);
                content.begin_text();
                content.set_font(font, style.size);
                content.next_line(mm_to_pt(*x), page_height_pt - mm_to_pt(*y));
                content.show(Str(&encoded));
                content.end_text();
            }
            Element::Rule { x1, y1, x2, y2 } => {
                content.set_line_width(RULE_WIDTH);
                content.move_to(mm_to_pt(*x1), page_height_pt - mm_to_pt(*y1));
                content.line_to(mm_to_pt(*x2), page_height_pt - mm_to_pt(*y2));
                content.stroke();
            }
        }
    }
    content.finish()
}

pub fn encode_pdf(doc: &ReportDocument) -> Vec<u8> {
    let width_pt = mm_to_pt(doc.setup.width);
    let height_pt = mm_to_pt(doc.setup.height);

    let catalog_id = Ref::new(1);
    let pages_id = Ref::new(2);
    let regular_id = Ref::new(3);
    let bold_id = Ref::new(4);
    // Each page is followed by its content stream.
    let page_ids: Vec<(Ref, Ref)> = (0..doc.pages.len() as i32)
        .map(|i| (Ref::new(5 + 2 * i), Ref::new(6 + 2 * i)))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(page_ids.len() as i32);
    pdf.type1_font(regular_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    for (page, &(page_id, content_id)) in doc.pages.iter().zip(&page_ids) {
        {
            let mut writer = pdf.page(page_id);
            writer.media_box(Rect::new(0.0, 0.0, width_pt, height_pt));
            writer.parent(pages_id);
            writer.contents(content_id);
            writer
                .resources()
                .fonts()
                .pair(FONT_REGULAR, regular_id)
                .pair(FONT_BOLD, bold_id);
        }
        pdf.stream(content_id, &content_stream(&page.elements, height_pt));
    }

    pdf.finish()
}

pub fn write_pdf<W: Write>(doc: &ReportDocument, mut writer: W) -> ExportResult<()> {
    writer.write_all(&encode_pdf(doc))?;
    writer.flush()?;
    Ok(())
}
