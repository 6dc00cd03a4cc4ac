//! `PdfWriter`: a `DocumentWriter` that emits PDF through lopdf.
//!
//! Text uses the base-14 Helvetica faces with WinAnsiEncoding, so no font files are
//! embedded. Layout state is kept in millimetres with a top-left origin and converted to
//! PDF points (bottom-left origin) only when operators are emitted.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::layout::{
    encode_win_ansi, get_metrics, wrap_lines, FontStyle, PageGeometry, MM_PER_PT,
};
use crate::render::writer::{Align, DocumentWriter, Rgb, RunningHeader};
use crate::render::RenderError;

/// Horizontal inset of text inside a cell.
const CELL_PADDING_MM: f32 = 1.0;

pub struct PdfWriter {
    geometry: PageGeometry,
    pages: Vec<Vec<Operation>>,
    /// Top of the next cell, in mm from the top edge.
    y: f32,
    font: FontStyle,
    font_size_pt: f32,
    fill_color: Rgb,
    text_color: Rgb,
    header: Option<RunningHeader>,
    in_header: bool,
}

impl PdfWriter {
    pub fn new(geometry: PageGeometry) -> Self {
        PdfWriter {
            y: geometry.margins().top,
            geometry,
            pages: Vec::new(),
            font: FontStyle::Regular,
            font_size_pt: 10.0,
            fill_color: Rgb(255, 255, 255),
            text_color: Rgb(0, 0, 0),
            header: None,
            in_header: false,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Serializes all pages into a PDF byte stream.
    pub fn finish(mut self) -> Result<Vec<u8>, RenderError> {
        if self.pages.is_empty() {
            self.add_page();
        }

        let width_pt = self.geometry.width() / MM_PER_PT;
        let height_pt = self.geometry.height() / MM_PER_PT;

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(font_dictionary(FontStyle::Regular));
        let bold_id = doc.add_object(font_dictionary(FontStyle::Bold));
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                font_resource_name(FontStyle::Regular) => regular_id,
                font_resource_name(FontStyle::Bold) => bold_id,
            },
        });
        let media_box: Vec<Object> = vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(width_pt),
            Object::Real(height_pt),
        ];

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => media_box.clone(),
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count,
                "Resources" => resources_id,
                "MediaBox" => media_box,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }

    fn current_page(&mut self) -> &mut Vec<Operation> {
        if self.pages.is_empty() {
            self.add_page();
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Starts a new page if a cell of `height` would cross the bottom margin.
    fn ensure_room(&mut self, height: f32) {
        if self.pages.is_empty() {
            self.add_page();
            return;
        }
        if !self.in_header && self.y + height > self.geometry.content_bottom() {
            self.add_page();
        }
    }

    fn draw_header(&mut self) {
        let Some(header) = self.header.clone() else {
            return;
        };
        let saved_font = (self.font, self.font_size_pt);
        let width = self.geometry.printable_width();

        self.in_header = true;
        for line in &header.lines {
            self.set_font(line.style, line.size_pt);
            self.multi_cell(width, line.line_height, &line.text, Align::Center);
        }
        self.ln(header.gap_after);
        self.in_header = false;

        self.set_font(saved_font.0, saved_font.1);
    }

    fn push_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let page_height = self.geometry.height();
        let color = self.fill_color;
        let ops = self.current_page();
        ops.push(Operation::new("rg", rgb_operands(color)));
        ops.push(Operation::new(
            "re",
            vec![
                Object::Real(x / MM_PER_PT),
                Object::Real((page_height - y - height) / MM_PER_PT),
                Object::Real(width / MM_PER_PT),
                Object::Real(height / MM_PER_PT),
            ],
        ));
        ops.push(Operation::new("f", vec![]));
    }

    fn push_text(&mut self, x: f32, baseline: f32, text: &str) {
        let page_height = self.geometry.height();
        let font = self.font;
        let size = self.font_size_pt;
        let color = self.text_color;
        let ops = self.current_page();
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![
                Object::Name(font_resource_name(font).as_bytes().to_vec()),
                Object::Real(size),
            ],
        ));
        ops.push(Operation::new("rg", rgb_operands(color)));
        ops.push(Operation::new(
            "Td",
            vec![
                Object::Real(x / MM_PER_PT),
                Object::Real((page_height - baseline) / MM_PER_PT),
            ],
        ));
        ops.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_win_ansi(text))],
        ));
        ops.push(Operation::new("ET", vec![]));
    }
}

impl DocumentWriter for PdfWriter {
    fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    fn set_running_header(&mut self, header: RunningHeader) {
        self.header = Some(header);
    }

    fn add_page(&mut self) {
        self.pages.push(Vec::new());
        self.y = self.geometry.margins().top;
        self.draw_header();
    }

    fn set_font(&mut self, style: FontStyle, size_pt: f32) {
        self.font = style;
        self.font_size_pt = size_pt;
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.fill_color = color;
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.text_color = color;
    }

    fn cell(&mut self, width: f32, height: f32, text: &str, align: Align, fill: bool) {
        self.ensure_room(height);

        let x = self.geometry.margins().left;
        let width = if width <= 0.0 {
            self.geometry.printable_width()
        } else {
            width.min(self.geometry.printable_width())
        };

        if fill {
            let y = self.y;
            self.push_rect(x, y, width, height);
        }

        if !text.is_empty() {
            let text_width = get_metrics(self.font).width_mm(text, self.font_size_pt);
            let text_x = match align {
                Align::Left => x + CELL_PADDING_MM,
                Align::Center => x + ((width - text_width) / 2.0).max(0.0),
            };
            // Vertically centered in the cell.
            let baseline = self.y + 0.5 * height + 0.3 * self.font_size_pt * MM_PER_PT;
            self.push_text(text_x, baseline, text);
        }

        self.y += height;
    }

    fn multi_cell(&mut self, width: f32, line_height: f32, text: &str, align: Align) {
        let width = if width <= 0.0 {
            self.geometry.printable_width()
        } else {
            width.min(self.geometry.printable_width())
        };
        let lines = wrap_lines(
            text,
            get_metrics(self.font),
            self.font_size_pt,
            width - 2.0 * CELL_PADDING_MM,
        );
        if lines.is_empty() {
            self.cell(width, line_height, "", align, false);
            return;
        }
        for line in &lines {
            self.cell(width, line_height, line, align, false);
        }
    }

    fn ln(&mut self, height: f32) {
        self.y += height;
    }
}

fn font_resource_name(style: FontStyle) -> &'static str {
    match style {
        FontStyle::Regular => "F1",
        FontStyle::Bold => "F2",
    }
}

fn font_dictionary(style: FontStyle) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => style.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn rgb_operands(color: Rgb) -> Vec<Object> {
    let Rgb(r, g, b) = color;
    [r, g, b]
        .into_iter()
        .map(|c| Object::Real(f32::from(c) / 255.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Margins, PageGeometry};
    use crate::render::writer::HeaderLine;

    fn text_operands(writer: &PdfWriter) -> Vec<Vec<u8>> {
        writer
            .pages
            .iter()
            .flatten()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_finish_produces_pdf_bytes() {
        let mut writer = PdfWriter::new(PageGeometry::a4());
        writer.add_page();
        writer.set_font(FontStyle::Regular, 10.0);
        writer.cell(0.0, 6.0, "Hello", Align::Left, false);
        let bytes = writer.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
    }

    #[test]
    fn test_empty_writer_still_emits_one_page() {
        let bytes = PdfWriter::new(PageGeometry::a4()).finish().unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_page_breaks_before_crossing_bottom_margin() {
        let geometry = PageGeometry::a4();
        let mut writer = PdfWriter::new(geometry);
        writer.add_page();
        // 267mm of printable height / 6mm lines = 44 lines per page.
        for i in 0..100 {
            writer.cell(0.0, 6.0, &format!("line {i}"), Align::Left, false);
            assert!(writer.y <= geometry.content_bottom() + 1e-3);
        }
        assert_eq!(writer.page_count(), 3);
    }

    #[test]
    fn test_running_header_repeats_on_each_page() {
        let mut writer = PdfWriter::new(PageGeometry::a4());
        writer.set_running_header(RunningHeader {
            lines: vec![HeaderLine {
                text: "JANE DOE".to_string(),
                style: FontStyle::Bold,
                size_pt: 18.0,
                line_height: 10.0,
            }],
            gap_after: 5.0,
        });
        writer.add_page();
        writer.set_font(FontStyle::Regular, 10.0);
        for _ in 0..60 {
            writer.cell(0.0, 6.0, "body", Align::Left, false);
        }
        assert_eq!(writer.page_count(), 2);
        let headers = text_operands(&writer)
            .into_iter()
            .filter(|t| t == b"JANE DOE")
            .count();
        assert_eq!(headers, 2);
        // Header restores the body font.
        assert_eq!(writer.font, FontStyle::Regular);
    }

    fn assert_drawn_lines_fit(writer: &PdfWriter, size_pt: f32) {
        let metrics = get_metrics(writer.font);
        let max = writer.geometry().printable_width() - 2.0 * CELL_PADDING_MM;
        for line in text_operands(writer) {
            let drawn = metrics.measure_bytes(&line) * size_pt * MM_PER_PT;
            assert!(drawn <= max + 1e-3, "{drawn}mm > {max}mm");
        }
    }

    #[test]
    fn test_multi_cell_wraps_long_text() {
        let mut writer = PdfWriter::new(PageGeometry::a4());
        writer.add_page();
        writer.set_font(FontStyle::Regular, 10.0);
        let long = "word ".repeat(120);
        writer.multi_cell(0.0, 6.0, &long, Align::Left);
        assert!(text_operands(&writer).len() > 1);
        assert_drawn_lines_fit(&writer, 10.0);
    }

    #[test]
    fn test_multi_cell_wide_win_ansi_text_stays_inside_margins() {
        let mut writer = PdfWriter::new(PageGeometry::a4());
        writer.add_page();
        writer.set_font(FontStyle::Regular, 10.0);
        let text = "Led teams — shipped — scaled — ".repeat(30);
        writer.multi_cell(0.0, 6.0, &text, Align::Left);
        assert!(text_operands(&writer).len() > 1);
        assert_drawn_lines_fit(&writer, 10.0);

        let mut writer = PdfWriter::new(PageGeometry::a4());
        writer.add_page();
        writer.set_font(FontStyle::Bold, 12.0);
        writer.multi_cell(0.0, 6.0, &"ÆØÅ ÉÖÜ ŒÐÞ ".repeat(40), Align::Left);
        assert!(text_operands(&writer).len() > 1);
        assert_drawn_lines_fit(&writer, 12.0);
    }

    #[test]
    fn test_multi_cell_with_blank_text_advances_one_line() {
        let mut writer = PdfWriter::new(PageGeometry::a4());
        writer.add_page();
        let before = writer.y;
        writer.multi_cell(0.0, 6.0, "  ", Align::Left);
        assert!((writer.y - before - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_custom_geometry_is_respected() {
        let geometry = PageGeometry::new(216.0, 279.0, Margins::uniform(20.0)).unwrap();
        let mut writer = PdfWriter::new(geometry);
        writer.add_page();
        assert!((writer.y - 20.0).abs() < f32::EPSILON);
        assert!((writer.geometry().printable_width() - 176.0).abs() < 1e-4);
    }
}
