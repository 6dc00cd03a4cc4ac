//! The `DocumentWriter` capability: the small cell-based drawing surface the résumé
//! renderer needs. Implementations own pagination; callers never position text
//! absolutely, they only stack cells top to bottom.

use crate::layout::{FontStyle, PageGeometry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One line of the running header, drawn centered at the top of every page.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderLine {
    pub text: String,
    pub style: FontStyle,
    pub size_pt: f32,
    pub line_height: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunningHeader {
    pub lines: Vec<HeaderLine>,
    /// Vertical space after the last header line.
    pub gap_after: f32,
}

pub trait DocumentWriter {
    fn geometry(&self) -> &PageGeometry;

    /// Header repeated at the top of each page added after this call.
    fn set_running_header(&mut self, header: RunningHeader);

    fn add_page(&mut self);

    fn set_font(&mut self, style: FontStyle, size_pt: f32);

    fn set_fill_color(&mut self, color: Rgb);

    fn set_text_color(&mut self, color: Rgb);

    /// Single-line cell starting at the left margin, `width` wide. Moves to the next line.
    /// Breaks to a new page first if the cell would cross the bottom margin.
    fn cell(&mut self, width: f32, height: f32, text: &str, align: Align, fill: bool);

    /// Wraps `text` to `width` and emits one cell per line.
    fn multi_cell(&mut self, width: f32, line_height: f32, text: &str, align: Align);

    /// Vertical gap.
    fn ln(&mut self, height: f32);
}
