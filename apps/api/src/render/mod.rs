// Document rendering: Profile -> paginated PDF.
// `render_profile` only talks to the `DocumentWriter` trait; `PdfWriter` is the lopdf backend.

pub mod pdf;
pub mod resume;
pub mod writer;

use bytes::Bytes;
use thiserror::Error;

use crate::layout::PageGeometry;
use crate::models::profile::Profile;

pub use pdf::PdfWriter;
pub use resume::render_profile;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Rendering failures. Geometry is validated when `PageGeometry` is built, so any of
/// these reaching a caller is a programming defect rather than a user-facing condition.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF serialization failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("PDF write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// A finished download: bytes plus the suggested file name.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Bytes,
    pub file_name: String,
    pub page_count: usize,
}

/// Renders `profile` into a PDF with the given page geometry.
pub fn render_resume_pdf(
    profile: &Profile,
    geometry: PageGeometry,
) -> Result<RenderedDocument, RenderError> {
    let mut writer = PdfWriter::new(geometry);
    render_profile(&mut writer, profile);
    let page_count = writer.page_count();
    let bytes = writer.finish()?;

    Ok(RenderedDocument {
        bytes: Bytes::from(bytes),
        file_name: profile.document_file_name(),
        page_count,
    })
}
