//! Text extraction: uploaded PDF bytes -> plain text.
//!
//! Extraction is synchronous and CPU-bound; the pipeline calls it on the blocking pool.

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use thiserror::Error;
use tracing::{debug, warn};

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("the uploaded file is not a PDF")]
    NotPdf,

    #[error("the PDF could not be read: {0}")]
    Unreadable(String),

    #[error("the PDF contains no extractable text")]
    NoText,
}

/// Extraction seam. Implementations must be callable from any blocking thread.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Production extractor backed by `pdf-extract`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        if !looks_like_pdf(bytes) {
            return Err(ExtractionError::NotPdf);
        }

        // pdf-extract panics on some malformed inputs instead of returning an error.
        let text = contain_panics(|| pdf_extract::extract_text_from_mem(bytes))
            .map_err(|message| {
                warn!(panic = %message, "PDF parser panicked on {} byte upload", bytes.len());
                ExtractionError::Unreadable("parser aborted on malformed input".into())
            })?
            .map_err(|e| ExtractionError::Unreadable(e.to_string()))?;

        if text.trim().is_empty() {
            return Err(ExtractionError::NoText);
        }

        debug!("Extracted {} chars from {} byte PDF", text.len(), bytes.len());
        Ok(text)
    }
}

thread_local! {
    static CONTAINING_PANIC: Cell<bool> = const { Cell::new(false) };
}

static CONTAINMENT_HOOK: Once = Once::new();

/// Wraps the process panic hook once. Panics raised inside `contain_panics` on the
/// current thread are not printed to stderr; they are logged by the caller instead.
/// Panics anywhere else still reach the previous hook.
fn install_containment_hook() {
    CONTAINMENT_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !CONTAINING_PANIC.with(Cell::get) {
                previous(info);
            }
        }));
    });
}

/// Runs `f`, turning a panic into `Err(panic message)`.
fn contain_panics<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    install_containment_hook();
    let outer = CONTAINING_PANIC.with(|flag| flag.replace(true));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    CONTAINING_PANIC.with(|flag| flag.set(outer));
    result.map_err(|payload| panic_message(payload.as_ref()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string())
}

/// True when the buffer starts with the PDF header, allowing leading whitespace.
fn looks_like_pdf(bytes: &[u8]) -> bool {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    bytes[start..].starts_with(PDF_MAGIC)
}
