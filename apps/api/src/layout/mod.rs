// Layout primitives for the résumé document: page geometry, font metrics, line wrapping.
// Pure and synchronous; callers on the async side run rendering via spawn_blocking.

pub mod font_metrics;
pub mod page;
pub mod wrap;

// Re-export the public API consumed by the renderer.
pub use font_metrics::{encode_win_ansi, get_metrics, FontStyle, MM_PER_PT};
pub use page::{Margins, PageGeometry};
pub use wrap::wrap_lines;
