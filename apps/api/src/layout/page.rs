//! Page geometry. All lengths are millimetres, origin at the top-left corner.

use thiserror::Error;

/// Smallest margin the renderer accepts on any side.
pub const MIN_MARGIN_MM: f32 = 15.0;

pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("{side} margin {value}mm is below the 15mm minimum")]
    MarginTooSmall { side: &'static str, value: f32 },

    #[error("margins leave no printable area on a {width}x{height}mm page")]
    NoPrintableArea { width: f32, height: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn uniform(value: f32) -> Self {
        Margins {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Validated page size and margins. Cannot be constructed with unsafe margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    width: f32,
    height: f32,
    margins: Margins,
}

impl PageGeometry {
    pub fn new(width: f32, height: f32, margins: Margins) -> Result<Self, GeometryError> {
        for (side, value) in [
            ("top", margins.top),
            ("right", margins.right),
            ("bottom", margins.bottom),
            ("left", margins.left),
        ] {
            if value.is_nan() || value < MIN_MARGIN_MM {
                return Err(GeometryError::MarginTooSmall { side, value });
            }
        }
        if width - margins.left - margins.right <= 0.0
            || height - margins.top - margins.bottom <= 0.0
        {
            return Err(GeometryError::NoPrintableArea { width, height });
        }
        Ok(PageGeometry {
            width,
            height,
            margins,
        })
    }

    /// A4 portrait with 15mm margins on every side.
    pub fn a4() -> Self {
        PageGeometry {
            width: A4_WIDTH_MM,
            height: A4_HEIGHT_MM,
            margins: Margins::uniform(MIN_MARGIN_MM),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Page width minus left and right margins.
    pub fn printable_width(&self) -> f32 {
        self.width - self.margins.left - self.margins.right
    }

    /// Lowest y a line may reach before a page break is needed.
    pub fn content_bottom(&self) -> f32 {
        self.height - self.margins.bottom
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry::a4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_printable_width() {
        let page = PageGeometry::a4();
        assert!((page.printable_width() - 180.0).abs() < f32::EPSILON);
        assert!((page.content_bottom() - 282.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_a4_passes_validation() {
        let page = PageGeometry::a4();
        assert_eq!(
            PageGeometry::new(page.width(), page.height(), page.margins()),
            Ok(page)
        );
    }

    #[test]
    fn test_small_margin_is_rejected() {
        let mut margins = Margins::uniform(15.0);
        margins.right = 0.0;
        let err = PageGeometry::new(210.0, 297.0, margins).unwrap_err();
        assert_eq!(
            err,
            GeometryError::MarginTooSmall {
                side: "right",
                value: 0.0
            }
        );
    }

    #[test]
    fn test_nan_margin_is_rejected() {
        let mut margins = Margins::uniform(15.0);
        margins.top = f32::NAN;
        assert!(PageGeometry::new(210.0, 297.0, margins).is_err());
    }

    #[test]
    fn test_margins_consuming_page_are_rejected() {
        let err = PageGeometry::new(40.0, 297.0, Margins::uniform(20.0)).unwrap_err();
        assert!(matches!(err, GeometryError::NoPrintableArea { .. }));
    }
}
