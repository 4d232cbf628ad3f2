//! Shape Factory - builds a validated shape from a kind tag

use tracing::trace;

use crate::error::AlbumResult;
use crate::shape::{Extent, Point, Rgb, Shape, ShapeKind};

/// Construction parameters for one shape, as they arrive from a caller.
#[derive(Debug, Clone, Copy)]
pub struct ShapeParams {
    pub extent: Extent,
    pub position: Point,
    pub color: Rgb,
}

pub struct ShapeFactory;

impl ShapeFactory {
    /// Create a shape of the kind named by `kind`.
    ///
    /// Checks run in a fixed order: kind, name, extents, color. The first
    /// failing check decides the error.
    pub fn create(name: &str, kind: &str, params: ShapeParams) -> AlbumResult<Shape> {
        let kind: ShapeKind = kind.parse()?;
        Self::create_kind(name, kind, params)
    }

    /// Same as [`ShapeFactory::create`] with an already-parsed kind.
    pub fn create_kind(name: &str, kind: ShapeKind, params: ShapeParams) -> AlbumResult<Shape> {
        trace!(name, %kind, "building shape");
        Shape::new(name, kind, params.extent, params.position, params.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlbumError;

    fn params(ext_x: f64, r: f64) -> ShapeParams {
        ShapeParams {
            extent: Extent::new(ext_x, 1.0),
            position: Point::new(0.0, 0.0),
            color: Rgb::new(r, 0.0, 0.0),
        }
    }

    #[test]
    fn creates_each_kind() {
        let rect = ShapeFactory::create("r", "rectangle", params(1.0, 0.0)).unwrap();
        assert_eq!(rect.kind(), ShapeKind::Rectangle);

        let ellipse = ShapeFactory::create("e", "ellipse", params(1.0, 0.0)).unwrap();
        assert_eq!(ellipse.kind(), ShapeKind::Ellipse);
        assert_eq!(ellipse.name(), "e");
    }

    #[test]
    fn validation_failures_are_typed() {
        assert!(matches!(
            ShapeFactory::create("a b", "rectangle", params(1.0, 0.0)),
            Err(AlbumError::InvalidName { .. })
        ));
        assert!(matches!(
            ShapeFactory::create("r", "triangle", params(1.0, 0.0)),
            Err(AlbumError::UnsupportedKind { .. })
        ));
        assert!(matches!(
            ShapeFactory::create("r", "rectangle", params(-1.0, 0.0)),
            Err(AlbumError::InvalidExtent { .. })
        ));
        assert!(matches!(
            ShapeFactory::create("r", "rectangle", params(1.0, 1.5)),
            Err(AlbumError::InvalidColor { .. })
        ));
    }

    #[test]
    fn kind_is_checked_before_name() {
        let err = ShapeFactory::create("", "hexagon", params(1.0, 0.0)).unwrap_err();
        assert!(matches!(err, AlbumError::UnsupportedKind { kind, .. } if kind == "hexagon"));
    }
}
