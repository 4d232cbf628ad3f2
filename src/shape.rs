//! Shapes - validated geometric primitives
//!
//! A shape's numeric invariants hold at all times: construction and every
//! setter validate first and only then write, so a rejected update leaves
//! the shape exactly as it was.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AlbumError, AlbumResult};

/// Tolerance applied to every numeric field when comparing shapes.
pub const EQUALITY_TOLERANCE: f64 = 0.01;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EQUALITY_TOLERANCE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = AlbumError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "rectangle" => Ok(Self::Rectangle),
            // "oval" is the legacy tag for ellipses
            "ellipse" | "oval" => Ok(Self::Ellipse),
            other => Err(AlbumError::UnsupportedKind {
                op: "create_shape",
                kind: other.to_string(),
            }),
        }
    }
}

/// Anchor point: min corner for rectangles, center for ellipses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width/height for rectangles, radii for ellipses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub x: f64,
    pub y: f64,
}

impl Extent {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// RGB color with channels in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to `[0, 255]` for 8-bit outputs.
    pub fn to_8bit(&self) -> [f64; 3] {
        [self.r * 255.0, self.g * 255.0, self.b * 255.0]
    }
}

pub(crate) fn validate_name(op: &'static str, name: &str) -> AlbumResult<()> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(AlbumError::InvalidName {
            op,
            name: name.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn validate_extent(op: &'static str, axis: char, value: f64) -> AlbumResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AlbumError::InvalidExtent { op, axis, value });
    }
    Ok(())
}

pub(crate) fn validate_position(op: &'static str, position: Point) -> AlbumResult<()> {
    if !(position.x.is_finite() && position.y.is_finite()) {
        return Err(AlbumError::InvalidPosition {
            op,
            x: position.x,
            y: position.y,
        });
    }
    Ok(())
}

pub(crate) fn validate_color(op: &'static str, color: Rgb) -> AlbumResult<()> {
    let in_range = |c: f64| (0.0..=1.0).contains(&c);
    if !(in_range(color.r) && in_range(color.g) && in_range(color.b)) {
        return Err(AlbumError::InvalidColor {
            op,
            r: color.r,
            g: color.g,
            b: color.b,
        });
    }
    Ok(())
}

/// What an external renderer needs to draw one shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Drawable {
    pub kind: ShapeKind,
    pub position: Point,
    pub extent: Extent,
    pub color: Rgb,
}

#[derive(Debug, Clone, Serialize)]
pub struct Shape {
    name: String,
    kind: ShapeKind,
    extent: Extent,
    position: Point,
    color: Rgb,
}

impl Shape {
    /// Build a shape, validating every attribute. Coordinates must be finite.
    ///
    /// Prefer [`crate::factory::ShapeFactory::create`] when the kind arrives
    /// as a string tag.
    pub fn new(
        name: impl Into<String>,
        kind: ShapeKind,
        extent: Extent,
        position: Point,
        color: Rgb,
    ) -> AlbumResult<Self> {
        let name = name.into();
        validate_name("create_shape", &name)?;
        validate_extent("create_shape", 'x', extent.x)?;
        validate_extent("create_shape", 'y', extent.y)?;
        validate_position("create_shape", position)?;
        validate_color("create_shape", color)?;
        Ok(Self {
            name,
            kind,
            extent,
            position,
            color,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn set_extent_x(&mut self, value: f64) -> AlbumResult<()> {
        validate_extent("set_extent_x", 'x', value)?;
        self.extent.x = value;
        Ok(())
    }

    pub fn set_extent_y(&mut self, value: f64) -> AlbumResult<()> {
        validate_extent("set_extent_y", 'y', value)?;
        self.extent.y = value;
        Ok(())
    }

    pub fn set_position(&mut self, position: Point) -> AlbumResult<()> {
        validate_position("set_position", position)?;
        self.position = position;
        Ok(())
    }

    pub fn set_color(&mut self, color: Rgb) -> AlbumResult<()> {
        validate_color("set_color", color)?;
        self.color = color;
        Ok(())
    }

    pub fn drawable(&self) -> Drawable {
        Drawable {
            kind: self.kind,
            position: self.position,
            extent: self.extent,
            color: self.color,
        }
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && approx_eq(self.extent.x, other.extent.x)
            && approx_eq(self.extent.y, other.extent.y)
            && approx_eq(self.position.x, other.position.x)
            && approx_eq(self.position.y, other.position.y)
            && approx_eq(self.color.r, other.color.r)
            && approx_eq(self.color.g, other.color.g)
            && approx_eq(self.color.b, other.color.b)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (anchor, ext_x, ext_y) = match self.kind {
            ShapeKind::Rectangle => ("Min corner", "Width", "Height"),
            ShapeKind::Ellipse => ("Center", "X radius", "Y radius"),
        };
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Type: {}", self.kind)?;
        write!(
            f,
            "{}: ({:.2}, {:.2}), {}: {:.2}, {}: {:.2}, Color: ({:.2}, {:.2}, {:.2})",
            anchor,
            self.position.x,
            self.position.y,
            ext_x,
            self.extent.x,
            ext_y,
            self.extent.y,
            self.color.r,
            self.color.g,
            self.color.b,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Shape {
        Shape::new(
            "r1",
            ShapeKind::Rectangle,
            Extent::new(2.0, 3.0),
            Point::new(1.0, 1.0),
            Rgb::new(0.0, 1.0, 0.0),
        )
        .unwrap()
    }

    #[test]
    fn kind_parses_canonical_and_legacy_tags() {
        assert_eq!("rectangle".parse::<ShapeKind>().unwrap(), ShapeKind::Rectangle);
        assert_eq!("ellipse".parse::<ShapeKind>().unwrap(), ShapeKind::Ellipse);
        assert_eq!("oval".parse::<ShapeKind>().unwrap(), ShapeKind::Ellipse);
        assert!(matches!(
            "triangle".parse::<ShapeKind>(),
            Err(AlbumError::UnsupportedKind { .. })
        ));
        assert!(matches!("".parse::<ShapeKind>(), Err(AlbumError::UnsupportedKind { .. })));
    }

    #[test]
    fn rejected_setter_leaves_shape_unchanged() {
        let mut shape = rect();
        let before = shape.clone();

        assert!(matches!(shape.set_extent_x(0.0), Err(AlbumError::InvalidExtent { axis: 'x', .. })));
        assert!(matches!(shape.set_extent_y(-2.0), Err(AlbumError::InvalidExtent { axis: 'y', .. })));
        assert!(matches!(
            shape.set_color(Rgb::new(0.2, 1.01, 0.0)),
            Err(AlbumError::InvalidColor { .. })
        ));
        assert!(shape.set_extent_x(f64::NAN).is_err());

        assert_eq!(shape, before);
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let mut shape = rect();
        let before = shape.clone();

        assert!(matches!(
            shape.set_position(Point::new(f64::NAN, 0.0)),
            Err(AlbumError::InvalidPosition { op: "set_position", .. })
        ));
        assert!(shape.set_position(Point::new(0.0, f64::NEG_INFINITY)).is_err());
        assert!(matches!(
            shape.set_extent_x(f64::INFINITY),
            Err(AlbumError::InvalidExtent { axis: 'x', .. })
        ));
        assert_eq!(shape, before);

        let created = Shape::new(
            "r2",
            ShapeKind::Ellipse,
            Extent::new(1.0, 1.0),
            Point::new(f64::INFINITY, 1.0),
            Rgb::default(),
        );
        assert!(matches!(created, Err(AlbumError::InvalidPosition { op: "create_shape", .. })));
        assert!(Shape::new(
            "r2",
            ShapeKind::Ellipse,
            Extent::new(1.0, f64::INFINITY),
            Point::default(),
            Rgb::default(),
        )
        .is_err());
    }

    #[test]
    fn equality_uses_tolerance() {
        let a = rect();
        let mut b = rect();
        b.set_position(Point::new(1.005, 0.995)).unwrap();
        assert_eq!(a, b);

        b.set_position(Point::new(1.02, 1.0)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn equality_requires_exact_name_and_kind() {
        let a = rect();
        let b = Shape::new(
            "r1",
            ShapeKind::Ellipse,
            Extent::new(2.0, 3.0),
            Point::new(1.0, 1.0),
            Rgb::new(0.0, 1.0, 0.0),
        )
        .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn name_validation() {
        assert!(validate_name("t", "ok_name").is_ok());
        assert!(validate_name("t", "").is_err());
        assert!(validate_name("t", "a b").is_err());
        assert!(validate_name("t", "tab\there").is_err());
    }

    #[test]
    fn display_uses_kind_specific_labels() {
        let text = rect().to_string();
        assert!(text.contains("Name: r1"));
        assert!(text.contains("Type: rectangle"));
        assert!(text.contains("Min corner: (1.00, 1.00), Width: 2.00, Height: 3.00"));
        assert!(text.contains("Color: (0.00, 1.00, 0.00)"));

        let ellipse = Shape::new(
            "c1",
            ShapeKind::Ellipse,
            Extent::new(5.0, 5.0),
            Point::new(1.0, 0.0),
            Rgb::new(1.0, 0.0, 0.0),
        )
        .unwrap();
        assert!(ellipse.to_string().contains("Center: (1.00, 0.00), X radius: 5.00, Y radius: 5.00"));
    }

    #[test]
    fn drawable_projection_mirrors_attributes() {
        let d = rect().drawable();
        assert_eq!(d.kind, ShapeKind::Rectangle);
        assert_eq!(d.extent, Extent::new(2.0, 3.0));
        assert_eq!(d.color.to_8bit(), [0.0, 255.0, 0.0]);
    }
}
