//! Scene - an insertion-ordered set of uniquely named shapes
//!
//! `Clone` is a deep copy: shapes own all of their data, so a cloned scene
//! shares nothing mutable with its source.

use serde::Serialize;
use std::fmt;

use crate::error::{AlbumError, AlbumResult};
use crate::shape::Shape;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape at the end of the drawing order.
    pub fn add_shape(&mut self, shape: Shape) -> AlbumResult<()> {
        if self.contains(shape.name()) {
            return Err(AlbumError::DuplicateName {
                op: "add_shape",
                name: shape.name().to_string(),
            });
        }
        self.shapes.push(shape);
        Ok(())
    }

    /// Remove a shape, returning it. Later shapes keep their relative order.
    pub fn remove_shape(&mut self, name: &str) -> AlbumResult<Shape> {
        let idx = self.position_of(name).ok_or_else(|| AlbumError::UnknownName {
            op: "remove_shape",
            name: name.to_string(),
        })?;
        Ok(self.shapes.remove(idx))
    }

    /// Look up a shape. A missing shape is `Ok(None)`; an empty name is an error.
    pub fn get_shape(&self, name: &str) -> AlbumResult<Option<&Shape>> {
        if name.is_empty() {
            return Err(AlbumError::MissingName { op: "get_shape" });
        }
        Ok(self.shapes.iter().find(|s| s.name() == name))
    }

    pub(crate) fn shape_mut(&mut self, op: &'static str, name: &str) -> AlbumResult<&mut Shape> {
        self.shapes
            .iter_mut()
            .find(|s| s.name() == name)
            .ok_or_else(|| AlbumError::UnknownName {
                op,
                name: name.to_string(),
            })
    }

    /// Shapes in insertion order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position_of(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.shapes.iter().position(|s| s.name() == name)
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, shape) in self.shapes.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", shape)?;
        }
        Ok(())
    }
}
