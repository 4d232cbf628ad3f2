//! Command Log - append-only record of scene mutations
//!
//! Each record carries the exact arguments of one accepted mutation. Applying
//! the full sequence to an empty scene rebuilds the live scene; applying a
//! prefix rebuilds the scene as it stood after that many mutations.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AlbumError, AlbumResult};
use crate::factory::{ShapeFactory, ShapeParams};
use crate::scene::Scene;
use crate::shape::{Extent, Point, Rgb, ShapeKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    Create {
        name: String,
        kind: ShapeKind,
        extent: Extent,
        position: Point,
        color: Rgb,
    },
    Remove {
        name: String,
    },
    SetColor {
        name: String,
        color: Rgb,
    },
    SetPosition {
        name: String,
        position: Point,
    },
    #[serde(rename = "SET_XDIM")]
    SetExtentX {
        name: String,
        value: f64,
    },
    #[serde(rename = "SET_YDIM")]
    SetExtentY {
        name: String,
        value: f64,
    },
}

impl Command {
    /// Tag of the record as it appears in serialized logs.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Create { .. } => "CREATE",
            Self::Remove { .. } => "REMOVE",
            Self::SetColor { .. } => "SET_COLOR",
            Self::SetPosition { .. } => "SET_POSITION",
            Self::SetExtentX { .. } => "SET_XDIM",
            Self::SetExtentY { .. } => "SET_YDIM",
        }
    }

    /// Name of the shape the record targets.
    pub fn shape_name(&self) -> &str {
        match self {
            Self::Create { name, .. }
            | Self::Remove { name }
            | Self::SetColor { name, .. }
            | Self::SetPosition { name, .. }
            | Self::SetExtentX { name, .. }
            | Self::SetExtentY { name, .. } => name.as_str(),
        }
    }

    /// Perform this mutation on `scene`.
    ///
    /// The same code path serves the live scene and every replay, so a
    /// record always has the same effect wherever it is applied. On error
    /// the scene is left untouched.
    pub fn apply(&self, scene: &mut Scene) -> AlbumResult<()> {
        match self {
            Self::Create {
                name,
                kind,
                extent,
                position,
                color,
            } => {
                if scene.contains(name) {
                    return Err(AlbumError::DuplicateName {
                        op: "create_shape",
                        name: name.clone(),
                    });
                }
                let shape = ShapeFactory::create_kind(
                    name,
                    *kind,
                    ShapeParams {
                        extent: *extent,
                        position: *position,
                        color: *color,
                    },
                )?;
                scene.add_shape(shape)
            }
            Self::Remove { name } => scene.remove_shape(name).map(|_| ()),
            Self::SetColor { name, color } => scene.shape_mut("set_color", name)?.set_color(*color),
            Self::SetPosition { name, position } => {
                scene.shape_mut("set_position", name)?.set_position(*position)
            }
            Self::SetExtentX { name, value } => {
                scene.shape_mut("set_extent_x", name)?.set_extent_x(*value)
            }
            Self::SetExtentY { name, value } => {
                scene.shape_mut("set_extent_y", name)?.set_extent_y(*value)
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommandLog {
    records: Vec<Command>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return its index.
    pub fn append(&mut self, command: Command) -> usize {
        self.records.push(command);
        self.records.len() - 1
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Command> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[Command] {
        &self.records
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }

    /// Rebuild the scene as it stood after the first `count` records.
    #[tracing::instrument(skip(self), fields(log_len = self.records.len()))]
    pub fn replay(&self, count: usize) -> AlbumResult<Scene> {
        let mut scene = Scene::new();
        for record in self.records.iter().take(count) {
            record.apply(&mut scene)?;
        }
        Ok(scene)
    }

    /// Scenes observed right after each record in `lower..=upper`.
    ///
    /// Records before `lower` are applied silently to reach the starting
    /// state. Every returned scene is an independent copy.
    #[tracing::instrument(skip(self), fields(log_len = self.records.len()))]
    pub fn replay_range(&self, lower: usize, upper: usize) -> AlbumResult<Vec<Scene>> {
        if upper < lower || upper >= self.records.len() {
            return Err(AlbumError::InvalidRange {
                op: "history_range",
                lower,
                upper,
                len: self.records.len(),
            });
        }

        let mut scene = self.replay(lower)?;
        let mut frames = Vec::with_capacity(upper - lower + 1);
        for record in &self.records[lower..=upper] {
            record.apply(&mut scene)?;
            frames.push(scene.clone());
        }
        debug!(lower, upper, frames = frames.len(), "replayed history range");
        Ok(frames)
    }
}
