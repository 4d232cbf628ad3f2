//! Album - owner of the live scene, its command log and the checkpoints
//!
//! Every mutation validates against the live scene, applies itself there,
//! and only then appends its record, so the live scene always equals a
//! full replay of the log. Everything handed back to callers is a copy.

use std::fmt;
use tracing::{debug, info};

use crate::checkpoint::{Checkpoint, CheckpointRegistry};
use crate::command::{Command, CommandLog};
use crate::error::{AlbumError, AlbumResult};
use crate::factory::{ShapeFactory, ShapeParams};
use crate::scene::Scene;
use crate::shape::{Point, Rgb};

#[derive(Debug, Default)]
pub struct Album {
    scene: Scene,
    log: CommandLog,
    checkpoints: CheckpointRegistry,
}

impl Album {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Mutation API ---

    pub fn create_shape(&mut self, name: &str, kind: &str, params: ShapeParams) -> AlbumResult<()> {
        let shape = ShapeFactory::create(name, kind, params).map_err(|e| self.reject(e))?;
        self.record(Command::Create {
            name: shape.name().to_string(),
            kind: shape.kind(),
            extent: shape.extent(),
            position: shape.position(),
            color: shape.color(),
        })
    }

    pub fn remove_shape(&mut self, name: &str) -> AlbumResult<()> {
        self.record(Command::Remove {
            name: name.to_string(),
        })
    }

    pub fn set_color(&mut self, name: &str, color: Rgb) -> AlbumResult<()> {
        self.record(Command::SetColor {
            name: name.to_string(),
            color,
        })
    }

    pub fn set_position(&mut self, name: &str, position: Point) -> AlbumResult<()> {
        self.record(Command::SetPosition {
            name: name.to_string(),
            position,
        })
    }

    pub fn set_extent_x(&mut self, name: &str, value: f64) -> AlbumResult<()> {
        self.record(Command::SetExtentX {
            name: name.to_string(),
            value,
        })
    }

    pub fn set_extent_y(&mut self, name: &str, value: f64) -> AlbumResult<()> {
        self.record(Command::SetExtentY {
            name: name.to_string(),
            value,
        })
    }

    /// Empty the live scene and discard the command log. Checkpoints stay.
    pub fn clear_working_state(&mut self) {
        debug!(
            shapes = self.scene.len(),
            records = self.log.len(),
            "clearing working state"
        );
        self.scene = Scene::new();
        self.log.clear();
    }

    /// Apply `command` to the live scene, logging it only if it succeeded.
    fn record(&mut self, command: Command) -> AlbumResult<()> {
        if let Err(e) = command.apply(&mut self.scene) {
            return Err(self.reject(e));
        }
        self.append(command);
        Ok(())
    }

    fn append(&mut self, command: Command) {
        let tag = command.tag();
        let shape = command.shape_name().to_string();
        let index = self.log.append(command);
        debug!(index, tag, shape = %shape, "mutation recorded");
    }

    fn reject(&self, err: AlbumError) -> AlbumError {
        debug!(error = %err, "mutation rejected");
        err
    }

    // --- Read API ---

    /// Copy of the live scene.
    pub fn current_scene(&self) -> Scene {
        self.scene.clone()
    }

    /// Number of records in the command log.
    pub fn history_len(&self) -> usize {
        self.log.len()
    }

    /// Scenes right after each mutation in `lower..=upper`, rebuilt from the log.
    pub fn history_range(&self, lower: usize, upper: usize) -> AlbumResult<Vec<Scene>> {
        self.log.replay_range(lower, upper)
    }

    /// Every scene in the edit history; empty when nothing has been recorded.
    pub fn whole_history(&self) -> AlbumResult<Vec<Scene>> {
        if self.log.is_empty() {
            return Ok(Vec::new());
        }
        self.log.replay_range(0, self.log.len() - 1)
    }

    // --- Checkpoint API ---

    /// Freeze a copy of the live scene under a fresh id.
    pub fn take_checkpoint(&mut self, description: &str) -> AlbumResult<Checkpoint> {
        let checkpoint = self.checkpoints.capture(description, &self.scene)?;
        info!(
            id = checkpoint.id(),
            total = self.checkpoints.len(),
            "album checkpoint taken"
        );
        Ok(checkpoint)
    }

    pub fn get_checkpoint(&self, id: &str) -> AlbumResult<Option<Checkpoint>> {
        self.checkpoints.get(id)
    }

    /// Zero-based position of `id` in capture order, `None` if unknown.
    pub fn checkpoint_index(&self, id: &str) -> AlbumResult<Option<usize>> {
        self.checkpoints.index_of(id)
    }

    pub fn list_checkpoints(&self) -> Vec<Checkpoint> {
        self.checkpoints.list()
    }

    pub fn checkpoint_ids(&self) -> Vec<String> {
        self.checkpoints.ids()
    }
}

/// Full dump: every historical scene, then the checkpoint ids, then each checkpoint.
impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let history = self.whole_history().map_err(|_| fmt::Error)?;
        for scene in &history {
            write!(f, "{}\n==========\n", scene)?;
        }
        writeln!(f)?;

        let ids = self.checkpoint_ids();
        write!(f, "List of snapshots taken before reset: [{}]\n\n", ids.join(", "))?;

        writeln!(f, "Printing Snapshots")?;
        writeln!(f)?;
        let rendered: Vec<String> = self
            .list_checkpoints()
            .iter()
            .map(ToString::to_string)
            .collect();
        write!(f, "{}", rendered.join("\n\n"))
    }
}
