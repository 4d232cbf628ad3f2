//! Checkpoints - immutable, uniquely identified scene captures
//!
//! The registry hands out clones only; stored checkpoints are never
//! mutated or removed.

use chrono::{Duration, Local, NaiveDateTime, SubsecRound};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::info;

use crate::error::{AlbumError, AlbumResult};
use crate::hashing::scene_digest;
use crate::scene::Scene;

const ID_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";
const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

#[derive(Debug, Clone, Serialize)]
pub struct Checkpoint {
    id: String,
    timestamp: String,
    description: String,
    created_at: NaiveDateTime,
    scene_digest: String,
    scene: Scene,
}

impl Checkpoint {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Capture instant rendered as `dd-mm-yyyy HH:MM:SS`.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// SHA-256 of the scene as captured.
    pub fn scene_digest(&self) -> &str {
        &self.scene_digest
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the captured scene.
    pub fn into_scene(self) -> Scene {
        self.scene
    }
}

/// Checkpoints compare by id.
impl PartialEq for Checkpoint {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Snapshot ID: {}", self.id)?;
        writeln!(f, "Timestamp: {}", self.timestamp)?;
        writeln!(f, "Description: {}", self.description)?;
        writeln!(f, "Shape Information:")?;
        write!(f, "{}", self.scene)
    }
}

/// Keyed store of checkpoints, remembering capture order.
#[derive(Debug, Default)]
pub struct CheckpointRegistry {
    order: Vec<String>,
    entries: HashMap<String, Checkpoint>,
    last_instant: Option<NaiveDateTime>,
}

impl CheckpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture `scene` at the current local time.
    pub fn capture(&mut self, description: &str, scene: &Scene) -> AlbumResult<Checkpoint> {
        self.capture_at(Local::now().naive_local(), description, scene)
    }

    /// Capture `scene` as if the clock read `now`.
    ///
    /// Ids come from `now` truncated to microseconds. A reading that is not
    /// strictly after the previous capture is advanced to one microsecond
    /// past it, so ids stay unique and ordered even when the clock stalls
    /// or steps backwards.
    pub fn capture_at(
        &mut self,
        now: NaiveDateTime,
        description: &str,
        scene: &Scene,
    ) -> AlbumResult<Checkpoint> {
        let instant = self.next_instant(now);
        let checkpoint = Checkpoint {
            id: instant.format(ID_FORMAT).to_string(),
            timestamp: instant.format(TIMESTAMP_FORMAT).to_string(),
            description: description.to_string(),
            created_at: instant,
            scene_digest: scene_digest(scene)?,
            scene: scene.clone(),
        };

        self.last_instant = Some(instant);
        self.order.push(checkpoint.id.clone());
        self.entries.insert(checkpoint.id.clone(), checkpoint.clone());
        info!(
            id = %checkpoint.id,
            shapes = checkpoint.scene.len(),
            "checkpoint captured"
        );
        Ok(checkpoint)
    }

    fn next_instant(&self, now: NaiveDateTime) -> NaiveDateTime {
        let now = now.trunc_subsecs(6);
        match self.last_instant {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        }
    }

    /// A copy of the checkpoint with this id, if any.
    pub fn get(&self, id: &str) -> AlbumResult<Option<Checkpoint>> {
        if id.is_empty() {
            return Err(AlbumError::MissingId { op: "get_checkpoint" });
        }
        Ok(self.entries.get(id).cloned())
    }

    /// Zero-based capture position of `id`.
    pub fn index_of(&self, id: &str) -> AlbumResult<Option<usize>> {
        if id.is_empty() {
            return Err(AlbumError::MissingId {
                op: "checkpoint_index",
            });
        }
        Ok(self.order.iter().position(|known| known == id))
    }

    /// Copies of every checkpoint in capture order.
    pub fn list(&self) -> Vec<Checkpoint> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id).cloned())
            .collect()
    }

    pub fn ids(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Extent, Point, Rgb, Shape, ShapeKind};
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32, micro: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_micro_opt(h, m, s, micro)
            .unwrap()
    }

    fn one_shape_scene() -> Scene {
        let mut scene = Scene::new();
        scene
            .add_shape(
                Shape::new(
                    "r1",
                    ShapeKind::Rectangle,
                    Extent::new(1.0, 1.0),
                    Point::new(0.0, 0.0),
                    Rgb::new(0.0, 1.0, 0.0),
                )
                .unwrap(),
            )
            .unwrap();
        scene
    }

    #[test]
    fn id_and_timestamp_formats() {
        let mut registry = CheckpointRegistry::new();
        let cp = registry
            .capture_at(at(14, 5, 9, 42), "first", &Scene::new())
            .unwrap();
        assert_eq!(cp.id(), "2024-03-09T14:05:09.000042");
        assert_eq!(cp.timestamp(), "09-03-2024 14:05:09");
        assert_eq!(cp.description(), "first");
    }

    #[test]
    fn truncates_to_microseconds() {
        let mut registry = CheckpointRegistry::new();
        let raw = at(1, 2, 3, 0) + Duration::nanoseconds(123_456_789);
        let cp = registry.capture_at(raw, "", &Scene::new()).unwrap();
        assert_eq!(cp.id(), "2024-03-09T01:02:03.123456");
    }

    #[test]
    fn identical_clock_readings_get_distinct_ids() {
        let mut registry = CheckpointRegistry::new();
        let now = at(9, 0, 0, 0);
        let a = registry.capture_at(now, "a", &Scene::new()).unwrap();
        let b = registry.capture_at(now, "b", &Scene::new()).unwrap();
        let c = registry.capture_at(now - Duration::seconds(5), "c", &Scene::new()).unwrap();

        assert_ne!(a.id(), b.id());
        assert_eq!(b.id(), "2024-03-09T09:00:00.000001");
        assert_eq!(c.id(), "2024-03-09T09:00:00.000002");
        assert_eq!(registry.index_of(c.id()).unwrap(), Some(2));
    }

    #[test]
    fn lookups_return_copies() {
        let mut registry = CheckpointRegistry::new();
        let scene = one_shape_scene();
        let cp = registry.capture("s1", &scene).unwrap();

        let fetched = registry.get(cp.id()).unwrap().unwrap();
        let mut scene_copy = fetched.into_scene();
        scene_copy.remove_shape("r1").unwrap();

        let again = registry.get(cp.id()).unwrap().unwrap();
        assert_eq!(again.scene().len(), 1);
        assert_eq!(again.scene_digest(), scene_digest(&scene).unwrap());
    }

    #[test]
    fn missing_and_empty_ids() {
        let registry = CheckpointRegistry::new();
        assert!(registry.get("nope").unwrap().is_none());
        assert_eq!(registry.index_of("nope").unwrap(), None);
        assert!(matches!(registry.get(""), Err(AlbumError::MissingId { .. })));
        assert!(matches!(registry.index_of(""), Err(AlbumError::MissingId { .. })));
    }

    #[test]
    fn display_lists_header_and_shapes() {
        let mut registry = CheckpointRegistry::new();
        let cp = registry
            .capture_at(at(10, 0, 0, 0), "hello", &one_shape_scene())
            .unwrap();
        let text = cp.to_string();
        assert!(text.starts_with("Snapshot ID: 2024-03-09T10:00:00.000000\n"));
        assert!(text.contains("Description: hello\n"));
        assert!(text.contains("Shape Information:\nName: r1"));
    }
}
