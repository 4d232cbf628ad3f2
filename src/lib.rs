//! Shape Album Core - versioned 2D scene model
//!
//! # Guarantees
//! 1. Replay is deterministic: the command log rebuilds every past scene
//! 2. Copies are isolated: nothing returned aliases internal state
//! 3. Failed operations change nothing
//! 4. Checkpoint ids are unique and capture-ordered

pub mod error;
pub mod shape;
pub mod factory;
pub mod scene;
pub mod command;
pub mod checkpoint;
pub mod album;
pub mod hashing;
pub mod script;
pub mod config;
pub mod render;

pub use error::{AlbumError, AlbumResult};
pub use shape::{Drawable, Extent, Point, Rgb, Shape, ShapeKind, EQUALITY_TOLERANCE};
pub use factory::{ShapeFactory, ShapeParams};
pub use scene::Scene;
pub use command::{Command, CommandLog};
pub use checkpoint::{Checkpoint, CheckpointRegistry};
pub use album::Album;
pub use hashing::{canonical_json, scene_digest};
pub use script::{ScriptCommand, ScriptError};
pub use config::{ConfigError, RenderConfig};
pub use render::HtmlRenderer;
