//! Script interpreter - line-oriented commands driving an [`Album`]
//!
//! ```text
//! shape r1 rectangle 200 200 50 100 255 0 0
//! move r1 300 300
//! snapshot after the move
//! ```
//!
//! Colors in scripts use 0-255 channels; they are scaled into `[0, 1]`
//! before reaching the album.

use thiserror::Error;
use tracing::debug;

use crate::album::Album;
use crate::error::AlbumError;
use crate::factory::ShapeParams;
use crate::shape::{Extent, Point, Rgb};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command {verb:?}")]
    UnknownCommand { line: usize, verb: String },

    #[error("line {line}: {verb} expects {expected} arguments, got {got}")]
    WrongArity {
        line: usize,
        verb: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("line {line}: {value:?} is not a number")]
    InvalidNumber { line: usize, value: String },

    #[error("line {line}: {source}")]
    Album {
        line: usize,
        #[source]
        source: AlbumError,
    },
}

/// One parsed script line, with colors already scaled to `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Shape {
        name: String,
        kind: String,
        position: Point,
        extent: Extent,
        color: Rgb,
    },
    Color {
        name: String,
        color: Rgb,
    },
    Move {
        name: String,
        position: Point,
    },
    Resize {
        name: String,
        extent: Extent,
    },
    Remove {
        name: String,
    },
    Snapshot {
        description: String,
    },
}

/// A command together with its 1-based source line.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub command: ScriptCommand,
}

/// Parse a whole script. Blank lines and `#` comments are skipped.
pub fn parse(source: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut lines = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let line = idx + 1;
        lines.push(ScriptLine {
            line,
            command: parse_line(line, text)?,
        });
    }
    Ok(lines)
}

fn parse_line(line: usize, text: &str) -> Result<ScriptCommand, ScriptError> {
    let mut words = text.split_whitespace();
    let verb = words.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = words.collect();

    let arity = |verb: &'static str, expected: usize| {
        if args.len() == expected {
            Ok(())
        } else {
            Err(ScriptError::WrongArity {
                line,
                verb,
                expected,
                got: args.len(),
            })
        }
    };
    let num = |value: &str| {
        value.parse::<f64>().map_err(|_| ScriptError::InvalidNumber {
            line,
            value: value.to_string(),
        })
    };
    let channel = |value: &str| num(value).map(|c| c / 255.0);

    let command = match verb.as_str() {
        "shape" => {
            arity("shape", 9)?;
            ScriptCommand::Shape {
                name: args[0].to_string(),
                kind: args[1].to_string(),
                position: Point::new(num(args[2])?, num(args[3])?),
                extent: Extent::new(num(args[4])?, num(args[5])?),
                color: Rgb::new(channel(args[6])?, channel(args[7])?, channel(args[8])?),
            }
        }
        "color" => {
            arity("color", 4)?;
            ScriptCommand::Color {
                name: args[0].to_string(),
                color: Rgb::new(channel(args[1])?, channel(args[2])?, channel(args[3])?),
            }
        }
        "move" => {
            arity("move", 3)?;
            ScriptCommand::Move {
                name: args[0].to_string(),
                position: Point::new(num(args[1])?, num(args[2])?),
            }
        }
        "resize" => {
            arity("resize", 3)?;
            ScriptCommand::Resize {
                name: args[0].to_string(),
                extent: Extent::new(num(args[1])?, num(args[2])?),
            }
        }
        "remove" => {
            arity("remove", 1)?;
            ScriptCommand::Remove {
                name: args[0].to_string(),
            }
        }
        "snapshot" => ScriptCommand::Snapshot {
            description: args.join(" "),
        },
        _ => {
            return Err(ScriptError::UnknownCommand {
                line,
                verb: verb.clone(),
            })
        }
    };
    Ok(command)
}

/// Execute parsed lines against `album`, stopping at the first failure.
pub fn execute(lines: &[ScriptLine], album: &mut Album) -> Result<(), ScriptError> {
    for ScriptLine { line, command } in lines {
        let line = *line;
        let wrap = |source| ScriptError::Album { line, source };
        debug!(line, ?command, "executing script line");
        match command {
            ScriptCommand::Shape {
                name,
                kind,
                position,
                extent,
                color,
            } => album
                .create_shape(
                    name,
                    kind,
                    ShapeParams {
                        extent: *extent,
                        position: *position,
                        color: *color,
                    },
                )
                .map_err(wrap)?,
            ScriptCommand::Color { name, color } => album.set_color(name, *color).map_err(wrap)?,
            ScriptCommand::Move { name, position } => {
                album.set_position(name, *position).map_err(wrap)?
            }
            ScriptCommand::Resize { name, extent } => {
                album.set_extent_x(name, extent.x).map_err(wrap)?;
                album.set_extent_y(name, extent.y).map_err(wrap)?;
            }
            ScriptCommand::Remove { name } => album.remove_shape(name).map_err(wrap)?,
            ScriptCommand::Snapshot { description } => {
                album.take_checkpoint(description).map_err(wrap)?;
            }
        }
    }
    Ok(())
}

/// Parse and execute `source` in one step.
pub fn run(source: &str, album: &mut Album) -> Result<(), ScriptError> {
    let lines = parse(source)?;
    execute(&lines, album)
}
