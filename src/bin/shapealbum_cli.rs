//! Shape Album CLI
//!
//! Commands: render, history, checkpoints
//! Runs a command script, then outputs HTML or JSON
//! Returns non-zero on IO/config failure (1) or script failure (2)

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use shapealbum_core::{script, Album, HtmlRenderer, RenderConfig};

#[derive(Parser)]
#[command(name = "shapealbum-cli", version)]
#[command(about = "Shape Album CLI - replayable shape scenes and checkpoints")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log mutations and replays to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every checkpoint to an HTML document
    Render {
        /// Command script
        #[arg(short, long)]
        input: PathBuf,

        /// Output HTML file
        #[arg(short, long, default_value = "photo_album.html")]
        output: PathBuf,

        /// JSON render config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Canvas width override (px)
        #[arg(long)]
        width: Option<u32>,

        /// Canvas height override (px)
        #[arg(long)]
        height: Option<u32>,
    },

    /// Print the replayed edit history as JSON
    History {
        /// Command script
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print all checkpoints as JSON
    Checkpoints {
        /// Command script
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(error: impl std::fmt::Display, code: u8) -> ExitCode {
    let output = serde_json::json!({
        "success": false,
        "error": error.to_string(),
    });
    println!("{}", output);
    ExitCode::from(code)
}

fn load_album(input: &Path) -> Result<Album, ExitCode> {
    let source = fs::read_to_string(input)
        .map_err(|e| fail(format!("Failed to read {}: {}", input.display(), e), 1))?;
    let mut album = Album::new();
    script::run(&source, &mut album).map_err(|e| fail(e, 2))?;
    Ok(album)
}

fn print_json(value: &impl serde::Serialize) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => fail(e, 1),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Render { input, output, config, width, height } => {
            let mut render_config = match config {
                Some(path) => match RenderConfig::load(&path) {
                    Ok(c) => c,
                    Err(e) => return fail(e, 1),
                },
                None => RenderConfig::default(),
            };
            if let Some(w) = width {
                render_config.width = w;
            }
            if let Some(h) = height {
                render_config.height = h;
            }
            if let Err(e) = render_config.validate() {
                return fail(e, 1);
            }

            let album = match load_album(&input) {
                Ok(a) => a,
                Err(code) => return code,
            };
            let checkpoints = album.list_checkpoints();
            let html = HtmlRenderer::new(render_config).document(&checkpoints);
            if let Err(e) = fs::write(&output, html) {
                return fail(format!("Failed to write {}: {}", output.display(), e), 1);
            }

            print_json(&serde_json::json!({
                "success": true,
                "output": output.display().to_string(),
                "checkpoints": checkpoints.len(),
            }))
        }

        Commands::History { input } => {
            let album = match load_album(&input) {
                Ok(a) => a,
                Err(code) => return code,
            };
            match album.whole_history() {
                Ok(history) => print_json(&serde_json::json!({
                    "success": true,
                    "history": history,
                })),
                Err(e) => fail(e, 2),
            }
        }

        Commands::Checkpoints { input } => {
            let album = match load_album(&input) {
                Ok(a) => a,
                Err(code) => return code,
            };
            print_json(&serde_json::json!({
                "success": true,
                "ids": album.checkpoint_ids(),
                "checkpoints": album.list_checkpoints(),
            }))
        }
    }
}
