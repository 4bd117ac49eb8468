/// Trackball Terminal Demo - Drag to rotate
///
/// Renders a shape in the terminal and rotates it with a virtual trackball.
/// Controls:
///   - Left mouse drag: Rotate the shape
///   - R: Reset rotation
///   - Q/ESC: Quit
///
/// Logs go to stderr; set `RUST_LOG=debug` and redirect stderr to a file
/// to trace drags without disturbing the display.

use clap::Parser;
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;
use trackball_core::{Mesh, Shape};
use trackball_terminal::{AppConfig, AppError, TerminalApp};

/// Size of the displayed shape in world units
const SHAPE_SIZE: f32 = 2.0;

#[derive(Parser, Debug)]
#[command(name = "trackball-terminal", about = "Rotate a shape in the terminal with a mouse trackball")]
struct Cli {
    /// TOML file with viewer settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Shape to display: triangle, quad or cube
    #[arg(long)]
    shape: Option<Shape>,

    /// Trackball radius as a fraction of the terminal width
    #[arg(long)]
    radius_fraction: Option<f32>,

    /// Target frames per second
    #[arg(long)]
    fps: Option<u32>,
}

impl Cli {
    fn into_config(self) -> Result<AppConfig, AppError> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        if let Some(shape) = self.shape {
            config.shape = shape;
        }
        if let Some(fraction) = self.radius_fraction {
            config.trackball.radius_fraction = fraction;
        }
        if let Some(fps) = self.fps {
            config.target_fps = fps;
        }
        Ok(config)
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = cli.into_config()?;
    let mesh = Mesh::from_shape(config.shape, SHAPE_SIZE);

    let mut app = TerminalApp::new(mesh, &config)?;
    app.run()
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
