//! # Seven Segment Application Entry Point
//!
//! This binary crate wires the library together: it loads the configuration, generates a digit,
//! applies a digit or segment mask through the controller and hands the result to one of the
//! renderers (SVG document, JSON geometry dump or terminal preview). The `demo` command runs the
//! animated showcase in the terminal.

// Test modules
#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{debug, info};
use seven_seg_lib::config::{Config, CONFIG_FILE};
use seven_seg_lib::controller::{DisplayController, SegmentController};
use seven_seg_lib::raster::{draw_digit, AsciiCanvas};
use seven_seg_lib::svg::{create_seven_segment_svg, DigitLayout, SvgPart};
use seven_seg_lib::{demo, geometry, mask_from_raw, SegmentName, ALL_OFF};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "seven-seg", version, about = "Procedural seven-segment digit generator")]
struct Cli {
    /// Configuration file (defaults apply when it is missing)
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write the digit as an SVG document
    Svg {
        #[command(flatten)]
        state: SegmentSelection,
        /// Output file; stdout when omitted
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Print the generated geometry as JSON
    Geometry,
    /// Print the digit as text
    Ascii {
        #[command(flatten)]
        state: SegmentSelection,
    },
    /// Run the counting / random segment animation in the terminal
    Demo {
        /// Number of full cycles, 0 runs forever
        #[arg(long, default_value_t = 1)]
        cycles: u32,
    },
    /// Write the default configuration to a file
    InitConfig {
        #[arg(default_value = CONFIG_FILE)]
        path: PathBuf,
    },
}

/// Which segments to light. With no option every segment is on.
#[derive(Debug, Args)]
struct SegmentSelection {
    /// Decimal digit to show, wrapped into 0-9
    #[arg(long, allow_hyphen_values = true, conflicts_with_all = ["segments", "lit"])]
    digit: Option<i64>,
    /// Raw abcdefgDP mask: decimal, 0x.. or 0b..; only the low 8 bits are used
    #[arg(long, value_parser = parse_mask, conflicts_with = "lit")]
    segments: Option<i64>,
    /// Segments to light by name, e.g. `a,b,dp`
    #[arg(long, value_delimiter = ',')]
    lit: Vec<SegmentName>,
}

impl SegmentSelection {
    fn apply(&self, controller: &mut SegmentController<SvgPart>) {
        match (self.digit, self.segments) {
            (Some(digit), _) => controller.set_digit(digit),
            (None, Some(raw)) => controller.set_segments(mask_from_raw(raw)),
            (None, None) if !self.lit.is_empty() => {
                let mask = self.lit.iter().fold(ALL_OFF, |mask, name| mask | name.bit());
                controller.set_segments(mask);
            }
            (None, None) => controller.on(),
        }
    }
}

/// Parse a mask written in decimal, hexadecimal (`0x`) or binary (`0b`).
fn parse_mask(input: &str) -> Result<i64, String> {
    let cleaned = input.replace('_', "");
    let (digits, radix) = if let Some(hex) = cleaned.strip_prefix("0x") {
        (hex, 16)
    } else if let Some(bin) = cleaned.strip_prefix("0b") {
        (bin, 2)
    } else {
        (cleaned.as_str(), 10)
    };
    i64::from_str_radix(digits, radix).map_err(|e| format!("invalid segment mask {input:?}: {e}"))
}

/// Rasterise the controller's current state into `canvas`.
fn redraw(
    canvas: &mut AsciiCanvas,
    controller: &SegmentController<SvgPart>,
    layout: &DigitLayout,
    scale: f64,
) {
    canvas.clear();
    draw_digit(controller.parts(), layout, controller.markers(), scale, canvas)
        .unwrap_or_else(|never| match never {});
}

fn write_svg(config: &Config, state: &SegmentSelection, out: Option<PathBuf>) -> Result<()> {
    let generated = create_seven_segment_svg(&config.shape);
    let mut controller = SegmentController::with_markers(generated.parts, config.style.markers());
    state.apply(&mut controller);

    let document = seven_seg_lib::svg::render_document(controller.parts(), &generated.layout);
    match out {
        Some(path) => {
            std::fs::write(&path, document)
                .with_context(|| format!("writing {}", path.display()))?;
            info!("SVG written to {}", path.display());
        }
        None => finish_output(io::stdout().write_all(document.as_bytes()))?,
    }
    Ok(())
}

fn print_geometry(config: &Config) -> Result<()> {
    let geometry = geometry::generate(&config.shape);
    let json = serde_json::to_string_pretty(&geometry).context("serialising geometry")?;
    finish_output(writeln!(io::stdout().lock(), "{json}"))?;
    Ok(())
}

fn print_ascii(config: &Config, state: &SegmentSelection) -> Result<()> {
    let generated = create_seven_segment_svg(&config.shape);
    let mut canvas = AsciiCanvas::for_layout(&generated.layout, config.ascii.scale);
    let mut controller = SegmentController::with_markers(generated.parts, config.style.markers());
    state.apply(&mut controller);

    redraw(&mut canvas, &controller, &generated.layout, config.ascii.scale);
    finish_output(write!(io::stdout().lock(), "{canvas}"))?;
    Ok(())
}

fn run_demo(config: &Config, cycles: u32) -> Result<()> {
    let generated = create_seven_segment_svg(&config.shape);
    let layout = generated.layout;
    let scale = config.ascii.scale;
    let mut canvas = AsciiCanvas::for_layout(&layout, scale);
    let mut controller = SegmentController::with_markers(generated.parts, config.style.markers());
    controller.off();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("starting demo runtime")?;

    let mut rng = rand::thread_rng();
    let mut on_frame = |c: &SegmentController<SvgPart>| -> io::Result<()> {
        redraw(&mut canvas, c, &layout, scale);
        // Clear the terminal and home the cursor before each frame.
        let mut stdout = io::stdout().lock();
        write!(stdout, "\x1b[2J\x1b[H{canvas}")?;
        stdout.flush()
    };

    let result = rt.block_on(async {
        let mut cycle = 0;
        while cycles == 0 || cycle < cycles {
            debug!("demo cycle {}", cycle + 1);
            demo::run_cycle(&mut controller, &config.demo, &mut rng, &mut on_frame).await?;
            cycle += 1;
        }
        Ok::<(), io::Error>(())
    });
    finish_output(result).context("drawing demo frame")
}

/// Treat a closed pipe as a normal end of output.
fn finish_output(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!("output closed, stopping");
            Ok(())
        }
        other => other,
    }
}

/// Main application entry point.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Command::InitConfig { path } = &cli.command {
        Config::default()
            .save_to_path(path)
            .with_context(|| format!("writing {}", path.display()))?;
        return Ok(());
    }

    let config = Config::load_from_path(&cli.config);

    match cli.command {
        Command::Svg { state, out } => write_svg(&config, &state, out),
        Command::Geometry => print_geometry(&config),
        Command::Ascii { state } => print_ascii(&config, &state),
        Command::Demo { cycles } => run_demo(&config, cycles),
        Command::InitConfig { .. } => Ok(()),
    }
}
