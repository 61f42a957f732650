#![deny(unsafe_code)]
//! CLI binary for colormix.
//!
//! Reads color tokens from a color file (default `colors.txt`) and from
//! positional arguments, combines them with the selected mode and prints the
//! resulting color in every format.

mod error;
mod input;

use clap::{ArgAction, Parser};
use colormix_blend::Mode;
use colormix_core::{Color, ColorError, DEFAULT_ALPHA};
use error::CliError;
use input::Rejected;
use std::path::PathBuf;
use std::process;
use tracing::{info, Level};

#[derive(Parser)]
#[command(
    name = "colormix",
    version,
    about = "Convert colors between hex, decimal and HSL, and combine them"
)]
struct Cli {
    /// Combination mode (mix, lowest, highest, mix-saturate). Defaults to mix.
    #[arg(short, long)]
    mode: Option<String>,

    /// Color file with one color per line [default: colors.txt, if present].
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Alpha for colors given without one.
    #[arg(short, long, default_value_t = DEFAULT_ALPHA)]
    alpha: u8,

    /// Output as JSON instead of human-readable text.
    #[arg(long)]
    json: bool,

    /// Print the available modes and exit.
    #[arg(long)]
    list_modes: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Colors as hex (f0a, ff00aa, ff00aa80) or decimal (255,0,170 or 255,0,170,128).
    colors: Vec<String>,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    if cli.list_modes {
        let modes = Mode::list_modes();
        if cli.json {
            let info = serde_json::json!({ "modes": modes });
            println!("{}", serde_json::to_string_pretty(&info)?);
        } else {
            println!("Modes:");
            for name in modes {
                println!("  {name}");
            }
        }
        return Ok(());
    }

    let mode = input::resolve_mode(cli.mode.as_deref());
    let mut tokens = input::load_file_tokens(cli.file.as_deref())?;
    tokens.extend(cli.colors);

    let (colors, rejected) = input::parse_tokens(&tokens, cli.alpha);
    info!(
        "{} of {} tokens parsed, combining with mode {mode}",
        colors.len(),
        tokens.len()
    );
    if colors.is_empty() {
        return Err(CliError::Input(
            "no valid colors given: pass colors as arguments or in a color file".into(),
        ));
    }

    if colors.len() < mode.min_inputs() {
        return Err(ColorError::InsufficientInput {
            needed: mode.min_inputs(),
            got: colors.len(),
        }
        .into());
    }

    let color = mode.combine(&colors)?;
    print!(
        "{}",
        render_result(mode, colors.len(), &rejected, &color, cli.json)?
    );

    Ok(())
}

/// Formats a combination result as the human report or pretty JSON.
fn render_result(
    mode: Mode,
    inputs: usize,
    rejected: &[Rejected],
    color: &Color,
    json: bool,
) -> Result<String, CliError> {
    if json {
        let info = serde_json::json!({
            "mode": mode,
            "inputs": inputs,
            "skipped": rejected,
            "color": color,
        });
        Ok(format!("{}\n", serde_json::to_string_pretty(&info)?))
    } else {
        Ok(format!("New color (MODE {mode}): \n{color}\n"))
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
