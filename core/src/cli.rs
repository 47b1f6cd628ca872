//! Command-line option parsing
//!
//! Flags follow `getopt_long` conventions: `--flag value` and `--flag=value`
//! both work, unique prefixes like `--lang` are accepted, and values are
//! applied in command-line order. Unknown values are dropped with a warning.
//! `--help` and any unrecognized or ambiguous flag end in the usage text.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::parser::ValueSource;
use clap::{ArgAction, ArgMatches, CommandFactory, FromArgMatches, Parser};

use crate::config::Configuration;
use crate::display::PresentationMode;

/// Usage text printed for `--help` and unrecognized options.
pub const USAGE: &str = "\
Raw(gl) - Another World Interpreter
Usage: rawplay [OPTIONS]... [DATAPATH]
  --datapath=PATH   Path to data files (default '.')
  --language=LANG   Language (fr,us,de,es,it)
  --part=NUM        Game part to start from (0-35 or 16000-16009)
  --render=NAME     Renderer (original,software,gl)
  --window=WxH      Windowed displayed size (default '640x400')
  --fullscreen      Fullscreen display (stretched)
  --fullscreen-ar   Fullscreen display (4:3 aspect ratio)
  --scaler=NAME@N   Scaler filter and factor (nearest,scale2x)
  --ega-palette     Use EGA palette with DOS version
  --help            Show this text
";

/// Result of parsing the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Start the player with this configuration
    Run(Configuration),
    /// Print [`USAGE`] and exit successfully
    Usage,
}

#[derive(Parser, Debug)]
#[command(
    name = "rawplay",
    disable_help_flag = true,
    disable_version_flag = true,
    infer_long_args = true
)]
struct Args {
    #[arg(long, value_name = "PATH", action = ArgAction::Append, allow_hyphen_values = true)]
    datapath: Vec<String>,

    #[arg(long, value_name = "LANG", action = ArgAction::Append, allow_hyphen_values = true)]
    language: Vec<String>,

    #[arg(long, value_name = "NUM", action = ArgAction::Append, allow_hyphen_values = true)]
    part: Vec<String>,

    #[arg(long, value_name = "NAME", action = ArgAction::Append, allow_hyphen_values = true)]
    render: Vec<String>,

    #[arg(long, value_name = "WxH", action = ArgAction::Append, allow_hyphen_values = true)]
    window: Vec<String>,

    #[arg(long, action = ArgAction::Count)]
    fullscreen: u8,

    #[arg(long = "fullscreen-ar", action = ArgAction::Count)]
    fullscreen_ar: u8,

    #[arg(long, value_name = "NAME@N", action = ArgAction::Append, allow_hyphen_values = true)]
    scaler: Vec<String>,

    #[arg(long = "ega-palette", action = ArgAction::Count)]
    ega_palette: u8,

    #[arg(long, action = ArgAction::Count)]
    help: u8,

    /// Only meaningful as the sole argument
    #[arg(value_name = "DATAPATH")]
    positional: Vec<String>,
}

/// Parse `argv` (program name first) on top of `base`.
///
/// A lone argument naming an existing directory becomes the data path; this
/// check runs before flag parsing and is skipped for any other shape.
pub fn parse_args<I, T>(argv: I, base: Configuration) -> ParseOutcome
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    let mut config = base;

    if let [_, only] = argv.as_slice()
        && Path::new(only).is_dir()
    {
        config.data_path = Some(PathBuf::from(only));
    }

    let matches = match Args::command().try_get_matches_from(&argv) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::debug!("Unrecognized command line: {}", e.kind());
            return ParseOutcome::Usage;
        }
    };
    let args = match Args::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(_) => return ParseOutcome::Usage,
    };
    if args.help > 0 {
        return ParseOutcome::Usage;
    }

    if let Some(path) = args.datapath.last() {
        config.data_path = Some(PathBuf::from(path));
    }
    for code in &args.language {
        config.set_language(code);
    }
    for part in &args.part {
        config.set_part(part);
    }
    for name in &args.render {
        config.set_renderer(name);
    }
    for window in &args.window {
        config.display.apply_window(window);
    }
    if let Some(mode) = last_presentation_flag(&matches) {
        config.display.set_presentation(mode);
    }
    for spec in &args.scaler {
        config.scaler.apply(spec);
    }
    if args.ega_palette > 0 {
        config.ega_palette = true;
    }

    ParseOutcome::Run(config)
}

/// The fullscreen flag given last on the command line, if any.
///
/// Count flags carry a default of 0 with an index even when absent, so only
/// values sourced from the command line are considered.
fn last_presentation_flag(matches: &ArgMatches) -> Option<PresentationMode> {
    let last_index = |id: &str| {
        if matches.value_source(id) != Some(ValueSource::CommandLine) {
            return None;
        }
        matches.indices_of(id).and_then(Iterator::max)
    };
    let fullscreen = last_index("fullscreen");
    let aspect = last_index("fullscreen_ar");

    match (fullscreen, aspect) {
        (None, None) => None,
        (Some(_), None) => Some(PresentationMode::Fullscreen),
        (None, Some(_)) => Some(PresentationMode::FullscreenAspectRatio),
        (Some(f), Some(a)) if f > a => Some(PresentationMode::Fullscreen),
        (Some(_), Some(_)) => Some(PresentationMode::FullscreenAspectRatio),
    }
}

#[cfg(test)]
mod tests;
