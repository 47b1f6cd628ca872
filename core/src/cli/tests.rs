//! Tests for command-line parsing

use std::path::PathBuf;

use tempfile::TempDir;

use super::{ParseOutcome, parse_args};
use crate::config::{Configuration, FileConfig, Language};
use crate::display::PresentationMode;
use crate::renderer::RendererKind;

fn parse(args: &[&str]) -> ParseOutcome {
    let argv = std::iter::once("rawplay").chain(args.iter().copied());
    parse_args(argv, Configuration::default())
}

fn run_config(args: &[&str]) -> Configuration {
    match parse(args) {
        ParseOutcome::Run(config) => config,
        ParseOutcome::Usage => panic!("expected a configuration for {args:?}"),
    }
}

#[test]
fn test_no_arguments_gives_defaults() {
    assert_eq!(run_config(&[]), Configuration::default());
}

#[test]
fn test_help_and_unknown_flags_show_usage() {
    assert_eq!(parse(&["--help"]), ParseOutcome::Usage);
    assert_eq!(parse(&["--bogus"]), ParseOutcome::Usage);
    assert_eq!(parse(&["--language=us", "--frobnicate"]), ParseOutcome::Usage);
    assert_eq!(parse(&["-x"]), ParseOutcome::Usage);
}

#[test]
fn test_missing_value_shows_usage() {
    assert_eq!(parse(&["--language"]), ParseOutcome::Usage);
}

#[test]
fn test_all_flags() {
    let config = run_config(&[
        "--datapath=/data/aw",
        "--language=it",
        "--part",
        "16004",
        "--render=software",
        "--window=800x500",
        "--fullscreen",
        "--scaler=nearest@3",
        "--ega-palette",
    ]);
    assert_eq!(config.data_path, Some(PathBuf::from("/data/aw")));
    assert_eq!(config.language, Language::It);
    assert_eq!(config.part, 16004);
    assert_eq!(config.renderer, Some(RendererKind::Software));
    assert_eq!((config.display.width, config.display.height), (800, 500));
    assert_eq!(config.display.mode, PresentationMode::Fullscreen);
    assert_eq!(config.scaler.name, "nearest");
    assert_eq!(config.scaler.factor, 3);
    assert!(config.ega_palette);
}

#[test]
fn test_unknown_enum_values_keep_previous() {
    let config = run_config(&["--language=de", "--language=klingon", "--render=warp"]);
    assert_eq!(config.language, Language::De);
    assert_eq!(config.renderer, None);
}

#[test]
fn test_enum_lookup_is_case_sensitive() {
    let config = run_config(&["--language=US", "--render=GL"]);
    assert_eq!(config.language, Language::Fr);
    assert_eq!(config.renderer, None);
}

#[test]
fn test_render_gl_sets_gl_context() {
    let config = run_config(&["--render=gl"]);
    assert!(config.display.gl_context_requested);
}

#[test]
fn test_malformed_window_keeps_defaults() {
    let config = run_config(&["--window=big"]);
    assert_eq!((config.display.width, config.display.height), (640, 400));
}

#[test]
fn test_last_fullscreen_flag_wins() {
    let config = run_config(&["--fullscreen", "--fullscreen-ar"]);
    assert_eq!(config.display.mode, PresentationMode::FullscreenAspectRatio);

    let config = run_config(&["--fullscreen-ar", "--fullscreen"]);
    assert_eq!(config.display.mode, PresentationMode::Fullscreen);

    let config = run_config(&["--fullscreen", "--fullscreen-ar", "--fullscreen"]);
    assert_eq!(config.display.mode, PresentationMode::Fullscreen);
}

#[test]
fn test_scaler_without_factor_is_ignored() {
    let config = run_config(&["--scaler=xbr"]);
    assert_eq!(config.scaler.name, "");
    assert_eq!(config.scaler.factor, 1);
}

#[test]
fn test_negative_part_value() {
    let config = run_config(&["--part", "-3"]);
    assert_eq!(config.part, -3);
}

#[test]
fn test_single_directory_argument_sets_data_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().to_str().unwrap();
    let config = run_config(&[path]);
    assert_eq!(config.data_path, Some(dir.path().to_path_buf()));
}

#[test]
fn test_single_non_directory_argument_ignored() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("memlist.bin");
    std::fs::write(&file, b"").unwrap();

    let config = run_config(&[file.to_str().unwrap()]);
    assert_eq!(config.data_path, None);

    let config = run_config(&["/definitely/not/here"]);
    assert_eq!(config.data_path, None);
}

#[test]
fn test_directory_with_other_arguments_ignored() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().to_str().unwrap();
    let config = run_config(&[path, "--language=us"]);
    assert_eq!(config.data_path, None);
    assert_eq!(config.language, Language::Us);
}

#[test]
fn test_flags_override_base() {
    let mut base = Configuration::default();
    base.language = Language::Es;
    base.part = 5;
    let argv = ["rawplay", "--part=7"];
    let ParseOutcome::Run(config) = parse_args(argv, base) else {
        panic!("expected run");
    };
    assert_eq!(config.language, Language::Es);
    assert_eq!(config.part, 7);
}

#[test]
fn test_windowed_without_fullscreen_flags() {
    let cases: [&[&str]; 4] = [&["--language=us"], &["--part=3"], &["--window=800x600"], &[]];
    for args in cases {
        let config = run_config(args);
        assert_eq!(config.display.mode, PresentationMode::Windowed, "{args:?}");
    }
}

#[test]
fn test_file_fullscreen_survives_command_line() {
    let mut base = Configuration::default();
    let file: FileConfig = toml::from_str(r#"fullscreen = "stretch""#).unwrap();
    file.apply(&mut base);

    let ParseOutcome::Run(config) = parse_args(["rawplay", "--language=us"], base.clone()) else {
        panic!("expected run");
    };
    assert_eq!(config.display.mode, PresentationMode::Fullscreen);

    let ParseOutcome::Run(config) = parse_args(["rawplay", "--fullscreen-ar"], base) else {
        panic!("expected run");
    };
    assert_eq!(config.display.mode, PresentationMode::FullscreenAspectRatio);
}

#[test]
fn test_single_fullscreen_flags() {
    assert_eq!(run_config(&["--fullscreen"]).display.mode, PresentationMode::Fullscreen);
    assert_eq!(
        run_config(&["--fullscreen-ar"]).display.mode,
        PresentationMode::FullscreenAspectRatio
    );
}

#[test]
fn test_unique_prefixes_accepted() {
    let config = run_config(&["--lang=us", "--ren", "software", "--ega"]);
    assert_eq!(config.language, Language::Us);
    assert_eq!(config.renderer, Some(RendererKind::Software));
    assert!(config.ega_palette);

    assert_eq!(run_config(&["--fullscreen"]).display.mode, PresentationMode::Fullscreen);
    assert_eq!(parse(&["--full"]), ParseOutcome::Usage);
}
