//! Run configuration
//!
//! [`Configuration`] is assembled once at startup and is immutable for the rest
//! of the run. Values come from an optional `config.toml` and then from the
//! command line; both sources go through the same lenient setters, so a bad
//! value is logged and dropped instead of failing startup.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::display::{DisplayMode, PresentationMode};
use crate::error::ConfigError;
use crate::renderer::RendererKind;
use crate::scaler::ScalerSpec;
use crate::scan::leading_int;

/// Part started when none is given (the intro).
pub const DEFAULT_PART: i32 = 16001;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "RAWPLAY_CONFIG";

/// Game text language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Fr,
    Us,
    De,
    Es,
    It,
}

const LANGUAGE_CODES: &[(&str, Language)] = &[
    ("fr", Language::Fr),
    ("us", Language::Us),
    ("de", Language::De),
    ("es", Language::Es),
    ("it", Language::It),
];

impl Language {
    /// Look up a language by its two-letter code (case-sensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        LANGUAGE_CODES
            .iter()
            .find(|(candidate, _)| *candidate == code)
            .map(|(_, language)| *language)
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::Us => "us",
            Self::De => "de",
            Self::Es => "es",
            Self::It => "it",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Flat run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Game data location; `None` means the current directory
    pub data_path: Option<PathBuf>,
    /// Part to start from (0..=35 or 16000..=16009)
    pub part: i32,
    pub language: Language,
    /// Explicit renderer; `None` resolves from the content edition
    pub renderer: Option<RendererKind>,
    pub display: DisplayMode,
    pub scaler: ScalerSpec,
    /// Use the EGA palette with DOS data
    pub ega_palette: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            data_path: None,
            part: DEFAULT_PART,
            language: Language::default(),
            renderer: None,
            display: DisplayMode::default(),
            scaler: ScalerSpec::default(),
            ega_palette: false,
        }
    }
}

impl Configuration {
    /// Directory the engine loads data from.
    pub fn data_dir(&self) -> &Path {
        self.data_path.as_deref().unwrap_or(Path::new("."))
    }

    pub fn set_language(&mut self, code: &str) {
        match Language::from_code(code) {
            Some(language) => self.language = language,
            None => tracing::warn!("Unknown language '{}', keeping '{}'", code, self.language),
        }
    }

    /// Select a renderer by name; the GL flag of the display mode follows it.
    pub fn set_renderer(&mut self, name: &str) {
        match RendererKind::from_name(name) {
            Some(kind) => {
                self.renderer = Some(kind);
                self.display.track_renderer(kind);
            }
            None => tracing::warn!("Unknown renderer '{}', ignoring", name),
        }
    }

    /// Parse the leading integer of `value`; no digits keeps the current part.
    pub fn set_part(&mut self, value: &str) {
        match leading_int(value) {
            Some((part, _)) => self.part = part,
            None => tracing::warn!("Invalid part '{}', keeping {}", value, self.part),
        }
    }

    /// Load the optional config file from its default location.
    ///
    /// Never fails: a missing file is silent, a broken one is logged.
    pub fn from_file_layer() -> Self {
        let mut config = Self::default();
        let Some(path) = config_file_path() else {
            return config;
        };
        match FileConfig::load(&path) {
            Ok(Some(file)) => {
                tracing::info!("Loaded config from {}", path.display());
                file.apply(&mut config);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("{}, using defaults", e),
        }
        config
    }
}

/// Fullscreen setting as written in `config.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FullscreenSetting {
    Off,
    Stretch,
    Aspect,
}

impl From<FullscreenSetting> for PresentationMode {
    fn from(setting: FullscreenSetting) -> Self {
        match setting {
            FullscreenSetting::Off => Self::Windowed,
            FullscreenSetting::Stretch => Self::Fullscreen,
            FullscreenSetting::Aspect => Self::FullscreenAspectRatio,
        }
    }
}

/// Contents of `config.toml`. Every key is optional.
///
/// ```toml
/// datapath = "/games/another-world"
/// language = "us"
/// render = "software"
/// window = "1280x800"
/// fullscreen = "aspect"
/// scaler = "nearest@2"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub datapath: Option<PathBuf>,
    pub language: Option<String>,
    pub part: Option<i32>,
    pub render: Option<String>,
    pub window: Option<String>,
    pub fullscreen: Option<FullscreenSetting>,
    pub scaler: Option<String>,
    pub ega_palette: Option<bool>,
}

impl FileConfig {
    /// Read and parse `path`. Returns `Ok(None)` if the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&contents)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Apply file values onto `config` with command-line leniency.
    pub fn apply(&self, config: &mut Configuration) {
        if let Some(path) = &self.datapath {
            config.data_path = Some(path.clone());
        }
        if let Some(language) = &self.language {
            config.set_language(language);
        }
        if let Some(part) = self.part {
            config.part = part;
        }
        if let Some(render) = &self.render {
            config.set_renderer(render);
        }
        if let Some(window) = &self.window {
            config.display.apply_window(window);
        }
        if let Some(fullscreen) = self.fullscreen {
            config.display.set_presentation(fullscreen.into());
        }
        if let Some(scaler) = &self.scaler {
            config.scaler.apply(scaler);
        }
        if let Some(ega) = self.ega_palette {
            config.ega_palette = ega;
        }
    }
}

/// Config file location: `$RAWPLAY_CONFIG`, else the platform config dir.
///
/// On Linux: `~/.config/rawplay/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    directories::ProjectDirs::from("", "", "rawplay").map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Configuration::default();
        assert_eq!(config.data_path, None);
        assert_eq!(config.data_dir(), Path::new("."));
        assert_eq!(config.part, 16001);
        assert_eq!(config.language, Language::Fr);
        assert_eq!(config.renderer, None);
        assert_eq!(config.scaler.factor, 1);
        assert!(!config.ega_palette);
    }

    #[test]
    fn test_language_lookup_is_exact() {
        let mut config = Configuration::default();
        config.set_language("de");
        assert_eq!(config.language, Language::De);
        config.set_language("DE");
        assert_eq!(config.language, Language::De);
        config.set_language("jp");
        assert_eq!(config.language, Language::De);
    }

    #[test]
    fn test_renderer_tracks_gl_flag() {
        let mut config = Configuration::default();
        config.set_renderer("gl");
        assert_eq!(config.renderer, Some(RendererKind::Gl));
        assert!(config.display.gl_context_requested);

        config.set_renderer("software");
        assert!(!config.display.gl_context_requested);

        config.set_renderer("directx");
        assert_eq!(config.renderer, Some(RendererKind::Software));
    }

    #[test]
    fn test_part_leniency() {
        let mut config = Configuration::default();
        config.set_part("12");
        assert_eq!(config.part, 12);
        config.set_part("abc");
        assert_eq!(config.part, 12);
        config.set_part("16004xyz");
        assert_eq!(config.part, 16004);
    }

    #[test]
    fn test_file_config_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let loaded = FileConfig::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn test_file_config_applies_leniently() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
language = "us"
render = "bogus"
window = "1280x800"
fullscreen = "aspect"
scaler = "nearest@2"
part = 3
"#,
        )
        .unwrap();

        let file = FileConfig::load(&path).unwrap().expect("file exists");
        let mut config = Configuration::default();
        file.apply(&mut config);

        assert_eq!(config.language, Language::Us);
        assert_eq!(config.renderer, None);
        assert_eq!((config.display.width, config.display.height), (1280, 800));
        assert_eq!(config.display.mode, PresentationMode::FullscreenAspectRatio);
        assert_eq!(config.scaler.name, "nearest");
        assert_eq!(config.scaler.factor, 2);
        assert_eq!(config.part, 3);
    }

    #[test]
    fn test_file_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "window = [").unwrap();
        let err = FileConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_file_config_rejects_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "volume = 3").unwrap();
        assert!(FileConfig::load(&path).is_err());
    }
}
