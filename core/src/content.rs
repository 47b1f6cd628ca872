//! Content edition detection
//!
//! Each historical release of the game ships a different file layout. The
//! edition is probed from marker files in the data directory; file names are
//! matched case-insensitively because CD and floppy images disagree on case.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Language;

/// Known distribution formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentEdition {
    /// DOS floppy release (`MEMLIST.BIN`)
    Dos,
    /// Amiga release (`BANK01`..)
    Amiga,
    /// Windows 3.1 release (`BANKS.TAB`)
    Win31,
    /// 15th anniversary edition (`Pak01.pak`)
    FifteenthAnniversary,
    /// 20th anniversary edition (`game/DAT/FILE017.DAT`)
    TwentiethAnniversary,
    /// 3DO console release (`GameData/`)
    ThreeDo,
}

/// Marker paths in probe order, relative to the data directory.
const MARKERS: &[(&[&str], ContentEdition)] = &[
    (&["memlist.bin"], ContentEdition::Dos),
    (&["bank01"], ContentEdition::Amiga),
    (&["banks.tab"], ContentEdition::Win31),
    (&["data", "pak01.pak"], ContentEdition::FifteenthAnniversary),
    (&["pak01.pak"], ContentEdition::FifteenthAnniversary),
    (&["game", "dat", "file017.dat"], ContentEdition::TwentiethAnniversary),
    (&["gamedata"], ContentEdition::ThreeDo),
];

impl ContentEdition {
    /// Probe `data_dir` for a known edition. First marker found wins.
    pub fn detect(data_dir: &Path) -> Option<Self> {
        MARKERS.iter().find_map(|(components, edition)| {
            find_case_insensitive(data_dir, components).map(|path| {
                tracing::debug!("Found {} marker at {}", edition, path.display());
                *edition
            })
        })
    }

    /// 15th or 20th anniversary edition.
    pub fn is_anniversary(self) -> bool {
        matches!(self, Self::FifteenthAnniversary | Self::TwentiethAnniversary)
    }

    /// Console (3DO) edition.
    pub fn is_console(self) -> bool {
        self == Self::ThreeDo
    }

    /// Window title for this edition in `language`.
    pub fn game_title(self, language: Language) -> &'static str {
        match self {
            Self::FifteenthAnniversary => "Another World - 15th Anniversary Edition",
            Self::TwentiethAnniversary => "Another World - 20th Anniversary Edition",
            _ if language == Language::Us => "Out Of This World",
            _ => "Another World",
        }
    }
}

impl fmt::Display for ContentEdition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dos => "DOS",
            Self::Amiga => "Amiga",
            Self::Win31 => "Windows 3.1",
            Self::FifteenthAnniversary => "15th anniversary",
            Self::TwentiethAnniversary => "20th anniversary",
            Self::ThreeDo => "3DO",
        };
        f.write_str(name)
    }
}

/// Resolve `components` below `root`, matching each name case-insensitively.
fn find_case_insensitive(root: &Path, components: &[&str]) -> Option<PathBuf> {
    let mut current = root.to_path_buf();
    for component in components {
        let entries = fs::read_dir(&current).ok()?;
        let found = entries
            .filter_map(Result::ok)
            .find(|entry| entry.file_name().to_string_lossy().eq_ignore_ascii_case(component))?;
        current = found.path();
    }
    Some(current)
}
