//! Renderer resolution
//!
//! Resolution is a single transition taken once the content edition is known:
//! an explicit choice is used verbatim, otherwise the edition picks the
//! renderer. The 3DO override then applies to either outcome.

use std::fmt;

use crate::content::ContentEdition;

/// Concrete graphics backend type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RendererKind {
    /// Software rasterizer with the period-accurate 1991 look
    Original,
    /// Software rasterizer
    Software,
    /// GPU-accelerated backend
    Gl,
}

/// Command-line names, matched exactly.
const RENDERER_NAMES: &[(&str, RendererKind)] = &[
    ("original", RendererKind::Original),
    ("software", RendererKind::Software),
    ("gl", RendererKind::Gl),
];

impl RendererKind {
    /// Look up a renderer by its command-line name (case-sensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        RENDERER_NAMES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, kind)| *kind)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Software => "software",
            Self::Gl => "gl",
        }
    }

    /// Renderer used when none was requested.
    ///
    /// Anniversary and console editions ship assets meant for the GPU path;
    /// the 199x floppy/CD editions use the original renderer.
    pub fn default_for(edition: ContentEdition) -> Self {
        if edition.is_anniversary() || edition.is_console() {
            Self::Gl
        } else {
            Self::Original
        }
    }
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved graphics setup. Computed once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RendererSelection {
    pub kind: RendererKind,
    /// Pack colours as RGB565 (3DO assets on the software path)
    pub use_16bit_packing: bool,
    /// Use the fixed EGA palette table (DOS edition only)
    pub use_ega_palette: bool,
    /// Period-accurate look on the software backend
    pub legacy_1991: bool,
}

/// Resolve the renderer for `edition`.
///
/// `choice` is the user's explicit renderer, if any. On the 3DO edition any
/// non-GL renderer becomes the software renderer with 16-bit packing, since
/// the original colour path cannot handle its assets.
pub fn resolve(
    choice: Option<RendererKind>,
    edition: ContentEdition,
    ega_palette: bool,
) -> RendererSelection {
    let mut kind = match choice {
        Some(kind) => kind,
        None => {
            let kind = RendererKind::default_for(edition);
            tracing::info!("Auto-selected {} renderer for {} data", kind, edition);
            kind
        }
    };

    let mut use_16bit_packing = false;
    if kind != RendererKind::Gl && edition.is_console() {
        tracing::info!("{} data requires the software renderer with RGB565 packing", edition);
        kind = RendererKind::Software;
        use_16bit_packing = true;
    }

    let use_ega_palette = ega_palette && edition == ContentEdition::Dos;
    if ega_palette && !use_ega_palette {
        tracing::warn!("EGA palette is only available with DOS data, ignoring");
    }

    RendererSelection {
        kind,
        use_16bit_packing,
        use_ega_palette,
        legacy_1991: kind == RendererKind::Original,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_EDITIONS: [ContentEdition; 6] = [
        ContentEdition::Dos,
        ContentEdition::Amiga,
        ContentEdition::Win31,
        ContentEdition::FifteenthAnniversary,
        ContentEdition::TwentiethAnniversary,
        ContentEdition::ThreeDo,
    ];

    const ALL_CHOICES: [Option<RendererKind>; 4] = [
        None,
        Some(RendererKind::Original),
        Some(RendererKind::Software),
        Some(RendererKind::Gl),
    ];

    #[test]
    fn test_from_name_exact_match() {
        assert_eq!(RendererKind::from_name("gl"), Some(RendererKind::Gl));
        assert_eq!(RendererKind::from_name("original"), Some(RendererKind::Original));
        assert_eq!(RendererKind::from_name("GL"), None);
        assert_eq!(RendererKind::from_name("vulkan"), None);
    }

    #[test]
    fn test_auto_anniversary_selects_gl() {
        for edition in [ContentEdition::FifteenthAnniversary, ContentEdition::TwentiethAnniversary] {
            let selection = resolve(None, edition, false);
            assert_eq!(selection.kind, RendererKind::Gl);
            assert!(!selection.use_16bit_packing);
        }
    }

    #[test]
    fn test_auto_classic_selects_original() {
        for edition in [ContentEdition::Dos, ContentEdition::Amiga, ContentEdition::Win31] {
            let selection = resolve(None, edition, false);
            assert_eq!(selection.kind, RendererKind::Original);
            assert!(selection.legacy_1991);
        }
    }

    #[test]
    fn test_3do_forces_software_565() {
        for choice in [None, Some(RendererKind::Original), Some(RendererKind::Software)] {
            let selection = resolve(choice, ContentEdition::ThreeDo, false);
            // Auto-resolution picks GL for 3DO, the override only hits explicit non-GL
            if choice.is_none() {
                assert_eq!(selection.kind, RendererKind::Gl);
                continue;
            }
            assert_eq!(selection.kind, RendererKind::Software);
            assert!(selection.use_16bit_packing);
            assert!(!selection.legacy_1991);
        }
    }

    #[test]
    fn test_3do_explicit_gl_kept() {
        let selection = resolve(Some(RendererKind::Gl), ContentEdition::ThreeDo, false);
        assert_eq!(selection.kind, RendererKind::Gl);
        assert!(!selection.use_16bit_packing);
    }

    #[test]
    fn test_explicit_choice_verbatim() {
        let selection = resolve(Some(RendererKind::Software), ContentEdition::TwentiethAnniversary, false);
        assert_eq!(selection.kind, RendererKind::Software);
        let selection = resolve(Some(RendererKind::Gl), ContentEdition::Dos, false);
        assert_eq!(selection.kind, RendererKind::Gl);
    }

    #[test]
    fn test_16bit_packing_only_on_3do() {
        for edition in ALL_EDITIONS {
            for choice in ALL_CHOICES {
                let selection = resolve(choice, edition, false);
                if selection.use_16bit_packing {
                    assert_eq!(edition, ContentEdition::ThreeDo);
                    assert_eq!(selection.kind, RendererKind::Software);
                }
            }
        }
    }

    #[test]
    fn test_ega_palette_only_with_dos() {
        assert!(resolve(None, ContentEdition::Dos, true).use_ega_palette);
        assert!(!resolve(None, ContentEdition::Amiga, true).use_ega_palette);
        assert!(!resolve(None, ContentEdition::Dos, false).use_ega_palette);
    }
}
