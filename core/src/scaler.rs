//! Scaler specification (`name@factor`)

use crate::scan::atoi;

/// Longest filter name kept; longer names are truncated.
pub const MAX_SCALER_NAME_LEN: usize = 31;

/// Default magnification factor.
pub const DEFAULT_SCALER_FACTOR: i32 = 1;

/// Post-processing filter selection.
///
/// An empty `name` means no scaler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalerSpec {
    pub name: String,
    pub factor: i32,
}

impl Default for ScalerSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            factor: DEFAULT_SCALER_FACTOR,
        }
    }
}

impl ScalerSpec {
    /// Whether a filter was named at all.
    pub fn is_enabled(&self) -> bool {
        !self.name.is_empty()
    }

    /// Apply a `name@factor` token in place.
    ///
    /// Without an `@` nothing changes: a bare name is accepted but discarded.
    /// The factor after `@` uses `atoi` semantics, so a non-numeric suffix
    /// yields 0.
    pub fn apply(&mut self, spec: &str) {
        let Some((name, factor)) = spec.split_once('@') else {
            tracing::warn!(
                "Scaler '{}' has no '@factor' suffix, ignoring it",
                spec
            );
            return;
        };

        self.name = truncate_name(name).to_string();
        self.factor = atoi(factor);
    }
}

fn truncate_name(name: &str) -> &str {
    if name.len() <= MAX_SCALER_NAME_LEN {
        return name;
    }
    let mut end = MAX_SCALER_NAME_LEN;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(spec: &str) -> ScalerSpec {
        let mut scaler = ScalerSpec::default();
        scaler.apply(spec);
        scaler
    }

    #[test]
    fn test_name_and_factor() {
        let scaler = parsed("xbr@3");
        assert_eq!(scaler.name, "xbr");
        assert_eq!(scaler.factor, 3);
        assert!(scaler.is_enabled());
    }

    #[test]
    fn test_bare_name_is_ignored() {
        let scaler = parsed("xbr");
        assert_eq!(scaler, ScalerSpec::default());
        assert!(!scaler.is_enabled());
    }

    #[test]
    fn test_non_numeric_factor_is_zero() {
        let scaler = parsed("nearest@abc");
        assert_eq!(scaler.name, "nearest");
        assert_eq!(scaler.factor, 0);
    }

    #[test]
    fn test_only_first_separator_splits() {
        let scaler = parsed("a@2@3");
        assert_eq!(scaler.name, "a");
        assert_eq!(scaler.factor, 2);
    }

    #[test]
    fn test_long_name_is_truncated() {
        let long = "n".repeat(40);
        let scaler = parsed(&format!("{long}@2"));
        assert_eq!(scaler.name.len(), MAX_SCALER_NAME_LEN);
        assert_eq!(scaler.factor, 2);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let long = "é".repeat(20);
        let scaler = parsed(&format!("{long}@2"));
        assert!(scaler.name.len() <= MAX_SCALER_NAME_LEN);
        assert!(scaler.name.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_later_spec_overrides_earlier() {
        let mut scaler = ScalerSpec::default();
        scaler.apply("nearest@2");
        scaler.apply("scale2x@2");
        assert_eq!(scaler.name, "scale2x");
    }

    #[test]
    fn test_empty_name_with_factor() {
        let scaler = parsed("@4");
        assert_eq!(scaler.name, "");
        assert_eq!(scaler.factor, 4);
        assert!(!scaler.is_enabled());
    }
}
