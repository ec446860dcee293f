//! User preferences.
//!
//! Preferences are layered: built-in defaults, then an optional user file,
//! then environment variables such as `MIRRORCUBE__SCRAMBLE__LENGTH=30`.

#![allow(missing_docs)] // too many things to document

#[macro_use]
extern crate lazy_static;

use std::path::Path;

use serde::{Deserialize, Serialize};

mod animation;
mod interaction;
mod layout;

pub use animation::*;
pub use interaction::*;
pub use layout::*;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");
const ENV_PREFIX: &str = "MIRRORCUBE";

lazy_static! {
    pub static ref DEFAULT_PREFS: Preferences =
        serde_norway::from_str(DEFAULT_PREFS_STR).expect("error loading default preferences");
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Preferences {
    pub animation: AnimationPreferences,
    pub interaction: InteractionPreferences,
    pub scramble: ScramblePreferences,
    pub layout: LayoutPreferences,
}

impl Default for Preferences {
    fn default() -> Self {
        DEFAULT_PREFS.clone()
    }
}

impl Preferences {
    /// Loads preferences from the defaults, `user_file` (if any), and the
    /// environment. If loading fails, the default preferences are returned.
    pub fn load(user_file: Option<&Path>) -> Self {
        Self::try_load(user_file).unwrap_or_else(|e| {
            log::warn!("Error loading preferences: {e}");
            Self::default()
        })
    }

    /// Loads preferences from the defaults, `user_file` (if any), and the
    /// environment.
    pub fn try_load(user_file: Option<&Path>) -> eyre::Result<Self> {
        lazy_static::initialize(&DEFAULT_PREFS);

        // Load default preferences.
        let mut config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT));

        // Load user preferences.
        if let Some(path) = user_file {
            log::debug!("Loading user preferences from {}", path.display());
            config = config.add_source(config::File::from(path).format(PREFS_FILE_FORMAT));
        }

        config = config.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        Ok(config.build()?.try_deserialize()?)
    }

    /// Writes preferences to a YAML file.
    pub fn save(&self, path: &Path) -> eyre::Result<()> {
        if let Some(p) = path.parent() {
            std::fs::create_dir_all(p)?;
        }
        serde_norway::to_writer(std::fs::File::create(path)?, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_prefs() {
        let prefs = Preferences::default();
        assert_eq!(0.25, prefs.interaction.min_view_percent);
        assert_eq!(20, prefs.scramble.length);
        assert_eq!(None, prefs.scramble.seed);
        assert_eq!(InterpolateFn::Cosine, prefs.animation.twist_interpolation);
        assert_eq!(0.5, prefs.layout.initial_front_percent);
    }

    #[test]
    fn test_user_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.yaml");
        std::fs::write(&path, "scramble:\n  length: 5\n  seed: 42\n").unwrap();

        let prefs = Preferences::try_load(Some(&path)).unwrap();
        assert_eq!(5, prefs.scramble.length);
        assert_eq!(Some(42), prefs.scramble.seed);
        // Everything else comes from the defaults.
        assert_eq!(DEFAULT_PREFS.animation, prefs.animation);
        assert_eq!(DEFAULT_PREFS.layout, prefs.layout);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.yaml");

        let mut prefs = Preferences::default();
        prefs.animation.twist_interpolation = InterpolateFn::Smoothstep;
        prefs.layout.divider_height = 32.0;
        prefs.save(&path).unwrap();

        assert_eq!(prefs, Preferences::try_load(Some(&path)).unwrap());
    }

    #[test]
    fn test_missing_user_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does_not_exist.yaml");
        assert!(Preferences::try_load(Some(&path)).is_err());
        assert_eq!(Preferences::default(), Preferences::load(Some(&path)));
    }

    #[test]
    fn test_clamp_front_percent() {
        let interaction = &DEFAULT_PREFS.interaction;
        assert_eq!(0.25, interaction.clamp_front_percent(0.1));
        assert_eq!(0.6, interaction.clamp_front_percent(0.6));
        assert_eq!(0.75, interaction.clamp_front_percent(0.9));
    }

    #[test]
    fn test_interpolate_endpoints() {
        for f in [
            InterpolateFn::Lerp,
            InterpolateFn::Cosine,
            InterpolateFn::Smoothstep,
        ] {
            assert!(f.interpolate(0.0).abs() < 1e-6);
            assert!((f.interpolate(1.0) - 1.0).abs() < 1e-6);
            assert!((f.interpolate(0.5) - 0.5).abs() < 1e-6);
        }
    }
}
