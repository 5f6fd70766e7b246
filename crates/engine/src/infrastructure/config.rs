//! Engine configuration from the process environment.

use std::path::PathBuf;

const DEFAULT_DB: &str = "characters.db";

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// SQLite file backing the character store (`MORPHIN_DB`).
    pub db_path: String,
    /// Folder searched for form token images (`MORPHIN_IMAGE_PATH`).
    /// Image switching is off when unset.
    pub image_path: Option<PathBuf>,
}

impl EngineConfig {
    /// Read from the environment. Call after `dotenvy` has loaded any `.env`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_path = lookup("MORPHIN_DB")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_DB.into());
        let image_path = lookup("MORPHIN_IMAGE_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        Self {
            db_path,
            image_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> EngineConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]);
        assert_eq!(config.db_path, "characters.db");
        assert_eq!(config.image_path, None);
    }

    #[test]
    fn blank_image_path_disables_switching() {
        let config = config(&[("MORPHIN_DB", "party.db"), ("MORPHIN_IMAGE_PATH", "  ")]);
        assert_eq!(config.db_path, "party.db");
        assert_eq!(config.image_path, None);
    }

    #[test]
    fn reads_image_path() {
        let config = config(&[("MORPHIN_IMAGE_PATH", "tokens/forms")]);
        assert_eq!(config.image_path, Some(PathBuf::from("tokens/forms")));
    }
}
