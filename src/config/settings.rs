use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{FolderGuardError, Result};
use crate::password::policy::{
    PasswordPolicy, DEFAULT_MIN_LENGTH, MIN_LENGTH_CEILING, MIN_LENGTH_FLOOR,
};
use crate::store::Suffixes;

/// Project-level configuration, loaded from `.folderguard.toml`.
///
/// Every field has a sensible default so Folder Guard works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Ask for the password twice when locking.
    #[serde(default = "default_true")]
    pub confirm_password: bool,

    /// Print success/info notices (errors are always printed).
    #[serde(default = "default_true")]
    pub show_notices: bool,

    /// Minimum password length, 6 to 32.
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,

    /// Require at least 3 of: lowercase, uppercase, digits, symbols.
    #[serde(default = "default_true")]
    pub require_complexity: bool,

    /// Extension of documents that can be locked.
    #[serde(default = "default_plaintext_suffix")]
    pub plaintext_suffix: String,

    /// Extension given to locked documents.
    #[serde(default = "default_encrypted_suffix")]
    pub encrypted_suffix: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_true() -> bool {
    true
}

fn default_min_password_length() -> usize {
    DEFAULT_MIN_LENGTH
}

fn default_plaintext_suffix() -> String {
    "md".to_string()
}

fn default_encrypted_suffix() -> String {
    "encrypted".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            confirm_password: true,
            show_notices: true,
            min_password_length: default_min_password_length(),
            require_complexity: true,
            plaintext_suffix: default_plaintext_suffix(),
            encrypted_suffix: default_encrypted_suffix(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    pub const FILE_NAME: &'static str = ".folderguard.toml";

    /// Load settings from `<project_dir>/.folderguard.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed or holds out-of-range
    /// values, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            FolderGuardError::ConfigError(format!(
                "Failed to parse {}: {e}",
                config_path.display()
            ))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_LENGTH_FLOOR..=MIN_LENGTH_CEILING).contains(&self.min_password_length) {
            return Err(FolderGuardError::ConfigError(format!(
                "min_password_length must be between {MIN_LENGTH_FLOOR} and {MIN_LENGTH_CEILING} (got {})",
                self.min_password_length
            )));
        }

        for (name, suffix) in [
            ("plaintext_suffix", &self.plaintext_suffix),
            ("encrypted_suffix", &self.encrypted_suffix),
        ] {
            if suffix.is_empty() || suffix.contains('.') || suffix.contains('/') {
                return Err(FolderGuardError::ConfigError(format!(
                    "{name} must be a bare extension like \"md\" (got {suffix:?})"
                )));
            }
        }

        if self.plaintext_suffix == self.encrypted_suffix {
            return Err(FolderGuardError::ConfigError(
                "plaintext_suffix and encrypted_suffix must differ".into(),
            ));
        }

        Ok(())
    }

    pub fn password_policy(&self) -> PasswordPolicy {
        PasswordPolicy {
            min_length: self.min_password_length,
            require_complexity: self.require_complexity,
        }
    }

    pub fn suffixes(&self) -> Suffixes {
        Suffixes {
            plaintext: self.plaintext_suffix.clone(),
            encrypted: self.encrypted_suffix.clone(),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
