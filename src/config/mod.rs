//! Project configuration (`.folderguard.toml`).

pub mod settings;

pub use settings::Settings;
