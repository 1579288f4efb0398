pub mod cli;
pub mod config;
pub mod container;
pub mod crypto;
pub mod errors;
pub mod guard;
pub mod password;
pub mod store;

pub use errors::{ErrorCategory, FolderGuardError, Result};
pub use guard::{DocumentOutcome, EncryptionOrchestrator, TreeOutcome, TreeReport};
pub use password::{validate_password, PasswordVerdict};
pub use store::DocumentStore;
