//! `folderguard unlock` — decrypt a locked note or every locked note in a folder.
//!
//! Decryption never validates the password against the strength policy:
//! the password already exists, the container decides whether it is right.

use crate::cli::Cli;
use crate::errors::Result;
use crate::guard::Mode;

/// Execute the `unlock` command.
pub async fn execute(cli: &Cli, path: &str) -> Result<()> {
    super::convert(cli, Mode::Decrypt, path, false).await
}
