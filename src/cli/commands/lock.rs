//! `folderguard lock` — encrypt a note or every note in a folder.

use crate::cli::Cli;
use crate::errors::Result;
use crate::guard::Mode;

/// Execute the `lock` command.
pub async fn execute(cli: &Cli, path: &str, allow_weak: bool) -> Result<()> {
    super::convert(cli, Mode::Encrypt, path, allow_weak).await
}
