//! Command implementations, one file per subcommand.

pub mod check;
pub mod lock;
pub mod unlock;

use std::path::{Path, PathBuf};

use crate::cli::{load_settings, obtain_password, output, Cli};
use crate::config::Settings;
use crate::errors::{FolderGuardError, Result};
use crate::guard::{DocumentOutcome, EncryptionOrchestrator, Mode, SkipReason, TreeOutcome};
use crate::password::FlowMode;
use crate::store::{DocumentKind, FsDocumentStore};

/// Shared body of `lock` and `unlock`: one file, or a whole folder.
pub(crate) async fn convert(cli: &Cli, mode: Mode, path: &str, allow_weak: bool) -> Result<()> {
    let settings = load_settings(cli)?;
    let target = PathBuf::from(path);
    let meta = std::fs::metadata(&target).map_err(|e| FolderGuardError::from_io(e, &target))?;

    let orchestrator =
        EncryptionOrchestrator::with_suffixes(FsDocumentStore::new(), settings.suffixes());
    let flow_mode = match mode {
        Mode::Encrypt => FlowMode::Encrypt,
        Mode::Decrypt => FlowMode::Decrypt,
    };

    if meta.is_dir() {
        let password = obtain_password(flow_mode, &settings, allow_weak)?;
        let outcome = match mode {
            Mode::Encrypt => orchestrator.encrypt_tree(&target, &password).await,
            Mode::Decrypt => orchestrator.decrypt_tree(&target, &password).await,
        };
        return report_tree(&settings, &target, outcome);
    }

    // Refuse early so the user is not asked for a password in vain.
    let required = match mode {
        Mode::Encrypt => DocumentKind::Plaintext,
        Mode::Decrypt => DocumentKind::Encrypted,
    };
    let suffixes = orchestrator.suffixes();
    if suffixes.kind_of(&target) != Some(required) {
        return Err(FolderGuardError::CommandFailed(format!(
            "Only .{} files can be {}.",
            suffixes.for_kind(required),
            mode.verb().to_lowercase()
        )));
    }

    let password = obtain_password(flow_mode, &settings, allow_weak)?;
    let outcome = match mode {
        Mode::Encrypt => orchestrator.encrypt_document(&target, &password).await,
        Mode::Decrypt => orchestrator.decrypt_document(&target, &password).await,
    };
    report_document(&settings, mode, &target, outcome)
}

fn report_document(
    settings: &Settings,
    mode: Mode,
    path: &Path,
    outcome: DocumentOutcome,
) -> Result<()> {
    match outcome {
        DocumentOutcome::Succeeded { path: new_path } => {
            if settings.show_notices {
                output::success(&format!("{} {}", mode.verb(), new_path.display()));
            }
            Ok(())
        }
        DocumentOutcome::Skipped(SkipReason::Missing) => {
            Err(FolderGuardError::DocumentNotFound(path.to_path_buf()))
        }
        DocumentOutcome::Skipped(SkipReason::WrongSuffix) => Err(FolderGuardError::CommandFailed(
            format!("{} has the wrong extension", path.display()),
        )),
        DocumentOutcome::Busy => Err(FolderGuardError::Busy(path.display().to_string())),
        DocumentOutcome::Failed(failure) => Err(FolderGuardError::CommandFailed(format!(
            "Failed to {} {}: {}",
            action(mode),
            path.display(),
            failure.message
        ))),
    }
}

fn report_tree(settings: &Settings, root: &Path, outcome: TreeOutcome) -> Result<()> {
    let report = match outcome {
        TreeOutcome::Completed(report) => report,
        TreeOutcome::Busy => return Err(FolderGuardError::Busy(root.display().to_string())),
        TreeOutcome::ListingFailed(failure) => {
            return Err(FolderGuardError::CommandFailed(format!(
                "Could not read folder {}: {}",
                root.display(),
                failure.message
            )));
        }
    };

    if settings.show_notices {
        output::success(&format!(
            "{} {} files in {}",
            report.mode.verb(),
            report.succeeded,
            root.display()
        ));
        if report.skipped > 0 {
            output::info(&format!(
                "{} files disappeared before they could be processed",
                report.skipped
            ));
        }
    }

    if report.is_clean() {
        return Ok(());
    }

    output::print_failures_table(&report.failed);
    Err(FolderGuardError::CommandFailed(format!(
        "{} files could not be {}",
        report.failed.len(),
        report.mode.verb().to_lowercase()
    )))
}

fn action(mode: Mode) -> &'static str {
    match mode {
        Mode::Encrypt => "lock",
        Mode::Decrypt => "unlock",
    }
}
