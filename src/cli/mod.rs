//! CLI module — Clap argument parser, password prompts, and commands.

pub mod commands;
pub mod output;

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{FolderGuardError, Result};
use crate::password::{FlowEvent, FlowMode, PasswordFlow, Prompt};

/// Environment variable holding the password for scripted use.
pub const PASSWORD_ENV: &str = "FOLDERGUARD_PASSWORD";

/// Environment variable holding the log filter (`tracing` directives).
pub const LOG_ENV: &str = "FOLDERGUARD_LOG";

/// Folder Guard CLI: lock and unlock markdown notes with a password.
#[derive(Parser)]
#[command(
    name = "folderguard",
    about = "Password-protected encryption for markdown notes and folders",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory containing .folderguard.toml (default: current directory)
    #[arg(long, default_value = ".", global = true)]
    pub project: String,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Encrypt a note, or every note inside a folder
    Lock {
        /// File or folder to lock
        path: String,
        /// Accept a password that fails the strength policy
        #[arg(long)]
        allow_weak: bool,
    },

    /// Decrypt a locked note, or every locked note inside a folder
    Unlock {
        /// File or folder to unlock
        path: String,
    },

    /// Check a password against the strength policy
    CheckPassword {
        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Load settings from the `--project` directory.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd.join(&cli.project))
}

/// Get a password, trying in order:
/// 1. `FOLDERGUARD_PASSWORD` env var (scripts/CI)
/// 2. Interactive prompts driven by `PasswordFlow`
///
/// For `FlowMode::Encrypt` an env password that fails the policy is
/// refused unless `allow_weak` is set; interactively the user is warned
/// and may choose to use it anyway.
pub fn obtain_password(
    mode: FlowMode,
    settings: &Settings,
    allow_weak: bool,
) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            let pw = Zeroizing::new(pw);
            if mode == FlowMode::Encrypt && !allow_weak {
                let verdict = settings.password_policy().validate(&pw);
                if !verdict.valid {
                    return Err(FolderGuardError::CommandFailed(format!(
                        "{} (pass --allow-weak to use it anyway)",
                        verdict.message
                    )));
                }
            }
            return Ok(pw);
        }
    }

    let mut flow = PasswordFlow::new(
        mode,
        settings.password_policy(),
        settings.confirm_password,
    );

    loop {
        match flow.prompt() {
            Prompt::EnterPassword { notice } => {
                if let Some(notice) = notice {
                    output::warning(&notice);
                }
                let pw = read_password("Enter password")?;
                flow.handle(FlowEvent::Submit(pw));
            }
            Prompt::ConfirmPassword => {
                let pw = read_password("Confirm password")?;
                flow.handle(FlowEvent::Submit(pw));
            }
            Prompt::WeakPassword(verdict) => {
                if allow_weak {
                    flow.handle(FlowEvent::UseAnyway);
                    continue;
                }
                output::warning(&verdict.message);
                if let Some(suggestion) = &verdict.suggestion {
                    output::tip(&format!("Suggestion: {suggestion}"));
                }
                output::info(
                    "Weak passwords can be cracked even with strong encryption. \
                     If you forget this password, your data cannot be recovered.",
                );
                let choice = dialoguer::Select::new()
                    .with_prompt("Weak password")
                    .items(&["Change password", "Use anyway"])
                    .default(0)
                    .interact_opt()
                    .map_err(|e| FolderGuardError::CommandFailed(format!("prompt: {e}")))?;
                flow.handle(match choice {
                    Some(0) => FlowEvent::ChangePassword,
                    Some(_) => FlowEvent::UseAnyway,
                    None => FlowEvent::Cancel,
                });
            }
            Prompt::Ready => {
                return flow.take_password().ok_or(FolderGuardError::UserCancelled);
            }
            Prompt::Cancelled => return Err(FolderGuardError::UserCancelled),
        }
    }
}

fn read_password(prompt: &str) -> Result<Zeroizing<String>> {
    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| FolderGuardError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lock_with_flags() {
        let cli = Cli::parse_from(["folderguard", "--project", "vault", "lock", "notes", "--allow-weak"]);
        assert_eq!(cli.project, "vault");
        match cli.command {
            Commands::Lock { path, allow_weak } => {
                assert_eq!(path, "notes");
                assert!(allow_weak);
            }
            _ => panic!("expected lock"),
        }
    }

    #[test]
    fn project_defaults_to_current_dir() {
        let cli = Cli::parse_from(["folderguard", "unlock", "a.encrypted"]);
        assert_eq!(cli.project, ".");
        assert!(matches!(cli.command, Commands::Unlock { .. }));
    }

    #[test]
    fn check_password_takes_json_flag() {
        let cli = Cli::parse_from(["folderguard", "check-password", "--json"]);
        assert!(matches!(cli.command, Commands::CheckPassword { json: true }));
    }
}
