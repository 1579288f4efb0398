//! `folderguard check-password` — judge a password without encrypting anything.

use zeroize::Zeroizing;

use crate::cli::{load_settings, output, Cli, PASSWORD_ENV};
use crate::errors::{FolderGuardError, Result};
use crate::password::PasswordVerdict;

/// Execute the `check-password` command.
///
/// Exits with an error when the password would be rejected, so scripts
/// can use it as a gate.
pub fn execute(cli: &Cli, json: bool) -> Result<()> {
    let settings = load_settings(cli)?;
    let password = match std::env::var(PASSWORD_ENV) {
        Ok(pw) if !pw.is_empty() => Zeroizing::new(pw),
        _ => Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Password to check")
                .interact()
                .map_err(|e| FolderGuardError::CommandFailed(format!("password prompt: {e}")))?,
        ),
    };

    let verdict = settings.password_policy().validate(&password);

    if json {
        let rendered = serde_json::to_string_pretty(&verdict)
            .map_err(|e| FolderGuardError::CommandFailed(format!("json output: {e}")))?;
        println!("{rendered}");
    } else {
        print_verdict(&verdict);
    }

    if verdict.valid {
        Ok(())
    } else {
        Err(FolderGuardError::CommandFailed(
            "password does not meet the policy".into(),
        ))
    }
}

fn print_verdict(verdict: &PasswordVerdict) {
    if verdict.valid {
        output::success(&format!(
            "{} (strength: {})",
            verdict.message, verdict.strength
        ));
    } else {
        output::warning(&verdict.message);
        if let Some(suggestion) = &verdict.suggestion {
            output::tip(&format!("Suggestion: {suggestion}"));
        }
    }
}
