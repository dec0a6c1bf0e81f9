//! Confirmation prompts for destructive actions.

use std::io::IsTerminal;

use dialoguer::Confirm;

/// Ask for confirmation, or require `--yes` when stdin is not a terminal.
///
/// Returns `Ok(true)` when the action may proceed.
pub fn confirm(prompt: &str, assume_yes: bool) -> anyhow::Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(anyhow::anyhow!(
            "{}\nHint: Re-run with --yes to confirm without a prompt.",
            prompt.trim_end_matches('?')
        ));
    }
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
