//! Interactive secret entry

use anyhow::{Context, Result};
use dialoguer::Password;
use digestify_core::SecretKey;

/// Prompt text shown on the terminal
pub const KEY_PROMPT: &str = "Input your secret shared key";

/// Read the shared secret from the terminal without echoing it.
///
/// The prompt goes to stderr, so signed output on stdout stays clean.
pub fn prompt_secret_key() -> Result<SecretKey> {
    let secret = Password::new()
        .with_prompt(KEY_PROMPT)
        .allow_empty_password(true)
        .interact()
        .context("failed to read secret key")?;
    Ok(SecretKey::from(secret))
}
