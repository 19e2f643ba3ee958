//! Check-key command - validates a private key file offline.

use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use clap::Args;

use dsproxy_oauth::{
    Credentials, JWT_LIFETIME_SECS, build_assertion, first_line, sanitize_private_key,
};

use super::Context;

/// Arguments for the check-key command.
#[derive(Args, Debug)]
pub struct CheckKeyArgs {
    /// PEM file to check
    pub file: PathBuf,
}

/// Run the check-key command.
pub async fn run(args: CheckKeyArgs, ctx: &Context) -> Result<()> {
    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let key = sanitize_private_key(&raw);

    println!("First line: {}", first_line(&key));
    if ctx.verbose {
        println!("Lines: {}", key.lines().count());
        println!("Changed by sanitizer: {}", key != raw);
    }

    let probe = Credentials::new("check", "check", "localhost", key);
    match build_assertion(&probe, chrono::Utc::now(), JWT_LIFETIME_SECS) {
        Ok(_) => {
            println!("Key parses and signs: ok");
            Ok(())
        }
        Err(e) => bail!("key is not usable: {}", e),
    }
}
