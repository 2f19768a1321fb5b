//! Validate command - checks a credential against its provider API.

use anyhow::Context as _;
use credsweep_providers::{ValidationError, ValidationResult, Validator};

use crate::ui::{colors, indicators, print_command_header, print_info, verdict_style};
use crate::{OutputFormat, ValidateArgs};

/// Executes the `credsweep validate` command.
pub fn run(args: &ValidateArgs) -> super::Result {
    if matches!(args.format, OutputFormat::Text) {
        print_command_header("validate");
    }

    if !args.provider.supports_validation() {
        anyhow::bail!(
            "provider '{}' has no live validation endpoint (detection only)",
            args.provider
        );
    }

    let validator = Validator::new()?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create async runtime")?;

    let result = rt.block_on(validator.check(args.provider, &args.credential, args.endpoint.as_deref()));

    match result {
        Ok(verdict) => {
            print_verdict(&verdict, args.format)?;
            Ok(())
        }
        Err(err @ ValidationError::Network(_)) => {
            // A network fault is not a verdict on the key.
            Err(anyhow::Error::new(err).context("could not reach the provider"))
        }
        Err(err) => Err(err.into()),
    }
}

fn print_verdict(verdict: &ValidationResult, format: OutputFormat) -> super::Result {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(verdict)?);
        }
        OutputFormat::Text => {
            let (glyph, label) = if verdict.is_valid {
                (indicators::ERROR, "LIVE")
            } else {
                (indicators::SUCCESS, "inactive")
            };
            println!(
                "  {} {} {} {}",
                verdict_style(verdict.is_valid).apply_to(glyph),
                colors::emphasis().apply_to(verdict.provider),
                verdict_style(verdict.is_valid).apply_to(label),
                colors::muted().apply_to(&verdict.message)
            );
            if let Some(status) = verdict.http_status {
                print_info(&format!("provider returned HTTP {status} at {}", verdict.checked_at));
            }
        }
    }
    Ok(())
}
