//! Rules command - lists the built-in detection rules.

use credsweep_providers::{ProviderKind, RuleDef, builtin_rules};
use serde_json::json;

use crate::ui::{colors, print_command_header};
use crate::{OutputFormat, RulesArgs};

/// Executes the `credsweep rules` command.
pub fn run(args: &RulesArgs) -> super::Result {
    let rules: Vec<&'static RuleDef> = builtin_rules()
        .into_iter()
        .filter(|rule| args.provider.is_none_or(|p| rule.provider == p))
        .collect();

    if matches!(args.format, OutputFormat::Json) {
        print_json(&rules)?;
        return Ok(());
    }

    print_command_header("rules");

    if rules.is_empty() {
        println!(
            "{} {}",
            colors::muted().apply_to("○"),
            colors::secondary().apply_to("no rules match the filter")
        );
        return Ok(());
    }

    println!("{}", colors::muted().apply_to(format!("{} rules", rules.len())));

    for provider in ProviderKind::ALL {
        let for_provider: Vec<_> = rules.iter().filter(|r| r.provider == provider).collect();
        if for_provider.is_empty() {
            continue;
        }

        println!();
        println!("{}", console::style(provider.name()).bold());

        for rule in for_provider {
            print_rule_row(rule, args.verbose);
        }
    }

    Ok(())
}

fn print_rule_row(rule: &RuleDef, verbose: bool) {
    println!(
        "  {}  {}",
        colors::accent().apply_to(rule.id),
        colors::secondary().apply_to(rule.name)
    );

    if verbose {
        println!("      {}", colors::muted().apply_to(rule.description));
        println!(
            "      {} {}",
            colors::muted().apply_to("regex:"),
            colors::emphasis().apply_to(rule.regex)
        );
        if !rule.keywords.is_empty() {
            println!(
                "      {} {}",
                colors::muted().apply_to("keywords:"),
                colors::emphasis().apply_to(rule.keywords.join(", "))
            );
        }
    }
}

fn print_json(rules: &[&'static RuleDef]) -> super::Result {
    let entries: Vec<_> = rules
        .iter()
        .map(|rule| {
            json!({
                "id": rule.id,
                "provider": rule.provider,
                "name": rule.name,
                "description": rule.description,
                "regex": rule.regex,
                "capture_group": rule.capture_group,
                "keywords": rule.keywords,
                "supports_validation": rule.provider.supports_validation(),
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}
