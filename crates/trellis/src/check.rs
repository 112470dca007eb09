// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `trellis check` command implementation.
//!
//! Compiles every configured component the way bootstrap would, except that
//! type names are not resolved: plugin, entity and custom component types
//! only exist inside the host process.

use std::collections::HashSet;
use std::io::IsTerminal;

use trellis_config::{ComponentConfig, TrellisConfig};
use trellis_core::TrellisError;
use trellis_plugin::{
    AnyType, ComponentDescriptor, ComponentFactories, TEMPLATE_COMPONENT_TYPE, compile_component,
};

/// Status of a component check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of checking one configured component.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub key: String,
    pub status: CheckStatus,
    pub message: String,
    /// The compiled descriptor, unless compilation failed.
    pub descriptor: Option<ComponentDescriptor>,
}

/// Check one component. Custom component types are reported as warnings and
/// the rest of the declaration is compiled as a template component.
pub fn lint_component(config: &ComponentConfig, default_position: i32) -> CheckResult {
    let factories = ComponentFactories::new();
    let custom_type = config
        .component_type
        .as_deref()
        .filter(|t| *t != TEMPLATE_COMPONENT_TYPE);

    let mut as_template = config.clone();
    as_template.component_type = None;

    match compile_component(&as_template, &AnyType, &factories, default_position) {
        Ok(mut descriptor) => {
            let summary = format!(
                "{} / {} (position {})",
                descriptor.implements, descriptor.view, descriptor.position
            );
            match custom_type {
                Some(component_type) => {
                    descriptor.component_type = component_type.to_string();
                    CheckResult {
                        key: descriptor.key.clone(),
                        status: CheckStatus::Warn,
                        message: format!(
                            "{summary}; component type \"{component_type}\" is resolved by the host"
                        ),
                        descriptor: Some(descriptor),
                    }
                }
                None => CheckResult {
                    key: descriptor.key.clone(),
                    status: CheckStatus::Pass,
                    message: summary,
                    descriptor: Some(descriptor),
                },
            }
        }
        Err(e) => CheckResult {
            key: config.key.clone(),
            status: CheckStatus::Fail,
            message: e.to_string(),
            descriptor: None,
        },
    }
}

/// Check all configured components in declaration order. A repeated key is
/// downgraded to a warning on its second occurrence.
pub fn lint_components(config: &TrellisConfig) -> Vec<CheckResult> {
    let mut seen = HashSet::new();
    config
        .components
        .iter()
        .map(|component| {
            let mut result = lint_component(component, config.registry.default_position);
            if !seen.insert(component.key.clone()) && result.status == CheckStatus::Pass {
                result.status = CheckStatus::Warn;
                result.message = format!("{}; duplicate key", result.message);
            }
            result
        })
        .collect()
}

/// Run the `trellis check` command.
pub fn run_check(config: &TrellisConfig, plain: bool) -> Result<(), TrellisError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    let results = lint_components(config);

    println!();
    println!("  trellis check");
    println!("  {}", "-".repeat(50));

    let mut fail_count = 0;
    let mut warn_count = 0;

    for result in &results {
        match result.status {
            CheckStatus::Warn => warn_count += 1,
            CheckStatus::Fail => fail_count += 1,
            CheckStatus::Pass => {}
        }
        println!("{}", format_line(result, use_color));
    }

    if results.is_empty() {
        println!("    no components configured");
    }

    println!();
    println!(
        "  {} components, {warn_count} warnings, {fail_count} failures",
        results.len()
    );
    println!();

    if fail_count > 0 {
        return Err(TrellisError::Config(format!(
            "{fail_count} component(s) failed the check"
        )));
    }
    Ok(())
}

fn format_line(result: &CheckResult, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green().to_string(), result.message.normal().to_string()),
            CheckStatus::Warn => ("!".yellow().to_string(), result.message.yellow().to_string()),
            CheckStatus::Fail => ("✗".red().to_string(), result.message.red().to_string()),
        };
        format!("    {symbol} {:<24} {message}", result.key)
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!("    {tag} {:<24} {}", result.key, result.message)
    }
}
