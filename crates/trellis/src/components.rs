// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `trellis components` command implementation.

use trellis_config::TrellisConfig;
use trellis_core::TrellisError;
use trellis_plugin::ComponentDescriptor;

use crate::check::{CheckStatus, lint_components};

/// Compile configured components, optionally restricted to one view.
///
/// Any component failing to compile fails the whole listing.
pub fn collect_descriptors(
    config: &TrellisConfig,
    view: Option<&str>,
) -> Result<Vec<ComponentDescriptor>, TrellisError> {
    let mut descriptors = Vec::new();
    for result in lint_components(config) {
        if result.status == CheckStatus::Fail {
            return Err(TrellisError::Config(result.message));
        }
        if let Some(descriptor) = result.descriptor.filter(|d| d.matches_view(view)) {
            descriptors.push(descriptor);
        }
    }
    Ok(descriptors)
}

/// Run the `trellis components` command.
pub fn run_components(
    config: &TrellisConfig,
    json: bool,
    view: Option<&str>,
) -> Result<(), TrellisError> {
    let descriptors = collect_descriptors(config, view)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&descriptors)?);
        return Ok(());
    }

    println!(
        "  {:<24} {:<10} {:>8}  {:<24} IMPLEMENTS",
        "KEY", "VIEW", "POSITION", "TAB"
    );
    for d in &descriptors {
        println!(
            "  {:<24} {:<10} {:>8}  {:<24} {}",
            d.key, d.view, d.position, d.tab, d.implements
        );
        let required = d.params.required();
        if !required.is_empty() {
            println!("    requires: {}", required.join(", "));
        }
    }
    Ok(())
}
