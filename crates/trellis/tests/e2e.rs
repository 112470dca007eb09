// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests running the `trellis` binary against harness configs.
//!
//! Each test creates an isolated TestHarness with its own asset files and
//! `trellis.toml`. Tests are independent and order-insensitive.

use std::process::{Command, Output};

use trellis_test_utils::TestHarness;

const CONFIG: &str = r#"
[[components]]
key = "articleContent"
name = "article-content"
implements = 'App\Entity\Article'
view = "detail"
source = "{assets}/article-content.js"
position = 100
params = ["id", "?locale"]

[[components]]
key = "articleGallery"
implements = 'App\Plugin\ArticlePlugin'
component_type = "app::GalleryComponent"
view = "list"
source = "{assets}/article-content.js"
"#;

fn trellis(harness: &TestHarness, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_trellis"))
        .arg("--config")
        .arg(harness.config_path().expect("config written"))
        .arg("--plain")
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("binary runs")
}

fn harness(config: &str) -> TestHarness {
    TestHarness::builder()
        .with_asset("article-content.js")
        .with_config(config)
        .build()
        .unwrap()
}

// ---- check ----

#[test]
fn check_passes_with_warnings_for_custom_types() {
    let harness = harness(CONFIG);
    let output = trellis(&harness, &["check"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "{stdout}");
    assert!(stdout.contains("[OK]   articleContent"), "{stdout}");
    assert!(stdout.contains("[WARN] articleGallery"), "{stdout}");
    assert!(stdout.contains("2 components, 1 warnings, 0 failures"), "{stdout}");
}

#[test]
fn check_fails_on_missing_asset() {
    let config = CONFIG.replace("article-content.js\"\nposition", "missing.js\"\nposition");
    let harness = harness(&config);
    let output = trellis(&harness, &["check"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(!output.status.success());
    assert!(stdout.contains("[FAIL] articleContent"), "{stdout}");
}

#[test]
fn invalid_config_exits_with_error() {
    let harness = harness("[[components]]\nkey = \"a\"\nimplement = \"T\"\n");
    let output = trellis(&harness, &["check"]);
    assert!(!output.status.success());
    assert!(!output.stderr.is_empty());
}

// ---- components ----

#[test]
fn components_json_lists_descriptors() {
    let harness = harness(CONFIG);
    let output = trellis(&harness, &["components", "--json"]);
    assert!(output.status.success());

    let descriptors: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let list = descriptors.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["key"], "articleContent");
    assert_eq!(list[0]["params"]["id"], "#REQUIRED#");
    assert_eq!(list[1]["componentType"], "app::GalleryComponent");
}

#[test]
fn components_view_filter() {
    let harness = harness(CONFIG);
    let output = trellis(&harness, &["components", "--view", "list"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("articleGallery"));
    assert!(!stdout.contains("articleContent"));
}
