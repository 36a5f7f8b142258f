//! Layering guardrails for the workspace crates.
//!
//! `latte_core` is the pure vocabulary and must stay dependency-free. `latte_syntax` is a library
//! and must not pull in the CLI stack. These tests scan the member manifests and fail when either
//! rule is broken.

/// Dependency names listed in the `[dependencies]` table of a manifest.
fn dependencies(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn core_vocabulary_has_no_dependencies() {
    let manifest = include_str!("../crates/latte_core/Cargo.toml");
    assert_eq!(dependencies(manifest), Vec::<String>::new());
}

#[test]
fn syntax_crate_does_not_depend_on_cli_stack() {
    let manifest = include_str!("../crates/latte_syntax/Cargo.toml");
    let deps = dependencies(manifest);
    assert!(deps.iter().any(|d| d == "latte_core"));
    for forbidden in ["clap", "tracing-subscriber", "latte"] {
        assert!(
            !deps.iter().any(|d| d == forbidden),
            "`{forbidden}` must not appear in latte_syntax [dependencies]"
        );
    }
}
