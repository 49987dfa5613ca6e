#![cfg(test)]
//! Ensures the embedded shared theme (ui/assets/theme/main.css) remains
//! present and non-trivial. The launcher inlines it with `include_str!`, so a
//! truncated or relocated file would only surface as unstyled pages at
//! runtime; this fails the build early instead.
//!
//! If you intentionally rename or relocate the theme, update both this test
//! and the `include_str!` constant in `web/src/main.rs`.

const EMBEDDED_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

#[test]
fn embedded_css_file_exists_and_is_not_empty() {
    assert!(
        !EMBEDDED_CSS.trim().is_empty(),
        "Embedded CSS file appears to be empty. If this is intentional, remove the test."
    );
}

#[test]
fn embedded_css_contains_expected_tokens() {
    // Quick sanity tokens that should exist in our theme.
    let required = [
        "--color-bg",
        "body {",
        ".page-dashboard",
        ".dashboard__controls",
        ".chart-panel",
        ".chart-panel__hover",
    ];
    for token in required {
        assert!(
            EMBEDDED_CSS.contains(token),
            "Expected token `{token}` missing from embedded CSS"
        );
    }
}
