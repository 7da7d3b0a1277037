// tests/proptest_message.rs

//! Property tests for commit-message rendering.

use chrono::{Local, TimeZone};
use cronpush::pipeline::render_message;
use proptest::prelude::*;

proptest! {
    /// The placeholder is always substituted, whatever surrounds it.
    #[test]
    fn render_replaces_placeholder(
        prefix in "[a-zA-Z0-9 .:-]{0,24}",
        suffix in "[a-zA-Z0-9 .:-]{0,24}",
    ) {
        let template = format!("{prefix}{{timestamp}}{suffix}");
        let now = Local.with_ymd_and_hms(2025, 8, 7, 12, 30, 45).unwrap();

        let rendered = render_message(&template, "%Y-%m-%d %H:%M:%S", now);

        prop_assert!(!rendered.contains("{timestamp}"), "placeholder should be substituted");
        prop_assert_eq!(rendered, format!("{prefix}2025-08-07 12:30:45{suffix}"));
    }

    /// Rendering never drops template text around the timestamp.
    #[test]
    fn render_preserves_surrounding_text(secs in 0i64..=1_800_000_000i64) {
        let now = Local.timestamp_opt(secs, 0).unwrap();

        let rendered = render_message(
            "Cron: Updated log on {timestamp}",
            "%Y-%m-%d %H:%M:%S",
            now,
        );

        prop_assert!(rendered.starts_with("Cron: Updated log on "));
        let stamp = now.format("%Y-%m-%d %H:%M:%S").to_string();
        prop_assert!(rendered.ends_with(&stamp));
    }
}
