use std::time::Duration;

use ref_tracker::{scan, scan_with_options, Options, DEFAULT_MATCHERS};

#[test]
fn options_default_values_are_sensible() {
    let options = Options::default();

    assert_eq!(options.min_text_len, 20);
    assert_eq!(options.id_prefix_len, 100);
    assert_eq!(options.matchers.len(), DEFAULT_MATCHERS.len());
    assert!(options.page_url.is_none());
    assert_eq!(options.debounce, Duration::from_millis(500));
    assert_eq!(options.refresh_interval, Duration::from_secs(3));
}

#[test]
fn options_struct_update_syntax_overrides_selected_fields_only() {
    let options = Options {
        min_text_len: 5,
        ..Options::for_page("https://example.com/article")
    };

    assert_eq!(options.min_text_len, 5);
    assert_eq!(options.id_prefix_len, 100);
    assert_eq!(options.page_url.as_deref(), Some("https://example.com/article"));
}

#[test]
fn lower_min_text_len_admits_short_entries() {
    let html = r#"<ol class="references"><li>Short cite.</li><li>Doe, J. (2020). Long enough entry.</li></ol>"#;

    let strict = scan(html);
    let lenient = scan_with_options(
        html,
        &Options {
            min_text_len: 5,
            ..Options::default()
        },
    );

    assert_eq!(strict.len(), 1);
    assert_eq!(lenient.len(), 2);
    assert_eq!(lenient.references[0].text, "Short cite.");
}

#[test]
fn id_prefix_len_controls_id_collisions() {
    let html = r#"<ol class="references">
        <li>Doe, J. (2020). Shared opening words, then part one.</li>
        <li>Doe, J. (2020). Shared opening words, then part two.</li>
    </ol>"#;

    let short_prefix = scan_with_options(
        html,
        &Options {
            id_prefix_len: 10,
            ..Options::default()
        },
    );
    let full = scan(html);

    assert_eq!(short_prefix.references[0].id, short_prefix.references[1].id);
    assert_ne!(full.references[0].id, full.references[1].id);
}

#[test]
fn empty_matcher_list_finds_nothing() {
    let options = Options {
        matchers: Vec::new(),
        ..Options::default()
    };

    let result = scan_with_options(r#"<ol class="references"><li>Doe, J. (2020). Never scanned.</li></ol>"#, &options);
    assert!(result.is_empty());
}
