//! Integration tests for pattern interpolation.

use inflex::{
    InflectionOptions, LocaleInflections, PatternError, RawInflections, Switches, interpolate_with,
    load_inflections, options,
};

fn fixture() -> LocaleInflections {
    let raw = RawInflections::new()
        .kind(
            "gender",
            [
                ("m", "male"),
                ("f", "female"),
                ("n", "neuter"),
                ("s", "strange"),
                ("default", "n"),
                ("female", "@f"),
                ("lady", "@female"),
            ],
        )
        .kind(
            "number",
            [("sg", "singular"), ("pl", "plural"), ("default", "sg")],
        )
        .kind(
            "@gender",
            [
                ("m", "masculine"),
                ("f", "feminine"),
                ("n", "neuter"),
                ("default", "m"),
                ("fem", "@f"),
            ],
        )
        .kind(
            "@tense",
            [("past", "past tense"), ("now", "present tense"), ("default", "now")],
        );
    load_inflections("xx", &raw).unwrap()
}

fn render(text: &str, options: &InflectionOptions) -> String {
    interpolate_with(text, &fixture(), Switches::default(), options).unwrap()
}

fn render_raising(text: &str, options: &InflectionOptions) -> Result<String, PatternError> {
    let switches = Switches::builder().raises(true).build();
    interpolate_with(text, &fixture(), switches, options)
}

// =========================================================================
// Basic Matching
// =========================================================================

#[test]
fn matching_token_selects_its_clause() {
    let text = "Dear @{f:Lady|m:Sir|n:You|All}!";
    assert_eq!(render(text, &options! { "gender" => "f" }), "Dear Lady!");
    assert_eq!(render(text, &options! { "gender" => "m" }), "Dear Sir!");
}

#[test]
fn missing_option_uses_default_token() {
    let text = "Dear @{f:Lady|m:Sir|n:You|All}!";
    assert_eq!(render(text, &options! {}), "Dear You!");
}

#[test]
fn empty_option_counts_as_missing() {
    let text = "Dear @{f:Lady|m:Sir|n:You|All}!";
    assert_eq!(render(text, &options! { "gender" => "" }), "Dear You!");
}

#[test]
fn token_absent_from_pattern_uses_free_text() {
    let text = "Dear @{f:Lady|m:Sir|n:You|All}!";
    assert_eq!(render(text, &options! { "gender" => "s" }), "Dear All!");
}

#[test]
fn no_match_without_free_text_renders_empty() {
    assert_eq!(render("[@{f:Lady|m:Sir}]", &options! { "gender" => "s" }), "[]");
}

#[test]
fn text_without_patterns_is_unchanged() {
    assert_eq!(render("plain text", &options! {}), "plain text");
    assert_eq!(
        render("write to mail@example.com", &options! {}),
        "write to mail@example.com"
    );
}

#[test]
fn several_patterns_in_one_text() {
    let text = "@{f:She|m:He} has @{sg:one item|pl:many items}";
    let options = options! { "gender" => "f", "number" => "pl" };
    assert_eq!(render(text, &options), "She has many items");
}

#[test]
fn option_given_as_alias_resolves_to_true_token() {
    let text = "@{f:Lady|m:Sir|Other}";
    assert_eq!(render(text, &options! { "gender" => "female" }), "Lady");
    assert_eq!(render(text, &options! { "gender" => "lady" }), "Lady");
}

#[test]
fn invalid_option_falls_back_to_default() {
    let text = "@{f:Lady|n:You|All}";
    assert_eq!(render(text, &options! { "gender" => "x" }), "You");
}

// =========================================================================
// Groups and Negation
// =========================================================================

#[test]
fn group_matches_any_member() {
    let text = "@{m,f:person|thing}";
    assert_eq!(render(text, &options! { "gender" => "f" }), "person");
    assert_eq!(render(text, &options! { "gender" => "n" }), "thing");
}

#[test]
fn negated_member_matches_every_other_token() {
    let text = "Dear @{!m:Lady|m:Sir|n:You|All}!";
    assert_eq!(render(text, &options! { "gender" => "n" }), "Dear Lady!");
    assert_eq!(render(text, &options! { "gender" => "m" }), "Dear Sir!");
}

#[test]
fn single_negation_ignores_positive_members() {
    let text = "@{!m,f:A|B}";
    assert_eq!(render(text, &options! { "gender" => "n" }), "A");
    assert_eq!(render(text, &options! { "gender" => "m" }), "B");
}

#[test]
fn several_negations_match_every_token() {
    let text = "@{!m,!f:Nobody|Other}";
    assert_eq!(render(text, &options! { "gender" => "m" }), "Nobody");
    assert_eq!(render(text, &options! { "gender" => "f" }), "Nobody");
}

// =========================================================================
// Escapes and Loud Values
// =========================================================================

#[test]
fn doubled_marker_escapes_pattern() {
    let text = "@@{f:AAAAA|m:BBBBB}";
    assert_eq!(render(text, &options! {}), "@{f:AAAAA|m:BBBBB}");
    assert_eq!(render(text, &options! { "gender" => "f" }), "@{f:AAAAA|m:BBBBB}");
}

#[test]
fn backslash_escapes_pattern() {
    assert_eq!(render("\\@{f:x|y}", &options! { "gender" => "f" }), "@{f:x|y}");
}

#[test]
fn escaped_named_pattern_keeps_kind() {
    assert_eq!(
        render("@@gender{f:x}{m:y}", &options! {}),
        "@gender{f:x}{m:y}"
    );
}

#[test]
fn loud_value_renders_description() {
    assert_eq!(render("@{n:~}", &options! { "gender" => "n" }), "neuter");
    assert_eq!(render("@{f:~}", &options! { "gender" => "female" }), "female");
}

#[test]
fn escaped_tilde_is_literal() {
    assert_eq!(render("@{n:\\~}", &options! { "gender" => "n" }), "~");
}

// =========================================================================
// Aliases in Patterns
// =========================================================================

#[test]
fn alias_in_pattern_is_ignored_by_default() {
    let text = "@{female:Lady|Other}";
    assert_eq!(render(text, &options! { "gender" => "f" }), "Other");
}

#[test]
fn alias_in_pattern_matches_when_enabled() {
    let text = "@{female:Lady|Other}";
    let options = options! { "gender" => "f" }.with_aliased_patterns(true);
    assert_eq!(render(text, &options), "Lady");
}

#[test]
fn alias_in_pattern_raises_invalid_token() {
    let err = render_raising("@{female:Lady|Other}", &options! { "gender" => "f" }).unwrap_err();
    assert_eq!(
        err,
        PatternError::InvalidToken {
            pattern: "@{female:Lady|Other}".into(),
            token: "female".into(),
        }
    );
}

// =========================================================================
// Default Switches
// =========================================================================

#[test]
fn unknown_defaults_off_uses_free_text() {
    let text = "@{f:Lady|n:You|All}";
    let options = options! {}.with_unknown_defaults(false);
    assert_eq!(render(text, &options), "All");
}

#[test]
fn unknown_defaults_off_raises_option_not_found() {
    let options = options! {}.with_unknown_defaults(false);
    let err = render_raising("@{f:Lady|n:You|All}", &options).unwrap_err();
    assert_eq!(
        err,
        PatternError::OptionNotFound {
            pattern: "@{f:Lady|n:You|All}".into(),
            kind: "gender".into(),
        }
    );
}

#[test]
fn unknown_defaults_off_raises_option_incorrect() {
    let options = options! { "gender" => "x" }.with_unknown_defaults(false);
    let err = render_raising("@{f:Lady|n:You|All}", &options).unwrap_err();
    assert_eq!(
        err,
        PatternError::OptionIncorrect {
            pattern: "@{f:Lady|n:You|All}".into(),
            kind: "gender".into(),
            option: "x".into(),
        }
    );
}

fn without_default() -> LocaleInflections {
    let raw = RawInflections::new().kind("person", [("i", "first"), ("you", "second")]);
    load_inflections("xx", &raw).unwrap()
}

#[test]
fn missing_option_without_default_uses_free_text() {
    let result = interpolate_with(
        "@{i:I am|you:You are|Someone is}",
        &without_default(),
        Switches::default(),
        &options! {},
    );
    assert_eq!(result.unwrap(), "Someone is");
}

#[test]
fn missing_option_without_default_raises_option_not_found() {
    let options = InflectionOptions::new().with_raises(true);
    let text = "@{i:I am|you:You are|Someone is}";
    let err = interpolate_with(text, &without_default(), Switches::default(), &options).unwrap_err();
    assert_eq!(
        err,
        PatternError::OptionNotFound {
            pattern: text.into(),
            kind: "person".into(),
        }
    );
}

#[test]
fn invalid_option_without_default_raises_option_incorrect() {
    let options = options! { "person" => "they" }.with_raises(true);
    let text = "@{i:I am|Someone is}";
    let err = interpolate_with(text, &without_default(), Switches::default(), &options).unwrap_err();
    assert_eq!(
        err,
        PatternError::OptionIncorrect {
            pattern: text.into(),
            kind: "person".into(),
            option: "they".into(),
        }
    );
}

#[test]
fn excluded_defaults_pick_default_clause() {
    let text = "@{n:You|f:Lady|All}";
    let options = options! { "gender" => "s" };
    assert_eq!(render(text, &options), "All");
    assert_eq!(render(text, &options.with_excluded_defaults(true)), "You");
}

#[test]
fn excluded_defaults_need_a_valid_option() {
    let text = "@{n:You|f:Lady|All}";
    let options = options! { "gender" => "x" }
        .with_excluded_defaults(true)
        .with_unknown_defaults(false);
    assert_eq!(render(text, &options), "All");
}

#[test]
fn loud_excluded_default_renders_default_description() {
    let options = options! { "gender" => "s" }.with_excluded_defaults(true);
    assert_eq!(render("@{n:~|f:Lady}", &options), "neuter");
}

#[test]
fn switch_overrides_from_flat_pairs() {
    let options = InflectionOptions::from_pairs([
        ("gender", "x"),
        ("inflector_raises", "true"),
        ("inflector_unknown_defaults", "false"),
    ])
    .unwrap();
    let result = interpolate_with("@{f:Lady|All}", &fixture(), Switches::default(), &options);
    assert!(matches!(result, Err(PatternError::OptionIncorrect { .. })));
}

#[test]
fn switch_overrides_from_options_macro() {
    let options = options! { "inflector_raises" => "true" };
    let result = interpolate_with("@{zzz:x|free}", &fixture(), Switches::default(), &options);
    assert!(matches!(result, Err(PatternError::InvalidToken { token, .. }) if token == "zzz"));
}

#[test]
fn engine_switches_apply_without_overrides() {
    let switches = Switches::builder().excluded_defaults(true).build();
    let result = interpolate_with("@{n:You|All}", &fixture(), switches, &options! { "gender" => "m" });
    assert_eq!(result.unwrap(), "You");
}

// =========================================================================
// Malformed Patterns
// =========================================================================

#[test]
fn unknown_token_is_skipped() {
    assert_eq!(render("@{zz:a|f:Lady|All}", &options! { "gender" => "f" }), "Lady");
}

#[test]
fn clause_without_value_raises_invalid_token() {
    let text = "@{f:Lady|oops|All}";
    assert_eq!(render(text, &options! { "gender" => "s" }), "All");
    let err = render_raising(text, &options! { "gender" => "s" }).unwrap_err();
    assert!(matches!(err, PatternError::InvalidToken { token, .. } if token == "oops"));
}

#[test]
fn misplaced_token_skips_clause() {
    let text = "@{sg:one|f:Lady}";
    assert_eq!(render(text, &options! { "number" => "pl", "gender" => "f" }), "");
}

#[test]
fn misplaced_token_raises() {
    let err = render_raising("@{sg:one|f:Lady}", &options! { "number" => "pl" }).unwrap_err();
    assert_eq!(
        err,
        PatternError::MisplacedToken {
            pattern: "@{sg:one|f:Lady}".into(),
            token: "f".into(),
            kind: "gender".into(),
            expected: "number".into(),
        }
    );
}

#[test]
fn malformed_kind_segment_uses_free_text() {
    assert_eq!(render("@gen,der{m:x|Free}", &options! {}), "Free");
    let err = render_raising("@gen,der{m:x|Free}", &options! {}).unwrap_err();
    assert!(matches!(err, PatternError::InvalidKind { kind, .. } if kind == "gen,der"));
}

#[test]
fn raising_stops_at_first_error() {
    let result = render_raising("@{f:Lady} @{zz:x}", &options! { "gender" => "f" });
    assert!(matches!(result, Err(PatternError::InvalidToken { .. })));
}

// =========================================================================
// Named Patterns
// =========================================================================

#[test]
fn named_pattern_reads_strict_kind() {
    let text = "@gender{m:He|f:She|n:It}";
    assert_eq!(render(text, &options! { "gender" => "n" }), "It");
    assert_eq!(render(text, &options! {}), "He");
}

#[test]
fn prefixed_option_wins_for_strict_kind() {
    let text = "@gender{m:He|f:She|n:It}";
    let options = options! { "gender" => "m", "@gender" => "f" };
    assert_eq!(render(text, &options), "She");
}

#[test]
fn named_pattern_resolves_strict_alias_option() {
    let text = "@gender{m:He|f:She|n:It}";
    assert_eq!(render(text, &options! { "@gender" => "fem" }), "She");
}

#[test]
fn named_pattern_loud_uses_strict_description() {
    assert_eq!(render("@gender{f:~}", &options! { "gender" => "f" }), "feminine");
}

#[test]
fn named_pattern_with_unknown_kind() {
    assert_eq!(render("@mood{a:b|Free}", &options! {}), "Free");
    let err = render_raising("@mood{a:b|Free}", &options! {}).unwrap_err();
    assert_eq!(
        err,
        PatternError::InvalidKind {
            pattern: "@mood{a:b|Free}".into(),
            kind: "mood".into(),
        }
    );
}

#[test]
fn named_pattern_rejects_loose_tokens() {
    assert_eq!(render("@gender{s:odd|Free}", &options! { "gender" => "s" }), "Free");
}

#[test]
fn multi_body_pattern_shares_kind() {
    let text = "@{f:She|m:He}{f: and her| and his} friend";
    assert_eq!(render(text, &options! { "gender" => "f" }), "She and her friend");
    assert_eq!(render(text, &options! { "gender" => "m" }), "He and his friend");

    let named = "@gender{f:she|m:he}{f:her|m:his}";
    assert_eq!(render(named, &options! { "@gender" => "f" }), "sheher");
}

// =========================================================================
// Complex Patterns
// =========================================================================

const COMPLEX: &str = "@gender+tense{f+past:she was|m+past:he was|f+now:she is|m,n+now:he is|someone}";

#[test]
fn complex_pattern_matches_every_component() {
    let options = options! { "@gender" => "f", "@tense" => "past" };
    assert_eq!(render(COMPLEX, &options), "she was");
    let options = options! { "gender" => "n", "tense" => "now" };
    assert_eq!(render(COMPLEX, &options), "he is");
}

#[test]
fn complex_pattern_uses_defaults_per_kind() {
    assert_eq!(render(COMPLEX, &options! {}), "he is");
    assert_eq!(render(COMPLEX, &options! { "tense" => "past" }), "he was");
}

#[test]
fn complex_pattern_falls_back_to_free_text() {
    let options = options! { "gender" => "n", "tense" => "past" };
    assert_eq!(render(COMPLEX, &options), "someone");
}

#[test]
fn complex_loud_joins_descriptions() {
    let options = options! { "gender" => "f", "tense" => "past" };
    assert_eq!(render("@gender+tense{f+past:~}", &options), "feminine past tense");
}

#[test]
fn complex_negation_per_component() {
    let text = "@gender+tense{!m+past:not him then|other}";
    let options = options! { "gender" => "f", "tense" => "past" };
    assert_eq!(render(text, &options), "not him then");
    let options = options! { "gender" => "m", "tense" => "past" };
    assert_eq!(render(text, &options), "other");
}

#[test]
fn complex_excluded_default_matches_through_default() {
    let text = "@gender+tense{m+past:he was|f+past:she was|other}";
    let options = options! { "gender" => "n", "tense" => "past" };
    assert_eq!(render(text, &options), "other");
    assert_eq!(render(text, &options.with_excluded_defaults(true)), "he was");
}

#[test]
fn complex_arity_mismatch_is_skipped() {
    let text = "@gender+tense{f:x|y}";
    assert_eq!(render(text, &options! { "gender" => "f" }), "y");
    let err = render_raising(text, &options! { "gender" => "f" }).unwrap_err();
    assert_eq!(
        err,
        PatternError::ComplexPatternMalformed {
            pattern: "@gender+tense{f:x|y}".into(),
            tokens: "f".into(),
            expected: 2,
            got: 1,
        }
    );
}

#[test]
fn complex_pattern_with_unknown_kind() {
    let err = render_raising("@gender+mood{f+a:x|y}", &options! {}).unwrap_err();
    assert!(matches!(err, PatternError::InvalidKind { kind, .. } if kind == "mood"));
}

#[test]
fn complex_pattern_with_repeated_kind_is_invalid() {
    assert_eq!(render("@gender+gender{f+f:x|y}", &options! {}), "y");
}
