use super::*;
use pretty_assertions::assert_eq;
use std::collections::HashSet;

const ALL_MODES: [Mode; 8] = [
    Mode::BaseTable,
    Mode::Root,
    Mode::String,
    Mode::Comment,
    Mode::ScalarFunction,
    Mode::AggregateFunction,
    Mode::Alias,
    Mode::Whitespace,
];

/// First rule of `mode` matching a prefix of `input`.
fn first_match(mode: Mode, input: &str) -> Option<(&'static str, TokenKind, usize)> {
    let first = input.as_bytes().first().copied().unwrap_or(0);
    table(mode).rules().find_map(|rule| match (rule.pattern)(input) {
        0 => None,
        len => Some((rule.name, rule.emit.leading_kind(first), len)),
    })
}

/// `(mode, rule name, sample input, kind of the first token)` for every rule.
const SAMPLES: &[(Mode, &str, &str, TokenKind)] = &[
    (Mode::Whitespace, "white", " \n", TokenKind::White),
    (Mode::Whitespace, "comment_open", "/* x */", TokenKind::Comment),
    (Mode::Whitespace, "line_comment", "// x", TokenKind::Comment),
    (Mode::Whitespace, "unmatched_close", "*/", TokenKind::Invalid),
    (Mode::BaseTable, "base_table", "#issues", TokenKind::BaseTable),
    (Mode::Root, "bracket", "{", TokenKind::DelimiterCurly),
    (Mode::Root, "column", "due_date", TokenKind::Column),
    (Mode::Root, "table_with_many", "#labels", TokenKind::TableWithMany),
    (Mode::Root, "duration", "@6M", TokenKind::Duration),
    (Mode::Root, "constant", "@now", TokenKind::Constant),
    (Mode::Root, "date", "@2024-01-31", TokenKind::Date),
    (Mode::Root, "comparison", ":>=", TokenKind::ComparisonOperator),
    (Mode::Root, "range", "..", TokenKind::RangeSeparator),
    (Mode::Root, "path", ".", TokenKind::PathSeparator),
    (Mode::Root, "glob", "*", TokenKind::Glob),
    (Mode::Root, "scalar_pipe", "|", TokenKind::ScalarPipe),
    (Mode::Root, "aggregate_pipe", "%", TokenKind::AggregatePipe),
    (Mode::Root, "decimal", "1.5", TokenKind::Number),
    (Mode::Root, "integer", "42", TokenKind::Number),
    (Mode::Root, "unterminated_string", "\"open", TokenKind::StringInvalid),
    (Mode::Root, "string_open", "\"closed\"", TokenKind::StringQuote),
    (Mode::Root, "char", "'x'", TokenKind::String),
    (Mode::Root, "char_escape", "'\\n'", TokenKind::String),
    (Mode::Root, "unterminated_char", "'", TokenKind::StringInvalid),
    (Mode::Root, "has", "++", TokenKind::Has),
    (Mode::Root, "operator", "-1", TokenKind::Operator),
    (Mode::Root, "column_prefix", "$", TokenKind::ColumnPrefix),
    (Mode::Root, "alias_prefix", "->", TokenKind::AliasPrefix),
    (Mode::Root, "column_control", "\\sd", TokenKind::ColumnControl),
    (Mode::ScalarFunction, "scalar_function", "lower", TokenKind::ScalarFunction),
    (Mode::AggregateFunction, "aggregate_function", "count", TokenKind::AggregateFunction),
    (Mode::Alias, "alias", "t", TokenKind::Alias),
    (Mode::Comment, "text", "abc", TokenKind::Comment),
    (Mode::Comment, "nested_open", "/*", TokenKind::Comment),
    (Mode::Comment, "close", "*/", TokenKind::Comment),
    (Mode::Comment, "stray", "/ ", TokenKind::Comment),
    (Mode::String, "text", "abc", TokenKind::String),
    (Mode::String, "escape", "\\n", TokenKind::StringEscape),
    (Mode::String, "bad_escape", "\\q", TokenKind::StringEscapeInvalid),
    (Mode::String, "close", "\"", TokenKind::StringQuote),
];

#[test]
fn every_rule_is_reachable() {
    for &(mode, name, sample, kind) in SAMPLES {
        let got = first_match(mode, sample).map(|(name, kind, _)| (name, kind));
        assert_eq!(got, Some((name, kind)), "{mode} sample {sample:?}");
    }
}

#[test]
fn samples_cover_every_rule() {
    let covered: HashSet<(Mode, &str)> = SAMPLES.iter().map(|s| (s.0, s.1)).collect();
    for mode in ALL_MODES {
        for entry in table(mode).entries {
            if let Entry::Rule(rule) = entry {
                assert!(
                    covered.contains(&(mode, rule.name)),
                    "no sample for {mode}/{}",
                    rule.name
                );
            }
        }
    }
}

#[test]
fn rule_names_are_unique_per_mode() {
    for mode in ALL_MODES {
        let names: Vec<&str> = table(mode).rules().map(|r| r.name).collect();
        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(names.len(), unique.len(), "duplicate rule name in {mode}");
    }
}

#[test]
fn tables_know_their_mode() {
    for mode in ALL_MODES {
        assert_eq!(table(mode).mode, mode);
    }
}

#[test]
fn no_rule_matches_empty_input() {
    for mode in ALL_MODES {
        for rule in table(mode).rules() {
            assert_eq!((rule.pattern)(""), 0, "{mode}/{}", rule.name);
        }
    }
}

// === Ordering ===

#[test]
fn includes_are_spliced_first() {
    let root: Vec<&str> = table(Mode::Root).rules().take(5).map(|r| r.name).collect();
    assert_eq!(
        root,
        vec!["white", "comment_open", "line_comment", "unmatched_close", "bracket"]
    );
    let alias: Vec<&str> = table(Mode::Alias).rules().map(|r| r.name).collect();
    assert_eq!(
        alias,
        vec!["white", "comment_open", "line_comment", "unmatched_close", "alias"]
    );
}

#[test]
fn range_beats_path_separator() {
    assert_eq!(first_match(Mode::Root, "..5"), Some(("range", TokenKind::RangeSeparator, 2)));
}

#[test]
fn comparison_beats_range() {
    assert_eq!(
        first_match(Mode::Root, "..:<=.."),
        Some(("comparison", TokenKind::ComparisonOperator, 7))
    );
}

#[test]
fn duration_beats_constant() {
    assert_eq!(first_match(Mode::Root, "@1d12h").map(|m| m.0), Some("duration"));
    assert_eq!(first_match(Mode::Root, "@d12").map(|m| m.0), Some("constant"));
}

#[test]
fn glob_shadows_arithmetic_star() {
    assert_eq!(first_match(Mode::Root, "* 2").map(|m| m.0), Some("glob"));
}

#[test]
fn arrow_is_alias_prefix_not_minus() {
    assert_eq!(
        first_match(Mode::Root, "->t"),
        Some(("alias_prefix", TokenKind::AliasPrefix, 2))
    );
}

#[test]
fn unterminated_string_checked_before_quote() {
    assert_eq!(first_match(Mode::Root, "\"a\nb\"").map(|m| m.0), Some("unterminated_string"));
    assert_eq!(first_match(Mode::Root, "\"a\" b").map(|m| m.0), Some("string_open"));
}

// === Actions and faults ===

#[test]
fn pipes_and_arrow_push_single_shot_modes() {
    let action = |mode: Mode, name: &str| {
        table(mode)
            .rules()
            .find(|r| r.name == name)
            .map(|r| r.action)
    };
    assert_eq!(action(Mode::Root, "scalar_pipe"), Some(Action::Push(Mode::ScalarFunction)));
    assert_eq!(
        action(Mode::Root, "aggregate_pipe"),
        Some(Action::Push(Mode::AggregateFunction))
    );
    assert_eq!(action(Mode::Root, "alias_prefix"), Some(Action::Push(Mode::Alias)));
    assert_eq!(action(Mode::ScalarFunction, "scalar_function"), Some(Action::Pop));
    assert_eq!(action(Mode::BaseTable, "base_table"), Some(Action::SwitchTo(Mode::Root)));
    assert_eq!(action(Mode::Comment, "nested_open"), Some(Action::Push(Mode::Comment)));
}

#[test]
fn error_kinds_carry_faults() {
    for mode in ALL_MODES {
        for rule in table(mode).rules() {
            if let Emit::Kind(kind) = rule.emit {
                assert_eq!(
                    kind.is_error(),
                    rule.fault.is_some(),
                    "{mode}/{} emits {kind}",
                    rule.name
                );
            }
        }
    }
}

#[test]
fn fallbacks() {
    assert_eq!(table(Mode::BaseTable).fallback, Fallback::Defer(Mode::Root));
    assert_eq!(table(Mode::Root).fallback, Fallback::InvalidChar);
    assert_eq!(table(Mode::String).fallback, Fallback::InvalidLine);
    assert_eq!(
        table(Mode::AggregateFunction).fallback,
        Fallback::Expect(Construct::AggregatePipe)
    );
    assert_eq!(table(Mode::Alias).fallback, Fallback::Expect(Construct::Alias));
}

#[test]
fn bracket_kinds() {
    assert_eq!(bracket_kind(b'}'), TokenKind::DelimiterCurly);
    assert_eq!(bracket_kind(b'['), TokenKind::DelimiterSquare);
    assert_eq!(bracket_kind(b')'), TokenKind::DelimiterParenthesis);
}
