use super::*;
use pretty_assertions::assert_eq;

use TokenKind::*;

/// `(kind, text)` for every token, trivia included.
fn all(source: &str) -> Vec<(TokenKind, &str)> {
    lex(source).tokens.iter().map(|t| (t.kind, t.text)).collect()
}

/// `(kind, text)` for significant tokens only.
fn significant(source: &str) -> Vec<(TokenKind, &str)> {
    lex(source).significant().map(|t| (t.kind, t.text)).collect()
}

fn error_kinds(source: &str) -> Vec<LexErrorKind> {
    lex(source).errors.iter().map(|e| e.kind).collect()
}

fn concat(output: &LexOutput<'_>) -> std::string::String {
    output.tokens.iter().map(|t| t.text).collect()
}

// === Lossless ===

#[test]
fn concatenated_tokens_reproduce_input() {
    for source in [
        "",
        "#issues",
        "#issues due_date:<@6M|ago $title->t",
        "  /* lead */ #issues // trailing",
        "\"unterminated\n#x",
        "'",
        "é ^ ¿ \u{1F600}",
        "\"a\\\nb\"",
        "x|",
        "*/ */ /* /*",
    ] {
        let output = lex(source);
        assert_eq!(concat(&output), source);
    }
}

#[test]
fn spans_are_contiguous_and_match_text() {
    let source = "#issues {assignee: @null} -> a /* c */";
    let output = lex(source);
    let mut pos = 0;
    for token in &output.tokens {
        assert_eq!(token.span.start, pos);
        assert_eq!(&source[token.span.to_range()], token.text);
        pos = token.span.end;
    }
    assert_eq!(pos as usize, source.len());
}

#[test]
fn empty_input() {
    let output = lex("");
    assert!(output.tokens.is_empty());
    assert!(!output.has_errors());
}

// === Base table ===

#[test]
fn leading_table_reference_is_base_table() {
    assert_eq!(
        significant("#issues #labels"),
        vec![(BaseTable, "#issues"), (TableWithMany, "#labels")]
    );
}

#[test]
fn trivia_before_base_table() {
    assert_eq!(
        all(" // note\n#issues"),
        vec![
            (White, " "),
            (Comment, "// note"),
            (White, "\n"),
            (BaseTable, "#issues"),
        ]
    );
}

#[test]
fn query_without_base_table_starts_in_root() {
    assert_eq!(significant("title:~bug"), vec![
        (Column, "title"),
        (ComparisonOperator, ":~"),
        (Column, "bug"),
    ]);
    assert!(!lex("title:~bug").has_errors());
}

// === Root grammar ===

#[test]
fn full_query() {
    assert_eq!(
        all("#issues due_date:<@6M|ago $title->t"),
        vec![
            (BaseTable, "#issues"),
            (White, " "),
            (Column, "due_date"),
            (ComparisonOperator, ":<"),
            (Duration, "@6M"),
            (ScalarPipe, "|"),
            (ScalarFunction, "ago"),
            (White, " "),
            (ColumnPrefix, "$"),
            (Column, "title"),
            (AliasPrefix, "->"),
            (Alias, "t"),
        ]
    );
}

#[test]
fn range_priority() {
    assert_eq!(
        significant("1..5"),
        vec![(Number, "1"), (RangeSeparator, ".."), (Number, "5")]
    );
    assert_eq!(
        significant("x:<..@2024-01-31"),
        vec![
            (Column, "x"),
            (ComparisonOperator, ":<.."),
            (Date, "@2024-01-31"),
        ]
    );
}

#[test]
fn paths_globs_and_delimiters() {
    assert_eq!(
        significant("#issues {labels.* [a] (b)}"),
        vec![
            (BaseTable, "#issues"),
            (DelimiterCurly, "{"),
            (Column, "labels"),
            (PathSeparator, "."),
            (Glob, "*"),
            (DelimiterSquare, "["),
            (Column, "a"),
            (DelimiterSquare, "]"),
            (DelimiterParenthesis, "("),
            (Column, "b"),
            (DelimiterParenthesis, ")"),
            (DelimiterCurly, "}"),
        ]
    );
}

#[test]
fn has_operators_and_arithmetic() {
    assert_eq!(
        significant("#issues ++#labels --#assignments $a+1.5e3"),
        vec![
            (BaseTable, "#issues"),
            (Has, "++"),
            (TableWithMany, "#labels"),
            (Has, "--"),
            (TableWithMany, "#assignments"),
            (ColumnPrefix, "$"),
            (Column, "a"),
            (Operator, "+"),
            (Number, "1.5e3"),
        ]
    );
}

#[test]
fn constants_and_column_controls() {
    assert_eq!(
        significant("closed:@null $title \\sd \\h2"),
        vec![
            (Column, "closed"),
            (ComparisonOperator, ":"),
            (Constant, "@null"),
            (ColumnPrefix, "$"),
            (Column, "title"),
            (ColumnControl, "\\sd"),
            (ColumnControl, "\\h2"),
        ]
    );
}

#[test]
fn aggregate_pipe() {
    assert_eq!(
        significant("$id%count"),
        vec![
            (ColumnPrefix, "$"),
            (Column, "id"),
            (AggregatePipe, "%"),
            (AggregateFunction, "count"),
        ]
    );
}

// === Comments ===

#[test]
fn nested_comment_is_one_region() {
    let output = lex("/* a /* b */ c */");
    assert!(output.tokens.iter().all(|t| t.kind == Comment));
    assert_eq!(concat(&output), "/* a /* b */ c */");
    assert!(!output.has_errors());
}

#[test]
fn text_after_nested_comment_is_code() {
    assert_eq!(
        significant("/* a /* b */ c */ x"),
        vec![(Column, "x")]
    );
}

#[test]
fn unterminated_comment() {
    let output = lex("x /* a /* b */");
    assert_eq!(
        output.errors,
        vec![LexError::unterminated(Span::new(2, 14), Construct::Comment)]
    );
}

#[test]
fn unmatched_comment_close() {
    assert_eq!(all("a */"), vec![(Column, "a"), (White, " "), (Invalid, "*/")]);
    assert_eq!(error_kinds("a */"), vec![LexErrorKind::UnmatchedCommentClose]);
}

// === Strings ===

#[test]
fn escape_fidelity() {
    let output = lex("\"\\n\\q\"");
    let kinds: Vec<(TokenKind, &str)> = output.tokens.iter().map(|t| (t.kind, t.text)).collect();
    assert_eq!(
        kinds,
        vec![
            (StringQuote, "\""),
            (StringEscape, "\\n"),
            (StringEscapeInvalid, "\\q"),
            (StringQuote, "\""),
        ]
    );
    assert_eq!(output.errors, vec![LexError::invalid_escape(Span::new(3, 5))]);
}

#[test]
fn string_body_and_unicode_escapes() {
    assert_eq!(
        all("\"caf\\u00e9 ok\""),
        vec![
            (StringQuote, "\""),
            (String, "caf"),
            (StringEscape, "\\u00e9"),
            (String, " ok"),
            (StringQuote, "\""),
        ]
    );
}

#[test]
fn unterminated_string_at_line_end() {
    let output = lex("a \"open\nb");
    let kinds: Vec<(TokenKind, &str)> = output.tokens.iter().map(|t| (t.kind, t.text)).collect();
    assert_eq!(
        kinds,
        vec![
            (Column, "a"),
            (White, " "),
            (StringInvalid, "\"open"),
            (White, "\n"),
            (Column, "b"),
        ]
    );
    assert_eq!(
        output.errors,
        vec![LexError::unterminated(Span::new(2, 7), Construct::String)]
    );
}

#[test]
fn backslash_at_line_end_inside_string() {
    let output = lex("\"a\\\nb\"");
    let kinds: Vec<(TokenKind, &str)> = output.tokens.iter().map(|t| (t.kind, t.text)).collect();
    assert_eq!(
        kinds,
        vec![
            (StringQuote, "\""),
            (String, "a"),
            (Invalid, "\\"),
            (String, "\nb"),
            (StringQuote, "\""),
        ]
    );
    assert_eq!(output.errors, vec![LexError::unexpected_char(Span::new(2, 3))]);
}

#[test]
fn char_literals() {
    assert_eq!(
        all("'x''\\n'"),
        vec![
            (String, "'x'"),
            (String, "'"),
            (StringEscape, "\\n"),
            (String, "'"),
        ]
    );
}

#[test]
fn lone_char_quote() {
    assert_eq!(all("'"), vec![(StringInvalid, "'")]);
    assert_eq!(error_kinds("'"), vec![LexErrorKind::Unterminated(Construct::Char)]);
}

// === Single-shot modes ===

#[test]
fn pipe_at_end_of_input() {
    let output = lex("count|");
    let kinds: Vec<TokenKind> = output.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![Column, ScalarPipe]);
    assert_eq!(
        output.errors,
        vec![LexError::unterminated(Span::new(5, 6), Construct::ScalarPipe)]
    );
}

#[test]
fn pipe_without_function_name_mid_input() {
    let output = lex("x|5");
    let tokens: Vec<(TokenKind, &str, Span)> = output
        .tokens
        .iter()
        .map(|t| (t.kind, t.text, t.span))
        .collect();
    assert_eq!(
        tokens,
        vec![
            (Column, "x", Span::new(0, 1)),
            (ScalarPipe, "|", Span::new(1, 2)),
            (Invalid, "", Span::point(2)),
            (Number, "5", Span::new(2, 3)),
        ]
    );
    assert_eq!(
        output.errors,
        vec![LexError::missing_identifier(2, Construct::ScalarPipe)]
    );
}

#[test]
fn function_name_must_follow_pipe_directly() {
    assert_eq!(
        error_kinds("x% count"),
        vec![LexErrorKind::MissingIdentifier(Construct::AggregatePipe)]
    );
}

#[test]
fn alias_allows_whitespace() {
    assert_eq!(
        all("$a -> b"),
        vec![
            (ColumnPrefix, "$"),
            (Column, "a"),
            (White, " "),
            (AliasPrefix, "->"),
            (White, " "),
            (Alias, "b"),
        ]
    );
}

#[test]
fn alias_at_end_of_input() {
    assert_eq!(
        lex("$a ->").errors,
        vec![LexError::unterminated(Span::new(3, 5), Construct::Alias)]
    );
}

// === Recovery ===

#[test]
fn unexpected_characters_are_single_tokens() {
    assert_eq!(
        all("a^é"),
        vec![(Column, "a"), (Invalid, "^"), (Invalid, "é")]
    );
    assert_eq!(
        lex("a^é").errors,
        vec![
            LexError::unexpected_char(Span::new(1, 2)),
            LexError::unexpected_char(Span::new(2, 4)),
        ]
    );
}

#[test]
fn scan_continues_after_errors() {
    assert_eq!(
        significant("^ #issues"),
        vec![(Invalid, "^"), (TableWithMany, "#issues")]
    );
}

// === Output helpers ===

#[test]
fn into_result() {
    assert!(lex("#issues").into_result().is_ok());
    match lex("'").into_result() {
        Ok(tokens) => panic!("expected errors, got {tokens:?}"),
        Err(errors) => assert_eq!(errors.len(), 1),
    }
}

#[test]
fn significant_skips_trivia() {
    let output = lex("a /* b */ c");
    assert_eq!(output.tokens.len(), 7);
    assert_eq!(output.significant().count(), 2);
}

// === Properties ===

mod properties {
    use super::*;
    use proptest::prelude::*;

    /// Strings built from querydown's punctuation, so mode switches happen often.
    fn query_like() -> impl Strategy<Value = std::string::String> {
        prop::string::string_regex(r#"[#@$%|a-z0-9 \n.:!~<>+\-*/'"\\{}()\[\]é]{0,64}"#)
            .unwrap_or_else(|e| panic!("bad regex: {e}"))
    }

    /// Space-separated well-formed fragments: every construct that pushes a
    /// mode is closed again within its fragment.
    fn well_formed_query() -> impl Strategy<Value = std::string::String> {
        let fragments = vec![
            "#issues", "title", "1..5", "3.5", "a.b", "*", r#""a\nb""#, "'c'",
            "/* x /* y */ */", "// note\n", "count|sum", "x%count", "$a -> b",
            "@6M", "@2024-01-01", "@today", ":~", "!>=", "++", "\\asc", "(", "]", "{",
        ];
        prop::collection::vec(prop::sample::select(fragments), 0..12)
            .prop_map(|parts| parts.join(" "))
    }

    proptest! {
        #[test]
        fn lossless_arbitrary(source in any::<std::string::String>()) {
            let output = lex(&source);
            prop_assert_eq!(concat(&output), source);
        }

        #[test]
        fn lossless_query_like(source in query_like()) {
            let output = lex(&source);
            prop_assert_eq!(concat(&output), source);
        }

        #[test]
        fn deterministic(source in query_like()) {
            prop_assert_eq!(lex(&source), lex(&source));
        }

        #[test]
        fn error_tokens_have_errors(source in query_like()) {
            let output = lex(&source);
            let has_error_token = output.tokens.iter().any(|t| t.kind.is_error());
            prop_assert!(!has_error_token || output.has_errors());
        }

        #[test]
        fn well_formed_query_leaves_mode_stack_balanced(source in well_formed_query()) {
            let mut scanner = Scanner::new(&source);
            for _ in scanner.by_ref() {}
            prop_assert!(scanner.mode_stack().is_balanced(), "{:?}", scanner.mode_stack());
            prop_assert_eq!(scanner.finish(), vec![]);
        }

        #[test]
        fn token_count_is_bounded(source in query_like()) {
            // Each token consumes a byte, except zero-width missing-name
            // markers, which each follow a one-byte pipe or two-byte arrow.
            let output = lex(&source);
            prop_assert!(output.tokens.len() <= source.len() * 2);
        }
    }
}
