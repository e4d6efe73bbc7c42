use super::*;
use crate::ErrorCode;
use pretty_assertions::assert_eq;
use qd_lexer::Span;
use serde_json::{json, Value};

fn sample_diagnostic() -> Diagnostic {
    Diagnostic::error(ErrorCode::E0001)
        .with_message("unterminated string literal")
        .with_label(Span::new(8, 13), "string starts here")
        .with_note("strings end at the line break")
        .with_suggestion("add a closing `\"`")
}

fn render(source: Option<&str>, diagnostics: &[Diagnostic]) -> String {
    let mut output = Vec::new();
    let mut emitter = JsonEmitter::new(&mut output);
    if let Some(source) = source {
        emitter = emitter.with_source(source);
    }
    emitter.emit_all(diagnostics);
    emitter.finish().unwrap();
    drop(emitter);
    String::from_utf8(output).unwrap()
}

#[test]
fn test_json_emitter() {
    let text = render(None, &[sample_diagnostic()]);
    assert!(text.starts_with("[\n  {"));
    assert!(text.ends_with("  }\n]\n"));

    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        value,
        json!([{
            "code": "E0001",
            "message": "unterminated string literal",
            "labels": [{
                "start": 8,
                "end": 13,
                "message": "string starts here",
                "primary": true
            }],
            "notes": ["strings end at the line break"],
            "suggestions": ["add a closing `\"`"]
        }])
    );
}

#[test]
fn test_json_emitter_with_source_adds_positions() {
    let diag = Diagnostic::error(ErrorCode::E0001).with_label(Span::new(10, 15), "here");
    let text = render(Some("#issues\nx \"open"), &[diag]);

    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value[0]["labels"][0]["line"], 2);
    assert_eq!(value[0]["labels"][0]["column"], 3);
}

#[test]
fn test_json_emitter_multiple() {
    let text = render(
        None,
        &[
            Diagnostic::error(ErrorCode::E0002).with_message("first"),
            Diagnostic::error(ErrorCode::E0004).with_message("second"),
        ],
    );

    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value[0]["message"], "first");
    assert_eq!(value[1]["code"], "E0004");
    assert_eq!(value.as_array().map(Vec::len), Some(2));
}

#[test]
fn test_json_emitter_escapes_control_characters() {
    let diag = Diagnostic::error(ErrorCode::E0002).with_message("unexpected character `\u{1}`\n");
    let text = render(None, &[diag]);
    assert!(text.contains(r#""unexpected character `\u0001`\n""#), "got:\n{text}");
}

#[test]
fn test_json_emitter_counts_and_empty_array() {
    let mut output = Vec::new();
    let mut emitter = JsonEmitter::new(&mut output);
    assert_eq!(emitter.error_count(), 0);
    emitter.finish().unwrap();
    drop(emitter);

    assert_eq!(String::from_utf8(output).unwrap(), "[]\n");
}
