//! Best-effort recovery of JSON from model completions.
//!
//! Models wrap JSON in markdown fences, leave trailing commas, and get cut
//! off mid-structure when they hit the token limit. [`parse_model_output`]
//! tries a strict parse first and only then repairs syntax. It never adds
//! keys or values, so a recovered document is always a prefix-faithful
//! reading of what the model wrote.

use crate::domain::{AiWorkoutPlan, FormTips};
use serde_json::Value;

#[derive(Debug, Clone, thiserror::Error)]
#[error("model output is not valid JSON: {reason}")]
pub struct ParseFailure {
    pub raw: String,
    pub cleaned: String,
    pub reason: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PlanError {
    #[error(transparent)]
    Parse(#[from] ParseFailure),

    #[error("model output has the wrong shape: {0}")]
    Shape(String),
}

pub fn parse_model_output(raw: &str) -> Result<Value, ParseFailure> {
    if let Ok(value) = serde_json::from_str(raw.trim()) {
        return Ok(value);
    }

    let stripped = strip_code_fences(raw);
    if let Ok(value) = serde_json::from_str(stripped) {
        return Ok(value);
    }

    let Some(cleaned) = recover(stripped) else {
        return Err(ParseFailure {
            raw: raw.to_string(),
            cleaned: stripped.to_string(),
            reason: "no JSON object or array found".to_string(),
        });
    };

    serde_json::from_str(&cleaned).map_err(|e| {
        tracing::warn!(
            error = %e,
            cleaned_preview = %cleaned.chars().take(200).collect::<String>(),
            "Recovered model output still failed to parse"
        );
        ParseFailure {
            raw: raw.to_string(),
            cleaned,
            reason: e.to_string(),
        }
    })
}

pub fn parse_workout_plan(raw: &str) -> Result<AiWorkoutPlan, PlanError> {
    let value = parse_model_output(raw)?;
    AiWorkoutPlan::from_value(value).map_err(PlanError::Shape)
}

pub fn parse_form_tips(raw: &str) -> Result<FormTips, PlanError> {
    let value = parse_model_output(raw)?;
    serde_json::from_value(value).map_err(|e| PlanError::Shape(e.to_string()))
}

/// Returns the body of the first fenced block, or the trimmed input when
/// there is none. An opening fence must start a line; backticks inside a
/// JSON string never count. An unterminated fence keeps everything after it.
pub fn strip_code_fences(raw: &str) -> &str {
    let text = raw.trim();
    let Some(open) = find_fence(text, true) else {
        return text;
    };

    let mut body = &text[open + 3..];
    if let Some((label, rest)) = body.split_once('\n') {
        if label.trim().chars().all(is_label_char) {
            body = rest;
        }
    }

    match find_fence(body, false) {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    }
}

/// Byte offset of the first ``` outside a JSON string.
fn find_fence(text: &str, at_line_start: bool) -> Option<usize> {
    let mut scan = JsonScan::default();
    let mut line_start = true;

    for (i, c) in text.char_indices() {
        if !scan.in_string && (line_start || !at_line_start) && text[i..].starts_with("```") {
            return Some(i);
        }
        scan.feed(c);
        line_start = c == '\n' || (line_start && c == ' ');
    }
    None
}

fn is_label_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '+'
}

/// Syntax repair: trailing commas, control characters, missing closers,
/// then the first complete top-level value.
pub fn recover(text: &str) -> Option<String> {
    let text = remove_trailing_commas(text);
    let text = strip_control_chars(&text);
    let start = text.find(is_opener)?;
    let text = close_unbalanced(&text[start..]);
    // Closing a truncated list can expose a new trailing comma.
    let text = remove_trailing_commas(&text);
    Some(extract_first_value(&text).to_string())
}

fn remove_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut scan = JsonScan::default();

    for (i, c) in text.char_indices() {
        if c == ',' && !scan.in_string {
            let rest = text[i + 1..].trim_start();
            if rest.starts_with(|n: char| n == '}' || n == ']') {
                continue;
            }
        }
        scan.feed(c);
        out.push(c);
    }
    out
}

// Replaced by a space so neighbouring tokens stay apart.
fn strip_control_chars(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Appends whatever is needed to close an open string and every open
/// bracket, innermost first.
fn close_unbalanced(text: &str) -> String {
    let mut scan = JsonScan::default();
    for c in text.chars() {
        scan.feed(c);
    }

    let mut out = text.to_string();
    if scan.in_string {
        if scan.escaped {
            out.pop();
        }
        out.push('"');
    }
    while let Some(open) = scan.stack.pop() {
        out.push(if open == '{' { '}' } else { ']' });
    }
    out
}

/// First balanced `{...}` or `[...]` starting at the first opener. Later
/// fragments are ignored.
fn extract_first_value(text: &str) -> &str {
    let Some(start) = text.find(is_opener) else {
        return text;
    };

    let mut scan = JsonScan::default();
    for (i, c) in text[start..].char_indices() {
        scan.feed(c);
        if scan.stack.is_empty() && !scan.in_string {
            return &text[start..start + i + c.len_utf8()];
        }
    }
    &text[start..]
}

fn is_opener(c: char) -> bool {
    c == '{' || c == '['
}

#[derive(Default)]
struct JsonScan {
    in_string: bool,
    escaped: bool,
    stack: Vec<char>,
}

impl JsonScan {
    fn feed(&mut self, c: char) {
        if self.in_string {
            if self.escaped {
                self.escaped = false;
            } else if c == '\\' {
                self.escaped = true;
            } else if c == '"' {
                self.in_string = false;
            }
            return;
        }

        match c {
            '"' => self.in_string = true,
            '{' | '[' => self.stack.push(c),
            '}' | ']' => {
                let open = if c == '}' { '{' } else { '[' };
                // Stray closers are left for the strict parser to reject.
                if self.stack.last() == Some(&open) {
                    self.stack.pop();
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fenced_trailing_comma() {
        let raw = "```json\n[{\"exercise\":\"Push-ups\",\"sets\":3,\"reps\":12,\"rest\":60},]\n```";
        let value = parse_model_output(raw).unwrap();
        assert_eq!(
            value,
            json!([{"exercise": "Push-ups", "sets": 3, "reps": 12, "rest": 60}])
        );
    }

    #[test]
    fn test_truncated_tips_are_closed() {
        let raw = r#"{"tips": ["Keep your back straight""#;
        assert_eq!(recover(raw).unwrap(), r#"{"tips": ["Keep your back straight"]}"#);
        assert_eq!(
            parse_model_output(raw).unwrap(),
            json!({"tips": ["Keep your back straight"]})
        );
    }

    #[test]
    fn test_no_json_is_parse_failure() {
        let raw = "I'm sorry, I can't help with that.";
        let err = parse_model_output(raw).unwrap_err();
        assert_eq!(err.raw, raw);
        assert_eq!(err.cleaned, raw);
    }

    #[test]
    fn test_unrecoverable_keeps_cleaned_text() {
        let raw = r#"{"tips": "#;
        let err = parse_model_output(raw).unwrap_err();
        assert_eq!(err.raw, raw);
        assert_eq!(err.cleaned, r#"{"tips":}"#);
    }

    #[test]
    fn test_well_formed_input_matches_direct_parse() {
        let samples = [
            r#"{"a": 1, "b": [true, null, "x"]}"#,
            r#"[{"name": "Squat", "sets": 5}, {"name": "Row"}]"#,
            r#"{"nested": {"deep": [[1, 2], {"k": "v,]"}]}}"#,
            "[]",
        ];
        for sample in samples {
            let direct: Value = serde_json::from_str(sample).unwrap();
            assert_eq!(parse_model_output(sample).unwrap(), direct, "{}", sample);
        }
    }

    #[test]
    fn test_recovery_is_idempotent_on_clean_text() {
        let samples = [
            "{\n  \"tips\": [\"Brace\", \"Breathe\"]\n}",
            r#"[{"name": "Lunge", "note": "a, ] b"}]"#,
        ];
        for sample in samples {
            let once = recover(sample).unwrap();
            let twice = recover(&once).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_first_fragment_wins() {
        let raw = r#"Plan A: {"tips": ["one"]} Plan B: {"tips": ["two"]}"#;
        assert_eq!(parse_model_output(raw).unwrap(), json!({"tips": ["one"]}));
    }

    #[test]
    fn test_prose_around_fence() {
        let raw = "Here is your plan:\n```\n{\"tips\": [\"Slow eccentric\"]}\n```\nGood luck!";
        assert_eq!(
            parse_model_output(raw).unwrap(),
            json!({"tips": ["Slow eccentric"]})
        );
    }

    #[test]
    fn test_unterminated_fence_and_string() {
        let raw = "```json\n{\"tips\": [\"Drive through the he";
        assert_eq!(
            parse_model_output(raw).unwrap(),
            json!({"tips": ["Drive through the he"]})
        );
    }

    #[test]
    fn test_truncated_after_comma() {
        let raw = r#"[{"name": "Dip", "sets": 3, "reps": 8, "rest": 90},"#;
        assert_eq!(
            parse_model_output(raw).unwrap(),
            json!([{"name": "Dip", "sets": 3, "reps": 8, "rest": 90}])
        );
    }

    #[test]
    fn test_commas_inside_strings_are_kept() {
        let raw = r#"{"tips": ["hips, ]then knees",],}"#;
        assert_eq!(
            parse_model_output(raw).unwrap(),
            json!({"tips": ["hips, ]then knees"]})
        );
    }

    #[test]
    fn test_backticks_inside_strings_are_not_fences() {
        let raw = r#"{"tips": ["Wrap notes like ```this``` in your log"]}"#;
        let direct: Value = serde_json::from_str(raw).unwrap();
        assert_eq!(parse_model_output(raw).unwrap(), direct);

        let trailing = r#"{"tips": ["Wrap notes like ```this``` in your log",]}"#;
        assert_eq!(parse_model_output(trailing).unwrap(), direct);
    }

    #[test]
    fn test_unlabelled_inline_fence_keeps_literal() {
        assert_eq!(parse_model_output("```true```").unwrap(), json!(true));
        assert_eq!(strip_code_fences("```[1, 2]```"), "[1, 2]");
        assert_eq!(strip_code_fences("```json\n[1]\n```"), "[1]");
    }

    #[test]
    fn test_fence_must_start_a_line() {
        let raw = "Use ```json blocks``` like this:\n```\n{\"tips\": [\"Brace\"]}\n```";
        assert_eq!(strip_code_fences(raw), r#"{"tips": ["Brace"]}"#);
    }

    #[test]
    fn test_parse_workout_plan_from_fenced_output() {
        let raw = "```json\n[{\"exercise\":\"Push-ups\",\"sets\":3,\"reps\":12,\"rest\":60},]\n```";
        let plan = parse_workout_plan(raw).unwrap();
        assert_eq!(plan.exercises.len(), 1);
        assert_eq!(plan.exercises[0].name, "Push-ups");
        assert_eq!(plan.exercises[0].rest_seconds, 60);
    }

    #[test]
    fn test_parse_form_tips_requires_tips_key() {
        assert!(matches!(
            parse_form_tips(r#"{"advice": []}"#),
            Err(PlanError::Shape(_))
        ));
        assert!(matches!(
            parse_form_tips("no json here"),
            Err(PlanError::Parse(_))
        ));
    }
}
