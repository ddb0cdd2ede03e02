//! Parsing of declarative step scripts.
//!
//! A script is a JSON document with a `steps` array. Each record is matched
//! by key presence, in a fixed precedence order:
//!
//! 1. `timeout` — wait, value is milliseconds
//! 2. `ref` — capture, value is the reference label/path
//! 3. `mouse.click` — click, value is a two-element coordinate pair
//!
//! A record matching none of these (including a recognized key with a
//! malformed value) parses to [`Step::Unknown`] and is reported as a warning
//! at run time rather than rejecting the script.

use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::script::types::{ScriptError, ScriptResult, Step};

/// Load and parse a script file
pub fn load_script(path: &Path) -> ScriptResult<Vec<Step>> {
    let text = fs::read_to_string(path)?;
    parse_script(&text)
}

/// Parse a script document into an ordered step sequence
pub fn parse_script(text: &str) -> ScriptResult<Vec<Step>> {
    let doc: Value = serde_json::from_str(text)?;
    let records = doc
        .get("steps")
        .and_then(Value::as_array)
        .ok_or_else(|| ScriptError::Shape("document has no `steps` array".to_string()))?;

    Ok(records
        .iter()
        .enumerate()
        .map(|(index, record)| parse_step(index, record))
        .collect())
}

/// Match one step record against the recognized shapes.
///
/// Key *presence* decides the match: a record carrying several recognized
/// keys resolves to the first present key in the precedence order above,
/// and a present key with a malformed value is `Unknown` — it never falls
/// through to a later key.
fn parse_step(index: usize, record: &Value) -> Step {
    if let Some(value) = record.get("timeout") {
        return match value.as_u64() {
            Some(ms) => Step::Wait { ms },
            None => Step::Unknown { index },
        };
    }

    if let Some(value) = record.get("ref") {
        return match value.as_str() {
            Some(reference) => Step::Capture {
                reference: reference.to_string(),
            },
            None => Step::Unknown { index },
        };
    }

    if let Some(value) = record.get("mouse.click") {
        if let Some(coords) = value.as_array() {
            if let [x, y] = coords.as_slice() {
                if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                    return Step::Click { x, y };
                }
            }
        }
        return Step::Unknown { index };
    }

    Step::Unknown { index }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_script() {
        let text = r#"{
            "steps": [
                { "timeout": 5000 },
                { "ref": "home.png" },
                { "mouse.click": [120, 300] },
                { "ref": "after_click.png" }
            ]
        }"#;

        let steps = parse_script(text).unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Wait { ms: 5000 },
                Step::Capture {
                    reference: "home.png".to_string()
                },
                Step::Click { x: 120, y: 300 },
                Step::Capture {
                    reference: "after_click.png".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_key_precedence() {
        // timeout wins over ref, ref wins over mouse.click
        let text = r#"{
            "steps": [
                { "timeout": 100, "ref": "a.png" },
                { "ref": "b.png", "mouse.click": [1, 2] }
            ]
        }"#;

        let steps = parse_script(text).unwrap();
        assert_eq!(steps[0], Step::Wait { ms: 100 });
        assert_eq!(
            steps[1],
            Step::Capture {
                reference: "b.png".to_string()
            }
        );
    }

    #[test]
    fn test_unrecognized_record_is_unknown() {
        let text = r#"{ "steps": [ { "foo": 1 }, { "timeout": 10 } ] }"#;
        let steps = parse_script(text).unwrap();
        assert_eq!(steps[0], Step::Unknown { index: 0 });
        assert_eq!(steps[1], Step::Wait { ms: 10 });
    }

    #[test]
    fn test_malformed_values_are_unknown() {
        let text = r#"{
            "steps": [
                { "timeout": "soon" },
                { "ref": 42 },
                { "mouse.click": [1] },
                { "mouse.click": [1, "two"] }
            ]
        }"#;

        let steps = parse_script(text).unwrap();
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(*step, Step::Unknown { index: i });
        }
    }

    #[test]
    fn test_malformed_value_does_not_fall_through_to_later_keys() {
        // `timeout` is present, so the record is matched as a wait even
        // though its value is unusable; the valid `ref` must not win.
        let text = r#"{ "steps": [ { "timeout": "soon", "ref": "a.png" } ] }"#;
        let steps = parse_script(text).unwrap();
        assert_eq!(steps[0], Step::Unknown { index: 0 });
    }

    #[test]
    fn test_negative_timeout_is_unknown() {
        let text = r#"{ "steps": [ { "timeout": -5 } ] }"#;
        let steps = parse_script(text).unwrap();
        assert_eq!(steps[0], Step::Unknown { index: 0 });
    }

    #[test]
    fn test_missing_steps_field() {
        let err = parse_script(r#"{ "actions": [] }"#).unwrap_err();
        assert!(matches!(err, ScriptError::Shape(_)));
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_script("not json").unwrap_err();
        assert!(matches!(err, ScriptError::Json(_)));
    }

    #[test]
    fn test_empty_steps() {
        let steps = parse_script(r#"{ "steps": [] }"#).unwrap();
        assert!(steps.is_empty());
    }
}
