//! One-line change summaries for audit entries

use serde_json::Value;

/// Fields that change on every write and say nothing about the edit
const IGNORED_FIELDS: &[&str] = &["updated_at"];

const MAX_STRING_CHARS: usize = 50;

/// Summarize the top-level fields that differ between two entity states
///
/// Returns `None` when nothing relevant changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                if IGNORED_FIELDS.contains(&key.as_str()) {
                    continue;
                }
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!("{}: {} -> (removed)", key, format_value(before_val))),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) && !IGNORED_FIELDS.contains(&key.as_str()) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }

            changes
        }
        _ if before != after => vec![format!("{} -> {}", format_value(before), format_value(after))],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > MAX_STRING_CHARS => {
            let truncated: String = s.chars().take(MAX_STRING_CHARS - 3).collect();
            format!("\"{}...\"", truncated)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_fields_only() {
        let before = json!({"name": "Wallet", "initial_balance": 1000});
        let after = json!({"name": "Cash", "initial_balance": 1000});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "name: \"Wallet\" -> \"Cash\"");
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"name": "T", "space_id": "x"});
        let after = json!({"name": "T", "deadline": "2025-12-31"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("space_id: \"x\" -> (removed)"));
        assert!(diff.contains("deadline: (added) -> \"2025-12-31\""));
    }

    #[test]
    fn test_timestamp_only_change_is_no_change() {
        let before = json!({"name": "T", "updated_at": "2025-01-01T00:00:00Z"});
        let after = json!({"name": "T", "updated_at": "2025-01-02T00:00:00Z"});
        assert!(generate_diff(&before, &after).is_none());
    }

    #[test]
    fn test_array_change_summary() {
        let before = json!({"contributions": [1]});
        let after = json!({"contributions": [1, 2]});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "contributions: [1 items] -> [2 items]");
    }

    #[test]
    fn test_long_string_truncation_is_char_safe() {
        let before = json!({"description": "é".repeat(80)});
        let after = json!({"description": "short"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("...\""));
    }
}
