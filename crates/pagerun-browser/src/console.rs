//! Rendering of console-call arguments into plain text
//!
//! Console API events carry their arguments as CDP `RemoteObject`s. The
//! runner forwards them the way the page would have printed them: string
//! values verbatim, other JSON values serialized, remote-only objects by
//! their description.

use headless_chrome::protocol::cdp::Runtime::RemoteObject;

/// Render one console call's arguments as a single output line
pub fn format_console_args(args: &[RemoteObject]) -> String {
    args.iter()
        .map(format_remote_object)
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_remote_object(obj: &RemoteObject) -> String {
    if let Some(value) = &obj.value {
        render_value(value)
    } else if let Some(description) = &obj.description {
        description.clone()
    } else if let Some(unserializable) = &obj.unserializable_value {
        unserializable.clone()
    } else {
        "undefined".to_string()
    }
}

fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn remote(value: serde_json::Value) -> RemoteObject {
        serde_json::from_value(value).expect("valid RemoteObject")
    }

    #[test]
    fn test_string_value_verbatim() {
        let obj = remote(json!({"type": "string", "value": "hello"}));
        assert_eq!(format_console_args(&[obj]), "hello");
    }

    #[test]
    fn test_number_and_bool_values() {
        let n = remote(json!({"type": "number", "value": 42}));
        let b = remote(json!({"type": "boolean", "value": true}));
        assert_eq!(format_console_args(&[n, b]), "42 true");
    }

    #[test]
    fn test_object_falls_back_to_description() {
        let obj = remote(json!({"type": "object", "description": "Object"}));
        assert_eq!(format_console_args(&[obj]), "Object");
    }

    #[test]
    fn test_undefined_argument() {
        let obj = remote(json!({"type": "undefined"}));
        assert_eq!(format_console_args(&[obj]), "undefined");
    }

    #[test]
    fn test_render_value_serializes_structures() {
        assert_eq!(render_value(&json!({"a": 1})), r#"{"a":1}"#);
        assert_eq!(render_value(&json!(null)), "null");
        assert_eq!(render_value(&json!("plain")), "plain");
    }

    #[test]
    fn test_empty_args() {
        assert_eq!(format_console_args(&[]), "");
    }
}
