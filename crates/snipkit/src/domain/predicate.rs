//! Type and category predicates
//!
//! Runtime checks over [`Value`]. Constructor identity from dynamically typed
//! hosts is narrowed to the [`Kind`] tag.

use crate::domain::value::{Kind, Value};
use crate::infra::dom::DomHost;

/// Check whether `value` has the given kind
///
/// Always false for null and undefined, whatever `kind` is asked for.
pub fn is(kind: Kind, value: &Value) -> bool {
    !value.is_nil() && value.kind() == kind
}

pub fn is_boolean(value: &Value) -> bool {
    matches!(value, Value::Bool(_))
}

pub fn is_string(value: &Value) -> bool {
    matches!(value, Value::String(_))
}

/// Check whether `value` is a finite number or a string holding one
///
/// Strings must parse as a whole (surrounding whitespace allowed).
///
/// ```
/// use snipkit::Value;
/// use snipkit::domain::predicate::is_number;
///
/// assert!(is_number(&Value::Number(1.0)));
/// assert!(is_number(&Value::from(" 1.5 ")));
/// assert!(!is_number(&Value::from("1px")));
/// ```
pub fn is_number(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_finite(),
        Value::String(s) => {
            let s = s.trim();
            // Rust accepts "inf"/"nan" spellings; is_finite rejects them
            !s.is_empty() && s.parse::<f64>().is_ok_and(f64::is_finite)
        }
        _ => false,
    }
}

/// Check whether `value` is null or undefined
#[inline]
pub fn is_nil(value: &Value) -> bool {
    value.is_nil()
}

#[inline]
pub fn is_null(value: &Value) -> bool {
    matches!(value, Value::Null)
}

#[inline]
pub fn is_undefined(value: &Value) -> bool {
    matches!(value, Value::Undefined)
}

/// Check whether `value` is a container (array or object)
pub fn is_object(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

/// Check whether `s` is valid JSON
///
/// The parse error is discarded; only validity is reported.
pub fn is_valid_json(s: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(s).is_ok()
}

/// Check whether the host exposes both a window and a document
pub fn is_browser<H: DomHost + ?Sized>(host: &H) -> bool {
    host.has_window() && host.has_document()
}

/// Check whether the host's document is visible
pub fn is_browser_tab_focused<H: DomHost + ?Sized>(host: &H) -> bool {
    !host.is_hidden()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory_dom::MemoryDom;
    use std::collections::BTreeMap;

    #[test]
    fn test_is_kind() {
        assert!(is(Kind::Array, &Value::from(vec![1])));
        assert!(is(Kind::String, &Value::from("")));
        assert!(is(Kind::Number, &Value::Number(1.0)));
        assert!(is(Kind::Boolean, &Value::Bool(true)));
        assert!(!is(Kind::Object, &Value::from(vec![1])));
    }

    #[test]
    fn test_is_kind_rejects_nil() {
        assert!(!is(Kind::Null, &Value::Null));
        assert!(!is(Kind::Undefined, &Value::Undefined));
    }

    #[test]
    fn test_is_boolean_and_string() {
        assert!(!is_boolean(&Value::Null));
        assert!(is_boolean(&Value::Bool(false)));
        assert!(is_string(&Value::from("10")));
        assert!(!is_string(&Value::Number(10.0)));
    }

    #[test]
    fn test_is_number() {
        assert!(is_number(&Value::Number(1.0)));
        assert!(is_number(&Value::from("1")));
        assert!(!is_number(&Value::Number(f64::NAN)));
        assert!(!is_number(&Value::Number(f64::INFINITY)));
        assert!(!is_number(&Value::from("")));
        assert!(!is_number(&Value::from("inf")));
        assert!(!is_number(&Value::Bool(true)));
        assert!(!is_number(&Value::Null));
    }

    #[test]
    fn test_nil_predicates() {
        assert!(is_nil(&Value::Null));
        assert!(is_nil(&Value::Undefined));
        assert!(!is_nil(&Value::Number(0.0)));
        assert!(is_null(&Value::Null));
        assert!(!is_null(&Value::Undefined));
        assert!(is_undefined(&Value::Undefined));
    }

    #[test]
    fn test_is_object() {
        assert!(is_object(&Value::from(vec![1, 2, 3, 4])));
        assert!(is_object(&Value::Object(BTreeMap::new())));
        assert!(!is_object(&Value::from("a")));
        assert!(!is_object(&Value::Null));
    }

    #[test]
    fn test_is_valid_json() {
        assert!(is_valid_json(r#"{"name":"Adam","age":20}"#));
        assert!(is_valid_json("null"));
        assert!(!is_valid_json(r#"{"name":"Adam",age:"20"}"#));
        assert!(!is_valid_json(""));
    }

    #[test]
    fn test_browser_environment() {
        let mut dom = MemoryDom::new();
        assert!(is_browser(&dom));
        assert!(is_browser_tab_focused(&dom));

        dom.set_hidden(true);
        assert!(!is_browser_tab_focused(&dom));

        let headless = MemoryDom::headless();
        assert!(!is_browser(&headless));
    }
}
