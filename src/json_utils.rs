use serde_json::Value;

/// String field, `None` if missing, null or not a string.
pub fn str_field(v: &Value, key: &str) -> Option<String> {
    v.get(key).and_then(|x| x.as_str()).map(|s| s.to_string())
}

/// Integer field. Floats are truncated toward zero; non-finite or
/// non-numeric values yield `None`.
pub fn i64_field(v: &Value, key: &str) -> Option<i64> {
    let x = v.get(key)?;
    if let Some(i) = x.as_i64() {
        return Some(i);
    }
    x.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)
}

pub fn f64_field(v: &Value, key: &str) -> Option<f64> {
    v.get(key).and_then(|x| x.as_f64()).filter(|f| f.is_finite())
}

/// Truthiness coercion: JSON booleans, numbers (non-zero is true) and the
/// strings "true"/"false" (any case). Anything else is `None`.
pub fn bool_field(v: &Value, key: &str) -> Option<bool> {
    match v.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Heuristic: a listing child is a comment if its kind is `t1`.
pub fn is_comment_child(child: &Value) -> bool {
    child.get("kind").and_then(|k| k.as_str()) == Some("t1")
}

/// A listing child is a "load more" stub if its kind is `more`.
pub fn is_more_stub(child: &Value) -> bool {
    child.get("kind").and_then(|k| k.as_str()) == Some("more")
}
