//! LaTeX escaping, exposed to templates as the `latex` filter.
//!
//! ```text
//! {{ recipient.name | latex }}
//! ```

use std::collections::HashMap;

use tera::Value;

/// Escape the ten characters LaTeX treats specially in text mode.
pub fn latex_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '{' | '}' | '$' | '&' | '#' | '%' | '_' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Tera filter wrapper around [`latex_escape`]. `null` renders as empty.
pub fn latex_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let escaped = match value {
        Value::Null => String::new(),
        Value::String(s) => latex_escape(s),
        other => latex_escape(&other.to_string()),
    };
    Ok(Value::String(escaped))
}
