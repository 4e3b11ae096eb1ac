//! Structural inference of interface bodies from message trees

use super::tree::MessageTree;

const INDENT: &str = "  ";

/// Renders the properties of `tree` as interface body text at `depth`
///
/// Every own key of every reachable object produces exactly one property line,
/// in source order. Arrays become `unknown[]`, message functions become
/// `() => string`, other leaves use their primitive type tag. Trailing
/// whitespace is stripped from the result.
pub fn infer(tree: &MessageTree, depth: usize) -> String {
    let mut out = String::new();
    write_properties(tree, depth, &mut out);
    out.truncate(out.trim_end().len());
    out
}

/// Body text for direct placement inside an `interface { ... }` block
pub fn interface_body(tree: &MessageTree) -> String {
    infer(tree, 1).trim().to_string()
}

fn write_properties(tree: &MessageTree, depth: usize, out: &mut String) {
    let Some(entries) = tree.entries() else {
        return;
    };

    let indent = INDENT.repeat(depth);
    for (key, value) in entries {
        let key = quote_key(key);
        match value {
            MessageTree::Object(_) => {
                out.push_str(&format!("{indent}{key}: {{\n"));
                write_properties(value, depth + 1, out);
                out.push_str(&format!("{indent}}};\n"));
            }
            leaf => {
                out.push_str(&format!("{indent}{key}: {};\n", leaf.runtime_type_name()));
            }
        }
    }
}

fn quote_key(key: &str) -> String {
    let mut quoted = String::with_capacity(key.len() + 2);
    quoted.push('"');
    for c in key.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => quoted.push_str(&format!("\\u{:04x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
