use crate::ast;
use crate::reader::Node;
use crate::types::Value;
use itertools::Itertools;

pub fn pr_str(value: &Value) -> String {
    match value {
        Value::Integer(x) => x.to_string(),
        Value::Bool(true) => String::from(ast::TRUE),
        Value::Bool(false) => String::from(ast::FALSE),
        Value::Symbol(name) => name.to_string(),
        Value::Empty => String::from(ast::EMPTY_LIST),
        Value::Pair(_) => pr_pairs(value),
        Value::Primitive(f) => format!("#<primitive {}>", f.name),
        Value::Closure(c) => c.to_string(),
    }
}

// A chain ending in the empty list prints as a list, anything else gets a dot
// before its last element.
fn pr_pairs(value: &Value) -> String {
    let mut elements = Vec::new();
    let mut rest = value;
    while let Value::Pair(pair) = rest {
        elements.push(pr_str(&pair.0));
        rest = &pair.1;
    }
    match rest {
        Value::Empty => format!("({})", elements.join(" ")),
        tail => format!("({} . {})", elements.join(" "), pr_str(tail)),
    }
}

/// Bracket structure back to text, atoms separated by single spaces.
pub fn pr_node(node: &Node) -> String {
    match node {
        Node::Atom(text) => text.clone(),
        Node::List(elements) => format!("({})", elements.iter().map(pr_node).join(" ")),
    }
}
