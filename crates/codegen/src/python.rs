//! Python rendering of the compiled grammar.
//!
//! The generated script hands the grammar to the runtime as a nested
//! `TSpeechObject([TSpeech(HotWord(...), <children>)])` constructor
//! literal -- the recursive structure the wearable's speech runtime
//! accepts directly. The literal denotes exactly the same set of token
//! sequences as the [`GrammarNode`] it was rendered from.

use gesto_interchange::GrammarNode;

/// Render a grammar as the Python constructor literal embedded in
/// generated scripts.
pub fn grammar_literal(node: &GrammarNode) -> String {
    match node {
        GrammarNode::Fan { .. } => render_object(node),
        // A bare leaf or branch at the root is a single-alternative
        // object.
        _ => format!("TSpeechObject([{}])", render_alternative(node)),
    }
}

fn render_object(node: &GrammarNode) -> String {
    match node {
        GrammarNode::Fan { branches } => {
            let alternatives: Vec<String> = branches.iter().map(render_alternative).collect();
            format!("TSpeechObject([{}])", alternatives.join(", "))
        }
        _ => format!("TSpeechObject([{}])", render_alternative(node)),
    }
}

fn render_alternative(node: &GrammarNode) -> String {
    match node {
        GrammarNode::Leaf { token } => {
            format!("TSpeech(HotWord({}), None)", py_str(token))
        }
        GrammarNode::Branch { token, child } => {
            format!(
                "TSpeech(HotWord({}), {})",
                py_str(token),
                render_object(child)
            )
        }
        GrammarNode::Fan { .. } => {
            // A fan nested directly under a fan cannot be produced by
            // the compiler; flatten it defensively into its object form.
            render_object(node)
        }
    }
}

/// A single-quoted Python string literal.
pub fn py_str(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
