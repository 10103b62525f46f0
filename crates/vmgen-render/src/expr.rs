//! Single-line rendering of expressions, statements and parameter lists.

use vmgen_core::{Argument, Expr, Literal, Parameter, Stmt};

pub fn render_expr(expr: &Expr) -> String {
    match expr {
        Expr::Literal(literal) => render_literal(literal),
        Expr::Reference(name) => name.clone(),
        Expr::MemberAccess { base: Some(base), member } => {
            format!("{}.{}", render_expr(base), member)
        }
        Expr::MemberAccess { base: None, member } => format!(".{}", member),
        Expr::Call { callee, arguments } => {
            format!("{}({})", render_expr(callee), render_arguments(arguments))
        }
        Expr::Tuple(elements) => format!("({})", render_arguments(elements)),
        Expr::Path(path) => {
            let mut out = String::from("\\");
            if let Some(root) = &path.root {
                out.push_str(root);
            }
            for component in &path.components {
                out.push('.');
                out.push_str(component);
            }
            out
        }
        Expr::InOut(inner) => format!("&{}", render_expr(inner)),
        Expr::Try(inner) => format!("try {}", render_expr(inner)),
        Expr::Await(inner) => format!("await {}", render_expr(inner)),
        Expr::Subscript { base, arguments } => {
            format!("{}[{}]", render_expr(base), render_arguments(arguments))
        }
    }
}

fn render_literal(literal: &Literal) -> String {
    match literal {
        Literal::Bool(value) => value.to_string(),
        Literal::Integer(text) | Literal::Float(text) => text.clone(),
        Literal::String(text) => {
            let mut out = String::with_capacity(text.len() + 2);
            out.push('"');
            for c in text.chars() {
                match c {
                    '"' => out.push_str("\\\""),
                    '\\' => out.push_str("\\\\"),
                    '\n' => out.push_str("\\n"),
                    '\t' => out.push_str("\\t"),
                    _ => out.push(c),
                }
            }
            out.push('"');
            out
        }
        Literal::Nil => "nil".to_string(),
    }
}

fn render_arguments(arguments: &[Argument]) -> String {
    arguments
        .iter()
        .map(|arg| match &arg.label {
            Some(label) => format!("{}: {}", label, render_expr(&arg.value)),
            None => render_expr(&arg.value),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// `label name: Type` entries, comma separated.
pub fn render_params(params: &[Parameter]) -> String {
    params
        .iter()
        .map(|param| match &param.label {
            Some(label) if *label == param.name => format!("{}: {}", param.name, param.ty),
            Some(label) => format!("{} {}: {}", label, param.name, param.ty),
            None => format!("_ {}: {}", param.name, param.ty),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a statement that fits on one line.
///
/// Returns `None` for `switch`, which needs a block.
pub fn render_stmt(stmt: &Stmt) -> Option<String> {
    match stmt {
        Stmt::Assign { target, value } => {
            Some(format!("{} = {}", render_expr(target), render_expr(value)))
        }
        Stmt::Expr(expr) => Some(render_expr(expr)),
        Stmt::Return(expr) => Some(format!("return {}", render_expr(expr))),
        Stmt::Switch { .. } => None,
    }
}
