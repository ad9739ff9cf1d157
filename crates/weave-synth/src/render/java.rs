//! Java surface syntax for bodies and method declarations.

use weave_common::TypeRef;

use crate::body::{Body, Expr, Stmt};
use crate::imports::ImportResolver;
use crate::method::MethodSpec;

use super::doc::{concat, group, hardline, indent, softline, text, Doc};

/// Single-line text for `expr`.
pub fn expr_text(expr: &Expr, imports: &mut ImportResolver) -> String {
    match expr {
        Expr::New(ty) => format!("new {}()", imports.name_of(ty)),
        Expr::Call {
            receiver,
            method,
            args,
        } => format!(
            "{}.{}",
            expr_text(receiver, imports),
            call_text(method, args, imports)
        ),
        Expr::Str(s) => quote(s),
        Expr::Null => "null".to_string(),
        Expr::ClassLit(ty) => format!("{}.class", imports.name_of(&ty.erasure())),
        Expr::Var(name) => name.clone(),
        Expr::This => "this".to_string(),
    }
}

fn call_text(method: &str, args: &[Expr], imports: &mut ImportResolver) -> String {
    let args: Vec<String> = args.iter().map(|arg| expr_text(arg, imports)).collect();
    format!("{}({})", method, args.join(", "))
}

/// Layout for `expr`: call chains break before each `.link(..)`.
pub fn expr_doc(expr: &Expr, imports: &mut ImportResolver) -> Doc {
    let mut links = Vec::new();
    let mut base = expr;
    while let Expr::Call {
        receiver,
        method,
        args,
    } = base
    {
        links.push((method, args));
        base = &**receiver;
    }
    if links.is_empty() {
        return text(expr_text(expr, imports));
    }

    let base_text = expr_text(base, imports);
    let mut chain = Vec::with_capacity(links.len() * 2);
    for (method, args) in links.into_iter().rev() {
        chain.push(softline());
        chain.push(text(format!(".{}", call_text(method, args, imports))));
    }
    group(concat(vec![text(base_text), indent(concat(chain))]))
}

/// Single-line text for a body, one statement per line.
pub fn body_text(body: &Body, imports: &mut ImportResolver) -> String {
    body.stmts
        .iter()
        .map(|stmt| match stmt {
            Stmt::Return(expr) => format!("return {};", expr_text(expr, imports)),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn body_doc(body: &Body, imports: &mut ImportResolver) -> Doc {
    let mut parts = Vec::new();
    for (i, stmt) in body.stmts.iter().enumerate() {
        if i > 0 {
            parts.push(hardline());
        }
        match stmt {
            Stmt::Return(expr) => {
                parts.push(text("return "));
                parts.push(expr_doc(expr, imports));
                parts.push(text(";"));
            }
        }
    }
    concat(parts)
}

/// An inter-type method declaration: `public String Pet.toJson() { ... }`.
pub fn method_doc(governor: &TypeRef, spec: &MethodSpec, imports: &mut ImportResolver) -> Doc {
    let governor = imports.name_of(governor);
    let return_type = imports.name_of(spec.return_type());
    let params: Vec<String> = spec
        .params()
        .iter()
        .map(|p| format!("{} {}", imports.name_of(&p.ty), p.name))
        .collect();
    let header = format!(
        "{} {} {}.{}({}) {{",
        spec.modifiers(),
        return_type,
        governor,
        spec.name(),
        params.join(", ")
    );
    concat(vec![
        text(header),
        indent(concat(vec![hardline(), body_doc(spec.body_tree(), imports)])),
        hardline(),
        text("}"),
    ])
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
