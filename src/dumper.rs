//! Textual dumper: renders a finished scope tree back to canonical text.
//!
//! The dump is the observation mechanism for the front end: the regression
//! suite parses a source string and compares [`render`]'s output against the
//! expected text, so the formatting here is part of the contract.
//!
//! - declarations are `type<TAB>name;`, parameters `type name`;
//! - the synthetic root prototype renders nothing;
//! - a depth-1 scope (function body) gets a blank line after its prototype;
//! - a blank line separates declarations from expressions when both exist.

use crate::parser::ast::{
    Expression, FunctionPrototype, Scope, SyntaxTree, Variable, BITS_PER_BYTE, SIZEOF_VOID,
};

/// Render the whole tree. Pure; never fails.
pub fn render(tree: &SyntaxTree) -> String {
    let mut out = String::new();
    render_scope(&mut out, tree, &tree.root, 0);
    out
}

fn render_type(out: &mut String, var: &Variable) {
    if var.size == SIZEOF_VOID * BITS_PER_BYTE {
        out.push_str("void");
    } else {
        out.push_str("int");
    }
}

/// `tab` selects the declaration form (`type<TAB>name`) over the parameter
/// form (`type name`). Unnamed variables render as their type alone.
fn render_variable(out: &mut String, var: &Variable, tab: bool) {
    render_type(out, var);
    if !var.name.is_empty() {
        out.push(if tab { '\t' } else { ' ' });
        out.push_str(&var.name);
    }
}

fn render_prototype(out: &mut String, proto: &FunctionPrototype) {
    // The global namespace carries a synthetic unnamed prototype.
    if proto.is_root() {
        return;
    }
    render_variable(out, &proto.return_type, true);
    out.push('(');
    for (i, param) in proto.params.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        render_variable(out, param, false);
    }
    out.push(')');
}

fn render_expression(out: &mut String, tree: &SyntaxTree, expr: &Expression) {
    match *expr {
        Expression::Binary {
            kind,
            left,
            right,
            result,
        } => {
            out.push_str(&tree.var(result).name);
            out.push_str(" = ");
            out.push_str(&tree.var(left).name);
            out.push_str(kind.symbol());
            out.push_str(&tree.var(right).name);
            out.push_str(";\n");
        }
        Expression::Noop { operand } => {
            out.push_str(&tree.var(operand).name);
            out.push_str(";\n");
        }
    }
}

fn render_scope(out: &mut String, tree: &SyntaxTree, scope: &Scope, level: u32) {
    render_prototype(out, &scope.proto);
    if level == 1 {
        out.push_str("\n{\n");
    } else if level > 0 {
        out.push_str("{\n");
    }
    for proto in &scope.prototypes {
        render_prototype(out, proto);
        out.push_str(";\n");
    }
    for &id in &scope.vars {
        render_variable(out, tree.var(id), true);
        out.push_str(";\n");
    }
    for child in &scope.children {
        render_scope(out, tree, child, level + 1);
    }
    if (!scope.vars.is_empty() || !scope.prototypes.is_empty()) && !scope.exprs.is_empty() {
        out.push('\n');
    }
    for expr in &scope.exprs {
        render_expression(out, tree, expr);
    }
    if level > 0 {
        out.push_str("}\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::parser::parser::Parser;
    use crate::parser::symbols::TempFactory;
    use crate::source::SourceFile;

    fn render_source(source: &str) -> String {
        let file = SourceFile::new("<test>", source);
        let options = Options::default();
        let mut temps = TempFactory::new();
        let tree = Parser::new(&file, &options, &mut temps)
            .parse()
            .expect("parsing failed");
        render(&tree)
    }

    #[test]
    fn test_unnamed_declaration() {
        assert_eq!(render_source("int;"), "int;\n");
        assert_eq!(render_source("void;"), "void;\n");
    }

    #[test]
    fn test_named_declaration_uses_tab() {
        assert_eq!(render_source("int y;"), "int\ty;\n");
    }

    #[test]
    fn test_prototype_params_use_spaces() {
        assert_eq!(render_source("int f();"), "int\tf();\n");
        assert_eq!(render_source("int f(void, int);"), "int\tf(void, int);\n");
        assert_eq!(
            render_source("int f(int a, int b, int c);"),
            "int\tf(int a, int b, int c);\n"
        );
    }

    #[test]
    fn test_function_body_brace_layout() {
        assert_eq!(render_source("int f(){}"), "int\tf()\n{\n}\n");
        // Nested blocks do not repeat the blank line.
        assert_eq!(render_source("int f(){{}}"), "int\tf()\n{\n{\n}\n}\n");
    }

    #[test]
    fn test_blank_line_between_declarations_and_expressions() {
        assert_eq!(render_source("int i; i;"), "int\ti;\n\ni;\n");
    }

    #[test]
    fn test_binary_expression_rendering() {
        assert_eq!(
            render_source("int i; int j; i + j;"),
            "int\ti;\nint\tj;\nint\t.0;\n\n.0 = i + j;\n"
        );
    }
}
