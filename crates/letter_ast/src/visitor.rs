//! AST visitor trait for traversing the syntax tree.
//!
//! Provides an `AstVisitor` trait for customizable traversal and a set of
//! `walk_*` functions holding the default traversal, so an overriding hook
//! can still descend into its children.

use std::collections::BTreeMap;

use crate::node::*;

/// A visitor over the AST. Default implementations walk into children in
/// source order.
pub trait AstVisitor {
    fn visit_program(&mut self, node: &Program) {
        walk_program(self, node);
    }

    fn visit_statement(&mut self, stmt: &Statement) {
        walk_statement(self, stmt);
    }

    // -- Statements --

    fn visit_block_statement(&mut self, node: &BlockStatement) {
        walk_block_statement(self, node);
    }

    fn visit_variable_statement(&mut self, node: &VariableStatement) {
        for decl in &node.declarations {
            self.visit_variable_declaration(decl);
        }
    }

    fn visit_variable_declaration(&mut self, node: &VariableDeclaration) {
        self.visit_identifier(&node.id);
        if let Some(init) = &node.init {
            self.visit_expression(init);
        }
    }

    fn visit_function_declaration(&mut self, node: &FunctionDeclaration) {
        self.visit_identifier(&node.name);
        for param in &node.params {
            self.visit_identifier(param);
        }
        self.visit_block_statement(&node.body);
    }

    fn visit_class_declaration(&mut self, node: &ClassDeclaration) {
        self.visit_identifier(&node.id);
        if let Some(super_class) = &node.super_class {
            self.visit_identifier(super_class);
        }
        self.visit_block_statement(&node.body);
    }

    // -- Expressions --

    fn visit_expression(&mut self, expr: &Expression) {
        walk_expression(self, expr);
    }

    fn visit_identifier(&mut self, _node: &Identifier) {}
}

pub fn walk_program<V: AstVisitor + ?Sized>(visitor: &mut V, node: &Program) {
    for stmt in &node.body {
        visitor.visit_statement(stmt);
    }
}

pub fn walk_block_statement<V: AstVisitor + ?Sized>(visitor: &mut V, node: &BlockStatement) {
    for stmt in &node.body {
        visitor.visit_statement(stmt);
    }
}

pub fn walk_statement<V: AstVisitor + ?Sized>(visitor: &mut V, stmt: &Statement) {
    match stmt {
        Statement::Block(n) => visitor.visit_block_statement(n),
        Statement::Empty(_) => {}
        Statement::Expression(n) => visitor.visit_expression(&n.expression),
        Statement::Variable(n) => visitor.visit_variable_statement(n),
        Statement::If(n) => {
            visitor.visit_expression(&n.test);
            visitor.visit_statement(&n.consequent);
            if let Some(alternate) = &n.alternate {
                visitor.visit_statement(alternate);
            }
        }
        Statement::While(n) => {
            visitor.visit_expression(&n.test);
            visitor.visit_statement(&n.body);
        }
        Statement::Do(n) => {
            visitor.visit_statement(&n.body);
            visitor.visit_expression(&n.test);
        }
        Statement::For(n) => {
            match &n.init {
                Some(ForInit::Variables(vars)) => visitor.visit_variable_statement(vars),
                Some(ForInit::Expression(expr)) => visitor.visit_expression(expr),
                None => {}
            }
            if let Some(test) = &n.test {
                visitor.visit_expression(test);
            }
            if let Some(update) = &n.update {
                visitor.visit_expression(update);
            }
            visitor.visit_statement(&n.body);
        }
        Statement::Function(n) => visitor.visit_function_declaration(n),
        Statement::Return(n) => {
            if let Some(argument) = &n.argument {
                visitor.visit_expression(argument);
            }
        }
        Statement::Class(n) => visitor.visit_class_declaration(n),
    }
}

pub fn walk_expression<V: AstVisitor + ?Sized>(visitor: &mut V, expr: &Expression) {
    match expr {
        Expression::Identifier(n) => visitor.visit_identifier(n),
        Expression::This(_) | Expression::Super(_) => {}
        Expression::New(n) => {
            visitor.visit_expression(&n.callee);
            for arg in &n.arguments {
                visitor.visit_expression(arg);
            }
        }
        Expression::Call(n) => {
            visitor.visit_expression(&n.callee);
            for arg in &n.arguments {
                visitor.visit_expression(arg);
            }
        }
        Expression::Member(n) => {
            visitor.visit_expression(&n.object);
            visitor.visit_expression(&n.property);
        }
        Expression::Assignment(n) => {
            visitor.visit_expression(&n.left);
            visitor.visit_expression(&n.right);
        }
        Expression::Logical(n) => {
            visitor.visit_expression(&n.left);
            visitor.visit_expression(&n.right);
        }
        Expression::Binary(n) => {
            visitor.visit_expression(&n.left);
            visitor.visit_expression(&n.right);
        }
        Expression::Unary(n) => visitor.visit_expression(&n.argument),
        Expression::NumericLiteral(_)
        | Expression::StringLiteral(_)
        | Expression::BooleanLiteral(_)
        | Expression::NullLiteral(_) => {}
    }
}

/// Counts AST nodes by kind name.
///
/// Every object that appears in the serialized tree is counted once,
/// including identifiers in declaration position and the `BlockStatement`
/// bodies owned by functions and classes.
#[derive(Debug, Default)]
pub struct NodeCounter {
    counts: BTreeMap<&'static str, usize>,
}

impl NodeCounter {
    /// Count every node of `program`, including the `Program` root.
    pub fn count(program: &Program) -> Self {
        let mut counter = Self::default();
        counter.bump("Program");
        counter.visit_program(program);
        counter
    }

    fn bump(&mut self, kind: &'static str) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    /// Per-kind counts, sorted by kind name.
    pub fn counts(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.counts.iter().map(|(k, v)| (*k, *v))
    }

    pub fn get(&self, kind: &str) -> usize {
        self.counts.get(kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl AstVisitor for NodeCounter {
    fn visit_statement(&mut self, stmt: &Statement) {
        // Blocks and variable statements are also reachable outside statement
        // position, so their own hooks count them.
        if !matches!(stmt, Statement::Block(_) | Statement::Variable(_)) {
            self.bump(stmt.kind_name());
        }
        walk_statement(self, stmt);
    }

    fn visit_block_statement(&mut self, node: &BlockStatement) {
        self.bump("BlockStatement");
        walk_block_statement(self, node);
    }

    fn visit_variable_statement(&mut self, node: &VariableStatement) {
        self.bump("VariableStatement");
        for decl in &node.declarations {
            self.visit_variable_declaration(decl);
        }
    }

    fn visit_variable_declaration(&mut self, node: &VariableDeclaration) {
        self.bump("VariableDeclaration");
        self.visit_identifier(&node.id);
        if let Some(init) = &node.init {
            self.visit_expression(init);
        }
    }

    fn visit_expression(&mut self, expr: &Expression) {
        if !matches!(expr, Expression::Identifier(_)) {
            self.bump(expr.kind_name());
        }
        walk_expression(self, expr);
    }

    fn visit_identifier(&mut self, _node: &Identifier) {
        self.bump("Identifier");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `def add(a, b) { return a + b; }`
    fn sample_program() -> Program {
        let body = BlockStatement {
            body: vec![Statement::Return(ReturnStatement {
                argument: Some(Expression::binary(
                    "+",
                    Expression::identifier("a"),
                    Expression::identifier("b"),
                )),
            })],
        };
        Program {
            body: vec![Statement::Function(FunctionDeclaration {
                name: Identifier::new("add"),
                params: vec![Identifier::new("a"), Identifier::new("b")],
                body,
            })],
        }
    }

    #[derive(Default)]
    struct NameCollector {
        names: Vec<String>,
    }

    impl AstVisitor for NameCollector {
        fn visit_identifier(&mut self, node: &Identifier) {
            self.names.push(node.name.clone());
        }
    }

    #[test]
    fn test_default_walk_reaches_identifiers_in_order() {
        let mut collector = NameCollector::default();
        collector.visit_program(&sample_program());
        assert_eq!(collector.names, vec!["add", "a", "b", "a", "b"]);
    }

    #[test]
    fn test_node_counter() {
        let counter = NodeCounter::count(&sample_program());
        assert_eq!(counter.get("Program"), 1);
        assert_eq!(counter.get("FunctionDeclaration"), 1);
        assert_eq!(counter.get("BlockStatement"), 1);
        assert_eq!(counter.get("ReturnStatement"), 1);
        assert_eq!(counter.get("BinaryExpression"), 1);
        assert_eq!(counter.get("Identifier"), 5);
        assert_eq!(counter.total(), 10);
    }
}
