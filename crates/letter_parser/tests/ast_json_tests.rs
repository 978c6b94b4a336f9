//! AST serialization tests.
//!
//! Checks that parsed programs serialize to the JSON shape external tooling
//! reads: a `type` tag on every node, `null` for absent children, and the
//! exact field names of each node kind.

use letter_parser::parse;
use serde_json::{json, Value};

/// Helper: parse source text and serialize the program.
fn to_json(source: &str) -> Value {
    let program = parse(source).unwrap_or_else(|e| panic!("parsing {:?} failed: {}", source, e));
    serde_json::to_value(&program).unwrap()
}

/// Helper: the serialized first statement of a program.
fn first_statement(source: &str) -> Value {
    to_json(source)["body"][0].clone()
}

#[test]
fn test_program_shape() {
    assert_eq!(to_json(""), json!({ "type": "Program", "body": [] }));
}

#[test]
fn test_expression_statement_shape() {
    assert_eq!(
        to_json("X + 5 > 10;"),
        json!({
            "type": "Program",
            "body": [{
                "type": "ExpressionStatement",
                "expression": {
                    "type": "BinaryExpression",
                    "operator": ">",
                    "left": {
                        "type": "BinaryExpression",
                        "operator": "+",
                        "left": { "type": "Identifier", "name": "X" },
                        "right": { "type": "NumericLiteral", "value": 5 }
                    },
                    "right": { "type": "NumericLiteral", "value": 10 }
                }
            }]
        })
    );
}

#[test]
fn test_member_expression_shape() {
    assert_eq!(
        first_statement("a.b[0]();")["expression"],
        json!({
            "type": "CallExpression",
            "callee": {
                "type": "MemberExpression",
                "computed": true,
                "object": {
                    "type": "MemberExpression",
                    "computed": false,
                    "object": { "type": "Identifier", "name": "a" },
                    "property": { "type": "Identifier", "name": "b" }
                },
                "property": { "type": "NumericLiteral", "value": 0 }
            },
            "arguments": []
        })
    );
}

#[test]
fn test_variable_statement_shape() {
    assert_eq!(
        first_statement("let a, b = 'x';"),
        json!({
            "type": "VariableStatement",
            "declarations": [
                {
                    "type": "VariableDeclaration",
                    "id": { "type": "Identifier", "name": "a" },
                    "init": null
                },
                {
                    "type": "VariableDeclaration",
                    "id": { "type": "Identifier", "name": "b" },
                    "init": { "type": "StringLiteral", "value": "x" }
                }
            ]
        })
    );
}

#[test]
fn test_if_statement_shape() {
    assert_eq!(
        first_statement("if (!ok) ;"),
        json!({
            "type": "IfStatement",
            "test": {
                "type": "UnaryExpression",
                "operator": "!",
                "argument": { "type": "Identifier", "name": "ok" }
            },
            "consequent": { "type": "EmptyStatement" },
            "alternate": null
        })
    );
}

#[test]
fn test_loop_shapes() {
    assert_eq!(
        first_statement("do {} while (true);"),
        json!({
            "type": "DoStatement",
            "body": { "type": "BlockStatement", "body": [] },
            "test": { "type": "BooleanLiteral", "value": true }
        })
    );
    assert_eq!(
        first_statement("while (false) ;"),
        json!({
            "type": "WhileStatement",
            "test": { "type": "BooleanLiteral", "value": false },
            "body": { "type": "EmptyStatement" }
        })
    );
    assert_eq!(
        first_statement("for (;;) {}"),
        json!({
            "type": "ForStatement",
            "init": null,
            "test": null,
            "update": null,
            "body": { "type": "BlockStatement", "body": [] }
        })
    );
}

#[test]
fn test_for_init_shapes() {
    let stmt = first_statement("for (let i = 0; ; ) ;");
    assert_eq!(stmt["init"]["type"], "VariableStatement");
    assert_eq!(stmt["init"]["declarations"][0]["id"]["name"], "i");

    let stmt = first_statement("for (i = 0; ; ) ;");
    assert_eq!(
        stmt["init"],
        json!({
            "type": "AssignmentExpression",
            "operator": "=",
            "left": { "type": "Identifier", "name": "i" },
            "right": { "type": "NumericLiteral", "value": 0 }
        })
    );
}

#[test]
fn test_function_declaration_shape() {
    assert_eq!(
        first_statement("def f(a) { return null; }"),
        json!({
            "type": "FunctionDeclaration",
            "name": { "type": "Identifier", "name": "f" },
            "params": [{ "type": "Identifier", "name": "a" }],
            "body": {
                "type": "BlockStatement",
                "body": [{
                    "type": "ReturnStatement",
                    "argument": { "type": "NullLiteral", "value": null }
                }]
            }
        })
    );
}

#[test]
fn test_class_declaration_shape() {
    assert_eq!(
        first_statement("class B extends A { def m() { super(); } }"),
        json!({
            "type": "ClassDeclaration",
            "id": { "type": "Identifier", "name": "B" },
            "superClass": { "type": "Identifier", "name": "A" },
            "body": {
                "type": "BlockStatement",
                "body": [{
                    "type": "FunctionDeclaration",
                    "name": { "type": "Identifier", "name": "m" },
                    "params": [],
                    "body": {
                        "type": "BlockStatement",
                        "body": [{
                            "type": "ExpressionStatement",
                            "expression": {
                                "type": "CallExpression",
                                "callee": { "type": "Super" },
                                "arguments": []
                            }
                        }]
                    }
                }]
            }
        })
    );
    assert_eq!(first_statement("class A {}")["superClass"], Value::Null);
}

#[test]
fn test_new_and_this_shapes() {
    assert_eq!(
        first_statement("this.p = new P(1);")["expression"],
        json!({
            "type": "AssignmentExpression",
            "operator": "=",
            "left": {
                "type": "MemberExpression",
                "computed": false,
                "object": { "type": "ThisExpression" },
                "property": { "type": "Identifier", "name": "p" }
            },
            "right": {
                "type": "NewExpression",
                "callee": { "type": "Identifier", "name": "P" },
                "arguments": [{ "type": "NumericLiteral", "value": 1 }]
            }
        })
    );
}

#[test]
fn test_logical_expression_shape() {
    assert_eq!(
        first_statement("a || b;")["expression"],
        json!({
            "type": "LogicalExpression",
            "operator": "||",
            "left": { "type": "Identifier", "name": "a" },
            "right": { "type": "Identifier", "name": "b" }
        })
    );
}

#[test]
fn test_type_tag_comes_first() {
    let text = serde_json::to_string(&parse("x = 1;").unwrap()).unwrap();
    assert!(text.starts_with(r#"{"type":"Program","body":[{"type":"ExpressionStatement","expression":{"type":"AssignmentExpression""#));
}

#[test]
fn test_numeric_literal_text() {
    let text = serde_json::to_string(&parse("x = 42;").unwrap()).unwrap();
    assert!(text.contains(r#""right":{"type":"NumericLiteral","value":42}"#), "{}", text);
}
