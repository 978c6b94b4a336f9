//! AST node definitions for the Letter language.
//!
//! Each node kind is a struct carrying exactly the fields its production
//! fills in; children are owned, so the tree has no sharing and no cycles.
//! [`Statement`] and [`Expression`] close the set of kinds that can appear
//! in statement and expression position.
//!
//! The serialized form is the interchange format tooling relies on: every
//! node is a JSON object whose first field is `"type"` (the node kind name),
//! followed by the node's fields in declaration order. Absent optional
//! children serialize as `null`.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

// ============================================================================
// Program
// ============================================================================

/// The root of every parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Program {
    pub body: Vec<Statement>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Statement {
    Block(BlockStatement),
    Empty(EmptyStatement),
    Expression(ExpressionStatement),
    Variable(VariableStatement),
    If(IfStatement),
    While(WhileStatement),
    Do(DoStatement),
    For(ForStatement),
    Function(FunctionDeclaration),
    Return(ReturnStatement),
    Class(ClassDeclaration),
}

impl Statement {
    /// The node kind name, as written to the `type` field.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::Block(_) => "BlockStatement",
            Statement::Empty(_) => "EmptyStatement",
            Statement::Expression(_) => "ExpressionStatement",
            Statement::Variable(_) => "VariableStatement",
            Statement::If(_) => "IfStatement",
            Statement::While(_) => "WhileStatement",
            Statement::Do(_) => "DoStatement",
            Statement::For(_) => "ForStatement",
            Statement::Function(_) => "FunctionDeclaration",
            Statement::Return(_) => "ReturnStatement",
            Statement::Class(_) => "ClassDeclaration",
        }
    }

    /// Wrap an expression in an expression statement.
    pub fn expression(expression: Expression) -> Self {
        Statement::Expression(ExpressionStatement { expression })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct BlockStatement {
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "type")]
pub struct EmptyStatement {}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ExpressionStatement {
    pub expression: Expression,
}

/// `let a, b = 1;`. Also used without the semicolon as a `for` initializer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct VariableStatement {
    pub declarations: Vec<VariableDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct VariableDeclaration {
    pub id: Identifier,
    pub init: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct IfStatement {
    pub test: Expression,
    pub consequent: Box<Statement>,
    pub alternate: Option<Box<Statement>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct WhileStatement {
    pub test: Expression,
    pub body: Box<Statement>,
}

/// `do body while (test);`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct DoStatement {
    pub body: Box<Statement>,
    pub test: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ForStatement {
    pub init: Option<ForInit>,
    pub test: Option<Expression>,
    pub update: Option<Expression>,
    pub body: Box<Statement>,
}

/// The first clause of a `for` header.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ForInit {
    Variables(VariableStatement),
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct FunctionDeclaration {
    pub name: Identifier,
    pub params: Vec<Identifier>,
    pub body: BlockStatement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ReturnStatement {
    pub argument: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ClassDeclaration {
    pub id: Identifier,
    #[serde(rename = "superClass")]
    pub super_class: Option<Identifier>,
    pub body: BlockStatement,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Expression {
    Identifier(Identifier),
    This(ThisExpression),
    Super(Super),
    New(NewExpression),
    Call(CallExpression),
    Member(MemberExpression),
    Assignment(AssignmentExpression),
    Logical(LogicalExpression),
    Binary(BinaryExpression),
    Unary(UnaryExpression),
    NumericLiteral(NumericLiteral),
    StringLiteral(StringLiteral),
    BooleanLiteral(BooleanLiteral),
    NullLiteral(NullLiteral),
}

impl Expression {
    /// The node kind name, as written to the `type` field.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Identifier(_) => "Identifier",
            Expression::This(_) => "ThisExpression",
            Expression::Super(_) => "Super",
            Expression::New(_) => "NewExpression",
            Expression::Call(_) => "CallExpression",
            Expression::Member(_) => "MemberExpression",
            Expression::Assignment(_) => "AssignmentExpression",
            Expression::Logical(_) => "LogicalExpression",
            Expression::Binary(_) => "BinaryExpression",
            Expression::Unary(_) => "UnaryExpression",
            Expression::NumericLiteral(_) => "NumericLiteral",
            Expression::StringLiteral(_) => "StringLiteral",
            Expression::BooleanLiteral(_) => "BooleanLiteral",
            Expression::NullLiteral(_) => "NullLiteral",
        }
    }

    /// Only plain names and member accesses may appear left of `=`.
    pub fn is_assignment_target(&self) -> bool {
        matches!(self, Expression::Identifier(_) | Expression::Member(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Expression::NumericLiteral(_)
                | Expression::StringLiteral(_)
                | Expression::BooleanLiteral(_)
                | Expression::NullLiteral(_)
        )
    }

    // -- Builders --

    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier(Identifier::new(name))
    }

    pub fn number(value: f64) -> Self {
        Expression::NumericLiteral(NumericLiteral { value })
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::StringLiteral(StringLiteral { value: value.into() })
    }

    pub fn boolean(value: bool) -> Self {
        Expression::BooleanLiteral(BooleanLiteral { value })
    }

    pub fn null() -> Self {
        Expression::NullLiteral(NullLiteral)
    }

    pub fn binary(operator: impl Into<String>, left: Expression, right: Expression) -> Self {
        Expression::Binary(BinaryExpression {
            operator: operator.into(),
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn logical(operator: impl Into<String>, left: Expression, right: Expression) -> Self {
        Expression::Logical(LogicalExpression {
            operator: operator.into(),
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn assignment(operator: impl Into<String>, left: Expression, right: Expression) -> Self {
        Expression::Assignment(AssignmentExpression {
            operator: operator.into(),
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn unary(operator: impl Into<String>, argument: Expression) -> Self {
        Expression::Unary(UnaryExpression {
            operator: operator.into(),
            argument: Box::new(argument),
        })
    }

    pub fn member(computed: bool, object: Expression, property: Expression) -> Self {
        Expression::Member(MemberExpression {
            computed,
            object: Box::new(object),
            property: Box::new(property),
        })
    }

    pub fn call(callee: Expression, arguments: Vec<Expression>) -> Self {
        Expression::Call(CallExpression {
            callee: Box::new(callee),
            arguments,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type")]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "type")]
pub struct ThisExpression {}

/// `super`; only ever appears as the callee of a [`CallExpression`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "type")]
pub struct Super {}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct NewExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct CallExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
}

/// `object.property` (`computed == false`) or `object[property]` (`computed == true`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct MemberExpression {
    pub computed: bool,
    pub object: Box<Expression>,
    pub property: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct AssignmentExpression {
    pub operator: String,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

/// `&&` and `||`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct LogicalExpression {
    pub operator: String,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

/// Equality, relational, additive and multiplicative operators.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct BinaryExpression {
    pub operator: String,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct UnaryExpression {
    pub operator: String,
    pub argument: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct NumericLiteral {
    #[serde(serialize_with = "serialize_number")]
    pub value: f64,
}

/// Whole numbers are written as JSON integers (`5`, not `5.0`).
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub struct StringLiteral {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub struct BooleanLiteral {
    pub value: bool,
}

/// `null`. Serializes with an explicit `"value": null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NullLiteral;

impl Serialize for NullLiteral {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("NullLiteral", 2)?;
        state.serialize_field("type", "NullLiteral")?;
        state.serialize_field("value", &())?;
        state.end()
    }
}
