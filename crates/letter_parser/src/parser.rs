//! The Letter parser implementation.
//!
//! A predictive recursive descent parser with a single token of lookahead.
//! Productions inspect the lookahead to choose a rule and consume tokens only
//! through `expect`. Every production returns a complete node or
//! an error; nothing is recovered.

use letter_ast::node::*;
use letter_ast::syntax_kind::TokenKind;
use letter_core::text::TextSpan;
use letter_diagnostics::{messages, DiagnosticMessage, ParseError};
use letter_tokenizer::{Token, Tokenizer};
use tracing::debug;

use crate::options::ParserOptions;
use crate::precedence::BinaryPrecedence;
use crate::utilities::{numeric_literal_value, string_literal_value};

/// The parser produces a [`Program`] from Letter source text.
///
/// A parser may be reused for any number of sources; each call to
/// [`Parser::parse`] starts from a clean state.
#[derive(Debug, Default)]
pub struct Parser {
    tokenizer: Tokenizer,
    /// The next unconsumed token, or `None` at end of input.
    lookahead: Option<Token>,
    options: ParserOptions,
    /// Depth of the node being built: recursive productions and left-fold
    /// iterations both count, so the finished tree is bounded too.
    recursion_depth: u32,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse `source` into a program.
    #[tracing::instrument(skip_all, fields(source_len = source.len()))]
    pub fn parse(&mut self, source: &str) -> Result<Program, ParseError> {
        self.tokenizer.init(source);
        self.recursion_depth = 0;
        self.lookahead = None;

        let result = self.prime().and_then(|()| self.parse_program());
        match &result {
            Ok(program) => debug!(statements = program.body.len(), "parsed program"),
            Err(err) => debug!(code = err.code(), error = %err, "parse failed"),
        }
        result
    }

    // ========================================================================
    // Token management
    // ========================================================================

    fn prime(&mut self) -> Result<(), ParseError> {
        self.lookahead = self.tokenizer.get_next_token()?;
        Ok(())
    }

    #[inline]
    fn current_token(&self) -> Option<TokenKind> {
        self.lookahead.as_ref().map(|token| token.kind)
    }

    #[inline]
    fn is_token(&self, kind: TokenKind) -> bool {
        self.current_token() == Some(kind)
    }

    /// Consume the lookahead, which must be of `kind`, and pull the next token.
    ///
    /// This is the only place tokens are consumed.
    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        let token = match self.lookahead.take() {
            None => return Err(self.unexpected_end_of_input(kind.name())),
            Some(token) if token.kind != kind => {
                let err = ParseError::syntax(
                    &messages::UNEXPECTED_TOKEN_0_EXPECTED_1,
                    &[&token.value, kind.name()],
                    token.span(),
                );
                self.lookahead = Some(token);
                return Err(err);
            }
            Some(token) => token,
        };
        self.lookahead = self.tokenizer.get_next_token()?;
        Ok(token)
    }

    /// Consume the lookahead if it is of `kind`.
    fn optional_token(&mut self, kind: TokenKind) -> Result<Option<Token>, ParseError> {
        if self.is_token(kind) {
            self.expect(kind).map(Some)
        } else {
            Ok(None)
        }
    }

    fn unexpected_end_of_input(&self, expected: &str) -> ParseError {
        self.error(&messages::UNEXPECTED_END_OF_INPUT_EXPECTED_0, &[expected])
    }

    fn unexpected_primary_expression(&self) -> ParseError {
        let value = self.lookahead.as_ref().map(|t| t.value.as_str()).unwrap_or_default();
        self.error(&messages::UNEXPECTED_PRIMARY_EXPRESSION_0, &[value])
    }

    /// A syntax error located at the lookahead, or at the end of the source.
    fn error(&self, message: &DiagnosticMessage, args: &[&str]) -> ParseError {
        let span = match &self.lookahead {
            Some(token) => token.span(),
            None => TextSpan::empty(self.tokenizer.source().len() as u32),
        };
        ParseError::syntax(message, args, span)
    }

    /// Charge one level of depth, failing once the configured limit is exceeded.
    fn descend(&mut self) -> Result<(), ParseError> {
        if self.recursion_depth >= self.options.max_depth {
            let max_depth = self.options.max_depth.to_string();
            return Err(self.error(&messages::MAXIMUM_NESTING_DEPTH_OF_0_EXCEEDED, &[&max_depth]));
        }
        self.recursion_depth += 1;
        Ok(())
    }

    /// Run `f` one level deeper.
    ///
    /// Productions that charge levels with `descend` give them back
    /// on success only; an error aborts the parse and `parse` resets the count.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, ParseError>) -> Result<T, ParseError> {
        let depth = self.recursion_depth;
        self.descend()?;
        let result = f(self)?;
        self.recursion_depth = depth;
        Ok(result)
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn parse_program(&mut self) -> Result<Program, ParseError> {
        let body = self.parse_statement_list(None)?;
        Ok(Program { body })
    }

    /// Parse statements until the end of input or until the lookahead is `stop`.
    fn parse_statement_list(&mut self, stop: Option<TokenKind>) -> Result<Vec<Statement>, ParseError> {
        let mut statements = Vec::new();
        while let Some(kind) = self.current_token() {
            if Some(kind) == stop {
                break;
            }
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        self.nested(|p| match p.current_token() {
            Some(TokenKind::Semicolon) => p.parse_empty_statement(),
            Some(TokenKind::OpenBrace) => Ok(Statement::Block(p.parse_block()?)),
            Some(TokenKind::LetKeyword) => p.parse_variable_statement(),
            Some(TokenKind::IfKeyword) => p.parse_if_statement(),
            Some(TokenKind::WhileKeyword) => p.parse_while_statement(),
            Some(TokenKind::DoKeyword) => p.parse_do_statement(),
            Some(TokenKind::ForKeyword) => p.parse_for_statement(),
            Some(TokenKind::DefKeyword) => p.parse_function_declaration(),
            Some(TokenKind::ReturnKeyword) => p.parse_return_statement(),
            Some(TokenKind::ClassKeyword) => p.parse_class_declaration(),
            _ => p.parse_expression_statement(),
        })
    }

    fn parse_empty_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::Semicolon)?;
        Ok(Statement::Empty(EmptyStatement {}))
    }

    fn parse_block(&mut self) -> Result<BlockStatement, ParseError> {
        self.expect(TokenKind::OpenBrace)?;
        let body = if self.is_token(TokenKind::CloseBrace) {
            Vec::new()
        } else {
            self.parse_statement_list(Some(TokenKind::CloseBrace))?
        };
        self.expect(TokenKind::CloseBrace)?;
        Ok(BlockStatement { body })
    }

    fn parse_variable_statement(&mut self) -> Result<Statement, ParseError> {
        let statement = self.parse_variable_declaration_list()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Statement::Variable(statement))
    }

    /// `let` followed by declarations; the caller owns the terminating `;`.
    fn parse_variable_declaration_list(&mut self) -> Result<VariableStatement, ParseError> {
        self.expect(TokenKind::LetKeyword)?;
        let mut declarations = vec![self.parse_variable_declaration()?];
        while self.optional_token(TokenKind::Comma)?.is_some() {
            declarations.push(self.parse_variable_declaration()?);
        }
        Ok(VariableStatement { declarations })
    }

    fn parse_variable_declaration(&mut self) -> Result<VariableDeclaration, ParseError> {
        let id = self.parse_identifier()?;
        let init = match self.current_token() {
            None | Some(TokenKind::Semicolon) | Some(TokenKind::Comma) => None,
            Some(_) => {
                self.expect(TokenKind::SimpleAssign)?;
                Some(self.parse_assignment_expression()?)
            }
        };
        Ok(VariableDeclaration { id, init })
    }

    fn parse_if_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::IfKeyword)?;
        let test = self.parse_parenthesized_expression()?;
        let consequent = Box::new(self.parse_statement()?);
        // The innermost `if` takes the `else`.
        let alternate = match self.optional_token(TokenKind::ElseKeyword)? {
            Some(_) => Some(Box::new(self.parse_statement()?)),
            None => None,
        };
        Ok(Statement::If(IfStatement {
            test,
            consequent,
            alternate,
        }))
    }

    fn parse_while_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::WhileKeyword)?;
        let test = self.parse_parenthesized_expression()?;
        let body = Box::new(self.parse_statement()?);
        Ok(Statement::While(WhileStatement { test, body }))
    }

    fn parse_do_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::DoKeyword)?;
        let body = Box::new(self.parse_statement()?);
        self.expect(TokenKind::WhileKeyword)?;
        let test = self.parse_parenthesized_expression()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Statement::Do(DoStatement { body, test }))
    }

    fn parse_for_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::ForKeyword)?;
        self.expect(TokenKind::OpenParen)?;

        let init = match self.current_token() {
            Some(TokenKind::Semicolon) => None,
            Some(TokenKind::LetKeyword) => Some(ForInit::Variables(self.parse_variable_declaration_list()?)),
            _ => Some(ForInit::Expression(self.parse_expression()?)),
        };
        self.expect(TokenKind::Semicolon)?;

        let test = if self.is_token(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semicolon)?;

        let update = if self.is_token(TokenKind::CloseParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::CloseParen)?;

        let body = Box::new(self.parse_statement()?);
        Ok(Statement::For(ForStatement {
            init,
            test,
            update,
            body,
        }))
    }

    fn parse_function_declaration(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::DefKeyword)?;
        let name = self.parse_identifier()?;
        self.expect(TokenKind::OpenParen)?;
        let params = if self.is_token(TokenKind::CloseParen) {
            Vec::new()
        } else {
            self.parse_parameter_list()?
        };
        self.expect(TokenKind::CloseParen)?;
        let body = self.parse_block()?;
        Ok(Statement::Function(FunctionDeclaration { name, params, body }))
    }

    fn parse_parameter_list(&mut self) -> Result<Vec<Identifier>, ParseError> {
        let mut params = vec![self.parse_identifier()?];
        while self.optional_token(TokenKind::Comma)?.is_some() {
            params.push(self.parse_identifier()?);
        }
        Ok(params)
    }

    fn parse_return_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::ReturnKeyword)?;
        let argument = match self.current_token() {
            None | Some(TokenKind::Semicolon) => None,
            Some(_) => Some(self.parse_expression()?),
        };
        self.expect(TokenKind::Semicolon)?;
        Ok(Statement::Return(ReturnStatement { argument }))
    }

    fn parse_class_declaration(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::ClassKeyword)?;
        let id = self.parse_identifier()?;
        let super_class = match self.optional_token(TokenKind::ExtendsKeyword)? {
            Some(_) => Some(self.parse_identifier()?),
            None => None,
        };
        let body = self.parse_block()?;
        Ok(Statement::Class(ClassDeclaration { id, super_class, body }))
    }

    fn parse_expression_statement(&mut self) -> Result<Statement, ParseError> {
        let expression = self.parse_expression()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Statement::expression(expression))
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        self.parse_assignment_expression()
    }

    fn parse_parenthesized_expression(&mut self) -> Result<Expression, ParseError> {
        self.expect(TokenKind::OpenParen)?;
        let expression = self.parse_expression()?;
        self.expect(TokenKind::CloseParen)?;
        Ok(expression)
    }

    /// Right-associative: `a = b = c` is `a = (b = c)`.
    fn parse_assignment_expression(&mut self) -> Result<Expression, ParseError> {
        self.nested(|p| {
            let left = p.parse_binary_expression(BinaryPrecedence::LOWEST)?;
            let operator_kind = match p.current_token() {
                Some(kind) if kind.is_assignment_operator() => kind,
                _ => return Ok(left),
            };
            if !left.is_assignment_target() {
                return Err(p.error(&messages::INVALID_LEFT_HAND_SIDE_IN_ASSIGNMENT, &[]));
            }
            let operator = p.expect(operator_kind)?.value;
            let right = p.parse_assignment_expression()?;
            Ok(Expression::assignment(operator, left, right))
        })
    }

    /// Left-fold operands of the next tighter level while the lookahead is
    /// an operator of `precedence`. Each fold deepens the tree by one level.
    fn parse_binary_expression(&mut self, precedence: BinaryPrecedence) -> Result<Expression, ParseError> {
        let operator_kind = precedence.operator_kind();
        let depth = self.recursion_depth;
        let mut left = self.parse_binary_operand(precedence)?;
        while self.is_token(operator_kind) {
            self.descend()?;
            let operator = self.expect(operator_kind)?.value;
            let right = self.parse_binary_operand(precedence)?;
            left = if precedence.is_logical() {
                Expression::logical(operator, left, right)
            } else {
                Expression::binary(operator, left, right)
            };
        }
        self.recursion_depth = depth;
        Ok(left)
    }

    fn parse_binary_operand(&mut self, precedence: BinaryPrecedence) -> Result<Expression, ParseError> {
        match precedence.tighter() {
            Some(tighter) => self.parse_binary_expression(tighter),
            None => self.parse_unary_expression(),
        }
    }

    /// `+x`, `-x`, `!x`; repeated operators nest.
    fn parse_unary_expression(&mut self) -> Result<Expression, ParseError> {
        match self.current_token() {
            Some(kind @ (TokenKind::AdditiveOperator | TokenKind::LogicalNot)) => self.nested(|p| {
                let operator = p.expect(kind)?.value;
                let argument = p.parse_unary_expression()?;
                Ok(Expression::unary(operator, argument))
            }),
            _ => self.parse_left_hand_side_expression(),
        }
    }

    fn parse_left_hand_side_expression(&mut self) -> Result<Expression, ParseError> {
        self.parse_call_member_expression()
    }

    /// `super` is only valid as the callee of a call, so it is always
    /// followed by an argument list.
    fn parse_call_member_expression(&mut self) -> Result<Expression, ParseError> {
        if self.optional_token(TokenKind::SuperKeyword)?.is_some() {
            return self.parse_call_expression(Expression::Super(Super {}));
        }
        let member = self.parse_member_expression()?;
        if self.is_token(TokenKind::OpenParen) {
            return self.parse_call_expression(member);
        }
        Ok(member)
    }

    /// `callee(args)`, followed by any number of further argument lists.
    fn parse_call_expression(&mut self, callee: Expression) -> Result<Expression, ParseError> {
        let depth = self.recursion_depth;
        self.descend()?;
        let mut expression = Expression::call(callee, self.parse_argument_list()?);
        while self.is_token(TokenKind::OpenParen) {
            self.descend()?;
            expression = Expression::call(expression, self.parse_argument_list()?);
        }
        self.recursion_depth = depth;
        Ok(expression)
    }

    fn parse_argument_list(&mut self) -> Result<Vec<Expression>, ParseError> {
        self.expect(TokenKind::OpenParen)?;
        let mut arguments = Vec::new();
        if !self.is_token(TokenKind::CloseParen) {
            arguments.push(self.parse_assignment_expression()?);
            while self.optional_token(TokenKind::Comma)?.is_some() {
                arguments.push(self.parse_assignment_expression()?);
            }
        }
        self.expect(TokenKind::CloseParen)?;
        Ok(arguments)
    }

    /// `a.b` and `a[b]` chains over a primary expression.
    fn parse_member_expression(&mut self) -> Result<Expression, ParseError> {
        let depth = self.recursion_depth;
        let mut object = self.parse_primary_expression()?;
        loop {
            match self.current_token() {
                Some(TokenKind::Dot) => {
                    self.descend()?;
                    self.expect(TokenKind::Dot)?;
                    let property = Expression::Identifier(self.parse_identifier()?);
                    object = Expression::member(false, object, property);
                }
                Some(TokenKind::OpenBracket) => {
                    self.descend()?;
                    self.expect(TokenKind::OpenBracket)?;
                    let property = self.parse_expression()?;
                    self.expect(TokenKind::CloseBracket)?;
                    object = Expression::member(true, object, property);
                }
                _ => break,
            }
        }
        self.recursion_depth = depth;
        Ok(object)
    }

    fn parse_primary_expression(&mut self) -> Result<Expression, ParseError> {
        match self.current_token() {
            Some(kind) if kind.is_literal() => self.parse_literal(),
            Some(TokenKind::OpenParen) => self.parse_parenthesized_expression(),
            Some(TokenKind::Identifier) => Ok(Expression::Identifier(self.parse_identifier()?)),
            Some(TokenKind::ThisKeyword) => {
                self.expect(TokenKind::ThisKeyword)?;
                Ok(Expression::This(ThisExpression {}))
            }
            Some(TokenKind::NewKeyword) => self.parse_new_expression(),
            Some(_) => Err(self.unexpected_primary_expression()),
            None => Err(self.unexpected_end_of_input("expression")),
        }
    }

    /// `new` takes a member expression as its callee and always requires arguments.
    fn parse_new_expression(&mut self) -> Result<Expression, ParseError> {
        self.nested(|p| {
            p.expect(TokenKind::NewKeyword)?;
            let callee = Box::new(p.parse_member_expression()?);
            let arguments = p.parse_argument_list()?;
            Ok(Expression::New(NewExpression { callee, arguments }))
        })
    }

    fn parse_identifier(&mut self) -> Result<Identifier, ParseError> {
        let token = self.expect(TokenKind::Identifier)?;
        Ok(Identifier::new(token.value))
    }

    /// Build the literal from the lookahead, then consume it.
    fn parse_literal(&mut self) -> Result<Expression, ParseError> {
        let Some(token) = &self.lookahead else {
            return Err(self.unexpected_end_of_input("literal"));
        };
        let kind = token.kind;
        let literal = match kind {
            TokenKind::Number => match numeric_literal_value(&token.value) {
                Some(value) => Expression::number(value),
                None => return Err(self.unexpected_primary_expression()),
            },
            TokenKind::String => Expression::string(string_literal_value(&token.value)),
            TokenKind::TrueKeyword => Expression::boolean(true),
            TokenKind::FalseKeyword => Expression::boolean(false),
            _ => Expression::null(),
        };
        self.expect(kind)?;
        Ok(literal)
    }
}

/// Parse `source` with a fresh parser and default options.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    Parser::new().parse(source)
}
