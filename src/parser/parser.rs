//! Parser entrypoints, token plumbing and statements.

use serde::{Deserialize, Serialize};

use crate::lexer::{ByteOffset, Lexer, Span, Token, TokenKind, decode_identifier};
use crate::parser::budget::NodeBudget;
use crate::parser::ast::{LiteralKind, NodeKind, SyntaxNode};
use crate::parser::error::ParseError;
use crate::parser::keyword::Keyword;
use crate::parser::visitor::{NodeVisitor, VisitControl};

pub(crate) type ParseResult<T> = Result<T, ParseError>;

/// How the parser reacts to syntax errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseMode {
    /// Fail on the first syntax error.
    Strict,
    /// Repair syntax errors with placeholder nodes and skipped tokens.
    Loose,
}

/// Parser behavior options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Maximum syntactic nesting depth.
    pub max_nesting: usize,
    /// Maximum AST nodes allowed during parsing.
    pub max_nodes: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_nesting: 128,
            max_nodes: 100_000,
        }
    }
}

/// Statement context that changes what is legal inside a function body.
#[derive(Debug, Clone, Default)]
pub(crate) struct FunctionScope {
    pub(crate) in_function: bool,
    pub(crate) in_generator: bool,
    pub(crate) loop_depth: u32,
    pub(crate) switch_depth: u32,
    pub(crate) labels: Vec<String>,
}

/// Recursive-descent ECMAScript 2015 parser.
///
/// Every finished node is handed to the visitor before it is attached to its
/// parent. Module syntax is accepted anywhere.
pub struct Parser<'a, 'v> {
    pub(crate) source: &'a str,
    pub(crate) mode: ParseMode,
    pub(crate) options: ParseOptions,
    pub(crate) lexer: Lexer<'a>,
    pub(crate) current: Token<'a>,
    pub(crate) prev_end: ByteOffset,
    pub(crate) depth: usize,
    pub(crate) scope: FunctionScope,
    budget: NodeBudget,
    visitor: &'v mut dyn NodeVisitor,
}

/// Parses `source` as a whole program, reporting nodes to `visitor`.
pub fn parse_program(
    source: &str,
    mode: ParseMode,
    options: ParseOptions,
    visitor: &mut dyn NodeVisitor,
) -> Result<SyntaxNode, ParseError> {
    Parser::new(source, mode, options, visitor).parse_program()
}

impl<'a, 'v> Parser<'a, 'v> {
    /// Creates a parser positioned at the first token of `source`.
    pub fn new(
        source: &'a str,
        mode: ParseMode,
        options: ParseOptions,
        visitor: &'v mut dyn NodeVisitor,
    ) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            source,
            mode,
            options,
            lexer,
            current,
            prev_end: ByteOffset::new(0),
            depth: 0,
            scope: FunctionScope::default(),
            budget: NodeBudget::new(options.max_nodes),
            visitor,
        }
    }

    /// Returns the parse mode.
    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Parses a whole program.
    pub fn parse_program(mut self) -> Result<SyntaxNode, ParseError> {
        let mut body = Vec::new();
        while !self.current.is_eof() {
            body.push(self.parse_statement()?);
        }
        let span = Span::from_range(0, self.source.len());
        self.finish(SyntaxNode::new(NodeKind::Program, span, body))
    }

    // ------------------------------------------------------------------
    // Token plumbing
    // ------------------------------------------------------------------

    pub(crate) fn is_loose(&self) -> bool {
        self.mode == ParseMode::Loose
    }

    pub(crate) fn advance(&mut self) -> Token<'a> {
        let token = self.current;
        self.prev_end = token.span.end;
        self.current = self.lexer.next_token();
        token
    }

    /// Scans the token after `current` without consuming anything.
    pub(crate) fn peek(&self) -> Token<'a> {
        let mut lexer = self.lexer;
        lexer.next_token()
    }

    pub(crate) fn start(&self) -> ByteOffset {
        self.current.span.start
    }

    pub(crate) fn span_from(&self, start: ByteOffset) -> Span {
        if self.prev_end < start {
            Span::empty_at(start)
        } else {
            Span::new(start, self.prev_end)
        }
    }

    pub(crate) fn at_punct(&self, op: &str) -> bool {
        self.current.is_punct(op)
    }

    pub(crate) fn at_keyword(&self, keyword: Keyword) -> bool {
        Keyword::of(&self.current) == Some(keyword)
    }

    /// Contextual words such as `of`, `let` and `yield`.
    pub(crate) fn at_word(&self, word: &str) -> bool {
        self.current.is_word(word)
    }

    pub(crate) fn at_identifier(&self) -> bool {
        self.current.kind == TokenKind::Name && Keyword::of(&self.current).is_none()
    }

    pub(crate) fn eat_punct(&mut self, op: &str) -> bool {
        if self.at_punct(op) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Fails in strict mode; flags the enclosing node as repaired in loose mode.
    pub(crate) fn recover(&self, expected: &'static str, recovered: &mut bool) -> ParseResult<()> {
        if self.is_loose() {
            *recovered = true;
            Ok(())
        } else {
            Err(ParseError::unexpected(&self.current, expected))
        }
    }

    pub(crate) fn expect_punct(
        &mut self,
        op: &'static str,
        recovered: &mut bool,
    ) -> ParseResult<()> {
        if self.eat_punct(op) {
            Ok(())
        } else {
            self.recover(op, recovered)
        }
    }

    /// Consumes a statement terminator, applying automatic semicolon insertion.
    pub(crate) fn semicolon(&mut self, recovered: &mut bool) -> ParseResult<()> {
        if self.eat_punct(";")
            || self.at_punct("}")
            || self.current.is_eof()
            || self.current.newline_before
        {
            return Ok(());
        }
        self.recover(";", recovered)
    }

    pub(crate) fn enter(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > self.options.max_nesting {
            return Err(ParseError::nesting_limit(
                self.current.span,
                self.options.max_nesting,
            ));
        }
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // ------------------------------------------------------------------
    // Node construction
    // ------------------------------------------------------------------

    /// Completes a node: propagates recovery marks, charges the node budget and
    /// reports the node to the visitor.
    pub(crate) fn finish(&mut self, mut node: SyntaxNode) -> ParseResult<SyntaxNode> {
        node.recovered |= node.children.iter().any(|child| child.recovered);
        self.budget
            .charge()
            .map_err(|error| ParseError::over_budget(error, node.span))?;
        if self.visitor.visit(&node, self.source) == VisitControl::Halt {
            return Err(ParseError::halted(node.span));
        }
        Ok(node)
    }

    pub(crate) fn build(
        &mut self,
        kind: NodeKind,
        start: ByteOffset,
        children: Vec<SyntaxNode>,
        recovered: bool,
    ) -> ParseResult<SyntaxNode> {
        let node = SyntaxNode::new(kind, self.span_from(start), children).with_recovered(recovered);
        self.finish(node)
    }

    /// Consumes the current name token as an identifier.
    pub(crate) fn parse_identifier(&mut self) -> ParseResult<SyntaxNode> {
        let token = self.advance();
        let name = decode_identifier(token.lexeme).into_owned();
        self.finish(SyntaxNode::new(NodeKind::Identifier, token.span, Vec::new()).with_name(name))
    }

    pub(crate) fn with_function_scope<T>(
        &mut self,
        generator: bool,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let inner = FunctionScope {
            in_function: true,
            in_generator: generator,
            ..FunctionScope::default()
        };
        let saved = std::mem::replace(&mut self.scope, inner);
        let result = parse(self);
        self.scope = saved;
        result
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    pub(crate) fn parse_statement(&mut self) -> ParseResult<SyntaxNode> {
        self.enter()?;
        let result = self.parse_statement_inner();
        self.leave();
        result
    }

    fn parse_statement_inner(&mut self) -> ParseResult<SyntaxNode> {
        if self.is_loose() && !self.can_start_statement() {
            if self.current.is_eof() {
                return self.placeholder();
            }
            return self.skip_invalid();
        }

        if self.current.kind == TokenKind::Punctuator {
            if self.at_punct("{") {
                return self.parse_block();
            }
            if self.at_punct(";") {
                let start = self.start();
                self.advance();
                return self.build(NodeKind::EmptyStatement, start, Vec::new(), false);
            }
        }

        match Keyword::of(&self.current) {
            Some(Keyword::Var) => self.parse_var_statement(),
            Some(Keyword::Const) => self.parse_var_statement(),
            Some(Keyword::Function) => {
                let start = self.start();
                self.parse_function(start, true)
            }
            Some(Keyword::Class) => self.parse_class(true),
            Some(Keyword::If) => self.parse_if(),
            Some(Keyword::For) => self.parse_for(),
            Some(Keyword::While) => self.parse_while(),
            Some(Keyword::Do) => self.parse_do_while(),
            Some(Keyword::Return) => self.parse_return(),
            Some(Keyword::Break) => self.parse_break_continue(true),
            Some(Keyword::Continue) => self.parse_break_continue(false),
            Some(Keyword::Throw) => self.parse_throw(),
            Some(Keyword::Try) => self.parse_try(),
            Some(Keyword::Switch) => self.parse_switch(),
            Some(Keyword::With) => self.parse_with(),
            Some(Keyword::Debugger) => {
                let start = self.start();
                self.advance();
                let mut recovered = false;
                self.semicolon(&mut recovered)?;
                self.build(NodeKind::DebuggerStatement, start, Vec::new(), recovered)
            }
            Some(Keyword::Import) => self.parse_import(),
            Some(Keyword::Export) => self.parse_export(),
            _ if self.at_word("let") && self.let_starts_declaration() => {
                self.parse_var_statement()
            }
            _ => self.parse_expression_statement(),
        }
    }

    pub(crate) fn let_starts_declaration(&self) -> bool {
        let next = self.peek();
        next.is_punct("[")
            || next.is_punct("{")
            || (next.kind == TokenKind::Name && Keyword::of(&next).is_none())
    }

    fn parse_expression_statement(&mut self) -> ParseResult<SyntaxNode> {
        let start = self.start();
        let starts_with_name = self.current.kind == TokenKind::Name;
        let expression = self.parse_expression(false)?;

        if starts_with_name && expression.kind == NodeKind::Identifier && self.at_punct(":") {
            self.advance();
            let label = expression.name.clone().unwrap_or_default();
            self.scope.labels.push(label);
            let body = self.parse_statement();
            self.scope.labels.pop();
            return self.build(NodeKind::LabeledStatement, start, vec![expression, body?], false);
        }

        let mut recovered = false;
        self.semicolon(&mut recovered)?;
        self.build(NodeKind::ExpressionStatement, start, vec![expression], recovered)
    }

    pub(crate) fn parse_block(&mut self) -> ParseResult<SyntaxNode> {
        let start = self.start();
        let mut recovered = false;
        self.expect_punct("{", &mut recovered)?;
        let mut body = Vec::new();
        while !self.current.is_eof() && !self.at_punct("}") {
            body.push(self.parse_statement()?);
        }
        self.expect_punct("}", &mut recovered)?;
        self.build(NodeKind::BlockStatement, start, body, recovered)
    }

    fn parse_var_statement(&mut self) -> ParseResult<SyntaxNode> {
        let start = self.start();
        let kind = self.advance().lexeme;
        let mut recovered = false;
        let declarators = self.parse_var_declarators(kind, false, &mut recovered)?;
        self.semicolon(&mut recovered)?;
        let node = SyntaxNode::new(NodeKind::VariableDeclaration, self.span_from(start), declarators)
            .with_name(kind)
            .with_recovered(recovered);
        self.finish(node)
    }

    pub(crate) fn parse_var_declarators(
        &mut self,
        kind: &str,
        in_for: bool,
        recovered: &mut bool,
    ) -> ParseResult<Vec<SyntaxNode>> {
        let mut declarators = Vec::new();
        loop {
            let start = self.start();
            let mut declarator_recovered = false;
            let id = self.parse_binding_target(&mut declarator_recovered)?;
            let needs_init = kind == "const"
                || matches!(id.kind, NodeKind::ArrayPattern | NodeKind::ObjectPattern);
            let mut children = vec![id];
            if self.eat_punct("=") {
                children.push(self.parse_maybe_assign(in_for)?);
            } else if needs_init && !(in_for && (self.at_keyword(Keyword::In) || self.at_word("of")))
            {
                self.recover("=", &mut declarator_recovered)?;
            }
            declarators.push(self.build(
                NodeKind::VariableDeclarator,
                start,
                children,
                declarator_recovered,
            )?);
            if !self.eat_punct(",") {
                break;
            }
        }
        *recovered |= declarators.iter().any(|declarator| declarator.recovered);
        Ok(declarators)
    }

    /// Requires `(` after a statement keyword that was just consumed.
    fn open_paren_after_keyword(&mut self) -> bool {
        self.eat_punct("(")
    }

    fn parse_if(&mut self) -> ParseResult<SyntaxNode> {
        let start = self.start();
        self.advance();
        if !self.open_paren_after_keyword() {
            return self.malformed_keyword(start, "(");
        }
        let mut recovered = false;
        let test = self.parse_expression(false)?;
        self.expect_punct(")", &mut recovered)?;
        let mut children = vec![test, self.parse_statement()?];
        if self.at_keyword(Keyword::Else) {
            self.advance();
            children.push(self.parse_statement()?);
        }
        self.build(NodeKind::IfStatement, start, children, recovered)
    }

    fn parse_loop_body(&mut self) -> ParseResult<SyntaxNode> {
        self.scope.loop_depth += 1;
        let body = self.parse_statement();
        self.scope.loop_depth -= 1;
        body
    }

    fn parse_while(&mut self) -> ParseResult<SyntaxNode> {
        let start = self.start();
        self.advance();
        if !self.open_paren_after_keyword() {
            return self.malformed_keyword(start, "(");
        }
        let mut recovered = false;
        let test = self.parse_expression(false)?;
        self.expect_punct(")", &mut recovered)?;
        let body = self.parse_loop_body()?;
        self.build(NodeKind::WhileStatement, start, vec![test, body], recovered)
    }

    fn parse_do_while(&mut self) -> ParseResult<SyntaxNode> {
        let start = self.start();
        self.advance();
        let mut recovered = false;
        let body = self.parse_loop_body()?;
        let mut children = vec![body];
        if self.at_keyword(Keyword::While) {
            self.advance();
            self.expect_punct("(", &mut recovered)?;
            children.push(self.parse_expression(false)?);
            self.expect_punct(")", &mut recovered)?;
            self.eat_punct(";");
        } else {
            self.recover("while", &mut recovered)?;
        }
        self.build(NodeKind::DoWhileStatement, start, children, recovered)
    }

    fn parse_for(&mut self) -> ParseResult<SyntaxNode> {
        let start = self.start();
        self.advance();
        if !self.open_paren_after_keyword() {
            return self.malformed_keyword(start, "(");
        }
        let mut recovered = false;
        let mut children = Vec::new();

        if self.at_punct(";") {
            // no init
        } else if self.at_keyword(Keyword::Var)
            || self.at_keyword(Keyword::Const)
            || (self.at_word("let") && self.let_starts_declaration())
        {
            let declaration_start = self.start();
            let kind = self.advance().lexeme;
            let mut declaration_recovered = false;
            let declarators = self.parse_var_declarators(kind, true, &mut declaration_recovered)?;
            let single = declarators.len() == 1;
            let declaration = SyntaxNode::new(
                NodeKind::VariableDeclaration,
                self.span_from(declaration_start),
                declarators,
            )
            .with_name(kind)
            .with_recovered(declaration_recovered);
            let declaration = self.finish(declaration)?;
            if single && (self.at_keyword(Keyword::In) || self.at_word("of")) {
                return self.parse_for_in_rest(start, declaration, recovered);
            }
            children.push(declaration);
        } else {
            let init = self.parse_expression(true)?;
            if self.at_keyword(Keyword::In) || self.at_word("of") {
                let left = self.to_assignable(init, false, &mut recovered)?;
                return self.parse_for_in_rest(start, left, recovered);
            }
            children.push(init);
        }

        self.expect_punct(";", &mut recovered)?;
        if !self.at_punct(";") {
            children.push(self.parse_expression(false)?);
        }
        self.expect_punct(";", &mut recovered)?;
        if !self.at_punct(")") {
            children.push(self.parse_expression(false)?);
        }
        self.expect_punct(")", &mut recovered)?;
        children.push(self.parse_loop_body()?);
        self.build(NodeKind::ForStatement, start, children, recovered)
    }

    fn parse_for_in_rest(
        &mut self,
        start: ByteOffset,
        left: SyntaxNode,
        mut recovered: bool,
    ) -> ParseResult<SyntaxNode> {
        let is_of = self.at_word("of");
        self.advance();
        let right = if is_of {
            self.parse_maybe_assign(false)?
        } else {
            self.parse_expression(false)?
        };
        self.expect_punct(")", &mut recovered)?;
        let body = self.parse_loop_body()?;
        let kind = if is_of {
            NodeKind::ForOfStatement
        } else {
            NodeKind::ForInStatement
        };
        self.build(kind, start, vec![left, right, body], recovered)
    }

    fn parse_return(&mut self) -> ParseResult<SyntaxNode> {
        let start = self.start();
        let mut recovered = false;
        if !self.scope.in_function {
            self.recover("function body", &mut recovered)?;
        }
        self.advance();
        let mut children = Vec::new();
        if !self.ends_statement() {
            children.push(self.parse_expression(false)?);
        }
        self.semicolon(&mut recovered)?;
        self.build(NodeKind::ReturnStatement, start, children, recovered)
    }

    fn ends_statement(&self) -> bool {
        self.at_punct(";")
            || self.at_punct("}")
            || self.current.is_eof()
            || self.current.newline_before
    }

    fn parse_break_continue(&mut self, is_break: bool) -> ParseResult<SyntaxNode> {
        let start = self.start();
        self.advance();
        let mut recovered = false;
        let mut children = Vec::new();
        if self.at_identifier() && !self.current.newline_before {
            let label = self.parse_identifier()?;
            let known = label
                .name
                .as_deref()
                .is_some_and(|name| self.scope.labels.iter().any(|known| known == name));
            if !known {
                self.recover("known label", &mut recovered)?;
            }
            children.push(label);
        } else {
            let legal = self.scope.loop_depth > 0 || (is_break && self.scope.switch_depth > 0);
            if !legal {
                self.recover("enclosing loop", &mut recovered)?;
            }
        }
        self.semicolon(&mut recovered)?;
        let kind = if is_break {
            NodeKind::BreakStatement
        } else {
            NodeKind::ContinueStatement
        };
        self.build(kind, start, children, recovered)
    }

    fn parse_throw(&mut self) -> ParseResult<SyntaxNode> {
        let start = self.start();
        self.advance();
        let mut recovered = false;
        if self.current.newline_before {
            self.recover("expression", &mut recovered)?;
        }
        let argument = self.parse_expression(false)?;
        self.semicolon(&mut recovered)?;
        self.build(NodeKind::ThrowStatement, start, vec![argument], recovered)
    }

    fn parse_try(&mut self) -> ParseResult<SyntaxNode> {
        let start = self.start();
        self.advance();
        if !self.at_punct("{") {
            return self.malformed_keyword(start, "{");
        }
        let mut recovered = false;
        let mut children = vec![self.parse_block()?];
        let mut has_handler = false;
        if self.at_keyword(Keyword::Catch) {
            has_handler = true;
            let catch_start = self.start();
            self.advance();
            let mut catch_recovered = false;
            let mut catch_children = Vec::new();
            self.expect_punct("(", &mut catch_recovered)?;
            catch_children.push(self.parse_binding_target(&mut catch_recovered)?);
            self.expect_punct(")", &mut catch_recovered)?;
            catch_children.push(self.parse_block()?);
            children.push(self.build(
                NodeKind::CatchClause,
                catch_start,
                catch_children,
                catch_recovered,
            )?);
        }
        if self.at_keyword(Keyword::Finally) {
            has_handler = true;
            self.advance();
            children.push(self.parse_block()?);
        }
        if !has_handler {
            self.recover("catch or finally", &mut recovered)?;
        }
        self.build(NodeKind::TryStatement, start, children, recovered)
    }

    fn parse_switch(&mut self) -> ParseResult<SyntaxNode> {
        let start = self.start();
        self.advance();
        if !self.open_paren_after_keyword() {
            return self.malformed_keyword(start, "(");
        }
        let mut recovered = false;
        let mut children = vec![self.parse_expression(false)?];
        self.expect_punct(")", &mut recovered)?;
        self.expect_punct("{", &mut recovered)?;
        self.scope.switch_depth += 1;
        let cases = self.parse_switch_cases(&mut recovered);
        self.scope.switch_depth -= 1;
        children.extend(cases?);
        self.expect_punct("}", &mut recovered)?;
        self.build(NodeKind::SwitchStatement, start, children, recovered)
    }

    fn parse_switch_cases(&mut self, recovered: &mut bool) -> ParseResult<Vec<SyntaxNode>> {
        let mut cases = Vec::new();
        loop {
            let case_start = self.start();
            let mut case_recovered = false;
            let mut consequent = Vec::new();
            let is_default = if self.at_keyword(Keyword::Case) {
                self.advance();
                consequent.push(self.parse_expression(false)?);
                false
            } else if self.at_keyword(Keyword::Default) {
                self.advance();
                true
            } else {
                if !self.at_punct("}") {
                    self.recover("case", recovered)?;
                }
                return Ok(cases);
            };
            self.expect_punct(":", &mut case_recovered)?;
            while !self.current.is_eof()
                && !self.at_punct("}")
                && !self.at_keyword(Keyword::Case)
                && !self.at_keyword(Keyword::Default)
            {
                consequent.push(self.parse_statement()?);
            }
            let mut case = SyntaxNode::new(NodeKind::SwitchCase, self.span_from(case_start), consequent)
                .with_recovered(case_recovered);
            if is_default {
                case = case.with_name("default");
            }
            cases.push(self.finish(case)?);
        }
    }

    fn parse_with(&mut self) -> ParseResult<SyntaxNode> {
        let start = self.start();
        self.advance();
        if !self.open_paren_after_keyword() {
            return self.malformed_keyword(start, "(");
        }
        let mut recovered = false;
        let object = self.parse_expression(false)?;
        self.expect_punct(")", &mut recovered)?;
        let body = self.parse_statement()?;
        self.build(NodeKind::WithStatement, start, vec![object, body], recovered)
    }

    // ------------------------------------------------------------------
    // Functions and classes
    // ------------------------------------------------------------------

    /// Parses `function` declarations and expressions starting at the keyword.
    pub(crate) fn parse_function(
        &mut self,
        start: ByteOffset,
        is_declaration: bool,
    ) -> ParseResult<SyntaxNode> {
        self.advance();
        let mut recovered = false;
        let generator = self.eat_punct("*");
        let mut children = Vec::new();
        if self.at_identifier() {
            children.push(self.parse_identifier()?);
        } else if is_declaration {
            self.recover("function name", &mut recovered)?;
        }
        children.extend(self.parse_function_rest(generator, &mut recovered)?);
        let kind = if is_declaration {
            NodeKind::FunctionDeclaration
        } else {
            NodeKind::FunctionExpression
        };
        self.build(kind, start, children, recovered)
    }

    /// Parses `(params) { body }` and returns params followed by the body.
    pub(crate) fn parse_function_rest(
        &mut self,
        generator: bool,
        recovered: &mut bool,
    ) -> ParseResult<Vec<SyntaxNode>> {
        let mut children = Vec::new();
        if self.at_punct("(") {
            children.extend(self.parse_params(recovered)?);
        } else {
            self.recover("(", recovered)?;
        }
        if self.at_punct("{") {
            children.push(self.with_function_scope(generator, |parser| parser.parse_block())?);
        } else {
            self.recover("{", recovered)?;
            children.push(self.placeholder()?);
        }
        Ok(children)
    }

    /// Parses a method value: a function expression starting at `(`.
    pub(crate) fn parse_method(&mut self, generator: bool) -> ParseResult<SyntaxNode> {
        let start = self.start();
        let mut recovered = false;
        let children = self.parse_function_rest(generator, &mut recovered)?;
        self.build(NodeKind::FunctionExpression, start, children, recovered)
    }

    pub(crate) fn parse_class(&mut self, is_declaration: bool) -> ParseResult<SyntaxNode> {
        let start = self.start();
        self.advance();
        let mut recovered = false;
        let mut children = Vec::new();
        if self.at_identifier() {
            children.push(self.parse_identifier()?);
        } else if is_declaration {
            self.recover("class name", &mut recovered)?;
        }
        if self.at_keyword(Keyword::Extends) {
            self.advance();
            children.push(self.parse_expr_subscripts()?);
        }

        let body_start = self.start();
        let mut body_recovered = false;
        let mut methods = Vec::new();
        if self.eat_punct("{") {
            while !self.current.is_eof() && !self.at_punct("}") {
                if self.eat_punct(";") {
                    continue;
                }
                let before = self.start();
                methods.push(self.parse_class_method(&mut body_recovered)?);
                if self.start() == before {
                    break;
                }
            }
            self.expect_punct("}", &mut body_recovered)?;
        } else {
            self.recover("{", &mut body_recovered)?;
        }
        children.push(self.build(NodeKind::ClassBody, body_start, methods, body_recovered)?);

        let kind = if is_declaration {
            NodeKind::ClassDeclaration
        } else {
            NodeKind::ClassExpression
        };
        self.build(kind, start, children, recovered)
    }

    fn parse_class_method(&mut self, recovered: &mut bool) -> ParseResult<SyntaxNode> {
        let start = self.start();
        let mut method_recovered = false;
        let mut generator = self.eat_punct("*");
        let (mut key, mut computed) = self.parse_property_name(&mut method_recovered)?;

        if !generator && !computed && key.is_identifier("static") && !self.at_punct("(") {
            generator = self.eat_punct("*");
            (key, computed) = self.parse_property_name(&mut method_recovered)?;
        }
        let accessor = !generator
            && !computed
            && (key.is_identifier("get") || key.is_identifier("set"))
            && !self.at_punct("(");
        if accessor {
            (key, computed) = self.parse_property_name(&mut method_recovered)?;
        }

        let value = self.parse_method(generator)?;
        let node = SyntaxNode::new(NodeKind::MethodDefinition, self.span_from(start), vec![key, value])
            .with_computed(computed)
            .with_recovered(method_recovered);
        let node = self.finish(node)?;
        *recovered |= node.recovered;
        Ok(node)
    }

    // ------------------------------------------------------------------
    // Modules
    // ------------------------------------------------------------------

    fn parse_import(&mut self) -> ParseResult<SyntaxNode> {
        let start = self.start();
        self.advance();
        let opens_clause = self.current.kind == TokenKind::String
            || self.at_identifier()
            || self.at_punct("*")
            || self.at_punct("{");
        if !opens_clause {
            return self.malformed_keyword(start, "import clause");
        }

        let mut recovered = false;
        let mut children = Vec::new();
        if self.current.kind != TokenKind::String {
            if self.at_identifier() {
                let local_start = self.start();
                let local = self.parse_identifier()?;
                children.push(self.build(
                    NodeKind::ImportDefaultSpecifier,
                    local_start,
                    vec![local],
                    false,
                )?);
                if self.eat_punct(",") && !(self.at_punct("*") || self.at_punct("{")) {
                    self.recover("import specifiers", &mut recovered)?;
                }
            }
            if self.at_punct("*") {
                let namespace_start = self.start();
                self.advance();
                let mut namespace_recovered = false;
                if self.at_word("as") {
                    self.advance();
                } else {
                    self.recover("as", &mut namespace_recovered)?;
                }
                let local = self.parse_binding_identifier(&mut namespace_recovered)?;
                children.push(self.build(
                    NodeKind::ImportNamespaceSpecifier,
                    namespace_start,
                    vec![local],
                    namespace_recovered,
                )?);
            } else if self.at_punct("{") {
                children.extend(self.parse_module_specifiers(
                    NodeKind::ImportSpecifier,
                    &mut recovered,
                )?);
            }
            if self.at_word("from") {
                self.advance();
            } else {
                self.recover("from", &mut recovered)?;
            }
        }
        children.push(self.parse_module_source(&mut recovered)?);
        self.semicolon(&mut recovered)?;
        self.build(NodeKind::ImportDeclaration, start, children, recovered)
    }

    fn parse_module_source(&mut self, recovered: &mut bool) -> ParseResult<SyntaxNode> {
        if self.current.kind == TokenKind::String {
            let token = self.advance();
            return self.finish(SyntaxNode::new(
                NodeKind::Literal(LiteralKind::String),
                token.span,
                Vec::new(),
            ));
        }
        self.recover("module source", recovered)?;
        self.placeholder()
    }

    /// Parses `{ a, b as c }` for imports and exports.
    fn parse_module_specifiers(
        &mut self,
        kind: NodeKind,
        recovered: &mut bool,
    ) -> ParseResult<Vec<SyntaxNode>> {
        self.advance();
        let mut specifiers = Vec::new();
        while !self.at_punct("}") {
            if self.current.kind != TokenKind::Name {
                self.recover("specifier", recovered)?;
                break;
            }
            let start = self.start();
            let mut children = vec![self.parse_identifier()?];
            if self.at_word("as") {
                self.advance();
                if self.current.kind == TokenKind::Name {
                    children.push(self.parse_identifier()?);
                } else {
                    self.recover("specifier name", recovered)?;
                }
            }
            specifiers.push(self.build(kind, start, children, false)?);
            if !self.eat_punct(",") {
                break;
            }
        }
        self.expect_punct("}", recovered)?;
        Ok(specifiers)
    }

    fn parse_export(&mut self) -> ParseResult<SyntaxNode> {
        let start = self.start();
        self.advance();
        let mut recovered = false;

        if self.at_punct("*") {
            self.advance();
            if self.at_word("from") {
                self.advance();
            } else {
                self.recover("from", &mut recovered)?;
            }
            let source = self.parse_module_source(&mut recovered)?;
            self.semicolon(&mut recovered)?;
            return self.build(NodeKind::ExportAllDeclaration, start, vec![source], recovered);
        }

        if self.at_keyword(Keyword::Default) {
            self.advance();
            let declaration = if self.at_keyword(Keyword::Function) {
                let function_start = self.start();
                self.parse_function(function_start, false)?
            } else if self.at_keyword(Keyword::Class) {
                self.parse_class(false)?
            } else {
                let expression = self.parse_maybe_assign(false)?;
                self.semicolon(&mut recovered)?;
                expression
            };
            return self.build(
                NodeKind::ExportDefaultDeclaration,
                start,
                vec![declaration],
                recovered,
            );
        }

        let declares = self.at_keyword(Keyword::Var)
            || self.at_keyword(Keyword::Const)
            || self.at_keyword(Keyword::Function)
            || self.at_keyword(Keyword::Class)
            || (self.at_word("let") && self.let_starts_declaration());
        if declares {
            let declaration = self.parse_statement()?;
            return self.build(
                NodeKind::ExportNamedDeclaration,
                start,
                vec![declaration],
                recovered,
            );
        }

        if self.at_punct("{") {
            let mut children =
                self.parse_module_specifiers(NodeKind::ExportSpecifier, &mut recovered)?;
            if self.at_word("from") {
                self.advance();
                children.push(self.parse_module_source(&mut recovered)?);
            }
            self.semicolon(&mut recovered)?;
            return self.build(NodeKind::ExportNamedDeclaration, start, children, recovered);
        }

        self.malformed_keyword(start, "export clause")
    }
}
