//! Expressions.

use crate::lexer::{
    ByteOffset, Span, TemplateEnd, TokenKind, binary_precedence, is_assignment_operator,
};
use crate::parser::ast::{LiteralKind, NodeKind, SyntaxNode};
use crate::parser::keyword::Keyword;
use crate::parser::parser::{ParseResult, Parser};

impl Parser<'_, '_> {
    /// Parses a comma-separated expression.
    pub(crate) fn parse_expression(&mut self, no_in: bool) -> ParseResult<SyntaxNode> {
        let start = self.start();
        let first = self.parse_maybe_assign(no_in)?;
        if !self.at_punct(",") {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.eat_punct(",") {
            expressions.push(self.parse_maybe_assign(no_in)?);
        }
        self.build(NodeKind::SequenceExpression, start, expressions, false)
    }

    /// Parses an assignment-level expression.
    pub(crate) fn parse_maybe_assign(&mut self, no_in: bool) -> ParseResult<SyntaxNode> {
        if self.scope.in_generator && self.at_word("yield") {
            return self.parse_yield(no_in);
        }
        self.enter()?;
        let result = self.parse_maybe_assign_inner(no_in);
        self.leave();
        result
    }

    fn parse_maybe_assign_inner(&mut self, no_in: bool) -> ParseResult<SyntaxNode> {
        let start = self.start();
        let left = self.parse_maybe_conditional(no_in)?;
        let token = self.current;
        if token.kind != TokenKind::Punctuator || !is_assignment_operator(token.lexeme) {
            return Ok(left);
        }

        let mut recovered = false;
        let target = if token.lexeme == "=" {
            self.to_assignable(left, false, &mut recovered)?
        } else {
            self.check_simple_target(left, &mut recovered)?
        };
        self.advance();
        let value = self.parse_maybe_assign(no_in)?;
        let node = SyntaxNode::new(
            NodeKind::AssignmentExpression,
            self.span_from(start),
            vec![target, value],
        )
        .with_operator(token.lexeme)
        .with_recovered(recovered);
        self.finish(node)
    }

    fn parse_maybe_conditional(&mut self, no_in: bool) -> ParseResult<SyntaxNode> {
        let start = self.start();
        let test = self.parse_expr_ops(no_in)?;
        if !self.eat_punct("?") {
            return Ok(test);
        }
        let mut recovered = false;
        let consequent = self.parse_maybe_assign(false)?;
        self.expect_punct(":", &mut recovered)?;
        let alternate = self.parse_maybe_assign(no_in)?;
        self.build(
            NodeKind::ConditionalExpression,
            start,
            vec![test, consequent, alternate],
            recovered,
        )
    }

    fn parse_expr_ops(&mut self, no_in: bool) -> ParseResult<SyntaxNode> {
        let start = self.start();
        let operand = self.parse_maybe_unary()?;
        if operand.kind == NodeKind::ArrowFunctionExpression && operand.span.start == start {
            return Ok(operand);
        }
        self.parse_expr_op(operand, start, 0, no_in)
    }

    fn binary_operator(&self, no_in: bool) -> Option<u8> {
        let token = &self.current;
        match token.kind {
            TokenKind::Punctuator => binary_precedence(token.lexeme),
            TokenKind::Name if token.escaped => None,
            TokenKind::Name if token.lexeme == "in" && no_in => None,
            TokenKind::Name => binary_precedence(token.lexeme),
            _ => None,
        }
    }

    /// Precedence climbing over binary and logical operators.
    fn parse_expr_op(
        &mut self,
        mut left: SyntaxNode,
        left_start: ByteOffset,
        min_precedence: u8,
        no_in: bool,
    ) -> ParseResult<SyntaxNode> {
        loop {
            let Some(precedence) = self.binary_operator(no_in) else {
                return Ok(left);
            };
            if precedence <= min_precedence {
                return Ok(left);
            }
            let operator = self.advance().lexeme;
            let right_start = self.start();
            let operand = self.parse_maybe_unary()?;
            let right = self.parse_expr_op(operand, right_start, precedence, no_in)?;
            let kind = if operator == "||" || operator == "&&" {
                NodeKind::LogicalExpression
            } else {
                NodeKind::BinaryExpression
            };
            let node = SyntaxNode::new(kind, self.span_from(left_start), vec![left, right])
                .with_operator(operator);
            left = self.finish(node)?;
        }
    }

    fn parse_maybe_unary(&mut self) -> ParseResult<SyntaxNode> {
        self.enter()?;
        let result = self.parse_maybe_unary_inner();
        self.leave();
        result
    }

    fn parse_maybe_unary_inner(&mut self) -> ParseResult<SyntaxNode> {
        let start = self.start();
        let token = self.current;

        if token.is_punct("++") || token.is_punct("--") {
            self.advance();
            let mut recovered = false;
            let argument = self.parse_maybe_unary()?;
            let argument = self.check_simple_target(argument, &mut recovered)?;
            let node = SyntaxNode::new(NodeKind::UpdateExpression, self.span_from(start), vec![argument])
                .with_operator(token.lexeme)
                .with_recovered(recovered);
            return self.finish(node);
        }

        let prefix = match token.kind {
            TokenKind::Punctuator => matches!(token.lexeme, "!" | "~" | "+" | "-"),
            TokenKind::Name => matches!(
                Keyword::of(&token),
                Some(Keyword::Typeof | Keyword::Void | Keyword::Delete)
            ),
            _ => false,
        };
        if prefix {
            self.advance();
            let argument = self.parse_maybe_unary()?;
            let node = SyntaxNode::new(NodeKind::UnaryExpression, self.span_from(start), vec![argument])
                .with_operator(token.lexeme);
            return self.finish(node);
        }

        let expression = self.parse_expr_subscripts()?;
        let postfix = self.at_punct("++") || self.at_punct("--");
        if !postfix || self.current.newline_before {
            return Ok(expression);
        }
        let mut recovered = false;
        let argument = self.check_simple_target(expression, &mut recovered)?;
        let operator = self.advance().lexeme;
        let node = SyntaxNode::new(NodeKind::UpdateExpression, self.span_from(start), vec![argument])
            .with_operator(operator)
            .with_recovered(recovered);
        self.finish(node)
    }

    pub(crate) fn parse_expr_subscripts(&mut self) -> ParseResult<SyntaxNode> {
        let start = self.start();
        let atom = self.parse_expr_atom()?;
        if atom.kind == NodeKind::ArrowFunctionExpression && atom.span.start == start {
            return Ok(atom);
        }
        self.parse_subscripts(atom, start, false)
    }

    fn parse_subscripts(
        &mut self,
        mut base: SyntaxNode,
        start: ByteOffset,
        no_calls: bool,
    ) -> ParseResult<SyntaxNode> {
        loop {
            if self.eat_punct(".") {
                let mut recovered = false;
                let property = if self.current.kind == TokenKind::Name {
                    self.parse_identifier()?
                } else {
                    self.recover("property name", &mut recovered)?;
                    self.placeholder()?
                };
                let node = SyntaxNode::new(
                    NodeKind::MemberExpression,
                    self.span_from(start),
                    vec![base, property],
                )
                .with_recovered(recovered);
                base = self.finish(node)?;
            } else if self.eat_punct("[") {
                let mut recovered = false;
                let property = self.parse_expression(false)?;
                self.expect_punct("]", &mut recovered)?;
                let node = SyntaxNode::new(
                    NodeKind::MemberExpression,
                    self.span_from(start),
                    vec![base, property],
                )
                .with_computed(true)
                .with_recovered(recovered);
                base = self.finish(node)?;
            } else if !no_calls && self.at_punct("(") {
                let mut recovered = false;
                let mut children = vec![base];
                children.extend(self.parse_arguments(&mut recovered)?);
                base = self.build(NodeKind::CallExpression, start, children, recovered)?;
            } else if matches!(self.current.kind, TokenKind::Template(_)) {
                let quasi = self.parse_template()?;
                base = self.build(
                    NodeKind::TaggedTemplateExpression,
                    start,
                    vec![base, quasi],
                    false,
                )?;
            } else {
                return Ok(base);
            }
        }
    }

    /// Parses `(a, ...b)` call arguments.
    fn parse_arguments(&mut self, recovered: &mut bool) -> ParseResult<Vec<SyntaxNode>> {
        self.advance();
        let mut arguments = Vec::new();
        let mut first = true;
        while !self.at_punct(")") {
            if !first {
                if !self.eat_punct(",") {
                    self.recover(")", recovered)?;
                    break;
                }
                if self.at_punct(")") {
                    self.recover("argument", recovered)?;
                    break;
                }
            }
            first = false;
            if self.at_punct("...") {
                arguments.push(self.parse_spread()?);
            } else {
                arguments.push(self.parse_maybe_assign(false)?);
            }
            if self.current.is_eof() {
                break;
            }
        }
        self.expect_punct(")", recovered)?;
        Ok(arguments)
    }

    fn parse_spread(&mut self) -> ParseResult<SyntaxNode> {
        let start = self.start();
        self.advance();
        let argument = self.parse_maybe_assign(false)?;
        self.build(NodeKind::SpreadElement, start, vec![argument], false)
    }

    fn parse_expr_atom(&mut self) -> ParseResult<SyntaxNode> {
        let token = self.current;
        let start = token.span.start;
        match token.kind {
            TokenKind::Name => match Keyword::of(&token) {
                Some(Keyword::This) => self.parse_leaf(NodeKind::ThisExpression),
                Some(Keyword::Super) => self.parse_leaf(NodeKind::Super),
                Some(Keyword::Null) => self.parse_leaf(NodeKind::Literal(LiteralKind::Null)),
                Some(Keyword::True | Keyword::False) => {
                    self.parse_leaf(NodeKind::Literal(LiteralKind::Boolean))
                }
                Some(Keyword::Function) => self.parse_function(start, false),
                Some(Keyword::Class) => self.parse_class(false),
                Some(Keyword::New) => self.parse_new(),
                Some(_) => self.missing_operand(),
                None => {
                    let identifier = self.parse_identifier()?;
                    if self.at_punct("=>") && !self.current.newline_before {
                        return self.parse_arrow(start, vec![identifier], false);
                    }
                    Ok(identifier)
                }
            },
            TokenKind::Number => self.parse_leaf(NodeKind::Literal(LiteralKind::Number)),
            TokenKind::String => self.parse_leaf(NodeKind::Literal(LiteralKind::String)),
            TokenKind::Regex => self.parse_leaf(NodeKind::Literal(LiteralKind::Regex)),
            TokenKind::Template(_) => self.parse_template(),
            TokenKind::Punctuator => match token.lexeme {
                "(" => self.parse_paren_and_distinguish(),
                "[" => self.parse_array(),
                "{" => self.parse_object(),
                "/" | "/=" => {
                    self.current = self.lexer.rescan_regex(token);
                    if self.current.kind == TokenKind::Regex {
                        return self.parse_leaf(NodeKind::Literal(LiteralKind::Regex));
                    }
                    let mut recovered = false;
                    self.recover("regular expression", &mut recovered)?;
                    self.skip_invalid()
                }
                _ => self.missing_operand(),
            },
            TokenKind::Invalid | TokenKind::Eof => self.missing_operand(),
        }
    }

    /// Consumes the current token as a childless node.
    fn parse_leaf(&mut self, kind: NodeKind) -> ParseResult<SyntaxNode> {
        let token = self.advance();
        self.finish(SyntaxNode::new(kind, token.span, Vec::new()))
    }

    fn parse_new(&mut self) -> ParseResult<SyntaxNode> {
        self.enter()?;
        let result = self.parse_new_inner();
        self.leave();
        result
    }

    fn parse_new_inner(&mut self) -> ParseResult<SyntaxNode> {
        let start = self.start();
        self.advance();
        let mut recovered = false;

        if self.eat_punct(".") {
            if self.at_word("target") {
                self.advance();
                if !self.scope.in_function {
                    self.recover("function body", &mut recovered)?;
                }
            } else {
                self.recover("target", &mut recovered)?;
            }
            let node = SyntaxNode::new(NodeKind::MetaProperty, self.span_from(start), Vec::new())
                .with_name("new.target")
                .with_recovered(recovered);
            return self.finish(node);
        }

        let callee_start = self.start();
        let callee = self.parse_expr_atom()?;
        let callee = self.parse_subscripts(callee, callee_start, true)?;
        let mut children = vec![callee];
        if self.at_punct("(") {
            children.extend(self.parse_arguments(&mut recovered)?);
        }
        self.build(NodeKind::NewExpression, start, children, recovered)
    }

    fn parse_yield(&mut self, no_in: bool) -> ParseResult<SyntaxNode> {
        let start = self.start();
        self.advance();
        let mut children = Vec::new();
        let mut delegate = false;
        if !self.current.newline_before {
            if self.eat_punct("*") {
                delegate = true;
                children.push(self.parse_maybe_assign(no_in)?);
            } else if self.can_start_expression() {
                children.push(self.parse_maybe_assign(no_in)?);
            }
        }
        let mut node = SyntaxNode::new(NodeKind::YieldExpression, self.span_from(start), children);
        if delegate {
            node = node.with_operator("*");
        }
        self.finish(node)
    }

    /// Parses a template literal whose first chunk is the current token.
    pub(crate) fn parse_template(&mut self) -> ParseResult<SyntaxNode> {
        let start = self.start();
        let mut recovered = false;
        let mut children = Vec::new();
        loop {
            let chunk = self.current;
            let TokenKind::Template(end) = chunk.kind else {
                self.recover("template", &mut recovered)?;
                break;
            };
            self.advance();
            children.push(self.finish(SyntaxNode::new(
                NodeKind::TemplateElement,
                chunk.span,
                Vec::new(),
            ))?);
            match end {
                TemplateEnd::Tail => break,
                TemplateEnd::Unterminated => {
                    self.recover("`", &mut recovered)?;
                    break;
                }
                TemplateEnd::Substitution => {
                    children.push(self.parse_expression(false)?);
                    if !self.at_punct("}") {
                        self.recover("}", &mut recovered)?;
                        break;
                    }
                    self.current = self.lexer.rescan_template_continuation(self.current);
                }
            }
        }
        self.build(NodeKind::TemplateLiteral, start, children, recovered)
    }

    /// Parses `( … )`, which is either a parenthesized expression or the
    /// parameter list of an arrow function.
    fn parse_paren_and_distinguish(&mut self) -> ParseResult<SyntaxNode> {
        let start = self.start();
        self.advance();
        let inner_start = self.start();
        let mut recovered = false;
        let mut items = Vec::new();
        let mut has_rest = false;
        let mut first = true;

        while !self.at_punct(")") {
            if !first {
                if !self.eat_punct(",") {
                    self.recover(")", &mut recovered)?;
                    break;
                }
                if self.at_punct(")") {
                    self.recover("expression", &mut recovered)?;
                    break;
                }
            }
            first = false;
            if self.at_punct("...") {
                has_rest = true;
                items.push(self.parse_rest_binding(&mut recovered)?);
            } else {
                items.push(self.parse_maybe_assign(false)?);
            }
            if self.current.is_eof() {
                break;
            }
        }
        let inner_end = self.prev_end;
        self.expect_punct(")", &mut recovered)?;

        if self.at_punct("=>") && !self.current.newline_before {
            let mut params = Vec::with_capacity(items.len());
            for item in items {
                params.push(self.to_assignable(item, true, &mut recovered)?);
            }
            return self.parse_arrow(start, params, recovered);
        }

        if items.is_empty() || has_rest {
            self.recover("=>", &mut recovered)?;
        }
        let mut expression = match items.len() {
            0 => self.placeholder()?,
            1 => items.remove(0),
            _ => {
                let span = Span::new(inner_start, inner_end);
                self.finish(SyntaxNode::new(NodeKind::SequenceExpression, span, items))?
            }
        };
        expression.recovered |= recovered;
        Ok(expression)
    }

    /// Parses `=> body` after the parameters were parsed.
    pub(crate) fn parse_arrow(
        &mut self,
        start: ByteOffset,
        mut params: Vec<SyntaxNode>,
        recovered: bool,
    ) -> ParseResult<SyntaxNode> {
        self.advance();
        let body = self.with_function_scope(false, |parser| {
            if parser.at_punct("{") {
                parser.parse_block()
            } else {
                parser.parse_maybe_assign(false)
            }
        })?;
        params.push(body);
        self.build(NodeKind::ArrowFunctionExpression, start, params, recovered)
    }

    fn parse_array(&mut self) -> ParseResult<SyntaxNode> {
        let start = self.start();
        self.advance();
        let mut recovered = false;
        let mut elements = Vec::new();
        loop {
            if self.at_punct("]") || self.current.is_eof() {
                break;
            }
            if self.eat_punct(",") {
                continue;
            }
            if self.at_punct("...") {
                elements.push(self.parse_spread()?);
            } else {
                elements.push(self.parse_maybe_assign(false)?);
            }
            if self.at_punct("]") {
                break;
            }
            if !self.eat_punct(",") {
                self.recover("]", &mut recovered)?;
                break;
            }
        }
        self.expect_punct("]", &mut recovered)?;
        self.build(NodeKind::ArrayExpression, start, elements, recovered)
    }

    fn parse_object(&mut self) -> ParseResult<SyntaxNode> {
        let start = self.start();
        self.advance();
        let mut recovered = false;
        let mut properties = Vec::new();
        loop {
            if self.at_punct("}") || self.current.is_eof() {
                break;
            }
            properties.push(self.parse_property()?);
            if self.at_punct("}") {
                break;
            }
            if !self.eat_punct(",") {
                self.recover("}", &mut recovered)?;
                break;
            }
        }
        self.expect_punct("}", &mut recovered)?;
        self.build(NodeKind::ObjectExpression, start, properties, recovered)
    }

    fn parse_property(&mut self) -> ParseResult<SyntaxNode> {
        let start = self.start();
        let mut recovered = false;

        if self.eat_punct("*") {
            let (key, computed) = self.parse_property_name(&mut recovered)?;
            let value = self.parse_method(true)?;
            return self.finish_property(start, key, value, computed, recovered);
        }

        let (key, computed) = self.parse_property_name(&mut recovered)?;
        let accessor = !computed
            && (key.is_identifier("get") || key.is_identifier("set"))
            && !(self.at_punct(",")
                || self.at_punct(":")
                || self.at_punct("(")
                || self.at_punct("}")
                || self.at_punct("="));
        if accessor {
            let (key, computed) = self.parse_property_name(&mut recovered)?;
            let value = self.parse_method(false)?;
            return self.finish_property(start, key, value, computed, recovered);
        }

        if self.eat_punct(":") {
            let value = self.parse_maybe_assign(false)?;
            return self.finish_property(start, key, value, computed, recovered);
        }
        if self.at_punct("(") {
            let value = self.parse_method(false)?;
            return self.finish_property(start, key, value, computed, recovered);
        }
        if !computed && key.kind == NodeKind::Identifier {
            if self.eat_punct("=") {
                let default = self.parse_maybe_assign(false)?;
                let value = self.build(
                    NodeKind::AssignmentPattern,
                    start,
                    vec![key.clone(), default],
                    false,
                )?;
                return self.finish_property(start, key, value, false, recovered);
            }
            let value = key.clone();
            return self.finish_property(start, key, value, false, recovered);
        }

        self.recover(":", &mut recovered)?;
        let value = self.placeholder()?;
        self.finish_property(start, key, value, computed, recovered)
    }

    fn finish_property(
        &mut self,
        start: ByteOffset,
        key: SyntaxNode,
        value: SyntaxNode,
        computed: bool,
        recovered: bool,
    ) -> ParseResult<SyntaxNode> {
        let node = SyntaxNode::new(NodeKind::Property, self.span_from(start), vec![key, value])
            .with_computed(computed)
            .with_recovered(recovered);
        self.finish(node)
    }

    /// Parses an object or class member key. Returns the key and whether it
    /// was computed.
    pub(crate) fn parse_property_name(
        &mut self,
        recovered: &mut bool,
    ) -> ParseResult<(SyntaxNode, bool)> {
        match self.current.kind {
            TokenKind::Punctuator if self.at_punct("[") => {
                self.advance();
                let key = self.parse_maybe_assign(false)?;
                self.expect_punct("]", recovered)?;
                Ok((key, true))
            }
            TokenKind::String => Ok((self.parse_leaf(NodeKind::Literal(LiteralKind::String))?, false)),
            TokenKind::Number => Ok((self.parse_leaf(NodeKind::Literal(LiteralKind::Number))?, false)),
            TokenKind::Name => Ok((self.parse_identifier()?, false)),
            _ => {
                self.recover("property name", recovered)?;
                Ok((self.placeholder()?, false))
            }
        }
    }
}
