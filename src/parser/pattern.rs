//! Binding patterns and assignment targets.

use crate::parser::ast::{NodeKind, SyntaxNode};
use crate::parser::error::ParseError;
use crate::parser::parser::{ParseResult, Parser};

impl Parser<'_, '_> {
    /// Parses a binding identifier or destructuring pattern.
    pub(crate) fn parse_binding_target(&mut self, recovered: &mut bool) -> ParseResult<SyntaxNode> {
        if self.at_punct("[") {
            return self.parse_array_pattern();
        }
        if self.at_punct("{") {
            return self.parse_object_pattern();
        }
        self.parse_binding_identifier(recovered)
    }

    pub(crate) fn parse_binding_identifier(
        &mut self,
        recovered: &mut bool,
    ) -> ParseResult<SyntaxNode> {
        if self.at_identifier() {
            return self.parse_identifier();
        }
        self.recover("identifier", recovered)?;
        self.placeholder()
    }

    /// Parses a binding target with an optional `= default`.
    fn parse_binding_element(&mut self, recovered: &mut bool) -> ParseResult<SyntaxNode> {
        let start = self.start();
        let target = self.parse_binding_target(recovered)?;
        if !self.eat_punct("=") {
            return Ok(target);
        }
        let default = self.parse_maybe_assign(false)?;
        self.build(NodeKind::AssignmentPattern, start, vec![target, default], false)
    }

    /// Parses `...target` in parameter lists and array patterns.
    pub(crate) fn parse_rest_binding(&mut self, recovered: &mut bool) -> ParseResult<SyntaxNode> {
        let start = self.start();
        self.advance();
        let target = self.parse_binding_target(recovered)?;
        self.build(NodeKind::RestElement, start, vec![target], false)
    }

    /// Parses a formal parameter list starting at `(`.
    pub(crate) fn parse_params(&mut self, recovered: &mut bool) -> ParseResult<Vec<SyntaxNode>> {
        self.advance();
        let mut params = Vec::new();
        while !self.at_punct(")") && !self.current.is_eof() {
            if self.at_punct("...") {
                params.push(self.parse_rest_binding(recovered)?);
                break;
            }
            let before = self.start();
            params.push(self.parse_binding_element(recovered)?);
            if self.at_punct(")") {
                break;
            }
            if !self.eat_punct(",") || self.start() == before {
                self.recover(")", recovered)?;
                break;
            }
        }
        self.expect_punct(")", recovered)?;
        Ok(params)
    }

    fn parse_array_pattern(&mut self) -> ParseResult<SyntaxNode> {
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
                elements.push(self.parse_rest_binding(&mut recovered)?);
                break;
            }
            elements.push(self.parse_binding_element(&mut recovered)?);
            if self.at_punct("]") {
                break;
            }
            if !self.eat_punct(",") {
                self.recover("]", &mut recovered)?;
                break;
            }
        }
        self.expect_punct("]", &mut recovered)?;
        self.build(NodeKind::ArrayPattern, start, elements, recovered)
    }

    fn parse_object_pattern(&mut self) -> ParseResult<SyntaxNode> {
        let start = self.start();
        self.advance();
        let mut recovered = false;
        let mut properties = Vec::new();
        loop {
            if self.at_punct("}") || self.current.is_eof() {
                break;
            }
            let property_start = self.start();
            let mut property_recovered = false;
            let (key, computed) = self.parse_property_name(&mut property_recovered)?;
            let value = if self.eat_punct(":") {
                self.parse_binding_element(&mut property_recovered)?
            } else if !computed && key.kind == NodeKind::Identifier {
                if self.eat_punct("=") {
                    let default = self.parse_maybe_assign(false)?;
                    self.build(
                        NodeKind::AssignmentPattern,
                        property_start,
                        vec![key.clone(), default],
                        false,
                    )?
                } else {
                    key.clone()
                }
            } else {
                self.recover(":", &mut property_recovered)?;
                self.placeholder()?
            };
            let property = SyntaxNode::new(
                NodeKind::Property,
                self.span_from(property_start),
                vec![key, value],
            )
            .with_computed(computed)
            .with_recovered(property_recovered);
            properties.push(self.finish(property)?);
            if self.at_punct("}") {
                break;
            }
            if !self.eat_punct(",") {
                self.recover("}", &mut recovered)?;
                break;
            }
        }
        self.expect_punct("}", &mut recovered)?;
        self.build(NodeKind::ObjectPattern, start, properties, recovered)
    }

    /// Reinterprets an already-parsed expression as an assignment target.
    ///
    /// Converted nodes change kind in place and are not reported to the
    /// visitor again. With `binding` set, member access is rejected too, as
    /// in arrow parameters.
    pub(crate) fn to_assignable(
        &self,
        mut node: SyntaxNode,
        binding: bool,
        recovered: &mut bool,
    ) -> ParseResult<SyntaxNode> {
        match node.kind {
            NodeKind::Identifier
            | NodeKind::ArrayPattern
            | NodeKind::ObjectPattern
            | NodeKind::AssignmentPattern
            | NodeKind::RestElement => Ok(node),
            NodeKind::MemberExpression if !binding => Ok(node),
            NodeKind::Placeholder => {
                *recovered = true;
                Ok(node)
            }
            NodeKind::ObjectExpression => {
                node.kind = NodeKind::ObjectPattern;
                for property in &mut node.children {
                    let method = property
                        .children
                        .get(1)
                        .is_some_and(|value| value.kind == NodeKind::FunctionExpression);
                    if property.kind != NodeKind::Property || method {
                        self.invalid_target(property, recovered)?;
                        continue;
                    }
                    if let Some(value) = property.children.pop() {
                        let value = self.to_assignable(value, binding, recovered)?;
                        property.children.push(value);
                    }
                }
                Ok(node)
            }
            NodeKind::ArrayExpression => {
                node.kind = NodeKind::ArrayPattern;
                let elements = std::mem::take(&mut node.children);
                let last = elements.len().saturating_sub(1);
                for (index, mut element) in elements.into_iter().enumerate() {
                    if element.kind == NodeKind::SpreadElement {
                        if index != last {
                            self.invalid_target(&element, recovered)?;
                        }
                        element.kind = NodeKind::RestElement;
                        if let Some(argument) = element.children.pop() {
                            let argument = self.to_assignable(argument, binding, recovered)?;
                            element.children.push(argument);
                        }
                        node.children.push(element);
                    } else {
                        node.children.push(self.to_assignable(element, binding, recovered)?);
                    }
                }
                Ok(node)
            }
            NodeKind::AssignmentExpression if node.operator.as_deref() == Some("=") => {
                node.kind = NodeKind::AssignmentPattern;
                node.operator = None;
                if binding
                    && let Some(left) = node.children.first()
                    && left.kind == NodeKind::MemberExpression
                {
                    self.invalid_target(left, recovered)?;
                }
                Ok(node)
            }
            _ => {
                self.invalid_target(&node, recovered)?;
                Ok(node)
            }
        }
    }

    /// Targets of compound assignment and `++`/`--`.
    pub(crate) fn check_simple_target(
        &self,
        node: SyntaxNode,
        recovered: &mut bool,
    ) -> ParseResult<SyntaxNode> {
        match node.kind {
            NodeKind::Identifier | NodeKind::MemberExpression => Ok(node),
            _ => {
                self.invalid_target(&node, recovered)?;
                Ok(node)
            }
        }
    }

    fn invalid_target(&self, node: &SyntaxNode, recovered: &mut bool) -> ParseResult<()> {
        if self.is_loose() {
            *recovered = true;
            Ok(())
        } else {
            Err(ParseError::invalid_target(node.span))
        }
    }
}
