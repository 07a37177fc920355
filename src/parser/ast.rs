//! Syntax tree produced by one parse attempt.
//!
//! Nodes use ESTree kind names so detections read the same as in other
//! ECMAScript tooling. Every node owns its children; the layout of
//! `children` for each kind is documented on [`NodeKind`].

use std::fmt;

use crate::lexer::Span;

/// Literal categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    /// `'…'` or `"…"`
    String,
    /// Numeric literal.
    Number,
    /// `/…/flags`
    Regex,
    /// `true` or `false`
    Boolean,
    /// `null`
    Null,
}

/// Construct kinds.
///
/// Child layout is positional: `[left, right]` for binary-like kinds,
/// `[object, property]` for member access, `[callee, arguments…]` for calls,
/// `[argument]` for unary-like kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    ExpressionStatement,
    BlockStatement,
    EmptyStatement,
    DebuggerStatement,
    /// `[object, body]`
    WithStatement,
    ReturnStatement,
    /// `[label, body]`
    LabeledStatement,
    BreakStatement,
    ContinueStatement,
    /// `[test, consequent, alternate?]`
    IfStatement,
    /// `[discriminant, cases…]`
    SwitchStatement,
    /// `[test?, consequent…]`; `name` holds `default` for the default case.
    SwitchCase,
    ThrowStatement,
    TryStatement,
    /// `[param?, body]`
    CatchClause,
    WhileStatement,
    DoWhileStatement,
    ForStatement,
    /// `[left, right, body]`
    ForInStatement,
    /// `[left, right, body]`
    ForOfStatement,
    /// `[id?, params…, body]`
    FunctionDeclaration,
    /// `[declarators…]`; `name` holds `var`, `let` or `const`.
    VariableDeclaration,
    /// `[id, init?]`
    VariableDeclarator,
    ClassDeclaration,
    ClassExpression,
    ClassBody,
    /// `[key, value]`
    MethodDefinition,
    Identifier,
    Literal(LiteralKind),
    ThisExpression,
    Super,
    ArrayExpression,
    ObjectExpression,
    /// `[key, value]`
    Property,
    /// `[id?, params…, body]`
    FunctionExpression,
    /// `[params…, body]`
    ArrowFunctionExpression,
    /// `[argument]`
    UnaryExpression,
    /// `[argument]`
    UpdateExpression,
    /// `[left, right]`
    BinaryExpression,
    /// `[left, right]`
    LogicalExpression,
    /// `[left, right]`
    AssignmentExpression,
    /// `[test, consequent, alternate]`
    ConditionalExpression,
    /// `[callee, arguments…]`
    CallExpression,
    /// `[callee, arguments…]`
    NewExpression,
    /// `[object, property]`
    MemberExpression,
    SequenceExpression,
    /// `[argument?]`
    YieldExpression,
    /// `[quasis and expressions in source order]`
    TemplateLiteral,
    TemplateElement,
    /// `[tag, quasi]`
    TaggedTemplateExpression,
    /// `[argument]`
    SpreadElement,
    /// `[argument]`
    RestElement,
    ArrayPattern,
    ObjectPattern,
    /// `[left, right]`
    AssignmentPattern,
    MetaProperty,
    ImportDeclaration,
    ImportSpecifier,
    ImportDefaultSpecifier,
    ImportNamespaceSpecifier,
    ExportNamedDeclaration,
    ExportDefaultDeclaration,
    ExportAllDeclaration,
    ExportSpecifier,
    /// Operand invented by loose-mode recovery.
    Placeholder,
    /// Token skipped by loose-mode recovery.
    Invalid,
}

impl NodeKind {
    /// Returns the ESTree type name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Program => "Program",
            Self::ExpressionStatement => "ExpressionStatement",
            Self::BlockStatement => "BlockStatement",
            Self::EmptyStatement => "EmptyStatement",
            Self::DebuggerStatement => "DebuggerStatement",
            Self::WithStatement => "WithStatement",
            Self::ReturnStatement => "ReturnStatement",
            Self::LabeledStatement => "LabeledStatement",
            Self::BreakStatement => "BreakStatement",
            Self::ContinueStatement => "ContinueStatement",
            Self::IfStatement => "IfStatement",
            Self::SwitchStatement => "SwitchStatement",
            Self::SwitchCase => "SwitchCase",
            Self::ThrowStatement => "ThrowStatement",
            Self::TryStatement => "TryStatement",
            Self::CatchClause => "CatchClause",
            Self::WhileStatement => "WhileStatement",
            Self::DoWhileStatement => "DoWhileStatement",
            Self::ForStatement => "ForStatement",
            Self::ForInStatement => "ForInStatement",
            Self::ForOfStatement => "ForOfStatement",
            Self::FunctionDeclaration => "FunctionDeclaration",
            Self::VariableDeclaration => "VariableDeclaration",
            Self::VariableDeclarator => "VariableDeclarator",
            Self::ClassDeclaration => "ClassDeclaration",
            Self::ClassExpression => "ClassExpression",
            Self::ClassBody => "ClassBody",
            Self::MethodDefinition => "MethodDefinition",
            Self::Identifier => "Identifier",
            Self::Literal(_) => "Literal",
            Self::ThisExpression => "ThisExpression",
            Self::Super => "Super",
            Self::ArrayExpression => "ArrayExpression",
            Self::ObjectExpression => "ObjectExpression",
            Self::Property => "Property",
            Self::FunctionExpression => "FunctionExpression",
            Self::ArrowFunctionExpression => "ArrowFunctionExpression",
            Self::UnaryExpression => "UnaryExpression",
            Self::UpdateExpression => "UpdateExpression",
            Self::BinaryExpression => "BinaryExpression",
            Self::LogicalExpression => "LogicalExpression",
            Self::AssignmentExpression => "AssignmentExpression",
            Self::ConditionalExpression => "ConditionalExpression",
            Self::CallExpression => "CallExpression",
            Self::NewExpression => "NewExpression",
            Self::MemberExpression => "MemberExpression",
            Self::SequenceExpression => "SequenceExpression",
            Self::YieldExpression => "YieldExpression",
            Self::TemplateLiteral => "TemplateLiteral",
            Self::TemplateElement => "TemplateElement",
            Self::TaggedTemplateExpression => "TaggedTemplateExpression",
            Self::SpreadElement => "SpreadElement",
            Self::RestElement => "RestElement",
            Self::ArrayPattern => "ArrayPattern",
            Self::ObjectPattern => "ObjectPattern",
            Self::AssignmentPattern => "AssignmentPattern",
            Self::MetaProperty => "MetaProperty",
            Self::ImportDeclaration => "ImportDeclaration",
            Self::ImportSpecifier => "ImportSpecifier",
            Self::ImportDefaultSpecifier => "ImportDefaultSpecifier",
            Self::ImportNamespaceSpecifier => "ImportNamespaceSpecifier",
            Self::ExportNamedDeclaration => "ExportNamedDeclaration",
            Self::ExportDefaultDeclaration => "ExportDefaultDeclaration",
            Self::ExportAllDeclaration => "ExportAllDeclaration",
            Self::ExportSpecifier => "ExportSpecifier",
            Self::Placeholder => "Placeholder",
            Self::Invalid => "Invalid",
        }
    }

    /// Returns `true` for kinds that may appear as an assignment target.
    pub fn is_pattern(self) -> bool {
        matches!(
            self,
            Self::Identifier
                | Self::MemberExpression
                | Self::ArrayPattern
                | Self::ObjectPattern
                | Self::AssignmentPattern
                | Self::RestElement
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One syntax tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    /// Construct kind.
    pub kind: NodeKind,
    /// Source range within the parsed text.
    pub span: Span,
    /// Owned children in the layout documented on [`NodeKind`].
    pub children: Vec<SyntaxNode>,
    /// Decoded identifier name, or the declaration keyword for declarations.
    pub name: Option<String>,
    /// Operator text for operator-bearing kinds.
    pub operator: Option<String>,
    /// Member access written with brackets, or a computed property key.
    pub computed: bool,
    /// This node or one of its descendants was repaired by loose-mode recovery.
    pub recovered: bool,
}

impl SyntaxNode {
    /// Creates a node with no name or operator.
    pub fn new(kind: NodeKind, span: Span, children: Vec<SyntaxNode>) -> Self {
        Self {
            kind,
            span,
            children,
            name: None,
            operator: None,
            computed: false,
            recovered: false,
        }
    }

    /// Creates a loose-mode placeholder operand at `span`.
    pub fn placeholder(span: Span) -> Self {
        let mut node = Self::new(NodeKind::Placeholder, span, Vec::new());
        node.recovered = true;
        node
    }

    /// Sets the decoded name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the operator text.
    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    /// Marks the node as computed.
    pub fn with_computed(mut self, computed: bool) -> Self {
        self.computed = computed;
        self
    }

    /// Marks the node as repaired when `recovered` is set.
    pub fn with_recovered(mut self, recovered: bool) -> Self {
        self.recovered |= recovered;
        self
    }

    /// Returns the left operand of binary-like kinds.
    pub fn left(&self) -> Option<&SyntaxNode> {
        match self.kind {
            NodeKind::AssignmentExpression
            | NodeKind::BinaryExpression
            | NodeKind::LogicalExpression
            | NodeKind::AssignmentPattern
            | NodeKind::ForInStatement
            | NodeKind::ForOfStatement => self.children.first(),
            _ => None,
        }
    }

    /// Returns the right operand of binary-like kinds.
    pub fn right(&self) -> Option<&SyntaxNode> {
        match self.kind {
            NodeKind::AssignmentExpression
            | NodeKind::BinaryExpression
            | NodeKind::LogicalExpression
            | NodeKind::AssignmentPattern
            | NodeKind::ForInStatement
            | NodeKind::ForOfStatement => self.children.get(1),
            _ => None,
        }
    }

    /// Returns the accessed object of member access and `with`.
    pub fn object(&self) -> Option<&SyntaxNode> {
        match self.kind {
            NodeKind::MemberExpression | NodeKind::WithStatement => self.children.first(),
            _ => None,
        }
    }

    /// Returns the callee of calls, `new` and tagged templates.
    pub fn callee(&self) -> Option<&SyntaxNode> {
        match self.kind {
            NodeKind::CallExpression
            | NodeKind::NewExpression
            | NodeKind::TaggedTemplateExpression => self.children.first(),
            _ => None,
        }
    }

    /// Returns the operand of unary-like kinds.
    pub fn argument(&self) -> Option<&SyntaxNode> {
        match self.kind {
            NodeKind::SpreadElement
            | NodeKind::RestElement
            | NodeKind::UnaryExpression
            | NodeKind::UpdateExpression
            | NodeKind::YieldExpression
            | NodeKind::ReturnStatement
            | NodeKind::ThrowStatement => self.children.first(),
            _ => None,
        }
    }

    /// Returns `true` for an identifier named `name`.
    pub fn is_identifier(&self, name: &str) -> bool {
        self.kind == NodeKind::Identifier && self.name.as_deref() == Some(name)
    }

    /// Returns the source text covered by this node.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        self.span.slice(source)
    }

    /// Visits this node and its descendants in pre-order.
    pub fn walk<'n>(&'n self, f: &mut impl FnMut(&'n SyntaxNode)) {
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            f(node);
            pending.extend(node.children.iter().rev());
        }
    }
}

/// Member, call and binary chains nest one level per link without passing
/// through the nesting limit, so trees are torn down without recursion.
impl Drop for SyntaxNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}
