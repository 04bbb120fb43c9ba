//! Tree-sitter based Python reader.

use crate::ast::*;
use crate::traits::{ReadError, Reader};
use tree_sitter::{Node, Parser, Tree};

/// Static instance of the Python reader for registry.
pub static PYTHON_READER: PythonReader = PythonReader;

/// Python reader using tree-sitter.
pub struct PythonReader;

impl Reader for PythonReader {
    fn language(&self) -> &'static str {
        "python"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["py", "pyw"]
    }

    fn read(&self, source: &str) -> Result<Module, ReadError> {
        read_python(source)
    }
}

/// Parse Python source into a [`Module`].
pub fn read_python(source: &str) -> Result<Module, ReadError> {
    let mut parser = Parser::new();
    parser
        .set_language(&arborium_python::language().into())
        .map_err(|err| ReadError::Parse(err.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ReadError::Parse("failed to parse".into()))?;

    let ctx = ReadContext::new(source);
    ctx.read_module(&tree)
}

struct ReadContext<'a> {
    source: &'a str,
}

impl<'a> ReadContext<'a> {
    fn new(source: &'a str) -> Self {
        Self { source }
    }

    fn node_text(&self, node: Node) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn field<'t>(&self, node: Node<'t>, name: &str) -> Result<Node<'t>, ReadError> {
        node.child_by_field_name(name)
            .ok_or_else(|| ReadError::Parse(format!("{} missing {}", node.kind(), name)))
    }

    /// Named children, comments excluded.
    fn named_children<'t>(&self, node: Node<'t>) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .collect()
    }

    fn first_named<'t>(&self, node: Node<'t>) -> Option<Node<'t>> {
        self.named_children(node).into_iter().next()
    }

    fn read_module(&self, tree: &Tree) -> Result<Module, ReadError> {
        let root = tree.root_node();

        if root.has_error() {
            let at = first_error(root).unwrap_or(root).start_position();
            return Err(ReadError::Syntax {
                line: at.row + 1,
                column: at.column + 1,
            });
        }

        Ok(Module::new(self.read_block(root)?))
    }

    fn read_block(&self, node: Node) -> Result<Vec<Stmt>, ReadError> {
        let mut stmts = Vec::new();
        for child in self.named_children(node) {
            if let Some(stmt) = self.read_stmt(child)? {
                stmts.push(stmt);
            }
        }
        Ok(stmts)
    }

    fn read_stmt(&self, node: Node) -> Result<Option<Stmt>, ReadError> {
        let stmt = match node.kind() {
            "comment" => return Ok(None),

            "expression_statement" => self.read_expression_statement(node)?,
            "assignment" => self.read_assignment(node)?,
            "augmented_assignment" => self.read_augmented_assignment(node)?,

            // Expression nodes at statement level (bare calls, etc.)
            kind if is_expression_kind(kind) => Stmt::expr(self.read_expr(node)?),

            // Control flow
            "if_statement" => self.read_if_statement(node)?,
            "for_statement" if is_async(node) => Stmt::unsupported(StmtKind::AsyncFor),
            "for_statement" => self.read_for_statement(node)?,
            "while_statement" => self.read_while_statement(node)?,
            "match_statement" => self.read_match_statement(node)?,
            "try_statement" => self.read_try_statement(node)?,

            // Definitions
            "function_definition" if is_async(node) => {
                Stmt::unsupported(StmtKind::AsyncFunctionDef)
            }
            "function_definition" => Stmt::FunctionDef(self.read_function_definition(node)?),
            "class_definition" => Stmt::ClassDef {
                name: self.node_text(self.field(node, "name")?).to_string(),
                body: self.read_block(self.field(node, "body")?)?,
            },
            "decorated_definition" => {
                return match node.child_by_field_name("definition") {
                    Some(def) => self.read_stmt(def),
                    None => Ok(Some(Stmt::unsupported(StmtKind::Unknown))),
                };
            }

            // Simple statements
            "return_statement" => Stmt::Return {
                value: self.read_optional_expr(node)?,
            },
            "raise_statement" => Stmt::Raise {
                exc: self.read_optional_expr(node)?,
            },
            "pass_statement" => Stmt::Pass,
            "break_statement" => Stmt::Break,
            "continue_statement" => Stmt::Continue,
            "print_statement" => {
                let mut args = Vec::new();
                for child in self.named_children(node) {
                    if child.kind() != "chevron" {
                        args.push(self.read_expr(child)?);
                    }
                }
                Stmt::expr(Expr::call(Expr::name("print"), args))
            }

            // Recognized but not translated
            "import_statement" => Stmt::unsupported(StmtKind::Import),
            "import_from_statement" | "future_import_statement" => {
                Stmt::unsupported(StmtKind::ImportFrom)
            }
            "global_statement" => Stmt::unsupported(StmtKind::Global),
            "nonlocal_statement" => Stmt::unsupported(StmtKind::Nonlocal),
            "delete_statement" => Stmt::unsupported(StmtKind::Delete),
            "assert_statement" => Stmt::unsupported(StmtKind::Assert),
            "with_statement" if is_async(node) => Stmt::unsupported(StmtKind::AsyncWith),
            "with_statement" => Stmt::unsupported(StmtKind::With),
            "type_alias_statement" => Stmt::unsupported(StmtKind::TypeAlias),

            other => {
                tracing::warn!(kind = other, "unrecognized python statement");
                Stmt::unsupported(StmtKind::Unknown)
            }
        };
        Ok(Some(stmt))
    }

    fn read_optional_expr(&self, node: Node) -> Result<Option<Expr>, ReadError> {
        self.first_named(node)
            .map(|child| self.read_expr(child))
            .transpose()
    }

    fn read_expression_statement(&self, node: Node) -> Result<Stmt, ReadError> {
        let children = self.named_children(node);
        match children.as_slice() {
            [] => Err(ReadError::Parse("expression_statement has no child".into())),
            [single] => match single.kind() {
                "assignment" => self.read_assignment(*single),
                "augmented_assignment" => self.read_augmented_assignment(*single),
                _ => Ok(Stmt::expr(self.read_expr(*single)?)),
            },
            // `a, b` as a statement
            many => Ok(Stmt::expr(Expr::Tuple {
                elts: self.read_exprs(many)?,
            })),
        }
    }

    fn read_assignment(&self, node: Node) -> Result<Stmt, ReadError> {
        let mut targets = Vec::new();
        let mut current = node;
        loop {
            // `x: int = 1` and bare `x: int`
            if current.child_by_field_name("type").is_some() {
                return Ok(Stmt::unsupported(StmtKind::AnnAssign));
            }
            targets.push(self.read_target(self.field(current, "left")?)?);
            let right = self.field(current, "right")?;
            // `a = b = 1` nests the second assignment on the right
            if right.kind() == "assignment" {
                current = right;
                continue;
            }
            let value = self.read_expr(right)?;
            return Ok(Stmt::Assign { targets, value });
        }
    }

    fn read_augmented_assignment(&self, node: Node) -> Result<Stmt, ReadError> {
        let left = self.field(node, "left")?;
        let right = self.field(node, "right")?;
        let op_node = self.field(node, "operator")?;

        let op_text = op_node.kind();
        let op = Operator::from_token(op_text.trim_end_matches('='))
            .ok_or_else(|| ReadError::Parse(format!("unknown augmented op: {}", op_text)))?;

        Ok(Stmt::AugAssign {
            target: self.read_target(left)?,
            op,
            value: self.read_expr(right)?,
        })
    }

    fn read_target(&self, node: Node) -> Result<Expr, ReadError> {
        match node.kind() {
            "pattern_list" | "tuple_pattern" => Ok(Expr::Tuple {
                elts: self.read_targets(node)?,
            }),
            "list_pattern" => Ok(Expr::List {
                elts: self.read_targets(node)?,
            }),
            _ => self.read_expr(node),
        }
    }

    fn read_targets(&self, node: Node) -> Result<Vec<Expr>, ReadError> {
        self.named_children(node)
            .into_iter()
            .map(|child| self.read_target(child))
            .collect()
    }

    fn read_if_statement(&self, node: Node) -> Result<Stmt, ReadError> {
        let test = self.read_expr(self.field(node, "condition")?)?;
        let body = self.read_block(self.field(node, "consequence")?)?;

        // `elif` clauses and the final `else` share the `alternative` field;
        // fold them from the end so each elif nests the rest.
        let mut cursor = node.walk();
        let alternatives: Vec<Node> = node
            .children_by_field_name("alternative", &mut cursor)
            .collect();

        let mut orelse = Vec::new();
        for alt in alternatives.into_iter().rev() {
            orelse = match alt.kind() {
                "else_clause" => self.read_block(self.field(alt, "body")?)?,
                "elif_clause" => {
                    let test = self.read_expr(self.field(alt, "condition")?)?;
                    let body = self.read_block(self.field(alt, "consequence")?)?;
                    vec![Stmt::if_stmt(test, body, orelse)]
                }
                _ => orelse,
            };
        }

        Ok(Stmt::if_stmt(test, body, orelse))
    }

    fn read_else(&self, node: Node) -> Result<Vec<Stmt>, ReadError> {
        match node.child_by_field_name("alternative") {
            Some(alt) => self.read_block(self.field(alt, "body")?),
            None => Ok(Vec::new()),
        }
    }

    fn read_while_statement(&self, node: Node) -> Result<Stmt, ReadError> {
        Ok(Stmt::While {
            test: self.read_expr(self.field(node, "condition")?)?,
            body: self.read_block(self.field(node, "body")?)?,
            orelse: self.read_else(node)?,
        })
    }

    fn read_for_statement(&self, node: Node) -> Result<Stmt, ReadError> {
        Ok(Stmt::For {
            target: self.read_target(self.field(node, "left")?)?,
            iter: self.read_expr(self.field(node, "right")?)?,
            body: self.read_block(self.field(node, "body")?)?,
            orelse: self.read_else(node)?,
        })
    }

    fn read_function_definition(&self, node: Node) -> Result<FunctionDef, ReadError> {
        let name = self.node_text(self.field(node, "name")?);
        let params = node
            .child_by_field_name("parameters")
            .map(|p| self.read_parameters(p))
            .unwrap_or_default();
        let body = self.read_block(self.field(node, "body")?)?;

        Ok(FunctionDef::new(name, params, body))
    }

    fn read_parameters(&self, node: Node) -> Vec<String> {
        let mut params = Vec::new();

        for child in self.named_children(node) {
            match child.kind() {
                "identifier" => params.push(self.node_text(child).to_string()),
                "default_parameter" | "typed_default_parameter" => {
                    if let Some(name) = child.child_by_field_name("name") {
                        params.push(self.node_text(name).to_string());
                    }
                }
                "typed_parameter" => {
                    // Get just the name, ignore type annotation
                    if let Some(inner) = self.first_named(child) {
                        match inner.kind() {
                            "identifier" => params.push(self.node_text(inner).to_string()),
                            "list_splat_pattern" => params.push(self.rest_param(inner)),
                            _ => {}
                        }
                    }
                }
                "list_splat_pattern" => params.push(self.rest_param(child)),
                // `**kwargs`, `*` and `/` separators have no JavaScript spelling
                _ => {}
            }
        }

        params
    }

    fn rest_param(&self, node: Node) -> String {
        format!("...{}", self.node_text(node).trim_start_matches('*'))
    }

    fn read_match_statement(&self, node: Node) -> Result<Stmt, ReadError> {
        let mut cursor = node.walk();
        let subjects: Vec<Node> = node
            .children_by_field_name("subject", &mut cursor)
            .collect();
        let mut subjects = self.read_exprs(&subjects)?;
        let subject = match subjects.len() {
            0 => return Err(ReadError::Parse("match_statement missing subject".into())),
            1 => subjects.remove(0),
            _ => Expr::Tuple { elts: subjects },
        };

        let body = node.child_by_field_name("body").unwrap_or(node);
        let mut cases = Vec::new();
        for clause in self.named_children(body) {
            if clause.kind() == "case_clause" {
                cases.push(self.read_case_clause(clause)?);
            }
        }

        Ok(Stmt::Match { subject, cases })
    }

    fn read_case_clause(&self, node: Node) -> Result<MatchCase, ReadError> {
        let patterns: Vec<Node> = self
            .named_children(node)
            .into_iter()
            .filter(|child| child.kind() == "case_pattern")
            .collect();

        let pattern = match patterns.as_slice() {
            [single] => self.read_pattern(*single)?,
            // `case a, b:` is an open sequence pattern
            [_, _, ..] => Pattern::Unsupported(PatternKind::MatchSequence),
            [] => Pattern::Unsupported(PatternKind::Unknown),
        };

        let guard = match node.child_by_field_name("guard") {
            Some(guard) => self.read_optional_expr(guard)?,
            None => None,
        };

        Ok(MatchCase {
            pattern,
            guard,
            body: self.read_block(self.field(node, "consequence")?)?,
        })
    }

    fn read_pattern(&self, node: Node) -> Result<Pattern, ReadError> {
        let text = self.node_text(node).trim();
        if text == "_" {
            return Ok(Pattern::Wildcard);
        }

        let inner = if node.kind() == "case_pattern" {
            self.first_named(node)
        } else {
            Some(node)
        };
        let Some(inner) = inner else {
            return Ok(Pattern::Unsupported(PatternKind::Unknown));
        };

        let pattern = match inner.kind() {
            "string" | "concatenated_string" => Pattern::Value(self.read_expr(inner)?),
            "integer" | "float" => {
                let number = self.read_expr(inner)?;
                if text.starts_with('-') {
                    Pattern::Value(Expr::UnaryOp {
                        op: UnaryOp::USub,
                        operand: Box::new(number),
                    })
                } else {
                    Pattern::Value(number)
                }
            }
            "true" => Pattern::Singleton(Constant::Bool(true)),
            "false" => Pattern::Singleton(Constant::Bool(false)),
            "none" => Pattern::Singleton(Constant::None),
            "dotted_name" => {
                let mut parts = self
                    .named_children(inner)
                    .into_iter()
                    .map(|part| self.node_text(part).to_string());
                let first = parts
                    .next()
                    .ok_or_else(|| ReadError::Parse("dotted_name is empty".into()))?;
                let rest: Vec<String> = parts.collect();
                if rest.is_empty() {
                    Pattern::Capture(first)
                } else {
                    let value = rest
                        .into_iter()
                        .fold(Expr::name(first), |value, attr| Expr::attribute(value, attr));
                    Pattern::Value(value)
                }
            }
            "as_pattern" => Pattern::Unsupported(PatternKind::MatchAs),
            "union_pattern" => Pattern::Unsupported(PatternKind::MatchOr),
            "list_pattern" | "tuple_pattern" => Pattern::Unsupported(PatternKind::MatchSequence),
            "dict_pattern" => Pattern::Unsupported(PatternKind::MatchMapping),
            "class_pattern" | "keyword_pattern" => Pattern::Unsupported(PatternKind::MatchClass),
            "splat_pattern" => Pattern::Unsupported(PatternKind::MatchStar),
            _ => Pattern::Unsupported(PatternKind::Unknown),
        };
        Ok(pattern)
    }

    fn read_try_statement(&self, node: Node) -> Result<Stmt, ReadError> {
        let body = self.read_block(self.field(node, "body")?)?;
        let mut handlers = Vec::new();
        let mut orelse = Vec::new();
        let mut finalbody = Vec::new();

        for child in self.named_children(node) {
            match child.kind() {
                "except_clause" => handlers.push(self.read_except_clause(child)?),
                "except_group_clause" => return Ok(Stmt::unsupported(StmtKind::TryStar)),
                "else_clause" => orelse = self.read_block(self.field(child, "body")?)?,
                "finally_clause" => {
                    if let Some(block) = self.block_child(child) {
                        finalbody = self.read_block(block)?;
                    }
                }
                _ => {}
            }
        }

        Ok(Stmt::Try {
            body,
            handlers,
            orelse,
            finalbody,
        })
    }

    fn read_except_clause(&self, node: Node) -> Result<ExceptHandler, ReadError> {
        let block = self
            .block_child(node)
            .ok_or_else(|| ReadError::Parse("except_clause missing block".into()))?;
        let parts: Vec<Node> = self
            .named_children(node)
            .into_iter()
            .filter(|child| child.kind() != "block")
            .collect();

        // Depending on the grammar version `except E as e` is either two
        // expressions or a single `as_pattern`.
        let (type_, name) = match parts.as_slice() {
            [] => (None, None),
            [only] if only.kind() == "as_pattern" => {
                let type_ = self.read_optional_expr(*only)?;
                let alias = only
                    .child_by_field_name("alias")
                    .map(|alias| self.node_text(alias).to_string());
                (type_, alias)
            }
            [type_] => (Some(self.read_expr(*type_)?), None),
            [type_, alias, ..] => (
                Some(self.read_expr(*type_)?),
                Some(self.node_text(*alias).to_string()),
            ),
        };

        Ok(ExceptHandler {
            type_,
            name,
            body: self.read_block(block)?,
        })
    }

    fn block_child<'t>(&self, node: Node<'t>) -> Option<Node<'t>> {
        self.named_children(node)
            .into_iter()
            .rev()
            .find(|child| child.kind() == "block")
    }

    fn read_exprs(&self, nodes: &[Node]) -> Result<Vec<Expr>, ReadError> {
        nodes.iter().map(|node| self.read_expr(*node)).collect()
    }

    fn read_expr(&self, node: Node) -> Result<Expr, ReadError> {
        let expr = match node.kind() {
            // Literals
            "integer" | "float" => {
                let text = self.node_text(node);
                if text.ends_with(['j', 'J']) {
                    // complex literals
                    Expr::unsupported(ExprKind::Unknown)
                } else if node.kind() == "integer" {
                    Expr::Constant {
                        value: Constant::Int(text.to_string()),
                    }
                } else {
                    Expr::Constant {
                        value: Constant::Float(text.to_string()),
                    }
                }
            }
            "string" | "concatenated_string" => self.read_string(node)?,
            "true" => Expr::Constant {
                value: Constant::Bool(true),
            },
            "false" => Expr::Constant {
                value: Constant::Bool(false),
            },
            "none" => Expr::Constant {
                value: Constant::None,
            },

            // Identifiers
            "identifier" => Expr::name(self.node_text(node)),

            // Operators
            "binary_operator" => self.read_binary_operator(node)?,
            "comparison_operator" => self.read_comparison_operator(node)?,
            "boolean_operator" => self.read_boolean_operator(node)?,
            "unary_operator" => self.read_unary_operator(node)?,
            "not_operator" => Expr::UnaryOp {
                op: UnaryOp::Not,
                operand: Box::new(self.read_expr(self.field(node, "argument")?)?),
            },

            // Calls and member access
            "call" => self.read_call(node)?,
            "attribute" => Expr::attribute(
                self.read_expr(self.field(node, "object")?)?,
                self.node_text(self.field(node, "attribute")?),
            ),

            // Collections
            "list" | "list_pattern" => Expr::List {
                elts: self.read_exprs(&self.named_children(node))?,
            },
            "tuple" | "expression_list" | "pattern_list" | "tuple_pattern" => Expr::Tuple {
                elts: self.read_exprs(&self.named_children(node))?,
            },
            "dictionary" => self.read_dictionary(node)?,

            "parenthesized_expression" => {
                let inner = self.first_named(node).ok_or_else(|| {
                    ReadError::Parse("parenthesized_expression missing inner".into())
                })?;
                self.read_expr(inner)?
            }

            // Recognized but not translated
            "subscript" => Expr::unsupported(ExprKind::Subscript),
            "slice" => Expr::unsupported(ExprKind::Slice),
            "lambda" => Expr::unsupported(ExprKind::Lambda),
            "conditional_expression" => Expr::unsupported(ExprKind::IfExp),
            "list_comprehension" => Expr::unsupported(ExprKind::ListComp),
            "set_comprehension" => Expr::unsupported(ExprKind::SetComp),
            "dictionary_comprehension" => Expr::unsupported(ExprKind::DictComp),
            "generator_expression" => Expr::unsupported(ExprKind::GeneratorExp),
            "set" => Expr::unsupported(ExprKind::Set),
            "await" => Expr::unsupported(ExprKind::Await),
            "yield" => Expr::unsupported(ExprKind::Yield),
            "named_expression" => Expr::unsupported(ExprKind::NamedExpr),
            "list_splat" | "list_splat_pattern" => Expr::unsupported(ExprKind::Starred),
            "ellipsis" => Expr::unsupported(ExprKind::Ellipsis),

            other => {
                tracing::debug!(kind = other, "unrecognized python expression");
                Expr::unsupported(ExprKind::Unknown)
            }
        };
        Ok(expr)
    }

    fn read_binary_operator(&self, node: Node) -> Result<Expr, ReadError> {
        let left = self.field(node, "left")?;
        let right = self.field(node, "right")?;
        let op_node = self.field(node, "operator")?;

        let op = Operator::from_token(op_node.kind()).ok_or_else(|| {
            ReadError::Parse(format!("unknown binary op: {}", self.node_text(op_node)))
        })?;

        Ok(Expr::binop(self.read_expr(left)?, op, self.read_expr(right)?))
    }

    fn read_comparison_operator(&self, node: Node) -> Result<Expr, ReadError> {
        // Operands are named children; operators are anonymous tokens in
        // between (`not in` and `is not` may arrive as two tokens).
        let mut cursor = node.walk();
        let mut operands = Vec::new();
        let mut ops = Vec::new();
        let mut pending = String::new();

        for child in node.children(&mut cursor) {
            if child.kind() == "comment" {
                continue;
            }
            if child.is_named() {
                if !operands.is_empty() {
                    let op = CmpOp::from_token(&pending).ok_or_else(|| {
                        ReadError::Parse(format!("unknown comparison op: {}", pending))
                    })?;
                    ops.push(op);
                    pending.clear();
                }
                operands.push(self.read_expr(child)?);
            } else {
                if !pending.is_empty() {
                    pending.push(' ');
                }
                pending.push_str(child.kind());
            }
        }

        let mut operands = operands.into_iter();
        let left = operands
            .next()
            .ok_or_else(|| ReadError::Parse("comparison has no operands".into()))?;

        Ok(Expr::Compare {
            left: Box::new(left),
            ops,
            comparators: operands.collect(),
        })
    }

    fn read_boolean_operator(&self, node: Node) -> Result<Expr, ReadError> {
        let op_node = self.field(node, "operator")?;
        let op = match op_node.kind() {
            "and" => BoolOp::And,
            "or" => BoolOp::Or,
            other => {
                return Err(ReadError::Parse(format!("unknown boolean op: {}", other)));
            }
        };

        // `a and b and c` arrives left-nested; flatten unparenthesized chains.
        let mut values = Vec::new();
        for side in [self.field(node, "left")?, self.field(node, "right")?] {
            match self.read_expr(side)? {
                Expr::BoolOp {
                    op: inner,
                    values: inner_values,
                } if inner == op && side.kind() == "boolean_operator" => {
                    values.extend(inner_values)
                }
                other => values.push(other),
            }
        }

        Ok(Expr::BoolOp { op, values })
    }

    fn read_unary_operator(&self, node: Node) -> Result<Expr, ReadError> {
        let op_node = self.field(node, "operator")?;
        let arg = self.field(node, "argument")?;

        let op = match op_node.kind() {
            "-" => UnaryOp::USub,
            "+" => UnaryOp::UAdd,
            "~" => UnaryOp::Invert,
            other => {
                return Err(ReadError::Parse(format!("unknown unary op: {}", other)));
            }
        };

        Ok(Expr::UnaryOp {
            op,
            operand: Box::new(self.read_expr(arg)?),
        })
    }

    fn read_call(&self, node: Node) -> Result<Expr, ReadError> {
        let func = self.read_expr(self.field(node, "function")?)?;
        let mut args = Vec::new();
        let mut keywords = Vec::new();

        if let Some(arguments) = node.child_by_field_name("arguments") {
            if arguments.kind() == "generator_expression" {
                args.push(Expr::unsupported(ExprKind::GeneratorExp));
            } else {
                for child in self.named_children(arguments) {
                    match child.kind() {
                        "keyword_argument" => keywords.push(Keyword {
                            arg: Some(self.node_text(self.field(child, "name")?).to_string()),
                            value: self.read_expr(self.field(child, "value")?)?,
                        }),
                        "dictionary_splat" => {
                            if let Some(value) = self.read_optional_expr(child)? {
                                keywords.push(Keyword { arg: None, value });
                            }
                        }
                        _ => args.push(self.read_expr(child)?),
                    }
                }
            }
        }

        Ok(Expr::Call {
            func: Box::new(func),
            args,
            keywords,
        })
    }

    fn read_dictionary(&self, node: Node) -> Result<Expr, ReadError> {
        let mut keys = Vec::new();
        let mut values = Vec::new();

        for child in self.named_children(node) {
            match child.kind() {
                "pair" => {
                    keys.push(Some(self.read_expr(self.field(child, "key")?)?));
                    values.push(self.read_expr(self.field(child, "value")?)?);
                }
                "dictionary_splat" => {
                    if let Some(value) = self.read_optional_expr(child)? {
                        keys.push(None);
                        values.push(value);
                    }
                }
                _ => {}
            }
        }

        Ok(Expr::Dict { keys, values })
    }

    /// Plain strings become `Constant::Str`; any f-string piece turns the
    /// whole (possibly implicitly concatenated) literal into `JoinedStr`.
    fn read_string(&self, node: Node) -> Result<Expr, ReadError> {
        let mut parts = Vec::new();
        let mut formatted = false;

        if node.kind() == "concatenated_string" {
            for piece in self.named_children(node) {
                formatted |= self.read_string_parts(piece, &mut parts)?;
            }
        } else {
            formatted = self.read_string_parts(node, &mut parts)?;
        }

        if formatted {
            return Ok(Expr::JoinedStr { values: parts });
        }
        let text = parts
            .into_iter()
            .map(|part| match part {
                FStringPart::Literal(text) => text,
                FStringPart::Expr(_) => String::new(),
            })
            .collect::<String>();
        Ok(Expr::str(text))
    }

    /// Append the pieces of one `string` node; returns whether it is an f-string.
    fn read_string_parts(
        &self,
        node: Node,
        parts: &mut Vec<FStringPart>,
    ) -> Result<bool, ReadError> {
        let prefix: String = self
            .node_text(node)
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let formatted = prefix.contains('f');
        let raw = prefix.contains('r');

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "string_content" => {
                    let text = self.node_text(child);
                    let mut text = if raw { text.to_string() } else { unescape(text) };
                    if formatted {
                        text = text.replace("{{", "{").replace("}}", "}");
                    }
                    push_literal(parts, text);
                }
                "interpolation" => {
                    let inner = child
                        .child_by_field_name("expression")
                        .or_else(|| self.first_named(child))
                        .ok_or_else(|| ReadError::Parse("interpolation missing expression".into()))?;
                    parts.push(FStringPart::Expr(self.read_expr(inner)?));
                }
                _ => {}
            }
        }

        Ok(formatted)
    }
}

/// Grammar kinds that may stand alone as an expression statement.
fn is_expression_kind(kind: &str) -> bool {
    matches!(
        kind,
        "call"
            | "identifier"
            | "attribute"
            | "subscript"
            | "binary_operator"
            | "comparison_operator"
            | "boolean_operator"
            | "not_operator"
            | "unary_operator"
            | "string"
            | "concatenated_string"
            | "integer"
            | "float"
            | "true"
            | "false"
            | "none"
            | "list"
            | "tuple"
            | "dictionary"
            | "set"
            | "expression_list"
            | "parenthesized_expression"
            | "lambda"
            | "conditional_expression"
            | "list_comprehension"
            | "set_comprehension"
            | "dictionary_comprehension"
            | "generator_expression"
            | "await"
            | "yield"
            | "named_expression"
            | "list_splat"
            | "ellipsis"
    )
}

fn is_async(node: Node) -> bool {
    node.child(0).is_some_and(|first| first.kind() == "async")
}

/// First ERROR or MISSING node in document order.
fn first_error(root: Node) -> Option<Node> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() {
            let mut cursor = node.walk();
            let children: Vec<Node> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }
    None
}

fn push_literal(parts: &mut Vec<FStringPart>, text: String) {
    if let Some(FStringPart::Literal(last)) = parts.last_mut() {
        last.push_str(&text);
    } else {
        parts.push(FStringPart::Literal(text));
    }
}

/// Decode Python backslash escapes. Unknown escapes are kept verbatim.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some('a') => out.push('\x07'),
            Some('b') => out.push('\x08'),
            Some('f') => out.push('\x0c'),
            Some('v') => out.push('\x0b'),
            // line continuation
            Some('\n') => {}
            Some(digit @ '0'..='7') => {
                let mut code = digit.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(next) => {
                            code = code * 8 + next;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.extend(char::from_u32(code));
            }
            Some(kind @ ('x' | 'u' | 'U')) => {
                let width = match kind {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let digits: String = chars.by_ref().take(width).collect();
                match u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if digits.len() == width => out.push(decoded),
                    _ => {
                        out.push('\\');
                        out.push(kind);
                        out.push_str(&digits);
                    }
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
