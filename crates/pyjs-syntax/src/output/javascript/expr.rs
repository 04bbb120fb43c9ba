//! Expression translation.
//!
//! Translation is a pure function of the expression and the current
//! implicit-self binding; nothing here touches the emission buffer.

use super::operators::{Symbol, UNMAPPED, map_operator};
use crate::ast::{BoolOp, CmpOp, Constant, Expr, FStringPart};

/// Token substituted for the implicit self parameter inside methods.
pub const SELF_TOKEN: &str = "this";

const PREC_OR: u8 = 1;
const PREC_AND: u8 = 2;
const PREC_EQUALITY: u8 = 3;
const PREC_RELATIONAL: u8 = 4;
const PREC_ADDITIVE: u8 = 5;
const PREC_MULTIPLICATIVE: u8 = 6;
const PREC_POWER: u8 = 7;
const PREC_UNARY: u8 = 8;
const PREC_ATOM: u8 = 9;

/// Translates Python expressions into JavaScript expression text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExprTranslator<'a> {
    /// Name of the method's first parameter, rewritten to [`SELF_TOKEN`].
    self_name: Option<&'a str>,
}

impl<'a> ExprTranslator<'a> {
    pub fn new(self_name: Option<&'a str>) -> Self {
        Self { self_name }
    }

    pub fn translate(&self, expr: &Expr) -> String {
        match expr {
            Expr::Constant { value } => constant(value),

            Expr::Name { id } => {
                if self.self_name == Some(id.as_str()) {
                    SELF_TOKEN.to_string()
                } else {
                    id.clone()
                }
            }

            Expr::Attribute { value, attr } => {
                format!("{}.{}", self.operand(value, PREC_ATOM, false), attr)
            }

            Expr::List { elts } => format!("[{}]", self.join(elts)),

            Expr::Dict { keys, values } => {
                if values.is_empty() {
                    return "{}".to_string();
                }
                let entries: Vec<String> = keys
                    .iter()
                    .zip(values)
                    .map(|(key, value)| match key {
                        Some(key) => format!("{}: {}", self.translate(key), self.translate(value)),
                        None => format!("...{}", self.operand(value, PREC_UNARY, false)),
                    })
                    .collect();
                format!("{{ {} }}", entries.join(", "))
            }

            Expr::Compare {
                left,
                ops,
                comparators,
            } => {
                let prec = precedence(expr);
                let mut out = self.operand(left, prec, false);
                for (op, right) in ops.iter().zip(comparators) {
                    out.push(' ');
                    out.push_str(map_operator(*op));
                    out.push(' ');
                    out.push_str(&self.operand(right, prec, true));
                }
                out
            }

            Expr::BoolOp { op, values } => {
                let prec = bool_precedence(*op);
                let separator = format!(" {} ", map_operator(*op));
                values
                    .iter()
                    .map(|value| self.operand(value, prec, false))
                    .collect::<Vec<_>>()
                    .join(&separator)
            }

            Expr::BinOp { left, op, right } => {
                let prec = precedence(expr);
                format!(
                    "{} {} {}",
                    self.operand(left, prec, false),
                    map_operator(*op),
                    self.operand(right, prec, true)
                )
            }

            Expr::UnaryOp { op, operand } => {
                let Some(symbol) = op.symbol() else {
                    tracing::debug!(?op, "unary operator has no javascript symbol");
                    return UNMAPPED.to_string();
                };
                // `- -x` must not collapse into the `--` operator.
                let inner = if precedence(operand) <= PREC_UNARY {
                    format!("({})", self.translate(operand))
                } else {
                    self.translate(operand)
                };
                format!("{symbol}{inner}")
            }

            Expr::Call { func, args, .. } => self.call(func, args),

            Expr::JoinedStr { values } => self.template(values),

            Expr::Tuple { .. } => {
                tracing::debug!("tuple expression has no javascript form");
                UNMAPPED.to_string()
            }

            Expr::Unsupported { kind } => {
                tracing::debug!(?kind, "unsupported expression");
                UNMAPPED.to_string()
            }
        }
    }

    fn call(&self, func: &Expr, args: &[Expr]) -> String {
        if let Expr::Name { id } = func {
            match id.as_str() {
                "print" => return format!("console.log({})", self.join(args)),
                "input" => {
                    let message = args
                        .first()
                        .map(|arg| self.translate(arg))
                        .unwrap_or_else(|| "\"\"".to_string());
                    return format!("prompt({message})");
                }
                _ => {}
            }
        }
        format!("{}({})", self.operand(func, PREC_ATOM, false), self.join(args))
    }

    fn template(&self, parts: &[FStringPart]) -> String {
        let mut out = String::from("`");
        for part in parts {
            match part {
                FStringPart::Literal(text) => out.push_str(&escape_template(text)),
                FStringPart::Expr(expr) => {
                    out.push_str("${");
                    out.push_str(&self.translate(expr));
                    out.push('}');
                }
            }
        }
        out.push('`');
        out
    }

    /// Translate an operand, parenthesized when the tree groups it more
    /// loosely than its parent operator binds.
    fn operand(&self, expr: &Expr, parent: u8, right: bool) -> String {
        let prec = precedence(expr);
        if prec < parent || (right && prec == parent) {
            format!("({})", self.translate(expr))
        } else {
            self.translate(expr)
        }
    }

    fn join(&self, exprs: &[Expr]) -> String {
        exprs
            .iter()
            .map(|expr| self.translate(expr))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Render a literal constant.
pub fn constant(value: &Constant) -> String {
    match value {
        Constant::None => "null".to_string(),
        Constant::Bool(true) => "true".to_string(),
        Constant::Bool(false) => "false".to_string(),
        Constant::Int(text) | Constant::Float(text) => text.clone(),
        Constant::Str(s) => format!("\"{}\"", escape_string(s)),
    }
}

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::BoolOp { op, .. } => bool_precedence(*op),
        Expr::Compare { ops, .. } => compare_precedence(ops),
        Expr::BinOp { op, .. } => {
            use crate::ast::Operator::*;
            match op {
                Add | Sub => PREC_ADDITIVE,
                Pow => PREC_POWER,
                Mult | Div | FloorDiv | Mod | MatMult => PREC_MULTIPLICATIVE,
                LShift | RShift | BitAnd | BitOr | BitXor => PREC_EQUALITY,
            }
        }
        Expr::UnaryOp { op, .. } if op.symbol().is_some() => PREC_UNARY,
        _ => PREC_ATOM,
    }
}

/// JavaScript binds `<` tighter than `==`; a mixed chain takes the looser level.
fn compare_precedence(ops: &[CmpOp]) -> u8 {
    let relational = ops
        .iter()
        .all(|op| matches!(op, CmpOp::Lt | CmpOp::LtE | CmpOp::Gt | CmpOp::GtE));
    if relational {
        PREC_RELATIONAL
    } else {
        PREC_EQUALITY
    }
}

fn bool_precedence(op: BoolOp) -> u8 {
    match op {
        BoolOp::Or => PREC_OR,
        BoolOp::And => PREC_AND,
    }
}

fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn escape_template(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CmpOp, ExprKind, Keyword, Operator, UnaryOp};

    fn js(expr: &Expr) -> String {
        ExprTranslator::default().translate(expr)
    }

    #[test]
    fn test_constants() {
        assert_eq!(js(&Expr::int(10)), "10");
        assert_eq!(js(&Expr::str("hi \"there\"")), "\"hi \\\"there\\\"\"");
        let none = Expr::Constant {
            value: Constant::None,
        };
        assert_eq!(js(&none), "null");
        let flag = Expr::Constant {
            value: Constant::Bool(true),
        };
        assert_eq!(js(&flag), "true");
    }

    #[test]
    fn test_self_attribute_rewritten_in_method() {
        let expr = Expr::attribute(Expr::name("self"), "name");
        assert_eq!(ExprTranslator::new(Some("self")).translate(&expr), "this.name");
        assert_eq!(js(&expr), "self.name");
    }

    #[test]
    fn test_nested_attribute() {
        let expr = Expr::attribute(Expr::attribute(Expr::name("a"), "b"), "c");
        assert_eq!(js(&expr), "a.b.c");
    }

    #[test]
    fn test_list_and_dict() {
        let list = Expr::List {
            elts: vec![Expr::int(1), Expr::int(2), Expr::int(3)],
        };
        assert_eq!(js(&list), "[1, 2, 3]");

        let dict = Expr::Dict {
            keys: vec![Some(Expr::str("x")), Some(Expr::name("k"))],
            values: vec![Expr::int(1), Expr::int(2)],
        };
        assert_eq!(js(&dict), "{ \"x\": 1, k: 2 }");

        let empty = Expr::Dict {
            keys: vec![],
            values: vec![],
        };
        assert_eq!(js(&empty), "{}");
    }

    #[test]
    fn test_comparison_chain() {
        let expr = Expr::Compare {
            left: Box::new(Expr::int(0)),
            ops: vec![CmpOp::Lt, CmpOp::LtE],
            comparators: vec![Expr::name("x"), Expr::int(10)],
        };
        assert_eq!(js(&expr), "0 < x <= 10");
    }

    #[test]
    fn test_bool_op_joins_all_values() {
        let expr = Expr::BoolOp {
            op: BoolOp::And,
            values: vec![Expr::name("a"), Expr::name("b"), Expr::name("c")],
        };
        assert_eq!(js(&expr), "a && b && c");
    }

    #[test]
    fn test_unmapped_operator_is_null() {
        let expr = Expr::binop(Expr::name("a"), Operator::Mod, Expr::int(2));
        assert_eq!(js(&expr), "a null 2");
    }

    #[test]
    fn test_grouping_survives() {
        let sum = Expr::binop(Expr::name("a"), Operator::Add, Expr::name("b"));
        let product = Expr::binop(sum, Operator::Mult, Expr::name("c"));
        assert_eq!(js(&product), "(a + b) * c");

        let flat = Expr::binop(
            Expr::binop(Expr::name("a"), Operator::Sub, Expr::name("b")),
            Operator::Sub,
            Expr::name("c"),
        );
        assert_eq!(js(&flat), "a - b - c");

        let right = Expr::binop(
            Expr::name("a"),
            Operator::Sub,
            Expr::binop(Expr::name("b"), Operator::Sub, Expr::name("c")),
        );
        assert_eq!(js(&right), "a - (b - c)");
    }

    #[test]
    fn test_equality_groups_below_relational() {
        let eq = Expr::compare(Expr::name("a"), CmpOp::Eq, Expr::name("b"));
        let grouped = Expr::compare(eq, CmpOp::Lt, Expr::name("c"));
        assert_eq!(js(&grouped), "(a == b) < c");

        let lt = Expr::compare(Expr::name("b"), CmpOp::Lt, Expr::name("c"));
        let nested = Expr::compare(Expr::name("a"), CmpOp::Eq, lt);
        assert_eq!(js(&nested), "a == b < c");
    }

    #[test]
    fn test_not_wraps_comparison() {
        let expr = Expr::UnaryOp {
            op: UnaryOp::Not,
            operand: Box::new(Expr::compare(Expr::name("a"), CmpOp::Eq, Expr::name("b"))),
        };
        assert_eq!(js(&expr), "!(a == b)");

        let neg = Expr::UnaryOp {
            op: UnaryOp::USub,
            operand: Box::new(Expr::int(1)),
        };
        assert_eq!(js(&neg), "-1");
    }

    #[test]
    fn test_print_becomes_console_log() {
        let expr = Expr::call(Expr::name("print"), vec![Expr::str("a"), Expr::name("b")]);
        assert_eq!(js(&expr), "console.log(\"a\", b)");
    }

    #[test]
    fn test_input_becomes_prompt() {
        let expr = Expr::call(Expr::name("input"), vec![Expr::str("Name?")]);
        assert_eq!(js(&expr), "prompt(\"Name?\")");
        let bare = Expr::call(Expr::name("input"), vec![]);
        assert_eq!(js(&bare), "prompt(\"\")");
    }

    #[test]
    fn test_method_call_keeps_keywords_out() {
        let expr = Expr::Call {
            func: Box::new(Expr::attribute(Expr::name("p"), "introduce")),
            args: vec![],
            keywords: vec![Keyword {
                arg: Some("loud".to_string()),
                value: Expr::name("True"),
            }],
        };
        assert_eq!(js(&expr), "p.introduce()");
    }

    #[test]
    fn test_template_literal() {
        let expr = Expr::JoinedStr {
            values: vec![
                FStringPart::Literal("Number: ".to_string()),
                FStringPart::Expr(Expr::name("num")),
            ],
        };
        assert_eq!(js(&expr), "`Number: ${num}`");

        let tricky = Expr::JoinedStr {
            values: vec![FStringPart::Literal("a `b` ${c}\n".to_string())],
        };
        assert_eq!(js(&tricky), "`a \\`b\\` \\${c}\\n`");
    }

    #[test]
    fn test_unsupported_expression_is_null() {
        assert_eq!(js(&Expr::unsupported(ExprKind::Lambda)), "null");
        assert_eq!(js(&Expr::Tuple { elts: vec![Expr::int(1)] }), "null");
    }
}
