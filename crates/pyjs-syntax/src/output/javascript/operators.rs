//! Python operator to JavaScript symbol lookup.

use crate::ast::{BoolOp, CmpOp, Operator, UnaryOp};

/// Text emitted in place of an operator with no JavaScript counterpart.
pub const UNMAPPED: &str = "null";

/// An operator kind with an optional JavaScript spelling.
pub trait Symbol: Copy {
    fn symbol(self) -> Option<&'static str>;
}

impl Symbol for CmpOp {
    fn symbol(self) -> Option<&'static str> {
        match self {
            CmpOp::Eq => Some("=="),
            CmpOp::NotEq => Some("!="),
            CmpOp::Lt => Some("<"),
            CmpOp::LtE => Some("<="),
            CmpOp::Gt => Some(">"),
            CmpOp::GtE => Some(">="),
            CmpOp::Is | CmpOp::IsNot | CmpOp::In | CmpOp::NotIn => None,
        }
    }
}

impl Symbol for Operator {
    fn symbol(self) -> Option<&'static str> {
        match self {
            Operator::Add => Some("+"),
            Operator::Sub => Some("-"),
            Operator::Mult => Some("*"),
            Operator::Div => Some("/"),
            Operator::FloorDiv
            | Operator::Mod
            | Operator::Pow
            | Operator::MatMult
            | Operator::LShift
            | Operator::RShift
            | Operator::BitAnd
            | Operator::BitOr
            | Operator::BitXor => None,
        }
    }
}

impl Symbol for BoolOp {
    fn symbol(self) -> Option<&'static str> {
        match self {
            BoolOp::And => Some("&&"),
            BoolOp::Or => Some("||"),
        }
    }
}

impl Symbol for UnaryOp {
    fn symbol(self) -> Option<&'static str> {
        match self {
            UnaryOp::Not => Some("!"),
            UnaryOp::USub => Some("-"),
            UnaryOp::UAdd => Some("+"),
            UnaryOp::Invert => None,
        }
    }
}

/// Map an operator to its JavaScript symbol, or [`UNMAPPED`].
pub fn map_operator(op: impl Symbol + std::fmt::Debug) -> &'static str {
    op.symbol().unwrap_or_else(|| {
        tracing::debug!(?op, "operator has no javascript symbol");
        UNMAPPED
    })
}
