//! Python syntax tree consumed by the JavaScript writer.
//!
//! The shape follows Python's own `ast` module closely enough that node kind
//! names (used in fallback comments) match what Python programmers expect.
//! Only the fields the writer reads are carried; constructs the writer does
//! not translate are kept as `Unsupported(kind)`.

use serde::Serialize;

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Module {
    pub body: Vec<Stmt>,
}

impl Module {
    pub fn new(body: Vec<Stmt>) -> Self {
        Self { body }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Stmt {
    /// `a = b = value` keeps every target, in source order.
    Assign { targets: Vec<Expr>, value: Expr },
    AugAssign {
        target: Expr,
        op: Operator,
        value: Expr,
    },
    Expr { value: Expr },
    If {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    For {
        target: Expr,
        iter: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    While {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    FunctionDef(FunctionDef),
    ClassDef { name: String, body: Vec<Stmt> },
    Match { subject: Expr, cases: Vec<MatchCase> },
    Try {
        body: Vec<Stmt>,
        handlers: Vec<ExceptHandler>,
        orelse: Vec<Stmt>,
        finalbody: Vec<Stmt>,
    },
    Return { value: Option<Expr> },
    Raise { exc: Option<Expr> },
    Pass,
    Break,
    Continue,
    Unsupported { kind: StmtKind },
}

impl Stmt {
    pub fn assign(target: Expr, value: Expr) -> Self {
        Stmt::Assign {
            targets: vec![target],
            value,
        }
    }

    pub fn expr(value: Expr) -> Self {
        Stmt::Expr { value }
    }

    pub fn if_stmt(test: Expr, body: Vec<Stmt>, orelse: Vec<Stmt>) -> Self {
        Stmt::If { test, body, orelse }
    }

    pub fn unsupported(kind: StmtKind) -> Self {
        Stmt::Unsupported { kind }
    }

    /// The Python `ast` class name of this statement.
    pub fn kind(&self) -> StmtKind {
        match self {
            Stmt::Assign { .. } => StmtKind::Assign,
            Stmt::AugAssign { .. } => StmtKind::AugAssign,
            Stmt::Expr { .. } => StmtKind::Expr,
            Stmt::If { .. } => StmtKind::If,
            Stmt::For { .. } => StmtKind::For,
            Stmt::While { .. } => StmtKind::While,
            Stmt::FunctionDef(_) => StmtKind::FunctionDef,
            Stmt::ClassDef { .. } => StmtKind::ClassDef,
            Stmt::Match { .. } => StmtKind::Match,
            Stmt::Try { .. } => StmtKind::Try,
            Stmt::Return { .. } => StmtKind::Return,
            Stmt::Raise { .. } => StmtKind::Raise,
            Stmt::Pass => StmtKind::Pass,
            Stmt::Break => StmtKind::Break,
            Stmt::Continue => StmtKind::Continue,
            Stmt::Unsupported { kind } => *kind,
        }
    }
}

/// Statement kinds, named after Python's `ast` classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StmtKind {
    Assign,
    AugAssign,
    AnnAssign,
    Expr,
    If,
    For,
    AsyncFor,
    While,
    FunctionDef,
    AsyncFunctionDef,
    ClassDef,
    Match,
    Try,
    TryStar,
    Return,
    Raise,
    Pass,
    Break,
    Continue,
    Import,
    ImportFrom,
    Global,
    Nonlocal,
    Delete,
    Assert,
    With,
    AsyncWith,
    TypeAlias,
    Unknown,
}

impl StmtKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StmtKind::Assign => "Assign",
            StmtKind::AugAssign => "AugAssign",
            StmtKind::AnnAssign => "AnnAssign",
            StmtKind::Expr => "Expr",
            StmtKind::If => "If",
            StmtKind::For => "For",
            StmtKind::AsyncFor => "AsyncFor",
            StmtKind::While => "While",
            StmtKind::FunctionDef => "FunctionDef",
            StmtKind::AsyncFunctionDef => "AsyncFunctionDef",
            StmtKind::ClassDef => "ClassDef",
            StmtKind::Match => "Match",
            StmtKind::Try => "Try",
            StmtKind::TryStar => "TryStar",
            StmtKind::Return => "Return",
            StmtKind::Raise => "Raise",
            StmtKind::Pass => "Pass",
            StmtKind::Break => "Break",
            StmtKind::Continue => "Continue",
            StmtKind::Import => "Import",
            StmtKind::ImportFrom => "ImportFrom",
            StmtKind::Global => "Global",
            StmtKind::Nonlocal => "Nonlocal",
            StmtKind::Delete => "Delete",
            StmtKind::Assert => "Assert",
            StmtKind::With => "With",
            StmtKind::AsyncWith => "AsyncWith",
            StmtKind::TypeAlias => "TypeAlias",
            StmtKind::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for StmtKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDef {
    pub name: String,
    /// Parameter names as written; `*args` is kept as `...args`.
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
}

impl FunctionDef {
    pub fn new(name: impl Into<String>, params: Vec<String>, body: Vec<Stmt>) -> Self {
        Self {
            name: name.into(),
            params,
            body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchCase {
    pub pattern: Pattern,
    pub guard: Option<Expr>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum Pattern {
    /// `case "A":`, `case 1:`, `case Color.RED:`
    Value(Expr),
    /// `case None:`, `case True:`
    Singleton(Constant),
    /// `case _:`
    Wildcard,
    /// `case name:`
    Capture(String),
    Unsupported(PatternKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PatternKind {
    MatchAs,
    MatchOr,
    MatchSequence,
    MatchMapping,
    MatchClass,
    MatchStar,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExceptHandler {
    /// Exception type expression, `None` for a bare `except:`.
    pub type_: Option<Expr>,
    pub name: Option<String>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expr {
    Constant { value: Constant },
    Name { id: String },
    Attribute { value: Box<Expr>, attr: String },
    List { elts: Vec<Expr> },
    Tuple { elts: Vec<Expr> },
    /// A `None` key is a `**mapping` entry.
    Dict {
        keys: Vec<Option<Expr>>,
        values: Vec<Expr>,
    },
    Compare {
        left: Box<Expr>,
        ops: Vec<CmpOp>,
        comparators: Vec<Expr>,
    },
    BoolOp { op: BoolOp, values: Vec<Expr> },
    BinOp {
        left: Box<Expr>,
        op: Operator,
        right: Box<Expr>,
    },
    UnaryOp { op: UnaryOp, operand: Box<Expr> },
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        keywords: Vec<Keyword>,
    },
    JoinedStr { values: Vec<FStringPart> },
    Unsupported { kind: ExprKind },
}

impl Expr {
    pub fn name(id: impl Into<String>) -> Self {
        Expr::Name { id: id.into() }
    }

    pub fn int(value: i64) -> Self {
        Expr::Constant {
            value: Constant::Int(value.to_string()),
        }
    }

    pub fn str(value: impl Into<String>) -> Self {
        Expr::Constant {
            value: Constant::Str(value.into()),
        }
    }

    pub fn attribute(value: Expr, attr: impl Into<String>) -> Self {
        Expr::Attribute {
            value: Box::new(value),
            attr: attr.into(),
        }
    }

    pub fn binop(left: Expr, op: Operator, right: Expr) -> Self {
        Expr::BinOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn compare(left: Expr, op: CmpOp, right: Expr) -> Self {
        Expr::Compare {
            left: Box::new(left),
            ops: vec![op],
            comparators: vec![right],
        }
    }

    pub fn call(func: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            func: Box::new(func),
            args,
            keywords: Vec::new(),
        }
    }

    pub fn unsupported(kind: ExprKind) -> Self {
        Expr::Unsupported { kind }
    }
}

/// Literal values. Numbers keep their source spelling.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum Constant {
    None,
    Bool(bool),
    Int(String),
    Float(String),
    Str(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum FStringPart {
    Literal(String),
    Expr(Expr),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyword {
    /// `None` for `**kwargs`.
    pub arg: Option<String>,
    pub value: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExprKind {
    Subscript,
    Slice,
    Lambda,
    IfExp,
    ListComp,
    SetComp,
    DictComp,
    GeneratorExp,
    Set,
    Await,
    Yield,
    NamedExpr,
    Starred,
    Ellipsis,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operator {
    Add,
    Sub,
    Mult,
    Div,
    FloorDiv,
    Mod,
    Pow,
    MatMult,
    LShift,
    RShift,
    BitAnd,
    BitOr,
    BitXor,
}

impl Operator {
    /// Parse a Python binary operator token (`+`, `//`, ...).
    pub fn from_token(token: &str) -> Option<Self> {
        let op = match token {
            "+" => Operator::Add,
            "-" => Operator::Sub,
            "*" => Operator::Mult,
            "/" => Operator::Div,
            "//" => Operator::FloorDiv,
            "%" => Operator::Mod,
            "**" => Operator::Pow,
            "@" => Operator::MatMult,
            "<<" => Operator::LShift,
            ">>" => Operator::RShift,
            "&" => Operator::BitAnd,
            "|" => Operator::BitOr,
            "^" => Operator::BitXor,
            _ => return None,
        };
        Some(op)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    IsNot,
    In,
    NotIn,
}

impl CmpOp {
    pub fn from_token(token: &str) -> Option<Self> {
        let op = match token {
            "==" => CmpOp::Eq,
            "!=" | "<>" => CmpOp::NotEq,
            "<" => CmpOp::Lt,
            "<=" => CmpOp::LtE,
            ">" => CmpOp::Gt,
            ">=" => CmpOp::GtE,
            "is" => CmpOp::Is,
            "is not" => CmpOp::IsNot,
            "in" => CmpOp::In,
            "not in" => CmpOp::NotIn,
            _ => return None,
        };
        Some(op)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BoolOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    Not,
    USub,
    UAdd,
    Invert,
}
