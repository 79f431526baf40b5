//! AST node types for Falcon.
//!
//! The parser lowers the token stream into these nodes; the evaluator
//! walks them directly. Every node carries the span it was parsed from so
//! diagnostics can name the originating line.
//!
//! Expressions are deliberately shallow: an expression is a single operand
//! or exactly one binary operation over two operands. There is no operator
//! precedence because there are no operator chains.

use crate::{Span, TokenKind};
use std::fmt;

/// A parsed source file: the statement list of one module.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

impl Program {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Program { stmts }
    }
}

/// Statement node.
#[derive(Clone, Eq, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Statement kinds.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum StmtKind {
    /// Variable declaration: `let` / `const` / `secure let` / `secure const`.
    Decl {
        name: String,
        init: Expr,
        constant: bool,
        secure: bool,
    },

    /// `if` / `elseif` / `else` chain. Arms are tried in order; the first
    /// arm whose condition holds runs. `else_body` runs when none hold.
    If {
        arms: Vec<IfArm>,
        else_body: Option<Vec<Stmt>>,
    },

    /// `repeat N ... endrepeat` with a literal non-negative count.
    Repeat { count: u64, body: Vec<Stmt> },

    /// `fn name(params) { ... }` definition.
    FnDef {
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
    },

    /// `return` with an optional value.
    Return { value: Option<Expr> },

    /// `break` out of the innermost `repeat`.
    Break,

    /// `continue` with the next iteration of the innermost `repeat`.
    Continue,

    /// `try ... catch ["filter"] ... endtry`.
    Try {
        body: Vec<Stmt>,
        catch: Option<CatchClause>,
    },

    /// `import "name"`: execute a sibling module against the shared
    /// global scope.
    Import { module: String },

    /// `print(expr)` / `say expr`: write the rendered value to program
    /// output.
    Print { value: Expr },

    /// `log expr`: write the rendered value to the log stream.
    Log { value: Expr },

    /// Bare call statement; the result is discarded.
    Expr { expr: Expr },
}

/// One `if`/`elseif` arm: a condition and the body it guards.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct IfArm {
    pub cond: Cond,
    pub body: Vec<Stmt>,
}

/// The handler half of a `try` statement.
///
/// `filter` is the optional bracketed substring; a handler with no filter
/// catches every error raised in the `try` body.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CatchClause {
    pub filter: Option<String>,
    pub body: Vec<Stmt>,
}

/// A condition: always a single binary comparison, never a connective.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Cond {
    pub lhs: Expr,
    pub op: CmpOp,
    pub rhs: Expr,
    pub span: Span,
}

/// Expression node.
#[derive(Clone, Eq, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Expression kinds.
///
/// `Binary` operands are always non-binary (the grammar admits one
/// operator per expression), so the tree bottoms out after one level.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ExprKind {
    /// Integer literal.
    Int(i64),
    /// String literal.
    Str(String),
    /// Variable reference.
    Ident(String),
    /// List literal: `[1, 2, "a"]`.
    List(Vec<Expr>),
    /// Map literal: `{ "key": value }`. Entries keep source order;
    /// rendering sorts keys.
    Map(Vec<(String, Expr)>),
    /// Single binary arithmetic operation.
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// User function call: `name(args)`.
    Call { name: String, args: Vec<Expr> },
    /// Builtin call: `crypto.hash(x)`, `time.now()`, ...
    Builtin { builtin: Builtin, args: Vec<Expr> },
}

/// Binary arithmetic operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    /// Returns the source-level symbol for this operator.
    ///
    /// Used in error messages to show the exact operator that failed.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }

    /// Map an operator token to its `BinOp`, if it is one.
    pub fn from_token(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Self::Add),
            TokenKind::Minus => Some(Self::Sub),
            TokenKind::Star => Some(Self::Mul),
            TokenKind::Slash => Some(Self::Div),
            _ => None,
        }
    }
}

/// Comparison operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl CmpOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
        }
    }

    /// Map a comparison token to its `CmpOp`, if it is one.
    pub fn from_token(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::EqEq => Some(Self::Eq),
            TokenKind::NotEq => Some(Self::NotEq),
            TokenKind::Lt => Some(Self::Lt),
            TokenKind::LtEq => Some(Self::LtEq),
            TokenKind::Gt => Some(Self::Gt),
            TokenKind::GtEq => Some(Self::GtEq),
            _ => None,
        }
    }
}

/// The fixed builtin surface.
///
/// Builtins dispatch by kind with a fixed arity; the evaluator checks the
/// argument count at the call site before touching any argument value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Builtin {
    AiAsk,
    AiGenerateCode,
    AiExplain,
    AiRefactor,
    CryptoHash,
    CryptoEncrypt,
    CryptoDecrypt,
    CryptoRandom,
    FileRead,
    FileWrite,
    NetworkSend,
    TimeNow,
    Wait,
}

impl Builtin {
    /// The dotted source-level name, as written in scripts.
    pub const fn name(self) -> &'static str {
        match self {
            Self::AiAsk => "ai.ask",
            Self::AiGenerateCode => "ai.generateCode",
            Self::AiExplain => "ai.explain",
            Self::AiRefactor => "ai.refactor",
            Self::CryptoHash => "crypto.hash",
            Self::CryptoEncrypt => "crypto.encrypt",
            Self::CryptoDecrypt => "crypto.decrypt",
            Self::CryptoRandom => "crypto.random",
            Self::FileRead => "file.read",
            Self::FileWrite => "file.write",
            Self::NetworkSend => "network.send",
            Self::TimeNow => "time.now",
            Self::Wait => "wait",
        }
    }

    /// Number of arguments the builtin requires. Exact, not a minimum.
    pub const fn arity(self) -> usize {
        match self {
            Self::TimeNow => 0,
            Self::AiAsk
            | Self::AiGenerateCode
            | Self::AiExplain
            | Self::AiRefactor
            | Self::CryptoHash
            | Self::FileRead
            | Self::Wait => 1,
            Self::CryptoEncrypt
            | Self::CryptoDecrypt
            | Self::CryptoRandom
            | Self::FileWrite
            | Self::NetworkSend => 2,
        }
    }

    /// Map a builtin-head token to its `Builtin`, if it is one.
    pub fn from_token(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::AiAsk => Some(Self::AiAsk),
            TokenKind::AiGenerateCode => Some(Self::AiGenerateCode),
            TokenKind::AiExplain => Some(Self::AiExplain),
            TokenKind::AiRefactor => Some(Self::AiRefactor),
            TokenKind::CryptoHash => Some(Self::CryptoHash),
            TokenKind::CryptoEncrypt => Some(Self::CryptoEncrypt),
            TokenKind::CryptoDecrypt => Some(Self::CryptoDecrypt),
            TokenKind::CryptoRandom => Some(Self::CryptoRandom),
            TokenKind::FileRead => Some(Self::FileRead),
            TokenKind::FileWrite => Some(Self::FileWrite),
            TokenKind::NetworkSend => Some(Self::NetworkSend),
            TokenKind::TimeNow => Some(Self::TimeNow),
            TokenKind::Wait => Some(Self::Wait),
            _ => None,
        }
    }
}
