//! Token types for the Falcon lexer.

use super::Span;
use std::fmt;

/// A token with its span in the source.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }

    /// Create a dummy token for testing/generated code.
    pub fn dummy(kind: TokenKind) -> Self {
        Token {
            kind,
            span: Span::DUMMY,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

/// Token kinds for Falcon.
///
/// The set is closed: every character sequence the lexer accepts maps to
/// exactly one of these. Two-word declaration heads (`secure let`,
/// `secure const`) and dotted builtin names (`crypto.hash`, `ai.ask`, ...)
/// lex as single tokens, so the parser never reassembles them.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// Integer literal: 42, `1_000`
    Int(i64),
    /// String literal with escapes resolved: "hello"
    Str(String),
    /// Identifier
    Ident(String),

    // Declarations
    Let,
    Const,
    SecureLet,
    SecureConst,

    // Control flow
    If,
    Elseif,
    Else,
    Endif,
    Repeat,
    Endrepeat,
    Try,
    Catch,
    Endtry,
    Fn,
    Return,
    Break,
    Continue,
    Import,

    // Output statements
    Print,
    Say,
    Log,

    // Builtin heads (dotted names are single tokens)
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

    // Punctuation
    LParen,   // (
    RParen,   // )
    LBrace,   // {
    RBrace,   // }
    LBracket, // [
    RBracket, // ]
    Comma,    // ,
    Colon,    // :
    Assign,   // =

    // Operators
    Plus,  // +
    Minus, // -
    Star,  // *
    Slash, // /
    EqEq,  // ==
    NotEq, // !=
    Lt,    // <
    LtEq,  // <=
    Gt,    // >
    GtEq,  // >=

    Newline,
    Eof,

    /// Generic error token for unrecognized input.
    Error,
}

impl TokenKind {
    /// Human-readable description for parser error messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Int(v) => format!("integer literal {v}"),
            TokenKind::Str(_) => "string literal".to_string(),
            TokenKind::Ident(name) => format!("identifier '{name}'"),
            TokenKind::Newline => "end of line".to_string(),
            TokenKind::Eof => "end of file".to_string(),
            TokenKind::Error => "unrecognized input".to_string(),
            other => format!("'{}'", other.surface()),
        }
    }

    /// The source-level spelling of a fixed token.
    ///
    /// Payload-carrying kinds return a placeholder class name instead.
    pub fn surface(&self) -> &'static str {
        match self {
            TokenKind::Int(_) => "integer",
            TokenKind::Str(_) => "string",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Let => "let",
            TokenKind::Const => "const",
            TokenKind::SecureLet => "secure let",
            TokenKind::SecureConst => "secure const",
            TokenKind::If => "if",
            TokenKind::Elseif => "elseif",
            TokenKind::Else => "else",
            TokenKind::Endif => "endif",
            TokenKind::Repeat => "repeat",
            TokenKind::Endrepeat => "endrepeat",
            TokenKind::Try => "try",
            TokenKind::Catch => "catch",
            TokenKind::Endtry => "endtry",
            TokenKind::Fn => "fn",
            TokenKind::Return => "return",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Import => "import",
            TokenKind::Print => "print",
            TokenKind::Say => "say",
            TokenKind::Log => "log",
            TokenKind::AiAsk => "ai.ask",
            TokenKind::AiGenerateCode => "ai.generateCode",
            TokenKind::AiExplain => "ai.explain",
            TokenKind::AiRefactor => "ai.refactor",
            TokenKind::CryptoHash => "crypto.hash",
            TokenKind::CryptoEncrypt => "crypto.encrypt",
            TokenKind::CryptoDecrypt => "crypto.decrypt",
            TokenKind::CryptoRandom => "crypto.random",
            TokenKind::FileRead => "file.read",
            TokenKind::FileWrite => "file.write",
            TokenKind::NetworkSend => "network.send",
            TokenKind::TimeNow => "time.now",
            TokenKind::Wait => "wait",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Newline => "newline",
            TokenKind::Eof => "eof",
            TokenKind::Error => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_debug_includes_span() {
        let tok = Token::new(TokenKind::Let, Span::new(0, 3));
        assert_eq!(format!("{tok:?}"), "Let @ 0..3");
    }

    #[test]
    fn describe_payload_kinds() {
        assert_eq!(TokenKind::Int(7).describe(), "integer literal 7");
        assert_eq!(
            TokenKind::Ident("total".to_string()).describe(),
            "identifier 'total'"
        );
        assert_eq!(TokenKind::Eof.describe(), "end of file");
    }

    #[test]
    fn describe_fixed_kinds_quote_surface() {
        assert_eq!(TokenKind::SecureLet.describe(), "'secure let'");
        assert_eq!(TokenKind::CryptoHash.describe(), "'crypto.hash'");
        assert_eq!(TokenKind::Assign.describe(), "'='");
    }
}
