//! Lexer for Falcon using logos.
//!
//! Converts source text into the closed [`TokenKind`] set. Two-word
//! declaration heads (`secure let`, `secure const`) and dotted builtin
//! names (`crypto.hash`, `ai.ask`, ...) are recognized by the DFA as
//! single tokens; the parser never reassembles them. Lexing fails fast:
//! the first character that matches no pattern aborts with a
//! `SyntaxError` naming it.

use falcon_diagnostic::{Diagnostic, ErrorKind};
use falcon_ir::{Span, Token, TokenKind};
use logos::Logos;

/// Raw token from logos, before payload conversion.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r]+")] // Skip horizontal whitespace
enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("\n")]
    Newline,

    // Declaration heads. The two-word forms win over a bare `secure`
    // identifier by maximal munch; interior whitespace is horizontal only.
    #[regex(r"secure[ \t]+let")]
    SecureLet,
    #[regex(r"secure[ \t]+const")]
    SecureConst,
    #[token("let")]
    Let,
    #[token("const")]
    Const,

    #[token("if")]
    If,
    #[token("elseif")]
    Elseif,
    #[token("else")]
    Else,
    #[token("endif")]
    Endif,
    #[token("repeat")]
    Repeat,
    #[token("endrepeat")]
    Endrepeat,
    #[token("try")]
    Try,
    #[token("catch")]
    Catch,
    #[token("endtry")]
    Endtry,
    #[token("fn")]
    Fn,
    #[token("return")]
    Return,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("import")]
    Import,

    #[token("print")]
    Print,
    #[token("say")]
    Say,
    #[token("log")]
    Log,

    // Builtin heads
    #[token("ai.ask")]
    AiAsk,
    #[token("ai.generateCode")]
    AiGenerateCode,
    #[token("ai.explain")]
    AiExplain,
    #[token("ai.refactor")]
    AiRefactor,
    #[token("crypto.hash")]
    CryptoHash,
    #[token("crypto.encrypt")]
    CryptoEncrypt,
    #[token("crypto.decrypt")]
    CryptoDecrypt,
    #[token("crypto.random")]
    CryptoRandom,
    #[token("file.read")]
    FileRead,
    #[token("file.write")]
    FileWrite,
    #[token("network.send")]
    NetworkSend,
    #[token("time.now")]
    TimeNow,
    #[token("wait")]
    Wait,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,

    // Operators
    #[token("==")]
    EqEq,
    #[token("=")]
    Assign,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token("<")]
    Lt,
    #[token(">=")]
    GtEq,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    // Integer
    #[regex(r"[0-9][0-9_]*", |lex| {
        lex.slice().replace('_', "").parse::<i64>().ok()
    })]
    Int(i64),

    // String literal (no unescaped newlines allowed)
    #[regex(r#""([^"\\\n\r]|\\.)*""#)]
    Str,

    // Identifier
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Lex source text into a token vector, terminated by an `Eof` token.
///
/// The first unrecognizable input aborts the whole tokenization with a
/// `SyntaxError`; there is no error-token recovery at this level.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Diagnostic> {
    let mut result = Vec::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();

        match token_result {
            Ok(raw) => match raw {
                RawToken::LineComment => {}
                RawToken::Newline => {
                    result.push(Token::new(TokenKind::Newline, span));
                }
                _ => {
                    let kind = convert_token(raw, slice);
                    result.push(Token::new(kind, span));
                }
            },
            Err(()) => {
                return Err(syntax_error(slice).with_span(span));
            }
        }
    }

    // Add EOF token
    let eof_pos = u32::try_from(source.len())
        .unwrap_or_else(|_| panic!("source file exceeds {} bytes", u32::MAX));
    result.push(Token::new(TokenKind::Eof, Span::point(eof_pos)));

    Ok(result)
}

/// Convert a raw token to a `TokenKind`, resolving payloads.
fn convert_token(raw: RawToken, slice: &str) -> TokenKind {
    match raw {
        // Literals
        RawToken::Int(n) => TokenKind::Int(n),
        RawToken::Str => {
            let content = &slice[1..slice.len() - 1];
            TokenKind::Str(unescape_string(content))
        }
        RawToken::Ident => TokenKind::Ident(slice.to_string()),

        // Declarations
        RawToken::SecureLet => TokenKind::SecureLet,
        RawToken::SecureConst => TokenKind::SecureConst,
        RawToken::Let => TokenKind::Let,
        RawToken::Const => TokenKind::Const,

        // Control flow
        RawToken::If => TokenKind::If,
        RawToken::Elseif => TokenKind::Elseif,
        RawToken::Else => TokenKind::Else,
        RawToken::Endif => TokenKind::Endif,
        RawToken::Repeat => TokenKind::Repeat,
        RawToken::Endrepeat => TokenKind::Endrepeat,
        RawToken::Try => TokenKind::Try,
        RawToken::Catch => TokenKind::Catch,
        RawToken::Endtry => TokenKind::Endtry,
        RawToken::Fn => TokenKind::Fn,
        RawToken::Return => TokenKind::Return,
        RawToken::Break => TokenKind::Break,
        RawToken::Continue => TokenKind::Continue,
        RawToken::Import => TokenKind::Import,

        // Output
        RawToken::Print => TokenKind::Print,
        RawToken::Say => TokenKind::Say,
        RawToken::Log => TokenKind::Log,

        // Builtin heads
        RawToken::AiAsk => TokenKind::AiAsk,
        RawToken::AiGenerateCode => TokenKind::AiGenerateCode,
        RawToken::AiExplain => TokenKind::AiExplain,
        RawToken::AiRefactor => TokenKind::AiRefactor,
        RawToken::CryptoHash => TokenKind::CryptoHash,
        RawToken::CryptoEncrypt => TokenKind::CryptoEncrypt,
        RawToken::CryptoDecrypt => TokenKind::CryptoDecrypt,
        RawToken::CryptoRandom => TokenKind::CryptoRandom,
        RawToken::FileRead => TokenKind::FileRead,
        RawToken::FileWrite => TokenKind::FileWrite,
        RawToken::NetworkSend => TokenKind::NetworkSend,
        RawToken::TimeNow => TokenKind::TimeNow,
        RawToken::Wait => TokenKind::Wait,

        // Punctuation
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Colon => TokenKind::Colon,

        // Operators
        RawToken::Assign => TokenKind::Assign,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,

        // Trivia (shouldn't reach here)
        RawToken::LineComment | RawToken::Newline => {
            unreachable!("trivia is handled before conversion")
        }
    }
}

/// Build the `SyntaxError` for a slice logos rejected.
///
/// A rejected slice is normally a single foreign character, but a numeric
/// literal whose value does not fit also fails its callback, as does an
/// unterminated string; both get a more specific message.
fn syntax_error(slice: &str) -> Diagnostic {
    let message = if slice.starts_with('"') {
        "unterminated string literal".to_string()
    } else if slice.starts_with(|c: char| c.is_ascii_digit()) && slice.len() > 1 {
        format!("integer literal '{slice}' is out of range")
    } else {
        let c = slice.chars().next().unwrap_or('\0');
        format!("unexpected character '{c}'")
    };
    Diagnostic::new(ErrorKind::Syntax, message)
}

/// Process string escape sequences.
fn unescape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('\\') | None => result.push('\\'),
                Some('"') => result.push('"'),
                Some('0') => result.push('\0'),
                Some(other) => {
                    // Unknown escape: keep both characters as written.
                    result.push('\\');
                    result.push(other);
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}
