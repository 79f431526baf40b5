//! Recursive-descent grammar for Falcon.
//!
//! One parse function per construct, all returning `Result<_, Diagnostic>`
//! and failing on the first malformed statement. Spans are merged bottom-up
//! so every AST node covers exactly the tokens it was parsed from.
//!
//! Block bodies come in two shapes and share one routine: brace-delimited
//! (`{ ... }`) or bare statements terminated by the construct's closing
//! keyword (`endif`, `endrepeat`, `endtry`). After a brace-delimited body
//! the closing keyword is optional and only consumed when it sits on the
//! same line; a closer on its own line always belongs to the enclosing
//! construct.

use crate::cursor::Cursor;
use falcon_diagnostic::{Diagnostic, ErrorKind};
use falcon_ir::{
    BinOp, Builtin, CatchClause, CmpOp, Cond, Expr, ExprKind, IfArm, Program, Stmt, StmtKind,
    Token, TokenKind,
};
use tracing::trace;

/// Parse a token stream into a [`Program`].
pub fn parse(tokens: &[Token]) -> Result<Program, Diagnostic> {
    Parser::new(tokens).parse_program()
}

struct Parser<'a> {
    cursor: Cursor<'a>,
    /// Number of enclosing `repeat` bodies at the current parse point.
    /// A function body resets it: `break` cannot jump out of a function.
    loop_depth: u32,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            loop_depth: 0,
        }
    }

    fn parse_program(&mut self) -> Result<Program, Diagnostic> {
        let mut stmts = Vec::new();
        self.cursor.skip_newlines();
        while !self.cursor.at_eof() {
            stmts.push(self.parse_stmt()?);
            self.cursor.skip_newlines();
        }
        Ok(Program::new(stmts))
    }

    // ── Statements ──────────────────────────────────────────────────────

    fn parse_stmt(&mut self) -> Result<Stmt, Diagnostic> {
        trace!(token = self.cursor.current_kind().surface(), "parse_stmt");
        match self.cursor.current_kind() {
            TokenKind::SecureLet => self.parse_decl(false, true),
            TokenKind::SecureConst => self.parse_decl(true, true),
            TokenKind::Let => self.parse_decl(false, false),
            TokenKind::Const => self.parse_decl(true, false),
            TokenKind::If => self.parse_if(),
            TokenKind::Repeat => self.parse_repeat(),
            TokenKind::Fn => self.parse_fn_def(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Break => self.parse_loop_jump(StmtKind::Break, "break"),
            TokenKind::Continue => self.parse_loop_jump(StmtKind::Continue, "continue"),
            TokenKind::Try => self.parse_try(),
            TokenKind::Import => self.parse_import(),
            TokenKind::Print | TokenKind::Say | TokenKind::Log => self.parse_output(),
            TokenKind::Ident(_) => self.parse_call_stmt(),
            kind if Builtin::from_token(kind).is_some() => self.parse_builtin_stmt(),
            other => Err(Diagnostic::new(
                ErrorKind::Parse,
                format!("expected statement, found {}", other.describe()),
            )
            .with_span(self.cursor.current_span())),
        }
    }

    fn parse_decl(&mut self, constant: bool, secure: bool) -> Result<Stmt, Diagnostic> {
        let start = self.cursor.current_span();
        let head = self.cursor.advance().kind.surface();
        let (name, _) = self.cursor.expect_ident(&format!("after '{head}'"))?;
        self.cursor.expect(&TokenKind::Assign, "after variable name")?;
        let init = self.parse_expr()?;
        let span = start.merge(init.span);
        Ok(Stmt::new(
            StmtKind::Decl {
                name,
                init,
                constant,
                secure,
            },
            span,
        ))
    }

    fn parse_if(&mut self) -> Result<Stmt, Diagnostic> {
        let start = self.cursor.current_span();
        self.cursor.advance(); // if
        let stops = [TokenKind::Elseif, TokenKind::Else, TokenKind::Endif];

        let cond = self.parse_cond()?;
        let (body, mut last_braced) = self.parse_body(&stops, &TokenKind::Endif, "if body")?;
        let mut arms = vec![IfArm { cond, body }];
        let mut else_body = None;

        loop {
            match self.cursor.peek_past_newlines() {
                TokenKind::Elseif => {
                    self.cursor.skip_newlines();
                    self.cursor.advance();
                    let cond = self.parse_cond()?;
                    let (body, braced) =
                        self.parse_body(&stops, &TokenKind::Endif, "elseif body")?;
                    last_braced = braced;
                    arms.push(IfArm { cond, body });
                }
                TokenKind::Else => {
                    self.cursor.skip_newlines();
                    self.cursor.advance();
                    let (body, braced) =
                        self.parse_body(&[TokenKind::Endif], &TokenKind::Endif, "else body")?;
                    last_braced = braced;
                    else_body = Some(body);
                    break;
                }
                _ => break,
            }
        }

        if last_braced {
            // Same-line close only; `endif` on its own line closes an
            // enclosing construct instead.
            self.cursor.eat(&TokenKind::Endif);
        } else {
            self.cursor.expect(&TokenKind::Endif, "to close if statement")?;
        }

        let span = start.merge(self.cursor.previous_span());
        Ok(Stmt::new(StmtKind::If { arms, else_body }, span))
    }

    fn parse_repeat(&mut self) -> Result<Stmt, Diagnostic> {
        let start = self.cursor.current_span();
        self.cursor.advance(); // repeat

        let count = match self.cursor.current_kind() {
            TokenKind::Int(n) => {
                let n = *n;
                let count_span = self.cursor.current_span();
                self.cursor.advance();
                u64::try_from(n).map_err(|_| {
                    Diagnostic::new(
                        ErrorKind::Parse,
                        "repeat count must be a non-negative integer literal",
                    )
                    .with_span(count_span)
                })?
            }
            other => {
                return Err(Diagnostic::new(
                    ErrorKind::Parse,
                    format!(
                        "expected repeat count (integer literal), found {}",
                        other.describe()
                    ),
                )
                .with_span(self.cursor.current_span()));
            }
        };

        self.loop_depth += 1;
        let body_result =
            self.parse_body(&[TokenKind::Endrepeat], &TokenKind::Endrepeat, "repeat body");
        self.loop_depth -= 1;
        let (body, braced) = body_result?;

        if braced {
            self.cursor.eat(&TokenKind::Endrepeat);
        } else {
            self.cursor
                .expect(&TokenKind::Endrepeat, "to close repeat")?;
        }

        let span = start.merge(self.cursor.previous_span());
        Ok(Stmt::new(StmtKind::Repeat { count, body }, span))
    }

    fn parse_fn_def(&mut self) -> Result<Stmt, Diagnostic> {
        let start = self.cursor.current_span();
        self.cursor.advance(); // fn
        let (name, _) = self.cursor.expect_ident("after 'fn'")?;
        self.cursor.expect(&TokenKind::LParen, "after function name")?;

        let mut params: Vec<String> = Vec::new();
        loop {
            self.cursor.skip_newlines();
            if self.cursor.check(&TokenKind::RParen) {
                break;
            }
            let (param, param_span) = self.cursor.expect_ident("as parameter name")?;
            if params.contains(&param) {
                return Err(Diagnostic::new(
                    ErrorKind::Parse,
                    format!("duplicate parameter '{param}'"),
                )
                .with_span(param_span));
            }
            params.push(param);
            self.cursor.skip_newlines();
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor
            .expect(&TokenKind::RParen, "to close parameter list")?;

        // Function bodies are always brace-delimited. `break` may not
        // escape through a function boundary, hence the depth reset.
        self.cursor.skip_newlines();
        let saved_depth = self.loop_depth;
        self.loop_depth = 0;
        let body_result = self.parse_brace_block("function body");
        self.loop_depth = saved_depth;
        let body = body_result?;

        let span = start.merge(self.cursor.previous_span());
        Ok(Stmt::new(StmtKind::FnDef { name, params, body }, span))
    }

    fn parse_return(&mut self) -> Result<Stmt, Diagnostic> {
        let start = self.cursor.current_span();
        self.cursor.advance(); // return
        let value = if self.at_expr_start() {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let span = start.merge(self.cursor.previous_span());
        Ok(Stmt::new(StmtKind::Return { value }, span))
    }

    fn parse_loop_jump(&mut self, kind: StmtKind, word: &str) -> Result<Stmt, Diagnostic> {
        let span = self.cursor.current_span();
        self.cursor.advance();
        if self.loop_depth == 0 {
            return Err(Diagnostic::new(
                ErrorKind::Parse,
                format!("'{word}' outside of a repeat loop"),
            )
            .with_span(span));
        }
        Ok(Stmt::new(kind, span))
    }

    fn parse_try(&mut self) -> Result<Stmt, Diagnostic> {
        let start = self.cursor.current_span();
        self.cursor.advance(); // try

        let (body, body_braced) = self.parse_body(
            &[TokenKind::Catch, TokenKind::Endtry],
            &TokenKind::Endtry,
            "try body",
        )?;
        let mut last_braced = body_braced;

        let catch = if matches!(self.cursor.peek_past_newlines(), TokenKind::Catch) {
            self.cursor.skip_newlines();
            self.cursor.advance(); // catch
            // Filter forms: `catch ["substring"]` or `catch "substring"`.
            let filter = if self.cursor.eat(&TokenKind::LBracket) {
                let (text, _) = self.cursor.expect_str("as catch filter")?;
                self.cursor
                    .expect(&TokenKind::RBracket, "to close catch filter")?;
                Some(text)
            } else if matches!(self.cursor.current_kind(), TokenKind::Str(_)) {
                let (text, _) = self.cursor.expect_str("as catch filter")?;
                Some(text)
            } else {
                None
            };
            let (catch_body, catch_braced) =
                self.parse_body(&[TokenKind::Endtry], &TokenKind::Endtry, "catch body")?;
            last_braced = catch_braced;
            Some(CatchClause {
                filter,
                body: catch_body,
            })
        } else {
            None
        };

        if last_braced {
            self.cursor.eat(&TokenKind::Endtry);
        } else {
            self.cursor
                .expect(&TokenKind::Endtry, "to close try statement")?;
        }

        let span = start.merge(self.cursor.previous_span());
        Ok(Stmt::new(StmtKind::Try { body, catch }, span))
    }

    fn parse_import(&mut self) -> Result<Stmt, Diagnostic> {
        let start = self.cursor.current_span();
        self.cursor.advance(); // import
        let (module, _) = self.cursor.expect_str("after 'import'")?;
        let span = start.merge(self.cursor.previous_span());
        Ok(Stmt::new(StmtKind::Import { module }, span))
    }

    /// `print(expr)`, `say expr`, `log expr`. The parenthesized and bare
    /// argument forms are both accepted for all three heads.
    fn parse_output(&mut self) -> Result<Stmt, Diagnostic> {
        let start = self.cursor.current_span();
        let head = self.cursor.advance().kind.clone();
        let value = if self.cursor.eat(&TokenKind::LParen) {
            let value = self.parse_expr()?;
            self.cursor
                .expect(&TokenKind::RParen, "to close the argument")?;
            value
        } else {
            self.parse_expr()?
        };
        let span = start.merge(self.cursor.previous_span());
        let kind = match head {
            TokenKind::Log => StmtKind::Log { value },
            _ => StmtKind::Print { value },
        };
        Ok(Stmt::new(kind, span))
    }

    fn parse_call_stmt(&mut self) -> Result<Stmt, Diagnostic> {
        let (name, name_span) = self.cursor.expect_ident("at statement start")?;
        if !self.cursor.check(&TokenKind::LParen) {
            return Err(Diagnostic::new(
                ErrorKind::Parse,
                format!("expected '(' after '{name}'; a bare identifier is not a statement"),
            )
            .with_span(self.cursor.current_span()));
        }
        let args = self.parse_paren_args(&format!("after '{name}'"))?;
        let span = name_span.merge(self.cursor.previous_span());
        Ok(Stmt::new(
            StmtKind::Expr {
                expr: Expr::new(ExprKind::Call { name, args }, span),
            },
            span,
        ))
    }

    fn parse_builtin_stmt(&mut self) -> Result<Stmt, Diagnostic> {
        let expr = self.parse_operand()?;
        let span = expr.span;
        Ok(Stmt::new(StmtKind::Expr { expr }, span))
    }

    // ── Blocks ──────────────────────────────────────────────────────────

    /// Parse a block body: either `{ stmts }` or bare statements running
    /// up to one of `stops`. Returns the statements and whether the body
    /// was brace-delimited (the caller's terminator is optional then).
    fn parse_body(
        &mut self,
        stops: &[TokenKind],
        closer: &TokenKind,
        what: &str,
    ) -> Result<(Vec<Stmt>, bool), Diagnostic> {
        self.cursor.skip_newlines();
        if self.cursor.check(&TokenKind::LBrace) {
            return Ok((self.parse_brace_block(what)?, true));
        }

        let mut stmts = Vec::new();
        loop {
            self.cursor.skip_newlines();
            if self.cursor.check_any(stops) {
                break;
            }
            if self.cursor.at_eof() {
                return Err(Diagnostic::new(
                    ErrorKind::Parse,
                    format!("unterminated {what}; expected '{}'", closer.surface()),
                )
                .with_span(self.cursor.current_span()));
            }
            stmts.push(self.parse_stmt()?);
        }
        Ok((stmts, false))
    }

    /// Parse `{ stmts }`, assuming the `{` has not been consumed yet.
    fn parse_brace_block(&mut self, what: &str) -> Result<Vec<Stmt>, Diagnostic> {
        self.cursor
            .expect(&TokenKind::LBrace, &format!("to open {what}"))?;
        let mut stmts = Vec::new();
        loop {
            self.cursor.skip_newlines();
            if self.cursor.check(&TokenKind::RBrace) || self.cursor.at_eof() {
                break;
            }
            stmts.push(self.parse_stmt()?);
        }
        self.cursor
            .expect(&TokenKind::RBrace, &format!("to close {what}"))?;
        Ok(stmts)
    }

    // ── Conditions and expressions ──────────────────────────────────────

    /// Conditions are exactly one comparison over two operands.
    fn parse_cond(&mut self) -> Result<Cond, Diagnostic> {
        let lhs = self.parse_operand()?;
        let Some(op) = CmpOp::from_token(self.cursor.current_kind()) else {
            return Err(Diagnostic::new(
                ErrorKind::Parse,
                format!(
                    "expected comparison operator in condition, found {}",
                    self.cursor.current_kind().describe()
                ),
            )
            .with_span(self.cursor.current_span()));
        };
        self.cursor.advance();
        let rhs = self.parse_operand()?;
        let span = lhs.span.merge(rhs.span);
        Ok(Cond { lhs, op, rhs, span })
    }

    /// An expression is one operand, or one arithmetic operation over two.
    fn parse_expr(&mut self) -> Result<Expr, Diagnostic> {
        let lhs = self.parse_operand()?;
        let Some(op) = BinOp::from_token(self.cursor.current_kind()) else {
            return Ok(lhs);
        };
        self.cursor.advance();
        let rhs = self.parse_operand()?;
        if BinOp::from_token(self.cursor.current_kind()).is_some() {
            return Err(Diagnostic::new(
                ErrorKind::Parse,
                "operator chains are not supported; an expression takes at most one operator",
            )
            .with_span(self.cursor.current_span()));
        }
        let span = lhs.span.merge(rhs.span);
        Ok(Expr::new(
            ExprKind::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            span,
        ))
    }

    fn parse_operand(&mut self) -> Result<Expr, Diagnostic> {
        let start = self.cursor.current_span();

        if let Some(builtin) = Builtin::from_token(self.cursor.current_kind()) {
            self.cursor.advance();
            let args = self.parse_paren_args(&format!("after '{}'", builtin.name()))?;
            let span = start.merge(self.cursor.previous_span());
            return Ok(Expr::new(ExprKind::Builtin { builtin, args }, span));
        }

        match self.cursor.current_kind() {
            TokenKind::Int(n) => {
                let n = *n;
                self.cursor.advance();
                Ok(Expr::new(ExprKind::Int(n), start))
            }
            TokenKind::Str(s) => {
                let s = s.clone();
                self.cursor.advance();
                Ok(Expr::new(ExprKind::Str(s), start))
            }
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.cursor.advance();
                if self.cursor.check(&TokenKind::LParen) {
                    let args = self.parse_paren_args(&format!("after '{name}'"))?;
                    let span = start.merge(self.cursor.previous_span());
                    Ok(Expr::new(ExprKind::Call { name, args }, span))
                } else {
                    Ok(Expr::new(ExprKind::Ident(name), start))
                }
            }
            TokenKind::LBracket => self.parse_list(),
            TokenKind::LBrace => self.parse_map(),
            other => Err(Diagnostic::new(
                ErrorKind::Parse,
                format!("expected a value, found {}", other.describe()),
            )
            .with_span(self.cursor.current_span())),
        }
    }

    fn parse_list(&mut self) -> Result<Expr, Diagnostic> {
        let start = self.cursor.current_span();
        self.cursor.advance(); // [
        let mut items = Vec::new();
        loop {
            self.cursor.skip_newlines();
            if self.cursor.check(&TokenKind::RBracket) {
                break;
            }
            items.push(self.parse_expr()?);
            self.cursor.skip_newlines();
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor
            .expect(&TokenKind::RBracket, "to close list literal")?;
        let span = start.merge(self.cursor.previous_span());
        Ok(Expr::new(ExprKind::List(items), span))
    }

    fn parse_map(&mut self) -> Result<Expr, Diagnostic> {
        let start = self.cursor.current_span();
        self.cursor.advance(); // {
        let mut entries = Vec::new();
        loop {
            self.cursor.skip_newlines();
            if self.cursor.check(&TokenKind::RBrace) {
                break;
            }
            let (key, _) = self.cursor.expect_str("as map key")?;
            self.cursor.expect(&TokenKind::Colon, "after map key")?;
            self.cursor.skip_newlines();
            let value = self.parse_expr()?;
            entries.push((key, value));
            self.cursor.skip_newlines();
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor
            .expect(&TokenKind::RBrace, "to close map literal")?;
        let span = start.merge(self.cursor.previous_span());
        Ok(Expr::new(ExprKind::Map(entries), span))
    }

    fn parse_paren_args(&mut self, context: &str) -> Result<Vec<Expr>, Diagnostic> {
        self.cursor.expect(&TokenKind::LParen, context)?;
        let mut args = Vec::new();
        loop {
            self.cursor.skip_newlines();
            if self.cursor.check(&TokenKind::RParen) {
                break;
            }
            args.push(self.parse_expr()?);
            self.cursor.skip_newlines();
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor
            .expect(&TokenKind::RParen, "to close argument list")?;
        Ok(args)
    }

    /// True when the current token can begin an expression. Used to
    /// decide whether `return` carries a value.
    fn at_expr_start(&self) -> bool {
        Builtin::from_token(self.cursor.current_kind()).is_some()
            || matches!(
                self.cursor.current_kind(),
                TokenKind::Int(_)
                    | TokenKind::Str(_)
                    | TokenKind::Ident(_)
                    | TokenKind::LBracket
                    | TokenKind::LBrace
            )
    }
}
