//! Diagnostics for Falcon.
//!
//! Every stage of the pipeline (lexing, parsing, evaluation) reports
//! failures as a [`Diagnostic`]: an error kind from the closed taxonomy,
//! a message, and optionally the span it originated from. Spans are byte
//! ranges; the owning driver resolves them against the right source
//! buffer with [`Diagnostic::locate`] before rendering, which matters for
//! imported modules whose spans refer to their own file.
//!
//! The display form (`Kind: message`) is also the surface `catch` filters
//! match against, so changing it changes script-visible behavior.

mod line_offsets;

pub use line_offsets::LineOffsetTable;

use falcon_ir::Span;
use std::fmt;

/// The closed error taxonomy.
///
/// `AiUnavailable` is deliberately not suffixed with `Error`: it marks the
/// routine no-credential condition rather than a fault.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorKind {
    /// Lexing failure: input that matches no token pattern.
    Syntax,
    /// Malformed statement shape (missing `=`, unterminated block, ...).
    Parse,
    /// Undefined variable or function.
    Name,
    /// Arity or operand type mismatch.
    Type,
    /// Rebinding a constant.
    Const,
    /// Arithmetic failure in a fatal context.
    Math,
    /// Module resolution or nested-module failure.
    Import,
    /// Sandbox violation or tampered secured payload.
    Security,
    /// No AI credential configured.
    AiUnavailable,
    /// AI transport failure.
    Ai,
    /// Function definition conflict or call-depth exhaustion.
    Func,
    /// Operating system I/O failure.
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::Parse => "ParseError",
            ErrorKind::Name => "NameError",
            ErrorKind::Type => "TypeError",
            ErrorKind::Const => "ConstError",
            ErrorKind::Math => "MathError",
            ErrorKind::Import => "ImportError",
            ErrorKind::Security => "SecurityError",
            ErrorKind::AiUnavailable => "AiUnavailable",
            ErrorKind::Ai => "AiError",
            ErrorKind::Func => "FuncError",
            ErrorKind::Io => "IoError",
        };
        f.write_str(name)
    }
}

/// A reported failure: kind, message, and (once located) file and line.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub message: String,
    pub span: Option<Span>,
    /// Source path, filled by `locate`.
    pub file: Option<String>,
    /// 1-based line, filled by `locate`.
    pub line: Option<u32>,
}

impl Diagnostic {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Diagnostic {
            kind,
            message: message.into(),
            span: None,
            file: None,
            line: None,
        }
    }

    /// Attach the originating span.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Resolve the span against a source buffer and record file + line.
    ///
    /// A diagnostic that is already located keeps its original location;
    /// this lets an importing program locate a module's error against the
    /// module source first and then pass it up unchanged.
    #[must_use]
    pub fn locate(mut self, source: &str, file: &str) -> Self {
        if self.file.is_some() {
            return self;
        }
        self.file = Some(file.to_string());
        if let Some(span) = self.span {
            let table = LineOffsetTable::build(source);
            self.line = Some(table.line_from_offset(span.start));
        }
        self
    }

    /// The message `catch` filters match against.
    pub fn filter_text(&self) -> String {
        self.to_string()
    }

    /// Render for terminal output.
    ///
    /// ```text
    /// error[NameError]: undefined variable 'x'
    ///  --> script.fcn:3
    /// ```
    pub fn render(&self) -> String {
        let mut out = format!("error[{}]: {}", self.kind, self.message);
        match (&self.file, self.line) {
            (Some(file), Some(line)) => {
                out.push_str(&format!("\n --> {file}:{line}"));
            }
            (Some(file), None) => {
                out.push_str(&format!("\n --> {file}"));
            }
            _ => {}
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_is_kind_colon_message() {
        let diag = Diagnostic::new(ErrorKind::Name, "undefined variable 'x'");
        assert_eq!(diag.to_string(), "NameError: undefined variable 'x'");
    }

    #[test]
    fn ai_unavailable_has_no_error_suffix() {
        let diag = Diagnostic::new(ErrorKind::AiUnavailable, "no API credential configured");
        assert_eq!(
            diag.to_string(),
            "AiUnavailable: no API credential configured"
        );
    }

    #[test]
    fn locate_fills_file_and_line() {
        let source = "let a = 1\nlet b = 2\nlet c = oops\n";
        let span = Span::new(28, 32);
        let diag = Diagnostic::new(ErrorKind::Name, "undefined variable 'oops'")
            .with_span(span)
            .locate(source, "script.fcn");
        assert_eq!(diag.file.as_deref(), Some("script.fcn"));
        assert_eq!(diag.line, Some(3));
        assert_eq!(
            diag.render(),
            "error[NameError]: undefined variable 'oops'\n --> script.fcn:3"
        );
    }

    #[test]
    fn locate_does_not_overwrite() {
        let module_src = "let x = nope\n";
        let diag = Diagnostic::new(ErrorKind::Name, "undefined variable 'nope'")
            .with_span(Span::new(8, 12))
            .locate(module_src, "util.fcn")
            .locate("import \"util\"\n", "main.fcn");
        assert_eq!(diag.file.as_deref(), Some("util.fcn"));
        assert_eq!(diag.line, Some(1));
    }

    #[test]
    fn render_without_location_is_single_line() {
        let diag = Diagnostic::new(ErrorKind::Math, "division by zero");
        assert_eq!(diag.render(), "error[MathError]: division by zero");
    }
}
