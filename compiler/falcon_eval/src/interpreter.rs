//! The tree-walking interpreter.
//!
//! [`Interpreter`] owns the symbol store, the function table, and the
//! capability handles (files, AI, network, output). It executes a parsed
//! [`Program`] statement by statement; statement execution yields a
//! [`Signal`] so `return`, `break`, and `continue` unwind as ordinary
//! values rather than as errors, and `try`/`catch` can never intercept
//! them.
//!
//! Capabilities are injected through [`InterpreterBuilder`]: the CLI wires
//! real providers, tests wire buffers and temp directories.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use falcon_diagnostic::{Diagnostic, ErrorKind};
use falcon_ir::{Builtin, Cond, Expr, ExprKind, Program, Span, Stmt, StmtKind};

use crate::ai::{AiProvider, AiRole, NullProvider};
use crate::crypto;
use crate::environment::Environment;
use crate::errors::{
    call_depth_exceeded, circular_import, duplicate_function, io_failure, module_load_failed,
    negative_wait, undefined_function, undefined_variable, wrong_arg_count, wrong_arg_type,
};
use crate::fs::SandboxedFs;
use crate::net::{NetworkSender, NoNetwork};
use crate::operators::{evaluate_binary, evaluate_compare};
use crate::print_handler::PrintHandler;
use crate::secured::SecuredValue;
use crate::value::Value;

/// Maximum user-function call depth before a `FuncError`.
pub const MAX_CALL_DEPTH: usize = 256;

/// Module file extension.
const MODULE_EXT: &str = "fcn";

/// How a statement finished.
///
/// Loops consume `Break` and `Continue`; function calls consume `Return`.
/// At the top level any non-`Normal` signal ends the program.
#[derive(Clone, Debug, PartialEq)]
pub enum Signal {
    Normal,
    Return(Value),
    Break,
    Continue,
}

/// A user function: parameter names plus the shared statement list.
#[derive(Clone)]
struct FunctionDef {
    params: Vec<String>,
    body: Rc<Vec<Stmt>>,
}

/// The Falcon interpreter.
///
/// Holds all run state: the environment, the function table, the module
/// loading stack, and the injected capabilities. One interpreter runs one
/// program plus everything it imports.
pub struct Interpreter {
    env: Environment,
    functions: FxHashMap<String, FunctionDef>,
    files: SandboxedFs,
    ai: Box<dyn AiProvider>,
    net: Box<dyn NetworkSender>,
    out: PrintHandler,
    /// Directory `import "name"` resolves `name.fcn` against.
    module_root: PathBuf,
    /// Modules currently being imported, for cycle detection.
    loading: Vec<String>,
    call_depth: usize,
}

impl Interpreter {
    /// Start configuring an interpreter.
    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// An interpreter with default capabilities: sandbox and module root
    /// at the current directory, no AI, no network, stdout output.
    pub fn new() -> Interpreter {
        InterpreterBuilder::new().build()
    }

    /// The configured print handler, for inspecting buffered output.
    pub fn print_handler(&self) -> &PrintHandler {
        &self.out
    }

    /// Look up a variable in the current scope chain.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.env.lookup(name)
    }

    /// Whether a visible binding was declared `secure`.
    pub fn is_secured(&self, name: &str) -> Option<bool> {
        self.env.is_secured(name)
    }

    /// Execute a program to completion.
    ///
    /// A top-level `return` stops execution normally. `break` and
    /// `continue` cannot surface here: the parser rejects them outside
    /// `repeat` bodies.
    pub fn run(&mut self, program: &Program) -> Result<(), Diagnostic> {
        for stmt in &program.stmts {
            let signal = self.exec_stmt(stmt)?;
            if signal != Signal::Normal {
                break;
            }
        }
        Ok(())
    }

    /// Execute a statement list, stopping at the first non-normal signal.
    fn exec_block(&mut self, stmts: &[Stmt]) -> Result<Signal, Diagnostic> {
        for stmt in stmts {
            let signal = self.exec_stmt(stmt)?;
            if signal != Signal::Normal {
                return Ok(signal);
            }
        }
        Ok(Signal::Normal)
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Signal, Diagnostic> {
        trace!(?stmt, "exec");
        match &stmt.kind {
            StmtKind::Decl {
                name,
                init,
                constant,
                secure,
            } => {
                let value = if *secure {
                    // The initializer of a secured binding is lenient:
                    // a math failure becomes the error string, and the
                    // result is sealed before it reaches the store.
                    let plain = self.eval_lenient(init)?;
                    Value::Secured(SecuredValue::seal(&plain))
                } else {
                    self.eval_expr(init)?
                };
                self.env
                    .define(name, value, *constant, *secure)
                    .map_err(|diag| diag.with_span(stmt.span))?;
                Ok(Signal::Normal)
            }

            StmtKind::If { arms, else_body } => {
                for arm in arms {
                    if self.eval_cond(&arm.cond)? {
                        return self.exec_block(&arm.body);
                    }
                }
                if let Some(body) = else_body {
                    return self.exec_block(body);
                }
                Ok(Signal::Normal)
            }

            StmtKind::Repeat { count, body } => {
                for _ in 0..*count {
                    match self.exec_block(body)? {
                        Signal::Normal | Signal::Continue => {}
                        Signal::Break => break,
                        ret @ Signal::Return(_) => return Ok(ret),
                    }
                }
                Ok(Signal::Normal)
            }

            StmtKind::FnDef { name, params, body } => {
                if self.functions.contains_key(name) {
                    return Err(duplicate_function(name).with_span(stmt.span));
                }
                debug!(function = %name, params = params.len(), "define");
                self.functions.insert(
                    name.clone(),
                    FunctionDef {
                        params: params.clone(),
                        body: Rc::new(body.clone()),
                    },
                );
                Ok(Signal::Normal)
            }

            StmtKind::Return { value } => {
                let result = match value {
                    Some(expr) => self.eval_expr(expr)?,
                    None => Value::Unit,
                };
                Ok(Signal::Return(result))
            }

            StmtKind::Break => Ok(Signal::Break),
            StmtKind::Continue => Ok(Signal::Continue),

            StmtKind::Try { body, catch } => match self.exec_block(body) {
                Ok(signal) => Ok(signal),
                Err(diag) => {
                    if let Some(clause) = catch {
                        let matches = clause
                            .filter
                            .as_ref()
                            .is_none_or(|f| diag.filter_text().contains(f.as_str()));
                        if matches {
                            return self.exec_block(&clause.body);
                        }
                    }
                    Err(diag)
                }
            },

            StmtKind::Import { module } => {
                self.import_module(module, stmt.span)?;
                Ok(Signal::Normal)
            }

            StmtKind::Print { value } => {
                let value = self.eval_lenient(value)?;
                self.out.say(&value.render());
                Ok(Signal::Normal)
            }

            StmtKind::Log { value } => {
                let value = self.eval_lenient(value)?;
                self.out.log(&value.render());
                Ok(Signal::Normal)
            }

            StmtKind::Expr { expr } => {
                self.eval_expr(expr)?;
                Ok(Signal::Normal)
            }
        }
    }

    fn eval_expr(&mut self, expr: &Expr) -> Result<Value, Diagnostic> {
        match &expr.kind {
            ExprKind::Int(n) => Ok(Value::Int(*n)),
            ExprKind::Str(s) => Ok(Value::Str(s.clone())),
            ExprKind::Ident(name) => self
                .env
                .lookup(name)
                .ok_or_else(|| undefined_variable(name).with_span(expr.span)),
            ExprKind::List(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.eval_expr(item)?);
                }
                Ok(Value::List(values))
            }
            ExprKind::Map(entries) => {
                // Later duplicate keys win, like redeclaration.
                let mut map = BTreeMap::new();
                for (key, value) in entries {
                    map.insert(key.clone(), self.eval_expr(value)?);
                }
                Ok(Value::Map(map))
            }
            ExprKind::Binary { op, lhs, rhs } => {
                let lhs = self.eval_operand(lhs)?;
                let rhs = self.eval_operand(rhs)?;
                evaluate_binary(*op, &lhs, &rhs).map_err(|diag| diag.with_span(expr.span))
            }
            ExprKind::Call { name, args } => self.call_function(name, args, expr.span),
            ExprKind::Builtin { builtin, args } => self.eval_builtin(*builtin, args, expr.span),
        }
    }

    /// Evaluate an operator operand. A secured value is revealed for the
    /// duration of the operation only; the stored binding stays armored.
    fn eval_operand(&mut self, expr: &Expr) -> Result<Value, Diagnostic> {
        let value = self.eval_expr(expr)?;
        match value {
            Value::Secured(sec) => sec.reveal().map_err(|diag| diag.with_span(expr.span)),
            other => Ok(other),
        }
    }

    fn eval_cond(&mut self, cond: &Cond) -> Result<bool, Diagnostic> {
        let lhs = self.eval_operand(&cond.lhs)?;
        let rhs = self.eval_operand(&cond.rhs)?;
        evaluate_compare(cond.op, &lhs, &rhs).map_err(|diag| diag.with_span(cond.span))
    }

    /// Evaluate in a lenient position (`print`/`say`/`log` arguments and
    /// secured initializers): a math failure degrades to its own error
    /// string instead of stopping the program.
    fn eval_lenient(&mut self, expr: &Expr) -> Result<Value, Diagnostic> {
        match self.eval_expr(expr) {
            Err(diag) if diag.kind == ErrorKind::Math => Ok(Value::Str(diag.to_string())),
            other => other,
        }
    }

    fn call_function(
        &mut self,
        name: &str,
        args: &[Expr],
        span: Span,
    ) -> Result<Value, Diagnostic> {
        let def = self
            .functions
            .get(name)
            .cloned()
            .ok_or_else(|| undefined_function(name).with_span(span))?;
        if args.len() != def.params.len() {
            return Err(wrong_arg_count(name, def.params.len(), args.len()).with_span(span));
        }
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_expr(arg)?);
        }
        if self.call_depth >= MAX_CALL_DEPTH {
            return Err(call_depth_exceeded(name, MAX_CALL_DEPTH).with_span(span));
        }

        debug!(function = %name, depth = self.call_depth, "call");
        self.call_depth = self.call_depth.saturating_add(1);
        self.env.push_call_scope();
        let result = self.run_function_body(&def, values);
        self.env.pop_scope();
        self.call_depth = self.call_depth.saturating_sub(1);

        match result? {
            Signal::Return(value) => Ok(value),
            _ => Ok(Value::Unit),
        }
    }

    /// Bind parameters in the already-pushed call scope and run the body.
    ///
    /// Split from [`Self::call_function`] so the caller can pop the scope
    /// and unwind the depth counter before propagating any error.
    fn run_function_body(
        &mut self,
        def: &FunctionDef,
        values: Vec<Value>,
    ) -> Result<Signal, Diagnostic> {
        for (param, value) in def.params.iter().zip(values) {
            self.env.define(param, value, false, false)?;
        }
        self.exec_block(&def.body)
    }

    fn eval_builtin(
        &mut self,
        builtin: Builtin,
        args: &[Expr],
        span: Span,
    ) -> Result<Value, Diagnostic> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_expr(arg)?);
        }

        // Slice patterns double as the arity check: any shape no arm
        // accepts falls through to the arity error.
        let result = match (builtin, values.as_slice()) {
            (Builtin::TimeNow, []) => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_err(|err| io_failure("cannot read system clock", &err.to_string()))
                .map(|now| Value::Int(i64::try_from(now.as_secs()).unwrap_or(i64::MAX))),

            (Builtin::Wait, [Value::Int(secs)]) => {
                if *secs < 0 {
                    Err(negative_wait(*secs))
                } else {
                    thread::sleep(Duration::from_secs(u64::try_from(*secs).unwrap_or(0)));
                    Ok(Value::Unit)
                }
            }
            (Builtin::Wait, [other]) => Err(wrong_arg_type(
                "wait duration",
                "an integer",
                other.type_name(),
            )),

            (Builtin::CryptoHash, [content]) => {
                Ok(Value::Str(crypto::sha256_hex(&content.render())))
            }

            (Builtin::CryptoEncrypt, [content, Value::Str(key)]) => {
                crypto::xor_encrypt(&content.render(), key).map(Value::Str)
            }
            (Builtin::CryptoDecrypt, [Value::Str(ciphertext), Value::Str(key)]) => {
                crypto::xor_decrypt(ciphertext, key).map(Value::Str)
            }
            (Builtin::CryptoEncrypt, [_, other])
            | (Builtin::CryptoDecrypt, [Value::Str(_), other]) => Err(wrong_arg_type(
                "cipher key",
                "a string",
                other.type_name(),
            )),
            (Builtin::CryptoDecrypt, [other, _]) => Err(wrong_arg_type(
                "ciphertext",
                "a string",
                other.type_name(),
            )),

            (Builtin::CryptoRandom, [Value::Int(min), Value::Int(max)]) => {
                crypto::random_in_range(*min, *max).map(Value::Int)
            }
            (Builtin::CryptoRandom, [Value::Int(_), other] | [other, _]) => Err(wrong_arg_type(
                "random bound",
                "an integer",
                other.type_name(),
            )),

            (Builtin::FileRead, [Value::Str(path)]) => self.files.read(path).map(Value::Str),
            (Builtin::FileWrite, [Value::Str(path), contents]) => self
                .files
                .write(path, &contents.render())
                .map(|()| Value::Unit),
            (Builtin::FileRead, [other]) | (Builtin::FileWrite, [other, _]) => Err(
                wrong_arg_type("file path", "a string", other.type_name()),
            ),

            (Builtin::NetworkSend, [Value::Str(url), body]) => {
                self.net.send(url, &body.render()).map(|()| Value::Unit)
            }
            (Builtin::NetworkSend, [other, _]) => Err(wrong_arg_type(
                "send url",
                "a string",
                other.type_name(),
            )),

            (Builtin::AiAsk, [prompt]) => Ok(self.ask_ai(AiRole::Ask, prompt)),
            (Builtin::AiGenerateCode, [prompt]) => Ok(self.ask_ai(AiRole::GenerateCode, prompt)),
            (Builtin::AiExplain, [prompt]) => Ok(self.ask_ai(AiRole::Explain, prompt)),
            (Builtin::AiRefactor, [prompt]) => Ok(self.ask_ai(AiRole::Refactor, prompt)),

            _ => Err(wrong_arg_count(builtin.name(), builtin.arity(), values.len())),
        };
        result.map_err(|diag| diag.with_span(span))
    }

    /// Run one AI query. Provider failure, including the no-credential
    /// case, degrades to the error string so scripts keep running.
    fn ask_ai(&self, role: AiRole, prompt: &Value) -> Value {
        let wrapped = role.wrap(&prompt.render());
        match self.ai.ask(&wrapped) {
            Ok(answer) => Value::Str(answer),
            Err(diag) => Value::Str(diag.to_string()),
        }
    }

    /// Load and execute `<module>.fcn` from the module root against the
    /// interpreter's own environment and function table.
    ///
    /// Errors inside the module are located against the module source
    /// before propagating, so the reported file is the module's.
    fn import_module(&mut self, module: &str, span: Span) -> Result<(), Diagnostic> {
        if module.contains(['/', '\\']) || module.contains("..") || Path::new(module).is_absolute()
        {
            return Err(module_load_failed(
                module,
                "module names cannot contain path separators or parent references",
            )
            .with_span(span));
        }
        if self.loading.iter().any(|loading| loading == module) {
            return Err(circular_import(module).with_span(span));
        }

        let file_name = format!("{module}.{MODULE_EXT}");
        let path = self.module_root.join(&file_name);
        let source = std::fs::read_to_string(&path)
            .map_err(|err| module_load_failed(module, &err.to_string()).with_span(span))?;

        debug!(module = %module, "import");
        let tokens = falcon_lexer::tokenize(&source)
            .map_err(|diag| diag.locate(&source, &file_name))?;
        let program =
            falcon_parse::parse(&tokens).map_err(|diag| diag.locate(&source, &file_name))?;

        self.loading.push(module.to_string());
        let result = self.run(&program);
        self.loading.pop();
        result.map_err(|diag| diag.locate(&source, &file_name))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Interpreter`] instances.
///
/// Defaults are the inert capabilities: current-directory sandbox, no AI
/// credential, no network, stdout output. The CLI overrides all of them;
/// tests override what they observe.
pub struct InterpreterBuilder {
    sandbox_root: PathBuf,
    module_root: Option<PathBuf>,
    ai: Box<dyn AiProvider>,
    net: Box<dyn NetworkSender>,
    out: PrintHandler,
}

impl InterpreterBuilder {
    pub fn new() -> InterpreterBuilder {
        InterpreterBuilder {
            sandbox_root: PathBuf::from("."),
            module_root: None,
            ai: Box::new(NullProvider),
            net: Box::new(NoNetwork),
            out: PrintHandler::default(),
        }
    }

    /// Directory `file.read` / `file.write` paths resolve under.
    #[must_use]
    pub fn sandbox_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.sandbox_root = root.into();
        self
    }

    /// Directory `import` resolves module files against. Defaults to the
    /// sandbox root.
    #[must_use]
    pub fn module_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.module_root = Some(root.into());
        self
    }

    /// AI provider backing the `ai.*` built-ins.
    #[must_use]
    pub fn ai_provider(mut self, provider: impl AiProvider + 'static) -> Self {
        self.ai = Box::new(provider);
        self
    }

    /// Network sender backing `network.send`.
    #[must_use]
    pub fn network(mut self, sender: impl NetworkSender + 'static) -> Self {
        self.net = Box::new(sender);
        self
    }

    /// Print handler receiving `print`/`say`/`log` output.
    #[must_use]
    pub fn print_handler(mut self, handler: PrintHandler) -> Self {
        self.out = handler;
        self
    }

    pub fn build(self) -> Interpreter {
        let module_root = self
            .module_root
            .unwrap_or_else(|| self.sandbox_root.clone());
        Interpreter {
            env: Environment::new(),
            functions: FxHashMap::default(),
            files: SandboxedFs::new(self.sandbox_root),
            ai: self.ai,
            net: self.net,
            out: self.out,
            module_root,
            loading: Vec::new(),
            call_depth: 0,
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
