// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end interpreter tests.
//!
//! Each test drives the full pipeline (tokenize, parse, run) against an
//! interpreter with a buffered print handler, then asserts on the
//! captured output, the environment, or the reported diagnostic.
//! Capability-dependent tests (files, imports, AI, network) inject temp
//! directories and recording fakes through the builder.

use std::cell::RefCell;
use std::rc::Rc;

use falcon_diagnostic::{Diagnostic, ErrorKind};
use falcon_eval::{AiProvider, Interpreter, NetworkSender, PrintHandler, Value, ARMOR_PREFIX};

/// SHA-256 of the five bytes `hello`.
const HELLO_DIGEST: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

fn buffered() -> Interpreter {
    Interpreter::builder()
        .print_handler(PrintHandler::buffer())
        .build()
}

fn run_program(interp: &mut Interpreter, source: &str) -> Result<(), Diagnostic> {
    let tokens = falcon_lexer::tokenize(source)?;
    let program = falcon_parse::parse(&tokens)?;
    interp.run(&program)
}

/// Run a source snippet, expecting success.
fn eval_ok(source: &str) -> Interpreter {
    let mut interp = buffered();
    run_program(&mut interp, source).expect("program should run");
    interp
}

/// Run a source snippet, expecting a fatal diagnostic.
fn eval_err(source: &str) -> Diagnostic {
    let mut interp = buffered();
    run_program(&mut interp, source).expect_err("program should fail")
}

fn output_of(source: &str) -> String {
    eval_ok(source).print_handler().get_output()
}

/// AI provider that records every wrapped prompt and answers canned text.
#[derive(Clone, Default)]
struct RecordingProvider {
    prompts: Rc<RefCell<Vec<String>>>,
}

impl AiProvider for RecordingProvider {
    fn ask(&self, prompt: &str) -> Result<String, Diagnostic> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok("[model reply]".to_string())
    }
}

/// AI provider that always fails at the transport layer.
struct FailingProvider;

impl AiProvider for FailingProvider {
    fn ask(&self, _prompt: &str) -> Result<String, Diagnostic> {
        Err(falcon_eval::errors::ai_transport("connection reset"))
    }
}

/// Network sender that records every (url, body) pair.
#[derive(Clone, Default)]
struct RecordingSender {
    sent: Rc<RefCell<Vec<(String, String)>>>,
}

impl NetworkSender for RecordingSender {
    fn send(&self, url: &str, body: &str) -> Result<(), Diagnostic> {
        self.sent
            .borrow_mut()
            .push((url.to_string(), body.to_string()));
        Ok(())
    }
}

mod variables_and_output {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn let_binds_and_say_prints() {
        let out = output_of("let x = 5\nsay x\nprint(\"done\")\n");
        assert_eq!(out, "5\ndone\n");
    }

    #[test]
    fn redeclaration_replaces_let_binding() {
        let interp = eval_ok("let x = 1\nlet x = 2\n");
        assert_eq!(interp.lookup("x"), Some(Value::Int(2)));
    }

    #[test]
    fn const_rebinding_is_const_error() {
        let err = eval_err("const k = 1\nconst k = 2\n");
        assert_eq!(err.kind, ErrorKind::Const);
        assert_eq!(err.message, "cannot rebind constant 'k'");
    }

    #[test]
    fn undefined_variable_is_name_error() {
        let err = eval_err("say ghost\n");
        assert_eq!(err.kind, ErrorKind::Name);
        assert_eq!(err.message, "undefined variable 'ghost'");
    }

    #[test]
    fn log_is_prefixed_and_interleaves_with_say() {
        let out = output_of("say \"start\"\nlog \"checkpoint\"\nsay \"end\"\n");
        assert_eq!(out, "start\nlog: checkpoint\nend\n");
    }

    #[test]
    fn list_and_map_literals_render() {
        let out = output_of(
            "let xs = [1, 2, \"three\"]\n\
             let user = { \"name\": \"ada\", \"level\": 3 }\n\
             print(xs)\n\
             print(user)\n",
        );
        assert_eq!(out, "[1, 2, \"three\"]\n{\"level\": 3, \"name\": \"ada\"}\n");
    }

    #[test]
    fn top_level_return_stops_the_program() {
        let out = output_of("say \"a\"\nreturn\nsay \"b\"\n");
        assert_eq!(out, "a\n");
    }
}

mod arithmetic {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn integer_operations() {
        let interp = eval_ok("let a = 7 * 6\nlet q = 7 / 2\nlet d = 10 - 3\n");
        assert_eq!(interp.lookup("a"), Some(Value::Int(42)));
        assert_eq!(interp.lookup("q"), Some(Value::Int(3)));
        assert_eq!(interp.lookup("d"), Some(Value::Int(7)));
    }

    #[test]
    fn plus_concatenates_when_a_string_is_involved() {
        let out = output_of("say \"n = \" + 2\n");
        assert_eq!(out, "n = 2\n");
    }

    #[test]
    fn division_by_zero_is_fatal_in_a_plain_let() {
        let err = eval_err("let x = 1 / 0\n");
        assert_eq!(err.kind, ErrorKind::Math);
        assert_eq!(err.message, "division by zero");
    }

    #[test]
    fn division_by_zero_degrades_in_say() {
        let out = output_of("say 1 / 0\nsay \"still here\"\n");
        assert_eq!(out, "MathError: division by zero\nstill here\n");
    }

    #[test]
    fn overflow_is_a_math_error() {
        let err = eval_err("let big = 9223372036854775807\nlet boom = big + 1\n");
        assert_eq!(err.kind, ErrorKind::Math);
        assert_eq!(err.message, "integer overflow in '+'");
    }

    #[test]
    fn subtracting_strings_is_a_type_error() {
        let err = eval_err("let x = \"a\" - \"b\"\n");
        assert_eq!(err.kind, ErrorKind::Type);
        assert_eq!(err.message, "cannot apply '-' to string and string");
    }

    #[test]
    fn comparing_mixed_types_with_ordering_is_a_type_error() {
        let err = eval_err("if 1 < \"a\"\nsay \"?\"\nendif\n");
        assert_eq!(err.kind, ErrorKind::Type);
        assert_eq!(err.message, "cannot compare integer and string with '<'");
    }
}

mod secured_bindings {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn secure_let_stores_an_armored_blob() {
        let interp = eval_ok("secure let pw = \"admin123\"\n");
        assert_eq!(interp.is_secured("pw"), Some(true));
        let Some(Value::Secured(sealed)) = interp.lookup("pw") else {
            panic!("expected a secured value");
        };
        assert!(sealed.armored().starts_with(ARMOR_PREFIX));
        assert!(!sealed.armored().contains("admin123"));
        assert_eq!(sealed.reveal().unwrap(), Value::Str("admin123".to_string()));
    }

    #[test]
    fn printing_a_secured_binding_shows_the_blob() {
        let out = output_of("secure let pw = \"hunter2\"\nprint(pw)\n");
        assert!(out.starts_with(ARMOR_PREFIX));
        assert!(!out.contains("hunter2"));
    }

    #[test]
    fn secured_operands_compute_transparently() {
        let interp = eval_ok("secure let n = 40\nlet m = n + 2\n");
        assert_eq!(interp.lookup("m"), Some(Value::Int(42)));
        // The stored binding stays armored after being used.
        assert!(matches!(interp.lookup("n"), Some(Value::Secured(_))));
    }

    #[test]
    fn secured_operands_compare_transparently() {
        let out = output_of("secure let n = 5\nif n > 3\nsay \"big\"\nendif\n");
        assert_eq!(out, "big\n");
    }

    #[test]
    fn secure_initializers_seal_computed_results() {
        let interp = eval_ok("secure let r = 6 * 7\n");
        let Some(Value::Secured(sealed)) = interp.lookup("r") else {
            panic!("expected a secured value");
        };
        assert_eq!(sealed.reveal().unwrap(), Value::Int(42));
    }

    #[test]
    fn secure_const_cannot_be_rebound() {
        let err = eval_err("secure const token = \"abc\"\nlet token = \"xyz\"\n");
        assert_eq!(err.kind, ErrorKind::Const);
        assert_eq!(err.message, "cannot rebind constant 'token'");
    }

    #[test]
    fn division_by_zero_degrades_in_a_secure_initializer() {
        let interp = eval_ok("secure let x = 1 / 0\n");
        let Some(Value::Secured(sealed)) = interp.lookup("x") else {
            panic!("expected a secured value");
        };
        assert_eq!(
            sealed.reveal().unwrap(),
            Value::Str("MathError: division by zero".to_string())
        );
    }

    #[test]
    fn hashing_a_secured_binding_sees_the_armor_not_the_plaintext() {
        let interp = eval_ok("secure let pw = \"hello\"\nlet h = crypto.hash(pw)\n");
        assert_ne!(interp.lookup("h"), Some(Value::Str(HELLO_DIGEST.to_string())));
    }
}

mod control_flow {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn if_elseif_else_takes_the_first_true_arm() {
        let source = "\
let score = 85
if score >= 90
  say \"A\"
elseif score >= 80
  say \"B\"
else
  say \"C\"
endif
";
        assert_eq!(output_of(source), "B\n");
    }

    #[test]
    fn else_runs_when_no_arm_holds() {
        let out = output_of("let x = 1\nif x > 5\nsay \"big\"\nelse\nsay \"small\"\nendif\n");
        assert_eq!(out, "small\n");
    }

    #[test]
    fn repeat_runs_the_body_count_times() {
        let source = "\
let n = 0
repeat 3
  let n = n + 1
endrepeat
say n
";
        assert_eq!(output_of(source), "3\n");
    }

    #[test]
    fn repeat_zero_skips_the_body() {
        let out = output_of("repeat 0\nsay \"never\"\nendrepeat\nsay \"after\"\n");
        assert_eq!(out, "after\n");
    }

    #[test]
    fn brace_bodied_repeat_emits_each_iteration() {
        let out = output_of("repeat 3 { say \"x\" }\n");
        assert_eq!(out, "x\nx\nx\n");
    }

    #[test]
    fn break_stops_the_loop() {
        let source = "\
let n = 0
repeat 5
  if n == 2
    break
  endif
  let n = n + 1
endrepeat
say n
";
        assert_eq!(output_of(source), "2\n");
    }

    #[test]
    fn continue_skips_the_rest_of_the_iteration() {
        let source = "\
let i = 0
let total = 0
repeat 4
  let i = i + 1
  if i == 2
    continue
  endif
  let total = total + 1
endrepeat
say total
";
        assert_eq!(output_of(source), "3\n");
    }
}

mod functions {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn define_and_call() {
        let source = "\
fn add(a, b) {
  return a + b
}
let r = add(2, 3)
say r
";
        assert_eq!(output_of(source), "5\n");
    }

    #[test]
    fn body_without_return_yields_the_absent_value() {
        let interp = eval_ok("fn noop() {\n  say \"ran\"\n}\nlet r = noop()\n");
        assert_eq!(interp.lookup("r"), Some(Value::Unit));
    }

    #[test]
    fn arity_mismatch_is_a_type_error() {
        let err = eval_err("fn add(a, b) {\n  return a + b\n}\nlet r = add(1)\n");
        assert_eq!(err.kind, ErrorKind::Type);
        assert_eq!(err.message, "'add' expects 2 arguments, got 1");
    }

    #[test]
    fn calling_an_undefined_function_is_a_name_error() {
        let err = eval_err("let r = mult(2, 3)\n");
        assert_eq!(err.kind, ErrorKind::Name);
        assert_eq!(err.message, "undefined function 'mult'");
    }

    #[test]
    fn redefining_a_function_is_a_func_error() {
        let err = eval_err("fn f() {\n  return 1\n}\nfn f() {\n  return 2\n}\n");
        assert_eq!(err.kind, ErrorKind::Func);
        assert_eq!(err.message, "function 'f' is already defined");
    }

    #[test]
    fn locals_do_not_leak_and_globals_are_visible() {
        let source = "\
let g = 10
fn peek() {
  let local = 1
  return g + local
}
let r = peek()
";
        let interp = eval_ok(source);
        assert_eq!(interp.lookup("r"), Some(Value::Int(11)));
        assert_eq!(interp.lookup("local"), None);
    }

    #[test]
    fn call_scope_may_shadow_a_global_constant() {
        let source = "\
const mode = \"prod\"
fn local_mode() {
  let mode = \"test\"
  return mode
}
let r = local_mode()
";
        let interp = eval_ok(source);
        assert_eq!(interp.lookup("r"), Some(Value::Str("test".to_string())));
        assert_eq!(interp.lookup("mode"), Some(Value::Str("prod".to_string())));
    }

    #[test]
    fn runaway_recursion_is_cut_off_as_a_func_error() {
        let err = eval_err("fn spin() {\n  return spin()\n}\nspin()\n");
        assert_eq!(err.kind, ErrorKind::Func);
        assert_eq!(err.message, "call depth limit of 256 exceeded in 'spin'");
    }
}

mod try_catch {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn catch_recovers_and_execution_continues() {
        let source = "\
try
  let x = 1 / 0
catch [\"MathError\"]
  say \"caught\"
endtry
say \"after\"
";
        assert_eq!(output_of(source), "caught\nafter\n");
    }

    #[test]
    fn filter_mismatch_re_raises_the_error() {
        let source = "\
try
  let x = 1 / 0
catch [\"TypeError\"]
  say \"wrong handler\"
endtry
";
        let err = eval_err(source);
        assert_eq!(err.kind, ErrorKind::Math);
    }

    #[test]
    fn unfiltered_catch_catches_everything() {
        let source = "\
try
  say ghost
catch
  say \"handled\"
endtry
";
        assert_eq!(output_of(source), "handled\n");
    }

    #[test]
    fn filter_matches_on_the_rendered_message() {
        let source = "\
try
  say ghost
catch [\"undefined variable\"]
  say \"handled\"
endtry
";
        assert_eq!(output_of(source), "handled\n");
    }

    #[test]
    fn return_passes_through_try_untouched() {
        let source = "\
fn pick() {
  try
    return 7
  catch
    say \"never\"
  endtry
  return 0
}
say pick()
";
        assert_eq!(output_of(source), "7\n");
    }

    #[test]
    fn error_without_try_is_fatal() {
        let err = eval_err("let x = 1 / 0\nsay \"unreached\"\n");
        assert_eq!(err.kind, ErrorKind::Math);
    }
}

mod crypto_builtins {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hash_is_lowercase_hex_sha256() {
        let interp = eval_ok("let h = crypto.hash(\"hello\")\n");
        assert_eq!(interp.lookup("h"), Some(Value::Str(HELLO_DIGEST.to_string())));
    }

    #[test]
    fn hash_renders_non_string_arguments() {
        let interp = eval_ok("let h = crypto.hash(42)\n");
        let Some(Value::Str(h)) = interp.lookup("h") else {
            panic!("expected a string digest");
        };
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit() && !c.is_uppercase()));
    }

    #[test]
    fn encrypt_then_decrypt_round_trips_in_language() {
        let source = "\
let secret = \"the falcon flies\"
let sealed = crypto.encrypt(secret, \"k3y\")
let opened = crypto.decrypt(sealed, \"k3y\")
if opened == secret
  say \"match\"
endif
";
        let interp = eval_ok(source);
        assert_eq!(interp.print_handler().get_output(), "match\n");
        assert_ne!(interp.lookup("sealed"), interp.lookup("secret"));
    }

    #[test]
    fn decrypting_garbage_is_a_type_error() {
        let err = eval_err("let x = crypto.decrypt(\"zz-not-hex\", \"k\")\n");
        assert_eq!(err.kind, ErrorKind::Type);
        assert_eq!(err.message, "ciphertext is not valid hex");
    }

    #[test]
    fn random_stays_in_range() {
        let interp = eval_ok("let r = crypto.random(1, 6)\n");
        let Some(Value::Int(r)) = interp.lookup("r") else {
            panic!("expected an integer");
        };
        assert!((1..=6).contains(&r));
    }

    #[test]
    fn random_with_inverted_bounds_is_a_type_error() {
        let err = eval_err("let r = crypto.random(6, 1)\n");
        assert_eq!(err.kind, ErrorKind::Type);
        assert_eq!(err.message, "random range is empty: 6 > 1");
    }

    #[test]
    fn builtin_arity_mismatch_names_the_builtin() {
        let err = eval_err("let h = crypto.hash(\"a\", \"b\")\n");
        assert_eq!(err.kind, ErrorKind::Type);
        assert_eq!(err.message, "'crypto.hash' expects 1 argument, got 2");

        let err = eval_err("let c = crypto.encrypt(\"only-content\")\n");
        assert_eq!(err.message, "'crypto.encrypt' expects 2 arguments, got 1");
    }

    #[test]
    fn encrypt_rejects_a_non_string_key() {
        let err = eval_err("let c = crypto.encrypt(\"text\", 5)\n");
        assert_eq!(err.kind, ErrorKind::Type);
        assert_eq!(err.message, "cipher key must be a string, got integer");
    }
}

mod file_sandbox {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sandboxed(dir: &std::path::Path) -> Interpreter {
        Interpreter::builder()
            .sandbox_root(dir)
            .print_handler(PrintHandler::buffer())
            .build()
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut interp = sandboxed(dir.path());
        run_program(
            &mut interp,
            "file.write(\"note.txt\", \"hello disk\")\nlet back = file.read(\"note.txt\")\n",
        )
        .unwrap();
        assert_eq!(
            interp.lookup("back"),
            Some(Value::Str("hello disk".to_string()))
        );
        let on_disk = std::fs::read_to_string(dir.path().join("note.txt")).unwrap();
        assert_eq!(on_disk, "hello disk");
    }

    #[test]
    fn traversal_outside_the_root_is_a_security_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut interp = sandboxed(dir.path());
        let err = run_program(&mut interp, "file.write(\"../../etc/passwd\", \"x\")\n")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Security);
        assert!(err.message.contains("escapes the sandbox root"));
    }

    #[test]
    fn absolute_paths_are_a_security_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut interp = sandboxed(dir.path());
        let err = run_program(&mut interp, "let x = file.read(\"/etc/passwd\")\n").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Security);
    }

    #[test]
    fn missing_file_is_a_catchable_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut interp = sandboxed(dir.path());
        let source = "\
try
  let x = file.read(\"missing.txt\")
catch [\"IoError\"]
  say \"io\"
endtry
";
        run_program(&mut interp, source).unwrap();
        assert_eq!(interp.print_handler().get_output(), "io\n");
    }

    #[test]
    fn file_path_must_be_a_string() {
        let dir = tempfile::tempdir().unwrap();
        let mut interp = sandboxed(dir.path());
        let err = run_program(&mut interp, "let x = file.read(42)\n").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
        assert_eq!(err.message, "file path must be a string, got integer");
    }
}

mod imports {
    use super::*;
    use pretty_assertions::assert_eq;

    fn module_dir(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, source) in files {
            std::fs::write(dir.path().join(name), source).unwrap();
        }
        dir
    }

    fn importer(dir: &std::path::Path) -> Interpreter {
        Interpreter::builder()
            .module_root(dir)
            .print_handler(PrintHandler::buffer())
            .build()
    }

    #[test]
    fn imported_bindings_and_functions_are_shared() {
        let dir = module_dir(&[(
            "util.fcn",
            "let shared = 41\nfn bump(x) {\n  return x + 1\n}\n",
        )]);
        let mut interp = importer(dir.path());
        run_program(&mut interp, "import \"util\"\nlet r = bump(shared)\n").unwrap();
        assert_eq!(interp.lookup("r"), Some(Value::Int(42)));
    }

    #[test]
    fn later_imports_shadow_earlier_bindings() {
        let dir = module_dir(&[("a.fcn", "let who = \"a\"\n"), ("b.fcn", "let who = \"b\"\n")]);
        let mut interp = importer(dir.path());
        run_program(&mut interp, "import \"a\"\nimport \"b\"\n").unwrap();
        assert_eq!(interp.lookup("who"), Some(Value::Str("b".to_string())));
    }

    #[test]
    fn missing_module_is_an_import_error() {
        let dir = module_dir(&[]);
        let mut interp = importer(dir.path());
        let err = run_program(&mut interp, "import \"nope\"\n").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Import);
        assert!(err.message.starts_with("cannot load module 'nope'"));
    }

    #[test]
    fn traversal_shaped_module_names_are_rejected() {
        let dir = module_dir(&[]);
        let mut interp = importer(dir.path());
        let err = run_program(&mut interp, "import \"../evil\"\n").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Import);
        assert!(err.message.contains("path separators"));
    }

    #[test]
    fn circular_imports_are_detected() {
        let dir = module_dir(&[("a.fcn", "import \"b\"\n"), ("b.fcn", "import \"a\"\n")]);
        let mut interp = importer(dir.path());
        let err = run_program(&mut interp, "import \"a\"\n").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Import);
        assert_eq!(err.message, "circular import of 'a'");
    }

    #[test]
    fn module_errors_are_located_against_the_module_file() {
        let dir = module_dir(&[("util.fcn", "let ok = 1\nlet x = nope\n")]);
        let mut interp = importer(dir.path());
        let err = run_program(&mut interp, "import \"util\"\n").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Name);
        assert_eq!(err.file.as_deref(), Some("util.fcn"));
        assert_eq!(err.line, Some(2));
    }
}

mod ai_queries {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn queries_fail_soft_without_a_credential() {
        let interp = eval_ok("let a = ai.ask(\"hi\")\nsay \"still running\"\n");
        assert_eq!(
            interp.lookup("a"),
            Some(Value::Str(
                "AiUnavailable: no AI credential is configured".to_string()
            ))
        );
    }

    #[test]
    fn transport_failures_degrade_to_the_error_string() {
        let mut interp = Interpreter::builder()
            .ai_provider(FailingProvider)
            .print_handler(PrintHandler::buffer())
            .build();
        run_program(&mut interp, "let a = ai.explain(\"recursion\")\n").unwrap();
        assert_eq!(
            interp.lookup("a"),
            Some(Value::Str("AiError: connection reset".to_string()))
        );
    }

    #[test]
    fn each_query_kind_wraps_the_prompt_with_its_role() {
        let provider = RecordingProvider::default();
        let mut interp = Interpreter::builder()
            .ai_provider(provider.clone())
            .print_handler(PrintHandler::buffer())
            .build();
        let source = "\
let a = ai.ask(\"what is falcon?\")
let b = ai.generateCode(\"sort a list\")
let c = ai.explain(\"closures\")
let d = ai.refactor(\"fn f() {}\")
";
        run_program(&mut interp, source).unwrap();
        assert_eq!(interp.lookup("a"), Some(Value::Str("[model reply]".to_string())));
        let prompts = provider.prompts.borrow();
        assert_eq!(
            *prompts,
            vec![
                "Act as a helpful assistant. what is falcon?".to_string(),
                "Act as an expert programmer. Write code for: sort a list".to_string(),
                "Act as a patient teacher. Explain: closures".to_string(),
                "Act as a code reviewer. Refactor and improve: fn f() {}".to_string(),
            ]
        );
    }
}

mod network_and_time {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn send_routes_url_and_rendered_body_to_the_sender() {
        let sender = RecordingSender::default();
        let mut interp = Interpreter::builder()
            .network(sender.clone())
            .print_handler(PrintHandler::buffer())
            .build();
        run_program(
            &mut interp,
            "network.send(\"https://hooks.test/falcon\", 42)\n",
        )
        .unwrap();
        assert_eq!(
            *sender.sent.borrow(),
            vec![("https://hooks.test/falcon".to_string(), "42".to_string())]
        );
    }

    #[test]
    fn send_without_a_network_is_a_catchable_io_error() {
        let source = "\
try
  network.send(\"https://x.test\", \"payload\")
catch [\"IoError\"]
  say \"offline\"
endtry
";
        assert_eq!(output_of(source), "offline\n");
    }

    #[test]
    fn time_now_is_a_recent_unix_timestamp() {
        let interp = eval_ok("let t = time.now()\n");
        let Some(Value::Int(t)) = interp.lookup("t") else {
            panic!("expected an integer timestamp");
        };
        assert!(t > 1_700_000_000);
    }

    #[test]
    fn wait_accepts_zero_and_rejects_negatives() {
        eval_ok("wait(0)\n");
        let err = eval_err("wait(0 - 1)\n");
        assert_eq!(err.kind, ErrorKind::Type);
        assert_eq!(err.message, "wait duration must be non-negative, got -1");
    }
}

mod diagnostics {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn located_errors_render_with_file_and_line() {
        let source = "let a = 1\nlet b = oops\n";
        let err = eval_err(source).locate(source, "main.fcn");
        assert_eq!(
            err.render(),
            "error[NameError]: undefined variable 'oops'\n --> main.fcn:2"
        );
    }

    #[test]
    fn catch_filters_match_the_displayed_form() {
        let err = eval_err("let x = 1 / 0\n");
        assert_eq!(err.filter_text(), "MathError: division by zero");
    }
}
