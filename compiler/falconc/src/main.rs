//! Falcon CLI
//!
//! Thin argument dispatcher; the real work lives in `falconc::commands`.

use falconc::commands::{auth_command, lex_file, parse_file, run_file};

fn main() {
    falconc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            if args.len() < 3 {
                eprintln!("Usage: falcon run <file.fcn>");
                std::process::exit(1);
            }
            run_file(&args[2]);
        }
        "auth" => {
            if args.len() < 3 {
                eprintln!("Usage: falcon auth <api-key>");
                std::process::exit(1);
            }
            auth_command(&args[2]);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: falcon parse <file.fcn>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: falcon lex <file.fcn>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("Falcon {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // If it looks like a script path, try to run it
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("fcn"))
            {
                run_file(command);
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!("Falcon scripting language");
    println!();
    println!("Usage: falcon <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.fcn>    Run a Falcon program");
    println!("  auth <api-key>    Store the AI credential for ai.* queries");
    println!("  parse <file.fcn>  Parse and display AST info");
    println!("  lex <file.fcn>    Tokenize and display tokens");
    println!("  help              Show this help message");
    println!("  version           Show version information");
}
