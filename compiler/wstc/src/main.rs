//! WST command-line interface.

use wstc::commands::{lex_file, run_fix_indent, run_transcribe};
use wstc::logging::init_tracing;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let verbose = args[2..].iter().any(|a| a == "-v" || a == "--verbose");
    init_tracing(verbose);

    let command = &args[1];
    let ok = match command.as_str() {
        "transcribe" => run_transcribe(&args[2..]),
        "lex" => {
            let allow_any_close = args[2..].iter().any(|a| a == "--allow-any-close");
            let Some(path) = args[2..].iter().find(|a| !a.starts_with('-')) else {
                eprintln!("Usage: wst lex <file.html> [--allow-any-close]");
                std::process::exit(1);
            };
            lex_file(path, allow_any_close)
        }
        "fix-indent" => run_fix_indent(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            true
        }
        "version" | "--version" | "-V" => {
            println!("wst {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            false
        }
    };

    if !ok {
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("WST: markup to DOM-building JavaScript");
    println!();
    println!("Usage: wst <command> [options]");
    println!();
    println!("Commands:");
    println!("  transcribe <paths...>  Write a <stem>.js next to each .html file");
    println!("  lex <file.html>        Tokenize and display tokens");
    println!("  fix-indent [paths...]  Convert space indentation to tabs");
    println!("  help                   Show this help message");
    println!("  version                Show version information");
    println!();
    println!("Transcribe options:");
    println!("  --behavior=<mode>      return (default) or replace");
    println!("  --id=<id>              Replace the element with this id");
    println!("  --ids=<a,b,...>        One replacement id per --files entry");
    println!("  --params=<a,b,...>     Parameter names of every function");
    println!("  --file-params=<a,b;c>  Parameter names per --files entry");
    println!("  --files=<a.html,...>   Only these files, relative to the directory");
    println!("  --onload               Call the function once the DOM is ready");
    println!("  --no-minify            Keep line breaks and indentation");
    println!("  --lenient              Skip mismatched closing tags");
    println!("  --allow-any-close      Accept any character in closing tag names");
    println!("  --no-decode            Do not decode character references in text");
    println!("  --stdout               Print a single file's script instead of writing it");
    println!();
    println!("Global options:");
    println!("  -v, --verbose          Debug logging (RUST_LOG overrides)");
    println!();
    println!("Examples:");
    println!("  wst transcribe site/");
    println!("  wst transcribe card.html --behavior=replace --id=card --onload");
    println!("  wst transcribe site/ --files=a.html,b.html --ids=a,b");
    println!("  wst transcribe card.html --no-minify --stdout");
    println!("  wst lex card.html");
    println!("  wst fix-indent site/");
}
