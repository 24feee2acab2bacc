use anyhow::{Context as _, Result};
use clap::Parser as ClapParser;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use colored::Colorize;
use inkwell::context::Context;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use picc::codegen::CodeGenerator;
use picc::compiler::PhaseTimer;
use picc::error::PiError;
use picc::lexer;
use picc::parser::Parser;

#[derive(ClapParser)]
#[command(name = "picc")]
#[command(version, about = "The Pi language compiler", long_about = None)]
struct Cli {
    /// The Pi source file to compile
    input: Option<PathBuf>,

    /// Enable verbose output (debug logging and diagnostic snippets)
    #[arg(short, long)]
    verbose: bool,

    /// Dump tokens to stdout
    #[arg(long)]
    dump_tokens: bool,

    /// Dump the AST to stdout as JSON
    #[arg(long)]
    dump_ast: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize the logger before doing any work; --verbose raises the
    // default filter so phase timings become visible
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    log::info!("picc starting");

    let Some(input) = cli.input else {
        eprintln!("Usage: picc <pi_file_path>");
        return ExitCode::from(1);
    };

    let source = match read_source(&input) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            return ExitCode::from(1);
        }
    };

    match compile(&input, &source, cli.dump_tokens, cli.dump_ast) {
        Ok(ir) => {
            print!("{}", ir);
            ExitCode::SUCCESS
        }
        Err(e) => {
            // The Display form is the normative diagnostic format
            eprintln!("{}", e);
            if cli.verbose {
                render_snippet(&e, &input, &source);
            }
            ExitCode::from(1)
        }
    }
}

/// Helper to read the source file into a string
fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Cannot open file {}", path.display()))
}

/// Run the full pipeline on one source buffer
fn compile(input: &Path, source: &str, dump_tokens: bool, dump_ast: bool) -> Result<String, PiError> {
    let tokens = {
        let _timer = PhaseTimer::start("Lexical Analysis");
        lexer::tokenize(source)?
    };

    if dump_tokens {
        for token in &tokens {
            println!("{:?}", token);
        }
    }

    let func = {
        let _timer = PhaseTimer::start("Parsing");
        let mut parser = Parser::new(tokens);
        parser.parse_function()?
    };

    if dump_ast {
        if let Ok(json) = serde_json::to_string_pretty(&func) {
            println!("{}", json);
        }
    }

    let module_name = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("pi_module");

    let context = Context::create();
    let mut codegen = CodeGenerator::new(&context, module_name);
    {
        let _timer = PhaseTimer::start("Code Generation");
        codegen.generate(&func)?;
    }
    {
        let _timer = PhaseTimer::start("LLVM IR Construction (Main)");
        codegen.create_main_wrapper(&func.name)?;
    }

    Ok(codegen.print_ir())
}

/// Render a labeled source snippet for positioned errors (verbose mode)
fn render_snippet(error: &PiError, input: &Path, source: &str) {
    let mut files = SimpleFiles::new();
    let file_id = files.add(input.display().to_string(), source.to_string());
    let diagnostic = error.to_diagnostic(file_id, source);

    let writer = StandardStream::stderr(ColorChoice::Auto);
    let config = codespan_reporting::term::Config::default();
    let _ = codespan_reporting::term::emit(&mut writer.lock(), &config, &files, &diagnostic);
}
