use std::{fs, path::PathBuf, process::ExitCode, time::Instant};

use anyhow::Context;
use clap::Parser;
use scopec::{
    codegen::{
        codegen::emit_c,
        toolchain::{compile_and_link, write_c_file},
    },
    errors::errors::Error,
    lexer::{config::LexerConfig, lexer::log_tokens},
    render_error,
    session::{lex_source, parse_tokens},
};
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

/// Compiles a source file to C and links it with the system C compiler.
#[derive(Parser, Debug)]
#[command(name = "scopec", version)]
struct Args {
    /// Source file to compile
    input: PathBuf,

    /// Base name of the outputs; `<output>.c` and the executable `<output>`
    output: PathBuf,

    /// C compiler used to build the executable
    #[arg(long, env = "CC", default_value = "cc")]
    cc: String,

    /// Only write `<output>.c`, do not run the C compiler
    #[arg(long)]
    emit_c: bool,

    /// Log every token produced by the lexer
    #[arg(long)]
    dump_tokens: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_ansi(false)
        .compact()
        .with_filter(filter);

    Registry::default().with(layer).init();
}

fn report_errors(errors: &[Error], source: &str) {
    for error in errors {
        eprintln!("{}", render_error(error, source));
    }
    eprintln!(
        "Aborting: {} error{} found",
        errors.len(),
        if errors.len() == 1 { "" } else { "s" }
    );
}

fn run(args: Args) -> anyhow::Result<bool> {
    let start = Instant::now();

    let source = fs::read(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let file_name = args
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.input.display().to_string());
    let config = LexerConfig::default();

    let tokens = match lex_source(&source, &file_name, &config) {
        Ok(tokens) => tokens,
        Err(error) => {
            report_errors(&[error], &String::from_utf8_lossy(&source));
            return Ok(false);
        }
    };
    if args.dump_tokens {
        log_tokens(&tokens);
    }

    let ast = match parse_tokens(tokens, &file_name) {
        Ok(ast) => ast,
        Err(errors) => {
            report_errors(&errors, &String::from_utf8_lossy(&source));
            return Ok(false);
        }
    };

    let c_source = emit_c(&ast).context("Failed to generate C")?;

    let mut c_file = args.output.clone().into_os_string();
    c_file.push(".c");
    let c_file = PathBuf::from(c_file);

    write_c_file(&c_file, &c_source)?;
    tracing::info!("Wrote {}", c_file.display());

    if !args.emit_c {
        compile_and_link(&c_file, &args.output, &args.cc)?;
        tracing::info!("Linked {}", args.output.display());
    }

    tracing::info!("Total time: {:?}", start.elapsed());
    Ok(true)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("Error: {:#}", error);
            ExitCode::FAILURE
        }
    }
}
