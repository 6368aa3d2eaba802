use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use treelox as lox;

use lox::ast_printer::AstPrinter;
use lox::error::{Diagnostics, LoxError, Reporter};
use lox::interpreter::Interpreter;
use lox::parser::Parser;
use lox::scanner::Scanner;
use lox::RunStatus;

#[derive(ClapParser, Debug)]
#[command(version, about = "Lox language interpreter", long_about = None)]
pub struct Cli {
    /// Starts an interactive prompt when omitted
    #[command(subcommand)]
    commands: Option<Commands>,

    /// Enable logging to a file
    #[arg(long, global = true)]
    log: bool,

    /// Log file written when --log is given
    #[arg(long, global = true, default_value = "app.log")]
    log_file: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Print the tokens as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Parses input from a file and prints the AST of each statement
    Parse {
        filename: PathBuf,

        /// Print the statements as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluates input from a file as a single expression and prints the result
    Evaluate { filename: PathBuf },

    /// Runs input from a file as a Lox program
    Run { filename: PathBuf },
}

/// Reads the contents of a file into a String
fn read_file(filename: &PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    let bytes = reader
        .read_to_end(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    let source = String::from_utf8(buf)
        .map_err(LoxError::from)
        .context(format!("File {:?} is not valid UTF-8", filename))?;

    Ok(source)
}

fn init_logger(path: &PathBuf) -> Result<()> {
    let log_file = File::create(path).context(format!("Failed to create {:?}", path))?;

    // Configure env_logger to write to file with module and source line
    Builder::new()
        .format(|buf, record| {
            // Strip 'treelox::' from module path
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("treelox::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug
        .parse_default_env() // RUST_LOG overrides
        .init();

    info!("Logger initialized, writing to {:?}", path);
    Ok(())
}

fn exit_with(status: RunStatus) {
    if status != RunStatus::Completed {
        debug!("Exiting with code {}", status.exit_code());

        std::process::exit(status.exit_code());
    }
}

fn tokenize(filename: &PathBuf, json: bool) -> Result<()> {
    let source = read_file(filename)?;
    let mut diagnostics = Diagnostics::echoing();

    let tokens = Scanner::new(&source).scan_tokens(&mut diagnostics);

    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    } else {
        for token in &tokens {
            println!("{}", token);
        }
    }

    if diagnostics.had_syntax_error() {
        exit_with(RunStatus::SyntaxError);
    }

    info!("Tokenization completed successfully");
    Ok(())
}

fn parse(filename: &PathBuf, json: bool) -> Result<()> {
    let source = read_file(filename)?;
    let mut diagnostics = Diagnostics::echoing();

    let tokens = Scanner::new(&source).scan_tokens(&mut diagnostics);
    let statements = Parser::new(&tokens).parse(&mut diagnostics);

    if diagnostics.had_syntax_error() {
        exit_with(RunStatus::SyntaxError);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&statements)?);
    } else {
        for stmt in &statements {
            println!("{}", AstPrinter::print_stmt(stmt));
        }
    }

    info!("Parse subcommand completed");
    Ok(())
}

fn evaluate(filename: &PathBuf) -> Result<()> {
    let source = read_file(filename)?;
    let mut diagnostics = Diagnostics::echoing();

    let tokens = Scanner::new(&source).scan_tokens(&mut diagnostics);
    let expr = Parser::new(&tokens).parse_expression(&mut diagnostics);

    let expr = match expr {
        Some(expr) if !diagnostics.had_syntax_error() => expr,
        _ => {
            exit_with(RunStatus::SyntaxError);
            return Ok(());
        }
    };

    let mut interpreter = Interpreter::new();

    match interpreter.evaluate(&expr) {
        Ok(value) => {
            debug!("Evaluated to: {}", value);
            println!("{}", value);
        }

        Err(e) => {
            diagnostics.report(LoxError::Runtime(e));
            exit_with(RunStatus::RuntimeError);
        }
    }

    info!("Evaluate subcommand completed");
    Ok(())
}

fn run(filename: &PathBuf) -> Result<()> {
    let source = read_file(filename)?;
    info!("Provided input:\n {}", source);

    let mut interpreter = Interpreter::new();
    let mut diagnostics = Diagnostics::echoing();

    let status = lox::run_source(&source, &mut interpreter, &mut diagnostics);

    info!("Run finished: {:?}", status);
    io::stdout().flush()?;
    exit_with(status);

    Ok(())
}

/// Interactive prompt.  Errors are reported and the session goes on with the
/// same interpreter, so variables survive from one line to the next.
fn repl() -> Result<()> {
    info!("Starting REPL");

    let mut interpreter = Interpreter::new();
    let mut diagnostics = Diagnostics::echoing();
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;

        if read == 0 {
            println!();
            break;
        }

        let status = lox::run_source(&line, &mut interpreter, &mut diagnostics);
        debug!("REPL line finished: {:?}", status);

        diagnostics.clear();
    }

    info!("REPL closed");
    Ok(())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    // Initialize logger only if --log flag is provided
    if args.log {
        init_logger(&args.log_file)?;
    } else {
        // Initialize a minimal logger to avoid "no logger" errors
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match &args.commands {
        Some(Commands::Tokenize { filename, json }) => tokenize(filename, *json),
        Some(Commands::Parse { filename, json }) => parse(filename, *json),
        Some(Commands::Evaluate { filename }) => evaluate(filename),
        Some(Commands::Run { filename }) => run(filename),
        None => repl(),
    }
}
