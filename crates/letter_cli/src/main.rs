//! letter: The Letter front-end CLI.
//!
//! Usage:
//!   letter tokens [FILE] [-e SOURCE]
//!   letter parse [FILE] [-e SOURCE] [--compact]
//!   letter check [FILE...] [--stats]
//!
//! Sources are read from stdin when no file or inline source is given.
//! Exit codes: 0 on success, 1 when a source fails to tokenize or parse,
//! 2 on I/O or usage errors.

use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser as ClapParser, Subcommand};
use letter_ast::NodeCounter;
use letter_core::text::LineMap;
use letter_diagnostics::ParseError;
use letter_parser::{Parser, ParserOptions};
use miette::{NamedSource, Report};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const EXIT_OK: i32 = 0;
const EXIT_PARSE_ERROR: i32 = 1;
const EXIT_IO_ERROR: i32 = 2;

#[derive(ClapParser, Debug)]
#[command(name = "letter", about = "Tokenize and parse Letter source code", version)]
struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Maximum nesting depth before a parse is rejected.
    #[arg(long, value_name = "N", global = true)]
    max_depth: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the token stream of a source, one token per line.
    Tokens(InputArgs),

    /// Print the AST of a source as JSON.
    Parse {
        #[command(flatten)]
        input: InputArgs,

        /// Print the JSON on a single line.
        #[arg(long)]
        compact: bool,
    },

    /// Parse each file and report the first error in each.
    Check {
        /// Files to check; stdin when omitted.
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Print node counts for each file that parses.
        #[arg(long)]
        stats: bool,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Source file to read; stdin when omitted.
    #[arg(value_name = "FILE", conflicts_with = "eval")]
    file: Option<PathBuf>,

    /// Source text given on the command line.
    #[arg(short = 'e', long = "eval", value_name = "SOURCE")]
    eval: Option<String>,
}

/// A source text and the name used for it in diagnostics.
struct Source {
    name: String,
    text: String,
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut options = ParserOptions::default();
    if let Some(max_depth) = cli.max_depth {
        options = options.with_max_depth(max_depth);
    }
    debug!(?options, "parser options");

    let exit_code = match &cli.command {
        Command::Tokens(input) => run_tokens(input),
        Command::Parse { input, compact } => run_parse(input, *compact, options),
        Command::Check { files, stats } => run_check(files, *stats, options),
    };
    process::exit(exit_code);
}

/// Install the stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(io::stderr)
        .try_init();
}

// ============================================================================
// Commands
// ============================================================================

fn run_tokens(input: &InputArgs) -> i32 {
    let source = match read_input(input) {
        Ok(source) => source,
        Err(code) => return code,
    };

    let mut tokenizer = letter_tokenizer::Tokenizer::with_source(&source.text);
    loop {
        match tokenizer.get_next_token() {
            Ok(Some(token)) => println!("{:<24} {}", token.kind.name(), token.value),
            Ok(None) => return EXIT_OK,
            Err(err) => {
                report_parse_error(&source, err);
                return EXIT_PARSE_ERROR;
            }
        }
    }
}

fn run_parse(input: &InputArgs, compact: bool, options: ParserOptions) -> i32 {
    let source = match read_input(input) {
        Ok(source) => source,
        Err(code) => return code,
    };

    let program = match Parser::with_options(options).parse(&source.text) {
        Ok(program) => program,
        Err(err) => {
            report_parse_error(&source, err);
            return EXIT_PARSE_ERROR;
        }
    };

    let json = if compact {
        serde_json::to_string(&program)
    } else {
        serde_json::to_string_pretty(&program)
    };
    match json {
        Ok(json) => {
            println!("{}", json);
            EXIT_OK
        }
        Err(e) => {
            print_error(&format!("failed to serialize AST: {}", e));
            EXIT_IO_ERROR
        }
    }
}

fn run_check(files: &[PathBuf], stats: bool, options: ParserOptions) -> i32 {
    let sources: Vec<Result<Source, i32>> = if files.is_empty() {
        vec![read_stdin()]
    } else {
        files.iter().map(|path| read_file(path)).collect()
    };

    let use_color = io::stdout().is_terminal();
    let mut parser = Parser::with_options(options);
    let mut error_count = 0usize;
    let mut exit_code = EXIT_OK;

    for source in sources {
        let source = match source {
            Ok(source) => source,
            Err(code) => {
                exit_code = exit_code.max(code);
                continue;
            }
        };

        match parser.parse(&source.text) {
            Ok(program) => {
                info!(file = %source.name, statements = program.body.len(), "check passed");
                if use_color {
                    println!("{}{}{}: {}ok{}", CYAN, source.name, RESET, GREEN, RESET);
                } else {
                    println!("{}: ok", source.name);
                }
                if stats {
                    print_stats(&NodeCounter::count(&program), use_color);
                }
            }
            Err(err) => {
                report_parse_error(&source, err);
                error_count += 1;
                exit_code = exit_code.max(EXIT_PARSE_ERROR);
            }
        }
    }

    if error_count > 0 {
        eprintln!(
            "\nFound {} error{}.",
            error_count,
            if error_count == 1 { "" } else { "s" }
        );
    }
    exit_code
}

fn print_stats(counter: &NodeCounter, use_color: bool) {
    for (kind, count) in counter.counts() {
        println!("  {:<24}{:>6}", kind, count);
    }
    if use_color {
        println!("  {}{:<24}{:>6}{}", GRAY, "total", counter.total(), RESET);
    } else {
        println!("  {:<24}{:>6}", "total", counter.total());
    }
}

// ============================================================================
// Input
// ============================================================================

fn read_input(input: &InputArgs) -> Result<Source, i32> {
    if let Some(text) = &input.eval {
        return Ok(Source {
            name: "<eval>".to_string(),
            text: text.clone(),
        });
    }
    match &input.file {
        Some(path) => read_file(path),
        None => read_stdin(),
    }
}

fn read_file(path: &Path) -> Result<Source, i32> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Source {
            name: path.display().to_string(),
            text,
        }),
        Err(e) => {
            print_error(&format!("cannot read '{}': {}", path.display(), e));
            Err(EXIT_IO_ERROR)
        }
    }
}

fn read_stdin() -> Result<Source, i32> {
    let mut text = String::new();
    match io::stdin().read_to_string(&mut text) {
        Ok(_) => Ok(Source {
            name: "<stdin>".to_string(),
            text,
        }),
        Err(e) => {
            print_error(&format!("cannot read stdin: {}", e));
            Err(EXIT_IO_ERROR)
        }
    }
}

// ============================================================================
// Output
// ============================================================================

/// Render a tokenizer or parser error against its source.
///
/// On a terminal the error goes through miette's graphical handler; otherwise
/// a single `name:line:col: <category>[code]: message` line is printed, for
/// example `<eval>:1:3: syntax error[2003]: ...`.
fn report_parse_error(source: &Source, err: ParseError) {
    if io::stderr().is_terminal() {
        let report = Report::new(err).with_source_code(NamedSource::new(&source.name, source.text.clone()));
        eprintln!("{:?}", report);
    } else {
        let position = LineMap::new(&source.text).locate(err.span().start);
        eprintln!(
            "{}:{}: {}[{}]: {}",
            source.name,
            position,
            err.category(),
            err.code(),
            err.message()
        );
    }
}

fn print_error(msg: &str) {
    if io::stderr().is_terminal() {
        eprintln!("{}{}error{}: {}", BOLD, RED, RESET, msg);
    } else {
        eprintln!("error: {}", msg);
    }
}
