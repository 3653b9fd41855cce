// minic: compile a tiny C subset to three-address code, run it, step through it

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::{ArgAction, Parser as ClapParser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, LevelFilter};
use ratatui::{backend::CrosstermBackend, Terminal};

use minic::driver::{compile_tokens, Compilation};
use minic::interpreter::engine::{Interpreter, DEFAULT_SNAPSHOT_LIMIT};
use minic::parser::lexer::{tokens_from_json, tokens_to_json, Lexer, Token, TokenType};
use minic::tac::{CounterScheme, GeneratorConfig};
use minic::ui::App;

/// Compile a tiny C subset to three-address code
#[derive(Debug, ClapParser)]
#[clap(name = "minic", version, about)]
struct Args {
    /// Source file to compile
    #[clap(required_unless_present = "tokens", conflicts_with = "tokens")]
    source: Option<PathBuf>,

    /// Read the token stream from a JSON token file instead of a source file
    #[clap(long, value_name = "FILE")]
    tokens: Option<PathBuf>,

    /// Write the token stream as a JSON token file
    #[clap(long, value_name = "FILE")]
    emit_tokens: Option<PathBuf>,

    /// Use separate counters for temps and labels
    #[clap(long)]
    split_counters: bool,

    /// Execute the generated TAC and print the result
    #[clap(long)]
    run: bool,

    /// Input binding for a `main` parameter
    #[clap(long = "arg", value_name = "NAME=VALUE", value_parser = parse_binding)]
    args: Vec<(String, i64)>,

    /// Open the interactive viewer after compiling
    #[clap(long)]
    tui: bool,

    /// Maximum number of recorded snapshots
    #[clap(long, value_name = "N", default_value_t = DEFAULT_SNAPSHOT_LIMIT)]
    snapshot_limit: usize,

    #[clap(flatten)]
    logging: LoggingArgs,
}

#[derive(Debug, clap::Args)]
struct LoggingArgs {
    /// Increase log verbosity
    #[clap(short = 'v', action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    /// Decrease log verbosity
    #[clap(short = 'q', action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
}

impl LoggingArgs {
    fn level_filter(&self) -> LevelFilter {
        match i16::from(self.verbose) - i16::from(self.quiet) {
            i16::MIN..=-2 => LevelFilter::Off,
            -1 => LevelFilter::Error,
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn parse_binding(s: &str) -> Result<(String, i64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid binding `{}`: expected NAME=VALUE", s))?;
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid value for `{}`: {}", name, e))?;
    Ok((name.trim().to_string(), value))
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.logging.level_filter())
        .format_timestamp(None)
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    // Source text is only needed for the viewer; a token file has none.
    let (source, tokens) = match (&args.source, &args.tokens) {
        (_, Some(path)) => {
            info!("reading tokens from {}", path.display());
            let tokens = tokens_from_json(&fs::read_to_string(path)?)?;
            (reconstruct_source(&tokens), tokens)
        }
        (Some(path), None) => {
            info!("compiling {}", path.display());
            let source = fs::read_to_string(path)?;
            let tokens = Lexer::new(&source).tokenize();
            (source, tokens)
        }
        (None, None) => return Err("no input: pass a source file or --tokens <FILE>".into()),
    };

    if let Some(path) = &args.emit_tokens {
        fs::write(path, tokens_to_json(&tokens)?)?;
        info!("wrote {} tokens to {}", tokens.len(), path.display());
    }

    for token in &tokens {
        println!("{}", token);
    }

    let config = GeneratorConfig {
        counters: if args.split_counters {
            CounterScheme::Split
        } else {
            CounterScheme::Shared
        },
        ..GeneratorConfig::default()
    };

    let Compilation {
        ast, instructions, ..
    } = compile_tokens(tokens, config)?;

    println!();
    println!("{}", ast.pretty());
    println!();
    println!("Three-address Code (TAC):");
    for instr in &instructions {
        println!("{}", instr);
    }

    if !args.run && !args.tui {
        return Ok(());
    }

    let mut interpreter = Interpreter::new(instructions, args.args, args.snapshot_limit)?;
    let outcome = interpreter.run();
    info!("recorded {} snapshots", interpreter.total_snapshots());

    if !args.tui {
        println!();
        match outcome? {
            Some(value) => println!("Result: {}", value),
            None => println!("Result: (no return)"),
        }
        return Ok(());
    }

    run_viewer(App::new(interpreter, source, ast.pretty_lines(), outcome.err()))
}

fn run_viewer(mut app: App) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(res?)
}

/// Token values separated by spaces, one statement per line.
fn reconstruct_source(tokens: &[Token]) -> String {
    let mut source = String::new();
    for token in tokens.iter().filter(|t| t.kind != TokenType::Eof) {
        if !source.is_empty() && !source.ends_with('\n') {
            source.push(' ');
        }
        source.push_str(&token.value);
        if matches!(token.value.as_str(), ";" | "{" | "}") {
            source.push('\n');
        }
    }
    source
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(verbose: u8, quiet: u8) -> LevelFilter {
        LoggingArgs { verbose, quiet }.level_filter()
    }

    #[test]
    fn test_level_filter_from_counts() {
        assert_eq!(level(0, 0), LevelFilter::Warn);
        assert_eq!(level(1, 0), LevelFilter::Info);
        assert_eq!(level(0, 1), LevelFilter::Error);
        assert_eq!(level(0, 2), LevelFilter::Off);
    }

    #[test]
    fn test_level_filter_saturates_on_large_counts() {
        assert_eq!(level(200, 0), LevelFilter::Trace);
        assert_eq!(level(u8::MAX, 0), LevelFilter::Trace);
        assert_eq!(level(0, 200), LevelFilter::Off);
        assert_eq!(level(0, u8::MAX), LevelFilter::Off);
    }
}
