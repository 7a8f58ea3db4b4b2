use std::{
    fs::read_to_string,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    process::exit,
    time::Instant,
};

use clap::{ArgAction, Parser};
use liszt::{
    check_source, display_error, errors::errors::Diagnostics, lexer::lexer::tokenize,
    type_checker::{bound_ast::BoundTree, environment::TypeEnv},
};
use log::{info, LevelFilter};

#[derive(Parser)]
#[command(name = "liszt", version, about = "liszt type checker", long_about = None)]
struct Cli {
    /// Source file to check. Starts a REPL when omitted.
    file: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Print the bound tree instead of one type per statement
    #[arg(long = "dump", action = ArgAction::SetTrue)]
    dump: bool,

    /// Print the token stream before checking
    #[arg(long = "tokens", action = ArgAction::SetTrue)]
    tokens: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();

    let mut env = TypeEnv::new();

    match &cli.file {
        Some(path) => {
            if !check_file(&cli, path, &mut env) {
                exit(1);
            }
        }
        None => repl(&cli, &mut env),
    }
}

fn check_file(cli: &Cli, path: &Path, env: &mut TypeEnv) -> bool {
    let source = match read_to_string(path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", path.display(), error);
            return false;
        }
    };

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let start = Instant::now();
    let result = run(cli, &source, &file_name, env);
    info!("Checked {} in {:?}", file_name, start.elapsed());

    match result {
        Ok(tree) => {
            report(cli, &tree);
            true
        }
        Err(diagnostics) => {
            for error in &diagnostics {
                display_error(error, &source);
            }
            false
        }
    }
}

fn repl(cli: &Cli, env: &mut TypeEnv) {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("liszt> ");
        if io::stdout().flush().is_err() {
            return;
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            _ => return,
        };

        if line.trim().is_empty() {
            return;
        }

        match run(cli, &line, "shell", env) {
            Ok(tree) => report(cli, &tree),
            Err(diagnostics) => {
                for error in &diagnostics {
                    display_error(error, &line);
                }
            }
        }
    }
}

fn run(cli: &Cli, source: &str, file: &str, env: &mut TypeEnv) -> Result<BoundTree, Diagnostics> {
    if cli.tokens {
        for token in tokenize(source.to_string(), Some(file.to_string()))? {
            println!("{:?} {:?}", token.kind, token.value);
        }
    }

    check_source(source, file, env)
}

fn report(cli: &Cli, tree: &BoundTree) {
    if cli.dump {
        println!("{:#?}", tree.root);
        return;
    }

    for stmt in &tree.root.children {
        println!("{}", stmt.ty);
    }
}
