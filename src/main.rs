use clap::Parser;
use jist::cli::{generate_completions, Args, Commands};
use jist::config::{AppConfig, ResultFormat};
use jist::convert::to_json_string;
use jist::diagnostic::{render_diagnostics, Diagnostic};
use jist::interpreter::{create_root_environment, parse, Interpreter};
use jist::lexer::tokenize_spanned;
use owo_colors::OwoColorize;
use std::path::Path;
use std::process;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let args = Args::parse();
    if let Commands::Complete { shell } = args.command {
        generate_completions(shell);
        return;
    }

    let config = AppConfig::from_args(&args);
    init_tracing(&config);
    verbose_log(&config, "Starting jist");

    let Some(path) = args.command.file() else {
        return;
    };
    let source = match read_file(path) {
        Ok(source) => source,
        Err(e) => {
            error_message(&config, &e);
            process::exit(1);
        }
    };
    let file_name = path.display().to_string();

    let result = match &args.command {
        Commands::Run { .. } => run_script(&source, &file_name, &config),
        Commands::Tokens { .. } => print_tokens(&source),
        Commands::Ast { .. } => print_ast(&source),
        Commands::Complete { .. } => Ok(()),
    };

    if let Err(diagnostics) = result {
        eprint!(
            "{}",
            render_diagnostics(&source, &file_name, &diagnostics, config.color_enabled)
        );
        process::exit(1);
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter()));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.color_enabled)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .init();
}

fn run_script(source: &str, file_name: &str, config: &AppConfig) -> Result<(), Vec<Diagnostic>> {
    let program = parse(source).map_err(|e| vec![e.to_diagnostic()])?;
    verbose_log(config, &format!("Parsed {} statement(s)", program.body.len()));

    let mut interpreter = Interpreter::new();
    let outcome = interpreter.run(&program, &create_root_environment());
    let mut diagnostics = interpreter.take_warnings();

    match outcome {
        Ok(value) => {
            if !diagnostics.is_empty() {
                // Warnings alone do not fail the run.
                let rendered = render_diagnostics(source, file_name, &diagnostics, config.color_enabled);
                eprint!("{}", rendered);
            }
            match config.result_format {
                ResultFormat::Hidden => {}
                ResultFormat::Pretty => println!("{}", to_json_string(&value, false)),
                ResultFormat::Compact => println!("{}", to_json_string(&value, true)),
            }
            Ok(())
        }
        Err(e) => {
            diagnostics.push(e.to_diagnostic());
            Err(diagnostics)
        }
    }
}

fn print_tokens(source: &str) -> Result<(), Vec<Diagnostic>> {
    let tokens = tokenize_spanned(source).map_err(|e| vec![e.to_diagnostic()])?;
    for spanned in tokens {
        println!(
            "{}..{}\t{:?}",
            spanned.span.start, spanned.span.end, spanned.token
        );
    }
    Ok(())
}

fn print_ast(source: &str) -> Result<(), Vec<Diagnostic>> {
    let program = parse(source).map_err(|e| vec![e.to_diagnostic()])?;
    println!("{:#?}", program);
    Ok(())
}

fn read_file(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading file '{}': {}", path.display(), e))
}

fn verbose_log(config: &AppConfig, message: &str) {
    if config.verbose {
        eprintln!("[jist:debug] {}", message);
    }
}

fn error_message(config: &AppConfig, message: &str) {
    if config.color_enabled {
        eprintln!("{}", message.red().bold());
    } else {
        eprintln!("{}", message);
    }
}
