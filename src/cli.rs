use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jist")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "JistScript interpreter", long_about = None)]
pub struct Args {
    #[arg(long = "color", value_name = "WHEN", default_value = "auto", global = true)]
    pub color: ColorChoice,

    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse and evaluate a script
    Run {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the value of the last statement as JSON
        #[arg(long = "print-result")]
        print_result: bool,

        #[arg(long = "compact", requires = "print_result")]
        compact: bool,
    },
    /// Print the token stream of a script
    Tokens {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print the syntax tree of a script
    Ast {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    Complete {
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

impl Commands {
    pub fn file(&self) -> Option<&PathBuf> {
        match self {
            Commands::Run { file, .. } | Commands::Tokens { file } | Commands::Ast { file } => {
                Some(file)
            }
            Commands::Complete { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "Invalid color choice: {}. Must be 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = Args::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, &bin_name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_choice_parsing() {
        assert!(matches!("AUTO".parse::<ColorChoice>(), Ok(ColorChoice::Auto)));
        assert!(matches!("never".parse::<ColorChoice>(), Ok(ColorChoice::Never)));
        assert!("sometimes".parse::<ColorChoice>().is_err());
    }

    #[test]
    fn test_run_flags() {
        let args = Args::try_parse_from(["jist", "run", "main.jist", "--print-result", "--compact"])
            .unwrap();
        match args.command {
            Commands::Run {
                file,
                print_result,
                compact,
            } => {
                assert_eq!(file, PathBuf::from("main.jist"));
                assert!(print_result);
                assert!(compact);
            }
            other => panic!("expected run, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["jist", "tokens", "a.jist", "--color", "never", "-v"]).unwrap();
        assert!(matches!(args.color, ColorChoice::Never));
        assert!(args.verbose);
        assert_eq!(args.command.file(), Some(&PathBuf::from("a.jist")));
    }

    #[test]
    fn test_compact_requires_print_result() {
        assert!(Args::try_parse_from(["jist", "run", "a.jist", "--compact"]).is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Args::try_parse_from(["jist"]).is_err());
    }

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }
}
