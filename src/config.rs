use crate::cli::{Args, ColorChoice, Commands};

/// How the final value of `jist run` is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultFormat {
    Hidden,
    Pretty,
    Compact,
}

pub struct AppConfig {
    pub color_enabled: bool,
    pub verbose: bool,
    pub result_format: ResultFormat,
}

impl AppConfig {
    pub fn from_args(args: &Args) -> Self {
        let color_enabled = match args.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => atty::is(atty::Stream::Stderr) && atty::is(atty::Stream::Stdout),
        };

        let result_format = match &args.command {
            Commands::Run {
                print_result: true,
                compact: true,
                ..
            } => ResultFormat::Compact,
            Commands::Run {
                print_result: true,
                ..
            } => ResultFormat::Pretty,
            _ => ResultFormat::Hidden,
        };

        AppConfig {
            color_enabled,
            verbose: args.verbose,
            result_format,
        }
    }

    /// The `EnvFilter` directive used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "jist=debug"
        } else {
            "jist=warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(argv: &[&str]) -> AppConfig {
        AppConfig::from_args(&Args::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_explicit_color() {
        assert!(config(&["jist", "--color", "always", "ast", "a.jist"]).color_enabled);
        assert!(!config(&["jist", "--color", "never", "ast", "a.jist"]).color_enabled);
    }

    #[test]
    fn test_result_format() {
        assert_eq!(config(&["jist", "run", "a.jist"]).result_format, ResultFormat::Hidden);
        assert_eq!(
            config(&["jist", "run", "a.jist", "--print-result"]).result_format,
            ResultFormat::Pretty
        );
        assert_eq!(
            config(&["jist", "run", "a.jist", "--print-result", "--compact"]).result_format,
            ResultFormat::Compact
        );
        assert_eq!(config(&["jist", "tokens", "a.jist"]).result_format, ResultFormat::Hidden);
    }

    #[test]
    fn test_log_filter() {
        assert_eq!(config(&["jist", "-v", "run", "a.jist"]).default_log_filter(), "jist=debug");
        assert_eq!(config(&["jist", "run", "a.jist"]).default_log_filter(), "jist=warn");
    }
}
