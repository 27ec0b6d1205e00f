use std::path::PathBuf;

use clap::Parser;

/// Terminal editor for a list of text parameters and a color
#[derive(Debug, Parser)]
#[command(name = "paramedit", version, about)]
pub struct Cli {
    /// Form definition (JSON with `params` and `model`); defaults to the built-in demo form
    #[arg(long, value_name = "PATH")]
    pub form: Option<PathBuf>,

    /// Config file to use instead of the user config
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(long)]
    pub debug: bool,

    /// Print the final model as JSON on exit
    #[arg(long)]
    pub print: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["paramedit", "--form", "dress.json", "--debug", "--print"]);
        assert_eq!(cli.form, Some(PathBuf::from("dress.json")));
        assert!(cli.debug);
        assert!(cli.print);
        assert!(cli.config.is_none());
    }
}
