//! Command dispatch logic for parc-conso

use super::{ConsoArgs, GlobalArgs, InitArgs, MergeArgs, init_config, process_conso, process_merge};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "parc-conso", version, author, long_about = None)]
#[command(about = "Merge telecom billing exports and summarize monthly data consumption")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge CSV exports into one workbook, with the consumption summary
    Merge(MergeArgs),
    /// Write the monthly data consumption summary of a folder of exports
    Conso(ConsoArgs),
    /// Generate a default configuration file
    Init(InitArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);

    match &cli.command {
        Command::Merge(merge_args) => process_merge(host, &cli.global, merge_args),
        Command::Conso(conso_args) => process_conso(host, &cli.global, conso_args),
        Command::Init(init_args) => init_config(host, init_args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::LogLevel;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["parc-conso", "merge", "a.csv"]);
        let Command::Merge(args) = cli.command else {
            panic!("expected the merge command");
        };
        assert_eq!(args.output.as_str(), "Analyse de Parc.xlsx");
        assert!(!args.sheet_per_file && !args.no_summary && !args.recursive);
        assert_eq!(cli.global.log_level, LogLevel::None);

        let cli = Cli::parse_from(["parc-conso", "conso", "exports", "--config", "x.toml"]);
        let Command::Conso(args) = cli.command else {
            panic!("expected the conso command");
        };
        assert_eq!(args.output.as_str(), "Analyse de consommation.xlsx");
        assert_eq!(cli.global.config.as_deref().map(camino::Utf8Path::as_str), Some("x.toml"));

        let cli = Cli::parse_from(["parc-conso", "init"]);
        let Command::Init(args) = cli.command else {
            panic!("expected the init command");
        };
        assert_eq!(args.output.as_str(), "parc-conso.toml");
    }

    #[test]
    fn test_merge_requires_a_path() {
        assert!(Cli::try_parse_from(["parc-conso", "merge"]).is_err());
    }
}
