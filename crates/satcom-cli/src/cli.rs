use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use satcom_core::VERSION;

/// satcli - An encrypted, passphrase-protected catalogue of satellites
#[derive(Parser)]
#[command(name = "satcli")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the encrypted datastore
    #[arg(long, global = true, env = "SATCLI_STORE")]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Output format for record listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a satellite, replacing any record with the same name
    Add(AddArgs),

    /// Delete a satellite by name
    Delete {
        /// Satellite name
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// List every satellite
    List {
        /// Output format
        #[arg(short = 'O', long, value_enum, default_value_t = OutputFormat::Json)]
        output: OutputFormat,
    },

    /// Query satellites by operator, status, orbit, launch window or altitude
    Query(QueryArgs),

    /// Explain satellite terminology
    Explain {
        #[command(subcommand)]
        topic: ExplainTopic,
    },

    /// Re-encrypt the datastore under a new passphrase
    Passwd,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ExplainTopic {
    /// Explain an orbit type (LEO, MEO, GEO, GSO, HEO, SSO, HALO)
    Orbit {
        #[arg(value_name = "TERM")]
        term: String,
    },
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Satellite name (unique)
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Operating organisation
    #[arg(value_name = "OPERATOR")]
    pub operator: String,

    /// Status, e.g. Active or Inactive
    #[arg(value_name = "STATUS")]
    pub status: String,

    /// Orbit type, e.g. LEO or GEO
    #[arg(value_name = "ORBIT_TYPE")]
    pub orbit_type: String,

    /// Launch date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub launch_date: Option<String>,

    /// Altitude in km
    #[arg(long, default_value_t = 0.0)]
    pub altitude: f64,

    /// Part of a constellation
    #[arg(long)]
    pub constellation: bool,

    /// Mission objective
    #[arg(long)]
    pub mission: Option<String>,
}

/// Arguments for the `query` command
#[derive(Args, Default)]
pub struct QueryArgs {
    /// Filter by operator
    #[arg(short = 'o', long)]
    pub operator: Option<String>,

    /// Filter by status
    #[arg(short = 's', long)]
    pub status: Option<String>,

    /// Filter by orbit type
    #[arg(short = 't', long)]
    pub orbit_type: Option<String>,

    /// Launched on or after (YYYY-MM-DD)
    #[arg(long)]
    pub launch_after: Option<String>,

    /// Launched on or before (YYYY-MM-DD)
    #[arg(long)]
    pub launch_before: Option<String>,

    /// Only satellites in a constellation
    #[arg(long, conflicts_with = "standalone")]
    pub constellation: bool,

    /// Only satellites outside any constellation
    #[arg(long)]
    pub standalone: bool,

    /// Minimum altitude in km
    #[arg(long, default_value_t = 0.0)]
    pub min_altitude: f64,

    /// Maximum altitude in km
    #[arg(long, default_value_t = 0.0)]
    pub max_altitude: f64,

    /// Output format
    #[arg(short = 'O', long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,
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
    fn test_parse_add_with_options() {
        let cli = Cli::try_parse_from([
            "satcli",
            "add",
            "SAT-1",
            "ESA",
            "Active",
            "LEO",
            "--altitude",
            "550",
            "--constellation",
        ])
        .unwrap();
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.name, "SAT-1");
                assert_eq!(args.altitude, 550.0);
                assert!(args.constellation);
                assert!(args.launch_date.is_none());
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["satcli", "list", "--store", "/tmp/x.enc", "-vv"]).unwrap();
        assert_eq!(cli.store.as_deref(), Some("/tmp/x.enc"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_list_defaults_to_json() {
        let cli = Cli::try_parse_from(["satcli", "list"]).unwrap();
        match cli.command {
            Commands::List { output } => assert_eq!(output, OutputFormat::Json),
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_query_short_flags() {
        let cli = Cli::try_parse_from([
            "satcli", "query", "-o", "ESA", "-s", "Active", "-t", "LEO", "-O", "table",
        ])
        .unwrap();
        match cli.command {
            Commands::Query(args) => {
                assert_eq!(args.operator.as_deref(), Some("ESA"));
                assert_eq!(args.status.as_deref(), Some("Active"));
                assert_eq!(args.orbit_type.as_deref(), Some("LEO"));
                assert_eq!(args.output, OutputFormat::Table);
            }
            _ => panic!("expected query"),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["satcli", "list", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_query_constellation_flags_conflict() {
        assert!(
            Cli::try_parse_from(["satcli", "query", "--constellation", "--standalone"]).is_err()
        );
    }
}
