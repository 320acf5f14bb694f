//! Command-line definition

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use infrastructure::ProviderKind;

/// Zustellkarte CLI
#[derive(Debug, Parser)]
#[command(name = "zustellkarte-cli")]
#[command(author, version, about = "Address resolution and position tracking for delivery maps", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split a free-text address into street, house number and locality
    ///
    /// Example: zustellkarte-cli parse "Hauptstraße 9A, Oberthal"
    Parse {
        /// Address such as "Hauptstraße 9A, Oberthal"
        address: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Normalize a street name the way cache keys and queries see it
    Normalize {
        /// Street name such as "Hauptstr."
        street: String,
    },

    /// Resolve one address to coordinates
    Geocode {
        /// Address such as "Hauptstraße 9A, Oberthal"
        address: String,

        /// Provider order, overriding the configuration (e.g. "photon,nominatim")
        #[arg(long, value_delimiter = ',')]
        providers: Vec<ProviderKind>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Resolve an address list, one address per line
    ///
    /// Lines look like "Hauptstraße 9A, Oberthal | Hintereingang"; the part
    /// after "|" is kept as a note. Blank lines and lines starting with "#"
    /// are ignored.
    Batch {
        /// Input file (default: stdin)
        input: Option<PathBuf>,

        /// Provider order, overriding the configuration
        #[arg(long, value_delimiter = ',')]
        providers: Vec<ProviderKind>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Filter a stream of position fixes given as JSON lines
    Track {
        /// Input file (default: stdin)
        input: Option<PathBuf>,

        /// Reject fixes with a larger accuracy radius (meters)
        #[arg(long)]
        max_accuracy: Option<f64>,

        /// Reject fixes farther from the previous one (meters)
        #[arg(long)]
        max_jump: Option<f64>,

        /// Print one JSON object per position
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}

/// Log filter for a `-v` count; `None` keeps the configured filter
#[must_use]
pub const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_verbosity_zero_keeps_config() {
        assert_eq!(log_filter_from_verbosity(0), None);
    }

    #[test]
    fn log_filter_verbosity_levels() {
        assert_eq!(log_filter_from_verbosity(1), Some("info"));
        assert_eq!(log_filter_from_verbosity(2), Some("debug"));
        assert_eq!(log_filter_from_verbosity(3), Some("trace"));
        assert_eq!(log_filter_from_verbosity(10), Some("trace"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
