//! Integration tests for CLI
//!
//! These tests verify argument parsing without running the commands.

#![allow(clippy::panic)] // Allow panic! in tests for clear failure messages

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use infrastructure::ProviderKind;
use presentation_cli::{Cli, Commands};

fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
    let os_args: Vec<OsString> = args.iter().map(OsString::from).collect();
    Cli::try_parse_from(os_args)
}

#[test]
fn cli_parses_parse_command() {
    let cli = parse_args(&["zustellkarte-cli", "parse", "Hauptstraße 9A, Oberthal"]).unwrap();
    let Commands::Parse { address, json } = cli.command else {
        panic!("Expected Parse command");
    };
    assert_eq!(address, "Hauptstraße 9A, Oberthal");
    assert!(!json);
}

#[test]
fn cli_parses_normalize_command() {
    let cli = parse_args(&["zustellkarte-cli", "normalize", "Hauptstr."]).unwrap();
    assert!(matches!(cli.command, Commands::Normalize { ref street } if street == "Hauptstr."));
}

#[test]
fn cli_parses_geocode_with_providers() {
    let cli = parse_args(&[
        "zustellkarte-cli",
        "geocode",
        "Hauptstraße 9, Oberthal",
        "--providers",
        "photon,nominatim",
        "--json",
    ])
    .unwrap();

    let Commands::Geocode {
        address,
        providers,
        json,
    } = cli.command
    else {
        panic!("Expected Geocode command");
    };
    assert_eq!(address, "Hauptstraße 9, Oberthal");
    assert_eq!(providers, vec![ProviderKind::Photon, ProviderKind::Nominatim]);
    assert!(json);
}

#[test]
fn cli_rejects_unknown_provider() {
    let result = parse_args(&[
        "zustellkarte-cli",
        "geocode",
        "Hauptstraße 9",
        "--providers",
        "google",
    ]);
    assert!(result.is_err());
}

#[test]
fn cli_geocode_without_providers_uses_config() {
    let cli = parse_args(&["zustellkarte-cli", "geocode", "Hauptstraße 9"]).unwrap();
    let Commands::Geocode { providers, .. } = cli.command else {
        panic!("Expected Geocode command");
    };
    assert!(providers.is_empty());
}

#[test]
fn cli_parses_batch_from_stdin_and_file() {
    let cli = parse_args(&["zustellkarte-cli", "batch"]).unwrap();
    assert!(matches!(cli.command, Commands::Batch { input: None, .. }));

    let cli = parse_args(&["zustellkarte-cli", "batch", "tour.txt", "--json"]).unwrap();
    let Commands::Batch { input, json, .. } = cli.command else {
        panic!("Expected Batch command");
    };
    assert_eq!(input, Some(PathBuf::from("tour.txt")));
    assert!(json);
}

#[test]
fn cli_parses_track_thresholds() {
    let cli = parse_args(&[
        "zustellkarte-cli",
        "track",
        "fixes.jsonl",
        "--max-accuracy",
        "50",
        "--max-jump",
        "75.5",
    ])
    .unwrap();

    let Commands::Track {
        input,
        max_accuracy,
        max_jump,
        json,
    } = cli.command
    else {
        panic!("Expected Track command");
    };
    assert_eq!(input, Some(PathBuf::from("fixes.jsonl")));
    assert_eq!(max_accuracy, Some(50.0));
    assert_eq!(max_jump, Some(75.5));
    assert!(!json);
}

#[test]
fn cli_parses_config_command() {
    let cli = parse_args(&["zustellkarte-cli", "config"]).unwrap();
    assert!(matches!(cli.command, Commands::Config));
}

#[test]
fn cli_global_flags_after_subcommand() {
    let cli = parse_args(&[
        "zustellkarte-cli",
        "config",
        "-vv",
        "--config",
        "custom.toml",
        "--json-logs",
    ])
    .unwrap();
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    assert!(cli.json_logs);
}

#[test]
fn cli_requires_subcommand() {
    assert!(parse_args(&["zustellkarte-cli"]).is_err());
}

#[test]
fn cli_parse_requires_address() {
    assert!(parse_args(&["zustellkarte-cli", "parse"]).is_err());
}
