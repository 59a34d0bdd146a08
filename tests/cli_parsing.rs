//! Tests for CLI subcommand parsing.

use clap::Parser;
use v3io_cli::config::{InputFormat, OutputFormat};
use v3io_cli::{Cli, Command, LogFormat, LogLevel};

#[test]
fn test_putitems_defaults() {
    let cli = Cli::try_parse_from(["v3io_cli", "-s", "webapi:8081", "putitems", "users/"]).unwrap();
    assert_eq!(cli.global.server.as_deref(), Some("webapi:8081"));
    assert_eq!(cli.global.timeout_seconds, 30);
    assert!(matches!(cli.global.log_level, LogLevel::Warn));
    assert!(matches!(cli.global.log_format, LogFormat::Plain));

    let Command::PutItems(args) = cli.command else {
        panic!("Expected putitems");
    };
    assert_eq!(args.path, "users/");
    assert_eq!(args.input, InputFormat::Json);
    assert_eq!(args.key, None);
    assert_eq!(args.workers.get(), 16);
}

#[test]
fn test_putitems_all_options() {
    let cli = Cli::try_parse_from([
        "v3io_cli", "putitems", "t", "-i", "csv", "-k", "name", "-w", "4", "-s", "host",
        "-u", "alice", "-p", "secret",
    ])
    .unwrap();
    assert_eq!(cli.global.server.as_deref(), Some("host"));
    assert_eq!(cli.global.user.as_deref(), Some("alice"));
    assert_eq!(cli.global.password.as_deref(), Some("secret"));
    assert_eq!(cli.global.token, None);

    let Command::PutItems(args) = cli.command else {
        panic!("Expected putitems");
    };
    assert_eq!(args.input, InputFormat::Csv);
    assert_eq!(args.key.as_deref(), Some("name"));
    assert_eq!(args.workers.get(), 4);
}

#[test]
fn test_invalid_worker_counts_rejected() {
    for bad in ["0", "-3", "many", ""] {
        let result = Cli::try_parse_from(["v3io_cli", "putitems", "t", "-w", bad]);
        assert!(result.is_err(), "worker count {bad:?} should be rejected");
    }
}

#[test]
fn test_unknown_formats_rejected() {
    assert!(Cli::try_parse_from(["v3io_cli", "putitems", "t", "-i", "xml"]).is_err());
    assert!(Cli::try_parse_from(["v3io_cli", "getitems", "t", "-o", "parquet"]).is_err());
}

#[test]
fn test_getitems_options() {
    let cli = Cli::try_parse_from([
        "v3io_cli",
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "-t",
        "tok",
        "getitems",
        "users",
        "-o",
        "csv",
        "-a",
        "__name,age",
        "-f",
        "age > 3",
        "--marker",
        "abc",
    ])
    .unwrap();
    assert!(matches!(cli.global.log_level, LogLevel::Debug));
    assert!(matches!(cli.global.log_format, LogFormat::Json));
    assert_eq!(cli.global.token.as_deref(), Some("tok"));

    let Command::GetItems(args) = cli.command else {
        panic!("Expected getitems");
    };
    assert_eq!(args.path, "users");
    assert_eq!(args.output, OutputFormat::Csv);
    assert_eq!(args.attributes.as_deref(), Some("__name,age"));
    assert_eq!(args.filter.as_deref(), Some("age > 3"));
    assert_eq!(args.marker.as_deref(), Some("abc"));
}

#[test]
fn test_path_is_required() {
    assert!(Cli::try_parse_from(["v3io_cli", "getitems"]).is_err());
    assert!(Cli::try_parse_from(["v3io_cli"]).is_err());
}
