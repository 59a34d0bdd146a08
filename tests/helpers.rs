// Shared test helpers for building CLI options and canned scan pages.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use clap::Parser;
use serde_json::{json, Value};

use v3io_cli::config::{GetItemsArgs, GlobalOpts, PutItemsArgs};
use v3io_cli::{Cli, Command};

/// Parses `putitems` arguments against `server` with a session token.
#[allow(dead_code)] // Used by other test files
pub fn put_items(server: &str, args: &[&str]) -> (GlobalOpts, PutItemsArgs) {
    let mut argv = vec!["v3io_cli", "-s", server, "-t", "test-token", "putitems"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).expect("Failed to parse putitems arguments");
    match cli.command {
        Command::PutItems(args) => (cli.global, args),
        other => panic!("Expected putitems, got {other:?}"),
    }
}

/// Parses `getitems` arguments against `server` with a session token.
#[allow(dead_code)]
pub fn get_items(server: &str, args: &[&str]) -> (GlobalOpts, GetItemsArgs) {
    let mut argv = vec!["v3io_cli", "-s", server, "-t", "test-token", "getitems"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).expect("Failed to parse getitems arguments");
    match cli.command {
        Command::GetItems(args) => (cli.global, args),
        other => panic!("Expected getitems, got {other:?}"),
    }
}

/// A `GetItems` response page.
#[allow(dead_code)]
pub fn page(items: Vec<Value>, last: bool, next_marker: &str) -> Value {
    json!({
        "LastItemIncluded": if last { "TRUE" } else { "FALSE" },
        "NextMarker": next_marker,
        "NumItems": items.len(),
        "Items": items,
    })
}
