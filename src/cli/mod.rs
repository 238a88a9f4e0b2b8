//! Command-line interface definitions for the `hpcloud` binary.
//!
//! This module centralises the clap parser structures so both the main binary
//! and the build script can reuse them when generating the manual page.

use std::num::NonZeroU32;

use clap::Parser;

/// Top-level CLI for the `hpcloud` binary.
#[derive(Debug, Parser)]
#[command(
    name = "hpcloud",
    about = "Create servers through the HP Cloud compute API",
    arg_required_else_help = true
)]
pub(crate) enum Cli {
    /// Validate a server request and send it to the compute service.
    #[command(
        name = "create-server",
        about = "Validate a server request and send it to the compute service"
    )]
    CreateServer(CreateServerCommand),
}

/// Arguments for the `hpcloud create-server` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct CreateServerCommand {
    /// Name of the new server.
    #[arg(long)]
    pub(crate) name: String,
    /// Flavor tier (xsmall, small, medium, large, xlarge, 2xlarge).
    ///
    /// Falls back to `default_flavor` from configuration when omitted.
    #[arg(long, value_name = "TIER")]
    pub(crate) flavor: Option<String>,
    /// Boot image, as a numeric identifier or a known image label.
    ///
    /// Falls back to `default_image` from configuration when omitted.
    #[arg(long, value_name = "IMAGE")]
    pub(crate) image: Option<String>,
    /// SSH key-pair name to install on the server.
    #[arg(long, value_name = "KEY")]
    pub(crate) key_name: Option<String>,
    /// Attach a configuration drive.
    #[arg(long)]
    pub(crate) config_drive: bool,
    /// Minimum number of servers to create.
    #[arg(long, value_name = "N")]
    pub(crate) min_count: Option<NonZeroU32>,
    /// Maximum number of servers to create.
    #[arg(long, value_name = "N")]
    pub(crate) max_count: Option<NonZeroU32>,
    /// File content injected at boot (at most 255 bytes).
    #[arg(long, value_name = "TEXT")]
    pub(crate) personality: Option<String>,
    /// User data passed to the server inline.
    #[arg(long, value_name = "USER_DATA", conflicts_with = "user_data_file")]
    pub(crate) user_data: Option<String>,
    /// User data read from a local file.
    #[arg(long, value_name = "PATH", conflicts_with = "user_data")]
    pub(crate) user_data_file: Option<String>,
    /// Security group to attach; repeat for several groups.
    #[arg(long = "security-group", value_name = "NAME")]
    pub(crate) security_groups: Vec<String>,
    /// Metadata entry; repeat for several entries.
    #[arg(long = "metadata", value_name = "KEY=VALUE", value_parser = parse_metadata)]
    pub(crate) metadata: Vec<(String, String)>,
    /// Print the request payload instead of sending it.
    #[arg(long)]
    pub(crate) dry_run: bool,
}

fn parse_metadata(value: &str) -> Result<(String, String), String> {
    let Some((key, entry)) = value.split_once('=') else {
        return Err(format!("expected KEY=VALUE, got `{value}`"));
    };
    if key.trim().is_empty() {
        return Err(String::from("metadata key must not be empty"));
    }
    Ok((key.trim().to_owned(), entry.to_owned()))
}
