//! Binary entry point for the `hpcloud` CLI.

use std::io::{self, Write};
use std::process;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use hpcloud::{
    ComputeClient, ComputeConfig, ComputeError, ConfigError, Flavor, ImageRef, ServerRequest,
    UnknownFlavor, UnknownImage, UserDataError, ValidationError, resolve_user_data, serialize,
};

mod cli;

use cli::{Cli, CreateServerCommand};

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Flavor(#[from] UnknownFlavor),
    #[error(transparent)]
    Image(#[from] UnknownImage),
    #[error(transparent)]
    UserData(#[from] UserDataError),
    #[error("invalid server request: {0}")]
    Validation(#[from] ValidationError),
    #[error("server creation failed: {0}")]
    Compute(#[from] ComputeError),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let exit_code = match dispatch(cli).await {
        Ok(()) => 0,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

async fn dispatch(cli: Cli) -> Result<(), CliError> {
    match cli {
        Cli::CreateServer(command) => create_server(command, io::stdout()).await,
    }
}

async fn create_server(args: CreateServerCommand, mut out: impl Write) -> Result<(), CliError> {
    let config = ComputeConfig::load_without_cli_args()?;
    let dry_run = args.dry_run;
    let request = build_request(args, &config)?;

    if dry_run {
        let payload = serialize(&request)?;
        out.write_all(&payload)?;
        writeln!(out)?;
        return Ok(());
    }

    let access = config.access()?;
    let client = ComputeClient::new(access).compute_url(config.compute_url.as_str());
    let response = client.create_server(&request).await?;
    out.write_all(&response.body)?;
    writeln!(out)?;
    Ok(())
}

fn build_request(
    args: CreateServerCommand,
    config: &ComputeConfig,
) -> Result<ServerRequest, CliError> {
    let flavor = match args.flavor.as_deref() {
        Some(label) => label.parse::<Flavor>()?,
        None => config.flavor()?,
    };
    let image = match args.image.as_deref() {
        Some(selector) => selector.parse::<ImageRef>()?,
        None => config.image()?,
    };
    let user_data = resolve_user_data(args.user_data.as_deref(), args.user_data_file.as_deref())?;

    let mut builder = ServerRequest::builder()
        .flavor(flavor)
        .image(image)
        .name(args.name)
        .key_name(args.key_name)
        .config_drive(args.config_drive)
        .min_count(args.min_count)
        .max_count(args.max_count)
        .personality(args.personality)
        .user_data(user_data);
    for group in args.security_groups {
        builder = builder.security_group(group);
    }
    for (key, value) in args.metadata {
        builder = builder.metadata(key, value);
    }
    Ok(builder.build())
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}
