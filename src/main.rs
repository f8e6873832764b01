//! mcp-delete-group: asks an MCP server to delete a group
//!
//! Sends a single `delete_group` command over TCP and prints the server's
//! response to standard output.

use std::error::Error;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

use mcp_delete_group::config::{self, RawArgs};
use mcp_delete_group::{ClientError, McpClient};

/// Delete a group on an MCP server.
///
/// All four connection flags are required. The server response is printed
/// verbatim on success.
#[derive(Parser, Debug)]
#[command(name = "mcp-delete-group")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// IP address or host name of the MCP server
    #[arg(long, value_name = "HOST")]
    server_ip: Option<String>,

    /// Port number of the MCP server
    #[arg(long, value_name = "PORT")]
    server_port: Option<u16>,

    /// Authentication token
    #[arg(long, value_name = "TOKEN")]
    token: Option<String>,

    /// Name of the group to delete
    #[arg(long, value_name = "NAME")]
    group_name: Option<String>,

    /// Read until the server closes instead of stopping at the first short read
    #[arg(long)]
    read_until_eof: bool,

    /// How long to wait for more data after a full 4096-byte chunk (default: 10000).
    /// A server pausing longer than this mid-response has the rest cut off;
    /// use --read-until-eof for such servers
    #[arg(long, value_name = "MS")]
    idle_timeout_ms: Option<u64>,

    /// Connect, read, and write timeout in seconds (default: none)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

impl From<&Args> for RawArgs {
    fn from(args: &Args) -> Self {
        Self {
            server_ip: args.server_ip.clone(),
            server_port: args.server_port,
            token: args.token.clone(),
            group_name: args.group_name.clone(),
            read_until_eof: args.read_until_eof,
            idle_timeout_ms: args.idle_timeout_ms,
            timeout_secs: args.timeout,
        }
    }
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
///
/// The filter comes from the CLI only; the environment is not consulted.
fn init_tracing(level: Level) {
    let filter = EnvFilter::default().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Renders an error together with its chain of causes.
fn error_chain(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Validates the parsed flags and builds the client.
fn build_client(args: &Args) -> Result<McpClient, ClientError> {
    let cfg = config::load_config(RawArgs::from(args))?;
    Ok(McpClient::new(cfg))
}

/// Entry point for mcp-delete-group.
fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    let client = match build_client(&args) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("ERROR: {}", error_chain(&e));
            eprintln!();
            eprintln!("{}", Args::command().render_usage());
            return ExitCode::FAILURE;
        }
    };

    let cfg = client.config();
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        endpoint = %cfg.endpoint(),
        group = %cfg.group_name,
        "Sending request to delete group"
    );

    match client.delete_configured_group() {
        Ok(response) => {
            println!("{response}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!(error = ?e, "Delete group request failed");
            eprintln!("ERROR: {}", error_chain(&e));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn log_level_selection() {
        assert_eq!(get_log_level(0, true, "trace"), Level::ERROR);
        assert_eq!(get_log_level(0, false, "debug"), Level::DEBUG);
        assert_eq!(get_log_level(0, false, "bogus"), Level::WARN);
        assert_eq!(get_log_level(1, false, "warn"), Level::INFO);
        assert_eq!(get_log_level(2, false, "warn"), Level::DEBUG);
        assert_eq!(get_log_level(5, false, "warn"), Level::TRACE);
    }

    #[test]
    fn flags_map_to_raw_args() {
        let args = Args::parse_from([
            "mcp-delete-group",
            "--server-ip",
            "10.1.2.3",
            "--server-port",
            "7000",
            "--token",
            "t",
            "--group-name",
            "g",
            "--read-until-eof",
            "--timeout",
            "10",
        ]);
        let raw = RawArgs::from(&args);
        assert_eq!(raw.server_ip.as_deref(), Some("10.1.2.3"));
        assert_eq!(raw.server_port, Some(7000));
        assert!(raw.read_until_eof);
        assert_eq!(raw.timeout_secs, Some(10));
        assert!(raw.idle_timeout_ms.is_none());
    }

    #[test]
    fn missing_flags_parse_as_none() {
        let args = Args::parse_from(["mcp-delete-group", "--token", "t"]);
        let raw = RawArgs::from(&args);
        assert!(raw.server_ip.is_none());
        assert!(raw.server_port.is_none());
        assert!(config::load_config(raw).is_err());
    }

    #[test]
    fn invalid_flags_surface_as_validation_error() {
        let args = Args::parse_from(["mcp-delete-group", "--server-port", "0"]);
        let err = build_client(&args).unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert!(error_chain(&err).contains("--server-port"));
    }

    #[test]
    fn valid_flags_build_client() {
        let args = Args::parse_from([
            "mcp-delete-group",
            "--server-ip",
            " ",
            "--server-port",
            "1",
            "--token",
            " ",
            "--group-name",
            " ",
        ]);
        let client = build_client(&args).unwrap();
        assert_eq!(client.config().group_name, " ");
    }

    #[test]
    fn error_chain_includes_causes() {
        let e = ClientError::Read {
            endpoint: "h:1".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer"),
        };
        assert_eq!(
            error_chain(&e),
            "failed to read response from h:1: reset by peer"
        );
    }
}
