use std::path::PathBuf;
use std::sync::Arc;

use argh::FromArgs;
use miette::{IntoDiagnostic, WrapErr};
use serverinfo::cache::Snapshot;
use serverinfo::embed::Reply;
use serverinfo::{Config, Host, Invocation, Snowflake};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

mod telemetry;

/// Shows information about the guild a channel belongs to.
#[derive(Debug, FromArgs)]
struct Opts {
    /// path to config file
    #[argh(option, default = "PathBuf::from(\"config.toml\")")]
    config_path: PathBuf,
    /// path to a JSON snapshot of the host caches, overrides the config
    #[argh(option)]
    snapshot: Option<PathBuf>,
    /// id of the channel the commands are sent in
    #[argh(option)]
    channel: Snowflake,
    /// message to process, read from stdin line by line when omitted
    #[argh(positional)]
    message: Vec<String>,
}

/// Prints a reply to stdout.
fn print_reply(reply: &Reply) -> miette::Result<()> {
    match reply {
        Reply::Embed(embed) => {
            let json = serde_json::to_string_pretty(embed).into_diagnostic()?;
            println!("{json}");
        }
        Reply::Notice(text) => println!("{text}"),
    }

    Ok(())
}

/// Dispatches a single message and prints the reply, if any.
async fn process(host: &Host, channel: Snowflake, message: &str) -> miette::Result<()> {
    let invocation = Invocation::new(channel, message);

    match host.dispatch(&invocation).await? {
        Some(reply) => print_reply(&reply),
        None => {
            debug!(%message, "message did not trigger a command");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let opts: Opts = argh::from_env();

    let config = Config::load(&opts.config_path)
        .wrap_err_with(|| format!("loading {}", opts.config_path.display()))?;

    telemetry::try_init(&config.tracing)?;

    // Fail early rather than falling back to utc in the plugin
    config.server_info.utc_offset()?;

    let snapshot_path = opts
        .snapshot
        .clone()
        .or_else(|| config.cache.snapshot.clone())
        .ok_or_else(|| miette::miette!("no snapshot given, use --snapshot or cache.snapshot"))?;
    let snapshot = Snapshot::load(&snapshot_path)?;

    let host = Host::new(config, Arc::new(snapshot));

    info!(
        num_plugins = host.num_plugins(),
        channel = %opts.channel,
        "{} v{} running",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    if !opts.message.is_empty() {
        return process(&host, opts.channel, &opts.message.join(" ")).await;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.into_diagnostic()? {
        if let Err(err) = process(&host, opts.channel, &line).await {
            warn!(?err, "command failed");
            eprintln!("{err:?}");
        }
    }

    Ok(())
}
