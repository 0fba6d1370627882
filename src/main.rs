use anyhow::{Context, Result};
use salesdash::{
    response::{Envelope, Health, QueryRequest},
    AppConfig, DatasetStore, Query,
};
use std::{env, path::PathBuf, process::exit};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

const USAGE: &str = "Usage: salesdash [--config <FILE>] <QUERY> [REQUEST_JSON]

QUERY is one of: health, filters, dashboard, sales-by-year, volume-by-year,
monthly-trend, market-share, summary, sales-by-channel, sales-by-pack-type.
REQUEST_JSON looks like {\"filters\": {\"Brand\": [\"A\"], \"Year\": 2023}, \"metric\": \"sales\"}.";

struct Args {
    config: Option<PathBuf>,
    query: String,
    request: String,
}

fn parse_args() -> Option<Args> {
    let mut config = None;
    let mut positional = Vec::new();
    let mut it = env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" | "-c" => config = Some(PathBuf::from(it.next()?)),
            "--help" | "-h" => return None,
            _ => positional.push(arg),
        }
    }
    let mut positional = positional.into_iter();
    let query = positional.next()?;
    let request = positional.next().unwrap_or_default();
    Some(Args {
        config,
        query,
        request,
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,salesdash=info"));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(args) = parse_args() else {
        eprintln!("{USAGE}");
        exit(2);
    };

    if args.query.trim_matches('/') == "health" {
        return print_json(&Health::ok());
    }

    let query: Query = match args.query.parse() {
        Ok(q) => q,
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            exit(2);
        }
    };

    // ─── 2) config + one-time data load (fatal on failure) ──────────
    let cfg = AppConfig::load(args.config.as_deref())?;
    let store = DatasetStore::from_config(&cfg);
    let dataset = store
        .load()
        .with_context(|| format!("loading dataset from {}", store.path().display()))?;
    info!(rows = dataset.num_rows(), query = query.name(), "serving query");

    // ─── 3) per-query failures become an error envelope ─────────────
    let envelope = match QueryRequest::from_json(&args.request) {
        Ok(req) => match query.execute(&dataset, &req) {
            Ok(data) => Envelope::ok(data),
            Err(e) if e.is_client_error() => {
                warn!(error = %e, "rejected query");
                Envelope::err(e)
            }
            Err(e) => {
                error!(error = %e, "query failed");
                Envelope::err(e)
            }
        },
        Err(e) => {
            warn!(error = %e, "malformed request body");
            Envelope::err(format!("malformed request body: {e}"))
        }
    };

    print_json(&envelope)?;
    if !envelope.success {
        exit(1);
    }
    Ok(())
}
