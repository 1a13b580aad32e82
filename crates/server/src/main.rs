use anyhow::Context;
use clap::Parser;
use curbmap::SpotIndex;
use curbmap_server::{handle_connection, Listener};
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Start with an empty index instead of the Cupertino demo spots
    #[arg(long)]
    no_seed: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "curbmap_server=info,curbmap=info,info".into()),
        )
        .init();

    let args = Args::parse();

    let mut spots = if args.no_seed {
        SpotIndex::new()
    } else {
        SpotIndex::with_default_spots()
    };
    info!("index seeded with {} spots", spots.len());

    let listener = Listener::bind(&args.host, args.port).context("server startup failed")?;
    info!("curbmap server listening on {}:{}", args.host, args.port);

    // One connection at a time, start to finish. The exclusive borrow of
    // the index is what keeps the dual-tree update atomic; concurrency
    // would need a mutex around the whole index.
    loop {
        handle_connection(&listener, &mut spots);
    }
}
