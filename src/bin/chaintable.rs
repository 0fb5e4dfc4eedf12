use chaintable::{shell, Error, HasherKind, KeyValueTable, Store, DEFAULT_BUCKETS};
use clap::Parser;
use tracing::Level;

/// Interactive shell over a chained hash table of integer keys and values.
///
/// Reads one command per line from stdin, e.g. `PUT 1 10`, `GET 1`, `REMOVE 1`. Run `HELP` for
/// the full list.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of buckets, fixed for the lifetime of the table
    #[arg(short, long, env = "CHAINTABLE_BUCKETS", default_value_t = DEFAULT_BUCKETS)]
    buckets: usize,

    /// Hash used to map keys to buckets: mix, identity or constant
    #[arg(long, default_value_t = HasherKind::Mix)]
    hasher: HasherKind,

    /// Maximum level of the log lines written to stderr
    #[arg(short, long, default_value_t = Level::WARN)]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Args::parse();

    shell::init_tracing(args.log_level);

    let table = KeyValueTable::with_hasher(args.buckets, args.hasher)?;

    shell::run(tokio::io::stdin(), tokio::io::stdout(), Store::from_table(table)).await
}
