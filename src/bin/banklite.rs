use std::io;

use anyhow::Result;
use banklite::bin_utils::{Service, config::Config};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::from_args(std::env::args())?;

    let service = Service {
        input: io::stdin().lock(),
        output: &mut io::stdout(),
        config,
    };
    service.run()
}
