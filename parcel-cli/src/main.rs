//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr"
)]
fn main() {
    // `init` also forwards `log` records from the library crates.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    if let Err(err) = parcel_cli::run() {
        eprintln!("parcel: {err}");
        std::process::exit(1);
    }
}
