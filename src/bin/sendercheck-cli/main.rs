mod args;
mod output;

use std::sync::Arc;

use anyhow::{Context, Result};
use sendercheck_lib::{
    CheckSuite, ConnectionMetadata, SystemResolver, Verdict, spawn_rdns_lookup,
};
use tracing_subscriber::EnvFilter;

use args::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let resolver = Arc::new(
        SystemResolver::with_options(&cli.resolver_options()).context("build DNS resolver")?,
    );
    let rdns = spawn_rdns_lookup(Arc::clone(&resolver), cli.ip);
    let conn = ConnectionMetadata::new(cli.ip, cli.helo.as_str(), rdns);

    let report = CheckSuite::new(cli.check_options()).run(&*resolver, &conn, &cli.mail_from);
    output::write_report(&report, &cli)?;

    // codes de sortie : 0 accepté/quarantaine, 2 rejet, 1 fatal
    if matches!(report.verdict, Verdict::Reject { .. }) {
        std::process::exit(2);
    }
    Ok(())
}
