//! Registration form in the terminal.
//!
//! # Usage
//!
//! ```bash
//! register
//! register --variant household
//! register --endpoint http://localhost:6080/submit --variant appointment
//! REGISTRATION_VARIANT=registration register
//! register --list-variants
//! ```

use std::io;

use anyhow::bail;
use clap::Parser;
use registration_core::{FormSchema, FormState, RegistrationClient, DEFAULT_ENDPOINT, VARIANTS};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod prompt;
mod transport;

use prompt::Terminal;
use transport::UreqTransport;

#[derive(Parser)]
#[command(name = "register")]
#[command(version)]
#[command(about = "Fill in and submit the registration form", long_about = None)]
struct Cli {
    /// Submission endpoint URL
    #[arg(long, env = "REGISTRATION_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Form variant to display
    #[arg(long, env = "REGISTRATION_VARIANT", default_value = "contact")]
    variant: String,

    /// Print the available variants and exit
    #[arg(long)]
    list_variants: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    if cli.list_variants {
        for name in VARIANTS {
            println!("{name}");
        }
        return Ok(());
    }

    let Some(schema) = FormSchema::variant(&cli.variant) else {
        bail!(
            "unknown variant '{}' (expected one of: {})",
            cli.variant,
            VARIANTS.join(", ")
        );
    };
    tracing::info!(variant = schema.name(), endpoint = %cli.endpoint, "starting form");

    let client = RegistrationClient::new(&cli.endpoint);
    let mut form = FormState::new(schema);
    let mut terminal = Terminal::new(io::stdin().lock(), io::stdout().lock());
    terminal.run(&mut form, &client, &UreqTransport::new())?;
    Ok(())
}
