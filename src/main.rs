//! Command-line booking form: three fields and a submit trigger.
//!
//! The endpoint comes from `--endpoint` or the `BOOKER_ENDPOINT` environment
//! variable:
//!
//!   booker --name "Alice" --unit-type 10x10 --start-date 2024-05-01

use clap::Parser;
use tracing_subscriber::EnvFilter;

use booker::{BookingForm, Submitter, SubmitterConfig};

/// Submit a booking request to a remote booking API
#[derive(Parser)]
#[command(name = "booker")]
struct Cli {
    /// Booking API base URL
    #[arg(long, env = "BOOKER_ENDPOINT")]
    endpoint: String,

    /// Customer name
    #[arg(long)]
    name: String,

    /// Unit type to book (e.g., "10x10")
    #[arg(long)]
    unit_type: String,

    /// Requested start date (YYYY-MM-DD)
    #[arg(long)]
    start_date: String,

    /// Facility to book at
    #[arg(long)]
    facility_id: Option<String>,

    /// End date (YYYY-MM-DD); the booking is open-ended when omitted
    #[arg(long)]
    end_date: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "booker=info".into()))
        .init();

    let cli = Cli::parse();

    let submitter = Submitter::new(SubmitterConfig::new(cli.endpoint.as_str()));
    let form = BookingForm {
        customer_name: cli.name,
        unit_type: cli.unit_type,
        start_date: cli.start_date,
        facility_id: cli.facility_id,
        end_date: cli.end_date,
    };

    let result = submitter.submit(&form).await?;
    println!("{}", result.message());

    if !result.is_success() {
        std::process::exit(1);
    }

    Ok(())
}
