use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, miette};
use pixcode::application::checkout::CheckoutService;
use pixcode::domain::amount::Amount;
use pixcode::domain::charge::ChargeRequest;
use pixcode::domain::merchant::MerchantConfig;
use pixcode::domain::payload::{Payload, PayloadBuilder};
use pixcode::infrastructure::in_memory::InMemoryChargeSink;
use pixcode::interfaces::csv::charge_reader::ChargeReader;
use pixcode::interfaces::csv::charge_writer::ChargeWriter;
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Merchant account key registered with the payment network
    #[arg(long, env = "PIX_KEY")]
    key: Option<String>,

    /// Merchant display name (normalized and cut to 25 characters)
    #[arg(long, env = "PIX_MERCHANT_NAME")]
    name: Option<String>,

    /// Merchant city (normalized and cut to 15 characters)
    #[arg(long, env = "PIX_MERCHANT_CITY")]
    city: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the payment code for a single amount
    Emit {
        /// Amount with at most two decimal places
        #[arg(long, allow_negative_numbers = true)]
        amount: Decimal,

        /// Shown to the payer and logged; not part of the payment code
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Issue one charge per row of an `amount,description` CSV file
    Batch {
        /// Input charges CSV file
        input: PathBuf,
    },
    /// Validate a payment code and print its fields as JSON
    Verify { payload: String },
}

impl Cli {
    fn merchant(&self) -> Result<MerchantConfig> {
        let (Some(key), Some(name), Some(city)) = (&self.key, &self.name, &self.city) else {
            return Err(miette!(
                "merchant key, name and city are required (--key/--name/--city or PIX_KEY, PIX_MERCHANT_NAME, PIX_MERCHANT_CITY)"
            ));
        };
        MerchantConfig::new(key, name, city).into_diagnostic()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Command::Emit {
            amount,
            description,
        } => {
            let service = CheckoutService::new(
                PayloadBuilder::new(cli.merchant()?),
                Box::new(InMemoryChargeSink::new()),
            );
            let amount = Amount::new(*amount).into_diagnostic()?;
            let charge = service
                .issue(ChargeRequest::new(amount, description.clone()))
                .await
                .into_diagnostic()?;
            println!("{}", charge.payload);
        }
        Command::Batch { input } => {
            let sink = InMemoryChargeSink::new();
            let service = CheckoutService::new(
                PayloadBuilder::new(cli.merchant()?),
                Box::new(sink.clone()),
            );

            let file = File::open(input).into_diagnostic()?;
            let reader = ChargeReader::new(file);
            for request in reader.charges() {
                match request {
                    Ok(request) => {
                        if let Err(e) = service.issue(request).await {
                            tracing::warn!(error = %e, "charge rejected");
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "charge rejected");
                    }
                }
            }

            let charges = sink.charges().await;
            let stdout = io::stdout();
            let mut writer = ChargeWriter::new(stdout.lock());
            writer.write_charges(&charges).into_diagnostic()?;
        }
        Command::Verify { payload } => {
            let payload = Payload::parse(payload).into_diagnostic()?;
            let json = serde_json::to_string_pretty(payload.fields()).into_diagnostic()?;
            println!("{json}");
        }
    }

    Ok(())
}
