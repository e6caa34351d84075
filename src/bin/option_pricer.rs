//! Option pricer command line
//! Runs the pricing server, submits the option form from a terminal,
//! or prices an option locally

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;

use option_pricer::client::HttpTransport;
use option_pricer::config::Settings;
use option_pricer::form::FormFields;
use option_pricer::handler::{FormSubmissionHandler, SyntheticSubmit, TextCell};
use option_pricer::pricing::{OptionParams, OptionType, black_scholes_price, monte_carlo_price};
use option_pricer::utils::logging::init_logging;

#[derive(Parser)]
#[command(name = "option-pricer", about = "Monte Carlo pricing of European options")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server with the pricing form
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Submit form fields to a running server and print the result
    Submit {
        /// Form field as name=value; repeat for each field
        #[arg(short, long = "field", value_parser = FormFields::parse_pair)]
        fields: Vec<(String, String)>,
        /// Server base URL
        #[arg(short, long)]
        url: Option<String>,
    },
    /// Price an option locally
    Price(PriceArgs),
}

#[derive(Args)]
struct PriceArgs {
    #[arg(long)]
    stock_price: f64,
    #[arg(long)]
    strike_price: f64,
    #[arg(long)]
    time_to_maturity: f64,
    #[arg(long)]
    risk_free_rate: f64,
    #[arg(long)]
    volatility: f64,
    #[arg(long, default_value = "call")]
    option_type: String,
    #[arg(short, long, default_value_t = 100_000)]
    simulations: u64,
    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
    /// Also print the Black-Scholes closed-form price
    #[arg(short, long)]
    analytic: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { host, port } => {
            let mut settings = Settings::new().context("Failed to load configuration")?;
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            info!("🚀 Starting option pricer on {}", settings.bind_address());
            option_pricer::server::run(settings).await
        }
        Command::Submit { fields, url } => submit(fields, url).await,
        Command::Price(args) => price(args),
    }
}

async fn submit(fields: Vec<(String, String)>, url: Option<String>) -> Result<()> {
    let settings = Settings::new().context("Failed to load configuration")?;
    let base_url = url.unwrap_or(settings.client.base_url);

    let transport = Arc::new(HttpTransport::new(&base_url)?);
    let display = Arc::new(TextCell::default());
    let form: FormFields = fields.into_iter().collect();
    let handler = FormSubmissionHandler::new(form, Arc::clone(&display), transport)
        .with_endpoint(settings.client.endpoint);

    info!("📤 Submitting form to {}{}", base_url, handler.endpoint());
    handler.on_submit(&SyntheticSubmit::new()).await?;

    println!("{}", display.text());
    Ok(())
}

fn price(args: PriceArgs) -> Result<()> {
    let option_type: OptionType = args.option_type.parse()?;
    let params = OptionParams {
        stock_price: args.stock_price,
        strike_price: args.strike_price,
        time_to_maturity: args.time_to_maturity,
        risk_free_rate: args.risk_free_rate,
        volatility: args.volatility,
        option_type,
    };
    if args.simulations == 0 {
        bail!("--simulations must be at least 1");
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let estimate = monte_carlo_price(&params, args.simulations, &mut rng)?;

    println!("📊 {} option, {} paths", option_type, args.simulations);
    println!("   Monte Carlo:   {:.6}", estimate);
    if args.analytic {
        let reference = black_scholes_price(&params)?;
        println!("   Black-Scholes: {:.6}", reference);
        println!("   Difference:    {:+.6}", estimate - reference);
    }
    Ok(())
}
