use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use order_desk::orders::validate_draft;
use order_desk::pricing::to_f64;
use order_desk::utils::json_file::read_json_file;
use order_desk::{
    Config, OrderService, OrderStorage, PricingEngine, PrintContext, init_logger_with_file,
    render_text,
};
use serde::Serialize;
use shared::util::format_date;
use shared::{OrderDraft, OrderInput, OrderRecord, PriceBreakdown};

#[derive(Parser)]
#[command(name = "order-desk")]
#[command(about = "Optical shop order pricing and records")]
struct Cli {
    /// Directory holding orders.redb and logs (overrides WORK_DIR)
    #[arg(long, global = true)]
    work_dir: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Price a draft without saving it
    Quote {
        /// OrderDraft JSON file
        draft: PathBuf,
    },
    /// Validate, price and save a new order
    Save {
        /// OrderInput JSON file
        order: PathBuf,
    },
    /// Replace the inputs of a saved order
    Update {
        id: String,
        /// OrderInput JSON file
        order: PathBuf,
    },
    /// Show a saved order
    Show { id: String },
    /// List saved orders, newest first
    List,
    /// Delete a saved order
    Delete { id: String },
    /// Print an order summary
    Print {
        id: String,
        /// Line width in characters
        #[arg(long, default_value_t = 48)]
        width: usize,
    },
    /// Re-price a saved order with the current rates
    Recompute { id: String },
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = match &cli.work_dir {
        Some(dir) => Config::with_overrides(dir.clone())?,
        None => Config::from_env()?,
    };
    init_logger_with_file(
        &config.log_level,
        config.log_json,
        Some(config.log_dir().as_path()),
    )?;

    tracing::debug!(
        work_dir = %config.work_dir,
        environment = %config.environment,
        sales_tax_rate = %config.rates.sales_tax_rate,
        "Order desk starting"
    );

    let engine = PricingEngine::new(config.rates);

    // Quotes never touch the database
    if let Command::Quote { draft } = &cli.command {
        let draft: OrderDraft = read_json_file(draft)?;
        validate_draft(&draft)?;
        let breakdown = engine.price(&draft);
        return emit(cli.json, &breakdown, || breakdown_text(&breakdown));
    }

    std::fs::create_dir_all(&config.work_dir)
        .with_context(|| format!("Failed to create work dir {}", config.work_dir))?;
    let storage = OrderStorage::open(config.db_path())
        .with_context(|| format!("Failed to open {}", config.db_path().display()))?;
    let service = OrderService::new(storage, engine);

    match cli.command {
        Command::Quote { .. } => Ok(()),
        Command::Save { order } => {
            let input: OrderInput = read_json_file(&order)?;
            let record = service.create(&input)?;
            emit(cli.json, &record, || record_text(&record))
        }
        Command::Update { id, order } => {
            let input: OrderInput = read_json_file(&order)?;
            let record = service.update(&id, &input)?;
            emit(cli.json, &record, || record_text(&record))
        }
        Command::Show { id } => {
            let record = service.get(&id)?;
            emit(cli.json, &record, || record_text(&record))
        }
        Command::List => {
            let records = service.list()?;
            emit(cli.json, &records, || {
                records.iter().map(list_line).collect::<Vec<_>>().join("\n")
            })
        }
        Command::Delete { id } => {
            service.delete(&id)?;
            if !cli.json {
                println!("Deleted {id}");
            }
            Ok(())
        }
        Command::Print { id, width } => {
            let record = service.get(&id)?;
            let ctx = PrintContext::from_record(&record, to_f64(engine.rates().iwellness_fee))?;
            emit(cli.json, &ctx, || render_text(&ctx, width))
        }
        Command::Recompute { id } => {
            let record = service.recompute(&id)?;
            emit(cli.json, &record, || record_text(&record))
        }
    }
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}

fn breakdown_text(p: &PriceBreakdown) -> String {
    p.amounts()
        .into_iter()
        .map(|(name, value)| format!("{name:<32}{value:>12.2}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn record_text(r: &OrderRecord) -> String {
    format!(
        "Order #{} ({})\nPatient: {}\nCreated: {}\n\n{}",
        r.order_number,
        r.id,
        r.patient_name,
        format_date(r.created_at),
        breakdown_text(&r.pricing)
    )
}

fn list_line(r: &OrderRecord) -> String {
    format!(
        "#{:<6} {}  {:<24} {:>10.2} {:>10.2}  {}",
        r.order_number,
        format_date(r.created_at),
        r.patient_name,
        r.pricing.balance_due_regular,
        r.pricing.balance_due_insurance,
        r.id
    )
}
