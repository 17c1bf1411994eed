//! Vehicle Quote CLI
//!
//! Prices vehicle protection plans from the rate table and writes quote documents

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use vehicle_quote::config::parse_delimiter;
use vehicle_quote::money::{format_brl, format_brl_opt, parse_brl_amount};
use vehicle_quote::pricing::{NoMatchPolicy, UnknownPricePolicy};
use vehicle_quote::rates::{BandRange, ColumnTarget};
use vehicle_quote::{PlanTier, PricingEngine, QuoteConfig, QuoteDocument, QuoteForm, RateTableCache};

#[derive(Parser)]
#[command(name = "vehicle_quote", version, about = "Vehicle protection plan quotes from a rate table")]
struct Cli {
    /// Rate table CSV (overrides QUOTE_RATE_TABLE)
    #[arg(long, global = true)]
    rate_table: Option<PathBuf>,

    /// CSV delimiter, e.g. ';' or 'tab' (overrides QUOTE_CSV_DELIMITER)
    #[arg(long, global = true)]
    delimiter: Option<String>,

    /// last-band | reject
    #[arg(long, global = true)]
    no_match_policy: Option<NoMatchPolicy>,

    /// zero | reject
    #[arg(long, global = true)]
    unknown_price_policy: Option<UnknownPricePolicy>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Price a vehicle and write the quote document
    Quote {
        #[arg(long)]
        name: String,
        #[arg(long)]
        plate: String,
        #[arg(long)]
        brand: String,
        #[arg(long)]
        model: String,
        #[arg(long)]
        year: String,
        /// Vehicle value, e.g. 75.000,50
        #[arg(long)]
        value: String,
        #[arg(long)]
        category: Option<String>,
        /// Directory for the quote file (overrides QUOTE_OUTPUT_DIR)
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Print the document to stdout instead of writing a file
        #[arg(long)]
        json: bool,
    },
    /// Price a single value and print the result as JSON
    Price { value: String },
    /// Price many values in parallel
    Batch {
        values: Vec<String>,
        /// File with one value per line
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Show how the rate table was read
    Inspect,
}

fn parse_value(text: &str) -> Result<f64> {
    match parse_brl_amount(text) {
        Some(v) => Ok(v),
        None => bail!("'{}' is not a valid amount", text),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = QuoteConfig::from_env().context("invalid environment configuration")?;
    if let Some(path) = cli.rate_table {
        config.rate_table_path = path;
    }
    if let Some(delim) = cli.delimiter.as_deref() {
        config.csv_delimiter = parse_delimiter(delim).map_err(anyhow::Error::msg)?;
    }
    if let Some(policy) = cli.no_match_policy {
        config.policy.no_match = policy;
    }
    if let Some(policy) = cli.unknown_price_policy {
        config.policy.unknown_price = policy;
    }

    let cache = RateTableCache::new(config.csv_delimiter);
    let table = cache
        .get(&config.rate_table_path)
        .with_context(|| format!("failed to load rate table {}", config.rate_table_path.display()))?;
    let engine = PricingEngine::new(table).with_policy(config.policy);

    match cli.command {
        Command::Quote {
            name,
            plate,
            brand,
            model,
            year,
            value,
            category,
            output_dir,
            json,
        } => {
            let form = QuoteForm {
                client_name: Some(name),
                plate: Some(plate),
                brand: Some(brand),
                model: Some(model),
                year: Some(year),
                vehicle_value: Some(value),
                category,
            };
            let request = form.validate()?;
            let pricing = engine.price_value(request.vehicle_value).with_context(|| {
                format!(
                    "cannot price vehicle value {}",
                    format_brl(request.vehicle_value)
                )
            })?;
            let doc = QuoteDocument::build(&request, pricing, Local::now());

            if json {
                println!("{}", serde_json::to_string_pretty(&doc)?);
                return Ok(());
            }

            println!("Quote for {} (plate {})", doc.client_name, doc.plate);
            println!("  Vehicle: {} {} {}  Value: {}", doc.brand, doc.model, doc.year, doc.vehicle_value_display);
            for line in &doc.prices {
                println!("  {:<12} {:>14}", line.label, line.display);
            }
            if doc.pricing.trace.is_approximate() {
                println!("  Note: priced by fallback ({:?})", doc.pricing.trace.path);
            }
            if let Some(warning) = doc.warning {
                println!(
                    "  Excess value: {}  Surcharge: {}%",
                    format_brl(doc.excess_value),
                    doc.surcharge_percent
                );
                println!("  {}", warning);
            }

            let dir = output_dir.unwrap_or(config.output_dir);
            fs::create_dir_all(&dir).with_context(|| format!("cannot create output directory {}", dir.display()))?;
            let path = dir.join(format!("{}.json", doc.file_stem()));
            fs::write(&path, serde_json::to_string_pretty(&doc)?)
                .with_context(|| format!("cannot write {}", path.display()))?;
            println!("\nQuote written to: {}", path.display());
        }
        Command::Price { value } => {
            let result = engine.price_value(parse_value(&value)?)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Batch { mut values, file } => {
            if let Some(path) = file {
                let contents =
                    fs::read_to_string(&path).with_context(|| format!("cannot read {}", path.display()))?;
                values.extend(contents.lines().map(str::trim).filter(|l| !l.is_empty()).map(String::from));
            }
            if values.is_empty() {
                bail!("no values given");
            }

            let parsed = values.iter().map(|v| parse_value(v)).collect::<Result<Vec<_>>>()?;
            let results = engine.price_batch(&parsed);

            println!(
                "{:>16} {:>12} {:>12} {:>12} {:>12} {:>12} {:>6} {:>9}",
                "Value", "Adesão", "Ouro", "Diamante", "Platinum", "Pesados", "Surch%", "Approval"
            );
            println!("{}", "-".repeat(100));
            for (value, result) in parsed.iter().zip(&results) {
                match result {
                    Ok(r) => println!(
                        "{:>16.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>6} {:>9}",
                        value,
                        r.price(PlanTier::Adhesion),
                        r.price(PlanTier::Gold),
                        r.price(PlanTier::Diamond),
                        r.price(PlanTier::Platinum),
                        r.price(PlanTier::Heavy),
                        r.surcharge_percent,
                        if r.requires_approval { "yes" } else { "no" },
                    ),
                    Err(e) => println!("{:>16.2} {:?}: {}", value, e.kind(), e),
                }
            }
        }
        Command::Inspect => {
            let table = engine.table();
            println!("Rate table: {}", config.rate_table_path.display());
            if let Some(layout) = table.layout() {
                println!("Header row: {} ({:?})", layout.header.row + 1, layout.header.rule);
                for target in ColumnTarget::ALL {
                    println!("  {:<10} {:?}", format!("{:?}", target), layout.columns.status(target));
                }
                if !layout.columns.unmapped_columns().is_empty() {
                    println!("  ignored columns: {:?}", layout.columns.unmapped_columns());
                }
            }

            println!("\n{} bands, covered maximum {}", table.len(), format_brl_opt(table.covered_max()));
            for band in table.bands() {
                let flag = match band.range {
                    BandRange::Valid { .. } => "",
                    BandRange::Inverted { .. } => "  [inverted]",
                    BandRange::Malformed => "  [malformed]",
                };
                let prices: Vec<String> = PlanTier::ALL
                    .iter()
                    .map(|&tier| format!("{}={}", tier.label(), format_brl_opt(band.base_price(tier))))
                    .collect();
                println!("  row {:>3}  {:<32}{}  {}", band.source_row + 1, band.range_label, flag, prices.join(" "));
            }
        }
    }

    Ok(())
}
