//! `bakeledger`: reports the bakery dashboards as JSON.
//!
//! Storage comes from configuration: a JSON file store when `data_dir` is set,
//! otherwise an in-memory store that lives only for this process. The `add-*`
//! commands write to the ledgers, so set `data_dir` to see them in later reports.

use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;

use bakeledger_core::{PaymentMethod, PeriodFilter, RollingPeriod};
use bakeledger_infra::{
    AppConfig, InMemoryStore, JsonFileStore, KeyValueStore, LogFormat, Services, SystemClock,
};
use bakeledger_inventory::{ItemCategory, ItemId, NewInventoryItem, NewPurchase, NewUsage, Unit};
use bakeledger_observability::LogOutput;
use bakeledger_products::DEFAULT_TOP_LIMIT;

type AppServices = Services<Arc<dyn KeyValueStore>, Arc<SystemClock>>;

#[derive(Parser)]
#[command(name = "bakeledger")]
#[command(about = "Bakery inventory, finance and catalog dashboards")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the demo product catalog if none is stored
    SeedDemo,

    /// Define a new inventory item
    AddItem {
        #[arg(long)]
        name: String,
        /// Supplier company
        #[arg(long)]
        company: String,
        /// raw_materials, packaging, finished_goods, supplies, equipment or other
        #[arg(long)]
        category: ItemCategory,
        /// kg, g, l, ml, pcs, boxes or units
        #[arg(long, default_value = "units")]
        unit: Unit,
        /// Reorder threshold
        #[arg(long)]
        min_level: Option<Decimal>,
    },

    /// Record stock bought for an item
    AddPurchase {
        #[arg(long)]
        item: ItemId,
        #[arg(long)]
        quantity: Decimal,
        #[arg(long)]
        cost: Option<Decimal>,
        /// Purchase date (YYYY-MM-DD), today when omitted
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        supplier: Option<String>,
        /// cash, online, bank, cheque or unpaid
        #[arg(long, default_value = "unpaid")]
        paid_by: PaymentMethod,
    },

    /// Record stock consumed from an item
    AddUsage {
        #[arg(long)]
        item: ItemId,
        #[arg(long)]
        quantity: Decimal,
        /// Usage date (YYYY-MM-DD), today when omitted
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        purpose: Option<String>,
    },

    /// Stock overview and per-item balances
    Inventory {
        /// Show full detail (ledger entries, newest first) for one item
        #[arg(long)]
        item: Option<ItemId>,
    },

    /// Profit and loss figures
    Finance {
        /// Calendar year, or "all"
        #[arg(long, default_value = "all")]
        year: String,
        /// Calendar month 1-12, or "all"
        #[arg(long, default_value = "all")]
        month: String,
        /// Rolling window for the chart: all, weekly, monthly or yearly
        #[arg(long, default_value = "monthly")]
        period: RollingPeriod,
    },

    /// Bills, salaries and purchase settlement summaries
    Payables,

    /// Product catalog with top sellers
    Products {
        /// Number of top sellers to list
        #[arg(long, default_value_t = DEFAULT_TOP_LIMIT)]
        top: usize,
    },
}

fn open_store(config: &AppConfig) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    match &config.data_dir {
        Some(dir) => {
            let mut store = JsonFileStore::open(dir)
                .with_context(|| format!("opening data directory {}", dir.display()))?;
            if let Some(limit) = config.storage_quota_bytes {
                store = store.with_quota(limit);
            }
            tracing::info!(dir = %dir.display(), "using json file store");
            Ok(Arc::new(store))
        }
        None => {
            let store = match config.storage_quota_bytes {
                Some(limit) => InMemoryStore::with_quota(limit),
                None => InMemoryStore::new(),
            };
            tracing::info!("no data_dir configured; using in-memory store");
            Ok(Arc::new(store))
        }
    }
}

fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(command: Commands, services: &AppServices) -> anyhow::Result<()> {
    match command {
        Commands::SeedDemo => {
            let seeded = services.products.seed_demo()?;
            print(&json!({ "seeded": seeded }))
        }
        Commands::AddItem {
            name,
            company,
            category,
            unit,
            min_level,
        } => {
            let mut new = NewInventoryItem::new(name, company, category).with_unit(unit);
            if let Some(level) = min_level {
                new = new.with_min_level(level);
            }
            print(&services.inventory.add_item(new)?)
        }
        Commands::AddPurchase {
            item,
            quantity,
            cost,
            date,
            supplier,
            paid_by,
        } => {
            let mut new = NewPurchase::new(item, quantity).paid_by(paid_by);
            if let Some(cost) = cost {
                new = new.costing(cost);
            }
            if let Some(date) = date {
                new = new.on(date);
            }
            if let Some(supplier) = supplier {
                new = new.from_supplier(supplier);
            }
            print(&services.inventory.add_purchase(new)?)
        }
        Commands::AddUsage {
            item,
            quantity,
            date,
            purpose,
        } => {
            let mut new = NewUsage::new(item, quantity);
            if let Some(date) = date {
                new = new.on(date);
            }
            if let Some(purpose) = purpose {
                new = new.for_purpose(purpose);
            }
            print(&services.inventory.add_usage(new)?)
        }
        Commands::Inventory { item: Some(id) } => print(&services.inventory.item_detail(id)?),
        Commands::Inventory { item: None } => print(&json!({
            "overview": services.inventory.overview()?,
            "items": services.inventory.summaries()?,
            "reorderAlerts": services.inventory.reorder_alerts()?,
        })),
        Commands::Finance { year, month, period } => {
            let filter = PeriodFilter::parse(&year, &month)?;
            print(&json!({
                "metrics": services.finance.metrics(&filter)?,
                "expenseBreakdown": services.finance.expense_breakdown(&filter)?,
                "rolling": services.finance.rolling_metrics(period)?,
                "chart": services.finance.chart(period)?,
            }))
        }
        Commands::Payables => print(&json!({
            "bills": services.payables.bills_summary()?,
            "salaries": services.payables.salaries_summary()?,
            "purchases": services.payables.purchases_summary()?,
            "latestBills": services.payables.latest_bills()?,
            "latestSalaries": services.payables.latest_salaries()?,
        })),
        Commands::Products { top } => print(&json!({
            "categories": services.products.categories()?,
            "topSelling": services.products.top_selling(top)?,
            "products": services.products.products()?,
        })),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load().context("loading configuration")?;

    let output = match config.log_format {
        LogFormat::Json => LogOutput::Json,
        LogFormat::Pretty => LogOutput::Pretty,
    };
    bakeledger_observability::init(output, &config.log_filter);

    let store = open_store(&config)?;
    let services: AppServices =
        Services::new(store, Arc::new(SystemClock), config.business_name.clone());

    if config.seed_demo && !matches!(cli.command, Commands::SeedDemo) {
        services.products.seed_demo()?;
    }

    run(cli.command, &services)
}
