// src/main.rs
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use fxpulse::application::usecase::{
    AnalysisUseCase, JournalUseCase, PeriodFilter, StatusFilter, SubscriptionUseCase,
};
use fxpulse::config::Config;
use fxpulse::domain::errors::AppResult;
use fxpulse::domain::models::{ActualResult, NewsType, PremiumPlan, TradeOutcome, TradeRecord};
use fxpulse::domain::repository::{EntitlementRepository, JournalRepository};
use fxpulse::infrastructure::device;
use fxpulse::infrastructure::storage::{
    FileEntitlementRepository, FileJournalRepository, FileKeyValueStore,
};

#[derive(Parser)]
#[command(name = "fxpulse", version, about = "Forex news trading-impact calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a scheduled news release
    Analyze {
        /// News type, e.g. "nfp" or "Consumer Price Index (CPI)"
        #[arg(long)]
        news_type: String,

        /// Affected currency
        #[arg(long, default_value = "USD")]
        currency: String,

        /// Previous value
        #[arg(long)]
        previous: String,

        /// Forecast value
        #[arg(long)]
        forecast: String,

        /// Also log the analysis as a pending journal trade (premium)
        #[arg(long)]
        log: bool,
    },

    /// Trading journal
    #[command(subcommand)]
    Journal(JournalCommand),

    /// Activate a premium plan
    Subscribe {
        /// weekly, monthly, yearly or lifetime
        plan: PremiumPlan,
    },

    /// Show entitlement status and the plan catalog
    Status,

    /// Print this installation's device identifier
    DeviceId,
}

#[derive(Subcommand)]
enum JournalCommand {
    /// List journal entries, newest first
    List {
        /// all, pending, completed, wins or losses
        #[arg(long, default_value = "all")]
        filter: StatusFilter,

        /// week, month, year or all
        #[arg(long, default_value = "all")]
        period: PeriodFilter,
    },

    /// Show aggregate performance statistics
    Stats,

    /// Add a completed manual trade (premium)
    Add {
        #[arg(long)]
        profit: Decimal,

        #[arg(long)]
        pips: Decimal,

        /// win or loss
        #[arg(long)]
        outcome: TradeOutcome,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Record the actual result of a pending trade (premium)
    Result {
        /// Trade record id
        id: String,

        #[arg(long)]
        profit: Decimal,

        #[arg(long)]
        pips: Decimal,

        /// win or loss
        #[arg(long)]
        outcome: TradeOutcome,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Export the journal as CSV (premium)
    Export {
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Delete every journal entry (premium)
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    config.init_logging()?;

    log::info!("Starting fxpulse v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Data directory: {}", config.storage.data_dir.display());

    // Wire storage-backed repositories
    let store = FileKeyValueStore::new(&config.storage.data_dir);
    let journal_repo: Arc<dyn JournalRepository> =
        Arc::new(FileJournalRepository::new(store.clone()));
    let entitlement_repo: Arc<dyn EntitlementRepository> =
        Arc::new(FileEntitlementRepository::new(store.clone()));

    let analysis = AnalysisUseCase::new(journal_repo.clone());
    let journal = JournalUseCase::new(journal_repo);
    let subscription = SubscriptionUseCase::new(entitlement_repo);

    match cli.command {
        Command::Analyze {
            news_type,
            currency,
            previous,
            forecast,
            log,
        } => {
            run_analyze(
                &analysis,
                &subscription,
                &news_type,
                &currency,
                &previous,
                &forecast,
                log,
            )
            .await
        }
        Command::Journal(command) => run_journal(&journal, &subscription, command).await,
        Command::Subscribe { plan } => {
            let activated = subscription.subscribe(plan).await?;
            println!(
                "Subscription Successful! Welcome to {}! All news types are now unlocked.",
                activated.plan_name()
            );
            Ok(())
        }
        Command::Status => {
            run_status(&subscription).await;
            Ok(())
        }
        Command::DeviceId => {
            let id = device::get_or_create_device_id(&store).await?;
            println!("{}", id);
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_analyze(
    analysis: &AnalysisUseCase,
    subscription: &SubscriptionUseCase,
    news_type: &str,
    currency: &str,
    previous: &str,
    forecast: &str,
    log_trade: bool,
) -> AppResult<()> {
    // The entitlement gate lives here, outside the engine: the free tier only
    // covers NFP, and the journal is premium-only.
    let news: NewsType = news_type.parse()?;
    let is_premium = subscription.is_premium().await;

    if news.requires_premium() && !is_premium {
        println!(
            "🔒 {} analysis requires a premium plan; the free tier covers Non-Farm Payrolls (NFP) only.",
            news.label()
        );
        print_plan_catalog();
        return Ok(());
    }

    if log_trade && !is_premium {
        println!("🔒 The trading journal requires a premium plan.");
        print_plan_catalog();
        return Ok(());
    }

    if log_trade {
        let (result, record) = analysis
            .analyze_and_log(Some(news_type), currency, previous, forecast)
            .await?;
        println!("{}", result.report());
        println!("\n📒 Logged as pending trade {}", record.id);
    } else {
        let (_, result) = analysis.analyze_input(Some(news_type), currency, previous, forecast)?;
        println!("{}", result.report());
    }
    Ok(())
}

async fn run_journal(
    journal: &JournalUseCase,
    subscription: &SubscriptionUseCase,
    command: JournalCommand,
) -> AppResult<()> {
    // Viewing is free; every mutation (and export) is premium.
    let is_premium = subscription.is_premium().await;
    let gated = |name: &str| {
        println!("🔒 {} requires a premium plan.", name);
        print_plan_catalog();
    };

    match command {
        JournalCommand::List { filter, period } => {
            let records = journal.entries().await;
            let filtered = JournalUseCase::filter(&records, filter, period, Utc::now());
            if filtered.is_empty() {
                println!("Your trading journal is empty.");
                return Ok(());
            }
            for record in filtered.into_iter().rev() {
                print_record(record);
            }
            Ok(())
        }
        JournalCommand::Stats => {
            let metrics = journal.metrics().await;
            println!("Performance Overview");
            println!(
                "  Win Rate:     {:.1}% ({}/{} trades)",
                metrics.win_rate, metrics.winning_trades, metrics.completed_trades
            );
            println!("  Total Profit: ${:.2}", metrics.total_profit);
            println!(
                "  Pips:         {:.1} total, {:.1} avg per trade",
                metrics.total_pips, metrics.average_pips
            );
            println!(
                "  Best/Worst:   ${:.2} / ${:.2}",
                metrics.best_trade, metrics.worst_trade
            );
            println!("  Win Streak:   {}", metrics.current_streak);
            println!("  Accuracy:     {:.1}%", metrics.accuracy_rate);
            println!(
                "  Records:      {} total, {} pending",
                metrics.total_trades,
                metrics.total_trades - metrics.completed_trades
            );
            Ok(())
        }
        JournalCommand::Add {
            profit,
            pips,
            outcome,
            notes,
        } => {
            if !is_premium {
                gated("Adding manual trades");
                return Ok(());
            }
            let record = journal
                .add_manual_trade(ActualResult {
                    profit,
                    pips,
                    outcome,
                    notes,
                })
                .await?;
            println!("Trade Added: {} recorded successfully.", record.id);
            Ok(())
        }
        JournalCommand::Result {
            id,
            profit,
            pips,
            outcome,
            notes,
        } => {
            if !is_premium {
                gated("Recording trade results");
                return Ok(());
            }
            let record = journal
                .record_result(
                    &id,
                    ActualResult {
                        profit,
                        pips,
                        outcome,
                        notes,
                    },
                )
                .await?;
            println!("Result Saved: trade {} is now completed.", record.id);
            Ok(())
        }
        JournalCommand::Export { output } => {
            if !is_premium {
                gated("Journal export");
                return Ok(());
            }
            let csv = journal.export_csv().await?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, csv).await?;
                    println!("Exported journal to {}", path.display());
                }
                None => print!("{}", csv),
            }
            Ok(())
        }
        JournalCommand::Clear { yes } => {
            if !is_premium {
                gated("Clearing the journal");
                return Ok(());
            }
            if !yes {
                println!(
                    "This deletes every journal entry and cannot be undone. Re-run with --yes to confirm."
                );
                return Ok(());
            }
            journal.clear().await?;
            println!("Trading journal cleared.");
            Ok(())
        }
    }
}

async fn run_status(subscription: &SubscriptionUseCase) {
    let status = subscription.status().await;
    println!("Plan: {}", status.plan_name());
    println!(
        "Status: {}",
        if status.is_active {
            "Premium Active"
        } else {
            "No Plan"
        }
    );
    if let Some(at) = status.subscribed_at {
        println!("Subscribed: {}", at.to_rfc3339());
    }
    if !status.is_active {
        print_plan_catalog();
    }
}

fn print_plan_catalog() {
    println!("\nAvailable plans (fxpulse subscribe <plan>):");
    for plan in PremiumPlan::ALL {
        let savings = plan.savings().map(|s| format!("  ({})", s)).unwrap_or_default();
        println!(
            "  {:<9} {:<13} {:>8} {}{}",
            format!("{:?}", plan).to_lowercase(),
            plan.title(),
            plan.price(),
            plan.period(),
            savings
        );
    }
}

fn print_record(record: &TradeRecord) {
    let status = match record.actual_result() {
        Some(result) => format!(
            "{} | {} pips | ${}",
            result.outcome.as_str().to_uppercase(),
            result.pips,
            result.profit
        ),
        None => "PENDING".to_string(),
    };
    println!(
        "{}  {}  [{}]",
        record.date.format("%Y-%m-%d %H:%M"),
        record.news_type,
        status
    );
    println!(
        "    id: {} | {} {} | expected {} pips | confidence {}%",
        record.id,
        record.currency.code(),
        record.prediction,
        record.expected_pips,
        record.confidence
    );
    if let Some(notes) = record.actual_result().and_then(|r| r.notes.as_deref()) {
        println!("    notes: {}", notes);
    }
}
