//! campaignops CLI
//!
//! Operator entry point for allocation writes, budget-vs-result
//! reconciliation, KPI achievement and campaign rollups.

use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

use campaignops_core::CampaignAnalytics;
use campaignops_core::allocation::ProposedAllocation;
use campaignops_core::campaign::PeriodFilter;
use campaignops_db::{AllocationRepository, SeaCampaignStore, connect, create_schema};
use campaignops_shared::types::{BudgetLineId, CampaignId, TeamId};
use campaignops_shared::{AppConfig, AppError, LoggingConfig};

#[derive(Parser)]
#[command(name = "campaignops", about = "Campaign budget allocation and reconciliation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create tables and indexes if they do not exist
    InitSchema,

    /// Campaign-level totals
    Rollup {
        /// Campaign ID
        campaign_id: CampaignId,
    },

    /// Planned budget lines vs. actual results
    Reconcile {
        /// Campaign ID
        campaign_id: CampaignId,

        /// Restrict to one year
        #[arg(long)]
        year: Option<i32>,

        /// Restrict to one month (1-12)
        #[arg(long)]
        month: Option<u32>,

        /// Restrict to one platform
        #[arg(long)]
        platform: Option<String>,
    },

    /// KPI achievement for a campaign
    Kpis {
        /// Campaign ID
        campaign_id: CampaignId,
    },

    /// Allocate a budget line to teams
    Allocate {
        /// Budget line ID
        budget_id: BudgetLineId,

        /// Allocations as TEAM_ID=AMOUNT
        #[arg(required = true, value_parser = parse_allocation)]
        allocations: Vec<ProposedAllocation>,
    },

    /// Change a budget line's planned amount
    SetAmount {
        /// Budget line ID
        budget_id: BudgetLineId,

        /// New planned amount
        amount: Decimal,
    },

    /// Remove a team's allocation from a budget line
    Unallocate {
        /// Budget line ID
        budget_id: BudgetLineId,

        /// Team ID
        team_id: TeamId,
    },
}

fn parse_allocation(raw: &str) -> Result<ProposedAllocation, String> {
    let (team, amount) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected TEAM_ID=AMOUNT, got `{raw}`"))?;
    let team_id = TeamId::from_str(team.trim()).map_err(|e| format!("invalid team ID: {e}"))?;
    let amount = Decimal::from_str(amount.trim()).map_err(|e| format!("invalid amount: {e}"))?;
    Ok(ProposedAllocation::new(team_id, amount))
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.filter.clone().into());

    let fmt = if logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry().with(filter).with(fmt).init();
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(command: Commands, config: &AppConfig) -> anyhow::Result<()> {
    let db = connect(&config.database)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("Connected to database");

    let analytics = CampaignAnalytics::new(Arc::new(SeaCampaignStore::new(db.clone())));
    let allocation_repo = AllocationRepository::new(db.clone());

    match command {
        Commands::InitSchema => {
            create_schema(&db)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        Commands::Rollup { campaign_id } => {
            let rollup = analytics.rollup(campaign_id).await.map_err(AppError::from)?;
            print_json(&rollup)?;
        }
        Commands::Reconcile {
            campaign_id,
            year,
            month,
            platform,
        } => {
            let filter = PeriodFilter {
                year,
                month,
                platform,
            };
            let report = analytics
                .reconcile_budget_vs_result(campaign_id, Some(filter))
                .await
                .map_err(AppError::from)?;
            print_json(&report)?;
        }
        Commands::Kpis { campaign_id } => {
            let kpis = analytics
                .reconcile_kpis(campaign_id)
                .await
                .map_err(AppError::from)?;
            print_json(&kpis)?;
        }
        Commands::Allocate {
            budget_id,
            allocations,
        } => {
            let summary = allocation_repo
                .apply_allocations(budget_id, &allocations)
                .await
                .map_err(AppError::from)?;
            print_json(&summary)?;
        }
        Commands::SetAmount { budget_id, amount } => {
            let summary = allocation_repo
                .update_budget_amount(budget_id, amount)
                .await
                .map_err(AppError::from)?;
            print_json(&summary)?;
        }
        Commands::Unallocate { budget_id, team_id } => {
            let removed = allocation_repo
                .remove_allocation(budget_id, team_id)
                .await
                .map_err(AppError::from)?;
            print_json(&serde_json::json!({ "removed": removed }))?;
        }
    }

    Ok(())
}

fn exit_status(err: &anyhow::Error) -> u8 {
    let code = err.downcast_ref::<AppError>().map_or(1, AppError::exit_code);
    u8::try_from(code).unwrap_or(1)
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            let err = anyhow::Error::from(AppError::from(e));
            eprintln!("error: {err}");
            return ExitCode::from(exit_status(&err));
        }
    };

    init_tracing(&config.logging);

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err
                .downcast_ref::<AppError>()
                .map_or("INTERNAL_ERROR", AppError::error_code);
            error!(error_code = code, "{err}");
            eprintln!("error[{code}]: {err}");
            ExitCode::from(exit_status(&err))
        }
    }
}
