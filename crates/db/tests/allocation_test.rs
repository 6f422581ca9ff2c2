//! Integration tests for allocation writes and the `SeaORM` campaign store.
//!
//! These run against `PostgreSQL` when `DATABASE_URL` (or
//! `CAMPAIGNOPS__DATABASE__URL`) is set and are skipped otherwise.

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::items_after_statements)]

use std::env;
use std::sync::Arc;

use futures::future::join_all;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tokio::sync::Barrier;

use campaignops_core::CampaignAnalytics;
use campaignops_core::CampaignError;
use campaignops_core::allocation::ProposedAllocation;
use campaignops_core::campaign::{
    CreateBudgetLineInput, CreateCampaignInput, CreateCampaignKpiInput, CreateClientInput,
    CreateResultLineInput, UpdateCampaignInput, YearMonth,
};
use campaignops_core::reconciliation::LineStatus;
use campaignops_db::entities::{
    budget_teams, budgets, campaign_kpis, campaign_teams, campaigns, clients, results, teams,
};
use campaignops_db::{
    AllocationRepository, CampaignRepository, SeaCampaignStore, StoreError, create_schema,
};
use campaignops_shared::DatabaseConfig;
use campaignops_shared::types::{BudgetLineId, CampaignId, ClientId, TeamId};

fn database_url() -> Option<String> {
    env::var("DATABASE_URL")
        .or_else(|_| env::var("CAMPAIGNOPS__DATABASE__URL"))
        .ok()
}

async fn connect() -> Option<DatabaseConnection> {
    let Some(url) = database_url() else {
        eprintln!("Skipping test - DATABASE_URL not set");
        return None;
    };

    let config = DatabaseConfig {
        url,
        max_connections: 30,
        min_connections: 1,
    };
    let db = match campaignops_db::connect(&config).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Skipping test - database not available: {}", e);
            return None;
        }
    };

    create_schema(&db).await.expect("schema bootstrap failed");
    Some(db)
}

struct Fixture {
    client_id: ClientId,
    campaign_id: CampaignId,
    budget_id: BudgetLineId,
    teams: Vec<TeamId>,
}

async fn setup(db: &DatabaseConnection, amount: Decimal, team_count: usize) -> Fixture {
    let repo = CampaignRepository::new(db.clone());

    let client = repo
        .create_client(CreateClientInput {
            name: "Allocation Test Client".to_string(),
            manager_id: None,
            sales_channel: Some("direct".to_string()),
            sales_department: "Sales 1".to_string(),
            business_division: "Digital".to_string(),
        })
        .await
        .expect("create client");

    let campaign = repo
        .create_campaign(CreateCampaignInput {
            client_id: client.id,
            name: "Allocation Test Campaign".to_string(),
            total_budget: dec!(5000),
            start: YearMonth::new(2026, 1).unwrap(),
            end: Some(YearMonth::new(2026, 3).unwrap()),
        })
        .await
        .expect("create campaign");

    let budget = repo
        .create_budget_line(budget_input(campaign.id, 1, amount))
        .await
        .expect("create budget line");

    let mut team_ids = Vec::with_capacity(team_count);
    for i in 0..team_count {
        let team = repo
            .create_team(&format!("alloc-test-team-{}", i))
            .await
            .expect("create team");
        team_ids.push(team.id);
    }

    Fixture {
        client_id: client.id,
        campaign_id: campaign.id,
        budget_id: budget.id,
        teams: team_ids,
    }
}

fn budget_input(campaign_id: CampaignId, month: u32, amount: Decimal) -> CreateBudgetLineInput {
    CreateBudgetLineInput {
        campaign_id,
        period: YearMonth::new(2026, month).unwrap(),
        platform: "X".to_string(),
        operation_type: "managed".to_string(),
        budget_type: "media".to_string(),
        amount,
        target_kpi: None,
        target_value: None,
    }
}

async fn cleanup(db: &DatabaseConnection, fixture: &Fixture) {
    let line_ids: Vec<_> = budgets::Entity::find()
        .filter(budgets::Column::CampaignId.eq(fixture.campaign_id.into_inner()))
        .all(db)
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.id)
        .collect();

    budget_teams::Entity::delete_many()
        .filter(budget_teams::Column::BudgetId.is_in(line_ids))
        .exec(db)
        .await
        .unwrap();
    budgets::Entity::delete_many()
        .filter(budgets::Column::CampaignId.eq(fixture.campaign_id.into_inner()))
        .exec(db)
        .await
        .unwrap();
    results::Entity::delete_many()
        .filter(results::Column::CampaignId.eq(fixture.campaign_id.into_inner()))
        .exec(db)
        .await
        .unwrap();
    campaign_kpis::Entity::delete_many()
        .filter(campaign_kpis::Column::CampaignId.eq(fixture.campaign_id.into_inner()))
        .exec(db)
        .await
        .unwrap();
    campaign_teams::Entity::delete_many()
        .filter(campaign_teams::Column::CampaignId.eq(fixture.campaign_id.into_inner()))
        .exec(db)
        .await
        .unwrap();
    campaigns::Entity::delete_by_id(fixture.campaign_id.into_inner())
        .exec(db)
        .await
        .unwrap();
    clients::Entity::delete_by_id(fixture.client_id.into_inner())
        .exec(db)
        .await
        .unwrap();
    teams::Entity::delete_many()
        .filter(teams::Column::Id.is_in(fixture.teams.iter().map(|t| t.into_inner())))
        .exec(db)
        .await
        .unwrap();
}

async fn allocated_sum(db: &DatabaseConnection, budget_id: BudgetLineId) -> Decimal {
    budget_teams::Entity::find()
        .filter(budget_teams::Column::BudgetId.eq(budget_id.into_inner()))
        .all(db)
        .await
        .unwrap()
        .iter()
        .map(|row| row.allocation)
        .sum()
}

#[tokio::test]
async fn test_concurrent_allocations_never_exceed_amount() {
    let Some(db) = connect().await else { return };

    const WRITERS: usize = 20;
    let fixture = setup(&db, dec!(1000), WRITERS).await;
    let repo = AllocationRepository::new(db.clone());
    let barrier = Arc::new(Barrier::new(WRITERS));

    let handles = fixture.teams.iter().map(|team_id| {
        let repo = repo.clone();
        let barrier = Arc::clone(&barrier);
        let proposed = [ProposedAllocation::new(*team_id, dec!(100))];
        let budget_id = fixture.budget_id;
        tokio::spawn(async move {
            barrier.wait().await;
            repo.apply_allocations(budget_id, &proposed).await
        })
    });

    let mut accepted = 0;
    let mut rejected = 0;
    for result in join_all(handles).await {
        match result.expect("task panicked") {
            Ok(_) => accepted += 1,
            Err(StoreError::Domain(CampaignError::AllocationExceeded { .. })) => rejected += 1,
            Err(e) => panic!("unexpected error: {}", e),
        }
    }

    assert_eq!(accepted, 10);
    assert_eq!(rejected, 10);
    assert_eq!(allocated_sum(&db, fixture.budget_id).await, dec!(1000));

    cleanup(&db, &fixture).await;
}

#[tokio::test]
async fn test_apply_allocations_replaces_existing_share() {
    let Some(db) = connect().await else { return };

    let fixture = setup(&db, dec!(1000), 3).await;
    let repo = AllocationRepository::new(db.clone());
    let [t1, t2, t3] = [fixture.teams[0], fixture.teams[1], fixture.teams[2]];

    repo.apply_allocations(
        fixture.budget_id,
        &[
            ProposedAllocation::new(t1, dec!(600)),
            ProposedAllocation::new(t2, dec!(300)),
        ],
    )
    .await
    .unwrap();

    let err = repo
        .apply_allocations(fixture.budget_id, &[ProposedAllocation::new(t3, dec!(150))])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Domain(CampaignError::AllocationExceeded { total, amount })
            if total == dec!(1050) && amount == dec!(1000)
    ));

    // Lowering team 1 makes room for team 3.
    let summary = repo
        .apply_allocations(
            fixture.budget_id,
            &[
                ProposedAllocation::new(t1, dec!(550)),
                ProposedAllocation::new(t3, dec!(150)),
            ],
        )
        .await
        .unwrap();
    assert_eq!(summary.allocated_total, dec!(1000));
    assert_eq!(allocated_sum(&db, fixture.budget_id).await, dec!(1000));

    assert!(repo.remove_allocation(fixture.budget_id, t2).await.unwrap());
    assert!(!repo.remove_allocation(fixture.budget_id, t2).await.unwrap());
    assert_eq!(allocated_sum(&db, fixture.budget_id).await, dec!(700));

    cleanup(&db, &fixture).await;
}

#[tokio::test]
async fn test_budget_amount_cannot_drop_below_allocated() {
    let Some(db) = connect().await else { return };

    let fixture = setup(&db, dec!(1000), 1).await;
    let repo = AllocationRepository::new(db.clone());

    repo.apply_allocations(
        fixture.budget_id,
        &[ProposedAllocation::new(fixture.teams[0], dec!(800))],
    )
    .await
    .unwrap();

    let err = repo
        .update_budget_amount(fixture.budget_id, dec!(799.99))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Domain(CampaignError::AllocationExceeded { .. })
    ));

    let summary = repo
        .update_budget_amount(fixture.budget_id, dec!(800))
        .await
        .unwrap();
    assert_eq!(summary.unallocated, dec!(0));

    cleanup(&db, &fixture).await;
}

#[tokio::test]
async fn test_unknown_team_is_rejected() {
    let Some(db) = connect().await else { return };

    let fixture = setup(&db, dec!(1000), 0).await;
    let repo = AllocationRepository::new(db.clone());
    let stranger = TeamId::new();

    let err = repo
        .apply_allocations(fixture.budget_id, &[ProposedAllocation::new(stranger, dec!(1))])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Domain(CampaignError::NotFound { id, .. }) if id == stranger.into_inner()
    ));

    cleanup(&db, &fixture).await;
}

#[tokio::test]
async fn test_reconcile_through_sea_store() {
    let Some(db) = connect().await else { return };

    let fixture = setup(&db, dec!(1000), 0).await;
    let repo = CampaignRepository::new(db.clone());
    repo.create_budget_line(budget_input(fixture.campaign_id, 2, dec!(500)))
        .await
        .unwrap();
    repo.record_result(CreateResultLineInput {
        campaign_id: fixture.campaign_id,
        period: YearMonth::new(2026, 1).unwrap(),
        platform: "X".to_string(),
        operation_type: "managed".to_string(),
        budget_type: "media".to_string(),
        actual_spend: dec!(900),
        actual_result: dec!(31),
    })
    .await
    .unwrap();

    let analytics = CampaignAnalytics::new(Arc::new(SeaCampaignStore::new(db.clone())));
    let report = analytics
        .reconcile_budget_vs_result(fixture.campaign_id, None)
        .await
        .unwrap();

    assert_eq!(report.records.len(), 2);
    assert_eq!(report.records[0].key.period.month, 1);
    assert_eq!(report.records[0].spend_variance, dec!(-100));
    assert_eq!(report.records[0].status, LineStatus::Matched);
    assert_eq!(report.records[1].status, LineStatus::OrphanBudget);

    let rollup = analytics.rollup(fixture.campaign_id).await.unwrap();
    assert_eq!(rollup.planned_total, dec!(1500));
    assert_eq!(rollup.actual_total, dec!(900));

    cleanup(&db, &fixture).await;
}

#[tokio::test]
async fn test_kpis_and_lead_team_through_sea_store() {
    let Some(db) = connect().await else { return };

    let fixture = setup(&db, dec!(1000), 2).await;
    let repo = CampaignRepository::new(db.clone());
    let [lead, helper] = [fixture.teams[0], fixture.teams[1]];

    // Inserted out of priority order.
    let cpa = repo
        .create_kpi(CreateCampaignKpiInput {
            campaign_id: fixture.campaign_id,
            kpi_type: "cpa".to_string(),
            unit: Some("JPY".to_string()),
            target_value: dec!(100),
            priority: 2,
        })
        .await
        .unwrap();
    let leads = repo
        .create_kpi(CreateCampaignKpiInput {
            campaign_id: fixture.campaign_id,
            kpi_type: "leads".to_string(),
            unit: Some("count".to_string()),
            target_value: dec!(100),
            priority: 1,
        })
        .await
        .unwrap();
    let recorded = repo.record_kpi_actual(leads.id, Some(dec!(75))).await.unwrap();
    assert_eq!(recorded.actual_value, Some(dec!(75)));

    repo.add_campaign_team(fixture.campaign_id, lead, Some("planning".to_string()), true)
        .await
        .unwrap();
    AllocationRepository::new(db.clone())
        .apply_allocations(
            fixture.budget_id,
            &[
                ProposedAllocation::new(lead, dec!(600)),
                ProposedAllocation::new(helper, dec!(200)),
            ],
        )
        .await
        .unwrap();

    let analytics = CampaignAnalytics::new(Arc::new(SeaCampaignStore::new(db.clone())));

    let kpis = analytics.reconcile_kpis(fixture.campaign_id).await.unwrap();
    assert_eq!(kpis.len(), 2);
    assert_eq!(kpis[0].kpi_id, leads.id);
    assert_eq!(kpis[0].achievement, Some(dec!(0.75)));
    assert_eq!(kpis[1].kpi_id, cpa.id);
    assert_eq!(kpis[1].achievement, None);

    let rollup = analytics.rollup(fixture.campaign_id).await.unwrap();
    let lead_total = rollup
        .team_allocations
        .iter()
        .find(|t| t.team_id == lead)
        .expect("lead team missing from rollup");
    assert_eq!(lead_total.allocated, dec!(600));
    let participation = lead_total.participation.as_ref().expect("lead participation");
    assert!(participation.is_lead);
    assert_eq!(participation.role.as_deref(), Some("planning"));

    let helper_total = rollup
        .team_allocations
        .iter()
        .find(|t| t.team_id == helper)
        .expect("helper team missing from rollup");
    assert!(helper_total.participation.is_none());

    cleanup(&db, &fixture).await;
}

#[tokio::test]
async fn test_team_joins_campaign_once() {
    let Some(db) = connect().await else { return };

    let fixture = setup(&db, dec!(1000), 1).await;
    let repo = CampaignRepository::new(db.clone());
    let team = fixture.teams[0];

    repo.add_campaign_team(fixture.campaign_id, team, None, false)
        .await
        .unwrap();
    let err = repo
        .add_campaign_team(fixture.campaign_id, team, None, true)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));

    cleanup(&db, &fixture).await;
}

#[tokio::test]
async fn test_update_campaign_checks_period() {
    let Some(db) = connect().await else { return };

    let fixture = setup(&db, dec!(1000), 0).await;
    let repo = CampaignRepository::new(db.clone());

    let err = repo
        .update_campaign(
            fixture.campaign_id,
            UpdateCampaignInput {
                name: "Allocation Test Campaign".to_string(),
                total_budget: dec!(5000),
                start: YearMonth::new(2026, 4).unwrap(),
                end: Some(YearMonth::new(2026, 3).unwrap()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Domain(CampaignError::InvalidPeriod(_))
    ));

    let updated = repo
        .update_campaign(
            fixture.campaign_id,
            UpdateCampaignInput {
                name: "Extended Campaign".to_string(),
                total_budget: dec!(6500.50),
                start: YearMonth::new(2026, 1).unwrap(),
                end: Some(YearMonth::new(2026, 6).unwrap()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Extended Campaign");
    assert_eq!(updated.total_budget, dec!(6500.50));
    assert_eq!(updated.end, Some(YearMonth::new(2026, 6).unwrap()));

    let err = repo
        .update_campaign(
            CampaignId::new(),
            UpdateCampaignInput {
                name: "Missing".to_string(),
                total_budget: dec!(1),
                start: YearMonth::new(2026, 1).unwrap(),
                end: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Domain(CampaignError::NotFound { .. })
    ));

    cleanup(&db, &fixture).await;
}
