//! Manager dashboard aggregation tests.

mod common;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use test_context::test_context;

use crate::common::*;
use complaints_core::domains::categories::Category;
use complaints_core::domains::reporting::{build_dashboard, DashboardFilter, DashboardQuery};
use complaints_core::domains::staff::StaffUser;
use complaints_core::domains::tickets::actions::update_status;
use complaints_core::domains::tickets::forms::StatusUpdate;
use complaints_core::domains::tickets::TicketStatus;

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

async fn set_status(ctx: &TestHarness, staff: &StaffUser, number: &str, status: TicketStatus) {
    update_status(number, staff, StatusUpdate { status, comment: None }, &ctx.deps)
        .await
        .unwrap();
}

/// Three March tickets (two resolved, one in progress) and one April ticket
async fn seed(ctx: &TestHarness) -> Vec<String> {
    let officer = create_test_staff(&ctx.db_pool, "bofficer", "Bola Officer", "Billing Officer")
        .await
        .unwrap();
    let billing = create_test_category(&ctx.db_pool, "Billing", "Billing Officer")
        .await
        .unwrap();
    let outage = create_test_category(&ctx.db_pool, "Outage", "Feeder Engineer")
        .await
        .unwrap();

    let mut numbers = Vec::new();
    for (category, email) in [
        (billing.id, "a@example.com"),
        (billing.id, "b@example.com"),
        (outage.id, "c@example.com"),
        (outage.id, "d@example.com"),
    ] {
        numbers.push(file_complaint(&ctx.deps, category, email).await.ticket.ticket_number);
    }

    set_status(ctx, &officer, &numbers[0], TicketStatus::Resolved).await;
    set_status(ctx, &officer, &numbers[1], TicketStatus::Resolved).await;
    set_status(ctx, &officer, &numbers[2], TicketStatus::InProgress).await;

    // One day and two hours to resolve
    backdate_ticket(&ctx.db_pool, &numbers[0], at(2024, 3, 1, 10), Some(at(2024, 3, 2, 10)))
        .await
        .unwrap();
    backdate_ticket(&ctx.db_pool, &numbers[1], at(2024, 3, 5, 8), Some(at(2024, 3, 5, 10)))
        .await
        .unwrap();
    backdate_ticket(&ctx.db_pool, &numbers[2], at(2024, 3, 31, 23), None)
        .await
        .unwrap();
    backdate_ticket(&ctx.db_pool, &numbers[3], at(2024, 4, 10, 9), None)
        .await
        .unwrap();

    numbers
}

#[test_context(TestHarness)]
#[tokio::test]
async fn empty_database_gives_empty_report(ctx: &TestHarness) {
    let report = build_dashboard(DashboardFilter::default(), Utc::now(), &ctx.db_pool)
        .await
        .unwrap();

    assert_eq!(report.total_tickets, 0);
    assert!(report.status_counts.is_empty());
    assert!(report.category_counts.is_empty());
    assert!(report.avg_resolution_seconds.is_none());
    assert!(report.avg_resolution.is_none());
    assert!(report.open_tickets.is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn date_window_is_inclusive_on_both_ends(ctx: &TestHarness) {
    seed(ctx).await;

    let filter = DashboardFilter {
        status: None,
        start_date: date(2024, 3, 1),
        end_date: date(2024, 3, 31),
    };
    let report = build_dashboard(filter, at(2024, 4, 1, 0), &ctx.db_pool)
        .await
        .unwrap();

    assert_eq!(report.total_tickets, 3);
    let counts: Vec<(TicketStatus, i64)> = report
        .status_counts
        .iter()
        .map(|c| (c.status, c.count))
        .collect();
    assert!(counts.contains(&(TicketStatus::Resolved, 2)));
    assert!(counts.contains(&(TicketStatus::InProgress, 1)));

    // (86400 + 7200) / 2
    assert_eq!(report.avg_resolution_seconds, Some(46_800.0));
    assert_eq!(report.avg_resolution.as_deref(), Some("13:00:00"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn resolved_window_ignores_tickets_resolved_outside_it(ctx: &TestHarness) {
    let numbers = seed(ctx).await;
    let closer = create_test_staff(&ctx.db_pool, "closer", "Dayo Closer", "Billing Supervisor")
        .await
        .unwrap();

    // Resolved in April after ten days; must not move the March average
    set_status(ctx, &closer, &numbers[3], TicketStatus::Resolved).await;
    backdate_ticket(&ctx.db_pool, &numbers[3], at(2024, 4, 10, 9), Some(at(2024, 4, 20, 9)))
        .await
        .unwrap();

    let filter = DashboardQuery {
        status: Some("RESOLVED".to_string()),
        start_date: Some("2024-03-01".to_string()),
        end_date: Some("2024-03-31".to_string()),
    }
    .validate()
    .unwrap();
    let report = build_dashboard(filter, at(2024, 5, 1, 0), &ctx.db_pool)
        .await
        .unwrap();

    assert_eq!(report.total_tickets, 2);
    assert_eq!(report.status_counts.len(), 1);
    assert_eq!(report.status_counts[0].status, TicketStatus::Resolved);
    assert_eq!(report.status_counts[0].count, 2);
    assert_eq!(report.avg_resolution_seconds, Some(46_800.0));
    assert!(report.open_tickets.is_empty());

    // Without the window the April resolution counts
    let unbounded = DashboardFilter {
        status: Some("RESOLVED".to_string()),
        ..Default::default()
    };
    let report = build_dashboard(unbounded, at(2024, 5, 1, 0), &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(report.total_tickets, 3);
    // (86400 + 7200 + 864000) / 3
    assert_eq!(report.avg_resolution_seconds, Some(319_200.0));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn status_filter_narrows_every_aggregate(ctx: &TestHarness) {
    seed(ctx).await;

    let filter = DashboardFilter {
        status: Some("NEW".to_string()),
        ..Default::default()
    };
    let report = build_dashboard(filter, at(2024, 5, 1, 0), &ctx.db_pool)
        .await
        .unwrap();

    assert_eq!(report.total_tickets, 1);
    assert_eq!(report.status_counts.len(), 1);
    assert_eq!(report.status_counts[0].status, TicketStatus::New);
    assert_eq!(report.category_counts.len(), 1);
    assert_eq!(report.category_counts[0].category_name.as_deref(), Some("Outage"));
    assert!(report.avg_resolution_seconds.is_none());
    assert_eq!(report.open_tickets.len(), 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unknown_status_matches_nothing(ctx: &TestHarness) {
    seed(ctx).await;

    let filter = DashboardFilter {
        status: Some("BOGUS".to_string()),
        ..Default::default()
    };
    let report = build_dashboard(filter, Utc::now(), &ctx.db_pool)
        .await
        .unwrap();

    assert_eq!(report.total_tickets, 0);
    assert!(report.status_counts.is_empty());
    assert!(report.open_tickets.is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn open_tickets_are_oldest_first_with_age(ctx: &TestHarness) {
    let numbers = seed(ctx).await;

    let now = at(2024, 4, 11, 9);
    let report = build_dashboard(DashboardFilter::default(), now, &ctx.db_pool)
        .await
        .unwrap();

    let listed: Vec<&str> = report
        .open_tickets
        .iter()
        .map(|t| t.ticket.ticket_id.as_str())
        .collect();
    assert_eq!(listed, vec![numbers[2].as_str(), numbers[3].as_str()]);

    let newest = &report.open_tickets[1];
    assert_eq!(newest.age_seconds, 86_400);
    assert_eq!(newest.age, "1 day, 0:00:00");
    assert_eq!(newest.ticket.customer_name, "Ada Obi");
    assert_eq!(newest.ticket.category_name.as_deref(), Some("Outage"));
    // Outage has no Feeder Engineer on staff
    assert_eq!(newest.ticket.assigned_to, None);
    assert_eq!(
        report.open_tickets[0].ticket.assigned_to,
        None,
        "in-progress ticket was created unassigned too"
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn tickets_without_category_are_grouped_together(ctx: &TestHarness) {
    seed(ctx).await;
    let billing = Category::find_all(&ctx.db_pool)
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.name == "Billing")
        .unwrap();
    Category::delete(billing.id, &ctx.db_pool).await.unwrap();

    let report = build_dashboard(DashboardFilter::default(), Utc::now(), &ctx.db_pool)
        .await
        .unwrap();

    let groups: Vec<(Option<&str>, i64)> = report
        .category_counts
        .iter()
        .map(|c| (c.category_name.as_deref(), c.count))
        .collect();
    assert_eq!(groups, vec![(Some("Outage"), 2), (None, 2)]);
}
