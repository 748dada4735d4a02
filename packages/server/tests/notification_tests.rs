//! Customer notification tests: which emails go out, what they say, and
//! what happens when delivery fails.

mod common;

use std::sync::Arc;

use test_context::test_context;

use crate::common::*;
use complaints_core::domains::notifications::DeliveryOutcome;
use complaints_core::domains::tickets::actions::{create_complaint, escalate, update_status};
use complaints_core::domains::tickets::forms::{Escalation, StatusUpdate};
use complaints_core::domains::tickets::TicketStatus;
use complaints_core::kernel::test_dependencies::{FailingMailer, SpyMailer};

fn resolve() -> StatusUpdate {
    StatusUpdate {
        status: TicketStatus::Resolved,
        comment: None,
    }
}

#[test_context(TestHarness)]
#[tokio::test]
async fn complaint_sends_acknowledgement(ctx: &TestHarness) {
    let category = create_test_category(&ctx.db_pool, "Billing", "Billing Officer")
        .await
        .unwrap();

    let created = file_complaint(&ctx.deps, category.id, "ada@example.com").await;
    let number = &created.ticket.ticket_number;

    assert_eq!(created.notification, DeliveryOutcome::Sent);
    let sent = ctx.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ada@example.com");
    assert_eq!(sent[0].subject, format!("Complaint Received - Ticket {}", number));
    assert!(sent[0].body.starts_with("Dear Ada Obi,"));
    assert!(sent[0].body.contains(&format!("Ticket ID: {}", number)));
    assert!(sent[0].body.contains("Category: Billing"));
    assert!(sent[0].body.contains("No light on our street for three days"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn escalation_names_the_new_assignee(ctx: &TestHarness) {
    let officer = create_test_staff(&ctx.db_pool, "bofficer", "Bola Officer", "Billing Officer")
        .await
        .unwrap();
    let supervisor = create_test_staff(&ctx.db_pool, "bsuper", "Chi Supervisor", "Billing Supervisor")
        .await
        .unwrap();
    let category = create_test_category(&ctx.db_pool, "Billing", "Billing Officer")
        .await
        .unwrap();
    let number = file_complaint(&ctx.deps, category.id, "ada@example.com")
        .await
        .ticket
        .ticket_number;
    ctx.mailer.clear();

    escalate(
        &number,
        &officer,
        Escalation {
            to_staff: supervisor.id,
            comment: None,
        },
        &ctx.deps,
    )
    .await
    .unwrap();

    let sent = ctx.mailer.sent_with_subject("has been escalated");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, format!("Your Complaint {} has been escalated", number));
    assert!(sent[0].body.contains("Chi Supervisor (Billing Supervisor)"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn every_resolution_sends_feedback_link(ctx: &TestHarness) {
    let officer = create_test_staff(&ctx.db_pool, "bofficer", "Bola Officer", "Billing Officer")
        .await
        .unwrap();
    let category = create_test_category(&ctx.db_pool, "Billing", "Billing Officer")
        .await
        .unwrap();
    let number = file_complaint(&ctx.deps, category.id, "ada@example.com")
        .await
        .ticket
        .ticket_number;

    let first = update_status(&number, &officer, resolve(), &ctx.deps)
        .await
        .unwrap();
    assert_eq!(first.notification, Some(DeliveryOutcome::Sent));

    update_status(
        &number,
        &officer,
        StatusUpdate {
            status: TicketStatus::InProgress,
            comment: Some("Customer called back".to_string()),
        },
        &ctx.deps,
    )
    .await
    .unwrap();
    update_status(&number, &officer, resolve(), &ctx.deps)
        .await
        .unwrap();

    let sent = ctx.mailer.sent_with_subject("has been resolved");
    assert_eq!(sent.len(), 2);
    let link = format!("http://testserver/feedback/{}/", number);
    for email in &sent {
        assert_eq!(email.to, "ada@example.com");
        assert!(email.body.contains(&link), "missing link in {}", email.body);
    }
}

#[test_context(TestHarness)]
#[tokio::test]
async fn non_resolving_status_change_sends_nothing(ctx: &TestHarness) {
    let officer = create_test_staff(&ctx.db_pool, "bofficer", "Bola Officer", "Billing Officer")
        .await
        .unwrap();
    let category = create_test_category(&ctx.db_pool, "Billing", "Billing Officer")
        .await
        .unwrap();
    let number = file_complaint(&ctx.deps, category.id, "ada@example.com")
        .await
        .ticket
        .ticket_number;
    ctx.mailer.clear();

    let changed = update_status(
        &number,
        &officer,
        StatusUpdate {
            status: TicketStatus::Closed,
            comment: None,
        },
        &ctx.deps,
    )
    .await
    .unwrap();

    assert_eq!(changed.notification, None);
    assert!(ctx.mailer.sent().is_empty());
}

#[tokio::test]
async fn failed_delivery_does_not_fail_the_operation() {
    let failing = FailingMailer::new();
    let ctx = TestHarness::with_mailer(Arc::new(failing.clone()), SpyMailer::new())
        .await
        .unwrap();
    let officer = create_test_staff(&ctx.db_pool, "bofficer", "Bola Officer", "Billing Officer")
        .await
        .unwrap();
    let category = create_test_category(&ctx.db_pool, "Billing", "Billing Officer")
        .await
        .unwrap();

    let created = create_complaint(complaint_input(category.id, "ada@example.com"), &ctx.deps)
        .await
        .expect("complaint is filed even when email fails");
    assert_eq!(created.notification, DeliveryOutcome::Failed);

    let resolved = update_status(&created.ticket.ticket_number, &officer, resolve(), &ctx.deps)
        .await
        .expect("status change commits even when email fails");
    assert_eq!(resolved.ticket.status, TicketStatus::Resolved);
    assert_eq!(resolved.notification, Some(DeliveryOutcome::Failed));

    assert_eq!(failing.attempts(), 2);
    ctx.db_pool.close().await;
}
