//! Pure lifecycle rules shared by the ticket actions.
//!
//! Transitions are not guarded beyond enum membership: any recognised status
//! may follow any other, including CLOSED → NEW.

use chrono::{DateTime, Utc};

use super::models::{HistoryAction, TicketStatus};

/// Comment written on automatic assignment at creation
pub const AUTO_ASSIGNED_COMMENT: &str = "Ticket created and assigned automatically";

/// `resolved_at` after moving to `new_status`.
///
/// Set only on the first move into RESOLVED; never changed afterwards, not even
/// by leaving RESOLVED.
pub fn resolved_at_after(
    current: Option<DateTime<Utc>>,
    new_status: TicketStatus,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match (current, new_status) {
        (None, TicketStatus::Resolved) => Some(now),
        (current, _) => current,
    }
}

/// History action recorded for a staff status update
pub fn history_action_for(new_status: TicketStatus) -> HistoryAction {
    if new_status == TicketStatus::Resolved {
        HistoryAction::Resolved
    } else {
        HistoryAction::StatusChanged
    }
}

/// The staff comment, or `Status changed from OLD to NEW` when none was given
pub fn status_change_comment(
    comment: Option<&str>,
    old_status: TicketStatus,
    new_status: TicketStatus,
) -> String {
    match comment.map(str::trim).filter(|c| !c.is_empty()) {
        Some(comment) => comment.to_string(),
        None => format!("Status changed from {} to {}", old_status, new_status),
    }
}

/// Customers may rate only tickets that are currently RESOLVED
pub fn accepts_feedback(status: TicketStatus) -> bool {
    status == TicketStatus::Resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_resolved_at_set_on_first_resolution() {
        let now = Utc::now();
        assert_eq!(resolved_at_after(None, TicketStatus::Resolved, now), Some(now));
    }

    #[test]
    fn test_resolved_at_not_moved_by_second_resolution() {
        let first = Utc::now() - Duration::days(3);
        let now = Utc::now();
        assert_eq!(
            resolved_at_after(Some(first), TicketStatus::Resolved, now),
            Some(first)
        );
    }

    #[test]
    fn test_resolved_at_survives_reopening() {
        let first = Utc::now() - Duration::hours(5);
        assert_eq!(
            resolved_at_after(Some(first), TicketStatus::InProgress, Utc::now()),
            Some(first)
        );
        assert_eq!(resolved_at_after(None, TicketStatus::Closed, Utc::now()), None);
    }

    #[test]
    fn test_history_action_for_status() {
        assert_eq!(
            history_action_for(TicketStatus::Resolved),
            HistoryAction::Resolved
        );
        for status in [
            TicketStatus::New,
            TicketStatus::InProgress,
            TicketStatus::Escalated,
            TicketStatus::Closed,
        ] {
            assert_eq!(history_action_for(status), HistoryAction::StatusChanged);
        }
    }

    #[test]
    fn test_default_comment_uses_codes() {
        assert_eq!(
            status_change_comment(None, TicketStatus::New, TicketStatus::InProgress),
            "Status changed from NEW to IN_PROGRESS"
        );
        assert_eq!(
            status_change_comment(Some("   "), TicketStatus::Closed, TicketStatus::New),
            "Status changed from CLOSED to NEW"
        );
        assert_eq!(
            status_change_comment(
                Some("Meter replaced"),
                TicketStatus::New,
                TicketStatus::Resolved
            ),
            "Meter replaced"
        );
    }

    #[test]
    fn test_feedback_only_when_resolved() {
        for status in TicketStatus::ALL {
            assert_eq!(accepts_feedback(status), status == TicketStatus::Resolved);
        }
    }
}
