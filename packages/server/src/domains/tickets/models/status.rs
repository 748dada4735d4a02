use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef, Postgres};
use sqlx::{Decode, Encode, Type};

/// Ticket lifecycle state
///
/// NEW → IN_PROGRESS → ESCALATED → RESOLVED → CLOSED. Escalation may recur
/// and RESOLVED is reachable from any open state. Stored as the literal
/// upper-case code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    New,
    InProgress,
    Escalated,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 5] = [
        TicketStatus::New,
        TicketStatus::InProgress,
        TicketStatus::Escalated,
        TicketStatus::Resolved,
        TicketStatus::Closed,
    ];

    /// States that still need staff attention
    pub const OPEN: [TicketStatus; 3] = [
        TicketStatus::New,
        TicketStatus::InProgress,
        TicketStatus::Escalated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::New => "NEW",
            TicketStatus::InProgress => "IN_PROGRESS",
            TicketStatus::Escalated => "ESCALATED",
            TicketStatus::Resolved => "RESOLVED",
            TicketStatus::Closed => "CLOSED",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::New => "New",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::Escalated => "Escalated",
            TicketStatus::Resolved => "Resolved",
            TicketStatus::Closed => "Closed",
        }
    }

    pub fn is_open(&self) -> bool {
        Self::OPEN.contains(self)
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TicketStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "NEW" => Ok(TicketStatus::New),
            "IN_PROGRESS" => Ok(TicketStatus::InProgress),
            "ESCALATED" => Ok(TicketStatus::Escalated),
            "RESOLVED" => Ok(TicketStatus::Resolved),
            "CLOSED" => Ok(TicketStatus::Closed),
            _ => Err(anyhow::anyhow!("Invalid ticket status: {}", s)),
        }
    }
}

/// Kind of audit-trail entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryAction {
    Assigned,
    Escalated,
    Commented,
    StatusChanged,
    Resolved,
}

impl HistoryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryAction::Assigned => "ASSIGNED",
            HistoryAction::Escalated => "ESCALATED",
            HistoryAction::Commented => "COMMENTED",
            HistoryAction::StatusChanged => "STATUS_CHANGED",
            HistoryAction::Resolved => "RESOLVED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HistoryAction::Assigned => "Assigned",
            HistoryAction::Escalated => "Escalated",
            HistoryAction::Commented => "Commented",
            HistoryAction::StatusChanged => "Status Changed",
            HistoryAction::Resolved => "Resolved",
        }
    }
}

impl std::fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HistoryAction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ASSIGNED" => Ok(HistoryAction::Assigned),
            "ESCALATED" => Ok(HistoryAction::Escalated),
            "COMMENTED" => Ok(HistoryAction::Commented),
            "STATUS_CHANGED" => Ok(HistoryAction::StatusChanged),
            "RESOLVED" => Ok(HistoryAction::Resolved),
            _ => Err(anyhow::anyhow!("Invalid history action: {}", s)),
        }
    }
}

// ============================================================================
// sqlx support (stored as text codes)
// ============================================================================

macro_rules! text_code_sqlx {
    ($ty:ty) => {
        impl Type<Postgres> for $ty {
            fn type_info() -> PgTypeInfo {
                <String as Type<Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <String as Type<Postgres>>::compatible(ty)
            }
        }

        impl Encode<'_, Postgres> for $ty {
            fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
                <&str as Encode<Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }

        impl Decode<'_, Postgres> for $ty {
            fn decode(value: PgValueRef<'_>) -> Result<Self, BoxDynError> {
                let code = <&str as Decode<Postgres>>::decode(value)?;
                code.parse::<$ty>().map_err(|e| e.into())
            }
        }
    };
}

text_code_sqlx!(TicketStatus);
text_code_sqlx!(HistoryAction);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_roundtrip_through_display() {
        for status in TicketStatus::ALL {
            assert_eq!(status.to_string().parse::<TicketStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_codes_are_case_sensitive() {
        assert!("resolved".parse::<TicketStatus>().is_err());
        assert!("PENDING".parse::<TicketStatus>().is_err());
    }

    #[test]
    fn test_open_states() {
        assert!(TicketStatus::New.is_open());
        assert!(TicketStatus::InProgress.is_open());
        assert!(TicketStatus::Escalated.is_open());
        assert!(!TicketStatus::Resolved.is_open());
        assert!(!TicketStatus::Closed.is_open());
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(
            serde_json::to_string(&TicketStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        assert_eq!(
            serde_json::from_str::<HistoryAction>("\"STATUS_CHANGED\"").unwrap(),
            HistoryAction::StatusChanged
        );
    }
}
