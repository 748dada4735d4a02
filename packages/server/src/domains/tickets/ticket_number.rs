//! Human-facing ticket numbers: `DISCO-<4-digit year>-<6-digit sequence>`.
//!
//! The sequence is the count of tickets already carrying the year's prefix,
//! plus one. Two concurrent submissions can compute the same number; the
//! unique constraint on `tickets.ticket_id` rejects the second insert.

use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;
use sqlx::PgExecutor;

pub const TICKET_NUMBER_PREFIX: &str = "DISCO";

lazy_static! {
    static ref TICKET_NUMBER_REGEX: Regex = Regex::new(r"^DISCO-(\d{4})-(\d{6})$").unwrap();
}

/// `DISCO-2024-`
pub fn year_prefix(year: i32) -> String {
    format!("{}-{:04}-", TICKET_NUMBER_PREFIX, year)
}

/// `DISCO-2024-000042`
pub fn format_ticket_number(year: i32, sequence: i64) -> String {
    format!("{}{:06}", year_prefix(year), sequence)
}

/// Split a ticket number into (year, sequence)
pub fn parse_ticket_number(value: &str) -> Option<(i32, i64)> {
    let caps = TICKET_NUMBER_REGEX.captures(value)?;
    let year = caps.get(1)?.as_str().parse().ok()?;
    let sequence = caps.get(2)?.as_str().parse().ok()?;
    Some((year, sequence))
}

pub fn is_valid_ticket_number(value: &str) -> bool {
    TICKET_NUMBER_REGEX.is_match(value)
}

/// Allocate the next ticket number for `year`.
pub async fn next_ticket_number<'e, E: PgExecutor<'e>>(year: i32, executor: E) -> Result<String> {
    let prefix = year_prefix(year);
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tickets WHERE ticket_id LIKE $1")
        .bind(format!("{}%", prefix))
        .fetch_one(executor)
        .await?;
    Ok(format_ticket_number(year, existing + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pads_sequence() {
        assert_eq!(format_ticket_number(2024, 1), "DISCO-2024-000001");
        assert_eq!(format_ticket_number(2025, 123456), "DISCO-2025-123456");
    }

    #[test]
    fn test_parse_roundtrip() {
        assert_eq!(parse_ticket_number("DISCO-2024-000042"), Some((2024, 42)));
        assert_eq!(
            parse_ticket_number(&format_ticket_number(2031, 7)),
            Some((2031, 7))
        );
    }

    #[test]
    fn test_rejects_malformed_numbers() {
        for bad in [
            "DISCO-24-000001",
            "DISCO-2024-1",
            "disco-2024-000001",
            "DISCO-2024-000001 ",
            "XDISCO-2024-000001",
            "DISCO-2024-0000001",
        ] {
            assert!(!is_valid_ticket_number(bad), "{bad} should be rejected");
            assert_eq!(parse_ticket_number(bad), None);
        }
    }

    #[test]
    fn test_sequential_numbers_differ_by_one() {
        let first = format_ticket_number(2024, 9);
        let second = format_ticket_number(2024, 10);
        let (_, a) = parse_ticket_number(&first).unwrap();
        let (_, b) = parse_ticket_number(&second).unwrap();
        assert_eq!(b, a + 1);
    }
}
