// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Message composition lives in the notifications domain; these traits only
// move an already-composed message.
//
// Naming convention: Base* for trait names (e.g., BaseMailer)

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// =============================================================================
// Outbound Mail Trait (Infrastructure)
// =============================================================================

/// A fully composed plaintext email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait BaseMailer: Send + Sync {
    /// Deliver one message. Errors are reported to the caller, never retried here.
    async fn send(&self, email: &OutboundEmail) -> Result<()>;
}
