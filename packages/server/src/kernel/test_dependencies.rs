// Test doubles for kernel traits
//
// Provides mailers that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::{BaseMailer, OutboundEmail};

// =============================================================================
// Spy Mailer
// =============================================================================

/// Records every message instead of sending it.
#[derive(Clone, Default)]
pub struct SpyMailer {
    sent: Arc<Mutex<Vec<OutboundEmail>>>,
}

impl SpyMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages sent so far, oldest first
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// Messages whose subject contains `needle`
    pub fn sent_with_subject(&self, needle: &str) -> Vec<OutboundEmail> {
        self.sent()
            .into_iter()
            .filter(|email| email.subject.contains(needle))
            .collect()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl BaseMailer for SpyMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

// =============================================================================
// Failing Mailer
// =============================================================================

/// Fails every delivery, counting attempts.
#[derive(Clone, Default)]
pub struct FailingMailer {
    attempts: Arc<Mutex<usize>>,
}

impl FailingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl BaseMailer for FailingMailer {
    async fn send(&self, _email: &OutboundEmail) -> Result<()> {
        *self.attempts.lock().unwrap() += 1;
        anyhow::bail!("mail relay unavailable")
    }
}
