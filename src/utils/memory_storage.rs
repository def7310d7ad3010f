//! In-memory storage and delivery implementations for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

fn poisoned<T>(_: T) -> ReportError {
    ReportError::Storage("memory storage lock poisoned".to_string())
}

/// In-memory storage implementation for testing and development
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    committees: Arc<RwLock<HashMap<String, Committee>>>,
    members: Arc<RwLock<Vec<Member>>>,
    payments: Arc<RwLock<Vec<Payment>>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            committees: Arc::new(RwLock::new(HashMap::new())),
            members: Arc::new(RwLock::new(Vec::new())),
            payments: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Save a committee, replacing any committee with the same ID
    pub fn save_committee(&self, committee: Committee) -> ReportResult<()> {
        self.committees
            .write()
            .map_err(poisoned)?
            .insert(committee.id.clone(), committee);
        Ok(())
    }

    /// Add a member
    pub fn save_member(&self, member: Member) -> ReportResult<()> {
        self.members.write().map_err(poisoned)?.push(member);
        Ok(())
    }

    /// Append a payment; insertion order is kept
    pub fn save_payment(&self, payment: Payment) -> ReportResult<()> {
        self.payments.write().map_err(poisoned)?.push(payment);
        Ok(())
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> ReportResult<()> {
        self.committees.write().map_err(poisoned)?.clear();
        self.members.write().map_err(poisoned)?.clear();
        self.payments.write().map_err(poisoned)?.clear();
        Ok(())
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommitteeStorage for MemoryStorage {
    async fn get_committee(&self, committee_id: &str) -> ReportResult<Option<Committee>> {
        Ok(self
            .committees
            .read()
            .map_err(poisoned)?
            .get(committee_id)
            .cloned())
    }

    async fn get_members_by_committee(&self, committee_id: &str) -> ReportResult<Vec<Member>> {
        let members = self.members.read().map_err(poisoned)?;
        Ok(members
            .iter()
            .filter(|member| member.committee_id == committee_id)
            .cloned()
            .collect())
    }

    async fn get_payments_by_committee(&self, committee_id: &str) -> ReportResult<Vec<Payment>> {
        let members = self.members.read().map_err(poisoned)?;
        let payments = self.payments.read().map_err(poisoned)?;
        Ok(payments
            .iter()
            .filter(|payment| {
                members
                    .iter()
                    .any(|m| m.id == payment.member_id && m.committee_id == committee_id)
            })
            .cloned()
            .collect())
    }
}

/// A delivered report as captured by [`MemoryDelivery`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivered {
    /// Rendered output as handed over
    pub report: RenderedReport,
    /// Subject line passed along with it
    pub subject: String,
}

/// Delivery collaborator that keeps every report in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryDelivery {
    delivered: Arc<RwLock<Vec<Delivered>>>,
    fail_with: Option<String>,
}

impl MemoryDelivery {
    /// Create a delivery sink that accepts everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a delivery sink that rejects everything with the given reason
    pub fn failing(reason: &str) -> Self {
        Self {
            delivered: Arc::new(RwLock::new(Vec::new())),
            fail_with: Some(reason.to_string()),
        }
    }

    /// Reports delivered so far
    pub fn delivered(&self) -> ReportResult<Vec<Delivered>> {
        Ok(self
            .delivered
            .read()
            .map_err(|_| ReportError::Delivery("delivery lock poisoned".to_string()))?
            .clone())
    }
}

#[async_trait]
impl ReportDelivery for MemoryDelivery {
    async fn deliver(&self, report: &RenderedReport, subject: &str) -> ReportResult<()> {
        if let Some(reason) = &self.fail_with {
            return Err(ReportError::Delivery(reason.clone()));
        }
        self.delivered
            .write()
            .map_err(|_| ReportError::Delivery("delivery lock poisoned".to_string()))?
            .push(Delivered {
                report: report.clone(),
                subject: subject.to_string(),
            });
        Ok(())
    }
}
