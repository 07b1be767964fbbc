//! # Quota Ledger
//!
//! Balances keyed by (vessel, species, season) plus the transfer request
//! book, all behind one mutex. Every mutation — recording catch, settling
//! an approved transfer — happens inside a single critical section, so
//! two sides of a transfer can never be observed half-adjusted and
//! concurrent catch reports cannot tear a balance.

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use tem_core::{TransferId, ValidationError, VesselId};

use crate::alerts::{crossed, QuotaAlert};
use crate::error::QuotaError;
use crate::transfer::{TransferRequest, TransferState, TransferSubmission};

/// Balance status reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuotaStatus {
    Active,
    Exhausted,
    Suspended,
}

impl std::fmt::Display for QuotaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Active => "ACTIVE",
            Self::Exhausted => "EXHAUSTED",
            Self::Suspended => "SUSPENDED",
        };
        f.write_str(s)
    }
}

/// One vessel's balance for one species in one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaBalance {
    pub vessel_id: VesselId,
    pub species_code: String,
    pub season_year: i32,
    /// Pounds allocated at season start.
    pub initial_allocation: f64,
    /// Allocation after transfers in or out.
    pub current_allocation: f64,
    /// Pounds of recorded catch against this balance.
    pub used_pounds: f64,
    /// Administratively frozen.
    pub suspended: bool,
}

impl QuotaBalance {
    /// Pounds still available.
    pub fn remaining_pounds(&self) -> f64 {
        self.current_allocation - self.used_pounds
    }

    /// Usage as a percentage of the current allocation.
    pub fn percentage_used(&self) -> f64 {
        if self.current_allocation <= 0.0 {
            return 100.0;
        }
        self.used_pounds / self.current_allocation * 100.0
    }

    /// Current status.
    pub fn status(&self) -> QuotaStatus {
        if self.suspended {
            QuotaStatus::Suspended
        } else if self.remaining_pounds() <= 0.0 {
            QuotaStatus::Exhausted
        } else {
            QuotaStatus::Active
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct BalanceKey {
    vessel_id: VesselId,
    species_code: String,
    season_year: i32,
}

#[derive(Default)]
struct LedgerInner {
    balances: HashMap<BalanceKey, QuotaBalance>,
    transfers: HashMap<TransferId, TransferRequest>,
    alerts: HashMap<BalanceKey, Vec<QuotaAlert>>,
}

/// The quota accounting ledger.
#[derive(Default)]
pub struct QuotaLedger {
    inner: Mutex<LedgerInner>,
}

impl QuotaLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a vessel's season allocation for a species.
    ///
    /// Re-allocating an existing balance resets it; use transfers for
    /// mid-season adjustments.
    pub fn allocate(
        &self,
        vessel_id: VesselId,
        species_code: &str,
        season_year: i32,
        pounds: f64,
    ) -> Result<QuotaBalance, QuotaError> {
        if !pounds.is_finite() || pounds <= 0.0 {
            return Err(ValidationError::new(
                "pounds",
                format!("allocation must be positive, got {pounds}"),
            )
            .into());
        }
        if species_code.trim().is_empty() {
            return Err(ValidationError::new("species_code", "must not be empty").into());
        }
        let balance = QuotaBalance {
            vessel_id: vessel_id.clone(),
            species_code: species_code.to_string(),
            season_year,
            initial_allocation: pounds,
            current_allocation: pounds,
            used_pounds: 0.0,
            suspended: false,
        };
        let key = BalanceKey {
            vessel_id,
            species_code: species_code.to_string(),
            season_year,
        };
        self.inner.lock().balances.insert(key, balance.clone());
        Ok(balance)
    }

    /// All balances for a vessel in a season, sorted by species.
    pub fn balances_for(&self, vessel_id: &VesselId, season_year: i32) -> Vec<QuotaBalance> {
        let inner = self.inner.lock();
        let mut balances: Vec<QuotaBalance> = inner
            .balances
            .values()
            .filter(|b| &b.vessel_id == vessel_id && b.season_year == season_year)
            .cloned()
            .collect();
        balances.sort_by(|a, b| a.species_code.cmp(&b.species_code));
        balances
    }

    /// Standing alerts for a vessel in a season, oldest first.
    pub fn alerts_for(&self, vessel_id: &VesselId, season_year: i32) -> Vec<QuotaAlert> {
        let inner = self.inner.lock();
        let mut alerts: Vec<QuotaAlert> = inner
            .alerts
            .iter()
            .filter(|(k, _)| &k.vessel_id == vessel_id && k.season_year == season_year)
            .flat_map(|(_, v)| v.clone())
            .collect();
        alerts.sort_by(|a, b| a.threshold_reached.partial_cmp(&b.threshold_reached)
            .unwrap_or(std::cmp::Ordering::Equal));
        alerts
    }

    /// Record catch against a balance, returning the alerts this catch
    /// newly triggered.
    pub fn record_catch(
        &self,
        vessel_id: &VesselId,
        species_code: &str,
        season_year: i32,
        pounds: f64,
    ) -> Result<Vec<QuotaAlert>, QuotaError> {
        if !pounds.is_finite() || pounds <= 0.0 {
            return Err(ValidationError::new(
                "pounds",
                format!("catch weight must be positive, got {pounds}"),
            )
            .into());
        }
        let mut inner = self.inner.lock();
        let key = BalanceKey {
            vessel_id: vessel_id.clone(),
            species_code: species_code.to_string(),
            season_year,
        };
        let balance = inner.balances.get_mut(&key).ok_or_else(|| {
            QuotaError::UnknownBalance {
                vessel_id: vessel_id.clone(),
                species: species_code.to_string(),
                season_year,
            }
        })?;

        let before = balance.percentage_used();
        balance.used_pounds += pounds;
        let after = balance.percentage_used();

        let new_alerts: Vec<QuotaAlert> = crossed(before, after)
            .into_iter()
            .map(|threshold| QuotaAlert {
                alert_type: threshold,
                vessel_id: vessel_id.clone(),
                species_code: species_code.to_string(),
                season_year,
                threshold_reached: threshold.percent(),
                message: format!(
                    "{species_code} quota {threshold} reached: {:.1}% of {:.0} lb used",
                    after, balance.current_allocation
                ),
                created_date: Utc::now().date_naive(),
            })
            .collect();

        if !new_alerts.is_empty() {
            tracing::info!(vessel = %vessel_id, species = species_code,
                usage_pct = after, alerts = new_alerts.len(), "quota thresholds crossed");
            inner.alerts.entry(key).or_default().extend(new_alerts.clone());
        }
        Ok(new_alerts)
    }

    /// Suspend or reinstate a balance.
    pub fn set_suspended(
        &self,
        vessel_id: &VesselId,
        species_code: &str,
        season_year: i32,
        suspended: bool,
    ) -> Result<(), QuotaError> {
        let mut inner = self.inner.lock();
        let key = BalanceKey {
            vessel_id: vessel_id.clone(),
            species_code: species_code.to_string(),
            season_year,
        };
        let balance = inner.balances.get_mut(&key).ok_or_else(|| {
            QuotaError::UnknownBalance {
                vessel_id: vessel_id.clone(),
                species: species_code.to_string(),
                season_year,
            }
        })?;
        balance.suspended = suspended;
        Ok(())
    }

    /// Submit a transfer request. Validates the submission and checks the
    /// source balance can cover it today; the authoritative check happens
    /// again at approval time.
    pub fn submit_transfer(
        &self,
        submission: TransferSubmission,
    ) -> Result<TransferRequest, QuotaError> {
        let request = TransferRequest::new(submission)?;
        let mut inner = self.inner.lock();
        match remaining_for(&inner, &request) {
            Some(remaining) if remaining >= request.pounds => {}
            Some(remaining) => {
                return Err(QuotaError::InsufficientQuota {
                    requested: request.pounds,
                    remaining,
                })
            }
            None => {
                return Err(QuotaError::UnknownBalance {
                    vessel_id: request.from_vessel_id.clone(),
                    species: request.species_code.clone(),
                    season_year: request.season_year,
                })
            }
        }
        inner.transfers.insert(request.id.clone(), request.clone());
        tracing::info!(transfer = %request.id, from = %request.from_vessel_id,
            to = %request.to_vessel_id, pounds = request.pounds, "transfer submitted");
        Ok(request)
    }

    /// Look up a transfer request.
    pub fn get_transfer(&self, id: &TransferId) -> Result<TransferRequest, QuotaError> {
        self.inner
            .lock()
            .transfers
            .get(id)
            .cloned()
            .ok_or_else(|| QuotaError::TransferNotFound(id.clone()))
    }

    /// All transfer requests touching a vessel, newest first.
    pub fn transfers_for(&self, vessel_id: &VesselId) -> Vec<TransferRequest> {
        let inner = self.inner.lock();
        let mut transfers: Vec<TransferRequest> = inner
            .transfers
            .values()
            .filter(|t| &t.from_vessel_id == vessel_id || &t.to_vessel_id == vessel_id)
            .cloned()
            .collect();
        transfers.sort_by(|a, b| b.requested_at.cmp(&a.requested_at));
        transfers
    }

    /// Approve a pending transfer and settle both balances atomically.
    ///
    /// The debit and credit happen inside one critical section; total
    /// allocation across the two vessels is conserved.
    pub fn approve_transfer(
        &self,
        id: &TransferId,
        reviewer: &str,
    ) -> Result<TransferRequest, QuotaError> {
        let mut inner = self.inner.lock();

        let mut request = inner
            .transfers
            .get(id)
            .cloned()
            .ok_or_else(|| QuotaError::TransferNotFound(id.clone()))?;
        if request.state != TransferState::Pending {
            return Err(QuotaError::InvalidTransition {
                from: request.state.to_string(),
                to: "APPROVED".to_string(),
            });
        }

        // Re-check coverage at decision time; usage may have moved since
        // submission.
        let remaining = remaining_for(&inner, &request).ok_or_else(|| {
            QuotaError::UnknownBalance {
                vessel_id: request.from_vessel_id.clone(),
                species: request.species_code.clone(),
                season_year: request.season_year,
            }
        })?;
        if remaining < request.pounds {
            return Err(QuotaError::InsufficientQuota {
                requested: request.pounds,
                remaining,
            });
        }

        let from_key = BalanceKey {
            vessel_id: request.from_vessel_id.clone(),
            species_code: request.species_code.clone(),
            season_year: request.season_year,
        };
        let to_key = BalanceKey {
            vessel_id: request.to_vessel_id.clone(),
            species_code: request.species_code.clone(),
            season_year: request.season_year,
        };
        if !inner.balances.contains_key(&to_key) {
            // Receiving a transfer opens a balance for the species.
            inner.balances.insert(
                to_key.clone(),
                QuotaBalance {
                    vessel_id: request.to_vessel_id.clone(),
                    species_code: request.species_code.clone(),
                    season_year: request.season_year,
                    initial_allocation: 0.0,
                    current_allocation: 0.0,
                    used_pounds: 0.0,
                    suspended: false,
                },
            );
        }

        request.approve(reviewer)?;
        if let Some(from) = inner.balances.get_mut(&from_key) {
            from.current_allocation -= request.pounds;
        }
        if let Some(to) = inner.balances.get_mut(&to_key) {
            to.current_allocation += request.pounds;
        }
        inner.transfers.insert(request.id.clone(), request.clone());

        tracing::info!(transfer = %request.id, reviewer,
            pounds = request.pounds, "transfer approved and settled");
        Ok(request)
    }

    /// Reject a pending transfer. Balances are untouched.
    pub fn reject_transfer(
        &self,
        id: &TransferId,
        reviewer: &str,
        note: &str,
    ) -> Result<TransferRequest, QuotaError> {
        let mut inner = self.inner.lock();
        let mut request = inner
            .transfers
            .get(id)
            .cloned()
            .ok_or_else(|| QuotaError::TransferNotFound(id.clone()))?;
        request.reject(reviewer, note)?;
        inner.transfers.insert(request.id.clone(), request.clone());
        tracing::info!(transfer = %request.id, reviewer, note, "transfer rejected");
        Ok(request)
    }
}

/// Remaining pounds on the request's source balance, if it exists.
fn remaining_for(inner: &LedgerInner, request: &TransferRequest) -> Option<f64> {
    let key = BalanceKey {
        vessel_id: request.from_vessel_id.clone(),
        species_code: request.species_code.clone(),
        season_year: request.season_year,
    };
    inner.balances.get(&key).map(|b| b.remaining_pounds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::TransferType;
    use crate::AlertThreshold;

    fn submission(
        from: &VesselId,
        to: &VesselId,
        pounds: f64,
    ) -> TransferSubmission {
        TransferSubmission {
            from_vessel_id: from.clone(),
            to_vessel_id: to.clone(),
            species_code: "POP".to_string(),
            transfer_type: TransferType::Lease,
            pounds,
            season_year: 2025,
            transfer_reason: Some("Operational needs".to_string()),
            expiration_date: None,
        }
    }

    // ── Balances and catch ──────────────────────────────────────────

    #[test]
    fn test_allocate_and_read_back() {
        let ledger = QuotaLedger::new();
        let vessel = VesselId::new();
        ledger.allocate(vessel.clone(), "POP", 2025, 50_000.0).unwrap();
        ledger.allocate(vessel.clone(), "NORK", 2025, 20_000.0).unwrap();

        let balances = ledger.balances_for(&vessel, 2025);
        assert_eq!(balances.len(), 2);
        // Sorted by species code.
        assert_eq!(balances[0].species_code, "NORK");
        assert_eq!(balances[1].species_code, "POP");
        assert_eq!(balances[1].remaining_pounds(), 50_000.0);
        assert_eq!(balances[1].status(), QuotaStatus::Active);
    }

    #[test]
    fn test_allocate_rejects_bad_input() {
        let ledger = QuotaLedger::new();
        let vessel = VesselId::new();
        assert!(ledger.allocate(vessel.clone(), "POP", 2025, 0.0).is_err());
        assert!(ledger.allocate(vessel.clone(), "POP", 2025, -1.0).is_err());
        assert!(ledger.allocate(vessel, "  ", 2025, 100.0).is_err());
    }

    #[test]
    fn test_record_catch_updates_usage() {
        let ledger = QuotaLedger::new();
        let vessel = VesselId::new();
        ledger.allocate(vessel.clone(), "POP", 2025, 10_000.0).unwrap();

        ledger.record_catch(&vessel, "POP", 2025, 2_500.0).unwrap();
        let balance = &ledger.balances_for(&vessel, 2025)[0];
        assert_eq!(balance.used_pounds, 2_500.0);
        assert_eq!(balance.remaining_pounds(), 7_500.0);
        assert_eq!(balance.percentage_used(), 25.0);
    }

    #[test]
    fn test_record_catch_unknown_balance() {
        let ledger = QuotaLedger::new();
        let vessel = VesselId::new();
        let result = ledger.record_catch(&vessel, "POP", 2025, 100.0);
        assert!(matches!(result, Err(QuotaError::UnknownBalance { .. })));
    }

    #[test]
    fn test_exhaustion_status() {
        let ledger = QuotaLedger::new();
        let vessel = VesselId::new();
        ledger.allocate(vessel.clone(), "POP", 2025, 1_000.0).unwrap();
        ledger.record_catch(&vessel, "POP", 2025, 1_000.0).unwrap();
        assert_eq!(
            ledger.balances_for(&vessel, 2025)[0].status(),
            QuotaStatus::Exhausted
        );
    }

    #[test]
    fn test_suspension_overrides_status() {
        let ledger = QuotaLedger::new();
        let vessel = VesselId::new();
        ledger.allocate(vessel.clone(), "POP", 2025, 1_000.0).unwrap();
        ledger.set_suspended(&vessel, "POP", 2025, true).unwrap();
        assert_eq!(
            ledger.balances_for(&vessel, 2025)[0].status(),
            QuotaStatus::Suspended
        );
    }

    // ── Alerts ──────────────────────────────────────────────────────

    #[test]
    fn test_alerts_fire_once_per_threshold() {
        let ledger = QuotaLedger::new();
        let vessel = VesselId::new();
        ledger.allocate(vessel.clone(), "POP", 2025, 10_000.0).unwrap();

        // 0% -> 85%: fires QUOTA_80 only.
        let alerts = ledger.record_catch(&vessel, "POP", 2025, 8_500.0).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertThreshold::Quota80);

        // 85% -> 87%: nothing new.
        let alerts = ledger.record_catch(&vessel, "POP", 2025, 200.0).unwrap();
        assert!(alerts.is_empty());

        // 87% -> 100%: fires 90, 95, exhausted in order.
        let alerts = ledger.record_catch(&vessel, "POP", 2025, 1_300.0).unwrap();
        let kinds: Vec<AlertThreshold> = alerts.iter().map(|a| a.alert_type).collect();
        assert_eq!(
            kinds,
            vec![
                AlertThreshold::Quota90,
                AlertThreshold::Quota95,
                AlertThreshold::QuotaExhausted
            ]
        );

        // All four on record.
        assert_eq!(ledger.alerts_for(&vessel, 2025).len(), 4);
    }

    // ── Transfers ───────────────────────────────────────────────────

    #[test]
    fn test_transfer_lifecycle_conserves_allocation() {
        let ledger = QuotaLedger::new();
        let from = VesselId::new();
        let to = VesselId::new();
        ledger.allocate(from.clone(), "POP", 2025, 50_000.0).unwrap();
        ledger.allocate(to.clone(), "POP", 2025, 30_000.0).unwrap();

        let request = ledger.submit_transfer(submission(&from, &to, 5_000.0)).unwrap();
        assert_eq!(request.state, TransferState::Pending);

        let approved = ledger.approve_transfer(&request.id, "manager@region").unwrap();
        assert_eq!(approved.state, TransferState::Approved);

        let from_balance = &ledger.balances_for(&from, 2025)[0];
        let to_balance = &ledger.balances_for(&to, 2025)[0];
        assert_eq!(from_balance.current_allocation, 45_000.0);
        assert_eq!(to_balance.current_allocation, 35_000.0);
        // Initial allocations are untouched history.
        assert_eq!(from_balance.initial_allocation, 50_000.0);
        assert_eq!(
            from_balance.current_allocation + to_balance.current_allocation,
            80_000.0
        );
    }

    #[test]
    fn test_transfer_to_vessel_without_balance_opens_one() {
        let ledger = QuotaLedger::new();
        let from = VesselId::new();
        let to = VesselId::new();
        ledger.allocate(from.clone(), "POP", 2025, 50_000.0).unwrap();

        let request = ledger.submit_transfer(submission(&from, &to, 5_000.0)).unwrap();
        ledger.approve_transfer(&request.id, "manager").unwrap();

        let to_balance = &ledger.balances_for(&to, 2025)[0];
        assert_eq!(to_balance.current_allocation, 5_000.0);
        assert_eq!(to_balance.initial_allocation, 0.0);
    }

    #[test]
    fn test_reject_leaves_balances_untouched() {
        let ledger = QuotaLedger::new();
        let from = VesselId::new();
        let to = VesselId::new();
        ledger.allocate(from.clone(), "POP", 2025, 50_000.0).unwrap();
        ledger.allocate(to.clone(), "POP", 2025, 30_000.0).unwrap();

        let request = ledger.submit_transfer(submission(&from, &to, 5_000.0)).unwrap();
        let rejected = ledger
            .reject_transfer(&request.id, "manager", "paperwork incomplete")
            .unwrap();
        assert_eq!(rejected.state, TransferState::Rejected);

        assert_eq!(ledger.balances_for(&from, 2025)[0].current_allocation, 50_000.0);
        assert_eq!(ledger.balances_for(&to, 2025)[0].current_allocation, 30_000.0);
    }

    #[test]
    fn test_submit_rejects_insufficient_quota() {
        let ledger = QuotaLedger::new();
        let from = VesselId::new();
        let to = VesselId::new();
        ledger.allocate(from.clone(), "POP", 2025, 4_000.0).unwrap();

        let result = ledger.submit_transfer(submission(&from, &to, 5_000.0));
        assert!(matches!(result, Err(QuotaError::InsufficientQuota { .. })));
    }

    #[test]
    fn test_approval_rechecks_coverage() {
        let ledger = QuotaLedger::new();
        let from = VesselId::new();
        let to = VesselId::new();
        ledger.allocate(from.clone(), "POP", 2025, 6_000.0).unwrap();

        let request = ledger.submit_transfer(submission(&from, &to, 5_000.0)).unwrap();
        // Catch recorded between submission and decision eats the margin.
        ledger.record_catch(&from, "POP", 2025, 3_000.0).unwrap();

        let result = ledger.approve_transfer(&request.id, "manager");
        assert!(matches!(result, Err(QuotaError::InsufficientQuota { .. })));
        // The request stays pending; balances untouched.
        assert_eq!(
            ledger.get_transfer(&request.id).unwrap().state,
            TransferState::Pending
        );
        assert_eq!(ledger.balances_for(&from, 2025)[0].current_allocation, 6_000.0);
    }

    #[test]
    fn test_double_decision_is_conflict() {
        let ledger = QuotaLedger::new();
        let from = VesselId::new();
        let to = VesselId::new();
        ledger.allocate(from.clone(), "POP", 2025, 50_000.0).unwrap();

        let request = ledger.submit_transfer(submission(&from, &to, 5_000.0)).unwrap();
        ledger.approve_transfer(&request.id, "manager").unwrap();

        let result = ledger.approve_transfer(&request.id, "manager");
        assert!(matches!(result, Err(QuotaError::InvalidTransition { .. })));

        // Balances were not double-settled.
        assert_eq!(ledger.balances_for(&from, 2025)[0].current_allocation, 45_000.0);
    }

    #[test]
    fn test_unknown_transfer() {
        let ledger = QuotaLedger::new();
        let result = ledger.approve_transfer(&TransferId::new(), "manager");
        assert!(matches!(result, Err(QuotaError::TransferNotFound(_))));
    }

    #[test]
    fn test_transfers_for_lists_both_sides() {
        let ledger = QuotaLedger::new();
        let from = VesselId::new();
        let to = VesselId::new();
        ledger.allocate(from.clone(), "POP", 2025, 50_000.0).unwrap();

        let request = ledger.submit_transfer(submission(&from, &to, 5_000.0)).unwrap();
        assert_eq!(ledger.transfers_for(&from).len(), 1);
        assert_eq!(ledger.transfers_for(&to).len(), 1);
        assert_eq!(ledger.transfers_for(&from)[0].id, request.id);
        assert!(ledger.transfers_for(&VesselId::new()).is_empty());
    }
}
