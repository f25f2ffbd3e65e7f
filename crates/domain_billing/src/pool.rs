//! Premium pool
//!
//! In-memory premium collector. State sits behind one `RwLock` so the pool
//! can be shared between the claims core (as its subscription and payout
//! ports) and the billing endpoints.
//!
//! The pool reads two clocks. Ledger entries are stamped on the shared
//! operation clock. Premium periods are counted on a separate calendar that
//! only the passage of time advances, so activity by other users never
//! brings a subscription closer to lapsing.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{info, warn};

use core_kernel::{
    DomainPort, LogicalClock, Money, PayoutPort, PolicyId, PortError, Principal, Subscription,
    SubscriptionLookup,
};

use crate::catalog::PolicyTerms;
use crate::error::BillingError;
use crate::ledger::{PoolEntry, PoolEntryKind};

#[derive(Debug, Default)]
struct PoolState {
    catalog: HashMap<PolicyId, PolicyTerms>,
    subscriptions: HashMap<(Principal, PolicyId), Subscription>,
    balance: Money,
    ledger: Vec<PoolEntry>,
}

/// Premium collection and claims payout pool
#[derive(Debug)]
pub struct PremiumPool {
    clock: LogicalClock,
    calendar: LogicalClock,
    state: RwLock<PoolState>,
}

impl PremiumPool {
    /// Creates a pool with its own billing calendar starting at period zero
    pub fn new(clock: LogicalClock) -> Self {
        Self::with_calendar(clock, LogicalClock::new())
    }

    /// Creates a pool whose premium periods follow `calendar`
    pub fn with_calendar(clock: LogicalClock, calendar: LogicalClock) -> Self {
        Self {
            clock,
            calendar,
            state: RwLock::new(PoolState::default()),
        }
    }

    /// The billing calendar; advance it as premium periods elapse
    pub fn calendar(&self) -> &LogicalClock {
        &self.calendar
    }

    /// Adds or replaces a policy's premium terms
    pub fn register_policy(&self, policy_id: PolicyId, terms: PolicyTerms) -> Result<(), BillingError> {
        terms.validate()?;
        self.write().catalog.insert(policy_id, terms);
        info!(policy_id = %policy_id, premium = %terms.premium_amount, "Policy registered");
        Ok(())
    }

    /// Subscribes to a policy, collecting the first premium
    ///
    /// A cancelled subscription may be renewed this way; an active one may not.
    pub fn subscribe(&self, subscriber: &Principal, policy_id: PolicyId) -> Result<Subscription, BillingError> {
        let mut state = self.write();
        let terms = *state
            .catalog
            .get(&policy_id)
            .ok_or(BillingError::PolicyNotFound(policy_id))?;

        let key = (subscriber.clone(), policy_id);
        if state.subscriptions.get(&key).is_some_and(|s| s.active) {
            return Err(BillingError::AlreadySubscribed {
                subscriber: subscriber.clone(),
                policy_id,
            });
        }

        let balance = state.balance.checked_add(terms.premium_amount)?;
        let now = self.clock.tick();
        let subscription = Subscription {
            premium_amount: terms.premium_amount,
            last_payment: self.calendar.now(),
            payment_frequency: terms.payment_frequency,
            active: true,
            total_paid: terms.premium_amount,
        };

        state.balance = balance;
        state.ledger.push(PoolEntry {
            kind: PoolEntryKind::PremiumCollected,
            counterparty: Some(subscriber.clone()),
            policy_id: Some(policy_id),
            amount: terms.premium_amount,
            at: now,
        });
        state.subscriptions.insert(key, subscription.clone());

        info!(subscriber = %subscriber, policy_id = %policy_id, "Subscribed");
        Ok(subscription)
    }

    /// Collects one premium for an active subscription
    pub fn pay_premium(&self, subscriber: &Principal, policy_id: PolicyId) -> Result<Subscription, BillingError> {
        let mut state = self.write();
        let key = (subscriber.clone(), policy_id);
        let current = state
            .subscriptions
            .get(&key)
            .filter(|s| s.active)
            .cloned()
            .ok_or_else(|| BillingError::NotSubscribed {
                subscriber: subscriber.clone(),
                policy_id,
            })?;

        let total_paid = current.total_paid.checked_add(current.premium_amount)?;
        let balance = state.balance.checked_add(current.premium_amount)?;
        let now = self.clock.tick();
        let updated = Subscription {
            last_payment: self.calendar.now(),
            total_paid,
            ..current
        };

        state.balance = balance;
        state.ledger.push(PoolEntry {
            kind: PoolEntryKind::PremiumCollected,
            counterparty: Some(subscriber.clone()),
            policy_id: Some(policy_id),
            amount: updated.premium_amount,
            at: now,
        });
        state.subscriptions.insert(key, updated.clone());

        info!(subscriber = %subscriber, policy_id = %policy_id, total_paid = %total_paid, "Premium paid");
        Ok(updated)
    }

    /// Cancels an active subscription
    pub fn cancel_subscription(&self, subscriber: &Principal, policy_id: PolicyId) -> Result<(), BillingError> {
        let mut state = self.write();
        let subscription = state
            .subscriptions
            .get_mut(&(subscriber.clone(), policy_id))
            .filter(|s| s.active)
            .ok_or_else(|| BillingError::NotSubscribed {
                subscriber: subscriber.clone(),
                policy_id,
            })?;

        subscription.active = false;
        self.clock.tick();

        info!(subscriber = %subscriber, policy_id = %policy_id, "Subscription cancelled");
        Ok(())
    }

    /// Adds capital to the pool
    pub fn fund(&self, amount: Money) -> Result<Money, BillingError> {
        let mut state = self.write();
        let balance = state.balance.checked_add(amount)?;
        let now = self.clock.tick();
        state.balance = balance;
        state.ledger.push(PoolEntry {
            kind: PoolEntryKind::Funded,
            counterparty: None,
            policy_id: None,
            amount,
            at: now,
        });
        Ok(balance)
    }

    /// Pays `amount` out of the pool to `payee`
    pub fn disburse(&self, payee: &Principal, amount: Money) -> Result<Money, BillingError> {
        let mut state = self.write();
        let balance = state
            .balance
            .checked_sub(amount)
            .map_err(|_| BillingError::InsufficientFunds {
                requested: amount,
                available: state.balance,
            })?;
        let now = self.clock.tick();
        state.balance = balance;
        state.ledger.push(PoolEntry {
            kind: PoolEntryKind::ClaimPaid,
            counterparty: Some(payee.clone()),
            policy_id: None,
            amount,
            at: now,
        });

        info!(payee = %payee, amount = %amount, balance = %balance, "Payout disbursed");
        Ok(balance)
    }

    pub fn balance(&self) -> Money {
        self.read().balance
    }

    pub fn terms(&self, policy_id: PolicyId) -> Option<PolicyTerms> {
        self.read().catalog.get(&policy_id).copied()
    }

    /// Returns the pool's movements, oldest first
    pub fn ledger(&self) -> Vec<PoolEntry> {
        self.read().ledger.clone()
    }

    // A panic while holding the lock cannot leave a half-applied movement:
    // every writer validates before it assigns.
    fn read(&self) -> RwLockReadGuard<'_, PoolState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, PoolState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl DomainPort for PremiumPool {}

impl SubscriptionLookup for PremiumPool {
    fn policy_exists(&self, policy_id: PolicyId) -> bool {
        self.read().catalog.contains_key(&policy_id)
    }

    fn get_subscription(&self, claimant: &Principal, policy_id: PolicyId) -> Option<Subscription> {
        let today = self.calendar.now();
        self.read()
            .subscriptions
            .get(&(claimant.clone(), policy_id))
            .map(|s| Subscription {
                active: s.is_in_force_at(today),
                ..s.clone()
            })
    }
}

impl PayoutPort for PremiumPool {
    fn transfer(&self, to: &Principal, amount: Money) -> Result<(), PortError> {
        self.disburse(to, amount).map(|_| ()).map_err(|e| match e {
            BillingError::InsufficientFunds { requested, available } => {
                warn!(payee = %to, %requested, %available, "Pool cannot cover payout");
                PortError::InsufficientFunds { requested, available }
            }
            other => PortError::internal(other.to_string()),
        })
    }
}
