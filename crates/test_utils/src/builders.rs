//! Test Data Builders
//!
//! Provides builder patterns for wiring an adjudication desk to an in-memory
//! premium pool. Tests specify only the relevant settings and use defaults
//! for everything else.

use std::sync::Arc;

use core_kernel::{AccessPolicy, ClaimId, EvidenceHash, LogicalClock, Money, PolicyId, Principal};
use domain_billing::{PolicyTerms, PremiumPool};
use domain_claims::{AdjudicationDesk, ClaimError, DeskSettings};

use crate::fixtures::{EvidenceFixtures, PolicyFixtures, PrincipalFixtures};

/// A desk together with the pool it draws on
pub struct TestDesk {
    pub desk: AdjudicationDesk,
    pub pool: Arc<PremiumPool>,
}

impl TestDesk {
    /// Files the default claim for the default claimant
    pub fn submit_default_claim(&mut self) -> Result<ClaimId, ClaimError> {
        ClaimRequestBuilder::new().submit(&mut self.desk)
    }
}

/// Builder for a desk with a funded pool and subscribed claimants
pub struct DeskBuilder {
    administrator: Principal,
    settings: DeskSettings,
    verifier_allow_list: Option<Vec<Principal>>,
    policies: Vec<(PolicyId, PolicyTerms)>,
    subscribers: Vec<(Principal, PolicyId)>,
    funding: Money,
}

impl Default for DeskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DeskBuilder {
    /// Creates a builder with the default policy and claimant subscribed
    pub fn new() -> Self {
        Self {
            administrator: PrincipalFixtures::administrator(),
            settings: DeskSettings::default(),
            verifier_allow_list: None,
            policies: vec![(PolicyFixtures::policy_id(), PolicyFixtures::terms())],
            subscribers: vec![(PrincipalFixtures::claimant(), PolicyFixtures::policy_id())],
            funding: Money::from_minor(1_000_000),
        }
    }

    pub fn with_settings(mut self, settings: DeskSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_max_votes(mut self, max_votes: u32) -> Self {
        self.settings.max_votes = max_votes;
        self
    }

    pub fn with_auto_apply(mut self) -> Self {
        self.settings.auto_apply_resolution = true;
        self
    }

    pub fn with_verifier_allow_list(mut self, verifiers: impl IntoIterator<Item = Principal>) -> Self {
        self.verifier_allow_list = Some(verifiers.into_iter().collect());
        self
    }

    pub fn with_policy(mut self, policy_id: PolicyId, terms: PolicyTerms) -> Self {
        self.policies.push((policy_id, terms));
        self
    }

    pub fn with_subscriber(mut self, subscriber: Principal, policy_id: PolicyId) -> Self {
        self.subscribers.push((subscriber, policy_id));
        self
    }

    /// Sets capital placed in the pool on top of collected premiums
    pub fn with_funding(mut self, funding: Money) -> Self {
        self.funding = funding;
        self
    }

    /// Builds the desk
    ///
    /// # Panics
    ///
    /// Panics if a configured policy or subscription is rejected by the pool
    pub fn build(self) -> TestDesk {
        let clock = LogicalClock::new();
        let pool = Arc::new(PremiumPool::new(clock.clone()));

        for (policy_id, terms) in self.policies {
            pool.register_policy(policy_id, terms)
                .expect("test policy terms are valid");
        }
        for (subscriber, policy_id) in &self.subscribers {
            pool.subscribe(subscriber, *policy_id)
                .expect("test subscription succeeds");
        }
        if self.funding.is_positive() {
            pool.fund(self.funding).expect("test funding does not overflow");
        }

        let mut access = AccessPolicy::new(self.administrator);
        if let Some(verifiers) = self.verifier_allow_list {
            access = access.with_verifier_allow_list(verifiers);
        }

        let desk = AdjudicationDesk::new(access, self.settings, clock, pool.clone(), pool.clone());
        TestDesk { desk, pool }
    }
}

/// Builder for claim submissions
pub struct ClaimRequestBuilder {
    claimant: Principal,
    policy_id: PolicyId,
    amount: Money,
    description: String,
    evidence_hash: EvidenceHash,
}

impl Default for ClaimRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimRequestBuilder {
    pub fn new() -> Self {
        Self {
            claimant: PrincipalFixtures::claimant(),
            policy_id: PolicyFixtures::policy_id(),
            amount: PolicyFixtures::claim_amount(),
            description: PolicyFixtures::description().to_string(),
            evidence_hash: EvidenceFixtures::sample(),
        }
    }

    pub fn claimant(mut self, claimant: Principal) -> Self {
        self.claimant = claimant;
        self
    }

    pub fn policy(mut self, policy_id: PolicyId) -> Self {
        self.policy_id = policy_id;
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn evidence(mut self, evidence_hash: EvidenceHash) -> Self {
        self.evidence_hash = evidence_hash;
        self
    }

    /// Submits the claim through the desk
    pub fn submit(self, desk: &mut AdjudicationDesk) -> Result<ClaimId, ClaimError> {
        desk.submit_claim(
            &self.claimant,
            self.policy_id,
            self.amount,
            self.description,
            self.evidence_hash,
        )
    }
}
