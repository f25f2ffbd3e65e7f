//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data shared across the claims test suites.
//! These fixtures are consistent and predictable for unit tests.

use core_kernel::{EvidenceHash, Money, PolicyId, Principal};
use domain_billing::PolicyTerms;

/// Fixture for caller identities
pub struct PrincipalFixtures;

impl PrincipalFixtures {
    /// The deployment administrator
    pub fn administrator() -> Principal {
        Principal::new("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM")
    }

    /// A subscribed claimant
    pub fn claimant() -> Principal {
        Principal::new("ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG")
    }

    /// The `n`th independent verifier
    pub fn verifier(n: u32) -> Principal {
        Principal::new(format!("ST3VERIFIER{:04}", n))
    }

    /// A caller with no subscription and no special role
    pub fn outsider() -> Principal {
        Principal::new("ST4OUTSIDER")
    }
}

/// Fixture for evidence hashes
pub struct EvidenceFixtures;

impl EvidenceFixtures {
    /// Hex form of [`EvidenceFixtures::sample`]
    pub const SAMPLE_HEX: &'static str =
        "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";

    pub fn sample() -> EvidenceHash {
        let mut bytes = [0u8; 32];
        for chunk in bytes.chunks_mut(8) {
            chunk.copy_from_slice(&[0x12, 0x34, 0x56, 0x78, 0x90, 0xab, 0xcd, 0xef]);
        }
        EvidenceHash::from_bytes(bytes)
    }

    /// Hash of a named evidence file
    pub fn of(name: &str) -> EvidenceHash {
        EvidenceHash::digest(name.as_bytes())
    }
}

/// Fixture for policies and amounts
pub struct PolicyFixtures;

impl PolicyFixtures {
    pub fn policy_id() -> PolicyId {
        PolicyId::new(1)
    }

    pub fn premium() -> Money {
        Money::from_minor(5_000)
    }

    /// A premium period long enough that no test lapses by accident
    pub fn payment_frequency() -> u64 {
        1_000_000
    }

    pub fn terms() -> PolicyTerms {
        PolicyTerms::new(Self::premium(), Self::payment_frequency())
    }

    pub fn claim_amount() -> Money {
        Money::from_minor(50_000)
    }

    pub fn description() -> &'static str {
        "Crop damage due to drought"
    }
}
