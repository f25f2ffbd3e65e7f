//! Access control
//!
//! Roles are not stored per principal. The administrator is fixed by
//! configuration, a claimant is whoever filed the claim, and a verifier is any
//! caller other than the claimant (optionally narrowed by an allow-list).
//! Authorization is therefore a capability check parameterized by the
//! operation being attempted.
//!
//! Every mutating operation calls [`AccessPolicy::authorize`] before it reads
//! or writes any state. Reads are open to any caller and are not checked.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::warn;

use crate::error::ErrorCode;
use crate::identifiers::Principal;

/// The role a caller acts in for an authorized operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Administrator,
    Claimant,
    Verifier,
}

/// Operations subject to authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    SubmitClaim,
    UpdateClaimStatus,
    InitializeVerification,
    CastVote,
    ProcessVerifiedClaim,
    PayClaim,
}

impl Operation {
    /// The role an authorized caller holds for this operation
    pub fn required_role(&self) -> Role {
        match self {
            Operation::SubmitClaim => Role::Claimant,
            Operation::UpdateClaimStatus
            | Operation::InitializeVerification
            | Operation::ProcessVerifiedClaim
            | Operation::PayClaim => Role::Administrator,
            Operation::CastVote => Role::Verifier,
        }
    }
}

/// Authorization failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("Unauthorized: {caller} is not the administrator")]
    NotAdministrator { caller: Principal },

    #[error("Unauthorized: {caller} cannot verify their own claim")]
    SelfVerification { caller: Principal },

    #[error("Unauthorized: {caller} is not an enrolled verifier")]
    NotEnrolledVerifier { caller: Principal },

    #[error("Unauthorized: operation {operation:?} requires the claim's claimant")]
    MissingClaimant { operation: Operation },
}

impl AccessError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::Unauthorized
    }
}

/// Deployment-wide access policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessPolicy {
    administrator: Principal,
    /// When set, only these principals may cast votes
    verifier_allow_list: Option<BTreeSet<Principal>>,
}

impl AccessPolicy {
    /// Creates a policy with an open verifier set
    pub fn new(administrator: Principal) -> Self {
        Self {
            administrator,
            verifier_allow_list: None,
        }
    }

    /// Restricts voting to the given principals
    pub fn with_verifier_allow_list(mut self, verifiers: impl IntoIterator<Item = Principal>) -> Self {
        self.verifier_allow_list = Some(verifiers.into_iter().collect());
        self
    }

    pub fn administrator(&self) -> &Principal {
        &self.administrator
    }

    pub fn is_administrator(&self, caller: &Principal) -> bool {
        &self.administrator == caller
    }

    pub fn verifier_allow_list(&self) -> Option<&BTreeSet<Principal>> {
        self.verifier_allow_list.as_ref()
    }

    /// Checks that `caller` may perform `operation`
    ///
    /// `claimant` is the claim's claimant for claim-scoped checks; it is
    /// required for [`Operation::CastVote`] and ignored elsewhere.
    pub fn authorize(
        &self,
        caller: &Principal,
        operation: Operation,
        claimant: Option<&Principal>,
    ) -> Result<Role, AccessError> {
        let role = operation.required_role();
        let outcome = match role {
            Role::Administrator => {
                if self.is_administrator(caller) {
                    Ok(role)
                } else {
                    Err(AccessError::NotAdministrator { caller: caller.clone() })
                }
            }
            Role::Verifier => self.authorize_verifier(caller, operation, claimant).map(|_| role),
            Role::Claimant => Ok(role),
        };

        if let Err(ref e) = outcome {
            warn!(caller = %caller, ?operation, error = %e, "Authorization refused");
        }
        outcome
    }

    fn authorize_verifier(
        &self,
        caller: &Principal,
        operation: Operation,
        claimant: Option<&Principal>,
    ) -> Result<(), AccessError> {
        let claimant = claimant.ok_or(AccessError::MissingClaimant { operation })?;
        if claimant == caller {
            return Err(AccessError::SelfVerification { caller: caller.clone() });
        }
        match &self.verifier_allow_list {
            Some(list) if !list.contains(caller) => {
                Err(AccessError::NotEnrolledVerifier { caller: caller.clone() })
            }
            _ => Ok(()),
        }
    }
}
