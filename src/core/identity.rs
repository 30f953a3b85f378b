//! Party identity and the acting-identity context
//!
//! A party is a name + contact email pair. The email is the identity key:
//! role-scoped queries and ownership checks all compare contact emails.

use crate::core::error::{AccessError, MarketResult, ValidationError};
use crate::core::field::FieldFormat;
use serde::{Deserialize, Serialize};

/// A named participant with a contact email.
///
/// Used for shop owners, order requesters, and order fulfillers alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub email: String,
}

impl Party {
    /// Create a party, validating the contact email format.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> MarketResult<Self> {
        let name = name.into();
        let email = email.into();

        if name.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "name" }.into());
        }
        if !FieldFormat::Email.is_valid(&email) {
            return Err(ValidationError::InvalidEmail { value: email }.into());
        }

        Ok(Self { name, email })
    }

    /// Whether this party and `other` are the same identity.
    ///
    /// Identity is the contact email; display names are not compared.
    pub fn same_identity(&self, other: &Party) -> bool {
        self.email == other.email
    }
}

/// The acting identity an operation runs under.
///
/// Mutating operations call [`AuthContext::require`] and fail with an
/// `UNAUTHENTICATED` error when no party is signed in.
#[derive(Debug, Clone)]
pub enum AuthContext {
    /// A signed-in party
    Member(Party),

    /// No identity (browsing/read-only access)
    Anonymous,
}

impl AuthContext {
    /// Context for a signed-in party
    pub fn member(party: Party) -> Self {
        AuthContext::Member(party)
    }

    /// Get the acting party if one is signed in
    pub fn party(&self) -> Option<&Party> {
        match self {
            AuthContext::Member(party) => Some(party),
            AuthContext::Anonymous => None,
        }
    }

    /// Get the acting party or fail with an unauthenticated error.
    ///
    /// `operation` names the attempted operation for the error message.
    pub fn require(&self, operation: &'static str) -> MarketResult<&Party> {
        self.party()
            .ok_or_else(|| AccessError::Unauthenticated { operation }.into())
    }
}
