// crates/governance-sdk/src/identifiers.rs
// ============================================================================
// Module: Governance Identifiers
// Description: Resource identifiers and pagination tokens.
// Purpose: Provide strongly typed, serializable identifiers with stable wire forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Identifiers exchanged with the governance framework. A [`ResourceId`] is
//! the pair of resource type and provider key; a [`PageToken`] is the opaque
//! continuation cursor echoed back between paginated calls.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::resource::ResourceType;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Identifier of a syncable resource.
///
/// # Invariants
/// - `resource_type` matches the `id` of a registered [`ResourceType`].
/// - `resource` is the provider-assigned key; no normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId {
    /// Resource type identifier (for example `user`).
    pub resource_type: String,
    /// Provider key of the resource.
    pub resource: String,
}

impl ResourceId {
    /// Creates an identifier for a resource of the given type.
    #[must_use]
    pub fn new(resource_type: &ResourceType, resource: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.id.to_string(),
            resource: resource.into(),
        }
    }

    /// Returns true when the identifier refers to the given resource type.
    #[must_use]
    pub fn is_type(&self, resource_type: &ResourceType) -> bool {
        self.resource_type == resource_type.id
    }

    /// Returns true when either component is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.resource_type.is_empty() || self.resource.is_empty()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource_type, self.resource)
    }
}

/// Opaque continuation token for paginated listings.
///
/// # Invariants
/// - Never empty; an empty provider token means "no further pages" and is
///   represented by the absence of a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageToken(String);

impl PageToken {
    /// Wraps a provider token, returning `None` for the empty token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            return None;
        }
        Some(Self(token))
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
