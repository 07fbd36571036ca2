// crates/governance-sdk/src/grant.rs
// ============================================================================
// Module: Governance Grants
// Description: Materialized principal-to-entitlement edges.
// Purpose: Build grants with the framework's default identifier scheme.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`Grant`] records that a principal currently holds an entitlement on a
//! resource. [`Grant::of`] embeds the full entitlement and [`Grant::new`] a
//! bare reference; both assign the default identifier
//! `"{entitlement_id}:{principal_type}:{principal}"`, which connectors may
//! replace with their own reconstructible form.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::entitlement::Entitlement;
use crate::entitlement::format_resource_id;
use crate::identifiers::ResourceId;
use crate::resource::Resource;

// ============================================================================
// SECTION: Grant
// ============================================================================

/// A principal's hold on an entitlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    /// Grant identifier.
    pub id: String,
    /// Entitlement held.
    pub entitlement: Entitlement,
    /// Principal holding the entitlement.
    pub principal: Resource,
}

impl Grant {
    /// Creates a grant of `entitlement` to `principal`.
    #[must_use]
    pub fn of(entitlement: &Entitlement, principal: ResourceId) -> Self {
        Self {
            id: default_grant_id(&entitlement.id, &principal),
            entitlement: entitlement.clone(),
            principal: Resource::reference(principal),
        }
    }

    /// Creates a grant of `slug` on `resource` to `principal`.
    ///
    /// The entitlement is a reference carrying only identity fields.
    #[must_use]
    pub fn new(resource: &Resource, slug: &str, principal: ResourceId) -> Self {
        Self::of(&Entitlement::reference(resource, slug), principal)
    }

    /// Replaces the grant identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the principal display name.
    #[must_use]
    pub fn with_principal_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.principal.display_name = display_name.into();
        self
    }
}

/// Returns the framework's default grant identifier.
#[must_use]
pub fn default_grant_id(entitlement_id: &str, principal: &ResourceId) -> String {
    format_resource_id(&[entitlement_id, &principal.resource_type, &principal.resource])
}
