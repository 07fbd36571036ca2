// crates/governance-sdk/src/entitlement.rs
// ============================================================================
// Module: Governance Entitlements
// Description: Entitlement definitions offered by resources.
// Purpose: Build entitlements with deterministic identifiers.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! An [`Entitlement`] is a named capability a resource can grant to a
//! principal. Its identity is `(resource_type, resource, slug)` and its
//! default identifier is the colon-joined form produced by [`entitlement_id`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::identifiers::ResourceId;
use crate::resource::Resource;
use crate::resource::ResourceType;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Joins identifier parts with `:`.
#[must_use]
pub fn format_resource_id(parts: &[&str]) -> String {
    parts.join(":")
}

/// Returns the canonical entitlement identifier for a resource and slug.
#[must_use]
pub fn entitlement_id(resource: &ResourceId, slug: &str) -> String {
    format_resource_id(&[&resource.resource_type, &resource.resource, slug])
}

// ============================================================================
// SECTION: Entitlement
// ============================================================================

/// Kind of capability an entitlement represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitlementPurpose {
    /// Membership-style assignment.
    Assignment,
    /// Elevated permission.
    Permission,
}

/// Capability offered by a resource.
///
/// # Invariants
/// - `id` equals [`entitlement_id`] of the owning resource and `slug` for
///   entitlements built by this module.
/// - `grantable_to` lists resource type identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entitlement {
    /// Entitlement identifier.
    pub id: String,
    /// Owning resource; absent when the caller only knows the identifier.
    #[serde(default)]
    pub resource: Option<Resource>,
    /// Short stable name (for example `member`).
    pub slug: String,
    /// Human-readable name.
    #[serde(default)]
    pub display_name: String,
    /// Description of the capability.
    #[serde(default)]
    pub description: String,
    /// Capability kind; absent on bare references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<EntitlementPurpose>,
    /// Resource type identifiers that may receive this entitlement.
    #[serde(default)]
    pub grantable_to: Vec<String>,
}

impl Entitlement {
    /// Creates an entitlement for a resource.
    #[must_use]
    pub fn new(resource: &Resource, slug: &str, purpose: EntitlementPurpose) -> Self {
        Self {
            id: entitlement_id(&resource.id, slug),
            resource: Some(resource.clone()),
            slug: slug.to_string(),
            display_name: slug.to_string(),
            description: String::new(),
            purpose: Some(purpose),
            grantable_to: Vec::new(),
        }
    }

    /// Creates a reference carrying only identity fields.
    #[must_use]
    pub fn reference(resource: &Resource, slug: &str) -> Self {
        Self {
            id: entitlement_id(&resource.id, slug),
            resource: Some(resource.clone()),
            slug: slug.to_string(),
            display_name: String::new(),
            description: String::new(),
            purpose: None,
            grantable_to: Vec::new(),
        }
    }

    /// Creates an assignment entitlement.
    #[must_use]
    pub fn assignment(resource: &Resource, slug: &str) -> Self {
        Self::new(resource, slug, EntitlementPurpose::Assignment)
    }

    /// Creates a permission entitlement.
    #[must_use]
    pub fn permission(resource: &Resource, slug: &str) -> Self {
        Self::new(resource, slug, EntitlementPurpose::Permission)
    }

    /// Adds a resource type allowed to receive the entitlement.
    #[must_use]
    pub fn grantable_to(mut self, resource_type: &ResourceType) -> Self {
        self.grantable_to.push(resource_type.id.to_string());
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns the owning resource identifier, if known.
    #[must_use]
    pub fn resource_id(&self) -> Option<&ResourceId> {
        self.resource.as_ref().map(|resource| &resource.id)
    }
}
