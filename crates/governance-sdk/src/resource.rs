// crates/governance-sdk/src/resource.rs
// ============================================================================
// Module: Governance Resources
// Description: Resource-type descriptors and syncable resource records.
// Purpose: Model organizations, groups, and users in a connector-agnostic form.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`ResourceType`] is a process-wide immutable descriptor declared as a
//! `static` by each connector. A [`Resource`] is a view over provider state:
//! it is rebuilt on every listing and never mutated by the framework.
//! User and group resources carry trait data; the profile object is built by
//! the connector from typed fields.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::identifiers::ResourceId;

/// Loosely typed profile object attached to user and group resources.
pub type Profile = Map<String, Value>;

// ============================================================================
// SECTION: Resource Types
// ============================================================================

/// Capability tag attached to a resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceTrait {
    /// Resource is a principal that can receive grants.
    User,
    /// Resource groups other principals.
    Group,
    /// Resource represents a role.
    Role,
    /// Resource represents an application.
    App,
}

/// Descriptor for a class of syncable resources.
///
/// # Invariants
/// - Declared as `static`; never mutated after initialization.
/// - `id` is unique within a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceType {
    /// Stable identifier used in resource IDs.
    pub id: &'static str,
    /// Human-readable name.
    pub display_name: &'static str,
    /// Short description.
    pub description: &'static str,
    /// Capability tags.
    pub traits: &'static [ResourceTrait],
}

impl ResourceType {
    /// Returns true when the descriptor carries the given trait.
    #[must_use]
    pub fn has_trait(&self, resource_trait: ResourceTrait) -> bool {
        self.traits.contains(&resource_trait)
    }
}

// ============================================================================
// SECTION: Trait Data
// ============================================================================

/// Account status reported for user resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// Status not reported.
    #[default]
    Unspecified,
    /// Account is active.
    Enabled,
    /// Account is disabled.
    Disabled,
    /// Account is deleted.
    Deleted,
}

/// Account classification reported for user resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Type not reported.
    #[default]
    Unspecified,
    /// Interactive human account.
    Human,
    /// Service or machine account.
    Service,
    /// System-managed account.
    System,
}

/// Trait data for user resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTrait {
    /// Login of the account.
    pub login: String,
    /// Account status.
    pub status: UserStatus,
    /// Account type.
    pub account_type: AccountType,
    /// Profile fields.
    #[serde(default)]
    pub profile: Profile,
}

/// Trait data for group resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTrait {
    /// Profile fields.
    #[serde(default)]
    pub profile: Profile,
}

/// Trait-specific data of a resource.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceKind {
    /// Resource without trait data, also used for bare principal references.
    #[default]
    Plain,
    /// User resource.
    User(UserTrait),
    /// Group resource.
    Group(GroupTrait),
}

// ============================================================================
// SECTION: Resource
// ============================================================================

/// A syncable entity exposed to the governance framework.
///
/// # Invariants
/// - `id` is non-empty for resources produced by a connector.
/// - `parent_resource_id`, when set, refers to a resource listed by the same connector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource identifier.
    pub id: ResourceId,
    /// Human-readable name.
    pub display_name: String,
    /// Optional parent resource.
    #[serde(default)]
    pub parent_resource_id: Option<ResourceId>,
    /// Trait-specific data.
    #[serde(default)]
    pub kind: ResourceKind,
}

impl Resource {
    /// Creates a plain resource of the given type.
    #[must_use]
    pub fn new(
        display_name: impl Into<String>,
        resource_type: &ResourceType,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            id: ResourceId::new(resource_type, resource),
            display_name: display_name.into(),
            parent_resource_id: None,
            kind: ResourceKind::Plain,
        }
    }

    /// Creates a user resource.
    #[must_use]
    pub fn user(
        display_name: impl Into<String>,
        resource_type: &ResourceType,
        resource: impl Into<String>,
        user: UserTrait,
    ) -> Self {
        Self {
            kind: ResourceKind::User(user),
            ..Self::new(display_name, resource_type, resource)
        }
    }

    /// Creates a group resource.
    #[must_use]
    pub fn group(
        display_name: impl Into<String>,
        resource_type: &ResourceType,
        resource: impl Into<String>,
        group: GroupTrait,
    ) -> Self {
        Self {
            kind: ResourceKind::Group(group),
            ..Self::new(display_name, resource_type, resource)
        }
    }

    /// Creates a bare reference to a resource known only by its identifier.
    #[must_use]
    pub fn reference(id: ResourceId) -> Self {
        Self {
            id,
            display_name: String::new(),
            parent_resource_id: None,
            kind: ResourceKind::Plain,
        }
    }

    /// Sets the parent resource.
    #[must_use]
    pub fn with_parent(mut self, parent: ResourceId) -> Self {
        self.parent_resource_id = Some(parent);
        self
    }

    /// Returns the user trait data when this is a user resource.
    #[must_use]
    pub const fn user_trait(&self) -> Option<&UserTrait> {
        match &self.kind {
            ResourceKind::User(user) => Some(user),
            _ => None,
        }
    }

    /// Returns the group trait data when this is a group resource.
    #[must_use]
    pub const fn group_trait(&self) -> Option<&GroupTrait> {
        match &self.kind {
            ResourceKind::Group(group) => Some(group),
            _ => None,
        }
    }
}
