// crates/pulumi-cloud-connector/src/resource_types.rs
// ============================================================================
// Module: Pulumi Cloud Resource Types
// Description: Resource type descriptors and identifier shapes.
// Purpose: Define the organization, team, and user types plus entitlement slugs.
// Dependencies: governance-sdk
// ============================================================================

//! ## Overview
//! Descriptors are immutable statics shared by every syncer. Organization
//! grant identifiers have a fixed shape so provisioning can recognize the
//! grants the organization syncer emits.

// ============================================================================
// SECTION: Imports
// ============================================================================

use governance_sdk::ResourceTrait;
use governance_sdk::ResourceType;
use governance_sdk::format_resource_id;

// ============================================================================
// SECTION: Descriptors
// ============================================================================

/// Pulumi Cloud user; the only principal type.
pub static USER: ResourceType = ResourceType {
    id: "user",
    display_name: "User",
    description: "Pulumi user",
    traits: &[ResourceTrait::User],
};

/// Pulumi Cloud team.
pub static TEAM: ResourceType = ResourceType {
    id: "team",
    display_name: "Team",
    description: "Pulumi team",
    traits: &[ResourceTrait::Group],
};

/// Pulumi Cloud organization.
pub static ORGANIZATION: ResourceType = ResourceType {
    id: "organization",
    display_name: "Organization",
    description: "Pulumi organization",
    traits: &[],
};

// ============================================================================
// SECTION: Slugs
// ============================================================================

/// Organization and team membership entitlement.
pub const MEMBER_SLUG: &str = "member";
/// Organization administrator entitlement.
pub const ADMIN_SLUG: &str = "admin";

/// Returns the identifier of an organization grant.
///
/// Shape: `org:{org}:grant:{login}:{slug}`.
#[must_use]
pub fn org_grant_id(org_name: &str, login: &str, slug: &str) -> String {
    format_resource_id(&["org", org_name, "grant", login, slug])
}
