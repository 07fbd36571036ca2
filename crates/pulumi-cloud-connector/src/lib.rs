// crates/pulumi-cloud-connector/src/lib.rs
// ============================================================================
// Module: Pulumi Cloud Connector Library
// Description: Identity-governance connector for Pulumi Cloud organizations.
// Purpose: Map organizations, teams, and users into resources, entitlements, and grants.
// Dependencies: governance-sdk, pulumi-cloud-client, pulumi-cloud-config
// ============================================================================

//! ## Overview
//! The connector exposes three resource types. The organization offers the
//! `member` and `admin` roles, each team offers `member`, and users are the
//! principals holding them. Grant and revoke translate back into role
//! updates, member removal, and team membership changes. Nothing is cached.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod connector;
pub mod mappers;
pub mod org;
pub mod resource_types;
pub mod team;
pub mod user;

#[cfg(test)]
mod testing;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use connector::CONNECTOR_DISPLAY_NAME;
pub use connector::PulumiConnector;
pub use mappers::TeamProfile;
pub use mappers::UserProfile;
pub use org::OrgSyncer;
pub use resource_types::ADMIN_SLUG;
pub use resource_types::MEMBER_SLUG;
pub use resource_types::ORGANIZATION;
pub use resource_types::TEAM;
pub use resource_types::USER;
pub use resource_types::org_grant_id;
pub use team::TeamSyncer;
pub use user::UserSyncer;
