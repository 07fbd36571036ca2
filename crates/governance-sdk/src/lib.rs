// crates/governance-sdk/src/lib.rs
// ============================================================================
// Module: Governance SDK Library
// Description: Public API surface for the governance framework contract.
// Purpose: Expose resource, entitlement, and grant types plus connector traits.
// Dependencies: crate::{entitlement, grant, identifiers, interfaces, lookup, pagination, resource, snapshot}
// ============================================================================

//! ## Overview
//! The governance SDK defines the standardized resource/entitlement/grant
//! model and the contract a connector implements: per-resource-type syncers
//! for List, Entitlements, and Grants, plus optional Grant/Revoke
//! provisioning. It owns no transport and no state.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod entitlement;
pub mod grant;
pub mod identifiers;
pub mod interfaces;
pub mod lookup;
pub mod pagination;
pub mod resource;
pub mod snapshot;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use entitlement::Entitlement;
pub use entitlement::EntitlementPurpose;
pub use entitlement::entitlement_id;
pub use entitlement::format_resource_id;
pub use grant::Grant;
pub use identifiers::PageToken;
pub use identifiers::ResourceId;
pub use interfaces::Connector;
pub use interfaces::ConnectorError;
pub use interfaces::ConnectorMetadata;
pub use interfaces::ResourceProvisioner;
pub use interfaces::ResourceSyncer;
pub use pagination::Page;
pub use pagination::collect_pages;
pub use resource::AccountType;
pub use resource::GroupTrait;
pub use resource::Profile;
pub use resource::Resource;
pub use resource::ResourceKind;
pub use resource::ResourceTrait;
pub use resource::ResourceType;
pub use resource::UserStatus;
pub use resource::UserTrait;
pub use snapshot::SyncSnapshot;
pub use snapshot::collect_snapshot;
