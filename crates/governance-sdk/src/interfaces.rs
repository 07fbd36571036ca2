// crates/governance-sdk/src/interfaces.rs
// ============================================================================
// Module: Governance Interfaces
// Description: Contract surfaces implemented by connectors.
// Purpose: Define List/Entitlements/Grants and Grant/Revoke operations.
// Dependencies: crate::{entitlement, grant, pagination, resource}, thiserror
// ============================================================================

//! ## Overview
//! A connector exposes one [`ResourceSyncer`] per resource type. The
//! orchestrator holds them as trait objects and drives three cycles (List,
//! Entitlements, Grants); syncers that support provisioning also expose a
//! [`ResourceProvisioner`]. Connectors hold no mutable state between calls,
//! so every trait here is `Send + Sync`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use thiserror::Error;

use crate::entitlement::Entitlement;
use crate::grant::Grant;
use crate::identifiers::PageToken;
use crate::identifiers::ResourceId;
use crate::pagination::Page;
use crate::resource::Resource;
use crate::resource::ResourceType;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Connector errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Every error aborts the current operation; no partial results accompany it.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Connector configuration is missing or invalid.
    #[error("invalid connector configuration: {0}")]
    Config(String),
    /// Provider call failed in transport or decoding.
    #[error("{0}")]
    Upstream(String),
    /// Malformed argument passed into an operation.
    #[error("invalid request: {0}")]
    Validation(String),
    /// Entitlement identifier not manufactured by this connector.
    #[error("unknown entitlement ID: {0}")]
    UnknownEntitlement(String),
    /// Grant identifier not manufactured by this connector.
    #[error("unknown grant ID: {0}")]
    UnknownGrant(String),
    /// Provider data could not be mapped into a resource.
    #[error("resource mapping failed: {0}")]
    Mapping(String),
    /// Pagination did not terminate.
    #[error("pagination error: {0}")]
    Pagination(String),
    /// Requested resource, entitlement, or grant does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

// ============================================================================
// SECTION: Syncer Contract
// ============================================================================

/// Enumerates resources of one type together with their entitlements and grants.
pub trait ResourceSyncer: Send + Sync {
    /// Returns the resource type this syncer handles.
    fn resource_type(&self) -> &'static ResourceType;

    /// Lists resources of this type.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError`] when the provider call or mapping fails.
    fn list(
        &self,
        parent: Option<&ResourceId>,
        token: Option<&PageToken>,
    ) -> Result<Page<Resource>, ConnectorError>;

    /// Lists entitlement definitions offered by a resource.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError`] when entitlements cannot be built.
    fn entitlements(
        &self,
        resource: &Resource,
        token: Option<&PageToken>,
    ) -> Result<Page<Entitlement>, ConnectorError>;

    /// Lists grants currently in effect on a resource.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError`] when the provider call or mapping fails.
    fn grants(
        &self,
        resource: &Resource,
        token: Option<&PageToken>,
    ) -> Result<Page<Grant>, ConnectorError>;

    /// Returns the provisioning handler, when the resource type supports it.
    fn provisioner(&self) -> Option<&dyn ResourceProvisioner> {
        None
    }
}

/// Applies grant and revoke mutations against the provider.
pub trait ResourceProvisioner: Send + Sync {
    /// Grants an entitlement to a principal.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError`] when arguments are invalid or the provider call fails.
    fn grant(
        &self,
        principal: &Resource,
        entitlement: &Entitlement,
    ) -> Result<Vec<Grant>, ConnectorError>;

    /// Revokes a grant.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError`] when arguments are invalid or the provider call fails.
    fn revoke(&self, grant: &Grant) -> Result<(), ConnectorError>;
}

// ============================================================================
// SECTION: Connector Contract
// ============================================================================

/// Static connector metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectorMetadata {
    /// Display name shown by the framework.
    pub display_name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Connector entry point consumed by the orchestrator.
pub trait Connector: Send + Sync {
    /// Returns static metadata.
    fn metadata(&self) -> ConnectorMetadata;

    /// Performs a lightweight read to confirm credentials are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError`] when the provider rejects the call.
    fn validate(&self) -> Result<(), ConnectorError>;

    /// Returns the resource types this connector exposes.
    fn resource_types(&self) -> Vec<&'static ResourceType>;

    /// Returns one syncer per resource type.
    fn resource_syncers(&self) -> Vec<Box<dyn ResourceSyncer>>;
}
