// crates/governance-sdk/src/snapshot.rs
// ============================================================================
// Module: Governance Snapshot
// Description: One-shot pass over every syncer of a connector.
// Purpose: Materialize resources, entitlements, and grants for inspection.
// Dependencies: crate::{interfaces, pagination}, serde
// ============================================================================

//! ## Overview
//! [`collect_snapshot`] runs List for every syncer, then Entitlements and
//! Grants for every listed resource, each walked to completion. The pass is
//! sequential, fails on the first error, and keeps nothing after returning.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::entitlement::Entitlement;
use crate::grant::Grant;
use crate::interfaces::Connector;
use crate::interfaces::ConnectorError;
use crate::interfaces::ConnectorMetadata;
use crate::pagination::collect_pages;
use crate::resource::Resource;
use crate::resource::ResourceType;

// ============================================================================
// SECTION: Snapshot
// ============================================================================

/// Materialized view of a connector's resources at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncSnapshot {
    /// Connector metadata.
    pub metadata: ConnectorMetadata,
    /// Resource types exposed by the connector.
    pub resource_types: Vec<&'static ResourceType>,
    /// Listed resources in syncer order.
    pub resources: Vec<Resource>,
    /// Entitlements offered by listed resources.
    pub entitlements: Vec<Entitlement>,
    /// Grants currently in effect.
    pub grants: Vec<Grant>,
}

/// Collects a snapshot of every resource, entitlement, and grant.
///
/// # Errors
///
/// Returns the first [`ConnectorError`] raised by any syncer call.
pub fn collect_snapshot(connector: &dyn Connector) -> Result<SyncSnapshot, ConnectorError> {
    let mut snapshot = SyncSnapshot {
        metadata: connector.metadata(),
        resource_types: connector.resource_types(),
        resources: Vec::new(),
        entitlements: Vec::new(),
        grants: Vec::new(),
    };
    for syncer in connector.resource_syncers() {
        let resources = collect_pages(|token| syncer.list(None, token))?;
        for resource in &resources {
            snapshot
                .entitlements
                .extend(collect_pages(|token| syncer.entitlements(resource, token))?);
            snapshot.grants.extend(collect_pages(|token| syncer.grants(resource, token))?);
        }
        snapshot.resources.extend(resources);
    }
    Ok(snapshot)
}
