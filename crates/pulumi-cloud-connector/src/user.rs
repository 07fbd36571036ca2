// crates/pulumi-cloud-connector/src/user.rs
// ============================================================================
// Module: User Syncer
// Description: User resources built from the organization member listing.
// Purpose: Expose organization members as leaf principals.
// Dependencies: governance-sdk, pulumi-cloud-client, tracing
// ============================================================================

//! ## Overview
//! Users are principals only: they own no entitlements and carry no grants.
//! Roles and team memberships are expressed on the organization and team
//! resources instead.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use governance_sdk::ConnectorError;
use governance_sdk::Entitlement;
use governance_sdk::Grant;
use governance_sdk::Page;
use governance_sdk::PageToken;
use governance_sdk::Resource;
use governance_sdk::ResourceId;
use governance_sdk::ResourceSyncer;
use governance_sdk::ResourceType;
use pulumi_cloud_client::PulumiApi;
use tracing::debug;

use crate::connector::upstream;
use crate::mappers::user_resource;
use crate::resource_types::USER;

// ============================================================================
// SECTION: Syncer
// ============================================================================

/// Syncs the members of the configured organization as users.
pub struct UserSyncer {
    /// Provider API.
    api: Arc<dyn PulumiApi>,
    /// Organization name.
    org_name: String,
}

impl UserSyncer {
    /// Creates a user syncer.
    #[must_use]
    pub fn new(api: Arc<dyn PulumiApi>, org_name: impl Into<String>) -> Self {
        Self {
            api,
            org_name: org_name.into(),
        }
    }
}

impl ResourceSyncer for UserSyncer {
    fn resource_type(&self) -> &'static ResourceType {
        &USER
    }

    fn list(
        &self,
        _parent: Option<&ResourceId>,
        token: Option<&PageToken>,
    ) -> Result<Page<Resource>, ConnectorError> {
        let page = self
            .api
            .list_members(&self.org_name, token.map(PageToken::as_str))
            .map_err(upstream)?;
        debug!(
            org = self.org_name.as_str(),
            members = page.members.len(),
            more = page.next_token().is_some(),
            "listed users"
        );
        let users = page
            .members
            .iter()
            .map(|member| user_resource(member, &self.org_name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::with_token(users, page.next_token().unwrap_or_default()))
    }

    fn entitlements(
        &self,
        _resource: &Resource,
        _token: Option<&PageToken>,
    ) -> Result<Page<Entitlement>, ConnectorError> {
        Ok(Page::empty())
    }

    fn grants(
        &self,
        _resource: &Resource,
        _token: Option<&PageToken>,
    ) -> Result<Page<Grant>, ConnectorError> {
        Ok(Page::empty())
    }
}
