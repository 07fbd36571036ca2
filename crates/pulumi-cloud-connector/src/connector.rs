// crates/pulumi-cloud-connector/src/connector.rs
// ============================================================================
// Module: Pulumi Cloud Connector
// Description: Connector entry point tying the syncers to one organization.
// Purpose: Construct, validate, and describe the Pulumi Cloud connector.
// Dependencies: governance-sdk, pulumi-cloud-client, pulumi-cloud-config, tracing
// ============================================================================

//! ## Overview
//! [`PulumiConnector`] owns a shared [`PulumiApi`] and the organization name.
//! It holds no other state; every syncer it hands out re-fetches from the
//! provider on each call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use governance_sdk::Connector;
use governance_sdk::ConnectorError;
use governance_sdk::ConnectorMetadata;
use governance_sdk::Resource;
use governance_sdk::ResourceSyncer;
use governance_sdk::ResourceType;
use pulumi_cloud_client::ClientError;
use pulumi_cloud_client::PulumiApi;
use pulumi_cloud_client::PulumiClient;
use pulumi_cloud_config::ConnectorConfig;
use tracing::debug;

use crate::org::OrgSyncer;
use crate::resource_types::ORGANIZATION;
use crate::resource_types::TEAM;
use crate::resource_types::USER;
use crate::team::TeamSyncer;
use crate::user::UserSyncer;

// ============================================================================
// SECTION: Connector
// ============================================================================

/// Display name reported in connector metadata.
pub const CONNECTOR_DISPLAY_NAME: &str = "Pulumi Cloud";

/// Pulumi Cloud identity-governance connector.
pub struct PulumiConnector {
    /// Provider API shared by every syncer.
    api: Arc<dyn PulumiApi>,
    /// Organization name.
    org_name: String,
}

impl PulumiConnector {
    /// Creates a connector over an API client for one organization.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Config`] when the organization name is empty.
    pub fn new(
        api: Arc<dyn PulumiApi>,
        org_name: impl Into<String>,
    ) -> Result<Self, ConnectorError> {
        let org_name = org_name.into();
        if org_name.trim().is_empty() {
            return Err(ConnectorError::Config("organization name is required".to_string()));
        }
        Ok(Self {
            api,
            org_name,
        })
    }

    /// Creates a connector backed by the HTTP client described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Config`] when the client cannot be built or
    /// the organization name is empty.
    pub fn from_config(config: &ConnectorConfig) -> Result<Self, ConnectorError> {
        let client = PulumiClient::new(&config.access_token, config.client_config())
            .map_err(|err| ConnectorError::Config(err.to_string()))?;
        debug!(base_url = client.base_url().as_str(), "built pulumi cloud client");
        Self::new(Arc::new(client), config.org_name.clone())
    }

    /// Returns the organization name.
    #[must_use]
    pub fn org_name(&self) -> &str {
        &self.org_name
    }
}

impl Connector for PulumiConnector {
    fn metadata(&self) -> ConnectorMetadata {
        ConnectorMetadata {
            display_name: CONNECTOR_DISPLAY_NAME.to_string(),
            description: Some(
                "Syncs Pulumi Cloud organization roles, teams, and users".to_string(),
            ),
        }
    }

    fn validate(&self) -> Result<(), ConnectorError> {
        self.api.list_members(&self.org_name, None).map_err(|err| {
            ConnectorError::Upstream(format!("failed to validate credentials: {err}"))
        })?;
        Ok(())
    }

    fn resource_types(&self) -> Vec<&'static ResourceType> {
        vec![&ORGANIZATION, &USER, &TEAM]
    }

    fn resource_syncers(&self) -> Vec<Box<dyn ResourceSyncer>> {
        vec![
            Box::new(OrgSyncer::new(Arc::clone(&self.api), self.org_name.clone())),
            Box::new(UserSyncer::new(Arc::clone(&self.api), self.org_name.clone())),
            Box::new(TeamSyncer::new(Arc::clone(&self.api), self.org_name.clone())),
        ]
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Wraps a provider client failure.
pub(crate) fn upstream(err: ClientError) -> ConnectorError {
    ConnectorError::Upstream(err.to_string())
}

/// Returns the login of a user principal.
///
/// # Errors
///
/// Returns [`ConnectorError::Validation`] when the principal is not a user or
/// has an empty key.
pub(crate) fn require_user_principal(principal: &Resource) -> Result<&str, ConnectorError> {
    if !principal.id.is_type(&USER) {
        return Err(ConnectorError::Validation(format!(
            "principal must be a user, got {}",
            principal.id.resource_type
        )));
    }
    if principal.id.resource.is_empty() {
        return Err(ConnectorError::Validation("principal has no login".to_string()));
    }
    Ok(&principal.id.resource)
}
