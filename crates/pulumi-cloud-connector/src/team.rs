// crates/pulumi-cloud-connector/src/team.rs
// ============================================================================
// Module: Team Syncer
// Description: Team resources, membership entitlement, and membership grants.
// Purpose: Sync team membership and provision membership changes.
// Dependencies: governance-sdk, pulumi-cloud-client, tracing
// ============================================================================

//! ## Overview
//! Teams are listed in one unpaginated call and each offers a single
//! `member` entitlement. Membership grants use the framework's default grant
//! identifier rather than a connector-specific shape, so revoke works from
//! the grant's principal and entitlement resource, not from its identifier.

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
use governance_sdk::ResourceProvisioner;
use governance_sdk::ResourceSyncer;
use governance_sdk::ResourceType;
use pulumi_cloud_client::MemberAction;
use pulumi_cloud_client::PulumiApi;
use tracing::debug;
use tracing::info;

use crate::connector::require_user_principal;
use crate::connector::upstream;
use crate::mappers::team_resource;
use crate::resource_types::MEMBER_SLUG;
use crate::resource_types::TEAM;
use crate::resource_types::USER;

// ============================================================================
// SECTION: Syncer
// ============================================================================

/// Syncs the teams of the configured organization.
pub struct TeamSyncer {
    /// Provider API.
    api: Arc<dyn PulumiApi>,
    /// Organization name.
    org_name: String,
}

impl TeamSyncer {
    /// Creates a team syncer.
    #[must_use]
    pub fn new(api: Arc<dyn PulumiApi>, org_name: impl Into<String>) -> Self {
        Self {
            api,
            org_name: org_name.into(),
        }
    }

    /// Applies a membership change for `login` on `team_name`.
    fn update_membership(
        &self,
        team_name: &str,
        login: &str,
        action: MemberAction,
    ) -> Result<(), ConnectorError> {
        self.api
            .update_team_membership(&self.org_name, team_name, login, action)
            .map_err(upstream)?;
        info!(
            org = self.org_name.as_str(),
            team = team_name,
            login,
            action = action.as_str(),
            "updated team membership"
        );
        Ok(())
    }
}

/// Returns the team name an entitlement belongs to.
fn entitlement_team(entitlement: &Entitlement) -> Result<&str, ConnectorError> {
    let resource = entitlement.resource_id().ok_or_else(|| {
        ConnectorError::Validation("entitlement does not reference a team".to_string())
    })?;
    if !resource.is_type(&TEAM) || resource.resource.is_empty() {
        return Err(ConnectorError::Validation(format!(
            "entitlement resource must be a team, got {resource}"
        )));
    }
    Ok(&resource.resource)
}

impl ResourceSyncer for TeamSyncer {
    fn resource_type(&self) -> &'static ResourceType {
        &TEAM
    }

    fn list(
        &self,
        parent: Option<&ResourceId>,
        _token: Option<&PageToken>,
    ) -> Result<Page<Resource>, ConnectorError> {
        let org_name = parent.map_or(self.org_name.as_str(), |org| org.resource.as_str());
        let teams = self.api.list_teams(org_name).map_err(upstream)?;
        debug!(org = org_name, teams = teams.len(), "listed teams");
        let resources = teams
            .iter()
            .map(|team| team_resource(team, org_name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::last(resources))
    }

    fn entitlements(
        &self,
        resource: &Resource,
        _token: Option<&PageToken>,
    ) -> Result<Page<Entitlement>, ConnectorError> {
        Ok(Page::last(vec![member_entitlement(resource)]))
    }

    fn grants(
        &self,
        resource: &Resource,
        _token: Option<&PageToken>,
    ) -> Result<Page<Grant>, ConnectorError> {
        let team = self.api.get_team(&self.org_name, &resource.id.resource).map_err(upstream)?;
        let membership = member_entitlement(resource);
        let mut grants = Vec::with_capacity(team.members.len());
        for member in &team.members {
            if member.github_login.is_empty() {
                return Err(ConnectorError::Mapping(format!(
                    "member of team {} has no login",
                    team.name
                )));
            }
            let display_name =
                if member.name.is_empty() { &member.github_login } else { &member.name };
            let principal = ResourceId::new(&USER, member.github_login.clone());
            grants.push(
                Grant::of(&membership, principal)
                    .with_principal_display_name(display_name.clone()),
            );
        }
        Ok(Page::last(grants))
    }

    fn provisioner(&self) -> Option<&dyn ResourceProvisioner> {
        Some(self)
    }
}

/// Builds the team `member` entitlement.
fn member_entitlement(team: &Resource) -> Entitlement {
    Entitlement::assignment(team, MEMBER_SLUG)
        .grantable_to(&USER)
        .with_display_name("Member")
        .with_description("Member of the team")
}

// ============================================================================
// SECTION: Provisioning
// ============================================================================

impl ResourceProvisioner for TeamSyncer {
    fn grant(
        &self,
        principal: &Resource,
        entitlement: &Entitlement,
    ) -> Result<Vec<Grant>, ConnectorError> {
        let login = require_user_principal(principal)?;
        let team_name = entitlement_team(entitlement)?;
        if entitlement.slug != MEMBER_SLUG {
            return Err(ConnectorError::UnknownEntitlement(entitlement.id.clone()));
        }
        self.update_membership(team_name, login, MemberAction::Add)?;
        let team = entitlement
            .resource
            .clone()
            .unwrap_or_else(|| Resource::reference(ResourceId::new(&TEAM, team_name)));
        Ok(vec![
            Grant::of(&member_entitlement(&team), principal.id.clone())
                .with_principal_display_name(principal.display_name.clone()),
        ])
    }

    // The principal type is not checked here; any principal key is sent as the login.
    fn revoke(&self, grant: &Grant) -> Result<(), ConnectorError> {
        let login = grant.principal.id.resource.as_str();
        if login.is_empty() {
            return Err(ConnectorError::Validation("grant has no principal".to_string()));
        }
        let team_name = entitlement_team(&grant.entitlement)?;
        self.update_membership(team_name, login, MemberAction::Remove)
    }
}
