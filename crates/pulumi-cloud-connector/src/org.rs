// crates/pulumi-cloud-connector/src/org.rs
// ============================================================================
// Module: Organization Syncer
// Description: Organization resource, role entitlements, and role grants.
// Purpose: Sync organization roles and provision role changes.
// Dependencies: governance-sdk, pulumi-cloud-client, tracing
// ============================================================================

//! ## Overview
//! The organization is a singleton resource offering `member` (assignment)
//! and `admin` (permission). Each organization member holds exactly one of
//! them, chosen by the reported role.
//! Invariants:
//! - Grant identifiers use [`org_grant_id`] so revoke can recognize them.
//! - Revoking `admin` demotes to member; revoking `member` removes the user
//!   from the organization.
//! - Principal and identifier checks run before any provider call.

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
use governance_sdk::entitlement_id;
use pulumi_cloud_client::OrgRole;
use pulumi_cloud_client::PulumiApi;
use tracing::debug;
use tracing::info;

use crate::connector::require_user_principal;
use crate::connector::upstream;
use crate::mappers::org_resource;
use crate::mappers::org_resource_id;
use crate::resource_types::ADMIN_SLUG;
use crate::resource_types::MEMBER_SLUG;
use crate::resource_types::ORGANIZATION;
use crate::resource_types::USER;
use crate::resource_types::org_grant_id;

// ============================================================================
// SECTION: Syncer
// ============================================================================

/// Syncs the configured organization.
pub struct OrgSyncer {
    /// Provider API.
    api: Arc<dyn PulumiApi>,
    /// Organization name.
    org_name: String,
}

impl OrgSyncer {
    /// Creates an organization syncer.
    #[must_use]
    pub fn new(api: Arc<dyn PulumiApi>, org_name: impl Into<String>) -> Self {
        Self {
            api,
            org_name: org_name.into(),
        }
    }

    /// Resolves an entitlement identifier to the role it grants.
    fn role_for_entitlement(&self, entitlement: &Entitlement) -> Result<OrgRole, ConnectorError> {
        let org_id = org_resource_id(&self.org_name);
        if entitlement.id == entitlement_id(&org_id, ADMIN_SLUG) {
            Ok(OrgRole::Admin)
        } else if entitlement.id == entitlement_id(&org_id, MEMBER_SLUG) {
            Ok(OrgRole::Member)
        } else {
            Err(ConnectorError::UnknownEntitlement(entitlement.id.clone()))
        }
    }
}

impl ResourceSyncer for OrgSyncer {
    fn resource_type(&self) -> &'static ResourceType {
        &ORGANIZATION
    }

    fn list(
        &self,
        _parent: Option<&ResourceId>,
        _token: Option<&PageToken>,
    ) -> Result<Page<Resource>, ConnectorError> {
        Ok(Page::last(vec![org_resource(&self.org_name)]))
    }

    fn entitlements(
        &self,
        resource: &Resource,
        _token: Option<&PageToken>,
    ) -> Result<Page<Entitlement>, ConnectorError> {
        Ok(Page::last(vec![member_entitlement(resource), admin_entitlement(resource)]))
    }

    fn grants(
        &self,
        _resource: &Resource,
        token: Option<&PageToken>,
    ) -> Result<Page<Grant>, ConnectorError> {
        let org_name = self.org_name.as_str();
        let page =
            self.api.list_members(org_name, token.map(PageToken::as_str)).map_err(upstream)?;
        debug!(
            org = org_name,
            members = page.members.len(),
            more = page.next_token().is_some(),
            "listed organization members"
        );
        let org = org_resource(org_name);
        let member_role = member_entitlement(&org);
        let admin_role = admin_entitlement(&org);
        let mut grants = Vec::with_capacity(page.members.len());
        for member in &page.members {
            let login = &member.user.github_login;
            if login.is_empty() {
                return Err(ConnectorError::Mapping(
                    "organization member has no login".to_string(),
                ));
            }
            let entitlement = if member.is_admin() { &admin_role } else { &member_role };
            let display_name =
                if member.user.name.is_empty() { login } else { &member.user.name };
            grants.push(
                Grant::of(entitlement, ResourceId::new(&USER, login.clone()))
                    .with_id(org_grant_id(org_name, login, &entitlement.slug))
                    .with_principal_display_name(display_name.clone()),
            );
        }
        Ok(Page::with_token(grants, page.next_token().unwrap_or_default()))
    }

    fn provisioner(&self) -> Option<&dyn ResourceProvisioner> {
        Some(self)
    }
}

/// Builds the organization `member` entitlement.
fn member_entitlement(org: &Resource) -> Entitlement {
    Entitlement::assignment(org, MEMBER_SLUG)
        .grantable_to(&USER)
        .with_display_name("Member")
        .with_description("Member of the Pulumi organization")
}

/// Builds the organization `admin` entitlement.
fn admin_entitlement(org: &Resource) -> Entitlement {
    Entitlement::permission(org, ADMIN_SLUG)
        .grantable_to(&USER)
        .with_display_name("Administrator")
        .with_description("Administrator of the Pulumi organization")
}

// ============================================================================
// SECTION: Provisioning
// ============================================================================

impl ResourceProvisioner for OrgSyncer {
    fn grant(
        &self,
        principal: &Resource,
        entitlement: &Entitlement,
    ) -> Result<Vec<Grant>, ConnectorError> {
        let login = require_user_principal(principal)?;
        let role = self.role_for_entitlement(entitlement)?;
        self.api.update_member_role(&self.org_name, login, role).map_err(upstream)?;
        info!(
            org = self.org_name.as_str(),
            login,
            role = role.as_str(),
            "updated organization member role"
        );
        let org = org_resource(&self.org_name);
        let granted = match role {
            OrgRole::Admin => admin_entitlement(&org),
            OrgRole::Member => member_entitlement(&org),
        };
        Ok(vec![
            Grant::of(&granted, principal.id.clone())
                .with_id(org_grant_id(&self.org_name, login, &granted.slug))
                .with_principal_display_name(principal.display_name.clone()),
        ])
    }

    fn revoke(&self, grant: &Grant) -> Result<(), ConnectorError> {
        let login = require_user_principal(&grant.principal)?;
        if grant.id == org_grant_id(&self.org_name, login, ADMIN_SLUG) {
            self.api
                .update_member_role(&self.org_name, login, OrgRole::Member)
                .map_err(upstream)?;
            info!(
                org = self.org_name.as_str(),
                login, "revoked organization admin; member role retained"
            );
            Ok(())
        } else if grant.id == org_grant_id(&self.org_name, login, MEMBER_SLUG) {
            self.api.remove_member(&self.org_name, login).map_err(upstream)?;
            info!(org = self.org_name.as_str(), login, "removed member from organization");
            Ok(())
        } else {
            Err(ConnectorError::UnknownGrant(grant.id.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use std::sync::Arc;

    use governance_sdk::ConnectorError;
    use governance_sdk::Entitlement;
    use governance_sdk::EntitlementPurpose;
    use governance_sdk::Grant;
    use governance_sdk::Resource;
    use governance_sdk::ResourceId;
    use governance_sdk::ResourceProvisioner;
    use governance_sdk::ResourceSyncer;
    use pulumi_cloud_client::MemberPage;
    use pulumi_cloud_client::OrgRole;

    use super::OrgSyncer;
    use crate::mappers::org_resource;
    use crate::resource_types::TEAM;
    use crate::resource_types::USER;
    use crate::testing::Call;
    use crate::testing::FakeApi;
    use crate::testing::member;

    /// Builds a syncer for org `ACME` over `api`.
    fn syncer(api: &Arc<FakeApi>) -> OrgSyncer {
        OrgSyncer::new(api.clone(), "ACME")
    }

    /// Returns the organization entitlement with `slug`.
    fn entitlement(syncer: &OrgSyncer, slug: &str) -> Entitlement {
        let org = org_resource("ACME");
        syncer
            .entitlements(&org, None)
            .unwrap()
            .items
            .into_iter()
            .find(|entitlement| entitlement.slug == slug)
            .unwrap()
    }

    /// Returns a user principal reference.
    fn user(login: &str) -> Resource {
        Resource::reference(ResourceId::new(&USER, login))
    }

    #[test]
    fn list_returns_single_org_without_provider_calls() {
        let api = Arc::new(FakeApi::default());
        let page = syncer(&api).list(None, None).unwrap();
        assert!(page.is_last());
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id.to_string(), "organization:ACME");
        assert!(api.calls().is_empty());
    }

    #[test]
    fn entitlements_offer_member_assignment_and_admin_permission() {
        let api = Arc::new(FakeApi::default());
        let org = org_resource("ACME");
        let items = syncer(&api).entitlements(&org, None).unwrap().items;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "organization:ACME:member");
        assert_eq!(items[0].purpose, Some(EntitlementPurpose::Assignment));
        assert_eq!(items[0].grantable_to, vec!["user".to_string()]);
        assert_eq!(items[1].id, "organization:ACME:admin");
        assert_eq!(items[1].purpose, Some(EntitlementPurpose::Permission));
        assert_eq!(items[1].grantable_to, vec!["user".to_string()]);
    }

    #[test]
    fn grants_emit_exactly_one_role_per_member() {
        let api = Arc::new(FakeApi::with_members(vec![
            member("alice", "Alice", "admin"),
            member("bob", "", "member"),
            member("carol", "Carol", "billing-manager"),
        ]));
        let org = org_resource("ACME");
        let page = syncer(&api).grants(&org, None).unwrap();
        let ids: Vec<&str> = page.items.iter().map(|grant| grant.id.as_str()).collect();
        assert_eq!(ids, vec![
            "org:ACME:grant:alice:admin",
            "org:ACME:grant:bob:member",
            "org:ACME:grant:carol:member",
        ]);
        assert_eq!(page.items[0].entitlement.id, "organization:ACME:admin");
        assert_eq!(page.items[1].principal.display_name, "bob");
        assert_eq!(page.items[2].principal.id.to_string(), "user:carol");
    }

    #[test]
    fn grants_use_configured_org_regardless_of_resource_key() {
        let api = Arc::new(FakeApi::with_members(vec![member("alice", "Alice", "admin")]));
        let syncer = syncer(&api);
        let grants = syncer.grants(&org_resource("OTHER"), None).unwrap().items;
        assert_eq!(grants[0].id, "org:ACME:grant:alice:admin");
        assert_eq!(grants[0].entitlement.id, "organization:ACME:admin");
        assert_eq!(api.listed_orgs(), vec!["ACME".to_string()]);
        syncer.revoke(&grants[0]).unwrap();
        assert_eq!(api.calls()[1], Call::UpdateMemberRole("alice".to_string(), OrgRole::Member));
    }

    #[test]
    fn grant_entitlements_match_offered_entitlements() {
        let api = Arc::new(FakeApi::with_members(vec![
            member("alice", "Alice", "admin"),
            member("bob", "Bob", "member"),
        ]));
        let syncer = syncer(&api);
        let admin = entitlement(&syncer, "admin");
        let member_role = entitlement(&syncer, "member");
        let listed = syncer.grants(&org_resource("ACME"), None).unwrap().items;
        assert_eq!(listed[0].entitlement, admin);
        assert_eq!(listed[0].entitlement.purpose, Some(EntitlementPurpose::Permission));
        assert_eq!(listed[1].entitlement, member_role);
        let granted = syncer.grant(&user("carol"), &admin).unwrap();
        assert_eq!(granted[0].entitlement, admin);
        let granted = syncer.grant(&user("dave"), &member_role).unwrap();
        assert_eq!(granted[0].entitlement.purpose, Some(EntitlementPurpose::Assignment));
    }

    #[test]
    fn grants_thread_continuation_token() {
        let mut api = FakeApi::default();
        api.member_pages.insert(
            String::new(),
            MemberPage {
                members: vec![member("alice", "Alice", "admin")],
                continuation_token: Some("page-2".to_string()),
            },
        );
        api.member_pages.insert(
            "page-2".to_string(),
            MemberPage {
                members: vec![member("bob", "Bob", "member")],
                continuation_token: Some(String::new()),
            },
        );
        let api = Arc::new(api);
        let syncer = syncer(&api);
        let org = org_resource("ACME");
        let first = syncer.grants(&org, None).unwrap();
        let token = first.next_page_token.clone().unwrap();
        assert_eq!(token.as_str(), "page-2");
        let second = syncer.grants(&org, Some(&token)).unwrap();
        assert!(second.is_last());
        assert_eq!(second.items[0].id, "org:ACME:grant:bob:member");
        assert_eq!(api.calls(), vec![
            Call::ListMembers(None),
            Call::ListMembers(Some("page-2".to_string())),
        ]);
    }

    #[test]
    fn grants_fail_without_partial_results() {
        let api = Arc::new(FakeApi {
            fail_status: Some(500),
            ..FakeApi::default()
        });
        let err = syncer(&api).grants(&org_resource("ACME"), None).unwrap_err();
        assert!(matches!(err, ConnectorError::Upstream(_)));
        assert!(err.to_string().contains("list members"));
    }

    #[test]
    fn grant_sets_role_for_manufactured_entitlements() {
        let api = Arc::new(FakeApi::default());
        let syncer = syncer(&api);
        let grants = syncer.grant(&user("alice"), &entitlement(&syncer, "admin")).unwrap();
        assert_eq!(grants[0].id, "org:ACME:grant:alice:admin");
        syncer.grant(&user("bob"), &entitlement(&syncer, "member")).unwrap();
        assert_eq!(api.calls(), vec![
            Call::UpdateMemberRole("alice".to_string(), OrgRole::Admin),
            Call::UpdateMemberRole("bob".to_string(), OrgRole::Member),
        ]);
    }

    #[test]
    fn grant_rejects_unknown_entitlement_without_calls() {
        let api = Arc::new(FakeApi::default());
        let syncer = syncer(&api);
        let mut foreign = entitlement(&syncer, "admin");
        foreign.id = "organization:OTHER:admin".to_string();
        let err = syncer.grant(&user("alice"), &foreign).unwrap_err();
        assert!(matches!(err, ConnectorError::UnknownEntitlement(_)));
        assert!(err.to_string().starts_with("unknown entitlement ID"));
        assert!(api.calls().is_empty());
    }

    #[test]
    fn grant_rejects_non_user_principal_without_calls() {
        let api = Arc::new(FakeApi::default());
        let syncer = syncer(&api);
        let team = Resource::reference(ResourceId::new(&TEAM, "platform"));
        let err = syncer.grant(&team, &entitlement(&syncer, "member")).unwrap_err();
        assert!(matches!(err, ConnectorError::Validation(_)));
        let err = syncer.grant(&org_resource("ACME"), &entitlement(&syncer, "admin")).unwrap_err();
        assert!(matches!(err, ConnectorError::Validation(_)));
        assert!(api.calls().is_empty());
    }

    #[test]
    fn revoke_admin_demotes_and_revoke_member_removes() {
        let api = Arc::new(FakeApi::with_members(vec![
            member("alice", "Alice", "admin"),
            member("bob", "Bob", "member"),
        ]));
        let syncer = syncer(&api);
        let grants = syncer.grants(&org_resource("ACME"), None).unwrap().items;
        for grant in &grants {
            syncer.revoke(grant).unwrap();
        }
        assert_eq!(&api.calls()[1 ..], &[
            Call::UpdateMemberRole("alice".to_string(), OrgRole::Member),
            Call::RemoveMember("bob".to_string()),
        ]);
    }

    #[test]
    fn revoke_rejects_foreign_grant_ids_without_calls() {
        let api = Arc::new(FakeApi::default());
        let syncer = syncer(&api);
        let org = org_resource("ACME");
        for id in [
            "org:ACME:grant:alice:owner",
            "org:OTHER:grant:alice:admin",
            "org:ACME:grant:bob:admin",
            "organization:ACME:admin:user:alice",
        ] {
            let grant =
                Grant::new(&org, "admin", ResourceId::new(&USER, "alice")).with_id(id.to_string());
            let err = syncer.revoke(&grant).unwrap_err();
            assert!(matches!(err, ConnectorError::UnknownGrant(_)), "{id}");
        }
        assert!(api.calls().is_empty());
    }

    #[test]
    fn revoke_rejects_non_user_principal() {
        let api = Arc::new(FakeApi::default());
        let syncer = syncer(&api);
        let grant = Grant::new(&org_resource("ACME"), "member", ResourceId::new(&TEAM, "platform"))
            .with_id("org:ACME:grant:platform:member");
        let err = syncer.revoke(&grant).unwrap_err();
        assert!(matches!(err, ConnectorError::Validation(_)));
        assert!(api.calls().is_empty());
    }
}
