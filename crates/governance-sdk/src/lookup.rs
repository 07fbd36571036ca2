// crates/governance-sdk/src/lookup.rs
// ============================================================================
// Module: Governance Lookup
// Description: Locate resources, entitlements, and grants through a syncer.
// Purpose: Resolve provisioning targets from live provider state.
// Dependencies: crate::{interfaces, pagination}
// ============================================================================

//! ## Overview
//! Provisioning front-ends know a resource key, an entitlement slug, and a
//! principal login. These helpers resolve them into the exact records the
//! syncer manufactures, so connector-specific identifiers round-trip
//! unchanged into Grant and Revoke.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::entitlement::Entitlement;
use crate::grant::Grant;
use crate::identifiers::ResourceId;
use crate::interfaces::ConnectorError;
use crate::interfaces::ResourceSyncer;
use crate::pagination::collect_pages;
use crate::resource::Resource;

// ============================================================================
// SECTION: Lookups
// ============================================================================

/// Finds a listed resource by provider key.
///
/// # Errors
///
/// Returns [`ConnectorError::NotFound`] when no listed resource matches, or
/// the listing error.
pub fn locate_resource(
    syncer: &dyn ResourceSyncer,
    parent: Option<&ResourceId>,
    resource: &str,
) -> Result<Resource, ConnectorError> {
    collect_pages(|token| syncer.list(parent, token))?
        .into_iter()
        .find(|candidate| candidate.id.resource == resource)
        .ok_or_else(|| {
            ConnectorError::NotFound(format!("{} {resource}", syncer.resource_type().id))
        })
}

/// Finds an entitlement offered by a resource by slug.
///
/// # Errors
///
/// Returns [`ConnectorError::NotFound`] when the slug is not offered, or the
/// listing error.
pub fn find_entitlement(
    syncer: &dyn ResourceSyncer,
    resource: &Resource,
    slug: &str,
) -> Result<Entitlement, ConnectorError> {
    collect_pages(|token| syncer.entitlements(resource, token))?
        .into_iter()
        .find(|entitlement| entitlement.slug == slug)
        .ok_or_else(|| ConnectorError::NotFound(format!("entitlement {slug} on {}", resource.id)))
}

/// Finds the grant of `slug` on a resource held by a principal.
///
/// # Errors
///
/// Returns [`ConnectorError::NotFound`] when the principal does not hold the
/// entitlement, or the listing error.
pub fn find_grant(
    syncer: &dyn ResourceSyncer,
    resource: &Resource,
    principal: &ResourceId,
    slug: &str,
) -> Result<Grant, ConnectorError> {
    collect_pages(|token| syncer.grants(resource, token))?
        .into_iter()
        .find(|grant| grant.entitlement.slug == slug && &grant.principal.id == principal)
        .ok_or_else(|| {
            ConnectorError::NotFound(format!("grant of {slug} on {} to {principal}", resource.id))
        })
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use super::find_entitlement;
    use super::find_grant;
    use super::locate_resource;
    use crate::entitlement::Entitlement;
    use crate::grant::Grant;
    use crate::identifiers::PageToken;
    use crate::identifiers::ResourceId;
    use crate::interfaces::ConnectorError;
    use crate::interfaces::ResourceSyncer;
    use crate::pagination::Page;
    use crate::resource::Resource;
    use crate::resource::ResourceType;

    static PROJECT: ResourceType = ResourceType {
        id: "project",
        display_name: "Project",
        description: "test project",
        traits: &[],
    };

    static USER: ResourceType = ResourceType {
        id: "user",
        display_name: "User",
        description: "test user",
        traits: &[],
    };

    /// Two-page syncer with one owner grant per project.
    struct ProjectSyncer;

    impl ResourceSyncer for ProjectSyncer {
        fn resource_type(&self) -> &'static ResourceType {
            &PROJECT
        }

        fn list(
            &self,
            _parent: Option<&ResourceId>,
            token: Option<&PageToken>,
        ) -> Result<Page<Resource>, ConnectorError> {
            Ok(match token {
                None => Page::with_token(vec![Resource::new("A", &PROJECT, "a")], "p2"),
                Some(_) => Page::last(vec![Resource::new("B", &PROJECT, "b")]),
            })
        }

        fn entitlements(
            &self,
            resource: &Resource,
            _token: Option<&PageToken>,
        ) -> Result<Page<Entitlement>, ConnectorError> {
            Ok(Page::last(vec![Entitlement::assignment(resource, "owner")]))
        }

        fn grants(
            &self,
            resource: &Resource,
            _token: Option<&PageToken>,
        ) -> Result<Page<Grant>, ConnectorError> {
            let grant = Grant::new(resource, "owner", ResourceId::new(&USER, "carol"))
                .with_id(format!("custom:{}", resource.id.resource));
            Ok(Page::last(vec![grant]))
        }
    }

    #[test]
    fn locate_resource_walks_all_pages() {
        let resource = locate_resource(&ProjectSyncer, None, "b").unwrap();
        assert_eq!(resource.display_name, "B");
        let missing = locate_resource(&ProjectSyncer, None, "z").unwrap_err();
        assert!(matches!(missing, ConnectorError::NotFound(_)));
    }

    #[test]
    fn find_entitlement_matches_slug() {
        let resource = Resource::new("A", &PROJECT, "a");
        let entitlement = find_entitlement(&ProjectSyncer, &resource, "owner").unwrap();
        assert_eq!(entitlement.id, "project:a:owner");
        assert!(find_entitlement(&ProjectSyncer, &resource, "viewer").is_err());
    }

    #[test]
    fn find_grant_returns_manufactured_identifier() {
        let resource = Resource::new("A", &PROJECT, "a");
        let principal = ResourceId::new(&USER, "carol");
        let grant = find_grant(&ProjectSyncer, &resource, &principal, "owner").unwrap();
        assert_eq!(grant.id, "custom:a");
        let stranger = ResourceId::new(&USER, "dave");
        assert!(find_grant(&ProjectSyncer, &resource, &stranger, "owner").is_err());
    }
}
