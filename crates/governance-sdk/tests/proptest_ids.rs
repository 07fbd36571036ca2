//! Identifier property-based tests.
//!
//! ## Purpose
//! Identifiers are rebuilt from their parts on every sync; these properties
//! check that construction is deterministic and that continuation tokens are
//! carried verbatim.
// crates/governance-sdk/tests/proptest_ids.rs
// ============================================================================
// Module: Identifier Property-Based Tests
// Description: Determinism checks for entitlement, grant, and page identifiers.
// Purpose: Ensure identifiers are reconstructible from their parts.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use governance_sdk::Grant;
use governance_sdk::Page;
use governance_sdk::PageToken;
use governance_sdk::Resource;
use governance_sdk::ResourceId;
use governance_sdk::ResourceType;
use governance_sdk::collect_pages;
use governance_sdk::entitlement_id;
use proptest::prelude::*;

static TEAM: ResourceType = ResourceType {
    id: "team",
    display_name: "Team",
    description: "property team",
    traits: &[],
};

static USER: ResourceType = ResourceType {
    id: "user",
    display_name: "User",
    description: "property user",
    traits: &[],
};

proptest! {
    #[test]
    fn entitlement_id_is_deterministic(resource in "[a-zA-Z0-9_.-]{1,32}", slug in "[a-z]{1,12}") {
        let team = Resource::new("t", &TEAM, resource.clone());
        let first = entitlement_id(&team.id, &slug);
        let second = entitlement_id(&ResourceId::new(&TEAM, resource.clone()), &slug);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first, format!("team:{resource}:{slug}"));
    }

    #[test]
    fn default_grant_id_embeds_entitlement_and_principal(
        resource in "[a-z0-9-]{1,24}",
        login in "[a-z0-9-]{1,24}",
    ) {
        let team = Resource::new("t", &TEAM, resource.clone());
        let grant = Grant::new(&team, "member", ResourceId::new(&USER, login.clone()));
        prop_assert_eq!(grant.id, format!("team:{resource}:member:user:{login}"));
    }

    #[test]
    fn non_empty_tokens_are_threaded_verbatim(token in "\\PC{1,64}") {
        let expected = token.clone();
        let mut seen = Vec::new();
        let items = collect_pages(|current| {
            seen.push(current.map(|value| value.as_str().to_string()));
            Ok(if current.is_none() {
                Page::with_token(vec![1_u8], token.clone())
            } else {
                Page::last(vec![2_u8])
            })
        })
        .unwrap();
        prop_assert_eq!(items, vec![1, 2]);
        prop_assert_eq!(seen, vec![None, Some(expected.clone())]);
        let round_trip = PageToken::new(expected.clone()).map(|t| t.as_str().to_string());
        prop_assert_eq!(round_trip, Some(expected));
    }
}
