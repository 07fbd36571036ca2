// crates/pulumi-cloud-client/src/lib.rs
// ============================================================================
// Module: Pulumi Cloud Client Library
// Description: Typed access to the Pulumi Cloud organization REST API.
// Purpose: Expose wire types, the API contract, and the blocking client.
// Dependencies: crate::{api, client, types}
// ============================================================================

//! ## Overview
//! This crate wraps the six Pulumi Cloud endpoints the connector uses:
//! member listing, team listing, team lookup, member removal, role update,
//! and team membership update. Consumers depend on [`PulumiApi`] so the HTTP
//! implementation can be swapped for fakes in tests.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod api;
pub mod client;
pub mod types;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use api::ApiOperation;
pub use api::ClientError;
pub use api::PulumiApi;
pub use client::DEFAULT_BASE_URL;
pub use client::PulumiClient;
pub use client::PulumiClientConfig;
pub use types::MemberAction;
pub use types::MemberPage;
pub use types::OrgMember;
pub use types::OrgRole;
pub use types::Team;
pub use types::UserInfo;
