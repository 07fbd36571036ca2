// crates/pulumi-cloud-client/src/api.rs
// ============================================================================
// Module: Pulumi Cloud API Contract
// Description: Operations the connector issues against Pulumi Cloud.
// Purpose: Abstract the REST client behind an object-safe trait.
// Dependencies: crate::types, thiserror
// ============================================================================

//! ## Overview
//! [`PulumiApi`] lists the six provider calls the connector needs. The
//! blocking [`crate::PulumiClient`] implements it over HTTP; tests substitute
//! in-memory fakes. Implementations must not retry, back off, or cache.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::types::MemberAction;
use crate::types::MemberPage;
use crate::types::OrgRole;
use crate::types::Team;

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Provider call classification used in error context and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiOperation {
    /// `GET /api/orgs/{org}/members`.
    ListMembers,
    /// `GET /api/orgs/{org}/teams`.
    ListTeams,
    /// `GET /api/orgs/{org}/teams/{team}`.
    GetTeam,
    /// `DELETE /api/orgs/{org}/members/{user}`.
    RemoveMember,
    /// `PATCH /api/orgs/{org}/members/{user}`.
    UpdateMemberRole,
    /// `PATCH /api/orgs/{org}/teams/{team}`.
    UpdateTeamMembership,
}

impl ApiOperation {
    /// Returns a stable label for the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListMembers => "list members",
            Self::ListTeams => "list teams",
            Self::GetTeam => "get team",
            Self::RemoveMember => "remove member",
            Self::UpdateMemberRole => "update member role",
            Self::UpdateTeamMembership => "update team membership",
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Pulumi Cloud client errors.
///
/// # Invariants
/// - Call-level variants carry the [`ApiOperation`] label.
/// - Messages never include the access token.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP client could not be constructed.
    #[error("http client build failed: {0}")]
    Build(String),
    /// Base URL or request URL is invalid.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    /// Request could not be sent or the response could not be read.
    #[error("{operation}: request failed: {message}")]
    Request {
        /// Operation label.
        operation: &'static str,
        /// Transport error message.
        message: String,
    },
    /// Provider answered with a non-success status.
    #[error("{operation}: unexpected status {status}: {body}")]
    Status {
        /// Operation label.
        operation: &'static str,
        /// HTTP status code.
        status: u16,
        /// Bounded excerpt of the response body.
        body: String,
    },
    /// Response body is not the expected JSON.
    #[error("{operation}: invalid response body: {message}")]
    Decode {
        /// Operation label.
        operation: &'static str,
        /// Decoder error message.
        message: String,
    },
    /// Request body could not be encoded.
    #[error("{operation}: request encoding failed: {message}")]
    Encode {
        /// Operation label.
        operation: &'static str,
        /// Encoder error message.
        message: String,
    },
    /// Response body exceeded the configured size limit.
    #[error("{operation}: response exceeds size limit ({limit} bytes)")]
    ResponseTooLarge {
        /// Operation label.
        operation: &'static str,
        /// Configured limit in bytes.
        limit: usize,
    },
}

// ============================================================================
// SECTION: API Contract
// ============================================================================

/// Pulumi Cloud operations used by the connector.
pub trait PulumiApi: Send + Sync {
    /// Lists one page of organization members (`type=backend`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, status, or decode failure.
    fn list_members(
        &self,
        org_name: &str,
        continuation_token: Option<&str>,
    ) -> Result<MemberPage, ClientError>;

    /// Lists all teams of the organization in a single call.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, status, or decode failure.
    fn list_teams(&self, org_name: &str) -> Result<Vec<Team>, ClientError>;

    /// Fetches one team including its members.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, status, or decode failure.
    fn get_team(&self, org_name: &str, team_name: &str) -> Result<Team, ClientError>;

    /// Removes a user from the organization.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or status failure.
    fn remove_member(&self, org_name: &str, login: &str) -> Result<(), ClientError>;

    /// Sets a member's organization role.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or status failure.
    fn update_member_role(
        &self,
        org_name: &str,
        login: &str,
        role: OrgRole,
    ) -> Result<(), ClientError>;

    /// Adds a user to or removes a user from a team.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or status failure.
    fn update_team_membership(
        &self,
        org_name: &str,
        team_name: &str,
        login: &str,
        action: MemberAction,
    ) -> Result<(), ClientError>;
}
