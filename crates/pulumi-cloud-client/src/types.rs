// crates/pulumi-cloud-client/src/types.rs
// ============================================================================
// Module: Pulumi Cloud Wire Types
// Description: Request and response bodies of the Pulumi Cloud REST API.
// Purpose: Decode organization members and teams into typed records.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Provider fields the connector relies on are modeled explicitly. Anything
//! else the provider sends is kept in an `extra` passthrough map so new
//! fields survive decoding without loosening the typed surface.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// Provider fields not otherwise modeled.
pub type ExtraFields = BTreeMap<String, Value>;

// ============================================================================
// SECTION: Roles and Actions
// ============================================================================

/// Organization role written by role updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrgRole {
    /// Organization administrator.
    Admin,
    /// Regular organization member.
    Member,
}

impl OrgRole {
    /// Returns the wire form of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

/// Team membership mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberAction {
    /// Add the user to the team.
    Add,
    /// Remove the user from the team.
    Remove,
}

impl MemberAction {
    /// Returns the wire form of the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

// ============================================================================
// SECTION: Members
// ============================================================================

/// User identity embedded in member and team records.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// Display name; may be empty.
    #[serde(default)]
    pub name: String,
    /// Login used as the stable user key.
    #[serde(default)]
    pub github_login: String,
    /// Avatar URL.
    #[serde(default)]
    pub avatar_url: String,
    /// Unmodeled provider fields.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Organization membership record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgMember {
    /// Organization role as reported (`admin`, `member`, or another provider value).
    #[serde(default)]
    pub role: String,
    /// Member identity.
    #[serde(default)]
    pub user: UserInfo,
    /// Membership creation timestamp.
    #[serde(default)]
    pub created: String,
    /// Whether the user has a Pulumi account.
    #[serde(default)]
    pub known_to_pulumi: bool,
    /// Whether admin rights are inherited rather than assigned.
    #[serde(default)]
    pub virtual_admin: bool,
    /// Unmodeled provider fields.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl OrgMember {
    /// Returns true when the reported role is exactly `admin`.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == OrgRole::Admin.as_str()
    }
}

/// One page of organization members.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPage {
    /// Members on this page.
    #[serde(default)]
    pub members: Vec<OrgMember>,
    /// Continuation token; absent or empty on the final page.
    #[serde(default)]
    pub continuation_token: Option<String>,
}

impl MemberPage {
    /// Returns the continuation token when another page follows.
    #[must_use]
    pub fn next_token(&self) -> Option<&str> {
        self.continuation_token.as_deref().filter(|token| !token.is_empty())
    }
}

// ============================================================================
// SECTION: Teams
// ============================================================================

/// Team record, with members when fetched individually.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Team kind (for example `pulumi` or `github`).
    #[serde(default)]
    pub kind: String,
    /// Stable team name.
    #[serde(default)]
    pub name: String,
    /// Display name.
    #[serde(default)]
    pub display_name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Team members.
    #[serde(default)]
    pub members: Vec<UserInfo>,
    /// Role of the calling user within the team.
    #[serde(default)]
    pub user_role: String,
    /// Unmodeled provider fields.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Team listing envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct TeamList {
    /// Teams of the organization.
    #[serde(default)]
    pub teams: Vec<Team>,
}

// ============================================================================
// SECTION: Request Bodies
// ============================================================================

/// Body of a member role update.
#[derive(Debug, Serialize)]
pub(crate) struct RoleUpdate {
    /// New role.
    pub role: OrgRole,
}

/// Body of a team membership update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TeamMembershipUpdate<'a> {
    /// Mutation to apply.
    pub member_action: MemberAction,
    /// Login of the affected user.
    pub member: &'a str,
}
