// crates/pulumi-cloud-connector/src/testing.rs
// ============================================================================
// Module: In-Memory Pulumi API
// Description: Recording fake of the Pulumi Cloud API for unit tests.
// Purpose: Exercise syncers and provisioners without HTTP.
// Dependencies: pulumi-cloud-client
// ============================================================================

//! ## Overview
//! [`FakeApi`] serves canned member pages and teams and records every call,
//! so tests can assert exactly which provider requests an operation made.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test fixtures use explicit asserts and unwraps for clarity."
)]

use std::collections::BTreeMap;
use std::sync::Mutex;

use pulumi_cloud_client::ClientError;
use pulumi_cloud_client::MemberAction;
use pulumi_cloud_client::MemberPage;
use pulumi_cloud_client::OrgMember;
use pulumi_cloud_client::OrgRole;
use pulumi_cloud_client::PulumiApi;
use pulumi_cloud_client::Team;
use pulumi_cloud_client::UserInfo;

/// Call observed by [`FakeApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// Member listing with the supplied continuation token.
    ListMembers(Option<String>),
    /// Team listing.
    ListTeams,
    /// Team lookup.
    GetTeam(String),
    /// Member removal.
    RemoveMember(String),
    /// Role update.
    UpdateMemberRole(String, OrgRole),
    /// Team membership update.
    UpdateTeamMembership(String, String, MemberAction),
}

/// Recording in-memory API.
#[derive(Default)]
pub struct FakeApi {
    /// Member pages keyed by the token that requests them (`""` for the first).
    pub member_pages: BTreeMap<String, MemberPage>,
    /// Teams of the organization.
    pub teams: Vec<Team>,
    /// Fail every call with a status error when set.
    pub fail_status: Option<u16>,
    /// Observed calls in order.
    pub calls: Mutex<Vec<Call>>,
    /// Organization names passed to listing calls, in order.
    pub listed_orgs: Mutex<Vec<String>>,
}

impl FakeApi {
    /// Creates a fake whose single member page holds `members`.
    pub fn with_members(members: Vec<OrgMember>) -> Self {
        let mut api = Self::default();
        api.member_pages.insert(
            String::new(),
            MemberPage {
                members,
                continuation_token: None,
            },
        );
        api
    }

    /// Returns the observed calls.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns the organization names passed to listing calls.
    pub fn listed_orgs(&self) -> Vec<String> {
        self.listed_orgs.lock().unwrap().clone()
    }

    /// Records a call and applies the configured failure.
    fn record(&self, call: Call, operation: &'static str) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(call);
        match self.fail_status {
            Some(status) => Err(ClientError::Status {
                operation,
                status,
                body: "denied".to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Builds a member with the given login and role.
pub fn member(login: &str, name: &str, role: &str) -> OrgMember {
    OrgMember {
        role: role.to_string(),
        user: user_info(login, name),
        ..OrgMember::default()
    }
}

/// Builds a user identity.
pub fn user_info(login: &str, name: &str) -> UserInfo {
    UserInfo {
        name: name.to_string(),
        github_login: login.to_string(),
        ..UserInfo::default()
    }
}

/// Builds a team with the given members.
pub fn team(name: &str, members: Vec<UserInfo>) -> Team {
    Team {
        kind: "pulumi".to_string(),
        name: name.to_string(),
        display_name: name.to_uppercase(),
        members,
        ..Team::default()
    }
}

impl PulumiApi for FakeApi {
    fn list_members(
        &self,
        org_name: &str,
        continuation_token: Option<&str>,
    ) -> Result<MemberPage, ClientError> {
        self.listed_orgs.lock().unwrap().push(org_name.to_string());
        self.record(Call::ListMembers(continuation_token.map(str::to_string)), "list members")?;
        Ok(self
            .member_pages
            .get(continuation_token.unwrap_or_default())
            .cloned()
            .unwrap_or_default())
    }

    fn list_teams(&self, org_name: &str) -> Result<Vec<Team>, ClientError> {
        self.listed_orgs.lock().unwrap().push(org_name.to_string());
        self.record(Call::ListTeams, "list teams")?;
        Ok(self.teams.clone())
    }

    fn get_team(&self, _org_name: &str, team_name: &str) -> Result<Team, ClientError> {
        self.record(Call::GetTeam(team_name.to_string()), "get team")?;
        self.teams.iter().find(|team| team.name == team_name).cloned().ok_or_else(|| {
            ClientError::Status {
                operation: "get team",
                status: 404,
                body: "team not found".to_string(),
            }
        })
    }

    fn remove_member(&self, _org_name: &str, login: &str) -> Result<(), ClientError> {
        self.record(Call::RemoveMember(login.to_string()), "remove member")
    }

    fn update_member_role(
        &self,
        _org_name: &str,
        login: &str,
        role: OrgRole,
    ) -> Result<(), ClientError> {
        self.record(Call::UpdateMemberRole(login.to_string(), role), "update member role")
    }

    fn update_team_membership(
        &self,
        _org_name: &str,
        team_name: &str,
        login: &str,
        action: MemberAction,
    ) -> Result<(), ClientError> {
        self.record(
            Call::UpdateTeamMembership(team_name.to_string(), login.to_string(), action),
            "update team membership",
        )
    }
}
