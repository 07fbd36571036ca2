// crates/pulumi-cloud-connector/src/mappers.rs
// ============================================================================
// Module: Resource Mappers
// Description: Conversions from Pulumi Cloud records into governance resources.
// Purpose: Attach typed profiles and parent linkage to organization, team, and user resources.
// Dependencies: governance-sdk, pulumi-cloud-client, serde_json
// ============================================================================

//! ## Overview
//! Mapping is pure: no provider calls, no state. Known profile fields are
//! typed ([`UserProfile`], [`TeamProfile`]); unmodeled provider fields travel
//! in `extra` and never shadow a typed key.
//! Invariants:
//! - Users are keyed by login and teams by name; an empty key fails mapping.
//! - Users and teams are always parented under the organization.

// ============================================================================
// SECTION: Imports
// ============================================================================

use governance_sdk::AccountType;
use governance_sdk::ConnectorError;
use governance_sdk::GroupTrait;
use governance_sdk::Profile;
use governance_sdk::Resource;
use governance_sdk::ResourceId;
use governance_sdk::UserStatus;
use governance_sdk::UserTrait;
use pulumi_cloud_client::OrgMember;
use pulumi_cloud_client::Team;
use pulumi_cloud_client::types::ExtraFields;
use serde_json::Value;

use crate::resource_types::ORGANIZATION;
use crate::resource_types::TEAM;
use crate::resource_types::USER;

// ============================================================================
// SECTION: Profiles
// ============================================================================

/// Profile of a user resource.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserProfile {
    /// Login (the resource key).
    pub github_login: String,
    /// Display name as reported; may be empty.
    pub name: String,
    /// Organization role as reported.
    pub role: String,
    /// Unmodeled provider fields of the member and user records.
    pub extra: ExtraFields,
}

impl UserProfile {
    /// Builds the profile of an organization member.
    #[must_use]
    pub fn from_member(member: &OrgMember) -> Self {
        let mut extra = member.extra.clone();
        extra.extend(member.user.extra.iter().map(|(key, value)| (key.clone(), value.clone())));
        Self {
            github_login: member.user.github_login.clone(),
            name: member.user.name.clone(),
            role: member.role.clone(),
            extra,
        }
    }

    /// Renders the profile as a resource profile object.
    #[must_use]
    pub fn to_profile(&self) -> Profile {
        let mut profile = extra_profile(&self.extra);
        profile.insert("github_login".to_string(), Value::String(self.github_login.clone()));
        profile.insert("name".to_string(), Value::String(self.name.clone()));
        profile.insert("role".to_string(), Value::String(self.role.clone()));
        profile
    }
}

/// Profile of a team resource.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TeamProfile {
    /// Team name (the resource key).
    pub name: String,
    /// Display name as reported; may be empty.
    pub display_name: String,
    /// Description as reported.
    pub description: String,
    /// Unmodeled provider fields of the team record.
    pub extra: ExtraFields,
}

impl TeamProfile {
    /// Builds the profile of a team.
    #[must_use]
    pub fn from_team(team: &Team) -> Self {
        Self {
            name: team.name.clone(),
            display_name: team.display_name.clone(),
            description: team.description.clone(),
            extra: team.extra.clone(),
        }
    }

    /// Renders the profile as a resource profile object.
    #[must_use]
    pub fn to_profile(&self) -> Profile {
        let mut profile = extra_profile(&self.extra);
        profile.insert("name".to_string(), Value::String(self.name.clone()));
        profile.insert("display_name".to_string(), Value::String(self.display_name.clone()));
        profile.insert("description".to_string(), Value::String(self.description.clone()));
        profile
    }
}

/// Copies passthrough fields into a fresh profile object.
fn extra_profile(extra: &ExtraFields) -> Profile {
    extra.iter().map(|(key, value)| (key.clone(), value.clone())).collect()
}

// ============================================================================
// SECTION: Resources
// ============================================================================

/// Returns the identifier of the organization resource.
#[must_use]
pub fn org_resource_id(org_name: &str) -> ResourceId {
    ResourceId::new(&ORGANIZATION, org_name)
}

/// Maps the configured organization into its resource.
#[must_use]
pub fn org_resource(org_name: &str) -> Resource {
    Resource::new(org_name, &ORGANIZATION, org_name)
}

/// Maps an organization member into a user resource.
///
/// # Errors
///
/// Returns [`ConnectorError::Mapping`] when the member has no login.
pub fn user_resource(member: &OrgMember, org_name: &str) -> Result<Resource, ConnectorError> {
    let profile = UserProfile::from_member(member);
    if profile.github_login.is_empty() {
        return Err(ConnectorError::Mapping("organization member has no login".to_string()));
    }
    let display_name = if profile.name.is_empty() {
        profile.github_login.clone()
    } else {
        profile.name.clone()
    };
    let user = UserTrait {
        login: profile.github_login.clone(),
        status: UserStatus::Enabled,
        account_type: AccountType::Human,
        profile: profile.to_profile(),
    };
    Ok(Resource::user(display_name, &USER, profile.github_login, user)
        .with_parent(org_resource_id(org_name)))
}

/// Maps a team into a team resource.
///
/// # Errors
///
/// Returns [`ConnectorError::Mapping`] when the team has no name.
pub fn team_resource(team: &Team, org_name: &str) -> Result<Resource, ConnectorError> {
    let profile = TeamProfile::from_team(team);
    if profile.name.is_empty() {
        return Err(ConnectorError::Mapping("team has no name".to_string()));
    }
    let display_name = if profile.display_name.is_empty() {
        profile.name.clone()
    } else {
        profile.display_name.clone()
    };
    let group = GroupTrait {
        profile: profile.to_profile(),
    };
    Ok(Resource::group(display_name, &TEAM, profile.name, group)
        .with_parent(org_resource_id(org_name)))
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use governance_sdk::AccountType;
    use governance_sdk::ConnectorError;
    use governance_sdk::UserStatus;
    use pulumi_cloud_client::OrgMember;
    use pulumi_cloud_client::Team;
    use serde_json::json;

    use super::org_resource;
    use super::team_resource;
    use super::user_resource;

    /// Decodes a member record from its wire form.
    fn member(value: serde_json::Value) -> OrgMember {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn org_resource_is_keyed_by_name() {
        let org = org_resource("ACME");
        assert_eq!(org.id.to_string(), "organization:ACME");
        assert_eq!(org.display_name, "ACME");
        assert!(org.parent_resource_id.is_none());
    }

    #[test]
    fn user_resource_carries_typed_profile_and_parent() {
        let resource = user_resource(
            &member(json!({
                "role": "admin",
                "user": {"name": "Alice", "githubLogin": "alice", "email": "a@x"},
                "seat": "paid"
            })),
            "ACME",
        )
        .unwrap();
        assert_eq!(resource.id.to_string(), "user:alice");
        assert_eq!(resource.display_name, "Alice");
        assert_eq!(resource.parent_resource_id.as_ref().unwrap().to_string(), "organization:ACME");
        let user = resource.user_trait().unwrap();
        assert_eq!(user.login, "alice");
        assert_eq!(user.status, UserStatus::Enabled);
        assert_eq!(user.account_type, AccountType::Human);
        assert_eq!(user.profile.get("github_login"), Some(&json!("alice")));
        assert_eq!(user.profile.get("role"), Some(&json!("admin")));
        assert_eq!(user.profile.get("email"), Some(&json!("a@x")));
        assert_eq!(user.profile.get("seat"), Some(&json!("paid")));
    }

    #[test]
    fn user_display_name_falls_back_to_login() {
        let resource =
            user_resource(&member(json!({"role": "member", "user": {"githubLogin": "bob"}})), "o")
                .unwrap();
        assert_eq!(resource.display_name, "bob");
    }

    #[test]
    fn passthrough_fields_never_shadow_typed_keys() {
        let resource = user_resource(
            &member(json!({"role": "member", "name": "shadow", "user": {"githubLogin": "bob"}})),
            "o",
        )
        .unwrap();
        let user = resource.user_trait().unwrap();
        assert_eq!(user.profile.get("name"), Some(&json!("")));
    }

    #[test]
    fn user_without_login_fails_mapping() {
        let err = user_resource(&member(json!({"role": "member", "user": {"name": "x"}})), "o")
            .unwrap_err();
        assert!(matches!(err, ConnectorError::Mapping(_)));
    }

    #[test]
    fn team_resource_carries_profile_and_parent() {
        let team: Team = serde_json::from_value(json!({
            "name": "platform",
            "displayName": "",
            "description": "infra",
            "kind": "pulumi"
        }))
        .unwrap();
        let resource = team_resource(&team, "ACME").unwrap();
        assert_eq!(resource.id.to_string(), "team:platform");
        assert_eq!(resource.display_name, "platform");
        assert_eq!(resource.parent_resource_id.as_ref().unwrap().to_string(), "organization:ACME");
        let group = resource.group_trait().unwrap();
        assert_eq!(group.profile.get("description"), Some(&json!("infra")));
        assert_eq!(group.profile.get("display_name"), Some(&json!("")));
    }

    #[test]
    fn team_without_name_fails_mapping() {
        let err = team_resource(&Team::default(), "ACME").unwrap_err();
        assert!(matches!(err, ConnectorError::Mapping(_)));
    }
}
