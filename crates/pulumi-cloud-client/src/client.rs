// crates/pulumi-cloud-client/src/client.rs
// ============================================================================
// Module: Pulumi Cloud HTTP Client
// Description: Blocking REST client for the Pulumi Cloud organization API.
// Purpose: Issue typed requests with fixed headers and bounded responses.
// Dependencies: crate::{api, types}, reqwest, serde_json, tracing, url
// ============================================================================

//! ## Overview
//! [`PulumiClient`] holds only a base URL and a pre-built HTTP client whose
//! default headers carry the access token. It is read-only after
//! construction, so one instance can serve concurrent calls.
//! Invariants:
//! - Every request sends `Authorization: token <value>`, both Pulumi accept
//!   types, and a JSON content type.
//! - Every response body is read to the end (bounded) before the status or
//!   payload is inspected, releasing the connection on every path.
//! - Non-success statuses and malformed JSON fail with operation context.
//! - Redirects are not followed; nothing is retried.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::io::Read;
use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::header::ACCEPT;
use reqwest::header::AUTHORIZATION;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use reqwest::redirect::Policy;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use tracing::warn;
use url::Url;

use crate::api::ApiOperation;
use crate::api::ClientError;
use crate::api::PulumiApi;
use crate::types::MemberAction;
use crate::types::MemberPage;
use crate::types::OrgRole;
use crate::types::RoleUpdate;
use crate::types::Team;
use crate::types::TeamList;
use crate::types::TeamMembershipUpdate;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default Pulumi Cloud API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.pulumi.com";
/// Pulumi API media type sent in `Accept`.
pub const PULUMI_MEDIA_TYPE: &str = "application/vnd.pulumi+8";
/// JSON media type sent in `Accept` and `Content-Type`.
pub const JSON_MEDIA_TYPE: &str = "application/json";
/// Combined `Accept` value; default headers hold one value per name.
const ACCEPT_MEDIA_TYPES: &str = "application/vnd.pulumi+8, application/json";
/// Member listing filter sent on every member listing.
const MEMBER_TYPE_FILTER: &str = "backend";
/// Maximum bytes of an error body kept in [`ClientError::Status`].
const MAX_ERROR_EXCERPT_BYTES: usize = 512;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Transport settings for [`PulumiClient`].
///
/// # Invariants
/// - `base_url` is an absolute `http` or `https` URL without credentials,
///   query, or fragment.
/// - `max_response_bytes` bounds every response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PulumiClientConfig {
    /// API endpoint; a path prefix is preserved.
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum response size in bytes.
    pub max_response_bytes: usize,
    /// User agent for outbound requests.
    pub user_agent: String,
}

impl Default for PulumiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: 30_000,
            max_response_bytes: 16 * 1024 * 1024,
            user_agent: "pulumi-cloud-connector/0.1".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Blocking Pulumi Cloud API client.
pub struct PulumiClient {
    /// HTTP client carrying the fixed header set.
    http: Client,
    /// Parsed API endpoint.
    base_url: Url,
    /// Maximum response size in bytes.
    max_response_bytes: usize,
}

impl fmt::Debug for PulumiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PulumiClient")
            .field("base_url", &self.base_url.as_str())
            .field("max_response_bytes", &self.max_response_bytes)
            .finish_non_exhaustive()
    }
}

impl PulumiClient {
    /// Creates a client authenticated with `access_token`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the token is empty or not a valid header
    /// value, the base URL is invalid, or the HTTP client cannot be built.
    pub fn new(access_token: &str, config: PulumiClientConfig) -> Result<Self, ClientError> {
        let base_url = parse_base_url(&config.base_url)?;
        let headers = default_headers(access_token)?;
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .default_headers(headers)
            .build()
            .map_err(|err| ClientError::Build(err.to_string()))?;
        Ok(Self {
            http,
            base_url,
            max_response_bytes: config.max_response_bytes,
        })
    }

    /// Returns the API endpoint.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `{base}/api/{segments...}` with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl("base url cannot carry a path".to_string()))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    /// Sends a request and returns the full response body on success.
    fn execute(
        &self,
        operation: ApiOperation,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, ClientError> {
        debug!(
            operation = operation.as_str(),
            method = method.as_str(),
            path = url.path(),
            "pulumi api request"
        );
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.body(body);
        }
        let mut response = request.send().map_err(|err| ClientError::Request {
            operation: operation.as_str(),
            message: err.to_string(),
        })?;
        let status = response.status();
        if !status.is_success() {
            let body =
                match read_response_limited(&mut response, self.max_response_bytes, operation) {
                    Ok(bytes) => error_excerpt(&bytes),
                    Err(ClientError::ResponseTooLarge {
                        ..
                    }) => String::new(),
                    Err(err) => return Err(err),
                };
            warn!(
                operation = operation.as_str(),
                status = status.as_u16(),
                "pulumi api returned non-success status"
            );
            return Err(ClientError::Status {
                operation: operation.as_str(),
                status: status.as_u16(),
                body,
            });
        }
        read_response_limited(&mut response, self.max_response_bytes, operation)
    }
}

impl PulumiApi for PulumiClient {
    fn list_members(
        &self,
        org_name: &str,
        continuation_token: Option<&str>,
    ) -> Result<MemberPage, ClientError> {
        let operation = ApiOperation::ListMembers;
        let mut url = self.endpoint(&["orgs", org_name, "members"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("type", MEMBER_TYPE_FILTER);
            if let Some(token) = continuation_token.filter(|token| !token.is_empty()) {
                query.append_pair("continuationToken", token);
            }
        }
        let body = self.execute(operation, Method::GET, url, None)?;
        decode(operation, &body)
    }

    fn list_teams(&self, org_name: &str) -> Result<Vec<Team>, ClientError> {
        let operation = ApiOperation::ListTeams;
        let url = self.endpoint(&["orgs", org_name, "teams"])?;
        let body = self.execute(operation, Method::GET, url, None)?;
        let list: TeamList = decode(operation, &body)?;
        Ok(list.teams)
    }

    fn get_team(&self, org_name: &str, team_name: &str) -> Result<Team, ClientError> {
        let operation = ApiOperation::GetTeam;
        let url = self.endpoint(&["orgs", org_name, "teams", team_name])?;
        let body = self.execute(operation, Method::GET, url, None)?;
        decode(operation, &body)
    }

    fn remove_member(&self, org_name: &str, login: &str) -> Result<(), ClientError> {
        let operation = ApiOperation::RemoveMember;
        let url = self.endpoint(&["orgs", org_name, "members", login])?;
        self.execute(operation, Method::DELETE, url, None)?;
        Ok(())
    }

    fn update_member_role(
        &self,
        org_name: &str,
        login: &str,
        role: OrgRole,
    ) -> Result<(), ClientError> {
        let operation = ApiOperation::UpdateMemberRole;
        let url = self.endpoint(&["orgs", org_name, "members", login])?;
        let body = encode(
            operation,
            &RoleUpdate {
                role,
            },
        )?;
        self.execute(operation, Method::PATCH, url, Some(body))?;
        Ok(())
    }

    fn update_team_membership(
        &self,
        org_name: &str,
        team_name: &str,
        login: &str,
        action: MemberAction,
    ) -> Result<(), ClientError> {
        let operation = ApiOperation::UpdateTeamMembership;
        let url = self.endpoint(&["orgs", org_name, "teams", team_name])?;
        let body = encode(
            operation,
            &TeamMembershipUpdate {
                member_action: action,
                member: login,
            },
        )?;
        self.execute(operation, Method::PATCH, url, Some(body))?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses and validates the API endpoint.
fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let url = Url::parse(raw).map_err(|err| ClientError::InvalidUrl(format!("{raw}: {err}")))?;
    match url.scheme() {
        "https" | "http" => {}
        other => return Err(ClientError::InvalidUrl(format!("unsupported scheme: {other}"))),
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(ClientError::InvalidUrl("base url must be absolute".to_string()));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(ClientError::InvalidUrl("base url credentials are not allowed".to_string()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ClientError::InvalidUrl(
            "base url must not carry a query or fragment".to_string(),
        ));
    }
    Ok(url)
}

/// Builds the fixed header set sent on every request.
fn default_headers(access_token: &str) -> Result<HeaderMap, ClientError> {
    if access_token.trim().is_empty() {
        return Err(ClientError::Build("access token is empty".to_string()));
    }
    let mut authorization = HeaderValue::from_str(&format!("token {access_token}"))
        .map_err(|_| ClientError::Build("access token is not a valid header value".to_string()))?;
    authorization.set_sensitive(true);
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_MEDIA_TYPES));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MEDIA_TYPE));
    Ok(headers)
}

/// Encodes a JSON request body.
fn encode<T: Serialize>(operation: ApiOperation, value: &T) -> Result<Vec<u8>, ClientError> {
    serde_json::to_vec(value).map_err(|err| ClientError::Encode {
        operation: operation.as_str(),
        message: err.to_string(),
    })
}

/// Decodes a JSON response body.
fn decode<T: DeserializeOwned>(operation: ApiOperation, body: &[u8]) -> Result<T, ClientError> {
    serde_json::from_slice(body).map_err(|err| ClientError::Decode {
        operation: operation.as_str(),
        message: err.to_string(),
    })
}

/// Returns a bounded, lossy UTF-8 excerpt of an error body.
fn error_excerpt(body: &[u8]) -> String {
    let end = body.len().min(MAX_ERROR_EXCERPT_BYTES);
    String::from_utf8_lossy(&body[.. end]).trim().to_string()
}

/// Reads the response body while enforcing a byte limit.
fn read_response_limited(
    response: &mut Response,
    max_bytes: usize,
    operation: ApiOperation,
) -> Result<Vec<u8>, ClientError> {
    let too_large = || ClientError::ResponseTooLarge {
        operation: operation.as_str(),
        limit: max_bytes,
    };
    let max_bytes_u64 = u64::try_from(max_bytes).map_err(|_| too_large())?;
    if let Some(expected) = response.content_length()
        && expected > max_bytes_u64
    {
        return Err(too_large());
    }
    let mut buf = Vec::new();
    response.take(max_bytes_u64.saturating_add(1)).read_to_end(&mut buf).map_err(|err| {
        ClientError::Request {
            operation: operation.as_str(),
            message: format!("failed to read response: {err}"),
        }
    })?;
    if buf.len() > max_bytes {
        return Err(too_large());
    }
    Ok(buf)
}
