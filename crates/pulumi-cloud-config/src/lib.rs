// crates/pulumi-cloud-config/src/lib.rs
// ============================================================================
// Module: Pulumi Cloud Config Library
// Description: Canonical configuration model for the Pulumi Cloud connector.
// Purpose: Single source of truth for pulumi-cloud.toml semantics.
// Dependencies: pulumi-cloud-client, serde, toml, url
// ============================================================================

//! ## Overview
//! `pulumi-cloud-config` loads the connector credentials and API transport
//! settings from TOML, applies credential overrides from the environment,
//! and validates everything fail-closed before a connector is built.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
