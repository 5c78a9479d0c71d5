//! Core protocol operations, decoupled from the HTTP layer.
//!
//! Handlers validate nothing themselves; every rule lives here so it can be
//! exercised against any [`PushAssociationRepository`] implementation.

use crate::error::PassError;
use crate::models::PushQueryResponse;
use chrono::{DateTime, Utc};
use passhub_db::{NewPushAssociation, PushAssociationRepository};
use tracing::{debug, info};

/// Outcome of a registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// A new association was stored.
    Created,
    /// The triple was already registered; nothing changed.
    AlreadyRegistered,
}

/// Register a device for push updates about one pass.
///
/// Idempotent by key, not by value: when the `(device, pass type, pass id)`
/// triple is already stored the original push token is retained, whatever
/// token the new request carried.
pub async fn register_device(
    repo: &dyn PushAssociationRepository,
    configured_pass_type: &str,
    device_id: &str,
    pass_type: &str,
    pass_id: &str,
    push_token: Option<String>,
) -> Result<RegistrationOutcome, PassError> {
    if pass_type != configured_pass_type {
        return Err(PassError::InvalidPassType);
    }
    let push_token = push_token.ok_or(PassError::MissingPushToken)?;

    let inserted = repo
        .register(NewPushAssociation {
            device_id: device_id.to_string(),
            pass_type: pass_type.to_string(),
            pass_id: pass_id.to_string(),
            push_token,
        })
        .await?;

    if inserted {
        info!("Registered device {} for pass {}", device_id, pass_id);
        Ok(RegistrationOutcome::Created)
    } else {
        debug!(
            "Device {} already registered for pass {}",
            device_id, pass_id
        );
        Ok(RegistrationOutcome::AlreadyRegistered)
    }
}

/// List the serial numbers of passes updated since the given tag.
///
/// When nothing matched, `lastUpdated` echoes the tag the client sent
/// verbatim (`"0"` when it sent none); clients feed the value back as their
/// next `passesUpdatedSince`, so an unchanged tag must round-trip unchanged.
pub async fn list_updated(
    repo: &dyn PushAssociationRepository,
    configured_pass_type: &str,
    device_id: &str,
    pass_type: &str,
    updated_since: Option<String>,
) -> Result<PushQueryResponse, PassError> {
    if pass_type != configured_pass_type {
        return Err(PassError::InvalidPassType);
    }

    let tag = updated_since.unwrap_or_else(|| "0".to_string());
    let records = repo.find_updated_since(device_id, parse_tag(&tag)).await?;

    let last_updated = records
        .iter()
        .map(|r| r.created_at)
        .max()
        .map(|ts| ts.to_string())
        .unwrap_or(tag);
    let serial_numbers = records.into_iter().map(|r| r.pass_id).collect();

    Ok(PushQueryResponse {
        last_updated,
        serial_numbers,
    })
}

/// Remove every association matching the triple.
///
/// Zero matches is success; deregistration never fails for an unknown
/// triple.
pub async fn deregister_device(
    repo: &dyn PushAssociationRepository,
    configured_pass_type: &str,
    device_id: &str,
    pass_type: &str,
    pass_id: &str,
) -> Result<u64, PassError> {
    if pass_type != configured_pass_type {
        return Err(PassError::InvalidPassType);
    }

    let removed = repo.delete_all(device_id, pass_type, pass_id).await?;
    debug!(
        "Removed {} association(s) for device {} and pass {}",
        removed, device_id, pass_id
    );
    Ok(removed)
}

/// Interprets a `passesUpdatedSince` tag as whole seconds since the epoch.
///
/// An unparseable or negative tag means "all history", matching the
/// original service's behavior. Fractional tags truncate downward, which
/// preserves the strictly-greater comparison against integer timestamps.
pub fn parse_tag(tag: &str) -> i64 {
    tag.parse::<f64>()
        .ok()
        .filter(|t| t.is_finite() && *t >= 0.0)
        .map(|t| t as i64)
        .unwrap_or(0)
}

/// Whether the client's cached copy is still fresh.
///
/// The comparison is `>=` on purpose: a copy exactly as old as the file is
/// unchanged. Both sides compare at second granularity.
pub fn not_modified(
    if_modified_since: Option<DateTime<Utc>>,
    last_modified: DateTime<Utc>,
) -> bool {
    matches!(if_modified_since, Some(since) if since.timestamp() >= last_modified.timestamp())
}

/// Canonical retrieval path for a serial number under the configured type.
pub fn pass_retrieval_path(configured_pass_type: &str, serial_number: &str) -> String {
    format!("/v1/passes/{}/{}", configured_pass_type, serial_number)
}
