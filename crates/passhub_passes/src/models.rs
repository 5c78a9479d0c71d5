use serde::{Deserialize, Serialize};

/// Body of the registration POST.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationPayload {
    /// Token the device presents to receive push notifications.
    ///
    /// Optional at the serde level so an absent field reaches the handler
    /// and maps to 400, instead of being rejected during extraction.
    #[serde(rename = "pushToken")]
    pub push_token: Option<String>,
}

/// Response of the change query.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushQueryResponse {
    /// Tag for the client's next `passesUpdatedSince`; echoes the request
    /// tag when no records matched.
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    #[serde(rename = "serialNumbers")]
    pub serial_numbers: Vec<String>,
}

/// Query string of the change query.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatedSinceQuery {
    #[serde(rename = "passesUpdatedSince")]
    pub passes_updated_since: Option<String>,
}
