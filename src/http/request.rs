//! Client routing requests.
//!
//! Only `geo.country_code` drives selection; the rest is logged so the
//! assignment can be traced back to a client.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientRequest {
    pub username: String,
    pub email: String,
    pub ip: String,
    pub country: String,
    pub geo: Geo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Geo {
    pub country_code: String,
    pub city: String,
    pub region: String,
}

/// Body of the admin enable toggle.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EnableRequest {
    pub enable: bool,
}
