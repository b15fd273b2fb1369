// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::{CustomerId, GatewayClient};
use crate::common::Error;
use serde::{Deserialize, Serialize};

/// The literal the serving edge substitutes for a missing header value.
pub const EDGE_PLACEHOLDER: &str = "null";

const GEOLOCATION_FAILED: &str = "Failed to save geolocation data";
const GEOLOCATION_SAVED: &str = "Successfully saved geolocation data";

#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Jurisdiction hints supplied by the serving edge per request.  Absent
/// values carry the [`EDGE_PLACEHOLDER`] literal rather than being omitted.
pub struct GeolocationHint {
    /// Postal code, or the placeholder.
    pub postal_code: String,

    /// City, or the placeholder.
    pub city: String,

    /// Country code, or the placeholder.
    pub country: String,

    /// Region, or the placeholder.
    pub region: String,
}

impl GeolocationHint {
    /// The city, if known.
    pub fn city(&self) -> Option<&str> {
        Self::known(&self.city)
    }

    /// The country code, if known.
    pub fn country(&self) -> Option<&str> {
        Self::known(&self.country)
    }

    /// Build a hint from edge-supplied header values, normalizing absent
    /// values to the placeholder.
    pub fn from_edge_headers(
        country: Option<String>,
        city: Option<String>,
        region: Option<String>,
        postal_code: Option<String>,
    ) -> Self {
        let or_placeholder =
            |value: Option<String>| value.unwrap_or_else(|| EDGE_PLACEHOLDER.to_string());
        Self {
            postal_code: or_placeholder(postal_code),
            city: or_placeholder(city),
            country: or_placeholder(country),
            region: or_placeholder(region),
        }
    }

    fn known(value: &str) -> Option<&str> {
        if value.is_empty() || value == EDGE_PLACEHOLDER {
            None
        } else {
            Some(value)
        }
    }

    /// The region, if known.
    pub fn region(&self) -> Option<&str> {
        Self::known(&self.region)
    }

    /// The postal code, if known.
    pub fn postal_code(&self) -> Option<&str> {
        Self::known(&self.postal_code)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
/// Acknowledgement of a stored geolocation hint.
pub struct GeolocationAck {
    /// Human-readable confirmation.
    pub message: String,
}

impl GatewayClient {
    /// Forward the edge-supplied jurisdiction hints for storage.  Non-auth
    /// failures collapse to a fixed network error and the response body is
    /// never decoded; success fabricates a fixed acknowledgement.
    pub async fn submit_geolocation(
        &self,
        customer_id: &CustomerId,
        hint: &GeolocationHint,
    ) -> Result<GeolocationAck, Error> {
        let request_path = format!("{}/{customer_id}", self.business_endpoint());
        self.with_auth_retry(|token| {
            let request_path = request_path.clone();
            async move {
                match self.post(request_path, hint, token).await {
                    Ok(()) => Ok(GeolocationAck {
                        message: GEOLOCATION_SAVED.to_string(),
                    }),
                    Err(e) if e.is_auth_failure() => Err(e),
                    Err(_) => Err(Error::Network(GEOLOCATION_FAILED.to_string())),
                }
            }
        })
        .await
    }
}
