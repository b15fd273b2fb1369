// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::{GatewayClient, PaymentId};
use crate::common::Error;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Business/VAT registration record.
pub struct Business {
    /// The business's VAT id.
    pub id: String,

    /// Jurisdiction country code.
    pub country: String,

    /// City of the registered address.
    pub city: String,

    /// Legal entity name.
    pub name: String,

    /// Street address.
    pub address: String,

    /// Postal code of the registered address.
    pub postal_code: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
/// User-entered draft of a [`Business`] record.  Exists client-side only;
/// folded into the payment record once submission succeeds.
pub struct BusinessFormData {
    /// Legal entity name.
    pub name: String,

    /// Jurisdiction country code.
    pub country: String,

    /// Street address.
    pub address: String,

    /// City of the registered address.
    pub city: String,

    /// Postal code of the registered address.
    pub postal_code: String,

    /// The business's VAT id.
    pub vat_id: String,
}

impl From<BusinessFormData> for Business {
    fn from(form_data: BusinessFormData) -> Self {
        Self {
            id: form_data.vat_id,
            country: form_data.country,
            city: form_data.city,
            name: form_data.name,
            address: form_data.address,
            postal_code: form_data.postal_code,
        }
    }
}

impl GatewayClient {
    /// Persist the business/VAT registration details for the payment.
    pub async fn submit_business(
        &self,
        payment_id: &PaymentId,
        form_data: &BusinessFormData,
    ) -> Result<(), Error> {
        #[derive(Debug, Serialize)]
        #[serde(rename_all = "camelCase")]
        struct BusinessUpdate<'a> {
            name: &'a str,
            billing_address_line1: &'a str,
            postal_code: &'a str,
            city: &'a str,
            country: &'a str,
            vat_value: &'a str,
            vat_type: &'a str,
        }
        let update = BusinessUpdate {
            name: &form_data.name,
            billing_address_line1: &form_data.address,
            postal_code: &form_data.postal_code,
            city: &form_data.city,
            country: &form_data.country,
            // The wire schema has no separate VAT-type selector yet, so the
            // single VAT id populates both attributes.
            vat_value: &form_data.vat_id,
            vat_type: &form_data.vat_id,
        };
        let request_path = format!("{}/{payment_id}", self.business_endpoint());
        self.with_auth_retry(|token| self.post(request_path.clone(), &update, token))
            .await
    }
}
