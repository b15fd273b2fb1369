// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::{Business, GatewayClient};
use crate::common::Error;
use crate::serde_utils::{is_default, FromStrVisitor};
use crate::{impl_wrapper_display, impl_wrapper_display_from_str, impl_wrapper_from_str};
use crate::{impl_wrapper_str, serde_str};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
/// Payment ID.
pub struct PaymentId(pub String);
impl_wrapper_str!(PaymentId);

#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
/// Customer ID.
pub struct CustomerId(pub String);
impl_wrapper_str!(CustomerId);

#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
/// User ID.
pub struct UserId(pub String);
impl_wrapper_str!(UserId);

#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
/// Invoice ID.
pub struct InvoiceId(pub String);
impl_wrapper_str!(InvoiceId);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
/// VAT rate in whole percent.  Travels as a decimal string on the wire.
pub struct VatRate(pub u8);
impl_wrapper_display_from_str!(VatRate, u8);
serde_str!(VatRate);

#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
/// Server-asserted VAT jurisdiction and rate.
pub struct Vat {
    /// Jurisdiction country code, e.g. "DE".
    pub country: String,
    /// VAT rate in whole percent.
    pub rate: VatRate,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// A single payable invoice.
pub struct Invoice {
    /// Unique identifier for the invoice.
    pub invoice_id: InvoiceId,

    /// Invoice amount in the parent payment's currency.
    pub amount: f64,

    /// External payment-redirect URL.
    pub url: String,

    /// Whether the invoice has already been paid.
    pub paid: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// A payable obligation fetched from the DevRoom API.
pub struct PaymentRecord {
    /// Total amount of the payment.
    pub payment_total_amount: f64,

    /// 3-letter currency designation, e.g. "USD".
    pub payment_currency: String,

    /// The payment's invoices, in server order.
    pub invoices: Vec<Invoice>,

    /// Free-text description of the payment.
    pub payment_description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Server-asserted VAT record, if any.  Takes precedence over any
    /// client-inferred jurisdiction.
    pub vat: Option<Vat>,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Business registration record, if any.
    pub business: Option<Business>,

    #[serde(default, skip_serializing_if = "is_default")]
    /// Whether any geolocation/business data has yet to be recorded for
    /// the owning customer.
    pub is_new_customer: bool,

    /// Credit applied to the payment.
    pub credit_amount: f64,

    /// Balance applied to the payment.
    pub balance_amount: f64,

    /// Amount still owed, before VAT.  Independent of `invoices[].paid`.
    pub amount_due: f64,

    /// Owning user.
    pub user_id: UserId,

    /// Owning customer.
    pub customer_id: CustomerId,
}

impl GatewayClient {
    /// Fetch the payment record for the specified payment.
    pub async fn fetch_payment(&self, payment_id: &PaymentId) -> Result<PaymentRecord, Error> {
        let request_path = format!("{}/{payment_id}", self.data_endpoint());
        self.with_auth_retry(|token| self.get(request_path.clone(), token))
            .await
    }
}
