// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

/// Business/VAT registration records.
mod business;
/// DevRoom API HTTP client.
mod client;
/// Client-side bearer-token cache.
mod credentials;
/// Edge-supplied jurisdiction hints.
mod geolocation;
/// Payment and invoice records.
mod payment;
/// Tests.
mod tests;

pub use self::business::{Business, BusinessFormData};
pub use self::client::{new_gateway_client, GatewayClient, PaymentGateway};
pub use self::credentials::{AuthToken, CredentialStore};
pub use self::geolocation::{GeolocationAck, GeolocationHint, EDGE_PLACEHOLDER};
pub use self::payment::{
    CustomerId, Invoice, InvoiceId, PaymentId, PaymentRecord, UserId, Vat, VatRate,
};
