// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::{
    AuthToken, BusinessFormData, CredentialStore, CustomerId, GeolocationAck, GeolocationHint,
    PaymentId, PaymentRecord,
};
use crate::common::{CheckoutConfig, Error};
use async_trait::async_trait;
use core::fmt::Debug;
use core::future::Future;
use hyper::{Method, StatusCode};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEBUG_REQUEST: bool = false;
const DEBUG_RESPONSE: bool = false;
const DEFAULT_TIMEOUT_SECONDS: u64 = 20;

/// DevRoom API HTTP client.
pub struct GatewayClient {
    application_id: String,
    auth_endpoint: String,
    business_endpoint: String,
    client: reqwest::Client,
    credentials: CredentialStore,
    data_endpoint: String,
    key: String,
}

impl GatewayClient {
    /// Create a DevRoom API client from the `[gateway]` config section.
    pub fn new(
        checkout_config: &CheckoutConfig,
        credentials: CredentialStore,
    ) -> Result<Self, Error> {
        #[derive(Deserialize)]
        struct GatewayConfig {
            application_id: String,
            auth_endpoint: String,
            business_endpoint: String,
            data_endpoint: String,
            key: String,
            timeout_seconds: Option<u64>,
        }
        #[derive(Deserialize)]
        struct ConfigToml {
            gateway: GatewayConfig,
        }
        let ConfigToml {
            gateway:
                GatewayConfig {
                    application_id,
                    auth_endpoint,
                    business_endpoint,
                    data_endpoint,
                    key,
                    timeout_seconds,
                },
        } = checkout_config.get()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(
                timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            ))
            .build()
            .map_err(|e| Error::String(format!("cannot create http client: {e}")))?;
        Ok(Self {
            application_id,
            auth_endpoint,
            business_endpoint,
            client,
            credentials,
            data_endpoint,
            key,
        })
    }

    pub(crate) fn business_endpoint(&self) -> &str {
        &self.business_endpoint
    }

    // Authorization failures are eligible for the one-shot retry; the
    // server reports an invalid token either via the status code or via
    // an "Invalid token" body.
    fn classify(status: StatusCode, body: String) -> Error {
        if status == StatusCode::UNAUTHORIZED
            || status == StatusCode::FORBIDDEN
            || body.contains("Invalid token")
        {
            Error::Auth(status, body)
        } else {
            Error::Http(status, body)
        }
    }

    pub(crate) fn data_endpoint(&self) -> &str {
        &self.data_endpoint
    }

    /// Get the object with the specified path from the DevRoom API.
    pub(crate) async fn get<T: Debug + DeserializeOwned>(
        &self,
        request_path: String,
        token: AuthToken,
    ) -> Result<T, Error> {
        if DEBUG_REQUEST {
            println!(">> GET {request_path}");
        }
        let request = self
            .client
            .request(Method::GET, &request_path)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"));
        match request.send().await {
            Ok(r) => {
                let status = r.status();
                if status.is_success() {
                    match r.json().await {
                        Ok(response) => {
                            if DEBUG_RESPONSE {
                                println!("{response:?} (code {status})");
                            }
                            Ok(response)
                        }
                        Err(e) => Err(Error::Http(status, format!("gateway JSON: {e}"))),
                    }
                } else {
                    match r.text().await {
                        Ok(body) => Err(Self::classify(status, body)),
                        Err(e) => Err(Self::classify(status, e.to_string())),
                    }
                }
            }
            Err(e) => Err(Error::Network(format!("gateway GET: {e}"))),
        }
    }

    /// Mint a fresh bearer token via the credential exchange.
    async fn mint_token(&self) -> Result<AuthToken, Error> {
        #[derive(Debug, Serialize)]
        #[serde(rename_all = "camelCase")]
        struct TokenRequest<'a> {
            application_id: &'a str,
            key: &'a str,
        }
        #[derive(Debug, Deserialize)]
        struct TokenResponse {
            token: AuthToken,
        }
        if DEBUG_REQUEST {
            println!(">> POST {}", self.auth_endpoint);
        }
        let request = self
            .client
            .request(Method::POST, &self.auth_endpoint)
            .json(&TokenRequest {
                application_id: &self.application_id,
                key: &self.key,
            });
        match request.send().await {
            Ok(r) => {
                let status = r.status();
                if status.is_success() {
                    match r.json().await {
                        Ok(TokenResponse { token }) => Ok(token),
                        Err(e) => Err(Error::Http(status, format!("token JSON: {e}"))),
                    }
                } else {
                    match r.text().await {
                        Ok(body) => Err(Error::Http(status, format!("token mint: {body}"))),
                        Err(e) => Err(Error::Http(status, format!("token mint: {e}"))),
                    }
                }
            }
            Err(e) => Err(Error::Network(format!("token mint: {e}"))),
        }
    }

    /// Post a JSON payload to the specified path of the DevRoom API.
    pub(crate) async fn post<F: Debug + Serialize>(
        &self,
        request_path: String,
        payload: &F,
        token: AuthToken,
    ) -> Result<(), Error> {
        if DEBUG_REQUEST {
            println!(">> POST {request_path}\n{payload:?}");
        }
        let request = self
            .client
            .request(Method::POST, &request_path)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"))
            .json(payload);
        match request.send().await {
            Ok(r) => {
                let status = r.status();
                if status.is_success() {
                    if DEBUG_RESPONSE {
                        println!("(code {status})");
                    }
                    Ok(())
                } else {
                    match r.text().await {
                        Ok(body) => Err(Self::classify(status, body)),
                        Err(e) => Err(Self::classify(status, e.to_string())),
                    }
                }
            }
            Err(e) => Err(Error::Network(format!("gateway POST: {e}"))),
        }
    }

    /// Mint a fresh token and store it, replacing any cached one.
    async fn refresh_token(&self) -> Result<AuthToken, Error> {
        let token = self.mint_token().await?;
        self.credentials.write(token.clone());
        Ok(token)
    }

    /// Returns the cached token, minting one if absent or expired.
    async fn token(&self) -> Result<AuthToken, Error> {
        if let Some(token) = self.credentials.read() {
            Ok(token)
        } else {
            self.refresh_token().await
        }
    }

    /// Run `call` with a bearer token.  On an authorization failure, mint
    /// exactly one fresh token and retry exactly once; any second failure
    /// propagates unmodified.
    pub(crate) async fn with_auth_retry<T, F, Fut>(&self, call: F) -> Result<T, Error>
    where
        F: Fn(AuthToken) -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        let token = self.token().await?;
        match call(token).await {
            Err(e) if e.is_auth_failure() => {
                let token = self.refresh_token().await?;
                call(token).await
            }
            result => result,
        }
    }
}

/// The remote operations the checkout page depends on.
#[async_trait]
pub trait PaymentGateway {
    /// Fetches the payment record for the specified payment.
    async fn fetch_payment(&self, payment_id: &PaymentId) -> Result<PaymentRecord, Error>;
    /// Persists the business/VAT registration details.
    async fn submit_business(
        &self,
        payment_id: &PaymentId,
        form_data: &BusinessFormData,
    ) -> Result<(), Error>;
    /// Forwards the edge-supplied jurisdiction hints for storage.
    async fn submit_geolocation(
        &self,
        customer_id: &CustomerId,
        hint: &GeolocationHint,
    ) -> Result<GeolocationAck, Error>;
}

#[async_trait]
impl PaymentGateway for GatewayClient {
    async fn fetch_payment(&self, payment_id: &PaymentId) -> Result<PaymentRecord, Error> {
        GatewayClient::fetch_payment(self, payment_id).await
    }

    async fn submit_business(
        &self,
        payment_id: &PaymentId,
        form_data: &BusinessFormData,
    ) -> Result<(), Error> {
        GatewayClient::submit_business(self, payment_id, form_data).await
    }

    async fn submit_geolocation(
        &self,
        customer_id: &CustomerId,
        hint: &GeolocationHint,
    ) -> Result<GeolocationAck, Error> {
        GatewayClient::submit_geolocation(self, customer_id, hint).await
    }
}

/// Create a DevRoom API client.
pub fn new_gateway_client(
    checkout_config: &CheckoutConfig,
    credentials: CredentialStore,
) -> Result<GatewayClient, Error> {
    GatewayClient::new(checkout_config, credentials)
}
