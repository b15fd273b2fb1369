// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

#[cfg(test)]
mod gateway_tests {
    use crate::common::{CheckoutConfig, Error};
    use crate::gateway::{
        AuthToken, BusinessFormData, CredentialStore, CustomerId, GatewayClient, GeolocationHint,
        PaymentId, VatRate,
    };
    use chrono::{Duration, Utc};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(mock_server: &MockServer, credentials: CredentialStore) -> GatewayClient {
        let toml = format!(
            concat!(
                "[gateway]\n",
                "application_id = \"test\"\n",
                "auth_endpoint = \"{uri}/get-token\"\n",
                "business_endpoint = \"{uri}/api/data/business\"\n",
                "data_endpoint = \"{uri}/api/data\"\n",
                "key = \"test-key\"\n",
                "timeout_seconds = 5\n",
            ),
            uri = mock_server.uri()
        );
        let checkout_config = CheckoutConfig::builder()
            .toml_string(toml)
            .build()
            .unwrap();
        GatewayClient::new(&checkout_config, credentials).unwrap()
    }

    fn payment_body() -> serde_json::Value {
        json!({
            "paymentTotalAmount": 100.0,
            "paymentCurrency": "USD",
            "invoices": [
                {"invoiceId": "inv-1", "amount": 100.0, "url": "https://pay.example/inv-1", "paid": false}
            ],
            "paymentDescription": "DevRoom subscription",
            "vat": {"country": "DE", "rate": "19"},
            "business": null,
            "isNewCustomer": true,
            "creditAmount": 0.0,
            "balanceAmount": 0.0,
            "amountDue": 100.0,
            "userId": "user-1",
            "customerId": "cus-1"
        })
    }

    fn seeded_store(token: &str) -> CredentialStore {
        let credentials = CredentialStore::new();
        credentials.write(AuthToken(token.to_string()));
        credentials
    }

    #[test]
    fn credential_store_expires_and_clears() {
        let credentials = CredentialStore::new();
        assert_eq!(credentials.read(), None);

        credentials.write(AuthToken("fresh".to_string()));
        assert_eq!(credentials.read(), Some(AuthToken("fresh".to_string())));

        credentials.write_expiring(
            AuthToken("stale".to_string()),
            Utc::now() - Duration::seconds(1),
        );
        assert_eq!(credentials.read(), None);

        credentials.write(AuthToken("again".to_string()));
        credentials.clear();
        assert_eq!(credentials.read(), None);
    }

    #[tokio::test]
    async fn fetch_payment_mints_token_when_store_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/get-token"))
            .and(body_json(json!({"applicationId": "test", "key": "test-key"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "tok-1"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/data/pay-1"))
            .and(header("authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payment_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let credentials = CredentialStore::new();
        let client = test_client(&mock_server, credentials.clone());
        let record = client
            .fetch_payment(&PaymentId("pay-1".to_string()))
            .await
            .unwrap();

        assert_eq!(record.payment_currency, "USD");
        assert_eq!(record.amount_due, 100.0);
        assert_eq!(record.invoices.len(), 1);
        assert_eq!(record.vat.as_ref().unwrap().rate, VatRate(19));
        assert!(record.is_new_customer);
        assert_eq!(credentials.read(), Some(AuthToken("tok-1".to_string())));
    }

    #[tokio::test]
    async fn fetch_payment_reuses_cached_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/get-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "unused"})))
            .expect(0)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/data/pay-1"))
            .and(header("authorization", "Bearer cached"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payment_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server, seeded_store("cached"));
        client
            .fetch_payment(&PaymentId("pay-1".to_string()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn auth_failure_remints_once_and_retries_once() {
        let mock_server = MockServer::start().await;

        // The stale token is rejected exactly once.
        Mock::given(method("GET"))
            .and(path("/api/data/pay-1"))
            .and(header("authorization", "Bearer stale"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid token"))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/get-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "fresh"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/data/pay-1"))
            .and(header("authorization", "Bearer fresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payment_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let credentials = seeded_store("stale");
        let client = test_client(&mock_server, credentials.clone());
        let record = client
            .fetch_payment(&PaymentId("pay-1".to_string()))
            .await
            .unwrap();

        assert_eq!(record.customer_id.as_str(), "cus-1");
        assert_eq!(credentials.read(), Some(AuthToken("fresh".to_string())));
    }

    #[tokio::test]
    async fn second_auth_failure_propagates_without_third_attempt() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/data/pay-1"))
            .respond_with(ResponseTemplate::new(403).set_body_string("still no"))
            .expect(2)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/get-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "fresh"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server, seeded_store("stale"));
        let error = client
            .fetch_payment(&PaymentId("pay-1".to_string()))
            .await
            .unwrap_err();
        assert!(error.is_auth_failure());
    }

    #[tokio::test]
    async fn invalid_token_body_counts_as_auth_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/data/pay-1"))
            .and(header("authorization", "Bearer stale"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string("{\"error\": \"Invalid token\"}"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/get-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "fresh"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/data/pay-1"))
            .and(header("authorization", "Bearer fresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payment_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server, seeded_store("stale"));
        client
            .fetch_payment(&PaymentId("pay-1".to_string()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn non_auth_failure_is_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/data/gone"))
            .respond_with(ResponseTemplate::new(404).set_body_string("gone: not found"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server, seeded_store("cached"));
        let error = client
            .fetch_payment(&PaymentId("gone".to_string()))
            .await
            .unwrap_err();
        match error {
            Error::Http(status, body) => {
                assert_eq!(status.as_u16(), 404);
                assert!(body.contains("not found"));
            }
            other => panic!("{other}: expected Http"),
        }
    }

    #[tokio::test]
    async fn submit_business_maps_draft_to_wire_schema() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/data/business/pay-9"))
            .and(header("authorization", "Bearer cached"))
            .and(body_json(json!({
                "name": "Acme GmbH",
                "billingAddressLine1": "1 Main St",
                "postalCode": "10115",
                "city": "Berlin",
                "country": "DE",
                "vatValue": "DE123456789",
                "vatType": "DE123456789"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server, seeded_store("cached"));
        let form_data = BusinessFormData {
            name: "Acme GmbH".to_string(),
            country: "DE".to_string(),
            address: "1 Main St".to_string(),
            city: "Berlin".to_string(),
            postal_code: "10115".to_string(),
            vat_id: "DE123456789".to_string(),
        };
        client
            .submit_business(&PaymentId("pay-9".to_string()), &form_data)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn submit_geolocation_fabricates_ack_and_collapses_failures() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/data/business/cus-1"))
            .and(body_json(json!({
                "postalCode": "10115",
                "city": "Berlin",
                "country": "DE",
                "region": "null"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("whatever the server says"))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/data/business/cus-2"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server, seeded_store("cached"));
        let hint = GeolocationHint::from_edge_headers(
            Some("DE".to_string()),
            Some("Berlin".to_string()),
            None,
            Some("10115".to_string()),
        );

        let ack = client
            .submit_geolocation(&CustomerId("cus-1".to_string()), &hint)
            .await
            .unwrap();
        assert_eq!(ack.message, "Successfully saved geolocation data");

        let error = client
            .submit_geolocation(&CustomerId("cus-2".to_string()), &hint)
            .await
            .unwrap_err();
        match error {
            Error::Network(message) => {
                assert_eq!(message, "Failed to save geolocation data");
            }
            other => panic!("{other}: expected Network"),
        }
    }

    #[test]
    fn geolocation_hint_treats_placeholder_as_unknown() {
        let hint = GeolocationHint::from_edge_headers(Some("de".to_string()), None, None, None);
        assert_eq!(hint.country(), Some("de"));
        assert_eq!(hint.city(), None);
        assert_eq!(hint.region(), None);
        assert_eq!(hint.postal_code(), None);
        assert_eq!(hint.city, "null");
    }

    #[test]
    fn vat_rate_travels_as_a_string() {
        let rate: VatRate = serde_json::from_str("\"21\"").unwrap();
        assert_eq!(rate, VatRate(21));
        assert_eq!(serde_json::to_string(&rate).unwrap(), "\"21\"");
        assert!(serde_json::from_str::<VatRate>("\"19.5\"").is_err());
    }
}
