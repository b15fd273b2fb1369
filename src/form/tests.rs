// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

#[cfg(test)]
mod form_tests {
    use crate::common::Error;
    use crate::form::{BusinessForm, Field, FormPhase};
    use crate::gateway::{
        BusinessFormData, CustomerId, GeolocationAck, GeolocationHint, PaymentGateway, PaymentId,
        PaymentRecord,
    };
    use crate::notice::{NoticeBoard, Severity};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct StubGateway {
        fail_submissions: bool,
        submissions: AtomicUsize,
    }

    impl StubGateway {
        fn failing() -> Self {
            Self {
                fail_submissions: true,
                ..Default::default()
            }
        }

        fn submissions(&self) -> usize {
            self.submissions.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PaymentGateway for StubGateway {
        async fn fetch_payment(&self, _payment_id: &PaymentId) -> Result<PaymentRecord, Error> {
            unimplemented!("not exercised by the form")
        }

        async fn submit_business(
            &self,
            _payment_id: &PaymentId,
            _form_data: &BusinessFormData,
        ) -> Result<(), Error> {
            self.submissions.fetch_add(1, Ordering::SeqCst);
            if self.fail_submissions {
                Err(Error::Network("connection reset".to_string()))
            } else {
                Ok(())
            }
        }

        async fn submit_geolocation(
            &self,
            _customer_id: &CustomerId,
            _hint: &GeolocationHint,
        ) -> Result<GeolocationAck, Error> {
            unimplemented!("not exercised by the form")
        }
    }

    fn filled_form() -> BusinessForm {
        let mut form = BusinessForm::new();
        form.toggle();
        form.edit(Field::Name, "Acme GmbH".to_string());
        form.edit(Field::Country, "DE".to_string());
        form.edit(Field::Address, "1 Main St".to_string());
        form.edit(Field::City, "Berlin".to_string());
        form.edit(Field::PostalCode, "10115".to_string());
        form.edit(Field::VatId, "DE123456789".to_string());
        form
    }

    fn payment_id() -> PaymentId {
        PaymentId("pay-1".to_string())
    }

    #[test]
    fn toggle_flips_disclosure_only() {
        let mut form = BusinessForm::new();
        assert_eq!(form.phase(), FormPhase::Collapsed);
        assert_eq!(form.toggle_label(), "Are you registered for VAT?");

        form.toggle();
        assert_eq!(form.phase(), FormPhase::Expanded);
        assert_eq!(form.toggle_label(), "Hide VAT registration details");

        form.edit(Field::Name, "Acme GmbH".to_string());
        form.toggle();
        assert_eq!(form.phase(), FormPhase::Collapsed);
        assert_eq!(form.draft().name, "Acme GmbH");
    }

    #[tokio::test]
    async fn blank_fields_block_submission_without_network() {
        let gateway = StubGateway::default();
        let notices = NoticeBoard::new(false);
        let mut form = BusinessForm::new();
        form.toggle();
        form.edit(Field::City, "   ".to_string());

        let error = form
            .submit(&gateway, &payment_id(), &notices)
            .await
            .unwrap_err();
        match error {
            Error::Validation(field_errors) => assert_eq!(field_errors.len(), 6),
            other => panic!("{other}: expected Validation"),
        }
        assert_eq!(gateway.submissions(), 0);
        assert_eq!(form.phase(), FormPhase::Expanded);
        assert_eq!(form.error(Field::Name), Some("Entity name is required"));
        assert_eq!(form.error(Field::Country), Some("Country is required"));
        assert_eq!(form.error(Field::Address), Some("Address is required"));
        assert_eq!(form.error(Field::City), Some("City is required"));
        assert_eq!(form.error(Field::PostalCode), Some("Postal code is required"));
        assert_eq!(form.error(Field::VatId), Some("VAT ID is required"));
        assert!(notices.notices().is_empty());
    }

    #[tokio::test]
    async fn unrecognized_country_blocks_submission() {
        let gateway = StubGateway::default();
        let notices = NoticeBoard::new(false);
        let mut form = filled_form();
        form.edit(Field::Country, "US".to_string());

        let error = form
            .submit(&gateway, &payment_id(), &notices)
            .await
            .unwrap_err();
        match error {
            Error::Validation(field_errors) => assert_eq!(field_errors.len(), 1),
            other => panic!("{other}: expected Validation"),
        }
        assert_eq!(gateway.submissions(), 0);
        assert_eq!(
            form.error(Field::Country),
            Some("Country is not a recognized jurisdiction")
        );
    }

    #[tokio::test]
    async fn edit_clears_only_that_fields_error() {
        let gateway = StubGateway::default();
        let notices = NoticeBoard::new(false);
        let mut form = BusinessForm::new();
        form.toggle();
        form.submit(&gateway, &payment_id(), &notices)
            .await
            .unwrap_err();

        form.edit(Field::Name, "Acme GmbH".to_string());
        assert_eq!(form.error(Field::Name), None);
        assert_eq!(form.error(Field::City), Some("City is required"));
    }

    #[tokio::test]
    async fn successful_submission_hands_off_the_draft() {
        let gateway = StubGateway::default();
        let notices = NoticeBoard::new(false);
        let mut form = filled_form();

        let accepted = form
            .submit(&gateway, &payment_id(), &notices)
            .await
            .unwrap();
        assert_eq!(accepted, *form.draft());
        assert_eq!(accepted.vat_id, "DE123456789");
        assert_eq!(form.phase(), FormPhase::SubmittedOk);
        assert_eq!(gateway.submissions(), 1);

        let posted = notices.notices();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].severity, Severity::Success);
        assert_eq!(
            posted[0].message,
            "Your business details have been saved successfully."
        );

        // The accepted draft is final.
        form.edit(Field::Name, "Other".to_string());
        assert_eq!(form.draft().name, "Acme GmbH");
    }

    #[tokio::test]
    async fn failed_submission_keeps_the_draft_for_retry() {
        let notices = NoticeBoard::new(false);
        let mut form = filled_form();

        let failing = StubGateway::failing();
        let error = form
            .submit(&failing, &payment_id(), &notices)
            .await
            .unwrap_err();
        assert!(matches!(error, Error::Network(_)));
        assert_eq!(failing.submissions(), 1);
        assert_eq!(form.phase(), FormPhase::SubmittedError);
        assert_eq!(form.draft().name, "Acme GmbH");

        let posted = notices.notices();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].severity, Severity::Error);
        assert_eq!(
            posted[0].message,
            "Failed to save business details. Please try again."
        );

        // Retry without retyping.
        let gateway = StubGateway::default();
        form.submit(&gateway, &payment_id(), &notices)
            .await
            .unwrap();
        assert_eq!(form.phase(), FormPhase::SubmittedOk);
        assert_eq!(gateway.submissions(), 1);
    }

    #[tokio::test]
    async fn submission_requires_an_open_form() {
        let gateway = StubGateway::default();
        let notices = NoticeBoard::new(false);
        let mut form = BusinessForm::new();

        let error = form
            .submit(&gateway, &payment_id(), &notices)
            .await
            .unwrap_err();
        assert!(matches!(error, Error::String(_)));
        assert_eq!(gateway.submissions(), 0);
    }

    #[test]
    fn submit_label_reflects_the_phase() {
        let form = BusinessForm::new();
        assert_eq!(form.submit_label(), "Save Business Details");
        assert!(!form.is_submitting());
    }
}
