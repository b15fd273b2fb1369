// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::{format_currency, PaymentSummary};
use crate::gateway::{
    BusinessFormData, GeolocationHint, InvoiceId, PaymentGateway, PaymentId, PaymentRecord,
};
use crate::notice::NoticeBoard;
use crate::tax::is_eu_country;

const ALL_PAID: &str = "All invoices have been paid. Thank you!";
const LOAD_FAILED: &str = "Failed to load payment data. Please try again later.";
const LOCATION_FAILED: &str = "Failed to detect or save your location.";

#[derive(Clone, Debug, PartialEq)]
/// Where the page is in its load lifecycle.
pub enum PageState {
    /// The payment record fetch has not completed.
    Loading,
    /// The fetch failed.  Terminal; the only recovery is [`CheckoutPage::reload`].
    Failed(String),
    /// The payment record is on hand.
    Ready(ReadyView),
}

#[derive(Clone, Debug, PartialEq)]
/// The loaded payment record and the session substate derived around it.
pub struct ReadyView {
    /// The payment record, as fetched and then locally mutated.
    pub record: PaymentRecord,
    /// Edge-inferred VAT jurisdiction, if any.  A server-asserted VAT
    /// record on the payment takes precedence.
    pub jurisdiction: Option<String>,
    /// Whether the geolocation hint has been stored this session.
    pub geo_saved: bool,
    /// Whether a business draft has been accepted this session.
    pub form_accepted: bool,
}

#[derive(Debug)]
/// A page-level state transition.
pub enum PageEvent {
    /// The payment record arrived.
    FetchSucceeded(PaymentRecord),
    /// The payment record fetch failed.
    FetchFailed(String),
    /// The edge-supplied country was recognized as a VAT jurisdiction.
    JurisdictionDetected(String),
    /// The geolocation hint was stored.
    GeolocationSaved,
    /// The business registration draft was accepted.
    BusinessAccepted(BusinessFormData),
}

/// An affordance for paying one unpaid invoice: a hard redirect to the
/// externally supplied URL, with no confirmation step.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentAction {
    /// The invoice to pay.
    pub invoice_id: InvoiceId,
    /// Display label, e.g. "Pay inv-1".
    pub label: String,
    /// The external payment-redirect URL.
    pub url: String,
}

/// The checkout page orchestrator.  Owns the page state machine and the
/// session substate around the fetched payment record.
pub struct CheckoutPage {
    payment_id: PaymentId,
    state: PageState,
}

impl CheckoutPage {
    /// Apply a page-level state transition.  Events that do not apply to
    /// the current state are discarded.
    pub fn apply(&mut self, event: PageEvent) {
        match (&mut self.state, event) {
            (PageState::Loading, PageEvent::FetchSucceeded(record)) => {
                self.state = PageState::Ready(ReadyView {
                    record,
                    jurisdiction: None,
                    geo_saved: false,
                    form_accepted: false,
                });
            }
            (PageState::Loading, PageEvent::FetchFailed(message)) => {
                self.state = PageState::Failed(message);
            }
            (PageState::Ready(view), PageEvent::JurisdictionDetected(code)) => {
                view.jurisdiction = Some(code);
            }
            (PageState::Ready(view), PageEvent::GeolocationSaved) => {
                view.geo_saved = true;
            }
            (PageState::Ready(view), PageEvent::BusinessAccepted(draft)) => {
                view.record.business = Some(draft.into());
                view.form_accepted = true;
            }
            _ => {}
        }
    }

    /// Fold an accepted business draft into the payment record,
    /// permanently hiding the registration form for the session.
    pub fn business_accepted(&mut self, draft: BusinessFormData) {
        self.apply(PageEvent::BusinessAccepted(draft));
    }

    /// The read-only business details block, once a business record
    /// exists: name, address, "city, postal code", country, and VAT id.
    pub fn business_panel(&self) -> Option<Vec<String>> {
        let PageState::Ready(view) = &self.state else {
            return None;
        };
        let business = view.record.business.as_ref()?;
        Some(vec![
            business.name.clone(),
            business.address.clone(),
            format!("{}, {}", business.city, business.postal_code),
            business.country.clone(),
            format!("VAT ID: {}", business.id),
        ])
    }

    /// The payment description, once loaded.
    pub fn description(&self) -> Option<&str> {
        match &self.state {
            PageState::Ready(view) => Some(&view.record.payment_description),
            _ => None,
        }
    }

    /// Forward the edge-supplied geolocation hint.  Runs only for a new
    /// customer whose hint has not yet been stored this session; a
    /// recognized jurisdiction becomes the active one before the remote
    /// call.  Success flips the saved flag, so later invocations are
    /// no-ops; failure surfaces a notice and leaves the state unchanged.
    pub async fn detect_location(
        &mut self,
        gateway: &dyn PaymentGateway,
        hint: &GeolocationHint,
        notices: &NoticeBoard,
    ) {
        let customer_id = {
            let PageState::Ready(view) = &self.state else {
                return;
            };
            if !view.record.is_new_customer || view.geo_saved {
                return;
            }
            view.record.customer_id.clone()
        };
        if let Some(country) = hint.country().filter(|code| is_eu_country(code)) {
            self.apply(PageEvent::JurisdictionDetected(country.to_string()));
        }
        match gateway.submit_geolocation(&customer_id, hint).await {
            Ok(ack) => {
                self.apply(PageEvent::GeolocationSaved);
                let message = if ack.message.is_empty() {
                    format!("Your location has been detected as {}.", hint.country)
                } else {
                    ack.message
                };
                notices.info(message);
            }
            Err(_) => notices.error(LOCATION_FAILED.to_string()),
        }
    }

    /// Whether the business registration form should be shown: only
    /// while the record carries no business and no draft has been
    /// accepted.
    pub fn form_visible(&self) -> bool {
        match &self.state {
            PageState::Ready(view) => view.record.business.is_none() && !view.form_accepted,
            _ => false,
        }
    }

    /// Fetch the payment record.  A no-op unless the page is still
    /// loading, so the fetch is issued at most once per page load.
    pub async fn load(&mut self, gateway: &dyn PaymentGateway, notices: &NoticeBoard) {
        if self.state != PageState::Loading {
            return;
        }
        match gateway.fetch_payment(&self.payment_id).await {
            Ok(record) => self.apply(PageEvent::FetchSucceeded(record)),
            Err(_) => {
                notices.error(LOAD_FAILED.to_string());
                self.apply(PageEvent::FetchFailed(LOAD_FAILED.to_string()));
            }
        }
    }

    /// Create a page that will fetch the payment record on [`Self::load`].
    pub fn new(payment_id: PaymentId) -> Self {
        Self {
            payment_id,
            state: PageState::Loading,
        }
    }

    /// The static confirmation shown in place of payment affordances
    /// once every invoice is paid.
    pub fn paid_confirmation(&self) -> Option<&'static str> {
        match &self.state {
            PageState::Ready(view) if view.record.invoices.iter().all(|invoice| invoice.paid) => {
                Some(ALL_PAID)
            }
            _ => None,
        }
    }

    /// One payment affordance per unpaid invoice, in server order.
    pub fn payment_actions(&self) -> Vec<PaymentAction> {
        match &self.state {
            PageState::Ready(view) => view
                .record
                .invoices
                .iter()
                .filter(|invoice| !invoice.paid)
                .map(|invoice| PaymentAction {
                    invoice_id: invoice.invoice_id.clone(),
                    label: format!("Pay {}", invoice.invoice_id),
                    url: invoice.url.clone(),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Reset to loading and fetch again.  The only recovery from a
    /// failed load.
    pub async fn reload(&mut self, gateway: &dyn PaymentGateway, notices: &NoticeBoard) {
        self.state = PageState::Loading;
        self.load(gateway, notices).await;
    }

    /// The current page state.
    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// The summary figures for the current record and jurisdiction.
    pub fn summary(&self) -> Option<PaymentSummary> {
        match &self.state {
            PageState::Ready(view) => Some(PaymentSummary::derive(
                &view.record,
                view.jurisdiction.as_deref(),
            )),
            _ => None,
        }
    }

    /// The formatted total amount of the payment, once loaded.
    pub fn total(&self) -> Option<String> {
        match &self.state {
            PageState::Ready(view) => Some(format_currency(
                &view.record.payment_currency,
                view.record.payment_total_amount,
            )),
            _ => None,
        }
    }

    /// Create a page from a server-prefetched payment record, skipping
    /// the loading state entirely.
    pub fn with_record(payment_id: PaymentId, record: PaymentRecord) -> Self {
        Self {
            payment_id,
            state: PageState::Ready(ReadyView {
                record,
                jurisdiction: None,
                geo_saved: false,
                form_accepted: false,
            }),
        }
    }
}
