// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::common::{Error, FieldError};
use crate::gateway::{BusinessFormData, PaymentGateway, PaymentId};
use crate::notice::NoticeBoard;
use crate::tax::is_eu_country;

const BUSINESS_SAVED: &str = "Your business details have been saved successfully.";
const BUSINESS_SAVE_FAILED: &str = "Failed to save business details. Please try again.";
const SUBMIT_BUSY: &str = "Saving...";
const SUBMIT_IDLE: &str = "Save Business Details";
const TOGGLE_COLLAPSED: &str = "Are you registered for VAT?";
const TOGGLE_EXPANDED: &str = "Hide VAT registration details";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
/// A field of the business registration form.
pub enum Field {
    /// Legal entity name.
    Name,
    /// Jurisdiction country code.
    Country,
    /// Street address.
    Address,
    /// City of the registered address.
    City,
    /// Postal code of the registered address.
    PostalCode,
    /// The business's VAT id.
    VatId,
}

impl Field {
    /// All fields, in display order.
    pub const ALL: [Field; 6] = [
        Field::Name,
        Field::Country,
        Field::Address,
        Field::City,
        Field::PostalCode,
        Field::VatId,
    ];

    /// The field's wire name, which keys its validation message.
    pub fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Country => "country",
            Field::Address => "address",
            Field::City => "city",
            Field::PostalCode => "postalCode",
            Field::VatId => "vatId",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
/// Where the form is in its disclose/edit/submit lifecycle.
pub enum FormPhase {
    /// Disclosure closed; the draft is retained.
    Collapsed,
    /// Open for editing.
    Expanded,
    /// A submission is in flight; the submit control is disabled.
    Submitting,
    /// The draft was accepted; the form's work is done.
    SubmittedOk,
    /// The submission failed; the draft is retained for retry.
    SubmittedError,
}

/// The business/VAT registration form.  Owns the draft, the per-field
/// validation messages, and the submission lifecycle.
pub struct BusinessForm {
    draft: BusinessFormData,
    errors: Vec<FieldError>,
    phase: FormPhase,
}

impl BusinessForm {
    /// The current draft.
    pub fn draft(&self) -> &BusinessFormData {
        &self.draft
    }

    /// Record an edit to the specified field, clearing that field's
    /// validation message only.  Ignored while a submission is in flight
    /// or after one has been accepted.
    pub fn edit(&mut self, field: Field, value: String) {
        match self.phase {
            FormPhase::Submitting | FormPhase::SubmittedOk => return,
            FormPhase::SubmittedError => self.phase = FormPhase::Expanded,
            _ => {}
        }
        self.errors.retain(|e| e.field != field.name());
        match field {
            Field::Name => self.draft.name = value,
            Field::Country => self.draft.country = value,
            Field::Address => self.draft.address = value,
            Field::City => self.draft.city = value,
            Field::PostalCode => self.draft.postal_code = value,
            Field::VatId => self.draft.vat_id = value,
        }
    }

    /// The validation message for the specified field, if any.
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field.name())
            .map(|e| e.message.as_str())
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    /// Create a collapsed form with an empty draft.
    pub fn new() -> Self {
        Self {
            draft: BusinessFormData::default(),
            errors: Vec::new(),
            phase: FormPhase::Collapsed,
        }
    }

    /// The current phase.
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Validate and submit the draft.  Validation failures populate the
    /// per-field messages and return without any remote call.  On success
    /// the accepted draft is handed to the caller; on failure the draft is
    /// retained so the user can retry without retyping.
    pub async fn submit(
        &mut self,
        gateway: &dyn PaymentGateway,
        payment_id: &PaymentId,
        notices: &NoticeBoard,
    ) -> Result<BusinessFormData, Error> {
        match self.phase {
            FormPhase::Expanded | FormPhase::SubmittedError => {}
            _ => return Err(Error::String("submit: form is not open".to_string())),
        }
        let errors = Self::validate(&self.draft);
        if !errors.is_empty() {
            self.errors = errors.clone();
            self.phase = FormPhase::Expanded;
            return Err(Error::Validation(errors));
        }
        self.errors.clear();
        self.phase = FormPhase::Submitting;
        match gateway.submit_business(payment_id, &self.draft).await {
            Ok(()) => {
                self.phase = FormPhase::SubmittedOk;
                notices.success(BUSINESS_SAVED.to_string());
                Ok(self.draft.clone())
            }
            Err(e) => {
                self.phase = FormPhase::SubmittedError;
                notices.error(BUSINESS_SAVE_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// The label of the submit control.
    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            SUBMIT_BUSY
        } else {
            SUBMIT_IDLE
        }
    }

    /// Flip the disclosure open or closed.  No data implication.
    pub fn toggle(&mut self) {
        self.phase = match self.phase {
            FormPhase::Collapsed => FormPhase::Expanded,
            FormPhase::Expanded => FormPhase::Collapsed,
            other => other,
        };
    }

    /// The label of the disclosure control.
    pub fn toggle_label(&self) -> &'static str {
        if self.phase == FormPhase::Collapsed {
            TOGGLE_COLLAPSED
        } else {
            TOGGLE_EXPANDED
        }
    }

    fn validate(draft: &BusinessFormData) -> Vec<FieldError> {
        let mut errors = Vec::new();
        let mut require = |field: Field, value: &str, message: &str| {
            if value.trim().is_empty() {
                errors.push(FieldError {
                    field: field.name(),
                    message: message.to_string(),
                });
            }
        };
        require(Field::Name, &draft.name, "Entity name is required");
        require(Field::Country, &draft.country, "Country is required");
        require(Field::Address, &draft.address, "Address is required");
        require(Field::City, &draft.city, "City is required");
        require(Field::PostalCode, &draft.postal_code, "Postal code is required");
        require(Field::VatId, &draft.vat_id, "VAT ID is required");
        if !draft.country.trim().is_empty() && !is_eu_country(&draft.country) {
            errors.push(FieldError {
                field: Field::Country.name(),
                message: "Country is not a recognized jurisdiction".to_string(),
            });
        }
        errors
    }
}

impl Default for BusinessForm {
    fn default() -> Self {
        Self::new()
    }
}
