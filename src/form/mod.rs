// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

/// Business/VAT registration form state machine.
mod business_form;
/// Tests.
mod tests;

pub use self::business_form::{BusinessForm, Field, FormPhase};
