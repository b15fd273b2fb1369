// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

/// Fixed jurisdiction table.
mod jurisdiction;
mod tests;

pub use self::jurisdiction::{
    country_and_rate, country_name_by_code, is_eu_country, vat_rate_by_country, EuCountry,
    EU_COUNTRIES,
};
