// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

/// A jurisdiction in which VAT is collected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EuCountry {
    /// ISO 3166-1 alpha-2 country code, e.g. "DE".
    pub code: &'static str,
    /// English display name, e.g. "Germany".
    pub name: &'static str,
    /// Standard VAT rate in whole percent.
    pub vat_rate: u8,
}

/// The EU member states and their standard VAT rates.
pub const EU_COUNTRIES: &[EuCountry] = &[
    EuCountry { code: "AT", name: "Austria", vat_rate: 20 },
    EuCountry { code: "BE", name: "Belgium", vat_rate: 21 },
    EuCountry { code: "BG", name: "Bulgaria", vat_rate: 20 },
    EuCountry { code: "HR", name: "Croatia", vat_rate: 25 },
    EuCountry { code: "CY", name: "Cyprus", vat_rate: 19 },
    EuCountry { code: "CZ", name: "Czech Republic", vat_rate: 21 },
    EuCountry { code: "DK", name: "Denmark", vat_rate: 25 },
    EuCountry { code: "EE", name: "Estonia", vat_rate: 20 },
    EuCountry { code: "FI", name: "Finland", vat_rate: 24 },
    EuCountry { code: "FR", name: "France", vat_rate: 20 },
    EuCountry { code: "DE", name: "Germany", vat_rate: 19 },
    EuCountry { code: "GR", name: "Greece", vat_rate: 24 },
    EuCountry { code: "HU", name: "Hungary", vat_rate: 27 },
    EuCountry { code: "IE", name: "Ireland", vat_rate: 23 },
    EuCountry { code: "IT", name: "Italy", vat_rate: 22 },
    EuCountry { code: "LV", name: "Latvia", vat_rate: 21 },
    EuCountry { code: "LT", name: "Lithuania", vat_rate: 21 },
    EuCountry { code: "LU", name: "Luxembourg", vat_rate: 17 },
    EuCountry { code: "MT", name: "Malta", vat_rate: 18 },
    EuCountry { code: "NL", name: "Netherlands", vat_rate: 21 },
    EuCountry { code: "PL", name: "Poland", vat_rate: 23 },
    EuCountry { code: "PT", name: "Portugal", vat_rate: 23 },
    EuCountry { code: "RO", name: "Romania", vat_rate: 19 },
    EuCountry { code: "SK", name: "Slovakia", vat_rate: 20 },
    EuCountry { code: "SI", name: "Slovenia", vat_rate: 22 },
    EuCountry { code: "ES", name: "Spain", vat_rate: 21 },
    EuCountry { code: "SE", name: "Sweden", vat_rate: 25 },
];

fn find(country_code: &str) -> Option<&'static EuCountry> {
    EU_COUNTRIES
        .iter()
        .find(|country| country.code.eq_ignore_ascii_case(country_code))
}

/// Returns the display name and VAT rate of the specified jurisdiction.
/// Unknown codes echo the input as the name, with a zero rate.
pub fn country_and_rate(country_code: &str) -> (String, u8) {
    (
        country_name_by_code(country_code),
        vat_rate_by_country(country_code),
    )
}

/// Returns the display name of the specified country, the code itself
/// if it is not in the table, or the empty string for an empty code.
pub fn country_name_by_code(country_code: &str) -> String {
    if country_code.is_empty() {
        String::default()
    } else {
        find(country_code)
            .map(|country| country.name.to_owned())
            .unwrap_or_else(|| country_code.to_owned())
    }
}

/// Returns `true` if the specified country code is in the VAT table.
/// The comparison is case-insensitive.
pub fn is_eu_country(country_code: &str) -> bool {
    find(country_code).is_some()
}

/// Returns the standard VAT rate of the specified country, in whole
/// percent, or 0 if the country is not in the table.
pub fn vat_rate_by_country(country_code: &str) -> u8 {
    find(country_code)
        .map(|country| country.vat_rate)
        .unwrap_or(0)
}
