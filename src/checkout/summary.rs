// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::gateway::PaymentRecord;
use crate::tax::{country_and_rate, country_name_by_code};
use std::fmt::{Display, Formatter};

/// A labeled money line of the payment summary panel.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SummaryLine {
    /// Display label, e.g. "Amount Due".
    pub label: String,
    /// Formatted money value, e.g. "$119.00".
    pub value: String,
}

impl Display for SummaryLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        Display::fmt(&format!("{}: {}", self.label, self.value), f)
    }
}

#[derive(Clone, Debug, PartialEq)]
/// The VAT line of the payment summary.
pub struct VatLine {
    /// Applied rate in whole percent.
    pub rate: u8,
    /// Display name of the asserting jurisdiction.
    pub country_name: String,
    /// VAT amount, computed on the pre-payment amount due.
    pub amount: f64,
}

#[derive(Clone, Debug, PartialEq)]
/// Money figures derived from a payment record and the active VAT
/// jurisdiction.  A server-asserted VAT record takes precedence over an
/// edge-inferred jurisdiction code.
pub struct PaymentSummary {
    currency: String,

    /// Total amount of the payment.
    pub total_amount: f64,

    /// Sum of the amounts of the paid invoices.
    pub paid_amount: f64,

    /// Credit applied to the payment.  Informational only.
    pub credit_amount: f64,

    /// Balance applied to the payment.  Informational only.
    pub balance_amount: f64,

    /// The VAT line, present whenever a VAT source exists, even at a
    /// zero rate.
    pub vat: Option<VatLine>,

    /// Amount still owed: amount due plus VAT, minus the paid invoices.
    pub amount_due: f64,
}

impl PaymentSummary {
    /// Derive the summary figures.  VAT is computed on the record's
    /// amount due, not on the net of already-paid invoices.
    pub fn derive(record: &PaymentRecord, jurisdiction: Option<&str>) -> Self {
        let paid_amount: f64 = record
            .invoices
            .iter()
            .filter(|invoice| invoice.paid)
            .map(|invoice| invoice.amount)
            .sum();
        let vat = if let Some(vat) = &record.vat {
            Some((vat.rate.0, country_name_by_code(&vat.country)))
        } else {
            jurisdiction.map(|code| {
                let (country_name, rate) = country_and_rate(code);
                (rate, country_name)
            })
        };
        let vat = vat.map(|(rate, country_name)| VatLine {
            rate,
            country_name,
            amount: if rate > 0 {
                record.amount_due * rate as f64 / 100.0
            } else {
                0.0
            },
        });
        let vat_amount = vat.as_ref().map(|line| line.amount).unwrap_or_default();
        Self {
            currency: record.payment_currency.clone(),
            total_amount: record.payment_total_amount,
            paid_amount,
            credit_amount: record.credit_amount,
            balance_amount: record.balance_amount,
            vat,
            amount_due: record.amount_due + vat_amount - paid_amount,
        }
    }

    /// The display lines of the summary panel, in order.  Subtractive
    /// lines appear only when strictly positive.
    pub fn lines(&self) -> Vec<SummaryLine> {
        let money = |amount: f64| format_currency(&self.currency, amount);
        let mut lines = vec![SummaryLine {
            label: "Total Amount".to_string(),
            value: money(self.total_amount),
        }];
        for (label, amount) in [
            ("Already Paid", self.paid_amount),
            ("Credit Applied", self.credit_amount),
            ("Balance Applied", self.balance_amount),
        ] {
            if amount > 0.0 {
                lines.push(SummaryLine {
                    label: label.to_string(),
                    value: money(-amount),
                });
            }
        }
        if let Some(vat) = &self.vat {
            lines.push(SummaryLine {
                label: format!("VAT ({}%)", vat.rate),
                value: money(vat.amount),
            });
        }
        lines.push(SummaryLine {
            label: "Amount Due".to_string(),
            value: money(self.amount_due),
        });
        lines
    }
}

/// Format a money amount `en-US`-style for the specified currency code:
/// symbol, thousands separators, and two decimals, e.g. "$1,234.50".
/// Unknown codes fall back to "CODE 1,234.50".
pub fn format_currency(currency_code: &str, amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let mut grouped = String::new();
    let whole = (cents / 100).to_string();
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    let fraction = cents % 100;
    match currency_code {
        "USD" => format!("{sign}${grouped}.{fraction:02}"),
        "EUR" => format!("{sign}\u{20ac}{grouped}.{fraction:02}"),
        "GBP" => format!("{sign}\u{a3}{grouped}.{fraction:02}"),
        "CAD" => format!("{sign}CA${grouped}.{fraction:02}"),
        _ => format!("{sign}{currency_code} {grouped}.{fraction:02}"),
    }
}
