// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt::{Display, Formatter};

/// A validation message for a single form field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldError {
    /// Wire name of the offending field, e.g. "postalCode".
    pub field: &'static str,
    /// Human-readable message, e.g. "Postal code is required".
    pub message: String,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        Display::fmt(&format!("{}: {}", self.field, self.message), f)
    }
}

#[derive(Debug)]
/// An enum that encapsulates a variety of error types.
///
/// # Example
///
/// Error::Http(StatusCode::NOT_FOUND, format!("{path}: not found"))
pub enum Error {
    /// Authorization failure (HTTP 401/403 or a server-asserted invalid
    /// token).  The only variant the gateway retries, and only once.
    Auth(hyper::StatusCode, String),
    /// Any other non-2xx HTTP response, with status and body text.
    Http(hyper::StatusCode, String),
    /// Transport-level failure, or a remote failure deliberately collapsed
    /// to a fixed message.
    Network(String),
    /// String error.
    String(String),
    /// Client-side form validation failure, one message per invalid field.
    Validation(Vec<FieldError>),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Error::Auth(status_code, mesg) => {
                Display::fmt(&format!("{status_code}: {mesg}"), f)
            }
            Error::Http(status_code, mesg) => {
                Display::fmt(&format!("{status_code}: {mesg}"), f)
            }
            Error::Network(mesg) => Display::fmt(&mesg, f),
            Error::String(s) => Display::fmt(&s, f),
            Error::Validation(field_errors) => {
                let joined = field_errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                Display::fmt(&joined, f)
            }
        }
    }
}

impl Error {
    /// Returns `true` for the authorization failures that are eligible for
    /// the gateway's one-shot token refresh.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Error::Auth(_, _))
    }
}
