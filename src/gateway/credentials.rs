// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::impl_wrapper_str;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// How long a minted token remains usable.
const TOKEN_TTL_DAYS: i64 = 1;

#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
/// Opaque bearer credential issued by the remote API.
pub struct AuthToken(pub String);
impl_wrapper_str!(AuthToken);

#[derive(Clone, Debug)]
struct StoredToken {
    expires: DateTime<Utc>,
    token: AuthToken,
}

/// Client-side cache for the bearer token, with a fixed one-day expiry.
///
/// Clones share the same underlying store.  Each `read`/`write` locks
/// individually; two callers racing through the read-then-mint window may
/// each mint a token, which is benign (the later write wins and both
/// tokens are independently valid).
#[derive(Clone, Default)]
pub struct CredentialStore {
    inner: Arc<Mutex<Option<StoredToken>>>,
}

impl CredentialStore {
    /// Forget the stored token, if any.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            *inner = None;
        }
    }

    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored token, or `None` if absent or expired.
    pub fn read(&self) -> Option<AuthToken> {
        self.inner.lock().ok().and_then(|inner| {
            inner
                .as_ref()
                .filter(|stored| stored.expires > Utc::now())
                .map(|stored| stored.token.clone())
        })
    }

    /// Store a freshly minted token.
    pub fn write(&self, token: AuthToken) {
        self.write_expiring(token, Utc::now() + Duration::days(TOKEN_TTL_DAYS));
    }

    pub(crate) fn write_expiring(&self, token: AuthToken, expires: DateTime<Utc>) {
        if let Ok(mut inner) = self.inner.lock() {
            *inner = Some(StoredToken { expires, token });
        }
    }
}
