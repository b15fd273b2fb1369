// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

/// Implement `Display` for wrapper tuples.
///
/// # Example
///
/// `pub struct MyWrapper(pub u8);`
/// `impl_wrapper_display!(MyWrapper);`
#[macro_export]
macro_rules! impl_wrapper_display {
    ($typ:ty) => {
        impl std::fmt::Display for $typ {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

/// Implement `FromStr` for wrapper tuples.
///
/// # Example
///
/// `pub struct MyWrapper(pub u8);`
/// `impl_wrapper_from_str!(MyWrapper, u8);`
#[macro_export]
macro_rules! impl_wrapper_from_str {
    ($typ:ty, $inner:ty) => {
        impl std::str::FromStr for $typ {
            type Err = <$inner as std::str::FromStr>::Err;
            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Ok(Self(std::str::FromStr::from_str(s)?))
            }
        }
    };
}

/// Implement `Display` and `FromStr` for wrapper tuples.
///
/// # Example
///
/// `pub struct MyWrapper(pub u8);`
/// `impl_wrapper_display_from_str!(MyWrapper, u8);`
#[macro_export]
macro_rules! impl_wrapper_display_from_str {
    ($typ:ty, $inner:ty) => {
        impl_wrapper_display!($typ);
        impl_wrapper_from_str!($typ, $inner);
    };
}

/// Implement various string methods like `as_str()`, `len()` etc.
/// for string wrapper tuples.
///
/// # Example
///
/// `pub struct MyWrapper(pub String);`
/// `impl_wrapper_str!(MyWrapper);
#[macro_export]
macro_rules! impl_wrapper_str {
    ($typ:ty) => {
        impl $typ {
            /// Returns `as_str()` of the inner string.
            #[allow(unused)]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }

            /// Returns `is_empty()` of the inner string.
            #[allow(unused)]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Returns `len()` of the inner string.
            #[allow(unused)]
            pub fn len(&self) -> usize {
                self.0.len()
            }
        }

        impl AsRef<str> for $typ {
            /// Returns `as_ref()` of the inner string.
            fn as_ref(&self) -> &str {
                self.0.as_ref()
            }
        }

        impl std::borrow::Borrow<str> for $typ {
            /// Returns `borrow()` of the inner string.
            fn borrow(&self) -> &str {
                self.0.borrow()
            }
        }

        impl std::ops::Deref for $typ {
            type Target = str;
            /// Returns `deref()` of the inner string.
            fn deref(&self) -> &Self::Target {
                &*self.0
            }
        }

        impl std::fmt::Display for $typ {
            /// Returns `fmt()` of the inner string.
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl PartialEq<str> for $typ {
            /// Returns `eq()` of the inner string.
            fn eq(&self, other: &str) -> bool {
                self.0.as_str() == other
            }
        }

        impl PartialOrd<str> for $typ {
            /// Returns `partial_cmp()` of the inner string.
            fn partial_cmp(&self, other: &str) -> Option<std::cmp::Ordering> {
                self.0.as_str().partial_cmp(other)
            }
        }
    };
}
