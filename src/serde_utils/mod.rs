// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

/// Macros for serializing default values.
mod defaults;

/// Macros for serializing tuples.
mod tuples;

/// Visitor pattern.
mod visitors;

pub use self::defaults::*;
#[allow(unused)]
pub use self::tuples::*;
pub use self::visitors::*;
