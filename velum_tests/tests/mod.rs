// Copyright 2026 the Velum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integration test suite for `velum`.
//!
//! - The `util` module holds the payload fixture builders shared by the
//!   tests.
//! - We do not use the default Rust test harness; this `mod.rs` is the
//!   entry point for all other tests so utilities can be shared without
//!   a separate support crate.

#![allow(missing_docs, reason = "we don't need docs for testing")]

mod render;
mod util;
