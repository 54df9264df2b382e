// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box specs for the `nbt` binary

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod prelude;

mod cli;
