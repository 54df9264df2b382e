// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! nbt-core: decoding of notebook image test targets
//!
//! Everything in this crate is a pure function of its inputs. Filesystem and
//! cluster access live in `nbt-adapters` and `nbt-engine`.

pub mod macros;

pub mod error;
pub mod flavor;
pub mod notebook;
pub mod paths;
pub mod suite;
pub mod target;
pub mod versions;

pub use error::DecodeError;
pub use flavor::{Accelerator, OsFlavor, PythonFlavor};
pub use notebook::{is_datascience_derived, NotebookId, NotebookRef};
pub use paths::{manifest_path, notebook_dir, FIXTURE_NOTEBOOK};
pub use suite::{plan_suites, Suite};
pub use target::{app_label, Target};
pub use versions::{merge_version_data, PINNED_TOOLS};
