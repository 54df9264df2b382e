// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted responses for fake adapters.

use std::collections::VecDeque;

use crate::ShellError;

/// Either a finite sequence of responses or one response repeated forever.
///
/// A sequence that runs dry yields [`ShellError::NoResponse`] so a test that
/// issues more commands than it scripted fails loudly.
#[derive(Debug, Clone)]
pub struct Responses<T> {
    kind: ResponseKind<T>,
    name: String,
}

#[derive(Debug, Clone)]
enum ResponseKind<T> {
    Sequence(VecDeque<T>),
    Repeat(T),
}

impl<T: Clone> Responses<T> {
    pub fn sequence(name: impl Into<String>, items: impl IntoIterator<Item = T>) -> Self {
        Self { kind: ResponseKind::Sequence(items.into_iter().collect()), name: name.into() }
    }

    pub fn repeat(name: impl Into<String>, item: T) -> Self {
        Self { kind: ResponseKind::Repeat(item), name: name.into() }
    }

    pub fn next(&mut self) -> Result<T, ShellError> {
        match &mut self.kind {
            ResponseKind::Sequence(items) => {
                items.pop_front().ok_or_else(|| ShellError::NoResponse { name: self.name.clone() })
            }
            ResponseKind::Repeat(item) => Ok(item.clone()),
        }
    }
}

#[cfg(test)]
#[path = "responses_tests.rs"]
mod tests;
