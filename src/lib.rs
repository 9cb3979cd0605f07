// Copyright 2026 Listscreen Contributors
// SPDX-License-Identifier: Apache-2.0

//! Listscreen — sanctions and ownership-disclosure screening gateway.
//!
//! Answers one question: does an entity name appear on any of several
//! public watchlists? Each list speaks a different protocol (a structured
//! reconciliation API, a server-rendered search page, a stateful legacy
//! web form, a bulk JSON feed); the per-source adapters in [`sources`]
//! translate each of them into the single normalized envelope defined in
//! [`screen::result`].

pub mod config;
pub mod error;
pub mod rest;
pub mod screen;
pub mod sources;
pub mod transport;
