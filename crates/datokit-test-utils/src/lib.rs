// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for datokit integration tests.
//!
//! Provides mock collaborators and context fixtures so registration and
//! hook dispatch can be exercised without a real CMS host.
//!
//! # Components
//!
//! - [`MockSdk`] - Captures the parameters handed to `connect`
//! - [`RecordingRenderer`] - Records every rendered node
//! - [`RecordingHost`] - Records every request made to the host bridge
//! - [`fixtures`] - Ready-made models, fields, and contexts

pub mod fixtures;
pub mod mock_sdk;
pub mod recording;

pub use mock_sdk::MockSdk;
pub use recording::{HostCall, RecordingHost, RecordingRenderer};
