// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for parley.
//!
//! Every outbound client is built here so that all requests carry the same
//! `User-Agent` header.

mod client;

pub use client::{build_client, builder, user_agent};
