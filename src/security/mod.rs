// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport security: certificate pinning

mod pinning;

pub use pinning::{apply_pinning, pinning_host, PinningProvider, StaticPinSet};
