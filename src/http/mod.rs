// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for the Parley SDK
//!
//! Request/response types, header computation and the REST client.

mod client;
mod headers;
mod request;
mod response;

pub use client::RestClient;
pub use headers::{
    apply_headers, compute_headers, to_header_map, HeaderEntry, HEADER_AUTHORIZATION,
    HEADER_IDENTIFICATION,
};
pub use request::Request;
pub use response::{
    extract_error_message, extract_error_message_from, status_message, ErrorResponse, Response,
};
