// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request interception
//!
//! Header injection and host-supplied request transforms.

mod interceptor;

pub use interceptor::{
    interceptor_fn, FnInterceptor, IdentificationInjector, InterceptAction, InterceptorChain,
    RequestInterceptor, RequestLogger,
};
