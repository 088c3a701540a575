//! Shared test utilities; each test binary uses a different subset
#![allow(dead_code)]

pub mod provider;
