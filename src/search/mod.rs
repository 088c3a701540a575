//! Search result aggregation
//!
//! Turns the raw response of an external search provider into ranked,
//! grouped package listings.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Provider   │────▶│ Controller  │────▶│  Renderer   │
//! │   (fetch)   │     │ (lifecycle) │     │ (text/json) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │ Normalizer  │────▶│   Ranker    │
//!                     │ (validate)  │     │(order/group)│
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`]: Wire types and normalized records
//! - [`normalizer`]: Validation with drop-and-continue for malformed records
//! - [`ranker`]: Version ranking, active detection and grouping by name
//! - [`provider`]: Provider trait and the HTTP implementation
//! - [`controller`]: Request lifecycle with last-request-wins
//! - [`render`]: Terminal and JSON output
//! - [`error`]: Error types for normalization and provider access

pub mod controller;
pub mod error;
pub mod normalizer;
pub mod provider;
pub mod ranker;
pub mod render;
pub mod types;
