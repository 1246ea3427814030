//! # addrv-smarty -- Typed Rust client for the SmartyStreets US Street API
//!
//! Provides typed access to the single endpoint address verification needs:
//! `GET {base_url}/street-address`, which takes one free-text US address and
//! returns zero or more normalized candidates.
//!
//! ## Layers
//!
//! - [`SmartyClient`] is the async HTTP client (one `reqwest::Client`,
//!   credentials sent as query parameters).
//! - [`StreetAddressApi`] is the synchronous seam verification code depends
//!   on. [`HttpStreetAddressApi`] implements it over `SmartyClient`;
//!   [`MockStreetAddressApi`] implements it with canned responses.
//!
//! ## Error Model
//!
//! Every failure surfaces as [`StreetApiError`]. Callers that need to tell
//! "the input was malformed" apart from "the service is broken" use
//! [`StreetApiError::is_bad_input`].

pub mod adapter;
pub mod client;
pub mod config;
pub mod error;
pub mod street;

pub use adapter::{HttpStreetAddressApi, MockResponse, MockStreetAddressApi, StreetAddressApi};
pub use client::SmartyClient;
pub use config::{ConfigError, SmartyConfig};
pub use error::{ApiErrorCode, StreetApiError};
pub use street::{Candidate, Components, StreetAddressRequest};
