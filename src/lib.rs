// (C) Coralbits SL 2025
// This file is part of Scrapbox and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

pub mod client;
pub mod config;
pub mod pages;
pub mod types;
pub mod utils;

pub use client::*;
pub use config::*;
pub use pages::*;
pub use types::*;
