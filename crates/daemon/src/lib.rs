//! Status aggregation daemon: polls the CI and code-quality providers and
//! serves a composite snapshot to the site's badge widget.

pub mod aggregator;
pub mod api;
pub mod config;
pub mod error;
pub mod fetch;
pub mod providers;
