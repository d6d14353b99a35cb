//! Top-languages SVG chart for a GitHub profile.
//!
//! Aggregates per-language byte counts across a user's non-fork,
//! non-archived repositories and renders the top N languages as a themed
//! bar chart. The pipeline is request → [`github`] (network I/O) →
//! [`rank`] (pure) → [`svg`] (pure) → response; [`handler`] ties it
//! together for an embedding HTTP runtime.

pub mod github;
pub mod handler;
pub mod rank;
pub mod svg;
pub mod theme;

pub use github::GithubClient;
pub use handler::{ChartParams, Response, handle};
