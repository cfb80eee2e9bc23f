//! Browser presentation: Plotly charts, HTML pages and the UI server.

pub mod charts;
pub mod page;
pub mod server;

pub use server::{router, serve, serve_listener};
