//! Resource Switchboard - Dioxus web frontend
//!
//! A client-side rendered web application. It talks to the switchboard
//! backend REST API for storage and tool matching.
//!
//! ## Running
//!
//! Development (with hot reload):
//! ```bash
//! dx serve --platform web
//! ```
//!
//! Production build:
//! ```bash
//! dx build --release --platform web
//! ```
//!
//! The API base URL is baked in at build time via `SWITCHBOARD_API_URL`
//! and defaults to the same-origin `/api` prefix.

#![allow(non_snake_case)]

mod actions;
mod app;
mod components;
mod config;
mod pages;
mod routes;
mod state;
mod util;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    if let Some(url) = option_env!("SWITCHBOARD_API_URL") {
        config::init_api_url(url.to_string());
    }

    // Launch the Dioxus app
    dioxus::launch(app::App);
}
