//! Route definitions for the application

use dioxus::prelude::*;

use crate::components::SiteLayout;
use crate::pages::{About, Input, ToolInventory};

/// All application routes
#[derive(Clone, Debug, PartialEq, Routable)]
#[rustfmt::skip]
pub enum Route {
    #[layout(SiteLayout)]
        #[route("/")]
        Input {},

        #[route("/tools")]
        ToolInventory {},

        #[route("/about")]
        About {},
    #[end_layout]
}
