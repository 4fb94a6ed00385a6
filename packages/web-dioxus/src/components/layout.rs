//! Site layout: top navigation plus the routed page body.

use dioxus::prelude::*;

use crate::routes::Route;

#[component]
pub fn SiteLayout() -> Element {
    rsx! {
        div {
            class: "site",
            nav {
                class: "site-nav",
                span { class: "site-title", "Switchboard" }
                Link { to: Route::Input {}, class: "nav-link", "Upload files or text" }
                Link { to: Route::ToolInventory {}, class: "nav-link", "Tool inventory" }
                Link { to: Route::About {}, class: "nav-link", "About" }
            }
            main {
                class: "site-main",
                Outlet::<Route> {}
            }
        }
    }
}
