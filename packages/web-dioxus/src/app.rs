//! Root application component

use dioxus::prelude::*;

use crate::routes::Route;
use crate::state::SwitchboardProvider;

/// Root application component
#[component]
pub fn App() -> Element {
    rsx! {
        // Global styles
        document::Stylesheet { href: asset!("/assets/main.css") }

        // Switchboard context provider wraps the entire app
        SwitchboardProvider {
            Router::<Route> {}
        }
    }
}
