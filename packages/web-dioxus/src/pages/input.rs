//! Main page: input affordances, resource list and matching tools.

use dioxus::prelude::*;

use crate::components::{Alerts, DropArea, ResourceList, ToolList};

#[component]
pub fn Input() -> Element {
    rsx! {
        div {
            class: "page page-input",
            header {
                class: "page-header",
                h1 { "Upload files or text" }
                p {
                    class: "page-tagline",
                    "Drop a file, paste a link, or type some text. The switchboard stores the \
                     resource and suggests tools that can process it."
                }
            }
            Alerts {}
            DropArea {}
            ResourceList {}
            ToolList {}
        }
    }
}
