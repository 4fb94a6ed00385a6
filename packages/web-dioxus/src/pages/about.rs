//! About page.

use dioxus::prelude::*;

use crate::state::use_switchboard;

#[component]
pub fn About() -> Element {
    let ctx = use_switchboard();
    let version = ctx
        .api_info
        .read()
        .as_ref()
        .and_then(|i| i.version.clone());

    rsx! {
        div {
            class: "page page-about",
            header {
                class: "page-header",
                h1 { "About" }
            }
            p {
                "The switchboard helps you find tools that can process your research data. \
                 Drop a file, paste a shared link or type some text; the resource is stored \
                 and profiled, and tools matching its mediatype and language are suggested."
            }
            p {
                "Resources are kept on the server only as long as the processing session \
                 needs them. Tools open in a new tab and fetch the resource from the \
                 switchboard's storage space."
            }
            if let Some(version) = version {
                p { class: "about-version", "Backend version: {version}" }
            }
        }
    }
}
