//! Tool inventory page: the full registry, independent of any resources.

use dioxus::prelude::*;
use switchboard_client::Tool;

use crate::components::{LoadingSpinner, ToolCard};
use crate::state::use_switchboard;

#[component]
pub fn ToolInventory() -> Element {
    let ctx = use_switchboard();
    let client = ctx.client();
    let tools = use_resource(move || {
        let client = client.clone();
        async move {
            client.tools().await.map(|mut tools| {
                for tool in &mut tools {
                    tool.normalize();
                }
                tools
            })
        }
    });
    let mut query = use_signal(String::new);

    let body = match &*tools.read() {
        Some(Ok(list)) => {
            let filtered: Vec<Tool> = list
                .iter()
                .filter(|t| t.matches_query(&query()))
                .cloned()
                .collect();
            rsx! {
                if filtered.is_empty() {
                    p { class: "tool-list-empty", "No tool matches the filter." }
                }
                for tool in filtered {
                    ToolCard { key: "{tool.name}", tool: tool.clone() }
                }
            }
        }
        Some(Err(err)) => rsx! {
            div { class: "alert alert-error", "Cannot fetch the tool inventory: {err}" }
        },
        None => rsx! {
            LoadingSpinner {}
        },
    };

    rsx! {
        div {
            class: "page page-tools",
            header {
                class: "page-header",
                h1 { "Tool inventory" }
                input {
                    r#type: "search",
                    class: "tool-filter",
                    value: "{query}",
                    placeholder: "Filter tools...",
                    oninput: move |evt| query.set(evt.value())
                }
            }
            {body}
        }
    }
}
