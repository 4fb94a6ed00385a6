//! Loading components

use dioxus::prelude::*;

/// Full-width loading block, shown while reference data arrives.
#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        div {
            class: "loader loader-block",
            div { class: "loader-dots",
                div { class: "loader-dot" }
                div { class: "loader-dot", style: "animation-delay: 0.1s" }
                div { class: "loader-dot", style: "animation-delay: 0.2s" }
            }
            p { class: "loader-label", "Loading..." }
        }
    }
}

/// Inline loading indicator for in-flight transfers.
#[component]
pub fn LoadingDots() -> Element {
    rsx! {
        div {
            class: "loader-dots loader-inline",
            div { class: "loader-dot" }
            div { class: "loader-dot", style: "animation-delay: 0.1s" }
            div { class: "loader-dot", style: "animation-delay: 0.2s" }
        }
    }
}
