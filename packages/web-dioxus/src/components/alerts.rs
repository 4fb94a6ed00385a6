//! Dismissible error alerts.
//!
//! Connectivity and application errors land here through the same path and
//! render identically; only the message differs.

use dioxus::prelude::*;

use crate::state::use_switchboard;

#[component]
pub fn Alerts() -> Element {
    let ctx = use_switchboard();
    let alerts = ctx.alerts.read().clone();

    if alerts.is_empty() {
        return rsx! {};
    }

    let clear_all = alerts.len() > 1;

    rsx! {
        div {
            class: "alerts",
            for (index, alert) in alerts.iter().enumerate() {
                div {
                    key: "{index}-{alert.message}",
                    class: "alert alert-error",
                    span { class: "alert-message", "{alert.message}" }
                    if let Some(url) = &alert.url {
                        a {
                            class: "alert-link",
                            href: "{url}",
                            target: "_blank",
                            "More info"
                        }
                    }
                    button {
                        class: "alert-dismiss",
                        onclick: {
                            let ctx = ctx.clone();
                            move |_| ctx.dismiss_alert(index)
                        },
                        "\u{2715}"
                    }
                }
            }
            if clear_all {
                button {
                    class: "alert-clear-all",
                    onclick: {
                        let ctx = ctx.clone();
                        move |_| ctx.clear_alerts()
                    },
                    "Dismiss all"
                }
            }
        }
    }
}
