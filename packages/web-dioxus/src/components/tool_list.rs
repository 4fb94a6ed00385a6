//! Matching tools view.

use dioxus::prelude::*;
use switchboard_client::Tool;

use crate::components::LoadingDots;
use crate::state::use_switchboard;

#[component]
pub fn ToolList() -> Element {
    let ctx = use_switchboard();
    let tools = ctx.matching_tools.read().clone();
    let loading = *ctx.tools_loading.read();
    let has_resources = !ctx.resources.read().is_empty();
    let mut query = use_signal(String::new);

    if !has_resources && tools.is_empty() && !loading {
        return rsx! {};
    }

    let filtered: Vec<Tool> = tools
        .iter()
        .filter(|t| t.matches_query(&query()))
        .cloned()
        .collect();

    rsx! {
        section {
            class: "tool-list",
            div {
                class: "tool-list-header",
                h2 { "Matching Tools" }
                input {
                    r#type: "search",
                    class: "tool-filter",
                    value: "{query}",
                    placeholder: "Filter tools...",
                    oninput: move |evt| query.set(evt.value())
                }
            }

            if loading {
                LoadingDots {}
            } else if filtered.is_empty() {
                p {
                    class: "tool-list-empty",
                    if tools.is_empty() {
                        "No matching tools. Check the resource mediatype and language."
                    } else {
                        "No tool matches the filter."
                    }
                }
            } else {
                for tool in filtered {
                    ToolCard { key: "{tool.name}", tool: tool.clone(), show_matches: true }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct ToolCardProps {
    pub tool: Tool,
    /// Render the per-match selectors (matching view) or not (inventory).
    #[props(default = false)]
    pub show_matches: bool,
}

#[component]
pub fn ToolCard(props: ToolCardProps) -> Element {
    let ctx = use_switchboard();
    let tool = &props.tool;

    let auto_invoke = tool.invoke_match_index.is_some();
    let card_class = if auto_invoke {
        "tool match tool-auto-invoke"
    } else {
        "tool match"
    };
    let selected = ctx
        .selected_matches
        .read()
        .get(&tool.name)
        .copied()
        .or(tool.invoke_match_index)
        .unwrap_or(0);

    let tool_name = tool.name.clone();
    let ctx_select = ctx.clone();
    let match_labels: Vec<(usize, String)> = tool
        .matches
        .iter()
        .enumerate()
        .map(|(index, assignment)| {
            let text = format!("Match {}: resources {}", index + 1, format_assignment(assignment));
            (index, text)
        })
        .collect();

    rsx! {
        div {
            class: "{card_class}",
            div {
                class: "tool-heading",
                span { class: "tool-name", "{tool.name}" }
                if let Some(task) = &tool.task {
                    span { class: "tool-task", "{task}" }
                }
                if props.show_matches && tool.best_match_percent > 0 {
                    span { class: "tool-match-percent", "{tool.best_match_percent}% match" }
                }
                if auto_invoke {
                    span { class: "tool-badge", "Best match" }
                }
            }
            if let Some(description) = &tool.description {
                p { class: "tool-description", "{description}" }
            }
            if !tool.keywords.is_empty() {
                div {
                    class: "tool-keywords",
                    for keyword in &tool.keywords {
                        span { class: "tool-keyword", "{keyword}" }
                    }
                }
            }
            if props.show_matches && tool.matches.len() > 1 {
                div {
                    class: "tool-matches",
                    for (index, text) in match_labels {
                        label {
                            key: "{tool.name}-{index}",
                            input {
                                r#type: "radio",
                                name: "match-{tool.name}",
                                checked: index == selected,
                                onchange: {
                                    let ctx = ctx_select.clone();
                                    let tool_name = tool_name.clone();
                                    move |_| ctx.select_match(&tool_name, index)
                                }
                            }
                            span { "{text}" }
                        }
                    }
                }
            }
            if let Some(homepage) = &tool.homepage {
                a {
                    class: "btn tool-open",
                    href: "{homepage}",
                    target: "_blank",
                    "Open tool"
                }
            }
        }
    }
}

/// "1, 3" for an assignment over profile batch indexes 0 and 2.
fn format_assignment(assignment: &[usize]) -> String {
    assignment
        .iter()
        .map(|i| (i + 1).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignments_render_one_based() {
        assert_eq!(format_assignment(&[0, 2]), "1, 3");
        assert_eq!(format_assignment(&[]), "");
    }
}
