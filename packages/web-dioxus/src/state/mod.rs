//! Global state management

mod store;

pub use store::{ProfileField, ResourceEntry, ResourceId, ResourceStore};

use std::collections::HashMap;

use dioxus::prelude::*;
use switchboard_client::{ApiInfo, SwitchboardClient, Tool};

use crate::actions;
use crate::config;

/// One dismissible alert line.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
    pub url: Option<String>,
}

/// Selector option for the language and media type dropdowns.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Switchboard context that provides the resource list, tool matches and
/// backend reference data to the entire app.
#[derive(Clone)]
pub struct SwitchboardContext {
    pub resources: Signal<ResourceStore>,
    pub matching_tools: Signal<Vec<Tool>>,
    pub tools_loading: Signal<bool>,
    /// Selected match per tool name, for invocation.
    pub selected_matches: Signal<HashMap<String, usize>>,
    pub languages: Signal<Vec<SelectOption>>,
    pub mediatypes: Signal<Vec<SelectOption>>,
    pub api_info: Signal<Option<ApiInfo>>,
    pub alerts: Signal<Vec<Alert>>,
}

impl SwitchboardContext {
    /// A client for the configured backend.
    pub fn client(&self) -> SwitchboardClient {
        SwitchboardClient::new(config::api_url())
    }

    /// Whether the deployment allows more than one concurrent resource.
    /// Unknown (api info not fetched yet) counts as disabled.
    pub fn multiple_resources_enabled(&self) -> bool {
        self.api_info
            .read()
            .as_ref()
            .map(|i| i.enable_multiple_resources)
            .unwrap_or(false)
    }

    pub fn push_alert(&self, message: String, url: Option<String>) {
        let mut alerts = self.alerts;
        alerts.write().push(Alert { message, url });
    }

    pub fn dismiss_alert(&self, index: usize) {
        let mut alerts = self.alerts;
        let mut alerts = alerts.write();
        if index < alerts.len() {
            alerts.remove(index);
        }
    }

    pub fn clear_alerts(&self) {
        let mut alerts = self.alerts;
        alerts.write().clear();
    }

    pub fn select_match(&self, tool_name: &str, match_index: usize) {
        let mut selected = self.selected_matches;
        selected.write().insert(tool_name.to_string(), match_index);
    }
}

/// Provider component that wraps the app.
#[component]
pub fn SwitchboardProvider(children: Element) -> Element {
    let resources = use_signal(ResourceStore::new);
    let matching_tools = use_signal(Vec::new);
    let tools_loading = use_signal(|| false);
    let selected_matches = use_signal(HashMap::new);
    let languages = use_signal(Vec::new);
    let mediatypes = use_signal(Vec::new);
    let api_info = use_signal(|| None);
    let alerts = use_signal(Vec::new);

    let ctx = SwitchboardContext {
        resources,
        matching_tools,
        tools_loading,
        selected_matches,
        languages,
        mediatypes,
        api_info,
        alerts,
    };

    use_context_provider(|| ctx.clone());

    // Fetch reference data (api info, languages, media types) on mount
    use_effect(move || {
        let ctx = ctx.clone();
        spawn(async move {
            actions::bootstrap(&ctx).await;
        });
    });

    children
}

/// Hook to access the switchboard context
pub fn use_switchboard() -> SwitchboardContext {
    use_context::<SwitchboardContext>()
}
