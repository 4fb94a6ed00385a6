//! Action layer: translates UI intents into state updates and backend calls.
//!
//! The flow mirrors the backend's contract: every upload starts as an
//! optimistic placeholder, the server response is merged into it, and every
//! change to the set of profiled resources triggers one matching-tools
//! refresh.

use switchboard_client::{
    filter_dictionary_tools, ResourceInfo, Result as ClientResult, SwitchboardError, Tool,
    ToolMatches,
};

use crate::config;
use crate::state::{ProfileField, ResourceId, SelectOption, SwitchboardContext};
use crate::util;

/// Fetch reference data once at startup.
pub async fn bootstrap(ctx: &SwitchboardContext) {
    fetch_api_info(ctx).await;
    fetch_languages(ctx).await;
    fetch_mediatypes(ctx).await;
}

pub async fn fetch_api_info(ctx: &SwitchboardContext) {
    match ctx.client().api_info().await {
        Ok(info) => {
            tracing::info!(version = ?info.version, "connected to switchboard API");
            let mut api_info = ctx.api_info;
            api_info.set(Some(info));
        }
        Err(err) => show_error(ctx, Some("Cannot fetch API info"), &err),
    }
}

pub async fn fetch_languages(ctx: &SwitchboardContext) {
    match ctx.client().languages().await {
        Ok(pairs) => {
            let mut options: Vec<SelectOption> = pairs
                .into_iter()
                .filter(|(code, name)| !code.is_empty() && !name.is_empty())
                .map(|(code, name)| SelectOption {
                    value: code,
                    label: name,
                })
                .collect();
            options.sort_by(|a, b| a.label.cmp(&b.label));
            let mut languages = ctx.languages;
            languages.set(options);
        }
        Err(err) => show_error(ctx, Some("Cannot fetch languages"), &err),
    }
}

pub async fn fetch_mediatypes(ctx: &SwitchboardContext) {
    match ctx.client().mediatypes().await {
        Ok(types) => {
            let mut options: Vec<SelectOption> = types
                .into_iter()
                .filter(|mt| !mt.is_empty())
                .map(|mt| SelectOption {
                    label: mt.clone(),
                    value: mt,
                })
                .collect();
            options.sort_by(|a, b| a.label.cmp(&b.label));
            let mut mediatypes = ctx.mediatypes;
            mediatypes.set(options);
        }
        Err(err) => show_error(ctx, Some("Cannot fetch mediatypes"), &err),
    }
}

/// Upload a dropped or picked file.
pub async fn upload_file(ctx: &SwitchboardContext, filename: String, bytes: Vec<u8>) {
    let placeholder = begin_upload(ctx, false);
    let result = ctx.client().upload_file(&filename, bytes).await;
    finish_upload(ctx, placeholder, result).await;
}

/// Handle a pasted link. Values that do not look like a URL are ignored
/// without a network call; `hdl:`/`doi:` identifiers are unfolded first.
pub async fn upload_link(ctx: &SwitchboardContext, pasted: String) {
    let link = util::unfold_handle(pasted.trim());
    if !util::looks_like_url(&link) {
        tracing::info!(pasted = %pasted, "pasted text does not look like a URL, ignoring");
        return;
    }
    let placeholder = begin_upload(ctx, false);
    let result = ctx.client().upload_link(&link, None).await;
    finish_upload(ctx, placeholder, result).await;
}

/// Submit typed text as a small plain-text resource.
pub async fn submit_text(ctx: &SwitchboardContext, text: String) {
    if text.trim().is_empty() {
        return;
    }
    let placeholder = begin_upload(ctx, false);
    let result = ctx
        .client()
        .upload_file("submitted_text.txt", text.into_bytes())
        .await;
    finish_upload(ctx, placeholder, result).await;
}

/// Re-poll a resource that is still being profiled server-side.
pub async fn poll_async_resource(ctx: &SwitchboardContext, id: ResourceId) {
    let Some(server_id) = server_id_of(ctx, &id) else {
        return;
    };
    let result = ctx.client().resource_info(&server_id).await;
    finish_upload(ctx, id, result).await;
}

/// Edit one profile field, then refresh the matching tools once.
pub async fn set_resource_profile(
    ctx: &SwitchboardContext,
    id: ResourceId,
    field: ProfileField,
    value: Option<String>,
) {
    let changed = {
        let mut resources = ctx.resources;
        let changed = resources.write().set_profile_field(&id, field, value);
        changed
    };
    if changed {
        refresh_matching_tools(ctx).await;
    } else {
        tracing::error!(id = %id.as_key(), "cannot find resource to edit");
    }
}

/// Update a dictionary resource's text. The profile is unchanged, so no
/// tools refresh happens; the new content is pushed to the backend.
pub async fn set_resource_content(ctx: &SwitchboardContext, id: ResourceId, content: String) {
    let server_id = server_id_of(ctx, &id);
    let changed = {
        let mut resources = ctx.resources;
        let changed = resources.write().set_content(&id, content.clone());
        changed
    };
    if !changed {
        tracing::error!(id = %id.as_key(), "cannot find resource to edit");
        return;
    }
    if let Some(server_id) = server_id {
        if let Err(err) = ctx.client().put_content(&server_id, &content).await {
            show_error(ctx, Some("Cannot store text content"), &err);
        }
    }
}

pub async fn remove_resource(ctx: &SwitchboardContext, id: ResourceId) {
    let removed = {
        let mut resources = ctx.resources;
        let removed = resources.write().remove(&id);
        removed
    };
    if removed {
        refresh_matching_tools(ctx).await;
    }
}

pub fn clear_resources(ctx: &SwitchboardContext) {
    let mut resources = ctx.resources;
    resources.write().clear();
    let mut matching_tools = ctx.matching_tools;
    matching_tools.set(Vec::new());
}

/// Fetch the archive outline for a resource and attach it.
pub async fn fetch_outline(ctx: &SwitchboardContext, id: ResourceId) {
    let Some(server_id) = server_id_of(ctx, &id) else {
        return;
    };
    match ctx.client().outline(&server_id).await {
        Ok(outline) => {
            let mut resources = ctx.resources;
            resources.write().set_outline(&id, outline);
        }
        Err(err) => show_error(ctx, Some("Cannot fetch archive outline"), &err),
    }
}

/// Flip the selection of an archive entry. Selecting promotes the entry to
/// a resource of its own; deselecting removes the promoted resource again.
pub async fn toggle_archive_entry(ctx: &SwitchboardContext, archive: ResourceId, entry_name: String) {
    let Some(archive_id) = server_id_of(ctx, &archive) else {
        return;
    };
    let exclusive = !ctx.multiple_resources_enabled();
    let toggled = {
        let mut resources = ctx.resources;
        let toggled = resources
            .write()
            .toggle_outline_entry(&archive, &entry_name, exclusive);
        toggled
    };
    let Some(now_checked) = toggled else {
        return;
    };

    if now_checked {
        if exclusive {
            // radio semantics: the archive feeds at most one promoted entry
            for promoted in promoted_from(ctx, &archive_id) {
                let mut resources = ctx.resources;
                resources.write().remove(&promoted);
            }
        }
        let placeholder = {
            let mut resources = ctx.resources;
            let placeholder = resources.write().insert_placeholder(true);
            placeholder
        };
        let result = ctx
            .client()
            .upload_archive_entry(&archive_id, Some(&entry_name), None)
            .await;
        finish_upload(ctx, placeholder, result).await;
    } else {
        let promoted = {
            let resources = ctx.resources;
            let store = resources.read();
            store
                .entries()
                .iter()
                .find(|e| {
                    e.info.as_ref().is_some_and(|i| {
                        i.source_id.as_deref() == Some(archive_id.as_str())
                            && i.source_entry_name.as_deref() == Some(entry_name.as_str())
                    })
                })
                .map(|e| e.id.clone())
        };
        if let Some(promoted) = promoted {
            remove_resource(ctx, promoted).await;
        }
    }
}

/// Decompress a gz/bz2-style resource into a new resource.
pub async fn uncompress_resource(ctx: &SwitchboardContext, id: ResourceId) {
    let Some(server_id) = server_id_of(ctx, &id) else {
        return;
    };
    let placeholder = {
        let mut resources = ctx.resources;
        let placeholder = resources.write().insert_placeholder(true);
        placeholder
    };
    let result = ctx.client().upload_archive_entry(&server_id, None, None).await;
    finish_upload(ctx, placeholder, result).await;
}

/// Extract plain text from a document resource by re-submitting its stored
/// copy with a text/plain override.
pub async fn extract_text_from_resource(ctx: &SwitchboardContext, id: ResourceId) {
    let local_link = {
        let resources = ctx.resources;
        let store = resources.read();
        store
            .get(&id)
            .and_then(|e| e.info.as_ref())
            .and_then(|i| i.local_link.clone())
    };
    let Some(local_link) = local_link else {
        return;
    };
    let placeholder = {
        let mut resources = ctx.resources;
        let placeholder = resources.write().insert_placeholder(true);
        placeholder
    };
    let result = ctx
        .client()
        .upload_link(&local_link, Some("text/plain"))
        .await;
    finish_upload(ctx, placeholder, result).await;
}

/// Recompute the matching tools from the current resource list.
pub async fn refresh_matching_tools(ctx: &SwitchboardContext) {
    let (batch, all_dictionary) = {
        let resources = ctx.resources;
        let store = resources.read();
        (store.match_request(), store.all_dictionary())
    };

    let mut matching_tools = ctx.matching_tools;
    if batch.is_empty() {
        matching_tools.set(Vec::new());
        return;
    }

    let mut tools_loading = ctx.tools_loading;
    tools_loading.set(true);
    match ctx.client().match_tools(&batch).await {
        Ok(matches) => {
            matching_tools.set(prepare_matching_tools(matches, all_dictionary));
        }
        // keep the previous list on failure; the alert tells the story
        Err(err) => show_error(ctx, Some("Cannot fetch matching tools"), &err),
    }
    tools_loading.set(false);
}

/// Fold the raw matching response into display order: normalize, apply the
/// dictionary filter, and keep the auto-invoke flag only when exactly one
/// tool matches everything at 100% (that tool moves to the front).
fn prepare_matching_tools(matches: Vec<ToolMatches>, all_dictionary: bool) -> Vec<Tool> {
    let tools: Vec<Tool> = matches.into_iter().map(ToolMatches::into_tool).collect();
    let mut tools = filter_dictionary_tools(tools, all_dictionary);

    let full_matches: Vec<usize> = tools
        .iter()
        .enumerate()
        .filter(|(_, t)| t.invoke_match_index.is_some())
        .map(|(i, _)| i)
        .collect();
    match full_matches.as_slice() {
        [single] => {
            let tool = tools.remove(*single);
            tools.insert(0, tool);
        }
        _ => {
            for tool in &mut tools {
                tool.invoke_match_index = None;
            }
        }
    }
    tools
}

/// Map a client error onto a dismissible alert, with an optional context
/// prefix ("Cannot fetch languages: Connection error").
pub fn show_error(ctx: &SwitchboardContext, context: Option<&str>, err: &SwitchboardError) {
    tracing::warn!(error = %err, context = ?context, "backend call failed");
    let message = match context {
        Some(context) => format!("{context}: {err}"),
        None => err.to_string(),
    };
    let url = match err {
        SwitchboardError::Api { url, .. } => url.clone(),
        _ => None,
    };
    ctx.push_alert(message, url);
}

fn begin_upload(ctx: &SwitchboardContext, from_extraction: bool) -> ResourceId {
    let mut resources = ctx.resources;
    let mut store = resources.write();
    if !from_extraction && !ctx.multiple_resources_enabled() {
        store.clear();
    }
    store.insert_placeholder(from_extraction)
}

async fn finish_upload(
    ctx: &SwitchboardContext,
    placeholder: ResourceId,
    result: ClientResult<ResourceInfo>,
) {
    match result {
        Ok(mut info) => {
            if let Some(link) = info.local_link.take() {
                info.local_link = Some(util::absolutize_link(config::api_url(), &link));
            }
            let applied = {
                let mut resources = ctx.resources;
                let applied = resources.write().apply_info(&placeholder, info);
                applied
            };
            // a false return means the placeholder was removed while the
            // request was in flight; the response is dropped
            if applied {
                refresh_matching_tools(ctx).await;
            }
        }
        Err(err) => {
            let removed = {
                let mut resources = ctx.resources;
                let removed = resources.write().remove(&placeholder);
                removed
            };
            if removed {
                refresh_matching_tools(ctx).await;
            }
            show_error(ctx, None, &err);
        }
    }
}

fn server_id_of(ctx: &SwitchboardContext, id: &ResourceId) -> Option<String> {
    let resources = ctx.resources;
    let store = resources.read();
    store.get(id).and_then(|e| e.server_id().map(str::to_string))
}

fn promoted_from(ctx: &SwitchboardContext, archive_id: &str) -> Vec<ResourceId> {
    let resources = ctx.resources;
    let store = resources.read();
    store.promoted_from(archive_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchboard_client::MatchAssignment;

    fn tool_matches(name: &str, keywords: &[&str], best: u32, matches: Vec<MatchAssignment>) -> ToolMatches {
        serde_json::from_value(serde_json::json!({
            "tool": {"name": name, "keywords": keywords},
            "matches": matches,
            "bestMatchPercent": best,
        }))
        .unwrap()
    }

    #[test]
    fn a_unique_full_match_moves_to_the_front() {
        let tools = prepare_matching_tools(
            vec![
                tool_matches("Partial", &[], 50, vec![vec![0]]),
                tool_matches("Full", &[], 100, vec![vec![0]]),
            ],
            false,
        );
        assert_eq!(tools[0].name, "Full");
        assert_eq!(tools[0].invoke_match_index, Some(0));
        assert_eq!(tools[1].invoke_match_index, None);
    }

    #[test]
    fn competing_full_matches_cancel_the_auto_invoke_flag() {
        let tools = prepare_matching_tools(
            vec![
                tool_matches("A", &[], 100, vec![vec![0]]),
                tool_matches("B", &[], 100, vec![vec![0]]),
            ],
            false,
        );
        assert_eq!(tools.len(), 2);
        assert!(tools.iter().all(|t| t.invoke_match_index.is_none()));
        // original response order is kept
        assert_eq!(tools[0].name, "A");
    }

    #[test]
    fn dictionary_batches_only_see_dictionary_tools() {
        let response = vec![
            tool_matches("GlossFinder", &["dictionary"], 100, vec![vec![0]]),
            tool_matches("UDPipe", &["NLP"], 100, vec![vec![0]]),
        ];
        let dict_view = prepare_matching_tools(response.clone(), true);
        assert_eq!(dict_view.len(), 1);
        assert_eq!(dict_view[0].name, "GlossFinder");
        // the survivor is now the unique full match
        assert_eq!(dict_view[0].invoke_match_index, Some(0));

        let mixed_view = prepare_matching_tools(response, false);
        assert_eq!(mixed_view.len(), 1);
        assert_eq!(mixed_view[0].name, "UDPipe");
    }
}
