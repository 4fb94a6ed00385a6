//! Resource list rendering.
//!
//! Each resource renders by kind: a pending placeholder, a dictionary
//! text-entry row, or a normal row with profile selectors, content/outline
//! toggle and the secondary-processing buttons.

use dioxus::prelude::*;
use switchboard_client::{OutlineEntry, ResourceInfo};

use crate::actions;
use crate::components::DropArea;
use crate::state::{use_switchboard, ProfileField, ResourceEntry, ResourceId, SelectOption};
use crate::util;

#[component]
pub fn ResourceList() -> Element {
    let ctx = use_switchboard();
    let resources = ctx.resources;
    let entries: Vec<ResourceEntry> = resources.read().entries().to_vec();

    if entries.is_empty() {
        return rsx! {};
    }

    let multiple = ctx.multiple_resources_enabled();
    let all_dictionary = entries.iter().all(ResourceEntry::is_dictionary);
    let rows: Vec<(String, ResourceEntry)> = entries
        .into_iter()
        .map(|entry| (entry.id.as_key(), entry))
        .collect();

    rsx! {
        section {
            class: "resource-list",
            div {
                class: "resource-list-header",
                h2 { "Resources" }
                if multiple {
                    button {
                        class: "btn btn-xs",
                        onclick: {
                            let ctx = ctx.clone();
                            move |_| actions::clear_resources(&ctx)
                        },
                        "Clear all"
                    }
                }
            }
            for (row_key, entry) in rows {
                ResourceRow { key: "{row_key}", entry }
            }
            if multiple && !all_dictionary {
                AddMorePane {}
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct ResourceRowProps {
    entry: ResourceEntry,
}

#[component]
fn ResourceRow(props: ResourceRowProps) -> Element {
    let entry = &props.entry;
    match &entry.info {
        None => {
            let label = if entry.from_extraction {
                "Extracting..."
            } else {
                "Uploading..."
            };
            rsx! {
                div { class: "resource-row resource-pending",
                    span { class: "namesize", "{label}" }
                }
            }
        }
        Some(info) if info.is_dictionary() => rsx! {
            DictionaryRow { id: entry.id.clone(), info: info.clone() }
        },
        Some(info) => rsx! {
            NormalRow { id: entry.id.clone(), info: info.clone() }
        },
    }
}

/// Text-entry resource: editable content plus a language selector.
#[component]
fn DictionaryRow(id: ResourceId, info: ResourceInfo) -> Element {
    let ctx = use_switchboard();
    let languages = ctx.languages.read().clone();
    let content = info.content.clone().unwrap_or_default();
    let language = info.profile.as_ref().and_then(|p| p.language.clone());

    let ctx_content = ctx.clone();
    let id_content = id.clone();
    let ctx_lang = ctx;
    let id_lang = id;

    rsx! {
        div {
            class: "resource-row resource-dictionary",
            // commits on blur or enter, like a plain form field
            input {
                r#type: "text",
                class: "dictionary-entry",
                value: "{content}",
                onchange: move |evt| {
                    let ctx = ctx_content.clone();
                    let id = id_content.clone();
                    spawn(async move {
                        actions::set_resource_content(&ctx, id, evt.value()).await;
                    });
                }
            }
            div {
                class: "resource-profile",
                span { class: "resource-header", "Language" }
                SelectBox {
                    options: languages,
                    value: language,
                    placeholder: "Select the language of the resource",
                    on_change: move |value: String| {
                        let ctx = ctx_lang.clone();
                        let id = id_lang.clone();
                        spawn(async move {
                            let value = if value.is_empty() { None } else { Some(value) };
                            actions::set_resource_profile(&ctx, id, ProfileField::Language, value).await;
                        });
                    }
                }
            }
        }
    }
}

#[component]
fn NormalRow(id: ResourceId, info: ResourceInfo) -> Element {
    let ctx = use_switchboard();
    let languages = ctx.languages.read().clone();
    let mediatypes = ctx.mediatypes.read().clone();
    let multiple = ctx.multiple_resources_enabled();
    let mut show_content = use_signal(|| false);

    let mediatype = info.profile.as_ref().and_then(|p| p.media_type.clone());
    let language = info.profile.as_ref().and_then(|p| p.language.clone());
    let mt = mediatype.clone().unwrap_or_default();

    let has_text_content = info.content.is_some() && util::is_text_mediatype(&mt);
    let is_archive = util::is_archive_mediatype(&mt);
    let has_content_or_outline = has_text_content || is_archive;
    let outline_missing = info.outline.is_none();

    let filename = info.filename.clone().unwrap_or_else(|| "(unnamed)".to_string());
    let link = info
        .original_link
        .clone()
        .or_else(|| info.local_link.clone())
        .unwrap_or_default();
    let size = util::human_size(info.file_length);

    let row_class = if info.is_source {
        "resource-row resource-source"
    } else if info.is_extracted_text() {
        "resource-row resource-extracted"
    } else {
        "resource-row"
    };

    let still_profiling = info.profile.is_none();

    let ctx_toggle = ctx.clone();
    let id_toggle = id.clone();
    let ctx_refresh = ctx.clone();
    let id_refresh = id.clone();
    let ctx_uncompress = ctx.clone();
    let id_uncompress = id.clone();
    let ctx_extract = ctx.clone();
    let id_extract = id.clone();
    let ctx_remove = ctx.clone();
    let id_remove = id.clone();
    let ctx_mt = ctx.clone();
    let id_mt = id.clone();
    let ctx_lang = ctx.clone();
    let id_lang = id.clone();

    rsx! {
        div {
            class: "{row_class}",
            div {
                class: "namesize",
                a { href: "{link}", class: "resource-name", "{filename}" }
                span { class: "resource-size", "{size}" }

                if has_content_or_outline {
                    button {
                        class: "btn btn-xs",
                        onclick: move |_| {
                            let expanding = !show_content();
                            show_content.set(expanding);
                            if expanding && is_archive && outline_missing {
                                let ctx = ctx_toggle.clone();
                                let id = id_toggle.clone();
                                spawn(async move {
                                    actions::fetch_outline(&ctx, id).await;
                                });
                            }
                        },
                        if show_content() { "Hide content" } else { "Show content" }
                    }
                }
                if still_profiling {
                    button {
                        class: "btn btn-xs",
                        onclick: move |_| {
                            let ctx = ctx_refresh.clone();
                            let id = id_refresh.clone();
                            spawn(async move {
                                actions::poll_async_resource(&ctx, id).await;
                            });
                        },
                        "Refresh"
                    }
                }
                if util::is_compressed_mediatype(&mt) {
                    button {
                        class: "btn btn-xs",
                        onclick: move |_| {
                            let ctx = ctx_uncompress.clone();
                            let id = id_uncompress.clone();
                            spawn(async move {
                                actions::uncompress_resource(&ctx, id).await;
                            });
                        },
                        "Uncompress"
                    }
                }
                if util::has_extractable_text(&mt) && !info.is_source {
                    button {
                        class: "btn btn-xs",
                        onclick: move |_| {
                            let ctx = ctx_extract.clone();
                            let id = id_extract.clone();
                            spawn(async move {
                                actions::extract_text_from_resource(&ctx, id).await;
                            });
                        },
                        "Extract Text"
                    }
                }
                if multiple || info.source_id.is_some() {
                    button {
                        class: "btn btn-xs btn-remove",
                        onclick: move |_| {
                            let ctx = ctx_remove.clone();
                            let id = id_remove.clone();
                            spawn(async move {
                                actions::remove_resource(&ctx, id).await;
                            });
                        },
                        "\u{1F5D1}"
                    }
                }
            }

            if info.is_extracted_text() {
                div { class: "resource-warning",
                    "\u{26A0} Automatically extracted text, may be incomplete or contain errors"
                }
            }

            if !info.is_source {
                div {
                    class: "resource-profile",
                    span { class: "resource-header", "Mediatype" }
                    SelectBox {
                        options: mediatypes,
                        value: mediatype,
                        placeholder: "Select the mediatype of the resource",
                        on_change: move |value: String| {
                            let ctx = ctx_mt.clone();
                            let id = id_mt.clone();
                            spawn(async move {
                                let value = if value.is_empty() { None } else { Some(value) };
                                actions::set_resource_profile(&ctx, id, ProfileField::MediaType, value).await;
                            });
                        }
                    }
                    span { class: "resource-header", "Language" }
                    SelectBox {
                        options: languages,
                        value: language,
                        placeholder: "Select the language of the resource",
                        on_change: move |value: String| {
                            let ctx = ctx_lang.clone();
                            let id = id_lang.clone();
                            spawn(async move {
                                let value = if value.is_empty() { None } else { Some(value) };
                                actions::set_resource_profile(&ctx, id, ProfileField::Language, value).await;
                            });
                        }
                    }
                }
            }

            if show_content() {
                ContentOrOutline { id: id.clone(), info: info.clone() }
            }
        }
    }
}

/// Inline text preview, or the archive outline when there is no preview.
#[component]
fn ContentOrOutline(id: ResourceId, info: ResourceInfo) -> Element {
    let ctx = use_switchboard();
    let multiple = ctx.multiple_resources_enabled();

    let mt = info
        .profile
        .as_ref()
        .and_then(|p| p.media_type.as_deref())
        .unwrap_or_default()
        .to_string();
    let has_text_content = info.content.is_some() && util::is_text_mediatype(&mt);

    if has_text_content {
        let content = info.content.clone().unwrap_or_default();
        return rsx! {
            div { class: "resource-content",
                pre {
                    "{content}"
                    if info.content_is_incomplete {
                        span { "..." }
                    }
                }
            }
        };
    }

    let Some(outline) = info.outline.clone() else {
        return rsx! {
            div { class: "resource-content", p { "Loading outline..." } }
        };
    };

    let header = if multiple {
        "Select files for further processing"
    } else {
        "Select a file for further processing"
    };
    // nested archives don't offer a selector
    let selectable = info.source_id.is_none();
    let entry_rows: Vec<(String, OutlineEntry)> = outline
        .into_iter()
        .map(|entry| (format!("{}-{}", id.as_key(), entry.name), entry))
        .collect();

    rsx! {
        div {
            class: "resource-outline",
            if selectable {
                span { class: "outline-header", "{header}" }
            }
            for (entry_key, entry) in entry_rows {
                ArchiveEntryRow {
                    key: "{entry_key}",
                    archive: id.clone(),
                    entry,
                    selectable,
                    exclusive: !multiple,
                }
            }
            if info.outline_is_incomplete {
                span { "..." }
            }
        }
    }
}

#[component]
fn ArchiveEntryRow(archive: ResourceId, entry: OutlineEntry, selectable: bool, exclusive: bool) -> Element {
    let ctx = use_switchboard();
    let entry_mediatype = entry
        .profile
        .as_ref()
        .and_then(|p| p.media_type.clone())
        .unwrap_or_default();
    let size = if entry.size > 0 {
        util::human_size(Some(entry.size))
    } else {
        String::new()
    };
    let entry_name = entry.name.clone();

    rsx! {
        div {
            class: "outline-entry",
            label {
                if selectable {
                    input {
                        r#type: if exclusive { "radio" } else { "checkbox" },
                        name: "{entry.name}",
                        checked: entry.checked,
                        onchange: move |_| {
                            let ctx = ctx.clone();
                            let archive = archive.clone();
                            let entry_name = entry_name.clone();
                            spawn(async move {
                                actions::toggle_archive_entry(&ctx, archive, entry_name).await;
                            });
                        }
                    }
                }
                span { class: "outline-name", "\u{1F4C4} {entry.name}" }
            }
            span { class: "outline-mediatype", "{entry_mediatype}" }
            span { class: "outline-size", "{size}" }
        }
    }
}

/// Collapsible pane for adding one more resource in multi-resource mode.
#[component]
fn AddMorePane() -> Element {
    let mut open = use_signal(|| false);

    rsx! {
        if open() {
            div {
                class: "more-data-pane",
                h3 { "Add another resource" }
                DropArea {}
                button {
                    class: "btn",
                    onclick: move |_| open.set(false),
                    "Dismiss"
                }
            }
        } else {
            button {
                class: "more-data-button",
                onclick: move |_| open.set(true),
                "+ Add another resource"
            }
        }
    }
}

/// Dropdown bound to a profile field. An already-set value that is missing
/// from the option list gets an ad-hoc entry so the selector can show it.
#[component]
fn SelectBox(
    options: Vec<SelectOption>,
    value: Option<String>,
    placeholder: String,
    on_change: EventHandler<String>,
) -> Element {
    let mut options = options.clone();
    if let Some(value) = &value {
        if !options.iter().any(|o| &o.value == value) {
            options.insert(
                0,
                SelectOption {
                    value: value.clone(),
                    label: value.clone(),
                },
            );
        }
    }
    let current = value.clone().unwrap_or_default();

    rsx! {
        select {
            class: "profile-select",
            value: "{current}",
            onchange: move |evt| on_change.call(evt.value()),
            option {
                value: "",
                disabled: true,
                selected: current.is_empty(),
                "{placeholder}"
            }
            for opt in options {
                option {
                    key: "{opt.value}",
                    value: "{opt.value}",
                    selected: opt.value == current,
                    "{opt.label}"
                }
            }
        }
    }
}
