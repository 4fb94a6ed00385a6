//! Input affordances: file drop zone, link paste box, text submit box.

use std::sync::Arc;

use dioxus::html::{FileEngine, HasFileData};
use dioxus::prelude::*;

use crate::actions;
use crate::components::LoadingDots;
use crate::state::{use_switchboard, SwitchboardContext};
use crate::util;

/// Read every dropped/picked file and upload each one independently.
/// Completions may arrive out of order; each one only touches its own
/// placeholder.
fn upload_files(ctx: SwitchboardContext, mut transfers: Signal<u32>, engine: Arc<dyn FileEngine>) {
    spawn(async move {
        let current = *transfers.peek();
        transfers.set(current + 1);
        for name in engine.files() {
            match engine.read_file(&name).await {
                Some(bytes) => actions::upload_file(&ctx, name.clone(), bytes).await,
                None => tracing::warn!(file = %name, "could not read dropped file"),
            }
        }
        let current = *transfers.peek();
        transfers.set(current.saturating_sub(1));
    });
}

#[component]
pub fn DropArea() -> Element {
    let ctx = use_switchboard();
    let mut paste_value = use_signal(String::new);
    let mut text_value = use_signal(String::new);
    let transfers = use_signal(|| 0u32);

    let ctx_drop = ctx.clone();
    let ctx_pick = ctx.clone();
    let ctx_paste = ctx.clone();
    let ctx_text = ctx.clone();

    let text_is_empty = text_value().trim().is_empty();

    rsx! {
        div {
            class: "input-areas",

            // Drop zone
            div {
                class: "dropzone",
                ondragover: move |evt| evt.prevent_default(),
                ondrop: move |evt| {
                    evt.prevent_default();
                    if let Some(engine) = evt.files() {
                        upload_files(ctx_drop.clone(), transfers, engine);
                    }
                },
                p { "Drop your file here, or pick the file to upload." }
                input {
                    r#type: "file",
                    multiple: true,
                    onchange: move |evt| {
                        if let Some(engine) = evt.files() {
                            upload_files(ctx_pick.clone(), transfers, engine);
                        }
                    }
                }
            }

            // Paste box; a value that looks like a URL triggers the upload
            // and clears the box, anything else is left alone
            div {
                class: "pastezone",
                textarea {
                    class: "inputzone",
                    value: "{paste_value}",
                    rows: "5",
                    placeholder: "Paste a shared link from Dropbox or B2DROP. Or paste a persistent identifier.",
                    oninput: move |evt| {
                        let value = evt.value();
                        if util::looks_like_url(&util::unfold_handle(value.trim())) {
                            paste_value.set(String::new());
                            let ctx = ctx_paste.clone();
                            spawn(async move {
                                actions::upload_link(&ctx, value).await;
                            });
                        } else {
                            paste_value.set(value);
                        }
                    }
                }
            }

            // Text box
            form {
                class: "textzone",
                onsubmit: move |_| {
                    let text = text_value().trim().to_string();
                    if text.is_empty() {
                        return;
                    }
                    text_value.set(String::new());
                    let ctx = ctx_text.clone();
                    spawn(async move {
                        actions::submit_text(&ctx, text).await;
                    });
                },
                textarea {
                    class: "inputzone",
                    value: "{text_value}",
                    rows: "5",
                    placeholder: "Enter your text here. For large input, create a file and drop it in the left-most area.",
                    oninput: move |evt| text_value.set(evt.value())
                }
                button {
                    r#type: "submit",
                    disabled: text_is_empty,
                    "Submit Text"
                }
            }

            if transfers() > 0 {
                LoadingDots {}
            }
        }
    }
}
