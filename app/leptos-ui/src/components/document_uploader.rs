use lc_api_types::CustomerId;
use lc_core::widgets::DocumentUploader;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{FileList, HtmlInputElement};

use crate::api;
use crate::components::spinner::Spinner;
use crate::state::{use_console_state, Mounted};

/// Drag-and-drop or picker upload of customer documents.
#[component]
pub fn DocumentUploaderPanel(customer: CustomerId) -> impl IntoView {
    let state = use_console_state();
    let mounted = Mounted::track();
    let uploader = RwSignal::new(DocumentUploader::new(customer));

    // Reading a file is async; new files are appended once read.
    let add_files = {
        let mounted = mounted.clone();
        move |list: Option<FileList>| {
            let mounted = mounted.clone();
            spawn_local(async move {
                let parts = api::read_files(list).await;
                if mounted.get() && !parts.is_empty() {
                    uploader.update(|u| u.add_files(parts));
                }
            });
        }
    };
    let add_picked = add_files.clone();

    let upload = move |_| {
        let Some(dispatch) = uploader.try_update(DocumentUploader::begin_upload).flatten() else {
            return;
        };
        let api = state.api();
        let mounted = mounted.clone();
        spawn_local(async move {
            let result = api.upload_documents(dispatch.customer, dispatch.files).await;
            if !mounted.get() {
                return;
            }
            if let Some(notice) = uploader.try_update(|u| u.finish_upload(result)) {
                state.notify(notice);
            }
        });
    };

    view! {
        <div class="document-uploader card p-3">
            <h5>"Upload Documents"</h5>
            <div
                class="drop-zone"
                class:dragging=(move || uploader.with(DocumentUploader::is_dragging))
                on:dragover=move |ev: leptos::ev::DragEvent| {
                    ev.prevent_default();
                    uploader.update(|u| u.set_dragging(true));
                }
                on:dragleave=move |_| uploader.update(|u| u.set_dragging(false))
                on:drop=move |ev: leptos::ev::DragEvent| {
                    ev.prevent_default();
                    uploader.update(|u| u.set_dragging(false));
                    add_files(ev.data_transfer().and_then(|dt| dt.files()));
                }
            >
                <p>"Drag & drop files here, or"</p>
                <input
                    type="file"
                    multiple
                    on:change=move |ev| {
                        let files = ev
                            .target()
                            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                            .and_then(|input| input.files());
                        add_picked(files);
                    }
                />
            </div>

            <ul class="file-list">
                {move || uploader.with(|u| {
                    u.files()
                        .iter()
                        .enumerate()
                        .map(|(idx, file)| {
                            let name = file.file_name.clone();
                            let size = format!("{:.1} KB", file.bytes.len() as f64 / 1024.0);
                            view! {
                                <li class="file-item">
                                    <span>{name}</span>
                                    <span class="text-muted">" ("{size}")"</span>
                                    <button
                                        class="btn btn-sm btn-link text-danger"
                                        disabled=move || uploader.with(DocumentUploader::is_uploading)
                                        on:click=move |_| {
                                            uploader.update(|u| {
                                                u.remove_file(idx);
                                            });
                                        }
                                    >
                                        "Remove"
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()
                })}
            </ul>

            <button
                class="btn btn-primary"
                disabled=move || uploader.with(|u| u.is_uploading() || u.files().is_empty())
                on:click=upload
            >
                {move || if uploader.with(DocumentUploader::is_uploading) { "Uploading..." } else { "Upload" }}
            </button>
            {move || uploader.with(DocumentUploader::is_uploading).then(|| view! { <Spinner size="sm" /> })}
            {move || uploader.with(|u| u.outcome().cloned()).map(|notice| view! {
                <p class=notice.level.css_class()>{notice.message}</p>
            })}
        </div>
    }
}
