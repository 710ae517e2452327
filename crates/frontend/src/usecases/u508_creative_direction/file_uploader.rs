use super::api;
use super::config::CreativeDirectionConfig;
use super::format_file_size;
use super::store::use_creative_direction;
use super::track;
use super::view_model::CreativeDirectionVm;
use crate::shared::file_source::{content_type_for, files_from_list};
use crate::shared::icons::icon;
use crate::shared::notice::show_blocking_notice;
use contracts::usecases::u508_creative_direction::limits::{accept_attribute, MAX_FILES};
use contracts::usecases::u508_creative_direction::{
    validate_selection, AnalyticsEvent, UploadedFile,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;
use wasm_bindgen::JsCast;

const FILE_INPUT_ID: &str = "creative-direction-files";

/// Drop zone + list of uploads in flight + uploaded files with descriptions
#[component]
pub fn FileUploader(
    vm: CreativeDirectionVm,
    config: CreativeDirectionConfig,
    on_analytics: Option<Callback<AnalyticsEvent>>,
) -> impl IntoView {
    let ctx = use_creative_direction();
    let config = StoredValue::new(config);

    let attached = move || {
        ctx.state().with(|s| s.uploaded_files.len()) + vm.uploads.with(|q| q.in_flight())
    };

    // Validate the whole selection, then upload it file by file
    let start_uploads = move |files: Vec<web_sys::File>| {
        if files.is_empty() {
            return;
        }
        let existing = ctx.get_untracked().uploaded_files.len()
            + vm.uploads.with_untracked(|q| q.in_flight());
        let selection: Vec<(String, u64)> = files
            .iter()
            .map(|f| (f.name(), f.size() as u64))
            .collect();
        if let Err(e) = validate_selection(existing, selection.iter().map(|(n, s)| (n.as_str(), *s))) {
            show_blocking_notice(&e.to_string());
            return;
        }

        let mut keys = Vec::new();
        vm.uploads
            .update(|q| keys = q.enqueue(selection.iter().map(|(n, s)| (n.as_str(), *s))));
        let config = config.get_value();

        spawn_local(async move {
            let results = api::upload_many(&files, &config, |index, percent| {
                vm.uploads.update(|q| q.set_progress(keys[index], percent));
            })
            .await;

            let mut accepted = Vec::new();
            for ((file, key), result) in files.iter().zip(keys.iter().copied()).zip(results) {
                // Entry gone: the form was cleared while uploading
                if !vm.uploads.with_untracked(|q| q.contains(key)) {
                    continue;
                }
                match result {
                    Ok(data) => {
                        vm.uploads.update(|q| q.complete(key));
                        accepted.push(UploadedFile {
                            id: Uuid::new_v4().to_string(),
                            url: data.url,
                            filename: data.filename,
                            size_bytes: data.size,
                            mime_type: content_type_for(file),
                        });
                    }
                    Err(e) => vm.uploads.update(|q| q.fail(key, e)),
                }
            }
            if accepted.is_empty() {
                return;
            }

            let patch = ctx.get_untracked().with_files_appended(accepted);
            match ctx.merge(patch) {
                Ok(()) => {
                    let count = ctx.get_untracked().uploaded_files.len();
                    track(on_analytics, AnalyticsEvent::FilesChanged { count });
                }
                Err(e) => show_blocking_notice(&e.to_string()),
            }
        });
    };

    let handle_input_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let files = files_from_list(input.files());
        // Allow picking the same file again after a failure
        input.set_value("");
        start_uploads(files);
    };

    let handle_drag_over = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        vm.is_dragging.set(true);
    };

    let handle_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        vm.is_dragging.set(false);
        let files = files_from_list(ev.data_transfer().and_then(|dt| dt.files()));
        start_uploads(files);
    };

    view! {
        <div class="creative-direction__files">
            <div class="creative-direction__label">
                "Reference files "
                <span class="creative-direction__hint">
                    {move || format!("({} of {})", ctx.state().with(|s| s.uploaded_files.len()), MAX_FILES)}
                </span>
            </div>

            <Show when=move || { attached() < MAX_FILES }>
                <label
                    for=FILE_INPUT_ID
                    class=move || if vm.is_dragging.get() { "dropzone dropzone--active" } else { "dropzone" }
                    on:dragover=handle_drag_over
                    on:dragleave=move |_| vm.is_dragging.set(false)
                    on:drop=handle_drop
                >
                    {icon("upload")}
                    <span class="dropzone__title">"Drag files here or click to browse"</span>
                    <span class="dropzone__hint">
                        "JPG, PNG, GIF, WEBP, SVG, PDF, DOC, PSD, AI, EPS · up to 2 GB each"
                    </span>
                </label>
            </Show>
            <input
                id=FILE_INPUT_ID
                type="file"
                multiple=true
                accept=accept_attribute()
                class="hidden"
                on:change=handle_input_change
            />

            <div class="upload-progress-list">
                {move || vm.uploads.get().entries().iter().cloned().map(|entry| {
                    let key = entry.key;
                    let failed = entry.error.is_some();
                    view! {
                        <div class=if failed { "upload-progress upload-progress--error" } else { "upload-progress" }>
                            {icon("file")}
                            <span class="upload-progress__name">{entry.filename.clone()}</span>
                            <span class="upload-progress__size">{format_file_size(entry.size_bytes)}</span>
                            {match entry.error.clone() {
                                Some(error) => view! {
                                    <span class="upload-progress__error">{error}</span>
                                    <button
                                        type="button"
                                        class="button button--icon"
                                        title="Dismiss"
                                        on:click=move |_| vm.uploads.update(|q| q.dismiss(key))
                                    >
                                        {icon("x")}
                                    </button>
                                }.into_any(),
                                None => view! {
                                    <progress class="upload-progress__bar" max="100" value=entry.progress></progress>
                                    <span class="upload-progress__percent">{format!("{}%", entry.progress)}</span>
                                }.into_any(),
                            }}
                        </div>
                    }
                }).collect_view()}
            </div>

            <div class="uploaded-files">
                <For
                    each=move || ctx.state().with(|s| s.uploaded_files.clone())
                    key=|file| file.id.clone()
                    let:file
                >
                    <UploadedFileRow file=file on_analytics=on_analytics />
                </For>
            </div>
        </div>
    }
}

/// One uploaded file with its description field
#[component]
fn UploadedFileRow(file: UploadedFile, on_analytics: Option<Callback<AnalyticsEvent>>) -> impl IntoView {
    let ctx = use_creative_direction();
    let id = StoredValue::new(file.id.clone());

    let description = move || {
        id.with_value(|id| ctx.state().with(|s| s.description_for(id).to_string()))
    };

    let handle_description = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        let patch = id.with_value(|id| ctx.get_untracked().with_description(id, value));
        if let Some(patch) = patch {
            if let Err(e) = ctx.merge(patch) {
                log::warn!("Description not saved: {}", e);
            }
        }
    };

    let handle_remove = move |_| {
        let patch = id.with_value(|id| ctx.get_untracked().without_file(id));
        if ctx.merge(patch).is_ok() {
            let count = ctx.get_untracked().uploaded_files.len();
            track(on_analytics, AnalyticsEvent::FilesChanged { count });
        }
    };

    view! {
        <div class="uploaded-file">
            <div class="uploaded-file__header">
                {icon("file")}
                <a class="uploaded-file__name" href=file.url.clone() target="_blank" rel="noopener">
                    {file.filename.clone()}
                </a>
                <span class="uploaded-file__size">{format_file_size(file.size_bytes)}</span>
                <button
                    type="button"
                    class="button button--icon"
                    title="Remove file"
                    on:click=handle_remove
                >
                    {icon("trash")}
                </button>
            </div>
            <textarea
                class="uploaded-file__description"
                rows=2
                placeholder="What should we take from this file?"
                prop:value=description
                on:input=handle_description
            ></textarea>
        </div>
    }
}
