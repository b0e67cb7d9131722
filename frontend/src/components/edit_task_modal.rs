mod form_state;

use crate::auth::use_auth;
use crate::components::banner::ErrorBanner;
use form_state::FormState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use taskdeck_shared::error::fallback;
use taskdeck_shared::{Priority, Task, TaskStatus};

/// 编辑任务弹窗
///
/// `task` 为 `Some` 时打开；保存成功后把服务端返回的任务交给 `on_saved` 并关闭。
/// 保存失败时保持打开并显示错误。
#[component]
pub fn EditTaskModal(
    #[prop(into)] task: Signal<Option<Task>>,
    on_close: Callback<()>,
    on_saved: Callback<Task>,
) -> impl IntoView {
    let auth = use_auth();
    let form = FormState::new();
    let (is_saving, set_is_saving) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 每次打开时重新播种
    Effect::new(move |_| {
        if let Some(task) = task.get() {
            form.seed(&task);
            set_error_msg.set(None);
            set_is_saving.set(false);
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = task.with_untracked(|t| t.as_ref().map(|t| t.id)) else {
            return;
        };
        let Some(patch) = form.to_patch() else {
            return;
        };

        set_is_saving.set(true);
        set_error_msg.set(None);
        let api = auth.api();
        spawn_local(async move {
            match api.update_task(id, patch).await {
                Ok(saved) => {
                    on_saved.run(saved);
                    on_close.run(());
                }
                Err(e) => set_error_msg.set(Some(e.user_message(fallback::SAVE_TASK))),
            }
            set_is_saving.set(false);
        });
    };

    view! {
        <Show when=move || task.with(Option::is_some)>
            <div class="modal modal-open" role="dialog">
                <div class="modal-box">
                    <h3 class="font-bold text-lg">"Edit task"</h3>

                    <form class="space-y-3 mt-4" on:submit=on_submit>
                        <ErrorBanner message=error_msg />

                        <div class="form-control">
                            <label class="label" for="edit-title">
                                <span class="label-text">"Title"</span>
                            </label>
                            <input
                                id="edit-title"
                                type="text"
                                class="input input-bordered"
                                prop:value=form.title
                                on:input=move |ev| form.title.set(event_target_value(&ev))
                            />
                        </div>

                        <div class="form-control">
                            <label class="label" for="edit-description">
                                <span class="label-text">"Description"</span>
                            </label>
                            <textarea
                                id="edit-description"
                                class="textarea textarea-bordered"
                                rows="3"
                                prop:value=form.description
                                on:input=move |ev| form.description.set(event_target_value(&ev))
                            ></textarea>
                        </div>

                        <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
                            <div class="form-control">
                                <label class="label" for="edit-due">
                                    <span class="label-text">"Due date"</span>
                                </label>
                                <input
                                    id="edit-due"
                                    type="date"
                                    class="input input-bordered"
                                    prop:value=form.due_date
                                    on:input=move |ev| form.due_date.set(event_target_value(&ev))
                                />
                            </div>

                            <div class="form-control">
                                <label class="label" for="edit-priority">
                                    <span class="label-text">"Priority"</span>
                                </label>
                                <select
                                    id="edit-priority"
                                    class="select select-bordered"
                                    prop:value=move || form.priority.get().as_str()
                                    on:change=move |ev| {
                                        if let Ok(p) = event_target_value(&ev).parse::<Priority>() {
                                            form.priority.set(p);
                                        }
                                    }
                                >
                                    {Priority::ALL
                                        .into_iter()
                                        .map(|p| view! { <option value=p.as_str()>{p.as_str()}</option> })
                                        .collect_view()}
                                </select>
                            </div>

                            <div class="form-control">
                                <label class="label" for="edit-status">
                                    <span class="label-text">"Status"</span>
                                </label>
                                <select
                                    id="edit-status"
                                    class="select select-bordered"
                                    prop:value=move || form.status.get().as_str()
                                    on:change=move |ev| {
                                        if let Ok(s) = event_target_value(&ev).parse::<TaskStatus>() {
                                            form.status.set(s);
                                        }
                                    }
                                >
                                    {TaskStatus::ALL
                                        .into_iter()
                                        .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                                        .collect_view()}
                                </select>
                            </div>
                        </div>

                        <div class="modal-action">
                            <button type="button" class="btn btn-ghost" on:click=move |_| on_close.run(())>
                                "Cancel"
                            </button>
                            <button
                                type="submit"
                                class="btn btn-primary"
                                disabled=move || !form.can_save() || is_saving.get()
                            >
                                {move || if is_saving.get() {
                                    view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                                } else {
                                    "Save".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
                <div class="modal-backdrop" on:click=move |_| on_close.run(())></div>
            </div>
        </Show>
    }
}
