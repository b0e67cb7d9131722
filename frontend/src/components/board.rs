mod filters;
mod task_card;

use crate::auth::use_auth;
use crate::components::banner::ErrorBanner;
use crate::components::edit_task_modal::EditTaskModal;
use crate::components::icons::Plus;
use crate::web::router::use_router;
use filters::FiltersPanel;
use leptos::prelude::*;
use leptos::task::spawn_local;
use task_card::TaskCard;
use taskdeck_shared::board::{
    OptimisticPatch, StatusBuckets, TaskDraft, remove_task, replace_task,
};
use taskdeck_shared::error::fallback;
use taskdeck_shared::{AppConfig, Priority, Task, TaskFilter, TaskId, TaskPatch, TaskStatus, date};

#[component]
pub fn BoardPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let page_size = use_context::<AppConfig>().unwrap_or_default().board_page_size;
    let today = date::today();

    let tasks = RwSignal::new(Vec::<Task>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let editing = RwSignal::new(Option::<Task>::None);

    // 筛选状态完全来自 URL
    let filter = Memo::new(move |_| TaskFilter::from_query_string(&router.query().get()));

    let load_tasks = move || {
        let filter = filter.get_untracked();
        let api = auth.api();
        set_loading.set(true);
        set_error_msg.set(None);
        spawn_local(async move {
            match api.list_tasks(&filter, page_size).await {
                Ok(page) => tasks.set(page.items),
                Err(e) => set_error_msg.set(Some(e.user_message(fallback::LOAD_TASKS))),
            }
            set_loading.set(false);
        });
    };

    // 挂载时以及筛选变化时重新加载
    Effect::new(move |_| {
        filter.track();
        load_tasks();
    });

    let buckets = Memo::new(move |_| tasks.with(|list| StatusBuckets::group(list)));

    let change_status = Callback::new(move |(id, status): (TaskId, TaskStatus)| {
        let patch = TaskPatch::status(status);
        let Some(rollback) = tasks
            .try_update(|list| OptimisticPatch::apply(list, id, &patch))
            .flatten()
        else {
            return;
        };

        let api = auth.api();
        spawn_local(async move {
            match api.update_task(id, patch).await {
                Ok(saved) => tasks.update(|list| {
                    replace_task(list, saved);
                }),
                Err(e) => {
                    tracing::debug!(task = id, "status change failed, rolling back");
                    tasks.update(|list| {
                        if !rollback.rollback(list) {
                            tracing::debug!(task = id, "task changed since patch, rollback skipped");
                        }
                    });
                    set_error_msg.set(Some(e.user_message(fallback::UPDATE_TASK)));
                }
            }
        });
    });

    let delete = Callback::new(move |id: TaskId| {
        let api = auth.api();
        spawn_local(async move {
            match api.delete_task(id).await {
                Ok(()) => tasks.update(|list| {
                    remove_task(list, id);
                }),
                Err(e) => set_error_msg.set(Some(e.user_message(fallback::DELETE_TASK))),
            }
        });
    });

    let open_editor = Callback::new(move |task: Task| editing.set(Some(task)));
    let close_editor = Callback::new(move |()| editing.set(None));
    let on_saved = Callback::new(move |_: Task| load_tasks());

    let column = move |status: TaskStatus| {
        view! {
            <div class="card bg-base-200/60 border border-base-300">
                <div class="card-body p-3 gap-3">
                    <div class="flex items-center justify-between">
                        <h3 class="font-semibold">{status.label()}</h3>
                        <span class="badge badge-neutral badge-sm">
                            {move || buckets.with(|b| b.column(status).len())}
                        </span>
                    </div>
                    <div class="space-y-3">
                        {move || {
                            buckets.with(|b| {
                                b.column(status)
                                    .iter()
                                    .cloned()
                                    .map(|task| view! {
                                        <TaskCard
                                            task=task
                                            today=today
                                            on_status=change_status
                                            on_edit=open_editor
                                            on_delete=delete
                                        />
                                    })
                                    .collect_view()
                            })
                        }}
                    </div>
                </div>
            </div>
        }
    };

    view! {
        <div class="space-y-4">
            <AddTaskForm on_created=Callback::new(move |_: Task| load_tasks()) on_error=set_error_msg />
            <FiltersPanel filter=filter />
            <ErrorBanner message=error_msg />

            <Show
                when=move || !loading.get() || !tasks.with(Vec::is_empty)
                fallback=|| view! {
                    <div class="flex justify-center py-12">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
            >
                <div class="grid md:grid-cols-3 gap-4">
                    {TaskStatus::ALL.into_iter().map(column).collect_view()}
                </div>
            </Show>

            <EditTaskModal task=editing on_close=close_editor on_saved=on_saved />
        </div>
    }
}

/// 看板顶部的新建任务表单
#[component]
fn AddTaskForm(on_created: Callback<Task>, on_error: WriteSignal<Option<String>>) -> impl IntoView {
    let auth = use_auth();
    let draft = RwSignal::new(TaskDraft::default());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(new_task) = draft.with_untracked(TaskDraft::to_new_task) else {
            return;
        };

        set_is_submitting.set(true);
        let api = auth.api();
        spawn_local(async move {
            match api.create_task(new_task).await {
                Ok(task) => {
                    tracing::debug!(task = task.id, "task created");
                    draft.update(TaskDraft::reset);
                    on_created.run(task);
                }
                Err(e) => on_error.set(Some(e.user_message(fallback::ADD_TASK))),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <form class="card bg-base-100 shadow-sm" on:submit=on_submit>
            <div class="card-body p-3 flex-row gap-2">
                <input
                    type="text"
                    placeholder="Task title"
                    class="input input-bordered flex-1"
                    prop:value=move || draft.with(|d| d.title.clone())
                    on:input=move |ev| {
                        let title = event_target_value(&ev);
                        draft.update(|d| d.title = title);
                    }
                />
                <select
                    class="select select-bordered"
                    prop:value=move || draft.with(|d| d.priority.as_str())
                    on:change=move |ev| {
                        if let Ok(priority) = event_target_value(&ev).parse::<Priority>() {
                            draft.update(|d| d.priority = priority);
                        }
                    }
                >
                    {Priority::ALL
                        .into_iter()
                        .map(|p| view! { <option value=p.as_str()>{p.as_str()}</option> })
                        .collect_view()}
                </select>
                <button
                    type="submit"
                    class="btn btn-primary gap-2"
                    disabled=move || !draft.with(TaskDraft::can_submit) || is_submitting.get()
                >
                    <Plus attr:class="h-4 w-4" />
                    "Add"
                </button>
            </div>
        </form>
    }
}
