use crate::components::icons::{Pencil, Trash};
use chrono::NaiveDate;
use leptos::prelude::*;
use taskdeck_shared::board::StatusActions;
use taskdeck_shared::date::{DueFlag, date_key};
use taskdeck_shared::{Priority, Task, TaskId, TaskStatus};

fn priority_badge(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "badge badge-ghost badge-sm",
        Priority::Medium => "badge badge-info badge-sm",
        Priority::High => "badge badge-warning badge-sm",
        Priority::Urgent => "badge badge-error badge-sm",
    }
}

#[component]
pub fn TaskCard(
    task: Task,
    today: NaiveDate,
    on_status: Callback<(TaskId, TaskStatus)>,
    on_edit: Callback<Task>,
    on_delete: Callback<TaskId>,
) -> impl IntoView {
    let id = task.id;
    let actions = StatusActions::for_status(task.status);
    let due_flag = task.due_flag(today);
    let due_label = task.due_date.map(date_key);
    let edit_target = task.clone();

    view! {
        <div class="card card-compact bg-base-100 border border-base-300 shadow-sm hover:shadow transition">
            <div class="card-body gap-1">
                <div class="flex items-start justify-between gap-2">
                    <h4 class="font-medium break-words">{task.title.clone()}</h4>
                    <span class=priority_badge(task.priority)>{task.priority.as_str()}</span>
                </div>

                {task.description.clone().map(|d| view! {
                    <p class="text-xs text-base-content/60 line-clamp-2">{d}</p>
                })}

                <div class="flex items-center gap-2 text-xs text-base-content/60">
                    {due_label.map(|d| view! { <span>"Due: " {d}</span> })}
                    {match due_flag {
                        DueFlag::Overdue => Some(view! { <span class="badge badge-error badge-xs">"Overdue"</span> }.into_any()),
                        DueFlag::DueToday => Some(view! { <span class="badge badge-warning badge-xs">"Due today"</span> }.into_any()),
                        DueFlag::None => None,
                    }}
                </div>

                <div class="card-actions justify-end mt-2">
                    {actions.start.then(|| view! {
                        <button class="btn btn-xs btn-outline" on:click=move |_| on_status.run((id, TaskStatus::InProgress))>
                            "Start"
                        </button>
                    })}
                    {actions.finish.then(|| view! {
                        <button class="btn btn-xs btn-outline btn-success" on:click=move |_| on_status.run((id, TaskStatus::Done))>
                            "Done"
                        </button>
                    })}
                    <button
                        class="btn btn-xs btn-ghost btn-square"
                        title="Edit"
                        on:click=move |_| on_edit.run(edit_target.clone())
                    >
                        <Pencil attr:class="h-3 w-3" />
                    </button>
                    <button
                        class="btn btn-xs btn-ghost btn-square text-error"
                        title="Delete"
                        on:click=move |_| on_delete.run(id)
                    >
                        <Trash attr:class="h-3 w-3" />
                    </button>
                </div>
            </div>
        </div>
    }
}
