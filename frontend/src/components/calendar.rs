use crate::auth::use_auth;
use crate::components::banner::ErrorBanner;
use crate::components::icons::{ChevronLeft, ChevronRight};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use chrono::NaiveDate;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use taskdeck_shared::board::{OptimisticPatch, replace_task};
use taskdeck_shared::calendar::{
    CalendarNav, DESCRIPTION_PREVIEW_CHARS, DayBuckets, DayCell, MonthView, WEEKDAY_LABELS,
    bucket_by_due_date, detail_meta, open_tasks_on, truncate_chars,
};
use taskdeck_shared::error::fallback;
use taskdeck_shared::{AppConfig, Priority, Task, TaskFilter, TaskId, TaskPatch, TaskStatus, date};

fn chip_class(priority: Priority) -> &'static str {
    match priority {
        Priority::Urgent => "badge badge-error badge-sm w-full justify-start truncate",
        Priority::High => "badge badge-warning badge-sm w-full justify-start truncate",
        Priority::Medium => "badge badge-info badge-sm w-full justify-start truncate",
        Priority::Low => "badge badge-ghost badge-sm w-full justify-start truncate",
    }
}

/// 月历视图
///
/// 挂载时拉取一次任务（不受看板筛选影响），按截止日期分桶后铺成 6x7 网格。
#[component]
pub fn CalendarPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let page_size = use_context::<AppConfig>().unwrap_or_default().calendar_page_size;
    let today = date::today();

    let tasks = RwSignal::new(Vec::<Task>::new());
    let anchor = RwSignal::new(today);
    let selected = RwSignal::new(Option::<NaiveDate>::None);
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    {
        let api = auth.api();
        spawn_local(async move {
            match api.list_tasks(&TaskFilter::default(), page_size).await {
                Ok(page) => tasks.set(page.items),
                Err(e) => set_error_msg.set(Some(e.user_message(fallback::LOAD_TASKS))),
            }
            set_loading.set(false);
        });
    }

    let buckets = Memo::new(move |_| tasks.with(|list| bucket_by_due_date(list)));
    let month = Memo::new(move |_| buckets.with(|b| MonthView::build(anchor.get(), today, b)));

    let navigate_month = move |nav: CalendarNav| anchor.update(|a| *a = nav.apply(*a, today));

    // ← / → / T 快捷键
    let keys = window_event_listener(ev::keydown, move |ev| {
        if ev.ctrl_key() || ev.meta_key() || ev.alt_key() || typing_in_field(&ev) {
            return;
        }
        if let Some(nav) = CalendarNav::from_key(&ev.key()) {
            ev.prevent_default();
            navigate_month(nav);
        }
    });
    on_cleanup(move || keys.remove());

    let mark_done = Callback::new(move |id: TaskId| {
        let patch = TaskPatch::status(TaskStatus::Done);
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

    let open_on_board = Callback::new(move |day: NaiveDate| {
        let query = TaskFilter::for_day(day).to_query_string();
        router.navigate(&AppRoute::Board.href(&query));
    });

    let select_day = Callback::new(move |day: NaiveDate| selected.set(Some(day)));

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-2xl font-semibold">{move || month.with(MonthView::title)}</h2>
                <div class="join">
                    <button class="btn btn-sm join-item" title="Previous month (←)" on:click=move |_| navigate_month(CalendarNav::Previous)>
                        <ChevronLeft attr:class="h-4 w-4" />
                    </button>
                    <button class="btn btn-sm join-item" title="Today (T)" on:click=move |_| navigate_month(CalendarNav::Today)>
                        "Today"
                    </button>
                    <button class="btn btn-sm join-item" title="Next month (→)" on:click=move |_| navigate_month(CalendarNav::Next)>
                        <ChevronRight attr:class="h-4 w-4" />
                    </button>
                </div>
            </div>

            <ErrorBanner message=error_msg />

            <div class="card bg-base-100 shadow-sm">
                <div class="card-body p-3">
                    <div class="grid grid-cols-7 gap-1 text-xs font-semibold text-base-content/60">
                        {WEEKDAY_LABELS
                            .into_iter()
                            .map(|label| view! { <div class="text-center py-1">{label}</div> })
                            .collect_view()}
                    </div>
                    <div class="grid grid-cols-7 gap-1">
                        {move || {
                            month.with(|m| {
                                m.cells
                                    .iter()
                                    .cloned()
                                    .map(|cell| view! { <DayTile cell=cell selected=selected on_select=select_day /> })
                                    .collect_view()
                            })
                        }}
                    </div>
                    <Show when=move || loading.get()>
                        <div class="text-center text-sm text-base-content/50 py-2">"Loading..."</div>
                    </Show>
                </div>
            </div>

            {move || {
                selected
                    .get()
                    .map(|day| {
                        view! {
                            <DayDetail
                                day=day
                                buckets=buckets
                                on_open=open_on_board
                                on_done=mark_done
                                on_close=Callback::new(move |()| selected.set(None))
                            />
                        }
                    })
            }}
        </div>
    }
}

/// 输入框里的按键不当作快捷键
fn typing_in_field(ev: &web_sys::KeyboardEvent) -> bool {
    use wasm_bindgen::JsCast;

    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .map(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT"))
        .unwrap_or(false)
}

#[component]
fn DayTile(
    cell: DayCell,
    selected: RwSignal<Option<NaiveDate>>,
    on_select: Callback<NaiveDate>,
) -> impl IntoView {
    let key = cell.key();
    let DayCell {
        date: day,
        in_month,
        is_today,
        chips,
        more,
        has_overdue,
    } = cell;

    let tile_class = move || {
        let mut class = String::from(
            "min-h-24 rounded-lg border p-1 text-left flex flex-col gap-1 cursor-pointer hover:bg-base-200 transition",
        );
        class.push_str(if in_month { " border-base-300" } else { " border-base-200 opacity-40" });
        if selected.get() == Some(day) {
            class.push_str(" bg-base-200");
        }
        class
    };
    let number_class = if is_today {
        "inline-flex h-6 w-6 items-center justify-center rounded-full ring-2 ring-primary text-xs font-semibold"
    } else {
        "inline-flex h-6 w-6 items-center justify-center text-xs"
    };

    view! {
        <button type="button" class=tile_class title=key on:click=move |_| on_select.run(day)>
            <div class="flex items-center justify-between">
                <span class=number_class>{day.format("%-d").to_string()}</span>
                {has_overdue.then(|| view! { <span class="h-2 w-2 rounded-full bg-error" title="Overdue"></span> })}
            </div>
            {chips
                .into_iter()
                .map(|chip| view! {
                    <span class=chip_class(chip.priority) title=chip.tooltip.unwrap_or_default()>
                        {chip.label}
                    </span>
                })
                .collect_view()}
            {(more > 0).then(|| view! {
                <span class="badge badge-outline badge-xs">{format!("+{more}")}</span>
            })}
        </button>
    }
}

/// 选中日期的任务详情
#[component]
fn DayDetail(
    day: NaiveDate,
    buckets: Memo<DayBuckets>,
    on_open: Callback<NaiveDate>,
    on_done: Callback<TaskId>,
    on_close: Callback<()>,
) -> impl IntoView {
    let open_tasks = move || buckets.with(|b| open_tasks_on(b, day));

    view! {
        <div class="card bg-base-100 shadow-sm">
            <div class="card-body p-4 gap-3">
                <div class="flex items-center justify-between">
                    <h3 class="card-title text-base">{day.format("%A, %B %-d, %Y").to_string()}</h3>
                    <div class="flex gap-2">
                        <button class="btn btn-sm btn-outline" on:click=move |_| on_open.run(day)>
                            "Open on Board"
                        </button>
                        <button class="btn btn-sm btn-ghost" on:click=move |_| on_close.run(())>
                            "Close"
                        </button>
                    </div>
                </div>
                {move || {
                    let items = open_tasks();
                    if items.is_empty() {
                        view! { <p class="text-sm text-base-content/60">"No tasks for this day."</p> }.into_any()
                    } else {
                        items
                            .into_iter()
                            .map(|task| {
                                let id = task.id;
                                let meta = detail_meta(&task);
                                view! {
                                    <div class="flex items-start justify-between gap-3 border-b border-base-200 pb-2 last:border-0">
                                        <div class="space-y-1">
                                            <div class="font-medium">{task.title}</div>
                                            <div class="text-xs text-base-content/60 flex flex-wrap gap-x-3">
                                                {meta
                                                    .into_iter()
                                                    .map(|line| view! { <span>{line}</span> })
                                                    .collect_view()}
                                            </div>
                                            {task.description.map(|d| view! {
                                                <p class="text-xs text-base-content/60">
                                                    {truncate_chars(&d, DESCRIPTION_PREVIEW_CHARS)}
                                                </p>
                                            })}
                                        </div>
                                        <button class="btn btn-xs btn-success btn-outline" on:click=move |_| on_done.run(id)>
                                            "Mark done"
                                        </button>
                                    </div>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }
                }}
            </div>
        </div>
    }
}
