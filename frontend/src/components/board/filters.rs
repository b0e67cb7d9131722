//! 看板筛选面板
//!
//! 所有筛选都写回 URL 查询串；搜索框先经过防抖再提交。

use crate::web::DebouncedText;
use crate::web::router::use_router;
use leptos::prelude::*;
use taskdeck_shared::filter::{FilterKey, SortKey};
use taskdeck_shared::{AppConfig, Priority, TaskFilter, TaskStatus};

#[component]
pub fn FiltersPanel(filter: Memo<TaskFilter>) -> impl IntoView {
    let router = use_router();
    let config = use_context::<AppConfig>().unwrap_or_default();
    let debounce = DebouncedText::new(config.search_debounce);

    // 以最新的筛选为基础修改某个键
    let commit = move |key: FilterKey, raw: String| {
        let next = filter.get_untracked().with(key, &raw);
        router.replace_query(&next.to_query_string());
    };

    // 搜索框内容；外部改变查询（清空、从日历跳转）时同步
    let search_text = RwSignal::new(filter.with_untracked(|f| f.query.clone().unwrap_or_default()));
    let committed_query = Memo::new(move |_| filter.with(|f| f.query.clone().unwrap_or_default()));
    Effect::new(move |_| {
        let committed = committed_query.get();
        if !debounce.is_pending() && search_text.with_untracked(|t| t.trim() != committed.trim()) {
            search_text.set(committed);
        }
    });

    let on_search = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        search_text.set(value.clone());
        debounce.push(value, move |v| commit(FilterKey::Query, v));
    };

    let on_clear = move |_| {
        debounce.cancel();
        search_text.set(String::new());
        router.replace_query("");
    };

    let selected = move |key: FilterKey| move || filter.with(|f| f.get(key).unwrap_or_default());

    view! {
        <div class="card bg-base-100 shadow-sm">
            <div class="card-body p-4 grid grid-cols-2 md:grid-cols-4 lg:grid-cols-7 gap-3 items-end">
                <label class="form-control col-span-2">
                    <span class="label-text text-xs mb-1">"Search"</span>
                    <input
                        type="search"
                        placeholder="Title or description"
                        class="input input-bordered input-sm"
                        prop:value=search_text
                        on:input=on_search
                    />
                </label>

                <label class="form-control">
                    <span class="label-text text-xs mb-1">"Status"</span>
                    <select
                        class="select select-bordered select-sm"
                        prop:value=selected(FilterKey::Status)
                        on:change=move |ev| commit(FilterKey::Status, event_target_value(&ev))
                    >
                        <option value="">"All"</option>
                        {TaskStatus::ALL
                            .into_iter()
                            .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                            .collect_view()}
                    </select>
                </label>

                <label class="form-control">
                    <span class="label-text text-xs mb-1">"Priority"</span>
                    <select
                        class="select select-bordered select-sm"
                        prop:value=selected(FilterKey::Priority)
                        on:change=move |ev| commit(FilterKey::Priority, event_target_value(&ev))
                    >
                        <option value="">"All"</option>
                        {Priority::ALL
                            .into_iter()
                            .map(|p| view! { <option value=p.as_str()>{p.as_str()}</option> })
                            .collect_view()}
                    </select>
                </label>

                <label class="form-control">
                    <span class="label-text text-xs mb-1">"Due from"</span>
                    <input
                        type="date"
                        class="input input-bordered input-sm"
                        prop:value=selected(FilterKey::DueFrom)
                        on:change=move |ev| commit(FilterKey::DueFrom, event_target_value(&ev))
                    />
                </label>

                <label class="form-control">
                    <span class="label-text text-xs mb-1">"Due to"</span>
                    <input
                        type="date"
                        class="input input-bordered input-sm"
                        prop:value=selected(FilterKey::DueTo)
                        on:change=move |ev| commit(FilterKey::DueTo, event_target_value(&ev))
                    />
                </label>

                <label class="form-control">
                    <span class="label-text text-xs mb-1">"Sort"</span>
                    <select
                        class="select select-bordered select-sm"
                        prop:value=selected(FilterKey::Sort)
                        on:change=move |ev| commit(FilterKey::Sort, event_target_value(&ev))
                    >
                        <option value="">"Default"</option>
                        {SortKey::ALL
                            .into_iter()
                            .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                            .collect_view()}
                    </select>
                </label>

                <button
                    class="btn btn-sm btn-ghost"
                    disabled=move || filter.with(TaskFilter::is_empty) && search_text.with(String::is_empty)
                    on:click=on_clear
                >
                    "Clear"
                </button>
            </div>
        </div>
    }
}
