use crate::auth::use_auth;
use crate::components::banner::ErrorBanner;
use leptos::prelude::*;
use leptos::task::spawn_local;
use taskdeck_shared::AnalyticsSummary;
use taskdeck_shared::analytics::SummaryCategory;
use taskdeck_shared::error::fallback;

fn bar_color(category: SummaryCategory) -> &'static str {
    match category {
        SummaryCategory::Active => "h-2 bg-info rounded-full transition-all",
        SummaryCategory::Done => "h-2 bg-success rounded-full transition-all",
        SummaryCategory::Overdue => "h-2 bg-error rounded-full transition-all",
    }
}

#[component]
pub fn AnalyticsPage() -> impl IntoView {
    let auth = use_auth();
    let summary = RwSignal::new(AnalyticsSummary::default());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    {
        let api = auth.api();
        spawn_local(async move {
            match api.analytics_summary().await {
                Ok(data) => summary.set(data),
                Err(e) => set_error_msg.set(Some(e.user_message(fallback::LOAD_ANALYTICS))),
            }
        });
    }

    view! {
        <div class="space-y-4">
            <ErrorBanner message=error_msg />

            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                {SummaryCategory::ALL
                    .into_iter()
                    .map(|category| view! {
                        <div class="stat">
                            <div class="stat-title">{category.label()}</div>
                            <div class="stat-value">{move || summary.with(|s| s.value(category))}</div>
                        </div>
                    })
                    .collect_view()}
            </div>

            <div class="card bg-base-100 shadow-sm">
                <div class="card-body p-4 gap-3">
                    <h3 class="card-title text-base">"Summary"</h3>
                    {move || {
                        summary
                            .get()
                            .shares()
                            .into_iter()
                            .map(|share| view! {
                                <div class="space-y-1">
                                    <div class="text-sm text-base-content/70 flex justify-between">
                                        <span>{share.category.label()}</span>
                                        <span>{share.value}</span>
                                    </div>
                                    <div class="w-full h-2 bg-base-200 rounded-full">
                                        <div
                                            class=bar_color(share.category)
                                            style:width=share.width_percent()
                                        ></div>
                                    </div>
                                </div>
                            })
                            .collect_view()
                    }}
                </div>
            </div>
        </div>
    }
}
