use crate::components::icons::AlertCircle;
use leptos::prelude::*;

/// 错误提示条，消息为空时不渲染
#[component]
pub fn ErrorBanner(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <div role="alert" class="alert alert-error text-sm py-2">
                <AlertCircle attr:class="stroke-current shrink-0 h-5 w-5" />
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}
