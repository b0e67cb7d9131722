use crate::auth::use_auth;
use crate::components::banner::ErrorBanner;
use crate::components::icons::LayoutKanban;
use leptos::prelude::*;
use leptos::task::spawn_local;
use taskdeck_shared::Credentials;
use taskdeck_shared::auth::{AuthMode, MIN_PASSWORD_LEN};

/// 登录/注册页
///
/// 成功后只更新认证信号，跳转由路由服务完成。
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();

    let mode = RwSignal::new(AuthMode::Login);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let switch_mode = move |next: AuthMode| {
        mode.set(next);
        set_error_msg.set(None);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }

        let credentials = Credentials::new(email.get_untracked(), password.get_untracked());
        let current = mode.get_untracked();
        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let result = match current {
                AuthMode::Login => auth.login(credentials).await,
                AuthMode::Signup => auth.signup(credentials).await,
            };
            if let Err(message) = result {
                set_error_msg.set(Some(message));
            }
            set_is_submitting.set(false);
        });
    };

    let tab_class = move |tab: AuthMode| {
        move || {
            if mode.get() == tab {
                "tab tab-active"
            } else {
                "tab"
            }
        }
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <LayoutKanban attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"TaskDeck"</h1>
                        <p class="text-base-content/70">
                            {move || match mode.get() {
                                AuthMode::Login => "Sign in to your board",
                                AuthMode::Signup => "Create an account to get started",
                            }}
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <div role="tablist" class="tabs tabs-bordered px-6 pt-4">
                        <a role="tab" class=tab_class(AuthMode::Login) on:click=move |_| switch_mode(AuthMode::Login)>
                            {AuthMode::Login.label()}
                        </a>
                        <a role="tab" class=tab_class(AuthMode::Signup) on:click=move |_| switch_mode(AuthMode::Signup)>
                            {AuthMode::Signup.label()}
                        </a>
                    </div>

                    <form class="card-body" on:submit=on_submit>
                        <ErrorBanner message=error_msg />

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                autocomplete="email"
                                placeholder="you@example.com"
                                on:input=move |ev| email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                            <Show when=move || mode.get() == AuthMode::Signup>
                                <label class="label">
                                    <span class="label-text-alt text-base-content/60">
                                        {format!("At least {MIN_PASSWORD_LEN} characters")}
                                    </span>
                                </label>
                            </Show>
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! {
                                        <span class="loading loading-spinner"></span>
                                        {mode.get().pending_label()}
                                    }
                                    .into_any()
                                } else {
                                    mode.get().label().into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
