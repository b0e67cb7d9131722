use crate::auth::use_auth;
use crate::components::icons::{LayoutKanban, LogOut, Moon, Sun};
use crate::theme::use_theme;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;

/// 顶栏：导航、主题切换、注销
#[component]
pub fn TopBar() -> impl IntoView {
    let auth = use_auth();
    let theme = use_theme();
    let router = use_router();
    let mode = theme.mode();

    let nav_class = move |route: AppRoute| {
        Signal::derive(move || {
            if router.current_route().get() == route {
                "btn btn-sm btn-ghost btn-active".to_string()
            } else {
                "btn btn-sm btn-ghost".to_string()
            }
        })
    };

    view! {
        <div class="navbar bg-base-100/80 backdrop-blur border-b border-base-300 sticky top-0 z-10 px-4 md:px-6">
            <div class="flex-1">
                <Link route=AppRoute::Board class="btn btn-ghost text-lg font-bold gap-2">
                    <LayoutKanban attr:class="h-5 w-5 text-primary" />
                    "Task" <span class="text-primary -ml-2">"Deck"</span>
                </Link>
            </div>
            <nav class="flex-none flex items-center gap-1">
                {AppRoute::NAV
                    .into_iter()
                    .map(|route| {
                        view! {
                            <Link route=route class=nav_class(route)>
                                {route.label()}
                            </Link>
                        }
                    })
                    .collect_view()}
                <button
                    class="btn btn-sm btn-ghost btn-circle"
                    title="Toggle theme"
                    on:click=move |_| theme.toggle()
                >
                    {move || {
                        if mode.get().is_dark() {
                            view! { <Sun attr:class="h-4 w-4" /> }.into_any()
                        } else {
                            view! { <Moon attr:class="h-4 w-4" /> }.into_any()
                        }
                    }}
                </button>
                <button class="btn btn-sm btn-outline gap-2" on:click=move |_| auth.logout()>
                    <LogOut attr:class="h-4 w-4" />
                    "Logout"
                </button>
            </nav>
        </div>
    }
}
