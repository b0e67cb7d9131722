//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程。
//!
//! 查询串也由路由服务持有，看板的筛选状态即来自这里。

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsValue;

use super::route::{AppRoute, split_location};

/// 获取当前浏览器路径与查询串（不含 `?`）
fn current_location() -> (String, String) {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return ("/".to_string(), String::new());
    };
    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    let search = location.search().unwrap_or_default();
    (path, search.trim_start_matches('?').to_string())
}

/// 写入 History（push 新增记录，否则替换当前记录）
fn write_history(url: &str, use_push: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let result = if use_push {
        history.push_state_with_url(&JsValue::NULL, "", Some(url))
    } else {
        history.replace_state_with_url(&JsValue::NULL, "", Some(url))
    };
    if let Err(e) = result {
        tracing::warn!(url, error = ?e, "history update failed");
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入认证检查信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: RwSignal<AppRoute>,
    /// 当前查询串（不含 `?`）
    query: RwSignal<String>,
    /// 认证状态检查（注入的信号，实现解耦）
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let (path, query) = current_location();
        Self {
            current_route: RwSignal::new(AppRoute::from_path(&path)),
            query: RwSignal::new(query),
            is_authenticated,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route.read_only()
    }

    pub fn query(&self) -> ReadSignal<String> {
        self.query.read_only()
    }

    /// **核心方法：导航与守卫**
    ///
    /// 接受 `path` 或 `path?query`。
    pub fn navigate(&self, location: &str) {
        let (path, query) = split_location(location);
        self.resolve(path, query, true);
    }

    pub fn navigate_to(&self, route: AppRoute) {
        self.resolve(route.to_path(), "", true);
    }

    /// 只替换查询串，不新增历史记录
    pub fn replace_query(&self, query: &str) {
        let route = self.current_route.get_untracked();
        write_history(&route.href(query), false);
        self.query.set(query.to_string());
    }

    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    fn resolve(&self, path: &str, query: &str, use_push: bool) {
        let requested = AppRoute::from_path(path);
        let route = requested.guard(self.is_authenticated.get_untracked());

        let (url, query) = match route {
            // 保留用户输入的地址
            AppRoute::NotFound => (location_string(path, query), query.to_string()),
            r if r == requested => (r.href(query), query.to_string()),
            r => (r.href(""), String::new()),
        };

        write_history(&url, use_push);
        self.query.set(query);
        self.current_route.set(route);
    }

    /// 初次加载：守卫当前地址并规范化（例如 `/` -> `/app`）
    fn resolve_initial(&self) {
        let (path, query) = current_location();
        self.resolve(&path, &query, false);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;
        // 监听器与应用同生命周期，句柄无需保留
        let _ = window_event_listener(ev::popstate, move |_| {
            let (path, query) = current_location();
            // popstate 时也执行守卫逻辑
            router.resolve(&path, &query, false);
        });
    }

    /// 设置认证状态变化时的自动重定向
    fn setup_auth_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            let is_auth = router.is_authenticated.get();
            let route = router.current_route.get_untracked();

            let redirect = route.guard(is_auth);
            if redirect != route {
                tracing::info!(from = %route, to = %redirect, "auth state changed");
                write_history(redirect.to_path(), true);
                router.query.set(String::new());
                router.current_route.set(redirect);
            }
        });
    }
}

fn location_string(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    router.resolve_initial();
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接，点击时走路由服务而不是整页跳转
#[component]
pub fn Link(
    route: AppRoute,
    #[prop(into, optional)] class: Signal<String>,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate_to(route);
    };

    view! {
        <a href=route.to_path() class=class on:click=on_click>
            {children()}
        </a>
    }
}
