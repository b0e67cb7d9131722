//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其属性。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录/注册页面
    Login,
    /// 看板 (默认路由，需要认证)
    #[default]
    Board,
    /// 月历 (需要认证)
    Calendar,
    /// 统计 (需要认证)
    Analytics,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 顶栏导航顺序
    pub const NAV: [AppRoute; 3] = [AppRoute::Board, AppRoute::Calendar, AppRoute::Analytics];

    /// 将 URL path 解析为路由枚举，`/` 视为看板
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" | "/app" => Self::Board,
            "/login" => Self::Login,
            "/calendar" => Self::Calendar,
            "/analytics" => Self::Analytics,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的规范 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Board => "/app",
            Self::Calendar => "/calendar",
            Self::Analytics => "/analytics",
            Self::NotFound => "/404",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Board => "Board",
            Self::Calendar => "Calendar",
            Self::Analytics => "Analytics",
            Self::NotFound => "Not found",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Board | Self::Calendar | Self::Analytics)
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Board
    }

    /// 守卫裁决：返回实际应进入的路由
    ///
    /// 未登录访问受保护页面转到登录页，已登录访问登录页转到看板，其余原样放行。
    pub fn guard(self, is_authenticated: bool) -> Self {
        if self.requires_auth() && !is_authenticated {
            tracing::info!(target_route = %self, "access denied, redirecting to login");
            Self::auth_failure_redirect()
        } else if self.should_redirect_when_authenticated() && is_authenticated {
            tracing::info!("already authenticated, redirecting to board");
            Self::auth_success_redirect()
        } else {
            self
        }
    }

    /// 拼接带查询串的地址
    pub fn href(&self, query: &str) -> String {
        let query = query.trim_start_matches('?');
        if query.is_empty() {
            self.to_path().to_string()
        } else {
            format!("{}?{}", self.to_path(), query)
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 拆分 `path?query`，查询串不含 `?`
pub fn split_location(location: &str) -> (&str, &str) {
    let location = location.split('#').next().unwrap_or_default();
    location.split_once('?').unwrap_or((location, ""))
}
