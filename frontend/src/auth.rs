//! 认证模块
//!
//! 管理用户认证状态，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态。
//!
//! 令牌本身保存在 `localStorage`（`TokenStore`），这里的信号只是它的镜像，
//! 在登录、注册、注销时同步。

use crate::web::Api;
use leptos::prelude::*;
use taskdeck_shared::Credentials;
use taskdeck_shared::auth::{
    CredentialIssue, login_error_message, signup_error_message, validate_signup,
};

/// 认证上下文
///
/// 启动时创建一次，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    api: StoredValue<Api>,
    is_authenticated: RwSignal<bool>,
}

impl AuthContext {
    /// 创建认证上下文，初始状态取自已保存的令牌
    pub fn new(api: Api) -> Self {
        let is_authenticated = RwSignal::new(api.is_authenticated());
        Self {
            api: StoredValue::new(api),
            is_authenticated,
        }
    }

    /// API 客户端（克隆开销很小）
    pub fn api(&self) -> Api {
        self.api.get_value()
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        self.is_authenticated.into()
    }

    /// 登录；失败时返回可展示的提示
    pub async fn login(&self, credentials: Credentials) -> Result<(), String> {
        let api = self.api();
        match api.login(&credentials).await {
            Ok(_) => {
                self.is_authenticated.set(true);
                Ok(())
            }
            Err(e) => Err(login_error_message(&e)),
        }
    }

    /// 先做本地校验，再注册
    pub async fn signup(&self, credentials: Credentials) -> Result<(), String> {
        validate_signup(&credentials).map_err(|issue: CredentialIssue| issue.to_string())?;

        let api = self.api();
        match api.register(&credentials).await {
            Ok(_) => {
                self.is_authenticated.set(true);
                Ok(())
            }
            Err(e) => Err(signup_error_message(&e)),
        }
    }

    /// 注销并清除令牌
    ///
    /// 导航由路由服务的认证状态监听自动处理。
    pub fn logout(&self) {
        self.api.with_value(|api| api.logout());
        self.is_authenticated.set(false);
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
