//! 登录/注册表单的校验与错误文案

use crate::Credentials;
use crate::error::{ApiError, fallback};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const EMAIL_TAKEN_MESSAGE: &str = "This email is already taken.";

/// 服务端在邮箱已注册时返回的 detail
const EMAIL_TAKEN_DETAIL: &str = "Email already registered";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("邮箱正则应当合法")
});

/// 认证页的两个标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    pub fn label(&self) -> &'static str {
        match self {
            AuthMode::Login => "Sign in",
            AuthMode::Signup => "Sign up",
        }
    }

    pub fn pending_label(&self) -> &'static str {
        match self {
            AuthMode::Login => "Signing in...",
            AuthMode::Signup => "Creating account...",
        }
    }
}

/// 注册前的本地校验失败原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CredentialIssue {
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Password must be at least 6 characters.")]
    PasswordTooShort,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email.trim())
}

/// 注册表单的最小形态校验：邮箱格式 + 密码长度
pub fn validate_signup(credentials: &Credentials) -> Result<(), CredentialIssue> {
    if !is_valid_email(&credentials.email) {
        return Err(CredentialIssue::InvalidEmail);
    }
    if credentials.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CredentialIssue::PasswordTooShort);
    }
    Ok(())
}

pub fn login_error_message(err: &ApiError) -> String {
    err.user_message(fallback::LOGIN)
}

/// 注册失败文案；邮箱已占用映射为专门提示
pub fn signup_error_message(err: &ApiError) -> String {
    match err.detail() {
        Some(detail) if detail.eq_ignore_ascii_case(EMAIL_TAKEN_DETAIL) => {
            EMAIL_TAKEN_MESSAGE.to_string()
        }
        _ => err.user_message(fallback::SIGNUP),
    }
}
