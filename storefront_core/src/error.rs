//! 错误类型定义

use thiserror::Error;

/// 错误类型
#[derive(Debug, Error)]
pub enum Error {
    /// 网络错误（连接失败、超时等）
    #[error("Network error: {0}")]
    Network(String),

    /// 服务端返回的非 2xx 响应
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// 客户端表单校验失败，未发送请求
    #[error("Validation error: {0}")]
    Validation(String),

    /// 状态错误
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// 编解码错误
    #[error("Encoding/Decoding error: {0}")]
    Encoding(String),

    /// 未认证错误
    #[error("Not authenticated")]
    NotAuthenticated,
}

/// 结果类型
pub type Result<T> = std::result::Result<T, Error>;
