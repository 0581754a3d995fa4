use thiserror::Error;

#[derive(Error, Debug)]
pub enum StressError {
    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("无效的 HTTP 方法: {0}")]
    InvalidMethod(String),

    #[error("无效的 URL: {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("无效的 Header: {name}: {message}")]
    InvalidHeader { name: String, message: String },

    /// form 指令的段数不是 2 或 3
    #[error("Form file: ({0}): illegal")]
    IllegalFormSpec(String),

    #[error("Post file: ({path}): {source}")]
    FileAccess {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP 请求构造失败: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl StressError {
    /// 该错误是否只影响单个 Target 的物化（而不是整个运行）
    pub fn is_per_target(&self) -> bool {
        matches!(
            self,
            StressError::InvalidMethod(_)
                | StressError::InvalidUrl { .. }
                | StressError::InvalidHeader { .. }
                | StressError::IllegalFormSpec(_)
                | StressError::FileAccess { .. }
                | StressError::HttpError(_)
        )
    }
}

impl From<anyhow::Error> for StressError {
    fn from(err: anyhow::Error) -> Self {
        StressError::Other(err.to_string())
    }
}

impl From<crate::target::ParseError> for StressError {
    fn from(err: crate::target::ParseError) -> Self {
        StressError::ParseError(err.to_string())
    }
}

/// Result type for stress crate
pub type Result<T> = std::result::Result<T, StressError>;
