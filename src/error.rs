//! 更新流程的错误类型

use crate::http_client::HttpClientError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("获取类型失败: {0}")]
    Fetch(#[from] HttpClientError),
    #[error("解析 {what} 失败: {source}")]
    Parse {
        what: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{} 顶层不是 JSON 数组", .path.display())]
    NotAnArray { path: PathBuf },
    #[error("类型数据结构异常: {0}")]
    Structure(String),
    #[error("读写 {} 失败: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl UpdateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        UpdateError::Io {
            path: path.into(),
            source,
        }
    }
}
