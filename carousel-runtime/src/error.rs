//! # Error 模块
//!
//! 定义 carousel-runtime 中使用的错误类型。
//!
//! 引擎操作本身不会失败（越界会被钳制，不可滚动会进入挂起状态），
//! 只有配置加载与校验会产生错误。

use thiserror::Error;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 读取或写入配置文件失败
    #[error("配置 IO 错误: {path} - {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON 解析或序列化失败
    #[error("配置解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    /// 配置项取值无效
    #[error("配置项 '{field}' 无效 - {message}")]
    Validation { field: &'static str, message: String },
}

/// carousel-runtime 统一错误类型
#[derive(Error, Debug)]
pub enum CarouselError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// Result 类型别名
pub type CarouselResult<T> = Result<T, CarouselError>;
