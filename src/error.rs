use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 表格 / 题目文件解析错误
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),
    /// 题目或表头校验错误
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 临时文件替换目标文件失败
    #[error("替换文件失败 ({path}): {source}")]
    PersistFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 解析错误
#[derive(Debug, Error)]
pub enum ParseError {
    /// CSV 结构损坏（例如非 UTF-8 内容）
    #[error("CSV 格式错误 ({path}, 第 {line:?} 行): {source}")]
    MalformedCsv {
        path: String,
        line: Option<u64>,
        #[source]
        source: csv::Error,
    },
    /// 引号未闭合
    #[error("CSV 引号未闭合 ({path}, 第 {line} 行开始)")]
    UnterminatedQuote { path: String, line: u64 },
    /// 表格缺少表头
    #[error("表格为空，缺少表头: {path}")]
    EmptyTable { path: String },
    /// 数据行比表头还宽
    #[error("第 {row} 行有 {cells} 列，超过表头宽度 {width}")]
    RowTooWide {
        row: usize,
        cells: usize,
        width: usize,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 校验错误
#[derive(Debug, Error)]
pub enum ValidationError {
    /// 答案不在选项中
    #[error("题目 \"{prompt}\" 的答案 \"{answer}\" 不在选项中")]
    AnswerNotInOptions { prompt: String, answer: String },
    /// 题干为空
    #[error("第 {index} 道新题的题干为空")]
    EmptyPrompt { index: usize },
    /// 新增列位置太靠前，放不下新题目的固定字段
    #[error("列 {column} 位于第 {position} 列，新题目至少需要前 {required} 列")]
    HeaderTooNarrow {
        column: String,
        position: usize,
        required: usize,
    },
    /// 表头列名重复
    #[error("表头列名重复: {column}")]
    DuplicateHeader { column: String },
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 启动浏览器失败
    #[error("启动无头浏览器失败: {reason}")]
    LaunchFailed { reason: String },
    /// 导航失败
    #[error("导航到 {url} 失败: {source}")]
    NavigationFailed {
        url: String,
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// 等待条件超时
    #[error("等待 {condition} 超时 ({timeout_ms} ms)")]
    WaitTimedOut { condition: String, timeout_ms: u64 },
    /// 执行脚本失败
    #[error("执行脚本失败: {source}")]
    ScriptFailed {
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// 页面元素交互失败
    #[error("页面元素操作失败 ({target}): {reason}")]
    InteractionFailed { target: String, reason: String },
    /// 截图失败
    #[error("截图失败 ({path}): {source}")]
    ScreenshotFailed {
        path: String,
        #[source]
        source: chromiumoxide::error::CdpError,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置值不合法
    #[error("配置项 {name} 不合法: {reason}")]
    InvalidValue { name: String, reason: String },
}

// ========== 从常见错误类型转换 ==========

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(BrowserError::ScriptFailed { source: err })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Browser(BrowserError::InteractionFailed {
            target: "脚本返回值".to_string(),
            reason: err.to_string(),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误，文件不存在时归类为 NotFound
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            AppError::File(FileError::NotFound { path })
        } else {
            AppError::File(FileError::ReadFailed { path, source })
        }
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建等待超时错误
    pub fn wait_timed_out(condition: impl Into<String>, timeout_ms: u64) -> Self {
        AppError::Browser(BrowserError::WaitTimedOut {
            condition: condition.into(),
            timeout_ms,
        })
    }

    /// 是否为“文件不存在”
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::File(FileError::NotFound { .. }))
    }

    /// 是否为校验错误
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    /// 是否为解析错误
    pub fn is_parse(&self) -> bool {
        matches!(self, AppError::Parse(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
