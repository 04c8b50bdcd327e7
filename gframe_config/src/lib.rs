//! 配置管理系统
//!
//! 提供序列化注册表的配置管理，支持 TOML 文件和环境变量。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 解析错误
    #[error("解析配置文件失败: {0}")]
    Parse(String),

    /// 验证错误
    #[error("配置验证失败: {0}")]
    Validation(String),

    /// 环境变量错误
    #[error("环境变量解析失败: {0}")]
    EnvVar(String),
}

/// 配置 Result 类型
pub type Result<T> = std::result::Result<T, ConfigError>;

/// 初始容量上限
pub const MAX_INITIAL_CAPACITY: usize = 1 << 16;

/// 校验模式
///
/// 决定注册表在开发期是否对调用方的前置条件做检查。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// 严格模式：重复注册、空 ID、类型不符都立即报错
    Strict,
    /// 宽松模式：跳过前置检查，重复注册保留首次注册的条目
    Lenient,
}

impl ValidationMode {
    /// 根据编译配置推导默认模式（debug 构建为严格模式）
    pub fn from_build() -> Self {
        if cfg!(debug_assertions) {
            ValidationMode::Strict
        } else {
            ValidationMode::Lenient
        }
    }

    /// 是否为严格模式
    pub fn is_strict(self) -> bool {
        self == ValidationMode::Strict
    }
}

impl Default for ValidationMode {
    fn default() -> Self {
        Self::from_build()
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationMode::Strict => f.write_str("strict"),
            ValidationMode::Lenient => f.write_str("lenient"),
        }
    }
}

impl FromStr for ValidationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ValidationMode::Strict),
            "lenient" => Ok(ValidationMode::Lenient),
            other => Err(ConfigError::Parse(format!(
                "未知的校验模式: {} (可选 strict / lenient)",
                other
            ))),
        }
    }
}

/// 序列化器配置
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SerializerConfig {
    /// 校验模式
    #[serde(default)]
    pub validation_mode: ValidationMode,

    /// 注册表初始容量
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,

    /// 宽松模式下忽略重复注册时是否输出警告日志
    #[serde(default = "default_warn_on_duplicate")]
    pub warn_on_duplicate: bool,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            validation_mode: ValidationMode::default(),
            initial_capacity: default_initial_capacity(),
            warn_on_duplicate: default_warn_on_duplicate(),
        }
    }
}

impl SerializerConfig {
    /// 从 TOML 文本解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 从 TOML 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        Self::from_toml_str(&content)
    }

    /// 从环境变量加载配置并覆盖
    ///
    /// 支持的环境变量：
    /// - GFRAME_VALIDATION_MODE: 校验模式 (strict/lenient)
    /// - GFRAME_INITIAL_CAPACITY: 注册表初始容量
    /// - GFRAME_WARN_ON_DUPLICATE: 重复注册警告 (true/false)
    pub fn load_with_env_override(mut self) -> Result<Self> {
        if let Ok(mode) = std::env::var("GFRAME_VALIDATION_MODE") {
            self.validation_mode = mode.parse().map_err(|_| {
                ConfigError::EnvVar("GFRAME_VALIDATION_MODE 必须是 strict 或 lenient".to_string())
            })?;
        }

        if let Ok(capacity) = std::env::var("GFRAME_INITIAL_CAPACITY") {
            self.initial_capacity = capacity.parse().map_err(|_| {
                ConfigError::EnvVar("GFRAME_INITIAL_CAPACITY 必须是有效的 usize 数字".to_string())
            })?;
        }

        if let Ok(warn) = std::env::var("GFRAME_WARN_ON_DUPLICATE") {
            self.warn_on_duplicate = warn.parse().map_err(|_| {
                ConfigError::EnvVar("GFRAME_WARN_ON_DUPLICATE 必须是 true 或 false".to_string())
            })?;
        }

        Ok(self)
    }

    /// 从文件加载并应用环境变量覆盖
    pub fn from_file_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_file(path)?.load_with_env_override()
    }

    /// 验证配置是否有效
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(ConfigError::Validation(format!(
                "初始容量过大 (建议 <= {})",
                MAX_INITIAL_CAPACITY
            )));
        }

        Ok(())
    }

    /// 获取配置摘要信息
    pub fn summary(&self) -> String {
        format!(
            "gframe 序列化器配置:\n  校验模式: {}\n  初始容量: {}\n  重复注册警告: {}",
            self.validation_mode, self.initial_capacity, self.warn_on_duplicate
        )
    }
}

// 默认值函数
fn default_initial_capacity() -> usize {
    64
}

fn default_warn_on_duplicate() -> bool {
    true
}
