//! 注册表错误类型

use crate::id::ProtoId;
use thiserror::Error;

/// 消息注册错误
#[derive(Error, Debug)]
pub enum RegistryError {
    /// 消息未注册
    #[error("消息未注册: {0}")]
    MessageNotRegistered(ProtoId),

    /// 消息已存在
    #[error("消息已存在: {0}")]
    MessageAlreadyExists(ProtoId),

    /// 消息 ID 未设置
    #[error("消息 ID 未设置")]
    UnsetProtoId,

    /// 消息实例与注册的类型不符
    #[error("消息类型不匹配: {id} 期望 {expected}, 实际为 {found}")]
    ShapeMismatch {
        id: ProtoId,
        expected: &'static str,
        found: &'static str,
    },

    /// 编码错误
    #[error("消息编码失败: {0}")]
    EncodeError(String),

    /// 解码错误
    #[error("消息解码失败: {0}")]
    DecodeError(#[from] prost::DecodeError),
}

/// 注册表 Result 类型
pub type Result<T> = std::result::Result<T, RegistryError>;
