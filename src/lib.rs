//! # gframe - 游戏框架消息序列化注册表
//!
//! gframe 以消息 ID（整数或短字符串）为键注册 Protobuf 消息类型，
//! 调用方只持有 ID 就可以完成编码、解码、创建和克隆，无需在调用处引入具体类型。
//!
//! ## 特性
//!
//! - 整数 / 字符串两种消息 ID
//! - 基于 prost 的编解码器，也支持自定义编解码器
//! - 可配置的校验模式（严格 / 宽松）
//! - 填充完成后只读，可通过 `Arc` 跨线程共享
//!
//! ## 快速开始
//!
//! ```rust,ignore
//! use gframe::prelude::*;
//!
//! #[derive(Clone, PartialEq, prost::Message)]
//! struct ChatMsg {
//!     #[prost(string, tag = "1")]
//!     content: String,
//! }
//!
//! impl ProtoMessage for ChatMsg {
//!     fn proto_id(&self) -> ProtoId {
//!         ProtoId::name("chat.Msg")
//!     }
//! }
//!
//! fn main() -> gframe::Result<()> {
//!     let serializer = SerializerBuilder::new()
//!         .register_type::<ChatMsg>()
//!         .build()?;
//!
//!     let mut msg = serializer.create("chat.Msg")?;
//!     msg.message_mut::<ChatMsg>()?.content = "hello".to_string();
//!     let bytes = serializer.encode(&msg)?;
//!     let decoded = serializer.decode("chat.Msg", bytes)?;
//!     Ok(())
//! }
//! ```
//!
//! ## 模块组织
//!
//! ### 配置模块
//! - SerializerConfig - 序列化器配置
//! - ValidationMode - 校验模式
//!
//! ### 编解码模块
//! - ProtoId - 消息 ID
//! - Codec / ProtobufCodec - 编解码器
//! - Instance - 消息实例
//! - ProtobufSerializer - 消息注册表

pub mod builder;

pub use crate::builder::SerializerBuilder;

// ============================================================================
// Crate Re-exports
// ============================================================================

pub use gframe_config;
pub use gframe_protobuf;

pub use gframe_config::{SerializerConfig, ValidationMode};
pub use gframe_protobuf::{
    Codec, Descriptor, Instance, ProtoId, ProtoMessage, ProtobufCodec, ProtobufSerializer,
    RegistryError, Serializable,
};

// ============================================================================
// Prelude Module
// ============================================================================

/// 预导出常用类型
///
/// 通过 `use gframe::prelude::*;` 导入所有常用类型
pub mod prelude {
    pub use gframe_config::{ConfigError, SerializerConfig, ValidationMode};

    pub use gframe_protobuf::prelude::*;

    pub use crate::builder::SerializerBuilder;
}

// ============================================================================
// Error Types
// ============================================================================

/// gframe 统一 Result 类型
pub type Result<T> = std::result::Result<T, Error>;

/// gframe 统一错误枚举
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 注册表错误
    #[error(transparent)]
    Registry(#[from] gframe_protobuf::RegistryError),

    /// 配置错误
    #[error(transparent)]
    Config(#[from] gframe_config::ConfigError),

    /// IO 错误
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// 自定义错误
    #[error("{0}")]
    Custom(String),
}

// ============================================================================
// Version Information
// ============================================================================

/// gframe 版本号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// gframe 包名
pub const NAME: &str = env!("CARGO_PKG_NAME");
