//! gframe Protobuf 编解码支持
//!
//! 按消息 ID 注册消息类型，并在只知道 ID 的情况下完成编码、解码、创建和克隆。

pub mod codec;
pub mod error;
pub mod id;
pub mod instance;
pub mod registry;

pub use crate::codec::{Codec, ProtobufCodec, decode_message, encode_message};
pub use crate::error::{RegistryError, Result};
pub use crate::id::ProtoId;
pub use crate::instance::{Instance, MessageBody, ProtoMessage};
pub use crate::registry::{Descriptor, ProtobufSerializer, Serializable};

// 预导出
pub mod prelude {
    pub use crate::codec::Codec;
    pub use crate::id::ProtoId;
    pub use crate::instance::{Instance, ProtoMessage};
    pub use crate::registry::{Descriptor, ProtobufSerializer, Serializable};
}
