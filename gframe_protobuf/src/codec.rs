//! 消息编解码器
//!
//! [`Codec`] 是单个消息类型的能力集合：序列化、反序列化、默认构造与深拷贝。
//! 编解码器只产出裸消息体，ID 由注册表绑定。

use crate::error::{RegistryError, Result};
use crate::instance::{Instance, MessageBody};
use bytes::Bytes;
use std::any::TypeId;
use std::marker::PhantomData;

/// 消息编解码器 trait
pub trait Codec: Send + Sync + 'static {
    /// 消息类型名称
    fn type_name(&self) -> &'static str;

    /// 消息体的具体类型
    fn message_type(&self) -> TypeId;

    /// 将实例序列化为字节
    fn serialize(&self, instance: &Instance) -> Result<Bytes>;

    /// 从字节反序列化出新的消息体
    fn deserialize(&self, data: Bytes) -> Result<MessageBody>;

    /// 构造默认消息体
    fn instantiate_default(&self) -> MessageBody;

    /// 深拷贝实例的消息体
    fn deep_copy(&self, source: &Instance) -> Result<MessageBody>;
}

/// 基于 prost 的编解码器
pub struct ProtobufCodec<M> {
    _marker: PhantomData<fn() -> M>,
}

impl<M> ProtobufCodec<M>
where
    M: prost::Message + Default + Clone + 'static,
{
    /// 创建编解码器
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<M> Default for ProtobufCodec<M>
where
    M: prost::Message + Default + Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Codec for ProtobufCodec<M>
where
    M: prost::Message + Default + Clone + 'static,
{
    fn type_name(&self) -> &'static str {
        std::any::type_name::<M>()
    }

    fn message_type(&self) -> TypeId {
        TypeId::of::<M>()
    }

    fn serialize(&self, instance: &Instance) -> Result<Bytes> {
        encode_message(instance.message::<M>()?)
    }

    fn deserialize(&self, data: Bytes) -> Result<MessageBody> {
        let message: M = decode_message(data)?;
        Ok(Box::new(message))
    }

    fn instantiate_default(&self) -> MessageBody {
        Box::new(M::default())
    }

    fn deep_copy(&self, source: &Instance) -> Result<MessageBody> {
        Ok(Box::new(source.message::<M>()?.clone()))
    }
}

/// 编码 Protobuf 消息
///
/// 将任意实现了 prost::Message 的类型编码为 Bytes
pub fn encode_message<M: prost::Message>(msg: &M) -> Result<Bytes> {
    let mut buf = Vec::with_capacity(msg.encoded_len());
    msg.encode(&mut buf)
        .map_err(|e| RegistryError::EncodeError(e.to_string()))?;
    Ok(Bytes::from(buf))
}

/// 解码 Protobuf 消息
///
/// 从 Bytes 解码为指定的消息类型
pub fn decode_message<M: prost::Message + Default>(data: Bytes) -> Result<M> {
    M::decode(data).map_err(RegistryError::from)
}
