//! 消息实例
//!
//! [`Instance`] 是类型擦除后的消息值，自带消息 ID，
//! 可以在不知道具体类型的情况下交回注册表编码或克隆。

use crate::error::{RegistryError, Result};
use crate::id::ProtoId;
use std::any::Any;
use std::fmt;

/// 类型擦除的消息体
pub type MessageBody = Box<dyn Any + Send + Sync>;

/// 带有消息 ID 的 Protobuf 消息
///
/// 所有需要通过类型注册的消息都需要实现此 trait
pub trait ProtoMessage: prost::Message + Default + Clone + 'static {
    /// 获取消息类型 ID
    fn proto_id(&self) -> ProtoId;

    /// 获取消息类型名称
    fn type_name() -> &'static str
    where
        Self: Sized,
    {
        std::any::type_name::<Self>()
    }
}

/// 消息实例
pub struct Instance {
    id: ProtoId,
    type_name: &'static str,
    body: MessageBody,
}

impl Instance {
    /// 为裸消息体绑定 ID
    ///
    /// 只有注册表的 create / clone / decode 会走到这里。
    pub(crate) fn bind(id: ProtoId, type_name: &'static str, body: MessageBody) -> Self {
        Self {
            id,
            type_name,
            body,
        }
    }

    /// 从具体消息构造实例，ID 取自消息自身
    pub fn from_message<M: ProtoMessage>(message: M) -> Self {
        let id = message.proto_id();
        Self::bind(id, M::type_name(), Box::new(message))
    }

    /// 消息 ID
    pub fn id(&self) -> &ProtoId {
        &self.id
    }

    /// 消息类型名称
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// 消息体是否为 `M`
    pub fn is<M: Any>(&self) -> bool {
        self.body.is::<M>()
    }

    /// 以 `M` 借用消息体
    pub fn message<M: Any>(&self) -> Result<&M> {
        self.body
            .downcast_ref::<M>()
            .ok_or_else(|| shape_mismatch::<M>(&self.id, self.type_name))
    }

    /// 以 `M` 可变借用消息体
    pub fn message_mut<M: Any>(&mut self) -> Result<&mut M> {
        let Self {
            id,
            type_name,
            body,
        } = self;
        body.downcast_mut::<M>()
            .ok_or_else(|| shape_mismatch::<M>(id, *type_name))
    }

    /// 取出消息体
    pub fn into_message<M: Any>(self) -> Result<M> {
        let Self {
            id,
            type_name,
            body,
        } = self;
        body.downcast::<M>()
            .map(|message| *message)
            .map_err(|_| shape_mismatch::<M>(&id, type_name))
    }
}

fn shape_mismatch<M: Any>(id: &ProtoId, found: &'static str) -> RegistryError {
    RegistryError::ShapeMismatch {
        id: id.clone(),
        expected: std::any::type_name::<M>(),
        found,
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("id", &self.id)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
