//! 消息注册表
//!
//! 管理消息 ID 到编解码器的映射，按 ID 分发编码、解码、创建和克隆。
//!
//! 注册只在初始化阶段通过 `&mut self` 进行；填充完成后注册表只读，
//! 可以放进 `Arc` 在多线程间共享。

use crate::codec::{Codec, ProtobufCodec, encode_message};
use crate::error::{RegistryError, Result};
use crate::id::ProtoId;
use crate::instance::{Instance, ProtoMessage};
use bytes::Bytes;
use gframe_config::{MAX_INITIAL_CAPACITY, SerializerConfig, ValidationMode};
use std::any::TypeId;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::{debug, trace, warn};

/// 消息描述符
///
/// 把消息 ID 与该类型的编解码器绑定在一起。
pub struct Descriptor {
    id: ProtoId,
    codec: Box<dyn Codec>,
}

impl Descriptor {
    /// 使用自定义编解码器创建描述符
    pub fn new<C: Codec>(id: impl Into<ProtoId>, codec: C) -> Self {
        Self {
            id: id.into(),
            codec: Box::new(codec),
        }
    }

    /// 为 prost 消息类型创建描述符
    pub fn of<M>(id: impl Into<ProtoId>) -> Self
    where
        M: prost::Message + Default + Clone + 'static,
    {
        Self::new(id, ProtobufCodec::<M>::new())
    }

    /// 消息 ID
    pub fn id(&self) -> &ProtoId {
        &self.id
    }

    /// 编解码器
    pub fn codec(&self) -> &dyn Codec {
        self.codec.as_ref()
    }

    /// 消息类型名称
    pub fn type_name(&self) -> &'static str {
        self.codec.type_name()
    }
}

/// 序列化器接口
///
/// 框架的其他部分只依赖此 trait，不关心具体注册表实现。
pub trait Serializable: Send + Sync {
    /// 打包
    fn encode(&self, instance: &Instance) -> Result<Bytes>;

    /// 拆包
    fn decode(&self, id: ProtoId, data: Bytes) -> Result<Instance>;

    /// 创建一个可以打包解包的默认实例
    fn create(&self, id: ProtoId) -> Result<Instance>;

    /// 克隆一个实例
    fn clone_instance(&self, id: ProtoId, source: &Instance) -> Result<Instance>;
}

/// Protobuf 序列化器
pub struct ProtobufSerializer {
    /// 消息 ID 到描述符的映射
    descriptors: HashMap<ProtoId, Descriptor>,
    mode: ValidationMode,
    warn_on_duplicate: bool,
}

impl ProtobufSerializer {
    /// 使用默认配置创建注册表
    pub fn new() -> Self {
        Self::with_config(&SerializerConfig::default())
    }

    /// 根据配置创建注册表
    ///
    /// 初始容量超过 [`MAX_INITIAL_CAPACITY`] 时按上限预分配。
    pub fn with_config(config: &SerializerConfig) -> Self {
        let capacity = config.initial_capacity.min(MAX_INITIAL_CAPACITY);
        Self {
            descriptors: HashMap::with_capacity(capacity),
            mode: config.validation_mode,
            warn_on_duplicate: config.warn_on_duplicate,
        }
    }

    /// 以指定校验模式创建注册表
    pub fn with_mode(mode: ValidationMode) -> Self {
        Self::with_config(&SerializerConfig {
            validation_mode: mode,
            ..Default::default()
        })
    }

    /// 当前校验模式
    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// 注册消息描述符
    ///
    /// 同一个 ID 只有第一次注册生效。严格模式下重复注册返回
    /// [`RegistryError::MessageAlreadyExists`]，宽松模式下忽略。
    pub fn register(&mut self, descriptor: Descriptor) -> Result<()> {
        if self.mode.is_strict() && descriptor.id.is_unset() {
            return Err(RegistryError::UnsetProtoId);
        }

        match self.descriptors.entry(descriptor.id.clone()) {
            Entry::Occupied(existing) => {
                if self.mode.is_strict() {
                    return Err(RegistryError::MessageAlreadyExists(descriptor.id));
                }
                if self.warn_on_duplicate {
                    warn!(
                        proto_id = %descriptor.id,
                        kept = existing.get().type_name(),
                        ignored = descriptor.type_name(),
                        "消息 ID 重复注册，保留首次注册的类型"
                    );
                }
                Ok(())
            }
            Entry::Vacant(slot) => {
                debug!(
                    proto_id = %descriptor.id,
                    type_name = descriptor.type_name(),
                    "消息类型已注册"
                );
                slot.insert(descriptor);
                Ok(())
            }
        }
    }

    /// 按类型注册
    ///
    /// 构造一个默认实例读取其 ID，再以该 ID 注册。
    pub fn register_type<M: ProtoMessage>(&mut self) -> Result<()> {
        let id = M::default().proto_id();
        self.register(Descriptor::of::<M>(id))
    }

    /// 打包
    pub fn encode(&self, instance: &Instance) -> Result<Bytes> {
        let descriptor = self.resolve(instance.id())?;
        trace!(proto_id = %instance.id(), "编码消息");
        descriptor.codec.serialize(instance)
    }

    /// 拆包
    pub fn decode(&self, id: impl Into<ProtoId>, data: Bytes) -> Result<Instance> {
        let id = id.into();
        let descriptor = self.resolve(&id)?;
        trace!(proto_id = %id, len = data.len(), "解码消息");
        let body = descriptor.codec.deserialize(data)?;
        Ok(Instance::bind(id, descriptor.type_name(), body))
    }

    /// 创建一个默认实例，并绑定 ID
    pub fn create(&self, id: impl Into<ProtoId>) -> Result<Instance> {
        let id = id.into();
        let descriptor = self.resolve(&id)?;
        let body = descriptor.codec.instantiate_default();
        Ok(Instance::bind(id, descriptor.type_name(), body))
    }

    /// 深拷贝一个实例，并重新绑定 ID
    pub fn clone_instance(&self, id: impl Into<ProtoId>, source: &Instance) -> Result<Instance> {
        let id = id.into();
        let descriptor = self.resolve(&id)?;
        let body = descriptor.codec.deep_copy(source)?;
        Ok(Instance::bind(id, descriptor.type_name(), body))
    }

    /// 直接编码具体消息类型
    ///
    /// `M` 必须与该 ID 注册的类型一致。
    pub fn encode_message<M: ProtoMessage>(&self, message: &M) -> Result<Bytes> {
        let id = message.proto_id();
        let descriptor = self.resolve(&id)?;
        if descriptor.codec.message_type() != TypeId::of::<M>() {
            return Err(RegistryError::ShapeMismatch {
                id,
                expected: descriptor.type_name(),
                found: M::type_name(),
            });
        }
        encode_message(message)
    }

    /// 解码为具体消息类型
    pub fn decode_as<M: ProtoMessage>(&self, data: Bytes) -> Result<M> {
        let id = M::default().proto_id();
        self.decode(id, data)?.into_message::<M>()
    }

    /// 检查消息是否已注册
    pub fn contains(&self, id: impl Into<ProtoId>) -> bool {
        self.descriptors.contains_key(&id.into())
    }

    /// 获取消息类型名称
    pub fn get_name(&self, id: impl Into<ProtoId>) -> Option<&'static str> {
        self.descriptors.get(&id.into()).map(Descriptor::type_name)
    }

    /// 获取描述符
    pub fn descriptor(&self, id: impl Into<ProtoId>) -> Option<&Descriptor> {
        self.descriptors.get(&id.into())
    }

    /// 获取已注册消息数量
    pub fn count(&self) -> usize {
        self.descriptors.len()
    }

    /// 列出所有已注册的消息 ID
    pub fn list_ids(&self) -> Vec<ProtoId> {
        let mut ids: Vec<ProtoId> = self.descriptors.keys().cloned().collect();
        ids.sort();
        ids
    }

    fn resolve(&self, id: &ProtoId) -> Result<&Descriptor> {
        if self.mode.is_strict() && id.is_unset() {
            return Err(RegistryError::UnsetProtoId);
        }
        self.descriptors
            .get(id)
            .ok_or_else(|| RegistryError::MessageNotRegistered(id.clone()))
    }
}

impl Default for ProtobufSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializable for ProtobufSerializer {
    fn encode(&self, instance: &Instance) -> Result<Bytes> {
        ProtobufSerializer::encode(self, instance)
    }

    fn decode(&self, id: ProtoId, data: Bytes) -> Result<Instance> {
        ProtobufSerializer::decode(self, id, data)
    }

    fn create(&self, id: ProtoId) -> Result<Instance> {
        ProtobufSerializer::create(self, id)
    }

    fn clone_instance(&self, id: ProtoId, source: &Instance) -> Result<Instance> {
        ProtobufSerializer::clone_instance(self, id, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, prost::Message)]
    struct ChatMsg {
        #[prost(string, tag = "1")]
        sender_id: String,
        #[prost(string, tag = "2")]
        content: String,
        #[prost(uint64, tag = "3")]
        timestamp: u64,
    }

    impl ProtoMessage for ChatMsg {
        fn proto_id(&self) -> ProtoId {
            ProtoId::name("chat.Msg")
        }
    }

    #[derive(Clone, PartialEq, prost::Message)]
    struct HeartBeat {
        #[prost(uint64, tag = "1")]
        timestamp: u64,
    }

    impl ProtoMessage for HeartBeat {
        fn proto_id(&self) -> ProtoId {
            ProtoId::number(1003)
        }
    }

    #[derive(Clone, PartialEq, prost::Message)]
    struct Anonymous {
        #[prost(uint32, tag = "1")]
        value: u32,
    }

    impl ProtoMessage for Anonymous {
        fn proto_id(&self) -> ProtoId {
            ProtoId::name("")
        }
    }

    fn chat() -> ChatMsg {
        ChatMsg {
            sender_id: "user_123".to_string(),
            content: "Hello!".to_string(),
            timestamp: 1735297600,
        }
    }

    fn strict() -> ProtobufSerializer {
        let mut registry = ProtobufSerializer::with_mode(ValidationMode::Strict);
        registry.register_type::<ChatMsg>().unwrap();
        registry.register_type::<HeartBeat>().unwrap();
        registry
    }

    #[test]
    fn test_register_type_reads_id() {
        let registry = strict();
        assert!(registry.contains("chat.Msg"));
        assert!(registry.contains(1003u32));
        assert!(!registry.contains("1003"));
        assert_eq!(registry.get_name("chat.Msg"), Some(std::any::type_name::<ChatMsg>()));
        assert_eq!(registry.count(), 2);
    }

    #[test]
    fn test_round_trip() {
        let registry = strict();
        let instance = Instance::from_message(chat());

        let encoded = registry.encode(&instance).unwrap();
        let decoded = registry.decode("chat.Msg", encoded).unwrap();

        assert_eq!(decoded.id(), &ProtoId::name("chat.Msg"));
        assert_eq!(decoded.message::<ChatMsg>().unwrap(), &chat());
    }

    #[test]
    fn test_create_stamps_id() {
        let registry = strict();
        let created = registry.create("chat.Msg").unwrap();
        assert_eq!(created.id(), &ProtoId::name("chat.Msg"));
        assert_eq!(created.message::<ChatMsg>().unwrap(), &ChatMsg::default());
    }

    #[test]
    fn test_create_then_fill_and_encode() {
        let registry = strict();
        let mut created = registry.create(1003u32).unwrap();
        created.message_mut::<HeartBeat>().unwrap().timestamp = 42;

        let encoded = registry.encode(&created).unwrap();
        let decoded: HeartBeat = registry.decode_as(encoded).unwrap();
        assert_eq!(decoded.timestamp, 42);
    }

    #[test]
    fn test_clone_stamps_id() {
        let mut registry = strict();
        // 同一类型注册到第二个 ID
        registry
            .register(Descriptor::of::<ChatMsg>("chat.Echo"))
            .unwrap();

        let source = Instance::from_message(chat());
        let copy = registry.clone_instance("chat.Echo", &source).unwrap();
        assert_eq!(copy.id(), &ProtoId::name("chat.Echo"));
        assert_eq!(copy.message::<ChatMsg>().unwrap(), &chat());
        assert_eq!(source.id(), &ProtoId::name("chat.Msg"));
    }

    #[test]
    fn test_clone_shape_mismatch() {
        let registry = strict();
        let source = Instance::from_message(HeartBeat { timestamp: 1 });
        let result = registry.clone_instance("chat.Msg", &source);
        assert!(matches!(result, Err(RegistryError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_duplicate_strict() {
        let mut registry = strict();
        let result = registry.register(Descriptor::of::<HeartBeat>("chat.Msg"));
        assert!(matches!(result, Err(RegistryError::MessageAlreadyExists(_))));
        assert_eq!(registry.get_name("chat.Msg"), Some(std::any::type_name::<ChatMsg>()));
    }

    #[test]
    fn test_duplicate_lenient_keeps_first() {
        let mut registry = ProtobufSerializer::with_mode(ValidationMode::Lenient);
        registry.register_type::<ChatMsg>().unwrap();
        registry
            .register(Descriptor::of::<HeartBeat>("chat.Msg"))
            .unwrap();
        registry.register_type::<ChatMsg>().unwrap();

        assert_eq!(registry.count(), 1);
        assert_eq!(registry.get_name("chat.Msg"), Some(std::any::type_name::<ChatMsg>()));

        let encoded = registry.encode(&Instance::from_message(chat())).unwrap();
        let decoded: ChatMsg = registry.decode_as(encoded).unwrap();
        assert_eq!(decoded, chat());
    }

    #[test]
    fn test_unknown_id_fails() {
        let registry = strict();
        assert!(matches!(
            registry.decode("no-such-id", Bytes::from_static(b"\x08\x01")),
            Err(RegistryError::MessageNotRegistered(_))
        ));
        assert!(matches!(
            registry.create("no-such-id"),
            Err(RegistryError::MessageNotRegistered(_))
        ));
        let source = Instance::from_message(chat());
        assert!(registry.clone_instance(9999u32, &source).is_err());
    }

    #[test]
    fn test_unknown_id_fails_lenient() {
        let registry = ProtobufSerializer::with_mode(ValidationMode::Lenient);
        assert!(registry.create("no-such-id").is_err());
        assert!(registry.decode(1u32, Bytes::new()).is_err());
    }

    #[test]
    fn test_encode_without_id_fails() {
        let registry = strict();
        let result = registry.encode(&Instance::from_message(Anonymous { value: 1 }));
        assert!(matches!(result, Err(RegistryError::UnsetProtoId)));
    }

    #[test]
    fn test_register_unset_id_strict() {
        let mut registry = ProtobufSerializer::with_mode(ValidationMode::Strict);
        assert!(matches!(
            registry.register_type::<Anonymous>(),
            Err(RegistryError::UnsetProtoId)
        ));
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_encode_message_typed() {
        let registry = strict();
        let encoded = registry.encode_message(&chat()).unwrap();
        let decoded: ChatMsg = registry.decode_as(encoded).unwrap();
        assert_eq!(decoded, chat());
    }

    #[test]
    fn test_encode_message_wrong_registration() {
        let mut registry = ProtobufSerializer::with_mode(ValidationMode::Strict);
        // 1003 被注册成了别的类型
        registry.register(Descriptor::of::<ChatMsg>(1003u32)).unwrap();
        let result = registry.encode_message(&HeartBeat { timestamp: 5 });
        assert!(matches!(result, Err(RegistryError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_encode_message_wrong_registration_lenient() {
        let mut registry = ProtobufSerializer::with_mode(ValidationMode::Lenient);
        registry.register(Descriptor::of::<ChatMsg>(1003u32)).unwrap();

        let typed = registry.encode_message(&HeartBeat { timestamp: 5 });
        assert!(matches!(typed, Err(RegistryError::ShapeMismatch { .. })));

        // 与类型擦除的编码路径结果一致
        let erased = registry.encode(&Instance::from_message(HeartBeat { timestamp: 5 }));
        assert!(matches!(erased, Err(RegistryError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_with_config_oversized_capacity() {
        let config = SerializerConfig::from_toml_str("initial_capacity = 9223372036854775807").unwrap();
        assert!(config.validate().is_err());

        let mut registry = ProtobufSerializer::with_config(&config);
        assert_eq!(registry.count(), 0);
        registry.register_type::<HeartBeat>().unwrap();
        assert!(registry.contains(1003u32));
    }

    #[test]
    fn test_list_ids_sorted() {
        let mut registry = strict();
        registry.register(Descriptor::of::<HeartBeat>(1001u32)).unwrap();
        assert_eq!(
            registry.list_ids(),
            vec![
                ProtoId::number(1001),
                ProtoId::number(1003),
                ProtoId::name("chat.Msg"),
            ]
        );
    }

    #[test]
    fn test_with_config() {
        let config = SerializerConfig {
            validation_mode: ValidationMode::Lenient,
            initial_capacity: 8,
            warn_on_duplicate: false,
        };
        let registry = ProtobufSerializer::with_config(&config);
        assert_eq!(registry.mode(), ValidationMode::Lenient);
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_serializable_trait_object() {
        let registry = strict();
        let serializer: &dyn Serializable = &registry;

        let created = serializer.create(ProtoId::name("chat.Msg")).unwrap();
        let encoded = serializer.encode(&created).unwrap();
        let decoded = serializer.decode(ProtoId::name("chat.Msg"), encoded).unwrap();
        let cloned = serializer
            .clone_instance(ProtoId::name("chat.Msg"), &decoded)
            .unwrap();
        assert_eq!(cloned.message::<ChatMsg>().unwrap(), &ChatMsg::default());
    }
}
