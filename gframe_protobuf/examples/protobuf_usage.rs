//! Protobuf 注册表示例
//!
//! 演示如何按消息 ID 注册、创建、编码、解码和克隆消息。

use gframe_config::ValidationMode;
use gframe_protobuf::{Descriptor, Instance, ProtoId, ProtoMessage, ProtobufSerializer};

#[derive(Clone, PartialEq, prost::Message)]
struct ChatMessage {
    #[prost(string, tag = "1")]
    sender_id: String,
    #[prost(string, tag = "2")]
    content: String,
    #[prost(uint64, tag = "3")]
    timestamp: u64,
}

impl ProtoMessage for ChatMessage {
    fn proto_id(&self) -> ProtoId {
        ProtoId::name("chat.Msg")
    }
}

#[derive(Clone, PartialEq, prost::Message)]
struct UserPosition {
    #[prost(string, tag = "1")]
    user_id: String,
    #[prost(float, tag = "2")]
    x: f32,
    #[prost(float, tag = "3")]
    y: f32,
    #[prost(float, tag = "4")]
    z: f32,
}

impl ProtoMessage for UserPosition {
    fn proto_id(&self) -> ProtoId {
        ProtoId::number(1002)
    }
}

#[derive(Clone, PartialEq, prost::Message)]
struct HeartBeat {
    #[prost(uint64, tag = "1")]
    timestamp: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== gframe Protobuf 注册表示例 ===\n");

    // 示例 1: 消息注册
    println!("1. 消息注册:");
    let mut registry = ProtobufSerializer::with_mode(ValidationMode::Strict);
    registry.register_type::<ChatMessage>()?;
    registry.register_type::<UserPosition>()?;
    registry.register(Descriptor::of::<HeartBeat>(1003u32))?;
    println!("   ✓ 注册了 {} 种消息类型", registry.count());
    println!();

    // 示例 2: 按 ID 创建并填充
    println!("2. 按 ID 创建聊天消息:");
    let mut chat = registry.create("chat.Msg")?;
    {
        let msg = chat.message_mut::<ChatMessage>()?;
        msg.sender_id = "user_123".to_string();
        msg.content = "Hello, gframe!".to_string();
        msg.timestamp = 1735297600;
    }
    println!("   实例: {:?}", chat);
    println!();

    // 示例 3: 打包 / 拆包
    println!("3. 打包与拆包:");
    let encoded = registry.encode(&chat)?;
    println!("   编码后大小: {} bytes", encoded.len());
    let decoded = registry.decode("chat.Msg", encoded)?;
    let content = &decoded.message::<ChatMessage>()?.content;
    println!("   解码成功: id={}, content={}", decoded.id(), content);
    assert_eq!(decoded.message::<ChatMessage>()?, chat.message::<ChatMessage>()?);
    println!("   ✓ 消息完整性验证通过");
    println!();

    // 示例 4: 克隆
    println!("4. 克隆位置消息:");
    let pos = Instance::from_message(UserPosition {
        user_id: "player_456".to_string(),
        x: 100.5,
        y: 200.3,
        z: 50.0,
    });
    let copy = registry.clone_instance(1002u32, &pos)?;
    let p = copy.message::<UserPosition>()?;
    println!("   位置: ({}, {}, {}) id={}", p.x, p.y, p.z, copy.id());
    println!();

    // 示例 5: 错误处理
    println!("5. 未注册的消息 ID:");
    match registry.create("no-such-id") {
        Ok(_) => println!("   ✗ 不应成功"),
        Err(e) => println!("   ✓ {}", e),
    }
    println!();

    // 示例 6: 列出所有注册的消息
    println!("6. 已注册的消息类型:");
    for id in registry.list_ids() {
        if let Some(name) = registry.get_name(&id) {
            println!("   - ID {}: {}", id, name);
        }
    }
    println!();

    // 示例 7: 性能测试
    println!("7. 性能测试:");
    let iterations = 10000;
    let beat = registry.create(1003u32)?;

    let start = std::time::Instant::now();
    for _ in 0..iterations {
        let encoded = registry.encode(&beat)?;
        let _ = registry.decode(1003u32, encoded)?;
    }
    let elapsed = start.elapsed();
    println!("   编解码 {} 次耗时: {:?}", iterations, elapsed);
    println!(
        "   平均每次: {:.2} μs",
        elapsed.as_micros() as f64 / iterations as f64
    );
    println!();

    println!("✅ 所有示例运行完成！");

    Ok(())
}
