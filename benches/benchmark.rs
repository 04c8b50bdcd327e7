//! gframe 性能基准测试
//!
//! 测试注册表各项操作的性能指标。

use bytes::Bytes;
use gframe::prelude::*;

/// 基准测试辅助宏
macro_rules! bench {
    ($name:expr, $code:block) => {
        let start = std::time::Instant::now();
        let iterations = 10000;
        for _ in 0..iterations {
            $code
        }
        let duration = start.elapsed();
        let avg_ns = duration.as_nanos() / iterations as u128;
        println!("  {:30}: {:>8} ns/op ({} ops in {:?})",
            $name, avg_ns, iterations, duration);
    };
}

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

fn main() -> gframe::Result<()> {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   gframe 性能基准测试");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    for mode in [ValidationMode::Strict, ValidationMode::Lenient] {
        let serializer = SerializerBuilder::new()
            .mode(mode)
            .register_type::<ChatMsg>()
            .register_type::<HeartBeat>()
            .build()?;
        bench_registry(&serializer)?;
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   基准测试完成");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    Ok(())
}

/// 测试注册表分发性能
fn bench_registry(serializer: &ProtobufSerializer) -> gframe::Result<()> {
    println!("\n📊 注册表基准测试 ({}):", serializer.mode());

    let chat = Instance::from_message(ChatMsg {
        sender_id: "user_123".to_string(),
        content: "Hello, gframe!".to_string(),
        timestamp: 1735297600,
    });
    let encoded: Bytes = serializer.encode(&chat)?;

    bench!("create(\"chat.Msg\")", {
        let _ = serializer.create("chat.Msg");
    });

    bench!("encode(chat)", {
        let _ = serializer.encode(&chat);
    });

    bench!("decode(\"chat.Msg\")", {
        let _ = serializer.decode("chat.Msg", encoded.clone());
    });

    bench!("clone_instance(\"chat.Msg\")", {
        let _ = serializer.clone_instance("chat.Msg", &chat);
    });

    bench!("create(1003)", {
        let _ = serializer.create(1003u32);
    });

    Ok(())
}
