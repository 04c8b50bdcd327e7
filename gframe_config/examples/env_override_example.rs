//! 环境变量覆盖示例
//!
//! 演示如何使用环境变量覆盖序列化器配置

use gframe_config::SerializerConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== gframe 环境变量覆盖示例 ===\n");

    // 示例 1: 设置环境变量
    println!("1. 设置环境变量:");
    unsafe {
        std::env::set_var("GFRAME_VALIDATION_MODE", "lenient");
        std::env::set_var("GFRAME_INITIAL_CAPACITY", "256");
    }
    println!("   GFRAME_VALIDATION_MODE=lenient");
    println!("   GFRAME_INITIAL_CAPACITY=256");
    println!();

    // 示例 2: 加载默认配置并应用环境变量覆盖
    println!("2. 加载默认配置并应用环境变量覆盖:");
    let config = SerializerConfig::default().load_with_env_override()?;
    println!("   ✓ 配置加载成功:");
    println!("     - 校验模式: {}", config.validation_mode);
    println!("     - 初始容量: {}", config.initial_capacity);
    println!();

    // 示例 3: 验证配置
    println!("3. 验证配置:");
    match config.validate() {
        Ok(_) => println!("   ✓ 配置有效"),
        Err(e) => println!("   ✗ 配置无效: {}", e),
    }
    println!();

    // 示例 4: 查看配置摘要
    println!("4. 配置摘要:");
    println!("{}", config.summary());
    println!();

    // 示例 5: 无效的环境变量
    println!("5. 无效的环境变量:");
    unsafe {
        std::env::set_var("GFRAME_VALIDATION_MODE", "sometimes");
    }
    match SerializerConfig::default().load_with_env_override() {
        Ok(_) => println!("   ✗ 不应成功"),
        Err(e) => println!("   ✓ {}", e),
    }

    unsafe {
        std::env::remove_var("GFRAME_VALIDATION_MODE");
        std::env::remove_var("GFRAME_INITIAL_CAPACITY");
    }

    println!("\n✅ 示例运行完成！");

    Ok(())
}
