//! 消息标识
//!
//! 消息 ID 既可以是整数，也可以是短字符串。

use std::borrow::Cow;
use std::fmt;

/// 消息类型 ID
///
/// `Number(1)` 与 `Name("1")` 是两个不同的键。
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProtoId {
    /// 整数 ID
    Number(u32),
    /// 字符串 ID
    Name(Cow<'static, str>),
}

impl ProtoId {
    /// 创建整数 ID
    pub const fn number(id: u32) -> Self {
        ProtoId::Number(id)
    }

    /// 创建静态字符串 ID
    pub const fn name(id: &'static str) -> Self {
        ProtoId::Name(Cow::Borrowed(id))
    }

    /// 从文本解析 ID
    ///
    /// 规范十进制（无前导零）且能放入 u32 的文本解析为整数 ID，
    /// 其余一律视为字符串 ID。整数 ID 的文本形式总能解析回原值。
    pub fn parse(text: &str) -> Self {
        let canonical = text == "0" || !text.starts_with('0');
        if canonical && !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = text.parse::<u32>() {
                return ProtoId::Number(id);
            }
        }
        ProtoId::Name(Cow::Owned(text.to_string()))
    }

    /// ID 是否未设置（0 或空字符串）
    pub fn is_unset(&self) -> bool {
        match self {
            ProtoId::Number(id) => *id == 0,
            ProtoId::Name(name) => name.is_empty(),
        }
    }

    /// 获取整数 ID
    pub fn as_number(&self) -> Option<u32> {
        match self {
            ProtoId::Number(id) => Some(*id),
            ProtoId::Name(_) => None,
        }
    }

    /// 获取字符串 ID
    pub fn as_name(&self) -> Option<&str> {
        match self {
            ProtoId::Number(_) => None,
            ProtoId::Name(name) => Some(name),
        }
    }
}

impl fmt::Display for ProtoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtoId::Number(id) => write!(f, "{}", id),
            ProtoId::Name(name) => f.write_str(name),
        }
    }
}

impl From<u32> for ProtoId {
    fn from(id: u32) -> Self {
        ProtoId::Number(id)
    }
}

impl From<&'static str> for ProtoId {
    fn from(id: &'static str) -> Self {
        ProtoId::name(id)
    }
}

impl From<String> for ProtoId {
    fn from(id: String) -> Self {
        ProtoId::Name(Cow::Owned(id))
    }
}

impl From<&ProtoId> for ProtoId {
    fn from(id: &ProtoId) -> Self {
        id.clone()
    }
}
