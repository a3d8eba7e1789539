/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 节点输出的元素类型
 *
 * 本 crate 只做符号式图构建，不存储张量数值，
 * 元素类型仅用于构图期的类型推断与校验。
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// 元素类型：节点输出中每个标量元素的类型
///
/// 比较类算子（如 `Greater`）的输出固定为 [`ElementType::Bool`]。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    F32,
    F64,
    I32,
    I64,
    Bool,
}

impl ElementType {
    /// 返回类型的显示名（与 PyTorch 的 dtype 命名风格一致）
    pub const fn type_str(&self) -> &'static str {
        match self {
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Bool => "bool",
        }
    }

    /// 该类型的字面量是否必须为整数值
    pub const fn is_integral(&self) -> bool {
        matches!(self, Self::I32 | Self::I64 | Self::Bool)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_str())
    }
}
