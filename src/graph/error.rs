/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : Graph 模块的错误类型
 *
 * 所有构图期校验失败都通过本类型报告：遇到第一个被违反的
 * 约束立即返回（fail-fast），不做错误聚合。
 */

use crate::nodes::NodeId;
use thiserror::Error;

/// Graph 操作错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GraphError {
    #[error("节点[id={0}]不存在")]
    NodeNotFound(NodeId),

    #[error("无效操作: {0}")]
    InvalidOperation(String),

    #[error("形状不一致（期望{expected:?}，实际{got:?}）: {message}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        message: String,
    },

    #[error("维度数不一致（期望{expected}，实际{got}）: {message}")]
    DimensionMismatch {
        expected: usize,
        got: usize,
        message: String,
    },

    #[error("计算错误: {0}")]
    ComputationError(String),

    #[error("节点名称重复: {0}")]
    DuplicateNodeName(String),
}
