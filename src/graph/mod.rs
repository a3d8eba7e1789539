/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : Graph 模块：计算图的核心实现
 *
 * 各 impl 块分散在子模块中：
 * - core.rs: 基础操作（节点存取、ID/名称生成）
 * - node_builders.rs: new_*_node
 * - adjoint.rs: 伴随（梯度）子图构造
 * - dedup.rs: 结构等价判定与节点合并
 * - describe.rs: describe/描述导出
 * - visualization.rs: DOT 可视化
 */

mod adjoint;
mod core;
mod dedup;
mod describe;
mod error;
mod function;
mod node_builders;
mod visualization;

pub use adjoint::Adjoints;
pub use error::GraphError;
pub use function::Function;

use crate::nodes::{NodeHandle, NodeId};
use std::collections::HashMap;

/// 符号式计算图
///
/// 图拥有全部节点；节点在构造时完成形状推断与参数校验，入图后
/// 不可变。父子关系以显式的边表维护，多个消费者通过 `NodeId`
/// 共享同一个生产者。
pub struct Graph {
    pub(in crate::graph) name: String,
    pub(in crate::graph) nodes: HashMap<NodeId, NodeHandle>,
    /// 正向边：parent_id -> child_ids（父节点指向子节点）
    pub(in crate::graph) forward_edges: HashMap<NodeId, Vec<NodeId>>,
    /// 反向边：child_id -> parent_ids（子节点指向父节点）
    pub(in crate::graph) backward_edges: HashMap<NodeId, Vec<NodeId>>,
    pub(in crate::graph) next_id: u64,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
