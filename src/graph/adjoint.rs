/*
 * @Author       : 老董
 * @Date         : 2026-05-12
 * @Description  : 反向传播：梯度累加器（Adjoints）与 backward 驱动
 *
 * backward 不做数值计算，而是把梯度表达为图中新增的节点：
 * 每个可微算子通过 generate_adjoints 为其父节点构造梯度子图，
 * 同一节点收到多条梯度贡献时用 Add 节点合并。
 */

use std::collections::{HashMap, HashSet};

use super::Graph;
use super::error::GraphError;
use crate::nodes::NodeId;
use crate::shape::volume;

/// 梯度累加器：记录每个节点当前的梯度节点ID
pub struct Adjoints {
    deltas: HashMap<NodeId, NodeId>,
}

impl Adjoints {
    pub(crate) fn new() -> Self {
        Self {
            deltas: HashMap::new(),
        }
    }

    /// 查询`node_id`的梯度节点；梯度未流经该节点时返回None
    pub fn delta(&self, node_id: NodeId) -> Option<NodeId> {
        self.deltas.get(&node_id).copied()
    }

    /// 为`target`累加一条梯度贡献
    ///
    /// 贡献节点的形状与元素类型必须与`target`的输出一致。`target`已有
    /// 梯度时，在图中新建Add节点合并两者并记录合并结果。
    pub(crate) fn add_delta(
        &mut self,
        graph: &mut Graph,
        target: NodeId,
        contribution: NodeId,
    ) -> Result<(), GraphError> {
        // 1. 验证贡献与目标的形状一致
        let target_shape = graph.get_node_output_shape(target)?.to_vec();
        let contribution_shape = graph.get_node_output_shape(contribution)?;
        if contribution_shape != target_shape {
            return Err(GraphError::ShapeMismatch {
                expected: target_shape,
                got: contribution_shape.to_vec(),
                message: format!("节点[id={target}]的梯度贡献与其输出形状不一致"),
            });
        }

        // 2. 验证贡献与目标的元素类型一致
        let target_element_type = graph.get_node_element_type(target)?;
        let contribution_element_type = graph.get_node_element_type(contribution)?;
        if contribution_element_type != target_element_type {
            return Err(GraphError::InvalidOperation(format!(
                "节点[id={target}]的梯度贡献元素类型不一致: 期望{target_element_type}，实际{contribution_element_type}"
            )));
        }

        // 3. 累加：已有梯度则新建Add节点合并
        match self.deltas.get(&target).copied() {
            Some(existing) => {
                let merged = graph.new_add_node(&[existing, contribution], None)?;
                self.deltas.insert(target, merged);
            }
            None => {
                self.deltas.insert(target, contribution);
            }
        }
        Ok(())
    }
}

impl Graph {
    /// 从`output_id`出发做反向传播，种子为与输出同形状的全1常量
    pub fn backward(&mut self, output_id: NodeId) -> Result<Adjoints, GraphError> {
        let output_shape = self.get_node_output_shape(output_id)?.to_vec();
        let element_type = self.get_node_element_type(output_id)?;
        let ones = vec![1.0; volume(&output_shape)];
        let seed_id = self.new_constant_node(element_type, &output_shape, &ones, None)?;
        self.backward_with_seed(output_id, seed_id)
    }

    /// 以`seed_id`为输出梯度做反向传播
    ///
    /// 种子的形状与元素类型必须与输出一致。返回的累加器可查询
    /// 输出的每个祖先节点被分配到的梯度节点。
    pub fn backward_with_seed(
        &mut self,
        output_id: NodeId,
        seed_id: NodeId,
    ) -> Result<Adjoints, GraphError> {
        // 1. 先确定反向处理顺序（子节点先于父节点）
        let order = self.adjoint_order(output_id)?;

        // 2. 种子作为输出节点自身的梯度（形状/类型由add_delta校验）
        let mut adjoints = Adjoints::new();
        adjoints.add_delta(self, output_id, seed_id)?;

        // 3. 依序让每个节点把梯度传给父节点
        for node_id in order {
            let delta = match adjoints.delta(node_id) {
                Some(delta) => delta,
                // 梯度未流经的分支（如比较算子的父节点）直接跳过
                None => continue,
            };
            // 先克隆句柄再调用，generate_adjoints需要可变图来构造梯度子图
            let node = self.get_node(node_id)?.clone();
            node.generate_adjoints(self, &mut adjoints, delta)?;
        }
        Ok(adjoints)
    }

    /// 计算`output_id`全部祖先（含自身）的反向处理顺序
    ///
    /// 顺序保证：一个节点只有在其（祖先集合内的）全部子节点处理完后
    /// 才会被处理，此时它的梯度已累加完整。
    fn adjoint_order(&self, output_id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        // 1. 沿父边收集祖先集合
        fn collect(
            graph: &Graph,
            node_id: NodeId,
            visited: &mut HashSet<NodeId>,
        ) -> Result<(), GraphError> {
            if !visited.insert(node_id) {
                return Ok(());
            }
            for parent_id in graph.get_node_parents(node_id)? {
                collect(graph, parent_id, visited)?;
            }
            Ok(())
        }
        let mut involved = HashSet::new();
        collect(self, output_id, &mut involved)?;

        // 2. 统计每个祖先在集合内部的待处理子节点数
        let mut pending_children = HashMap::new();
        for &node_id in &involved {
            let count = self
                .get_node_children(node_id)?
                .into_iter()
                .filter(|child_id| involved.contains(child_id))
                .count();
            pending_children.insert(node_id, count);
        }

        // 3. Kahn拓扑排序：初始就绪集合排序以保证结果确定
        let mut ready: Vec<NodeId> = pending_children
            .iter()
            .filter(|&(_, &count)| count == 0)
            .map(|(&node_id, _)| node_id)
            .collect();
        ready.sort_unstable();

        let mut order = Vec::with_capacity(involved.len());
        while let Some(node_id) = ready.pop() {
            order.push(node_id);
            for parent_id in self.get_node_parents(node_id)? {
                if !involved.contains(&parent_id) {
                    continue;
                }
                let count = match pending_children.get_mut(&parent_id) {
                    Some(count) => count,
                    None => continue,
                };
                *count -= 1;
                if *count == 0 {
                    ready.push(parent_id);
                }
            }
        }

        // 计数未清零说明边表损坏（正常构图下父节点先于子节点存在，不会成环）
        if order.len() != involved.len() {
            return Err(GraphError::ComputationError(format!(
                "图{}的边表存在循环，无法确定反向传播顺序",
                self.name()
            )));
        }
        Ok(order)
    }
}
