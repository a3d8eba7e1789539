/*
 * @Author       : 老董
 * @Date         : 2026-06-02
 * @Description  : 节点去重：合并功能等价的节点
 *
 * 两个节点功能等价，当且仅当父节点列表（含顺序）相同且算子参数
 * 逐项一致。参数（Parameter）节点是独立输入，彼此永不等价。
 * 合并时保留ID较小（先创建）的节点。
 */

use super::Graph;
use super::error::GraphError;
use crate::nodes::NodeId;

impl Graph {
    /// 判断两个节点是否功能等价（节点与自身恒为等价）
    pub fn is_functionally_identical(
        &self,
        left_id: NodeId,
        right_id: NodeId,
    ) -> Result<bool, GraphError> {
        if left_id == right_id {
            let _ = self.get_node(left_id)?;
            return Ok(true);
        }
        let left = self.get_node(left_id)?;
        let right = self.get_node(right_id)?;

        // 1. 父节点列表必须完全一致（含顺序与重复次数）
        if self.get_node_parents(left_id)? != self.get_node_parents(right_id)? {
            return Ok(false);
        }
        // 2. 算子参数逐项比较
        Ok(left.params_identical(right))
    }

    /// 反复合并功能等价的节点直至不动点，返回合并次数
    ///
    /// 一次合并会改写被删节点子节点的父列表，可能使原本不同的
    /// 节点变得等价，因此需要循环处理。
    pub fn merge_functionally_identical_nodes(&mut self) -> Result<usize, GraphError> {
        let mut merged_count = 0;
        while let Some((keep_id, remove_id)) = self.find_identical_pair()? {
            self.replace_node(remove_id, keep_id);
            merged_count += 1;
        }
        Ok(merged_count)
    }

    /// 找一对功能等价的节点，返回（保留ID，移除ID），保留ID较小
    fn find_identical_pair(&self) -> Result<Option<(NodeId, NodeId)>, GraphError> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        for (index, &keep_id) in ids.iter().enumerate() {
            for &candidate_id in &ids[index + 1..] {
                if self.is_functionally_identical(keep_id, candidate_id)? {
                    return Ok(Some((keep_id, candidate_id)));
                }
            }
        }
        Ok(None)
    }

    /// 用`keep_id`替换`remove_id`：改写子节点的父列表并摘除被删节点
    fn replace_node(&mut self, remove_id: NodeId, keep_id: NodeId) {
        // 1. 被删节点的子节点改挂到保留节点（保持在父列表中的位置）
        let children = self.forward_edges.remove(&remove_id).unwrap_or_default();
        for &child_id in &children {
            if let Some(parents) = self.backward_edges.get_mut(&child_id) {
                for parent_id in parents.iter_mut() {
                    if *parent_id == remove_id {
                        *parent_id = keep_id;
                    }
                }
            }
        }
        self.forward_edges
            .entry(keep_id)
            .or_default()
            .extend(children);

        // 2. 从各父节点的子列表中移除被删节点（每条边摘一次）
        let parents = self.backward_edges.remove(&remove_id).unwrap_or_default();
        for parent_id in parents {
            if let Some(siblings) = self.forward_edges.get_mut(&parent_id) {
                if let Some(position) = siblings.iter().position(|&id| id == remove_id) {
                    siblings.remove(position);
                }
            }
        }

        // 3. 删除节点本身
        self.nodes.remove(&remove_id);
    }
}
