/*
 * @Author       : 老董
 * @Date         : 2026-06-20
 * @Description  : 图结构描述：导出 GraphDescriptor 及 JSON 文件读写
 */

use std::path::Path;

use super::Graph;
use super::error::GraphError;
use crate::descriptor::{GraphDescriptor, NodeDescriptor, NodeTypeDescriptor};
use crate::nodes::NodeId;
use crate::nodes::raw_node::NodeType;

impl Graph {
    /// 导出图的结构描述（节点按ID升序）
    pub fn describe(&self) -> GraphDescriptor {
        let mut descriptor = GraphDescriptor::new(self.name());
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        for node_id in ids {
            let node = &self.nodes[&node_id];
            let parents = self
                .backward_edges
                .get(&node_id)
                .map(|parents| parents.iter().map(|parent_id| parent_id.0).collect())
                .unwrap_or_default();
            descriptor.add_node(NodeDescriptor::new(
                node_id.0,
                node.name(),
                node_type_to_descriptor(node.node_type()),
                node.element_type(),
                node.output_shape().to_vec(),
                parents,
            ));
        }
        descriptor
    }

    /// 将图描述保存为 JSON 文件
    pub fn save_description<P: AsRef<Path>>(&self, path: P) -> Result<(), GraphError> {
        let json = self
            .describe()
            .to_json()
            .map_err(|e| GraphError::ComputationError(format!("序列化图描述失败: {e}")))?;
        std::fs::write(path.as_ref(), json)
            .map_err(|e| GraphError::ComputationError(format!("写入 JSON 文件失败: {e}")))?;
        Ok(())
    }

    /// 从 JSON 文件读取图描述
    pub fn load_description<P: AsRef<Path>>(path: P) -> Result<GraphDescriptor, GraphError> {
        let json = std::fs::read_to_string(path.as_ref())
            .map_err(|e| GraphError::ComputationError(format!("读取 JSON 文件失败: {e}")))?;
        GraphDescriptor::from_json(&json)
            .map_err(|e| GraphError::ComputationError(format!("解析图描述失败: {e}")))
    }
}

/// 将节点类型映射为描述符变体（附带类型特定参数）
fn node_type_to_descriptor(node_type: &NodeType) -> NodeTypeDescriptor {
    match node_type {
        NodeType::Parameter(_) => NodeTypeDescriptor::Parameter,
        NodeType::Constant(constant) => NodeTypeDescriptor::Constant {
            values: constant.values().to_vec(),
        },
        NodeType::Add(_) => NodeTypeDescriptor::Add,
        NodeType::Greater(_) => NodeTypeDescriptor::Greater,
        NodeType::MaxPool(max_pool) => NodeTypeDescriptor::MaxPool {
            window_shape: max_pool.window_shape().to_vec(),
            window_movement_strides: max_pool.window_movement_strides().to_vec(),
        },
        NodeType::SelectAndScatter(select_and_scatter) => NodeTypeDescriptor::SelectAndScatter {
            window_shape: select_and_scatter.window_shape().to_vec(),
            window_movement_strides: select_and_scatter.window_movement_strides().to_vec(),
        },
    }
}
