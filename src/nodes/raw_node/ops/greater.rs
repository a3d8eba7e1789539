/*
 * @Author       : 老董
 * @Date         : 2026-03-05
 * @Description  : Greater 节点 - 逐元素大于比较
 *
 * 输出形状与操作数相同，元素类型固定为 bool。
 * 比较不可微，因此不实现 generate_adjoints（沿用空默认实现）。
 *
 * 父节点：
 * - parents[0]: 左操作数
 * - parents[1]: 右操作数
 */

use crate::element::ElementType;
use crate::graph::GraphError;
use crate::nodes::raw_node::TraitNode;
use crate::nodes::{NodeHandle, NodeId};

#[derive(Clone)]
pub(crate) struct Greater {
    id: Option<NodeId>,
    name: Option<String>,
    shape: Vec<usize>,
}

impl Greater {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        // 1. 验证父节点数量
        if parents.len() != 2 {
            return Err(GraphError::InvalidOperation(
                "Greater 节点需要 2 个父节点".to_string(),
            ));
        }

        // 2. 验证两个操作数形状相同
        let shape = parents[0].output_shape().to_vec();
        if parents[1].output_shape() != shape {
            return Err(GraphError::ShapeMismatch {
                expected: shape,
                got: parents[1].output_shape().to_vec(),
                message: "Greater 节点的两个父节点形状必须相同".to_string(),
            });
        }

        // 3. 验证两个操作数元素类型相同
        if parents[0].element_type() != parents[1].element_type() {
            return Err(GraphError::InvalidOperation(format!(
                "Greater 节点的两个父节点元素类型必须相同，但得到 {} 和 {}",
                parents[0].element_type(),
                parents[1].element_type()
            )));
        }

        // 4. 返回
        Ok(Self {
            id: None,
            name: None,
            shape,
        })
    }

    pub(crate) fn same_params(&self, other: &Self) -> bool {
        self.shape == other.shape
    }
}

impl TraitNode for Greater {
    fn id(&self) -> NodeId {
        self.id.unwrap()
    }

    fn set_id(&mut self, id: NodeId) {
        self.id = Some(id);
    }

    fn name(&self) -> &str {
        self.name.as_ref().unwrap()
    }

    fn set_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    fn output_shape(&self) -> &[usize] {
        &self.shape
    }

    fn element_type(&self) -> ElementType {
        ElementType::Bool
    }

    fn type_name(&self) -> &'static str {
        "Greater"
    }
}
