/*
 * @Author       : 老董
 * @Date         : 2026-03-05
 * @Description  : Add 节点 - 逐元素加法（n 元）
 *
 * 父节点：
 * - parents[0..n]: 形状与元素类型完全一致的 n（>=2）个加数
 */

use crate::element::ElementType;
use crate::graph::{Adjoints, Graph, GraphError};
use crate::nodes::raw_node::TraitNode;
use crate::nodes::{NodeHandle, NodeId};

#[derive(Clone)]
pub(crate) struct Add {
    id: Option<NodeId>,
    name: Option<String>,
    shape: Vec<usize>,
    element_type: ElementType,
}

impl Add {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        // 1. 验证父节点数量
        if parents.len() < 2 {
            return Err(GraphError::InvalidOperation(
                "Add 节点至少需要 2 个父节点".to_string(),
            ));
        }

        // 2. 验证所有父节点形状相同
        let shape = parents[0].output_shape().to_vec();
        for parent in parents.iter().skip(1) {
            if parent.output_shape() != shape {
                return Err(GraphError::ShapeMismatch {
                    expected: shape.clone(),
                    got: parent.output_shape().to_vec(),
                    message: "Add 节点的所有父节点形状必须相同".to_string(),
                });
            }
        }

        // 3. 验证所有父节点元素类型相同
        let element_type = parents[0].element_type();
        for parent in parents.iter().skip(1) {
            if parent.element_type() != element_type {
                return Err(GraphError::InvalidOperation(format!(
                    "Add 节点的所有父节点元素类型必须相同，但同时出现了 {} 和 {}",
                    element_type,
                    parent.element_type()
                )));
            }
        }

        // 4. 返回
        Ok(Self {
            id: None,
            name: None,
            shape,
            element_type,
        })
    }

    /// Add 自身没有算子参数，输出形状与类型由父节点决定
    pub(crate) fn same_params(&self, other: &Self) -> bool {
        self.shape == other.shape && self.element_type == other.element_type
    }
}

impl TraitNode for Add {
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
        self.element_type
    }

    fn type_name(&self) -> &'static str {
        "Add"
    }

    fn generate_adjoints(
        &self,
        graph: &mut Graph,
        adjoints: &mut Adjoints,
        delta: NodeId,
    ) -> Result<(), GraphError> {
        // 加法对每个父节点的梯度都是恒等映射：把 delta 原样累加给各父节点。
        // 同一父节点出现多次时会被累加多次，与求和的导数一致。
        for parent_id in graph.get_node_parents(self.id())? {
            adjoints.add_delta(graph, parent_id, delta)?;
        }
        Ok(())
    }
}
