/*
 * @Author       : 老董
 * @Date         : 2026-03-05
 * @Description  : Parameter 节点 - 图的具名输入（叶子节点）
 *
 * 没有父节点，也没有可校验的算子参数：任意元素类型与形状
 * （含秩 0 的标量）都是合法的。
 */

use crate::element::ElementType;
use crate::graph::GraphError;
use crate::nodes::NodeId;

use super::TraitNode;

#[derive(Clone)]
pub(crate) struct Parameter {
    id: Option<NodeId>,
    name: Option<String>,
    shape: Vec<usize>,
    element_type: ElementType,
}

impl Parameter {
    pub(crate) fn new(element_type: ElementType, shape: &[usize]) -> Result<Self, GraphError> {
        Ok(Self {
            id: None,
            name: None,
            shape: shape.to_vec(),
            element_type,
        })
    }
}

impl TraitNode for Parameter {
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
        "Parameter"
    }
}
