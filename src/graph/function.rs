/*
 * @Author       : 老董
 * @Date         : 2026-04-18
 * @Description  : 函数（Function）：把一张子图封装成可复用的可调用单元
 *
 * 函数由一张自有的图、若干参数节点和一个结果节点组成。参数与结果
 * 的形状、元素类型在构造时缓存，之后的签名查询不会失败。选择散播
 * 节点用它来描述窗口内的选择函数与散播函数。
 */

use super::Graph;
use super::error::GraphError;
use crate::element::ElementType;
use crate::nodes::NodeId;
use crate::nodes::raw_node::NodeType;

/// 封装子图的可调用单元。
///
/// 构造后不可变：内部图、参数列表与结果节点都不再变化，因此可以
/// 安全地用 `Rc` 在多个节点间共享。
pub struct Function {
    graph: Graph,
    parameters: Vec<NodeId>,
    result: NodeId,
    // 构造时缓存的签名信息
    parameter_shapes: Vec<Vec<usize>>,
    parameter_element_types: Vec<ElementType>,
    result_shape: Vec<usize>,
    result_element_type: ElementType,
}

impl Function {
    /// 用给定图、参数节点与结果节点构造函数
    pub fn new(graph: Graph, parameters: &[NodeId], result: NodeId) -> Result<Self, GraphError> {
        // 1. 验证每个参数节点都存在且确实是参数（Parameter）节点
        for &parameter_id in parameters {
            let node = graph.get_node(parameter_id)?;
            if !matches!(node.node_type(), NodeType::Parameter(_)) {
                return Err(GraphError::InvalidOperation(format!(
                    "函数的参数{}必须是parameter类型节点，实际为{}",
                    node,
                    node.type_name()
                )));
            }
        }

        // 2. 验证参数节点没有重复
        for (index, &parameter_id) in parameters.iter().enumerate() {
            if parameters[..index].contains(&parameter_id) {
                return Err(GraphError::InvalidOperation(format!(
                    "函数的参数列表中节点[id={parameter_id}]出现了多次"
                )));
            }
        }

        // 3. 验证结果节点存在
        let result_node = graph.get_node(result)?;

        // 4. 缓存签名信息后构造
        let result_shape = result_node.output_shape().to_vec();
        let result_element_type = result_node.element_type();
        let mut parameter_shapes = Vec::with_capacity(parameters.len());
        let mut parameter_element_types = Vec::with_capacity(parameters.len());
        for &parameter_id in parameters {
            let node = graph.get_node(parameter_id)?;
            parameter_shapes.push(node.output_shape().to_vec());
            parameter_element_types.push(node.element_type());
        }

        Ok(Self {
            graph,
            parameters: parameters.to_vec(),
            result,
            parameter_shapes,
            parameter_element_types,
            result_shape,
            result_element_type,
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn parameters(&self) -> &[NodeId] {
        &self.parameters
    }

    pub fn result(&self) -> NodeId {
        self.result
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    /// 第`index`个参数的形状（index须小于参数个数）
    pub fn parameter_shape(&self, index: usize) -> &[usize] {
        &self.parameter_shapes[index]
    }

    /// 第`index`个参数的元素类型（index须小于参数个数）
    pub fn parameter_element_type(&self, index: usize) -> ElementType {
        self.parameter_element_types[index]
    }

    pub fn result_shape(&self) -> &[usize] {
        &self.result_shape
    }

    pub fn result_element_type(&self) -> ElementType {
        self.result_element_type
    }
}
