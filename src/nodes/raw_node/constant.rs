/*
 * @Author       : 老董
 * @Date         : 2026-03-05
 * @Description  : Constant 节点 - 编译期字面量（叶子节点）
 *
 * 字面量以 f64 形式保存（足以覆盖全部元素类型的取值），
 * 构造期校验个数与类型兼容性；本 crate 不含执行引擎，
 * 这些值只参与结构等价判定与描述导出。
 */

use crate::element::ElementType;
use crate::graph::GraphError;
use crate::nodes::NodeId;
use crate::shape::volume;

use super::TraitNode;

#[derive(Clone)]
pub(crate) struct Constant {
    id: Option<NodeId>,
    name: Option<String>,
    shape: Vec<usize>,
    element_type: ElementType,
    values: Vec<f64>,
}

impl Constant {
    pub(crate) fn new(
        element_type: ElementType,
        shape: &[usize],
        values: &[f64],
    ) -> Result<Self, GraphError> {
        // 1. 验证字面量个数与形状的元素总数一致
        let expected_count = volume(shape);
        if values.len() != expected_count {
            return Err(GraphError::InvalidOperation(format!(
                "Constant 节点的字面量个数（{}）与形状{:?}的元素总数（{}）不一致",
                values.len(),
                shape,
                expected_count
            )));
        }

        // 2. 验证字面量与元素类型兼容
        match element_type {
            ElementType::Bool => {
                if let Some(v) = values.iter().find(|&&v| v != 0.0 && v != 1.0) {
                    return Err(GraphError::InvalidOperation(format!(
                        "Constant 节点的元素类型为 bool，字面量必须是 0 或 1，但出现了 {v}"
                    )));
                }
            }
            ElementType::I32 | ElementType::I64 => {
                if let Some(v) = values.iter().find(|&&v| v.fract() != 0.0) {
                    return Err(GraphError::InvalidOperation(format!(
                        "Constant 节点的元素类型为 {element_type}，字面量必须是整数，但出现了 {v}"
                    )));
                }
            }
            ElementType::F32 | ElementType::F64 => {}
        }

        // 3. 返回
        Ok(Self {
            id: None,
            name: None,
            shape: shape.to_vec(),
            element_type,
            values: values.to_vec(),
        })
    }

    pub(crate) fn values(&self) -> &[f64] {
        &self.values
    }

    /// 两个 Constant 的配置是否一致（类型、形状与全部字面量）
    ///
    /// 字面量按 f64 的精确相等比较，含 NaN 的常量因此永不合并。
    pub(crate) fn same_params(&self, other: &Self) -> bool {
        self.element_type == other.element_type
            && self.shape == other.shape
            && self.values == other.values
    }
}

impl TraitNode for Constant {
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
        "Constant"
    }
}
