/*
 * @Author       : 老董
 * @Date         : 2026-03-10
 * @Description  : SelectAndScatter 节点 - 窗口化选择散播（符号节点）
 *
 * 语义（仅符号表达，本 crate 不执行数值计算）：按窗口/步长在
 * operand 上滑动，用选择函数在每个窗口内挑出一个位置，把 source
 * 中对应的值经散播函数累加到输出的该位置，其余位置为初始值。
 * 这是最大池化梯度的表达载体：选择函数取 a > b，散播函数取 a + b。
 *
 * 窗口与步长覆盖 operand 的全部轴（含批与通道轴，池化梯度场景下
 * 这两个轴的窗口与步长均为 1）。
 *
 * 父节点：
 * - parents[0]: operand，被滑窗的数据
 * - parents[1]: source，每个窗口位置待散播的值（形状须等于窗口化形状）
 * - parents[2]: init，输出其余位置的初始值（标量）
 */

use std::rc::Rc;

use crate::element::ElementType;
use crate::graph::{Function, GraphError};
use crate::nodes::raw_node::TraitNode;
use crate::nodes::{NodeHandle, NodeId};
use crate::shape::windowed_output_dim;

#[derive(Clone)]
pub(crate) struct SelectAndScatter {
    id: Option<NodeId>,
    name: Option<String>,
    window_shape: Vec<usize>,
    window_movement_strides: Vec<usize>,
    select_fn: Rc<Function>,
    scatter_fn: Rc<Function>,
    shape: Vec<usize>,
    element_type: ElementType,
}

impl SelectAndScatter {
    pub(crate) fn new(
        parents: &[&NodeHandle],
        select_fn: Rc<Function>,
        scatter_fn: Rc<Function>,
        window_shape: &[usize],
        window_movement_strides: &[usize],
    ) -> Result<Self, GraphError> {
        // 1. 验证父节点数量
        if parents.len() != 3 {
            return Err(GraphError::InvalidOperation(
                "SelectAndScatter 节点需要 3 个父节点（operand、source、init）".to_string(),
            ));
        }

        let operand = parents[0];
        let source = parents[1];
        let init = parents[2];
        let operand_shape = operand.output_shape();
        let element_type = operand.element_type();

        // 2. 验证 source 的元素类型与 operand 一致
        if source.element_type() != element_type {
            return Err(GraphError::InvalidOperation(format!(
                "SelectAndScatter 的 source 元素类型（{}）与 operand（{}）不一致",
                source.element_type(),
                element_type
            )));
        }

        // 3. 验证 init 的元素类型与 operand 一致
        if init.element_type() != element_type {
            return Err(GraphError::InvalidOperation(format!(
                "SelectAndScatter 的 init 元素类型（{}）与 operand（{}）不一致",
                init.element_type(),
                element_type
            )));
        }

        // 4. 验证 init 是标量（秩 0）
        if !init.output_shape().is_empty() {
            return Err(GraphError::DimensionMismatch {
                expected: 0,
                got: init.output_shape().len(),
                message: format!(
                    "SelectAndScatter 的 init 必须是标量，得到形状 {:?}",
                    init.output_shape()
                ),
            });
        }

        // 5. 验证窗口的维数与 operand 的秩一致
        if window_shape.len() != operand_shape.len() {
            return Err(GraphError::DimensionMismatch {
                expected: operand_shape.len(),
                got: window_shape.len(),
                message: format!(
                    "SelectAndScatter 窗口的维数必须与 operand 的秩一致：operand 为 {operand_shape:?}，窗口为 {window_shape:?}"
                ),
            });
        }

        // 6. 验证步长的维数与 operand 的秩一致
        if window_movement_strides.len() != operand_shape.len() {
            return Err(GraphError::DimensionMismatch {
                expected: operand_shape.len(),
                got: window_movement_strides.len(),
                message: format!(
                    "SelectAndScatter 步长的维数必须与 operand 的秩一致：operand 为 {operand_shape:?}，步长为 {window_movement_strides:?}"
                ),
            });
        }

        // 7. 逐轴验证窗口与步长，并计算窗口化（source 应有的）形状
        let mut expected_source_shape = Vec::with_capacity(operand_shape.len());
        for i in 0..operand_shape.len() {
            if window_shape[i] == 0 {
                return Err(GraphError::InvalidOperation(format!(
                    "SelectAndScatter 窗口的第 {i} 维不能为 0，得到窗口 {window_shape:?}"
                )));
            }
            if window_shape[i] > operand_shape[i] {
                return Err(GraphError::InvalidOperation(format!(
                    "SelectAndScatter 窗口的第 {} 维（{}）超出 operand 的对应维度（{}）",
                    i, window_shape[i], operand_shape[i]
                )));
            }
            if window_movement_strides[i] == 0 {
                return Err(GraphError::InvalidOperation(format!(
                    "SelectAndScatter 步长的第 {i} 维不能为 0，得到步长 {window_movement_strides:?}"
                )));
            }
            expected_source_shape.push(windowed_output_dim(
                operand_shape[i],
                window_shape[i],
                window_movement_strides[i],
            ));
        }

        // 8. 验证 source 的形状等于窗口化形状
        if source.output_shape() != expected_source_shape {
            return Err(GraphError::ShapeMismatch {
                expected: expected_source_shape,
                got: source.output_shape().to_vec(),
                message: "SelectAndScatter 的 source 形状必须等于 operand 的窗口化形状"
                    .to_string(),
            });
        }

        // 9. 验证选择函数签名：(标量, 标量) -> bool 标量
        Self::check_function_signature(&select_fn, "选择函数", element_type, ElementType::Bool)?;

        // 10. 验证散播函数签名：(标量, 标量) -> 同类型标量
        Self::check_function_signature(&scatter_fn, "散播函数", element_type, element_type)?;

        // 11. 返回（输出与 operand 同形状、同元素类型）
        Ok(Self {
            id: None,
            name: None,
            window_shape: window_shape.to_vec(),
            window_movement_strides: window_movement_strides.to_vec(),
            select_fn,
            scatter_fn,
            shape: operand_shape.to_vec(),
            element_type,
        })
    }

    /// 校验窗口函数的签名：两个指定类型的标量参数，一个指定类型的标量结果
    fn check_function_signature(
        function: &Function,
        role: &str,
        param_type: ElementType,
        result_type: ElementType,
    ) -> Result<(), GraphError> {
        if function.parameter_count() != 2 {
            return Err(GraphError::InvalidOperation(format!(
                "SelectAndScatter 的{}必须有 2 个参数，得到 {} 个",
                role,
                function.parameter_count()
            )));
        }

        for index in 0..2 {
            if !function.parameter_shape(index).is_empty() {
                return Err(GraphError::InvalidOperation(format!(
                    "SelectAndScatter 的{}第 {} 个参数必须是标量，得到形状 {:?}",
                    role,
                    index,
                    function.parameter_shape(index)
                )));
            }
            if function.parameter_element_type(index) != param_type {
                return Err(GraphError::InvalidOperation(format!(
                    "SelectAndScatter 的{}第 {} 个参数元素类型必须是 {}，得到 {}",
                    role,
                    index,
                    param_type,
                    function.parameter_element_type(index)
                )));
            }
        }

        if !function.result_shape().is_empty() {
            return Err(GraphError::InvalidOperation(format!(
                "SelectAndScatter 的{}结果必须是标量，得到形状 {:?}",
                role,
                function.result_shape()
            )));
        }
        if function.result_element_type() != result_type {
            return Err(GraphError::InvalidOperation(format!(
                "SelectAndScatter 的{}结果元素类型必须是 {}，得到 {}",
                role,
                result_type,
                function.result_element_type()
            )));
        }

        Ok(())
    }

    pub(crate) fn window_shape(&self) -> &[usize] {
        &self.window_shape
    }

    pub(crate) fn window_movement_strides(&self) -> &[usize] {
        &self.window_movement_strides
    }

    /// 两个 SelectAndScatter 的配置是否完全一致
    ///
    /// 窗口函数按共享指针的同一性比较（Rc::ptr_eq）：函数子图的
    /// 结构等价不在本 crate 的判定范围内。
    pub(crate) fn same_params(&self, other: &Self) -> bool {
        self.window_shape == other.window_shape
            && self.window_movement_strides == other.window_movement_strides
            && self.shape == other.shape
            && self.element_type == other.element_type
            && Rc::ptr_eq(&self.select_fn, &other.select_fn)
            && Rc::ptr_eq(&self.scatter_fn, &other.scatter_fn)
    }
}

impl TraitNode for SelectAndScatter {
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
        "SelectAndScatter"
    }
}
