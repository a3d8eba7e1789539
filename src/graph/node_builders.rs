/*
 * @Author       : 老董
 * @Date         : 2026-03-05
 * @Description  : Graph 节点构建方法（new_*_node）
 *
 * 统一流程：具体算子在 NodeHandle::new_* 中完成全部校验与形状
 * 推断，校验通过后由 add_node_to_list 接入边表并绑定 id/名称。
 * 校验失败时图保持原样，不会留下半成品节点。
 */

use std::rc::Rc;

use super::Graph;
use super::error::GraphError;
use super::function::Function;
use crate::element::ElementType;
use crate::nodes::{NodeHandle, NodeId};

impl Graph {
    /// 添加节点到列表
    pub(in crate::graph) fn add_node_to_list(
        &mut self,
        mut node_handle: NodeHandle,
        name: Option<&str>,
        node_type: &str,
        parents: &[NodeId],
    ) -> Result<NodeId, GraphError> {
        // 1. 生成节点ID和名称
        let node_id = self.generate_valid_node_id();
        let node_name = self.generate_valid_new_node_name(name.unwrap_or(""), node_type)?;

        // 2. 更新父子关系
        // 2.1 更新正向边：父节点 -> 子节点
        for &parent_id in parents {
            self.forward_edges
                .entry(parent_id)
                .or_default()
                .push(node_id);
        }
        // 2.2 更新反向边：子节点 -> 父节点
        self.backward_edges
            .entry(node_id)
            .or_default()
            .extend(parents);

        // 3. 绑定ID和名称
        node_handle.bind_id_and_name(node_id, &node_name);

        // 4. 将节点句柄插入到节点列表中，并返回ID
        self.nodes.insert(node_id, node_handle);
        Ok(node_id)
    }

    /// 创建参数节点（图的具名输入）
    pub fn new_parameter_node(
        &mut self,
        element_type: ElementType,
        shape: &[usize],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = NodeHandle::new_parameter(element_type, shape)?;
        self.add_node_to_list(node, name, "parameter", &[])
    }

    /// 创建常量节点
    ///
    /// `values` 按行优先顺序给出全部字面量，个数必须等于形状的元素总数。
    pub fn new_constant_node(
        &mut self,
        element_type: ElementType,
        shape: &[usize],
        values: &[f64],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = NodeHandle::new_constant(element_type, shape, values)?;
        self.add_node_to_list(node, name, "constant", &[])
    }

    /// 创建标量常量节点（形状为 []）
    pub fn new_scalar_constant_node(
        &mut self,
        element_type: ElementType,
        value: f64,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.new_constant_node(element_type, &[], &[value], name)
    }

    pub fn new_add_node(
        &mut self,
        parents: &[NodeId],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let handle = NodeHandle::new_add(&self.get_nodes(parents)?)?;
        self.add_node_to_list(handle, name, "add", parents)
    }

    pub fn new_greater_node(
        &mut self,
        left_node_id: NodeId,
        right_node_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let handle = NodeHandle::new_greater(&self.get_nodes(&[left_node_id, right_node_id])?)?;
        self.add_node_to_list(handle, name, "greater", &[left_node_id, right_node_id])
    }

    /// 创建最大池化节点
    ///
    /// # 参数
    /// - `input_id`: 输入节点，形状为 [batch, C, S0, S1, ...]
    /// - `window_shape`: 池化窗口，每个图像维一个分量
    /// - `window_movement_strides`: 各图像维的步长；`None` 表示全 1
    pub fn new_max_pool_node(
        &mut self,
        input_id: NodeId,
        window_shape: &[usize],
        window_movement_strides: Option<&[usize]>,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let handle = NodeHandle::new_max_pool(
            &self.get_nodes(&[input_id])?,
            window_shape,
            window_movement_strides,
        )?;
        self.add_node_to_list(handle, name, "max_pool", &[input_id])
    }

    /// 创建选择散播节点
    ///
    /// # 参数
    /// - `operand_id`: 被滑窗的数据
    /// - `source_id`: 每个窗口位置待散播的值（形状须等于窗口化形状）
    /// - `init_id`: 输出其余位置的初始值（标量）
    /// - `select_fn`: 选择函数，(标量, 标量) -> bool 标量
    /// - `scatter_fn`: 散播函数，(标量, 标量) -> 同类型标量
    /// - `window_shape` / `window_movement_strides`: 覆盖 operand 全部轴
    #[allow(clippy::too_many_arguments)]
    pub fn new_select_and_scatter_node(
        &mut self,
        operand_id: NodeId,
        source_id: NodeId,
        init_id: NodeId,
        select_fn: Rc<Function>,
        scatter_fn: Rc<Function>,
        window_shape: &[usize],
        window_movement_strides: &[usize],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let handle = NodeHandle::new_select_and_scatter(
            &self.get_nodes(&[operand_id, source_id, init_id])?,
            select_fn,
            scatter_fn,
            window_shape,
            window_movement_strides,
        )?;
        self.add_node_to_list(
            handle,
            name,
            "select_and_scatter",
            &[operand_id, source_id, init_id],
        )
    }
}
