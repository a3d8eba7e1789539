/*
 * @Author       : 老董
 * @Date         : 2026-03-05
 * @Description  : NodeHandle - 原始节点的统一句柄
 *
 * Graph 以 NodeHandle 存放节点；句柄负责把 new_* 构造转发给具体
 * 算子并在入图时绑定 id/名称，其余访问器均为转发。
 */

use std::fmt;
use std::rc::Rc;

use crate::element::ElementType;
use crate::format_node_display;
use crate::graph::{Adjoints, Function, Graph, GraphError};

use super::raw_node::{
    Add, Constant, Greater, MaxPool, NodeType, Parameter, SelectAndScatter, TraitNode,
};

#[derive(Clone)]
pub(crate) struct NodeHandle {
    raw_node: NodeType,
}

impl NodeHandle {
    fn from_raw<T: Into<NodeType>>(raw_node: T) -> Self {
        Self {
            raw_node: raw_node.into(),
        }
    }

    // ========== new_* 构造转发 ==========

    pub(crate) fn new_parameter(
        element_type: ElementType,
        shape: &[usize],
    ) -> Result<Self, GraphError> {
        Ok(Self::from_raw(Parameter::new(element_type, shape)?))
    }

    pub(crate) fn new_constant(
        element_type: ElementType,
        shape: &[usize],
        values: &[f64],
    ) -> Result<Self, GraphError> {
        Ok(Self::from_raw(Constant::new(element_type, shape, values)?))
    }

    pub(crate) fn new_add(parents: &[&Self]) -> Result<Self, GraphError> {
        Ok(Self::from_raw(Add::new(parents)?))
    }

    pub(crate) fn new_greater(parents: &[&Self]) -> Result<Self, GraphError> {
        Ok(Self::from_raw(Greater::new(parents)?))
    }

    pub(crate) fn new_max_pool(
        parents: &[&Self],
        window_shape: &[usize],
        window_movement_strides: Option<&[usize]>,
    ) -> Result<Self, GraphError> {
        Ok(Self::from_raw(MaxPool::new(
            parents,
            window_shape,
            window_movement_strides,
        )?))
    }

    pub(crate) fn new_select_and_scatter(
        parents: &[&Self],
        select_fn: Rc<Function>,
        scatter_fn: Rc<Function>,
        window_shape: &[usize],
        window_movement_strides: &[usize],
    ) -> Result<Self, GraphError> {
        Ok(Self::from_raw(SelectAndScatter::new(
            parents,
            select_fn,
            scatter_fn,
            window_shape,
            window_movement_strides,
        )?))
    }

    // ========== 入图时的绑定 ==========

    pub(crate) fn bind_id_and_name(&mut self, id: NodeId, name: &str) {
        self.raw_node.set_id(id);
        self.raw_node.set_name(name);
    }

    // ========== 转发访问器 ==========

    pub(crate) fn id(&self) -> NodeId {
        self.raw_node.id()
    }

    pub(crate) fn name(&self) -> &str {
        self.raw_node.name()
    }

    pub(crate) fn output_shape(&self) -> &[usize] {
        self.raw_node.output_shape()
    }

    pub(crate) fn element_type(&self) -> ElementType {
        self.raw_node.element_type()
    }

    pub(crate) fn type_name(&self) -> &'static str {
        self.raw_node.type_name()
    }

    pub(crate) const fn node_type(&self) -> &NodeType {
        &self.raw_node
    }

    pub(crate) fn params_identical(&self, other: &Self) -> bool {
        self.raw_node.params_identical(&other.raw_node)
    }

    pub(crate) fn generate_adjoints(
        &self,
        graph: &mut Graph,
        adjoints: &mut Adjoints,
        delta: NodeId,
    ) -> Result<(), GraphError> {
        self.raw_node.generate_adjoints(graph, adjoints, delta)
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            format_node_display(self.id(), self.name(), self.type_name())
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
