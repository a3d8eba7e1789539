/*
 * @Author       : 老董
 * @Date         : 2026-03-05
 * @Description  : 原始节点（raw node）：TraitNode 特性与 NodeType 枚举
 *
 * 每种算子一个结构体，构造函数在返回前完成全部参数校验与
 * 形状推断（先验证、后构造，不存在“半初始化”的节点）。
 * 通过 enum_dispatch 做静态分发，不使用任何向下转型。
 */

mod constant;
mod ops;
mod parameter;

pub(crate) use constant::Constant;
pub(crate) use ops::{Add, Greater, MaxPool, SelectAndScatter};
pub(crate) use parameter::Parameter;

use crate::element::ElementType;
use crate::format_node_display;
use crate::graph::{Adjoints, Graph, GraphError};
use crate::nodes::NodeId;
use enum_dispatch::enum_dispatch;

#[enum_dispatch]
#[derive(Clone)]
pub(crate) enum NodeType {
    Parameter(Parameter),
    Constant(Constant),
    Add(Add),
    Greater(Greater),
    MaxPool(MaxPool),
    SelectAndScatter(SelectAndScatter),
}

#[enum_dispatch(NodeType)]
pub(crate) trait TraitNode {
    fn id(&self) -> NodeId;

    fn set_id(&mut self, id: NodeId);

    fn name(&self) -> &str;

    fn set_name(&mut self, name: &str);

    /// 本节点输出的形状（构造期推断完成，之后不变）
    fn output_shape(&self) -> &[usize];

    /// 本节点输出的元素类型
    fn element_type(&self) -> ElementType;

    fn type_name(&self) -> &'static str;

    fn display_node(&self) -> String {
        format_node_display(self.id(), self.name(), self.type_name())
    }

    /// 为本节点的各父节点构造伴随（梯度）子图
    ///
    /// `delta` 是上游传来的、对本节点输出的梯度节点；实现者应为每个
    /// 可微父节点构造出对应的梯度节点，并通过 `adjoints.add_delta` 累加。
    /// 默认实现为空：叶子节点与不可微算子（如比较类）无需传播。
    fn generate_adjoints(
        &self,
        _graph: &mut Graph,
        _adjoints: &mut Adjoints,
        _delta: NodeId,
    ) -> Result<(), GraphError> {
        Ok(())
    }
}

impl NodeType {
    /// 两个节点的算子参数是否完全一致（按变体标签逐对匹配）
    ///
    /// 这里只比较算子自身的配置，父节点列表是否一致由
    /// `Graph::is_functionally_identical` 负责。Parameter 是图的独立
    /// 输入，即使形状相同也永远不视为一致。
    pub(crate) fn params_identical(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Parameter(_), Self::Parameter(_)) => false,
            (Self::Constant(a), Self::Constant(b)) => a.same_params(b),
            (Self::Add(a), Self::Add(b)) => a.same_params(b),
            (Self::Greater(a), Self::Greater(b)) => a.same_params(b),
            (Self::MaxPool(a), Self::MaxPool(b)) => a.same_params(b),
            (Self::SelectAndScatter(a), Self::SelectAndScatter(b)) => a.same_params(b),
            _ => false,
        }
    }
}
