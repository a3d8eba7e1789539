//! # Only Graph
//!
//! `only_graph`项目旨在用纯rust实现一个符号式计算图（IR）库：节点在入图前完成
//! 全部形状推断与参数校验，反向传播不做数值计算，而是像[nGraph](https://github.com/NervanaSystems/ngraph)
//! 这类图编译器一样，以图到图变换的方式构造出梯度子图。图结构可导出为
//! JSON 描述或 Graphviz DOT，便于序列化、调试与可视化。
//!

mod descriptor;
mod display;
mod element;
mod graph;
mod nodes;
mod shape;

pub use descriptor::{GraphDescriptor, NodeDescriptor, NodeTypeDescriptor};
pub(crate) use display::format_node_display;
pub use element::ElementType;
pub use graph::{Adjoints, Function, Graph, GraphError};
pub use nodes::NodeId;

#[cfg(test)]
mod tests;
