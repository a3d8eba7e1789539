/*
 * @Author       : 老董
 * @Date         : 2026-06-21
 * @Description  : Graph 的 Graphviz DOT 可视化
 */

use std::path::Path;

use super::Graph;
use super::error::GraphError;
use crate::descriptor::{NodeDescriptor, NodeTypeDescriptor};

impl Graph {
    /// 生成 Graphviz DOT 格式的图描述字符串
    ///
    /// 返回的字符串可用于：
    /// - 在线预览：<https://dreampuf.github.io/GraphvizOnline/>
    /// - 嵌入到其他文档或工具中
    ///
    /// # 节点样式
    /// - **Parameter**: 矩形，浅绿色
    /// - **Constant**: 椭圆形，浅蓝色
    /// - **Greater**: 菱形，浅橙色
    /// - **其他运算节点**: 圆角矩形，浅黄色
    pub fn to_dot(&self) -> String {
        let desc = self.describe();
        let mut dot = String::new();

        // 图头部
        dot.push_str(&format!("digraph \"{}\" {{\n", desc.name));
        dot.push_str("    rankdir=TB;\n");
        dot.push_str("    node [fontname=\"Microsoft YaHei,SimHei,Arial\"];\n");
        dot.push_str("    edge [fontname=\"Microsoft YaHei,SimHei,Arial\"];\n");
        dot.push('\n');

        // 节点定义
        for node in &desc.nodes {
            let (shape, style, fillcolor) = Self::dot_node_style(&node.node_type);
            let label = Self::dot_node_label(node);
            dot.push_str(&format!(
                "    \"{}\" [label=<{}> shape={} style={} fillcolor=\"{}\" fontsize=10];\n",
                node.id, label, shape, style, fillcolor
            ));
        }

        dot.push('\n');

        // 边定义（从父节点指向子节点）
        for node in &desc.nodes {
            for parent_id in &node.parents {
                dot.push_str(&format!("    \"{}\" -> \"{}\";\n", parent_id, node.id));
            }
        }

        dot.push_str("}\n");
        dot
    }

    /// 将 DOT 保存到文件
    pub fn save_dot<P: AsRef<Path>>(&self, path: P) -> Result<(), GraphError> {
        std::fs::write(path.as_ref(), self.to_dot())
            .map_err(|e| GraphError::ComputationError(format!("保存 DOT 文件失败: {e}")))
    }

    /// 获取节点的 DOT 样式 (shape, style, fillcolor)
    const fn dot_node_style(
        node_type: &NodeTypeDescriptor,
    ) -> (&'static str, &'static str, &'static str) {
        match node_type {
            // 参数节点：矩形，浅绿色
            NodeTypeDescriptor::Parameter => ("box", "filled", "#E8F5E9"),
            // 常量节点：椭圆形，浅蓝色
            NodeTypeDescriptor::Constant { .. } => ("ellipse", "filled", "#E3F2FD"),
            // 比较节点：菱形，浅橙色
            NodeTypeDescriptor::Greater => ("diamond", "filled", "#FFF3E0"),
            // 其他运算节点：圆角矩形，浅黄色
            _ => ("box", "\"filled,rounded\"", "#FFFDE7"),
        }
    }

    /// 生成节点的 HTML 格式标签
    fn dot_node_label(node: &NodeDescriptor) -> String {
        let type_name = Self::type_name_for_vis(&node.node_type);

        let extra_info = match &node.node_type {
            NodeTypeDescriptor::MaxPool {
                window_shape,
                window_movement_strides,
            }
            | NodeTypeDescriptor::SelectAndScatter {
                window_shape,
                window_movement_strides,
            } => Some(format!(
                "w={window_shape:?} s={window_movement_strides:?}"
            )),
            _ => None,
        };

        let mut parts = vec![
            node.name.clone(),
            format!("<B>{}</B>", type_name),
            format!("{}{:?}", node.element_type, node.output_shape),
        ];
        if let Some(info) = extra_info {
            parts.push(info);
        }

        parts.join("<BR/>")
    }

    /// 获取节点类型名称（用于可视化）
    const fn type_name_for_vis(node_type: &NodeTypeDescriptor) -> &'static str {
        match node_type {
            NodeTypeDescriptor::Parameter => "Parameter",
            NodeTypeDescriptor::Constant { .. } => "Constant",
            NodeTypeDescriptor::Add => "Add",
            NodeTypeDescriptor::Greater => "Greater",
            NodeTypeDescriptor::MaxPool { .. } => "MaxPool",
            NodeTypeDescriptor::SelectAndScatter { .. } => "SelectAndScatter",
        }
    }
}
