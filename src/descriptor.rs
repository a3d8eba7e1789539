/*
 * @Author       : 老董
 * @Date         : 2026-06-20
 * @Description  : 图描述符（Graph Descriptor）
 *                 统一的中间表示（IR），用于序列化、可视化和调试输出
 */

use serde::{Deserialize, Serialize};

use crate::element::ElementType;

/// 图的可序列化描述
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDescriptor {
    /// 格式版本（用于向后兼容）
    pub version: String,
    /// 图名称
    pub name: String,
    /// 所有节点描述（按ID升序）
    pub nodes: Vec<NodeDescriptor>,
}

/// 节点描述
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDescriptor {
    /// 节点 ID
    pub id: u64,
    /// 节点名称
    pub name: String,
    /// 节点类型
    pub node_type: NodeTypeDescriptor,
    /// 元素类型
    pub element_type: ElementType,
    /// 输出形状
    pub output_shape: Vec<usize>,
    /// 父节点 ID 列表（定义拓扑）
    pub parents: Vec<u64>,
}

/// 节点类型描述（包含类型特定参数）
///
/// 选择散播（SelectAndScatter）节点只记录窗口参数，
/// 其选择/散播函数子图不参与序列化。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeTypeDescriptor {
    Parameter,
    Constant {
        values: Vec<f64>,
    },
    Add,
    Greater,
    MaxPool {
        window_shape: Vec<usize>,
        window_movement_strides: Vec<usize>,
    },
    SelectAndScatter {
        window_shape: Vec<usize>,
        window_movement_strides: Vec<usize>,
    },
}

impl GraphDescriptor {
    /// 创建新的图描述符
    pub fn new(name: &str) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            name: name.to_string(),
            nodes: Vec::new(),
        }
    }

    /// 添加节点描述
    pub fn add_node(&mut self, node: NodeDescriptor) {
        self.nodes.push(node);
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl NodeDescriptor {
    /// 创建新的节点描述
    pub fn new(
        id: u64,
        name: &str,
        node_type: NodeTypeDescriptor,
        element_type: ElementType,
        output_shape: Vec<usize>,
        parents: Vec<u64>,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            node_type,
            element_type,
            output_shape,
            parents,
        }
    }
}
