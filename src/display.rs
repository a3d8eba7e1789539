/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-04-18
 * @Description  : 计算图节点的显示格式化
 */

use crate::nodes::NodeId;

/// 格式化计算图节点的显示
///
/// # Arguments
/// * `id` - 节点ID
/// * `name` - 节点名称
/// * `type_name` - 节点类型名称
///
/// # Returns
/// 返回格式化后的字符串，格式为：`节点[id={}, name={}, type={}]`
pub(crate) fn format_node_display(id: NodeId, name: &str, type_name: &str) -> String {
    format!("节点[id={}, name={}, type={}]", id, name, type_name)
}
