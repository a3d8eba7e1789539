/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 计算图节点：句柄（NodeHandle）与原始节点（raw_node）
 */

pub(crate) mod node_handle;
pub(crate) mod raw_node;

pub use node_handle::NodeId;
pub(crate) use node_handle::NodeHandle;
