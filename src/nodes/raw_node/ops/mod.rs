/*
 * @Author       : 老董
 * @Date         : 2026-03-05
 * @Description  : 算子节点
 */

mod add;
mod greater;
mod max_pool;
mod select_and_scatter;

pub(crate) use add::Add;
pub(crate) use greater::Greater;
pub(crate) use max_pool::MaxPool;
pub(crate) use select_and_scatter::SelectAndScatter;
