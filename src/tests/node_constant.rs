/*
 * @Author       : 老董
 * @Date         : 2026-03-06
 * @Description  : Constant 与 Parameter 叶子节点单元测试
 */

use crate::{ElementType, Graph, GraphError};

// ==================== Parameter ====================

/// 测试 Parameter 节点创建（任意形状与类型均合法）
#[test]
fn test_parameter_creation() -> Result<(), GraphError> {
    let mut graph = Graph::new();

    let p = graph.new_parameter_node(ElementType::F32, &[2, 3], Some("p"))?;
    assert_eq!(graph.get_node_output_shape(p)?, &[2, 3]);
    assert_eq!(graph.get_node_element_type(p)?, ElementType::F32);
    assert!(graph.get_node_parents(p)?.is_empty());

    // 标量参数（秩 0）
    let scalar = graph.new_parameter_node(ElementType::Bool, &[], Some("scalar"))?;
    assert_eq!(graph.get_node_output_shape(scalar)?, &[] as &[usize]);
    Ok(())
}

/// 测试 Parameter 自动命名
#[test]
fn test_parameter_auto_naming() -> Result<(), GraphError> {
    let mut graph = Graph::new();

    let p1 = graph.new_parameter_node(ElementType::F32, &[2], None)?;
    let p2 = graph.new_parameter_node(ElementType::F32, &[2], None)?;
    assert_eq!(graph.get_node_name(p1)?, "parameter_1");
    assert_eq!(graph.get_node_name(p2)?, "parameter_2");
    Ok(())
}

// ==================== Constant ====================

/// 测试 Constant 节点创建（标量与多维）
#[test]
fn test_constant_creation() -> Result<(), GraphError> {
    let mut graph = Graph::new();

    let scalar = graph.new_scalar_constant_node(ElementType::F32, 0.0, Some("zero"))?;
    assert_eq!(graph.get_node_output_shape(scalar)?, &[] as &[usize]);
    assert_eq!(graph.get_node_element_type(scalar)?, ElementType::F32);

    let matrix = graph.new_constant_node(
        ElementType::F64,
        &[2, 2],
        &[1.0, 2.0, 3.0, 4.0],
        Some("m"),
    )?;
    assert_eq!(graph.get_node_output_shape(matrix)?, &[2, 2]);
    Ok(())
}

/// 测试字面量个数与形状不符
#[test]
fn test_constant_wrong_value_count() {
    let mut graph = Graph::new();

    // 形状 [2, 2] 需要 4 个字面量
    let result = graph.new_constant_node(ElementType::F32, &[2, 2], &[1.0, 2.0, 3.0], None);
    assert!(matches!(result, Err(GraphError::InvalidOperation(_))));

    // 标量需要恰好 1 个
    let result = graph.new_constant_node(ElementType::F32, &[], &[], None);
    assert!(matches!(result, Err(GraphError::InvalidOperation(_))));
}

/// 测试 bool 常量的字面量只能为 0 或 1
#[test]
fn test_constant_bool_values() -> Result<(), GraphError> {
    let mut graph = Graph::new();

    let ok = graph.new_constant_node(ElementType::Bool, &[3], &[0.0, 1.0, 1.0], Some("mask"))?;
    assert_eq!(graph.get_node_element_type(ok)?, ElementType::Bool);

    let result = graph.new_constant_node(ElementType::Bool, &[2], &[0.0, 2.0], None);
    assert!(matches!(result, Err(GraphError::InvalidOperation(_))));
    Ok(())
}

/// 测试整型常量的字面量必须是整数值
#[test]
fn test_constant_integral_values() -> Result<(), GraphError> {
    let mut graph = Graph::new();

    let ok = graph.new_constant_node(ElementType::I32, &[2], &[-3.0, 7.0], Some("ints"))?;
    assert_eq!(graph.get_node_element_type(ok)?, ElementType::I32);

    let result = graph.new_constant_node(ElementType::I64, &[2], &[1.0, 2.5], None);
    assert!(matches!(result, Err(GraphError::InvalidOperation(_))));

    // 浮点类型没有整数限制
    let float = graph.new_constant_node(ElementType::F32, &[2], &[1.0, 2.5], Some("floats"))?;
    assert_eq!(graph.get_node_element_type(float)?, ElementType::F32);
    Ok(())
}
