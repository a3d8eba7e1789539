/*
 * @Author       : 老董
 * @Date         : 2026-03-12
 * @Description  : SelectAndScatter 节点单元测试
 *
 * 测试策略：
 * 1. 正常创建（池化梯度场景与一般场景）
 * 2. 三个父节点（operand/source/init）的类型与形状校验
 * 3. 窗口、步长的逐轴校验
 * 4. 选择/散播函数的签名校验
 */

use std::rc::Rc;

use crate::{ElementType, Function, Graph, GraphError};

/// 构造标准选择函数：f(a, b) = a > b
fn select_function(element_type: ElementType) -> Result<Rc<Function>, GraphError> {
    let mut graph = Graph::with_name("select");
    let a = graph.new_parameter_node(element_type, &[], Some("a"))?;
    let b = graph.new_parameter_node(element_type, &[], Some("b"))?;
    let out = graph.new_greater_node(a, b, None)?;
    Ok(Rc::new(Function::new(graph, &[a, b], out)?))
}

/// 构造标准散播函数：f(a, b) = a + b
fn scatter_function(element_type: ElementType) -> Result<Rc<Function>, GraphError> {
    let mut graph = Graph::with_name("scatter");
    let a = graph.new_parameter_node(element_type, &[], Some("a"))?;
    let b = graph.new_parameter_node(element_type, &[], Some("b"))?;
    let out = graph.new_add_node(&[a, b], None)?;
    Ok(Rc::new(Function::new(graph, &[a, b], out)?))
}

// ==================== 基础功能测试 ====================

/// 测试创建：池化梯度场景（批、通道轴窗口为 1）
#[test]
fn test_select_and_scatter_creation() -> Result<(), GraphError> {
    let mut graph = Graph::new();

    let operand = graph.new_parameter_node(ElementType::F32, &[1, 1, 4, 4], Some("operand"))?;
    let source = graph.new_parameter_node(ElementType::F32, &[1, 1, 2, 2], Some("source"))?;
    let init = graph.new_scalar_constant_node(ElementType::F32, 0.0, Some("zero"))?;

    let sas = graph.new_select_and_scatter_node(
        operand,
        source,
        init,
        select_function(ElementType::F32)?,
        scatter_function(ElementType::F32)?,
        &[1, 1, 2, 2],
        &[1, 1, 2, 2],
        Some("sas"),
    )?;

    // 输出与 operand 同形状、同类型
    assert_eq!(graph.get_node_output_shape(sas)?, &[1, 1, 4, 4]);
    assert_eq!(graph.get_node_element_type(sas)?, ElementType::F32);
    assert_eq!(graph.get_node_parents(sas)?, vec![operand, source, init]);
    Ok(())
}

/// 窗口覆盖 operand 的全部轴，秩 2 的一般用法同样合法
#[test]
fn test_select_and_scatter_rank2() -> Result<(), GraphError> {
    let mut graph = Graph::new();

    let operand = graph.new_parameter_node(ElementType::F64, &[4, 6], Some("operand"))?;
    // 窗口化形状: [ceil(3/2), ceil(4/3)] = [2, 2]
    let source = graph.new_parameter_node(ElementType::F64, &[2, 2], Some("source"))?;
    let init = graph.new_scalar_constant_node(ElementType::F64, 0.0, None)?;

    let sas = graph.new_select_and_scatter_node(
        operand,
        source,
        init,
        select_function(ElementType::F64)?,
        scatter_function(ElementType::F64)?,
        &[2, 3],
        &[2, 3],
        None,
    )?;

    assert_eq!(graph.get_node_output_shape(sas)?, &[4, 6]);
    Ok(())
}

// ==================== 父节点校验测试 ====================

/// 测试 source 元素类型与 operand 不一致
#[test]
fn test_select_and_scatter_source_element_type_mismatch() -> Result<(), GraphError> {
    let mut graph = Graph::new();

    let operand = graph.new_parameter_node(ElementType::F32, &[1, 1, 4, 4], Some("operand"))?;
    let source = graph.new_parameter_node(ElementType::F64, &[1, 1, 2, 2], Some("source"))?;
    let init = graph.new_scalar_constant_node(ElementType::F32, 0.0, None)?;

    let result = graph.new_select_and_scatter_node(
        operand,
        source,
        init,
        select_function(ElementType::F32)?,
        scatter_function(ElementType::F32)?,
        &[1, 1, 2, 2],
        &[1, 1, 2, 2],
        None,
    );
    assert!(matches!(result, Err(GraphError::InvalidOperation(_))));
    Ok(())
}

/// 测试 init 元素类型与 operand 不一致
#[test]
fn test_select_and_scatter_init_element_type_mismatch() -> Result<(), GraphError> {
    let mut graph = Graph::new();

    let operand = graph.new_parameter_node(ElementType::F32, &[1, 1, 4, 4], Some("operand"))?;
    let source = graph.new_parameter_node(ElementType::F32, &[1, 1, 2, 2], Some("source"))?;
    let init = graph.new_scalar_constant_node(ElementType::F64, 0.0, None)?;

    let result = graph.new_select_and_scatter_node(
        operand,
        source,
        init,
        select_function(ElementType::F32)?,
        scatter_function(ElementType::F32)?,
        &[1, 1, 2, 2],
        &[1, 1, 2, 2],
        None,
    );
    assert!(matches!(result, Err(GraphError::InvalidOperation(_))));
    Ok(())
}

/// 测试 init 不是标量
#[test]
fn test_select_and_scatter_init_not_scalar() -> Result<(), GraphError> {
    let mut graph = Graph::new();

    let operand = graph.new_parameter_node(ElementType::F32, &[1, 1, 4, 4], Some("operand"))?;
    let source = graph.new_parameter_node(ElementType::F32, &[1, 1, 2, 2], Some("source"))?;
    let init = graph.new_constant_node(ElementType::F32, &[1], &[0.0], Some("init"))?;

    let result = graph.new_select_and_scatter_node(
        operand,
        source,
        init,
        select_function(ElementType::F32)?,
        scatter_function(ElementType::F32)?,
        &[1, 1, 2, 2],
        &[1, 1, 2, 2],
        None,
    );
    assert!(matches!(
        result,
        Err(GraphError::DimensionMismatch {
            expected: 0,
            got: 1,
            ..
        })
    ));
    Ok(())
}

/// 测试 source 形状不等于窗口化形状
#[test]
fn test_select_and_scatter_source_shape_mismatch() -> Result<(), GraphError> {
    let mut graph = Graph::new();

    let operand = graph.new_parameter_node(ElementType::F32, &[1, 1, 4, 4], Some("operand"))?;
    let source = graph.new_parameter_node(ElementType::F32, &[1, 1, 3, 3], Some("source"))?;
    let init = graph.new_scalar_constant_node(ElementType::F32, 0.0, None)?;

    let result = graph.new_select_and_scatter_node(
        operand,
        source,
        init,
        select_function(ElementType::F32)?,
        scatter_function(ElementType::F32)?,
        &[1, 1, 2, 2],
        &[1, 1, 2, 2],
        None,
    );
    assert_eq!(
        result,
        Err(GraphError::ShapeMismatch {
            expected: vec![1, 1, 2, 2],
            got: vec![1, 1, 3, 3],
            message: "SelectAndScatter 的 source 形状必须等于 operand 的窗口化形状".to_string()
        })
    );
    Ok(())
}

// ==================== 窗口与步长校验测试 ====================

/// 测试窗口维数与 operand 的秩不一致
#[test]
fn test_select_and_scatter_window_rank_mismatch() -> Result<(), GraphError> {
    let mut graph = Graph::new();

    let operand = graph.new_parameter_node(ElementType::F32, &[1, 1, 4, 4], Some("operand"))?;
    let source = graph.new_parameter_node(ElementType::F32, &[1, 1, 2, 2], Some("source"))?;
    let init = graph.new_scalar_constant_node(ElementType::F32, 0.0, None)?;

    let result = graph.new_select_and_scatter_node(
        operand,
        source,
        init,
        select_function(ElementType::F32)?,
        scatter_function(ElementType::F32)?,
        &[2, 2],
        &[1, 1, 2, 2],
        None,
    );
    assert!(matches!(
        result,
        Err(GraphError::DimensionMismatch {
            expected: 4,
            got: 2,
            ..
        })
    ));
    Ok(())
}

/// 测试步长维数与 operand 的秩不一致
#[test]
fn test_select_and_scatter_strides_rank_mismatch() -> Result<(), GraphError> {
    let mut graph = Graph::new();

    let operand = graph.new_parameter_node(ElementType::F32, &[1, 1, 4, 4], Some("operand"))?;
    let source = graph.new_parameter_node(ElementType::F32, &[1, 1, 2, 2], Some("source"))?;
    let init = graph.new_scalar_constant_node(ElementType::F32, 0.0, None)?;

    let result = graph.new_select_and_scatter_node(
        operand,
        source,
        init,
        select_function(ElementType::F32)?,
        scatter_function(ElementType::F32)?,
        &[1, 1, 2, 2],
        &[2, 2],
        None,
    );
    assert!(matches!(
        result,
        Err(GraphError::DimensionMismatch {
            expected: 4,
            got: 2,
            ..
        })
    ));
    Ok(())
}

/// 测试窗口维为 0、窗口越界、步长为 0
#[test]
fn test_select_and_scatter_bad_window_or_strides() -> Result<(), GraphError> {
    let mut graph = Graph::new();

    let operand = graph.new_parameter_node(ElementType::F32, &[1, 1, 4, 4], Some("operand"))?;
    let source = graph.new_parameter_node(ElementType::F32, &[1, 1, 2, 2], Some("source"))?;
    let init = graph.new_scalar_constant_node(ElementType::F32, 0.0, None)?;
    let select_fn = select_function(ElementType::F32)?;
    let scatter_fn = scatter_function(ElementType::F32)?;

    // 窗口维为 0
    let result = graph.new_select_and_scatter_node(
        operand,
        source,
        init,
        Rc::clone(&select_fn),
        Rc::clone(&scatter_fn),
        &[1, 0, 2, 2],
        &[1, 1, 2, 2],
        None,
    );
    assert!(matches!(result, Err(GraphError::InvalidOperation(_))));

    // 窗口超出 operand
    let result = graph.new_select_and_scatter_node(
        operand,
        source,
        init,
        Rc::clone(&select_fn),
        Rc::clone(&scatter_fn),
        &[1, 1, 5, 2],
        &[1, 1, 2, 2],
        None,
    );
    assert!(matches!(result, Err(GraphError::InvalidOperation(_))));

    // 步长为 0
    let result = graph.new_select_and_scatter_node(
        operand,
        source,
        init,
        select_fn,
        scatter_fn,
        &[1, 1, 2, 2],
        &[1, 1, 0, 2],
        None,
    );
    assert!(matches!(result, Err(GraphError::InvalidOperation(_))));
    Ok(())
}

// ==================== 窗口函数签名校验测试 ====================

/// 测试选择函数参数个数不对
#[test]
fn test_select_and_scatter_select_fn_wrong_arity() -> Result<(), GraphError> {
    let mut graph = Graph::new();

    let operand = graph.new_parameter_node(ElementType::F32, &[1, 1, 4, 4], Some("operand"))?;
    let source = graph.new_parameter_node(ElementType::F32, &[1, 1, 2, 2], Some("source"))?;
    let init = graph.new_scalar_constant_node(ElementType::F32, 0.0, None)?;

    // 单参数恒等函数：f(a) = a
    let mut identity_graph = Graph::with_name("identity");
    let a = identity_graph.new_parameter_node(ElementType::F32, &[], Some("a"))?;
    let identity = Rc::new(Function::new(identity_graph, &[a], a)?);

    let result = graph.new_select_and_scatter_node(
        operand,
        source,
        init,
        identity,
        scatter_function(ElementType::F32)?,
        &[1, 1, 2, 2],
        &[1, 1, 2, 2],
        None,
    );
    assert!(matches!(result, Err(GraphError::InvalidOperation(_))));
    Ok(())
}

/// 测试选择函数的结果类型必须是 bool（误用加法函数）
#[test]
fn test_select_and_scatter_select_fn_not_bool() -> Result<(), GraphError> {
    let mut graph = Graph::new();

    let operand = graph.new_parameter_node(ElementType::F32, &[1, 1, 4, 4], Some("operand"))?;
    let source = graph.new_parameter_node(ElementType::F32, &[1, 1, 2, 2], Some("source"))?;
    let init = graph.new_scalar_constant_node(ElementType::F32, 0.0, None)?;

    let result = graph.new_select_and_scatter_node(
        operand,
        source,
        init,
        scatter_function(ElementType::F32)?,
        scatter_function(ElementType::F32)?,
        &[1, 1, 2, 2],
        &[1, 1, 2, 2],
        None,
    );
    assert!(matches!(result, Err(GraphError::InvalidOperation(_))));
    Ok(())
}

/// 测试散播函数的结果类型必须与 operand 一致（误用比较函数）
#[test]
fn test_select_and_scatter_scatter_fn_wrong_result() -> Result<(), GraphError> {
    let mut graph = Graph::new();

    let operand = graph.new_parameter_node(ElementType::F32, &[1, 1, 4, 4], Some("operand"))?;
    let source = graph.new_parameter_node(ElementType::F32, &[1, 1, 2, 2], Some("source"))?;
    let init = graph.new_scalar_constant_node(ElementType::F32, 0.0, None)?;

    let result = graph.new_select_and_scatter_node(
        operand,
        source,
        init,
        select_function(ElementType::F32)?,
        select_function(ElementType::F32)?,
        &[1, 1, 2, 2],
        &[1, 1, 2, 2],
        None,
    );
    assert!(matches!(result, Err(GraphError::InvalidOperation(_))));
    Ok(())
}

/// 测试窗口函数的参数元素类型必须与 operand 一致
#[test]
fn test_select_and_scatter_fn_param_type_mismatch() -> Result<(), GraphError> {
    let mut graph = Graph::new();

    let operand = graph.new_parameter_node(ElementType::F32, &[1, 1, 4, 4], Some("operand"))?;
    let source = graph.new_parameter_node(ElementType::F32, &[1, 1, 2, 2], Some("source"))?;
    let init = graph.new_scalar_constant_node(ElementType::F32, 0.0, None)?;

    let result = graph.new_select_and_scatter_node(
        operand,
        source,
        init,
        select_function(ElementType::F64)?,
        scatter_function(ElementType::F32)?,
        &[1, 1, 2, 2],
        &[1, 1, 2, 2],
        None,
    );
    assert!(matches!(result, Err(GraphError::InvalidOperation(_))));
    Ok(())
}

/// 测试窗口函数的参数必须是标量
#[test]
fn test_select_and_scatter_fn_param_not_scalar() -> Result<(), GraphError> {
    let mut graph = Graph::new();

    let operand = graph.new_parameter_node(ElementType::F32, &[1, 1, 4, 4], Some("operand"))?;
    let source = graph.new_parameter_node(ElementType::F32, &[1, 1, 2, 2], Some("source"))?;
    let init = graph.new_scalar_constant_node(ElementType::F32, 0.0, None)?;

    // 向量参数的比较函数：f(a, b) = a > b，a/b 形状为 [2]
    let mut vector_graph = Graph::with_name("vector_select");
    let a = vector_graph.new_parameter_node(ElementType::F32, &[2], Some("a"))?;
    let b = vector_graph.new_parameter_node(ElementType::F32, &[2], Some("b"))?;
    let out = vector_graph.new_greater_node(a, b, None)?;
    let vector_select = Rc::new(Function::new(vector_graph, &[a, b], out)?);

    let result = graph.new_select_and_scatter_node(
        operand,
        source,
        init,
        vector_select,
        scatter_function(ElementType::F32)?,
        &[1, 1, 2, 2],
        &[1, 1, 2, 2],
        None,
    );
    assert!(matches!(result, Err(GraphError::InvalidOperation(_))));
    Ok(())
}
