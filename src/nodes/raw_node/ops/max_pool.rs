/*
 * @Author       : 老董
 * @Date         : 2026-03-08
 * @Description  : MaxPool 节点 - 批式最大池化（任意图像维数）
 *
 * 输入布局：[batch, C, S0, S1, ...]，轴 2 起为图像（空间）维度，
 * 图像维数不限于 2（1D/2D/3D 池化共用同一实现）。
 * 窗口只在完全落在输入内的位置放置，输出的每个图像维为
 * ceil((S_i - W_i + 1) / stride_i)。
 *
 * 全部参数校验集中在 new() 中，逐条检查、遇错即返，
 * 校验通过后一次性构造出含全部推断字段的节点。
 *
 * 父节点：
 * - parents[0]: 被池化的输入数据
 */

use std::rc::Rc;

use crate::element::ElementType;
use crate::graph::{Adjoints, Function, Graph, GraphError};
use crate::nodes::raw_node::TraitNode;
use crate::nodes::{NodeHandle, NodeId};
use crate::shape::windowed_output_dim;

#[derive(Clone)]
pub(crate) struct MaxPool {
    id: Option<NodeId>,
    name: Option<String>,

    // 池化参数
    window_shape: Vec<usize>,
    window_movement_strides: Vec<usize>,

    // 构造期推断出的派生字段（之后不变）
    batch_size: usize,
    channel_count: usize,
    image_dimension_count: usize,
    input_image_shape: Vec<usize>,
    output_image_shape: Vec<usize>,
    output_shape: Vec<usize>,
    element_type: ElementType,
}

impl MaxPool {
    /// 创建 `MaxPool` 节点
    ///
    /// # 参数
    /// - `parents`: [输入节点]
    /// - `window_shape`: 池化窗口，每个图像维一个分量
    /// - `window_movement_strides`: 各图像维的窗口步长；`None` 表示全 1
    pub(crate) fn new(
        parents: &[&NodeHandle],
        window_shape: &[usize],
        window_movement_strides: Option<&[usize]>,
    ) -> Result<Self, GraphError> {
        // 1. 验证父节点数量
        if parents.len() != 1 {
            return Err(GraphError::InvalidOperation(
                "MaxPool 节点需要 1 个父节点".to_string(),
            ));
        }

        let input_shape = parents[0].output_shape();

        // 2. 验证输入秩：至少 3 维 [batch, C, S0, ...]
        if input_shape.len() < 3 {
            return Err(GraphError::DimensionMismatch {
                expected: 3,
                got: input_shape.len(),
                message: format!(
                    "MaxPool 输入必须至少是 3 维 [batch, C, S...]（批、通道、至少 1 个图像维度），得到 {input_shape:?}"
                ),
            });
        }

        let batch_size = input_shape[0];
        let channel_count = input_shape[1];
        let image_dimension_count = input_shape.len() - 2;

        // 省略步长时默认各图像维步长为 1
        let window_movement_strides = window_movement_strides
            .map_or_else(|| vec![1; image_dimension_count], <[usize]>::to_vec);

        // 3. 验证批大小非零
        if batch_size == 0 {
            return Err(GraphError::InvalidOperation(format!(
                "MaxPool 输入的批大小不能为 0，得到形状 {input_shape:?}"
            )));
        }

        // 4. 验证通道数非零
        if channel_count == 0 {
            return Err(GraphError::InvalidOperation(format!(
                "MaxPool 输入的通道数不能为 0，得到形状 {input_shape:?}"
            )));
        }

        // 5. 验证池化窗口的维数与图像维数一致
        if window_shape.len() != image_dimension_count {
            return Err(GraphError::DimensionMismatch {
                expected: image_dimension_count,
                got: window_shape.len(),
                message: format!(
                    "MaxPool 池化窗口的维数必须与图像维数一致：输入 {input_shape:?} 有 {image_dimension_count} 个图像维度，窗口为 {window_shape:?}"
                ),
            });
        }

        // 6. 验证步长的维数与图像维数一致
        if window_movement_strides.len() != image_dimension_count {
            return Err(GraphError::DimensionMismatch {
                expected: image_dimension_count,
                got: window_movement_strides.len(),
                message: format!(
                    "MaxPool 步长的维数必须与图像维数一致：输入 {input_shape:?} 有 {image_dimension_count} 个图像维度，步长为 {window_movement_strides:?}"
                ),
            });
        }

        // 7. 提取输入图像形状，并验证各图像维非零
        let mut input_image_shape = Vec::with_capacity(image_dimension_count);
        for i in 0..image_dimension_count {
            let dim = input_shape[i + 2];
            if dim == 0 {
                return Err(GraphError::InvalidOperation(format!(
                    "MaxPool 输入图像的第 {i} 维不能为 0，得到形状 {input_shape:?}"
                )));
            }
            input_image_shape.push(dim);
        }

        // 8. 验证各窗口维非零
        for i in 0..image_dimension_count {
            if window_shape[i] == 0 {
                return Err(GraphError::InvalidOperation(format!(
                    "MaxPool 池化窗口的第 {i} 维不能为 0，得到窗口 {window_shape:?}"
                )));
            }
        }

        // 9. 验证池化窗口不超过输入图像
        for i in 0..image_dimension_count {
            if window_shape[i] > input_image_shape[i] {
                return Err(GraphError::InvalidOperation(format!(
                    "MaxPool 池化窗口的第 {} 维（{}）超出输入图像的对应维度（{}）",
                    i, window_shape[i], input_image_shape[i]
                )));
            }
        }

        // 10. 逐轴验证步长非零，并计算输出图像形状
        let mut output_image_shape = Vec::with_capacity(image_dimension_count);
        for i in 0..image_dimension_count {
            if window_movement_strides[i] == 0 {
                return Err(GraphError::InvalidOperation(format!(
                    "MaxPool 步长的第 {i} 维不能为 0，得到步长 {window_movement_strides:?}"
                )));
            }
            output_image_shape.push(windowed_output_dim(
                input_image_shape[i],
                window_shape[i],
                window_movement_strides[i],
            ));
        }

        // 11. 组装输出形状并返回
        let mut output_shape = vec![batch_size, channel_count];
        output_shape.extend_from_slice(&output_image_shape);

        Ok(Self {
            id: None,
            name: None,
            window_shape: window_shape.to_vec(),
            window_movement_strides,
            batch_size,
            channel_count,
            image_dimension_count,
            input_image_shape,
            output_image_shape,
            output_shape,
            element_type: parents[0].element_type(),
        })
    }

    pub(crate) fn window_shape(&self) -> &[usize] {
        &self.window_shape
    }

    pub(crate) fn window_movement_strides(&self) -> &[usize] {
        &self.window_movement_strides
    }

    /// 两个 MaxPool 的池化配置是否完全一致
    pub(crate) fn same_params(&self, other: &Self) -> bool {
        self.window_shape == other.window_shape
            && self.window_movement_strides == other.window_movement_strides
            && self.channel_count == other.channel_count
            && self.input_image_shape == other.input_image_shape
            && self.output_image_shape == other.output_image_shape
            && self.batch_size == other.batch_size
            && self.image_dimension_count == other.image_dimension_count
    }
}

impl TraitNode for MaxPool {
    fn id(&self) -> NodeId {
        self.id.unwrap()
    }

    fn set_id(&mut self, id: NodeId) {
        self.id = Some(id);
    }

    fn name(&self) -> &str {
        self.name.as_ref().unwrap()
    }

    fn set_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    fn output_shape(&self) -> &[usize] {
        &self.output_shape
    }

    fn element_type(&self) -> ElementType {
        self.element_type
    }

    fn type_name(&self) -> &'static str {
        "MaxPool"
    }

    /// 构造最大池化的伴随子图
    ///
    /// 最大池化的梯度是稀疏的：每个窗口只有取到最大值的位置接收上游
    /// 梯度，重叠窗口的贡献相加。这里不直接做数值散播，而是构造一个
    /// `SelectAndScatter` 节点来表达同样的语义：
    /// - 选择函数 `a > b` 在窗口内挑出最大值位置；
    /// - 散播函数 `a + b` 把 delta 累加到该位置；
    /// - 初始值为零标量。
    /// 批与通道轴以窗口 1、步长 1 参与，图像轴沿用池化参数，
    /// 因此对任意图像维数都成立。
    fn generate_adjoints(
        &self,
        graph: &mut Graph,
        adjoints: &mut Adjoints,
        delta: NodeId,
    ) -> Result<(), GraphError> {
        let element_type = graph.get_node(delta)?.element_type();

        // 1. 选择函数：f(a, b) = a > b
        let mut select_graph = Graph::with_name("max_pool_select");
        let select_a = select_graph.new_parameter_node(element_type, &[], Some("a"))?;
        let select_b = select_graph.new_parameter_node(element_type, &[], Some("b"))?;
        let select_out = select_graph.new_greater_node(select_a, select_b, None)?;
        let select_fn = Rc::new(Function::new(
            select_graph,
            &[select_a, select_b],
            select_out,
        )?);

        // 2. 散播函数：f(a, b) = a + b
        let mut scatter_graph = Graph::with_name("max_pool_scatter");
        let scatter_a = scatter_graph.new_parameter_node(element_type, &[], Some("a"))?;
        let scatter_b = scatter_graph.new_parameter_node(element_type, &[], Some("b"))?;
        let scatter_out = scatter_graph.new_add_node(&[scatter_a, scatter_b], None)?;
        let scatter_fn = Rc::new(Function::new(
            scatter_graph,
            &[scatter_a, scatter_b],
            scatter_out,
        )?);

        // 3. 被池化的输入即本节点的第一个父节点
        let operand = graph
            .get_node_parents(self.id())?
            .first()
            .copied()
            .ok_or_else(|| {
                GraphError::ComputationError(format!(
                    "{}没有父节点。不该触及本错误，否则说明crate代码有问题",
                    self.display_node()
                ))
            })?;

        // 4. 初始值：对应元素类型的零标量
        let init = graph.new_scalar_constant_node(element_type, 0.0, None)?;

        // 5. 批、通道轴窗口为 1、步长为 1；全部图像轴沿用池化参数
        let mut sas_window_shape = vec![1, 1];
        sas_window_shape.extend_from_slice(&self.window_shape);
        let mut sas_strides = vec![1, 1];
        sas_strides.extend_from_slice(&self.window_movement_strides);

        // 6. 构造 SelectAndScatter，并把它作为输入的梯度贡献累加
        let sas = graph.new_select_and_scatter_node(
            operand,
            delta,
            init,
            select_fn,
            scatter_fn,
            &sas_window_shape,
            &sas_strides,
            None,
        )?;
        adjoints.add_delta(graph, operand, sas)
    }
}
