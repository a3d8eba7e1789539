/*
 * 形状相关的小工具函数
 *
 * 约定：形状用 `&[usize]` 表示，秩即切片长度；
 * 对池化/窗口类算子，轴 0 为批（batch）、轴 1 为通道（channel），
 * 轴 2 起为图像（空间）维度。
 */

use num_integer::div_ceil;

/// 形状的元素总数（空形状视为标量，元素数为 1）
pub(crate) fn volume(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// 窗口化归约在某一轴上的输出维度
///
/// 公式：`ceil((input_dim - window_dim + 1) / stride)`，
/// 即窗口完全落在输入内的所有放置位置中，按步长取样后的个数。
///
/// 调用方须保证 `window_dim <= input_dim` 且 `stride != 0`，
/// 否则减法会下溢/除法会 panic，相关校验在节点构造期完成。
pub(crate) fn windowed_output_dim(input_dim: usize, window_dim: usize, stride: usize) -> usize {
    div_ceil(input_dim - window_dim + 1, stride)
}
