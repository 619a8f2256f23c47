/*
 * @Description  : Layer 模块：组合节点构建常见网络结构的便捷封装
 */

mod linear;

pub use linear::Linear;
