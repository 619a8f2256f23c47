//! # 常用接口模块
//!
//! 本模块目前只提供单元测试用的断言宏

pub mod macro_for_unit_test;
