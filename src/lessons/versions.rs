//! 第 1 节：打印版本信息

use std::fmt;

use serde::Serialize;

/// Cargo.toml 中声明的关键依赖版本
const KEY_DEPENDENCIES: [(&str, &str); 6] = [
    ("ndarray", "0.15"),
    ("rand", "0.8"),
    ("image", "0.24"),
    ("serde", "1"),
    ("tracing", "0.1"),
    ("clap", "4"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionsReport {
    pub crate_name: String,
    pub crate_version: String,
    /// 数值计算后端
    pub backend: String,
    pub dependencies: Vec<(String, String)>,
}

pub fn report() -> VersionsReport {
    VersionsReport {
        crate_name: env!("CARGO_PKG_NAME").to_string(),
        crate_version: env!("CARGO_PKG_VERSION").to_string(),
        backend: "ndarray (CPU, f32)".to_string(),
        dependencies: KEY_DEPENDENCIES
            .iter()
            .map(|(name, version)| ((*name).to_string(), (*version).to_string()))
            .collect(),
    }
}

impl fmt::Display for VersionsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} v{}", self.crate_name, self.crate_version)?;
        writeln!(f, "后端: {}", self.backend)?;
        for (name, version) in &self.dependencies {
            writeln!(f, "  {name:<10} {version}")?;
        }
        Ok(())
    }
}
