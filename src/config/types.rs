use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// 完整的配置文件 (stress.toml)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StressConfig {
    /// 打乱 Target 顺序使用的种子，不设置则保持文件顺序
    #[serde(default)]
    pub seed: Option<u64>,

    /// 所有 Target 共享的默认值
    #[serde(default)]
    pub defaults: Defaults,
}

/// 默认请求体和 header
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Defaults {
    /// 内联的默认请求体
    #[serde(default)]
    pub body: Option<String>,

    /// 从文件读取默认请求体，优先于 `body`
    #[serde(default)]
    pub body_file: Option<PathBuf>,

    /// 默认 header，值可以是字符串或字符串数组
    #[serde(default)]
    pub headers: BTreeMap<String, HeaderValues>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum HeaderValues {
    One(String),
    Many(Vec<String>),
}

impl HeaderValues {
    pub fn as_slice(&self) -> &[String] {
        match self {
            HeaderValues::One(value) => std::slice::from_ref(value),
            HeaderValues::Many(values) => values,
        }
    }
}
