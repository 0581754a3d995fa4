use crate::config::types::StressConfig;
use crate::target::Header;
use crate::{Result, StressError};
use bytes::Bytes;
use std::fs;
use std::path::Path;

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    const CONFIG_FILE: &'static str = "stress.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<StressConfig> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            StressError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config = toml::from_str(&content)
            .map_err(|e| StressError::Config(format!("Failed to parse config file: {}", e)))?;
        tracing::debug!(path = %path.as_ref().display(), "loaded config");
        Ok(config)
    }

    /// 查找并加载配置文件
    /// 查找顺序：
    /// 1. 当前目录及父目录
    /// 2. 用户配置目录 ~/.config/stress/
    pub fn find_and_load() -> Option<StressConfig> {
        Self::try_load_from_current_dir().or_else(Self::try_load_from_user_dir)
    }

    fn try_load_from_current_dir() -> Option<StressConfig> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join(Self::CONFIG_FILE);
            if config_path.exists() {
                return Self::load_logged(&config_path);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    fn try_load_from_user_dir() -> Option<StressConfig> {
        let home = dirs::home_dir()?;
        let config_path = home.join(".config").join("stress").join(Self::CONFIG_FILE);

        if config_path.exists() {
            Self::load_logged(&config_path)
        } else {
            None
        }
    }

    // 自动发现的配置出错时只记录日志，不中断运行
    fn load_logged(path: &Path) -> Option<StressConfig> {
        match Self::load_from_path(path) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring config file");
                None
            }
        }
    }

    /// 构建默认 body 和 header
    /// cli_headers: CLI 传入的 header 覆盖（-H key:value），优先级最高
    pub fn build_defaults(
        config: &StressConfig,
        cli_headers: &[(String, String)],
    ) -> Result<(Bytes, Header)> {
        let defaults = &config.defaults;

        let body = match (&defaults.body_file, &defaults.body) {
            (Some(path), _) => Bytes::from(fs::read(path).map_err(|source| {
                StressError::FileAccess {
                    path: path.display().to_string(),
                    source,
                }
            })?),
            (None, Some(body)) => Bytes::from(body.clone()),
            (None, None) => Bytes::new(),
        };

        let mut header = Header::new();
        for (name, values) in &defaults.headers {
            for value in values.as_slice() {
                header.add(name, value);
            }
        }

        for (name, value) in cli_headers {
            header.set(name, value);
        }

        Ok((body, header))
    }

    /// 解析 CLI header 参数 "key:value"
    pub fn parse_cli_header(s: &str) -> Option<(String, String)> {
        s.split_once(':')
            .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            .filter(|(k, _)| !k.is_empty())
    }
}
