use crate::{Result, StressError};
use reqwest::multipart::{Form, Part};

/// POST 请求体的文件来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSpec {
    /// `form:filename` 或 `form:field:filename`，以 multipart 上传
    Form { field: String, filename: String },
    /// 普通文件路径，整个文件作为原始请求体
    Raw { path: String },
}

impl FileSpec {
    /// 未指定字段名时使用的默认字段
    pub const DEFAULT_FIELD: &'static str = "file";

    /// 解析文件说明（占位符应在调用前展开）
    ///
    /// 只要包含 "form" 就按 form 指令处理，按 `:` 分段后必须是 2 段或 3 段。
    pub fn parse(spec: &str) -> Result<Self> {
        if !spec.contains("form") {
            return Ok(FileSpec::Raw {
                path: spec.to_string(),
            });
        }

        let parts: Vec<&str> = spec.split(':').collect();
        match parts.as_slice() {
            [_, filename] => Ok(FileSpec::Form {
                field: Self::DEFAULT_FIELD.to_string(),
                filename: filename.to_string(),
            }),
            [_, field, filename] => Ok(FileSpec::Form {
                field: field.to_string(),
                filename: filename.to_string(),
            }),
            _ => Err(StressError::IllegalFormSpec(spec.to_string())),
        }
    }
}

/// 读取整个文件，错误中带上路径
pub fn read_file(path: &str) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| StressError::FileAccess {
        path: path.to_string(),
        source,
    })
}

/// 把文件内容放进只有一个文件字段的 multipart 表单
pub fn build_form(field: &str, filename: &str) -> Result<Form> {
    let bytes = read_file(filename)?;
    tracing::debug!(field, filename, size = bytes.len(), "built multipart form");

    let part = Part::bytes(bytes)
        .file_name(filename.to_string())
        .mime_str("application/octet-stream")?;
    Ok(Form::new().part(field.to_string(), part))
}
