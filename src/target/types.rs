use bytes::Bytes;

/// 单个请求蓝图，解析阶段生成，物化阶段只读
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    /// HTTP 方法，解析时只检查存在与否
    pub method: String,

    /// 请求 URL，可能包含 `{RI[min-max]}` 占位符
    pub url: String,

    /// 默认请求体，所有 Target 共享同一份只读数据
    pub body: Bytes,

    /// 文件说明：原始文件路径，或 `form:filename` / `form:field:filename`
    pub file: Option<String>,

    /// 该 Target 私有的 Header 副本
    pub header: Header,
}

impl Target {
    /// 创建一个没有 body、没有 header 的 Target
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            body: Bytes::new(),
            file: None,
            header: Header::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.header.set(name, value);
        self
    }

    /// 是否需要从文件读取请求体（只有 POST 才会读取）
    pub fn uses_file_body(&self) -> bool {
        self.method == "POST" && self.file.as_deref().is_some_and(|f| !f.is_empty())
    }
}

/// 有序的 Header 集合：名称 -> 多个值
///
/// 名称比较不区分大小写，保持首次插入的顺序。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    entries: Vec<(String, Vec<String>)>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(key, _)| key.eq_ignore_ascii_case(name))
    }

    /// 设置 header，替换该名称已有的全部值
    pub fn set(&mut self, name: &str, value: &str) {
        match self.position(name) {
            Some(index) => self.entries[index] = (name.to_string(), vec![value.to_string()]),
            None => self
                .entries
                .push((name.to_string(), vec![value.to_string()])),
        }
    }

    /// 追加一个值
    pub fn add(&mut self, name: &str, value: &str) {
        match self.position(name) {
            Some(index) => self.entries[index].1.push(value.to_string()),
            None => self
                .entries
                .push((name.to_string(), vec![value.to_string()])),
        }
    }

    /// 第一个值
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).first().map(|s| s.as_str())
    }

    pub fn get_all(&self, name: &str) -> &[String] {
        match self.position(name) {
            Some(index) => &self.entries[index].1,
            None => &[],
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.position(name)
            .map(|index| self.entries.remove(index).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// 按插入顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for Header {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut header = Header::new();
        for (key, value) in iter {
            header.add(key.as_ref(), value.as_ref());
        }
        header
    }
}

/// 解析错误类型
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// 一行少于两个字段
    #[error("Invalid request format at line {line_number}: `{line}`")]
    InvalidFormat { line_number: usize, line: String },

    /// 读取目标源失败
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 解析结果类型别名
pub type ParseResult<T> = Result<T, ParseError>;
