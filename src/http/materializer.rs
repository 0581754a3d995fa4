use crate::http::body::{self, FileSpec};
use crate::placeholder::Expander;
use crate::target::Target;
use crate::{Result, StressError};
use rand::Rng;
use reqwest::header::{CONTENT_LENGTH, HOST, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Method, Request, Url};

/// 把 Target 物化为可以直接发送的请求
///
/// 只读借用 Target，占位符的展开结果只存在于生成的请求里，
/// 因此同一个 Target 每次物化都会得到新的随机值。
/// 可以 clone 后在多个线程中同时使用。
#[derive(Clone, Default)]
pub struct Materializer {
    inner: reqwest::Client,
}

impl Materializer {
    /// 固定的客户端标识
    pub const USER_AGENT: &'static str = "stress 1.0";

    pub fn new() -> Self {
        Self::default()
    }

    /// 使用调用方配置好的 client（连接池、超时等由调用方决定）
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.inner
    }

    pub fn materialize(&self, target: &Target) -> Result<Request> {
        self.materialize_with(target, &mut rand::rng())
    }

    /// 使用指定随机源物化
    pub fn materialize_with<R: Rng + ?Sized>(
        &self,
        target: &Target,
        rng: &mut R,
    ) -> Result<Request> {
        // 1. 展开 URL 中的占位符
        let url_raw = Expander::expand_str_with(&target.url, rng);
        let method = Method::from_bytes(target.method.as_bytes())
            .map_err(|_| StressError::InvalidMethod(target.method.clone()))?;
        let url = Url::parse(&url_raw).map_err(|source| StressError::InvalidUrl {
            url: url_raw.clone(),
            source,
        })?;

        let mut builder = self.inner.request(method, url);

        // 2. POST 且指定了文件：form 上传或原始文件
        if let Some(file) = target.file.as_deref().filter(|_| target.uses_file_body()) {
            let spec = Expander::expand_str_with(file, rng);
            builder = match FileSpec::parse(&spec)? {
                FileSpec::Form { field, filename } => {
                    builder.multipart(body::build_form(&field, &filename)?)
                }
                FileSpec::Raw { path } => {
                    let bytes = body::read_file(&path)?;
                    builder.header(CONTENT_LENGTH, bytes.len()).body(bytes)
                }
            };
        } else if !target.body.is_empty() {
            // 3. 默认 body
            builder = builder.body(target.body.clone());
        }

        let mut request = builder.build()?;

        // 4. 复制 header，每个值单独展开占位符，覆盖之前设置的同名 header
        for (name, values) in target.header.iter() {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| StressError::InvalidHeader {
                    name: name.to_string(),
                    message: e.to_string(),
                })?;

            let headers = request.headers_mut();
            headers.remove(&header_name);
            for value in values {
                let expanded = Expander::expand_str_with(value, rng);
                let header_value =
                    HeaderValue::from_str(&expanded).map_err(|e| StressError::InvalidHeader {
                        name: name.to_string(),
                        message: e.to_string(),
                    })?;
                headers.append(header_name.clone(), header_value);
            }
        }

        // 5. 固定的 User-Agent
        request
            .headers_mut()
            .insert(USER_AGENT, HeaderValue::from_static(Self::USER_AGENT));

        tracing::debug!(
            method = %request.method(),
            url = %request.url(),
            host = Self::host_override(&request),
            "materialized target"
        );
        Ok(request)
    }

    /// 显式指定的 Host header，发送时代替 URL 中的主机名
    pub fn host_override(request: &Request) -> Option<&str> {
        request
            .headers()
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .filter(|host| !host.is_empty())
    }
}
