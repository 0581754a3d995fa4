use crate::http::Materializer;
use crate::target::Target;
use colored::*;
use reqwest::Request;

pub enum RequestFormat {
    Compact,
    Verbose,
}

/// 把物化后的请求格式化成便于查看的文本
pub struct RequestFormatter {
    format: RequestFormat,
    color: bool,
}

impl RequestFormatter {
    pub fn new(format: RequestFormat) -> Self {
        Self {
            format,
            color: true,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn format(&self, request: &Request) -> String {
        match self.format {
            RequestFormat::Compact => self.format_compact(request),
            RequestFormat::Verbose => self.format_verbose(request),
        }
    }

    /// 物化失败时的输出
    pub fn format_error(&self, target: &Target, error: &crate::StressError) -> String {
        let line = format!("{} {} -> {}", target.method, target.url, error);
        if self.color {
            line.red().to_string()
        } else {
            line
        }
    }

    fn request_line(&self, request: &Request) -> String {
        let line = format!("{} {}", request.method(), request.url());
        if self.color {
            line.green().bold().to_string()
        } else {
            line
        }
    }

    fn body_summary(request: &Request) -> String {
        match request.body() {
            None => "Body: empty".to_string(),
            Some(body) => match body.as_bytes() {
                Some(bytes) => format!("Body: {} bytes", bytes.len()),
                None => "Body: streamed".to_string(),
            },
        }
    }

    fn format_compact(&self, request: &Request) -> String {
        let mut output = vec![self.request_line(request)];
        if let Some(host) = Materializer::host_override(request) {
            output.push(format!("   Host: {}", host));
        }
        output.join("\n")
    }

    fn format_verbose(&self, request: &Request) -> String {
        let mut output = vec![self.request_line(request)];

        for (key, value) in request.headers().iter() {
            let value_str = value.to_str().unwrap_or("<invalid utf-8>");
            let line = format!("   {}: {}", key, value_str);
            if self.color {
                output.push(line.blue().to_string());
            } else {
                output.push(line);
            }
        }

        let summary = Self::body_summary(request);
        if self.color {
            output.push(summary.cyan().to_string());
        } else {
            output.push(summary);
        }

        output.join("\n")
    }
}
