use crate::target::types::{Header, ParseError, ParseResult, Target};
use bytes::Bytes;
use std::io::BufRead;

/// 目标描述解析器
///
/// 每行格式: `METHOD [key:value]* URL [file-spec]`，字段之间用单个空格分隔。
pub struct TargetParser;

impl TargetParser {
    /// 从按行组织的输入源解析，跳过空行和 `//` 注释行
    pub fn parse_reader<R: BufRead>(
        reader: R,
        body: &Bytes,
        header: &Header,
    ) -> ParseResult<Vec<Target>> {
        let mut reader = reader;
        let mut lines = Vec::new();
        let mut buf = Vec::new();
        let mut line_number = 0;
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_number += 1;

            // 非 UTF-8 字节替换为 U+FFFD，不中断整个解析
            let text = String::from_utf8_lossy(&buf);
            let line = text.trim();
            if line.is_empty() || Self::is_comment(line) {
                continue;
            }
            lines.push((line_number, line.to_string()));
        }

        let mut targets = Vec::with_capacity(lines.len());
        for (line_number, line) in &lines {
            if let Some(target) = Self::parse_line(line, *line_number, body, header)? {
                targets.push(target);
            }
        }

        tracing::debug!(
            lines = lines.len(),
            targets = targets.len(),
            "parsed targets from reader"
        );
        Ok(targets)
    }

    /// 从已经切分好的行解析，不做过滤
    pub fn parse_lines<S: AsRef<str>>(
        lines: &[S],
        body: &Bytes,
        header: &Header,
    ) -> ParseResult<Vec<Target>> {
        let mut targets = Vec::with_capacity(lines.len());
        for (index, line) in lines.iter().enumerate() {
            if let Some(target) = Self::parse_line(line.as_ref(), index + 1, body, header)? {
                targets.push(target);
            }
        }

        tracing::debug!(
            lines = lines.len(),
            targets = targets.len(),
            "parsed targets from lines"
        );
        Ok(targets)
    }

    /// 解析单行
    ///
    /// 没有 URL 的行返回 `Ok(None)`，直接丢弃而不是报错。
    fn parse_line(
        line: &str,
        line_number: usize,
        body: &Bytes,
        default_header: &Header,
    ) -> ParseResult<Option<Target>> {
        let parts: Vec<&str> = line.split(' ').collect();
        if parts.len() < 2 {
            return Err(ParseError::InvalidFormat {
                line_number,
                line: line.to_string(),
            });
        }

        // 每个 Target 持有独立的 header 副本
        let mut header = default_header.clone();
        let method = parts[0];

        // 第一个包含 "http" 的字段视为 URL，之前的都是 header
        let mut index = 1;
        while index < parts.len() && !parts[index].contains("http") {
            if let Some((key, value)) = Self::parse_header(parts[index]) {
                header.set(key, value);
            }
            index += 1;
        }

        let url = parts.get(index).copied().unwrap_or_default();
        let file = parts
            .get(index + 1)
            .copied()
            .filter(|f| !f.is_empty())
            .map(str::to_string);

        if url.is_empty() {
            tracing::warn!(line_number, line, "target without URL dropped");
            return Ok(None);
        }

        Ok(Some(Target {
            method: method.to_string(),
            url: url.to_string(),
            body: body.clone(),
            file,
            header,
        }))
    }

    /// 解析 `key:value`，冒号不是恰好一个或名称为空时忽略
    fn parse_header(token: &str) -> Option<(&str, &str)> {
        let mut kv = token.split(':');
        match (kv.next(), kv.next(), kv.next()) {
            (Some(key), Some(value), None) if !key.is_empty() => Some((key, value)),
            _ => None,
        }
    }

    /// 判断是否为注释行
    fn is_comment(line: &str) -> bool {
        line.starts_with("//")
    }
}
