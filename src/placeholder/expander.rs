use rand::Rng;
use regex::bytes::Regex;
use std::sync::OnceLock;

/// 随机整数占位符 `{RI[min-max]}` 的展开器
///
/// 每次展开都会重新采样，同一个占位符重复出现时各自独立取值。
/// 边界可以为负数（`{RI[-5--1]}`），不是合法整数时按 0 处理，
/// min > max 时替换为 0，都不会报错。
pub struct Expander;

impl Expander {
    /// 占位符前缀，用于快速判断
    pub const PREFIX: &'static str = "{RI[";

    fn token_regex() -> &'static Regex {
        static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
        TOKEN_REGEX.get_or_init(|| {
            Regex::new(r"\{RI\[(-?[^\]\-]*)-(-?[^\]]*)\]\}").expect("placeholder pattern is valid")
        })
    }

    /// 使用当前线程的随机源展开所有占位符
    pub fn expand(input: &[u8]) -> Vec<u8> {
        Self::expand_with(input, &mut rand::rng())
    }

    /// 使用调用方提供的随机源展开所有占位符
    ///
    /// 每轮只替换第一个匹配，然后从头重新扫描，直到没有占位符为止。
    /// 每轮替换都会消掉一个 `{RI[`，替换结果只含数字和负号，所以一定会终止。
    pub fn expand_with<R: Rng + ?Sized>(input: &[u8], rng: &mut R) -> Vec<u8> {
        let re = Self::token_regex();
        let mut output = input.to_vec();

        loop {
            let found = re.captures(&output).and_then(|caps| {
                let whole = caps.get(0)?;
                Some((
                    whole.range(),
                    Self::parse_bound(&caps[1]),
                    Self::parse_bound(&caps[2]),
                ))
            });
            let Some((range, min, max)) = found else {
                return output;
            };

            let value = Self::sample(min, max, rng);
            tracing::trace!(min, max, value, "expanded random placeholder");
            output.splice(range, value.to_string().into_bytes());
        }
    }

    /// 字符串版本的 [`Expander::expand`]
    pub fn expand_str(input: &str) -> String {
        Self::expand_str_with(input, &mut rand::rng())
    }

    pub fn expand_str_with<R: Rng + ?Sized>(input: &str, rng: &mut R) -> String {
        if !Self::contains_placeholder(input.as_bytes()) {
            return input.to_string();
        }
        let expanded = Self::expand_with(input.as_bytes(), rng);
        // 替换内容只有 ASCII 数字和负号，合法 UTF-8 输入展开后仍然合法
        match String::from_utf8(expanded) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }
    }

    /// 判断输入中是否还有占位符
    pub fn contains_placeholder(input: &[u8]) -> bool {
        Self::token_regex().is_match(input)
    }

    fn parse_bound(raw: &[u8]) -> i64 {
        std::str::from_utf8(raw)
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(0)
    }

    fn sample<R: Rng + ?Sized>(min: i64, max: i64, rng: &mut R) -> i64 {
        if min > max {
            return 0;
        }
        rng.random_range(min..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn as_number(bytes: &[u8]) -> i64 {
        std::str::from_utf8(bytes).unwrap().parse().unwrap()
    }

    #[test]
    fn test_expand_within_range() {
        for _ in 0..200 {
            let output = Expander::expand(b"{RI[3-7]}");
            let value = as_number(&output);
            assert!((3..=7).contains(&value), "out of range: {}", value);
        }
    }

    #[test]
    fn test_expand_single_value_range() {
        assert_eq!(Expander::expand(b"http://x/{RI[1-1]}"), b"http://x/1".to_vec());
    }

    #[test]
    fn test_expand_multiple_placeholders() {
        let output = Expander::expand_str("/a/{RI[1-1]}/b/{RI[2-2]}?c={RI[10-10]}");
        assert_eq!(output, "/a/1/b/2?c=10");
    }

    #[test]
    fn test_expand_removes_every_token() {
        let input = "{RI[0-9]}{RI[0-9]}-{RI[100-200]}/{RI[0-9]}";
        let output = Expander::expand_str(input);
        assert!(!output.contains(Expander::PREFIX));
        assert!(!Expander::contains_placeholder(output.as_bytes()));
    }

    #[test]
    fn test_repeated_token_sampled_independently() {
        let input = "{RI[0-1000000]},".repeat(20);
        let output = Expander::expand_str(&input);
        let values: Vec<&str> = output.trim_end_matches(',').split(',').collect();
        assert_eq!(values.len(), 20);
        assert!(values.iter().any(|v| *v != values[0]));
    }

    #[test]
    fn test_malformed_bounds_default_to_zero() {
        assert_eq!(Expander::expand_str("id={RI[a-b]}"), "id=0");
        assert_eq!(Expander::expand_str("id={RI[-]}"), "id=0");
        // 只有一边非法时，非法的一边按 0 处理
        assert_eq!(Expander::expand_str("id={RI[x-0]}"), "id=0");
    }

    #[test]
    fn test_overflowing_bounds_default_to_zero() {
        assert_eq!(
            Expander::expand_str("{RI[99999999999999999999-99999999999999999999]}"),
            "0"
        );
    }

    #[test]
    fn test_negative_bounds_within_range() {
        for _ in 0..200 {
            let value = as_number(&Expander::expand(b"{RI[-5--1]}"));
            assert!((-5..=-1).contains(&value), "out of range: {}", value);
        }
    }

    #[test]
    fn test_negative_min_positive_max() {
        let values: Vec<i64> = (0..200)
            .map(|_| as_number(&Expander::expand(b"{RI[-3-3]}")))
            .collect();
        assert!(values.iter().all(|v| (-3..=3).contains(v)));
        assert!(values.iter().any(|v| *v != 0));
        assert!(values.iter().any(|v| *v < 0));
    }

    #[test]
    fn test_inverted_bounds_do_not_panic() {
        assert_eq!(Expander::expand_str("{RI[9-1]}"), "0");
    }

    #[test]
    fn test_text_without_placeholder_is_unchanged() {
        let input = "http://example.com/{RI}/[1-2]";
        assert_eq!(Expander::expand_str(input), input);
        assert_eq!(Expander::expand(b""), Vec::<u8>::new());
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let input = b"{RI[0-1000]}-{RI[0-1000]}";
        let first = Expander::expand_with(input, &mut StdRng::seed_from_u64(7));
        let second = Expander::expand_with(input, &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
    }

    #[test]
    fn test_non_utf8_input_is_preserved() {
        let input = [0xff, b'{', b'R', b'I', b'[', b'4', b'-', b'4', b']', b'}', 0xfe];
        assert_eq!(Expander::expand(&input), vec![0xff, b'4', 0xfe]);
    }
}
