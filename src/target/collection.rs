use crate::target::parser::TargetParser;
use crate::target::types::{Header, ParseResult, Target};
use bytes::Bytes;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::io::BufRead;

/// 有序的 Target 集合，顺序即发送顺序
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Targets(Vec<Target>);

impl Targets {
    /// 从按行组织的输入源读取，跳过空行和注释行，
    /// 所有 Target 使用传入的默认 body 和 header
    pub fn from_reader<R: BufRead>(
        reader: R,
        body: &Bytes,
        header: &Header,
    ) -> ParseResult<Self> {
        TargetParser::parse_reader(reader, body, header).map(Self)
    }

    /// 从已切分的行构建
    pub fn from_lines<S: AsRef<str>>(
        lines: &[S],
        body: &Bytes,
        header: &Header,
    ) -> ParseResult<Self> {
        TargetParser::parse_lines(lines, body, header).map(Self)
    }

    /// 用给定种子打乱顺序，种子相同结果相同
    pub fn shuffle(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut permutation: Vec<usize> = (0..self.0.len()).collect();
        permutation.shuffle(&mut rng);

        for (index, other) in permutation.into_iter().enumerate() {
            self.0.swap(index, other);
        }
        tracing::debug!(seed, targets = self.0.len(), "shuffled targets");
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Target> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Target> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Target] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Target> {
        self.0
    }
}

impl From<Vec<Target>> for Targets {
    fn from(targets: Vec<Target>) -> Self {
        Self(targets)
    }
}

impl IntoIterator for Targets {
    type Item = Target;
    type IntoIter = std::vec::IntoIter<Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Targets {
    type Item = &'a Target;
    type IntoIter = std::slice::Iter<'a, Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(count: usize) -> Targets {
        (0..count)
            .map(|i| Target::new("GET", format!("http://x/{}", i)))
            .collect::<Vec<_>>()
            .into()
    }

    fn urls(targets: &Targets) -> Vec<String> {
        targets.iter().map(|t| t.url.clone()).collect()
    }

    #[test]
    fn test_shuffle_same_seed_same_order() {
        let mut first = numbered(20);
        let mut second = numbered(20);
        first.shuffle(42);
        second.shuffle(42);
        assert_eq!(urls(&first), urls(&second));
    }

    #[test]
    fn test_shuffle_different_seed_different_order() {
        let mut first = numbered(20);
        let mut second = numbered(20);
        first.shuffle(1);
        second.shuffle(2);
        assert_ne!(urls(&first), urls(&second));
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let original = numbered(10);
        let mut shuffled = original.clone();
        shuffled.shuffle(7);

        let mut before = urls(&original);
        let mut after = urls(&shuffled);
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn test_shuffle_small_collections() {
        let mut empty = Targets::default();
        empty.shuffle(1);
        assert!(empty.is_empty());

        let mut single = numbered(1);
        single.shuffle(1);
        assert_eq!(single.get(0).map(|t| t.url.as_str()), Some("http://x/0"));
    }

    #[test]
    fn test_from_lines() {
        let targets = Targets::from_lines(
            &["GET http://x/a", "DELETE http://x/b"],
            &Bytes::new(),
            &Header::new(),
        )
        .unwrap();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets.get(1).map(|t| t.method.as_str()), Some("DELETE"));
    }
}
