use super::KeywordError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 类别 -> 关键词列表；合并时按顺序拼接，不去重
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordDictionary(BTreeMap<String, Vec<String>>);

impl KeywordDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// 解析 `{"category": ["kw", ...]}` 形式的 JSON
    pub fn from_json(raw: &str) -> Result<Self, KeywordError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn insert(&mut self, category: impl Into<String>, keywords: Vec<String>) {
        self.0.insert(category.into(), keywords);
    }

    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.0.get(category).map(Vec::as_slice)
    }

    pub fn contains_category(&self, category: &str) -> bool {
        self.0.contains_key(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V, S> FromIterator<(K, V)> for KeywordDictionary
where
    K: Into<String>,
    V: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, Vec<String>>> for KeywordDictionary {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}

/// 合并客户端关键词与内置关键词
///
/// 客户端为空时原样返回内置词典；同名类别按「客户端 + 内置」顺序拼接。
pub fn merge_keywords(
    client: Option<&KeywordDictionary>,
    static_keywords: &KeywordDictionary,
) -> KeywordDictionary {
    let Some(client) = client else {
        return static_keywords.clone();
    };

    let mut merged = client.0.clone();
    for (category, keywords) in &static_keywords.0 {
        merged
            .entry(category.clone())
            .or_default()
            .extend(keywords.iter().cloned());
    }
    KeywordDictionary(merged)
}
