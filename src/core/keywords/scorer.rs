use super::{CategoryScores, KeywordDictionary, KeywordError};
use regex::Regex;

/// 预编译的关键词匹配器
///
/// 关键词按字面匹配（不区分大小写），两侧必须是非单词字符或文本首尾，
/// 因此 `java` 不会命中 `javascript`。
pub struct KeywordMatcher {
    categories: Vec<(String, Vec<Regex>)>,
}

impl KeywordMatcher {
    pub fn compile(keywords: &KeywordDictionary) -> Result<Self, KeywordError> {
        let mut categories = Vec::with_capacity(keywords.len());
        for (category, words) in keywords.iter() {
            let patterns = words
                .iter()
                .filter(|w| !w.is_empty())
                .map(|w| keyword_pattern(w))
                .collect::<Result<Vec<_>, _>>()?;
            categories.push((category.to_string(), patterns));
        }
        Ok(Self { categories })
    }

    /// 每个类别的得分 = 至少命中一次的关键词数量
    pub fn score(&self, text: &str) -> CategoryScores {
        self.categories
            .iter()
            .map(|(category, patterns)| {
                let hits = patterns.iter().filter(|re| re.is_match(text)).count();
                (category.clone(), hits as u32)
            })
            .collect()
    }
}

fn keyword_pattern(keyword: &str) -> Result<Regex, KeywordError> {
    let pattern = format!(r"(?i)(?:^|\W){}(?:\W|$)", regex::escape(keyword));
    Ok(Regex::new(&pattern)?)
}

/// 按类别关键词给文本打分
pub fn score_text(text: &str, keywords: &KeywordDictionary) -> Result<CategoryScores, KeywordError> {
    Ok(KeywordMatcher::compile(keywords)?.score(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_keywords() -> KeywordDictionary {
        KeywordDictionary::from_iter([
            (
                "music",
                vec!["music", "song", "orchestra", "rap", "rock", "classical", "pop"],
            ),
            ("coding", vec!["programming", "java", "javascript", "c#", "c++"]),
        ])
    }

    const SAMPLE_TEXT: &str = "This is a programming video about the java programming language. We will also be looking at it's similarity to C#";

    #[test]
    fn test_basic_scoring() {
        let keywords = KeywordDictionary::from_iter([
            ("music", vec!["music", "song"]),
            ("coding", vec!["programming", "java"]),
        ]);
        let scores = score_text("a programming video about the java language", &keywords).unwrap();

        assert_eq!(scores.get("music"), Some(&0));
        assert_eq!(scores.get("coding"), Some(&2));
        assert_eq!(scores.len(), 2);
    }

    #[test]
    fn test_repeated_keyword_counts_once() {
        let scores = score_text(SAMPLE_TEXT, &sample_keywords()).unwrap();
        // programming 出现两次只计 1；C# 位于文本末尾
        assert_eq!(scores["coding"], 3);
        assert_eq!(scores["music"], 0);
    }

    #[test]
    fn test_case_insensitive() {
        let keywords = sample_keywords();
        let mixed = score_text(SAMPLE_TEXT, &keywords).unwrap();
        let upper = score_text(&SAMPLE_TEXT.to_uppercase(), &keywords).unwrap();
        let lower = score_text(&SAMPLE_TEXT.to_lowercase(), &keywords).unwrap();

        assert_eq!(mixed, upper);
        assert_eq!(mixed, lower);
    }

    #[test]
    fn test_substring_does_not_match() {
        let keywords = KeywordDictionary::from_iter([("music", vec!["rap", "pop"])]);
        let scores = score_text("a trapeze act in a popular circus", &keywords).unwrap();
        assert_eq!(scores["music"], 0);

        let coding = KeywordDictionary::from_iter([("coding", vec!["java"])]);
        assert_eq!(score_text("learn javascript today", &coding).unwrap()["coding"], 0);
    }

    #[test]
    fn test_punctuation_and_text_edges_are_boundaries() {
        let keywords = KeywordDictionary::from_iter([("music", vec!["rock", "pop"])]);
        let scores = score_text("Rock, (pop)", &keywords).unwrap();
        assert_eq!(scores["music"], 2);
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let keywords = KeywordDictionary::from_iter([("coding", vec!["c++", "c#", "."])]);
        let scores = score_text("modern c++ tips", &keywords).unwrap();
        assert_eq!(scores["coding"], 1);

        let none = score_text("ccc", &keywords).unwrap();
        assert_eq!(none["coding"], 0);
    }

    #[test]
    fn test_empty_keywords_and_categories() {
        let keywords = KeywordDictionary::from_iter([
            ("empty", Vec::<&str>::new()),
            ("blank", vec![""]),
        ]);
        let scores = score_text("anything at all", &keywords).unwrap();
        assert_eq!(scores["empty"], 0);
        assert_eq!(scores["blank"], 0);
    }

    #[test]
    fn test_matcher_is_reusable() {
        let matcher = KeywordMatcher::compile(&sample_keywords()).unwrap();
        assert_eq!(matcher.score("a rock song")["music"], 2);
        assert_eq!(matcher.score("java")["coding"], 1);
    }

    proptest! {
        #[test]
        fn prop_score_never_exceeds_keyword_count(
            text in "[a-zA-Z ,.#+]{0,80}",
            words in proptest::collection::vec("[a-z]{1,6}", 1..8),
        ) {
            let keywords = KeywordDictionary::from_iter([("cat", words.clone())]);
            let scores = score_text(&text, &keywords).unwrap();
            prop_assert!(scores["cat"] as usize <= words.len());
        }

        #[test]
        fn prop_case_does_not_change_scores(text in "[a-zA-Z #+.,]{0,80}") {
            let keywords = sample_keywords();
            let base = score_text(&text, &keywords).unwrap();
            prop_assert_eq!(&base, &score_text(&text.to_uppercase(), &keywords).unwrap());
            prop_assert_eq!(&base, &score_text(&text.to_lowercase(), &keywords).unwrap());
        }

        #[test]
        fn prop_embedded_keyword_never_matches(prefix in "[a-z]{1,5}", suffix in "[a-z]{1,5}") {
            let keywords = KeywordDictionary::from_iter([("coding", vec!["java"])]);
            let text = format!("{}java{}", prefix, suffix);
            prop_assert_eq!(score_text(&text, &keywords).unwrap()["coding"], 0);
        }
    }
}
