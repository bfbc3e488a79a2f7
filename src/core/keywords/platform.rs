use super::CategoryScores;
use log::info;

/// 平台类别命中时强制写入的分数
pub const PLATFORM_OVERRIDE_SCORE: u32 = 1000;

const OVERRIDE_CATEGORIES: [&str; 2] = ["music", "gaming"];

/// 用平台声明的首个类别覆盖关键词得分
///
/// 首个类别（不区分大小写）包含 `music` 时将 `music` 置为 1000，否则包含 `gaming`
/// 时将 `gaming` 置为 1000；返回值第一项表示是否发生覆盖。
pub fn apply_platform_category_override<S: AsRef<str>>(
    categories: &[S],
    mut scores: CategoryScores,
) -> (bool, CategoryScores) {
    let Some(first) = categories.first() else {
        return (false, scores);
    };
    let declared = first.as_ref().to_lowercase();

    for category in OVERRIDE_CATEGORIES {
        if declared.contains(category) {
            info!(
                "🏷️ Platform category {:?} overrides keyword score for {}",
                first.as_ref(),
                category
            );
            scores.insert(category.to_string(), PLATFORM_OVERRIDE_SCORE);
            return (true, scores);
        }
    }

    (false, scores)
}
