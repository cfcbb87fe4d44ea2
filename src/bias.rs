// src/bias.rs
//! Political bias scoring: keyword-frequency heuristic over article text.
//!
//! The score is a continuous estimate in [-100, 100] (negative = left,
//! positive = right), derived purely from fixed vocabularies. It is a
//! deterministic heuristic, not a learned model.

use serde::Serialize;

/// Left-leaning indicators.
pub const LEFT_KEYWORDS: &[&str] = &[
    // Social issues
    "progressive",
    "liberal",
    "equality",
    "diversity",
    "inclusion",
    "social justice",
    "climate action",
    "renewable energy",
    "environmental protection",
    "workers' rights",
    "labor union",
    "minimum wage",
    "universal healthcare",
    "public education",
    "welfare",
    "social programs",
    "redistribution",
    // Economic
    "regulate corporations",
    "tax the rich",
    "wealth tax",
    "corporate accountability",
    "public sector",
    "nationalize",
    "subsidize",
    "government intervention",
    // Political terms
    "congress party",
    "left alliance",
    "secular",
    "minority rights",
    "affirmative action",
    "reservation",
    "social welfare",
];

/// Right-leaning indicators.
pub const RIGHT_KEYWORDS: &[&str] = &[
    // Economic
    "free market",
    "privatization",
    "deregulation",
    "tax cuts",
    "business friendly",
    "entrepreneurship",
    "private sector",
    "capitalism",
    "economic growth",
    "fiscal responsibility",
    "reduce spending",
    "lower taxes",
    // Social/Cultural
    "traditional values",
    "national security",
    "strong borders",
    "law and order",
    "military strength",
    "patriotism",
    "cultural heritage",
    "national pride",
    // Political terms
    "bjp",
    "hindutva",
    "nationalism",
    "hindu rashtra",
    "anti-corruption",
    "development",
    "infrastructure",
    "make in india",
];

/// Balanced-reporting markers; matches dampen the score toward center.
pub const NEUTRAL_KEYWORDS: &[&str] = &[
    "according to",
    "sources say",
    "reports indicate",
    "data shows",
    "experts say",
    "analysis reveals",
    "study finds",
    "research shows",
    "both sides",
    "debate",
    "discussion",
    "various perspectives",
];

/// Emotionally loaded left-leaning language; weighted double.
pub const EMOTIONAL_LEFT: &[&str] = &[
    "oppression",
    "exploitation",
    "inequality",
    "injustice",
    "discrimination",
    "marginalized",
    "vulnerable",
    "suffering",
    "crisis",
    "urgent action needed",
];

/// Emotionally loaded right-leaning language; weighted double.
pub const EMOTIONAL_RIGHT: &[&str] = &[
    "threat",
    "danger",
    "invasion",
    "illegal",
    "radical",
    "extremist",
    "anti-national",
    "terrorist",
    "sedition",
    "betrayal",
    "attack on culture",
];

/// Discrete bias label derived from the continuous score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BiasLabel {
    Left,
    CenterLeft,
    Center,
    CenterRight,
    Right,
}

impl BiasLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BiasLabel::Left => "Left",
            BiasLabel::CenterLeft => "Center-Left",
            BiasLabel::Center => "Center",
            BiasLabel::CenterRight => "Center-Right",
            BiasLabel::Right => "Right",
        }
    }
}

impl std::fmt::Display for BiasLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation breakdown of a bias score into left/center/right shares.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BiasBreakdown {
    pub left: f64,
    pub center: f64,
    pub right: f64,
}

fn count_matches(text: &str, keywords: &[&str]) -> usize {
    // Each keyword contributes at most 1, regardless of repeats.
    keywords.iter().filter(|kw| text.contains(*kw)).count()
}

/// Score an article's political lean from its title and summary.
///
/// Emotional keywords weigh double; neutral-reporting markers pull the result
/// toward center by up to 30%. Zero matches on both sides is exactly 0.0.
/// The result is always within [-100, 100].
pub fn score(title: &str, summary: &str) -> f64 {
    let text = format!("{} {}", title, summary).to_lowercase();

    let left_total =
        count_matches(&text, LEFT_KEYWORDS) + 2 * count_matches(&text, EMOTIONAL_LEFT);
    let right_total =
        count_matches(&text, RIGHT_KEYWORDS) + 2 * count_matches(&text, EMOTIONAL_RIGHT);

    if left_total == 0 && right_total == 0 {
        return 0.0;
    }

    let total = (left_total + right_total) as f64;
    let mut bias = (right_total as f64 - left_total as f64) / total * 100.0;

    let neutral_count = count_matches(&text, NEUTRAL_KEYWORDS);
    if neutral_count > 0 {
        let reduction = (neutral_count as f64 * 0.1).min(0.3);
        bias *= 1.0 - reduction;
    }

    bias.clamp(-100.0, 100.0)
}

/// Map a score to its label. Thresholds are part of the observable contract:
/// `< -30` Left, `[-30, -10)` Center-Left, `[-10, 10]` Center,
/// `(10, 30]` Center-Right, `> 30` Right.
pub fn label(bias: f64) -> BiasLabel {
    if bias < -30.0 {
        BiasLabel::Left
    } else if bias < -10.0 {
        BiasLabel::CenterLeft
    } else if bias <= 10.0 {
        BiasLabel::Center
    } else if bias <= 30.0 {
        BiasLabel::CenterRight
    } else {
        BiasLabel::Right
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn clamp_pct(x: f64) -> f64 {
    round1(x.clamp(0.0, 100.0))
}

/// Piecewise-linear left/center/right percentage view of a bias score.
/// Bands: left-leaning below -20, right-leaning above 20, center between.
/// Each component is clamped to [0, 100] and rounded to one decimal.
pub fn percentage_breakdown(bias: f64) -> BiasBreakdown {
    let (left, center, right) = if bias < -20.0 {
        let left = 50.0 + bias.abs() / 2.0;
        let right = (10.0 - bias.abs() / 10.0).max(0.0);
        (left, 100.0 - left - right, right)
    } else if bias > 20.0 {
        let right = 50.0 + bias / 2.0;
        let left = (10.0 - bias / 10.0).max(0.0);
        (left, 100.0 - left - right, right)
    } else {
        let center = 60.0 + (20.0 - bias.abs());
        if bias < 0.0 {
            let left = 30.0 + bias.abs();
            (left, center, 100.0 - center - left)
        } else {
            let right = 30.0 + bias;
            (100.0 - center - right, center, right)
        }
    };

    BiasBreakdown {
        left: clamp_pct(left),
        center: clamp_pct(center),
        right: clamp_pct(right),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_matches_scores_exact_center() {
        assert_eq!(score("", ""), 0.0);
        assert_eq!(score("Quiet afternoon in the village", ""), 0.0);
        assert_eq!(label(0.0), BiasLabel::Center);
    }

    #[test]
    fn score_stays_in_range() {
        let samples = [
            ("BJP announces tax cuts for business friendly reforms", ""),
            ("Workers' rights and social justice", "urgent action needed"),
            ("threat danger invasion illegal radical extremist", "sedition"),
            ("equality diversity inclusion welfare", "oppression injustice"),
        ];
        for (title, summary) in samples {
            let s = score(title, summary);
            assert!((-100.0..=100.0).contains(&s), "out of range: {s}");
        }
    }

    #[test]
    fn all_right_keywords_score_plus_hundred() {
        // "bjp", "tax cuts", "business friendly" hit RIGHT with no LEFT match.
        let s = score("BJP announces tax cuts for business friendly reforms", "");
        assert_eq!(s, 100.0);
        assert_eq!(label(s), BiasLabel::Right);
    }

    #[test]
    fn all_left_keywords_score_minus_hundred() {
        let s = score("Labor union demands minimum wage hike", "");
        assert_eq!(s, -100.0);
        assert_eq!(label(s), BiasLabel::Left);
    }

    #[test]
    fn emotional_keywords_weigh_double() {
        // 1 plain left ("welfare") vs 1 emotional right ("threat", weight 2):
        // (2 - 1) / 3 * 100.
        let s = score("welfare threat", "");
        assert!((s - 100.0 / 3.0).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn neutral_markers_dampen_toward_center() {
        // One right keyword, two neutral markers: 100 * (1 - 0.2).
        let s = score("tax cuts ahead", "according to experts say");
        assert!((s - 80.0).abs() < 1e-9, "got {s}");

        // Four neutral markers cap the reduction at 0.3.
        let s = score(
            "tax cuts ahead",
            "according to experts say, data shows and reports indicate",
        );
        assert!((s - 70.0).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn label_boundaries_are_exact() {
        assert_eq!(label(-30.0), BiasLabel::CenterLeft);
        assert_eq!(label(-30.0001), BiasLabel::Left);
        assert_eq!(label(-10.0), BiasLabel::Center);
        assert_eq!(label(-10.0001), BiasLabel::CenterLeft);
        assert_eq!(label(10.0), BiasLabel::Center);
        assert_eq!(label(10.0001), BiasLabel::CenterRight);
        assert_eq!(label(30.0), BiasLabel::CenterRight);
        assert_eq!(label(30.0001), BiasLabel::Right);
    }

    #[test]
    fn label_display_matches_contract_strings() {
        assert_eq!(BiasLabel::CenterLeft.to_string(), "Center-Left");
        assert_eq!(BiasLabel::CenterRight.to_string(), "Center-Right");
        assert_eq!(BiasLabel::Center.to_string(), "Center");
    }

    #[test]
    fn breakdown_components_stay_clamped() {
        for bias in [-100.0, -50.0, -20.5, -20.0, -5.0, 0.0, 5.0, 20.0, 33.3, 100.0] {
            let b = percentage_breakdown(bias);
            for part in [b.left, b.center, b.right] {
                assert!((0.0..=100.0).contains(&part), "bias {bias}: part {part}");
            }
        }
    }

    #[test]
    fn breakdown_extremes() {
        let b = percentage_breakdown(100.0);
        assert_eq!(b.right, 100.0);
        assert_eq!(b.left, 0.0);
        assert_eq!(b.center, 0.0);

        let b = percentage_breakdown(-100.0);
        assert_eq!(b.left, 100.0);
        assert_eq!(b.right, 0.0);
        assert_eq!(b.center, 0.0);
    }
}
