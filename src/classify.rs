// src/classify.rs
//! Topic classifier: fixed keyword taxonomy, substring-count scoring.

/// Ordered taxonomy. Declaration order is the tie-break rule: when two
/// categories match the same number of keywords, the one listed first wins.
pub const TAXONOMY: &[(&str, &[&str])] = &[
    (
        "Politics",
        &[
            "election",
            "government",
            "minister",
            "parliament",
            "political",
            "party",
            "bjp",
            "congress",
            "vote",
            "policy",
            "law",
            "supreme court",
            "president",
            "prime minister",
        ],
    ),
    (
        "Business",
        &[
            "business",
            "economy",
            "market",
            "stock",
            "company",
            "corporate",
            "trade",
            "finance",
            "bank",
            "rupee",
            "gdp",
            "industry",
            "startup",
            "investment",
        ],
    ),
    (
        "Technology",
        &[
            "technology",
            "tech",
            "ai",
            "artificial intelligence",
            "software",
            "app",
            "digital",
            "internet",
            "cyber",
            "smartphone",
            "computer",
            "innovation",
            "startup",
        ],
    ),
    (
        "Health",
        &[
            "health",
            "medical",
            "hospital",
            "doctor",
            "disease",
            "covid",
            "vaccine",
            "medicine",
            "patient",
            "treatment",
            "healthcare",
        ],
    ),
    (
        "Environment",
        &[
            "environment",
            "climate",
            "pollution",
            "green",
            "renewable",
            "carbon",
            "weather",
            "forest",
            "wildlife",
            "conservation",
        ],
    ),
    (
        "Sports",
        &[
            "cricket",
            "football",
            "sports",
            "match",
            "player",
            "team",
            "tournament",
            "olympics",
            "ipl",
            "fifa",
            "championship",
        ],
    ),
    (
        "Entertainment",
        &[
            "film",
            "movie",
            "actor",
            "actress",
            "bollywood",
            "music",
            "celebrity",
            "entertainment",
            "show",
            "series",
            "netflix",
        ],
    ),
];

/// Fallback category when no keyword from any set matches.
pub const GENERAL: &str = "General";

/// Categorize an article from its title and summary.
///
/// Counts, per category, how many of its keywords occur as substrings of the
/// lowercased `title + " " + summary` text (each keyword counts once no
/// matter how often it repeats). The category with the strictly highest count
/// wins; an all-zero result is "General". Total over any input, including the
/// empty string.
pub fn categorize(title: &str, summary: &str) -> &'static str {
    let text = format!("{} {}", title, summary).to_lowercase();

    let mut best: Option<(&'static str, usize)> = None;
    for (category, keywords) in TAXONOMY {
        let count = keywords.iter().filter(|kw| text.contains(*kw)).count();
        if count > 0 && best.map_or(true, |(_, c)| count > c) {
            best = Some((category, count));
        }
    }

    best.map_or(GENERAL, |(category, _)| category)
}
