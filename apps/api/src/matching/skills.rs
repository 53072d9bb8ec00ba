//! Skill extraction against the fixed vocabulary.

use std::collections::BTreeSet;

/// Closed list of recognized skill keywords. All entries lowercase.
pub const SKILL_VOCABULARY: &[&str] = &[
    "python",
    "java",
    "c++",
    "javascript",
    "sql",
    "html",
    "css",
    "machine learning",
    "deep learning",
    "tensorflow",
    "keras",
    "nlp",
    "cloud",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "git",
    "linux",
    "data analysis",
    "pandas",
    "numpy",
    "matplotlib",
    "cybersecurity",
    "firewall",
    "vulnerability",
    "penetration testing",
];

/// Returns the set of vocabulary skills present in `text`.
///
/// Each vocabulary entry is matched as a whole-word-bounded substring of the
/// lowercased text, so multi-word entries like "machine learning" are found
/// across internal whitespace. `+` and `#` count as word characters, which
/// keeps "c++" a single unit and stops "java" from firing inside
/// "javascript". No fuzzy matching, no stemming.
pub fn extract_skills(text: &str) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| contains_word(&lower, skill))
        .map(|skill| (*skill).to_string())
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '+' || c == '#'
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, matched)| {
        let end = start + matched.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !is_word_char(c));
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !is_word_char(c));
        before_ok && after_ok
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(skills: &[&str]) -> BTreeSet<String> {
        skills.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extracts_known_skills() {
        let skills = extract_skills("I know Python and AWS");
        assert_eq!(skills, set(&["aws", "python"]));
    }

    #[test]
    fn test_extraction_is_case_insensitive() {
        let skills = extract_skills("PYTHON, Docker and KuBeRnEtEs");
        assert_eq!(skills, set(&["docker", "kubernetes", "python"]));
    }

    #[test]
    fn test_multi_word_skills_are_detected() {
        let skills = extract_skills("hands-on machine learning and data analysis work");
        assert_eq!(skills, set(&["data analysis", "machine learning"]));
    }

    #[test]
    fn test_java_does_not_match_inside_javascript() {
        let skills = extract_skills("expert in javascript");
        assert_eq!(skills, set(&["javascript"]));
    }

    #[test]
    fn test_cpp_matches_as_a_unit() {
        let skills = extract_skills("systems work in C++ and Linux");
        assert_eq!(skills, set(&["c++", "linux"]));
        assert!(extract_skills("c+ only").is_empty());
    }

    #[test]
    fn test_duplicates_collapse() {
        let skills = extract_skills("python python python");
        assert_eq!(skills, set(&["python"]));
    }

    #[test]
    fn test_idempotent() {
        let text = "Python, SQL and penetration testing on AWS";
        let first = extract_skills(text);
        let joined = first.iter().cloned().collect::<Vec<_>>().join(" ");
        assert_eq!(extract_skills(&joined), first);
        assert_eq!(extract_skills(text), first);
    }

    #[test]
    fn test_no_skills_in_unrelated_text() {
        assert!(extract_skills("I enjoy gardening and cooking").is_empty());
        assert!(extract_skills("").is_empty());
    }
}
