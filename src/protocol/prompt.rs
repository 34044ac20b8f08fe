use crate::models::{FeedItem, PreferenceExample, PreferenceProfile};

/// Abstract excerpts in the examples section are clipped to this many
/// characters to keep the prompt bounded.
const EXAMPLE_ABSTRACT_CHARS: usize = 200;

/// Build the screening instruction document for one item.
///
/// Rebuilt per item — interests and examples can change between runs and
/// the item metadata differs every time, so nothing here is cached.
pub fn build_screening_prompt(profile: &PreferenceProfile, item: &FeedItem) -> String {
    let examples_section = render_examples_section(profile);

    format!(
        r#"You are an academic paper screening assistant. Determine if a paper is relevant to the researcher's interests.

## Research Interests
{interests}
{examples_section}
## Paper Information
- **Title**: {title}
- **Authors**: {authors}
- **Abstract**: {abstract_text}
- **Source**: {source}

## Instructions
1. Determine if the research FIELD matches the interests
2. Determine if the METHOD matches the interests
3. If relevant (field OR method matches), provide structured summary:
   - Problem: [research field/problem in short phrase]
   - Method: [computational/experimental methods used]
   - Data: [new dataset/resource if any, otherwise skip]
   - Highlights: [other key points, comma-separated]
4. If no abstract (title only), just list keywords
5. Learn from the researcher's liked/disliked examples if provided - they show specific preferences

## Response Format
FIELD_MATCH: [yes/no]
METHOD_MATCH: [yes/no]
SUMMARY: [structured summary or keywords, or "Not related" if neither matches]

## Example 1 (both match)
FIELD_MATCH: yes
METHOD_MATCH: yes
SUMMARY: Problem: protein structure prediction | Method: transformer, deep learning | Data: new benchmark dataset | Highlights: state-of-the-art accuracy

## Example 2 (field matches, method doesn't)
FIELD_MATCH: yes
METHOD_MATCH: no
SUMMARY: Problem: gene regulation | Method: experimental (CRISPR screen) | Highlights: novel targets identified

## Example 3 (method matches, field doesn't)
FIELD_MATCH: no
METHOD_MATCH: yes
SUMMARY: Problem: image classification | Method: CNN, deep learning | Highlights: new architecture

## Example 4 (neither matches)
FIELD_MATCH: no
METHOD_MATCH: no
SUMMARY: Not related
"#,
        interests = profile.interests,
        examples_section = examples_section,
        title = item.title,
        authors = item.authors,
        abstract_text = item.abstract_text,
        source = item.source,
    )
}

/// Render the liked/disliked examples section. Empty string when the
/// profile carries no examples — the section is omitted entirely.
fn render_examples_section(profile: &PreferenceProfile) -> String {
    if !profile.has_examples() {
        return String::new();
    }

    let mut sections = Vec::new();

    if !profile.liked.is_empty() {
        sections.push("\n## Researcher's Liked Paper Examples (screen IN papers like these)".to_string());
        for (i, ex) in profile.liked.iter().enumerate() {
            sections.push(render_example(i + 1, ex, true));
        }
    }

    if !profile.disliked.is_empty() {
        sections.push("\n## Researcher's Disliked Paper Examples (screen OUT papers like these)".to_string());
        for (i, ex) in profile.disliked.iter().enumerate() {
            sections.push(render_example(i + 1, ex, false));
        }
    }

    sections.join("\n") + "\n"
}

fn render_example(index: usize, ex: &PreferenceExample, with_abstract: bool) -> String {
    let mut parts = vec![format!("- Title: {}", ex.title)];
    if with_abstract {
        if let Some(excerpt) = &ex.abstract_excerpt {
            parts.push(format!("  Abstract: {}...", clip(excerpt, EXAMPLE_ABSTRACT_CHARS)));
        }
    }
    if let Some(reason) = &ex.reason {
        parts.push(format!("  Reason: {reason}"));
    }
    format!("{index}. {}", parts.join("\n   "))
}

/// Char-boundary-safe prefix of `text`.
fn clip(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_FEED_GROUP;

    fn sample_item() -> FeedItem {
        FeedItem {
            title: "Deep learning for variant calling".into(),
            link: "https://example.org/p1".into(),
            authors: "Poplin et al.".into(),
            abstract_text: "We present a CNN-based variant caller.".into(),
            source: "Nature Biotechnology".into(),
            feed_url: "https://example.org/rss".into(),
            feed_group: DEFAULT_FEED_GROUP.into(),
            published: None,
        }
    }

    #[test]
    fn prompt_carries_interests_and_item_metadata() {
        let profile = PreferenceProfile::new("genomics, deep learning");
        let prompt = build_screening_prompt(&profile, &sample_item());
        assert!(prompt.contains("genomics, deep learning"));
        assert!(prompt.contains("Deep learning for variant calling"));
        assert!(prompt.contains("Poplin et al."));
        assert!(prompt.contains("Nature Biotechnology"));
        assert!(prompt.contains("FIELD_MATCH: [yes/no]"));
    }

    #[test]
    fn examples_section_omitted_when_profile_has_none() {
        let profile = PreferenceProfile::new("genomics");
        let prompt = build_screening_prompt(&profile, &sample_item());
        assert!(!prompt.contains("Liked Paper Examples"));
        assert!(!prompt.contains("Disliked Paper Examples"));
    }

    #[test]
    fn liked_example_renders_title_abstract_reason() {
        let mut profile = PreferenceProfile::new("genomics");
        profile.liked.push(PreferenceExample {
            title: "AlphaFold".into(),
            abstract_excerpt: Some("Accurate structure prediction.".into()),
            reason: Some("methods I use".into()),
        });
        let prompt = build_screening_prompt(&profile, &sample_item());
        assert!(prompt.contains("Liked Paper Examples"));
        assert!(prompt.contains("- Title: AlphaFold"));
        assert!(prompt.contains("Abstract: Accurate structure prediction...."));
        assert!(prompt.contains("Reason: methods I use"));
    }

    #[test]
    fn disliked_example_renders_without_abstract() {
        let mut profile = PreferenceProfile::new("genomics");
        profile.disliked.push(PreferenceExample {
            title: "Yet another survey".into(),
            abstract_excerpt: Some("should not appear".into()),
            reason: Some("too shallow".into()),
        });
        let prompt = build_screening_prompt(&profile, &sample_item());
        assert!(prompt.contains("Disliked Paper Examples"));
        assert!(prompt.contains("- Title: Yet another survey"));
        assert!(!prompt.contains("should not appear"));
    }

    #[test]
    fn long_abstract_excerpt_is_clipped() {
        let mut profile = PreferenceProfile::new("genomics");
        profile.liked.push(PreferenceExample {
            title: "Long one".into(),
            abstract_excerpt: Some("x".repeat(500)),
            reason: None,
        });
        let prompt = build_screening_prompt(&profile, &sample_item());
        assert!(prompt.contains(&"x".repeat(200)));
        assert!(!prompt.contains(&"x".repeat(201)));
    }

    #[test]
    fn clip_respects_char_boundaries() {
        // Multibyte input must not panic mid-codepoint
        let clipped = clip("日本語のテキスト", 4);
        assert_eq!(clipped, "日本語の");
    }
}
