use super::common::{ContentPlatform, EngagementTier};
use crate::error::{GenerationError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const IDEAS_PER_REQUEST: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentIdea {
    pub title: String,
    pub description: String,
    pub platform: ContentPlatform,
    pub estimated_engagement: EngagementTier,
    pub script: Option<String>,
    pub hashtags: Option<Vec<String>>,
}

impl ContentIdea {
    /// Text placed on the clipboard by the copy action.
    pub fn clipboard_text(&self) -> String {
        format!(
            "{}\n\n{}",
            self.title,
            self.script.as_deref().unwrap_or_default()
        )
    }

    pub fn hashtag_line(&self) -> String {
        self.hashtags
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|tag| format!("#{}", tag))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Shape of a single idea as the model returns it, before normalization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIdea {
    title: Option<String>,
    description: Option<String>,
    platform: Option<String>,
    estimated_engagement: Option<String>,
    script: Option<String>,
    hashtags: Option<Vec<String>>,
}

/// JSON schema the model's output is constrained to.
pub fn idea_response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "description": { "type": "STRING" },
                "platform": { "type": "STRING" },
                "estimatedEngagement": {
                    "type": "STRING",
                    "enum": ["Low", "Medium", "High"]
                },
                "script": { "type": "STRING" },
                "hashtags": { "type": "ARRAY", "items": { "type": "STRING" } }
            },
            "required": ["title", "description", "estimatedEngagement"]
        }
    })
}

pub fn idea_prompt(niche: &str, platform: ContentPlatform) -> String {
    format!(
        "Generate {} viral content ideas for a {} creator on {}. \
         Include a title, a short description, estimated engagement score (Low/Medium/High), \
         a short script outline, and 5 relevant hashtags.",
        IDEAS_PER_REQUEST, niche, platform
    )
}

/// Parses the model's JSON text into exactly [`IDEAS_PER_REQUEST`] ideas.
///
/// Extra records are dropped. Fewer records, or any record missing a title or
/// description, is a parse failure. An unrecognized platform falls back to the
/// one that was requested.
pub fn parse_ideas(text: &str, requested: ContentPlatform) -> Result<Vec<ContentIdea>> {
    let raw: Vec<RawIdea> = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| GenerationError::Parse(format!("ideas are not a JSON array: {}", e)))?;

    if raw.len() < IDEAS_PER_REQUEST {
        return Err(GenerationError::Parse(format!(
            "expected {} ideas, got {}",
            IDEAS_PER_REQUEST,
            raw.len()
        )));
    }

    raw.into_iter()
        .take(IDEAS_PER_REQUEST)
        .enumerate()
        .map(|(i, idea)| normalize(i, idea, requested))
        .collect()
}

fn normalize(index: usize, raw: RawIdea, requested: ContentPlatform) -> Result<ContentIdea> {
    let title = non_empty(raw.title)
        .ok_or_else(|| GenerationError::Parse(format!("idea {} has no title", index)))?;
    let description = non_empty(raw.description)
        .ok_or_else(|| GenerationError::Parse(format!("idea {} has no description", index)))?;

    let platform = raw
        .platform
        .as_deref()
        .and_then(|p| p.parse().ok())
        .unwrap_or(requested);

    let estimated_engagement = raw
        .estimated_engagement
        .as_deref()
        .ok_or_else(|| GenerationError::Parse(format!("idea {} has no engagement estimate", index)))?
        .parse::<EngagementTier>()
        .map_err(GenerationError::Parse)?;

    let hashtags = raw.hashtags.map(|tags| {
        tags.into_iter()
            .map(|t| t.trim().trim_start_matches('#').to_string())
            .filter(|t| !t.is_empty())
            .collect()
    });

    Ok(ContentIdea {
        title,
        description,
        platform,
        estimated_engagement,
        script: non_empty(raw.script),
        hashtags,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// Models occasionally wrap JSON in a markdown fence even with a JSON mime type.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(count: usize) -> String {
        let ideas: Vec<Value> = (0..count)
            .map(|i| {
                json!({
                    "title": format!("Idea {}", i),
                    "description": "Unbox the new phone in 30 seconds",
                    "platform": "TikTok",
                    "estimatedEngagement": "High",
                    "script": "Hook, reveal, verdict",
                    "hashtags": ["#tech", "unboxing"]
                })
            })
            .collect();
        Value::Array(ideas).to_string()
    }

    #[test]
    fn test_parse_three_ideas() {
        let ideas = parse_ideas(&sample(3), ContentPlatform::Instagram).unwrap();
        assert_eq!(ideas.len(), 3);
        assert_eq!(ideas[0].platform, ContentPlatform::TikTok);
        assert_eq!(ideas[0].estimated_engagement, EngagementTier::High);
        assert_eq!(
            ideas[0].hashtags.as_deref(),
            Some(&["tech".to_string(), "unboxing".to_string()][..])
        );
        assert_eq!(ideas[1].hashtag_line(), "#tech #unboxing");
    }

    #[test]
    fn test_extra_ideas_are_dropped() {
        let ideas = parse_ideas(&sample(5), ContentPlatform::Instagram).unwrap();
        assert_eq!(ideas.len(), 3);
    }

    #[test]
    fn test_too_few_ideas_is_parse_error() {
        let err = parse_ideas(&sample(2), ContentPlatform::Instagram).unwrap_err();
        assert!(matches!(err, GenerationError::Parse(_)));
    }

    #[test]
    fn test_missing_title_is_parse_error() {
        let text = json!([
            {"title": "", "description": "d", "estimatedEngagement": "Low"},
            {"title": "b", "description": "d", "estimatedEngagement": "Low"},
            {"title": "c", "description": "d", "estimatedEngagement": "Low"}
        ])
        .to_string();
        assert!(matches!(
            parse_ideas(&text, ContentPlatform::YouTube),
            Err(GenerationError::Parse(_))
        ));
    }

    #[test]
    fn test_not_json_is_parse_error() {
        assert!(matches!(
            parse_ideas("Here are some ideas!", ContentPlatform::YouTube),
            Err(GenerationError::Parse(_))
        ));
    }

    #[test]
    fn test_unknown_platform_falls_back_to_requested() {
        let text = json!([
            {"title": "a", "description": "d", "platform": "Threads", "estimatedEngagement": "Medium"},
            {"title": "b", "description": "d", "estimatedEngagement": "Medium"},
            {"title": "c", "description": "d", "estimatedEngagement": "Medium"}
        ])
        .to_string();
        let ideas = parse_ideas(&text, ContentPlatform::YouTube).unwrap();
        assert!(ideas.iter().all(|i| i.platform == ContentPlatform::YouTube));
        assert!(ideas[0].script.is_none());
        assert_eq!(ideas[0].clipboard_text(), "a\n\n");
    }

    #[test]
    fn test_fenced_json_is_accepted() {
        let text = format!("```json\n{}\n```", sample(3));
        assert_eq!(parse_ideas(&text, ContentPlatform::TikTok).unwrap().len(), 3);
    }

    #[test]
    fn test_prompt_mentions_niche_and_platform() {
        let prompt = idea_prompt("Fitness", ContentPlatform::YouTube);
        assert!(prompt.contains("3 viral content ideas for a Fitness creator on YouTube"));
    }
}
