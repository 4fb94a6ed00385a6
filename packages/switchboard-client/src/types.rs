//! Wire types for the switchboard backend API.
//!
//! Field names mirror the backend JSON (camelCase). A few fields never
//! travel on the wire and are computed client-side; they are marked
//! `#[serde(skip)]`.

use serde::{Deserialize, Serialize};

/// Media type and language metadata attached to a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Backend marker for resources that are not plain uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecialResourceType {
    DictionaryResource,
    ExtractedText,
}

/// One member of an archive resource, as listed by the outline endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineEntry {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub profile: Option<Profile>,
    /// Client-side selection flag; never sent on the wire.
    #[serde(skip)]
    pub checked: bool,
}

/// A stored resource as described by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceInfo {
    pub id: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub file_length: Option<u64>,
    /// Link into the backend's storage space. May come back path-absolute.
    #[serde(default)]
    pub local_link: Option<String>,
    /// The link the resource was fetched from, when it was pasted.
    #[serde(default)]
    pub original_link: Option<String>,
    /// Inline preview of the file content, capped by the backend.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub content_is_incomplete: bool,
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub outline: Option<Vec<OutlineEntry>>,
    #[serde(default)]
    pub outline_is_incomplete: bool,
    /// Id of the archive this resource was promoted from.
    #[serde(rename = "sourceID", default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub source_entry_name: Option<String>,
    /// True for archives whose entries were promoted to resources.
    #[serde(default)]
    pub is_source: bool,
    #[serde(default)]
    pub special_resource_type: Option<SpecialResourceType>,
}

impl ResourceInfo {
    pub fn is_dictionary(&self) -> bool {
        matches!(
            self.special_resource_type,
            Some(SpecialResourceType::DictionaryResource)
        )
    }

    pub fn is_extracted_text(&self) -> bool {
        matches!(
            self.special_resource_type,
            Some(SpecialResourceType::ExtractedText)
        )
    }
}

/// One way to feed a tool: per input slot, an index into the profile batch
/// that was submitted to the matching endpoint.
pub type MatchAssignment = Vec<usize>;

/// A processing tool registered with the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub name: String,
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub mediatypes: Vec<String>,
    /// Copied over from [`ToolMatches`] for matching-tools responses;
    /// empty for the plain tool inventory.
    #[serde(default)]
    pub matches: Vec<MatchAssignment>,
    #[serde(default)]
    pub best_match_percent: u32,
    /// Lowercased concatenation of task, name, description and keywords,
    /// used for substring filtering. Client-computed.
    #[serde(skip)]
    pub search_string: String,
    /// Index of the match to auto-invoke, when this tool matches every
    /// submitted resource at 100%. Client-computed.
    #[serde(skip)]
    pub invoke_match_index: Option<usize>,
}

impl Tool {
    /// Compute the client-side denormalizations.
    pub fn normalize(&mut self) {
        let mut search = String::new();
        for part in [self.task.as_deref(), Some(self.name.as_str()), self.description.as_deref()]
            .into_iter()
            .flatten()
        {
            search.push_str(&part.to_lowercase());
            search.push(' ');
        }
        for keyword in &self.keywords {
            search.push_str(&keyword.to_lowercase());
            search.push(' ');
        }
        self.search_string = search;

        if self.best_match_percent == 100 && !self.matches.is_empty() {
            self.invoke_match_index = Some(0);
        }
    }

    pub fn is_dictionary(&self) -> bool {
        self.keywords.iter().any(|k| k.eq_ignore_ascii_case("dictionary"))
    }

    /// Substring filter over the denormalized search string.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty() || self.search_string.contains(&query)
    }
}

/// Matching-endpoint response item: a tool plus how well it fits the batch.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolMatches {
    pub tool: Tool,
    #[serde(default)]
    pub matches: Vec<MatchAssignment>,
    #[serde(default)]
    pub best_match_percent: u32,
}

impl ToolMatches {
    /// Fold the match data into the tool and normalize it.
    pub fn into_tool(self) -> Tool {
        let mut tool = self.tool;
        tool.matches = self.matches;
        tool.best_match_percent = self.best_match_percent;
        tool.normalize();
        tool
    }
}

/// Keep dictionary tools only when every submitted resource is a dictionary
/// resource; drop them otherwise.
pub fn filter_dictionary_tools(tools: Vec<Tool>, all_dictionary: bool) -> Vec<Tool> {
    tools
        .into_iter()
        .filter(|t| {
            if all_dictionary {
                t.is_dictionary()
            } else {
                !t.is_dictionary()
            }
        })
        .collect()
}

/// Per-resource payload for the matching endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMatchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Set when the client holds inline content for the resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_is_available: Option<bool>,
}

/// Deployment information served by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiInfo {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub enable_multiple_resources: bool,
    #[serde(default)]
    pub max_upload_size: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(name: &str, keywords: &[&str], best: u32, matches: Vec<MatchAssignment>) -> Tool {
        let mut tool = Tool {
            name: name.to_string(),
            task: Some("Tokenization".to_string()),
            description: Some("Splits Text into tokens".to_string()),
            homepage: None,
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            languages: vec![],
            mediatypes: vec![],
            matches,
            best_match_percent: best,
            search_string: String::new(),
            invoke_match_index: None,
        };
        tool.normalize();
        tool
    }

    #[test]
    fn normalize_builds_lowercased_search_string() {
        let tool = tool("UDPipe", &["NLP", "Parsing"], 60, vec![]);
        assert!(tool.search_string.contains("udpipe"));
        assert!(tool.search_string.contains("tokenization"));
        assert!(tool.search_string.contains("splits text into tokens"));
        assert!(tool.search_string.contains("nlp"));
        assert!(tool.search_string.contains("parsing"));
    }

    #[test]
    fn invoke_index_requires_full_match_and_a_match_list() {
        assert_eq!(tool("A", &[], 100, vec![vec![0]]).invoke_match_index, Some(0));
        assert_eq!(tool("B", &[], 100, vec![]).invoke_match_index, None);
        assert_eq!(tool("C", &[], 99, vec![vec![0]]).invoke_match_index, None);
    }

    #[test]
    fn query_matching_is_case_insensitive_and_empty_matches_all() {
        let tool = tool("UDPipe", &["NLP"], 0, vec![]);
        assert!(tool.matches_query(""));
        assert!(tool.matches_query("  "));
        assert!(tool.matches_query("udpipe"));
        assert!(tool.matches_query("NLP"));
        assert!(!tool.matches_query("speech"));
    }

    #[test]
    fn dictionary_filter_cuts_both_ways() {
        let dict = tool("GlossFinder", &["dictionary"], 0, vec![]);
        let plain = tool("UDPipe", &["NLP"], 0, vec![]);

        let kept = filter_dictionary_tools(vec![dict.clone(), plain.clone()], true);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "GlossFinder");

        let kept = filter_dictionary_tools(vec![dict, plain], false);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "UDPipe");
    }

    #[test]
    fn resource_info_deserializes_backend_field_names() {
        let info: ResourceInfo = serde_json::from_str(
            r#"{
                "id": "8c6efc09-e653-4a56-b7a5-50b9f7bd7b35",
                "filename": "sherlock.txt",
                "fileLength": 1887,
                "localLink": "/api/storage/8c6efc09-e653-4a56-b7a5-50b9f7bd7b35",
                "content": "To Sherlock Holmes she is always the woman.",
                "contentIsIncomplete": true,
                "profile": {"mediaType": "text/plain", "language": "eng"},
                "sourceID": "0e9ad173-7336-4d33-8b6f-9b0d72ed4b4f",
                "isSource": false,
                "specialResourceType": "EXTRACTED_TEXT"
            }"#,
        )
        .unwrap();
        assert_eq!(info.file_length, Some(1887));
        assert!(info.content_is_incomplete);
        assert_eq!(info.profile.as_ref().unwrap().media_type.as_deref(), Some("text/plain"));
        assert_eq!(info.source_id.as_deref(), Some("0e9ad173-7336-4d33-8b6f-9b0d72ed4b4f"));
        assert!(info.is_extracted_text());
        assert!(!info.is_dictionary());
    }

    #[test]
    fn match_request_omits_unset_fields() {
        let payload = serde_json::to_value(ProfileMatchRequest {
            media_type: Some("text/plain".to_string()),
            language: None,
            content_is_available: None,
        })
        .unwrap();
        assert_eq!(payload, serde_json::json!({"mediaType": "text/plain"}));

        let payload = serde_json::to_value(ProfileMatchRequest {
            media_type: Some("text/plain".to_string()),
            language: Some("deu".to_string()),
            content_is_available: Some(true),
        })
        .unwrap();
        assert_eq!(
            payload,
            serde_json::json!({
                "mediaType": "text/plain",
                "language": "deu",
                "contentIsAvailable": true
            })
        );
    }

    #[test]
    fn tool_matches_fold_into_the_tool() {
        let matches: Vec<ToolMatches> = serde_json::from_str(
            r#"[{
                "tool": {"name": "UDPipe", "keywords": ["NLP"]},
                "matches": [[0], [1]],
                "bestMatchPercent": 100
            }]"#,
        )
        .unwrap();
        let tool = matches.into_iter().next().unwrap().into_tool();
        assert_eq!(tool.best_match_percent, 100);
        assert_eq!(tool.matches, vec![vec![0], vec![1]]);
        assert_eq!(tool.invoke_match_index, Some(0));
        assert!(tool.search_string.contains("udpipe"));
    }
}
