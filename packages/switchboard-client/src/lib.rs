//! Pure switchboard REST API client.
//!
//! A minimal client for the switchboard backend. Supports resource uploads
//! (files, pasted links, archive entries), text-content updates, profile
//! polling, archive outlines, and the tool matching and inventory endpoints.
//!
//! # Example
//!
//! ```rust,ignore
//! use switchboard_client::SwitchboardClient;
//!
//! let client = SwitchboardClient::new("https://switchboard.example.org/api");
//!
//! let resource = client.upload_file("notes.txt", bytes).await?;
//! let tools = client.match_tools(&profiles).await?;
//! for tool in &tools {
//!     println!("{} ({}%)", tool.tool.name, tool.best_match_percent);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{Result, SwitchboardError};
pub use types::{
    filter_dictionary_tools, ApiInfo, MatchAssignment, OutlineEntry, Profile, ProfileMatchRequest,
    ResourceInfo, SpecialResourceType, Tool, ToolMatches,
};

use reqwest::multipart;
use serde::de::DeserializeOwned;

/// Pure switchboard API client.
#[derive(Debug, Clone)]
pub struct SwitchboardClient {
    client: reqwest::Client,
    base_url: String,
}

impl SwitchboardClient {
    /// Create a client for the given API base URL (e.g. `https://host/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload a file from memory. Returns the stored resource description.
    pub async fn upload_file(&self, filename: &str, bytes: Vec<u8>) -> Result<ResourceInfo> {
        let part = multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = multipart::Form::new().part("file", part);
        self.post_storage(form).await
    }

    /// Ask the backend to download a pasted link into its storage space.
    /// An optional media type overrides the backend's profiling.
    pub async fn upload_link(&self, url: &str, mimetype: Option<&str>) -> Result<ResourceInfo> {
        let mut form = multipart::Form::new().text("url", url.to_string());
        if let Some(mimetype) = mimetype {
            form = form.text("mimetype", mimetype.to_string());
        }
        self.post_storage(form).await
    }

    /// Promote an archive entry to a first-class resource, or decompress the
    /// archive itself when no entry name is given.
    pub async fn upload_archive_entry(
        &self,
        archive_id: &str,
        entry_name: Option<&str>,
        profile: Option<&Profile>,
    ) -> Result<ResourceInfo> {
        let mut form = multipart::Form::new().text("archiveID", archive_id.to_string());
        if let Some(entry_name) = entry_name {
            form = form.text("archiveEntryName", entry_name.to_string());
        }
        if let Some(profile) = profile {
            let json = serde_json::to_string(profile)
                .map_err(|e| SwitchboardError::Parse(e.to_string()))?;
            form = form.text("profile", json);
        }
        self.post_storage(form).await
    }

    async fn post_storage(&self, form: multipart::Form) -> Result<ResourceInfo> {
        let url = format!("{}/storage", self.base_url);
        tracing::debug!(%url, "POST multipart upload");
        let resp = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(SwitchboardError::Connection)?;
        Self::decode(resp).await
    }

    /// Replace the text content of a stored plain-text resource.
    pub async fn put_content(&self, id: &str, content: &str) -> Result<()> {
        let url = format!("{}/storage/{}", self.base_url, id);
        tracing::debug!(%url, bytes = content.len(), "PUT text content");
        let resp = self
            .client
            .put(&url)
            .header("Content-Type", "text/plain")
            .body(content.to_string())
            .send()
            .await
            .map_err(SwitchboardError::Connection)?;
        if !resp.status().is_success() {
            return Err(SwitchboardError::from_response(resp).await);
        }
        Ok(())
    }

    /// Poll the description of a stored resource; blocks server-side until
    /// profiling finishes.
    pub async fn resource_info(&self, id: &str) -> Result<ResourceInfo> {
        self.get_json(format!("{}/storage/{}/info", self.base_url, id))
            .await
    }

    /// List the members of a stored archive resource.
    pub async fn outline(&self, id: &str) -> Result<Vec<OutlineEntry>> {
        self.get_json(format!("{}/storage/{}/outline", self.base_url, id))
            .await
    }

    /// Submit one profile per resource and get back the tools that can
    /// process the batch.
    pub async fn match_tools(&self, profiles: &[ProfileMatchRequest]) -> Result<Vec<ToolMatches>> {
        let url = format!("{}/tools/match", self.base_url);
        tracing::debug!(%url, profiles = profiles.len(), "POST tool matching");
        let resp = self
            .client
            .post(&url)
            .json(&profiles)
            .send()
            .await
            .map_err(SwitchboardError::Connection)?;
        Self::decode(resp).await
    }

    /// The full tool inventory.
    pub async fn tools(&self) -> Result<Vec<Tool>> {
        self.get_json(format!("{}/tools", self.base_url)).await
    }

    /// Known languages as `[code, name]` pairs.
    pub async fn languages(&self) -> Result<Vec<(String, String)>> {
        self.get_json(format!("{}/languages", self.base_url)).await
    }

    /// Known media types.
    pub async fn mediatypes(&self) -> Result<Vec<String>> {
        self.get_json(format!("{}/mediatypes", self.base_url)).await
    }

    /// Deployment information, including whether multiple concurrent
    /// resources are enabled.
    pub async fn api_info(&self) -> Result<ApiInfo> {
        self.get_json(format!("{}/apiinfo", self.base_url)).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        tracing::debug!(%url, "GET");
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(SwitchboardError::Connection)?;
        Self::decode(resp).await
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        if !resp.status().is_success() {
            return Err(SwitchboardError::from_response(resp).await);
        }
        resp.json()
            .await
            .map_err(|e| SwitchboardError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_its_trailing_slash() {
        let client = SwitchboardClient::new("https://switchboard.example.org/api/");
        assert_eq!(client.base_url(), "https://switchboard.example.org/api");
    }
}
