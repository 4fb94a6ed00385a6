//! The resource list: an ordered collection of user-submitted resources.
//!
//! This is the synchronous core of the app. Every mutation of the list goes
//! through [`ResourceStore`]; the async action layer only decides *when* to
//! call which method. Keeping it free of signals and I/O makes the list
//! invariants directly unit-testable.

use switchboard_client::{OutlineEntry, Profile, ProfileMatchRequest, ResourceInfo};

/// Key of a resource in the list: a locally generated sequence number until
/// the backend response replaces it with the server-issued id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceId {
    Local(u64),
    Server(String),
}

impl ResourceId {
    /// Stable string form, used as the render key.
    pub fn as_key(&self) -> String {
        match self {
            ResourceId::Local(n) => format!("local-{n}"),
            ResourceId::Server(id) => id.clone(),
        }
    }
}

/// Which profile field is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    MediaType,
    Language,
}

/// One list entry: an optimistic placeholder until `info` arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceEntry {
    pub id: ResourceId,
    pub info: Option<ResourceInfo>,
    /// The placeholder stems from an archive entry or a text extraction,
    /// not a fresh upload.
    pub from_extraction: bool,
}

impl ResourceEntry {
    pub fn is_pending(&self) -> bool {
        self.info.is_none()
    }

    pub fn is_dictionary(&self) -> bool {
        self.info.as_ref().is_some_and(|i| i.is_dictionary())
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.info.as_ref().and_then(|i| i.profile.as_ref())
    }

    /// The backend id, once known.
    pub fn server_id(&self) -> Option<&str> {
        match &self.id {
            ResourceId::Server(id) => Some(id.as_str()),
            ResourceId::Local(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceStore {
    entries: Vec<ResourceEntry>,
    last_local_id: u64,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ResourceEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, id: &ResourceId) -> Option<&ResourceEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    fn position(&self, id: &ResourceId) -> Option<usize> {
        self.entries.iter().position(|e| &e.id == id)
    }

    /// Add an optimistic placeholder and return its local id.
    pub fn insert_placeholder(&mut self, from_extraction: bool) -> ResourceId {
        self.last_local_id += 1;
        let id = ResourceId::Local(self.last_local_id);
        self.entries.push(ResourceEntry {
            id: id.clone(),
            info: None,
            from_extraction,
        });
        id
    }

    /// Merge a backend response into the entry at `target`, moving it to the
    /// server-issued id. Returns false when the entry was removed while the
    /// request was in flight; the response is discarded then.
    pub fn apply_info(&mut self, target: &ResourceId, info: ResourceInfo) -> bool {
        if self.position(target).is_none() {
            return false;
        }
        let server_id = ResourceId::Server(info.id.clone());
        if server_id != *target {
            // the server issued a different id: drop any entry already
            // carrying it so ids stay unique in the list
            self.entries.retain(|e| e.id != server_id);
        }
        let Some(pos) = self.position(target) else {
            return false;
        };
        let entry = &mut self.entries[pos];
        entry.id = server_id;
        entry.info = Some(info);
        true
    }

    pub fn remove(&mut self, id: &ResourceId) -> bool {
        let len = self.entries.len();
        self.entries.retain(|e| &e.id != id);
        self.entries.len() != len
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Edit one field of a resource's profile. Returns false when the
    /// resource is unknown or still pending.
    pub fn set_profile_field(
        &mut self,
        id: &ResourceId,
        field: ProfileField,
        value: Option<String>,
    ) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        let Some(info) = self.entries[pos].info.as_mut() else {
            return false;
        };
        let profile = info.profile.get_or_insert_with(Profile::default);
        match field {
            ProfileField::MediaType => profile.media_type = value,
            ProfileField::Language => profile.language = value,
        }
        true
    }

    pub fn set_content(&mut self, id: &ResourceId, content: String) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        let Some(info) = self.entries[pos].info.as_mut() else {
            return false;
        };
        info.content = Some(content);
        true
    }

    /// Attach a freshly fetched archive outline to a resource.
    pub fn set_outline(&mut self, id: &ResourceId, outline: Vec<OutlineEntry>) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        let Some(info) = self.entries[pos].info.as_mut() else {
            return false;
        };
        info.outline = Some(outline);
        true
    }

    /// Flip the selection of one outline entry. In exclusive mode (single
    /// resource deployments) all other entries are deselected first.
    /// Returns the new state of the named entry.
    pub fn toggle_outline_entry(
        &mut self,
        id: &ResourceId,
        entry_name: &str,
        exclusive: bool,
    ) -> Option<bool> {
        let pos = self.position(id)?;
        let outline = self.entries[pos].info.as_mut()?.outline.as_mut()?;
        let was_checked = outline.iter().find(|e| e.name == entry_name)?.checked;
        if exclusive {
            for entry in outline.iter_mut() {
                entry.checked = false;
            }
        }
        let entry = outline.iter_mut().find(|e| e.name == entry_name)?;
        entry.checked = !was_checked;
        Some(entry.checked)
    }

    /// Entries previously promoted out of the given archive.
    pub fn promoted_from(&self, archive_id: &str) -> Vec<ResourceId> {
        self.entries
            .iter()
            .filter(|e| {
                e.info
                    .as_ref()
                    .and_then(|i| i.source_id.as_deref())
                    .is_some_and(|sid| sid == archive_id)
            })
            .map(|e| e.id.clone())
            .collect()
    }

    /// True when every resource in the list is a dictionary resource.
    pub fn all_dictionary(&self) -> bool {
        self.entries.iter().all(ResourceEntry::is_dictionary)
    }

    /// One matching-endpoint payload per resource that has both a backend
    /// link and a profile; everything else is excluded from the batch.
    pub fn match_request(&self) -> Vec<ProfileMatchRequest> {
        self.entries
            .iter()
            .filter_map(|entry| {
                let info = entry.info.as_ref()?;
                info.local_link.as_ref()?;
                let profile = info.profile.as_ref()?;
                Some(ProfileMatchRequest {
                    media_type: profile.media_type.clone(),
                    language: profile.language.clone(),
                    content_is_available: info.content.as_ref().map(|_| true),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchboard_client::SpecialResourceType;

    fn info(id: &str, mediatype: Option<&str>) -> ResourceInfo {
        ResourceInfo {
            id: id.to_string(),
            filename: Some(format!("{id}.txt")),
            file_length: Some(100),
            local_link: Some(format!("/api/storage/{id}")),
            original_link: None,
            content: None,
            content_is_incomplete: false,
            profile: mediatype.map(|mt| Profile {
                media_type: Some(mt.to_string()),
                language: Some("eng".to_string()),
            }),
            outline: None,
            outline_is_incomplete: false,
            source_id: None,
            source_entry_name: None,
            is_source: false,
            special_resource_type: None,
        }
    }

    #[test]
    fn placeholder_ids_are_unique_and_increasing() {
        let mut store = ResourceStore::new();
        let a = store.insert_placeholder(false);
        let b = store.insert_placeholder(false);
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
        assert!(store.get(&a).unwrap().is_pending());
    }

    #[test]
    fn apply_info_moves_the_entry_to_the_server_id() {
        let mut store = ResourceStore::new();
        let placeholder = store.insert_placeholder(false);
        assert!(store.apply_info(&placeholder, info("abc", Some("text/plain"))));

        assert_eq!(store.len(), 1);
        assert!(store.get(&placeholder).is_none());
        let server_id = ResourceId::Server("abc".to_string());
        let entry = store.get(&server_id).expect("entry under server id");
        assert!(!entry.is_pending());
        assert_eq!(entry.server_id(), Some("abc"));
    }

    #[test]
    fn apply_info_drops_a_duplicate_entry_for_the_same_server_id() {
        let mut store = ResourceStore::new();
        let first = store.insert_placeholder(false);
        store.apply_info(&first, info("abc", Some("text/plain")));

        // a second upload resolves to the same stored resource
        let second = store.insert_placeholder(false);
        store.apply_info(&second, info("abc", Some("text/plain")));

        assert_eq!(store.len(), 1, "at most one resource per id");
    }

    #[test]
    fn late_completion_for_a_removed_placeholder_is_discarded() {
        let mut store = ResourceStore::new();
        let placeholder = store.insert_placeholder(false);
        assert!(store.remove(&placeholder));
        assert!(!store.apply_info(&placeholder, info("abc", Some("text/plain"))));
        assert!(store.is_empty());
    }

    #[test]
    fn out_of_order_completions_update_only_their_own_placeholder() {
        let mut store = ResourceStore::new();
        let a = store.insert_placeholder(false);
        let b = store.insert_placeholder(false);

        // b completes first
        assert!(store.apply_info(&b, info("bbb", Some("text/plain"))));
        assert!(store.apply_info(&a, info("aaa", Some("application/zip"))));

        let ids: Vec<String> = store.entries().iter().map(|e| e.id.as_key()).collect();
        assert_eq!(ids, vec!["aaa".to_string(), "bbb".to_string()]);
    }

    #[test]
    fn profile_edits_only_touch_profiled_resources() {
        let mut store = ResourceStore::new();
        let pending = store.insert_placeholder(false);
        assert!(!store.set_profile_field(&pending, ProfileField::Language, Some("deu".into())));

        store.apply_info(&pending, info("abc", Some("text/plain")));
        let id = ResourceId::Server("abc".to_string());
        assert!(store.set_profile_field(&id, ProfileField::Language, Some("deu".into())));
        assert_eq!(
            store.get(&id).unwrap().profile().unwrap().language.as_deref(),
            Some("deu")
        );
    }

    #[test]
    fn match_request_excludes_pending_and_profileless_resources() {
        let mut store = ResourceStore::new();
        store.insert_placeholder(false); // pending, excluded

        let profileless = store.insert_placeholder(false);
        store.apply_info(&profileless, info("raw", None)); // no profile, excluded

        let profiled = store.insert_placeholder(false);
        let mut full = info("abc", Some("text/plain"));
        full.content = Some("hello".to_string());
        store.apply_info(&profiled, full);

        let batch = store.match_request();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].media_type.as_deref(), Some("text/plain"));
        assert_eq!(batch[0].content_is_available, Some(true));
    }

    #[test]
    fn all_dictionary_reflects_the_whole_list() {
        let mut store = ResourceStore::new();
        let a = store.insert_placeholder(false);
        let mut dict = info("dict1", Some("text/plain"));
        dict.special_resource_type = Some(SpecialResourceType::DictionaryResource);
        store.apply_info(&a, dict);
        assert!(store.all_dictionary());

        let b = store.insert_placeholder(false);
        store.apply_info(&b, info("plain1", Some("text/plain")));
        assert!(!store.all_dictionary());
    }

    #[test]
    fn exclusive_outline_toggle_deselects_the_other_entries() {
        let mut store = ResourceStore::new();
        let a = store.insert_placeholder(false);
        let mut archive = info("zip1", Some("application/zip"));
        archive.outline = Some(vec![
            OutlineEntry {
                name: "a.txt".into(),
                size: 10,
                profile: None,
                checked: false,
            },
            OutlineEntry {
                name: "b.txt".into(),
                size: 20,
                profile: None,
                checked: true,
            },
        ]);
        store.apply_info(&a, archive);
        let id = ResourceId::Server("zip1".to_string());

        assert_eq!(store.toggle_outline_entry(&id, "a.txt", true), Some(true));
        let outline = store
            .get(&id)
            .unwrap()
            .info
            .as_ref()
            .unwrap()
            .outline
            .clone()
            .unwrap();
        assert!(outline[0].checked);
        assert!(!outline[1].checked, "exclusive mode deselects b.txt");

        // toggling the checked entry again clears it
        assert_eq!(store.toggle_outline_entry(&id, "a.txt", true), Some(false));
    }

    #[test]
    fn promoted_entries_are_found_by_their_source_archive() {
        let mut store = ResourceStore::new();
        let a = store.insert_placeholder(false);
        store.apply_info(&a, info("zip1", Some("application/zip")));

        let b = store.insert_placeholder(true);
        let mut promoted = info("child1", Some("text/plain"));
        promoted.source_id = Some("zip1".to_string());
        promoted.source_entry_name = Some("a.txt".to_string());
        store.apply_info(&b, promoted);

        assert_eq!(
            store.promoted_from("zip1"),
            vec![ResourceId::Server("child1".to_string())]
        );
        assert!(store.promoted_from("other").is_empty());
    }
}
