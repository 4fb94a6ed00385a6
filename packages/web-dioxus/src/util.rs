//! Small string and URL helpers shared by the input and resource views.

use std::sync::LazyLock;

use regex::Regex;

/// Permissive URL shape for pasted links: scheme and `www.` are optional,
/// the host must end in a dotted TLD. Anything that fails this check is
/// ignored without a network call.
static RE_URL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?(www\.)?[A-Za-z0-9.-]+\.[A-Za-z]{2,5}(\.|/|:|\?|#|$)").unwrap()
});

pub fn looks_like_url(input: &str) -> bool {
    RE_URL_SHAPE.is_match(input)
}

/// Expand `hdl:` and `doi:` persistent identifiers into resolvable URLs.
pub fn unfold_handle(link: &str) -> String {
    if let Some(rest) = link.strip_prefix("hdl:") {
        return format!("https://hdl.handle.net/{rest}");
    }
    if let Some(rest) = link.strip_prefix("doi:") {
        return format!("https://doi.org/{rest}");
    }
    link.to_string()
}

/// Resolve a path-absolute storage link against the configured API base.
/// Relative API bases are left to the browser to resolve.
pub fn absolutize_link(api_base: &str, link: &str) -> String {
    if link.starts_with("http://") || link.starts_with("https://") {
        return link.to_string();
    }
    match url::Url::parse(api_base) {
        Ok(base) => base
            .join(link)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| link.to_string()),
        Err(_) => link.to_string(),
    }
}

/// Human-readable file size for the resource rows.
pub fn human_size(bytes: Option<u64>) -> String {
    const UNITS: [&str; 5] = ["B", "kB", "MB", "GB", "TB"];
    let Some(bytes) = bytes else {
        return String::new();
    };
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

pub fn is_text_mediatype(mediatype: &str) -> bool {
    mediatype.starts_with("text/")
}

pub fn is_archive_mediatype(mediatype: &str) -> bool {
    matches!(
        mediatype,
        "application/zip" | "application/x-tar" | "application/x-gtar"
    )
}

pub fn is_compressed_mediatype(mediatype: &str) -> bool {
    matches!(
        mediatype,
        "application/gzip" | "application/x-gzip" | "application/x-bzip2" | "application/x-xz"
    )
}

pub fn has_extractable_text(mediatype: &str) -> bool {
    matches!(
        mediatype,
        "application/pdf"
            | "application/rtf"
            | "application/msword"
            | "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_shape_accepts_the_usual_suspects() {
        assert!(looks_like_url("https://b2drop.eudat.eu/s/abc123"));
        assert!(looks_like_url("http://example.org"));
        assert!(looks_like_url("www.example.org/path"));
        assert!(looks_like_url("example.org"));
        assert!(looks_like_url("hdl.handle.net/11372/LRT-1547"));
        assert!(looks_like_url("example.org:8080/x"));
    }

    #[test]
    fn url_shape_rejects_plain_text() {
        assert!(!looks_like_url("just a sentence someone typed"));
        assert!(!looks_like_url("hello"));
        assert!(!looks_like_url(""));
        assert!(!looks_like_url("no spaces.al lowed"));
    }

    #[test]
    fn handles_unfold_to_resolver_urls() {
        assert_eq!(
            unfold_handle("hdl:11372/LRT-1547"),
            "https://hdl.handle.net/11372/LRT-1547"
        );
        assert_eq!(unfold_handle("doi:10.1000/182"), "https://doi.org/10.1000/182");
        assert_eq!(unfold_handle("https://example.org"), "https://example.org");
    }

    #[test]
    fn links_absolutize_against_an_absolute_base_only() {
        assert_eq!(
            absolutize_link("https://switchboard.example.org/api", "/api/storage/42"),
            "https://switchboard.example.org/api/storage/42"
        );
        // already absolute: untouched
        assert_eq!(
            absolutize_link("https://switchboard.example.org/api", "https://other.org/x"),
            "https://other.org/x"
        );
        // relative base: the browser resolves the path itself
        assert_eq!(absolutize_link("/api", "/api/storage/42"), "/api/storage/42");
    }

    #[test]
    fn sizes_render_with_one_decimal_above_bytes() {
        assert_eq!(human_size(None), "");
        assert_eq!(human_size(Some(512)), "512 B");
        assert_eq!(human_size(Some(2048)), "2.0 kB");
        assert_eq!(human_size(Some(5 * 1024 * 1024)), "5.0 MB");
    }

    #[test]
    fn mediatype_predicates_partition_the_interesting_types() {
        assert!(is_text_mediatype("text/plain"));
        assert!(!is_text_mediatype("application/pdf"));
        assert!(is_archive_mediatype("application/zip"));
        assert!(!is_archive_mediatype("application/gzip"));
        assert!(is_compressed_mediatype("application/gzip"));
        assert!(has_extractable_text("application/pdf"));
        assert!(!has_extractable_text("text/plain"));
    }
}
