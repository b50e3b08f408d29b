// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hostname matching for autofill.
//!
//! Stored URLs and the active page's URL are reduced to a normalized
//! hostname (scheme-insensitive, leading `www.` stripped, lowercased) and
//! compared exactly. Exact comparison is what prevents
//! `example.com.evil.com` from matching `example.com`.

use credlock_core::VaultEntry;
use url::Url;

/// Normalize a URL or bare hostname to its comparable host form.
///
/// Returns `None` for input with no extractable hostname.
pub fn normalized_host(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Stored entries sometimes hold a bare hostname; give it a scheme so the
    // URL parser accepts it.
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let host = Url::parse(&candidate)
        .ok()?
        .host_str()?
        .to_ascii_lowercase();
    Some(host.strip_prefix("www.").unwrap_or(&host).to_string())
}

/// Find the first stored entry whose hostname matches the active page's.
///
/// At most the first match is used; no match is a no-op, not an error.
pub fn find_match<'a>(entries: &'a [VaultEntry], active_url: &str) -> Option<&'a VaultEntry> {
    let active = normalized_host(active_url)?;
    entries
        .iter()
        .find(|entry| normalized_host(&entry.url).as_deref() == Some(active.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use credlock_core::{EncryptedField, EntryId, VaultId};

    fn entry_for(url: &str) -> VaultEntry {
        VaultEntry {
            vault_id: VaultId("v".into()),
            entry_id: EntryId(url.to_string()),
            url: url.to_string(),
            user: EncryptedField("dXNlcg==".into()),
            password: EncryptedField("cHdk".into()),
        }
    }

    #[test]
    fn scheme_and_www_are_ignored() {
        assert_eq!(
            normalized_host("https://www.example.com/login"),
            Some("example.com".into())
        );
        assert_eq!(
            normalized_host("http://example.com"),
            Some("example.com".into())
        );
        assert_eq!(normalized_host("example.com"), Some("example.com".into()));
    }

    #[test]
    fn host_comparison_is_case_insensitive() {
        assert_eq!(
            normalized_host("https://WWW.Example.COM"),
            Some("example.com".into())
        );
    }

    #[test]
    fn empty_and_unparseable_input_yield_none() {
        assert_eq!(normalized_host(""), None);
        assert_eq!(normalized_host("   "), None);
        assert_eq!(normalized_host("http://"), None);
    }

    #[test]
    fn www_page_matches_bare_stored_host() {
        let entries = vec![entry_for("http://example.com")];
        let matched = find_match(&entries, "https://www.example.com/login");
        assert!(matched.is_some());
    }

    #[test]
    fn suffix_spoof_does_not_match() {
        let entries = vec![entry_for("https://example.com")];
        assert!(find_match(&entries, "https://example.com.evil.com").is_none());
    }

    #[test]
    fn first_match_wins() {
        let entries = vec![
            entry_for("https://other.example"),
            entry_for("https://example.com/a"),
            entry_for("https://example.com/b"),
        ];
        let matched = find_match(&entries, "https://example.com").unwrap();
        assert_eq!(matched.url, "https://example.com/a");
    }

    #[test]
    fn no_match_is_none() {
        let entries = vec![entry_for("https://example.com")];
        assert!(find_match(&entries, "https://unrelated.example").is_none());
    }
}
