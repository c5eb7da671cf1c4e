//! Sort order for manifest entries.
//!
//! Files outside any directory come before files in directories, compared
//! alphabetically but ignoring case, with a few fixed exceptions:
//! `install.rdf`, `chrome.manifest` and the icons go first, license files go
//! last. The order carries no cryptographic meaning, it just has to be stable
//! and match what the legacy consumer is used to seeing.

/// Priority buckets of the legacy scheme. Bucket 3 was never assigned; the
/// gap is kept so the numbers stay meaningful to external tooling.
const PRIO_INSTALL_RDF: u8 = 1;
const PRIO_WELL_KNOWN: u8 = 2;
const PRIO_DEFAULT: u8 = 4;
const PRIO_LICENSE: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct EntryKey {
    priority: u8,
    directory: String,
    basename: String,
    full_name: String,
}

pub fn entry_key(name: &str) -> EntryKey {
    let priority = match name {
        "install.rdf" => PRIO_INSTALL_RDF,
        "chrome.manifest" | "icon.png" | "icon64.png" => PRIO_WELL_KNOWN,
        "MPL" | "GPL" | "LGPL" | "COPYING" | "LICENSE" | "license.txt" => PRIO_LICENSE,
        _ => PRIO_DEFAULT,
    };
    let folded = name.to_lowercase();
    let (directory, basename) = split_name(&folded);
    EntryKey {
        priority,
        directory: directory.to_owned(),
        basename: basename.to_owned(),
        // Case folding can make distinct names collide; the unfolded name
        // keeps the order strict.
        full_name: name.to_owned(),
    }
}

pub fn is_directory_entry(name: &str) -> bool {
    name.ends_with('/') || name.ends_with('\\')
}

fn split_name(name: &str) -> (&str, &str) {
    match name.rfind(['/', '\\']) {
        Some(p) => (&name[..p], &name[p + 1..]),
        None => ("", name),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn sorted(mut names: Vec<&str>) -> Vec<&str> {
        names.sort_by_key(|name| entry_key(name));
        names
    }

    #[test]
    fn root_files_before_nested() {
        assert_eq!(
            sorted(vec!["icons/icon-48.png", "README.txt", "content.js", "manifest.json"]),
            vec!["content.js", "manifest.json", "README.txt", "icons/icon-48.png"],
        );
    }

    #[test]
    fn well_known_names_first_licenses_last() {
        assert_eq!(
            sorted(vec!["LICENSE", "bootstrap.js", "chrome.manifest", "install.rdf", "icon.png"]),
            vec!["install.rdf", "chrome.manifest", "icon.png", "bootstrap.js", "LICENSE"],
        );
    }

    #[test]
    fn well_known_names_only_match_at_root() {
        // A nested install.rdf is an ordinary file.
        assert_eq!(
            sorted(vec!["extra/install.rdf", "alpha.js"]),
            vec!["alpha.js", "extra/install.rdf"],
        );
    }

    #[test]
    fn case_insensitive_within_bucket() {
        assert_eq!(
            sorted(vec!["Beta.js", "alpha.js", "GAMMA.js"]),
            vec!["alpha.js", "Beta.js", "GAMMA.js"],
        );
    }

    #[test]
    fn case_fold_collisions_stay_ordered() {
        let a = entry_key("data/File.txt");
        let b = entry_key("data/file.txt");
        assert_ne!(a, b);
        // Distinct names never compare equal, and the order is fixed.
        assert_eq!(a.cmp(&b), entry_key("data/File.txt").cmp(&entry_key("data/file.txt")));
    }

    #[test]
    fn key_is_stable() {
        assert_eq!(entry_key("icons/icon-48.png"), entry_key("icons/icon-48.png"));
    }

    #[test]
    fn backslash_separators_split_too() {
        let nested = entry_key("dir\\file.txt");
        let root = entry_key("zzz.txt");
        assert!(root < nested);
    }

    #[test]
    fn directory_entries_detected() {
        assert!(is_directory_entry("icons/"));
        assert!(is_directory_entry("icons\\"));
        assert!(!is_directory_entry("icons/icon-48.png"));
    }
}
