use crate::query::{MatchKind, Predicate};

/// One finding category: which records match and what is extracted from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: &'static str,
    /// Output file name inside the findings folder
    pub file: &'static str,
    /// Used in the "Found N ..." log line
    pub description: &'static str,
    pub target_key: &'static str,
    pub match_key: &'static str,
    pub kind: MatchKind<'static>,
}

impl CatalogEntry {
    pub fn predicate(&self) -> Predicate<'static> {
        Predicate { match_key: self.match_key, kind: self.kind }
    }
}

const fn contains(
    name: &'static str,
    file: &'static str,
    description: &'static str,
    match_key: &'static str,
    operands: &'static [&'static str],
) -> CatalogEntry {
    CatalogEntry {
        name,
        file,
        description,
        target_key: "url",
        match_key,
        kind: MatchKind::ContainsAnyOf(operands),
    }
}

const fn distinct(name: &'static str, file: &'static str, description: &'static str, key: &'static str) -> CatalogEntry {
    CatalogEntry { name, file, description, target_key: key, match_key: key, kind: MatchKind::KeyExists }
}

/// Built-in finding categories, evaluated in this order.
pub static CATALOG: &[CatalogEntry] = &[
    // Interesting titles
    contains("titles", "titles.txt", "hosts with interesting title pages", "title", &["Index of", "Setup Configuration"]),
    contains("errors", "errors.txt", "hosts with interesting error pages", "title", &["Error", "Fehler", "Exception"]),
    contains("login", "login.txt", "hosts with login pages", "title", &["Login", "Log in", "Sign in", "Anmeldung"]),
    contains("db_admin", "db_admin.txt", "hosts with database admin pages", "title", &["phpMyAdmin", "Adminer", "pgAdmin"]),
    // Interesting tech
    contains("php", "php.txt", "hosts with PHP pages", "tech", &["PHP"]),
    contains("mysql", "mysql.txt", "hosts with MySQL", "tech", &["MySQL"]),
    contains("tomcat", "tomcat.txt", "hosts with Tomcat", "tech", &["Tomcat"]),
    contains("java", "java.txt", "hosts with Java", "tech", &["Java"]),
    // Interesting names
    contains("dev", "dev.txt", "hosts with development names", "url", &["dev.", "-dev", "dev-", "test.", "staging."]),
    // Interesting protocol
    contains("port_80", "port_80.txt", "hosts with port 80 available", "url", &[":80"]),
    // Interesting security
    CatalogEntry {
        name: "self_signed",
        file: "self_signed.txt",
        description: "hosts with self signed certificates",
        target_key: "url",
        match_key: "self_signed",
        kind: MatchKind::EqualsBool(true),
    },
    // Inventories
    distinct("server_types", "server_types.txt", "different web server types", "webserver"),
    distinct("subject_alt_names", "subject_alt_names.txt", "certificate subject alternative names", "subject_an"),
    distinct("urls", "urls.txt", "distinct URLs", "url"),
];

pub fn find_entry(name: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashSet;

    #[test]
    fn catalog_is_consistent() {
        let mut names = AHashSet::new();
        let mut files = AHashSet::new();
        for entry in CATALOG {
            assert!(names.insert(entry.name), "duplicate name {}", entry.name);
            assert!(files.insert(entry.file), "duplicate file {}", entry.file);
            assert!(entry.predicate().validate().is_ok(), "invalid predicate for {}", entry.name);
        }
    }

    #[test]
    fn lookup_by_name() {
        let entry = find_entry("self_signed").unwrap();
        assert_eq!(entry.kind, MatchKind::EqualsBool(true));
        assert!(find_entry("nope").is_none());
    }
}
