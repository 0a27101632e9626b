use crate::types::PkgMeta;

use std::collections::HashMap;

/// Whether a record from a later source replaces the current merge winner.
///
/// Versions are compared as plain strings, not with apk's version algorithm,
/// so `"9.0"` beats `"10.0"` (a known limitation). Equal versions always
/// take the newer record, which is how later repositories override earlier
/// ones in Alpine.
fn replaces(incoming: &str, existing: &str) -> bool {
    incoming >= existing
}

/// The merged, indexed package set. Built once at startup from all
/// configured index sources, then read-only.
///
/// Two views exist over the same records: the primary index holds one merge
/// winner per name, while the multiversion pool keeps every record so that
/// losing versions remain queryable.
pub struct PkgPool {
    pkgs: Vec<PkgMeta>,
    // Merge winner for each name
    primary: HashMap<String, usize>,
    // Names in first-seen order, for stable iteration
    name_order: Vec<String>,
    // All records for each name, sorted by version at finalize()
    name_to_ids: HashMap<String, Vec<usize>>,
}

impl PkgPool {
    pub fn new() -> Self {
        PkgPool {
            pkgs: Vec::new(),
            primary: HashMap::new(),
            name_order: Vec::new(),
            name_to_ids: HashMap::new(),
        }
    }

    /// Merge one source into the pool. Sources must be imported in
    /// configuration order: when versions compare equal the record from the
    /// most recently imported source wins.
    pub fn import_source(&mut self, pkgs: Vec<PkgMeta>) {
        for meta in pkgs {
            self.add(meta);
        }
    }

    fn add(&mut self, meta: PkgMeta) {
        let id = self.pkgs.len();
        let name = meta.name.clone();
        let version = meta.version.clone();
        self.pkgs.push(meta);

        match self.name_to_ids.get_mut(&name) {
            Some(ids) => ids.push(id),
            None => {
                self.name_to_ids.insert(name.clone(), vec![id]);
                self.name_order.push(name.clone());
            }
        }

        match self.primary.get(&name).copied() {
            Some(winner) => {
                if replaces(&version, &self.pkgs[winner].version) {
                    self.primary.insert(name, id);
                }
            }
            None => {
                self.primary.insert(name, id);
            }
        }
    }

    /// Must be called after the last `import_source` and before serving
    /// queries. Sorts each multiversion list in ascending version order.
    pub fn finalize(&mut self) {
        let pkgs = &self.pkgs;
        self.name_to_ids.iter_mut().for_each(|(_, ids)| {
            ids.sort_by(|a, b| pkgs[*a].version.cmp(&pkgs[*b].version));
        });
    }

    /// Exact-name lookup of the merge winner. A miss is not an error.
    pub fn get(&self, name: &str) -> Option<&PkgMeta> {
        self.primary.get(name).map(|id| &self.pkgs[*id])
    }

    /// All merge winners, in first-seen order.
    pub fn all_pkgs(&self) -> impl Iterator<Item = &PkgMeta> {
        self.name_order
            .iter()
            .filter_map(move |name| self.get(name))
    }

    /// Number of distinct package names.
    pub fn len(&self) -> usize {
        self.primary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
    }

    /// Case-insensitive substring search over winner names and descriptions.
    /// An empty keyword matches everything.
    pub fn search(&self, keyword: &str) -> Vec<&PkgMeta> {
        let keyword = keyword.to_lowercase();
        self.all_pkgs()
            .filter(|pkg| {
                pkg.name.to_lowercase().contains(&keyword)
                    || pkg.description.to_lowercase().contains(&keyword)
            })
            .collect()
    }

    /// Every record sharing `name` across all sources, merge losers
    /// included, in ascending version order.
    pub fn get_versions(&self, name: &str) -> Vec<&PkgMeta> {
        match self.name_to_ids.get(name) {
            Some(ids) => ids.iter().map(|id| &self.pkgs[*id]).collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn pkg(name: &str, version: &str) -> PkgMeta {
        PkgMeta {
            name: name.to_string(),
            version: version.to_string(),
            ..Default::default()
        }
    }

    fn build(sources: Vec<Vec<PkgMeta>>) -> PkgPool {
        let mut pool = PkgPool::new();
        for source in sources {
            pool.import_source(source);
        }
        pool.finalize();
        pool
    }

    #[test]
    fn merge_disjoint_sources() {
        let pool = build(vec![
            vec![pkg("pkg1", "1.0.0")],
            vec![pkg("pkg2", "2.0.0")],
        ]);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get("pkg1").unwrap().version, "1.0.0");
        assert_eq!(pool.get("pkg2").unwrap().version, "2.0.0");
    }

    #[test]
    fn merge_higher_version_wins() {
        let pool = build(vec![
            vec![pkg("pkg1", "1.0.0")],
            vec![pkg("pkg1", "1.1.0")],
        ]);
        assert_eq!(pool.get("pkg1").unwrap().version, "1.1.0");

        // Order-independent for the version rule
        let pool = build(vec![
            vec![pkg("pkg1", "1.1.0")],
            vec![pkg("pkg1", "1.0.0")],
        ]);
        assert_eq!(pool.get("pkg1").unwrap().version, "1.1.0");
    }

    #[test]
    fn merge_equal_version_takes_later_source() {
        let mut old = pkg("pkg1", "1.0.0");
        old.description = "Old description".to_string();
        let mut new = pkg("pkg1", "1.0.0");
        new.description = "New description".to_string();
        let pool = build(vec![vec![old], vec![new]]);
        assert_eq!(pool.get("pkg1").unwrap().description, "New description");
    }

    #[test]
    fn merge_is_lexicographic_not_semantic() {
        // String comparison gets multi-digit components wrong; this pins the
        // current behavior rather than endorsing it.
        let pool = build(vec![vec![pkg("pkg1", "9.0")], vec![pkg("pkg1", "10.0")]]);
        assert_eq!(pool.get("pkg1").unwrap().version, "9.0");
    }

    #[test]
    fn merge_mixed_scenarios() {
        let mut old4 = pkg("pkg4", "4.0.0");
        old4.description = "Old pkg4".to_string();
        let mut new4 = pkg("pkg4", "4.0.0");
        new4.description = "New pkg4".to_string();
        let pool = build(vec![
            vec![pkg("pkg1", "1.0.0"), pkg("pkg2", "2.0.0"), pkg("pkg3", "3.1.0"), old4],
            vec![pkg("pkg1", "1.1.0"), pkg("pkg2", "1.9.0"), new4, pkg("pkg5", "5.0.0")],
        ]);
        assert_eq!(pool.len(), 5);
        assert_eq!(pool.get("pkg1").unwrap().version, "1.1.0");
        assert_eq!(pool.get("pkg2").unwrap().version, "2.0.0");
        assert_eq!(pool.get("pkg3").unwrap().version, "3.1.0");
        assert_eq!(pool.get("pkg4").unwrap().description, "New pkg4");
        assert_eq!(pool.get("pkg5").unwrap().version, "5.0.0");
    }

    #[test]
    fn get_absent_is_none() {
        let pool = build(vec![vec![pkg("pkg1", "1.0.0")]]);
        assert!(pool.get("nonexistent").is_none());
    }

    #[test]
    fn all_pkgs_keeps_first_seen_order() {
        let pool = build(vec![
            vec![pkg("zsh", "5.9"), pkg("bash", "5.2")],
            vec![pkg("bash", "5.3"), pkg("awk", "1.0")],
        ]);
        let names: Vec<&str> = pool.all_pkgs().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["zsh", "bash", "awk"]);
    }

    #[test]
    fn versions_pool_keeps_merge_losers() {
        let pool = build(vec![
            vec![pkg("pkg1", "1.1.0")],
            vec![pkg("pkg1", "1.0.0")],
        ]);
        // 1.0.0 lost the merge but is still listed, sorted ascending
        let versions: Vec<&str> = pool
            .get_versions("pkg1")
            .iter()
            .map(|p| p.version.as_str())
            .collect();
        assert_eq!(versions, vec!["1.0.0", "1.1.0"]);
        assert!(pool.get_versions("nonexistent").is_empty());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let mut curl = pkg("curl", "8.0.0");
        curl.description = "URL retrieval utility".to_string();
        let pool = build(vec![vec![curl, pkg("zsh", "5.9")]]);
        assert_eq!(pool.search("CUR").len(), 1);
        assert_eq!(pool.search("retrieval").len(), 1);
        assert!(pool.search("nomatch").is_empty());
        // Empty keyword matches every package
        assert_eq!(pool.search("").len(), 2);
    }
}
