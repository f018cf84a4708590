use std::fmt;

use clap::ValueEnum;
use models::Repository;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Newest repositories first.
    #[default]
    Recent,
    /// Most stars first.
    Stars,
    /// Most forks first.
    Forks,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Recent => "recent",
            SortKey::Stars => "stars",
            SortKey::Forks => "forks",
        };

        f.write_str(name)
    }
}

/// Descending by `key`, in place. Ties keep their current relative order,
/// so sorting again by the same key never moves anything.
pub fn sort_repos(repos: &mut [Repository], key: SortKey) {
    match key {
        SortKey::Recent => repos.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Stars => repos.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count)),
        SortKey::Forks => repos.sort_by(|a, b| b.forks_count.cmp(&a.forks_count)),
    }
}
