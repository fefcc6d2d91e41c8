//! Region-aware candidate pool.
//!
//! # Responsibilities
//! - Drop nodes that are not routable
//! - Apply regional isolation: a country with routable regional nodes never
//!   sees global nodes

use std::fmt;

use crate::fleet::Server;

/// Which partition of the fleet a request was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    /// No country code: every routable node.
    All,
    /// Nodes dedicated to the requested country.
    Regional,
    /// Unrestricted nodes.
    Global,
}

impl PoolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoolKind::All => "all",
            PoolKind::Regional => "regional",
            PoolKind::Global => "global",
        }
    }
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the candidate pool for `country_code`.
pub fn candidate_pool<'a, I>(servers: I, country_code: &str) -> (PoolKind, Vec<&'a Server>)
where
    I: IntoIterator<Item = &'a Server>,
{
    let routable = servers.into_iter().filter(|s| s.is_routable());

    if country_code.is_empty() {
        return (PoolKind::All, routable.collect());
    }

    let mut regional = Vec::new();
    let mut global = Vec::new();
    for server in routable {
        if server.is_global() {
            global.push(server);
        } else if server.region == country_code {
            regional.push(server);
        }
    }

    if regional.is_empty() {
        (PoolKind::Global, global)
    } else {
        (PoolKind::Regional, regional)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fleet() -> Vec<Server> {
        vec![
            Server::new("ru1", "ru1").with_region("RU").with_sessions(9),
            Server::new("ru2", "ru2").with_region("RU").with_online(false),
            Server::new("de1", "de1").with_region("DE"),
            Server::new("str1", "str1"),
            Server::new("str2", "str2").with_enable(false),
        ]
    }

    fn names(pool: &[&Server]) -> Vec<String> {
        let mut n: Vec<_> = pool.iter().map(|s| s.name.clone()).collect();
        n.sort();
        n
    }

    #[test]
    fn test_empty_country_takes_all_routable() {
        let fleet = fleet();
        let (kind, pool) = candidate_pool(&fleet, "");
        assert_eq!(kind, PoolKind::All);
        assert_eq!(names(&pool), vec!["de1", "ru1", "str1"]);
    }

    #[test]
    fn test_regional_excludes_global() {
        let fleet = fleet();
        let (kind, pool) = candidate_pool(&fleet, "RU");
        assert_eq!(kind, PoolKind::Regional);
        assert_eq!(names(&pool), vec!["ru1"]);
    }

    #[test]
    fn test_unknown_country_falls_back_to_global() {
        let fleet = fleet();
        let (kind, pool) = candidate_pool(&fleet, "FR");
        assert_eq!(kind, PoolKind::Global);
        assert_eq!(names(&pool), vec!["str1"]);
    }

    #[test]
    fn test_offline_regional_falls_back_to_global() {
        let fleet = vec![
            Server::new("ru1", "ru1").with_region("RU").with_online(false),
            Server::new("str1", "str1"),
        ];
        let (kind, pool) = candidate_pool(&fleet, "RU");
        assert_eq!(kind, PoolKind::Global);
        assert_eq!(names(&pool), vec!["str1"]);
    }
}
