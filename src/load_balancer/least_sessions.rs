//! Least sessions load balancing strategy.

use crate::fleet::Server;

/// Every node tied at the pool's minimum session count, ordered by name.
///
/// Returns `None` for an empty pool.
pub fn least_loaded<'a>(pool: &[&'a Server]) -> Option<(usize, Vec<&'a Server>)> {
    let min = pool.iter().map(|s| s.sessions).min()?;
    let mut tied: Vec<&Server> = pool.iter().copied().filter(|s| s.sessions == min).collect();
    // Stable order so an injected random source gives reproducible picks.
    tied.sort_by(|a, b| a.name.cmp(&b.name));
    Some((min, tied))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_least_loaded() {
        let a = Server::new("str1", "a").with_sessions(5);
        let b = Server::new("str2", "b").with_sessions(2);
        let c = Server::new("str3", "c").with_sessions(2);

        let (min, tied) = least_loaded(&[&a, &c, &b]).unwrap();
        assert_eq!(min, 2);
        let names: Vec<_> = tied.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["str2", "str3"]);
    }

    #[test]
    fn test_empty_pool() {
        assert!(least_loaded(&[]).is_none());
    }
}
