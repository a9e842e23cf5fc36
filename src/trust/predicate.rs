//! Trust decisions over address strings.

use std::net::IpAddr;

use crate::trust::TrustSet;

/// Decides whether an address string belongs to a trusted proxy.
///
/// Implemented by [`TrustSet`] and by any `Fn(&str) -> bool`, so tests and
/// callers with their own policy can pass a closure.
pub trait TrustPredicate {
    fn is_trusted(&self, addr: &str) -> bool;
}

impl<F> TrustPredicate for F
where
    F: Fn(&str) -> bool,
{
    fn is_trusted(&self, addr: &str) -> bool {
        self(addr)
    }
}

impl TrustPredicate for TrustSet {
    /// An empty set trusts any string, parseable or not. Otherwise the string
    /// must parse as an address inside one of the prefixes.
    fn is_trusted(&self, addr: &str) -> bool {
        if self.is_empty() {
            return true;
        }

        match addr.parse::<IpAddr>() {
            Ok(ip) => self.contains(&ip),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check<P: TrustPredicate + ?Sized>(predicate: &P, addr: &str) -> bool {
        predicate.is_trusted(addr)
    }

    #[test]
    fn closures_are_predicates() {
        let allow_all = |_: &str| true;
        let deny_all = |_: &str| false;
        assert!(check(&allow_all, "1.2.3.4"));
        assert!(!check(&deny_all, "1.2.3.4"));
    }

    #[test]
    fn trait_objects_work() {
        let set = TrustSet::build(["10.0.0.0/8"]).unwrap();
        let predicate: &dyn TrustPredicate = &set;
        assert!(check(predicate, "10.0.0.1"));
        assert!(!check(predicate, "192.168.0.1"));
    }
}
