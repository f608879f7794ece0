//! Guard predicates for controlling transitions.
//!
//! Guards decide whether a transition may apply to an object given the
//! arguments an event was fired with. Resolution may evaluate a guard more
//! than once per fire, so guards must be deterministic and free of side
//! effects.

use std::fmt;
use std::sync::Arc;

/// Predicate over the host object and fire arguments.
///
/// # Example
///
/// ```rust
/// use statewise::core::Guard;
///
/// struct Order {
///     paid: bool,
/// }
///
/// let is_paid = Guard::new(|order: &Order, _args: &()| order.paid);
///
/// assert!(is_paid.check(&Order { paid: true }, &()));
/// assert!(!is_paid.check(&Order { paid: false }, &()));
/// ```
pub struct Guard<O, A = ()> {
    predicate: Arc<dyn Fn(&O, &A) -> bool + Send + Sync>,
}

impl<O, A> Guard<O, A> {
    /// Create a guard from a predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&O, &A) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    pub fn check(&self, object: &O, args: &A) -> bool {
        (self.predicate)(object, args)
    }
}

impl<O, A> Clone for Guard<O, A> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<O, A> fmt::Debug for Guard<O, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Account {
        balance: i64,
    }

    #[test]
    fn guard_reads_object() {
        let guard = Guard::new(|account: &Account, _: &()| account.balance > 0);

        assert!(guard.check(&Account { balance: 10 }, &()));
        assert!(!guard.check(&Account { balance: 0 }, &()));
    }

    #[test]
    fn guard_reads_fire_arguments() {
        let guard = Guard::new(|account: &Account, amount: &i64| account.balance >= *amount);
        let account = Account { balance: 50 };

        assert!(guard.check(&account, &50));
        assert!(!guard.check(&account, &51));
    }

    #[test]
    fn guard_is_deterministic() {
        let account = Account { balance: 5 };
        let guard = Guard::new(|account: &Account, _: &()| account.balance % 2 == 1);

        assert_eq!(guard.check(&account, &()), guard.check(&account, &()));
    }

    #[test]
    fn cloned_guard_shares_predicate() {
        let guard = Guard::new(|account: &Account, _: &()| account.balance < 0);
        let cloned = guard.clone();

        let overdrawn = Account { balance: -1 };
        assert_eq!(guard.check(&overdrawn, &()), cloned.check(&overdrawn, &()));
    }
}
