use proptest::prelude::*;

use stampgate_types::{Operator, Timestamp, ValidityWindow};

proptest! {
    /// A window covers `t` exactly when `issued <= t < expires`.
    #[test]
    fn window_is_half_open(issued in 0u64..1_000_000, len in 0u64..1_000_000, t in 0u64..2_000_000) {
        let expires = issued + len;
        let window = ValidityWindow::new(Timestamp::new(issued), Timestamp::new(expires));
        prop_assert_eq!(window.covers(Timestamp::new(t)), issued <= t && t < expires);
    }

    /// The issuance instant is always covered by a non-empty window, the expiry never.
    #[test]
    fn window_boundaries(issued in 0u64..u64::MAX / 2, len in 1u64..1_000_000) {
        let window = ValidityWindow::new(Timestamp::new(issued), Timestamp::new(issued + len));
        prop_assert!(window.covers(Timestamp::new(issued)));
        prop_assert!(!window.covers(Timestamp::new(issued + len)));
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// AND implies OR for any non-empty outcome set.
    #[test]
    fn and_implies_or(outcomes in prop::collection::vec(any::<bool>(), 1..16)) {
        let all = Operator::And.combine(outcomes.iter().copied());
        let any = Operator::Or.combine(outcomes.iter().copied());
        prop_assert!(!all || any);
        prop_assert_eq!(all, outcomes.iter().all(|b| *b));
        prop_assert_eq!(any, outcomes.iter().any(|b| *b));
    }
}
