//! Property tests for serial ordering and dispatch number generation.

use std::cmp::Ordering;

use chrono::NaiveDate;
use proptest::prelude::*;

use factory_dispatch::domain::dispatch::{reconcile, DispatchNumber, DispatchPrefix};
use factory_dispatch::domain::stock::{natural_cmp, ScopedStock, SerialNumber};

fn serial_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z]{0,3}-?[0-9]{1,5}[A-Za-z]{0,2}"
}

fn serials(raw: &[String]) -> Vec<SerialNumber> {
    let mut serials: Vec<SerialNumber> = raw
        .iter()
        .filter_map(|s| SerialNumber::new(s).ok())
        .collect();
    serials.sort();
    serials.dedup();
    serials
}

proptest! {
    #[test]
    fn natural_order_is_antisymmetric(a in serial_strategy(), b in serial_strategy()) {
        prop_assert_eq!(natural_cmp(&a, &b), natural_cmp(&b, &a).reverse());
    }

    #[test]
    fn natural_order_only_ties_on_equal_strings(a in serial_strategy(), b in serial_strategy()) {
        prop_assert_eq!(natural_cmp(&a, &b) == Ordering::Equal, a == b);
    }

    #[test]
    fn natural_order_is_transitive(
        a in serial_strategy(),
        b in serial_strategy(),
        c in serial_strategy(),
    ) {
        let mut v = vec![a, b, c];
        v.sort_by(|x, y| natural_cmp(x, y));
        prop_assert_ne!(natural_cmp(&v[0], &v[2]), Ordering::Greater);
    }

    #[test]
    fn digit_runs_compare_by_value(n in 0u32..100_000, m in 0u32..100_000) {
        let a = format!("SN{}", n);
        let b = format!("SN{}", m);
        prop_assert_eq!(natural_cmp(&a, &b), n.cmp(&m));
    }

    #[test]
    fn generation_is_deterministic(
        name in "[A-Za-z ]{0,20}",
        raw in proptest::collection::vec(serial_strategy(), 0..8),
        day in 1u32..=28,
    ) {
        let prefix = DispatchPrefix::from_display_name(&name, "FD");
        let date = format!("2024-03-{:02}", day);
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let list = serials(&raw);

        let first = DispatchNumber::generate(&prefix, &date, &list, today);
        let second = DispatchNumber::generate(&prefix, &date, &list, today);

        prop_assert_eq!(&first, &second);
        prop_assert!(first.as_str().starts_with(prefix.as_str()));
        let segment = format!("{:02}0324", day);
        prop_assert!(first.as_str().contains(segment.as_str()));
    }

    #[test]
    fn reconciliation_never_keeps_serials_outside_stock(
        stock in proptest::collection::vec(serial_strategy(), 0..10),
        entered in proptest::collection::vec(serial_strategy(), 0..10),
    ) {
        let available: ScopedStock = serials(&stock).into_iter().collect();
        let result = reconcile(&entered, &available);

        for serial in &result.valid {
            prop_assert!(available.contains(serial));
        }
        let mut sorted = result.valid.clone();
        sorted.sort();
        prop_assert_eq!(&sorted, &result.valid);
    }
}
