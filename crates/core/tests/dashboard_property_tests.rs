//! Property-based integration tests for the dashboard store.
//!
//! These tests verify that reorder and export/import hold their contracts
//! across random widget collections, using the `proptest` crate.

use std::sync::Arc;

use finboard_core::widgets::{CardMapping, LineMapping, TableMapping};
use finboard_core::{DashboardStore, MemoryStorage, NewWidget, WidgetKind};
use finboard_market_data::{FieldFormat, ParamValue, Params, ProviderId};
use proptest::prelude::*;

// =============================================================================
// Generators
// =============================================================================

fn arb_provider() -> impl Strategy<Value = ProviderId> {
    prop_oneof![
        Just(ProviderId::Finnhub),
        Just(ProviderId::AlphaVantage),
        Just(ProviderId::Indian),
    ]
}

fn arb_kind() -> impl Strategy<Value = WidgetKind> {
    prop_oneof![
        (
            proptest::collection::vec("[a-z]{1,3}(\\.[a-z]{1,3})?", 0..4),
            prop_oneof![
                Just(FieldFormat::Number),
                Just(FieldFormat::Currency),
                Just(FieldFormat::Percent)
            ],
        )
            .prop_map(|(paths, format)| WidgetKind::Card(CardMapping { paths, format })),
        proptest::collection::vec("[a-z0-9. ]{1,12}", 0..5)
            .prop_map(|columns| WidgetKind::Table(TableMapping { columns })),
        ("[a-z]{1,6}", "[a-z]{1,6}").prop_map(|(x, y)| WidgetKind::Line(LineMapping::new(x, y))),
    ]
}

fn arb_params() -> impl Strategy<Value = Params> {
    proptest::collection::btree_map(
        "[a-z]{1,8}",
        prop_oneof![
            "[A-Z.]{1,10}".prop_map(ParamValue::from),
            any::<i32>().prop_map(|n| ParamValue::from(n as i64)),
            any::<bool>().prop_map(ParamValue::from),
        ],
        0..4,
    )
}

/// Generates a random add-widget request.
fn arb_new_widget() -> impl Strategy<Value = NewWidget> {
    (
        proptest::option::of("[A-Za-z ]{0,16}"),
        proptest::option::of("[A-Za-z ]{0,16}"),
        arb_provider(),
        "/?[a-z_/]{1,16}",
        arb_params(),
        proptest::option::of(0u64..600_000),
        arb_kind(),
    )
        .prop_map(
            |(name, title, provider, endpoint, params, refresh_ms, kind)| NewWidget {
                name,
                title,
                provider,
                endpoint,
                params,
                refresh_ms,
                kind,
            },
        )
}

fn populated_store(widgets: Vec<NewWidget>) -> DashboardStore {
    let store = DashboardStore::open(Arc::new(MemoryStorage::new())).unwrap();
    for widget in widgets {
        store.add_widget(widget).unwrap();
    }
    store
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Export followed by import yields a deep-equal collection.
    #[test]
    fn prop_export_import_round_trip(widgets in proptest::collection::vec(arb_new_widget(), 0..8)) {
        let store = populated_store(widgets);
        let before = store.widgets();

        let text = store.export_json().unwrap();
        store.import_config(finboard_core::DashboardExport::new(Vec::new())).unwrap();
        store.import_json(&text).unwrap();

        prop_assert_eq!(store.widgets(), before);
    }

    /// Reorder with equal or out-of-range indices changes nothing.
    #[test]
    fn prop_reorder_noop_outside_range(
        widgets in proptest::collection::vec(arb_new_widget(), 0..6),
        from in 0usize..10,
        to in 0usize..10,
    ) {
        let store = populated_store(widgets);
        let before = store.widgets();
        let len = before.len();
        prop_assume!(from == to || from >= len || to >= len);

        prop_assert!(!store.reorder(from, to).unwrap());
        prop_assert_eq!(store.widgets(), before);
    }

    /// A valid reorder is a permutation that puts the moved item at `to`.
    #[test]
    fn prop_reorder_moves_item(
        widgets in proptest::collection::vec(arb_new_widget(), 2..6),
        from in 0usize..6,
        to in 0usize..6,
    ) {
        let store = populated_store(widgets);
        let before = store.widgets();
        let len = before.len();
        prop_assume!(from != to && from < len && to < len);

        prop_assert!(store.reorder(from, to).unwrap());
        let after = store.widgets();
        prop_assert_eq!(after.len(), len);
        prop_assert_eq!(&after[to], &before[from]);

        let mut before_ids: Vec<_> = before.iter().map(|w| w.id.clone()).collect();
        let mut after_ids: Vec<_> = after.iter().map(|w| w.id.clone()).collect();
        before_ids.sort();
        after_ids.sort();
        prop_assert_eq!(before_ids, after_ids);
    }

    /// Every added widget gets a distinct id and a non-empty title.
    #[test]
    fn prop_added_widgets_are_well_formed(widgets in proptest::collection::vec(arb_new_widget(), 1..8)) {
        let store = populated_store(widgets);
        let all = store.widgets();
        let mut ids: Vec<_> = all.iter().map(|w| w.id.clone()).collect();
        ids.dedup();
        prop_assert_eq!(ids.len(), all.len());
        prop_assert!(all.iter().all(|w| w.title.as_deref().is_some_and(|t| !t.is_empty())));
        prop_assert!(all.iter().all(|w| !w.name.is_empty()));
    }
}
