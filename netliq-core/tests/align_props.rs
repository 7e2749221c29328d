use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use netliq_core::{Field, Series, Table, align, merge_tables, resample_to_daily};
use proptest::prelude::*;

fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 3, 1)
        .unwrap()
        .checked_add_days(Days::new(offset))
        .unwrap()
}

fn arb_series() -> impl Strategy<Value = Series> {
    proptest::collection::vec((0u64..200, 0.0f64..5.0e3), 1..30)
        .prop_map(|obs| obs.into_iter().map(|(o, v)| (day(o), v)).collect())
}

fn table_of(cols: Vec<(Field, Series)>) -> Table {
    resample_to_daily(cols.into_iter().collect::<BTreeMap<_, _>>())
}

fn first_obs(s: &Series) -> NaiveDate {
    *s.keys().next().unwrap()
}

fn last_obs(s: &Series) -> NaiveDate {
    *s.keys().next_back().unwrap()
}

proptest! {
    #[test]
    fn aligned_table_is_complete_contiguous_and_windowed(
        w in arb_series(),
        r in arb_series(),
        s in arb_series(),
        cutoff_off in 0u64..220,
    ) {
        let cutoff = day(cutoff_off);
        let macro_t = table_of(vec![(Field::Walcl, w.clone()), (Field::Rrp, r.clone())]);
        let market_t = table_of(vec![(Field::Spy, s.clone())]);
        let out = align([macro_t, market_t], Some(cutoff));

        let fields: Vec<Field> = out.fields().collect();
        prop_assert_eq!(fields, vec![Field::Walcl, Field::Rrp, Field::Spy]);

        for w in out.index().windows(2) {
            prop_assert_eq!((w[1] - w[0]).num_days(), 1);
        }
        for f in [Field::Walcl, Field::Rrp, Field::Spy] {
            prop_assert!(out.column(f).unwrap().iter().all(Option::is_some));
        }

        let complete_from = first_obs(&w).max(first_obs(&r)).max(first_obs(&s));
        let end = last_obs(&w).max(last_obs(&r)).max(last_obs(&s));
        let expected_first = complete_from.max(cutoff);
        if expected_first <= end {
            prop_assert_eq!(out.first_date(), Some(expected_first));
            prop_assert_eq!(out.last_date(), Some(end));
        } else {
            prop_assert!(out.is_empty());
        }
    }
}

#[test]
fn weekly_macro_and_daily_market_align_on_common_days() {
    // Weekly balance sheet on Wednesdays, daily market data.
    let walcl: Series = [(day(2), 7000.0), (day(9), 7050.0), (day(16), 7100.0)]
        .into_iter()
        .collect();
    let spy: Series = (0..=20).map(|o| (day(o), 400.0 + o as f64)).collect();
    let out = align(
        [
            table_of(vec![(Field::Walcl, walcl)]),
            table_of(vec![(Field::Spy, spy)]),
        ],
        None,
    );

    assert_eq!(out.first_date(), Some(day(2)));
    assert_eq!(out.last_date(), Some(day(20)));
    let walcl = out.column(Field::Walcl).unwrap();
    // Day 20 carries the last weekly print forward.
    assert_eq!(walcl.last().copied().flatten(), Some(7100.0));
    assert_eq!(walcl[6], Some(7000.0));
    assert_eq!(walcl[7], Some(7050.0));
}

#[test]
fn first_table_wins_on_duplicate_columns() {
    let a = table_of(vec![(Field::Vix, [(day(0), 15.0)].into_iter().collect())]);
    let b = table_of(vec![(Field::Vix, [(day(0), 99.0)].into_iter().collect())]);
    let merged = merge_tables([a, b]);
    assert_eq!(merged.column(Field::Vix).unwrap(), &[Some(15.0)]);
}

#[test]
fn merge_spans_gap_between_disjoint_ranges() {
    let a = table_of(vec![(Field::Walcl, [(day(0), 1.0)].into_iter().collect())]);
    let b = table_of(vec![(Field::Spy, [(day(3), 2.0)].into_iter().collect())]);
    let merged = merge_tables([a, b]);
    assert_eq!(merged.len(), 4);
    assert_eq!(
        merged.column(Field::Walcl).unwrap(),
        &[Some(1.0), None, None, None]
    );
    assert_eq!(
        merged.column(Field::Spy).unwrap(),
        &[None, None, None, Some(2.0)]
    );
}

#[test]
fn cutoff_past_every_row_leaves_columns_without_rows() {
    let a = table_of(vec![(Field::Tga, [(day(0), 700.0)].into_iter().collect())]);
    let out = align([a], Some(day(10)));
    assert!(out.is_empty());
    assert!(out.contains(Field::Tga));
}

#[test]
fn source_without_observations_empties_the_aligned_table() {
    let walcl = table_of(vec![(
        Field::Walcl,
        [(day(0), 7000.0), (day(1), 7010.0)].into_iter().collect(),
    )]);
    let rrp = table_of(vec![(Field::Rrp, Series::new())]);
    assert!(rrp.is_empty());
    assert!(rrp.contains(Field::Rrp));

    let merged = merge_tables([walcl.clone(), rrp.clone()]);
    assert_eq!(merged.column(Field::Rrp).unwrap(), &[None, None]);

    let out = align([walcl, rrp], None);
    assert!(out.is_empty());
    assert_eq!(out.fields().collect::<Vec<_>>(), vec![Field::Walcl, Field::Rrp]);
}

#[test]
fn aligning_nothing_is_empty() {
    let out = align(Vec::<Table>::new(), None);
    assert!(out.is_empty());
}
