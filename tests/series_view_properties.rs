use chrono::{Days, NaiveDate};
use quickcheck_macros::quickcheck;
use valuation_view::data::{Dataset, Record, Selection, SeriesView};

const CATEGORIES: [&str; 5] = ["Santos-1", "Barcelona", "Paris SG", "Al-Hilal", "Santos-2"];

/// Small date range so equal timestamps show up often.
fn dataset(raw: &[(u8, u16, u8)]) -> Dataset {
    let base = NaiveDate::from_ymd_opt(2009, 1, 1).unwrap();
    Dataset::from_records(
        raw.iter()
            .map(|&(day, value, cat)| {
                Record::new(
                    base + Days::new(u64::from(day % 64)),
                    f64::from(value),
                    CATEGORIES[cat as usize % CATEGORIES.len()],
                )
            })
            .collect(),
    )
}

/// Bit `i` of `mask` selects `CATEGORIES[i]`; bit 5 adds an unknown category.
fn selection(mask: u8) -> Selection {
    let mut selection: Selection = CATEGORIES
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, c)| *c)
        .collect();
    if mask & (1 << 5) != 0 {
        selection.set("Unknown", true);
    }
    selection
}

#[quickcheck]
fn filtered_records_are_selected(raw: Vec<(u8, u16, u8)>, mask: u8) -> bool {
    let selection = selection(mask);
    SeriesView::filter(&dataset(&raw), &selection)
        .records()
        .iter()
        .all(|r| selection.contains(&r.category))
}

#[quickcheck]
fn filtered_records_are_time_ordered(raw: Vec<(u8, u16, u8)>, mask: u8) -> bool {
    let view = SeriesView::filter(&dataset(&raw), &selection(mask));
    view.records()
        .windows(2)
        .all(|w| w[0].timestamp <= w[1].timestamp)
}

#[quickcheck]
fn empty_selection_yields_nothing(raw: Vec<(u8, u16, u8)>) -> bool {
    SeriesView::filter(&dataset(&raw), &Selection::new()).is_empty()
}

#[quickcheck]
fn selecting_everything_keeps_every_record(raw: Vec<(u8, u16, u8)>) -> bool {
    let dataset = dataset(&raw);
    let view = SeriesView::filter(&dataset, &Selection::all(dataset.categories()));

    let mut expected = dataset.records().to_vec();
    expected.sort_by_key(|r| r.timestamp);
    view.records() == expected.as_slice()
}

#[quickcheck]
fn refiltering_is_a_no_op(raw: Vec<(u8, u16, u8)>, mask: u8) -> bool {
    let selection = selection(mask);
    let once = SeriesView::filter(&dataset(&raw), &selection);
    let twice = SeriesView::filter(&once.to_dataset(), &selection);
    once == twice
}

#[quickcheck]
fn chart_series_partition_the_view(raw: Vec<(u8, u16, u8)>, mask: u8) -> bool {
    let view = SeriesView::filter(&dataset(&raw), &selection(mask));
    let series = SeriesView::to_chart_series(&view);

    let mut distinct: Vec<&str> = view.records().iter().map(|r| r.category.as_str()).collect();
    distinct.sort_unstable();
    distinct.dedup();

    let one_group_per_category = series.len() == distinct.len()
        && series.iter().all(|s| !s.points.is_empty());
    let groups_time_ordered = series
        .iter()
        .all(|s| s.points.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    let total: usize = series.iter().map(|s| s.points.len()).sum();
    let every_record_once = total == view.len()
        && view.records().iter().all(|r| {
            series.iter().any(|s| {
                s.category == r.category
                    && s.points
                        .iter()
                        .any(|p| p.timestamp == r.timestamp && p.value == r.value)
            })
        });

    one_group_per_category && groups_time_ordered && every_record_once
}

#[quickcheck]
fn table_rows_mirror_the_view(raw: Vec<(u8, u16, u8)>, mask: u8) -> bool {
    let view = SeriesView::filter(&dataset(&raw), &selection(mask));
    let rows = SeriesView::to_table(&view);
    rows.len() == view.len()
        && rows.iter().zip(view.records()).all(|(row, r)| {
            row.timestamp == r.timestamp && row.value == r.value && row.category == r.category
        })
}

#[test]
fn barcelona_example() {
    let dataset = Dataset::from_records(vec![
        Record::new(NaiveDate::from_ymd_opt(2013, 9, 2).unwrap(), 50.0, "Barcelona"),
        Record::new(NaiveDate::from_ymd_opt(2009, 7, 23).unwrap(), 1.0, "Santos-1"),
    ]);

    let view = SeriesView::filter(&dataset, &Selection::all(["Barcelona"]));
    assert_eq!(
        view.records(),
        &[Record::new(NaiveDate::from_ymd_opt(2013, 9, 2).unwrap(), 50.0, "Barcelona")]
    );

    assert!(SeriesView::filter(&dataset, &Selection::all(["Unknown"])).is_empty());
}
