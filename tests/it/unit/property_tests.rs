//! Property tests for the view pipeline.

use crate::helpers::{TrackBuilder, controller_with, result_indices};
use proptest::prelude::*;
use tracktable::columns::ColumnSet;
use tracktable::data::{ColumnId, Dataset, Record, RowId};
use tracktable::engine::filter;
use tracktable::engine::pagination::slice;
use tracktable::engine::sort;
use tracktable::engine::{
    FilterSpec, FilterValue, PaginationState, RangeInput, SortKey, SortSpec, compute_window,
};
use tracktable::layout::ColumnLayout;
use tracktable::layout::model::{decode, encode};

fn tracks_with_popularity(values: &[i64]) -> Vec<Record> {
    values
        .iter()
        .enumerate()
        .map(|(i, p)| TrackBuilder::new(format!("t{}", i)).popularity(*p).build())
        .collect()
}

/// Tracks whose text fields share a small alphabet, so text filters and
/// search terms hit often.
fn track_strategy() -> impl Strategy<Value = TrackBuilder> {
    (
        "[abAB ]{0,5}",
        "[abAB ]{0,5}",
        "[abAB ]{0,5}",
        prop::sample::select(vec!["rock", "pop", "Rock", "jazz"]),
        0i64..=100,
        0u32..=100,
    )
        .prop_map(|(name, artist, album, genre, popularity, energy)| {
            TrackBuilder::new(name)
                .artist(artist)
                .album(album)
                .genre(genre)
                .popularity(popularity)
                .energy(energy as f64 / 100.0)
        })
}

proptest! {
    #[test]
    fn prop_filters_admit_exactly_rows_matching_every_predicate(
        rows in prop::collection::vec(track_strategy(), 0..120),
        track_text in prop::option::of("[abAB]{1,2}"),
        artist_text in prop::option::of("[abAB]{1,2}"),
        genre in prop::option::of(prop::sample::select(vec!["rock", "pop", "Rock"])),
        popularity in (prop::option::of(0i64..=100), prop::option::of(0i64..=100)),
        energy in (prop::option::of(0i64..=100), prop::option::of(0i64..=100)),
        search in prop::option::of("[abAB]{1,2}"),
    ) {
        let records: Vec<Record> = rows.into_iter().map(|t| t.build()).collect();
        let dataset = Dataset::from_records(records.clone());

        let mut spec = FilterSpec::new();
        if let Some(text) = &track_text {
            spec.set(ColumnId::TrackName, FilterValue::Text(text.clone()));
        }
        if let Some(text) = &artist_text {
            spec.set(ColumnId::ArtistName, FilterValue::Text(text.clone()));
        }
        if let Some(value) = genre {
            spec.set(ColumnId::Genre, FilterValue::Equality(value.to_string()));
        }
        let to_range = |(lo, hi): (Option<i64>, Option<i64>)| {
            RangeInput::new(lo.map(|v| v as f64), hi.map(|v| v as f64))
        };
        spec.set(ColumnId::Popularity, FilterValue::Range(to_range(popularity)));
        spec.set(ColumnId::Energy, FilterValue::Range(to_range(energy)));
        if let Some(term) = &search {
            spec.set_search(term.clone());
        }

        let admitted: Vec<usize> = filter::apply(&dataset, &spec, &ColumnSet::default())
            .iter()
            .map(|r| r.id.index())
            .collect();

        let contains = |haystack: &str, needle: &str| {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        };
        let in_range = |v: f64, (lo, hi): (Option<i64>, Option<i64>), scale: f64| {
            lo.is_none_or(|lo| v >= lo as f64 / scale) && hi.is_none_or(|hi| v <= hi as f64 / scale)
        };

        for (index, record) in records.iter().enumerate() {
            let checks = [
                track_text.as_ref().is_none_or(|t| contains(&record.track_name, t)),
                artist_text.as_ref().is_none_or(|t| contains(&record.artist_name, t)),
                genre.is_none_or(|g| record.genre == g),
                in_range(record.popularity as f64, popularity, 1.0),
                in_range(record.energy, energy, 100.0),
                search.as_ref().is_none_or(|term| {
                    [
                        &record.track_name,
                        &record.artist_name,
                        &record.album_name,
                        &record.genre,
                    ]
                    .iter()
                    .any(|field| contains(field, term))
                }),
            ];
            if admitted.contains(&index) {
                prop_assert!(checks.iter().all(|c| *c), "row {} admitted but fails {:?}", index, checks);
            } else {
                prop_assert!(checks.iter().any(|c| !*c), "row {} rejected but passes all", index);
            }
        }

        // Dataset order is preserved
        prop_assert!(admitted.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_sort_is_ordered_and_stable(
        values in prop::collection::vec(0i64..10, 0..200),
        descending in any::<bool>(),
    ) {
        let dataset = Dataset::from_records(tracks_with_popularity(&values));
        let key = if descending {
            SortKey::descending(ColumnId::Popularity)
        } else {
            SortKey::ascending(ColumnId::Popularity)
        };
        let sorted = sort::apply(dataset.rows().collect(), &SortSpec::new(vec![key]));
        prop_assert_eq!(sorted.len(), values.len());

        for pair in sorted.windows(2) {
            let (a, b) = (pair[0].record.popularity, pair[1].record.popularity);
            if descending {
                prop_assert!(a >= b);
            } else {
                prop_assert!(a <= b);
            }
            if a == b {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }

    #[test]
    fn prop_pages_partition_the_result(
        total in 0usize..500,
        size_index in 0usize..4,
    ) {
        let options = vec![25, 50, 100, 200];
        let rows: Vec<usize> = (0..total).collect();
        let mut state = PaginationState::new(options[size_index], options.clone());
        state.set_total_rows(total);

        let mut seen = Vec::new();
        for index in 0..state.page_count() {
            state.set_page_index(index);
            prop_assert_eq!(state.page_index(), index);
            let (page, count) = slice(&rows, &state);
            prop_assert_eq!(count, total);
            prop_assert!(page.len() <= state.page_size());
            seen.extend_from_slice(page);
        }
        prop_assert_eq!(seen, rows);
    }

    #[test]
    fn prop_window_is_bounded_and_covers_viewport(
        total in 0usize..100_000,
        row_height in 1u32..200,
        viewport in 0u32..2000,
        scroll in 0u32..10_000_000,
        overscan in 0usize..20,
    ) {
        let h = row_height as f64;
        let v = viewport as f64;
        let max_scroll = (total as f64 * h - v).max(0.0);
        let s = (scroll as f64).min(max_scroll);

        let window = compute_window(total, h, v, s, overscan);
        prop_assert!(window.start <= window.end);
        prop_assert!(window.end <= total);

        let bound = (v / h).ceil() as usize + 1 + 2 * overscan;
        prop_assert!(window.len() <= bound);

        // Every row intersecting the viewport is materialized
        if total > 0 {
            let first = (s / h).floor() as usize;
            let last = (((s + v) / h).ceil() as usize).min(total);
            prop_assert!(window.start <= first.min(total));
            prop_assert!(window.end >= last);
        }
    }

    #[test]
    fn prop_layout_survives_encode_decode(
        hidden in prop::collection::vec(any::<bool>(), 11),
        order in Just(ColumnId::ALL.to_vec()).prop_shuffle(),
        widths in prop::collection::vec(prop::option::of(0u32..1000), 11),
    ) {
        let columns = ColumnSet::default();
        let mut layout = ColumnLayout::default();
        for (i, id) in ColumnId::ALL.iter().enumerate() {
            if hidden[i] {
                layout.visibility.insert(*id, false);
            }
            if let Some(px) = widths[i] {
                let def = columns.get(*id).unwrap();
                layout.sizing.insert(*id, def.clamp_size(px));
            }
        }
        layout.order = order;

        let bytes = encode(&layout).unwrap();
        prop_assert_eq!(decode(&bytes, &columns), Some(layout));
    }

    #[test]
    fn prop_selection_survives_query_changes(
        picks in prop::collection::btree_set(0usize..60, 0..20),
        lo in 0i64..100,
    ) {
        let values: Vec<i64> = (0..60).map(|i| (i * 17 % 101) as i64).collect();
        let mut controller = controller_with(tracks_with_popularity(&values));
        for i in &picks {
            controller.toggle_row(RowId(*i));
        }

        controller.set_filter(
            ColumnId::Popularity,
            FilterValue::Range(RangeInput::new(Some(lo as f64), None)),
        );
        controller.toggle_sort(ColumnId::Popularity);
        controller.last_page();

        let selected: Vec<usize> = controller.selection().ids().iter().map(|id| id.index()).collect();
        prop_assert_eq!(selected, picks.iter().copied().collect::<Vec<_>>());
        prop_assert_eq!(controller.selected_count(), picks.len());
        prop_assert!(result_indices(&controller).iter().all(|i| values[*i] >= lo));

        controller.clear_filter(ColumnId::Popularity);
        prop_assert_eq!(result_indices(&controller).len(), values.len());
        for i in &picks {
            prop_assert!(controller.is_selected(RowId(*i)));
        }
    }
}
