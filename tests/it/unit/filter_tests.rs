//! Unit tests for the filter engine.

use crate::helpers::{TrackBuilder, popularity_tracks, sample_tracks};
use tracktable::columns::ColumnSet;
use tracktable::data::{ColumnId, Dataset};
use tracktable::engine::filter::{self, CompiledFilter};
use tracktable::engine::{FilterSpec, FilterValue, RangeInput};

fn indices(dataset: &Dataset, spec: &FilterSpec) -> Vec<usize> {
    filter::apply(dataset, spec, &ColumnSet::default())
        .iter()
        .map(|r| r.id.index())
        .collect()
}

#[test]
fn test_popularity_range_scenario() {
    let dataset = Dataset::from_records(popularity_tracks());
    let mut spec = FilterSpec::new();
    spec.set(
        ColumnId::Popularity,
        FilterValue::Range(RangeInput::new(Some(80.0), Some(100.0))),
    );
    assert_eq!(indices(&dataset, &spec), vec![1, 2, 4]);
}

#[test]
fn test_open_ended_ranges() {
    let dataset = Dataset::from_records(popularity_tracks());
    let mut spec = FilterSpec::new();

    spec.set(ColumnId::Popularity, FilterValue::Range(RangeInput::parse("85", "")));
    assert_eq!(indices(&dataset, &spec), vec![1, 2, 4]);

    spec.set(ColumnId::Popularity, FilterValue::Range(RangeInput::parse("", "40")));
    assert_eq!(indices(&dataset, &spec), vec![0, 3]);

    // Both bounds unparsable: no constraint
    spec.set(ColumnId::Popularity, FilterValue::Range(RangeInput::parse("x", "y")));
    assert_eq!(indices(&dataset, &spec), vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_identity_pass_through_preserves_order() {
    let dataset = Dataset::from_records(sample_tracks(50));
    let all: Vec<usize> = (0..50).collect();
    assert_eq!(indices(&dataset, &FilterSpec::new()), all);

    let compiled = CompiledFilter::compile(&FilterSpec::new(), &ColumnSet::default());
    assert!(compiled.is_pass_through());
}

#[test]
fn test_search_matches_any_searchable_column() {
    let dataset = Dataset::from_records(vec![
        TrackBuilder::new("Intro").artist("The XX").build(),
        TrackBuilder::new("Angels").album("xx").build(),
        TrackBuilder::new("Crystalised").genre("indie").build(),
    ]);
    let mut spec = FilterSpec::new();
    spec.set_search("XX");
    assert_eq!(indices(&dataset, &spec), vec![0, 1]);
}

#[test]
fn test_filters_combine_with_and() {
    let dataset = Dataset::from_records(sample_tracks(30));
    let mut spec = FilterSpec::new();
    spec.set(ColumnId::Genre, FilterValue::Equality("rock".into()));
    spec.set(
        ColumnId::Energy,
        FilterValue::Range(RangeInput::new(Some(10.0), Some(20.0))),
    );
    // rock is every third track (0, 3, 6, ...) and energy is i/100
    assert_eq!(indices(&dataset, &spec), vec![12, 15, 18]);
}

#[test]
fn test_filter_on_column_without_filter_is_ignored() {
    let dataset = Dataset::from_records(sample_tracks(5));
    let mut spec = FilterSpec::new();
    spec.set(ColumnId::Tempo, FilterValue::Range(RangeInput::new(Some(1000.0), None)));
    assert_eq!(indices(&dataset, &spec).len(), 5);
}
