//! End-to-end query evaluation over a file-backed store

use std::io::Write;

use wikikb_core::vocab::{rdfs, wikidata};
use wikikb_core::{MemoryTripleStore, Triple};
use wikikb_engine::{
    FilterSpec, KbEngine, OrderSpec, RowSet, SortOrder, TriplePattern,
};

fn entity(id: &str) -> String {
    format!("{}{}", wikidata::ENTITY_NAMESPACE, id)
}

fn direct(id: &str) -> String {
    format!("{}direct/{}", wikidata::PROP_NAMESPACE, id)
}

fn what(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// Three cities with populations, two humans, one birthplace link
fn city_engine() -> KbEngine {
    KbEngine::from_store(MemoryTripleStore::from_triples([
        Triple::new(entity("Q1"), direct("P31"), entity("Q5")),
        Triple::new(entity("Q1"), rdfs::LABEL, "\"Alice\"@en"),
        Triple::new(entity("Q1"), direct("P19"), entity("Q64")),
        Triple::new(entity("Q2"), direct("P31"), entity("Q5")),
        Triple::new(entity("Q2"), rdfs::LABEL, "\"Bob\"@en"),
        Triple::new(entity("Q64"), direct("P31"), entity("Q515")),
        Triple::new(entity("Q64"), direct("P1082"), "\"3644826\"^^xsd:decimal"),
        Triple::new(entity("Q90"), direct("P31"), entity("Q515")),
        Triple::new(entity("Q90"), direct("P1082"), "\"2175601\"^^xsd:decimal"),
        Triple::new(entity("Q220"), direct("P31"), entity("Q515")),
        Triple::new(entity("Q220"), direct("P1082"), "\"2872800\"^^xsd:decimal"),
    ]))
}

#[test]
fn test_instance_of_query_returns_entity_row() {
    let engine = KbEngine::from_store(MemoryTripleStore::from_triples([
        Triple::new(entity("Q1"), direct("P31"), entity("Q5")),
        Triple::new(entity("Q1"), rdfs::LABEL, "\"Alice\"@en"),
    ]));

    let patterns = vec![TriplePattern::parse("?x", &direct("P31"), &entity("Q5")).unwrap()];
    let rows = engine.evaluate(&what(&["?x"]), &patterns, None, None).unwrap();
    assert_eq!(rows, RowSet::Rows(vec![vec![entity("Q1")]]));

    let resolver = engine.resolver();
    assert_eq!(
        resolver.find_label(&entity("Q1")).unwrap().as_deref(),
        Some("Alice")
    );
    assert_eq!(resolver.find_label("Q999").unwrap(), None);
}

#[test]
fn test_engine_opens_store_from_file() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "# test dump")?;
    writeln!(file, "{}\t{}\t{}", entity("Q1"), direct("P31"), entity("Q5"))?;
    writeln!(file, "{}\t{}\t\"Alice\"@en", entity("Q1"), rdfs::LABEL)?;
    file.flush()?;

    let engine = KbEngine::open(file.path())?;
    assert_eq!(engine.store().len(), 2);

    let patterns = vec![TriplePattern::parse("?x", &direct("P31"), &entity("Q5"))?];
    let rows = engine.evaluate(&what(&["?x"]), &patterns, None, None)?;
    assert_eq!(rows, RowSet::Rows(vec![vec![entity("Q1")]]));
    Ok(())
}

#[test]
fn test_open_fails_fast_on_missing_file() {
    assert!(KbEngine::open("/nonexistent/wikidata.tsv").is_err());
}

#[test]
fn test_join_with_order_picks_single_best_city() {
    let engine = city_engine();
    let patterns = vec![
        TriplePattern::parse("?city", &direct("P31"), &entity("Q515")).unwrap(),
        TriplePattern::parse("?city", &direct("P1082"), "?pop").unwrap(),
    ];

    let largest = engine
        .evaluate(
            &what(&["?city"]),
            &patterns,
            None,
            Some(&OrderSpec::new("?pop", SortOrder::Desc)),
        )
        .unwrap();
    assert_eq!(largest, RowSet::Rows(vec![vec![entity("Q64")]]));

    let smallest = engine
        .evaluate(
            &what(&["?city"]),
            &patterns,
            None,
            Some(&OrderSpec::new("?pop", SortOrder::Asc)),
        )
        .unwrap();
    assert_eq!(smallest, RowSet::Rows(vec![vec![entity("Q90")]]));
}

#[test]
fn test_filter_narrows_joined_rows() {
    let engine = city_engine();
    let patterns = vec![
        TriplePattern::parse("?city", &direct("P31"), &entity("Q515")).unwrap(),
        TriplePattern::parse("?city", &direct("P1082"), "?pop").unwrap(),
    ];
    let filters = [FilterSpec::new("?city", "Q9")];

    let rows = engine
        .evaluate(&what(&["?city", "?pop"]), &patterns, Some(&filters), None)
        .unwrap();
    assert_eq!(
        rows,
        RowSet::Rows(vec![vec![
            entity("Q90"),
            "\"2175601\"^^xsd:decimal".to_string(),
        ]])
    );
}

#[test]
fn test_filter_matching_nothing_yields_empty_rows_not_error() {
    let engine = city_engine();
    let patterns = vec![TriplePattern::parse("?city", &direct("P31"), &entity("Q515")).unwrap()];
    let filters = [FilterSpec::new("?city", "no-such-substring")];

    let rows = engine
        .evaluate(&what(&["?city"]), &patterns, Some(&filters), None)
        .unwrap();
    assert_eq!(rows, RowSet::Rows(Vec::new()));
}

#[test]
fn test_count_aggregate_collapses_to_one_row() {
    let engine = city_engine();
    let patterns = vec![TriplePattern::parse("?city", &direct("P31"), &entity("Q515")).unwrap()];

    let rows = engine
        .evaluate(&what(&["?city", "COUNT(?city)"]), &patterns, None, None)
        .unwrap();
    match rows {
        RowSet::Count { values, count } => {
            assert_eq!(count, 3);
            assert_eq!(values, vec![entity("Q220")]);
        }
        other => panic!("expected count row, got {:?}", other),
    }
}

#[test]
fn test_unmatched_query_short_circuits_to_empty_rows() {
    let engine = city_engine();
    let patterns = vec![
        TriplePattern::parse("?x", &direct("P31"), &entity("Q99999")).unwrap(),
        TriplePattern::parse("?x", &direct("P19"), "?city").unwrap(),
    ];

    let rows = engine.evaluate(&what(&["?x"]), &patterns, None, None).unwrap();
    assert_eq!(rows, RowSet::Rows(Vec::new()));
    assert!(rows.is_empty());
}

#[test]
fn test_repeated_evaluation_is_identical() {
    let engine = city_engine();
    let patterns = vec![
        TriplePattern::parse("?ent", &direct("P31"), &entity("Q5")).unwrap(),
        TriplePattern::parse("?ent", &direct("P19"), "?city").unwrap(),
    ];

    let first = engine.evaluate(&what(&["?ent", "?city"]), &patterns, None, None).unwrap();
    let second = engine.evaluate(&what(&["?ent", "?city"]), &patterns, None, None).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first,
        RowSet::Rows(vec![vec![entity("Q1"), entity("Q64")]])
    );
}
