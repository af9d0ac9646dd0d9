use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{BTreeMap, HashMap};
use tailgate::catalog::{Catalog, NotFound};
use tailgate::severity::Severity;

fn builtin() -> Catalog {
    Catalog::builtin().expect("builtin catalog")
}

#[test]
fn random_event_stays_inside_category_and_pool() {
    let catalog = builtin();
    let mut rng = StdRng::seed_from_u64(11);
    let categories: Vec<String> = catalog.categories().map(str::to_string).collect();

    for category in &categories {
        let events = catalog.events(category).expect("category events");
        for _ in 0..200 {
            let draw = catalog.random_event(category, &mut rng).expect("draw");
            let event = events
                .iter()
                .find(|event| event.name == draw.event)
                .expect("event belongs to category");
            assert_eq!(event.severity, draw.severity);
            let pool = catalog.outcomes(event.severity).expect("pool");
            assert!(pool.contains(&draw.outcome), "{} not in {} pool", draw.outcome, event.severity);
        }
    }
}

#[test]
fn random_outcome_stays_inside_pool() {
    let catalog = builtin();
    let mut rng = StdRng::seed_from_u64(12);
    for severity in Severity::ALL {
        let pool = catalog.outcomes(severity).expect("pool");
        for _ in 0..100 {
            let outcome = catalog
                .random_outcome(severity.label(), &mut rng)
                .expect("outcome");
            assert!(pool.iter().any(|entry| entry == outcome));
        }
    }
}

#[test]
fn unknown_keys_are_not_found() {
    let catalog = builtin();
    let mut rng = StdRng::seed_from_u64(13);
    for key in ["", "defense", "Special Teams", "Game  Outcome"] {
        let err = catalog.random_event(key, &mut rng).expect_err("unknown category");
        assert_eq!(err, NotFound::Category(key.to_string()));
        assert_eq!(err.message(), "Category not found");
    }
    for key in ["", "high", "Round Of Shots", "Shots"] {
        let err = catalog.random_outcome(key, &mut rng).expect_err("unknown severity");
        assert_eq!(err, NotFound::Severity(key.to_string()));
        assert_eq!(err.message(), "Severity not found");
    }
}

#[test]
fn listing_matches_builtin_exactly() {
    let listing = builtin().list_categories();

    let mut expected: BTreeMap<&str, Vec<(&str, Severity)>> = BTreeMap::new();
    expected.insert(
        "Defense",
        vec![
            ("Sack", Severity::High),
            ("Interception", Severity::Mid),
            ("Fumble lost", Severity::Mid),
        ],
    );
    expected.insert(
        "Referees",
        vec![
            ("Penalty", Severity::Low),
            ("Offsetting penalties", Severity::Medium),
        ],
    );
    expected.insert(
        "Scoring",
        vec![
            ("Field goal", Severity::Mid),
            ("Long field goal", Severity::High),
            ("2 point conv.", Severity::High),
            ("Touchdown", Severity::High),
            ("Long TD", Severity::RoundOfShots),
            ("Trick play touchdown", Severity::RoundOfShots),
            ("Chip shot FG", Severity::Low),
            ("Pick Six", Severity::High),
            ("Fumble Six", Severity::High),
            ("Safety", Severity::High),
        ],
    );
    expected.insert(
        "Game Outcome",
        vec![
            ("Trick play that works", Severity::Mid),
            ("First Down", Severity::Low),
            ("XP Missed", Severity::RoundOfShots),
            ("FG Missed", Severity::Low),
            ("Turnover on Downs", Severity::Low),
            ("3 & Out", Severity::Low),
            ("Lead change", Severity::Low),
            ("Kneel to end half", Severity::Low),
            ("Home team won coin toss", Severity::Medium),
            ("Away team won coin toss", Severity::Medium),
            ("Game goes to OT", Severity::High),
            ("Goal line stand", Severity::Medium),
            ("Team of your choice loses", Severity::Shot),
        ],
    );

    assert_eq!(listing.len(), expected.len());
    for (category, events) in expected {
        let actual = listing.get(category).expect("category present");
        assert_eq!(actual.len(), events.len(), "{category} event count");
        for (event, severity) in events {
            assert_eq!(actual.get(event), Some(&severity), "{category}/{event}");
        }
    }
}

#[test]
fn listing_serializes_with_wire_labels() {
    let value = serde_json::to_value(builtin().list_categories()).expect("json");
    assert_eq!(value["Game Outcome"]["XP Missed"], "Round of shots");
    assert_eq!(value["Defense"]["Interception"], "Mid");
    assert_eq!(value["Referees"]["Offsetting penalties"], "Medium");
}

#[test]
fn defense_draws_are_roughly_uniform() {
    let catalog = builtin();
    let mut rng = StdRng::seed_from_u64(2024);
    let draws = 10_000;
    let mut counts: HashMap<String, usize> = HashMap::new();
    for _ in 0..draws {
        let draw = catalog.random_event("Defense", &mut rng).expect("draw");
        *counts.entry(draw.event).or_default() += 1;
    }

    assert_eq!(counts.len(), 3);
    for event in ["Sack", "Interception", "Fumble lost"] {
        let share = counts[event] as f64 / draws as f64;
        assert!((share - 1.0 / 3.0).abs() < 0.05, "{event} share {share}");
    }
}

#[test]
fn shot_always_takes_a_shot() {
    let catalog = builtin();
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        assert_eq!(catalog.random_outcome("Shot", &mut rng), Ok("Take a shot"));
    }
}

#[test]
fn referees_map_to_their_own_pools() {
    let catalog = builtin();
    let low = catalog.outcomes(Severity::Low).expect("low pool");
    let medium = catalog.outcomes(Severity::Medium).expect("medium pool");
    assert_eq!(low.len(), 3);
    assert_eq!(medium.len(), 3);

    let mut rng = StdRng::seed_from_u64(4);
    let mut seen_penalty = false;
    let mut seen_offsetting = false;
    for _ in 0..500 {
        let draw = catalog.random_event("Referees", &mut rng).expect("draw");
        match draw.event.as_str() {
            "Penalty" => {
                seen_penalty = true;
                assert!(low.contains(&draw.outcome));
                assert!(!medium.contains(&draw.outcome));
            }
            "Offsetting penalties" => {
                seen_offsetting = true;
                assert!(medium.contains(&draw.outcome));
                assert!(!low.contains(&draw.outcome));
            }
            other => panic!("unexpected referee event {other}"),
        }
    }
    assert!(seen_penalty && seen_offsetting);
}

#[test]
fn mid_and_medium_are_distinct_pools() {
    let catalog = builtin();
    let mid = catalog.outcomes(Severity::Mid).expect("mid pool");
    let medium = catalog.outcomes(Severity::Medium).expect("medium pool");
    assert_eq!(mid.len(), 4);
    assert_eq!(medium.len(), 3);
    assert!(mid.iter().any(|outcome| outcome == "Drink as many sips/seconds as the people there"));
    assert!(!medium.iter().any(|outcome| outcome == "Drink as many sips/seconds as the people there"));
}

#[test]
fn custom_catalog_file_loads() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("house.toml");
    std::fs::write(
        &path,
        r#"
        [[category]]
        name = "Special Teams"
        events = [{ name = "Onside kick", severity = "Shot" }]

        [outcomes]
        Shot = ["Everyone takes a shot"]
        "#,
    )
    .expect("write catalog");

    let catalog = Catalog::from_path(&path).expect("catalog file");
    let mut rng = StdRng::seed_from_u64(5);
    let draw = catalog.random_event("Special Teams", &mut rng).expect("draw");
    assert_eq!(draw.event, "Onside kick");
    assert_eq!(draw.outcome, "Everyone takes a shot");
    assert!(catalog.random_outcome("Low", &mut rng).is_err());
}
