// Integration tests for kitx
use kitx::loader::{load_catalog_file, load_config_file};
use kitx::{
    cosine, pearson, CatalogError, CatalogHandle, EngineConfig, Error, FeatureVector, InputError,
    ItemRecord, ProfileScaling, RecommendRequest, RecommendationEngine, ScoreWeights,
    DEFAULT_GENRE_AXES,
};
use std::io::Write;

/// 18-axis catalog in the shape of the festival accessory dataset
fn festival_records() -> Vec<ItemRecord> {
    let mut records = Vec::new();
    for (category, count) in [("Head", 12), ("Torso", 9), ("Face", 7)] {
        for i in 0..count {
            let features: Vec<f32> = (0..18)
                .map(|axis| {
                    let v = ((i * 7 + axis * 3 + category.len()) % 11) as f32 / 10.0;
                    if v > 0.6 { v } else { 0.0 }
                })
                .collect();
            records.push(ItemRecord::new(category, format!("{}_{:02}.png", category, i), features));
        }
    }
    records
}

fn rock_fan() -> FeatureVector {
    let mut values = vec![0.0f32; 18];
    values[5] = 1.0; // Rock
    values[13] = 0.6; // Punk
    values[16] = 0.3; // Indie
    FeatureVector::new(values)
}

fn write_json(value: &serde_json::Value) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(value).unwrap().as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_recommend_from_catalog_file() {
    let items: Vec<serde_json::Value> = festival_records()
        .into_iter()
        .map(|r| serde_json::to_value(r).unwrap())
        .collect();
    let file = write_json(&serde_json::json!({
        "axes": DEFAULT_GENRE_AXES,
        "items": items,
    }));

    let catalog = load_catalog_file(file.path()).unwrap();
    assert_eq!(catalog.dim(), 18);
    assert_eq!(catalog.len(), 28);
    assert_eq!(catalog.axis_name(5), "Rock");

    let engine = RecommendationEngine::default();
    let request = RecommendRequest::new(["Head", "Torso", "Face"]);
    let scored = engine.recommend(&catalog, &rock_fan(), &request).unwrap();

    assert_eq!(scored.combination.len(), 3);
    assert_eq!(scored.evaluated, 10 * 9 * 7);
    for selection in scored.combination.selections() {
        assert!(catalog.item(&selection.category, &selection.identifier).is_ok());
    }

    let rows = engine.explain(&catalog, &rock_fan(), &scored).unwrap();
    assert_eq!(rows.len(), 18);
    assert_eq!(rows[13].axis, "Punk");
    assert!(rows.iter().all(|row| row.items.len() == 3));
}

#[test]
fn test_missing_catalog_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_catalog_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_config_file() {
    let file = write_json(&serde_json::json!({
        "top_n": 3,
        "weights": {"sim_global": 1.0, "error": 0.0, "min_sim": 0.0, "min_corr": 0.0},
        "profile_scaling": "max"
    }));
    let config = load_config_file(file.path()).unwrap();
    assert_eq!(config.top_n, 3);
    assert_eq!(config.weights, ScoreWeights::new(1.0, 0.0, 0.0, 0.0));
    assert_eq!(config.profile_scaling, ProfileScaling::Max);

    let engine = RecommendationEngine::new(config).unwrap();
    let catalog = RecommendationEngine::load_catalog(festival_records()).unwrap();
    let scored = engine
        .recommend(&catalog, &rock_fan(), &RecommendRequest::new(["Head", "Torso", "Face"]))
        .unwrap();
    assert_eq!(scored.evaluated, 27);

    let bad = write_json(&serde_json::json!({ "top_n": 0 }));
    assert!(matches!(load_config_file(bad.path()), Err(Error::InvalidConfig(_))));
}

#[test]
fn test_shortlist_picks_best_single_item() {
    let catalog = RecommendationEngine::load_catalog(vec![
        ItemRecord::new("Head", "h1", vec![1.0, 0.0, 0.0]),
        ItemRecord::new("Head", "h2", vec![0.0, 1.0, 0.0]),
    ])
    .unwrap();
    let shortlist = kitx_engine::top_n(
        &FeatureVector::new(vec![1.0, 0.0, 0.0]),
        catalog.require("Head").unwrap().items(),
        1,
    );
    assert_eq!(shortlist.len(), 1);
    assert_eq!(shortlist[0].item.identifier(), "h1");
}

#[test]
fn test_degenerate_profiles_do_not_fail() {
    let catalog = RecommendationEngine::load_catalog(festival_records()).unwrap();
    let engine = RecommendationEngine::default();
    let request = RecommendRequest::new(["Head", "Torso", "Face"]);

    for profile in [FeatureVector::new(vec![0.0; 18]), FeatureVector::new(vec![0.2; 18])] {
        let scored = engine.recommend(&catalog, &profile, &request).unwrap();
        assert!(scored.score.is_finite());
        assert_eq!(scored.breakdown.min_corr, 0.0);
    }

    assert_eq!(cosine(&[0.0; 3], &[1.0, 2.0, 3.0]), 0.0);
    assert_eq!(pearson(&[0.2; 3], &[1.0, 2.0, 3.0]), 0.0);
}

#[test]
fn test_request_errors_are_typed() {
    let catalog = RecommendationEngine::load_catalog(festival_records()).unwrap();
    let engine = RecommendationEngine::default();

    let err = engine
        .recommend(&catalog, &FeatureVector::new(vec![0.5; 3]), &RecommendRequest::new(["Head"]))
        .unwrap_err();
    assert!(matches!(err, Error::Input(InputError::DimensionMismatch { expected: 18, actual: 3 })));

    let err = engine
        .recommend(&catalog, &rock_fan(), &RecommendRequest::new(["Head", "Wings"]))
        .unwrap_err();
    assert!(matches!(err, Error::Catalog(CatalogError::MissingCategory(_))));
}

#[test]
fn test_parallel_search_matches_sequential() {
    let catalog = RecommendationEngine::load_catalog(festival_records()).unwrap();
    let sequential = RecommendationEngine::new(EngineConfig {
        parallel_threshold: u64::MAX,
        ..EngineConfig::default()
    })
    .unwrap();
    let parallel = RecommendationEngine::new(EngineConfig {
        parallel_threshold: 1,
        ..EngineConfig::default()
    })
    .unwrap();
    let request = RecommendRequest::new(["Head", "Torso", "Face"]);

    let a = sequential.recommend_ranked(&catalog, &rock_fan(), &request, 10).unwrap();
    let b = parallel.recommend_ranked(&catalog, &rock_fan(), &request, 10).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_hot_reload_keeps_in_flight_snapshot() {
    let handle = CatalogHandle::new(RecommendationEngine::load_catalog(festival_records()).unwrap());
    let engine = RecommendationEngine::default();
    let request = RecommendRequest::new(["Head", "Torso", "Face"]);

    let in_flight = handle.snapshot();
    handle
        .reload(vec![
            ItemRecord::new("Head", "only_head", vec![0.5; 18]),
            ItemRecord::new("Torso", "only_torso", vec![0.5; 18]),
            ItemRecord::new("Face", "only_face", vec![0.5; 18]),
        ])
        .unwrap();

    let old = engine.recommend(&in_flight, &rock_fan(), &request).unwrap();
    assert_ne!(old.combination.get("Head"), Some("only_head"));

    let new = engine.recommend(&handle.snapshot(), &rock_fan(), &request).unwrap();
    assert_eq!(new.combination.get("Head"), Some("only_head"));
    assert_eq!(handle.generation(), 2);
}
