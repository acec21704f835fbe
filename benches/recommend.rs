//! Benchmarks for single and batched recommendations

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use crop_recommender_rust::artifacts::{
    ClassifierModel, CropBundle, DecisionTree, FertilizerBundle, Preprocessing, RandomForest,
    StandardScaler, TreeNode,
};
use crop_recommender_rust::observation::FEATURE_ORDER;
use crop_recommender_rust::{
    ConversionTable, EngineConfig, ModelArtifacts, Observation, RecommendationEngine, Region, SoilType,
};
use rustc_hash::FxHashMap;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Depth-limited tree splitting feature `t % n_features` at its midpoint
fn tree(t: usize, n_features: usize, n_classes: usize, depth: usize) -> DecisionTree {
    let mut nodes = Vec::new();
    let n_internal = (1 << depth) - 1;
    for i in 0..n_internal {
        nodes.push(TreeNode::Split {
            feature: (t + i) % n_features,
            threshold: 0.0,
            left: 2 * i + 1,
            right: 2 * i + 2,
        });
    }
    for leaf in 0..(1 << depth) {
        nodes.push(TreeNode::Leaf { class: (t + leaf) % n_classes });
    }
    DecisionTree { nodes }
}

fn forest(n_features: usize, n_classes: usize) -> ClassifierModel {
    ClassifierModel::Forest(RandomForest {
        n_features,
        n_classes,
        trees: (0..100).map(|t| tree(t, n_features, n_classes, 6)).collect(),
    })
}

fn engine() -> RecommendationEngine {
    let mut encoders = FxHashMap::default();
    encoders.insert("region".to_string(), strings(&["Central", "East", "North", "South", "West"]));
    encoders.insert("soil_type".to_string(), strings(&["Clayey", "Loamy", "Sandy", "Silty"]));
    let preprocessing = Preprocessing {
        encoders,
        scaler: StandardScaler {
            mean: vec![2.0, 1.5, 50.0, 40.0, 40.0, 6.0, 25.0, 60.0, 100.0],
            scale: vec![1.0, 1.0, 25.0, 20.0, 40.0, 1.0, 5.0, 20.0, 100.0],
        },
    };

    let crops = strings(&["rice", "maize", "chickpea", "cotton", "banana", "coffee"]);
    let crop = CropBundle {
        model: forest(9, crops.len()),
        classes: crops,
        feature_order: strings(&FEATURE_ORDER),
    };

    let columns = strings(&[
        "N", "P", "K", "pH", "temperature", "humidity", "rainfall",
        "region_East", "region_North", "region_South", "region_West",
        "soil_type_Loamy", "soil_type_Sandy", "soil_type_Silty",
    ]);
    let labels = strings(&["Urea", "DAP", "MOP", "17-17-17", "10-26-26"]);
    let fertilizer = FertilizerBundle {
        model: forest(columns.len(), labels.len()),
        label_decoder: labels,
        columns,
    };

    let artifacts = ModelArtifacts::new(preprocessing, crop, fertilizer).unwrap();
    RecommendationEngine::new(artifacts, ConversionTable::embedded(), EngineConfig::default())
}

fn observations(n: usize) -> Vec<Observation> {
    (0..n)
        .map(|i| {
            let f = i as f64;
            Observation::new(
                Region::ALL[i % Region::ALL.len()],
                SoilType::ALL[i % SoilType::ALL.len()],
                20.0 + f % 120.0,
                10.0 + f % 90.0,
                10.0 + f % 150.0,
                5.0 + (f % 30.0) / 10.0,
                18.0 + f % 15.0,
                40.0 + f % 50.0,
                50.0 + f % 250.0,
            )
        })
        .collect()
}

fn bench_single(c: &mut Criterion) {
    let engine = engine();
    let obs = observations(1).remove(0);

    c.bench_function("recommend_single", |b| {
        b.iter(|| black_box(engine.recommend(black_box(&obs))))
    });
}

fn bench_batch(c: &mut Criterion) {
    let engine = engine();
    let mut group = c.benchmark_group("recommend_batch");

    for n in [100, 1_000, 10_000] {
        let batch = observations(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &batch, |b, batch| {
            b.iter(|| black_box(engine.recommend_batch(batch).len()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single, bench_batch);
criterion_main!(benches);
