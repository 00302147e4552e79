use approach_analyzer::ConditionClassifier;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use recording_model::{ObservedClass, ObstacleDetectState, PreSelectState, TunnelState};

fn bench_classify(c: &mut Criterion) {
    let classifier = ConditionClassifier::default();
    let len = 25 * 60; // one minute at 25 Hz

    // A fails on the last cycle, C is scanned completely
    let mut preselect = vec![PreSelectState::FIRST_EGO_LANE; len];
    preselect[len - 1] = PreSelectState::NOT_SELECTED;
    let obstacle = vec![ObstacleDetectState::PROBABLY_OVERRIDABLE; len];
    let classes = vec![ObservedClass::CAR; len];

    c.bench_function("classify_open_road_1500", |b| {
        b.iter(|| {
            classifier.classify(
                black_box(TunnelState::NO_TUNNEL),
                black_box(&preselect),
                black_box(&obstacle),
                black_box(&classes),
            )
        })
    });
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);
