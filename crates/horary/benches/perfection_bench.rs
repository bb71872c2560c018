use criterion::{black_box, criterion_group, criterion_main, Criterion};
use horary::chart::{AngularBody, Chart, Planet};
use horary::perfection::PerfectionCoreApi;

fn sample_chart() -> Chart {
    Chart::new()
        .with_body(AngularBody::new(Planet::Sun, 15.0, 0.9856))
        .with_body(AngularBody::new(Planet::Moon, 42.5, 13.2))
        .with_body(AngularBody::new(Planet::Mercury, 28.0, 1.4))
        .with_body(AngularBody::new(Planet::Venus, 61.0, 1.2).with_house(7))
        .with_body(AngularBody::new(Planet::Mars, 75.0, 0.6).with_house(1))
        .with_body(AngularBody::new(Planet::Jupiter, 118.0, 0.08))
        .with_body(AngularBody::new(Planet::Saturn, 290.0, -0.04))
        .with_significators(1, 7)
}

fn bench_find_perfections(c: &mut Criterion) {
    let api = PerfectionCoreApi::default();
    let chart = sample_chart();

    c.bench_function("find_perfections", |b| {
        b.iter(|| {
            api.find_perfections(
                black_box(&chart),
                black_box(Planet::Mars),
                black_box(Planet::Venus),
                black_box(30.0),
            )
        })
    });

    c.bench_function("find_perfections_identity", |b| {
        b.iter(|| api.find_perfections(black_box(&chart), Planet::Moon, Planet::Moon, 30.0))
    });
}

criterion_group!(benches, bench_find_perfections);
criterion_main!(benches);
