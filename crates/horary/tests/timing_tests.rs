use horary::aspects::{Aspect, TimingKernel, ASPECTS};
use horary::chart::{house_of_longitude, AngularBody, Chart, Planet};
use horary::config::TimingConfig;

const RATES: [f64; 7] = [-1.2, -0.05, 0.0, 0.03125, 0.5, 1.03125, 13.2];

fn pair(a: (f64, f64), b: (f64, f64)) -> Chart {
    Chart::new()
        .with_body(AngularBody::new(Planet::Moon, a.0, a.1))
        .with_body(AngularBody::new(Planet::Saturn, b.0, b.1))
}

#[test]
fn test_timing_never_negative() {
    let guarded = TimingKernel::default();
    let free = TimingKernel::new(&TimingConfig {
        allow_out_of_sign: true,
        ..Default::default()
    });

    let mut lon = 0.0;
    while lon < 360.0 {
        for rate_a in RATES {
            for rate_b in RATES {
                let chart = pair((lon, rate_a), (137.5, rate_b));
                for aspect in ASPECTS {
                    for kernel in [&guarded, &free] {
                        if let Some(t) = kernel.when_exact_in_days(Planet::Moon, Planet::Saturn, aspect, &chart) {
                            assert!(t >= 0.0, "{aspect} at lon {lon} rates {rate_a}/{rate_b}: {t}");
                        }
                    }
                }
            }
        }
        lon += 7.3;
    }
}

#[test]
fn test_sign_guard_blocks_late_perfection() {
    // Moon at 28 Aries needs 12 days to reach Saturn at 10 Taurus
    let chart = pair((28.0, 1.03125), (40.0, 0.03125));
    assert!(TimingKernel::default()
        .when_exact_in_days(Planet::Moon, Planet::Saturn, Aspect::Conjunction, &chart)
        .is_none());

    let free = TimingKernel::new(&TimingConfig {
        allow_out_of_sign: true,
        ..Default::default()
    });
    let t = free
        .when_exact_in_days(Planet::Moon, Planet::Saturn, Aspect::Conjunction, &chart)
        .unwrap();
    assert!((t - 12.0).abs() < 1e-9);
}

#[test]
fn test_missing_body_is_indeterminate() {
    let chart = Chart::new().with_body(AngularBody::new(Planet::Moon, 10.0, 13.0));
    let kernel = TimingKernel::default();
    assert!(kernel
        .when_exact_in_days(Planet::Moon, Planet::Mars, Aspect::Trine, &chart)
        .is_none());
    assert!(kernel
        .find_applying_aspect(&chart, Planet::Moon, Planet::Mars, 30.0, None)
        .is_none());
    assert!(kernel
        .find_separating_aspect(&chart, Planet::Moon, Planet::Mars, 30.0, None)
        .is_none());
}

#[test]
fn test_earliest_application_skips_excluded() {
    // Moon reaches Venus in 1 day and Mars in 2
    let chart = Chart::new()
        .with_body(AngularBody::new(Planet::Moon, 0.0, 13.0))
        .with_body(AngularBody::new(Planet::Venus, 13.0, 0.0))
        .with_body(AngularBody::new(Planet::Mars, 26.0, 0.0));
    let kernel = TimingKernel::default();

    let first = kernel
        .find_earliest_application(&chart, Planet::Moon, 30.0, &[])
        .unwrap();
    assert_eq!(first.target, Planet::Venus);
    assert!((first.timing - 1.0).abs() < 1e-9);

    let next = kernel
        .find_earliest_application(&chart, Planet::Moon, 30.0, &[Planet::Venus])
        .unwrap();
    assert_eq!(next.target, Planet::Mars);
    assert_eq!(next.aspect, Aspect::Conjunction);
    assert!((next.timing - 2.0).abs() < 1e-9);
}

#[test]
fn test_house_lookup_wraps() {
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = (345.0 + 30.0 * i as f64) % 360.0;
    }
    assert_eq!(house_of_longitude(350.0, &cusps), 1);
    assert_eq!(house_of_longitude(10.0, &cusps), 1);
    assert_eq!(house_of_longitude(15.0, &cusps), 2);
    assert_eq!(house_of_longitude(344.9, &cusps), 12);
}
