//! Phase Times Property Tests
//!
//! These tests verify the registry's single-threaded contract:
//! - Fresh and reset registries average zero
//! - Averages divide by the configured worker count
//! - Phases never leak into each other
//! - Printing is read-only
//!
//! ============================================================================
//! EACH TEST FINDS A SPECIFIC AGGREGATION BUG - DO NOT WEAKEN ASSERTIONS
//! ============================================================================

mod common;

use common::{
    assert_all_phases_zero, assert_secs_eq, expected_average, PhaseTimesFixture,
    DEFAULT_WORKERS,
};
use gc_phase_times::logging::{self, GcEvent, GcLogger, GcLoggerConfig, DEFAULT_MAX_EVENTS};
use gc_phase_times::{GcParPhase, PhaseTimes, PhaseTimesError};

/// ============================================================================
/// CONSTRUCTION
/// ============================================================================

/// Fresh registry has no samples
///
/// **Bug this finds:** Slots initialised to garbage instead of "unset"
/// **Invariant verified:** average(phase) == 0 for all phases after construction
#[test]
fn test_fresh_registry_all_zero() {
    for workers in [1, 2, 7, 64] {
        let fixture = PhaseTimesFixture::with_workers(workers);

        assert_eq!(fixture.phase_times.max_gc_threads(), workers);
        assert_all_phases_zero(&fixture.phase_times);

        for phase in GcParPhase::iter() {
            for worker in 0..workers {
                assert_eq!(fixture.phase_times.worker_time(phase, worker), None);
            }
        }
    }
}

/// Zero-sized registry is rejected up front
///
/// **Bug this finds:** Division by zero in average
#[test]
fn test_zero_workers_rejected() {
    let result = PhaseTimes::new(0);
    assert!(matches!(result, Err(PhaseTimesError::InvalidWorkerCount(0))));
}

/// ============================================================================
/// AVERAGING
/// ============================================================================

/// Single worker out of four
///
/// **Bug this finds:** Averaging over participating workers instead of configured
/// **Invariant verified:** 0.002s on one of 4 workers averages 0.0005s
#[test]
fn test_single_worker_of_four() {
    // Arrange
    let fixture = PhaseTimesFixture::with_workers(4);

    // Act
    fixture
        .phase_times
        .record_time_secs(GcParPhase::ThreadRoots, 0, 0.002);

    // Assert
    assert_secs_eq(fixture.phase_times.average(GcParPhase::ThreadRoots), 0.0005);

    fixture.phase_times.reset(GcParPhase::ThreadRoots);
    assert_eq!(fixture.phase_times.average(GcParPhase::ThreadRoots), 0.0);
}

/// Average of partial and full participation
///
/// **Bug this finds:** Unrecorded slots treated as anything other than zero
/// **Invariant verified:** average == sum(recorded) / N for every worker subset
#[test]
fn test_average_over_configured_workers() {
    let fixture = PhaseTimesFixture::with_defaults();
    let samples = [0.125, 0.25, 0.5, 1.0];

    for (worker, &secs) in samples.iter().enumerate() {
        fixture
            .phase_times
            .record_time_secs(GcParPhase::CLDGRoots, worker, secs);

        assert_secs_eq(
            fixture.phase_times.average(GcParPhase::CLDGRoots),
            expected_average(&samples[..=worker], DEFAULT_WORKERS),
        );
    }
}

/// Double record replaces the earlier sample
///
/// **Bug this finds:** Accidental accumulation on repeated records
/// **Invariant verified:** last write wins per (phase, worker)
#[test]
fn test_double_record_last_write_wins() {
    let fixture = PhaseTimesFixture::with_workers(2);

    fixture
        .phase_times
        .record_time_secs(GcParPhase::JNIRoots, 1, 0.75);
    fixture
        .phase_times
        .record_time_secs(GcParPhase::JNIRoots, 1, 0.25);

    assert_eq!(fixture.phase_times.worker_time(GcParPhase::JNIRoots, 1), Some(0.25));
    assert_secs_eq(fixture.phase_times.average(GcParPhase::JNIRoots), 0.125);
}

/// ============================================================================
/// ISOLATION & RESET
/// ============================================================================

/// Recording one phase leaves every other phase untouched
///
/// **Bug this finds:** Off-by-one phase indexing, shared backing arrays
/// **Invariant verified:** record(P) does not change average(Q) for Q != P
#[test]
fn test_phase_isolation() {
    for target in GcParPhase::iter() {
        let fixture = PhaseTimesFixture::with_defaults();

        fixture.phase_times.record_time_secs(target, 2, 0.5);

        for other in GcParPhase::iter().filter(|p| *p != target) {
            assert_eq!(
                fixture.phase_times.average(other),
                0.0,
                "recording {} leaked into {}",
                target,
                other
            );
        }
        assert_secs_eq(fixture.phase_times.average(target), 0.125);
    }
}

/// Reset clears exactly one phase
///
/// **Bug this finds:** reset clearing neighbouring phases
/// **Invariant verified:** After reset(P), average(P) == 0 and others unchanged
#[test]
fn test_reset_one_phase() {
    let fixture = PhaseTimesFixture::with_defaults();
    fixture.record_all_phases(0, 0.4);

    fixture.phase_times.reset(GcParPhase::StringTableRoots);

    for phase in GcParPhase::iter() {
        let expected = if phase == GcParPhase::StringTableRoots {
            0.0
        } else {
            0.1
        };
        assert_secs_eq(fixture.phase_times.average(phase), expected);
    }
}

/// Registry is reusable across cycles
///
/// **Bug this finds:** Stale samples bleeding into the next cycle
#[test]
fn test_cycles_do_not_bleed() {
    let fixture = PhaseTimesFixture::with_workers(2);

    // Cycle 1: both workers
    fixture
        .phase_times
        .record_time_secs(GcParPhase::UniverseRoots, 0, 1.0);
    fixture
        .phase_times
        .record_time_secs(GcParPhase::UniverseRoots, 1, 1.0);
    assert_secs_eq(fixture.phase_times.average(GcParPhase::UniverseRoots), 1.0);
    fixture.phase_times.reset_all();

    // Cycle 2: only worker 0
    fixture
        .phase_times
        .record_time_secs(GcParPhase::UniverseRoots, 0, 0.5);
    assert_secs_eq(fixture.phase_times.average(GcParPhase::UniverseRoots), 0.25);
    assert_eq!(
        fixture.phase_times.worker_time(GcParPhase::UniverseRoots, 1),
        None
    );
}

/// ============================================================================
/// PRINTING
/// ============================================================================

/// Print emits every phase in order and changes nothing
///
/// **Bug this finds:** Print resetting or reordering data
/// **Invariant verified:** print is observational only
#[test]
fn test_print_reports_every_phase() {
    let fixture = PhaseTimesFixture::with_workers(2);
    fixture
        .phase_times
        .record_time_secs(GcParPhase::ObjectSynchronizerRoots, 1, 0.010);

    fixture.phase_times.print_to(&fixture.logger);
    fixture.phase_times.print_to(&fixture.logger);

    let printed = fixture.printed_phases();
    assert_eq!(printed.len(), 2 * GcParPhase::COUNT);

    for (event, phase) in printed.iter().zip(GcParPhase::iter()) {
        match event {
            GcEvent::ParPhase { phase: name, .. } => assert_eq!(name, phase.name()),
            other => panic!("unexpected event {:?}", other),
        }
    }

    let row = &printed[GcParPhase::ObjectSynchronizerRoots.index()];
    match row {
        GcEvent::ParPhase {
            avg_ms,
            max_ms,
            workers_recorded,
            per_worker_ms,
            ..
        } => {
            assert!((avg_ms - 5.0).abs() < 1e-9);
            assert!((max_ms - 10.0).abs() < 1e-9);
            assert_eq!(*workers_recorded, 1);
            assert!(per_worker_ms.is_none());
        },
        other => panic!("unexpected event {:?}", other),
    }

    assert_secs_eq(
        fixture
            .phase_times
            .average(GcParPhase::ObjectSynchronizerRoots),
        0.005,
    );
}

/// Default logger level still shows phases no worker ran
///
/// **Bug this finds:** Idle phases filtered out of the printed table
/// **Invariant verified:** print renders every phase, average 0 for idle ones
#[test]
fn test_print_default_level_reports_idle_phases() {
    // Arrange
    let phase_times = PhaseTimes::new(4).unwrap();
    phase_times.record_time_secs(GcParPhase::ThreadRoots, 0, 0.002);
    let logger = GcLogger::new(GcLoggerConfig {
        console: false,
        ..Default::default()
    });

    // Act
    phase_times.print_to(&logger);

    // Assert
    let rows: Vec<GcEvent> = logger
        .get_events()
        .into_iter()
        .map(|(_, event)| event)
        .filter(|event| matches!(event, GcEvent::ParPhase { .. }))
        .collect();
    assert_eq!(rows.len(), GcParPhase::COUNT);

    for (row, phase) in rows.iter().zip(GcParPhase::iter()) {
        match row {
            GcEvent::ParPhase {
                phase: name,
                avg_ms,
                workers_recorded,
                ..
            } => {
                assert_eq!(name, phase.name());
                if phase == GcParPhase::ThreadRoots {
                    assert!((avg_ms - 0.5).abs() < 1e-9);
                    assert_eq!(*workers_recorded, 1);
                } else {
                    assert_eq!(*avg_ms, 0.0);
                    assert_eq!(*workers_recorded, 0);
                }
            },
            other => panic!("unexpected event {:?}", other),
        }
    }
}

/// Long-running collector printing every cycle
///
/// **Bug this finds:** Unbounded event retention growing once per cycle
/// **Invariant verified:** retained events never exceed max_events
#[test]
fn test_print_many_cycles_retention_bounded() {
    let phase_times = PhaseTimes::new(2).unwrap();
    let max_events = 3 * (GcParPhase::COUNT + 1);
    let logger = GcLogger::new(GcLoggerConfig {
        console: false,
        max_events,
        ..Default::default()
    });

    for cycle in 0..1_000 {
        phase_times.record_time_secs(GcParPhase::JNIRoots, cycle % 2, 0.001);
        phase_times.print_to(&logger);
        phase_times.reset_all();
        assert!(logger.event_count() <= max_events);
    }

    // Most recent cycle is retained, ending with the last phase row
    let events = logger.get_events();
    assert_eq!(events.len(), max_events);
    assert_eq!(
        events[events.len() - GcParPhase::COUNT - 1].1,
        GcEvent::ParPhasesStart { max_gc_threads: 2 }
    );
}

/// Global logger under repeated print
///
/// **Bug this finds:** Process-wide logger leaking memory across cycles
#[test]
fn test_global_print_retention_bounded() {
    let phase_times = PhaseTimes::new(1).unwrap();
    let cycles = DEFAULT_MAX_EVENTS / (GcParPhase::COUNT + 1) + 10;

    for _ in 0..cycles {
        phase_times.print();
        phase_times.reset_all();
    }

    assert!(logging::get_event_count() <= DEFAULT_MAX_EVENTS);
}
