//! Unit tests for tl-core primitives.

#[cfg(test)]
mod phase {
    use crate::{AtomicPhase, Phase};

    #[test]
    fn default_is_red() {
        assert_eq!(Phase::default(), Phase::Red);
        assert_eq!(AtomicPhase::default().load(), Phase::Red);
    }

    #[test]
    fn toggles_alternate() {
        assert_eq!(Phase::Red.toggled(), Phase::Green);
        assert_eq!(Phase::Green.toggled(), Phase::Red);
        assert_eq!(Phase::Red.toggled().toggled(), Phase::Red);
    }

    #[test]
    fn predicates() {
        assert!(Phase::Green.is_green());
        assert!(!Phase::Green.is_red());
        assert!(Phase::Red.is_red());
    }

    #[test]
    fn display() {
        assert_eq!(Phase::Red.to_string(), "red");
        assert_eq!(Phase::Green.to_string(), "green");
    }

    #[test]
    fn atomic_store_load() {
        let cell = AtomicPhase::new(Phase::Red);
        cell.store(Phase::Green);
        assert_eq!(cell.load(), Phase::Green);
    }
}

#[cfg(test)]
mod cycle {
    use std::time::Duration;

    use crate::{CycleConfig, DurationProvider, FixedDuration, SequenceDurations, TlError};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = CycleConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.min_cycle, Duration::from_secs(4));
        assert_eq!(cfg.max_cycle, Duration::from_secs(6));
        assert_eq!(cfg.poll_interval, ms(1));
    }

    #[test]
    fn zero_resolution_rejected() {
        let cfg = CycleConfig { resolution: Duration::ZERO, ..CycleConfig::default() };
        assert!(matches!(cfg.validate(), Err(TlError::Config(_))));
    }

    #[test]
    fn zero_poll_interval_rejected() {
        let cfg = CycleConfig { poll_interval: Duration::ZERO, ..CycleConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn inverted_bounds_rejected() {
        let cfg = CycleConfig {
            min_cycle: Duration::from_secs(7),
            ..CycleConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn min_below_resolution_rejected() {
        let cfg = CycleConfig { min_cycle: ms(500), ..CycleConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn flip_not_due_before_one_whole_unit() {
        let cfg = CycleConfig::default();
        assert!(!cfg.flip_due(ms(999), ms(1)));
        assert!(cfg.flip_due(ms(1000), ms(1)));
    }

    #[test]
    fn flip_due_compares_truncated_elapsed() {
        let cfg = CycleConfig::default();
        let target = Duration::from_secs(5);
        assert!(!cfg.flip_due(ms(4_999), target));
        assert!(cfg.flip_due(ms(5_000), target));
        assert!(cfg.flip_due(ms(5_400), target));
    }

    #[test]
    fn default_draws_are_four_five_or_six_seconds() {
        let mut durations = CycleConfig::default().random_durations();
        let mut seen = [false; 3];
        for _ in 0..1_000 {
            let d = durations.next_duration();
            let secs = d.as_secs();
            assert!((4..=6).contains(&secs), "got {d:?}");
            assert_eq!(d.subsec_nanos(), 0, "draws are whole seconds");
            seen[(secs - 4) as usize] = true;
        }
        assert_eq!(seen, [true; 3], "all three durations should appear");
    }

    #[test]
    fn nanosecond_resolution_spans_whole_range() {
        // 4e9..=6e9 units: more than a u32 can count.
        let cfg = CycleConfig { resolution: Duration::from_nanos(1), ..CycleConfig::default() };
        assert!(cfg.validate().is_ok());
        let mut durations = cfg.random_durations();
        let draws: Vec<Duration> = (0..1_000).map(|_| durations.next_duration()).collect();
        let lo = *draws.iter().min().unwrap();
        let hi = *draws.iter().max().unwrap();
        assert!(lo >= Duration::from_secs(4), "min draw {lo:?}");
        assert!(hi <= Duration::from_secs(6), "max draw {hi:?}");
        assert!(lo < Duration::from_secs(5), "min draw {lo:?}");
        assert!(hi > Duration::from_secs(5), "max draw {hi:?}");
    }

    #[test]
    fn same_seed_same_draws() {
        let cfg = CycleConfig { seed: 99, ..CycleConfig::default() };
        let mut a = cfg.random_durations();
        let mut b = cfg.random_durations();
        for _ in 0..50 {
            assert_eq!(a.next_duration(), b.next_duration());
        }
    }

    #[test]
    fn fixed_duration_repeats() {
        let mut p = FixedDuration(ms(20));
        assert_eq!(p.next_duration(), ms(20));
        assert_eq!(p.next_duration(), ms(20));
    }

    #[test]
    fn sequence_wraps() {
        let mut p = SequenceDurations::new(vec![ms(1), ms(2)]).unwrap();
        assert_eq!(p.next_duration(), ms(1));
        assert_eq!(p.next_duration(), ms(2));
        assert_eq!(p.next_duration(), ms(1));
    }

    #[test]
    fn empty_sequence_is_none() {
        assert!(SequenceDurations::new(vec![]).is_none());
    }

    #[test]
    fn closures_are_providers() {
        let mut n = 0u64;
        let mut p = move || {
            n += 10;
            Duration::from_millis(n)
        };
        assert_eq!(DurationProvider::next_duration(&mut p), ms(10));
        assert_eq!(DurationProvider::next_duration(&mut p), ms(20));
    }
}

#[cfg(test)]
mod rng {
    use crate::CycleRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = CycleRng::new(12345);
        let mut r2 = CycleRng::new(12345);
        for _ in 0..100 {
            let a: u32 = r1.gen_range(0..1_000);
            let b: u32 = r2.gen_range(0..1_000);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_lights_differ() {
        let mut r0 = CycleRng::for_light(1, 0);
        let mut r1 = CycleRng::for_light(1, 1);
        let a: u64 = r0.gen_range(0..u64::MAX);
        let b: u64 = r1.gen_range(0..u64::MAX);
        assert_ne!(a, b, "seeds for adjacent lights should diverge");
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = CycleRng::new(0);
        for _ in 0..1000 {
            let v: u32 = rng.gen_range(4..=6);
            assert!((4..=6).contains(&v));
        }
    }
}
