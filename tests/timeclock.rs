#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use std::path::PathBuf;
    use std::sync::{Arc, Barrier};
    use std::thread;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use timecard::db::attendance::AttendanceStore;
    use timecard::db::db::Db;
    use timecard::libs::attendance::{AttendanceStatus, AttendanceTracker, SkewPolicy, TrackerPolicy};
    use timecard::libs::error::AttendanceError;
    use timecard::libs::locks::RecordLocks;
    use timecard::libs::timeclock::TimeClock;

    struct TimeClockTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
        locks: Arc<RecordLocks>,
    }

    impl TestContext for TimeClockTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("timecard.db");
            // Create the schema once so later connections skip migrations.
            Db::open(&db_path).unwrap();
            TimeClockTestContext {
                _temp_dir: temp_dir,
                db_path,
                locks: Arc::new(RecordLocks::new()),
            }
        }
    }

    impl TimeClockTestContext {
        fn clock(&self) -> TimeClock {
            self.clock_with(TrackerPolicy::default())
        }

        fn clock_with(&self, policy: TrackerPolicy) -> TimeClock {
            let store = AttendanceStore::with_db(Db::open(&self.db_path).unwrap());
            TimeClock::new(store, Arc::clone(&self.locks), AttendanceTracker::new(policy))
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 14).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        day().and_hms_opt(h, m, 0).unwrap()
    }

    #[test_context(TimeClockTestContext)]
    #[test]
    fn test_full_day_is_persisted(ctx: &mut TimeClockTestContext) {
        let clock = ctx.clock();
        clock.clock_in(1, day(), at(9, 0)).unwrap();
        clock.break_start(1, day(), at(12, 0)).unwrap();
        clock.break_end(1, day(), at(12, 40)).unwrap();
        clock.break_start(1, day(), at(15, 0)).unwrap();
        clock.break_end(1, day(), at(15, 10)).unwrap();
        let (record, transition) = clock.clock_out(1, day(), at(18, 0)).unwrap();
        assert_eq!(transition.to, AttendanceStatus::DayOver);

        // A fresh connection sees the same record.
        let stored = ctx.clock().record(1, day()).unwrap().unwrap();
        assert_eq!(stored, record);
        assert_eq!(stored.break_events().len(), 2);
        assert_eq!(stored.total_break_duration(), Duration::minutes(50));
        assert_eq!(stored.net_work_duration(), Some(Duration::hours(8) + Duration::minutes(10)));
    }

    #[test_context(TimeClockTestContext)]
    #[test]
    fn test_missing_record_is_reported(ctx: &mut TimeClockTestContext) {
        let clock = ctx.clock();

        let err = clock.break_start(5, day(), at(10, 0)).unwrap_err();
        assert!(matches!(err, AttendanceError::RecordNotFound { employee_id: 5, .. }));

        let err = clock.clock_out(5, day(), at(17, 0)).unwrap_err();
        assert!(matches!(err, AttendanceError::RecordNotFound { .. }));
        assert!(clock.record(5, day()).unwrap().is_none());
    }

    #[test_context(TimeClockTestContext)]
    #[test]
    fn test_rejected_transition_is_not_saved(ctx: &mut TimeClockTestContext) {
        let clock = ctx.clock_with(TrackerPolicy {
            skew: SkewPolicy::Reject,
            ..TrackerPolicy::default()
        });
        clock.clock_in(2, day(), at(9, 0)).unwrap();

        assert!(matches!(clock.break_start(2, day(), at(8, 0)), Err(AttendanceError::ClockSkew(_))));
        assert!(matches!(clock.break_end(2, day(), at(10, 0)), Err(AttendanceError::InvalidTransition { .. })));

        let stored = clock.record(2, day()).unwrap().unwrap();
        assert_eq!(stored.status(), AttendanceStatus::Active);
        assert!(stored.break_events().is_empty());
    }

    #[test_context(TimeClockTestContext)]
    #[test]
    fn test_clamped_event_flags_stored_record(ctx: &mut TimeClockTestContext) {
        let clock = ctx.clock();
        clock.clock_in(3, day(), at(9, 0)).unwrap();
        let (_, transition) = clock.break_start(3, day(), at(8, 30)).unwrap();

        assert!(transition.skew.is_some());
        let stored = clock.record(3, day()).unwrap().unwrap();
        assert!(stored.had_skew());
        assert_eq!(stored.open_break().unwrap().start, at(9, 0));
    }

    #[test_context(TimeClockTestContext)]
    #[test]
    fn test_clock_out_before_clock_in_is_stored_with_zero_work(ctx: &mut TimeClockTestContext) {
        let clock = ctx.clock();
        clock.clock_in(4, day(), at(9, 0)).unwrap();
        clock.break_start(4, day(), at(12, 0)).unwrap();
        clock.break_end(4, day(), at(12, 30)).unwrap();
        let (record, _) = clock.clock_out(4, day(), at(8, 0)).unwrap();

        let stored = clock.record(4, day()).unwrap().unwrap();
        assert_eq!(stored, record);
        assert!(stored.had_skew());
        assert_eq!(stored.total_work_duration(), Some(Duration::zero()));
        assert_eq!(stored.net_work_duration(), Some(Duration::zero()));
    }

    #[test_context(TimeClockTestContext)]
    #[test]
    fn test_day_lists_every_record(ctx: &mut TimeClockTestContext) {
        let clock = ctx.clock();
        clock.clock_in(2, day(), at(9, 0)).unwrap();
        clock.clock_in(1, day(), at(8, 0)).unwrap();
        clock.clock_in(1, day().succ_opt().unwrap(), at(8, 0) + Duration::days(1)).unwrap();

        let records = clock.day(day()).unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.employee_id()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test_context(TimeClockTestContext)]
    #[test]
    fn test_concurrent_clock_ins_apply_once(ctx: &mut TimeClockTestContext) {
        const THREADS: usize = 8;
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let clock = ctx.clock();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    clock.clock_in(9, day(), at(9, i as u32)).is_ok()
                })
            })
            .collect();

        let successes = handles.into_iter().map(|h| h.join().unwrap()).filter(|ok| *ok).count();

        assert_eq!(successes, 1);
        assert_eq!(ctx.locks.tracked(), 0);
        let stored = ctx.clock().record(9, day()).unwrap().unwrap();
        assert_eq!(stored.status(), AttendanceStatus::Active);
    }

    /// Clocks with their own lock registry stand in for separate processes;
    /// only the database transaction keeps them from racing.
    #[test_context(TimeClockTestContext)]
    #[test]
    fn test_unshared_clocks_apply_each_transition_once(ctx: &mut TimeClockTestContext) {
        const ROUNDS: i64 = 10;
        const THREADS: usize = 4;

        for employee_id in 100..100 + ROUNDS {
            let barrier = Arc::new(Barrier::new(THREADS));
            let handles: Vec<_> = (0..THREADS)
                .map(|i| {
                    let store = AttendanceStore::with_db(Db::open(&ctx.db_path).unwrap());
                    let clock = TimeClock::new(store, Arc::new(RecordLocks::new()), AttendanceTracker::default());
                    let barrier = Arc::clone(&barrier);
                    thread::spawn(move || {
                        barrier.wait();
                        clock.clock_in(employee_id, day(), at(9, i as u32))
                    })
                })
                .collect();

            let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1, "employee {employee_id}");
            for err in results.into_iter().filter_map(Result::err) {
                assert!(matches!(
                    err,
                    AttendanceError::InvalidTransition {
                        status: AttendanceStatus::Active,
                        ..
                    }
                ));
            }

            let stored = ctx.clock().record(employee_id, day()).unwrap().unwrap();
            assert_eq!(stored.status(), AttendanceStatus::Active);
            assert!(stored.break_events().is_empty());
        }
    }
}
