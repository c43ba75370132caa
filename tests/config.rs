#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use timecard::libs::attendance::{BreakAtClockOut, SkewPolicy, TrackerPolicy};
    use timecard::libs::config::{Config, CONFIG_FILE_NAME};

    struct ConfigTestContext {
        _temp_dir: TempDir,
        config_path: PathBuf,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
            ConfigTestContext {
                _temp_dir: temp_dir,
                config_path,
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_gives_defaults(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.config_path).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.tracker.skew, SkewPolicy::Clamp);
        assert_eq!(config.tracker.break_at_clock_out, BreakAtClockOut::AutoClose);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read(ctx: &mut ConfigTestContext) {
        let config = Config {
            tracker: TrackerPolicy {
                skew: SkewPolicy::Reject,
                break_at_clock_out: BreakAtClockOut::Reject,
            },
            database: Some(PathBuf::from("/var/lib/timecard/attendance.db")),
        };
        config.save_to(&ctx.config_path).unwrap();

        let raw = fs::read_to_string(&ctx.config_path).unwrap();
        assert!(raw.contains("\"break_at_clock_out\": \"reject\""));
        assert_eq!(Config::read_from(&ctx.config_path).unwrap(), config);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_file_fills_defaults(ctx: &mut ConfigTestContext) {
        fs::write(&ctx.config_path, r#"{ "tracker": { "skew": "reject" } }"#).unwrap();

        let config = Config::read_from(&ctx.config_path).unwrap();

        assert_eq!(config.tracker.skew, SkewPolicy::Reject);
        assert_eq!(config.tracker.break_at_clock_out, BreakAtClockOut::AutoClose);
        assert_eq!(config.database, None);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_explicit_database_path_wins(ctx: &mut ConfigTestContext) {
        let path = ctx.config_path.with_file_name("elsewhere.db");
        let config = Config {
            database: Some(path.clone()),
            ..Config::default()
        };

        assert_eq!(config.database_path().unwrap(), path);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_malformed_file_is_an_error(ctx: &mut ConfigTestContext) {
        fs::write(&ctx.config_path, "{ not json").unwrap();

        assert!(Config::read_from(&ctx.config_path).is_err());
    }
}
