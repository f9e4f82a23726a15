//! Tests for the logger module

use std::io::Write;
use std::path::PathBuf;

use tracing_subscriber::fmt::MakeWriter;

use crate::logger::config::*;
use crate::logger::writer::{RotatingFileWriter, rotated_path, shift_rotated_files};

fn file_config(path: PathBuf, max_size: u64, max_files: usize) -> FileConfig {
    FileConfig {
        enabled: true,
        path,
        append: true,
        format: LogFormat::Full,
        rotation: RotationConfig {
            max_size,
            max_files,
        },
    }
}

mod config_tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LoggerConfig::default();
        assert!(config.console.enabled);
        assert!(!config.file.enabled);
        assert_eq!(config.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_both_outputs_disabled_is_rejected() {
        let mut config = LoggerConfig::default();
        config.console.enabled = false;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_level_accepts_directives() {
        let mut config = LoggerConfig::default();
        config.level = "debug,roster_rs::api=trace".to_string();
        assert_eq!(config.parse_level().unwrap(), tracing::Level::DEBUG);

        config.level = "loud".to_string();
        assert!(config.parse_level().is_err());
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_rotation_rejects_zero_values() {
        assert!(RotationConfig::new(0, 3).is_err());
        assert!(RotationConfig::new(1024, 0).is_err());
        assert!(RotationConfig::new(1024, 3).is_ok());
    }

    #[test]
    fn test_enabled_file_requires_path() {
        let config = file_config(PathBuf::new(), 1024, 1);
        assert!(config.validate().is_err());

        let mut disabled = config.clone();
        disabled.enabled = false;
        assert!(disabled.validate().is_ok());
    }
}

mod writer_tests {
    use super::*;

    #[test]
    fn test_writer_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/app.log");

        let writer = RotatingFileWriter::new(&file_config(path.clone(), 1024, 2)).unwrap();
        let mut handle = writer.make_writer();
        handle.write_all(b"hello\n").unwrap();
        handle.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
        assert!(!writer.is_in_fallback_mode());
    }

    #[test]
    fn test_writer_rotates_when_size_reached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");

        let writer = RotatingFileWriter::new(&file_config(path.clone(), 8, 2)).unwrap();
        for line in ["first-line\n", "second-line\n", "third-line\n"] {
            let mut handle = writer.make_writer();
            handle.write_all(line.as_bytes()).unwrap();
            handle.flush().unwrap();
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "third-line\n");
        assert_eq!(
            std::fs::read_to_string(rotated_path(&path, 1)).unwrap(),
            "second-line\n"
        );
        assert_eq!(
            std::fs::read_to_string(rotated_path(&path, 2)).unwrap(),
            "first-line\n"
        );
    }

    #[test]
    fn test_shift_keeps_at_most_max_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");

        for round in 0..4 {
            std::fs::write(&path, format!("round {round}")).unwrap();
            shift_rotated_files(&path, 2).unwrap();
        }

        assert!(!path.exists());
        assert_eq!(
            std::fs::read_to_string(rotated_path(&path, 1)).unwrap(),
            "round 3"
        );
        assert_eq!(
            std::fs::read_to_string(rotated_path(&path, 2)).unwrap(),
            "round 2"
        );
        assert!(!rotated_path(&path, 3).exists());
    }

    #[test]
    fn test_truncate_mode_discards_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "stale\n").unwrap();

        let mut config = file_config(path.clone(), 1024, 1);
        config.append = false;
        let writer = RotatingFileWriter::new(&config).unwrap();
        let mut handle = writer.make_writer();
        handle.write_all(b"fresh\n").unwrap();
        handle.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh\n");
    }
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_rotation_validation_matches_bounds(max_size in 0u64..4096, max_files in 0usize..16) {
            let result = RotationConfig::new(max_size, max_files);
            prop_assert_eq!(result.is_ok(), max_size > 0 && max_files > 0);
        }

        #[test]
        fn prop_rotated_path_appends_index(index in 1usize..100) {
            let path = PathBuf::from("logs/app.log");
            let rotated = rotated_path(&path, index);
            prop_assert_eq!(rotated, PathBuf::from(format!("logs/app.log.{index}")));
        }
    }
}
