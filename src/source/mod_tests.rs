//! Tests for property sources.

use std::sync::Arc;

use tempfile::TempDir;

use crate::error::SourceError;
use crate::source::{
    MemorySource, PropertiesFile, PropertySource, default_properties_template, parse_definition,
    write_default_properties,
};

mod memory_source {
    use super::*;

    #[test]
    fn get_returns_none_for_absent_key() {
        let source = MemorySource::new();
        assert_eq!(source.get("missing"), None);
    }

    #[test]
    fn set_then_get_returns_value() {
        let source = MemorySource::new();
        source.set("a.b", "1");
        assert_eq!(source.get("a.b").as_deref(), Some("1"));
    }

    #[test]
    fn set_replaces_previous_value() {
        let source = MemorySource::new();
        source.set("a.b", "1");
        source.set("a.b", "2");

        assert_eq!(source.get("a.b").as_deref(), Some("2"));
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn remove_returns_previous_value() {
        let source = MemorySource::new();
        source.set("k", "v");

        assert_eq!(source.remove("k").as_deref(), Some("v"));
        assert!(source.is_empty());
    }

    #[test]
    fn from_iter_seeds_entries() {
        let source: MemorySource = [("x", "1"), ("y", "2")].into_iter().collect();
        assert_eq!(source.len(), 2);
        assert_eq!(source.get("y").as_deref(), Some("2"));
    }

    #[test]
    fn snapshot_is_key_ordered() {
        let source: MemorySource = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(
            source.snapshot(),
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn shared_store_sees_writes_from_any_holder() {
        let source = Arc::new(MemorySource::new());
        let other: Arc<dyn PropertySource> = source.clone();

        other.set("shared", "yes");
        assert_eq!(source.get("shared").as_deref(), Some("yes"));
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MemorySource>();
    }
}

mod definitions {
    use super::*;

    #[test]
    fn splits_key_and_value() {
        assert_eq!(
            parse_definition("cruise.server.port=9000").unwrap(),
            ("cruise.server.port".to_string(), "9000".to_string())
        );
    }

    #[test]
    fn keeps_equals_in_value() {
        let (_, value) = parse_definition("jvm.args=-Da=b").unwrap();
        assert_eq!(value, "-Da=b");
    }

    #[test]
    fn allows_empty_value() {
        let (key, value) = parse_definition("agent.launcher.version=").unwrap();
        assert_eq!(key, "agent.launcher.version");
        assert_eq!(value, "");
    }

    #[test]
    fn rejects_missing_equals() {
        assert!(matches!(
            parse_definition("novalue"),
            Err(SourceError::InvalidDefinition { .. })
        ));
    }

    #[test]
    fn rejects_empty_key() {
        assert!(parse_definition(" =1").is_err());
    }
}

mod properties_file {
    use super::*;

    #[test]
    fn parse_flattens_nested_tables() {
        let source = PropertiesFile::parse(
            r#"
            [cruise.server]
            port = 8153
            "ssl.port" = 8154
            "#,
        )
        .unwrap();

        assert_eq!(source.get("cruise.server.port").as_deref(), Some("8153"));
        assert_eq!(source.get("cruise.server.ssl.port").as_deref(), Some("8154"));
    }

    #[test]
    fn parse_accepts_quoted_dotted_top_level_keys() {
        let source = PropertiesFile::parse(r#""db.full.limit" = "50M""#).unwrap();
        assert_eq!(source.get("db.full.limit").as_deref(), Some("50M"));
    }

    #[test]
    fn parse_stringifies_scalars() {
        let source = PropertiesFile::parse(
            r#"
            flag = true
            ratio = 0.5
            name = "h2"
            "#,
        )
        .unwrap();

        assert_eq!(source.get("flag").as_deref(), Some("true"));
        assert_eq!(source.get("ratio").as_deref(), Some("0.5"));
        assert_eq!(source.get("name").as_deref(), Some("h2"));
    }

    #[test]
    fn parse_rejects_arrays() {
        let err = PropertiesFile::parse("[a]\nlist = [1, 2]").unwrap_err();
        assert!(matches!(
            err,
            SourceError::UnsupportedValue { ref key, kind: "array" } if key == "a.list"
        ));
    }

    #[test]
    fn parse_rejects_datetimes() {
        let err = PropertiesFile::parse("when = 1979-05-27T07:32:00Z").unwrap_err();
        assert!(matches!(
            err,
            SourceError::UnsupportedValue {
                kind: "datetime",
                ..
            }
        ));
    }

    #[test]
    fn parse_reports_invalid_toml() {
        let err = PropertiesFile::parse("this is not toml").unwrap_err();
        assert!(matches!(err, SourceError::TomlParse(_)));
    }

    #[test]
    fn load_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sysenv.toml");
        std::fs::write(&path, "[plugins]\nenabled = \"Y\"\n").unwrap();

        let source = PropertiesFile::load(&path).unwrap();
        assert_eq!(source.get("plugins.enabled").as_deref(), Some("Y"));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");

        let err = PropertiesFile::load(&path).unwrap_err();
        assert!(matches!(err, SourceError::FileRead { .. }));
    }
}

mod template {
    use super::*;

    #[test]
    fn default_template_parses_to_empty_source() {
        let source = PropertiesFile::parse(&default_properties_template()).unwrap();
        assert!(source.is_empty());
    }

    #[test]
    fn write_default_properties_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sysenv.toml");

        write_default_properties(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, default_properties_template());
    }

    #[test]
    fn write_default_properties_reports_bad_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("sysenv.toml");

        let err = write_default_properties(&path).unwrap_err();
        assert!(matches!(err, SourceError::FileWrite { .. }));
    }
}
