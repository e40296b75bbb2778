//! Tests for the run module.

use super::*;

/// Runs a command line and captures its standard output.
fn run(args: &[&str]) -> (Result<(), RunError>, String) {
    let cli = Cli::parse_from_iter(std::iter::once("sysenv").chain(args.iter().copied()));
    let mut out = Vec::new();
    let result = execute(&cli, &mut out);
    (result, String::from_utf8(out).unwrap())
}

mod run_error {
    use super::*;

    #[test]
    fn unknown_key_displays_key() {
        let error = RunError::UnknownKey {
            key: "no.such.key".to_string(),
        };
        assert_eq!(error.to_string(), "Unknown property 'no.such.key'");
    }

    #[test]
    fn resolution_errors_are_classified() {
        let malformed = SettingError::malformed(
            "cruise.server.port",
            "http",
            sysenv::error::ParseError::InvalidSize,
        );
        assert!(RunError::Setting(malformed).is_resolution());
        assert!(RunError::Unresolved { count: 1 }.is_resolution());
    }

    #[test]
    fn configuration_errors_are_not_resolution_errors() {
        let error = RunError::Source(SourceError::InvalidDefinition {
            value: "oops".to_string(),
        });
        assert!(!error.is_resolution());
        assert!(!RunError::UnknownKey { key: String::new() }.is_resolution());
    }
}

mod show {
    use super::*;

    #[test]
    fn lists_every_setting_with_defaults() {
        let (result, out) = run(&["show"]);

        assert!(result.is_ok());
        assert_eq!(out.lines().count(), catalog::entries().len());
        assert!(out.contains("cruise.server.port"));
        assert!(out.contains("= 8153 (cached)"));
        assert!(out.contains("= db/config.git (read-through)"));
    }

    #[test]
    fn json_output_is_an_array_of_entries() {
        let (result, out) = run(&["-D", "cruise.server.port=9090", "show", "--json"]);
        assert!(result.is_ok());

        let entries: serde_json::Value = serde_json::from_str(&out).unwrap();
        let entries = entries.as_array().unwrap();
        assert_eq!(entries.len(), catalog::entries().len());

        let port = entries
            .iter()
            .find(|e| e["key"] == "cruise.server.port")
            .unwrap();
        assert_eq!(port["value"], "9090");
        assert_eq!(port["policy"], "cached");
        assert!(port.get("error").is_none());
    }

    #[test]
    fn malformed_values_are_reported_without_hiding_others() {
        let (result, out) = run(&["-D", "cruise.server.port=http", "show"]);

        assert!(matches!(result, Err(RunError::Unresolved { count: 1 })));
        assert!(out.contains("cruise.server.port"));
        assert!(out.contains("'http'"));
        assert!(out.contains("= 8154 (cached)"));
    }

    #[test]
    fn json_reports_error_field() {
        let (result, out) = run(&["-D", "db.full.limit=lots", "show", "--json"]);
        assert!(result.is_err());

        let entries: serde_json::Value = serde_json::from_str(&out).unwrap();
        let limit = entries
            .as_array()
            .unwrap()
            .iter()
            .find(|e| e["key"] == "db.full.limit")
            .unwrap();
        assert!(limit.get("value").is_none());
        assert!(limit["error"].as_str().unwrap().contains("lots"));
    }
}

mod get {
    use super::*;

    #[test]
    fn well_known_key_resolves_default() {
        let (result, out) = run(&["get", "cruise.server.ssl.port"]);

        assert!(result.is_ok());
        assert_eq!(out, "8154\n");
    }

    #[test]
    fn definition_overrides_default() {
        let (_, out) = run(&["-D", "db.full.limit=2G", "get", "db.full.limit"]);

        assert_eq!(out, "2048\n");
    }

    #[test]
    fn set_writes_through_accessor() {
        let (_, out) = run(&["--set", "cruise.shine.xslt-cache-size=50", "get", "cruise.shine.xslt-cache-size"]);

        assert_eq!(out, "50\n");
    }

    #[test]
    fn malformed_set_is_a_resolution_error() {
        let (result, out) = run(&["--set", "cruise.server.port=http", "get", "cruise.server.port"]);

        let error = result.unwrap_err();
        assert!(error.is_resolution());
        assert!(out.is_empty());
    }

    #[test]
    fn malformed_value_is_a_resolution_error() {
        let (result, _) = run(&["-D", "agent.connection.timeout=soon", "get", "agent.connection.timeout"]);

        assert!(matches!(result, Err(RunError::Setting(_))));
    }

    #[test]
    fn durations_print_in_milliseconds() {
        let (_, out) = run(&["get", "material.update.idle.interval"]);

        assert_eq!(out, "60000ms\n");
    }

    #[test]
    fn plugin_and_feature_keys_resolve() {
        let (_, level) = run(&["-D", "plugin.p.log.level=debug", "get", "plugin.p.log.level"]);
        assert_eq!(level, "DEBUG\n");

        let (_, flag) = run(&["get", "cruise.experimental.feature.f"]);
        assert_eq!(flag, "false\n");
    }

    #[test]
    fn feature_key_honors_enable_all() {
        let (result, out) = run(&[
            "-D",
            "cruise.experimental.enable.all=true",
            "get",
            "cruise.experimental.feature.f",
        ]);

        assert!(result.is_ok());
        assert_eq!(out, "true\n");
    }

    #[test]
    fn feature_key_agrees_with_feature_command() {
        let args = ["-D", "cruise.experimental.feature.f=Y"];
        let (_, by_key) = run(&[args[0], args[1], "get", "cruise.experimental.feature.f"]);
        let (_, by_name) = run(&[args[0], args[1], "feature", "f"]);

        assert_eq!(by_key, "true\n");
        assert_eq!(by_name, "enabled\n");
    }

    #[test]
    fn other_keys_print_raw_value() {
        let (result, out) = run(&["-D", "custom.key=some value", "get", "custom.key"]);

        assert!(result.is_ok());
        assert_eq!(out, "some value\n");
    }

    #[test]
    fn absent_unknown_key_is_an_error() {
        let (result, _) = run(&["get", "custom.key"]);

        assert!(matches!(result, Err(RunError::UnknownKey { key }) if key == "custom.key"));
    }
}

mod commands {
    use super::*;

    #[test]
    fn feature_is_disabled_by_default() {
        let (_, out) = run(&["feature", "some-feature"]);
        assert_eq!(out, "disabled\n");
    }

    #[test]
    fn feature_flag_enables_feature() {
        let (_, out) = run(&["-D", "cruise.experimental.feature.some-feature=true", "feature", "some-feature"]);
        assert_eq!(out, "enabled\n");
    }

    #[test]
    fn enable_all_enables_every_feature() {
        let (_, out) = run(&["-D", "cruise.experimental.enable.all=true", "feature", "some-feature"]);
        assert_eq!(out, "enabled\n");
    }

    #[test]
    fn path_is_prefixed_with_context_path() {
        let (_, out) = run(&["path", "foo/bar"]);
        assert_eq!(out, "/go/foo/bar\n");
    }

    #[test]
    fn plugin_level_defaults_to_info() {
        let (_, out) = run(&["plugin-level", "some-plugin"]);
        assert_eq!(out, "INFO\n");
    }

    #[test]
    fn invalid_definition_is_a_configuration_error() {
        let (result, _) = run(&["-D", "no-equals-sign", "show"]);

        let error = result.unwrap_err();
        assert!(matches!(
            error,
            RunError::Source(SourceError::InvalidDefinition { .. })
        ));
        assert!(!error.is_resolution());
    }
}

mod properties_file {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn values_are_loaded_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sysenv.toml");
        std::fs::write(&path, "[cruise.server]\nport = 9090\n").unwrap();

        let (result, out) = run(&["-p", path.to_str().unwrap(), "get", "cruise.server.port"]);

        assert!(result.is_ok());
        assert_eq!(out, "9090\n");
    }

    #[test]
    fn definitions_override_file_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sysenv.toml");
        std::fs::write(&path, "[cruise.server]\nport = 9090\n").unwrap();

        let (_, out) = run(&[
            "-p",
            path.to_str().unwrap(),
            "-D",
            "cruise.server.port=7070",
            "get",
            "cruise.server.port",
        ]);

        assert_eq!(out, "7070\n");
    }

    #[test]
    fn missing_file_is_a_configuration_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");

        let (result, _) = run(&["-p", path.to_str().unwrap(), "show"]);

        assert!(matches!(
            result,
            Err(RunError::Source(SourceError::FileRead { .. }))
        ));
    }

    #[test]
    fn init_writes_loadable_template() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sysenv.toml");

        let (result, out) = run(&["init", "-o", path.to_str().unwrap()]);

        assert!(result.is_ok());
        assert!(out.contains("Properties template written to"));
        assert!(PropertiesFile::load(&path).is_ok());
    }

    #[test]
    fn init_ignores_missing_properties_file() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("sysenv.toml");
        let missing = dir.path().join("missing.toml");

        let (result, _) = run(&[
            "-p",
            missing.to_str().unwrap(),
            "init",
            "-o",
            output.to_str().unwrap(),
        ]);

        assert!(result.is_ok());
        assert!(output.exists());
    }
}
