#[cfg(test)]
mod tests {
    use crate::config::{
        ConfigLoader, LogFormat, LogLevel, ModelConfig, SidecarConfig, DEFAULT_MODEL_ID,
        validate_config,
    };
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_default_config() {
        let config = SidecarConfig::default();
        assert_eq!(config.model.id, DEFAULT_MODEL_ID);
        assert_eq!(config.model.revision, "main");
        assert_eq!(config.model.max_length, 512);
        assert_eq!(config.model.cache_dir, None);
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.logging.format, LogFormat::Default);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_label_aliases() {
        let config = ModelConfig::default();
        assert_eq!(config.resolve_label("PER"), "PERSON");
        assert_eq!(config.resolve_label("ORG"), "ORG");
        assert_eq!(config.resolve_label("LOC"), "LOC");
    }

    #[test]
    fn test_with_id_keeps_defaults() {
        let config = ModelConfig::with_id("rules");
        assert_eq!(config.id, "rules");
        assert_eq!(config.max_length, 512);
        assert_eq!(config.resolve_label("PER"), "PERSON");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = SidecarConfig::default();
        config.model.id = "  ".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = SidecarConfig::default();
        config.model.max_length = 2;
        assert!(validate_config(&config).is_err());

        let mut config = SidecarConfig::default();
        config.model.label_aliases.insert("MISC".to_string(), String::new());
        assert!(validate_config(&config).is_err());

        let mut config = SidecarConfig::default();
        config.logging.stdout = false;
        assert!(validate_config(&config).is_err());
        config.logging.file = Some(PathBuf::from("/tmp/ner-sidecar.log"));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ner-sidecar.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[model]
id = "rules"
max_length = 256

[model.label_aliases]
PER = "PERSON"
LOC = "GPE"

[logging]
level = "debug"
format = "json"
"#
        )
        .unwrap();

        let config = ConfigLoader::new().load_file(&path).unwrap().extract().unwrap();
        assert_eq!(config.model.id, "rules");
        assert_eq!(config.model.max_length, 256);
        assert_eq!(config.model.revision, "main");
        assert_eq!(config.model.resolve_label("LOC"), "GPE");
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_load_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ner-sidecar.json");
        std::fs::write(&path, r#"{"model": {"id": "/models/bert-ner", "revision": "v1"}}"#).unwrap();

        let config = ConfigLoader::new().load_file(&path).unwrap().extract().unwrap();
        assert_eq!(config.model.id, "/models/bert-ner");
        assert_eq!(config.model.revision, "v1");
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_missing_and_unsupported_files() {
        let mut loader = ConfigLoader::new();
        assert!(loader.load_file("/definitely/not/here.toml").is_err());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "model=rules").unwrap();
        assert!(loader.load_file(&path).is_err());

        // A failed load leaves the defaults usable
        let config = loader.extract().unwrap();
        assert_eq!(config.model.id, DEFAULT_MODEL_ID);
    }

    #[test]
    fn test_invalid_file_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ner-sidecar.yaml");
        std::fs::write(&path, "model:\n  id: \"\"\n").unwrap();

        let result = ConfigLoader::new().load_file(&path).unwrap().extract();
        assert!(result.is_err());
    }
}
