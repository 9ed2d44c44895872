use super::*;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_emsal_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("EMSAL_DB_PATH");
        env::remove_var("EMSAL_INDEX_PATH");
        env::remove_var("EMSAL_META_PATH");
        env::remove_var("EMSAL_EMBEDDER_PATH");
        env::remove_var("EMSAL_LLM_MODEL");
        env::remove_var("EMSAL_LLM_MAX_TOKENS_ANALYSIS");
        env::remove_var("EMSAL_LLM_MAX_TOKENS_EXPLAIN");
        env::remove_var("EMSAL_TOP_N");
        env::remove_var("EMSAL_BUSY_TIMEOUT_SECS");
    }
}

/// Config whose three data files exist in `dir`.
fn config_with_files(dir: &std::path::Path) -> Config {
    let db_path = dir.join("decisions.sqlite");
    let index_path = dir.join("chunks.index");
    let meta_path = dir.join("meta.json");
    for path in [&db_path, &index_path, &meta_path] {
        fs::write(path, b"x").unwrap();
    }

    Config {
        db_path,
        index_path,
        meta_path,
        ..Default::default()
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.db_path, PathBuf::from("data/decisions.sqlite"));
    assert_eq!(config.index_path, PathBuf::from("data/chunks.index"));
    assert_eq!(config.meta_path, PathBuf::from("data/meta.json"));
    assert!(config.embedder_path.is_none());
    assert!(config.llm_model.is_none());
    assert_eq!(config.analysis_max_tokens, 200);
    assert_eq!(config.explain_max_tokens, 800);
    assert_eq!(config.top_n, 20);
    assert_eq!(config.busy_timeout_secs, 30);
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_emsal_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.top_n, 20);
    assert!(config.llm_config().is_none());
}

#[test]
#[serial]
fn test_from_env_paths() {
    clear_emsal_env();

    with_env_vars(
        &[
            ("EMSAL_DB_PATH", "/srv/emsal/kararlar.sqlite"),
            ("EMSAL_INDEX_PATH", "/srv/emsal/chunks.index"),
            ("EMSAL_META_PATH", "/srv/emsal/meta.json"),
            ("EMSAL_EMBEDDER_PATH", "/models/minilm"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.db_path, PathBuf::from("/srv/emsal/kararlar.sqlite"));
            assert_eq!(config.index_path, PathBuf::from("/srv/emsal/chunks.index"));
            assert_eq!(config.meta_path, PathBuf::from("/srv/emsal/meta.json"));
            assert_eq!(config.embedder_path, Some(PathBuf::from("/models/minilm")));
        },
    );
}

#[test]
#[serial]
fn test_from_env_blank_optional_values_are_none() {
    clear_emsal_env();

    with_env_vars(
        &[("EMSAL_EMBEDDER_PATH", "   "), ("EMSAL_LLM_MODEL", "")],
        || {
            let config = Config::from_env().expect("should parse");
            assert!(config.embedder_path.is_none());
            assert!(config.llm_model.is_none());
        },
    );
}

#[test]
#[serial]
fn test_from_env_llm_settings() {
    clear_emsal_env();

    with_env_vars(
        &[
            ("EMSAL_LLM_MODEL", "gpt-4o-mini"),
            ("EMSAL_LLM_MAX_TOKENS_ANALYSIS", "150"),
            ("EMSAL_LLM_MAX_TOKENS_EXPLAIN", "600"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            let llm = config.llm_config().expect("llm configured");
            assert_eq!(llm.model, "gpt-4o-mini");
            assert_eq!(llm.analysis_max_tokens, 150);
            assert_eq!(llm.explain_max_tokens, 600);
        },
    );
}

#[test]
#[serial]
fn test_from_env_numbers() {
    clear_emsal_env();

    with_env_vars(
        &[("EMSAL_TOP_N", " 10 "), ("EMSAL_BUSY_TIMEOUT_SECS", "5")],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.top_n, 10);
            assert_eq!(config.busy_timeout_secs, 5);
        },
    );
}

#[test]
#[serial]
fn test_from_env_invalid_number() {
    clear_emsal_env();

    with_env_vars(&[("EMSAL_TOP_N", "yirmi")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NumberParseError {
                name: "EMSAL_TOP_N",
                ..
            }
        ));
    });

    with_env_vars(&[("EMSAL_BUSY_TIMEOUT_SECS", "-1")], || {
        assert!(Config::from_env().is_err());
    });
}

#[test]
fn test_validate_ok() {
    let dir = tempdir().unwrap();
    assert!(config_with_files(dir.path()).validate().is_ok());
}

#[test]
fn test_validate_missing_database() {
    let dir = tempdir().unwrap();
    let config = Config {
        db_path: dir.path().join("missing.sqlite"),
        ..config_with_files(dir.path())
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));
}

#[test]
fn test_validate_index_is_directory() {
    let dir = tempdir().unwrap();
    let config = Config {
        index_path: dir.path().to_path_buf(),
        ..config_with_files(dir.path())
    };

    assert!(matches!(config.validate(), Err(ConfigError::NotAFile { .. })));
}

#[test]
fn test_validate_embedder_path() {
    let dir = tempdir().unwrap();
    let base = config_with_files(dir.path());

    let config = Config {
        embedder_path: Some(dir.path().join("no-model")),
        ..base.clone()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));

    let config = Config {
        embedder_path: Some(base.meta_path.clone()),
        ..base.clone()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotADirectory { .. })
    ));

    let config = Config {
        embedder_path: Some(dir.path().to_path_buf()),
        ..base
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_zero_top_n() {
    let dir = tempdir().unwrap();
    let config = Config {
        top_n: 0,
        ..config_with_files(dir.path())
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn test_validate_oversized_top_n() {
    let dir = tempdir().unwrap();
    let config = Config {
        top_n: usize::MAX,
        ..config_with_files(dir.path())
    };

    match config.validate() {
        Err(ConfigError::InvalidValue { name, reason }) => {
            assert_eq!(name, "EMSAL_TOP_N");
            assert!(reason.contains("1000"));
        }
        other => panic!("expected InvalidValue, got {other:?}"),
    }

    let config = Config {
        top_n: crate::constants::MAX_TOP_N,
        ..config_with_files(dir.path())
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_bad_scoring() {
    use crate::scoring::FusionConfig;

    let dir = tempdir().unwrap();
    let mut config = config_with_files(dir.path());
    config.scoring = config
        .scoring
        .with_fusion(FusionConfig::default().with_bounds(0.9, 0.6));

    assert!(matches!(config.validate(), Err(ConfigError::Scoring(_))));
}

#[test]
fn test_embedder_config_stub_when_unset() {
    let config = Config::default();
    assert!(config.embedder_config().model_dir.is_none());

    let config = Config {
        embedder_path: Some(PathBuf::from("/models/minilm")),
        ..Default::default()
    };
    assert_eq!(
        config.embedder_config().model_dir,
        Some(PathBuf::from("/models/minilm"))
    );
}
