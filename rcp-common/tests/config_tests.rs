//! Configuration resolution tests
//!
//! Tests that manipulate RCP_DATA_DIR or RCP_FORMAT are marked #[serial]
//! so they do not race on the process environment.

use rcp_common::config::{
    resolve_data_dir, CommonArgs, DataDirSource, PipelineConfig, DATA_DIR_ENV, DEFAULT_DATA_DIR,
    FORMAT_ENV,
};
use rcp_common::DataFormat;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};

fn clear_env() {
    env::remove_var(DATA_DIR_ENV);
    env::remove_var(FORMAT_ENV);
}

#[test]
#[serial]
fn test_default_data_dir_when_nothing_configured() {
    clear_env();

    let (dir, source) = resolve_data_dir(None, None);
    assert_eq!(dir, PathBuf::from(DEFAULT_DATA_DIR));
    assert_eq!(source, DataDirSource::Default);
}

#[test]
#[serial]
fn test_env_var_beats_config_file() {
    clear_env();
    env::set_var(DATA_DIR_ENV, "/tmp/rcp-env-dir");

    let (dir, source) = resolve_data_dir(None, Some(Path::new("/tmp/rcp-toml-dir")));
    assert_eq!(dir, PathBuf::from("/tmp/rcp-env-dir"));
    assert_eq!(source, DataDirSource::Environment);

    clear_env();
}

#[test]
#[serial]
fn test_config_file_used_without_env() {
    clear_env();

    let (dir, source) = resolve_data_dir(None, Some(Path::new("/tmp/rcp-toml-dir")));
    assert_eq!(dir, PathBuf::from("/tmp/rcp-toml-dir"));
    assert_eq!(source, DataDirSource::ConfigFile);
}

#[test]
#[serial]
fn test_load_from_explicit_config_file() {
    clear_env();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "data_dir = \"/srv/export\"\nformat = \"json\"\n\n[analytics]\ntop_n = 5"
    )
    .unwrap();

    let args = CommonArgs {
        config: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    let config = PipelineConfig::load(&args).unwrap();

    assert_eq!(config.data_dir, PathBuf::from("/srv/export"));
    assert_eq!(config.data_dir_source, DataDirSource::ConfigFile);
    assert_eq!(config.format, DataFormat::Json);
    assert_eq!(config.analytics.top_n, 5);
    assert_eq!(config.analytics.engaged_recipes, 5);
    assert_eq!(config.config_file.as_deref(), Some(file.path()));
}

#[test]
#[serial]
fn test_cli_overrides_config_file() {
    clear_env();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "data_dir = \"/srv/export\"\nformat = \"json\"").unwrap();

    let args = CommonArgs {
        data_dir: Some(PathBuf::from("/tmp/cli-dir")),
        format: Some(DataFormat::Csv),
        config: Some(file.path().to_path_buf()),
    };
    let config = PipelineConfig::load(&args).unwrap();

    assert_eq!(config.data_dir, PathBuf::from("/tmp/cli-dir"));
    assert_eq!(config.format, DataFormat::Csv);
}

#[test]
#[serial]
fn test_format_env_var() {
    clear_env();
    env::set_var(FORMAT_ENV, "json");

    let file = tempfile::NamedTempFile::new().unwrap();
    let args = CommonArgs {
        config: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    let config = PipelineConfig::load(&args).unwrap();
    assert_eq!(config.format, DataFormat::Json);

    env::set_var(FORMAT_ENV, "yaml");
    assert!(PipelineConfig::load(&args).is_err());

    clear_env();
}

#[test]
#[serial]
fn test_missing_explicit_config_is_error() {
    clear_env();

    let args = CommonArgs {
        config: Some(PathBuf::from("/nonexistent/rcp/config.toml")),
        ..Default::default()
    };
    assert!(PipelineConfig::load(&args).is_err());
}

#[test]
#[serial]
fn test_malformed_config_is_error() {
    clear_env();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "data_dir = [unterminated").unwrap();

    let args = CommonArgs {
        config: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    let err = PipelineConfig::load(&args).unwrap_err();
    assert!(err.to_string().contains("Configuration error"));
}
