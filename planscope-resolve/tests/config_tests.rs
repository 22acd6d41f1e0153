use planscope_resolve::{CyclePolicy, ResolveError, ResolverConfig};
use std::io::Write;

#[test]
fn defaults_match_main_level_prototypes() {
    let config = ResolverConfig::default();
    assert_eq!(config.root_ref_codes, vec!["CQ", "SO", "SP"]);
    assert_eq!(config.cycle_policy, CyclePolicy::Truncate);
    assert!(config.is_root_ref_code("SO"));
    assert!(!config.is_root_ref_code("CL"));
}

#[test]
fn parses_resolver_section() {
    let config = ResolverConfig::from_toml_str(
        r#"
        [resolver]
        root-ref-codes = ["SO", "CA"]
        cycle-policy = "error"
        "#,
    )
    .unwrap();
    assert_eq!(config.root_ref_codes, vec!["SO", "CA"]);
    assert_eq!(config.cycle_policy, CyclePolicy::Error);
}

#[test]
fn missing_keys_fall_back_to_defaults() {
    let config = ResolverConfig::from_toml_str("[resolver]\ncycle-policy = \"error\"\n").unwrap();
    assert_eq!(config.root_ref_codes, vec!["CQ", "SO", "SP"]);

    let empty = ResolverConfig::from_toml_str("").unwrap();
    assert_eq!(empty, ResolverConfig::default());
}

#[test]
fn invalid_toml_is_an_error() {
    let err = ResolverConfig::from_toml_str("[resolver]\ncycle-policy = \"explode\"\n").unwrap_err();
    assert!(matches!(err, ResolveError::Config(_)));
}

#[test]
fn load_from_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ResolverConfig::load_from(dir.path().join("resolver.toml"));
    assert_eq!(config, ResolverConfig::default());
}

#[test]
fn load_from_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[resolver]\nroot-ref-codes = [\"SP\"]").unwrap();
    let config = ResolverConfig::load_from(file.path());
    assert_eq!(config.root_ref_codes, vec!["SP"]);
}

#[test]
fn load_from_malformed_file_uses_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "this is not toml = = =").unwrap();
    let config = ResolverConfig::load_from(file.path());
    assert_eq!(config, ResolverConfig::default());
}
