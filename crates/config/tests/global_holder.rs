//! Process-wide holder lifecycle. Kept in its own test binary so that no
//! other test can initialize the holder first.

use espa_config::{ConfigLoader, EspaConfig};
use espa_types::ConfigError;

#[test]
fn test_install_global_at_entrypoint() {
    let config = ConfigLoader::load_from_str(r#"host_url: "https://espa-dev.example.test""#).unwrap();
    EspaConfig::install_global(config.clone()).unwrap();

    let global = EspaConfig::global().unwrap();
    assert_eq!(global, &config);
    assert_eq!(global.api_host_url(), "https://espa-dev.example.test");

    let second = EspaConfig::from_defaults().unwrap();
    let err = EspaConfig::install_global(second).unwrap_err();
    assert!(matches!(err, ConfigError::AlreadyInitialized));
    assert_eq!(EspaConfig::global().unwrap().api_host_url(), "https://espa-dev.example.test");
}
