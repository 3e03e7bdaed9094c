//! Runtime initializer tests

use lucky_infrastructure::di::RuntimeInitializer;
use tempfile::TempDir;

#[test]
fn test_initializer_loads_config_logs_and_bootstraps() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("lucky.toml");
    std::fs::write(
        &config_path,
        "[logging]\nlevel = \"debug\"\n\n[container]\neager_aspects = true\n",
    )
    .unwrap();

    let initializer = RuntimeInitializer::new().with_config_path(&config_path);
    let config = initializer.load_config().unwrap();
    assert_eq!(config.logging.level, "debug");

    let context = initializer.initialize().unwrap();
    assert!(context.config().container.eager_aspects);
    assert!(context.advice_ready());
    assert_eq!(context.shutdown().unwrap(), 0);
}
