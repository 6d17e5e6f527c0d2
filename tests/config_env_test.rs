use luadex::Settings;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// Single test so no other test in this binary observes the variables.
#[test]
fn test_env_overrides_settings_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Settings::config_path(temp_dir.path());
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(
        &config_path,
        "[logging]\ndefault = \"info\"\n\n[debug]\ndump_path = \"from-file.json\"\n",
    )
    .unwrap();

    unsafe {
        // Double underscore separates nested levels
        env::set_var("LUADEX_LOGGING__DEFAULT", "debug");
    }

    let settings = Settings::load_for_project(temp_dir.path()).unwrap();

    unsafe {
        env::remove_var("LUADEX_LOGGING__DEFAULT");
    }

    assert_eq!(settings.logging.default, "debug");
    assert_eq!(settings.debug.dump_path, PathBuf::from("from-file.json"));
    assert_eq!(settings.indexing.source_roots, vec![PathBuf::from(".")]);
}
