use std::fs;

use atomspace_rest::settings::{DEFAULT_LISTEN, Settings};

// Kept alone in its own test binary: the variable is process-wide.
#[test]
fn environment_overrides_defaults_and_file() {
    let base = std::env::temp_dir().join(format!("atomspace-env-{}", std::process::id()));
    let file = base.with_extension("toml");
    fs::write(&file, "log_filter = \"warn\"\nlisten = \"0.0.0.0:9000\"\n").unwrap();

    unsafe { std::env::set_var("ATOMSPACE_LOG_FILTER", "debug") };
    let defaults = Settings::load_from("/nonexistent/atomspace-settings");
    let from_file = Settings::load_from(base.to_str().unwrap());
    unsafe { std::env::remove_var("ATOMSPACE_LOG_FILTER") };
    fs::remove_file(&file).unwrap();

    let defaults = defaults.unwrap();
    assert_eq!(defaults.log_filter, "debug");
    assert_eq!(defaults.listen, DEFAULT_LISTEN);
    let from_file = from_file.unwrap();
    assert_eq!(from_file.log_filter, "debug");
    assert_eq!(from_file.listen, "0.0.0.0:9000");
}
