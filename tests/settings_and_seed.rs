use std::path::PathBuf;

use atomspace_rest::AtomSpaceError;
use atomspace_rest::atomspace::{AtomSpace, MemoryAtomSpace};
use atomspace_rest::construct::AtomType;
use atomspace_rest::server::load_seed;
use atomspace_rest::settings::{DEFAULT_LISTEN, DEFAULT_LOG_FILTER, Settings};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("atomspace-rest-{}-{name}", std::process::id()))
}

#[test]
fn missing_settings_file_falls_back_to_defaults() {
    let name = temp_path("no-such-settings");
    let settings = Settings::load_from(name.to_str().unwrap()).expect("settings");
    assert_eq!(settings.listen, DEFAULT_LISTEN);
    assert_eq!(settings.log_filter, DEFAULT_LOG_FILTER);
    assert_eq!(settings.seed, None);
}

#[test]
fn settings_file_overrides_defaults() {
    let base = temp_path("settings");
    let file = base.with_extension("toml");
    std::fs::write(&file, "listen = \"0.0.0.0:9999\"\nseed = \"atoms.json\"\n").unwrap();
    let settings = Settings::load_from(base.to_str().unwrap()).expect("settings");
    let _ = std::fs::remove_file(&file);
    assert_eq!(settings.listen, "0.0.0.0:9999");
    assert_eq!(settings.log_filter, DEFAULT_LOG_FILTER);
    assert_eq!(settings.seed, Some(PathBuf::from("atoms.json")));
}

#[test]
fn seed_file_creates_atoms_in_order() {
    let path = temp_path("seed.json");
    std::fs::write(
        &path,
        r#"[
            {"type": "ConceptNode", "name": "cat"},
            {"type": "ConceptNode", "name": "animal", "attentionvalue": {"sti": 3}},
            {"type": "InheritanceLink", "outgoing": [1, 2],
             "truthvalue": {"type": "simple", "details": {"strength": 0.5, "count": 0.4}}}
        ]"#,
    )
    .unwrap();
    let space = MemoryAtomSpace::new();
    let count = load_seed(&space, &path).expect("seed");
    let _ = std::fs::remove_file(&path);
    assert_eq!(count, 3);
    let link = space.get(3).unwrap();
    assert_eq!(link.atom_type(), AtomType::InheritanceLink);
    assert_eq!(link.outgoing(), &[1, 2]);
    assert_eq!(link.tv().strength(), 0.5);
    assert_eq!(space.get(2).unwrap().av().sti(), 3);
}

#[test]
fn malformed_seed_file_is_a_config_error() {
    let path = temp_path("bad-seed.json");
    std::fs::write(&path, "{ not json").unwrap();
    let space = MemoryAtomSpace::new();
    let err = load_seed(&space, &path).unwrap_err();
    let _ = std::fs::remove_file(&path);
    assert!(matches!(err, AtomSpaceError::Config(_)));
}

#[test]
fn missing_seed_file_is_an_io_error() {
    let space = MemoryAtomSpace::new();
    let err = load_seed(&space, &temp_path("absent-seed.json")).unwrap_err();
    assert!(matches!(err, AtomSpaceError::Io(_)));
}
