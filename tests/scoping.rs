use goswitch::{GoSwitch, GoSwitchError, ManagerConfig, MemoryEnvironment};
use std::fs;
use tempfile::TempDir;

fn manager(tmp: &TempDir) -> GoSwitch {
    let config = ManagerConfig::with_root(tmp.path().join("sdk")).unwrap();
    GoSwitch::with_store(config, Box::new(MemoryEnvironment::default()))
}

#[test]
fn absolute_path_outside_root_is_never_deleted() {
    let tmp = TempDir::new().unwrap();
    let manager = manager(&tmp);
    let system_go = tmp.path().join("Program Files").join("Go");
    fs::create_dir_all(system_go.join("bin")).unwrap();
    fs::write(system_go.join("VERSION"), "go1.21.0\n").unwrap();

    let err = manager.uninstall(&system_go.to_string_lossy()).unwrap_err();

    assert!(matches!(err, GoSwitchError::OutsideManagedRoot { .. }));
    assert!(system_go.join("VERSION").exists());
}

#[test]
fn managed_root_itself_cannot_be_removed() {
    let tmp = TempDir::new().unwrap();
    let manager = manager(&tmp);
    let sdk_root = manager.config().sdk_root.clone();
    fs::create_dir_all(sdk_root.join("go1.22.0")).unwrap();

    assert!(manager.uninstall(&sdk_root.to_string_lossy()).is_err());
    assert!(manager.uninstall("").is_err());
    assert!(sdk_root.join("go1.22.0").exists());
}

#[test]
fn absolute_path_inside_root_is_allowed() {
    let tmp = TempDir::new().unwrap();
    let manager = manager(&tmp);
    let version_dir = manager.config().sdk_root.join("go1.20.0");
    fs::create_dir_all(version_dir.join("go").join("bin")).unwrap();

    manager.uninstall(&version_dir.to_string_lossy()).unwrap();
    assert!(!version_dir.exists());
}
