#![allow(clippy::unwrap_used)]

use super::*;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_no_args_starts_tui_in_memory() {
    let cfg = Config::from_args(&args(&["yojitsu"])).unwrap();
    assert_eq!(cfg.db_path, None);
    assert!(!cfg.is_cli());
}

#[test]
fn test_db_flag_is_removed_from_args() {
    let cfg = Config::from_args(&args(&["yojitsu", "--db", "/tmp/l.db", "summary"])).unwrap();
    assert_eq!(cfg.db_path, Some(PathBuf::from("/tmp/l.db")));
    assert_eq!(cfg.args, args(&["yojitsu", "summary"]));
    assert!(cfg.is_cli());
}

#[test]
fn test_db_flag_after_command() {
    let cfg = Config::from_args(&args(&["yojitsu", "monthly", "--db=/tmp/x.db"])).unwrap();
    assert_eq!(cfg.db_path, Some(PathBuf::from("/tmp/x.db")));
    assert_eq!(cfg.args, args(&["yojitsu", "monthly"]));
}

#[test]
fn test_db_flag_alone_keeps_tui() {
    let cfg = Config::from_args(&args(&["yojitsu", "--db", "ledger.db"])).unwrap();
    assert!(!cfg.is_cli());
}

#[test]
fn test_db_flag_without_value_is_error() {
    assert!(Config::from_args(&args(&["yojitsu", "--db"])).is_err());
}
