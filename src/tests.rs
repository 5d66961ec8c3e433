use super::{crate_version, readiness_message};

#[test]
fn version_matches_package_metadata() {
  assert_eq!(crate_version(), env!("CARGO_PKG_VERSION"));
}

#[test]
fn readiness_message_names_the_executors() {
  assert!(readiness_message().starts_with("pinflow ready"));
  if cfg!(feature = "std") {
    assert!(readiness_message().contains("thread pool"));
  }
}
