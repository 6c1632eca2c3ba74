use std::path::{Path, PathBuf};

use sergeant_plugin_loader::{utils::nodejs::to_import_path, LoaderOptions};

pub fn fixture_root() -> PathBuf {
  Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/project")
}

pub fn fixture_options() -> LoaderOptions {
  // RUST_LOG=debug shows how each plugin request resolved
  let _ = env_logger::try_init();
  let root = fixture_root();
  LoaderOptions::from_file(root.join("sergeant.json"), root).unwrap()
}

pub fn read_fixture(path: &str) -> String {
  std::fs::read_to_string(fixture_root().join(path)).unwrap()
}

/// Replaces the machine specific fixture location with `<root>`.
pub fn relativize(output: &str) -> String {
  let root = fixture_root();
  let mut output = output.to_owned();
  if let Ok(canonical) = root.canonicalize() {
    output = output.replace(&to_import_path(&canonical), "<root>");
  }
  output.replace(&to_import_path(&root), "<root>")
}
