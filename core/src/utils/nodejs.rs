use std::{
  env,
  path::{Component, Path, PathBuf},
};

use once_cell::sync::Lazy;

static CURRENT_DIR: Lazy<PathBuf> =
  Lazy::new(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

#[inline]
pub fn current_dir() -> PathBuf {
  CURRENT_DIR.clone()
}

// https://www.reddit.com/r/rust/comments/hkkquy/anyone_knows_how_to_fscanonicalize_but_without/
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
  let mut components = path.components().peekable();
  let mut ret = if let Some(c @ Component::Prefix(..)) = components.peek() {
    let ret = PathBuf::from(c.as_os_str());
    components.next();
    ret
  } else {
    PathBuf::new()
  };
  components.for_each(|component| match component {
    Component::Prefix(..) | Component::CurDir => {}
    Component::RootDir => {
      ret.push(component.as_os_str());
    }
    Component::ParentDir => {
      ret.pop();
    }
    Component::Normal(c) => {
      ret.push(c);
    }
  });
  ret
}

/// Like node's `path.resolve(base, path)`.
#[inline]
pub fn resolve(base: &Path, path: &str) -> PathBuf {
  normalize_path(&base.join(path))
}

/// A request that goes through `node_modules` lookup, i.e. neither relative
/// (`./x`, `../x`) nor absolute.
#[inline]
pub fn is_module_path(path: &str) -> bool {
  !path.starts_with('.') && !nodejs_path::is_absolute(path)
}

/// Windows resolvers hand back `\` separators; import statements want `/`.
#[inline]
pub fn to_import_path(path: &Path) -> String {
  path.to_string_lossy().replace('\\', "/")
}
