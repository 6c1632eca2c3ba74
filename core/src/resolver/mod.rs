use std::path::{Path, PathBuf};

use log::debug;

use crate::{
  utils::nodejs::{self, is_module_path, to_import_path},
  Lang, LoaderError,
};

mod sass;
pub use sass::import_candidates;

/// The bundler's module resolution: turns a request into a file path, looking
/// it up from `context`.
pub trait Resolve: Send + Sync {
  fn resolve(&self, context: &Path, request: &str) -> Result<PathBuf, LoaderError>;
}

impl<F> Resolve for F
where
  F: Fn(&Path, &str) -> Result<PathBuf, LoaderError> + Send + Sync,
{
  #[inline]
  fn resolve(&self, context: &Path, request: &str) -> Result<PathBuf, LoaderError> {
    self(context, request)
  }
}

/// Node's module resolution algorithm: relative and absolute files,
/// directory `index`/`main`, and `node_modules` lookup for bare requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeResolver;

impl Resolve for NodeResolver {
  fn resolve(&self, context: &Path, request: &str) -> Result<PathBuf, LoaderError> {
    // Relative requests are anchored here so the result carries no `./`.
    let target = if request.starts_with('.') {
      to_import_path(&nodejs::resolve(context, request))
    } else {
      request.to_owned()
    };

    node_resolve::resolve_from(&target, context.to_path_buf())
      .map(|resolved| nodejs::normalize_path(&resolved))
      .map_err(|err| LoaderError::Unresolved {
        request: request.to_owned(),
        context: context.display().to_string(),
        reason: format!("{:?}", err),
      })
  }
}

/// Routes a plugin request to the resolution strategy of its language.
/// Everything is resolved from the project `context`.
#[derive(Debug, Clone)]
pub struct PluginResolver<R> {
  context: PathBuf,
  resolver: R,
}

impl<R: Resolve> PluginResolver<R> {
  pub fn new(context: impl Into<PathBuf>, resolver: R) -> Self {
    Self {
      context: context.into(),
      resolver,
    }
  }

  pub fn context(&self) -> &Path {
    &self.context
  }

  #[inline]
  pub fn resolve(&self, request: &str, lang: Lang) -> Option<PathBuf> {
    match lang {
      Lang::Sass => self.resolve_sass(request),
      Lang::Js => self.resolve_general(request),
    }
  }

  /// A failed resolution is "not found", never an error: one missing plugin
  /// file must not fail the other plugins of the same import.
  pub fn resolve_general(&self, request: &str) -> Option<PathBuf> {
    match self.resolver.resolve(&self.context, request) {
      Ok(resolved) => {
        debug!("resolved {} to {}", request, resolved.display());
        Some(resolved)
      }
      Err(err) => {
        debug!("skipping {}: {}", request, err);
        None
      }
    }
  }

  pub fn resolve_sass(&self, request: &str) -> Option<PathBuf> {
    let url = if request.starts_with('.') {
      to_import_path(&nodejs::resolve(&self.context, request))
    } else if is_module_path(request) && !request.starts_with('~') {
      format!("~{}", request)
    } else {
      request.to_owned()
    };

    let found = import_candidates(&url)
      .iter()
      .find_map(|candidate| self.resolver.resolve(&self.context, candidate).ok());

    match found {
      // The stylesheet resolver may hand back a path without checking it,
      // so it goes through the general resolver once more.
      Some(file) => self.resolve_general(&to_import_path(&file)),
      None => {
        debug!("no stylesheet candidate for {}", url);
        None
      }
    }
  }
}

#[cfg(test)]
#[cfg(not(target_os = "windows"))]
mod tests {
  use std::{collections::HashSet, sync::Mutex};

  use super::*;

  fn known_files(files: &'static [&'static str]) -> impl Resolve {
    move |context: &Path, request: &str| {
      let path = nodejs::resolve(context, request.strip_prefix('~').unwrap_or(request));
      if files.iter().any(|file| Path::new(file) == path) {
        Ok(path)
      } else {
        Err(LoaderError::Unresolved {
          request: request.to_owned(),
          context: context.display().to_string(),
          reason: "missing".to_owned(),
        })
      }
    }
  }

  #[test]
  fn general_swallows_errors() {
    let resolver = PluginResolver::new("/project", known_files(&["/project/a/core.js"]));
    assert_eq!(
      resolver.resolve("./a/core.js", Lang::Js),
      Some(PathBuf::from("/project/a/core.js"))
    );
    assert_eq!(resolver.resolve("./b/core.js", Lang::Js), None);
  }

  #[test]
  fn sass_prefers_partial() {
    let resolver = PluginResolver::new(
      "/project",
      known_files(&["/project/a/_core.scss", "/project/a/core.scss"]),
    );
    assert_eq!(
      resolver.resolve("./a/core", Lang::Sass),
      Some(PathBuf::from("/project/a/_core.scss"))
    );
  }

  #[test]
  fn sass_never_falls_back_to_script() {
    let resolver = PluginResolver::new("/project", known_files(&["/project/a/core"]));
    assert_eq!(resolver.resolve("./a/core", Lang::Sass), None);
  }

  #[test]
  fn sass_module_requests_are_prefixed() {
    let seen = Mutex::new(HashSet::new());
    let record = |_: &Path, request: &str| -> Result<PathBuf, LoaderError> {
      seen.lock().unwrap().insert(request.to_owned());
      Err(LoaderError::UnsupportedLang("test".to_owned()))
    };
    let resolver = PluginResolver::new("/project", record);
    assert_eq!(resolver.resolve("plugin-b/core", Lang::Sass), None);

    let seen = seen.lock().unwrap();
    assert!(seen.contains("plugin-b/_core.scss"));
    assert!(seen.contains("plugin-b/core.css"));
    assert!(!seen.contains("plugin-b/core"));
  }

  #[test]
  fn sass_keeps_existing_module_prefix() {
    let seen = Mutex::new(HashSet::new());
    let record = |_: &Path, request: &str| -> Result<PathBuf, LoaderError> {
      seen.lock().unwrap().insert(request.to_owned());
      Err(LoaderError::UnsupportedLang("test".to_owned()))
    };
    let resolver = PluginResolver::new("/project", record);
    assert_eq!(resolver.resolve("~plugin-b/core", Lang::Sass), None);

    let seen = seen.lock().unwrap();
    assert!(seen.contains("plugin-b/_core.scss"));
    assert!(seen.iter().all(|request| !request.starts_with('~')));
  }
}
