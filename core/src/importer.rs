use std::sync::Arc;

use crate::{
  scanner, utils::nodejs::to_import_path, ImporterResult, Lang, LoaderError, LoaderOptions,
  NodeResolver, PluginResolver, Resolve, SergeantPluginLoader,
};

/// Stylesheet importer for plugin notation urls. Called by the stylesheet
/// compiler with one `@import` url at a time.
pub struct SassPluginImporter<R = NodeResolver> {
  loader: SergeantPluginLoader<R>,
}

impl<R: Resolve> SassPluginImporter<R> {
  pub fn new(options: impl Into<Arc<LoaderOptions>>, resolver: R) -> Self {
    Self {
      loader: SergeantPluginLoader::new(options, resolver, Lang::Sass),
    }
  }

  /// `None` hands `url` back to the other importers. Answering with the url
  /// itself would stop the compiler from asking them.
  pub fn import(&self, url: &str) -> Result<Option<Vec<ImporterResult>>, LoaderError> {
    match scanner::get_plugin_import_type(url) {
      Some(import_type) => {
        let files = self.loader.collect_files(&import_type)?;
        Ok(Some(
          files.into_iter().map(|file| ImporterResult { file }).collect(),
        ))
      }
      None => Ok(None),
    }
  }
}

/// Resolves any stylesheet url (`~module` included) through the bundler's
/// module resolution.
pub struct SassModuleImporter<R = NodeResolver> {
  resolver: PluginResolver<R>,
}

impl<R: Resolve> SassModuleImporter<R> {
  pub fn new(options: &LoaderOptions, resolver: R) -> Self {
    Self {
      resolver: PluginResolver::new(options.context.clone(), resolver),
    }
  }

  pub fn import(&self, url: &str) -> Option<ImporterResult> {
    self
      .resolver
      .resolve_sass(url)
      .map(|file| ImporterResult {
        file: to_import_path(&file),
      })
  }
}
