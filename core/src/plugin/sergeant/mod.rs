use std::sync::Arc;

use crate::{
  plugin_driver::{ImportResult, Plugin, TransformResult},
  Lang, LoaderOptions, NodeResolver, Resolve, SassPluginImporter, SergeantPluginLoader,
};

pub struct SergeantPlugin<R = NodeResolver> {
  options: Arc<LoaderOptions>,
  resolver: R,
}

/// # Example
/// ```no_run
/// use sergeant_plugin_loader::{plugin::sergeant, LoaderOptions, PluginDriver};
///
/// let mut driver = PluginDriver::new();
/// driver.add_plugin(sergeant::new(LoaderOptions::default()));
/// ```
pub fn new(options: LoaderOptions) -> SergeantPlugin {
  SergeantPlugin::with_resolver(options, NodeResolver)
}

impl<R> SergeantPlugin<R> {
  pub fn with_resolver(options: impl Into<Arc<LoaderOptions>>, resolver: R) -> Self {
    Self {
      options: options.into(),
      resolver,
    }
  }
}

impl<R: Resolve + Clone> Plugin for SergeantPlugin<R> {
  fn get_name(&self) -> &'static str {
    "sergeant-plugins"
  }

  fn transform(&self, code: &str, id: &str) -> TransformResult {
    // Only scripts and stylesheets carry plugin notation.
    let lang = match Lang::from_path(id) {
      Ok(lang) => lang,
      Err(_) => return Ok(None),
    };
    let loader = SergeantPluginLoader::new(self.options.clone(), self.resolver.clone(), lang);
    let transformed = loader.load(code)?;

    if transformed == code {
      Ok(None)
    } else {
      Ok(Some(transformed))
    }
  }

  fn import(&self, url: &str, lang: Lang) -> ImportResult {
    if lang != Lang::Sass {
      return Ok(None);
    }
    SassPluginImporter::new(self.options.clone(), self.resolver.clone()).import(url)
  }
}
