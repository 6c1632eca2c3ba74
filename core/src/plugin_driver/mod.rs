use log::debug;

use crate::{ImporterResult, Lang, LoaderError};

pub type TransformResult = Result<Option<String>, LoaderError>;
pub type ImportResult = Result<Option<Vec<ImporterResult>>, LoaderError>;

#[derive(Default)]
pub struct PluginDriver {
  pub plugins: Vec<Box<dyn Plugin>>,
}

impl PluginDriver {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_plugins(plugins: Vec<Box<dyn Plugin>>) -> Self {
    Self { plugins }
  }

  pub fn add_plugin(&mut self, plugin: impl Plugin + 'static) -> &mut Self {
    self.plugins.push(Box::new(plugin));
    self
  }
}

// Align to https://rollupjs.org/guide/en/#build-hooks

impl PluginDriver {
  /// sequential: each plugin sees the output of the previous one
  pub fn transform(&self, code: String, id: &str) -> Result<String, LoaderError> {
    self.plugins.iter().try_fold(code, |code, plugin| {
      Ok(match plugin.transform(&code, id)? {
        Some(transformed) => {
          debug!("{} transformed {}", plugin.get_name(), id);
          transformed
        }
        None => code,
      })
    })
  }

  /// first: the first plugin answering `Some` wins
  pub fn import(&self, url: &str, lang: Lang) -> ImportResult {
    for plugin in self.plugins.iter() {
      if let Some(files) = plugin.import(url, lang)? {
        debug!("{} imported {}", plugin.get_name(), url);
        return Ok(Some(files));
      }
    }
    Ok(None)
  }
}

pub trait Plugin: Send + Sync {
  fn get_name(&self) -> &'static str;

  #[inline]
  fn transform(&self, _code: &str, _id: &str) -> TransformResult {
    Ok(None)
  }

  /// Stylesheet `@import` hook.
  #[inline]
  fn import(&self, _url: &str, _lang: Lang) -> ImportResult {
    Ok(None)
  }
}
