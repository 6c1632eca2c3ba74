use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{utils::nodejs::current_dir, ImportRequest, LoaderError};

/// A config value that may be written as a single string or a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
  One(String),
  Many(Vec<String>),
}

impl OneOrMany {
  pub fn into_vec(self) -> Vec<String> {
    match self {
      OneOrMany::One(path) => vec![path],
      OneOrMany::Many(paths) => paths,
    }
  }
}

#[inline]
fn paths(value: Option<OneOrMany>) -> Vec<String> {
  value.map(OneOrMany::into_vec).unwrap_or_default()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SassConfig {
  #[serde(default, rename = "resetCSS")]
  pub reset_css: Option<OneOrMany>,
}

/// The project config as written in `sergeant.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SergeantConfig {
  #[serde(default)]
  pub framework: Option<OneOrMany>,
  #[serde(default)]
  pub plugins: Option<OneOrMany>,
  #[serde(default)]
  pub sass: Option<SassConfig>,
}

#[derive(Debug, Clone)]
pub struct LoaderOptions {
  // Plugin paths are configured relative to the project root, not to the
  // directory of the file being processed.
  pub context: PathBuf,
  pub framework: Vec<String>,
  pub plugins: Vec<String>,
  pub reset_css: Vec<String>,
}

impl Default for LoaderOptions {
  fn default() -> Self {
    Self {
      context: current_dir(),
      framework: vec![],
      plugins: vec![],
      reset_css: vec![],
    }
  }
}

impl LoaderOptions {
  pub fn from_config(config: SergeantConfig, context: impl Into<PathBuf>) -> Self {
    Self {
      context: context.into(),
      framework: paths(config.framework),
      plugins: paths(config.plugins),
      reset_css: paths(config.sass.and_then(|sass| sass.reset_css)),
    }
  }

  pub fn from_json_str(json: &str, context: impl Into<PathBuf>) -> Result<Self, LoaderError> {
    let config: SergeantConfig = serde_json::from_str(json)?;
    Ok(Self::from_config(config, context))
  }

  pub fn from_file(path: impl AsRef<Path>, context: impl Into<PathBuf>) -> Result<Self, LoaderError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| LoaderError::ReadFileFailed {
      filename: path.display().to_string(),
      source,
    })?;
    Self::from_json_str(&json, context)
  }

  #[inline]
  pub fn sources(&self, request: ImportRequest) -> &[String] {
    match request {
      ImportRequest::Plugins => &self.plugins,
      ImportRequest::Framework => &self.framework,
      ImportRequest::ResetCss => &self.reset_css,
    }
  }
}
