use std::{fmt, path::Path};

use smol_str::SmolStr;

use crate::LoaderError;

mod loader_options;
pub use loader_options::*;

/// Source language of the resource being processed. Picks both the import
/// statement patterns and the resolution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
  Js,
  Sass,
}

impl Lang {
  pub fn from_ext(ext: &str) -> Result<Self, LoaderError> {
    match ext {
      "js" | "mjs" | "cjs" | "jsx" => Ok(Lang::Js),
      "scss" | "sass" => Ok(Lang::Sass),
      _ => Err(LoaderError::UnsupportedLang(ext.to_owned())),
    }
  }

  pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoaderError> {
    let ext = path.as_ref().extension().and_then(|ext| ext.to_str());
    Self::from_ext(ext.unwrap_or_default())
  }
}

impl fmt::Display for Lang {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Lang::Js => f.write_str("js"),
      Lang::Sass => f.write_str("sass"),
    }
  }
}

/// Which configured list a plugin notation pulls from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportRequest {
  Plugins,
  Framework,
  ResetCss,
}

impl ImportRequest {
  pub fn from_notation(request: &str) -> Option<Self> {
    match request {
      "plugins" => Some(ImportRequest::Plugins),
      "framework" => Some(ImportRequest::Framework),
      "resetCSS" => Some(ImportRequest::ResetCss),
      _ => None,
    }
  }
}

/// `sergeant-plugins/core` -> `{ request: Plugins, ty: Some("core") }`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginImportType {
  pub request: ImportRequest,
  pub ty: Option<SmolStr>,
}

/// A raw import statement as written in the source, e.g.
/// `require('sergeant-plugins-core');` with the path `sergeant-plugins-core`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImport {
  pub raw: String,
  pub path: String,
}

impl RawImport {
  pub fn new(raw: impl Into<String>, path: impl Into<String>) -> Self {
    Self {
      raw: raw.into(),
      path: path.into(),
    }
  }
}

/// A raw statement and the text that takes its place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReplacement {
  pub raw: String,
  pub replacement: String,
}

/// What a stylesheet importer hands back to the stylesheet compiler.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImporterResult {
  pub file: String,
}
