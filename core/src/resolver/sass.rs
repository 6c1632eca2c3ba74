use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

// `~pkg` or `~@scope/pkg`, i.e. a whole package and nothing below it.
static MODULE_IMPORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^~([^/]+|@[^/]+/[^/]+)$").unwrap());

/// Requests to try, in order, for a stylesheet `@import` url. Follows the
/// stylesheet import algorithm: partials (`_name`) first, then the plain
/// name, each with `.scss`, `.sass` and `.css`.
///
/// A leading `~` marks a module request and is stripped from the candidates.
/// Extensionless urls are never offered as-is, so a stylesheet cannot pick
/// up a same-named script through the resolver's default extensions.
pub fn import_candidates(url: &str) -> Vec<String> {
  let request = url.strip_prefix('~').unwrap_or(url);

  if MODULE_IMPORT.is_match(url) {
    return vec![request.to_owned(), url.to_owned()];
  }

  match Path::new(request).extension().and_then(|ext| ext.to_str()) {
    Some("scss") | Some("sass") => return vec![request.to_owned(), url.to_owned()],
    Some("css") => return vec![],
    _ => {}
  }

  let (dirname, basename) = request.rsplit_once('/').unwrap_or((".", request));
  let exts = ["scss", "sass", "css"];

  if basename.starts_with('_') {
    exts
      .iter()
      .map(|ext| format!("{}.{}", request, ext))
      .collect()
  } else {
    exts
      .iter()
      .map(|ext| format!("{}/_{}.{}", dirname, basename, ext))
      .chain(exts.iter().map(|ext| format!("{}.{}", request, ext)))
      .collect()
  }
}
