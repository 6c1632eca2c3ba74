use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{ImportRequest, Lang, PluginImportType, RawImport};

// `require('...')`, `import '...'` and `@import '...'`, with either quote
// and an optional trailing `;`. Group 1 is the imported path.
static JS_STATEMENTS: Lazy<Vec<Regex>> = Lazy::new(|| {
  vec![
    Regex::new(r#"require\s?\(['"](.*)['"]\);?"#).unwrap(),
    Regex::new(r#"import\s?['"](.*)['"];?"#).unwrap(),
  ]
});

static SASS_STATEMENTS: Lazy<Vec<Regex>> =
  Lazy::new(|| vec![Regex::new(r#"@import\s?['"](.*)['"];?"#).unwrap()]);

// Block comments, and line comments not preceded by `\` or `:` (so urls like
// `http://` survive). Group 1 keeps the character eaten before `//`.
static COMMENTS: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"(?m)/\*[\s\S]*?\*/|([^\\:]|^)//.*$").unwrap());

static PLUGIN_NOTATION: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"sergeant-(resetCSS|framework|plugins)(?:[/-](.*))?").unwrap());

#[inline]
fn statement_patterns(lang: Lang) -> &'static [Regex] {
  match lang {
    Lang::Js => JS_STATEMENTS.as_slice(),
    Lang::Sass => SASS_STATEMENTS.as_slice(),
  }
}

pub fn remove_comments(content: &str) -> Cow<'_, str> {
  COMMENTS.replace_all(content, "${1}")
}

/// Extracts every import statement that is not commented out, grouped by
/// statement kind and in source order within each kind.
pub fn collect_import_statements(content: &str, lang: Lang) -> Vec<RawImport> {
  let uncommented = remove_comments(content);

  statement_patterns(lang)
    .iter()
    .flat_map(|pattern| {
      pattern
        .captures_iter(&uncommented)
        .map(|captures| RawImport::new(&captures[0], &captures[1]))
        .collect::<Vec<_>>()
    })
    .collect()
}

/// `Some` if `path` is written in plugin notation, e.g. `sergeant-plugins-core`,
/// `sergeant-plugins/core` or `sergeant-resetCSS`.
pub fn get_plugin_import_type(path: &str) -> Option<PluginImportType> {
  let captures = PLUGIN_NOTATION.captures(path)?;
  let request = ImportRequest::from_notation(captures.get(1)?.as_str())?;
  let ty = captures
    .get(2)
    .map(|ty| ty.as_str())
    .filter(|ty| !ty.is_empty())
    .map(Into::into);

  Some(PluginImportType { request, ty })
}

pub fn filter_plugin_import_statements(imports: Vec<RawImport>) -> Vec<RawImport> {
  imports
    .into_iter()
    .filter(|import| get_plugin_import_type(&import.path).is_some())
    .collect()
}
