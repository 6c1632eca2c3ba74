use std::{path::Path, sync::Arc};

use log::{debug, warn};
use rayon::prelude::*;

use crate::{
  scanner,
  utils::nodejs::to_import_path,
  ImportReplacement, ImportRequest, Lang, LoaderError, LoaderOptions, NodeResolver,
  PluginImportType, PluginResolver, RawImport, Resolve,
};

/// Rewrites plugin notation imports of one resource into one import per
/// installed plugin file.
pub struct SergeantPluginLoader<R = NodeResolver> {
  options: Arc<LoaderOptions>,
  resolver: PluginResolver<R>,
  lang: Lang,
}

impl<R: Resolve> SergeantPluginLoader<R> {
  pub fn new(options: impl Into<Arc<LoaderOptions>>, resolver: R, lang: Lang) -> Self {
    let options = options.into();
    Self {
      resolver: PluginResolver::new(options.context.clone(), resolver),
      options,
      lang,
    }
  }

  /// Picks the language from the extension of `resource_path`.
  pub fn for_resource(
    options: impl Into<Arc<LoaderOptions>>,
    resolver: R,
    resource_path: impl AsRef<Path>,
  ) -> Result<Self, LoaderError> {
    let lang = Lang::from_path(resource_path)?;
    Ok(Self::new(options, resolver, lang))
  }

  #[inline]
  pub fn lang(&self) -> Lang {
    self.lang
  }

  #[inline]
  pub fn options(&self) -> &LoaderOptions {
    &self.options
  }

  pub fn collect_import_statements(&self, content: &str) -> Vec<RawImport> {
    scanner::collect_import_statements(content, self.lang)
  }

  /// The request each configured entry is resolved with, in config order.
  pub fn request_paths(&self, import_type: &PluginImportType) -> Vec<String> {
    let ty = import_type.ty.as_deref();
    self
      .options
      .sources(import_type.request)
      .iter()
      .map(|base| {
        // Joined as strings: path joining would turn `./plugin` into `plugin`
        // and break relative plugin paths.
        let base = base.trim_end_matches('/');
        match (import_type.request, ty) {
          (ImportRequest::ResetCss, _) => base.to_owned(),
          (ImportRequest::Framework, Some(ty)) => format!("sergeant/framework/{}/{}", base, ty),
          (ImportRequest::Framework, None) => format!("sergeant/framework/{}", base),
          (ImportRequest::Plugins, Some(ty)) => format!("{}/{}", base, ty),
          (ImportRequest::Plugins, None) => base.to_owned(),
        }
      })
      .collect()
  }

  /// Resolves every configured entry for `import_type` and keeps the ones
  /// that exist on disk.
  pub fn collect_files(&self, import_type: &PluginImportType) -> Result<Vec<String>, LoaderError> {
    let resolved = self
      .request_paths(import_type)
      .par_iter()
      .map(|request| -> Result<Option<String>, LoaderError> {
        match self.resolver.resolve(request, self.lang) {
          Some(file) if file.try_exists()? => Ok(Some(to_import_path(&file))),
          Some(file) => {
            debug!("resolved {} does not exist", file.display());
            Ok(None)
          }
          None => Ok(None),
        }
      })
      .collect::<Result<Vec<_>, LoaderError>>()?;

    Ok(resolved.into_iter().flatten().collect())
  }

  /// Duplicates `raw_import` once per resolved path, so the output keeps
  /// whatever statement syntax the source used.
  pub fn generate_plugin_import_statements(
    raw_import: &RawImport,
    resolved_paths: &[String],
  ) -> ImportReplacement {
    let replacement = resolved_paths
      .iter()
      .map(|resolved| raw_import.raw.replacen(&raw_import.path, resolved, 1))
      .collect::<Vec<_>>()
      .join("\n");

    ImportReplacement {
      raw: raw_import.raw.clone(),
      replacement,
    }
  }

  pub fn replace_imports(
    &self,
    content: &str,
    plugin_imports: &[RawImport],
  ) -> Result<String, LoaderError> {
    let replacements = plugin_imports
      .iter()
      .filter_map(|raw_import| {
        scanner::get_plugin_import_type(&raw_import.path).map(|import_type| (raw_import, import_type))
      })
      .map(|(raw_import, import_type)| -> Result<ImportReplacement, LoaderError> {
        let files = self.collect_files(&import_type)?;
        if files.is_empty() {
          warn!("no plugin files found for `{}`", raw_import.path);
        }
        Ok(Self::generate_plugin_import_statements(raw_import, &files))
      })
      .collect::<Result<Vec<_>, LoaderError>>()?;

    let content = replacements
      .iter()
      .fold(content.to_owned(), |content, replacement| {
        debug!("replacing `{}` with {:?}", replacement.raw, replacement.replacement);
        content.replacen(&replacement.raw, &replacement.replacement, 1)
      });

    Ok(content)
  }

  /// The loader entry point: returns `content` untouched unless it contains
  /// plugin notation imports.
  pub fn load(&self, content: &str) -> Result<String, LoaderError> {
    let imports = self.collect_import_statements(content);
    let plugin_imports = scanner::filter_plugin_import_statements(imports);

    if plugin_imports.is_empty() {
      Ok(content.to_owned())
    } else {
      self.replace_imports(content, &plugin_imports)
    }
  }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;

  type OfflineResolver = fn(&Path, &str) -> Result<PathBuf, LoaderError>;

  fn unreachable_resolver(_: &Path, request: &str) -> Result<PathBuf, LoaderError> {
    Err(LoaderError::Unresolved {
      request: request.to_owned(),
      context: "/project".to_owned(),
      reason: "offline".to_owned(),
    })
  }

  fn loader(lang: Lang) -> SergeantPluginLoader<OfflineResolver> {
    let options = LoaderOptions {
      context: PathBuf::from("/project"),
      framework: vec!["grid".to_owned()],
      plugins: vec!["./plugins/a/".to_owned(), "plugin-b".to_owned()],
      reset_css: vec!["reset-css/sass/reset".to_owned()],
    };
    SergeantPluginLoader::new(options, unreachable_resolver as OfflineResolver, lang)
  }

  #[test]
  fn request_paths_per_kind() {
    let loader = loader(Lang::Js);
    let plugins = PluginImportType {
      request: ImportRequest::Plugins,
      ty: Some("core".into()),
    };
    assert_eq!(loader.request_paths(&plugins), vec!["./plugins/a/core", "plugin-b/core"]);

    let framework = PluginImportType {
      request: ImportRequest::Framework,
      ty: Some("footprint".into()),
    };
    assert_eq!(
      loader.request_paths(&framework),
      vec!["sergeant/framework/grid/footprint"]
    );

    let reset = PluginImportType {
      request: ImportRequest::ResetCss,
      ty: None,
    };
    assert_eq!(loader.request_paths(&reset), vec!["reset-css/sass/reset"]);
  }

  #[test]
  fn statements_keep_original_syntax() {
    let raw = RawImport::new(r#"require("sergeant-plugins-core");"#, "sergeant-plugins-core");
    let replacement = SergeantPluginLoader::<NodeResolver>::generate_plugin_import_statements(
      &raw,
      &["/p/a/core.js".to_owned(), "/p/b/core.js".to_owned()],
    );
    assert_eq!(
      replacement.replacement,
      "require(\"/p/a/core.js\");\nrequire(\"/p/b/core.js\");"
    );
    assert_eq!(replacement.raw, raw.raw);
  }

  #[test]
  fn unresolved_notation_is_removed() {
    let loader = loader(Lang::Js);
    let out = loader
      .load("import './app';\nimport 'sergeant-plugins-core';\nconsole.log(1);\n")
      .unwrap();
    assert_eq!(out, "import './app';\n\nconsole.log(1);\n");
  }

  #[test]
  fn duplicated_statements_and_dollar_paths() {
    let dir = std::env::temp_dir().join("sergeant-loader-literal").join("p$1");
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("core.js");
    std::fs::write(&file, "").unwrap();

    let options = LoaderOptions {
      context: PathBuf::from("/project"),
      plugins: vec!["p$1".to_owned()],
      ..LoaderOptions::default()
    };
    let resolved = file.clone();
    let resolver = move |_: &Path, request: &str| -> Result<PathBuf, LoaderError> {
      assert_eq!(request, "p$1/core");
      Ok(resolved.clone())
    };
    let loader = SergeantPluginLoader::new(options, resolver, Lang::Js);

    let out = loader
      .load("import 'sergeant-plugins-core';\nx\nimport 'sergeant-plugins-core';\n")
      .unwrap();
    let file = to_import_path(&file);
    assert!(file.contains("p$1"));
    assert_eq!(out, format!("import '{0}';\nx\nimport '{0}';\n", file));
  }

  #[test]
  fn content_without_notation_is_untouched() {
    let loader = loader(Lang::Sass);
    let content = "@import 'variables';\nbody { margin: 0; }\n";
    assert_eq!(loader.load(content).unwrap(), content);
  }
}
