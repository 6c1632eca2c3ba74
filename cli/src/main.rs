use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{debug, info};
use sergeant_plugin_loader::{scanner, Lang, LoaderOptions, NodeResolver, SergeantPluginLoader};

#[derive(Debug, Parser)]
#[command(
  name = "sergeant-plugins",
  version,
  about = "Splice installed sergeant plugin files into script and stylesheet imports"
)]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Args)]
struct ConfigArgs {
  /// Project config, `<context>/sergeant.json` when present
  #[arg(long)]
  config: Option<PathBuf>,
  /// Directory relative plugin paths are resolved from
  #[arg(long)]
  context: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Rewrite plugin notation imports of the given files
  Rewrite {
    #[command(flatten)]
    config: ConfigArgs,
    /// Write the result back instead of printing it
    #[arg(long)]
    write: bool,
    #[arg(required = true)]
    files: Vec<PathBuf>,
  },
  /// Print the files a plugin notation resolves to
  Resolve {
    #[command(flatten)]
    config: ConfigArgs,
    #[arg(long, value_enum, default_value = "js")]
    lang: LangArg,
    /// e.g. `sergeant-plugins/core`
    notation: String,
  },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LangArg {
  Js,
  Sass,
}

impl From<LangArg> for Lang {
  fn from(lang: LangArg) -> Self {
    match lang {
      LangArg::Js => Lang::Js,
      LangArg::Sass => Lang::Sass,
    }
  }
}

impl ConfigArgs {
  fn load(&self) -> Result<LoaderOptions> {
    let cwd = std::env::current_dir().context("reading the working directory")?;
    let context = match &self.context {
      Some(context) => cwd.join(context),
      None => cwd,
    };
    let config = self.config.clone().or_else(|| {
      let default = context.join("sergeant.json");
      default.is_file().then_some(default)
    });

    match config {
      Some(path) => {
        debug!("loading config {}", path.display());
        LoaderOptions::from_file(&path, context)
          .with_context(|| format!("loading config {}", path.display()))
      }
      None => Ok(LoaderOptions {
        context,
        ..LoaderOptions::default()
      }),
    }
  }
}

fn rewrite(options: LoaderOptions, write: bool, files: &[PathBuf]) -> Result<()> {
  let options = Arc::new(options);

  for file in files {
    let loader = SergeantPluginLoader::for_resource(options.clone(), NodeResolver, file)
      .with_context(|| format!("rewriting {}", file.display()))?;
    let content =
      fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let output = loader
      .load(&content)
      .with_context(|| format!("rewriting {}", file.display()))?;

    if !write {
      print!("{}", output);
    } else if output != content {
      fs::write(file, &output).with_context(|| format!("writing {}", file.display()))?;
      info!("rewrote {}", file.display());
    }
  }

  Ok(())
}

fn resolve(options: LoaderOptions, lang: Lang, notation: &str) -> Result<()> {
  let import_type = scanner::get_plugin_import_type(notation)
    .with_context(|| format!("`{}` is not a sergeant plugin notation", notation))?;
  let loader = SergeantPluginLoader::new(options, NodeResolver, lang);

  for file in loader.collect_files(&import_type)? {
    println!("{}", file);
  }

  Ok(())
}

fn main() -> Result<()> {
  env_logger::init();

  match Cli::parse().command {
    Command::Rewrite {
      config,
      write,
      files,
    } => rewrite(config.load()?, write, &files),
    Command::Resolve {
      config,
      lang,
      notation,
    } => resolve(config.load()?, lang.into(), &notation),
  }
}
