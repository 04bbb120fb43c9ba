//! Translate command - convert a Python file into JavaScript.

use anyhow::{Context, anyhow, bail};
use clap::{Args, ValueEnum};
use pyjs_syntax::{Reader, Writer};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Translate command arguments
#[derive(Args)]
pub struct TranslateArgs {
    /// Input source file, use - for stdin
    pub input: PathBuf,

    /// Source language (required when using stdin, auto-detect from extension otherwise)
    #[arg(short, long)]
    pub from: Option<SourceLanguage>,

    /// Target language
    #[arg(short, long, default_value_t = TargetLanguage::Javascript)]
    pub to: TargetLanguage,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the parsed syntax tree as JSON instead of translating
    #[arg(long)]
    pub ast: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SourceLanguage {
    /// Python 3
    Python,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TargetLanguage {
    /// JavaScript (ES2015+)
    Javascript,
}

impl SourceLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceLanguage::Python => "python",
        }
    }
}

impl std::fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TargetLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetLanguage::Javascript => "javascript",
        }
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run the translate command
pub fn run(args: TranslateArgs) -> anyhow::Result<()> {
    let is_stdin = args.input.as_os_str() == "-";
    let content = read_input(&args.input, is_stdin)?;

    let reader = match args.from {
        Some(lang) => lookup_reader(lang.as_str())?,
        None if is_stdin => bail!("--from is required when reading from stdin"),
        None => detect_reader(&args.input)?,
    };
    tracing::info!(
        input = %args.input.display(),
        language = reader.language(),
        "reading source"
    );

    let module = reader.read(&content).with_context(|| {
        format!(
            "failed to parse {} as {}",
            args.input.display(),
            reader.language()
        )
    })?;

    let output = if args.ast {
        serde_json::to_string_pretty(&module).context("failed to serialize syntax tree")?
    } else {
        let writer = lookup_writer(args.to.as_str())?;
        writer.write(&module)
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, format!("{output}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "Translated {} -> {} ({})",
                args.input.display(),
                path.display(),
                args.to
            );
        }
        None => println!("{output}"),
    }

    Ok(())
}

fn read_input(input: &Path, is_stdin: bool) -> anyhow::Result<String> {
    if is_stdin {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))
}

fn detect_reader(input: &Path) -> anyhow::Result<&'static dyn Reader> {
    input
        .extension()
        .and_then(|e| e.to_str())
        .and_then(pyjs_syntax::reader_for_extension)
        .ok_or_else(|| {
            anyhow!("cannot detect language from extension, use --from to specify source language")
        })
}

fn lookup_reader(language: &str) -> anyhow::Result<&'static dyn Reader> {
    pyjs_syntax::reader_for_language(language).ok_or_else(|| {
        let available: Vec<String> = pyjs_syntax::readers()
            .iter()
            .map(|r| format!("{} ({})", r.language(), r.extensions().join(", ")))
            .collect();
        anyhow!(
            "no reader available for language: {language} (available: {})",
            available.join("; ")
        )
    })
}

fn lookup_writer(language: &str) -> anyhow::Result<&'static dyn Writer> {
    pyjs_syntax::writer_for_language(language).ok_or_else(|| {
        let available: Vec<String> = pyjs_syntax::writers()
            .iter()
            .map(|w| format!("{} (.{})", w.language(), w.extension()))
            .collect();
        anyhow!(
            "no writer available for language: {language} (available: {})",
            available.join("; ")
        )
    })
}
