mod config;
mod export;
mod ocr;
mod openai;

use anyhow::{bail, Context, Result};
use clap::Parser;
use config::Cli;
use ocr::TesseractExtractor;
use openai::OpenAiReviser;
use proofmark_core::{extract_input, Policy, ProofreadError, Proofreader, RevisionResult};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                if cli.verbose {
                    "proofmark=debug,proofmark_core=debug".into()
                } else {
                    "proofmark=info,proofmark_core=info".into()
                }
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let policy = Policy::from_kind(cli.policy);
    eprintln!("{} · {}", policy.action_label, policy.hint);

    let text = resolve_input(&cli).await?;
    let proofreader = Proofreader::new(cli.align_config());

    let result = match &cli.revised {
        Some(path) => {
            let revised = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read revision from {}", path.display()))?;
            proofreader.review(&text, &revised, &policy)
        }
        None => {
            let reviser = OpenAiReviser::new(&cli.generation)
                .context("failed to build generation client")?;
            match proofreader.proofread(&reviser, &policy, &text).await {
                Ok(result) => result,
                Err(err) => {
                    if err.is_recoverable() {
                        eprintln!("{}", recovery_hint(&err));
                    }
                    return Err(anyhow::Error::new(err).context("proofreading failed"));
                }
            }
        }
    };

    write_outputs(&cli, &result)?;
    Ok(())
}

/// Pick the text to proofread: a recognized image wins, then --text, then --input.
async fn resolve_input(cli: &Cli) -> Result<String> {
    if let Some(image_path) = &cli.image {
        match recognize_image(cli, image_path).await {
            Ok(text) => return Ok(text),
            Err(err) => warn!(
                error = %format!("{err:#}"),
                "image recognition failed, falling back to text input"
            ),
        }
    }

    if let Some(text) = &cli.text {
        return Ok(text.clone());
    }

    match &cli.input {
        Some(path) if path.as_os_str() == "-" => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read text from stdin")?;
            Ok(text)
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read text from {}", path.display())),
        None => bail!("no input: pass --text, --input or --image"),
    }
}

async fn recognize_image(cli: &Cli, image_path: &Path) -> Result<String> {
    let image = tokio::fs::read(image_path)
        .await
        .with_context(|| format!("failed to read image {}", image_path.display()))?;
    let extractor = TesseractExtractor::new(&cli.ocr);
    let text = extract_input(&extractor, &image, &cli.ocr.language_hints()).await?;
    info!(chars = text.chars().count(), "recognized text from image");
    Ok(text)
}

/// What the user can do about a failed run
fn recovery_hint(err: &ProofreadError) -> &'static str {
    match err {
        ProofreadError::EmptyInput => "请输入需要校对的文本 (--text, --input or --image)",
        ProofreadError::GenerationFailure { .. } => {
            "生成服务调用失败，请检查 --api-base / --api-key 后重试"
        }
        ProofreadError::ExtractionFailure { .. } => "图片识别失败，请改为直接输入文本",
        ProofreadError::UnknownPolicy(_) => "可用模式: flag-only, fix, polish",
    }
}

fn write_outputs(cli: &Cli, result: &RevisionResult) -> Result<()> {
    let mut wrote_file = false;

    if let Some(path) = &cli.html {
        let page = export::html_page(&cli.title, &result.policy, &result.display());
        write_file(path, &page)?;
        wrote_file = true;
    }

    if let Some(path) = &cli.rtf {
        let rtf = export::to_rtf(&cli.title, &result.document());
        write_file(path, &rtf)?;
        wrote_file = true;
    }

    if let Some(path) = &cli.runs_json {
        let json = serde_json::to_string_pretty(&result.document())
            .context("failed to serialize document runs")?;
        write_file(path, &json)?;
        wrote_file = true;
    }

    if !wrote_file {
        println!("{}", result.display());
    }

    eprintln!("{}", result.statistics());
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}
