//! Command-line front-end: pick a résumé, send it, render what comes back.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};

use crate::api_client::ResumeService;
use crate::feedback::presentation::{render_report, render_score_card, FeedbackView};
use crate::models::{AdjustedDocument, AnalysisResult, ApiResponse};

const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "txt"];

#[derive(Debug, Parser)]
#[command(name = "curriculo-ai", version, about = "Análise inteligente e ajuste de currículos")]
pub struct Args {
    /// Résumé to upload (.pdf or .txt)
    pub file: PathBuf,

    /// Analyze and also regenerate the résumé as a PDF
    #[arg(long)]
    pub adjust: bool,

    /// Save the analysis as a plain-text report
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Where the adjusted PDF is written
    #[arg(long, value_name = "PATH", default_value = "curriculo_ajustado.pdf")]
    pub output: PathBuf,
}

/// How a run ended. Only `Failed` maps to a non-zero exit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Analyzed,
    DocumentSaved(PathBuf),
    Unexpected,
    Failed,
}

/// Uploads `args.file` through `service` and writes the rendered result to `out`.
pub async fn run<W: Write>(service: &dyn ResumeService, args: &Args, out: &mut W) -> Result<Outcome> {
    let filename = validate_upload(&args.file)?;
    let file_bytes = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    if file_bytes.is_empty() {
        bail!("{} is empty", args.file.display());
    }

    info!(filename = %filename, adjust = args.adjust, "Processing résumé");

    let response = match service.send_resume(file_bytes, &filename, args.adjust).await {
        Ok(response) => response,
        Err(err) => {
            warn!(status = ?err.status_code(), "Request failed: {err}");
            writeln!(out, "⚠️ {err}")?;
            return Ok(Outcome::Failed);
        }
    };

    match response {
        ApiResponse::Analysis(result) => {
            render_analysis(&result, out)?;
            if let Some(path) = &args.report {
                tokio::fs::write(path, render_report(&result))
                    .await
                    .with_context(|| format!("Failed to write report to {}", path.display()))?;
                writeln!(out, "📥 Análise salva em {}", path.display())?;
            }
            Ok(Outcome::Analyzed)
        }
        ApiResponse::Document(doc) => {
            save_document(&doc, &args.output, out).await?;
            Ok(Outcome::DocumentSaved(args.output.clone()))
        }
        ApiResponse::Unrecognized(body) => {
            warn!(bytes = body.len(), "Unrecognized response from backend");
            writeln!(out, "Resposta inesperada do servidor.")?;
            Ok(Outcome::Unexpected)
        }
    }
}

/// Accepts `.pdf` and `.txt` files (any case) and returns the bare filename.
fn validate_upload(path: &Path) -> Result<String> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .with_context(|| format!("Invalid file path: {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
        bail!("Formato não suportado: {filename} (formatos aceitos: PDF, TXT)");
    }

    Ok(filename.to_string())
}

fn render_analysis<W: Write>(result: &AnalysisResult, out: &mut W) -> Result<()> {
    writeln!(out, "✅ Análise concluída!\n")?;

    if let Some(score) = result.score {
        writeln!(out, "{}\n", render_score_card(score))?;
    }

    let view = FeedbackView::from_result(result);

    writeln!(out, "📋 Análise")?;
    if view.analysis.is_empty() {
        writeln!(out, "Nenhuma análise retornada.\n")?;
    } else {
        writeln!(out, "{}\n", view.analysis)?;
    }

    writeln!(out, "💡 Sugestões")?;
    if view.suggestions.is_empty() {
        writeln!(out, "Nenhuma sugestão retornada.")?;
    } else {
        writeln!(out, "{}", view.suggestions)?;
    }

    Ok(())
}

async fn save_document<W: Write>(doc: &AdjustedDocument, path: &Path, out: &mut W) -> Result<()> {
    if doc.is_empty() {
        warn!("Backend returned an empty document");
    }
    tokio::fs::write(path, doc.as_bytes())
        .await
        .with_context(|| format!("Failed to write document to {}", path.display()))?;
    info!(bytes = doc.len(), path = %path.display(), "Adjusted résumé saved");
    writeln!(out, "✅ Currículo ajustado com sucesso! Salvo em {}", path.display())?;
    Ok(())
}
