use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use crate::app_config::Config;
use crate::file_utils::{FileManager, FileType};
use crate::glossary::Glossary;
use crate::html::injection::{self, PageSide};
use crate::html::text_model;
use crate::html::{LinkSettings, dom};
use crate::providers::Provider;
use crate::relpath;
use crate::report::{ReportRow, ReportWriter};
use crate::translation::{TranslationCache, TranslationService};

// @module: Application controller for the site mirror

/// Paths and flags for one mirror run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Root of the source-language site
    pub source_root: PathBuf,
    /// Root of the mirror (usually `<source_root>/<target_subdir>`)
    pub dest_root: PathBuf,
    /// Persistent translation cache file
    pub cache_path: PathBuf,
    /// Glossary CSV (missing file means no glossary)
    pub glossary_path: PathBuf,
    /// Report CSV destination
    pub report_path: PathBuf,
    /// Also rewrite source pages in place with a switcher to the mirror
    pub modify_source: bool,
    /// Remove the destination root before the walk
    pub clean: bool,
}

/// Counters reported after a completed run
#[derive(Debug, Default, Clone)]
pub struct RunSummary {
    /// HTML documents translated
    pub html_files: usize,
    /// Files mirrored verbatim
    pub copied_files: usize,
    /// PDFs text-extracted
    pub pdf_extracted: usize,
    /// Cache hits during the run
    pub cache_hits: usize,
    /// Cache misses during the run
    pub cache_misses: usize,
    /// API requests issued
    pub api_requests: u64,
}

/// Main application controller for the site mirror
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Translation service over the configured provider
    service: TranslationService,
}

impl Controller {
    // @method: Create a new controller with the given configuration and provider
    pub fn with_config(config: Config, provider: Arc<dyn Provider>) -> Result<Self> {
        let options = config.translation_options();
        Ok(Self {
            service: TranslationService::new(provider, options),
            config,
        })
    }

    /// Run the full mirror workflow
    pub async fn run(&mut self, options: &RunOptions) -> Result<RunSummary> {
        if !options.source_root.is_dir() {
            return Err(anyhow::anyhow!(
                "Source root does not exist: {:?}",
                options.source_root
            ));
        }

        if options.clean {
            info!("Cleaning destination root {:?}", options.dest_root);
            FileManager::remove_dir_if_exists(&options.dest_root)?;
        }

        let glossary = Glossary::load(&options.glossary_path)?;
        let cache = TranslationCache::load(&options.cache_path);
        let link_settings = self.config.link_settings();
        let mut report = ReportWriter::new();
        let mut summary = RunSummary::default();

        // Snapshot before any writes so the walk never sees its own output
        let files = FileManager::collect_files(&options.source_root, &options.dest_root)?;
        info!(
            "Mirroring {} file(s) from {:?} to {:?}",
            files.len(),
            options.source_root,
            options.dest_root
        );

        let progress = ProgressBar::new(files.len() as u64);
        progress.set_style(
            ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        for path in &files {
            let rel = path
                .strip_prefix(&options.source_root)
                .context("Walked file outside the source root")?;
            let rel_str = relpath::rel_path_string(rel);
            progress.set_message(rel_str.clone());

            match FileManager::detect_file_type(path) {
                FileType::Html => {
                    let dest_path = options.dest_root.join(rel);
                    self.process_html_file(
                        path,
                        &dest_path,
                        &rel_str,
                        &cache,
                        &glossary,
                        &link_settings,
                        options.modify_source,
                        &mut report,
                    )
                    .await?;
                    summary.html_files += 1;
                }
                FileType::Pdf | FileType::Other => {
                    FileManager::copy_file(path, options.dest_root.join(rel))?;
                    summary.copied_files += 1;
                }
            }

            progress.inc(1);
        }
        progress.finish_and_clear();

        summary.pdf_extracted = self.extract_pdf_texts(&files, options, &mut report)?;

        report.write(&options.report_path)?;
        cache.save(&options.cache_path)?;

        let (hits, misses, hit_rate) = cache.stats();
        summary.cache_hits = hits;
        summary.cache_misses = misses;
        summary.api_requests = self.service.total_requests();

        info!(
            "Done: {} HTML file(s) translated, {} file(s) copied, {} PDF(s) extracted",
            summary.html_files, summary.copied_files, summary.pdf_extracted
        );
        info!(
            "Cache: {} hit(s), {} miss(es) ({:.0}% hit rate), {} API request(s)",
            hits,
            misses,
            hit_rate * 100.0,
            summary.api_requests
        );

        Ok(summary)
    }

    /// Translate one HTML document and refresh language links on both sides.
    ///
    /// The raw file is read once; the source pass and the translation pass
    /// each parse their own copy, so the translated document never inherits
    /// the switcher injected into the source one.
    #[allow(clippy::too_many_arguments)]
    async fn process_html_file(
        &mut self,
        path: &Path,
        dest_path: &Path,
        rel_str: &str,
        cache: &TranslationCache,
        glossary: &Glossary,
        link_settings: &LinkSettings,
        modify_source: bool,
        report: &mut ReportWriter,
    ) -> Result<()> {
        let html = FileManager::read_to_string(path)?;
        let doctype = dom::capture_doctype(&html);

        if modify_source {
            let source_dom = dom::html_to_dom(&html)?;
            injection::refresh_language_links(&source_dom, rel_str, PageSide::Source, link_settings);
            let out = dom::finalize_serialized(dom::dom_to_html(&source_dom)?, doctype.as_deref());
            FileManager::write_to_file(path, &out)?;
        }

        let target_dom = dom::html_to_dom(&html)?;
        // Drop any language links inherited from a previously modified source
        // page before extraction, so switcher labels are never translated
        injection::strip_language_links(&target_dom, link_settings);

        let units = text_model::extract_units(&target_dom);
        let prepared: Vec<String> = units
            .all_texts()
            .iter()
            .map(|text| glossary.apply_pre(text))
            .collect();

        let mapping = self
            .service
            .translate_unique(&prepared, cache, glossary)
            .await?;

        let translated: Vec<String> = prepared
            .iter()
            .map(|text| mapping.get(text).cloned().unwrap_or_default())
            .collect();
        text_model::apply_translations(&units, &translated)?;

        injection::inject_language_links(&target_dom, rel_str, PageSide::Target, link_settings);

        let out = dom::finalize_serialized(dom::dom_to_html(&target_dom)?, doctype.as_deref());
        FileManager::write_to_file(dest_path, &out)?;

        report.add(ReportRow::html(rel_str, path, dest_path, units.counts()));
        debug!(
            "Translated {} ({} text, {} attr, {} meta unit(s))",
            rel_str,
            units.counts().0,
            units.counts().1,
            units.counts().2
        );
        Ok(())
    }

    /// Extract plain text from mirrored PDFs when `pdftotext` is installed.
    ///
    /// Extraction is pass-through: no translation of the extracted text.
    fn extract_pdf_texts(
        &self,
        files: &[PathBuf],
        options: &RunOptions,
        report: &mut ReportWriter,
    ) -> Result<usize> {
        let pdfs: Vec<&PathBuf> = files
            .iter()
            .filter(|path| FileManager::detect_file_type(path) == FileType::Pdf)
            .collect();
        if pdfs.is_empty() {
            return Ok(0);
        }

        if Command::new("pdftotext").arg("-v").output().is_err() {
            debug!("pdftotext not available, skipping PDF text extraction");
            return Ok(0);
        }

        let mut extracted = 0;
        for path in pdfs {
            let rel = path
                .strip_prefix(&options.source_root)
                .context("Walked file outside the source root")?;
            let rel_str = relpath::rel_path_string(rel);

            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            let out_path = options
                .dest_root
                .join(rel)
                .with_file_name(format!("{}-{}.txt", stem, self.config.target_language));
            if let Some(parent) = out_path.parent() {
                FileManager::ensure_dir(parent)?;
            }

            match Command::new("pdftotext").arg(path).arg(&out_path).status() {
                Ok(status) if status.success() => {
                    report.add(ReportRow::pdf(&rel_str, path, &out_path));
                    extracted += 1;
                }
                _ => {
                    warn!("pdftotext failed for {:?}, skipping", path);
                }
            }
        }

        Ok(extracted)
    }
}
