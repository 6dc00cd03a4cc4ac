//! Generate pipeline: extract -> build prompt -> infer -> parse -> render.
//!
//! One `run` is one unit of work. Nothing is stored here; the session store decides what
//! to do with the result.

use std::sync::Arc;

use anyhow::anyhow;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::errors::AppError;
use crate::generation::extract::TextExtractor;
use crate::generation::inference::ProfileInference;
use crate::generation::request::build_optimization_prompt;
use crate::layout::PageGeometry;
use crate::models::profile::Profile;
use crate::render::{render_resume_pdf, RenderedDocument};

/// Raw form input. Either part may be missing.
#[derive(Debug, Default, Clone)]
pub struct GenerateInput {
    pub resume: Option<Bytes>,
    pub job_description: Option<String>,
}

/// Input that passed the completeness check. Only constructed by `GenerateInput::validate`.
#[derive(Debug, Clone)]
pub struct ValidatedInput {
    resume: Bytes,
    job_description: String,
}

impl GenerateInput {
    /// A missing or empty file, or a blank job description, blocks the action.
    pub fn validate(self) -> Result<ValidatedInput, AppError> {
        let resume = self
            .resume
            .filter(|bytes| !bytes.is_empty())
            .ok_or_else(|| AppError::InputIncomplete("a résumé PDF is required".to_string()))?;

        let job_description = self
            .job_description
            .filter(|jd| !jd.trim().is_empty())
            .ok_or_else(|| {
                AppError::InputIncomplete("a job description is required".to_string())
            })?;

        Ok(ValidatedInput {
            resume,
            job_description,
        })
    }
}

/// Result of a successful generate.
#[derive(Debug, Clone)]
pub struct GeneratedResume {
    pub profile: Profile,
    pub document: RenderedDocument,
    pub generated_at: DateTime<Utc>,
}

pub struct ResumePipeline {
    extractor: Arc<dyn TextExtractor>,
    inference: Arc<dyn ProfileInference>,
    geometry: PageGeometry,
}

impl ResumePipeline {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        inference: Arc<dyn ProfileInference>,
        geometry: PageGeometry,
    ) -> Self {
        Self {
            extractor,
            inference,
            geometry,
        }
    }

    pub async fn run(&self, input: ValidatedInput) -> Result<GeneratedResume, AppError> {
        let ValidatedInput {
            resume,
            job_description,
        } = input;

        let extractor = Arc::clone(&self.extractor);
        let resume_text = tokio::task::spawn_blocking(move || extractor.extract(&resume))
            .await
            .map_err(|e| anyhow!("extraction task failed: {e}"))??;
        info!("Extracted {} chars of résumé text", resume_text.len());

        let prompt = build_optimization_prompt(&resume_text, &job_description);
        let raw = self.inference.complete(&prompt).await?;

        let profile = Profile::from_model_output(&raw)?;
        info!(
            "Parsed profile: {} skills, {} experience bullets, ats_score={}",
            profile.skills.len(),
            profile.experience.len(),
            profile.ats_score.value()
        );

        let geometry = self.geometry;
        let to_render = profile.clone();
        let document = tokio::task::spawn_blocking(move || render_resume_pdf(&to_render, geometry))
            .await
            .map_err(|e| anyhow!("render task failed: {e}"))??;
        info!(
            "Rendered {} ({} pages, {} bytes)",
            document.file_name,
            document.page_count,
            document.bytes.len()
        );

        Ok(GeneratedResume {
            profile,
            document,
            generated_at: Utc::now(),
        })
    }
}
