//! Generation state machine: layout → prompt → validate → render → persist
//!
//! Two modes. Single renders the whole poster in one call; modular renders
//! header, each concept and footer as independent images, strictly one at a
//! time so the seed offsets stay deterministic and renderer load stays
//! bounded. The public entry points never return an error: every internal
//! failure becomes a `failed` output with timing still recorded.

use crate::clients::{
    ImageSize, NegativePrompt, PollingConfig, PosterStorage, RenderClientError, RenderRequest,
    Renderer, resolve_submission,
};
use crate::config::Config;
use crate::error::{PosterError, Result};
use crate::layout::{self, LayoutStrategy};
use crate::models::{
    GenerationInput, GenerationMetadata, GenerationMode, GenerationOutput, GenerationStatus,
    KnowledgeLevel,
};
use crate::prompt::{self, StructuredPrompt};
use rand::Rng;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Upper bound (exclusive) for randomly drawn base seeds.
pub const SEED_SPACE: u64 = 1_000_000;

/// Deterministic seed offsets for one generation request. The offset scheme
/// is a contract: a fixed base seed reproduces the entire section set.
#[derive(Debug, Clone, Copy)]
pub struct SeedPlan {
    base: u64,
}

impl SeedPlan {
    pub fn new(base: u64) -> Self {
        Self { base }
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn header(&self) -> u64 {
        self.base
    }

    pub fn concept(&self, index: usize) -> u64 {
        self.base + index as u64 + 1
    }

    pub fn footer(&self) -> u64 {
        self.base + 1000
    }
}

type SeedSource = Box<dyn Fn() -> u64 + Send + Sync>;

pub struct Orchestrator {
    renderer: Arc<dyn Renderer>,
    storage: Option<Arc<dyn PosterStorage>>,
    polling: PollingConfig,
    seed_source: SeedSource,
}

impl Orchestrator {
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self {
            renderer,
            storage: None,
            polling: PollingConfig::default(),
            seed_source: Box::new(|| rand::thread_rng().gen_range(0..SEED_SPACE)),
        }
    }

    /// Build the production orchestrator from configuration: HTTP renderer
    /// client plus the storage client when storage is enabled.
    pub fn from_config(config: &Config) -> Result<Self> {
        let renderer = crate::clients::FiboClient::new(
            &config.renderer,
            config.runtime.renderer_api_key.clone(),
        )?;
        let mut orchestrator = Self::new(Arc::new(renderer)).with_polling(config.polling());
        if config.storage.enabled {
            let storage = crate::clients::HttpStorage::new(
                &config.storage,
                config.runtime.storage_api_key.clone(),
            )?;
            orchestrator = orchestrator.with_storage(Arc::new(storage));
        }
        Ok(orchestrator)
    }

    pub fn with_storage(mut self, storage: Arc<dyn PosterStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_polling(mut self, polling: PollingConfig) -> Self {
        self.polling = polling;
        self
    }

    /// Inject a deterministic seed source for tests.
    pub fn with_seed_source(mut self, source: impl Fn() -> u64 + Send + Sync + 'static) -> Self {
        self.seed_source = Box::new(source);
        self
    }

    /// Run one generation request to its terminal status. Never returns an
    /// error; failures come back as a `failed` output with a one-sentence
    /// error message.
    pub async fn generate(&self, input: &GenerationInput) -> GenerationOutput {
        let request_id = uuid::Uuid::new_v4().to_string();
        let started = Instant::now();

        info!(request_id = %request_id, arxiv_id = %input.arxiv_id, mode = ?input.mode(), "generation started");

        let result = match input.mode() {
            GenerationMode::Single => self.run_single(input, &request_id, started).await,
            GenerationMode::Modular => self.run_modular(input, &request_id, started).await,
        };

        match result {
            Ok(output) => output,
            Err(err) => {
                let message = err.to_string();
                warn!(request_id = %request_id, error = %message, "generation failed");
                GenerationOutput {
                    request_id,
                    status: GenerationStatus::Failed,
                    final_image_url: None,
                    metadata: self.metadata(input, started, None, None, None, None),
                    error: Some(message),
                }
            }
        }
    }

    /// Re-run a prior request at a different knowledge level. Pure
    /// re-invocation; nothing is cached or diffed against the first run.
    pub async fn regenerate(
        &self,
        input: &GenerationInput,
        new_level: KnowledgeLevel,
    ) -> GenerationOutput {
        let mut replayed = input.clone();
        replayed.knowledge_level = new_level;
        self.generate(&replayed).await
    }

    fn metadata(
        &self,
        input: &GenerationInput,
        started: Instant,
        seed: Option<u64>,
        section_urls: Option<Vec<String>>,
        storage_file_id: Option<String>,
        structured_prompt: Option<StructuredPrompt>,
    ) -> GenerationMetadata {
        let previews = input
            .options
            .as_ref()
            .filter(|o| o.include_layout_previews)
            .map(|_| {
                layout::recommendations(
                    input.summary.key_concepts.len(),
                    input.knowledge_level,
                    &input.tags,
                )
            });
        GenerationMetadata {
            generation_time_ms: started.elapsed().as_millis() as u64,
            fibo_seed: seed,
            knowledge_level: input.knowledge_level,
            timestamp: chrono::Utc::now(),
            section_urls,
            storage_file_id,
            structured_prompt,
            layout_previews: previews,
        }
    }

    /// The summary itself is the caller's to validate (see
    /// `models::validate_generation_input`); this stage enforces the
    /// geometric bound and the margin rules.
    fn compute_layout(&self, input: &GenerationInput, request_id: &str) -> Result<LayoutStrategy> {
        info!(request_id, stage = "generating_layout", "computing layout");

        let layout = layout::calculate_layout(
            input.summary.key_concepts.len(),
            input.knowledge_level,
            &input.tags,
        )?;

        let report = layout::validate_layout(&layout);
        if !report.valid {
            return Err(PosterError::InvalidInput {
                message: report.errors.join("; "),
            });
        }
        Ok(layout)
    }

    async fn render(
        &self,
        prompt: StructuredPrompt,
        seed: u64,
        negative_prompt: NegativePrompt,
    ) -> Result<String> {
        let request = RenderRequest {
            structured_prompt: prompt,
            seed,
            image_size: ImageSize::SQUARE_1024,
            negative_prompt,
        };
        let interval_ms = self.polling.interval.as_millis() as u64;
        let submission = self
            .renderer
            .generate_poster(&request)
            .await
            .map_err(|e| render_error(e, interval_ms))?;
        resolve_submission(self.renderer.as_ref(), submission, &self.polling)
            .await
            .map_err(|e| render_error(e, interval_ms))
    }

    /// Upload failures are logged and swallowed; the renderer URL stays
    /// authoritative for the caller.
    async fn persist(
        &self,
        input: &GenerationInput,
        request_id: &str,
        image_url: &str,
        suffix: &str,
    ) -> Option<String> {
        let storage = self.storage.as_ref()?;
        let filename = format!("{}_{}{}.png", input.arxiv_id, request_id, suffix);
        match storage.upload(image_url, &filename).await {
            Ok(id) => {
                info!(request_id, storage_id = %id, "image persisted");
                Some(id)
            }
            Err(err) => {
                warn!(request_id, error = %err, "storage upload failed, keeping renderer URL");
                None
            }
        }
    }

    async fn run_single(
        &self,
        input: &GenerationInput,
        request_id: &str,
        started: Instant,
    ) -> Result<GenerationOutput> {
        let layout = self.compute_layout(input, request_id)?;

        info!(request_id, stage = "generating_final", "building structured prompt");
        let structured = prompt::build(input, &layout);
        let report = prompt::validate_structured_prompt(&structured);
        if !report.valid {
            return Err(PosterError::Validation {
                message: report.errors.join("; "),
            });
        }

        let seed = (self.seed_source)();
        info!(request_id, stage = "rendering", seed, "submitting poster render");
        let image_url = self
            .render(structured.clone(), seed, NegativePrompt::AntiBlur)
            .await?;

        let storage_file_id = self.persist(input, request_id, &image_url, "").await;

        info!(request_id, stage = "complete", %image_url, "generation complete");
        Ok(GenerationOutput {
            request_id: request_id.to_string(),
            status: GenerationStatus::Complete,
            final_image_url: Some(image_url),
            metadata: self.metadata(
                input,
                started,
                Some(seed),
                None,
                storage_file_id,
                Some(structured),
            ),
            error: None,
        })
    }

    async fn run_modular(
        &self,
        input: &GenerationInput,
        request_id: &str,
        started: Instant,
    ) -> Result<GenerationOutput> {
        let layout = self.compute_layout(input, request_id)?;
        let seeds = SeedPlan::new((self.seed_source)());
        let concept_negative = if input.simple_visuals() {
            NegativePrompt::NoText
        } else {
            NegativePrompt::AntiBlur
        };

        let mut section_urls = Vec::new();
        let mut storage_file_id = None;

        // Header: validation failure is fatal, unlike concept sections.
        info!(request_id, stage = "rendering", section = "header", "rendering header");
        let header = prompt::build_header_section(input, &layout);
        let report = prompt::validate_structured_prompt(&header);
        if !report.valid {
            return Err(PosterError::Validation {
                message: format!("header section invalid: {}", report.errors.join("; ")),
            });
        }
        let url = self
            .render(header, seeds.header(), NegativePrompt::AntiBlur)
            .await?;
        storage_file_id = storage_file_id
            .or(self.persist(input, request_id, &url, "_header").await);
        section_urls.push(url);

        // One bad concept must not abort the whole poster; skip and go on.
        for (i, concept) in input.summary.key_concepts.iter().enumerate() {
            let panel =
                prompt::build_concept_section(concept, i, input.knowledge_level, &layout);
            let report = prompt::validate_structured_prompt(&panel);
            if !report.valid {
                warn!(
                    request_id,
                    concept = %concept.name,
                    errors = %report.errors.join("; "),
                    "skipping concept section that failed validation"
                );
                continue;
            }
            info!(request_id, stage = "rendering", section = "concept", index = i, "rendering concept");
            let url = self.render(panel, seeds.concept(i), concept_negative).await?;
            storage_file_id = storage_file_id
                .or(self
                    .persist(input, request_id, &url, &format!("_concept{}", i))
                    .await);
            section_urls.push(url);
        }

        info!(request_id, stage = "rendering", section = "footer", "rendering footer");
        let footer = prompt::build_footer_section(input, &layout);
        let report = prompt::validate_structured_prompt(&footer);
        if !report.valid {
            return Err(PosterError::Validation {
                message: format!("footer section invalid: {}", report.errors.join("; ")),
            });
        }
        let url = self
            .render(footer, seeds.footer(), NegativePrompt::AntiBlur)
            .await?;
        storage_file_id = storage_file_id
            .or(self.persist(input, request_id, &url, "_footer").await);
        section_urls.push(url);

        let final_image_url = section_urls.first().cloned();
        info!(
            request_id,
            stage = "complete",
            sections = section_urls.len(),
            "modular generation complete"
        );
        Ok(GenerationOutput {
            request_id: request_id.to_string(),
            status: GenerationStatus::Complete,
            final_image_url,
            metadata: self.metadata(
                input,
                started,
                Some(seeds.base()),
                Some(section_urls),
                storage_file_id,
                None,
            ),
            error: None,
        })
    }
}

fn render_error(err: RenderClientError, interval_ms: u64) -> PosterError {
    match err {
        RenderClientError::PollTimeout { attempts } => PosterError::Timeout {
            operation: "render polling".to_string(),
            timeout_ms: attempts as u64 * interval_ms,
        },
        other => PosterError::Renderer {
            message: other.to_string(),
        },
    }
}
