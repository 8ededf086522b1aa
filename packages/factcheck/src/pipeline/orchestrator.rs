//! Full verification pipeline, blocking and streaming.

use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::error::Result;
use crate::pipeline::claims::{extract_claims, extract_keywords};
use crate::pipeline::parse::parse_model_response;
use crate::pipeline::prompts::build_verification_prompt;
use crate::pipeline::resolve::{ContextResolver, Resolution};
use crate::traits::generator::Generator;
use crate::traits::knowledge::QuoteSource;
use crate::types::config::PipelineConfig;
use crate::types::event::StreamEvent;
use crate::types::outcome::VerificationOutcome;
use crate::types::request::FactCheckRequest;

/// Punctuation that flushes the streaming buffer at a natural boundary.
const FLUSH_PUNCTUATION: &[char] = &['.', ',', '!', '?', ':', ';', ')'];

/// Coordinates claim extraction, context resolution, prompt construction,
/// generation, and response parsing.
#[derive(Clone)]
pub struct FactCheckOrchestrator {
    resolver: Arc<ContextResolver>,
    quotes: Arc<dyn QuoteSource>,
    generator: Arc<dyn Generator>,
    config: PipelineConfig,
}

impl FactCheckOrchestrator {
    pub fn new(
        resolver: Arc<ContextResolver>,
        quotes: Arc<dyn QuoteSource>,
        generator: Arc<dyn Generator>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            resolver,
            quotes,
            generator,
            config,
        }
    }

    /// Verify every claim in a message, returning one outcome per claim.
    ///
    /// Failures are absorbed per claim: a claim whose verification errors
    /// yields an UNVERIFIABLE outcome carrying the error text, and the
    /// remaining claims still run.
    pub async fn fact_check(&self, request: &FactCheckRequest) -> Vec<VerificationOutcome> {
        let claims = extract_claims(
            &request.message,
            &self.config.claim_keywords,
            self.config.min_claim_length,
        );
        info!(count = claims.len(), "Extracted claims");

        if claims.is_empty() {
            return vec![VerificationOutcome::unverifiable(
                request.message.clone(),
                "No factual claims detected in message".to_string(),
            )];
        }

        let mut outcomes = Vec::with_capacity(claims.len());
        for claim in claims {
            let outcome = match self.verify_claim(&claim.text, request).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(claim = %claim.text, error = %e, "Claim verification failed");
                    VerificationOutcome::unverifiable(
                        claim.text.clone(),
                        format!("Error during verification: {e}"),
                    )
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Verify one claim end to end.
    async fn verify_claim(
        &self,
        claim: &str,
        request: &FactCheckRequest,
    ) -> Result<VerificationOutcome> {
        let subject = match &request.subject_name {
            Some(name) => name.clone(),
            None => extract_keywords(claim, &self.config.stop_words),
        };

        let resolution = self.resolver.resolve(&subject).await?;
        let reference = resolution.context();

        let quotes = match reference {
            Some(context) => self.fetch_quotes(&context.title).await,
            None => Vec::new(),
        };

        let prompt = build_verification_prompt(
            claim,
            request.caller_context.as_deref(),
            reference,
            &quotes,
        );
        let output = self.generator.generate(&self.config.model, &prompt).await?;

        Ok(parse_model_response(claim, &output, reference))
    }

    /// Quotes for a resolved title, primary locale first. Best effort: a
    /// failing quote source never fails the claim.
    async fn fetch_quotes(&self, title: &str) -> Vec<String> {
        for locale in [&self.config.primary_locale, &self.config.fallback_locale] {
            match self.quotes.quotes(locale, title).await {
                Ok(quotes) if !quotes.is_empty() => {
                    let mut quotes = quotes;
                    quotes.truncate(self.config.max_quotes);
                    return quotes;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(title = %title, locale = %locale, error = %e, "Quote lookup failed");
                }
            }
        }
        Vec::new()
    }

    /// Verify a message incrementally, emitting progress events.
    ///
    /// The whole message is treated as a single claim. Dropping the
    /// receiver cancels the run; the background task stops at the next
    /// emit. The run is bounded by the configured stream timeout.
    pub fn fact_check_stream(
        &self,
        request: FactCheckRequest,
    ) -> mpsc::Receiver<StreamEvent> {
        let (tx, rx) = mpsc::channel(32);
        let orchestrator = self.clone();
        let timeout = orchestrator.config.stream_timeout;

        tokio::spawn(async move {
            let run = orchestrator.run_stream(&request, &tx);
            if tokio::time::timeout(timeout, run).await.is_err() {
                warn!("Streaming verification timed out");
                let _ = tx
                    .send(StreamEvent::Error("Verification timed out".to_string()))
                    .await;
            }
        });

        rx
    }

    async fn run_stream(&self, request: &FactCheckRequest, tx: &mpsc::Sender<StreamEvent>) {
        if !emit(tx, StreamEvent::Start).await {
            return;
        }

        let reference = match &request.subject_name {
            Some(subject) => match self.resolver.resolve(subject).await {
                Ok(Resolution::Found(context)) => {
                    if !emit(tx, StreamEvent::SourceFound(context.title.clone())).await {
                        return;
                    }
                    Some(context)
                }
                Ok(Resolution::NotFound) => {
                    if !emit(tx, StreamEvent::SourceMissing).await {
                        return;
                    }
                    None
                }
                // Unlike the blocking path, transport failures here are
                // terminal: the stream contract promises either a final
                // verdict or an explicit error event.
                Err(e) => {
                    error!(subject = %subject, error = %e, "Context resolution failed");
                    let _ = emit(tx, StreamEvent::Error(e.to_string())).await;
                    return;
                }
            },
            None => None,
        };

        let prompt = build_verification_prompt(
            &request.message,
            request.caller_context.as_deref(),
            reference.as_ref(),
            &[],
        );
        if !emit(tx, StreamEvent::PromptReady).await {
            return;
        }

        let mut stream = match self.generator.generate_stream(&self.config.model, &prompt).await {
            Ok(stream) => stream,
            Err(e) => {
                error!(error = %e, "Failed to start generation");
                let _ = emit(tx, StreamEvent::Error(e.to_string())).await;
                return;
            }
        };

        let mut full = String::new();
        let mut buffer = String::new();
        while let Some(fragment) = stream.next().await {
            let fragment = match fragment {
                Ok(fragment) => fragment,
                Err(e) => {
                    error!(error = %e, "Generation stream failed");
                    let _ = emit(tx, StreamEvent::Error(e.to_string())).await;
                    return;
                }
            };
            full.push_str(&fragment);
            buffer.push_str(&fragment);

            if should_flush(&buffer, self.config.flush_threshold) {
                let flushed = std::mem::take(&mut buffer);
                if !emit(tx, StreamEvent::Chunk(flushed)).await {
                    return;
                }
            }
        }

        if !buffer.is_empty() && !emit(tx, StreamEvent::Chunk(buffer)).await {
            return;
        }

        let outcome = parse_model_response(&request.message, &full, reference.as_ref());
        if !emit(tx, StreamEvent::Final(outcome)).await {
            return;
        }
        let _ = emit(tx, StreamEvent::Complete).await;
    }
}

/// Send an event, reporting whether the receiver is still listening.
async fn emit(tx: &mpsc::Sender<StreamEvent>, event: StreamEvent) -> bool {
    debug!(event = event.event_name(), "Emitting stream event");
    if tx.send(event).await.is_err() {
        debug!("Stream receiver dropped, stopping");
        return false;
    }
    true
}

/// A buffer flushes when it ends at a natural boundary (whitespace or
/// sentence punctuation) or has grown past the threshold.
fn should_flush(buffer: &str, threshold: usize) -> bool {
    match buffer.chars().last() {
        Some(c) if c.is_whitespace() || FLUSH_PUNCTUATION.contains(&c) => true,
        Some(_) => buffer.chars().count() >= threshold,
        None => false,
    }
}
