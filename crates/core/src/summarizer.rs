use crate::prompts::{answer_prompt, key_points_prompt, summary_prompt};
use crate::traits::TextGenerator;
use crate::GenerationError;
use tracing::info;

pub const SUMMARY_FALLBACK: &str = "No text available for summarization.";
pub const KEY_POINTS_FALLBACK: &str = "No text available for key points extraction.";

/// Runs the fixed prompts against a generator, one request per call.
pub struct Summarizer<G>
where
    G: TextGenerator,
{
    generator: G,
}

impl<G> Summarizer<G>
where
    G: TextGenerator,
{
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub async fn summarize(&self, text: &str) -> Result<String, GenerationError> {
        if text.trim().is_empty() {
            return Ok(SUMMARY_FALLBACK.to_string());
        }

        self.run("summary", &summary_prompt(text)).await
    }

    pub async fn extract_key_points(&self, text: &str) -> Result<String, GenerationError> {
        if text.trim().is_empty() {
            return Ok(KEY_POINTS_FALLBACK.to_string());
        }

        self.run("key_points", &key_points_prompt(text)).await
    }

    pub async fn answer(&self, text: &str, question: &str) -> Result<String, GenerationError> {
        self.run("answer", &answer_prompt(text, question)).await
    }

    async fn run(&self, operation: &str, prompt: &str) -> Result<String, GenerationError> {
        let response = self.generator.generate(prompt).await?;
        info!(
            operation,
            model = self.generator.model(),
            prompt_chars = prompt.len(),
            response_chars = response.len(),
            "generated text"
        );
        Ok(response)
    }
}
