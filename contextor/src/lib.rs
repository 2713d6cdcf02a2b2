//! Retrieve-then-generate pipeline.
//!
//! One call to [`Contextor::ask`] embeds the question, fetches the top passages,
//! builds the prompt and returns the model's answer. Calls run strictly in
//! sequence; any failure aborts the whole ask.
//!
//! # Example
//! ```no_run
//! # use std::sync::Arc;
//! # use contextor::{AnswerGenerator, Contextor};
//! # use rag_store::Retriever;
//! # async fn run(retriever: Retriever, llm: Arc<dyn AnswerGenerator>) -> Result<(), contextor::ContextorError> {
//! let ctx = Contextor::new(retriever, llm);
//! let qa = ctx.ask("What is the return policy?").await?;
//! println!("{}", qa.answer);
//! # Ok(()) }
//! ```

pub mod error;
pub mod generator;
pub mod prompt;

pub use error::ContextorError;
pub use generator::AnswerGenerator;

use std::sync::Arc;

use rag_store::{DEFAULT_TOP_K, Retriever};
use tracing::{debug, info};

/// Knobs for a single ask.
#[derive(Clone, Copy, Debug)]
pub struct AskOptions {
    /// Number of passages retrieved for the prompt.
    pub top_k: u64,
}

impl Default for AskOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Answer plus the context block it was generated from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QaAnswer {
    pub answer: String,
    pub context: String,
}

/// Injected handles for the retrieve-then-generate pipeline.
#[derive(Clone)]
pub struct Contextor {
    retriever: Retriever,
    generator: Arc<dyn AnswerGenerator>,
    opts: AskOptions,
}

impl Contextor {
    pub fn new(retriever: Retriever, generator: Arc<dyn AnswerGenerator>) -> Self {
        Self::with_opts(retriever, generator, AskOptions::default())
    }

    pub fn with_opts(
        retriever: Retriever,
        generator: Arc<dyn AnswerGenerator>,
        opts: AskOptions,
    ) -> Self {
        Self {
            retriever,
            generator,
            opts,
        }
    }

    /// Answers `question` from freshly retrieved context.
    ///
    /// The answer is the generator's text, unmodified.
    ///
    /// # Errors
    /// Retrieval or generation failures, unchanged.
    pub async fn ask(&self, question: &str) -> Result<QaAnswer, ContextorError> {
        let context = self.retriever.retrieve(question, self.opts.top_k).await?;
        let prompt = prompt::build_prompt(&context, question);
        debug!(prompt_chars = prompt.len(), "prompt built");

        let answer = self.generator.generate(&prompt).await?;
        info!(
            context_chars = context.len(),
            answer_chars = answer.len(),
            "question answered"
        );

        Ok(QaAnswer { answer, context })
    }
}
