// Résumé generation: PDF text extraction, prompt building, the single inference call,
// and the pipeline that turns an upload into a validated Profile and rendered PDF.
// All LLM calls go through llm_client; nothing here talks to the endpoint directly.

pub mod extract;
pub mod handlers;
pub mod inference;
pub mod pipeline;
pub mod prompts;
pub mod request;

#[cfg(test)]
pub(crate) mod stubs;
