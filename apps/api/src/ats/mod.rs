// ATS resume scoring: intake → extraction → prompt → LLM score → parse, with
// guaranteed upload cleanup. All LLM calls go through llm_client.

pub mod extract;
pub mod handlers;
pub mod intake;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod scoring;

#[cfg(test)]
pub mod testing;
