//! Fixed prompts used by the validation and generation stages

use once_cell::sync::Lazy;

use crate::domain::prompt::PromptTemplate;

/// Answer returned without a model call when no evidence survives filtering
pub const INSUFFICIENT_EVIDENCE_ANSWER: &str = "Insufficient research evidence available.";

/// Warning attached to a rejected query
pub const REJECTION_WARNING: &str = "Medical query rejected for safety reasons.";

/// Phrase the model is told to emit when the context cannot answer the question
pub const FALLBACK_PHRASE: &str = "Insufficient high-quality research evidence found for this query.";

pub const SYSTEM_PROMPT: &str = "You are a medical research assistant specializing in evidence-based medicine. \
Your responses are grounded in peer-reviewed research. \
You do not provide personal medical advice.";

const VALIDATION_TEMPLATE: &str = r#"You screen questions sent to an academic medical research assistant.

REJECT the query if it asks for:
- a personal diagnosis ("What do I have?", "Do I have cancer?")
- personal treatment or dosage ("What dose should I take?", "Prescribe something for me")
- help with a medical emergency ("I'm having chest pain", "I can't stop bleeding")
- a personal medication decision ("Should I stop taking my medication?")

APPROVE the query if it is:
- a general medical research question ("What are treatments for type 2 diabetes?")
- a comparative question ("Compare the efficacy of drug A and drug B")
- a literature question ("Latest research on Alzheimer's biomarkers")
- a guideline lookup ("WHO recommendations for hypertension")

Query:
"{query}"

Reply with exactly one of:
APPROVED
REJECTED: <reason>

Reply:"#;

const GENERATION_TEMPLATE: &str = r#"You are a medical research assistant. Answer the question using ONLY the research context below.

Rules:
1. Use only the provided context. Do not draw on prior knowledge.
2. Put a bracketed citation such as [1] after every claim, naming the numbered source that supports it.
3. When several sources support the same claim, cite them consecutively, for example [1][2].
4. If the context does not answer the question, reply with: "Insufficient high-quality research evidence found for this query."

Context:
{context}

Question:
{query}

Format the answer with short **bold** headings and bullet points where they help. Be precise and clinical.

Answer:"#;

static VALIDATION_PROMPT: Lazy<PromptTemplate> = Lazy::new(|| PromptTemplate::parse(VALIDATION_TEMPLATE));
static GENERATION_PROMPT: Lazy<PromptTemplate> = Lazy::new(|| PromptTemplate::parse(GENERATION_TEMPLATE));

/// Safety rubric, binds `{query}`
pub fn validation_prompt() -> &'static PromptTemplate {
    &VALIDATION_PROMPT
}

/// Grounded answer instructions, binds `{context}` and `{query}`
pub fn generation_prompt() -> &'static PromptTemplate {
    &GENERATION_PROMPT
}
