use super::types::{PromptTemplate, TaskType};
use std::collections::HashMap;
use std::sync::LazyLock;

pub const DEFAULT_MAX_NEW_TOKENS: usize = 2000;

const GENERIC_TEMPLATE: &str = "{input}\n        \n{output}";

const INSTRUCT_TEMPLATE: &str = "Below is an instruction that describes a task, paired with an input that provides further context. Write a response that appropriately completes the request.

### Instruction:
{instruction}

### Input:
{input}

### Response:
{output}";

const QA_TEMPLATE: &str = "You are an AI assistant trained to answer questions about a context. Given a context and a question about it, provide a concise and accurate answer based on the information in the context.

Context:
{context}

Question:
{question}

Answer:
{answer}
";

// Chat requests go through the model's chat template, so there is no entry for it.
static DEFAULT_PROMPT_TEMPLATES: LazyLock<HashMap<TaskType, PromptTemplate>> =
    LazyLock::new(|| {
        HashMap::from([
            (
                TaskType::Generic,
                PromptTemplate::new(GENERIC_TEMPLATE, &["input", "output"], "output"),
            ),
            (
                TaskType::Instruct,
                PromptTemplate::new(
                    INSTRUCT_TEMPLATE,
                    &["instruction", "input", "output"],
                    "output",
                ),
            ),
            (
                TaskType::Qa,
                PromptTemplate::new(QA_TEMPLATE, &["context", "question", "answer"], "answer"),
            ),
        ])
    });

pub fn default_prompt_templates() -> &'static HashMap<TaskType, PromptTemplate> {
    &DEFAULT_PROMPT_TEMPLATES
}
