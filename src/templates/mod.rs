mod defaults;
mod types;

pub use defaults::{DEFAULT_MAX_NEW_TOKENS, default_prompt_templates};
pub use types::{PromptTemplate, TaskType};

use crate::{Error, Result};

pub fn get_input_template(task_type: TaskType) -> Result<&'static PromptTemplate> {
    default_prompt_templates()
        .get(&task_type)
        .ok_or_else(|| Error::TemplateNotFound {
            task_type: task_type.to_string(),
        })
}
