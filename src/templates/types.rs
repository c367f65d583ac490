use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Generic,
    Instruct,
    Qa,
    Chat,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Instruct => "instruct",
            Self::Qa => "qa",
            Self::Chat => "chat",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A format string with `{name}` slots, one of which receives the model's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub template: String,
    pub input_variables: Vec<String>,
    pub answer_column: String,
}

impl PromptTemplate {
    pub fn new(template: &str, input_variables: &[&str], answer_column: &str) -> Self {
        Self {
            template: template.to_string(),
            input_variables: input_variables.iter().map(|v| v.to_string()).collect(),
            answer_column: answer_column.to_string(),
        }
    }

    /// Slots the caller has to supply: every input variable except the answer column.
    pub fn required_fields(&self) -> Vec<String> {
        self.input_variables
            .iter()
            .filter(|v| **v != self.answer_column)
            .cloned()
            .collect()
    }

    /// True when `fields` is exactly the required set, no more and no less.
    pub fn accepts_fields<'a>(&self, fields: impl IntoIterator<Item = &'a String>) -> bool {
        let supplied: BTreeSet<&str> = fields.into_iter().map(String::as_str).collect();
        let required: BTreeSet<&str> = self
            .input_variables
            .iter()
            .filter(|v| **v != self.answer_column)
            .map(String::as_str)
            .collect();
        supplied == required
    }

    /// Builds the prompt from `values`, leaving the answer slot empty.
    pub fn render_prompt(&self, values: &HashMap<String, String>) -> Result<String> {
        let mut prepared: HashMap<&str, &str> = values
            .iter()
            .filter(|(k, _)| self.input_variables.contains(k))
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        prepared.insert(self.answer_column.as_str(), "");
        self.format(&prepared)
    }

    /// Substitutes `{name}` slots. `{{` and `}}` produce literal braces.
    pub fn format(&self, values: &HashMap<&str, &str>) -> Result<String> {
        let mut out = String::with_capacity(self.template.len());
        let mut chars = self.template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    out.push('{');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') | None => {
                                return Err(Error::template(format!(
                                    "Unterminated slot '{{{}' in template",
                                    name
                                )));
                            }
                            Some(ch) => name.push(ch),
                        }
                    }
                    let value = values.get(name.as_str()).ok_or_else(|| {
                        Error::template(format!("No value supplied for slot '{}'", name))
                    })?;
                    out.push_str(value);
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    out.push('}');
                }
                '}' => {
                    return Err(Error::template("Single '}' encountered in template"));
                }
                _ => out.push(c),
            }
        }

        Ok(out)
    }
}
