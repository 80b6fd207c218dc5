use crate::ai::prompts;
use crate::error::{AssistError, Result};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseKind {
    Python,
    Sql,
    Text,
}

impl ResponseKind {
    /// Language tag used on the opening fence, e.g. "```python".
    pub fn fence_tag(self) -> &'static str {
        match self {
            ResponseKind::Python => "python",
            ResponseKind::Sql => "sql",
            ResponseKind::Text => "text",
        }
    }

    pub fn is_code(self) -> bool {
        !matches!(self, ResponseKind::Text)
    }
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fence_tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

impl GenerationSettings {
    pub fn for_kind(kind: ResponseKind) -> Self {
        match kind {
            ResponseKind::Text => Self {
                max_tokens: 150,
                temperature: Some(0.7),
            },
            ResponseKind::Python | ResponseKind::Sql => Self {
                max_tokens: 500,
                temperature: None,
            },
        }
    }
}

/// One user action. Lives for a single round trip.
#[derive(Debug, Clone)]
pub struct Request {
    pub id: Uuid,
    pub instruction: String,
    pub data: String,
    pub kind: ResponseKind,
}

impl Request {
    pub fn new(
        instruction: impl Into<String>,
        data: impl Into<String>,
        kind: ResponseKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            instruction: instruction.into(),
            data: data.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Question,
    Code,
    Sql,
    UnitTest,
    Regex,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::Question,
        Mode::Code,
        Mode::Sql,
        Mode::UnitTest,
        Mode::Regex,
    ];

    /// Accepts the menu number or the command name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "question" | "qa" => Some(Mode::Question),
            "2" | "code" => Some(Mode::Code),
            "3" | "sql" => Some(Mode::Sql),
            "4" | "unit-test" | "unittest" => Some(Mode::UnitTest),
            "5" | "regex" => Some(Mode::Regex),
            _ => None,
        }
    }

    pub fn kind(self) -> ResponseKind {
        match self {
            Mode::Question => ResponseKind::Text,
            Mode::Sql => ResponseKind::Sql,
            Mode::Code | Mode::UnitTest | Mode::Regex => ResponseKind::Python,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Mode::Question => "General Question Answering",
            Mode::Code => "Code Generation",
            Mode::Sql => "SQL Code Generation",
            Mode::UnitTest => "Unit Test Case Generation",
            Mode::Regex => "Regular Expression Generation",
        }
    }

    pub fn input_labels(self) -> (&'static str, &'static str) {
        match self {
            Mode::Question => ("Enter your prompt:", "Enter the data (optional):"),
            Mode::Code => (
                "Enter your question (e.g., how can I code Python this math):",
                "Enter your data:",
            ),
            Mode::Sql => ("Enter your SQL query problem:", "Enter your data:"),
            Mode::UnitTest => (
                "Enter the function you want to test:",
                "Enter the scenarios you want to test:",
            ),
            Mode::Regex => (
                "Enter the pattern you want to match:",
                "Enter the string data to match against:",
            ),
        }
    }

    pub fn output_heading(self) -> &'static str {
        match self {
            Mode::Question => "Answer:",
            Mode::Code => "Generated Python Code:",
            Mode::Sql => "Generated SQL Code:",
            Mode::UnitTest => "Generated Unit Test Code:",
            Mode::Regex => "Generated Regular Expression Code:",
        }
    }

    /// Validates the two inputs and shapes them into a request for this mode.
    /// Whitespace only decides whether an input is missing; the text itself is
    /// passed on untouched.
    pub fn build_request(self, first: &str, second: &str) -> Result<Request> {
        let first_missing = first.trim().is_empty();
        let second_missing = second.trim().is_empty();

        match self {
            Mode::Question => {
                if first_missing {
                    return Err(AssistError::MissingInput("Please enter a prompt.".into()));
                }
                if !second_missing && first.to_lowercase().contains("summarize") {
                    return Ok(Request::new(prompts::SUMMARIZE_INSTRUCTION, second, self.kind()));
                }
                let data = if second_missing { "" } else { second };
                Ok(Request::new(first, data, self.kind()))
            }
            _ if first_missing || second_missing => {
                Err(AssistError::MissingInput("Please fill in both inputs.".into()))
            }
            Mode::UnitTest => Ok(Request::new(
                prompts::unit_test_instruction(first, second),
                "",
                self.kind(),
            )),
            Mode::Code | Mode::Sql | Mode::Regex => Ok(Request::new(first, second, self.kind())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_follow_kind() {
        let text = GenerationSettings::for_kind(ResponseKind::Text);
        assert_eq!(text.max_tokens, 150);
        assert_eq!(text.temperature, Some(0.7));

        let sql = GenerationSettings::for_kind(ResponseKind::Sql);
        assert_eq!(sql.max_tokens, 500);
        assert_eq!(sql.temperature, None);
    }

    #[test]
    fn mode_parse_accepts_numbers_and_names() {
        assert_eq!(Mode::parse("1"), Some(Mode::Question));
        assert_eq!(Mode::parse(" SQL "), Some(Mode::Sql));
        assert_eq!(Mode::parse("unit-test"), Some(Mode::UnitTest));
        assert_eq!(Mode::parse("5"), Some(Mode::Regex));
        assert_eq!(Mode::parse("6"), None);
    }

    #[test]
    fn code_modes_require_both_inputs() {
        let err = Mode::Code.build_request("Sort a list.", "  ").unwrap_err();
        assert!(matches!(err, AssistError::MissingInput(_)));

        let err = Mode::Sql.build_request("", "table users").unwrap_err();
        assert!(matches!(err, AssistError::MissingInput(_)));
    }

    #[test]
    fn inputs_are_passed_through_verbatim() {
        let req = Mode::Code
            .build_request("    indented\n", "  data  ")
            .unwrap();
        assert_eq!(req.instruction, "    indented\n");
        assert_eq!(req.data, "  data  ");

        let req = Mode::Question.build_request("  Why?\n", "").unwrap();
        assert_eq!(req.instruction, "  Why?\n");
    }

    #[test]
    fn question_requires_only_the_prompt() {
        let req = Mode::Question.build_request("What is Rust?", "").unwrap();
        assert_eq!(req.instruction, "What is Rust?");
        assert_eq!(req.kind, ResponseKind::Text);

        let req = Mode::Question.build_request("Why?", " \n").unwrap();
        assert!(req.data.is_empty());

        let err = Mode::Question.build_request("", "data").unwrap_err();
        assert_eq!(err.to_display(), "Error: Please enter a prompt.");
    }

    #[test]
    fn summarize_keyword_switches_to_summary_prompt() {
        let req = Mode::Question
            .build_request("Please SUMMARIZE this", "A long article.")
            .unwrap();
        assert_eq!(req.instruction, prompts::SUMMARIZE_INSTRUCTION);
        assert_eq!(req.data, "A long article.");

        // without data there is nothing to summarize
        let req = Mode::Question.build_request("summarize", "").unwrap();
        assert_eq!(req.instruction, "summarize");
    }

    #[test]
    fn unit_test_mode_folds_inputs_into_instruction() {
        let header = "Generate unit test cases for the following function:";
        let function = "def add(a, b):\n    return a + b\n";
        let req = Mode::UnitTest.build_request(function, "negatives").unwrap();
        assert!(req.instruction.starts_with(header));
        assert!(req.instruction.contains(function));
        assert!(req.instruction.ends_with("Test scenarios:\nnegatives"));
        assert!(req.data.is_empty());
        assert_eq!(req.kind, ResponseKind::Python);
    }

    #[test]
    fn requests_get_distinct_ids() {
        let a = Request::new("a", "b", ResponseKind::Python);
        let b = Request::new("a", "b", ResponseKind::Python);
        assert_ne!(a.id, b.id);
    }
}
