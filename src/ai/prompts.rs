use crate::core::request::ResponseKind;

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

pub const SUMMARIZE_INSTRUCTION: &str =
    "Summarize the following text in a few clear sentences, keeping the key facts:";

/// Code-generation template. The inputs are inserted verbatim.
pub fn build_template(instruction: &str, data: &str, kind: ResponseKind) -> String {
    format!(
        "Write some {kind} code to solve the user's problem.\n\n\
         Return only {kind} code in Markdown format, e.g.:\n\n\
         ```{kind}\n\
         ....\n\
         ```\n\
         {instruction} {data}"
    )
}

/// Freeform prompt for text answers: the instruction, then the data if any.
pub fn freeform_prompt(instruction: &str, data: &str) -> String {
    if data.is_empty() {
        instruction.to_string()
    } else {
        format!("{instruction}\n\n{data}")
    }
}

pub fn unit_test_instruction(function: &str, scenarios: &str) -> String {
    format!(
        "Generate unit test cases for the following function:\n\n{function}\n\n\
         Test scenarios:\n{scenarios}"
    )
}
