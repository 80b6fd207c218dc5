use crate::ai::adapter::PromptAdapter;
use crate::ai::client::CompletionBackend;
use crate::core::request::{Mode, Request, ResponseKind};
use crate::core::session::{Output, Session};
use crate::error::{AssistError, Result};

#[derive(Debug, Clone)]
pub struct BatchCase {
    pub instruction: String,
    pub data: String,
}

impl BatchCase {
    pub fn new(instruction: &str, data: &str) -> Self {
        Self {
            instruction: instruction.into(),
            data: data.into(),
        }
    }
}

#[derive(Debug)]
pub struct BatchResult {
    pub case: BatchCase,
    pub outcome: Result<String>,
}

impl BatchResult {
    pub fn output(&self) -> Output {
        Output::from_outcome(&self.outcome)
    }
}

/// Smoke-test cases run by the `test` command.
pub fn fixed_cases() -> Vec<BatchCase> {
    vec![
        BatchCase::new("Calculate the sum of two numbers.", "Input: a = 5, b = 10"),
        BatchCase::new(
            "Sort a list of integers.",
            "Input: [3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5]",
        ),
        BatchCase::new(
            "Find the maximum value in a list.",
            "Input: [10, 22, 5, 75, 65, 80]",
        ),
    ]
}

pub struct Orchestrator<B> {
    adapter: PromptAdapter<B>,
    session: Session,
}

impl<B: CompletionBackend> Orchestrator<B> {
    pub fn new(backend: B) -> Self {
        Self {
            adapter: PromptAdapter::new(backend),
            session: Session::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn execute(&self, mode: Mode, first: &str, second: &str) -> Result<String> {
        let request = mode.build_request(first, second)?;
        log::info!("🛠️  {mode} [{}]", request.id);
        self.adapter.generate(&request).await
    }

    /// Runs one action and records what the user sees. Input errors leave
    /// the session untouched.
    pub async fn run(&mut self, mode: Mode, first: &str, second: &str) -> Result<String> {
        let outcome = self.execute(mode, first, second).await;
        match &outcome {
            Err(AssistError::MissingInput(msg)) => {
                log::warn!("{mode}: {msg}");
                return outcome;
            }
            Err(e) if e.is_upstream() => log::error!("{mode} failed talking to the model: {e}"),
            Err(e) => log::warn!("{mode}: {e}"),
            Ok(_) => {}
        }
        self.session.record(mode, Output::from_outcome(&outcome));
        outcome
    }

    pub async fn run_batch(&self, cases: &[BatchCase]) -> Vec<BatchResult> {
        let mut results = Vec::with_capacity(cases.len());
        for (i, case) in cases.iter().enumerate() {
            log::info!("   🧪 Case {}/{}: {}", i + 1, cases.len(), case.instruction);
            let request = Request::new(
                case.instruction.as_str(),
                case.data.as_str(),
                ResponseKind::Python,
            );
            let outcome = self.adapter.generate(&request).await;
            match &outcome {
                Ok(_) => log::info!("      ✅ Case {} produced code", i + 1),
                Err(e) => log::warn!("      ❌ Case {} failed: {e}", i + 1),
            }
            results.push(BatchResult {
                case: case.clone(),
                outcome,
            });
        }
        results
    }
}
