mod config;
mod error;
mod core {
    pub mod request;
    pub mod session;
}
mod ai {
    pub mod adapter;
    pub mod client;
    pub mod extract;
    pub mod prompts;
}
mod orchestrator;
#[cfg(test)]
mod test_support;

use crate::ai::client::{ChatClient, CompletionBackend};
use crate::config::Config;
use crate::core::request::{Mode, ResponseKind};
use crate::core::session::Output;
use crate::orchestrator::Orchestrator;
use dotenv::dotenv;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

/// A line holding only this ends a multi-line input block.
const END_OF_BLOCK: &str = ".";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    log::info!("Using {} backend, model '{}'", config.backend_name(), config.model());

    let mut orchestrator = Orchestrator::new(ChatClient::new(&config)?);

    println!("🤖 CODEGEN ASSIST READY");
    print_menu();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt("\n> ")?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match line.trim() {
            "" => continue,
            "quit" | "exit" | "q" => break,
            "help" | "?" => print_menu(),
            "test" => run_test_cases(&orchestrator).await,
            "show" => show_session(&orchestrator),
            cmd => match Mode::parse(cmd) {
                Some(mode) => {
                    let (first_label, second_label) = mode.input_labels();
                    println!("\n=== {mode} ===");
                    let first = read_block(&mut lines, first_label).await?;
                    let second = read_block(&mut lines, second_label).await?;

                    let outcome = orchestrator.run(mode, &first, &second).await;
                    print_output(mode, &Output::from_outcome(&outcome));
                }
                None => println!("Unknown command '{cmd}'. Type 'help' for the menu."),
            },
        }
    }

    println!("👋 Bye");
    Ok(())
}

fn print_menu() {
    println!("--------------------------------------------------");
    for (i, mode) in Mode::ALL.iter().enumerate() {
        println!("  {}. {}", i + 1, mode);
    }
    println!("  test  Run the predefined code generation cases");
    println!("  show  Redisplay the last output of every mode");
    println!("  quit  Exit");
    println!("--------------------------------------------------");
}

fn prompt(text: &str) -> std::io::Result<()> {
    print!("{text}");
    std::io::stdout().flush()
}

async fn read_block<R>(lines: &mut Lines<R>, label: &str) -> std::io::Result<String>
where
    R: AsyncBufRead + Unpin,
{
    println!("{label} (finish with a line containing only '{END_OF_BLOCK}')");
    collect_block(lines).await
}

/// Reads lines up to the end marker or end of input. Blank lines are kept.
async fn collect_block<R>(lines: &mut Lines<R>) -> std::io::Result<String>
where
    R: AsyncBufRead + Unpin,
{
    let mut block = Vec::new();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == END_OF_BLOCK {
            break;
        }
        block.push(line);
    }
    Ok(block.join("\n"))
}

fn print_output(mode: Mode, output: &Output) {
    println!("\n{}", mode.output_heading());
    println!("{}", format_payload(mode.kind(), output));
}

fn format_payload(kind: ResponseKind, output: &Output) -> String {
    match output {
        Output::Payload(code) if kind.is_code() => {
            format!("```{}\n{code}\n```", kind.fence_tag())
        }
        other => other.text().to_string(),
    }
}

async fn run_test_cases<B: CompletionBackend>(orchestrator: &Orchestrator<B>) {
    println!("\n🧪 Running test cases...");
    for result in orchestrator.run_batch(&crate::orchestrator::fixed_cases()).await {
        println!("Prompt 1: {}", result.case.instruction);
        println!("Prompt 2: {}", result.case.data);
        println!("Actual Output:");
        println!("{}", format_payload(ResponseKind::Python, &result.output()));
        println!("---");
    }
}

fn show_session<B: CompletionBackend>(orchestrator: &Orchestrator<B>) {
    let mut empty = true;
    for (mode, output) in orchestrator.session().entries() {
        empty = false;
        println!("\n=== {mode} ===");
        print_output(mode, output);
    }
    if empty {
        println!("Nothing generated yet.");
    }
}
