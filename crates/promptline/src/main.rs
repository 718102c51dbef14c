//! Promptline demo entry point.

#![allow(clippy::print_stdout, reason = "The demo reports answers on stdout")]

use clap::{Parser, ValueEnum};
use promptline::{Answer, NamedQuestion, NumberConfig, PromptConfig, PromptError};
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Promptline interactive prompt demo
#[derive(Parser, Debug)]
#[command(name = "promptline-demo")]
#[command(about = "Walk through the promptline prompt kinds")]
#[command(version)]
struct Args {
    /// Which demo to run
    #[arg(value_enum, default_value_t = Demo::Basic)]
    demo: Demo,

    /// Log filter, e.g. `promptline_core=debug`
    ///
    /// Falls back to `RUST_LOG`, then `warn`. Logs go to stderr.
    #[arg(long)]
    log_filter: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Demo {
    /// One prompt of each kind, awaited in turn
    Basic,
    /// Named questions collected into a JSON object
    Named,
    /// Two prompts requested together, answered in call order
    Concurrent,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = match args.log_filter {
        Some(filter) => EnvFilter::try_new(filter)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match args.demo {
        Demo::Basic => basic().await?,
        Demo::Named => named().await?,
        Demo::Concurrent => concurrent().await?,
    }
    Ok(())
}

async fn basic() -> Result<(), PromptError> {
    let name = promptline::prompt("Enter your name:").await?;
    println!("Hello, {}!", display(&name));

    let age = NumberConfig::new("Enter your age:")
        .min(0.0)
        .max(150.0)
        .integer()
        .suffix("years")
        .with_validator(|age: &f64| *age > 0.0);
    let age = promptline::prompt(age).await?;
    println!("You are {} years old.", display(&age));

    let color = promptline::prompt(json!({
        "type": "select",
        "question": "Choose your favorite color:",
        "choices": ["Red", "Green", "Blue", "Yellow", "Purple"],
    }))
    .await?;
    println!("Your favorite color is {}.", display(&color));

    let hobbies = promptline::prompt(json!({
        "type": "checkbox",
        "question": "Select your hobbies:",
        "choices": ["Reading", "Gaming", "Cooking", "Sports", "Music", "Programming"],
    }))
    .await?;
    println!("Your hobbies: {}", display(&hobbies));

    let _ = promptline::prompt(PromptConfig::password("Pick a password:")).await?;
    println!("Password stored.");
    Ok(())
}

async fn named() -> Result<(), PromptError> {
    let questions = vec![
        NamedQuestion::from_json(json!({
            "name": "username",
            "question": "Username:",
            "type": "input",
        }))?,
        NamedQuestion::from_json(json!({
            "name": "framework",
            "question": "Preferred framework:",
            "type": "select",
            "choices": ["React", "Vue", "Angular", "Svelte"],
        }))?,
    ];

    let answers = promptline::ask_named(questions).await?;
    println!("{}", serde_json::Value::from(answers));
    Ok(())
}

async fn concurrent() -> Result<(), PromptError> {
    let first = promptline::prompt("First question:");
    let second = promptline::prompt("Second question:");

    // Awaited in reverse; the first request still runs first.
    let second = second.await?;
    let first = first.await?;
    println!("first: {}, second: {}", display(&first), display(&second));
    Ok(())
}

/// Human-readable form of an answer.
fn display(answer: &Answer) -> String {
    match answer {
        Answer::Text(text) => text.clone(),
        Answer::Number(n) => n.to_string(),
        Answer::Choice(value) => value.as_str().map_or_else(|| value.to_string(), str::to_owned),
        Answer::Choices(values) => values
            .iter()
            .map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_owned))
            .collect::<Vec<_>>()
            .join(", "),
        Answer::Batch(answers) => answers.iter().map(display).collect::<Vec<_>>().join(" / "),
    }
}
