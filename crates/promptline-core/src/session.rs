//! Prompt scheduler.
//!
//! A [`Session`] owns the terminal driver and the FIFO [`PromptQueue`]. Every
//! call to [`Session::prompt`] normalizes and builds its prompt(s) and takes
//! its place in the queue synchronously, so requests issued without awaiting
//! still run one at a time in call order. Only the returned future touches
//! the terminal, so it has to be polled for the queue to move past it;
//! [`Session::submit`] runs the request on its own task instead.

use std::{future::Future, sync::Arc};

use tokio::sync::Mutex;

use crate::{
    Admission, Answer, Answers, Driver, NamedQuestion, Normalized, Prompt, PromptAction,
    PromptError, PromptKind, PromptQueue, Question, RawMode, Renderer, normalize,
};

/// Question text used when a prompt is requested with no question.
pub const DEFAULT_PLACEHOLDER: &str = ":";

/// Exit status after control-c, matching the shell convention for SIGINT.
pub const INTERRUPT_EXIT_CODE: i32 = 130;

/// What happens when the user presses control-c.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptPolicy {
    /// Restore the terminal and end the process with `code`.
    Exit {
        /// Process exit status.
        code: i32,
    },
    /// Restore the terminal and fail the prompt with
    /// [`PromptError::Interrupted`].
    Error,
}

impl Default for InterruptPolicy {
    fn default() -> Self {
        Self::Exit { code: INTERRUPT_EXIT_CODE }
    }
}

/// Session-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Question text for absent or empty questions.
    pub placeholder: String,
    /// Control-C handling.
    pub on_interrupt: InterruptPolicy,
    /// Bold questions and coloured answers. Off gives plain text plus cursor
    /// movement only.
    pub styled: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
            on_interrupt: InterruptPolicy::default(),
            styled: true,
        }
    }
}

/// Runs prompts against a driver, one at a time, in call order.
///
/// Cloning is cheap; clones share the driver and the queue.
pub struct Session<D: Driver> {
    driver: Arc<Mutex<D>>,
    queue: Arc<PromptQueue>,
    config: Arc<SessionConfig>,
}

impl<D: Driver> Clone for Session<D> {
    fn clone(&self) -> Self {
        Self {
            driver: Arc::clone(&self.driver),
            queue: Arc::clone(&self.queue),
            config: Arc::clone(&self.config),
        }
    }
}

impl<D: Driver + 'static> Session<D> {
    /// Session with default settings.
    pub fn new(driver: D) -> Self {
        Self::with_config(driver, SessionConfig::default())
    }

    /// Session with explicit settings.
    pub fn with_config(driver: D, config: SessionConfig) -> Self {
        Self {
            driver: Arc::new(Mutex::new(driver)),
            queue: Arc::new(PromptQueue::new()),
            config: Arc::new(config),
        }
    }

    /// Session settings.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Ask a question, or a list of questions.
    ///
    /// The request is validated and queued before this returns; the future
    /// only waits for its turn and runs the prompt. A list yields
    /// [`Answer::Batch`] with one answer per question, in order.
    ///
    /// The future must be polled for its turn to pass: later requests wait
    /// until this one has run or been dropped. Callers that await requests
    /// out of call order should use [`Session::submit`].
    ///
    /// # Errors
    ///
    /// Construction errors ([`PromptError::is_construction`]) are reported
    /// without queueing anything or touching the terminal. Otherwise
    /// [`PromptError::Interrupted`], [`PromptError::InputClosed`] or
    /// [`PromptError::Terminal`] from the run itself.
    pub fn prompt(
        &self,
        question: impl Into<Question>,
    ) -> impl Future<Output = Result<Answer, PromptError>> + Send + 'static {
        let request = self.enqueue(question.into());
        async move { request?.run().await }
    }

    /// Ask a question on a detached task.
    ///
    /// Same as [`Session::prompt`], but the request runs on its own tokio
    /// task, so it proceeds whether or not the returned future is polled.
    /// Awaiting a later submission before an earlier one cannot stall the
    /// queue. Dropping the returned future does not cancel the prompt.
    ///
    /// Must be called within a tokio runtime.
    ///
    /// # Errors
    ///
    /// As [`Session::prompt`], plus [`PromptError::Aborted`] if the task
    /// panicked or its runtime shut down.
    pub fn submit(
        &self,
        question: impl Into<Question>,
    ) -> impl Future<Output = Result<Answer, PromptError>> + Send + 'static {
        let task = tokio::spawn(self.prompt(question));
        async move { task.await.map_err(PromptError::aborted)? }
    }

    /// [`Session::ask_named`] on a detached task. See [`Session::submit`].
    ///
    /// # Errors
    ///
    /// As [`Session::submit`].
    pub fn submit_named(
        &self,
        questions: Vec<NamedQuestion>,
    ) -> impl Future<Output = Result<Answers, PromptError>> + Send + 'static {
        let task = tokio::spawn(self.ask_named(questions));
        async move { task.await.map_err(PromptError::aborted)? }
    }

    /// Ask each question in order and collect answers under their names.
    ///
    /// Later questions with a repeated name overwrite earlier answers.
    ///
    /// # Errors
    ///
    /// As [`Session::prompt`]. Nothing runs if any question is invalid.
    pub fn ask_named(
        &self,
        questions: Vec<NamedQuestion>,
    ) -> impl Future<Output = Result<Answers, PromptError>> + Send + 'static {
        let (names, questions): (Vec<_>, Vec<_>) =
            questions.into_iter().map(|named| (named.name, named.question)).unzip();
        let request = self.enqueue(Question::Batch(questions));

        async move {
            let answers = request?.run().await?.into_batch();
            let mut named = Answers::new();
            for (name, answer) in names.into_iter().zip(answers) {
                named.insert(name, answer);
            }
            Ok(named)
        }
    }

    /// Build every prompt, then admit them consecutively.
    fn enqueue(&self, question: Question) -> Result<Request<D>, PromptError> {
        let runs = match normalize(question, &self.config.placeholder)? {
            Normalized::Single(config) => {
                let prompt = Prompt::new(config)?;
                Runs::Single(self.queue.admit(), prompt)
            },
            Normalized::Batch(configs) => {
                let prompts =
                    configs.into_iter().map(Prompt::new).collect::<Result<Vec<_>, _>>()?;
                Runs::Batch(prompts.into_iter().map(|p| (self.queue.admit(), p)).collect())
            },
        };

        Ok(Request { driver: Arc::clone(&self.driver), config: Arc::clone(&self.config), runs })
    }
}

/// Admitted prompts waiting to run.
enum Runs {
    Single(Admission, Prompt),
    Batch(Vec<(Admission, Prompt)>),
}

struct Request<D: Driver> {
    driver: Arc<Mutex<D>>,
    config: Arc<SessionConfig>,
    runs: Runs,
}

impl<D: Driver> Request<D> {
    async fn run(self) -> Result<Answer, PromptError> {
        match self.runs {
            Runs::Single(admission, prompt) => {
                execute(&self.driver, &self.config, admission, prompt).await
            },
            Runs::Batch(runs) => {
                let mut answers = Vec::with_capacity(runs.len());
                // On failure the remaining admissions drop with the iterator.
                for (admission, prompt) in runs {
                    answers.push(execute(&self.driver, &self.config, admission, prompt).await?);
                }
                Ok(Answer::Batch(answers))
            },
        }
    }
}

/// Run one prompt once its turn comes. Raw mode is held only inside.
async fn execute<D: Driver>(
    driver: &Mutex<D>,
    config: &SessionConfig,
    mut admission: Admission,
    mut prompt: Prompt,
) -> Result<Answer, PromptError> {
    admission.wait_turn().await;
    let ticket = admission.ticket();
    let kind = prompt.kind();

    let mut driver = driver.lock().await;
    tracing::debug!(ticket, %kind, question = prompt.question(), "prompt started");

    let mut terminal = RawMode::acquire(&mut *driver).map_err(PromptError::terminal)?;
    let mut renderer = Renderer::new(terminal.columns(), config.styled);

    let frame = renderer.draw(&prompt.view()).map_err(PromptError::terminal)?;
    terminal.write(&frame).map_err(PromptError::terminal)?;

    loop {
        let Some(key) = terminal.next_key().await.map_err(PromptError::terminal)? else {
            tracing::debug!(ticket, "input closed");
            return Err(PromptError::InputClosed);
        };
        if kind != PromptKind::Password {
            tracing::trace!(ticket, ?key, "key");
        }

        for action in prompt.handle(key) {
            match action {
                PromptAction::Render => {
                    let frame = renderer.draw(&prompt.view()).map_err(PromptError::terminal)?;
                    terminal.write(&frame).map_err(PromptError::terminal)?;
                },
                PromptAction::Resolve(answer) => {
                    let frame = renderer
                        .finish(prompt.question(), &prompt.confirmed_display())
                        .map_err(PromptError::terminal)?;
                    terminal.write(&frame).map_err(PromptError::terminal)?;
                    tracing::debug!(ticket, "prompt resolved");
                    return Ok(answer);
                },
                PromptAction::Interrupt => {
                    if let Err(e) = terminal.write(b"\r\n") {
                        tracing::warn!("Failed to end interrupted line: {e}");
                    }
                    drop(terminal);
                    return interrupted(config.on_interrupt);
                },
            }
        }
    }
}

/// Called with raw mode already released.
fn interrupted(policy: InterruptPolicy) -> Result<Answer, PromptError> {
    match policy {
        InterruptPolicy::Exit { code } => {
            tracing::warn!(code, "prompt interrupted, exiting");
            std::process::exit(code)
        },
        InterruptPolicy::Error => {
            tracing::debug!("prompt interrupted");
            Err(PromptError::Interrupted)
        },
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, convert::Infallible};

    use serde_json::json;

    use super::*;
    use crate::{KeyInput, NumberConfig, SelectConfig};

    /// Minimal in-memory driver; the harness crate has the full one.
    #[derive(Default)]
    struct Keys {
        keys: VecDeque<KeyInput>,
        raw: bool,
        output: Vec<u8>,
    }

    impl Keys {
        fn typed(text: &str) -> Self {
            let mut keys: VecDeque<_> = text.chars().map(KeyInput::Char).collect();
            keys.push_back(KeyInput::Enter);
            Self { keys, ..Self::default() }
        }
    }

    impl Driver for Keys {
        type Error = Infallible;

        fn enter_raw_mode(&mut self) -> Result<(), Infallible> {
            self.raw = true;
            Ok(())
        }

        fn leave_raw_mode(&mut self) -> Result<(), Infallible> {
            self.raw = false;
            Ok(())
        }

        async fn next_key(&mut self) -> Result<Option<KeyInput>, Infallible> {
            assert!(self.raw, "keys read outside raw mode");
            Ok(self.keys.pop_front())
        }

        fn write(&mut self, bytes: &[u8]) -> Result<(), Infallible> {
            self.output.extend_from_slice(bytes);
            Ok(())
        }

        fn columns(&self) -> u16 {
            80
        }
    }

    fn plain() -> SessionConfig {
        SessionConfig { styled: false, on_interrupt: InterruptPolicy::Error, ..Default::default() }
    }

    #[tokio::test]
    async fn text_answer() {
        let session = Session::with_config(Keys::typed("bob"), plain());

        let answer = session.prompt("name").await.unwrap();
        assert_eq!(answer, Answer::Text("bob".into()));
    }

    #[tokio::test]
    async fn empty_question_uses_placeholder() {
        let session = Session::with_config(Keys::typed("x"), plain());

        session.prompt(Question::Empty).await.unwrap();
        let output = String::from_utf8(session.driver.lock().await.output.clone()).unwrap();
        assert!(output.starts_with(": "), "{output:?}");
    }

    #[tokio::test]
    async fn batch_answers_are_positional() {
        let session = Session::with_config(Keys::typed("a"), plain());
        session.driver.lock().await.keys.extend([KeyInput::Char('7'), KeyInput::Enter]);

        let questions = vec![Question::from("first"), Question::from(NumberConfig::new("n"))];
        let answer = session.prompt(questions).await.unwrap();

        assert_eq!(answer, Answer::Batch(vec![Answer::Text("a".into()), Answer::Number(7.0)]));
    }

    #[tokio::test]
    async fn construction_error_admits_nothing() {
        let session = Session::with_config(Keys::typed("ok"), plain());

        let bad = session.prompt(vec![
            Question::from("fine"),
            Question::from(SelectConfig::new("empty", Vec::<&str>::new())),
        ]);
        assert!(matches!(bad.await, Err(PromptError::InvalidChoices(_))));
        assert!(session.driver.lock().await.output.is_empty());

        assert_eq!(session.prompt("next").await.unwrap(), Answer::Text("ok".into()));
    }

    #[tokio::test]
    async fn closed_input_releases_raw_mode() {
        let session = Session::with_config(Keys::default(), plain());

        assert_eq!(session.prompt("q").await, Err(PromptError::InputClosed));
        assert!(!session.driver.lock().await.raw);
    }

    #[tokio::test]
    async fn interrupt_reports_error_under_error_policy() {
        let driver = Keys { keys: [KeyInput::Interrupt].into(), ..Keys::default() };
        let session = Session::with_config(driver, plain());

        assert_eq!(session.prompt("q").await, Err(PromptError::Interrupted));
        assert!(!session.driver.lock().await.raw);
    }

    #[tokio::test]
    async fn named_answers_keep_names() {
        let session = Session::with_config(Keys::typed("ann"), plain());
        session.driver.lock().await.keys.extend([KeyInput::Down, KeyInput::Enter]);

        let answers = session
            .ask_named(vec![
                NamedQuestion::new("name", "name?"),
                NamedQuestion::new("size", SelectConfig::new("size?", ["s", "l"])),
            ])
            .await
            .unwrap();

        assert_eq!(answers.get("name"), Some(&Answer::Text("ann".into())));
        assert_eq!(answers.get("size"), Some(&Answer::Choice(json!("l"))));
    }

    #[tokio::test]
    async fn submitted_prompts_run_without_being_polled() {
        let session = Session::with_config(Keys::typed("a"), plain());
        session.driver.lock().await.keys.extend([KeyInput::Char('b'), KeyInput::Enter]);

        let first = session.submit("first");
        let second = session.submit("second");

        assert_eq!(second.await, Ok(Answer::Text("b".into())));
        assert_eq!(first.await, Ok(Answer::Text("a".into())));
    }

    #[tokio::test]
    async fn submitted_construction_error_is_reported() {
        let session = Session::with_config(Keys::default(), plain());

        let err = session.submit(json!({"question": "no type"})).await.unwrap_err();
        assert!(err.is_construction());
    }

    #[test]
    fn default_config_exits_on_interrupt() {
        let config = SessionConfig::default();

        assert_eq!(config.placeholder, ":");
        assert_eq!(config.on_interrupt, InterruptPolicy::Exit { code: 130 });
        assert!(config.styled);
    }
}
