use crate::cli::Args;
use crate::commands::{ChatState, dispatcher::CommandDispatcher};
use crate::core::error::JarvisError;
use crate::display;
use crate::input;
use crate::session::{Reply, Session};
use crate::voice::Transcriber;
use is_terminal::IsTerminal;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

pub struct Application {
    pub args: Args,
    pub state: ChatState,
    pub command_dispatcher: CommandDispatcher,
    pub transcriber: Option<Box<dyn Transcriber>>,
}

impl Application {
    pub fn new(
        args: Args,
        session: Session,
        command_dispatcher: CommandDispatcher,
        transcriber: Option<Box<dyn Transcriber>>,
    ) -> Self {
        Self {
            args,
            state: ChatState::new(session),
            command_dispatcher,
            transcriber,
        }
    }

    pub async fn run(&mut self) -> Result<(), JarvisError> {
        if let Some(audio) = self.args.audio.clone() {
            return self.handle_audio_mode(&audio).await;
        }

        if let Some(query) = self.args.query.clone() {
            self.handle_line(&query).await;
            return Ok(());
        }

        if !io::stdin().is_terminal() {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| JarvisError::Input(format!("Failed to read from stdin: {}", e)))?;
            return self.handle_piped_mode(&buffer).await;
        }

        self.handle_interactive_mode().await
    }

    async fn handle_audio_mode(&mut self, audio: &Path) -> Result<(), JarvisError> {
        let Some(transcriber) = &self.transcriber else {
            display::display_error("Voice input needs an OpenAI API key for transcription.");
            return Ok(());
        };

        match transcriber.transcribe(audio).await {
            Ok(utterance) => {
                display::display_voice_input(&utterance);
                self.handle_line(&utterance).await;
            }
            Err(e) => display::display_error(&e.to_string()),
        }
        Ok(())
    }

    async fn handle_piped_mode(&mut self, buffer: &str) -> Result<(), JarvisError> {
        for line in buffer.lines() {
            if !self.handle_line(line).await {
                break;
            }
        }
        Ok(())
    }

    async fn handle_interactive_mode(&mut self) -> Result<(), JarvisError> {
        display::display_banner(&self.state.session.provider_names());

        let mut editor = input::create_editor(
            self.command_dispatcher.clone(),
            self.state.session.router().keywords(),
        )?;

        while let Some(line) = input::read_input(&mut editor)? {
            if !self.handle_line(&line).await {
                break;
            }
        }
        Ok(())
    }

    /// Handles one line of input. Returns `false` once the user asked to quit.
    async fn handle_line(&mut self, line: &str) -> bool {
        let utterance = line.trim();
        if utterance.is_empty() {
            return true;
        }

        if let Some(result) = self.command_dispatcher.execute_line(utterance, &mut self.state) {
            match result {
                Ok(Some(output)) => println!("{}", output),
                Ok(None) => {}
                Err(e) => display::display_error(&format!("Error executing command: {}", e)),
            }
            return self.state.should_continue;
        }

        debug!(utterance, "handling utterance");
        let reply = self.state.session.handle(utterance).await;
        display::display_reply(&reply);
        if matches!(reply, Reply::Provider { .. }) {
            display::display_skipped_providers(self.state.session.last_failures());
        }
        true
    }
}
