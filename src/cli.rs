use crate::config::Provider;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "A small terminal assistant", long_about = None)]
pub struct Args {
    /// Ask one question and exit. Without it, lines are read from stdin or an
    /// interactive prompt.
    pub query: Option<String>,

    /// Provider fallback order, e.g. `gemini,openai`
    #[arg(short, long, value_delimiter = ',')]
    pub order: Vec<Provider>,

    /// Per-request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Transcribe a recorded audio file and use it as the query
    #[arg(short, long, value_name = "FILE", conflicts_with = "query")]
    pub audio: Option<PathBuf>,

    /// Never prompt for missing API keys
    #[arg(long)]
    pub no_prompt: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_order_list() {
        let args = Args::parse_from(["jarvis", "--order", "gemini,openai", "hello there"]);
        assert_eq!(args.order, vec![Provider::Gemini, Provider::OpenAI]);
        assert_eq!(args.query.as_deref(), Some("hello there"));
    }

    #[test]
    fn rejects_unknown_provider() {
        assert!(Args::try_parse_from(["jarvis", "--order", "claude"]).is_err());
    }

    #[test]
    fn audio_and_query_are_exclusive() {
        assert!(Args::try_parse_from(["jarvis", "--audio", "clip.wav", "time"]).is_err());
    }

    #[test]
    fn defaults() {
        let args = Args::parse_from(["jarvis"]);
        assert!(args.query.is_none());
        assert!(args.order.is_empty());
        assert!(args.timeout.is_none());
        assert!(!args.no_prompt);
    }
}
