use crate::providers::ProviderFailure;
use crate::session::Reply;
use crate::utils::text::wrap_text;
use console::{StyledObject, measure_text_width, style};

fn box_width() -> usize {
    let terminal_width = console::Term::stdout().size().1 as usize;
    std::cmp::min(terminal_width.saturating_sub(4), 100).max(40)
}

fn looks_like_markdown(text: &str) -> bool {
    text.contains("```") || text.contains("**") || text.contains("\n#") || text.starts_with('#')
}

/// Show one resolved reply.
pub fn display_reply(reply: &Reply) {
    match reply {
        Reply::Canned(text) => {
            println!("\n{}", style("🤖 JARVIS").bold().blue());
            display_boxed(text, |s| style(s).dim().blue());
        }
        Reply::Provider { provider, text } => {
            println!(
                "\n{} {}",
                style("🤖 JARVIS").bold().blue(),
                style(format!("via {}", provider)).dim()
            );
            if looks_like_markdown(text) {
                termimad::MadSkin::default().print_text(text);
            } else {
                display_boxed(text, |s| style(s).dim().blue());
            }
        }
        Reply::Failure(message) => {
            println!("\n{}", style("⚠️  NO ANSWER").bold().red());
            display_boxed(message, |s| style(s).dim().red());
        }
    }
}

fn display_boxed<F>(text: &str, border: F)
where
    F: Fn(String) -> StyledObject<String>,
{
    let max_width = box_width();
    let lines = wrap_text(text.trim(), max_width.saturating_sub(4));

    let content_width = lines.iter().map(|l| measure_text_width(l)).max().unwrap_or(0);
    let inner = std::cmp::min(max_width.saturating_sub(4), content_width);

    println!("{}", border(format!("┌{}┐", "─".repeat(inner + 2))));
    for line in &lines {
        let padding = inner.saturating_sub(measure_text_width(line));
        println!(
            "{} {}{} {}",
            border("│".to_string()),
            style(line).bold().white(),
            " ".repeat(padding),
            border("│".to_string())
        );
    }
    println!("{}", border(format!("└{}┘", "─".repeat(inner + 2))));
}

/// Notes the providers that were tried and failed before the one that answered.
pub fn display_skipped_providers(failures: &[ProviderFailure]) {
    for failure in failures {
        println!(
            "{}",
            style(format!("  ({} failed: {})", failure.provider, failure.reason)).dim()
        );
    }
}

/// Echo an utterance that did not come from the keyboard.
pub fn display_voice_input(utterance: &str) {
    println!("{} {}", style("🎤 Voice Input:").bold().cyan(), utterance);
}

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("✗").bold().red(), style(message).red());
}

pub fn display_banner(providers: &[&str]) {
    let order = if providers.is_empty() {
        style("no provider configured".to_string()).red()
    } else {
        style(providers.join(" -> ")).green()
    };
    println!(
        "{} {}",
        style("Jarvis is listening.").bold(),
        style("Type /help for commands, /quit or Ctrl+D to exit.").dim()
    );
    println!("{} {}", style("Providers:").dim(), order);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_detection() {
        assert!(looks_like_markdown("# Title\nbody"));
        assert!(looks_like_markdown("use `x`:\n```rust\nfn main() {}\n```"));
        assert!(looks_like_markdown("this is **bold**"));
        assert!(!looks_like_markdown("Hi there! How can I help?"));
    }
}
