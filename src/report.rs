//! Terminal rendering of analysis reports and chat messages

use termimad::MadSkin;

use crate::analysis::{AnalysisResult, Role};
use crate::chat::ChatMessage;

pub fn render(result: &AnalysisResult) {
    let skin = MadSkin::default();
    skin.print_text(&report_markdown(result));
}

fn report_markdown(result: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str("# Threat Assessment\n\n");
    out.push_str(&format!("**Verdict:** {}\n\n", result.risk_level));
    out.push_str(&format!("**Risk score:** {}/100\n\n", result.risk_score));

    out.push_str("## Summary\n\n");
    out.push_str(&result.summary);
    out.push_str("\n\n## Red flags\n\n");

    if result.red_flags.is_empty() {
        out.push_str("*No specific red flags detected.*\n");
    } else {
        for flag in &result.red_flags {
            out.push_str(&format!("* {flag}\n"));
        }
    }

    out.push_str("\n## Recommendation\n\n");
    out.push_str(&result.recommendation);
    out.push('\n');

    out
}

pub fn print_chat_message(message: &ChatMessage) {
    match message.role {
        Role::User => println!("> {}", message.text),
        Role::Assistant => {
            let skin = MadSkin::default();
            println!();
            skin.print_text(&message.text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::RiskLevel;

    #[test]
    fn report_lists_every_verdict_field() {
        let result = AnalysisResult {
            risk_score: 92,
            risk_level: RiskLevel::Malicious,
            summary: "Urgency and shortened link indicate phishing.".to_string(),
            red_flags: vec!["Urgency".to_string(), "Shortened URL".to_string()],
            recommendation: "Do not click; delete message.".to_string(),
        };

        let markdown = report_markdown(&result);

        assert!(markdown.contains("MALICIOUS"));
        assert!(markdown.contains("92/100"));
        assert!(markdown.contains("Urgency and shortened link indicate phishing."));
        assert!(markdown.contains("* Shortened URL"));
        assert!(markdown.contains("Do not click; delete message."));
    }

    #[test]
    fn report_notes_when_no_red_flags_were_found() {
        let result = AnalysisResult {
            risk_score: 2,
            risk_level: RiskLevel::Safe,
            summary: "Nothing suspicious found.".to_string(),
            red_flags: vec![],
            recommendation: "No action needed.".to_string(),
        };

        assert!(report_markdown(&result).contains("No specific red flags detected."));
    }
}
