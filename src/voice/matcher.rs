//! Phrase matching against the stored prompt list

use crate::domain::VoicePrompt;

use super::normalize::normalize;

/// Find the prompt triggered by an already normalized transcript
///
/// Prompts are checked in stored order and the first one whose normalized
/// phrase is contained in the transcript wins. There is no scoring: when two
/// phrases overlap ("invoice" and "create invoice") list order decides, so
/// users control precedence by reordering their prompts.
///
/// Hidden prompts and prompts with a blank phrase never match.
pub fn match_prompt<'a>(heard: &str, prompts: &'a [VoicePrompt]) -> Option<&'a VoicePrompt> {
    if heard.is_empty() {
        return None;
    }

    prompts.iter().find(|prompt| {
        if prompt.hidden {
            return false;
        }
        let phrase = normalize(prompt.phrase_str());
        !phrase.is_empty() && (heard == phrase || heard.contains(&phrase))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompts() -> Vec<VoicePrompt> {
        vec![
            VoicePrompt::new("Invoices", "show_invoices", "invoice"),
            VoicePrompt::new("Create Invoice", "create_invoice", "create invoice"),
            VoicePrompt::new("Jobs", "show_jobs", "  Show   JOBS "),
        ]
    }

    #[test]
    fn first_match_wins_in_list_order() {
        let prompts = prompts();
        let m = match_prompt("create invoice now", &prompts).unwrap();
        assert_eq!(m.action_key_str(), "show_invoices");
    }

    #[test]
    fn reordering_changes_the_winner() {
        let mut prompts = prompts();
        prompts.swap(0, 1);
        let m = match_prompt("create invoice now", &prompts).unwrap();
        assert_eq!(m.action_key_str(), "create_invoice");
    }

    #[test]
    fn stored_phrase_is_normalized_before_comparison() {
        let prompts = prompts();
        let m = match_prompt("show jobs", &prompts).unwrap();
        assert_eq!(m.action_key_str(), "show_jobs");
    }

    #[test]
    fn hidden_prompts_never_match() {
        let prompts = vec![
            VoicePrompt::new("Jobs", "show_jobs", "show jobs").hidden(),
        ];
        assert!(match_prompt("show jobs", &prompts).is_none());
        assert!(match_prompt("please show jobs right now", &prompts).is_none());
    }

    #[test]
    fn blank_phrases_are_skipped() {
        let blank = VoicePrompt::new("Blank", "blank", "   ");
        let mut missing = VoicePrompt::new("Missing", "missing", "x");
        missing.phrase = None;
        let prompts = vec![blank, missing, VoicePrompt::new("Jobs", "show_jobs", "jobs")];
        let m = match_prompt("jobs", &prompts).unwrap();
        assert_eq!(m.action_key_str(), "show_jobs");
    }

    #[test]
    fn no_match_returns_none() {
        let prompts = prompts();
        assert!(match_prompt("open the weather", &prompts).is_none());
        assert!(match_prompt("", &prompts).is_none());
    }
}
