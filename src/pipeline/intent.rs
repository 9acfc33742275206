//! Control-token protocol embedded in generated text.
//!
//! The generative model signals structured intent by appending literal
//! tokens to its natural-language answer. This module owns the token
//! grammar; the prompt composer builds its instructions from the same
//! constants so the two sides cannot drift apart.

use std::sync::OnceLock;

use regex::Regex;

/// The model confirms the user wants to donate.
pub const CONFIRM_DONATE_TOKEN: &str = "[INTENT:CONFIRM_DONATE]";
/// The model points at a specific cause; must be accompanied by a URL token.
pub const SHOW_DETAILS_TOKEN: &str = "[INTENT:SHOW_DETAILS]";

/// `[URL:<path>]` where `<path>` contains no `]`.
fn url_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[URL:([^\]]*)\]").expect("valid url token regex"))
}

/// Structured action recovered from one generated response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentSignal {
    None,
    ConfirmDonate,
    ShowDetails { url: String },
}

/// Scan generated text for control tokens.
///
/// Total over all inputs: every string maps to exactly one signal, and the
/// returned text is free of leading/trailing tokens. Rules are checked in
/// fixed priority order; the first match wins:
///
/// 1. donate-confirmation token → `ConfirmDonate`
/// 2. details token with a well-formed URL token → `ShowDetails`;
///    without one, the tokens are stripped but no action is taken
/// 3. otherwise → `None`, text unchanged
pub fn parse(generated: &str) -> (String, IntentSignal) {
    if generated.contains(CONFIRM_DONATE_TOKEN) {
        let cleaned = generated.replace(CONFIRM_DONATE_TOKEN, "").trim().to_string();
        return (cleaned, IntentSignal::ConfirmDonate);
    }

    if generated.contains(SHOW_DETAILS_TOKEN) {
        let url = url_token_re()
            .captures(generated)
            .map(|caps| caps[1].to_string())
            .filter(|path| !path.is_empty());

        let without_details = generated.replace(SHOW_DETAILS_TOKEN, "");
        let cleaned = url_token_re()
            .replace_all(&without_details, "")
            .trim()
            .to_string();

        return match url {
            Some(url) => (cleaned, IntentSignal::ShowDetails { url }),
            None => {
                tracing::warn!("Details token without a well-formed URL token; taking no action");
                (cleaned, IntentSignal::None)
            }
        };
    }

    (generated.to_string(), IntentSignal::None)
}
