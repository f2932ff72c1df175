use super::normalizer::{DESCRIPTION_MARKER, SECURITY_MARKER, SUGGESTIONS_MARKERS};

/// Prompt asking the model for a description, security issues and
/// suggestions, using the headers the normalizer recognises.
pub fn analysis_prompt(language: &str, code: &str) -> String {
    format!(
        "You are a code analyzer. Analyze the following {language} code:\n\
         - Explain what it does.\n\
         - Point out any security issues (e.g., unsafe input, DoS risk).\n\
         - Suggest improvements.\n\
         \n\
         Answer using exactly these section headers, each on its own line:\n\
         {description}\n\
         {security}\n\
         {suggestions}\n\
         List security issues and suggestions one per line, each starting with \"- \".\n\
         \n\
         Code:\n\
         {code}\n",
        language = language,
        description = DESCRIPTION_MARKER,
        security = SECURITY_MARKER,
        suggestions = SUGGESTIONS_MARKERS[0],
        code = code,
    )
}
