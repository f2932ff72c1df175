/// Prompt for a concise networking answer
pub fn networking_prompt(query: &str) -> String {
    format!(
        "You are a helpful network engineer assistant. Answer concisely and precisely. \
         If code is requested, respond with working code only (no long explanation) \
         and indicate required imports and steps.\n\
         \n\
         Question:\n\
         {query}",
        query = query,
    )
}

/// Prompt asking for runnable `language` code solving `task`
pub fn code_generation_prompt(task: &str, language: &str) -> String {
    format!(
        "You are a pragmatic developer assistant. Produce {language} code that solves the task below. \
         Return only code (no markdown). If multiple files are needed, show them separated by comments.\n\
         \n\
         TASK:\n\
         {task}\n\
         \n\
         Requirements: create robust, error-handled, runnable code. Keep it minimal but complete.",
        language = language,
        task = task,
    )
}
