pub const SUMMARY_INSTRUCTION: &str =
    "Please provide a comprehensive summary of this research paper:";
pub const KEY_POINTS_INSTRUCTION: &str =
    "Please extract the key points, contributions, and main findings from this research paper:";
pub const ANSWER_INSTRUCTION: &str =
    "Please answer the following question based on the provided text:";

pub fn summary_prompt(text: &str) -> String {
    format!("{SUMMARY_INSTRUCTION}\n\n{text}")
}

pub fn key_points_prompt(text: &str) -> String {
    format!("{KEY_POINTS_INSTRUCTION}\n\n{text}")
}

pub fn answer_prompt(text: &str, question: &str) -> String {
    format!("{ANSWER_INSTRUCTION}\n\nText: {text}\n\nQuestion: {question}")
}
