//! Helpers over the server's prompt list.
//!
//! Prompts are defined by the service and are read-only here; these helpers
//! only look them up and lay them out for display.

use crate::types::Prompt;

/// Find a prompt by exact id.
pub fn find_prompt<'a>(prompts: &'a [Prompt], id: &str) -> Option<&'a Prompt> {
    prompts.iter().find(|p| p.id == id)
}

/// The id pre-selected when the user has not chosen one: the first prompt.
pub fn default_prompt_id(prompts: &[Prompt]) -> Option<&str> {
    prompts.first().map(|p| p.id.as_str())
}

/// Aligned `id  name  description` table, one prompt per line.
pub fn format_prompt_table(prompts: &[Prompt]) -> String {
    let id_w = prompts.iter().map(|p| p.id.chars().count()).max().unwrap_or(0).max(2);
    let name_w = prompts.iter().map(|p| p.name.chars().count()).max().unwrap_or(0).max(4);

    let mut out = format!("{:<id_w$}  {:<name_w$}  DESCRIPTION\n", "ID", "NAME");
    for p in prompts {
        out.push_str(&format!("{:<id_w$}  {:<name_w$}  {}\n", p.id, p.name, p.description));
    }
    out
}
