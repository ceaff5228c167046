/// A builder for rendering prompts with context.
pub struct PromptRenderer<'a> {
    template: &'a str,
    replacements: Vec<(&'a str, String)>,
}

impl<'a> PromptRenderer<'a> {
    pub fn new(template: &'a str) -> Self {
        Self {
            template,
            replacements: Vec::new(),
        }
    }

    pub fn set(mut self, key: &'a str, value: impl Into<String>) -> Self {
        self.replacements.push((key, value.into()));
        self
    }

    /// Substitutes every placeholder in a single pass over the template, so values that
    /// themselves contain `{{...}}` are never expanded.
    pub fn render(self) -> String {
        let mut result = String::with_capacity(self.template.len());
        let mut rest = self.template;

        while let Some(start) = rest.find("{{") {
            let Some(len) = rest[start..].find("}}").map(|end| end + 2) else {
                break;
            };
            let placeholder = &rest[start..start + len];
            result.push_str(&rest[..start]);
            match self.replacements.iter().find(|(key, _)| *key == placeholder) {
                Some((_, value)) => result.push_str(value),
                None => {
                    tracing::error!(
                        "Mentor: [PROMPT RENDER ERROR] Unreplaced placeholder found in output: {}",
                        placeholder
                    );
                    result.push_str(placeholder);
                }
            }
            rest = &rest[start + len..];
        }
        result.push_str(rest);
        result
    }
}

pub const FEEDBACK_TEMPLATE: &str = concat!(
    "You are a professional freelance mentor. ",
    "The user was given this project: \"{{PROJECT}}\". ",
    "They submitted this response: \"{{ANSWER}}\". ",
    "Give constructive feedback in {{LANGUAGE}} (formal but friendly). Include:\n",
    "- Positive points\n",
    "- Suggestions for improvement\n",
    "- A score out of 100\n",
    "Keep it concise but helpful."
);

pub const FEEDBACK_LANGUAGE: &str = "Persian";

pub fn feedback_prompt(project: &str, answer: &str) -> String {
    PromptRenderer::new(FEEDBACK_TEMPLATE)
        .set("{{PROJECT}}", project)
        .set("{{ANSWER}}", answer)
        .set("{{LANGUAGE}}", FEEDBACK_LANGUAGE)
        .render()
}
