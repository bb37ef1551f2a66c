use crate::models::GenerationRequest;

pub const SYSTEM_PROMPT: &str = "You are a culinary assistant that receives a list of ingredients \
and suggests a recipe using some or all of them. Keep extras minimal. At the end, recommend a \
YouTube video with an iframe embed. Format in markdown.";

/// A single system + user chat turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPrompt {
    pub system: String,
    pub user: String,
}

impl ChatPrompt {
    #[must_use]
    pub fn for_request(request: &GenerationRequest) -> Self {
        Self {
            system: SYSTEM_PROMPT.to_string(),
            user: user_message(request),
        }
    }
}

/// "I have egg, rice. Please give me a recipe!" plus optional dietary and
/// cuisine clauses.
#[must_use]
pub fn user_message(request: &GenerationRequest) -> String {
    let ingredients = request.ingredient_names.join(", ");
    let mut message = format!("I have {ingredients}. Please give me a recipe!");

    let prefs = &request.preferences;
    if !prefs.dietary_preferences.is_empty() {
        let dietary: Vec<&str> = prefs
            .dietary_preferences
            .iter()
            .map(|p| p.label())
            .collect();
        message.push_str(&format!(
            " It must respect these dietary preferences: {}.",
            dietary.join(", ")
        ));
    }
    if !prefs.cuisine_type.is_any() {
        message.push_str(&format!(
            " Make it in the style of {} cuisine.",
            prefs.cuisine_type
        ));
    }
    message
}
