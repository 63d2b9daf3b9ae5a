//! The `/ask` button and the question modal it opens.

use serenity::builder::{
    CreateActionRow, CreateButton, CreateInputText, CreateInteractionResponseMessage, CreateModal,
};
use serenity::model::application::{ActionRow, ActionRowComponent, ButtonStyle, InputTextStyle};

pub const ASK_BUTTON_ID: &str = "ask_ai_button";
pub const ASK_MODAL_ID: &str = "ask_ai_modal";
pub const QUESTION_INPUT_ID: &str = "question";

const ASK_PROMPT: &str = "Click the button to ask the AI:";
const ASK_TITLE: &str = "Ask the AI";
const QUESTION_LABEL: &str = "What would you like to ask the AI?";

/// Ephemeral reply to `/ask` carrying the button that opens the modal.
pub fn ask_button_message() -> CreateInteractionResponseMessage {
    let button = CreateButton::new(ASK_BUTTON_ID)
        .label(ASK_TITLE)
        .style(ButtonStyle::Primary);

    CreateInteractionResponseMessage::new()
        .content(ASK_PROMPT)
        .components(vec![CreateActionRow::Buttons(vec![button])])
        .ephemeral(true)
}

/// Modal with a single paragraph input for the question.
pub fn ask_modal() -> CreateModal {
    let input = CreateInputText::new(InputTextStyle::Paragraph, QUESTION_LABEL, QUESTION_INPUT_ID)
        .required(true);

    CreateModal::new(ASK_MODAL_ID, ASK_TITLE).components(vec![CreateActionRow::InputText(input)])
}

/// Text the user typed into the question input, if any.
pub fn submitted_question(rows: &[ActionRow]) -> Option<&str> {
    rows.iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            ActionRowComponent::InputText(input) if input.custom_id == QUESTION_INPUT_ID => {
                input.value.as_deref()
            }
            _ => None,
        })
}
