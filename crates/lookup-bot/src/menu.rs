//! Inline keyboard menus and the action tokens their buttons carry.

use telegram_client::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Menu transition requested by a button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Lookup,
    Help,
    Status,
    Examples,
    BackMain,
}

impl MenuAction {
    pub fn token(&self) -> &'static str {
        match self {
            MenuAction::Lookup => "lookup",
            MenuAction::Help => "help",
            MenuAction::Status => "status",
            MenuAction::Examples => "examples",
            MenuAction::BackMain => "back_main",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "lookup" => Some(MenuAction::Lookup),
            "help" => Some(MenuAction::Help),
            "status" => Some(MenuAction::Status),
            "examples" => Some(MenuAction::Examples),
            "back_main" => Some(MenuAction::BackMain),
            _ => None,
        }
    }
}

/// Fixed button layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    Main,
    Help,
    Status,
    Instructions,
    Examples,
    Result,
}

impl Menu {
    pub fn keyboard(&self) -> InlineKeyboardMarkup {
        let rows = match self {
            Menu::Main => vec![
                vec![button("🔍 Search Number", MenuAction::Lookup)],
                vec![
                    button("📖 Help", MenuAction::Help),
                    button("📊 Bot Status", MenuAction::Status),
                ],
                vec![button("💡 Examples", MenuAction::Examples)],
            ],
            Menu::Help | Menu::Examples => vec![
                vec![button("🔍 Start Lookup", MenuAction::Lookup)],
                vec![back_to_main()],
            ],
            Menu::Status => vec![
                vec![button("🔄 Refresh Status", MenuAction::Status)],
                vec![back_to_main()],
            ],
            Menu::Instructions => vec![
                vec![button("💡 View Examples", MenuAction::Examples)],
                vec![back_to_main()],
            ],
            Menu::Result => vec![vec![
                button("🔍 Search Another", MenuAction::Lookup),
                button("🏠 Main Menu", MenuAction::BackMain),
            ]],
        };

        InlineKeyboardMarkup {
            inline_keyboard: rows,
        }
    }
}

fn button(text: &str, action: MenuAction) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text, action.token())
}

fn back_to_main() -> InlineKeyboardButton {
    button("🏠 Back to Main Menu", MenuAction::BackMain)
}
