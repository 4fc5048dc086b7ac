//! Implements InputPort. Inquire-based admin menu for the closed-day calendar.

use crate::adapters::ui::calendar_view;
use crate::domain::{CivilDate, DomainError, EffectiveStatus, OverrideStatus, ToggleRequest};
use crate::ports::InputPort;
use crate::usecases::CalendarService;
use async_trait::async_trait;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{InquireError, Select, Text};
use std::fmt;
use std::sync::Arc;

/// Prompt prefix and highlight colors for every inquire prompt in the process.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("›").with_fg(Color::LightRed))
        .with_highlighted_option_prefix(Styled::new("➤").with_fg(Color::LightBlue));
    inquire::set_global_render_config(config);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    ShowWindow,
    Flip,
    Close,
    Open,
    Clear,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 6] = [
        MenuAction::ShowWindow,
        MenuAction::Flip,
        MenuAction::Close,
        MenuAction::Open,
        MenuAction::Clear,
        MenuAction::Quit,
    ];
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuAction::ShowWindow => "Show calendar",
            MenuAction::Flip => "Flip a day (closed <-> open)",
            MenuAction::Close => "Force a day closed",
            MenuAction::Open => "Force a day open",
            MenuAction::Clear => "Clear a day (back to auto)",
            MenuAction::Quit => "Quit",
        };
        f.write_str(label)
    }
}

fn describe(date: CivilDate, effective: EffectiveStatus) -> String {
    match effective {
        Some(OverrideStatus::ForcedClosed) => format!("{} is now closed (manual)", date),
        Some(OverrideStatus::ForcedOpen) => format!("{} is now open (manual)", date),
        None => format!("{} reverted to the regular schedule (open)", date),
    }
}

/// `None` when the user cancelled (Esc / Ctrl-C).
fn prompt<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            Ok(None)
        }
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    service: Arc<CalendarService>,
    window_months: u32,
}

impl TuiInputPort {
    pub fn new(service: Arc<CalendarService>, window_months: u32) -> Self {
        Self {
            service,
            window_months,
        }
    }

    fn ask_date(&self) -> Result<Option<CivilDate>, DomainError> {
        let default = self.service.today().date_key();
        let Some(input) = prompt(
            Text::new("Date (YYYY-MM-DD):")
                .with_default(&default)
                .prompt(),
        )?
        else {
            return Ok(None);
        };
        match CivilDate::parse(input.trim()) {
            Ok(date) => Ok(Some(date)),
            Err(e) => {
                println!("{}", e);
                Ok(None)
            }
        }
    }

    async fn toggle(&self, request: Option<ToggleRequest>) -> Result<(), DomainError> {
        let Some(date) = self.ask_date()? else {
            return Ok(());
        };
        let request = match request {
            Some(r) => r,
            None => ToggleRequest::flip(self.service.is_closed(date).await),
        };
        match self.service.apply_toggle(date, request).await {
            Ok(effective) => println!("{}", describe(date, effective)),
            Err(e) => println!("Save failed, nothing changed: {}", e),
        }
        Ok(())
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let choice =
                prompt(Select::new("Closed-day calendar", MenuAction::ALL.to_vec()).prompt())?;
            match choice {
                None | Some(MenuAction::Quit) => return Ok(()),
                Some(MenuAction::ShowWindow) => {
                    let window = self.service.get_calendar_window(self.window_months).await;
                    println!("\n{}\n", calendar_view::render_window(&window));
                }
                Some(MenuAction::Flip) => self.toggle(None).await?,
                Some(MenuAction::Close) => self.toggle(Some(ToggleRequest::ForcedClosed)).await?,
                Some(MenuAction::Open) => self.toggle(Some(ToggleRequest::ForcedOpen)).await?,
                Some(MenuAction::Clear) => self.toggle(Some(ToggleRequest::Clear)).await?,
            }
        }
    }
}
