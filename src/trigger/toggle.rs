use std::str::FromStr;

use super::TriggerEventKind;
use crate::error::ConfigError;

/// What a toggled tween does when its trigger crosses a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleAction {
    #[default]
    None,
    Play,
    Pause,
    Resume,
    Reverse,
    Restart,
    Reset,
    Complete,
}

impl FromStr for ToggleAction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "none" => ToggleAction::None,
            "play" => ToggleAction::Play,
            "pause" => ToggleAction::Pause,
            "resume" => ToggleAction::Resume,
            "reverse" => ToggleAction::Reverse,
            "restart" => ToggleAction::Restart,
            "reset" => ToggleAction::Reset,
            "complete" => ToggleAction::Complete,
            _ => return Err(ConfigError::InvalidToggleActions(s.to_string())),
        })
    }
}

/// Actions for enter, leave, enter-back and leave-back, in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleActions {
    pub on_enter: ToggleAction,
    pub on_leave: ToggleAction,
    pub on_enter_back: ToggleAction,
    pub on_leave_back: ToggleAction,
}

impl ToggleActions {
    /// Play on enter and nothing else.
    pub const PLAY: Self = Self {
        on_enter: ToggleAction::Play,
        on_leave: ToggleAction::None,
        on_enter_back: ToggleAction::None,
        on_leave_back: ToggleAction::None,
    };

    /// Play on enter, reverse when scrolled back above the start.
    pub const PLAY_REVERSE: Self = Self {
        on_enter: ToggleAction::Play,
        on_leave: ToggleAction::None,
        on_enter_back: ToggleAction::None,
        on_leave_back: ToggleAction::Reverse,
    };

    pub fn action_for(&self, kind: TriggerEventKind) -> ToggleAction {
        match kind {
            TriggerEventKind::Enter => self.on_enter,
            TriggerEventKind::Leave => self.on_leave,
            TriggerEventKind::EnterBack => self.on_enter_back,
            TriggerEventKind::LeaveBack => self.on_leave_back,
            TriggerEventKind::Update => ToggleAction::None,
        }
    }
}

impl Default for ToggleActions {
    fn default() -> Self {
        Self::PLAY
    }
}

impl FromStr for ToggleActions {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let actions = s
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<ToggleAction>, _>>()
            .map_err(|_| ConfigError::InvalidToggleActions(s.to_string()))?;

        match actions.as_slice() {
            [on_enter, on_leave, on_enter_back, on_leave_back] => Ok(Self {
                on_enter: *on_enter,
                on_leave: *on_leave,
                on_enter_back: *on_enter_back,
                on_leave_back: *on_leave_back,
            }),
            _ => Err(ConfigError::InvalidToggleActions(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reveal_actions() {
        let actions: ToggleActions = "play none none reverse".parse().unwrap();
        assert_eq!(actions, ToggleActions::PLAY_REVERSE);
        assert_eq!(
            actions.action_for(TriggerEventKind::LeaveBack),
            ToggleAction::Reverse
        );
    }

    #[test]
    fn test_parse_rejects_wrong_arity() {
        assert!("play none".parse::<ToggleActions>().is_err());
        assert!("play none none bounce".parse::<ToggleActions>().is_err());
    }
}
